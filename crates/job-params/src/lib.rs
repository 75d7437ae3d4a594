use std::collections::BTreeMap;

/// Immutable key/value bag holding the configuration of a stream job.
///
/// Built once from Java-style property text (`key=value` lines) or from the
/// process environment, then only read. Lookups come with typed, defaulted
/// accessors so callers never deal with missing keys themselves.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Parameters {
    values: BTreeMap<String, String>,
}

impl Parameters {
    /// Parses property-formatted text into a parameter bag.
    pub fn from_properties(text: &str) -> anyhow::Result<Parameters> {
        let values = java_properties::read(text.as_bytes())?
            .into_iter()
            .collect();
        Ok(Parameters { values })
    }

    /// Snapshot of the process environment, used as the degraded fallback
    /// when a config source cannot be read.
    pub fn from_env() -> Parameters {
        Parameters {
            values: std::env::vars().collect(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn get_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.get(key).unwrap_or(default)
    }

    pub fn get_long(&self, key: &str) -> Option<i64> {
        self.get(key).and_then(|value| value.parse().ok())
    }

    /// Missing or unparsable values yield `default`.
    pub fn get_long_or(&self, key: &str, default: i64) -> i64 {
        self.get_long(key).unwrap_or(default)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Keys in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }
}

impl FromIterator<(String, String)> for Parameters {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Parameters {
            values: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::Parameters;
    use pretty_assertions::assert_eq;
    use serial_test::serial;

    #[test]
    fn parse_single_pair() {
        let parameters = Parameters::from_properties("a=1").unwrap();
        assert_eq!(parameters.get("a"), Some("1"));
        assert_eq!(parameters.len(), 1);
    }

    #[test]
    fn parse_roundtrip() {
        let parameters = Parameters::from_properties("x=1\ny=2\n").unwrap();
        assert_eq!(parameters.get("x"), Some("1"));
        assert_eq!(parameters.get("y"), Some("2"));
    }

    #[test]
    fn parse_ignores_comments_and_blank_lines() {
        let parameters = Parameters::from_properties("# job config\n\nkey=value\n").unwrap();
        assert_eq!(parameters.get("key"), Some("value"));
        assert_eq!(parameters.len(), 1);
    }

    #[test]
    fn defaulted_lookups() {
        let parameters = Parameters::from_properties("count=42\nlabel=abc").unwrap();
        assert_eq!(parameters.get_or("label", "fallback"), "abc");
        assert_eq!(parameters.get_or("missing", "fallback"), "fallback");
        assert_eq!(parameters.get_long_or("count", 0), 42);
        assert_eq!(parameters.get_long_or("missing", 7), 7);
        // not a number, so the default wins
        assert_eq!(parameters.get_long_or("label", 7), 7);
    }

    #[test]
    fn keys_are_sorted() {
        let parameters = Parameters::from_properties("b=2\na=1\nc=3").unwrap();
        let keys: Vec<&str> = parameters.keys().collect();
        assert_eq!(keys, vec!["a", "b", "c"]);
    }

    #[test]
    #[serial]
    fn env_snapshot_sees_process_variables() {
        std::env::set_var("JOB_PARAMS_TEST_KEY", "present");

        let parameters = Parameters::from_env();
        assert_eq!(parameters.get("JOB_PARAMS_TEST_KEY"), Some("present"));

        std::env::remove_var("JOB_PARAMS_TEST_KEY");
    }
}
