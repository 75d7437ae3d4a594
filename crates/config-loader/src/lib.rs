use std::path::Path;

use job_params::Parameters;

mod store;
pub use store::{ObjectStore, S3Store, S3Uri};

/// Parses the property file at `path` into a [`Parameters`] bag.
///
/// With `fail_on_error` the underlying read or parse error is returned
/// verbatim; without it the bag falls back to the process environment.
pub fn load_parameters_from_file(
    path: impl AsRef<Path>,
    fail_on_error: bool,
) -> anyhow::Result<Parameters> {
    let path = path.as_ref();
    log::info!("loading parameters from file: {}", path.display());
    or_fallback(read_parameters(path), fail_on_error, Parameters::from_env)
}

/// Reads the file at `path` as text. Fail-soft fallback is the empty string.
pub fn load_text_from_file(path: impl AsRef<Path>, fail_on_error: bool) -> anyhow::Result<String> {
    let path = path.as_ref();
    log::info!("loading text from file: {}", path.display());
    let result = std::fs::read_to_string(path).map_err(Into::into);
    or_fallback(result, fail_on_error, String::new)
}

/// Fetches `uri` (an `s3://bucket/key` location) from the object store and
/// parses the body as a property file. Same fail-fast/fail-soft contract as
/// [`load_parameters_from_file`].
pub async fn load_parameters_from_object_store(
    store: &impl ObjectStore,
    uri: &str,
    fail_on_error: bool,
) -> anyhow::Result<Parameters> {
    log::info!("loading parameters from object store: {uri}");
    let result = fetch_parameters(store, uri).await;
    or_fallback(result, fail_on_error, Parameters::from_env)
}

/// Fetches `uri` from the object store as text. Fail-soft fallback is the
/// empty string.
pub async fn load_text_from_object_store(
    store: &impl ObjectStore,
    uri: &str,
    fail_on_error: bool,
) -> anyhow::Result<String> {
    log::info!("loading text from object store: {uri}");
    let result = fetch_text(store, uri).await;
    or_fallback(result, fail_on_error, String::new)
}

fn read_parameters(path: &Path) -> anyhow::Result<Parameters> {
    let text = std::fs::read_to_string(path)?;
    Parameters::from_properties(&text)
}

async fn fetch_parameters(store: &impl ObjectStore, uri: &str) -> anyhow::Result<Parameters> {
    let text = fetch_text(store, uri).await?;
    Parameters::from_properties(&text)
}

async fn fetch_text(store: &impl ObjectStore, uri: &str) -> anyhow::Result<String> {
    let uri: S3Uri = uri.parse()?;
    let body = store.fetch(uri.bucket(), uri.key()).await?;
    Ok(String::from_utf8(body)?)
}

// The swallowed error is intentionally not logged; fail-soft callers get the
// documented fallback value and nothing else.
fn or_fallback<T>(
    result: anyhow::Result<T>,
    fail_on_error: bool,
    fallback: impl FnOnce() -> T,
) -> anyhow::Result<T> {
    match result {
        Ok(value) => Ok(value),
        Err(error) if fail_on_error => Err(error),
        Err(_) => Ok(fallback()),
    }
}
