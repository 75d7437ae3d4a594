use std::str::FromStr;

use async_trait::async_trait;
use percent_encoding::percent_decode_str;
use url::Url;

/// Minimal capability the loaders need from an object-storage service.
///
/// Production code uses [`S3Store`]; tests substitute an in-memory map so the
/// loaders run without a network.
#[async_trait]
pub trait ObjectStore {
    /// Fetches the full object body. The underlying response stream must be
    /// drained before this returns, on success and on failure.
    async fn fetch(&self, bucket: &str, key: &str) -> anyhow::Result<Vec<u8>>;
}

/// Bucket/key pair parsed from an `s3://bucket/path/to/key` URI.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct S3Uri {
    bucket: String,
    key: String,
}

impl S3Uri {
    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    pub fn key(&self) -> &str {
        &self.key
    }
}

impl FromStr for S3Uri {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let url = Url::parse(s)?;
        if url.scheme() != "s3" {
            anyhow::bail!("expected an s3:// uri, got: {s}");
        }
        let bucket = url
            .host_str()
            .filter(|bucket| !bucket.is_empty())
            .ok_or_else(|| anyhow::anyhow!("missing bucket in uri: {s}"))?;
        // Url keeps the path percent-encoded; object keys are stored decoded.
        let key = percent_decode_str(url.path().trim_start_matches('/')).decode_utf8()?;
        if key.is_empty() {
            anyhow::bail!("missing object key in uri: {s}");
        }
        Ok(S3Uri {
            bucket: bucket.to_string(),
            key: key.into_owned(),
        })
    }
}

/// [`ObjectStore`] backed by the AWS S3 SDK.
pub struct S3Store {
    client: aws_sdk_s3::Client,
}

impl S3Store {
    pub fn new(client: aws_sdk_s3::Client) -> S3Store {
        S3Store { client }
    }

    /// Builds a client from the ambient AWS environment (credentials chain,
    /// region, endpoint overrides).
    pub async fn from_env() -> S3Store {
        let config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
        S3Store {
            client: aws_sdk_s3::Client::new(&config),
        }
    }
}

#[async_trait]
impl ObjectStore for S3Store {
    async fn fetch(&self, bucket: &str, key: &str) -> anyhow::Result<Vec<u8>> {
        let object = self
            .client
            .get_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await?;
        // collect() consumes the body stream entirely, so no handle survives
        // this call on either path.
        let body = object.body.collect().await?;
        Ok(body.into_bytes().to_vec())
    }
}

#[cfg(test)]
mod tests {
    use crate::S3Uri;
    use pretty_assertions::assert_eq;

    #[test]
    fn parse_bucket_and_key() {
        let uri: S3Uri = "s3://my-bucket/jobs/order-stream.properties"
            .parse()
            .unwrap();
        assert_eq!(uri.bucket(), "my-bucket");
        assert_eq!(uri.key(), "jobs/order-stream.properties");
    }

    #[test]
    fn parse_decodes_percent_encoded_key() {
        let uri: S3Uri = "s3://my-bucket/jobs/my%20job.properties".parse().unwrap();
        assert_eq!(uri.key(), "jobs/my job.properties");
    }

    #[test]
    fn reject_non_s3_scheme() {
        let result = "https://my-bucket/config.properties".parse::<S3Uri>();
        assert!(result.is_err());
    }

    #[test]
    fn reject_missing_bucket() {
        assert!("s3:///key".parse::<S3Uri>().is_err());
    }

    #[test]
    fn reject_missing_key() {
        assert!("s3://my-bucket".parse::<S3Uri>().is_err());
        assert!("s3://my-bucket/".parse::<S3Uri>().is_err());
    }
}
