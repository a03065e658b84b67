pub mod actions;
pub mod client;
pub mod credentials;
pub mod profile;
pub mod region;
pub mod request;
pub mod responses;
pub mod signature;
pub mod tools;

pub use self::{
    client::StorageClient, credentials::Credentials, region::Region, signature::Signature,
};

use anyhow::{Context, Result};
use std::fmt;
use url::Url;

#[derive(Debug)]
pub struct S3 {
    // AWS Credentials
    credentials: Credentials,
    // AWS Region
    region: Region,
}

// Amazon S3 API Reference
// <https://docs.aws.amazon.com/AmazonS3/latest/API/API_Operations.html>
impl S3 {
    #[must_use]
    pub const fn new(credentials: Credentials, region: Region) -> Self {
        Self {
            credentials,
            region,
        }
    }

    #[must_use]
    pub const fn region(&self) -> &Region {
        &self.region
    }

    #[must_use]
    pub const fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Base URL of the service, buckets are addressed path-style below it
    ///
    /// # Errors
    ///
    /// Will return `Err` if the endpoint is not a valid URL
    pub fn endpoint(&self) -> Result<Url> {
        let endpoint = self.region.endpoint();
        let endpoint = if endpoint.contains("://") {
            endpoint
        } else {
            format!("https://{endpoint}")
        };

        Url::parse(&endpoint).with_context(|| format!("invalid endpoint: {endpoint}"))
    }
}

impl fmt::Display for S3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "access key: {}", self.credentials.aws_access_key_id())?;
        write!(f, "region: {}", self.region)
    }
}
