use crate::s3::{
    S3,
    actions::{Action, response_error},
    request, tools,
};
use anyhow::{Result, anyhow};
use reqwest::{Method, StatusCode};
use std::collections::BTreeMap;

#[derive(Debug)]
pub struct DeleteBucket<'a> {
    bucket: &'a str,
}

impl<'a> DeleteBucket<'a> {
    #[must_use]
    pub const fn new(bucket: &'a str) -> Self {
        Self { bucket }
    }

    /// # Errors
    ///
    /// Will return `Err` if can not make the request, the bucket does not exist or is not empty
    pub async fn request(&self, s3: &S3) -> Result<StatusCode> {
        let (url, headers) = &self.sign(s3, tools::sha256_digest("").as_ref())?;
        let response = request::request(url.clone(), self.http_method(), headers, None).await?;

        if response.status().is_success() {
            Ok(response.status())
        } else {
            Err(anyhow!(response_error(response).await?))
        }
    }
}

// https://docs.aws.amazon.com/AmazonS3/latest/API/API_DeleteBucket.html
impl Action for DeleteBucket<'_> {
    fn http_method(&self) -> Method {
        Method::DELETE
    }

    fn headers(&self) -> Option<BTreeMap<&str, &str>> {
        None
    }

    fn query_pairs(&self) -> Option<BTreeMap<&str, &str>> {
        None
    }

    fn path(&self) -> Option<Vec<&str>> {
        Some(vec![self.bucket])
    }
}
