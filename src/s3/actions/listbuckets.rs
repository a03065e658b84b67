use crate::s3::{
    S3,
    actions::{Action, response_error},
    request,
    responses::ListAllMyBucketsResult,
    tools,
};
use anyhow::{Context, Result, anyhow};
use quick_xml::de::from_str;
use reqwest::Method;
use std::collections::BTreeMap;

#[derive(Debug, Default)]
pub struct ListBuckets;

impl ListBuckets {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// # Errors
    ///
    /// Will return `Err` if can not make the request or parse the response
    pub async fn request(&self, s3: &S3) -> Result<ListAllMyBucketsResult> {
        let (url, headers) = &self.sign(s3, tools::sha256_digest("").as_ref())?;
        let response = request::request(url.clone(), self.http_method(), headers, None).await?;

        if response.status().is_success() {
            let body = response.text().await?;
            from_str(&body).context("unable to parse ListAllMyBucketsResult")
        } else {
            Err(anyhow!(response_error(response).await?))
        }
    }
}

// https://docs.aws.amazon.com/AmazonS3/latest/API/API_ListBuckets.html
impl Action for ListBuckets {
    fn http_method(&self) -> Method {
        Method::GET
    }

    fn headers(&self) -> Option<BTreeMap<&str, &str>> {
        None
    }

    fn query_pairs(&self) -> Option<BTreeMap<&str, &str>> {
        None
    }

    fn path(&self) -> Option<Vec<&str>> {
        None
    }
}
