//! Actions
//! <https://docs.aws.amazon.com/AmazonS3/latest/API/API_Operations.html>

use crate::s3::{S3, responses::ErrorResponse, signature::Signature};
use anyhow::{Result, anyhow};
use quick_xml::de::from_str;
use reqwest::{Method, Response};
use std::collections::BTreeMap;
use url::Url;

// <https://docs.aws.amazon.com/AmazonS3/latest/API/API_CreateBucket.html>
mod createbucket;
pub use self::createbucket::CreateBucket;

// <https://docs.aws.amazon.com/AmazonS3/latest/API/API_ListBuckets.html>
mod listbuckets;
pub use self::listbuckets::ListBuckets;

// <https://docs.aws.amazon.com/AmazonS3/latest/API/API_DeleteBucket.html>
mod deletebucket;
pub use self::deletebucket::DeleteBucket;

pub trait Action {
    // headers to send in the request
    fn headers(&self) -> Option<BTreeMap<&str, &str>>;

    // method to use GET/PUT...
    fn http_method(&self) -> Method;

    // URL query pairs
    fn query_pairs(&self) -> Option<BTreeMap<&str, &str>>;

    // URL path
    fn path(&self) -> Option<Vec<&str>>;

    /// # Errors
    ///
    /// Will return `Err` if the signature can not be created
    fn sign(&self, s3: &S3, hash_payload: &[u8]) -> Result<(Url, BTreeMap<String, String>)> {
        let mut url = s3.endpoint()?;

        // bucket name, path-style
        if let Some(path) = self.path() {
            url.path_segments_mut()
                .map_err(|()| anyhow!("endpoint cannot be a base: {}", s3.region().endpoint()))?
                .pop_if_empty()
                .extend(path);
        }

        if let Some(pairs) = &self.query_pairs() {
            for (k, v) in pairs {
                url.query_pairs_mut().append_pair(k, v);
            }
        }

        let headers =
            Signature::new(s3, "s3", self.http_method()).sign(&url, hash_payload, self.headers());

        Ok((url, headers))
    }
}

/// Build a readable message out of a failed response
///
/// # Errors
///
/// Will return `Err` if the response body can not be read
pub async fn response_error(response: Response) -> Result<String> {
    let mut error: BTreeMap<&str, String> = BTreeMap::new();
    error.insert("HTTP Status Code", response.status().to_string());

    if let Some(x_amz_id_2) = response.headers().get("x-amz-id-2") {
        error.insert("x-amz-id-2", x_amz_id_2.to_str()?.to_string());
    }

    if let Some(rid) = response.headers().get("x-amz-request-id") {
        error.insert("Request ID", rid.to_str()?.to_string());
    }

    let body = response.text().await?;

    if let Ok(e) = from_str::<ErrorResponse>(&body) {
        error.insert("Code", e.code);
        error.insert("Message", e.message);
    } else if !body.trim().is_empty() {
        error.insert("Response", body);
    }

    Ok(error
        .iter()
        .map(|(k, v)| format!("{k}: {v}"))
        .collect::<Vec<String>>()
        .join("\n"))
}
