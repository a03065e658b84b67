use crate::s3::{
    S3,
    actions::{Action, response_error},
    request, tools,
};
use anyhow::{Result, anyhow};
use bytes::Bytes;
use reqwest::{Method, StatusCode};
use std::collections::BTreeMap;

#[derive(Debug)]
pub struct CreateBucket<'a> {
    bucket: &'a str,
    acl: &'a str,
}

impl<'a> CreateBucket<'a> {
    #[must_use]
    pub const fn new(bucket: &'a str, acl: &'a str) -> Self {
        Self { bucket, acl }
    }

    /// Request body, empty when the region takes no `LocationConstraint`
    #[must_use]
    pub fn configuration(s3: &S3) -> String {
        s3.region()
            .location_constraint()
            .map(|location| {
                format!(
                    r#"<?xml version="1.0" encoding="UTF-8"?>
<CreateBucketConfiguration xmlns="http://s3.amazonaws.com/doc/2006-03-01/">
    <LocationConstraint>{location}</LocationConstraint>
</CreateBucketConfiguration>"#
                )
            })
            .unwrap_or_default()
    }

    /// # Errors
    ///
    /// Will return `Err` if can not make the request or the bucket was not created
    pub async fn request(&self, s3: &S3) -> Result<StatusCode> {
        let xml = Self::configuration(s3);

        let (url, headers) = &self.sign(s3, tools::sha256_digest(&xml).as_ref())?;

        let body = (!xml.is_empty()).then(|| Bytes::from(xml));

        let response = request::request(url.clone(), self.http_method(), headers, body).await?;

        if response.status().is_success() {
            if let Some(location) = response.headers().get("location") {
                log::info!("location: {}", location.to_str()?);
            }
            Ok(response.status())
        } else {
            Err(anyhow!(response_error(response).await?))
        }
    }
}

// <https://docs.aws.amazon.com/AmazonS3/latest/API/API_CreateBucket.html>
impl Action for CreateBucket<'_> {
    fn http_method(&self) -> Method {
        Method::PUT
    }

    fn headers(&self) -> Option<BTreeMap<&str, &str>> {
        let mut map: BTreeMap<&str, &str> = BTreeMap::new();

        map.insert("x-amz-acl", self.acl);

        Some(map)
    }

    fn query_pairs(&self) -> Option<BTreeMap<&str, &str>> {
        None
    }

    fn path(&self) -> Option<Vec<&str>> {
        Some(vec![self.bucket])
    }
}
