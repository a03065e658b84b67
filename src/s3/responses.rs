use serde::Deserialize;

/// Owner information for the bucket
#[derive(Deserialize, Debug, Clone, Default)]
pub struct Owner {
    #[serde(rename = "DisplayName")]
    /// Owner's name.
    pub display_name: Option<String>,
    #[serde(rename = "ID")]
    /// Owner's canonical ID.
    pub id: Option<String>,
}

/// List of Buckets
#[derive(Deserialize, Debug, Clone, Default)]
pub struct Buckets {
    #[serde(rename = "Bucket", default)]
    pub bucket: Vec<Bucket>,
}

/// An individual Bucket
#[derive(Deserialize, Debug, Clone)]
pub struct Bucket {
    /// Bucket Name
    #[serde(rename = "Name")]
    pub name: String,
    /// Bucket creation date (timestamp)
    #[serde(rename = "CreationDate")]
    pub creation_date: Option<String>,
}

/// The parsed result of `ListBuckets`
#[derive(Deserialize, Debug, Clone)]
pub struct ListAllMyBucketsResult {
    /// Bucket owner
    #[serde(rename = "Owner")]
    pub owner: Option<Owner>,
    /// list of Buckets
    #[serde(rename = "Buckets", default)]
    pub buckets: Buckets,
}

impl ListAllMyBucketsResult {
    /// Bucket names in the order returned by the service
    #[must_use]
    pub fn names(self) -> Vec<String> {
        self.buckets.bucket.into_iter().map(|b| b.name).collect()
    }
}

#[derive(Deserialize, Debug)]
pub struct ErrorResponse {
    #[serde(rename = "Code")]
    pub code: String,
    #[serde(rename = "Message", default)]
    pub message: String,
    #[serde(rename = "Resource")]
    pub resource: Option<String>,
    #[serde(rename = "RequestId")]
    pub request_id: Option<String>,
}
