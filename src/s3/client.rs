use crate::s3::{S3, actions};
use anyhow::Result;
use http::StatusCode;

/// Canned ACL applied to created buckets
pub const DEFAULT_ACL: &str = "private";

/// Bucket operations the session needs from an object storage service
pub trait StorageClient {
    /// Create `bucket`, returns the status code of the response
    fn create_bucket(&self, bucket: &str) -> impl Future<Output = Result<StatusCode>>;

    /// Names of all buckets owned by the caller, in the order the service returns them
    fn list_buckets(&self) -> impl Future<Output = Result<Vec<String>>>;

    /// Delete `bucket`, fails when it does not exist or is not empty
    fn delete_bucket(&self, bucket: &str) -> impl Future<Output = Result<StatusCode>>;
}

impl StorageClient for S3 {
    async fn create_bucket(&self, bucket: &str) -> Result<StatusCode> {
        actions::CreateBucket::new(bucket, DEFAULT_ACL)
            .request(self)
            .await
    }

    async fn list_buckets(&self) -> Result<Vec<String>> {
        Ok(actions::ListBuckets::new().request(self).await?.names())
    }

    async fn delete_bucket(&self, bucket: &str) -> Result<StatusCode> {
        actions::DeleteBucket::new(bucket).request(self).await
    }
}
