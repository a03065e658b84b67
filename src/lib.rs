//! Create, list and delete S3 buckets from the command line.

pub mod cli;
pub mod s3;
