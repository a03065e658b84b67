use crate::{cli::console::Console, s3::StorageClient};
use anyhow::{Result, anyhow};
use std::io::{BufRead, Write};

const NO_ARGUMENTS: &str = "\nNo arguments specified. Will simply list your S3 buckets.\
\nIf you wish to create a bucket, supply a valid, globally unique bucket name.";

const USAGE: &str = "\nToo many arguments specified.\
\n\ns3bucket - A utility to list your S3 buckets and optionally create a new one.\
\n\nUsage: s3bucket [bucket_name]\
\n - bucket_name: A valid, globally unique bucket name.\
\n - If bucket_name isn't supplied, this utility simply lists your buckets.";

/// Bucket to create out of the positional arguments, more than one is a usage error
///
/// # Errors
///
/// Will return `Err` with the usage text if there is more than one argument
pub fn parse_args(args: &[String]) -> Result<Option<&str>> {
    match args {
        [] => Ok(None),
        [bucket] => Ok(Some(bucket.as_str())),
        _ => Err(anyhow!(USAGE)),
    }
}

/// Only a single `y` or `Y` confirms
#[must_use]
pub fn is_confirmed(input: &str) -> bool {
    input.trim().to_uppercase() == "Y"
}

/// Create, list and optionally delete buckets, one remote call at a time
#[derive(Debug)]
pub struct Session<C, R, W> {
    client: C,
    console: Console<R, W>,
}

impl<C, R, W> Session<C, R, W>
where
    C: StorageClient,
    R: BufRead,
    W: Write,
{
    pub const fn new(client: C, console: Console<R, W>) -> Self {
        Self { client, console }
    }

    pub fn into_inner(self) -> (C, Console<R, W>) {
        (self.client, self.console)
    }

    /// Failures of the storage client are reported and the session goes on
    ///
    /// # Errors
    ///
    /// Will return `Err` only if the console can not be read or written
    pub async fn run(&mut self, bucket: Option<&str>) -> Result<()> {
        match bucket {
            Some(bucket) => self.create_bucket(bucket).await?,
            None => self.console.println(NO_ARGUMENTS)?,
        }

        self.list_buckets().await?;

        if self.delete_decision()? {
            self.delete_bucket().await?;
        }

        Ok(())
    }

    async fn create_bucket(&mut self, bucket: &str) -> Result<()> {
        self.console
            .println(format_args!("\nCreating bucket {bucket}..."))?;

        match self.client.create_bucket(bucket).await {
            Ok(status) => self.console.println(format_args!("Result: {status}")),
            Err(e) => {
                log::debug!("create bucket {bucket} failed: {e:?}");
                self.console
                    .println("Caught exception when creating a bucket:")?;
                self.console.println(format_args!("{e:#}"))
            }
        }
    }

    async fn list_buckets(&mut self) -> Result<()> {
        self.console.println("\nGetting a list of your buckets...")?;

        match self.client.list_buckets().await {
            Ok(buckets) => {
                self.console
                    .println(format_args!("Number of buckets: {}", buckets.len()))?;
                for bucket in &buckets {
                    self.console.println(bucket)?;
                }
                Ok(())
            }
            Err(e) => {
                log::debug!("list buckets failed: {e:?}");
                self.console
                    .println("Caught exception when listing buckets:")?;
                self.console.println(format_args!("{e:#}"))
            }
        }
    }

    fn delete_decision(&mut self) -> Result<bool> {
        self.console.println("Would you like to delete a bucket?")?;

        // end of input counts as no
        let answer = self.console.read_line()?.unwrap_or_default();

        Ok(is_confirmed(&answer))
    }

    async fn delete_bucket(&mut self) -> Result<()> {
        self.console.println(
            "\nPlease enter the name of the bucket that you would like to delete.\
\nIf the bucket has contents in it, you will not be able to delete it.\
\nMake your entry below:",
        )?;

        // bucket names never contain whitespace
        let bucket = self.console.read_line()?.unwrap_or_default();
        let bucket = bucket.trim();

        if bucket.is_empty() {
            return self.console.println("No bucket name entered, nothing to delete.");
        }

        self.console
            .println(format_args!("Bucket to be deleted: {bucket}"))?;

        match self.client.delete_bucket(bucket).await {
            Ok(status) => self.console.println(format_args!("Result: {status}")),
            Err(e) => {
                log::debug!("delete bucket {bucket} failed: {e:?}");
                self.console
                    .println("There was an issue with deleting the bucket:")?;
                self.console.println(format_args!("{e:#}"))
            }
        }
    }
}
