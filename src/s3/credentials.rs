use crate::s3::profile::ProfileFile;
use anyhow::Result;
use secrecy::{ExposeSecret, SecretString};
use std::env;

#[derive(Debug)]
pub struct Credentials {
    // AWS_ACCESS_KEY_ID
    key: String,
    // AWS_SECRET_ACCESS_KEY
    secret: SecretString,
    // AWS_SESSION_TOKEN, only for temporary credentials
    token: Option<SecretString>,
}

impl Credentials {
    /// Environment variables take priority over the passed keys
    #[must_use]
    pub fn new(access: &str, secret: &str) -> Self {
        let key = env::var("AWS_ACCESS_KEY_ID").unwrap_or_else(|_| access.to_string());
        let secret = env::var("AWS_SECRET_ACCESS_KEY").unwrap_or_else(|_| secret.to_string());
        let token = env::var("AWS_SESSION_TOKEN")
            .ok()
            .filter(|token| !token.is_empty())
            .map(SecretString::from);
        Self {
            key,
            secret: SecretString::from(secret),
            token,
        }
    }

    /// Session token of temporary credentials, `AWS_SESSION_TOKEN` still wins
    #[must_use]
    pub fn with_session_token(mut self, token: Option<&str>) -> Self {
        if self.token.is_none() {
            self.token = token
                .filter(|token| !token.is_empty())
                .map(|token| SecretString::from(token.to_string()));
        }
        self
    }

    /// Keys from the AWS shared credentials file, environment still wins
    ///
    /// # Errors
    ///
    /// Will return `Err` if the credentials file can not be read
    pub fn from_profile(profile: &str) -> Result<Option<Self>> {
        Ok(ProfileFile::Credentials.read(profile)?.and_then(|pairs| {
            let access = pairs.get("aws_access_key_id")?;
            let secret = pairs.get("aws_secret_access_key")?;
            let token = pairs.get("aws_session_token").map(String::as_str);
            Some(Self::new(access, secret).with_session_token(token))
        }))
    }

    /// Get a reference to the access key ID.
    #[must_use]
    pub fn aws_access_key_id(&self) -> &str {
        &self.key
    }

    /// Get a reference to the secret access key.
    #[must_use]
    pub fn aws_secret_access_key(&self) -> &str {
        self.secret.expose_secret()
    }

    #[must_use]
    pub fn aws_session_token(&self) -> Option<&str> {
        self.token.as_ref().map(ExposeSecret::expose_secret)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.key.is_empty() || self.secret.expose_secret().is_empty()
    }
}
