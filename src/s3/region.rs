use std::{
    fmt::{self, Display, Formatter},
    str::FromStr,
};

/// Region used when nothing else is configured, also the signing region for
/// custom endpoints that don't name one
pub const DEFAULT_REGION: &str = "us-east-1";

// https://docs.aws.amazon.com/general/latest/gr/s3.html
const AWS_REGIONS: &[&str] = &[
    "af-south-1",
    "ap-east-1",
    "ap-northeast-1",
    "ap-northeast-2",
    "ap-northeast-3",
    "ap-south-1",
    "ap-south-2",
    "ap-southeast-1",
    "ap-southeast-2",
    "ap-southeast-3",
    "ap-southeast-4",
    "ca-central-1",
    "cn-north-1",
    "cn-northwest-1",
    "eu-central-1",
    "eu-central-2",
    "eu-north-1",
    "eu-south-1",
    "eu-south-2",
    "eu-west-1",
    "eu-west-2",
    "eu-west-3",
    "il-central-1",
    "me-central-1",
    "me-south-1",
    "sa-east-1",
    "us-east-1",
    "us-east-2",
    "us-gov-east-1",
    "us-gov-west-1",
    "us-west-1",
    "us-west-2",
];

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Region {
    // AWS region, endpoint s3.<name>.amazonaws.com
    Aws(&'static str),

    // S3 compatible provider, endpoint may include the scheme and port
    Custom { name: String, endpoint: String },
}

impl Region {
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Aws(name) => *name,
            Self::Custom { name, .. } => name.as_str(),
        }
    }

    #[must_use]
    pub fn endpoint(&self) -> String {
        match self {
            Self::Aws(name) if name.starts_with("cn-") => format!("s3.{name}.amazonaws.com.cn"),
            Self::Aws(name) => format!("s3.{name}.amazonaws.com"),
            Self::Custom { endpoint, .. } => endpoint.clone(),
        }
    }

    /// `LocationConstraint` for `CreateBucket`, us-east-1 must not send one
    #[must_use]
    pub fn location_constraint(&self) -> Option<&str> {
        Some(self.name()).filter(|name| !name.is_empty() && *name != DEFAULT_REGION)
    }
}

impl Default for Region {
    fn default() -> Self {
        Self::Aws(DEFAULT_REGION)
    }
}

impl FromStr for Region {
    type Err = ParseRegionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let v = s.trim().to_lowercase();
        AWS_REGIONS
            .iter()
            .copied()
            .find(|r| *r == v)
            .map(Self::Aws)
            .ok_or_else(|| ParseRegionError::new(s))
    }
}

impl Display for Region {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{} ({})", self.name(), self.endpoint())
    }
}

/// An error produced when attempting to convert a `str` into a `Region` fails.
#[derive(Debug, PartialEq, Eq)]
pub struct ParseRegionError {
    message: String,
}

impl ParseRegionError {
    #[must_use]
    pub fn new(input: &str) -> Self {
        Self {
            message: format!("Not a valid AWS region: {input}"),
        }
    }
}

impl std::error::Error for ParseRegionError {}

impl Display for ParseRegionError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}
