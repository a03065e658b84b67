//! Reader for the AWS shared `credentials` and `config` files
//! <https://docs.aws.amazon.com/sdkref/latest/guide/file-format.html>

use anyhow::{Context, Result};
use ini::{Ini, ParseOption};
use std::{collections::BTreeMap, env, path::PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileFile {
    Credentials,
    Config,
}

impl ProfileFile {
    /// Location of the file, honoring `AWS_SHARED_CREDENTIALS_FILE` and `AWS_CONFIG_FILE`
    #[must_use]
    pub fn path(self) -> Option<PathBuf> {
        let (var, name) = match self {
            Self::Credentials => ("AWS_SHARED_CREDENTIALS_FILE", "credentials"),
            Self::Config => ("AWS_CONFIG_FILE", "config"),
        };

        env::var_os(var)
            .map(PathBuf::from)
            .or_else(|| dirs::home_dir().map(|home| home.join(".aws").join(name)))
    }

    // the config file prefixes profiles with `profile `, `[default]` is also valid there
    fn sections(self, profile: &str) -> Vec<String> {
        match self {
            Self::Credentials => vec![profile.to_string()],
            Self::Config if profile == "default" => {
                vec![format!("profile {profile}"), profile.to_string()]
            }
            Self::Config => vec![format!("profile {profile}")],
        }
    }

    /// Returns the key/value pairs of `profile`, `None` when the file or the section is missing
    ///
    /// # Errors
    ///
    /// Will return `Err` if the file exists but can not be read or parsed
    pub fn read(self, profile: &str) -> Result<Option<BTreeMap<String, String>>> {
        let Some(path) = self.path() else {
            return Ok(None);
        };

        if !path.is_file() {
            log::debug!("no AWS {self:?} file at {}", path.display());
            return Ok(None);
        }

        // secrets are taken as written, no backslash escapes
        let opt = ParseOption {
            enabled_escape: false,
            ..ParseOption::default()
        };

        let ini = Ini::load_from_file_opt(&path, opt)
            .with_context(|| format!("unable to read {}", path.display()))?;

        Ok(self.find(&ini, profile))
    }

    fn find(self, ini: &Ini, profile: &str) -> Option<BTreeMap<String, String>> {
        self.sections(profile).iter().find_map(|section| {
            ini.section(Some(section.as_str())).map(|properties| {
                properties
                    .iter()
                    .map(|(key, value)| (key.to_string(), value.to_string()))
                    .collect()
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const CREDENTIALS: &str = r"
# comment
[default]
aws_access_key_id = AKIDDEFAULT
aws_secret_access_key = secret/default

[dev]
aws_access_key_id=AKIDDEV
aws_secret_access_key=secret+dev
aws_session_token = FwoGZXIvYXdzEBY+token==
";

    const CONFIG: &str = r"
[default]
region = us-west-2 # prod

[profile dev]
region = eu-central-1 ; staging
output = json
";

    fn parse(file: ProfileFile, content: &str, profile: &str) -> Option<BTreeMap<String, String>> {
        let ini = Ini::load_from_str(content).unwrap();
        file.find(&ini, profile)
    }

    #[test]
    fn test_credentials_sections() {
        let default = parse(ProfileFile::Credentials, CREDENTIALS, "default").unwrap();
        assert_eq!(default.get("aws_access_key_id").unwrap(), "AKIDDEFAULT");
        assert_eq!(default.get("aws_secret_access_key").unwrap(), "secret/default");

        let dev = parse(ProfileFile::Credentials, CREDENTIALS, "dev").unwrap();
        assert_eq!(dev.get("aws_access_key_id").unwrap(), "AKIDDEV");
        assert_eq!(dev.get("aws_secret_access_key").unwrap(), "secret+dev");
        assert_eq!(dev.get("aws_session_token").unwrap(), "FwoGZXIvYXdzEBY+token==");

        assert!(parse(ProfileFile::Credentials, CREDENTIALS, "prod").is_none());
    }

    #[test]
    fn test_config_sections() {
        assert_eq!(
            ProfileFile::Config.sections("default"),
            vec!["profile default", "default"]
        );
        assert_eq!(ProfileFile::Config.sections("dev"), vec!["profile dev"]);
        assert_eq!(ProfileFile::Credentials.sections("dev"), vec!["dev"]);

        // `[dev]` is not a profile in the config file
        assert!(parse(ProfileFile::Config, "[dev]\nregion = eu-west-1\n", "dev").is_none());
    }

    #[test]
    fn test_config_profile_default() {
        let default = parse(
            ProfileFile::Config,
            "[profile default]\nregion = eu-west-3\n",
            "default",
        )
        .unwrap();
        assert_eq!(default.get("region").unwrap(), "eu-west-3");
    }

    #[test]
    fn test_read_config_file_inline_comments() {
        let mut tmp_file = NamedTempFile::new().unwrap();
        tmp_file.write_all(CONFIG.as_bytes()).unwrap();

        temp_env::with_var("AWS_CONFIG_FILE", Some(tmp_file.path()), || {
            let dev = ProfileFile::Config.read("dev").unwrap().unwrap();
            assert_eq!(dev.get("region").unwrap(), "eu-central-1");
            assert_eq!(dev.get("output").unwrap(), "json");

            let default = ProfileFile::Config.read("default").unwrap().unwrap();
            assert_eq!(default.get("region").unwrap(), "us-west-2");

            assert!(ProfileFile::Config.read("missing").unwrap().is_none());
        });
    }

    #[test]
    fn test_read_missing_file() {
        temp_env::with_var(
            "AWS_SHARED_CREDENTIALS_FILE",
            Some("/nonexistent/s3bucket/credentials"),
            || {
                assert!(ProfileFile::Credentials.read("default").unwrap().is_none());
            },
        );
    }
}
