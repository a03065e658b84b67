use crate::cli::{
    Config, Host, commands,
    config::DEFAULT_HOST,
    session::parse_args,
};
use crate::s3::{
    Credentials, Region, S3,
    profile::ProfileFile,
    region::DEFAULT_REGION,
};
use anyhow::{Result, anyhow};
use clap::ArgMatches;
use colored::Colorize;
use std::{
    env,
    path::{Path, PathBuf},
};

/// Default config file, `~/.config/s3bucket/config.yml`
#[must_use]
pub fn get_config_file() -> PathBuf {
    let home_dir = dirs::home_dir().unwrap_or_else(|| PathBuf::from("/tmp"));

    home_dir.join(".config").join("s3bucket").join("config.yml")
}

/// Parse the command line and build the S3 client, returns the bucket to create if any
///
/// # Errors
/// Will return an error on a usage error or if the client can not be configured
pub fn start() -> Result<(S3, Option<String>)> {
    let config_file = get_config_file();

    let matches = commands::new(&config_file).get_matches();

    let verbosity_level = match matches.get_one::<u8>("verbose").copied().unwrap_or(0) {
        0 => log::LevelFilter::Off,
        1 => log::LevelFilter::Info,
        _ => log::LevelFilter::Debug,
    };

    env_logger::Builder::new()
        .filter_level(verbosity_level)
        .init();

    // more than one bucket is a usage error, checked before touching the config
    let args: Vec<String> = matches
        .get_many::<String>("bucket_name")
        .map(|v| v.cloned().collect())
        .unwrap_or_default();
    let bucket = parse_args(&args)?.map(ToString::to_string);

    let s3 = new_s3(&matches, &config_file)?;

    log::debug!("S3:\n{s3}");

    Ok((s3, bucket))
}

fn new_s3(matches: &ArgMatches, default_config_file: &Path) -> Result<S3> {
    // --config or the default file when it exists
    let config_file = matches
        .get_one::<PathBuf>("config")
        .cloned()
        .or_else(|| default_config_file.is_file().then(|| default_config_file.to_path_buf()));

    let config = match config_file {
        Some(path) => {
            log::info!("config file: {}", path.display());
            Some(Config::new(&path)?)
        }
        None => None,
    };

    let host = get_host(
        config.as_ref(),
        matches.get_one::<String>("host").map(String::as_str),
    )?;

    let profile = matches
        .get_one::<String>("profile")
        .map_or("default", String::as_str);

    let region = get_region(
        matches.get_one::<String>("region").map(String::as_str),
        matches.get_one::<String>("endpoint").map(String::as_str),
        host,
        profile,
    )?;

    log::info!("region: {region}");

    let credentials = get_credentials(host, profile)?;

    Ok(S3::new(credentials, region))
}

fn get_host<'a>(config: Option<&'a Config>, name: Option<&str>) -> Result<Option<&'a Host>> {
    match (config, name) {
        (Some(config), Some(name)) => config.get_host(name).map(Some).map_err(|_| {
            anyhow!(
                "Could not find host: \"{}\" in the config file, for more information try {}",
                name.red(),
                "--help".green()
            )
        }),
        (None, Some(name)) => Err(anyhow!(
            "Host \"{}\" requires a config file, for more information try {}",
            name.red(),
            "--help".green()
        )),
        (Some(config), None) => Ok(config.hosts.get(DEFAULT_HOST)),
        (None, None) => Ok(None),
    }
}

// --region/AWS_REGION, host region, profile region, AWS_DEFAULT_REGION, us-east-1
fn get_region(
    region: Option<&str>,
    endpoint: Option<&str>,
    host: Option<&Host>,
    profile: &str,
) -> Result<Region> {
    let name = match region
        .map(ToString::to_string)
        .or_else(|| host.and_then(|h| h.region.clone()))
    {
        Some(name) => Some(name),
        None => ProfileFile::Config
            .read(profile)?
            .and_then(|mut pairs| pairs.remove("region")),
    }
    .or_else(|| env::var("AWS_DEFAULT_REGION").ok())
    .filter(|name| !name.trim().is_empty());

    let endpoint = endpoint
        .map(ToString::to_string)
        .or_else(|| host.and_then(|h| h.endpoint.clone()));

    match (endpoint, name) {
        (Some(endpoint), name) => Ok(Region::Custom {
            name: name.unwrap_or_else(|| DEFAULT_REGION.to_string()),
            endpoint,
        }),
        (None, Some(name)) => Ok(name.parse::<Region>()?),
        (None, None) => Ok(Region::default()),
    }
}

// AWS_ACCESS_KEY_ID/AWS_SECRET_ACCESS_KEY, host keys, profile keys
fn get_credentials(host: Option<&Host>, profile: &str) -> Result<Credentials> {
    let credentials = match host.filter(|h| h.has_keys()) {
        Some(host) => Credentials::new(&host.access_key, &host.secret_key),
        None => match Credentials::from_profile(profile)? {
            Some(credentials) => credentials,
            None => Credentials::new("", ""),
        },
    };

    if credentials.is_empty() {
        return Err(anyhow!(
            "No credentials found, set AWS_ACCESS_KEY_ID and AWS_SECRET_ACCESS_KEY, add keys to a config host or to the \"{profile}\" AWS profile"
        ));
    }

    Ok(credentials)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{ffi::OsString, io::Write};
    use tempfile::NamedTempFile;

    const CONF: &str = r"---
hosts:
  default:
    region: eu-west-1
    access_key: XXX
    secret_key: YYY
  minio:
    endpoint: http://localhost:9000
    access_key: minioadmin
    secret_key: minioadmin
  b2:
    endpoint: s3.us-west-000.backblazeb2.com
    region: us-west-000";

    const AWS_CONFIG: &str = "[default]\nregion = ap-northeast-1\n[profile dev]\nregion = sa-east-1\n";

    const AWS_CREDENTIALS: &str =
        "[default]\naws_access_key_id = AKIDPROFILE\naws_secret_access_key = profile-secret\n";

    fn config() -> Config {
        let mut tmp_file = NamedTempFile::new().unwrap();
        tmp_file.write_all(CONF.as_bytes()).unwrap();
        Config::new(tmp_file.path()).unwrap()
    }

    fn write_tmp(content: &str) -> NamedTempFile {
        let mut tmp_file = NamedTempFile::new().unwrap();
        tmp_file.write_all(content.as_bytes()).unwrap();
        tmp_file
    }

    // isolate from the AWS environment of whoever runs the tests
    fn with_clean_env<R>(
        config: Option<&Path>,
        credentials: Option<&Path>,
        extra: &[(&'static str, &str)],
        f: impl FnOnce() -> R,
    ) -> R {
        let missing = Path::new("/nonexistent/s3bucket/aws");
        let mut vars: Vec<(&str, Option<OsString>)> = vec![
            ("AWS_CONFIG_FILE", Some(config.unwrap_or(missing).into())),
            (
                "AWS_SHARED_CREDENTIALS_FILE",
                Some(credentials.unwrap_or(missing).into()),
            ),
            ("AWS_DEFAULT_REGION", None),
            ("AWS_ACCESS_KEY_ID", None),
            ("AWS_SECRET_ACCESS_KEY", None),
            ("AWS_SESSION_TOKEN", None),
        ];

        for (key, value) in extra {
            vars.retain(|(k, _)| k != key);
            vars.push((*key, Some(OsString::from(*value))));
        }

        temp_env::with_vars(vars, f)
    }

    #[test]
    fn test_get_config_file() {
        let path = get_config_file();
        assert!(path.ends_with(".config/s3bucket/config.yml"));
    }

    #[test]
    fn test_get_host() {
        let config = config();

        let host = get_host(Some(&config), None).unwrap().unwrap();
        assert_eq!(host.access_key, "XXX");

        let host = get_host(Some(&config), Some("minio")).unwrap().unwrap();
        assert_eq!(host.access_key, "minioadmin");

        assert!(get_host(Some(&config), Some("nope")).is_err());
        assert!(get_host(None, Some("minio")).is_err());
        assert!(get_host(None, None).unwrap().is_none());
    }

    #[test]
    fn test_get_host_without_default() {
        let mut tmp_file = NamedTempFile::new().unwrap();
        tmp_file
            .write_all(b"hosts:\n  other:\n    region: us-east-2\n")
            .unwrap();
        let config = Config::new(tmp_file.path()).unwrap();
        assert!(get_host(Some(&config), None).unwrap().is_none());
    }

    #[test]
    fn test_get_region_defaults() {
        with_clean_env(None, None, &[], || {
            assert_eq!(get_region(None, None, None, "default").unwrap(), Region::default());
            assert_eq!(
                get_region(Some("eu-central-1"), None, None, "default").unwrap(),
                Region::Aws("eu-central-1")
            );
            assert!(get_region(Some("mars-1"), None, None, "default").is_err());
        });
    }

    #[test]
    fn test_get_region_from_host() {
        let config = config();
        with_clean_env(None, None, &[], || {
            let default = config.get_host("default").ok();
            assert_eq!(
                get_region(None, None, default, "default").unwrap(),
                Region::Aws("eu-west-1")
            );
            // flag wins over the host
            assert_eq!(
                get_region(Some("us-west-2"), None, default, "default").unwrap(),
                Region::Aws("us-west-2")
            );

            let minio = config.get_host("minio").ok();
            assert_eq!(
                get_region(None, None, minio, "default").unwrap(),
                Region::Custom {
                    name: "us-east-1".to_string(),
                    endpoint: "http://localhost:9000".to_string(),
                }
            );

            let b2 = config.get_host("b2").ok();
            assert_eq!(
                get_region(None, None, b2, "default").unwrap(),
                Region::Custom {
                    name: "us-west-000".to_string(),
                    endpoint: "s3.us-west-000.backblazeb2.com".to_string(),
                }
            );
        });
    }

    #[test]
    fn test_get_region_endpoint_flag() {
        with_clean_env(None, None, &[], || {
            assert_eq!(
                get_region(Some("eu-west-3"), Some("http://127.0.0.1:9000"), None, "default")
                    .unwrap(),
                Region::Custom {
                    name: "eu-west-3".to_string(),
                    endpoint: "http://127.0.0.1:9000".to_string(),
                }
            );
        });
    }

    #[test]
    fn test_get_region_from_profile() {
        let aws_config = write_tmp(AWS_CONFIG);
        with_clean_env(Some(aws_config.path()), None, &[], || {
            assert_eq!(
                get_region(None, None, None, "default").unwrap(),
                Region::Aws("ap-northeast-1")
            );
            assert_eq!(
                get_region(None, None, None, "dev").unwrap(),
                Region::Aws("sa-east-1")
            );
            // unknown profile falls back to us-east-1
            assert_eq!(
                get_region(None, None, None, "other").unwrap(),
                Region::default()
            );
        });
    }

    #[test]
    fn test_get_region_profile_default_inline_comment() {
        let aws_config = write_tmp("[profile default]\nregion = eu-west-1 # prod\n");
        with_clean_env(Some(aws_config.path()), None, &[], || {
            assert_eq!(
                get_region(None, None, None, "default").unwrap(),
                Region::Aws("eu-west-1")
            );
        });
    }

    #[test]
    fn test_get_region_aws_default_region() {
        with_clean_env(None, None, &[("AWS_DEFAULT_REGION", "ca-central-1")], || {
            assert_eq!(
                get_region(None, None, None, "default").unwrap(),
                Region::Aws("ca-central-1")
            );
        });
    }

    #[test]
    fn test_get_credentials_from_host() {
        let config = config();
        with_clean_env(None, None, &[], || {
            let credentials = get_credentials(config.get_host("minio").ok(), "default").unwrap();
            assert_eq!(credentials.aws_access_key_id(), "minioadmin");
            assert_eq!(credentials.aws_secret_access_key(), "minioadmin");
        });
    }

    #[test]
    fn test_get_credentials_from_profile() {
        let config = config();
        let aws_credentials = write_tmp(AWS_CREDENTIALS);
        with_clean_env(None, Some(aws_credentials.path()), &[], || {
            // b2 has no keys
            let credentials = get_credentials(config.get_host("b2").ok(), "default").unwrap();
            assert_eq!(credentials.aws_access_key_id(), "AKIDPROFILE");
            assert_eq!(credentials.aws_secret_access_key(), "profile-secret");
        });
    }

    #[test]
    fn test_get_credentials_session_token_from_profile() {
        let aws_credentials = write_tmp(
            "[sts]\naws_access_key_id = ASIDSTS\naws_secret_access_key = sts-secret\naws_session_token = sts-token\n",
        );
        with_clean_env(None, Some(aws_credentials.path()), &[], || {
            let credentials = get_credentials(None, "sts").unwrap();
            assert_eq!(credentials.aws_access_key_id(), "ASIDSTS");
            assert_eq!(credentials.aws_session_token(), Some("sts-token"));
        });
    }

    #[test]
    fn test_get_credentials_env_wins() {
        let config = config();
        let env = [
            ("AWS_ACCESS_KEY_ID", "AKIDENV"),
            ("AWS_SECRET_ACCESS_KEY", "env-secret"),
        ];
        with_clean_env(None, None, &env, || {
            let credentials = get_credentials(config.get_host("default").ok(), "default").unwrap();
            assert_eq!(credentials.aws_access_key_id(), "AKIDENV");
            assert_eq!(credentials.aws_secret_access_key(), "env-secret");
        });
    }

    #[test]
    fn test_get_credentials_missing() {
        with_clean_env(None, None, &[], || {
            let err = get_credentials(None, "default").unwrap_err().to_string();
            assert!(err.starts_with("No credentials found"));
        });
    }
}
