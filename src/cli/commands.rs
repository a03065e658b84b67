use clap::{
    Arg, ArgAction, ColorChoice, Command,
    builder::ValueParser,
    builder::styling::{AnsiColor, Effects, Styles},
};
use std::{
    fs,
    path::{Path, PathBuf},
};

pub fn validator_is_file() -> ValueParser {
    ValueParser::from(move |s: &str| -> std::result::Result<PathBuf, String> {
        if let Ok(metadata) = fs::metadata(s) {
            if metadata.is_file() {
                return Ok(PathBuf::from(s));
            }
        }

        Err(format!("Invalid file path or file does not exist: '{s}'"))
    })
}

pub fn new(config_file_path: &Path) -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    Command::new("s3bucket")
        .version(env!("CARGO_PKG_VERSION"))
        .about("List your S3 buckets, optionally create one first and delete one after")
        .color(ColorChoice::Auto)
        .styles(styles)
        .arg(
            Arg::new("bucket_name")
            .help("A valid, globally unique bucket name to create")
            .value_name("bucket_name")
            .action(ArgAction::Append)
            .num_args(1..)
        )
        .arg(
            Arg::new("config")
            .help(format!("Config file with the S3 hosts [default: {}]", config_file_path.display()))
            .long("config")
            .short('c')
            .num_args(1)
            .value_parser(validator_is_file())
            .value_name("config.yml")
        )
        .arg(
            Arg::new("host")
            .help("Host entry to use from the config file")
            .long("host")
            .num_args(1)
        )
        .arg(
            Arg::new("profile")
            .help("AWS shared credentials/config profile")
            .long("profile")
            .env("AWS_PROFILE")
            .default_value("default")
            .num_args(1)
        )
        .arg(
            Arg::new("region")
            .help("Region to use, overrides the config file and the AWS profile")
            .long("region")
            .env("AWS_REGION")
            .num_args(1)
        )
        .arg(
            Arg::new("endpoint")
            .help("Endpoint of an S3 compatible service, example: http://localhost:9000")
            .long("endpoint")
            .env("AWS_ENDPOINT_URL")
            .num_args(1)
        )
        .arg(
            Arg::new("verbose")
            .help("Verbosity level")
            .short('v')
            .long("verbose")
            .action(ArgAction::Count)
        )
}
