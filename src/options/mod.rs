pub mod verbose;

use clap::builder::{OsStringValueParser, TypedValueParser};
use clap::{ArgAction, Parser};
use std::path::PathBuf;

use crate::config::DEFAULT_CHANNEL;
use crate::platform::Platform;

#[derive(Parser, Debug)]
#[command(author, about, long_about = None)]
#[command(disable_version_flag = true)]
pub struct Cli {
    /// Print each URL fetched and show download progress
    #[arg(short, long, action = ArgAction::SetTrue)]
    pub verbose: bool,

    /// The release channel to check, e.g. "v8-canary". "v8" fetches the latest V8 CI integration build
    #[arg(long, default_value = DEFAULT_CHANNEL)]
    pub channel: String,

    /// Target platform, defaults to the current one (ignored for the "v8" channel)
    #[arg(long, value_enum)]
    pub platform: Option<Platform>,

    /// The version string prefix to match, e.g. v13 (ignored for the "v8" channel)
    #[arg(long)]
    pub version: Option<String>,

    /// The destination to extract into, defaults to the current working directory
    #[arg(long, value_parser = OsStringValueParser::new().map(PathBuf::from))]
    pub path: Option<PathBuf>,
}
