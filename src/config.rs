use std::path::PathBuf;

use crate::errors::FetchError;
use crate::options::Cli;
use crate::platform::Platform;

pub const DEFAULT_CHANNEL: &str = "release";

/// Channel name that switches to the V8 CI scrape instead of a version index.
pub const V8_CHANNEL: &str = "v8";

/// Remote locations the tool talks to.
#[derive(Debug, Clone)]
pub struct Endpoints {
    /// Parent of every channel directory, e.g. `{dist_base}/release/index.json`.
    pub dist_base: String,
    /// Prepended to the relative build link found on the builder page.
    pub ci_origin: String,
    pub v8_builder_page: String,
    /// Artifact links on a build page must start with this.
    pub v8_artifact_prefix: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            dist_base: "https://nodejs.org/download".to_string(),
            ci_origin: "https://ci.chromium.org".to_string(),
            v8_builder_page:
                "https://ci.chromium.org/p/v8/builders/luci.v8.ci/V8%20Linux64%20-%20node.js%20integration%20ng"
                    .to_string(),
            v8_artifact_prefix: "https://storage.googleapis.com/chromium-v8/node-linux-rel"
                .to_string(),
        }
    }
}

/// A version-index lookup: which channel, which platform, which version prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    pub channel: String,
    pub platform: Platform,
    pub version_prefix: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// Latest successful V8 integration build. Platform and version do not apply.
    V8Build,
    Release(Query),
}

/// Command line options with every default filled in.
#[derive(Debug)]
pub struct Settings {
    pub verbose: bool,
    pub destination: PathBuf,
    pub target: Target,
}

impl Settings {
    pub fn resolve(cli: Cli) -> Result<Self, FetchError> {
        Self::resolve_for(cli, std::env::consts::OS)
    }

    /// Like [`Settings::resolve`] but with the host OS given explicitly.
    pub fn resolve_for(cli: Cli, host_os: &str) -> Result<Self, FetchError> {
        // Empty values count as not given.
        let destination = match cli.path.filter(|path| !path.as_os_str().is_empty()) {
            Some(path) => path,
            None => std::env::current_dir()
                .map_err(|e| FetchError::io("cannot determine the current directory", e))?,
        };

        let channel = if cli.channel.is_empty() {
            DEFAULT_CHANNEL.to_string()
        } else {
            cli.channel
        };

        // The v8 channel never reads --platform or --version, and never needs a host mapping.
        let target = if channel == V8_CHANNEL {
            Target::V8Build
        } else {
            let platform = match cli.platform {
                Some(platform) => platform,
                None => Platform::from_os(host_os)?,
            };
            Target::Release(Query {
                channel,
                platform,
                version_prefix: cli.version.unwrap_or_default(),
            })
        };

        Ok(Self {
            verbose: cli.verbose,
            destination,
            target,
        })
    }
}
