pub mod download;
pub mod extract;

use crate::platform::Platform;

/// A fully resolved download: channel, platform and exact version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Release {
    pub channel: String,
    pub platform: Platform,
    pub version: String,
}

impl Release {
    pub fn new(channel: impl Into<String>, platform: Platform, version: impl Into<String>) -> Self {
        Self {
            channel: channel.into(),
            platform,
            version: version.into(),
        }
    }

    /// Name of the single top-level folder inside the archive.
    pub fn folder_name(&self) -> String {
        format!("node-{}-{}", self.version, self.platform)
    }

    /// Must match the file naming on the distribution server exactly.
    pub fn archive_url(&self, dist_base: &str) -> String {
        format!(
            "{}/{}/{}/{}{}",
            dist_base.trim_end_matches('/'),
            self.channel,
            self.version,
            self.folder_name(),
            self.platform.extension()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://nodejs.org/download";

    #[test]
    fn linux_release_url() {
        let release = Release::new("release", Platform::LinuxX64, "v18.2.0");
        assert_eq!(
            release.archive_url(BASE),
            "https://nodejs.org/download/release/v18.2.0/node-v18.2.0-linux-x64.tar.xz"
        );
    }

    #[test]
    fn windows_canary_url() {
        let release = Release::new("v8-canary", Platform::WinX64, "v21.0.0-v8-canary2023");
        assert_eq!(
            release.archive_url(BASE),
            "https://nodejs.org/download/v8-canary/v21.0.0-v8-canary2023/node-v21.0.0-v8-canary2023-win-x64.zip"
        );
    }

    #[test]
    fn zip_only_for_windows() {
        for platform in [Platform::WinX64, Platform::LinuxX64, Platform::DarwinX64] {
            let url = Release::new("release", platform, "v20.1.0").archive_url(BASE);
            assert_eq!(url.ends_with(".zip"), platform == Platform::WinX64, "{url}");
            assert_eq!(url.ends_with(".tar.xz"), platform != Platform::WinX64, "{url}");
        }
    }

    #[test]
    fn tolerates_trailing_slash_on_base() {
        let release = Release::new("release", Platform::DarwinX64, "v16.0.0");
        assert_eq!(
            release.archive_url("http://127.0.0.1:8080/"),
            "http://127.0.0.1:8080/release/v16.0.0/node-v16.0.0-darwin-x64.tar.xz"
        );
    }

    #[test]
    fn folder_name() {
        let release = Release::new("release", Platform::LinuxX64, "v18.0.0");
        assert_eq!(release.folder_name(), "node-v18.0.0-linux-x64");
    }
}
