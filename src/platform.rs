use clap::ValueEnum;
use std::fmt;

use crate::errors::FetchError;

/// A normalized OS/architecture key as used by the nodejs.org distribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum Platform {
    #[value(name = "win-x64")]
    WinX64,
    #[value(name = "linux-x64")]
    LinuxX64,
    #[value(name = "darwin-x64")]
    DarwinX64,
}

/// Container format of a distribution archive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveKind {
    TarXz,
    Zip,
}

impl Platform {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::WinX64 => "win-x64",
            Self::LinuxX64 => "linux-x64",
            Self::DarwinX64 => "darwin-x64",
        }
    }

    /// Key that must appear in an index entry's `files` for this platform to be downloadable.
    pub fn manifest_key(self) -> &'static str {
        match self {
            Self::WinX64 => "win-x64-zip",
            Self::LinuxX64 => "linux-x64",
            Self::DarwinX64 => "osx-x64-tar",
        }
    }

    pub fn archive_kind(self) -> ArchiveKind {
        match self {
            Self::WinX64 => ArchiveKind::Zip,
            Self::LinuxX64 | Self::DarwinX64 => ArchiveKind::TarXz,
        }
    }

    pub fn extension(self) -> &'static str {
        match self.archive_kind() {
            ArchiveKind::Zip => ".zip",
            ArchiveKind::TarXz => ".tar.xz",
        }
    }

    /// Maps an OS name as reported by `std::env::consts::OS`.
    ///
    /// Only the OS is considered; every supported key is x64.
    pub fn from_os(os: &str) -> Result<Self, FetchError> {
        match os {
            "windows" => Ok(Self::WinX64),
            "linux" => Ok(Self::LinuxX64),
            "macos" => Ok(Self::DarwinX64),
            other => Err(FetchError::unsupported_platform(other)),
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
