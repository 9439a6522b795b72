//! Host operating system families and detection

use std::path::PathBuf;

#[cfg(test)]
use mockall::automock;
use os_release::OsRelease;
use serde::Deserialize;
use tracing::debug;

use crate::config::OS_RELEASE_PATH;

/// Operating system family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OsFamily {
    Ubuntu,
    Windows,
    #[serde(rename = "osx")]
    OSX,
    #[serde(rename = "centos")]
    CentOS,
    #[serde(rename = "opensuse")]
    OpenSUSE,
    Arch,
    /// Linux distribution without dedicated support
    GenericLinux,
    Unknown,
}

impl OsFamily {
    /// Returns the string representation of the OS family
    pub fn as_str(&self) -> &'static str {
        match self {
            OsFamily::Ubuntu => "ubuntu",
            OsFamily::Windows => "windows",
            OsFamily::OSX => "osx",
            OsFamily::CentOS => "centos",
            OsFamily::OpenSUSE => "opensuse",
            OsFamily::Arch => "arch",
            OsFamily::GenericLinux => "genericlinux",
            OsFamily::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for OsFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for OsFamily {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ubuntu" => Ok(OsFamily::Ubuntu),
            "windows" => Ok(OsFamily::Windows),
            "osx" => Ok(OsFamily::OSX),
            "centos" => Ok(OsFamily::CentOS),
            "opensuse" => Ok(OsFamily::OpenSUSE),
            "arch" => Ok(OsFamily::Arch),
            "genericlinux" => Ok(OsFamily::GenericLinux),
            "unknown" => Ok(OsFamily::Unknown),
            other => Err(format!("unknown OS family: {other}")),
        }
    }
}

/// Series that never appear in distro-info data, keyed by owning family.
const STATIC_SERIES: &[(OsFamily, &[&str])] = &[
    (
        OsFamily::Windows,
        &[
            "win2008r2",
            "win2012hvr2",
            "win2012hv",
            "win2012r2",
            "win2012",
            "win2016",
            "win2016hv",
            "win2016nano",
            "win7",
            "win8",
            "win81",
            "win10",
        ],
    ),
    (
        OsFamily::OSX,
        &["mavericks", "mountainlion", "lion", "yosemite", "elcapitan", "sierra"],
    ),
    (OsFamily::CentOS, &["centos7"]),
    (OsFamily::OpenSUSE, &["opensuseleap"]),
    (OsFamily::Arch, &["arch"]),
];

/// Look up the family of a codename in the hand-maintained table.
pub fn static_family(codename: &str) -> Option<OsFamily> {
    STATIC_SERIES
        .iter()
        .find(|(_, series)| series.contains(&codename))
        .map(|(family, _)| *family)
}

/// Trait for querying the family of the running host
#[cfg_attr(test, automock)]
pub trait HostOs: Send + Sync {
    fn family(&self) -> OsFamily;
}

/// Host family fixed by configuration
#[derive(Debug, Clone, Copy)]
pub struct FixedHost(pub OsFamily);

impl HostOs for FixedHost {
    fn family(&self) -> OsFamily {
        self.0
    }
}

/// Detects the host family from os-release on Linux and the target OS elsewhere
#[derive(Debug, Clone)]
pub struct OsReleaseHost {
    path: PathBuf,
}

impl OsReleaseHost {
    pub fn new() -> Self {
        Self {
            path: PathBuf::from(OS_RELEASE_PATH),
        }
    }

    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Default for OsReleaseHost {
    fn default() -> Self {
        Self::new()
    }
}

impl HostOs for OsReleaseHost {
    fn family(&self) -> OsFamily {
        match std::env::consts::OS {
            "linux" => match OsRelease::new_from(&self.path) {
                Ok(release) => family_from_id(&release.id),
                Err(e) => {
                    debug!("Failed to read {:?}: {}", self.path, e);
                    OsFamily::GenericLinux
                }
            },
            "windows" => OsFamily::Windows,
            "macos" => OsFamily::OSX,
            _ => OsFamily::Unknown,
        }
    }
}

/// Classify an os-release `ID` value
pub fn family_from_id(id: &str) -> OsFamily {
    match id {
        "ubuntu" => OsFamily::Ubuntu,
        "centos" => OsFamily::CentOS,
        "arch" => OsFamily::Arch,
        id if id.starts_with("opensuse") => OsFamily::OpenSUSE,
        _ => OsFamily::GenericLinux,
    }
}
