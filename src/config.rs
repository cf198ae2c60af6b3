//! Provisioning and deployment settings.
//!
//! The defaults here are the fixed values the device is provisioned around:
//! one venv path, one checkout path, one remote host alias. They can be
//! overridden from a JSON file via `--config`, but the normal invocation
//! takes none.

use crate::error::{Result, SetupError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// OS packages the application needs on a fresh Raspberry Pi OS image:
/// venv support, the BLAS runtime numpy links against, git, a build
/// toolchain for native wheels, and the JPEG 2000 codec Pillow loads.
pub const APT_PACKAGES: &[&str] = &[
    "python3-venv",
    "libatlas-base-dev",
    "git",
    "build-essential",
    "libopenjp2-7",
];

/// All settings for both subcommands.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // Target device (deploy)
    pub remote_host: String,
    /// Remote directory the working tree is synced into, relative to the
    /// remote user's home.
    pub remote_dir: String,
    /// Interpreter used for remote execution; points into the venv the
    /// provisioner created.
    pub remote_python: String,

    // On-device layout (provision)
    pub venv_dir: PathBuf,
    pub repo_url: String,
    pub repo_dir: PathBuf,

    // Application entry point, shared by both subcommands
    pub entry_point: String,
    pub requirements: String,
}

impl Default for Settings {
    fn default() -> Self {
        let home = home_dir();
        Self {
            remote_host: "weatherpi".to_string(),
            remote_dir: "weatherscreen".to_string(),
            remote_python: "./venv/bin/python".to_string(),
            venv_dir: home.join("venv"),
            repo_url: "https://github.com/live4thamuzik/weatherscreen.git".to_string(),
            repo_dir: home.join("weatherscreen"),
            entry_point: "weatherscreen.py".to_string(),
            requirements: "requirements.txt".to_string(),
        }
    }
}

impl Settings {
    /// Load settings overrides from a JSON file.
    ///
    /// Absent fields keep their defaults, so a file may override just the
    /// host alias or just the repository URL.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).map_err(|e| {
            SetupError::config(format!(
                "failed to read settings from {:?}: {}",
                path.as_ref(),
                e
            ))
        })?;

        let settings: Self = serde_json::from_str(&content)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Validate the settings.
    pub fn validate(&self) -> Result<()> {
        if self.remote_host.trim().is_empty() {
            return Err(SetupError::validation("remote host must not be empty"));
        }
        if self
            .remote_host
            .chars()
            .any(|c| c.is_whitespace() || c == ':')
        {
            return Err(SetupError::validation(
                "remote host must not contain whitespace or ':'",
            ));
        }
        if self.remote_dir.trim().is_empty() {
            return Err(SetupError::validation("remote directory must not be empty"));
        }
        if self.repo_url.trim().is_empty() {
            return Err(SetupError::validation("repository URL must not be empty"));
        }
        if self.entry_point.trim().is_empty() {
            return Err(SetupError::validation("entry point must not be empty"));
        }
        Ok(())
    }

    /// `rsync` destination: `host:dir/`.
    pub fn rsync_destination(&self) -> String {
        format!("{}:{}/", self.remote_host, self.remote_dir)
    }

    /// Path of the entry point on the remote device.
    pub fn remote_entry_point(&self) -> String {
        format!("{}/{}", self.remote_dir, self.entry_point)
    }

    /// `pip` binary inside the venv.
    pub fn venv_pip(&self) -> PathBuf {
        self.venv_dir.join("bin").join("pip")
    }

    /// `python` binary inside the venv.
    pub fn venv_python(&self) -> PathBuf {
        self.venv_dir.join("bin").join("python")
    }
}

/// Home directory of the invoking user, `/home/pi` if `$HOME` is unset.
fn home_dir() -> PathBuf {
    std::env::var_os("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("/home/pi"))
}
