//! screenctl library
//!
//! Provisioning and deployment for the weatherscreen Raspberry Pi appliance.
//! `provision` runs on the device itself; `deploy` runs on a development
//! machine and pushes the local tree to the device over rsync/ssh.

pub mod cli;
pub mod config;
pub mod deploy;
pub mod error;
pub mod provision;
pub mod runner;
pub mod sanity;

// Re-export main types for convenience
pub use config::{Settings, APT_PACKAGES};
pub use deploy::Deployer;
pub use error::{Result, SetupError};
pub use provision::Provisioner;
pub use runner::{
    disable_dry_run, enable_dry_run, is_dry_run, run_steps, CommandSpec, CommandStatus, Step,
};
pub use sanity::{run_preflight_checks, DEPLOY_BINARIES, PROVISION_BINARIES};
