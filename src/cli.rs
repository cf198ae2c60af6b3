use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// screenctl - provision a Raspberry Pi display appliance and deploy code to it
#[derive(Parser)]
#[command(name = "screenctl")]
#[command(about = "Provision the weatherscreen device and deploy local code to it")]
#[command(version)]
pub struct Cli {
    /// Dry-run mode: log the commands that would run without executing them.
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// Path to a JSON settings file overriding the built-in defaults.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Provision this device: packages, SPI, venv, checkout, then run the app
    Provision,
    /// Sync the local working tree to the device and run the app there
    Deploy,
}

impl Cli {
    pub fn parse_args() -> Self {
        <Self as clap::Parser>::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_cli_requires_subcommand() {
        assert!(Cli::try_parse_from(["screenctl"]).is_err());
    }

    #[test]
    fn test_cli_provision() {
        let cli = Cli::try_parse_from(["screenctl", "provision"]).unwrap();
        assert!(matches!(cli.command, Commands::Provision));
        assert!(!cli.dry_run);
        assert!(cli.config.is_none());
    }

    #[test]
    fn test_cli_deploy_with_dry_run() {
        let cli = Cli::try_parse_from(["screenctl", "deploy", "--dry-run"]).unwrap();
        assert!(matches!(cli.command, Commands::Deploy));
        assert!(cli.dry_run);
    }

    #[test]
    fn test_cli_global_config_flag() {
        let cli =
            Cli::try_parse_from(["screenctl", "provision", "--config", "/tmp/settings.json"])
                .unwrap();
        assert_eq!(
            cli.config.unwrap().to_str().unwrap(),
            "/tmp/settings.json"
        );
    }

    #[test]
    fn test_cli_rejects_unknown_subcommand() {
        assert!(Cli::try_parse_from(["screenctl", "frobnicate"]).is_err());
    }
}
