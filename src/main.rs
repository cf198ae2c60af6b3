//! screenctl - Main entry point
//!
//! Two subcommands, one linear command sequence each: `provision` runs on the
//! device, `deploy` runs on a development machine.

use screenctl::cli::{Cli, Commands};
use screenctl::config::Settings;
use screenctl::deploy::Deployer;
use screenctl::error::Result;
use screenctl::provision::Provisioner;
use screenctl::{runner, sanity};
use tracing::{debug, error, info};

/// Initialize the tracing subscriber; RUST_LOG overrides the default level.
fn init_logging() {
    use tracing_subscriber::EnvFilter;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();
}

fn main() {
    init_logging();

    let cli = Cli::parse_args();
    debug!("CLI arguments parsed");

    if cli.dry_run {
        info!("dry-run mode: no commands will be executed");
        runner::enable_dry_run();
    }

    if let Err(e) = run(&cli) {
        error!("{}", e);
        std::process::exit(e.exit_code());
    }
}

fn run(cli: &Cli) -> Result<()> {
    let settings = match &cli.config {
        Some(path) => {
            info!("loading settings from {}", path.display());
            Settings::load_from_file(path)?
        }
        None => Settings::default(),
    };
    settings.validate()?;

    match cli.command {
        Commands::Provision => {
            sanity::run_preflight_checks(sanity::PROVISION_BINARIES)?;
            Provisioner::new(settings).run()
        }
        Commands::Deploy => {
            sanity::run_preflight_checks(sanity::DEPLOY_BINARIES)?;
            Deployer::new(settings).run()
        }
    }
}
