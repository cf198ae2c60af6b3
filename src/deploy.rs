//! Code deployment to the device
//!
//! Pushes the local working tree to the remote device over rsync, then runs
//! the application there over ssh using the interpreter the provisioner set
//! up. The sync runs in archive mode with compression and deliberately does
//! not mirror deletions: files removed locally stay on the device.

use crate::config::Settings;
use crate::error::Result;
use crate::runner::{self, CommandSpec, Step};
use tracing::info;

pub struct Deployer {
    settings: Settings,
}

impl Deployer {
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    /// Build the two-step deployment plan: sync, then remote execution.
    pub fn plan(&self) -> Vec<Step> {
        let s = &self.settings;

        vec![
            Step::new(
                "sync working tree",
                CommandSpec::new("rsync")
                    .arg("-az")
                    .arg("./")
                    .arg(s.rsync_destination()),
            ),
            // Double -t forces pty allocation so the curses UI works over ssh
            Step::new(
                "run application remotely",
                CommandSpec::new("ssh")
                    .args(["-t", "-t"])
                    .arg(&s.remote_host)
                    .arg(&s.remote_python)
                    .arg(s.remote_entry_point()),
            ),
        ]
    }

    /// Execute the plan fail-fast: a failed sync prevents remote execution,
    /// and either failure propagates as the process exit code.
    pub fn run(&self) -> Result<()> {
        info!("deploying to {}", self.settings.remote_host);
        runner::run_steps(&self.plan())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sync_strictly_precedes_remote_run() {
        let plan = Deployer::new(Settings::default()).plan();
        assert_eq!(plan.len(), 2);
        assert_eq!(plan[0].label, "sync working tree");
        assert_eq!(plan[1].label, "run application remotely");
    }

    #[test]
    fn test_sync_does_not_delete_remote_files() {
        let plan = Deployer::new(Settings::default()).plan();
        let rendered = plan[0].spec.rendered();
        assert!(rendered.starts_with("rsync -az"));
        assert!(!rendered.contains("--delete"));
    }

    #[test]
    fn test_remote_run_forces_pty() {
        let plan = Deployer::new(Settings::default()).plan();
        assert_eq!(
            plan[1].spec.rendered(),
            "ssh -t -t weatherpi ./venv/bin/python weatherscreen/weatherscreen.py"
        );
    }

    #[test]
    fn test_custom_host_flows_through() {
        let settings = Settings {
            remote_host: "bench-pi".to_string(),
            ..Settings::default()
        };
        let plan = Deployer::new(settings).plan();
        assert!(plan[0].spec.rendered().contains("bench-pi:weatherscreen/"));
        assert!(plan[1].spec.rendered().contains("bench-pi"));
    }
}
