//! Device provisioning
//!
//! Brings a fresh or existing Raspberry Pi to a runnable state and launches
//! the application: package index refresh, OS packages, SPI, venv, checkout,
//! Python dependencies, then the app itself in the foreground.
//!
//! The sequence is strictly linear and fail-fast. The only branch points are
//! two create-if-absent checks: the venv is created only when its directory
//! is missing, and an existing checkout is fast-forward-pulled instead of
//! re-cloned. A pull that cannot fast-forward is a fatal error, never an
//! auto-merge.

use crate::config::{Settings, APT_PACKAGES};
use crate::error::Result;
use crate::runner::{self, CommandSpec, Step};
use tracing::{debug, info};

pub struct Provisioner {
    settings: Settings,
}

impl Provisioner {
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    /// Build the provisioning plan against the current filesystem state.
    ///
    /// Planning performs the existence checks, so the returned steps are
    /// exactly what [`run`](Self::run) will execute. Running the provisioner
    /// twice neither recreates the venv nor re-clones the checkout.
    pub fn plan(&self) -> Vec<Step> {
        let s = &self.settings;
        let mut steps = Vec::new();

        steps.push(Step::new(
            "refresh package index",
            CommandSpec::new("sudo").args(["apt-get", "update"]),
        ));

        steps.push(Step::new(
            "install system packages",
            CommandSpec::new("sudo")
                .args(["apt-get", "install", "-y"])
                .args(APT_PACKAGES.iter().copied()),
        ));

        // Idempotent whether SPI is already on or not
        steps.push(Step::new(
            "enable SPI",
            CommandSpec::new("sudo").args(["raspi-config", "nonint", "do_spi", "0"]),
        ));

        if s.venv_dir.exists() {
            debug!("venv already present at {}, skipping", s.venv_dir.display());
        } else {
            steps.push(Step::new(
                "create virtual environment",
                CommandSpec::new("python3")
                    .args(["-m", "venv"])
                    .arg(s.venv_dir.display().to_string()),
            ));
        }

        if s.repo_dir.exists() {
            steps.push(Step::new(
                "update repository",
                CommandSpec::new("git")
                    .arg("-C")
                    .arg(s.repo_dir.display().to_string())
                    .args(["pull", "--ff-only"]),
            ));
        } else {
            steps.push(Step::new(
                "clone repository",
                CommandSpec::new("git")
                    .arg("clone")
                    .arg(&s.repo_url)
                    .arg(s.repo_dir.display().to_string()),
            ));
        }

        steps.push(Step::new(
            "install python dependencies",
            CommandSpec::new(s.venv_pip().display().to_string())
                .args(["install", "-r"])
                .arg(s.repo_dir.join(&s.requirements).display().to_string()),
        ));

        // Foreground; blocks until the app is stopped, its exit status is ours
        steps.push(Step::new(
            "launch application",
            CommandSpec::new(s.venv_python().display().to_string())
                .arg(s.repo_dir.join(&s.entry_point).display().to_string()),
        ));

        steps
    }

    /// Execute the plan fail-fast.
    pub fn run(&self) -> Result<()> {
        let steps = self.plan();
        info!("provisioning device ({} steps)", steps.len());
        runner::run_steps(&steps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn settings_in(dir: &TempDir) -> Settings {
        Settings {
            venv_dir: dir.path().join("venv"),
            repo_dir: dir.path().join("weatherscreen"),
            ..Settings::default()
        }
    }

    fn labels(steps: &[Step]) -> Vec<&'static str> {
        steps.iter().map(|s| s.label).collect()
    }

    #[test]
    fn test_fresh_device_plan() {
        let dir = TempDir::new().unwrap();
        let plan = Provisioner::new(settings_in(&dir)).plan();

        assert_eq!(
            labels(&plan),
            vec![
                "refresh package index",
                "install system packages",
                "enable SPI",
                "create virtual environment",
                "clone repository",
                "install python dependencies",
                "launch application",
            ]
        );
    }

    #[test]
    fn test_existing_venv_is_not_recreated() {
        let dir = TempDir::new().unwrap();
        let settings = settings_in(&dir);
        std::fs::create_dir(&settings.venv_dir).unwrap();

        let plan = Provisioner::new(settings).plan();
        assert!(!labels(&plan).contains(&"create virtual environment"));
    }

    #[test]
    fn test_existing_checkout_is_pulled_not_recloned() {
        let dir = TempDir::new().unwrap();
        let settings = settings_in(&dir);
        std::fs::create_dir(&settings.repo_dir).unwrap();

        let plan = Provisioner::new(settings).plan();
        let labels = labels(&plan);
        assert!(labels.contains(&"update repository"));
        assert!(!labels.contains(&"clone repository"));

        let pull = plan.iter().find(|s| s.label == "update repository").unwrap();
        assert!(pull.spec.rendered().contains("pull --ff-only"));
    }

    #[test]
    fn test_package_install_precedes_everything_stateful() {
        let dir = TempDir::new().unwrap();
        let plan = Provisioner::new(settings_in(&dir)).plan();
        let labels = labels(&plan);

        let position = |label| labels.iter().position(|l| *l == label).unwrap();
        assert!(position("install system packages") < position("create virtual environment"));
        assert!(position("create virtual environment") < position("launch application"));
        assert_eq!(position("launch application"), labels.len() - 1);
    }

    #[test]
    fn test_dependencies_installed_into_venv() {
        let dir = TempDir::new().unwrap();
        let settings = settings_in(&dir);
        let venv = settings.venv_dir.clone();

        let plan = Provisioner::new(settings).plan();
        let pip = plan
            .iter()
            .find(|s| s.label == "install python dependencies")
            .unwrap();
        assert!(pip
            .spec
            .program()
            .starts_with(venv.display().to_string().as_str()));
        assert!(pip.spec.rendered().contains("requirements.txt"));
    }
}
