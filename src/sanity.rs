//! Pre-flight sanity checks
//!
//! Verifies that the external tools a plan is about to invoke exist on PATH
//! before the first step runs. The shell-script ancestry of this tool failed
//! halfway through when a binary was missing; checking up front surfaces the
//! whole list at once.

use crate::error::{Result, SetupError};
use crate::runner::{self, CommandSpec};
use tracing::{debug, warn};

/// Binaries `provision` invokes.
pub const PROVISION_BINARIES: &[&str] = &["sudo", "apt-get", "raspi-config", "python3", "git"];

/// Binaries `deploy` invokes.
pub const DEPLOY_BINARIES: &[&str] = &["rsync", "ssh"];

/// Check if a binary is available in PATH.
fn binary_exists(name: &str) -> bool {
    runner::run_captured(&CommandSpec::new("which").arg(name))
        .map(|out| out.status.success)
        .unwrap_or(false)
}

/// Return the subset of `required` that is missing from PATH.
pub fn missing_binaries(required: &[&str]) -> Vec<String> {
    required
        .iter()
        .filter(|name| !binary_exists(name))
        .map(|name| (*name).to_string())
        .collect()
}

/// Verify all required binaries exist, erroring with the full missing list.
///
/// In dry-run mode missing binaries only warn, so a plan can be previewed on
/// a machine that lacks the device-side tooling.
pub fn run_preflight_checks(required: &[&str]) -> Result<()> {
    run_preflight_checks_with_options(required, runner::is_dry_run())
}

/// Pre-flight checks with explicit leniency (lenient = warn instead of fail).
pub fn run_preflight_checks_with_options(required: &[&str], lenient: bool) -> Result<()> {
    debug!("pre-flight: checking for {:?} (lenient={})", required, lenient);

    let missing = missing_binaries(required);
    if missing.is_empty() {
        debug!("pre-flight checks passed");
        return Ok(());
    }

    if lenient {
        warn!("missing binaries (ignored in dry-run): {}", missing.join(", "));
        return Ok(());
    }

    Err(SetupError::environment(format!(
        "required binaries not found in PATH: {}",
        missing.join(", ")
    )))
}
