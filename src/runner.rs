//! External command execution
//!
//! This module provides the ONLY sanctioned way to execute external tools
//! (apt-get, raspi-config, git, pip, rsync, ssh). All command execution goes
//! through [`run`] or [`run_captured`] to ensure:
//!
//! - Every command is logged in its rendered form before it runs
//! - The global dry-run flag is honored consistently
//! - Exit status handling is uniform (no stringly-typed status checks)

use crate::error::{Result, SetupError};
use std::process::{Command, Stdio};
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, info};

/// Global dry-run flag, set once from the CLI before any plan executes.
static DRY_RUN: AtomicBool = AtomicBool::new(false);

/// Enable dry-run mode: commands are rendered and logged, never executed.
pub fn enable_dry_run() {
    DRY_RUN.store(true, Ordering::SeqCst);
}

/// Disable dry-run mode (used by tests to restore state).
pub fn disable_dry_run() {
    DRY_RUN.store(false, Ordering::SeqCst);
}

/// Check whether dry-run mode is active.
pub fn is_dry_run() -> bool {
    DRY_RUN.load(Ordering::SeqCst)
}

/// A single external command: program plus argument vector.
///
/// Specs are data, not live processes, so plans can be built, inspected,
/// and tested without touching the system.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    program: String,
    args: Vec<String>,
}

impl CommandSpec {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Render the command the way an operator would type it, for logging.
    pub fn rendered(&self) -> String {
        let mut out = self.program.clone();
        for arg in &self.args {
            out.push(' ');
            // Quote only when the argument would be ambiguous on a shell line
            if arg.is_empty() || arg.contains(char::is_whitespace) {
                out.push('\'');
                out.push_str(arg);
                out.push('\'');
            } else {
                out.push_str(arg);
            }
        }
        out
    }
}

/// Exit status of an executed (or dry-run-skipped) command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandStatus {
    /// Exit code (None if terminated by signal).
    pub code: Option<i32>,
    /// Whether the command exited successfully (exit code 0).
    pub success: bool,
    /// Whether execution was skipped by dry-run mode.
    pub dry_run: bool,
}

impl CommandStatus {
    /// Exit code to propagate for a failure; signal termination maps to 1.
    pub fn failure_code(&self) -> i32 {
        self.code.unwrap_or(1)
    }
}

/// Captured output of a command run with piped stdio.
#[derive(Debug, Clone)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
    pub status: CommandStatus,
}

/// Execute a command with inherited stdio.
///
/// The tool's own output streams straight to the operator's terminal and the
/// process blocks until the child exits. This matches interactive tools
/// (apt-get progress bars, the application itself) and keeps diagnostics
/// unwrapped on failure.
pub fn run(spec: &CommandSpec) -> Result<CommandStatus> {
    if is_dry_run() {
        info!("[dry-run] {}", spec.rendered());
        return Ok(CommandStatus {
            code: Some(0),
            success: true,
            dry_run: true,
        });
    }

    info!("running: {}", spec.rendered());

    let status = Command::new(&spec.program)
        .args(&spec.args)
        .status()
        .map_err(|e| {
            SetupError::general(format!("failed to spawn '{}': {}", spec.program, e))
        })?;

    debug!("'{}' exited with {:?}", spec.program, status.code());

    Ok(CommandStatus {
        code: status.code(),
        success: status.success(),
        dry_run: false,
    })
}

/// One labeled command inside a plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub label: &'static str,
    pub spec: CommandSpec,
}

impl Step {
    pub fn new(label: &'static str, spec: CommandSpec) -> Self {
        Self { label, spec }
    }
}

/// Execute a plan fail-fast.
///
/// Steps run strictly in order; the first non-zero exit aborts with a
/// [`SetupError::Command`] carrying that step's exit code, and no later
/// step runs. No retries, no cleanup.
pub fn run_steps(steps: &[Step]) -> Result<()> {
    for step in steps {
        let status = run(&step.spec)?;
        if !status.success {
            return Err(SetupError::command(step.label, status.failure_code()));
        }
    }
    Ok(())
}

/// Execute a command with piped stdio and capture its output.
///
/// Used for quiet probes (binary existence checks); runs even in dry-run
/// mode since it never mutates anything.
pub fn run_captured(spec: &CommandSpec) -> Result<CommandOutput> {
    debug!("probing: {}", spec.rendered());

    let output = Command::new(&spec.program)
        .args(&spec.args)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .map_err(|e| {
            SetupError::general(format!("failed to spawn '{}': {}", spec.program, e))
        })?;

    Ok(CommandOutput {
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        status: CommandStatus {
            code: output.status.code(),
            success: output.status.success(),
            dry_run: false,
        },
    })
}
