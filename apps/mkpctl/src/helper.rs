//! # External Helper
//!
//! Runs a configured program after a successful validation and feeds it
//! the JSON report on stdin. The helper's stdout is redirected to our
//! stderr so stdout keeps carrying the report only.

use crate::config::HelperConfig;
use mkp_core::{HelperFailure, MkpError};
use std::io::Write;
use std::process::{Command, Stdio};

/// A program plus its fixed arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Helper {
    program: String,
    args: Vec<String>,
}

impl Helper {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// Pick the helper for a run: a `--helper` program wins over the
    /// configured one.
    pub fn select(cli_program: Option<&str>, configured: Option<&HelperConfig>) -> Option<Self> {
        match (cli_program, configured) {
            (Some(program), _) => Some(Self::new(program, Vec::new())),
            (None, Some(config)) => Some(Self::new(config.program.clone(), config.args.clone())),
            (None, None) => None,
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Spawn the helper, write `payload` to its stdin and wait for it.
    pub fn run(&self, payload: &str) -> Result<(), MkpError> {
        tracing::info!(program = %self.program, "running helper");

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(std::io::stderr())
            .spawn()
            .map_err(|e| {
                MkpError::helper(
                    HelperFailure::Spawn,
                    format!("Cannot start helper '{}': {}", self.program, e),
                )
            })?;

        let written = match child.stdin.take() {
            Some(mut stdin) => stdin.write_all(payload.as_bytes()),
            None => Ok(()),
        };

        let status = child.wait().map_err(|e| {
            MkpError::helper(
                HelperFailure::Exit,
                format!("Helper '{}' could not be awaited: {}", self.program, e),
            )
        })?;

        if let Err(e) = written {
            return Err(MkpError::helper(
                HelperFailure::Exit,
                format!("Cannot write report to helper '{}': {}", self.program, e),
            ));
        }

        if !status.success() {
            return Err(MkpError::helper(
                HelperFailure::Exit,
                format!("Helper '{}' failed: {}", self.program, status),
            ));
        }

        tracing::debug!(program = %self.program, "helper finished");
        Ok(())
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_program_wins() {
        let configured = HelperConfig {
            program: "configured".to_string(),
            args: vec!["-x".to_string()],
        };

        let helper = Helper::select(Some("cli"), Some(&configured)).expect("helper");
        assert_eq!(helper.program(), "cli");

        let helper = Helper::select(None, Some(&configured)).expect("helper");
        assert_eq!(helper, Helper::new("configured", vec!["-x".to_string()]));

        assert!(Helper::select(None, None).is_none());
    }

    #[test]
    fn missing_program_fails_to_spawn() {
        let err = Helper::new("mkpctl-helper-that-does-not-exist", Vec::new())
            .run("{}")
            .expect_err("spawn");
        assert_eq!(err.exit_code(), 41);
    }

    #[cfg(unix)]
    #[test]
    fn consuming_helper_succeeds() {
        Helper::new("sh", vec!["-c".to_string(), "cat > /dev/null".to_string()])
            .run("{\"status\":\"ok\"}")
            .expect("helper");
    }

    #[cfg(unix)]
    #[test]
    fn failing_helper_is_exit_failure() {
        let err = Helper::new("sh", vec!["-c".to_string(), "exit 3".to_string()])
            .run("{}")
            .expect_err("exit");
        assert_eq!(err.exit_code(), 42);
    }
}
