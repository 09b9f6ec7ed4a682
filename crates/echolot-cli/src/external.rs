//! Thin wrapper around external command-line tools.

use crate::error::{CliError, Result};
use std::ffi::OsStr;
use std::io;
use std::process::Command;
use tracing::{debug, info};

/// Captured output of a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolOutput {
    /// Standard output
    pub stdout: String,
    /// Standard error
    pub stderr: String,
}

/// An external program invoked by name or path.
#[derive(Debug, Clone)]
pub struct ExternalTool {
    program: String,
}

impl ExternalTool {
    /// Create a wrapper for the given program.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Program name or path.
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Run the tool to completion.
    ///
    /// # Errors
    ///
    /// - [`CliError::UnavailableExternalTool`] if the program cannot be spawned
    /// - [`CliError::ExternalToolFailed`] if it exits unsuccessfully
    pub fn run<I, S>(&self, args: I) -> Result<ToolOutput>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let args: Vec<_> = args.into_iter().map(|a| a.as_ref().to_os_string()).collect();
        debug!(program = %self.program, ?args, "Running external tool");

        let output = Command::new(&self.program)
            .args(&args)
            .output()
            .map_err(|err| match err.kind() {
                io::ErrorKind::NotFound | io::ErrorKind::PermissionDenied => {
                    CliError::UnavailableExternalTool {
                        program: self.program.clone(),
                        reason: err.to_string(),
                    }
                }
                _ => CliError::Io(err),
            })?;

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

        if !output.status.success() {
            return Err(CliError::ExternalToolFailed {
                program: self.program.clone(),
                status: output.status.to_string(),
                stderr: stderr.trim().to_string(),
            });
        }

        info!(program = %self.program, "External tool finished");
        Ok(ToolOutput { stdout, stderr })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_program_is_unavailable() {
        let tool = ExternalTool::new("echolot-no-such-tool");
        match tool.run(["--info"]) {
            Err(CliError::UnavailableExternalTool { program, .. }) => {
                assert_eq!(program, "echolot-no-such-tool");
            }
            other => panic!("Expected UnavailableExternalTool, got {:?}", other),
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_captures_stdout() {
        let tool = ExternalTool::new("sh");
        let output = tool.run(["-c", "echo manifest ok"]).unwrap();
        assert_eq!(output.stdout.trim(), "manifest ok");
    }

    #[cfg(unix)]
    #[test]
    fn test_nonzero_exit_is_failure() {
        let tool = ExternalTool::new("sh");
        match tool.run(["-c", "echo bad claim >&2; exit 3"]) {
            Err(CliError::ExternalToolFailed { stderr, .. }) => assert_eq!(stderr, "bad claim"),
            other => panic!("Expected ExternalToolFailed, got {:?}", other),
        }
    }
}
