//! External command execution.

use crate::error::Result;
use std::process::{Command, Stdio};

/// Result of executing an external command.
#[derive(Debug, Clone)]
pub struct CommandResult {
    /// Exit code (None if killed by signal).
    pub exit_code: Option<i32>,

    /// Standard error.
    pub stderr: String,

    /// Whether command succeeded (exit code 0).
    pub success: bool,
}

/// Run `program` with `args`, capturing stderr.
///
/// No shell is involved and stdout is discarded. A non-zero exit is a
/// [`CommandResult`] with `success == false`; only a failure to spawn is an
/// error.
pub fn execute(program: &str, args: &[&str]) -> Result<CommandResult> {
    let mut cmd = Command::new(program);
    cmd.args(args);
    cmd.stdin(Stdio::null());
    cmd.stdout(Stdio::null());
    cmd.stderr(Stdio::piped());

    tracing::debug!("Executing: {} {}", program, args.join(" "));
    let output = cmd.output()?;

    Ok(CommandResult {
        exit_code: output.status.code(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        success: output.status.success(),
    })
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::error::RackError;

    #[test]
    fn execute_successful_command() {
        let result = execute("true", &[]).unwrap();
        assert!(result.success);
        assert_eq!(result.exit_code, Some(0));
    }

    #[test]
    fn execute_failing_command() {
        let result = execute("sh", &["-c", "exit 3"]).unwrap();
        assert!(!result.success);
        assert_eq!(result.exit_code, Some(3));
    }

    #[test]
    fn execute_captures_stderr() {
        let result = execute("sh", &["-c", "echo oops >&2"]).unwrap();
        assert_eq!(result.stderr.trim(), "oops");
    }

    #[test]
    fn missing_program_is_io_error() {
        let err = execute("definitely-not-a-real-program-xyz", &[]).unwrap_err();
        assert!(matches!(err, RackError::Io(_)));
    }
}
