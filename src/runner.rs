use std::io;
use std::process::{Command, Stdio};
use thiserror::Error;

/// Captured output of a finished command
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
}

/// A shell command that could not be run or exited unsuccessfully
#[derive(Debug, Error)]
pub enum ExecError {
    #[error("Failed to spawn `{command}`")]
    Spawn {
        command: String,
        #[source]
        source: io::Error,
    },

    #[error("`{command}` exited with {}: {}", describe_code(.code), trimmed(.stderr))]
    Failed {
        command: String,
        code: Option<i32>,
        stdout: String,
        stderr: String,
    },
}

fn describe_code(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("status {code}"),
        None => "a signal".to_string(),
    }
}

fn trimmed(text: &str) -> &str {
    text.trim()
}

/// Runs package-manager command lines
pub trait CommandRunner {
    fn run(&mut self, command_line: &str) -> Result<CommandOutput, ExecError>;
}

/// Runs command lines through the platform shell in the current directory
#[derive(Debug, Clone, Copy, Default)]
pub struct ShellRunner;

impl ShellRunner {
    pub fn new() -> Self {
        Self
    }

    fn shell() -> (&'static str, &'static str) {
        if cfg!(windows) {
            ("cmd", "/C")
        } else {
            ("sh", "-c")
        }
    }
}

impl CommandRunner for ShellRunner {
    fn run(&mut self, command_line: &str) -> Result<CommandOutput, ExecError> {
        let (shell, flag) = Self::shell();
        tracing::debug!(%shell, command = %command_line, "running command");

        let output = Command::new(shell)
            .arg(flag)
            .arg(command_line)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .map_err(|source| ExecError::Spawn {
                command: command_line.to_string(),
                source,
            })?;

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

        if !output.status.success() {
            tracing::debug!(status = ?output.status, "command failed");
            return Err(ExecError::Failed {
                command: command_line.to_string(),
                code: output.status.code(),
                stdout,
                stderr,
            });
        }

        Ok(CommandOutput { stdout, stderr })
    }
}
