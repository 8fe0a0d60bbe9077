use async_trait::async_trait;
use std::process::Stdio;
use std::time::Duration;
use thiserror::Error;
use tokio::process::Command as TokioCommand;
use tracing::{debug, warn};

#[derive(Error, Debug)]
pub enum ExecError {
    #[error("empty command line")]
    EmptyCommand,
    #[error("failed to spawn {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("{program} timed out after {seconds}s")]
    TimedOut { program: String, seconds: u64 },
}

/// Combined output of a finished command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Stdout followed by stderr, trimmed.
    pub output: String,
    /// `None` when the process was killed by a signal.
    pub exit_code: Option<i32>,
}

impl CommandOutput {
    pub fn new(output: impl Into<String>, exit_code: Option<i32>) -> Self {
        Self {
            output: output.into(),
            exit_code,
        }
    }
}

/// Runs an argv on the host. The gateway only ever talks to the OS through this.
#[async_trait]
pub trait CommandExecutor: Send + Sync {
    async fn run(&self, argv: &[&str]) -> Result<CommandOutput, ExecError>;
}

/// Output text for a command whose failure is reported to the caller as text.
pub fn output_text(result: Result<CommandOutput, ExecError>) -> String {
    match result {
        Ok(out) => out.output,
        Err(e) => e.to_string(),
    }
}

/// Prepends `sudo` to an argv when privileged execution is configured.
pub fn privileged<'a>(use_sudo: bool, argv: &[&'a str]) -> Vec<&'a str> {
    let mut full = Vec::with_capacity(argv.len() + 1);
    if use_sudo {
        full.push("sudo");
    }
    full.extend_from_slice(argv);
    full
}

/// Spawns real processes with `tokio::process`. No shell is involved.
#[derive(Debug, Clone, Default)]
pub struct ProcessExecutor {
    timeout: Option<Duration>,
}

impl ProcessExecutor {
    pub fn new(timeout: Option<Duration>) -> Self {
        Self { timeout }
    }
}

#[async_trait]
impl CommandExecutor for ProcessExecutor {
    async fn run(&self, argv: &[&str]) -> Result<CommandOutput, ExecError> {
        let (program, args) = argv.split_first().ok_or(ExecError::EmptyCommand)?;

        let mut command = TokioCommand::new(program);
        command
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        debug!(?argv, "Executing command.");

        let output_future = command.output();
        let output = match self.timeout {
            Some(limit) => match tokio::time::timeout(limit, output_future).await {
                Ok(result) => result,
                Err(_) => {
                    warn!(?argv, seconds = limit.as_secs(), "Command timed out.");
                    return Err(ExecError::TimedOut {
                        program: program.to_string(),
                        seconds: limit.as_secs(),
                    });
                }
            },
            None => output_future.await,
        }
        .map_err(|source| ExecError::Spawn {
            program: program.to_string(),
            source,
        })?;

        let combined = combine_streams(&output.stdout, &output.stderr);
        debug!(?argv, status = ?output.status, "Command finished.");
        Ok(CommandOutput::new(combined, output.status.code()))
    }
}

fn combine_streams(stdout: &[u8], stderr: &[u8]) -> String {
    let stdout = String::from_utf8_lossy(stdout);
    let stderr = String::from_utf8_lossy(stderr);
    let (stdout, stderr) = (stdout.trim(), stderr.trim());
    match (stdout.is_empty(), stderr.is_empty()) {
        (false, false) => format!("{stdout}\n{stderr}"),
        (false, true) => stdout.to_string(),
        (true, _) => stderr.to_string(),
    }
}
