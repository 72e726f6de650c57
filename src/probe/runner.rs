// ────────────────────────────────
// src/probe/runner.rs
// Runs a single probe command through a shell and classifies the exit.
// ────────────────────────────────
use async_trait::async_trait;
use std::io;
use std::process::{ExitStatus, Stdio};
use tokio::io::AsyncReadExt;
use tokio::net::unix::pipe;
use tokio::process::Command;
use tracing::{debug, warn};

/// Trimmed combined output on success, the failure otherwise.
pub type ProbeResult = Result<String, ProbeError>;

#[derive(Debug, thiserror::Error)]
pub enum ProbeError {
    #[error("command failed ({status}): {output}")]
    Failed { status: ExitStatus, output: String },

    #[error("failed to start `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to collect command output: {0}")]
    Io(#[from] io::Error),
}

impl ProbeError {
    /// Whatever the command printed before failing. Empty when it never ran.
    pub fn output(&self) -> &str {
        match self {
            ProbeError::Failed { output, .. } => output,
            ProbeError::Spawn { .. } | ProbeError::Io(_) => "",
        }
    }
}

/// Executes one command line and reports its outcome.
#[async_trait]
pub trait ProbeRunner: Send + Sync {
    async fn run(&self, command: &str) -> ProbeResult;
}

/// Runs probes as `<shell> -c <command>`.
///
/// stdout and stderr share a single pipe, so the captured text keeps the
/// order the command wrote it in. The child is killed if the returned future
/// is dropped before the command exits.
#[derive(Debug, Clone)]
pub struct ShellRunner {
    shell: String,
}

impl ShellRunner {
    pub fn new(shell: impl Into<String>) -> Self {
        Self { shell: shell.into() }
    }
}

#[async_trait]
impl ProbeRunner for ShellRunner {
    async fn run(&self, command: &str) -> ProbeResult {
        let (writer, mut reader) = pipe::pipe()?;
        let stdout = writer.into_blocking_fd()?;
        let stderr = stdout.try_clone()?;

        // The Command owns the parent's copies of the write end; it has to be
        // dropped before reading or the pipe never reaches EOF.
        let mut child = {
            let mut cmd = Command::new(&self.shell);
            cmd.arg("-c")
                .arg(command)
                .stdin(Stdio::null())
                .stdout(Stdio::from(stdout))
                .stderr(Stdio::from(stderr))
                .kill_on_drop(true);

            cmd.spawn().map_err(|source| ProbeError::Spawn {
                command: command.to_string(),
                source,
            })?
        };

        let mut raw = Vec::new();
        reader.read_to_end(&mut raw).await?;
        let status = child.wait().await?;

        let output = String::from_utf8_lossy(&raw).trim().to_string();

        if status.success() {
            debug!(command, "probe succeeded");
            Ok(output)
        } else {
            warn!(command, %status, "probe failed");
            Err(ProbeError::Failed { status, output })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn runner() -> ShellRunner {
        ShellRunner::new("sh")
    }

    #[tokio::test]
    async fn test_success_returns_trimmed_output() {
        let output = runner().run("echo ok").await.unwrap();
        assert_eq!(output, "ok");
    }

    #[tokio::test]
    async fn test_success_with_no_output() {
        let output = runner().run("true").await.unwrap();
        assert_eq!(output, "");
    }

    #[tokio::test]
    async fn test_non_zero_exit_keeps_full_output() {
        let err = runner()
            .run("echo 'Cannot connect to the daemon'; exit 3")
            .await
            .unwrap_err();

        match &err {
            ProbeError::Failed { status, output } => {
                assert_eq!(status.code(), Some(3));
                assert_eq!(output, "Cannot connect to the daemon");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(err.output(), "Cannot connect to the daemon");
        assert!(err.to_string().starts_with("command failed ("));
        assert!(err.to_string().ends_with(": Cannot connect to the daemon"));
    }

    #[tokio::test]
    async fn test_stdout_and_stderr_are_interleaved() {
        let output = runner()
            .run("echo first; echo second >&2; echo third")
            .await
            .unwrap();
        assert_eq!(output, "first\nsecond\nthird");
    }

    #[tokio::test]
    async fn test_stderr_captured_on_failure() {
        let err = runner().run("echo broken >&2; false").await.unwrap_err();
        assert_eq!(err.output(), "broken");
    }

    #[tokio::test]
    async fn test_missing_shell_is_spawn_error() {
        let err = ShellRunner::new("/nonexistent/shell")
            .run("true")
            .await
            .unwrap_err();

        assert!(matches!(err, ProbeError::Spawn { .. }));
        assert_eq!(err.output(), "");
        assert!(err.to_string().contains("failed to start `true`"));
    }

    #[tokio::test]
    async fn test_dropped_probe_kills_shell() {
        let marker = std::env::temp_dir().join(format!("probe-{}", uuid::Uuid::new_v4()));
        let command = format!("sleep 1; touch '{}'", marker.display());

        let runner = runner();
        let result = tokio::time::timeout(Duration::from_millis(100), runner.run(&command)).await;
        assert!(result.is_err());

        tokio::time::sleep(Duration::from_millis(1500)).await;
        assert!(!marker.exists());
    }
}
