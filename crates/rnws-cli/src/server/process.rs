//! Child process supervision for the packager and the bundler.

use crate::error::ServerError;
use std::path::PathBuf;
use std::process::Stdio;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::{Child, Command};
use tokio::task::JoinHandle;

/// How to launch one external tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessSpec {
    /// Service name used in logs and errors
    pub name: &'static str,

    /// Suffix of the `RNWS_<KEY>_BIN` variable that overrides the program
    pub env_key: &'static str,

    pub program: PathBuf,
    pub args: Vec<String>,
    pub cwd: PathBuf,

    /// Variables set on top of the inherited environment
    pub env: Vec<(String, String)>,
}

impl ProcessSpec {
    /// Printable command line.
    pub fn command_line(&self) -> String {
        std::iter::once(self.program.display().to_string())
            .chain(self.args.iter().cloned())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// A running child whose output is forwarded to `tracing`.
///
/// The child is killed when this value is dropped.
#[derive(Debug)]
pub struct ManagedProcess {
    name: &'static str,
    child: Child,
    forwarders: Vec<JoinHandle<()>>,
}

impl ManagedProcess {
    /// Spawn the process described by `spec`.
    pub fn spawn(spec: &ProcessSpec) -> Result<Self, ServerError> {
        let mut child = Command::new(&spec.program)
            .args(&spec.args)
            .current_dir(&spec.cwd)
            .envs(spec.env.iter().map(|(k, v)| (k.as_str(), v.as_str())))
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| ServerError::Spawn {
                name: spec.name,
                command: spec.command_line(),
                reason: e.to_string(),
                env_key: spec.env_key,
            })?;

        tracing::debug!(
            name = spec.name,
            pid = child.id(),
            "spawned {}",
            spec.command_line()
        );

        let mut forwarders = Vec::new();
        if let Some(stdout) = child.stdout.take() {
            forwarders.push(forward_lines(spec.name, stdout));
        }
        if let Some(stderr) = child.stderr.take() {
            forwarders.push(forward_lines(spec.name, stderr));
        }

        Ok(Self {
            name: spec.name,
            child,
            forwarders,
        })
    }

    /// Fail with [`ServerError::ProcessExited`] if the child is gone.
    pub fn ensure_running(&mut self) -> Result<(), ServerError> {
        match self.child.try_wait() {
            Ok(None) => Ok(()),
            Ok(Some(status)) => Err(ServerError::ProcessExited {
                name: self.name,
                status: status.to_string(),
            }),
            Err(e) => Err(ServerError::ProcessExited {
                name: self.name,
                status: e.to_string(),
            }),
        }
    }

    /// Kill the child (if still running) and reap it.
    pub async fn shutdown(&mut self) -> Result<(), ServerError> {
        if let Ok(None) = self.child.try_wait() {
            self.child
                .kill()
                .await
                .map_err(|e| ServerError::Stop(format!("failed to kill {}: {}", self.name, e)))?;
        }

        // Grandchildren may still hold the pipes open
        for forwarder in self.forwarders.drain(..) {
            forwarder.abort();
        }

        tracing::debug!(name = self.name, "stopped");
        Ok(())
    }
}

fn forward_lines<R>(name: &'static str, reader: R) -> JoinHandle<()>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        let mut lines = BufReader::new(reader).lines();
        while let Ok(Some(line)) = lines.next_line().await {
            tracing::debug!("[{}] {}", name, line);
        }
    })
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::time::Duration;

    fn sh(script: &str) -> ProcessSpec {
        ProcessSpec {
            name: "packager",
            env_key: "PACKAGER",
            program: PathBuf::from("/bin/sh"),
            args: vec!["-c".to_string(), script.to_string()],
            cwd: std::env::temp_dir(),
            env: vec![("RNWS_TEST_VALUE".to_string(), "1".to_string())],
        }
    }

    #[test]
    fn test_command_line() {
        let spec = ProcessSpec {
            name: "packager",
            env_key: "PACKAGER",
            program: PathBuf::from("node_modules/.bin/react-native"),
            args: vec!["start".to_string(), "--port".to_string(), "8081".to_string()],
            cwd: PathBuf::from("/app"),
            env: Vec::new(),
        };
        assert_eq!(
            spec.command_line(),
            "node_modules/.bin/react-native start --port 8081"
        );
    }

    #[tokio::test]
    async fn test_spawn_missing_program() {
        let spec = ProcessSpec {
            program: PathBuf::from("/definitely/not/here/react-native"),
            ..sh("")
        };
        let err = ManagedProcess::spawn(&spec).unwrap_err();
        match err {
            ServerError::Spawn { name, command, .. } => {
                assert_eq!(name, "packager");
                assert!(command.starts_with("/definitely/not/here/react-native"));
            }
            other => panic!("expected Spawn error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_exited_child_is_detected() {
        let mut process = ManagedProcess::spawn(&sh("exit 3")).unwrap();

        let mut exited = false;
        for _ in 0..50 {
            if let Err(ServerError::ProcessExited { name, .. }) = process.ensure_running() {
                assert_eq!(name, "packager");
                exited = true;
                break;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
        assert!(exited);
        process.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_shutdown_kills_long_running_child() {
        let mut process =
            ManagedProcess::spawn(&sh("echo ready; echo \"$RNWS_TEST_VALUE\" >&2; sleep 30")).unwrap();
        assert!(process.ensure_running().is_ok());

        tokio::time::timeout(Duration::from_secs(5), process.shutdown())
            .await
            .unwrap()
            .unwrap();
        assert!(process.ensure_running().is_err());

        // Second shutdown is a no-op
        process.shutdown().await.unwrap();
    }
}
