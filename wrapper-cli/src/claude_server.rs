use std::env;
use std::path::PathBuf;
use std::process::{ExitStatus, Stdio};

use tokio::process::{Child, Command};

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("claude CLI not found. Install Claude Code and make sure it is on your PATH")]
    NotFound,
    #[error("could not start claude mcp serve: {0}")]
    Spawn(std::io::Error),
    #[error("could not stop claude mcp serve: {0}")]
    Stop(std::io::Error),
}

/// Supervisor for the `claude mcp serve` child process.
///
/// The child shares the wrapper's terminal: stdin, stdout and stderr are
/// all inherited, nothing is captured or parsed, and there is no restart
/// logic. The handle exists so the child can be stopped on shutdown.
pub struct ClaudeMcpServer {
    child: Child,
}

impl ClaudeMcpServer {
    pub fn start() -> Result<Self, Error> {
        let claude_path = find_claude_binary()?;

        tracing::info!("starting claude mcp serve from {}", claude_path.display());

        Self::spawn_command(Command::new(claude_path).args(["mcp", "serve"]))
    }

    fn spawn_command(command: &mut Command) -> Result<Self, Error> {
        let child = command
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .kill_on_drop(true)
            .spawn()
            .map_err(Error::Spawn)?;

        Ok(Self { child })
    }

    /// Non-blocking probe, used for logging only. The HTTP status body
    /// never reflects this.
    pub fn is_running(&mut self) -> bool {
        matches!(self.child.try_wait(), Ok(None))
    }

    /// Kill the child and wait for it to be reaped, reporting the exit
    /// status instead of firing and forgetting.
    pub async fn stop(mut self) -> Result<ExitStatus, Error> {
        if self.child.try_wait().map_err(Error::Stop)?.is_none() {
            self.child.start_kill().map_err(Error::Stop)?;
        }

        let status = self.child.wait().await.map_err(Error::Stop)?;
        tracing::info!("claude mcp serve exited with {}", status);

        Ok(status)
    }
}

fn find_claude_binary() -> Result<PathBuf, Error> {
    if let Ok(path) = which::which("claude") {
        return Ok(path);
    }

    let home = match env::var("HOME") {
        Ok(val) => val,
        Err(_e) => "/var/tmp".to_string(),
    };

    let common_paths = [
        PathBuf::from(&home).join(".claude/local/claude"),
        PathBuf::from(&home).join(".local/bin/claude"),
        PathBuf::from("/usr/local/bin/claude"),
    ];

    common_paths
        .into_iter()
        .find(|path| path.exists())
        .ok_or(Error::NotFound)
}
