//! Shell command execution with a wall-clock deadline.

use std::{
    io::Read,
    path::Path,
    process::{Command, ExitStatus, Stdio},
    sync::mpsc::{self, Receiver, RecvTimeoutError},
    thread,
    time::{Duration, Instant},
};

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use wait_timeout::ChildExt;

use crate::error::{AgentError, IoResultExt, Result};

/// Default deadline for [`run`] when the caller does not pick one.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Extra time granted to drain pipes of a command that exited right at its
/// deadline.
const OUTPUT_GRACE: Duration = Duration::from_millis(100);

/// Captured result of a finished command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandOutput {
    /// Exit code; negative signal number when killed by a signal (unix)
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    /// Whether the command exited with code zero.
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Runs `cmd` through the platform shell inside `cwd`.
///
/// Output is drained on background threads so a chatty child cannot block on
/// a full pipe before the deadline. The deadline covers the pipes too: a
/// process the command left running in the background keeps them open, and
/// the call still returns once `timeout` has passed.
///
/// # Errors
///
/// Returns [`AgentError::CommandTimeout`] when the command is still running
/// after `timeout` (the child is killed first) or its output is still open,
/// or [`AgentError::FileSystem`] when it cannot be spawned.
pub fn run(cmd: &str, cwd: &Path, timeout: Duration) -> Result<CommandOutput> {
    debug!("Running '{cmd}' in {} (timeout {timeout:?})", cwd.display());
    let deadline = Instant::now() + timeout;

    let mut child = shell(cmd)
        .current_dir(cwd)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .fs_context(cwd)?;

    let stdout = child.stdout.take().map(drain);
    let stderr = child.stderr.take().map(drain);

    let timed_out = || AgentError::CommandTimeout {
        command: cmd.to_string(),
        timeout,
    };

    let Some(status) = child.wait_timeout(timeout).fs_context(cwd)? else {
        warn!("Command '{cmd}' exceeded {timeout:?}, killing it");
        let _ = child.kill();
        let _ = child.wait();
        return Err(timed_out());
    };

    let (Some(stdout), Some(stderr)) = (collect(stdout, deadline), collect(stderr, deadline))
    else {
        warn!("Command '{cmd}' exited but its output stayed open past {timeout:?}");
        return Err(timed_out());
    };

    Ok(CommandOutput {
        exit_code: exit_code(status),
        stdout,
        stderr,
    })
}

#[cfg(not(target_os = "windows"))]
fn shell(cmd: &str) -> Command {
    let mut command = Command::new("sh");
    command.arg("-c").arg(cmd);
    command
}

#[cfg(target_os = "windows")]
fn shell(cmd: &str) -> Command {
    let mut command = Command::new("cmd");
    command.arg("/C").arg(cmd);
    command
}

fn drain<R: Read + Send + 'static>(mut reader: R) -> Receiver<Vec<u8>> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let mut buf = Vec::new();
        let _ = reader.read_to_end(&mut buf);
        let _ = tx.send(buf);
    });
    rx
}

/// Waits for a drained pipe until `deadline`. `None` means it is still open.
fn collect(pipe: Option<Receiver<Vec<u8>>>, deadline: Instant) -> Option<String> {
    let Some(pipe) = pipe else {
        return Some(String::new());
    };
    let wait = deadline
        .saturating_duration_since(Instant::now())
        .max(OUTPUT_GRACE);
    match pipe.recv_timeout(wait) {
        Ok(bytes) => Some(String::from_utf8_lossy(&bytes).into_owned()),
        Err(RecvTimeoutError::Timeout) => None,
        Err(RecvTimeoutError::Disconnected) => Some(String::new()),
    }
}

#[cfg(unix)]
fn exit_code(status: ExitStatus) -> i32 {
    use std::os::unix::process::ExitStatusExt;

    status
        .code()
        .or_else(|| status.signal().map(|sig| -sig))
        .unwrap_or(-1)
}

#[cfg(not(unix))]
fn exit_code(status: ExitStatus) -> i32 {
    status.code().unwrap_or(-1)
}
