//! Subprocess execution through the platform shell.
//!
//! Every command goes through a shell (`/bin/sh -c` or `cmd.exe /d /s /c`)
//! so that pipes and chaining inside a single command string keep working.
//! The command line is the escaped executable followed by the arguments
//! joined with spaces. Arguments are not quoted; quoting them is up to the
//! caller.

use std::io::{self, Read, Write};
use std::path::Path;
use std::process::{Command, Stdio};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use crossterm::style::Stylize;
use tracing::debug;

use crate::config::RunConfig;
use crate::env::EnvironmentMap;
use crate::error::{CrossRunError, Result};
use crate::utils::{stderr_color, stdout_color};

use super::prefix::OutputPrefix;

/// Size of the buffer used to forward child output.
const CHUNK_SIZE: usize = 8192;

/// How long to keep waiting for output after the command has exited.
///
/// Pipes inherited by background processes stay open past this point; their
/// readers keep forwarding on their own.
const DRAIN_TIMEOUT: Duration = Duration::from_millis(250);

/// An executable and its arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandInvocation {
    /// Program to run, as typed or as resolved.
    pub executable: String,
    /// Arguments, in order.
    pub args: Vec<String>,
}

impl CommandInvocation {
    /// Create an invocation.
    pub fn new(executable: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            executable: executable.into(),
            args,
        }
    }

    /// The line handed to the shell.
    pub fn command_line(&self) -> String {
        let mut parts = Vec::with_capacity(self.args.len() + 1);
        parts.push(escape_path(&self.executable));
        parts.extend(self.args.iter().cloned());
        parts.join(" ")
    }
}

/// Escape whitespace in an executable path for the current platform's shell.
pub fn escape_path(path: &str) -> String {
    if cfg!(windows) {
        escape_path_windows(path)
    } else {
        escape_path_posix(path)
    }
}

/// Insert a backslash before each run of whitespace.
///
/// # Examples
///
/// ```
/// use cross_run::runner::escape_path_posix;
///
/// assert_eq!(escape_path_posix("/opt/my tools/npm"), "/opt/my\\ tools/npm");
/// ```
pub fn escape_path_posix(path: &str) -> String {
    let mut escaped = String::with_capacity(path.len());
    let mut in_whitespace = false;
    for c in path.chars() {
        if c.is_whitespace() {
            if !in_whitespace {
                escaped.push('\\');
            }
            in_whitespace = true;
        } else {
            in_whitespace = false;
        }
        escaped.push(c);
    }
    escaped
}

/// Wrap each whitespace character in double quotes.
///
/// # Examples
///
/// ```
/// use cross_run::runner::escape_path_windows;
///
/// assert_eq!(
///     escape_path_windows(r"C:\Program Files\nodejs\npm.cmd"),
///     r#"C:\Program" "Files\nodejs\npm.cmd"#
/// );
/// ```
pub fn escape_path_windows(path: &str) -> String {
    let mut escaped = String::with_capacity(path.len());
    for c in path.chars() {
        if c.is_whitespace() {
            escaped.push('"');
            escaped.push(c);
            escaped.push('"');
        } else {
            escaped.push(c);
        }
    }
    escaped
}

/// How child output and diagnostics are presented.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OutputPolicy {
    /// Forward output untouched and skip diagnostics.
    pub raw: bool,
    /// Echo the command line before spawning.
    pub verbose: bool,
    /// Print the command line instead of spawning.
    pub dry_run: bool,
    /// Emit ANSI colours on stdout.
    pub stdout_color: bool,
    /// Emit ANSI colours on stderr.
    pub stderr_color: bool,
}

impl OutputPolicy {
    /// Policy for a run. Each stream is coloured only when it is a terminal
    /// and `NO_COLOR` is unset.
    pub fn from_config(config: &RunConfig) -> Self {
        Self {
            raw: config.raw,
            verbose: config.verbose,
            dry_run: config.dry_run,
            stdout_color: stdout_color(),
            stderr_color: stderr_color(),
        }
    }

    /// Rendered labels for a command's two output streams.
    ///
    /// Both are `None` for raw output or an unlabelled prefix.
    pub fn labels(&self, prefix: &OutputPrefix) -> StreamLabels {
        if self.raw {
            return StreamLabels::default();
        }
        StreamLabels {
            stdout: prefix.render(self.stdout_color),
            stderr: prefix.render(self.stderr_color),
        }
    }
}

/// Label text put in front of each chunk, per stream.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StreamLabels {
    /// Label for stdout chunks.
    pub stdout: Option<String>,
    /// Label for stderr chunks.
    pub stderr: Option<String>,
}

#[derive(Debug, Clone, Copy)]
enum Stream {
    Stdout,
    Stderr,
}

impl Stream {
    /// Write one chunk while holding the stream lock so chunks never interleave.
    fn write(self, bytes: &[u8]) {
        match self {
            Stream::Stdout => {
                let mut out = io::stdout().lock();
                out.write_all(bytes).ok();
                out.flush().ok();
            }
            Stream::Stderr => {
                let mut err = io::stderr().lock();
                err.write_all(bytes).ok();
                err.flush().ok();
            }
        }
    }
}

/// Put the rendered label in front of a chunk and end it with a newline.
///
/// Without a label the chunk is returned as is.
pub fn render_chunk(chunk: &[u8], label: Option<&str>) -> Vec<u8> {
    let Some(label) = label else {
        return chunk.to_vec();
    };
    let mut out = Vec::with_capacity(label.len() + chunk.len() + 1);
    out.extend_from_slice(label.as_bytes());
    out.extend_from_slice(chunk);
    if !chunk.ends_with(b"\n") {
        out.push(b'\n');
    }
    out
}

/// Forward a child pipe on a detached thread, signalling `done` at EOF.
fn spawn_pump<R>(reader: R, stream: Stream, label: Option<String>, done: mpsc::Sender<()>)
where
    R: Read + Send + 'static,
{
    thread::spawn(move || {
        pump(reader, stream, label.as_deref());
        done.send(()).ok();
    });
}

/// Wait up to [`DRAIN_TIMEOUT`] for `pumps` readers to reach EOF.
fn drain(done: &mpsc::Receiver<()>, pumps: usize) {
    let deadline = Instant::now() + DRAIN_TIMEOUT;
    for _ in 0..pumps {
        let remaining = deadline.saturating_duration_since(Instant::now());
        if done.recv_timeout(remaining).is_err() {
            debug!("output pipes still open after exit, not waiting for them");
            return;
        }
    }
}

fn pump(mut reader: impl Read, stream: Stream, label: Option<&str>) {
    let mut buf = [0u8; CHUNK_SIZE];
    loop {
        match reader.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => stream.write(&render_chunk(&buf[..n], label)),
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(_) => break,
        }
    }
}

#[cfg(unix)]
fn shell_command(command_line: &str) -> Command {
    let mut command = Command::new("/bin/sh");
    command.arg("-c").arg(command_line);
    command
}

#[cfg(windows)]
fn shell_command(command_line: &str) -> Command {
    use std::os::windows::process::CommandExt;

    let shell = std::env::var_os("ComSpec").unwrap_or_else(|| "cmd.exe".into());
    let mut command = Command::new(shell);
    command
        .args(["/d", "/s", "/c"])
        .raw_arg(format!("\"{command_line}\""));
    command
}

/// Launches commands and streams their output.
#[derive(Debug, Clone, Copy)]
pub struct ProcessSpawner<'a> {
    env: &'a EnvironmentMap,
    working_dir: &'a Path,
    policy: OutputPolicy,
}

impl<'a> ProcessSpawner<'a> {
    /// Create a spawner. Children inherit the process environment with `env`
    /// laid over it.
    pub fn new(env: &'a EnvironmentMap, working_dir: &'a Path, policy: OutputPolicy) -> Self {
        Self {
            env,
            working_dir,
            policy,
        }
    }

    /// Run one command until it exits.
    ///
    /// Child stdout and stderr are forwarded chunk by chunk to the matching
    /// stream of this process, labelled when `prefix` has a label and output
    /// is not raw. The command settles when the child process exits, even if
    /// a background process it started still holds its output open.
    ///
    /// # Errors
    ///
    /// Returns [`CrossRunError::SpawnFailure`] if the shell cannot be started
    /// and [`CrossRunError::NonZeroExit`] if the command exits with a
    /// non-zero code (`-1` when killed by a signal).
    pub fn spawn(&self, invocation: &CommandInvocation, prefix: &OutputPrefix) -> Result<()> {
        let command_line = invocation.command_line();
        let labels = self.policy.labels(prefix);
        let label = labels.stderr.as_deref();

        if self.policy.verbose {
            self.echo(prefix.render(self.policy.stderr_color).as_deref(), &command_line);
        }

        if self.policy.dry_run {
            let line = format!("Would run: {command_line}\n");
            Stream::Stdout.write(&render_chunk(line.as_bytes(), labels.stdout.as_deref()));
            return Ok(());
        }

        let mut command = shell_command(&command_line);
        command
            .envs(self.env)
            .current_dir(self.working_dir)
            .stdin(Stdio::inherit())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        debug!(command = %command_line, "spawning");

        let mut child = match command.spawn() {
            Ok(child) => child,
            Err(source) => {
                self.report(label, &source.to_string());
                return Err(CrossRunError::SpawnFailure {
                    command: command_line,
                    source,
                });
            }
        };

        let (done_tx, done_rx) = mpsc::channel();
        let mut pumps = 0;
        if let Some(out) = child.stdout.take() {
            spawn_pump(out, Stream::Stdout, labels.stdout.clone(), done_tx.clone());
            pumps += 1;
        }
        if let Some(err) = child.stderr.take() {
            spawn_pump(err, Stream::Stderr, labels.stderr.clone(), done_tx.clone());
            pumps += 1;
        }
        drop(done_tx);

        let status = child.wait();
        drain(&done_rx, pumps);

        let status = match status {
            Ok(status) => status,
            Err(source) => {
                self.report(label, &source.to_string());
                return Err(CrossRunError::SpawnFailure {
                    command: command_line,
                    source,
                });
            }
        };

        debug!(command = %command_line, code = ?status.code(), "settled");

        if status.success() {
            return Ok(());
        }

        let code = status.code().unwrap_or(-1);
        self.report(label, &format!("Command exited with code {code}."));
        Err(CrossRunError::NonZeroExit {
            command: command_line,
            code,
        })
    }

    fn echo(&self, label: Option<&str>, command_line: &str) {
        let line = if self.policy.stderr_color {
            command_line.dark_grey().to_string()
        } else {
            command_line.to_string()
        };
        let mut out = String::new();
        if let Some(label) = label {
            out.push_str(label);
        }
        out.push_str(&line);
        out.push('\n');
        Stream::Stderr.write(out.as_bytes());
    }

    /// One-line failure diagnostic, skipped for raw output.
    fn report(&self, label: Option<&str>, message: &str) {
        if self.policy.raw {
            return;
        }
        let message = message.trim_end_matches('\n');
        let message = if self.policy.stderr_color {
            message.dark_red().to_string()
        } else {
            message.to_string()
        };
        let line = format!("{}{message}\n", label.unwrap_or_default());
        Stream::Stderr.write(line.as_bytes());
    }
}
