//! Process execution.
//!
//! Commands are spawned directly (program plus argument vector), never
//! through a shell, so package specifiers such as `kaleido==0.2.1` and
//! paths with spaces reach the child unchanged on every platform.

use crate::error::{LauncherError, Result};
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};
use std::time::{Duration, Instant};

/// A program invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    /// Program name or path.
    pub program: String,

    /// Arguments, passed verbatim.
    pub args: Vec<String>,
}

impl CommandSpec {
    /// Create a spec for `program` with no arguments.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Append one argument.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append several arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    fn to_command(&self, options: &CommandOptions) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);

        if let Some(cwd) = &options.cwd {
            cmd.current_dir(cwd);
        }
        for (key, value) in &options.env {
            cmd.env(key, value);
        }
        cmd
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", quote(&self.program))?;
        for arg in &self.args {
            write!(f, " {}", quote(arg))?;
        }
        Ok(())
    }
}

fn quote(s: &str) -> String {
    if s.is_empty() || s.contains(char::is_whitespace) {
        format!("\"{}\"", s)
    } else {
        s.to_string()
    }
}

/// Result of executing a command.
#[derive(Debug, Clone)]
pub struct CommandResult {
    /// Exit code (None if killed by signal).
    pub exit_code: Option<i32>,

    /// Standard output.
    pub stdout: String,

    /// Standard error.
    pub stderr: String,

    /// Execution duration.
    pub duration: Duration,

    /// Whether command succeeded (exit code 0).
    pub success: bool,
}

impl CommandResult {
    fn from_status(status: ExitStatus, stdout: String, stderr: String, duration: Duration) -> Self {
        Self {
            exit_code: status.code(),
            stdout,
            stderr,
            duration,
            success: status.success(),
        }
    }
}

/// Options for command execution.
#[derive(Debug, Clone, Default)]
pub struct CommandOptions {
    /// Working directory.
    pub cwd: Option<PathBuf>,

    /// Environment variables (merged with system env).
    pub env: HashMap<String, String>,

    /// Capture stdout (if false, inherits from parent).
    pub capture_stdout: bool,

    /// Capture stderr (if false, inherits from parent).
    pub capture_stderr: bool,
}

/// Execute a command and wait for it.
///
/// Returns `CommandFailed` only when the process cannot be spawned; a
/// non-zero exit is reported through [`CommandResult::success`].
pub fn execute(spec: &CommandSpec, options: &CommandOptions) -> Result<CommandResult> {
    let start = Instant::now();
    let mut cmd = spec.to_command(options);

    cmd.stdout(if options.capture_stdout {
        Stdio::piped()
    } else {
        Stdio::inherit()
    });
    cmd.stderr(if options.capture_stderr {
        Stdio::piped()
    } else {
        Stdio::inherit()
    });

    tracing::debug!("Executing: {}", spec);

    let output = cmd.output().map_err(|e| {
        tracing::debug!("Failed to spawn '{}': {}", spec, e);
        LauncherError::CommandFailed {
            command: spec.to_string(),
            code: None,
        }
    })?;

    let stdout = if options.capture_stdout {
        String::from_utf8_lossy(&output.stdout).to_string()
    } else {
        String::new()
    };
    let stderr = if options.capture_stderr {
        String::from_utf8_lossy(&output.stderr).to_string()
    } else {
        String::new()
    };

    Ok(CommandResult::from_status(
        output.status,
        stdout,
        stderr,
        start.elapsed(),
    ))
}

/// Execute a command and collect output without showing it.
pub fn execute_quiet(spec: &CommandSpec, cwd: Option<&Path>) -> Result<CommandResult> {
    let options = CommandOptions {
        cwd: cwd.map(Path::to_path_buf),
        capture_stdout: true,
        capture_stderr: true,
        ..Default::default()
    };
    execute(spec, &options)
}

/// Run a command in the foreground and block until it exits.
///
/// The child shares the console (stdin, stdout, stderr), so its output and
/// Ctrl-C handling are its own. Spawn failures surface as
/// [`LauncherError::Io`] carrying the OS error.
pub fn execute_foreground(spec: &CommandSpec, options: &CommandOptions) -> Result<ExitStatus> {
    let mut cmd = spec.to_command(options);
    cmd.stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit());

    tracing::debug!("Starting foreground process: {}", spec);

    #[cfg(unix)]
    let _interrupts = InterruptGuard::install();

    let mut child = cmd.spawn()?;
    let status = child.wait()?;

    tracing::debug!("Foreground process exited: {}", status);
    Ok(status)
}

/// Keeps Ctrl-C from ending the launcher while a foreground child runs.
///
/// The terminal sends SIGINT to the whole foreground process group, so the
/// child still receives it and the launcher goes on to collect its exit
/// status. A caught signal reverts to the default action across `exec`, so
/// the child starts with ordinary Ctrl-C handling.
#[cfg(unix)]
struct InterruptGuard {
    previous: libc::sighandler_t,
}

#[cfg(unix)]
impl InterruptGuard {
    fn install() -> Self {
        extern "C" fn on_interrupt(_: libc::c_int) {}

        let handler = on_interrupt as extern "C" fn(libc::c_int) as libc::sighandler_t;
        // SAFETY: the handler is async-signal-safe (it does nothing).
        let previous = unsafe { libc::signal(libc::SIGINT, handler) };
        if previous == libc::SIG_ERR {
            tracing::debug!("Could not install SIGINT handler");
        }
        Self { previous }
    }
}

#[cfg(unix)]
impl Drop for InterruptGuard {
    fn drop(&mut self) {
        if self.previous != libc::SIG_ERR {
            // SAFETY: restores the disposition that was in place before install.
            unsafe {
                libc::signal(libc::SIGINT, self.previous);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sh(script: &str) -> CommandSpec {
        if cfg!(target_os = "windows") {
            CommandSpec::new("cmd").args(["/C", script])
        } else {
            CommandSpec::new("sh").args(["-c", script])
        }
    }

    #[test]
    fn display_quotes_whitespace() {
        let spec = CommandSpec::new("python3")
            .args(["-m", "streamlit", "run"])
            .arg("my dashboard.py");
        assert_eq!(
            spec.to_string(),
            "python3 -m streamlit run \"my dashboard.py\""
        );
    }

    #[test]
    fn execute_successful_command() {
        let result = execute_quiet(&sh("echo hello"), None).unwrap();

        assert!(result.success);
        assert_eq!(result.exit_code, Some(0));
        assert!(result.stdout.contains("hello"));
    }

    #[test]
    fn execute_failing_command() {
        let result = execute_quiet(&sh("exit 3"), None).unwrap();

        assert!(!result.success);
        assert_eq!(result.exit_code, Some(3));
    }

    #[test]
    fn execute_with_env() {
        let mut options = CommandOptions {
            capture_stdout: true,
            capture_stderr: true,
            ..Default::default()
        };
        options
            .env
            .insert("LAUNCHER_VAR".to_string(), "launcher_value".to_string());

        let script = if cfg!(target_os = "windows") {
            "echo %LAUNCHER_VAR%"
        } else {
            "echo $LAUNCHER_VAR"
        };

        let result = execute(&sh(script), &options).unwrap();
        assert!(result.stdout.contains("launcher_value"));
    }

    #[test]
    fn execute_missing_program_is_command_failed() {
        let spec = CommandSpec::new("definitely-not-a-real-program-4711");
        let err = execute_quiet(&spec, None).unwrap_err();
        assert!(matches!(err, LauncherError::CommandFailed { code: None, .. }));
    }

    #[test]
    fn foreground_returns_exit_status() {
        let status = execute_foreground(&sh("exit 7"), &CommandOptions::default()).unwrap();
        assert_eq!(status.code(), Some(7));
    }

    #[test]
    fn foreground_runs_in_cwd() {
        let temp = tempfile::TempDir::new().unwrap();
        let options = CommandOptions {
            cwd: Some(temp.path().to_path_buf()),
            ..Default::default()
        };
        let script = if cfg!(target_os = "windows") {
            "type nul > marker.txt"
        } else {
            "touch marker.txt"
        };

        let status = execute_foreground(&sh(script), &options).unwrap();
        assert!(status.success());
        assert!(temp.path().join("marker.txt").exists());
    }

    #[cfg(unix)]
    #[test]
    fn foreground_child_keeps_default_interrupt_action() {
        use std::os::unix::process::ExitStatusExt;

        let status =
            execute_foreground(&sh("kill -INT $$; exit 0"), &CommandOptions::default()).unwrap();
        assert_eq!(status.signal(), Some(libc::SIGINT));
    }

    #[test]
    fn foreground_missing_program_is_io_error() {
        let spec = CommandSpec::new("definitely-not-a-real-program-4711");
        let err = execute_foreground(&spec, &CommandOptions::default()).unwrap_err();
        assert!(matches!(err, LauncherError::Io(_)));
    }
}
