use anyhow::{Context, Result};
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Output};
use tracing::instrument;

/// Whether the child writes to our terminal or into buffers we keep
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
  /// Child shares stdin/stdout/stderr with us (editors, test runners, `git push`)
  #[default]
  Inherit,
  /// stdout and stderr are collected and returned in [`CommandOutput`]
  Capture,
}

/// A single external program invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
  program: OsString,
  args: Vec<OsString>,
  output_mode: OutputMode,
  current_dir: Option<PathBuf>,
}

impl CommandSpec {
  pub fn new(program: impl Into<OsString>) -> Self {
    Self {
      program: program.into(),
      args: Vec::new(),
      output_mode: OutputMode::Inherit,
      current_dir: None,
    }
  }

  #[must_use]
  pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
    self.args.push(arg.into());
    self
  }

  #[must_use]
  pub fn args<I, S>(mut self, args: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<OsString>,
  {
    self.args.extend(args.into_iter().map(Into::into));
    self
  }

  #[must_use]
  pub fn capture_output(mut self) -> Self {
    self.output_mode = OutputMode::Capture;
    self
  }

  /// Run the child in `dir` instead of the current working directory
  #[must_use]
  pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
    self.current_dir = Some(dir.into());
    self
  }

  pub fn program(&self) -> &OsStr {
    &self.program
  }

  pub fn arguments(&self) -> &[OsString] {
    &self.args
  }

  pub fn output_mode(&self) -> OutputMode {
    self.output_mode
  }

  pub fn working_dir(&self) -> Option<&Path> {
    self.current_dir.as_deref()
  }

  /// File name of the program, so `/usr/bin/git` reads as `git`
  pub fn program_name(&self) -> String {
    Path::new(&self.program)
      .file_name()
      .unwrap_or(self.program.as_os_str())
      .to_string_lossy()
      .into_owned()
  }

  /// Human readable command line used in logs and prompts
  pub fn command_line(&self) -> String {
    let mut line = self.program_name();
    for arg in &self.args {
      line.push(' ');
      line.push_str(&arg.to_string_lossy());
    }
    line
  }
}

/// Result of a finished child process
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommandOutput {
  /// Exit code, or -1 when the child was terminated by a signal
  pub exit_code: i32,
  pub stdout: String,
  pub stderr: String,
}

impl CommandOutput {
  pub fn from_exit_code(exit_code: i32) -> Self {
    Self {
      exit_code,
      ..Self::default()
    }
  }

  pub fn with_stdout(exit_code: i32, stdout: impl Into<String>) -> Self {
    Self {
      exit_code,
      stdout: stdout.into(),
      stderr: String::new(),
    }
  }

  fn from_captured(output: Output) -> Self {
    Self {
      exit_code: exit_code_of(output.status),
      stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
      stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    }
  }

  pub fn success(&self) -> bool {
    self.exit_code == 0
  }

  /// Captured stdout split into trimmed, non-empty lines
  pub fn lines(&self) -> Vec<String> {
    parse_lines(&self.stdout)
  }
}

pub fn parse_lines(output: &str) -> Vec<String> {
  output
    .lines()
    .filter_map(|line| {
      let trimmed = line.trim();
      if !trimmed.is_empty() { Some(trimmed.to_string()) } else { None }
    })
    .collect()
}

fn exit_code_of(status: ExitStatus) -> i32 {
  status.code().unwrap_or(-1)
}

/// Something that can run a [`CommandSpec`] to completion
pub trait CommandRunner {
  /// Runs the command and reports its exit code. A non-zero exit code is not an error here,
  /// only failing to start or wait for the process is.
  fn run(&self, spec: &CommandSpec) -> Result<CommandOutput>;
}

/// Runs commands as real child processes
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemCommandRunner;

impl SystemCommandRunner {
  #[must_use]
  pub fn new() -> Self {
    Self
  }
}

impl CommandRunner for SystemCommandRunner {
  #[instrument(
    skip(self, spec),
    fields(
      command = %spec.command_line(),
      current_dir = ?spec.working_dir(),
      exit_code = tracing::field::Empty,
    )
  )]
  fn run(&self, spec: &CommandSpec) -> Result<CommandOutput> {
    let mut command = Command::new(spec.program());
    command.args(spec.arguments());
    if let Some(dir) = spec.working_dir() {
      command.current_dir(dir);
    }

    let output = match spec.output_mode() {
      OutputMode::Capture => {
        let output = command.output().with_context(|| format!("Failed to execute `{}`", spec.command_line()))?;
        CommandOutput::from_captured(output)
      }
      OutputMode::Inherit => {
        let status = command.status().with_context(|| format!("Failed to execute `{}`", spec.command_line()))?;
        CommandOutput::from_exit_code(exit_code_of(status))
      }
    };

    tracing::Span::current().record("exit_code", output.exit_code);
    if output.success() {
      tracing::debug!("command finished");
    } else {
      tracing::debug!(stderr = %output.stderr.trim(), "command returned non-zero exit code");
    }
    Ok(output)
  }
}
