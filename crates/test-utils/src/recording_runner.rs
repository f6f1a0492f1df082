use anyhow::{Result, anyhow};
use command_executor::command_executor::{CommandOutput, CommandRunner, CommandSpec, OutputMode};
use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::Mutex;

/// One call seen by [`RecordingRunner`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
  pub command_line: String,
  pub output_mode: OutputMode,
  /// Working directory requested by the spec
  pub current_dir: Option<PathBuf>,
  /// Process working directory at the time of the call
  pub process_dir: Option<PathBuf>,
}

struct Response {
  prefix: String,
  outputs: VecDeque<CommandOutput>,
}

/// Fake [`CommandRunner`] that records every call and answers with canned outputs.
///
/// Responses are matched by command line prefix, first registration wins. Queued outputs are
/// handed out in order and the last one sticks. Unmatched commands succeed with empty output.
#[derive(Default)]
pub struct RecordingRunner {
  responses: Mutex<Vec<Response>>,
  calls: Mutex<Vec<RecordedCall>>,
}

impl RecordingRunner {
  pub fn new() -> Self {
    Self::default()
  }

  /// Answers commands starting with `prefix` with `output`
  pub fn respond(&self, prefix: &str, output: CommandOutput) -> &Self {
    let mut responses = self.responses.lock().unwrap();
    match responses.iter_mut().find(|response| response.prefix == prefix) {
      Some(response) => response.outputs.push_back(output),
      None => responses.push(Response {
        prefix: prefix.to_string(),
        outputs: VecDeque::from([output]),
      }),
    }
    self
  }

  /// Answers commands starting with `prefix` with just an exit code
  pub fn fail(&self, prefix: &str, exit_code: i32) -> &Self {
    self.respond(prefix, CommandOutput::from_exit_code(exit_code))
  }

  pub fn calls(&self) -> Vec<RecordedCall> {
    self.calls.lock().unwrap().clone()
  }

  pub fn command_lines(&self) -> Vec<String> {
    self.calls().into_iter().map(|call| call.command_line).collect()
  }

  /// Number of recorded calls starting with `prefix`
  pub fn count(&self, prefix: &str) -> usize {
    self.command_lines().iter().filter(|line| line.starts_with(prefix)).count()
  }
}

impl CommandRunner for RecordingRunner {
  fn run(&self, spec: &CommandSpec) -> Result<CommandOutput> {
    let command_line = spec.command_line();
    tracing::debug!(command = %command_line, "recorded command");
    self.calls.lock().map_err(|e| anyhow!("Failed to acquire lock: {e}"))?.push(RecordedCall {
      command_line: command_line.clone(),
      output_mode: spec.output_mode(),
      current_dir: spec.working_dir().map(PathBuf::from),
      process_dir: std::env::current_dir().ok(),
    });

    let mut responses = self.responses.lock().map_err(|e| anyhow!("Failed to acquire lock: {e}"))?;
    let output = responses
      .iter_mut()
      .find(|response| command_line.starts_with(&response.prefix))
      .and_then(|response| {
        if response.outputs.len() > 1 {
          response.outputs.pop_front()
        } else {
          response.outputs.front().cloned()
        }
      })
      .unwrap_or_default();
    Ok(output)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use pretty_assertions::assert_eq;

  #[test]
  fn test_unmatched_commands_succeed() {
    let runner = RecordingRunner::new();
    let output = runner.run(&CommandSpec::new("git").args(["add", "."])).unwrap();
    assert!(output.success());
    assert_eq!(runner.command_lines(), vec!["git add ."]);
  }

  #[test]
  fn test_queued_responses_then_last_sticks() {
    let runner = RecordingRunner::new();
    runner.fail("tox", 1).respond("tox", CommandOutput::from_exit_code(0));

    let tox = CommandSpec::new("tox").args(["-p", "auto"]);
    assert_eq!(runner.run(&tox).unwrap().exit_code, 1);
    assert_eq!(runner.run(&tox).unwrap().exit_code, 0);
    assert_eq!(runner.run(&tox).unwrap().exit_code, 0);
    assert_eq!(runner.count("tox -p auto"), 3);
  }

  #[test]
  fn test_records_output_mode() {
    let runner = RecordingRunner::new();
    runner.respond("gh workflow list", CommandOutput::with_stdout(0, "tests active 1\n"));
    let output = runner.run(&CommandSpec::new("gh").args(["workflow", "list"]).capture_output()).unwrap();
    assert_eq!(output.stdout, "tests active 1\n");
    assert_eq!(runner.calls()[0].output_mode, OutputMode::Capture);
  }
}
