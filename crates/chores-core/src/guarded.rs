use crate::confirm::{CommandFailure, Confirm};
use crate::error::ChoresError;
use anyhow::Result;
use command_executor::command_executor::{CommandOutput, CommandRunner, CommandSpec, OutputMode};
use tracing::instrument;

/// Exit codes accepted by [`GuardedExecutor::call`]
pub const SUCCESS_ONLY: &[i32] = &[0];

/// Runs commands and hands any unexpected exit code to the human.
///
/// Every failure is presented exactly once. Declining yields [`ChoresError::Aborted`] carrying the
/// command's exit code, accepting returns the output as if nothing happened so the caller can
/// look at the exit code itself.
#[derive(Clone, Copy)]
pub struct GuardedExecutor<'a> {
  runner: &'a dyn CommandRunner,
  confirm: &'a dyn Confirm,
}

impl<'a> GuardedExecutor<'a> {
  pub fn new(runner: &'a dyn CommandRunner, confirm: &'a dyn Confirm) -> Self {
    Self { runner, confirm }
  }

  pub fn confirm(&self) -> &'a dyn Confirm {
    self.confirm
  }

  /// Shows a step message to the human
  pub fn say(&self, message: &str) -> Result<()> {
    self.confirm.say(message)
  }

  /// Runs `spec`, only a zero exit code counts as success
  pub fn call(&self, spec: &CommandSpec) -> Result<CommandOutput> {
    self.call_allowing(spec, SUCCESS_ONLY)
  }

  #[instrument(skip(self, spec), fields(command = %spec.command_line()))]
  pub fn call_allowing(&self, spec: &CommandSpec, allowed_exit_codes: &[i32]) -> Result<CommandOutput> {
    let output = self.runner.run(spec)?;
    if allowed_exit_codes.contains(&output.exit_code) {
      return Ok(output);
    }

    tracing::warn!(exit_code = output.exit_code, ?allowed_exit_codes, "unexpected exit code");
    // captured output never reached the terminal, show it before asking
    if spec.output_mode() == OutputMode::Capture && !output.stderr.is_empty() {
      eprint!("{}", output.stderr);
    }

    let failure = CommandFailure {
      command: spec.command_line(),
      exit_code: output.exit_code,
    };
    if self.confirm.proceed_after_failure(&failure)? {
      tracing::info!(exit_code = output.exit_code, "proceeding despite failure");
      Ok(output)
    } else {
      Err(
        ChoresError::Aborted {
          command: failure.command,
          exit_code: failure.exit_code,
        }
        .into(),
      )
    }
  }
}
