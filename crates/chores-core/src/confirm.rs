use anyhow::{Context, Result, anyhow, bail};
use std::collections::VecDeque;
use std::io::{self, BufRead, Stdout, StdinLock, Write};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

/// A command whose exit code was not in its allowed set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandFailure {
  pub command: String,
  pub exit_code: i32,
}

/// Decisions that are delegated to the human running a chore
pub trait Confirm {
  /// Asks whether to carry on after `failure`. `false` means abort.
  fn proceed_after_failure(&self, failure: &CommandFailure) -> Result<bool>;

  /// Blocks until the human has looked at the output and wants to continue
  fn wait_for_accept(&self) -> Result<()>;

  /// Tells the human what happens next or what to do, one line
  fn say(&self, message: &str) -> Result<()>;
}

/// Asks on a console, by default the process' own stdin/stdout
pub struct ConsolePrompt<R, W> {
  input: Mutex<R>,
  output: Mutex<W>,
}

impl ConsolePrompt<StdinLock<'static>, Stdout> {
  pub fn stdio() -> Self {
    Self::new(io::stdin().lock(), io::stdout())
  }
}

impl<R: BufRead, W: Write> ConsolePrompt<R, W> {
  pub fn new(input: R, output: W) -> Self {
    Self {
      input: Mutex::new(input),
      output: Mutex::new(output),
    }
  }

  /// Gives back the writer, handy to inspect what was printed
  pub fn into_output(self) -> Result<W> {
    self.output.into_inner().map_err(|e| anyhow!("Failed to acquire lock: {e}"))
  }

  fn write(&self, text: &str) -> Result<()> {
    let mut output = self.output.lock().map_err(|e| anyhow!("Failed to acquire lock: {e}"))?;
    output.write_all(text.as_bytes()).context("Failed to write prompt")?;
    output.flush().context("Failed to flush prompt")
  }

  /// Returns `None` on end of input
  fn read_line(&self) -> Result<Option<String>> {
    let mut input = self.input.lock().map_err(|e| anyhow!("Failed to acquire lock: {e}"))?;
    let mut line = String::new();
    let read = input.read_line(&mut line).context("Failed to read answer")?;
    Ok(if read == 0 { None } else { Some(line) })
  }
}

impl<R: BufRead, W: Write> Confirm for ConsolePrompt<R, W> {
  fn proceed_after_failure(&self, failure: &CommandFailure) -> Result<bool> {
    tracing::debug!(command = %failure.command, exit_code = failure.exit_code, "asking whether to proceed");
    self.write("ABORTING: Please fix the errors shown above.\nProceed anyway (y/N)? ")?;
    let answer = self.read_line()?;
    Ok(answer.is_some_and(|answer| answer.trim().eq_ignore_ascii_case("y")))
  }

  fn wait_for_accept(&self) -> Result<()> {
    self.write("Proceed by hitting <ENTER>\n")?;
    if self.read_line()?.is_none() {
      bail!("Standard input was closed while waiting for <ENTER>");
    }
    Ok(())
  }

  fn say(&self, message: &str) -> Result<()> {
    self.write(&format!("{message}\n"))
  }
}

/// Answers prompts from a fixed script, for non-interactive use and tests.
/// Once the script is exhausted every failure is declined.
#[derive(Debug, Default)]
pub struct ScriptedConfirm {
  answers: Mutex<VecDeque<bool>>,
  failures: Mutex<Vec<CommandFailure>>,
  messages: Mutex<Vec<String>>,
  accept_waits: AtomicUsize,
}

impl ScriptedConfirm {
  pub fn new(answers: impl IntoIterator<Item = bool>) -> Self {
    Self {
      answers: Mutex::new(answers.into_iter().collect()),
      ..Self::default()
    }
  }

  /// Declines every failure
  pub fn declining() -> Self {
    Self::default()
  }

  /// Failures that were put to the script, in order
  pub fn failures(&self) -> Vec<CommandFailure> {
    self.failures.lock().map(|failures| failures.clone()).unwrap_or_default()
  }

  pub fn failure_prompts(&self) -> usize {
    self.failures().len()
  }

  pub fn accept_waits(&self) -> usize {
    self.accept_waits.load(Ordering::SeqCst)
  }

  /// Everything passed to [`Confirm::say`], in order
  pub fn messages(&self) -> Vec<String> {
    self.messages.lock().map(|messages| messages.clone()).unwrap_or_default()
  }
}

impl Confirm for ScriptedConfirm {
  fn proceed_after_failure(&self, failure: &CommandFailure) -> Result<bool> {
    self.failures.lock().map_err(|e| anyhow!("Failed to acquire lock: {e}"))?.push(failure.clone());
    let answer = self.answers.lock().map_err(|e| anyhow!("Failed to acquire lock: {e}"))?.pop_front();
    Ok(answer.unwrap_or(false))
  }

  fn wait_for_accept(&self) -> Result<()> {
    self.accept_waits.fetch_add(1, Ordering::SeqCst);
    Ok(())
  }

  fn say(&self, message: &str) -> Result<()> {
    self.messages.lock().map_err(|e| anyhow!("Failed to acquire lock: {e}"))?.push(message.to_string());
    Ok(())
  }
}
