use anyhow::Result;
use chores_cli::cli::DropLegacyPythonArgs;
use chores_cli::{exit_status, telemetry};
use chores_core::confirm::ConsolePrompt;
use chores_core::drop_legacy_python;
use chores_core::guarded::GuardedExecutor;
use chores_core::toolbox::Toolbox;
use clap::Parser;
use command_executor::command_executor::SystemCommandRunner;
use std::process::ExitCode;

fn main() -> ExitCode {
  telemetry::init_logging();
  let args = DropLegacyPythonArgs::parse();
  exit_status::report(run(args))
}

fn run(args: DropLegacyPythonArgs) -> Result<()> {
  let config = args.into_config();
  let runner = SystemCommandRunner::new();
  let confirm = ConsolePrompt::stdio();
  let executor = GuardedExecutor::new(&runner, &confirm);

  drop_legacy_python::run(&config, &executor, &Toolbox::SearchPath)?;
  Ok(())
}
