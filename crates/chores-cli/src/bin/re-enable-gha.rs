use anyhow::Result;
use chores_cli::cli::ReEnableGhaArgs;
use chores_cli::{exit_status, telemetry};
use chores_core::confirm::ConsolePrompt;
use chores_core::guarded::GuardedExecutor;
use chores_core::re_enable_gha::{self, RepoOutcome};
use chores_core::toolbox::Toolbox;
use clap::Parser;
use command_executor::command_executor::SystemCommandRunner;
use std::process::ExitCode;

fn main() -> ExitCode {
  telemetry::init_logging();
  let args = ReEnableGhaArgs::parse();
  exit_status::report(run(args))
}

fn run(args: ReEnableGhaArgs) -> Result<()> {
  let config = args.into_config();
  let runner = SystemCommandRunner::new();
  let confirm = ConsolePrompt::stdio();
  let executor = GuardedExecutor::new(&runner, &confirm);

  let reports = re_enable_gha::run(&config, &executor, &Toolbox::SearchPath)?;
  let enabled = reports.iter().filter(|report| matches!(report.outcome, RepoOutcome::Enabled { .. })).count();
  tracing::info!(repositories = reports.len(), enabled, "done");
  Ok(())
}
