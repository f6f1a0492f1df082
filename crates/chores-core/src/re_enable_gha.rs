//! Re-enables the `tests` GitHub Actions workflow of many repositories.
//!
//! GitHub disables scheduled workflows of repositories without activity. For every repository in
//! the list the workflow state is read with `gh workflow list`, the workflow is enabled again when
//! it was disabled for inactivity, and a run is started so the badge is green again.

use crate::guarded::GuardedExecutor;
use crate::repository_list::read_repository_list;
use crate::toolbox::{Toolbox, Tools};
use crate::workflow_list::require_test_workflow;
use anyhow::Result;
use std::path::PathBuf;
use tracing::{info, instrument};

pub const DEFAULT_ORGANISATION: &str = "gocept";
pub const DEFAULT_REPOSITORIES_FILE: &str = "repositories.txt";
const TEST_WORKFLOW_FILE: &str = "tests.yml";
const FORGE_URL: &str = "https://github.com";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReEnableConfig {
  pub organisation: String,
  pub repositories_file: PathBuf,
  /// Start a run even when the workflow is already enabled
  pub force_run: bool,
}

impl Default for ReEnableConfig {
  fn default() -> Self {
    Self {
      organisation: DEFAULT_ORGANISATION.to_string(),
      repositories_file: PathBuf::from(DEFAULT_REPOSITORIES_FILE),
      force_run: false,
    }
  }
}

impl ReEnableConfig {
  pub fn base_url(&self) -> String {
    format!("{FORGE_URL}/{}", self.organisation)
  }

  /// `org/repo` as expected by `gh -R`
  fn slug(&self, repository: &str) -> String {
    format!("{}/{repository}", self.organisation)
  }
}

/// What happened to one repository
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepoOutcome {
  /// Nothing to enable; `run_started` is `None` unless a run was forced
  AlreadyEnabled { run_started: Option<bool> },
  /// Workflow enabled again, `run_started` tells whether the follow-up run could be started
  Enabled { run_started: bool },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoReport {
  pub repository: String,
  pub outcome: RepoOutcome,
}

/// Processes every repository of the list in order
#[instrument(skip_all, fields(organisation = %config.organisation, force_run = config.force_run))]
pub fn run(config: &ReEnableConfig, executor: &GuardedExecutor, toolbox: &Toolbox) -> Result<Vec<RepoReport>> {
  let tools = toolbox.resolve_all(["gh"])?;
  let repositories = read_repository_list(&config.repositories_file)?;
  let mut reports = Vec::with_capacity(repositories.len());
  for repository in repositories {
    let outcome = re_enable_repository(config, executor, &tools, &repository)?;
    reports.push(RepoReport { repository, outcome });
  }
  info!(count = reports.len(), "processed repositories");
  Ok(reports)
}

#[instrument(skip(config, executor, tools))]
pub fn re_enable_repository(config: &ReEnableConfig, executor: &GuardedExecutor, tools: &Tools, repository: &str) -> Result<RepoOutcome> {
  executor.say(repository)?;
  let slug = config.slug(repository);

  let listing = executor.call(&tools.command("gh")?.args(["workflow", "list", "--all", "-R", slug.as_str()]).capture_output())?;
  let workflow = require_test_workflow(&listing.stdout, repository)?;

  if !workflow.is_disabled_by_inactivity() {
    executor.say("    ☑️  already enabled")?;
    let run_started = if config.force_run {
      Some(run_workflow(config, executor, tools, repository)?)
    } else {
      None
    };
    return Ok(RepoOutcome::AlreadyEnabled { run_started });
  }

  info!(workflow_id = %workflow.id, "enabling workflow");
  executor.call(&tools.command("gh")?.args(["workflow", "enable", workflow.id.as_str(), "-R", slug.as_str()]))?;
  let run_started = run_workflow(config, executor, tools, repository)?;
  if run_started {
    executor.say("    ✅ enabled")?;
  }
  Ok(RepoOutcome::Enabled { run_started })
}

/// Starts the test workflow by hand. Only returns `false` when the start failed and the human
/// chose to go on; the hint printed then explains how to allow manual runs.
fn run_workflow(config: &ReEnableConfig, executor: &GuardedExecutor, tools: &Tools, repository: &str) -> Result<bool> {
  let slug = config.slug(repository);
  let result = executor.call(&tools.command("gh")?.args(["workflow", "run", TEST_WORKFLOW_FILE, "-R", slug.as_str()]))?;
  if result.success() {
    return Ok(true);
  }

  executor.say("To enable manually starting workflows clone the repository and add `workflow_dispatch:` to tests.yml -> \"on:\".")?;
  executor.say("Command to clone:")?;
  executor.say(&format!("git clone {}/{repository}.git", config.base_url()))?;
  Ok(false)
}
