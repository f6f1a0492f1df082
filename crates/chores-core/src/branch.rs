use crate::guarded::GuardedExecutor;
use crate::toolbox::Tools;
use anyhow::{Result, bail};
use tracing::{info, instrument};

/// Outcome of [`select_branch`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BranchSelection {
  /// The branch already existed, so its pull request is being updated
  Updating,
  /// The branch was created, this is the first run
  Created,
}

impl BranchSelection {
  pub fn is_updating(self) -> bool {
    matches!(self, Self::Updating)
  }
}

/// Switches to `branch_name`, creating it when it does not exist yet.
/// Runs git in the current working directory.
#[instrument(skip(executor, tools))]
pub fn select_branch(executor: &GuardedExecutor, tools: &Tools, branch_name: &str) -> Result<BranchSelection> {
  if branch_name.trim().is_empty() {
    bail!("Branch name cannot be empty");
  }

  let listing = executor.call(&tools.command("git")?.args(["branch", "--format", "%(refname:short)"]).capture_output())?;
  // exact line match, a name with surrounding spaces is a different branch
  let exists = listing.stdout.lines().any(|branch| branch == branch_name);

  let selection = if exists {
    executor.call(&tools.command("git")?.args(["checkout", branch_name]))?;
    BranchSelection::Updating
  } else {
    executor.call(&tools.command("git")?.args(["checkout", "-b", branch_name]))?;
    BranchSelection::Created
  };

  info!(?selection, "selected branch");
  Ok(selection)
}
