use crate::error::ChoresError;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::instrument;

/// Checks that `path` is a git working copy and returns it as an absolute path.
/// Nothing is spawned, so this runs before any other step.
#[instrument]
pub fn validate_git_clone(path: &Path) -> Result<PathBuf> {
  let absolute = std::path::absolute(path).with_context(|| format!("Failed to resolve {}", path.display()))?;
  // `.git` is a file in linked worktrees
  if !absolute.join(".git").exists() {
    return Err(ChoresError::NotAGitClone { path: absolute }.into());
  }
  Ok(absolute)
}
