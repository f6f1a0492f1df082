use anyhow::{Context, Result};
use std::env;
use std::path::{Path, PathBuf};

/// Changes the process working directory until dropped.
///
/// The previous directory is restored on every way out of the scope, including `?` and panics.
#[must_use = "the previous working directory is restored as soon as this is dropped"]
#[derive(Debug)]
pub struct ChangeDir {
  previous: PathBuf,
}

impl ChangeDir {
  pub fn enter(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref();
    let previous = env::current_dir().context("Failed to determine current working directory")?;
    env::set_current_dir(path).with_context(|| format!("Failed to change working directory to {}", path.display()))?;
    tracing::debug!(from = %previous.display(), to = %path.display(), "changed working directory");
    Ok(Self { previous })
  }

  /// Working directory before [`ChangeDir::enter`]
  pub fn previous(&self) -> &Path {
    &self.previous
  }
}

impl Drop for ChangeDir {
  fn drop(&mut self) {
    if let Err(e) = env::set_current_dir(&self.previous) {
      tracing::error!(path = %self.previous.display(), error = %e, "failed to restore working directory");
    }
  }
}
