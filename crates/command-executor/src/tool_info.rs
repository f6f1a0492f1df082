use crate::command_executor::CommandSpec;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

/// Raised when an executable cannot be resolved on the search path
#[derive(Debug, thiserror::Error)]
#[error("`{name}` was not found on PATH, please install it first")]
pub struct ToolNotFound {
  pub name: String,
}

/// A resolved external executable
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolInfo {
  pub name: String,
  pub path: PathBuf,
}

impl ToolInfo {
  /// Looks `name` up on `PATH`
  pub fn locate(name: &str) -> Result<Self, ToolNotFound> {
    match which::which(name) {
      Ok(path) => {
        tracing::debug!(tool = name, path = %path.display(), "located tool");
        Ok(Self { name: name.to_string(), path })
      }
      Err(e) => {
        tracing::debug!(tool = name, error = %e, "tool lookup failed");
        Err(ToolNotFound { name: name.to_string() })
      }
    }
  }

  /// Looks `name` up in an explicit search path, relative entries resolved against `cwd`
  pub fn locate_in(name: &str, search_path: impl AsRef<OsStr>, cwd: &Path) -> Result<Self, ToolNotFound> {
    which::which_in(name, Some(search_path), cwd)
      .map(|path| Self { name: name.to_string(), path })
      .map_err(|_| ToolNotFound { name: name.to_string() })
  }

  /// Starts a command invoking this tool
  pub fn command(&self) -> CommandSpec {
    CommandSpec::new(&self.path)
  }
}
