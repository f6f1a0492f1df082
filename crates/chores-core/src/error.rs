use command_executor::tool_info::ToolNotFound;
use std::path::PathBuf;

/// Failures the binaries need to tell apart from plain errors
#[derive(Debug, thiserror::Error)]
pub enum ChoresError {
  /// The human declined to continue after `command` failed
  #[error("aborted after `{command}` exited with code {exit_code}")]
  Aborted { command: String, exit_code: i32 },

  #[error("`{}` does not point to a git clone of a repository", path.display())]
  NotAGitClone { path: PathBuf },

  #[error("no workflow starting with `test` is listed for repository `{repository}`")]
  MissingTestWorkflow { repository: String },

  #[error(transparent)]
  ToolNotFound(#[from] ToolNotFound),
}

impl ChoresError {
  /// Process exit code to terminate with, if this error carries one
  pub fn exit_code(&self) -> Option<i32> {
    match self {
      Self::Aborted { exit_code, .. } => Some(*exit_code),
      _ => None,
    }
  }
}
