use crate::error::ChoresError;
use command_executor::command_executor::CommandSpec;
use command_executor::tool_info::{ToolInfo, ToolNotFound};
use std::ffi::OsString;
use std::path::Path;

/// How tool names are turned into programs to spawn
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Toolbox {
  /// Resolve every tool on `PATH`
  #[default]
  SearchPath,
  /// Resolve every tool in an explicit search path, `PATH` syntax
  SearchIn(OsString),
  /// Spawn tools by their bare name, used with fake runners
  AsGiven,
}

impl Toolbox {
  pub fn command(&self, name: &str) -> Result<CommandSpec, ChoresError> {
    match self {
      Self::SearchPath => Ok(ToolInfo::locate(name)?.command()),
      Self::SearchIn(search_path) => Ok(ToolInfo::locate_in(name, search_path, Path::new("."))?.command()),
      Self::AsGiven => Ok(CommandSpec::new(name)),
    }
  }

  /// Resolves all `names` at once, so a missing tool is reported before a chore touches anything
  pub fn resolve_all<I, S>(&self, names: I) -> Result<Tools, ChoresError>
  where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
  {
    let mut resolved = Vec::new();
    for name in names {
      let name = name.as_ref();
      if resolved.iter().any(|(known, _): &(String, CommandSpec)| known == name) {
        continue;
      }
      resolved.push((name.to_string(), self.command(name)?));
    }
    tracing::debug!(count = resolved.len(), "resolved tools");
    Ok(Tools { resolved })
  }
}

/// Tools resolved by [`Toolbox::resolve_all`]
#[derive(Debug, Clone, Default)]
pub struct Tools {
  resolved: Vec<(String, CommandSpec)>,
}

impl Tools {
  /// Fresh command for `name`; asking for a tool that was not resolved is an error
  pub fn command(&self, name: &str) -> Result<CommandSpec, ChoresError> {
    self
      .resolved
      .iter()
      .find(|(known, _)| known == name)
      .map(|(_, spec)| spec.clone())
      .ok_or_else(|| ToolNotFound { name: name.to_string() }.into())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use pretty_assertions::assert_eq;

  #[test]
  fn test_as_given_keeps_bare_name() {
    let spec = Toolbox::AsGiven.command("bumpversion").unwrap();
    assert_eq!(spec.program(), "bumpversion");
  }

  #[test]
  fn test_search_path_reports_missing_tool() {
    let err = Toolbox::SearchPath.command("definitely-not-a-real-program-12345").unwrap_err();
    assert!(matches!(err, ChoresError::ToolNotFound(ref missing) if missing.name == "definitely-not-a-real-program-12345"));
  }

  #[test]
  fn test_resolve_all_stops_at_first_missing_tool() {
    let dir = tempfile::tempdir().unwrap();
    let toolbox = Toolbox::SearchIn(dir.path().as_os_str().to_os_string());
    let err = toolbox.resolve_all(["tox", "git"]).unwrap_err();
    assert!(matches!(err, ChoresError::ToolNotFound(ref missing) if missing.name == "tox"));
  }

  #[test]
  fn test_resolved_tools_hand_out_commands() {
    let tools = Toolbox::AsGiven.resolve_all(["git", "gh", "git"]).unwrap();
    assert_eq!(tools.command("gh").unwrap().command_line(), "gh");
    assert!(matches!(tools.command("tox"), Err(ChoresError::ToolNotFound(_))));
  }
}
