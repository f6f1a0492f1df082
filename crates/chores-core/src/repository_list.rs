//! The `repositories.txt` format: one repository name per line, `#` starts a comment line

use anyhow::{Context, Result};
use std::path::Path;

/// Repository names in file order, blank and `#` lines skipped
pub fn parse_repository_list(content: &str) -> Vec<String> {
  content
    .lines()
    .filter(|line| !line.trim().is_empty() && !line.starts_with('#'))
    .map(|line| line.trim_end().to_string())
    .collect()
}

pub fn read_repository_list(path: &Path) -> Result<Vec<String>> {
  let content = std::fs::read_to_string(path).with_context(|| format!("Failed to read repository list {}", path.display()))?;
  let repositories = parse_repository_list(&content);
  tracing::debug!(path = %path.display(), count = repositories.len(), "read repository list");
  Ok(repositories)
}

#[cfg(test)]
mod tests {
  use super::*;
  use pretty_assertions::assert_eq;

  #[test]
  fn test_skips_comments_and_blank_lines() {
    let repositories = parse_repository_list("reponame\n# comment\n\nother-repo\n");
    assert_eq!(repositories, vec!["reponame", "other-repo"]);
  }

  #[test]
  fn test_preserves_order() {
    let repositories = parse_repository_list("zope.b\nzope.a\n#zope.c\ngocept.x");
    assert_eq!(repositories, vec!["zope.b", "zope.a", "gocept.x"]);
  }

  #[test]
  fn test_whitespace_only_lines_are_blank() {
    let repositories = parse_repository_list("  \n\t\nrepo\r\n");
    assert_eq!(repositories, vec!["repo"]);
  }

  #[test]
  fn test_empty_file() {
    assert!(parse_repository_list("").is_empty());
    assert!(parse_repository_list("# only a comment\n").is_empty());
  }

  #[test]
  fn test_read_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("repositories.txt");
    std::fs::write(&path, "one\n# two\nthree\n").unwrap();
    assert_eq!(read_repository_list(&path).unwrap(), vec!["one", "three"]);
  }

  #[test]
  fn test_read_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = read_repository_list(&dir.path().join("repositories.txt")).unwrap_err();
    assert!(err.to_string().contains("Failed to read repository list"));
  }
}
