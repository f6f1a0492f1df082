use assert_cmd::Command;

#[test]
fn test_drop_legacy_python_rejects_non_git_path() {
  let dir = tempfile::tempdir().unwrap();

  let output = Command::cargo_bin("drop-legacy-python")
    .unwrap()
    .arg(dir.path())
    .args(["--editor", "true"])
    .env("PATH", "")
    .output()
    .unwrap();

  assert!(!output.status.success());
  let stderr = String::from_utf8_lossy(&output.stderr);
  assert!(stderr.contains("does not point to a git clone"), "unexpected stderr: {stderr}");
}

#[test]
fn test_drop_legacy_python_requires_editor() {
  let dir = tempfile::tempdir().unwrap();

  let output = Command::cargo_bin("drop-legacy-python").unwrap().arg(dir.path()).env_remove("EDITOR").output().unwrap();

  assert!(!output.status.success());
  assert!(String::from_utf8_lossy(&output.stderr).contains("--editor"));
}

#[test]
fn test_re_enable_gha_missing_repository_list() {
  let dir = tempfile::tempdir().unwrap();

  let output = Command::cargo_bin("re-enable-gha")
    .unwrap()
    .current_dir(dir.path())
    .output()
    .unwrap();

  assert_eq!(output.status.code(), Some(1));
  assert!(String::from_utf8_lossy(&output.stderr).contains("Failed to read repository list"));
}

#[cfg(unix)]
#[test]
fn test_re_enable_gha_missing_gh_tool() {
  let dir = tempfile::tempdir().unwrap();
  std::fs::write(dir.path().join("repositories.txt"), "zope.foo\n").unwrap();

  let output = Command::cargo_bin("re-enable-gha")
    .unwrap()
    .current_dir(dir.path())
    .env("PATH", dir.path())
    .output()
    .unwrap();

  assert_eq!(output.status.code(), Some(1));
  assert!(String::from_utf8_lossy(&output.stderr).contains("`gh` was not found on PATH"));
}
