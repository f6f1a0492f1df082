use anyhow::{Result, bail};
use command_executor::command_executor::{CommandRunner, CommandSpec, SystemCommandRunner};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

// Constants for test Git user configuration
const TEST_USER_NAME: &str = "Test User";
const TEST_USER_EMAIL: &str = "test@example.com";

/// Git test repository wrapper with helper methods
pub struct TestRepo {
  dir: TempDir,
  runner: SystemCommandRunner,
}

impl Default for TestRepo {
  fn default() -> Self {
    Self::new()
  }
}

impl TestRepo {
  /// Creates a new test repository
  pub fn new() -> Self {
    let dir = tempfile::tempdir().unwrap();
    let repo = Self {
      dir,
      runner: SystemCommandRunner::new(),
    };

    repo.git(&["init", "--initial-branch", "master"]).unwrap_or_else(|e| panic!("Git init failed: {}", e));
    repo.git(&["config", "user.name", TEST_USER_NAME]).unwrap();
    repo.git(&["config", "user.email", TEST_USER_EMAIL]).unwrap();
    repo
  }

  /// Get the repository path
  pub fn path(&self) -> &Path {
    self.dir.path()
  }

  /// Runs git inside the repository and returns trimmed stdout
  pub fn git(&self, args: &[&str]) -> Result<String> {
    let spec = CommandSpec::new("git").args(args).current_dir(self.path()).capture_output();
    let output = self.runner.run(&spec)?;
    if !output.success() {
      bail!("git {} failed: {}", args.join(" "), output.stderr.trim());
    }
    Ok(output.stdout.trim().to_string())
  }

  /// Writes a file relative to the repository root, creating parent directories
  pub fn write_file(&self, filename: &str, content: &str) {
    let file_path = self.path().join(filename);
    if let Some(parent) = file_path.parent() {
      fs::create_dir_all(parent).unwrap();
    }
    fs::write(&file_path, content).unwrap();
  }

  /// Creates a commit with a file
  pub fn create_commit(&self, message: &str, filename: &str, content: &str) -> String {
    self.write_file(filename, content);
    self.git(&["add", filename]).unwrap_or_else(|e| panic!("Git add failed: {}", e));
    self.git(&["commit", "-m", message]).unwrap_or_else(|e| panic!("Git commit failed: {}", e));
    self.head()
  }

  /// Get the current HEAD commit hash
  pub fn head(&self) -> String {
    self.git(&["rev-parse", "HEAD"]).unwrap()
  }

  /// Creates a branch pointing to the current HEAD
  pub fn create_branch(&self, branch_name: &str) -> Result<()> {
    self.git(&["branch", branch_name]).map(|_| ())
  }

  /// Checkout a branch or commit
  pub fn checkout(&self, ref_name: &str) -> Result<()> {
    self.git(&["checkout", ref_name]).map(|_| ())
  }

  /// Name of the checked out branch
  pub fn current_branch(&self) -> String {
    self.git(&["rev-parse", "--abbrev-ref", "HEAD"]).unwrap()
  }

  /// Check if branch exists
  pub fn branch_exists(&self, branch_name: &str) -> bool {
    let ref_path = format!("refs/heads/{branch_name}");
    self.git(&["show-ref", "--verify", "--quiet", &ref_path]).is_ok()
  }

  /// Get the last N commit messages from HEAD
  pub fn get_commit_messages(&self, count: usize) -> Vec<String> {
    let count_arg = format!("-{count}");
    self
      .git(&["log", &count_arg, "--pretty=format:%s"])
      .map(|output| output.lines().map(str::to_string).collect())
      .unwrap_or_default()
  }
}
