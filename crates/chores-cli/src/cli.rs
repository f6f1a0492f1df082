use chores_core::drop_legacy_python::{DEFAULT_BRANCH_NAME, DropLegacyPythonConfig};
use chores_core::re_enable_gha::{DEFAULT_ORGANISATION, DEFAULT_REPOSITORIES_FILE, ReEnableConfig};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "Drop support of Python 2.7 up to 3.6 from a package.", long_about = None)]
pub struct DropLegacyPythonArgs {
  /// Path to the repository to be configured
  pub path: PathBuf,

  /// Git branch name to be used for the changes
  #[arg(long = "branch", value_name = "NAME", default_value = DEFAULT_BRANCH_NAME)]
  pub branch_name: String,

  /// Editor opened for every manual change
  #[arg(long, env = "EDITOR")]
  pub editor: String,
}

impl DropLegacyPythonArgs {
  pub fn into_config(self) -> DropLegacyPythonConfig {
    DropLegacyPythonConfig::new(self.path, self.editor).with_branch_name(self.branch_name)
  }
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Re-enable GitHub Actions for all repos in a repositories.txt.", long_about = None)]
pub struct ReEnableGhaArgs {
  /// Run workflow even it is already enabled
  #[arg(long)]
  pub force_run: bool,

  /// GitHub organisation owning the repositories
  #[arg(long = "org", value_name = "ORG", default_value = DEFAULT_ORGANISATION)]
  pub organisation: String,

  /// File listing one repository name per line
  #[arg(long, value_name = "FILE", default_value = DEFAULT_REPOSITORIES_FILE)]
  pub repositories: PathBuf,
}

impl ReEnableGhaArgs {
  pub fn into_config(self) -> ReEnableConfig {
    ReEnableConfig {
      organisation: self.organisation,
      repositories_file: self.repositories,
      force_run: self.force_run,
    }
  }
}
