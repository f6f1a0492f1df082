//! Walks a package clone through dropping Python 2.7, 3.5 and 3.6.
//!
//! Edits that cannot be automated are done by the human in `$EDITOR`, one file at a time, with a
//! message saying what to change. Everything else is delegated to the usual tooling.

use crate::branch::{BranchSelection, select_branch};
use crate::guarded::GuardedExecutor;
use crate::repository_validation::validate_git_clone;
use crate::toolbox::{Toolbox, Tools};
use crate::working_dir::ChangeDir;
use anyhow::Result;
use std::path::{Path, PathBuf};
use tracing::{info, instrument};

pub const DEFAULT_BRANCH_NAME: &str = "drop-legacy-python";

const CHANGELOG_ENTRY: &str = "Drop support for Python 2.7, 3.5, 3.6.";
const COMMIT_MESSAGE: &str = "Drop support for Python 2.7 up to 3.6.";
const DROPPED_VERSIONS: &str = "--drop=2.7,3.5,3.6";
const PYUPGRADE_ARGS: [&str; 2] = ["--py3-plus", "--py37-plus"];
const LEGACY_PATTERN: &str = "2.7|3.5|3.6|sys.version|PY2|PY3|Py2|Py3|Python 2|Python 3|__unicode__|ImportError";
const GREP_EXCLUDES: [&str; 8] = [
  "--exclude-dir",
  "__pycache__",
  "--exclude-dir",
  "*.egg-info",
  "--exclude",
  "*.pyc",
  "--exclude",
  "*.so",
];
/// grep and pyupgrade exit with 1 for "nothing found" / "file rewritten"
const FOUND_OR_NOT: &[i32] = &[0, 1];

/// Everything `run` spawns besides the editor
pub const REQUIRED_TOOLS: [&str; 9] = [
  "git",
  "bumpversion",
  "addchangelogentry",
  "check-python-versions",
  "find",
  "pyupgrade",
  "grep",
  "egrep",
  "tox",
];

const CHANGELOG_FILE: &str = "CHANGES.rst";
const WORKFLOW_FILE: &str = ".github/workflows/tests.yml";
const TOX_FILE: &str = "tox.ini";
const SETUP_FILE: &str = "setup.py";

/// A change the human has to make by hand
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ManualEdit {
  pub message: &'static str,
  pub file: &'static str,
}

const FIX_CHANGELOG: ManualEdit = ManualEdit {
  message: "Fix change log.",
  file: CHANGELOG_FILE,
};

/// Edits after the version classifiers were dropped, in the order they are asked for
pub const CONFIGURATION_EDITS: [ManualEdit; 6] = [
  ManualEdit {
    message: "Remove legacy Python (2.7-3.6 + PyPy2, coverage-python-version) settings from tests.yml",
    file: WORKFLOW_FILE,
  },
  ManualEdit {
    message: "Update `pypy3` to `pypy-3.9` and use `ubuntu-latest` in tests.yml",
    file: WORKFLOW_FILE,
  },
  ManualEdit {
    message: "Update to: `actions/checkout@v3`, `actions/setup-python@v4`, `actions/cache@v3`.",
    file: WORKFLOW_FILE,
  },
  ManualEdit {
    message: "Remove legacy Python (2.7-3.6 + PyPy2, coverage-python-version) settings from tox.ini",
    file: TOX_FILE,
  },
  ManualEdit {
    message: "Remove `six` from the list of dependencies and other Py 2 things.",
    file: SETUP_FILE,
  },
  ManualEdit {
    message: "Add `python_requires='>=3.7',`",
    file: SETUP_FILE,
  },
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropLegacyPythonConfig {
  /// Git clone of the package
  pub path: PathBuf,
  pub branch_name: String,
  /// Program the manual edits are opened with
  pub editor: String,
}

impl DropLegacyPythonConfig {
  pub fn new(path: impl Into<PathBuf>, editor: impl Into<String>) -> Self {
    Self {
      path: path.into(),
      branch_name: DEFAULT_BRANCH_NAME.to_string(),
      editor: editor.into(),
    }
  }

  #[must_use]
  pub fn with_branch_name(mut self, branch_name: impl Into<String>) -> Self {
    self.branch_name = branch_name.into();
    self
  }
}

/// Runs the whole chore inside the clone and restores the working directory afterwards.
/// Returns whether an existing branch (and so an existing PR) was updated.
#[instrument(skip_all, fields(path = %config.path.display(), branch = %config.branch_name))]
pub fn run(config: &DropLegacyPythonConfig, executor: &GuardedExecutor, toolbox: &Toolbox) -> Result<BranchSelection> {
  let path = validate_git_clone(&config.path)?;
  let tools = toolbox.resolve_all(REQUIRED_TOOLS.into_iter().chain([config.editor.as_str()]))?;
  let _cwd = ChangeDir::enter(&path)?;

  let selection = select_branch(executor, &tools, &config.branch_name)?;

  executor.call(&tools.command("bumpversion")?.args(["--breaking", "--no-input"]))?;
  executor.call(&tools.command("addchangelogentry")?.args([CHANGELOG_ENTRY, "--no-input"]))?;
  manual_edit(executor, &tools, &config.editor, FIX_CHANGELOG)?;
  executor.call(&tools.command("check-python-versions")?.args([DROPPED_VERSIONS, "--only=setup.py"]))?;

  for edit in CONFIGURATION_EDITS {
    manual_edit(executor, &tools, &config.editor, edit)?;
  }

  let src = path.join("src");
  upgrade_syntax(executor, &tools, &src)?;
  review_leftovers(executor, &tools, &src)?;

  executor.call(&tools.command("tox")?.args(["-p", "auto"]))?;

  executor.say("Adding, committing and pushing all changes ...")?;
  executor.call(&tools.command("git")?.args(["add", "."]))?;
  executor.call(&tools.command("git")?.args(["commit", "-m", COMMIT_MESSAGE]))?;
  executor.call(&tools.command("git")?.args(["push", "--set-upstream", "origin", config.branch_name.as_str()]))?;

  if selection.is_updating() {
    executor.say("Updated the previously created PR.")?;
  } else {
    executor.say("If everything went fine up to here:")?;
    executor.say("Create a PR, using the URL shown above.")?;
  }
  info!(?selection, "legacy Python dropped");
  Ok(selection)
}

fn manual_edit(executor: &GuardedExecutor, tools: &Tools, editor: &str, edit: ManualEdit) -> Result<()> {
  executor.say(edit.message)?;
  executor.call(&tools.command(editor)?.arg(edit.file))?;
  Ok(())
}

fn upgrade_syntax(executor: &GuardedExecutor, tools: &Tools, src: &Path) -> Result<()> {
  let pyupgrade = tools.command("pyupgrade")?;
  let find = tools
    .command("find")?
    .arg(src)
    .args(["-name", "*.py", "-exec"])
    .arg(pyupgrade.program())
    .args(PYUPGRADE_ARGS)
    .args(["{}", ";"]);
  executor.call(&find)?;
  executor.call_allowing(&pyupgrade.args(PYUPGRADE_ARGS).arg(SETUP_FILE), FOUND_OR_NOT)?;
  Ok(())
}

/// Lists what the tools could not fix and lets the human deal with it
fn review_leftovers(executor: &GuardedExecutor, tools: &Tools, src: &Path) -> Result<()> {
  executor.say("Replace all remaining `six` mentions or continue if none are listed.")?;
  executor.call_allowing(&tools.command("grep")?.args(["-rn", "six"]).arg(src).args(GREP_EXCLUDES), FOUND_OR_NOT)?;
  executor.confirm().wait_for_accept()?;

  executor.say("Replace any remaining code that may support legacy Python 2:")?;
  executor.call_allowing(
    &tools.command("egrep")?.args(["-rn", LEGACY_PATTERN]).arg(src).args(GREP_EXCLUDES),
    FOUND_OR_NOT,
  )?;
  executor.confirm().wait_for_accept()?;
  Ok(())
}
