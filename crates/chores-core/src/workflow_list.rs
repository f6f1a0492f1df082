use crate::error::ChoresError;

const TEST_WORKFLOW_PREFIX: &str = "test";
const DISABLED_INACTIVITY: &str = "disabled_inactivity";

/// The `test*` line of `gh workflow list` output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkflowEntry {
  pub line: String,
  /// Last whitespace separated column
  pub id: String,
}

impl WorkflowEntry {
  pub fn is_disabled_by_inactivity(&self) -> bool {
    self.line.contains(DISABLED_INACTIVITY)
  }
}

/// First line starting with `test`, if any
pub fn find_test_workflow(listing: &str) -> Option<WorkflowEntry> {
  listing.lines().find(|line| line.starts_with(TEST_WORKFLOW_PREFIX)).and_then(|line| {
    let id = line.split_whitespace().last()?;
    Some(WorkflowEntry {
      line: line.to_string(),
      id: id.to_string(),
    })
  })
}

/// Like [`find_test_workflow`], a missing workflow is an error
pub fn require_test_workflow(listing: &str, repository: &str) -> Result<WorkflowEntry, ChoresError> {
  find_test_workflow(listing).ok_or_else(|| ChoresError::MissingTestWorkflow {
    repository: repository.to_string(),
  })
}
