use crate::command_executor::{CommandOutput, CommandRunner, CommandSpec, OutputMode, SystemCommandRunner, parse_lines};
use crate::tool_info::ToolInfo;
use pretty_assertions::assert_eq;
use test_log::test;

#[test]
fn test_command_line_uses_program_file_name() {
  let spec = CommandSpec::new("/usr/bin/git").args(["branch", "--format", "%(refname:short)"]);
  assert_eq!(spec.program_name(), "git");
  assert_eq!(spec.command_line(), "git branch --format %(refname:short)");
  assert_eq!(spec.output_mode(), OutputMode::Inherit);
}

#[test]
fn test_capture_output_switches_mode() {
  let spec = CommandSpec::new("gh").arg("workflow").capture_output();
  assert_eq!(spec.output_mode(), OutputMode::Capture);
  assert_eq!(spec.arguments().len(), 1);
}

#[test]
fn test_parse_lines_drops_blank_lines() {
  assert_eq!(parse_lines("main\n\n  feature  \n"), vec!["main".to_string(), "feature".to_string()]);
  assert!(parse_lines("").is_empty());
}

#[test]
fn test_output_lines() {
  let output = CommandOutput::with_stdout(0, "drop-legacy-python\nmaster\n");
  assert!(output.success());
  assert_eq!(output.lines(), vec!["drop-legacy-python", "master"]);
}

#[cfg(unix)]
#[test]
fn test_captured_output_and_exit_code() {
  let runner = SystemCommandRunner::new();
  let spec = CommandSpec::new("sh").args(["-c", "echo out; echo err >&2; exit 3"]).capture_output();

  let output = runner.run(&spec).unwrap();
  assert_eq!(output.exit_code, 3);
  assert_eq!(output.stdout, "out\n");
  assert_eq!(output.stderr, "err\n");
  assert!(!output.success());
}

#[cfg(unix)]
#[test]
fn test_inherited_output_is_not_collected() {
  let runner = SystemCommandRunner::new();
  let output = runner.run(&CommandSpec::new("sh").args(["-c", "exit 0"])).unwrap();
  assert_eq!(output, CommandOutput::from_exit_code(0));
}

#[cfg(unix)]
#[test]
fn test_runs_in_given_directory() {
  let dir = tempfile::tempdir().unwrap();
  std::fs::write(dir.path().join("marker.txt"), "x").unwrap();

  let runner = SystemCommandRunner::new();
  let output = runner.run(&CommandSpec::new("ls").current_dir(dir.path()).capture_output()).unwrap();
  assert_eq!(output.lines(), vec!["marker.txt"]);
}

#[test]
fn test_missing_program_is_an_error() {
  let runner = SystemCommandRunner::new();
  let result = runner.run(&CommandSpec::new("definitely-not-a-real-program-12345").capture_output());
  let err = result.unwrap_err();
  assert!(err.to_string().contains("Failed to execute `definitely-not-a-real-program-12345`"));
}

#[cfg(unix)]
#[test]
fn test_locate_tool_on_path() {
  let tool = ToolInfo::locate("sh").unwrap();
  assert_eq!(tool.name, "sh");
  assert!(tool.path.is_absolute());
  assert_eq!(tool.command().program_name(), "sh");
}

#[test]
fn test_locate_missing_tool() {
  let err = ToolInfo::locate("definitely-not-a-real-program-12345").unwrap_err();
  assert_eq!(err.name, "definitely-not-a-real-program-12345");
  assert!(err.to_string().contains("was not found on PATH"));
}

#[cfg(unix)]
#[test]
fn test_locate_in_explicit_search_path() {
  use std::os::unix::fs::PermissionsExt;

  let dir = tempfile::tempdir().unwrap();
  let script = dir.path().join("bumpversion");
  std::fs::write(&script, "#!/bin/sh\nexit 0\n").unwrap();
  std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();

  let tool = ToolInfo::locate_in("bumpversion", dir.path(), dir.path()).unwrap();
  assert_eq!(tool.path.file_name(), script.file_name());
  assert!(ToolInfo::locate_in("tox", dir.path(), dir.path()).is_err());
}
