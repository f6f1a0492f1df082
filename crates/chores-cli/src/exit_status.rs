use chores_core::error::ChoresError;
use std::process::ExitCode;

/// Maps the outcome of a chore to the process exit status.
///
/// An abort exits with the failed command's own code, so wrappers see what went wrong.
pub fn report(result: anyhow::Result<()>) -> ExitCode {
  let Err(err) = result else {
    return ExitCode::SUCCESS;
  };

  match err.downcast_ref::<ChoresError>().and_then(ChoresError::exit_code) {
    Some(code) => {
      tracing::info!(exit_code = code, "aborted on request");
      ExitCode::from(clamp_exit_code(code))
    }
    None => {
      eprintln!("Error: {err:#}");
      ExitCode::FAILURE
    }
  }
}

/// Exit statuses are a byte and zero would claim success
fn clamp_exit_code(code: i32) -> u8 {
  match u8::try_from(code) {
    Ok(0) | Err(_) => 1,
    Ok(code) => code,
  }
}
