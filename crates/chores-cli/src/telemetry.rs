use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Sets up `tracing` output on stderr, filtered by `RUST_LOG`.
/// Stdout is left to the step messages the human follows.
pub fn init_logging() {
  // Only initialize if no global subscriber is set yet
  if tracing::dispatcher::has_been_set() {
    return;
  }

  let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
    #[cfg(debug_assertions)]
    return tracing_subscriber::EnvFilter::new("info");
    #[cfg(not(debug_assertions))]
    return tracing_subscriber::EnvFilter::new("warn");
  });

  tracing_subscriber::registry()
    .with(filter)
    .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr).with_target(false))
    .try_init()
    .ok();
}
