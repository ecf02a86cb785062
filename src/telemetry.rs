use tracing_subscriber::EnvFilter;

/// Filter used when RUST_LOG is unset; stdout carries the report, logs stay quiet on stderr.
pub const DEFAULT_FILTER: &str = "warn";

pub fn init() {
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

  let _ = tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_target(false)
    .with_writer(std::io::stderr)
    .compact()
    .try_init();
}
