//! ## Logging Configuration
//!
//! The library only emits `tracing` events; the binary decides whether they are
//! shown. Logging is enabled when `--verbose` is passed or the
//! `DEBUG_FEATSIFT` environment variable is set to anything other than empty,
//! `"0"` or `"false"`. Events go to stderr so stdout stays readable.
//!
//! ```sh
//! export DEBUG_FEATSIFT=true
//! ```

use tracing::Level;

/// Environment variable that turns logging on
pub const DEBUG_ENV_VAR: &str = "DEBUG_FEATSIFT";

/// Whether an env var value asks for logging.
pub fn env_enables_logging(value: Option<&str>) -> bool {
    value.is_some_and(|v| !(v.is_empty() || v == "0" || v == "false"))
}

/// Install the stderr subscriber when requested. Safe to call more than once.
pub fn init_logging(verbose: bool) {
    let from_env = env_enables_logging(std::env::var(DEBUG_ENV_VAR).ok().as_deref());
    if !(verbose || from_env) {
        return;
    }

    let level = if from_env { Level::DEBUG } else { Level::INFO };
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .try_init();
}
