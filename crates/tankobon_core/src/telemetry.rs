//! Tracing subscriber setup.

use tankobon_error::{ConfigError, TankobonResult};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the global tracing subscriber.
///
/// Installs a fmt layer filtered by `RUST_LOG`. Call once at process startup;
/// library code only emits `tracing` events and never installs subscribers.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init_tracing() -> TankobonResult<()> {
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_level(true);

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(fmt_layer)
        .try_init()
        .map_err(|e| ConfigError::new(e.to_string()))?;

    Ok(())
}
