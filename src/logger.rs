//! Logging bootstrap.

use tracing::Level;

/// Installs a default subscriber at `INFO` level.
pub fn start() {
    start_with_level(Level::INFO);
}

/// Installs a subscriber with the given level. See the `tracing_subscriber`
/// documentation for finer control.
pub fn start_with_level(level: Level) {
    tracing_subscriber::fmt().with_max_level(level).init();
    tracing::info!("logger started level: {}", level);
}
