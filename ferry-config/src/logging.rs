//! Tracing subscriber installation.

use tracing::Level;

/// Install the global log subscriber at the given maximum level.
///
/// Safe to call more than once; only the first call installs. When the
/// hosting framework has already set a subscriber this is a no-op.
pub fn init_logging(level: Level) {
    let _ = tracing_subscriber::fmt().with_max_level(level).try_init();
}
