#![deny(missing_docs)]
//! Environment configuration for the ferry bot.
//!
//! [`Settings::from_env`] reads the process environment once at startup,
//! after loading a `.env` file when one is present, and never fails:
//! missing or malformed values degrade to defaults, and the components
//! consuming them fail at use rather than at load. [`init_logging`]
//! installs the global tracing subscriber at the configured level.

mod logging;
mod settings;

pub use logging::init_logging;
pub use settings::Settings;
