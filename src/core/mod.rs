//! Application infrastructure
//!
//! - `settings` - [`Settings`] loaded from and saved to `settings.json`
//! - `logging` - tracing subscriber setup
//! - `error` - [`CoreError`]

pub mod error;
pub mod logging;
pub mod settings;

pub use error::{CoreError, CoreResult};
pub use logging::init_logging;
pub use settings::{
    load_settings, read_settings, save_settings, settings_or_default, settings_path, Settings,
};
