//! Core module - application infrastructure
//!
//! Everything the game layer does not care about but the binary needs:
//! settings, where they are read from, logging, and their errors.
//!
//! ## Resources
//!
//! - [`GameSettings`] - User preferences (computer opponent, engine, logging)
//! - [`EngineSettings`] - UCI engine process and search time
//!
//! # Usage Example
//!
//! ```rust,ignore
//! let settings = load_settings(args.config.as_deref());
//! init_logging(&settings.log_filter)?;
//! ```

pub mod error;
pub mod logging;
pub mod resources;
pub mod settings_persistence;

pub use error::{CoreError, CoreResult};
pub use logging::{init_logging, with_startup_logging};
pub use resources::{EngineSettings, GameSettings};
pub use settings_persistence::{default_settings_path, load_settings, read_settings};
