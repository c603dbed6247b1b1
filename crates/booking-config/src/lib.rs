//! booking-config
//!
//! Persistent settings for the booking CLI and the intake service.
//! Owns the Config data structure plus disk persistence helpers.

pub mod error;
pub mod manager;
pub mod model;

pub use error::ConfigError;
pub use manager::{resolve_base_dir, ConfigManager, HOME_ENV};
pub use model::{CmsSettings, ClientSettings, Config, MailSettings, ServerSettings};
