//! hexpad basic library
//!
//! Provides functions shared by the hexpad front ends:
//! - layered settings loading
//! - logging setup
//! - serde helpers for settings fields

pub mod config;
pub mod logging;
pub mod serde_helpers;

pub use config::{LogSettings, Settings, DEFAULT_CONFIG_FILE, ENV_PREFIX};
pub use logging::{LogConfig, LogGuard, LogTarget};
