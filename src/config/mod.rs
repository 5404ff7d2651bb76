//! Configuration module for poolwizard
//!
//! This module provides configuration management including:
//! - Platform path resolution
//! - User settings persistence
//! - Chain connection inputs

pub mod connection;
pub mod paths;
pub mod settings;

pub use connection::{parse_address, ConnectionOptions};
pub use paths::WizardPaths;
pub use settings::Settings;
