//! Configuration module for finsight
//!
//! This module provides configuration management including:
//! - Data directory resolution
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::FinsightPaths;
pub use settings::Settings;
