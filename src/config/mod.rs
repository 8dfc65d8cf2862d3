//! Configuration module for the archive generator
//!
//! This module provides configuration management including:
//! - Config directory resolution
//! - Settings persistence (database locations, institution filter)

pub mod paths;
pub mod settings;

pub use paths::ArchivePaths;
pub use settings::Settings;
