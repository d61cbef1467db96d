//! Configuration management for studybuddy.
//!
//! This module handles loading and saving configuration from `~/.studybuddy/`.

mod paths;
mod settings;

pub use paths::Paths;
pub use settings::{Config, FocusConfig, GeneralConfig};
