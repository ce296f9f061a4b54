// src/core/mod.rs
//! Process-wide configuration shared by the CLI and the API server

pub mod config_manager;

pub use config_manager::{ConfigManager, MatcherConfig};
