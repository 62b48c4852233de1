//! Configuration management for rehome
//!
//! - [`config`] - `AppConfig` loading (defaults, `rehome.toml`, `REHOME__*` env vars)
//! - [`preset`] - the built-in module registry table
//! - [`logging`] - tracing subscriber setup

pub mod config;
pub mod logging;
pub mod preset;

pub use config::{
    AppConfig, LogFormat, LoggingConfig, RegistryConfig, RewriteConfig, ScanConfig, CONFIG_FILES,
    ENV_PREFIX,
};
