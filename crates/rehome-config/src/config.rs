//! Configuration management for rehome

use crate::preset;
use rehome_foundation::{Layout, ModuleRecord, RehomeError, RehomeResult, StylePolicy};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Config files looked up in the project root, first found wins
pub const CONFIG_FILES: &[&str] = &["rehome.toml", ".rehome/config.toml"];

/// Prefix for environment variable overrides (`REHOME__SCAN__CONCURRENCY=4`)
pub const ENV_PREFIX: &str = "REHOME__";

/// Main application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Where components live and how the alias spells them
    #[serde(default)]
    pub layout: Layout,
    /// Which files to visit
    #[serde(default)]
    pub scan: ScanConfig,
    /// Rewrite behavior
    #[serde(default)]
    pub rewrite: RewriteConfig,
    /// Module name → canonical folder table
    #[serde(default)]
    pub registry: RegistryConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// File discovery configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Directories to walk, relative to the project root
    pub roots: Vec<PathBuf>,
    /// File extensions to process (without the dot)
    pub extensions: Vec<String>,
    /// Directory names never descended into
    pub exclude: Vec<String>,
    /// Maximum number of files processed at once
    pub concurrency: usize,
}

/// Rewrite configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RewriteConfig {
    pub style: StylePolicy,
}

/// Registry configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Include the built-in preset table
    pub use_preset: bool,
    /// Folder → module names
    pub folders: BTreeMap<String, Vec<String>>,
}

/// Log output format
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable format for development
    #[default]
    Pretty,
    /// Structured JSON format for log collectors
    Json,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
    /// Output format
    pub format: LogFormat,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            roots: vec![PathBuf::from("src")],
            extensions: ["ts", "tsx", "js", "jsx"]
                .iter()
                .map(|ext| ext.to_string())
                .collect(),
            exclude: ["node_modules", "dist", "build", ".git"]
                .iter()
                .map(|dir| dir.to_string())
                .collect(),
            concurrency: 8,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            format: LogFormat::Pretty,
        }
    }
}

impl RegistryConfig {
    /// Every record the registry should be built from, preset first
    pub fn records(&self) -> Vec<ModuleRecord> {
        let preset = if self.use_preset {
            preset::reference_table()
        } else {
            BTreeMap::new()
        };

        preset
            .iter()
            .chain(self.folders.iter())
            .flat_map(|(folder, names)| {
                names
                    .iter()
                    .map(move |name| ModuleRecord::new(name.clone(), folder.clone()))
            })
            .collect()
    }
}

impl ScanConfig {
    pub fn matches_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| self.extensions.iter().any(|allowed| allowed == ext))
            .unwrap_or(false)
    }

    pub fn is_excluded_dir(&self, name: &str) -> bool {
        self.exclude.iter().any(|excluded| excluded == name)
    }
}

impl AppConfig {
    /// Configuration whose registry is the built-in preset, written out
    /// folder by folder so it can be edited
    pub fn with_preset_table() -> Self {
        Self {
            registry: RegistryConfig {
                use_preset: false,
                folders: preset::reference_table(),
            },
            ..Self::default()
        }
    }

    /// Save configuration as TOML to a specified file path
    pub fn save(&self, path: &Path) -> RehomeResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;

        std::fs::write(path, content).map_err(|e| RehomeError::unwritable(path, e))?;

        Ok(())
    }

    /// Load configuration for the project rooted at `root`
    ///
    /// Configuration is loaded in the following priority order (highest to lowest):
    /// 1. Environment variables (REHOME__*)
    /// 2. `rehome.toml` or `.rehome/config.toml` in `root`
    /// 3. Default values
    pub fn load(root: &Path) -> RehomeResult<Self> {
        Self::load_with(root, None)
    }

    /// Like [`AppConfig::load`], but reads `explicit` instead of searching `root`
    pub fn load_with(root: &Path, explicit: Option<&Path>) -> RehomeResult<Self> {
        use figment::{
            providers::{Env, Format, Serialized, Toml},
            Figment,
        };

        let mut figment = Figment::from(Serialized::defaults(AppConfig::default()));

        match explicit {
            Some(path) => {
                if !path.exists() {
                    return Err(RehomeError::config(format!(
                        "Configuration file not found: {}",
                        path.display()
                    )));
                }
                tracing::info!(path = %path.display(), "Loading TOML configuration");
                figment = figment.merge(Toml::file(path));
            }
            None => {
                for candidate in CONFIG_FILES {
                    let path = root.join(candidate);
                    if path.exists() {
                        tracing::info!(path = %path.display(), "Loading TOML configuration");
                        figment = figment.merge(Toml::file(path));
                        break; // Use first found TOML file
                    }
                }
            }
        }

        let figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__"));

        let config: AppConfig = figment
            .extract()
            .map_err(|e| RehomeError::config(format!("Failed to load configuration: {}", e)))?;

        config.validate()?;

        tracing::debug!(
            roots = config.scan.roots.len(),
            modules = config.registry.records().len(),
            "Configuration loaded successfully"
        );

        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> RehomeResult<()> {
        if self.layout.alias_base().is_empty() {
            return Err(RehomeError::config("Alias prefix cannot be empty"));
        }

        let components = &self.layout.components_dir;
        if components.as_os_str().is_empty() || components.is_absolute() {
            return Err(RehomeError::config(format!(
                "Components directory must be a non-empty project-relative path, got '{}'",
                components.display()
            )));
        }

        if self.scan.roots.is_empty() {
            return Err(RehomeError::config("At least one scan root must be configured"));
        }

        if self.scan.extensions.is_empty() {
            return Err(RehomeError::config(
                "At least one file extension must be configured",
            ));
        }

        if self.scan.concurrency == 0 {
            return Err(RehomeError::config("Scan concurrency cannot be 0"));
        }

        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.as_str()) {
            return Err(RehomeError::config(format!(
                "Invalid log level '{}', must be one of: {}",
                self.logging.level,
                valid_levels.join(", ")
            )));
        }

        Ok(())
    }
}
