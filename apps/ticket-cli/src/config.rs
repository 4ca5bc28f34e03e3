//! # Ticket Configuration
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Command line flags (highest priority, applied in main)             │
//! │                                                                         │
//! │  2. Environment Variables                                              │
//! │     TICKET_CATALOG=./lines.json                                        │
//! │     TICKET_OUTPUT_FORMAT=json                                          │
//! │     TICKET_CURRENCY_SYMBOL=€                                           │
//! │     TICKET_STRICT=true                                                 │
//! │                                                                         │
//! │  3. TOML Config File                                                   │
//! │     --config / TICKET_CONFIG, else ~/.config/ticket/ticket.toml       │
//! │                                                                         │
//! │  4. Default Values (lowest priority)                                   │
//! │     demo catalog, text output, "€", permissive                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [catalog]
//! path = "lines.json"
//!
//! [output]
//! format = "text"        # text | json
//! currency_symbol = "€"
//!
//! [validation]
//! strict = false
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{debug, info, warn};

use crate::error::{AppError, AppResult};

// =============================================================================
// Output Format
// =============================================================================

/// How the finished ticket is written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable receipt.
    #[default]
    Text,
    /// Pretty JSON of the ticket structure.
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(AppError::InvalidConfig {
                key: "output.format".to_string(),
                reason: format!("expected text or json, got '{}'", other),
            }),
        }
    }
}

// =============================================================================
// Sections
// =============================================================================

/// Where purchase lines come from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogSettings {
    /// JSON file of purchase lines. `None` uses the built-in demo catalog.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

/// How the ticket is written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputSettings {
    #[serde(default)]
    pub format: OutputFormat,

    /// Appended to amounts by the text sink.
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
}

fn default_currency_symbol() -> String {
    "€".to_string()
}

impl Default for OutputSettings {
    fn default() -> Self {
        OutputSettings {
            format: OutputFormat::default(),
            currency_symbol: default_currency_symbol(),
        }
    }
}

/// Input checking.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationSettings {
    /// Reject bad lines instead of pricing them as-is.
    #[serde(default)]
    pub strict: bool,
}

// =============================================================================
// Main Configuration
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketConfig {
    #[serde(default)]
    pub catalog: CatalogSettings,

    #[serde(default)]
    pub output: OutputSettings,

    #[serde(default)]
    pub validation: ValidationSettings,
}

impl TicketConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (explicit path, else the platform default if present)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> AppResult<Self> {
        let mut config = match config_path {
            Some(path) => Self::from_file(&path)?,
            None => match Self::default_config_path() {
                Some(path) if path.exists() => Self::from_file(&path)?,
                Some(path) => {
                    debug!(?path, "Config file not found, using defaults");
                    Self::default()
                }
                None => Self::default(),
            },
        };

        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;

        Ok(config)
    }

    /// Reads and parses one TOML file.
    pub fn from_file(path: &Path) -> AppResult<Self> {
        info!(?path, "Loading ticket config from file");
        let contents = std::fs::read_to_string(path).map_err(|source| AppError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&contents).map_err(|source| AppError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Applies `TICKET_*` overrides read through `lookup`.
    ///
    /// Unparseable values are logged and ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup("TICKET_CATALOG") {
            debug!(path = %path, "Overriding catalog path from environment");
            self.catalog.path = Some(PathBuf::from(path));
        }

        if let Some(format) = lookup("TICKET_OUTPUT_FORMAT") {
            match format.parse::<OutputFormat>() {
                Ok(parsed) => self.output.format = parsed,
                Err(e) => warn!(format = %format, error = %e, "Ignoring output format from environment"),
            }
        }

        if let Some(symbol) = lookup("TICKET_CURRENCY_SYMBOL") {
            self.output.currency_symbol = symbol;
        }

        if let Some(strict) = lookup("TICKET_STRICT") {
            match strict.to_lowercase().as_str() {
                "1" | "true" | "yes" => self.validation.strict = true,
                "0" | "false" | "no" => self.validation.strict = false,
                _ => warn!(value = %strict, "Ignoring TICKET_STRICT from environment"),
            }
        }
    }

    /// Validates the configuration.
    pub fn validate(&self) -> AppResult<()> {
        if let Some(path) = &self.catalog.path {
            if path.as_os_str().is_empty() {
                return Err(AppError::InvalidConfig {
                    key: "catalog.path".to_string(),
                    reason: "must not be empty".to_string(),
                });
            }
        }

        if self.output.currency_symbol.chars().count() > 8 {
            return Err(AppError::InvalidConfig {
                key: "output.currency_symbol".to_string(),
                reason: "must be at most 8 characters".to_string(),
            });
        }

        Ok(())
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "ticket", "ticket")
            .map(|dirs| dirs.config_dir().join("ticket.toml"))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
