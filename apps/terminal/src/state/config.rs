//! # Configuration State
//!
//! Terminal configuration loaded at startup.
//!
//! ## Configuration Sources (Priority Order)
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. Command-line flags (--api-url, --page-size)                        │
//! │  2. Environment variables (CLERK_API_URL, CLERK_STORE_NAME)            │
//! │  3. TOML config file                                                   │
//! │     ~/.config/clerk-pos/terminal.toml (Linux)                          │
//! │     ~/Library/Application Support/com.clerk.pos/terminal.toml (macOS)  │
//! │  4. Defaults (this file)                                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # terminal.toml
//! [api]
//! base_url = "http://localhost:5000/api"
//!
//! [store]
//! name = "Clerk POS Store"
//! currency = "Ks"
//!
//! [ui]
//! page_size = 10
//! ```
//!
//! ## Thread Safety
//! Configuration is read-only after initialization, so no mutex needed.

use std::path::PathBuf;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use clerk_core::{Money, DEFAULT_PAGE_SIZE};

use crate::error::AppError;

// =============================================================================
// File Schema
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
struct ConfigFile {
    #[serde(default)]
    api: ApiSection,
    #[serde(default)]
    store: StoreSection,
    #[serde(default)]
    ui: UiSection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ApiSection {
    #[serde(default = "default_base_url")]
    base_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoreSection {
    #[serde(default = "default_store_name")]
    name: String,
    #[serde(default = "default_currency")]
    currency: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct UiSection {
    #[serde(default = "default_page_size")]
    page_size: usize,
}

fn default_base_url() -> String {
    "http://localhost:5000/api".to_string()
}

fn default_store_name() -> String {
    "Clerk POS Store".to_string()
}

fn default_currency() -> String {
    "Ks".to_string()
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

impl Default for ApiSection {
    fn default() -> Self {
        ApiSection {
            base_url: default_base_url(),
        }
    }
}

impl Default for StoreSection {
    fn default() -> Self {
        StoreSection {
            name: default_store_name(),
            currency: default_currency(),
        }
    }
}

impl Default for UiSection {
    fn default() -> Self {
        UiSection {
            page_size: default_page_size(),
        }
    }
}

// =============================================================================
// Config State
// =============================================================================

/// Resolved terminal configuration.
#[derive(Debug, Clone)]
pub struct ConfigState {
    /// Base URL of the backend REST service (ends at `/api`).
    pub api_url: String,

    /// Store name shown in the prompt banner.
    pub store_name: String,

    /// Currency label appended after amounts (e.g. `Ks`).
    pub currency: String,

    /// Page size for the list screens.
    pub page_size: usize,
}

impl Default for ConfigState {
    fn default() -> Self {
        ConfigState {
            api_url: default_base_url(),
            store_name: default_store_name(),
            currency: default_currency(),
            page_size: default_page_size(),
        }
    }
}

impl ConfigState {
    /// Loads configuration: file (if present), then env vars on top.
    ///
    /// A missing file is fine (defaults apply); an unreadable file is an
    /// error so a typo doesn't silently fall back to localhost.
    pub fn load(explicit_path: Option<PathBuf>) -> Result<Self, AppError> {
        let path = match explicit_path {
            Some(path) => Some(path),
            None => Self::default_path(),
        };

        let file = match path {
            Some(path) if path.exists() => {
                let raw = std::fs::read_to_string(&path)
                    .map_err(|e| AppError::io(format!("read {}: {}", path.display(), e)))?;
                let parsed: ConfigFile = toml::from_str(&raw)
                    .map_err(|e| AppError::io(format!("parse {}: {}", path.display(), e)))?;
                debug!(?path, "Loaded terminal config");
                parsed
            }
            _ => ConfigFile::default(),
        };

        let mut config = ConfigState {
            api_url: file.api.base_url,
            store_name: file.store.name,
            currency: file.store.currency,
            page_size: file.ui.page_size.max(1),
        };

        if let Ok(url) = std::env::var("CLERK_API_URL") {
            config.api_url = url;
        }
        if let Ok(name) = std::env::var("CLERK_STORE_NAME") {
            config.store_name = name;
        }

        Ok(config)
    }

    /// Platform default path of the config file.
    fn default_path() -> Option<PathBuf> {
        match ProjectDirs::from("com", "clerk", "pos") {
            Some(dirs) => Some(dirs.config_dir().join("terminal.toml")),
            None => {
                warn!("Could not determine config directory, using defaults");
                None
            }
        }
    }

    /// Formats an amount with the configured currency label.
    ///
    /// ## Example
    /// ```rust,ignore
    /// assert_eq!(config.format_money(Money::from_amount(12500)), "12,500 Ks");
    /// ```
    pub fn format_money(&self, amount: Money) -> String {
        format!("{} {}", amount, self.currency)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ConfigState::default();
        assert_eq!(config.api_url, "http://localhost:5000/api");
        assert_eq!(config.page_size, 10);
    }

    #[test]
    fn test_parse_partial_file() {
        // Only some sections present; the rest defaults.
        let file: ConfigFile = toml::from_str(
            r#"
            [store]
            name = "Downtown Branch"
            "#,
        )
        .unwrap();

        assert_eq!(file.store.name, "Downtown Branch");
        assert_eq!(file.store.currency, "Ks");
        assert_eq!(file.api.base_url, "http://localhost:5000/api");
        assert_eq!(file.ui.page_size, 10);
    }

    #[test]
    fn test_format_money() {
        let config = ConfigState::default();
        assert_eq!(
            config.format_money(Money::from_amount(12500)),
            "12,500 Ks"
        );
    }
}
