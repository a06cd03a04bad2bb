//! Studio configuration module.
//!
//! Handles loading, validating, and merging `officina.toml`. Stock defaults
//! are the base layer; a user file overrides only the keys it names.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [paths]
//! gallery_document = "config/gallery-items.json"
//! testimonials_document = "config/testimonials.json"
//! image_prefix = "images/gallery/"
//!
//! [admin.limits]
//! gemme = 100
//! anelli = 15
//! collane = 15
//! orecchini = 15
//! altro = 15
//!
//! [site]
//! initial_visible = 5
//! default_limit = 25
//!
//! [site.limits]
//! gemme = 100
//! anelli = 25
//! collane = 25
//! orecchini = 25
//! altro = 25
//!
//! [notices]
//! duration_ms = 3000
//! ```
//!
//! ## Two Capacity Tables
//!
//! `[admin.limits]` gates what the admin tool accepts; `[site.limits]` gates
//! what the public page displays. They are independent and the stock values
//! differ (`anelli` is 15 in the admin tool, 25 on the site). Nothing keeps
//! them in sync.
//!
//! Unknown keys are rejected to catch typos early.

use crate::types::Category;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Configuration loaded from `officina.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StudioConfig {
    /// Document locations and the image path prefix.
    pub paths: PathsConfig,
    /// Capacity table enforced by the admin tool.
    pub admin: AdminConfig,
    /// Capacity table and reveal threshold of the public page.
    pub site: SiteConfig,
    /// Transient notice display.
    pub notices: NoticesConfig,
}

impl StudioConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.paths.image_prefix.trim().is_empty() {
            return Err(ConfigError::Validation(
                "paths.image_prefix must not be empty".into(),
            ));
        }
        if self.site.initial_visible == 0 {
            return Err(ConfigError::Validation(
                "site.initial_visible must be at least 1".into(),
            ));
        }
        if self.notices.duration_ms == 0 {
            return Err(ConfigError::Validation(
                "notices.duration_ms must be non-zero".into(),
            ));
        }
        if self.site.default_limit == 0 {
            return Err(ConfigError::Validation(
                "site.default_limit must be non-zero".into(),
            ));
        }
        for (section, limits) in [("admin", &self.admin.limits), ("site", &self.site.limits)] {
            if let Some(category) = Category::ALL.into_iter().find(|c| limits.get(*c) == 0) {
                return Err(ConfigError::Validation(format!(
                    "{section}.limits.{category} must be non-zero"
                )));
            }
        }
        Ok(())
    }
}

/// Where documents live and how image paths are built.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PathsConfig {
    /// Gallery document read at startup and named in the export hand-off.
    pub gallery_document: String,
    /// Testimonials document read at startup and named in the export hand-off.
    pub testimonials_document: String,
    /// Prepended to an uploaded file's name to form `image`.
    pub image_prefix: String,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            gallery_document: "config/gallery-items.json".to_string(),
            testimonials_document: "config/testimonials.json".to_string(),
            image_prefix: "images/gallery/".to_string(),
        }
    }
}

/// One limit per category. Every category must be present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LimitsConfig {
    pub gemme: usize,
    pub anelli: usize,
    pub collane: usize,
    pub orecchini: usize,
    pub altro: usize,
}

impl LimitsConfig {
    pub fn get(&self, category: Category) -> usize {
        match category {
            Category::Gemme => self.gemme,
            Category::Anelli => self.anelli,
            Category::Collane => self.collane,
            Category::Orecchini => self.orecchini,
            Category::Altro => self.altro,
        }
    }
}

/// Admin tool capacity settings. The category set is closed, so there is
/// no fallback limit.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AdminConfig {
    pub limits: LimitsConfig,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            limits: LimitsConfig {
                gemme: 100,
                anelli: 15,
                collane: 15,
                orecchini: 15,
                altro: 15,
            },
        }
    }
}

/// Public page display settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Items shown before the "load more" button.
    pub initial_visible: usize,
    /// Fallback for any category the table does not list.
    pub default_limit: usize,
    pub limits: LimitsConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            initial_visible: 5,
            default_limit: 25,
            limits: LimitsConfig {
                gemme: 100,
                anelli: 25,
                collane: 25,
                orecchini: 25,
                altro: 25,
            },
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NoticesConfig {
    /// How long a transient notice stays visible.
    pub duration_ms: u64,
}

impl Default for NoticesConfig {
    fn default() -> Self {
        Self { duration_ms: 3000 }
    }
}

impl NoticesConfig {
    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(StudioConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load a config file as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<StudioConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: StudioConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load `officina.toml` from `path`, falling back to stock defaults when the
/// file is absent.
pub fn load_config(path: &Path) -> Result<StudioConfig, ConfigError> {
    let base = stock_defaults_value();
    let overlay = load_raw_config(path)?;
    resolve_config(base, overlay)
}

/// Returns a fully-commented stock `officina.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Officina Configuration
# ======================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
# Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Documents
# ---------------------------------------------------------------------------
[paths]
# Gallery document loaded by the admin tool and the public page.
gallery_document = "config/gallery-items.json"

# Testimonials document loaded by the admin tool and the public page.
testimonials_document = "config/testimonials.json"

# Prefix for the image path of a newly added photo. The real file must be
# copied to this location separately; nothing is uploaded.
image_prefix = "images/gallery/"

# ---------------------------------------------------------------------------
# Admin tool capacity (photos accepted per category)
# ---------------------------------------------------------------------------
[admin.limits]
gemme = 100
anelli = 15
collane = 15
orecchini = 15
altro = 15

# ---------------------------------------------------------------------------
# Public page
# ---------------------------------------------------------------------------
[site]
# Gallery items visible before "load more" is pressed.
initial_visible = 5

# Limit for categories not listed below.
default_limit = 25

# Photos displayed per category. Configured independently of [admin.limits].
[site.limits]
gemme = 100
anelli = 25
collane = 25
orecchini = 25
altro = 25

# ---------------------------------------------------------------------------
# Notices
# ---------------------------------------------------------------------------
[notices]
# How long a status message stays on screen, in milliseconds.
duration_ms = 3000
"##
}
