//! Lightbox configuration.
//!
//! Handles loading, validating, and merging `config.toml`. Stock defaults are
//! the base layer; a `config.toml` in the content root overrides any subset
//! of them.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! base_path = "images/projects"  # Prefix for every data-images entry
//!
//! [transitions]
//! reduced_motion = false    # true: every tween has zero duration
//! entrance_ms = 450         # Modal entrance
//! exit_ms = 350             # Modal exit
//! fade_ms = 250             # Image fade out/in on swap
//! ease = "power2.out"
//!
//! [keys]
//! close = ["Escape"]
//! next = ["ArrowRight"]
//! prev = ["ArrowLeft"]
//!
//! [modal]                   # Element ids of the modal markup contract
//! root = "lightbox"
//! overlay = "lightbox-overlay"
//! close = "lightbox-close"
//! title = "lightbox-title"
//! caption = "lightbox-caption"
//! image = "lightbox-image"
//! prev = "lightbox-prev"
//! next = "lightbox-next"
//! indicators = "lightbox-indicators"
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::lightbox::Tween;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
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

/// Lightbox configuration loaded from `config.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LightboxConfig {
    /// Prefix every `data-images` entry is resolved against.
    pub base_path: String,
    /// Durations and easing of the modal and image transitions.
    pub transitions: TransitionsConfig,
    /// Keyboard bindings, by DOM `KeyboardEvent.key` name.
    pub keys: KeysConfig,
    /// Element ids of the modal markup contract.
    pub modal: ModalConfig,
}

impl Default for LightboxConfig {
    fn default() -> Self {
        Self {
            base_path: "images/projects".to_string(),
            transitions: TransitionsConfig::default(),
            keys: KeysConfig::default(),
            modal: ModalConfig::default(),
        }
    }
}

impl LightboxConfig {
    /// Validate config values are usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.transitions.ease.trim().is_empty() {
            return Err(ConfigError::Validation(
                "transitions.ease must not be empty".into(),
            ));
        }

        let bindings = [
            ("keys.close", &self.keys.close),
            ("keys.next", &self.keys.next),
            ("keys.prev", &self.keys.prev),
        ];
        let mut bound = HashSet::new();
        for (label, keys) in bindings {
            if keys.is_empty() {
                return Err(ConfigError::Validation(format!(
                    "{label} must list at least one key"
                )));
            }
            for key in keys {
                if !bound.insert(key.as_str()) {
                    return Err(ConfigError::Validation(format!(
                        "key \"{key}\" is bound more than once"
                    )));
                }
            }
        }

        let mut ids = HashSet::new();
        for (part, id) in self.modal.all_ids() {
            if id.trim().is_empty() {
                return Err(ConfigError::Validation(format!(
                    "modal.{part} must not be empty"
                )));
            }
            if !ids.insert(id) {
                return Err(ConfigError::Validation(format!(
                    "modal id \"{id}\" is used more than once"
                )));
            }
        }
        Ok(())
    }
}

/// Transition timing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TransitionsConfig {
    /// Collapse every transition to zero duration (prefers-reduced-motion).
    pub reduced_motion: bool,
    pub entrance_ms: u32,
    pub exit_ms: u32,
    /// Fade duration for each half of an image swap.
    pub fade_ms: u32,
    /// Easing name handed to the animation utility.
    pub ease: String,
}

impl Default for TransitionsConfig {
    fn default() -> Self {
        Self {
            reduced_motion: false,
            entrance_ms: 450,
            exit_ms: 350,
            fade_ms: 250,
            ease: "power2.out".to_string(),
        }
    }
}

impl TransitionsConfig {
    pub fn entrance(&self) -> Tween {
        self.tween(self.entrance_ms)
    }

    pub fn exit(&self) -> Tween {
        self.tween(self.exit_ms)
    }

    pub fn fade(&self) -> Tween {
        self.tween(self.fade_ms)
    }

    fn tween(&self, duration_ms: u32) -> Tween {
        Tween {
            duration_ms: if self.reduced_motion { 0 } else { duration_ms },
            ease: self.ease.clone(),
        }
    }
}

/// Keyboard bindings, live only while the lightbox is open.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct KeysConfig {
    pub close: Vec<String>,
    pub next: Vec<String>,
    pub prev: Vec<String>,
}

impl Default for KeysConfig {
    fn default() -> Self {
        Self {
            close: vec!["Escape".to_string()],
            next: vec!["ArrowRight".to_string()],
            prev: vec!["ArrowLeft".to_string()],
        }
    }
}

/// Element ids the controller expects in the page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ModalConfig {
    pub root: String,
    pub overlay: String,
    pub close: String,
    pub title: String,
    pub caption: String,
    pub image: String,
    pub prev: String,
    pub next: String,
    pub indicators: String,
}

impl Default for ModalConfig {
    fn default() -> Self {
        Self {
            root: "lightbox".to_string(),
            overlay: "lightbox-overlay".to_string(),
            close: "lightbox-close".to_string(),
            title: "lightbox-title".to_string(),
            caption: "lightbox-caption".to_string(),
            image: "lightbox-image".to_string(),
            prev: "lightbox-prev".to_string(),
            next: "lightbox-next".to_string(),
            indicators: "lightbox-indicators".to_string(),
        }
    }
}

impl ModalConfig {
    /// Every part inside the root, labelled by its config key.
    pub fn parts(&self) -> [(&'static str, &str); 8] {
        [
            ("overlay", self.overlay.as_str()),
            ("close", self.close.as_str()),
            ("title", self.title.as_str()),
            ("caption", self.caption.as_str()),
            ("image", self.image.as_str()),
            ("prev", self.prev.as_str()),
            ("next", self.next.as_str()),
            ("indicators", self.indicators.as_str()),
        ]
    }

    fn all_ids(&self) -> impl Iterator<Item = (&'static str, &str)> {
        std::iter::once(("root", self.root.as_str())).chain(self.parts())
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(LightboxConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// Tables merge key-by-key; any other overlay value replaces the base value.
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

/// Load `config.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist.
pub fn load_raw_config(dir: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = dir.join("config.toml");
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    Ok(Some(toml::from_str(&content)?))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<LightboxConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: LightboxConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `config.toml` in the given directory, over stock defaults.
pub fn load_config(dir: &Path) -> Result<LightboxConfig, ConfigError> {
    resolve_config(stock_defaults_value(), load_raw_config(dir)?)
}

/// Returns a fully-commented stock `config.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Folio Lightbox Configuration
# ============================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys cause an error.

# Prefix every data-images entry is resolved against.
# Entries that are absolute ("/...") or URLs ("https://...") are used as-is.
base_path = "images/projects"

# ---------------------------------------------------------------------------
# Transitions
# ---------------------------------------------------------------------------
[transitions]
# Collapse every transition to zero duration (honour prefers-reduced-motion).
reduced_motion = false

# Modal entrance and exit, in milliseconds.
entrance_ms = 450
exit_ms = 350

# Image fade out/in on every swap, in milliseconds per half.
fade_ms = 250

# Easing name handed to the animation utility.
ease = "power2.out"

# ---------------------------------------------------------------------------
# Keyboard (KeyboardEvent.key names, only live while the lightbox is open)
# ---------------------------------------------------------------------------
[keys]
close = ["Escape"]
next = ["ArrowRight"]
prev = ["ArrowLeft"]

# ---------------------------------------------------------------------------
# Modal markup contract (element ids)
# ---------------------------------------------------------------------------
[modal]
root = "lightbox"
overlay = "lightbox-overlay"
close = "lightbox-close"
title = "lightbox-title"
caption = "lightbox-caption"
image = "lightbox-image"
prev = "lightbox-prev"
next = "lightbox-next"
indicators = "lightbox-indicators"
"##
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config_values() {
        let config = LightboxConfig::default();
        assert_eq!(config.base_path, "images/projects");
        assert_eq!(config.transitions.fade_ms, 250);
        assert_eq!(config.keys.close, vec!["Escape"]);
        assert_eq!(config.modal.root, "lightbox");
    }

    #[test]
    fn validate_default_config_passes() {
        assert!(LightboxConfig::default().validate().is_ok());
    }

    #[test]
    fn stock_config_parses_to_defaults() {
        let config: LightboxConfig = toml::from_str(stock_config_toml()).unwrap();
        assert_eq!(config, LightboxConfig::default());
    }

    #[test]
    fn parse_partial_config() {
        let config: LightboxConfig = toml::from_str(
            r#"
[transitions]
fade_ms = 100
"#,
        )
        .unwrap();
        assert_eq!(config.transitions.fade_ms, 100);
        assert_eq!(config.transitions.entrance_ms, 450);
        assert_eq!(config.base_path, "images/projects");
    }

    #[test]
    fn reduced_motion_zeroes_every_tween() {
        let transitions = TransitionsConfig {
            reduced_motion: true,
            ..TransitionsConfig::default()
        };
        assert_eq!(transitions.entrance().duration_ms, 0);
        assert_eq!(transitions.exit().duration_ms, 0);
        assert_eq!(transitions.fade().duration_ms, 0);
        assert_eq!(transitions.fade().ease, "power2.out");
    }

    #[test]
    fn tweens_use_configured_durations() {
        let transitions = TransitionsConfig::default();
        assert_eq!(transitions.entrance().duration_ms, 450);
        assert_eq!(transitions.exit().duration_ms, 350);
    }

    #[test]
    fn unknown_key_rejected() {
        let result: Result<LightboxConfig, _> = toml::from_str("base_pth = \"x\"");
        assert!(result.is_err());
    }

    #[test]
    fn unknown_nested_key_rejected() {
        let result: Result<LightboxConfig, _> = toml::from_str("[modal]\nrooot = \"x\"");
        assert!(result.is_err());
    }

    #[test]
    fn validate_empty_ease() {
        let mut config = LightboxConfig::default();
        config.transitions.ease = " ".into();
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn validate_empty_key_list() {
        let mut config = LightboxConfig::default();
        config.keys.next.clear();
        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("keys.next"));
    }

    #[test]
    fn validate_key_bound_twice() {
        let mut config = LightboxConfig::default();
        config.keys.prev.push("Escape".into());
        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("Escape"));
    }

    #[test]
    fn validate_duplicate_modal_id() {
        let mut config = LightboxConfig::default();
        config.modal.prev = config.modal.next.clone();
        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("lightbox-next"));
    }

    #[test]
    fn validate_empty_modal_id() {
        let mut config = LightboxConfig::default();
        config.modal.caption = String::new();
        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("modal.caption"));
    }

    #[test]
    fn merge_toml_scalar_override() {
        let base: toml::Value = toml::from_str("a = 1\nb = 2").unwrap();
        let overlay: toml::Value = toml::from_str("b = 3").unwrap();
        let merged = merge_toml(base, overlay);
        assert_eq!(merged["a"].as_integer(), Some(1));
        assert_eq!(merged["b"].as_integer(), Some(3));
    }

    #[test]
    fn merge_toml_replaces_arrays_wholesale() {
        let base = stock_defaults_value();
        let overlay: toml::Value = toml::from_str("[keys]\nclose = [\"q\", \"Escape\"]").unwrap();
        let config: LightboxConfig = merge_toml(base, overlay).try_into().unwrap();
        assert_eq!(config.keys.close, vec!["q", "Escape"]);
        assert_eq!(config.keys.next, vec!["ArrowRight"]);
    }

    #[test]
    fn load_config_returns_default_when_no_file() {
        let tmp = TempDir::new().unwrap();
        assert_eq!(load_config(tmp.path()).unwrap(), LightboxConfig::default());
    }

    #[test]
    fn load_config_reads_file() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("config.toml"),
            "base_path = \"/media\"\n[transitions]\nreduced_motion = true\n",
        )
        .unwrap();
        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.base_path, "/media");
        assert!(config.transitions.reduced_motion);
        assert_eq!(config.modal, ModalConfig::default());
    }

    #[test]
    fn load_config_invalid_toml_is_error() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("config.toml"), "base_path = ").unwrap();
        assert!(matches!(
            load_config(tmp.path()),
            Err(ConfigError::Toml(_))
        ));
    }

    #[test]
    fn load_config_runs_validation() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("config.toml"), "[keys]\nclose = []\n").unwrap();
        assert!(matches!(
            load_config(tmp.path()),
            Err(ConfigError::Validation(_))
        ));
    }
}
