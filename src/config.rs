//! Extension settings deserialized from the host configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::constants::{DEFAULT_ICON_HEIGHT, DEFAULT_ICON_WIDTH};

/// Settings for the wizard pipeline, typically deserialized from the host's
/// extension configuration. Unset fields fall back to built-in defaults.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct WizardSettings {
    /// Icon used for elements whose form declares none.
    pub default_icon: Option<PathBuf>,
    /// Icon width in the host's dimension syntax (e.g. `24m`).
    pub icon_width: String,
    /// Icon height in the host's dimension syntax (e.g. `24m`).
    pub icon_height: String,
}

impl Default for WizardSettings {
    fn default() -> Self {
        Self {
            default_icon: None,
            icon_width: DEFAULT_ICON_WIDTH.to_string(),
            icon_height: DEFAULT_ICON_HEIGHT.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = WizardSettings::default();
        assert_eq!(settings.icon_width, "24m");
        assert_eq!(settings.icon_height, "24m");
        assert!(settings.default_icon.is_none());
    }

    #[test]
    fn test_partial_deserialization_fills_defaults() {
        let settings: WizardSettings =
            serde_json::from_str(r#"{"icon_width": "32m"}"#).unwrap();
        assert_eq!(settings.icon_width, "32m");
        assert_eq!(settings.icon_height, "24m");
    }

    #[test]
    fn test_default_icon_roundtrip() {
        let settings: WizardSettings =
            serde_json::from_str(r#"{"default_icon": "Resources/Icons/Plugin.svg"}"#).unwrap();
        assert_eq!(
            settings.default_icon.as_deref(),
            Some(std::path::Path::new("Resources/Icons/Plugin.svg"))
        );
    }
}
