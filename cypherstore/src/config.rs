use crate::error::Result;
use serde::Deserialize;

/// Label given to nodes created without one.
pub const DEFAULT_LABEL: &str = "UNKNOWN";

/// Store-level settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StoreConfig {
    pub default_label: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            default_label: DEFAULT_LABEL.to_string(),
        }
    }
}

impl StoreConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn default_label(mut self, label: impl Into<String>) -> Self {
        self.default_label = label.into();
        self
    }

    /// Reads settings from a JSON document. Missing keys keep their defaults.
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }
}
