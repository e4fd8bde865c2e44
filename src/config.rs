/// Per-widget configuration
///
/// Every field has a default, so a config file only needs the fields it
/// changes. The demo host reads an array of these from the JSON file named
/// by `IMAGE_INPUT_CONFIG`.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

use crate::error::ConfigError;

/// Environment variable naming the demo host's config file
pub const CONFIG_ENV_VAR: &str = "IMAGE_INPUT_CONFIG";

/// How long an error message stays visible
pub const DEFAULT_ERROR_TIMEOUT_MS: u64 = 3000;

/// Displayed thumbnail edge length in pixels
pub const DEFAULT_THUMBNAIL_SIZE: u16 = 120;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ImageInputConfig {
    /// Element id the host addresses this widget by
    pub id: String,
    /// Accept several images per selection (fixed for the widget's lifetime)
    pub multiple: bool,
    /// Label shown above the surface
    pub label: Option<String>,
    /// Prompt text inside the surface
    pub button_label: String,
    /// Extensions offered by the file picker filter; empty means no filter
    pub accept: Vec<String>,
    pub error_timeout_ms: u64,
    pub thumbnail_size: u16,
}

impl Default for ImageInputConfig {
    fn default() -> Self {
        Self {
            id: "image".to_string(),
            multiple: false,
            label: None,
            button_label: "Drop an image here, click to browse, or paste".to_string(),
            accept: ["png", "jpg", "jpeg", "gif", "webp", "bmp"]
                .into_iter()
                .map(String::from)
                .collect(),
            error_timeout_ms: DEFAULT_ERROR_TIMEOUT_MS,
            thumbnail_size: DEFAULT_THUMBNAIL_SIZE,
        }
    }
}

impl ImageInputConfig {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    pub fn multiple(mut self, multiple: bool) -> Self {
        self.multiple = multiple;
        self
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Parse an array of widget configs from JSON
    pub fn list_from_json(json: &str) -> Result<Vec<Self>, ConfigError> {
        let configs: Vec<Self> = serde_json::from_str(json)?;

        let mut seen = HashSet::new();
        for config in &configs {
            if !seen.insert(config.id.as_str()) {
                return Err(ConfigError::DuplicateId(config.id.clone()));
            }
        }

        Ok(configs)
    }

    /// Load widget configs from a JSON file
    pub fn list_from_file(path: &Path) -> Result<Vec<Self>, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::list_from_json(&json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ImageInputConfig::default();
        assert!(!config.multiple);
        assert_eq!(config.error_timeout_ms, 3000);
        assert!(config.accept.contains(&"png".to_string()));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let configs = ImageInputConfig::list_from_json(
            r#"[{"id": "avatar"}, {"id": "gallery", "multiple": true, "label": "Gallery"}]"#,
        )
        .unwrap();

        assert_eq!(configs.len(), 2);
        assert_eq!(configs[0].id, "avatar");
        assert!(!configs[0].multiple);
        assert!(configs[1].multiple);
        assert_eq!(configs[1].label.as_deref(), Some("Gallery"));
        assert_eq!(configs[1].error_timeout_ms, DEFAULT_ERROR_TIMEOUT_MS);
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let result = ImageInputConfig::list_from_json(r#"[{"id": "a"}, {"id": "a"}]"#);
        assert!(matches!(result, Err(ConfigError::DuplicateId(id)) if id == "a"));
    }

    #[test]
    fn test_missing_file() {
        let result = ImageInputConfig::list_from_file(Path::new("/nonexistent/inputs.json"));
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }

    #[test]
    fn test_builder() {
        let config = ImageInputConfig::new("photos").multiple(true).label("Photos");
        assert_eq!(config.id, "photos");
        assert!(config.multiple);
        assert_eq!(config.label.as_deref(), Some("Photos"));
    }
}
