use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_CONFIG_NAME: &str = "formstudio.config.json";

/// Studio configuration file format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudioConfig {
    /// Languages offered when editing survey options
    #[serde(default = "default_supported_languages")]
    pub supported_languages: Vec<String>,

    /// Name of the workflow derived workflows are cut from
    #[serde(default = "default_main_workflow")]
    pub main_workflow: String,
}

fn default_supported_languages() -> Vec<String> {
    ["en", "fr", "de", "es", "it"]
        .iter()
        .map(|l| l.to_string())
        .collect()
}

fn default_main_workflow() -> String {
    formstudio_model::MAIN_WORKFLOW.to_string()
}

impl StudioConfig {
    /// Load config from a directory
    pub fn load(dir: impl AsRef<Path>) -> anyhow::Result<Self> {
        let config_path = dir.as_ref().join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: StudioConfig = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(StudioConfig::default())
        }
    }
}

impl Default for StudioConfig {
    fn default() -> Self {
        Self {
            supported_languages: default_supported_languages(),
            main_workflow: default_main_workflow(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let json = r#"{
            "supportedLanguages": ["en", "fr", "nl"]
        }"#;

        let config: StudioConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.supported_languages, vec!["en", "fr", "nl"]);
        assert_eq!(config.main_workflow, "main");
    }

    #[test]
    fn test_default_config() {
        let config = StudioConfig::default();
        assert_eq!(config.main_workflow, "main");
        assert_eq!(config.supported_languages.len(), 5);
    }

    #[test]
    fn test_load_missing_file_gives_default() {
        let config = StudioConfig::load("/nonexistent/formstudio").unwrap();
        assert_eq!(config, StudioConfig::default());
    }
}
