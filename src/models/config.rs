use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Environment variable naming the config file when `--config` is absent
pub const CONFIG_ENV: &str = "SATKEY_CONFIG";

/// Application configuration loaded from a YAML file
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// Constant saturation threshold
    pub threshold: f64,

    /// Animated threshold; overrides `threshold` when non-empty
    pub keyframes: Vec<Keyframe>,

    /// Worker thread count (rayon's default when unset)
    pub threads: Option<usize>,

    /// Re-compress output PNGs with oxipng
    pub optimize: bool,

    /// Abort renders that run longer than this
    pub deadline_ms: Option<u64>,
}

/// One key of an animated threshold
#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
pub struct Keyframe {
    pub time: f64,
    pub value: f64,
}

impl AppConfig {
    /// Resolve the config path from an explicit flag or the environment.
    pub fn resolve_path(explicit: Option<PathBuf>) -> Option<PathBuf> {
        explicit.or_else(|| std::env::var(CONFIG_ENV).ok().map(PathBuf::from))
    }

    /// Load configuration from `path`, falling back to defaults on any error.
    pub fn load(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            tracing::debug!("No config file, using defaults");
            return Self::default();
        };

        match std::fs::read_to_string(path) {
            Ok(content) => match Self::from_yaml_str(&content) {
                Ok(config) => {
                    tracing::info!(
                        path = %path.display(),
                        threshold = config.threshold,
                        keyframes = config.keyframes.len(),
                        "Loaded configuration"
                    );
                    config
                }
                Err(e) => {
                    tracing::warn!(%e, path = %path.display(), "Failed to parse config, using defaults");
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!(%e, path = %path.display(), "Failed to read config, using defaults");
                Self::default()
            }
        }
    }

    /// Parse configuration from YAML text
    pub fn from_yaml_str(content: &str) -> Result<Self, serde_yaml::Error> {
        // An empty document deserializes to unit, not to an empty mapping
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            threshold: saturation_key::Threshold::DEFAULT.value(),
            keyframes: Vec::new(),
            threads: None,
            optimize: false,
            deadline_ms: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();

        assert_eq!(config.threshold, 0.02);
        assert!(config.keyframes.is_empty());
        assert_eq!(config.threads, None);
        assert!(!config.optimize);
        assert_eq!(config.deadline_ms, None);
    }

    #[test]
    fn test_deserialize_config() {
        let yaml = r#"
threshold: 0.1
keyframes:
  - { time: 0.0, value: 0.02 }
  - { time: 24.0, value: 0.4 }
threads: 8
optimize: true
deadline_ms: 5000
"#;

        let config = AppConfig::from_yaml_str(yaml).unwrap();

        assert_eq!(config.threshold, 0.1);
        assert_eq!(
            config.keyframes,
            vec![
                Keyframe {
                    time: 0.0,
                    value: 0.02
                },
                Keyframe {
                    time: 24.0,
                    value: 0.4
                },
            ]
        );
        assert_eq!(config.threads, Some(8));
        assert!(config.optimize);
        assert_eq!(config.deadline_ms, Some(5000));
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config = AppConfig::from_yaml_str("threads: 2\n").unwrap();
        assert_eq!(config.threads, Some(2));
        assert_eq!(config.threshold, 0.02);
    }

    #[test]
    fn test_empty_document_is_default() {
        assert_eq!(AppConfig::from_yaml_str("").unwrap(), AppConfig::default());
    }

    #[test]
    fn test_invalid_yaml_is_error() {
        assert!(AppConfig::from_yaml_str("threshold: [1, 2").is_err());
    }

    #[test]
    fn test_load_without_path_is_default() {
        assert_eq!(AppConfig::load(None), AppConfig::default());
    }

    #[test]
    fn test_load_missing_file_is_default() {
        let config = AppConfig::load(Some(Path::new("/nonexistent/satkey.yaml")));
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_resolve_path_prefers_explicit() {
        let explicit = PathBuf::from("explicit.yaml");
        assert_eq!(
            AppConfig::resolve_path(Some(explicit.clone())),
            Some(explicit)
        );
    }
}
