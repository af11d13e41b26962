use markup_text_engine::{SanitizerConfig, SanitizerConfigError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Invalid sanitizer settings in {config_path}: {source}")]
    InvalidConfig {
        config_path: PathBuf,
        source: SanitizerConfigError,
    },
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub sanitizer: SanitizerSettings,
}

/// The `[sanitizer]` table. Omitted keys keep the built-in defaults.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SanitizerSettings {
    /// Replaces the default allowed elements.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed_tags: Option<Vec<String>>,

    /// Added to the allowed elements, default or not.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub extra_allowed_tags: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub dropped_tags: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub global_attributes: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub url_schemes: Option<Vec<String>>,

    /// Per-element attribute lists; each entry replaces that element's default.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub tag_attributes: BTreeMap<String, Vec<String>>,
}

impl Config {
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        // Expand shell variables and tilde in paths given on the command line
        let config_path = Self::expand_path(config_path).unwrap_or_else(|| config_path.to_path_buf());
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.clone(),
                source,
            }
        })?;

        let config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.clone(),
                source,
            })?;

        config
            .sanitizer_config()
            .map_err(|source| ConfigError::InvalidConfig {
                config_path: config_path.clone(),
                source,
            })?;

        Ok(Some(config))
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        let config_path = Self::config_path();
        Self::load_from_path(&config_path)
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> anyhow::Result<()> {
        let config_path = config_path.as_ref();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path();
        self.save_to_path(&config_path)
    }

    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/markup-text");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }

    /// Build the sanitizer allow-list: defaults overlaid with this file.
    pub fn sanitizer_config(&self) -> Result<SanitizerConfig, SanitizerConfigError> {
        let settings = &self.sanitizer;
        let mut config = SanitizerConfig::default();

        if let Some(tags) = &settings.allowed_tags {
            config = config.with_allowed_tags(tags);
        }
        for tag in &settings.extra_allowed_tags {
            config = config.allow_tag(tag);
        }
        if let Some(tags) = &settings.dropped_tags {
            config = config.with_dropped_tags(tags);
        }
        if let Some(attributes) = &settings.global_attributes {
            config = config.with_global_attributes(attributes);
        }
        for (tag, attributes) in &settings.tag_attributes {
            config = config.with_tag_attributes(tag, attributes);
        }
        if let Some(schemes) = &settings.url_schemes {
            config = config.with_url_schemes(schemes);
        }

        config.validate()?;
        Ok(config)
    }

    fn expand_path(path: &Path) -> Option<PathBuf> {
        let path_str = path.to_string_lossy();
        match shellexpand::full(&path_str) {
            Ok(expanded) => Some(PathBuf::from(expanded.as_ref())),
            Err(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::env;
    use tempfile::TempDir;

    #[test]
    fn test_config_path() {
        let config_path = Config::config_path();
        let path_str = config_path.to_string_lossy();

        // Should not contain tilde anymore
        assert!(!path_str.starts_with('~'));
        // Should contain the expected config file name
        assert!(path_str.ends_with(".config/markup-text/config.toml"));
    }

    #[test]
    fn test_empty_file_gives_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(
            config.sanitizer_config().unwrap(),
            SanitizerConfig::default()
        );
    }

    #[test]
    fn test_sanitizer_settings_overlay_defaults() {
        let config: Config = toml::from_str(
            r#"
[sanitizer]
allowed_tags = ["p", "b"]
extra_allowed_tags = ["figure"]
url_schemes = ["https"]

[sanitizer.tag_attributes]
figure = ["id"]
"#,
        )
        .unwrap();

        let sanitizer = config.sanitizer_config().unwrap();
        assert!(sanitizer.allows_tag("p"));
        assert!(sanitizer.allows_tag("figure"));
        assert!(!sanitizer.allows_tag("div"));
        assert!(sanitizer.allows_attribute("figure", "id"));
        assert!(sanitizer.allows_attribute("p", "class"));
        assert!(sanitizer.allows_scheme("https"));
        assert!(!sanitizer.allows_scheme("http"));
    }

    #[test]
    fn test_config_serialization_roundtrip() {
        let mut original = Config::default();
        original.sanitizer.allowed_tags = Some(vec!["p".to_string(), "em".to_string()]);
        original
            .sanitizer
            .tag_attributes
            .insert("a".to_string(), vec!["href".to_string()]);

        let toml_str = toml::to_string(&original).unwrap();
        let deserialized: Config = toml::from_str(&toml_str).unwrap();

        assert_eq!(original, deserialized);
    }

    #[test]
    fn test_expand_path_with_tilde() {
        let path = PathBuf::from("~/test/path");
        let expanded = Config::expand_path(&path);

        assert!(expanded.is_some());
        let expanded = expanded.unwrap();
        assert!(!expanded.to_string_lossy().starts_with('~'));
        assert!(expanded.to_string_lossy().contains("test/path"));
    }

    #[test]
    fn test_expand_path_with_env_var() {
        unsafe {
            env::set_var("MARKUP_TEXT_TEST_DIR", "/test/env/path");
        }

        let path = PathBuf::from("$MARKUP_TEXT_TEST_DIR/config.toml");
        let expanded = Config::expand_path(&path);

        assert_eq!(expanded, Some(PathBuf::from("/test/env/path/config.toml")));

        unsafe {
            env::remove_var("MARKUP_TEXT_TEST_DIR");
        }
    }

    #[test]
    fn test_expand_path_with_relative_path() {
        let path = PathBuf::from("relative/path");
        let expanded = Config::expand_path(&path).unwrap();

        assert_eq!(expanded, path);
    }

    #[test]
    fn test_load_config_file_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let non_existent_config = temp_dir.path().join("nonexistent.toml");

        let result = Config::load_from_path(&non_existent_config).unwrap();

        assert!(result.is_none());
    }

    #[test]
    fn test_save_and_load_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("nested").join("config.toml");
        let mut test_config = Config::default();
        test_config.sanitizer.extra_allowed_tags = vec!["figure".to_string()];
        test_config.sanitizer.url_schemes = Some(vec!["https".to_string()]);

        test_config.save_to_path(&config_file).unwrap();
        let loaded_config = Config::load_from_path(&config_file).unwrap().unwrap();

        assert_eq!(loaded_config, test_config);
    }

    #[test]
    fn test_parse_error_names_the_file() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("config.toml");
        std::fs::write(&config_file, "[sanitizer]\nallowed_tags = \"p\"\n").unwrap();

        let error = Config::load_from_path(&config_file).unwrap_err();

        assert!(matches!(error, ConfigError::ConfigParseError { .. }));
        assert!(error.to_string().contains("config.toml"));
    }

    #[test]
    fn test_script_cannot_be_allowed() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("config.toml");
        std::fs::write(&config_file, "[sanitizer]\nextra_allowed_tags = [\"script\"]\n").unwrap();

        let error = Config::load_from_path(&config_file).unwrap_err();

        assert!(matches!(
            error,
            ConfigError::InvalidConfig {
                source: SanitizerConfigError::ForbiddenTag(_),
                ..
            }
        ));
    }

    #[test]
    fn test_event_handler_cannot_be_allowed() {
        let config: Config = toml::from_str(
            r#"
[sanitizer]
global_attributes = ["class", "onclick"]
"#,
        )
        .unwrap();

        assert_eq!(
            config.sanitizer_config(),
            Err(SanitizerConfigError::EventHandlerAttribute(
                "onclick".to_string()
            ))
        );
    }
}
