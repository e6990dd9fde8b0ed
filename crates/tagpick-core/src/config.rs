use config::{Config, ConfigError, Environment, File as ConfigFile};
use serde::Deserialize;
use std::path::PathBuf;

use crate::volume::Volume;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
    /// Kept as text so a bad value surfaces as `InvalidSampleSize` at search time.
    #[serde(default = "default_sample_size")]
    pub sample_size: String,
    #[serde(default)]
    pub volumes: Vec<VolumeConfig>,
    #[serde(default)]
    pub catalog_path: Option<PathBuf>,
    #[serde(default)]
    pub ignore_patterns: Vec<String>,
    #[serde(default = "default_reserved_dirs")]
    pub reserved_dirs: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VolumeConfig {
    pub root: PathBuf,
    pub label: String,
    #[serde(default)]
    pub selected: bool,
}

impl From<&VolumeConfig> for Volume {
    fn from(cfg: &VolumeConfig) -> Self {
        Volume::new(cfg.root.clone(), cfg.label.clone()).with_selected(cfg.selected)
    }
}

fn default_extensions() -> Vec<String> {
    vec![".mp4".to_string(), ".avi".to_string(), ".wmv".to_string()]
}

fn default_sample_size() -> String {
    "5".to_string()
}

fn default_reserved_dirs() -> Vec<String> {
    vec!["$RECYCLE.BIN".to_string()]
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            extensions: default_extensions(),
            sample_size: default_sample_size(),
            volumes: Vec::new(),
            catalog_path: None,
            ignore_patterns: Vec::new(),
            reserved_dirs: default_reserved_dirs(),
        }
    }
}

/// Load `Config.toml` (optional) from the working directory, then `TAGPICK_*`
/// environment overrides.
pub fn load_configuration() -> Result<AppConfig, ConfigError> {
    let builder = Config::builder()
        .add_source(ConfigFile::with_name("Config").required(false))
        .add_source(Environment::with_prefix("TAGPICK"))
        .build()?;
    builder.try_deserialize::<AppConfig>()
}

impl AppConfig {
    /// Volumes listed in the config, or the ones the OS reports when none are listed.
    pub fn resolve_volumes(&self) -> Vec<Volume> {
        if self.volumes.is_empty() {
            crate::platform::list_volumes()
        } else {
            self.volumes.iter().map(Volume::from).collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::FileFormat;

    fn parse(toml: &str) -> AppConfig {
        Config::builder()
            .add_source(ConfigFile::from_str(toml, FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize::<AppConfig>()
            .unwrap()
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = parse("");
        assert_eq!(config.extensions, vec![".mp4", ".avi", ".wmv"]);
        assert_eq!(config.sample_size, "5");
        assert_eq!(config.reserved_dirs, vec!["$RECYCLE.BIN"]);
        assert!(config.catalog_path.is_none());
    }

    #[test]
    fn test_configured_volumes_replace_enumeration() {
        let config = parse(
            r#"
            sample_size = "12"

            [[volumes]]
            root = "/media/usb"
            label = "USB"
            selected = true

            [[volumes]]
            root = "/media/archive"
            label = "ARCHIVE"
            "#,
        );
        let volumes = config.resolve_volumes();
        assert_eq!(volumes.len(), 2);
        assert_eq!(volumes[0].label, "USB");
        assert!(volumes[0].selected);
        assert!(!volumes[1].selected);
        assert_eq!(config.sample_size, "12");
    }
}
