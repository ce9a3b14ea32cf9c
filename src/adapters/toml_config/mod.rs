// Config file adapter - Configuration loading from TOML (or YAML) files

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::adapters::process::timeout_from_secs;
use crate::domain::rules::DEFAULT_END_TOLERANCE_SECS;
use crate::error::{Mp4TrimError, Mp4TrimResult};
use crate::utils::logging::LoggingConfig;

/// Complete application configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub tools: ToolsConfig,
    pub limits: LimitsConfig,
    pub validation: ValidationConfig,
    pub logging: LoggingConfig,
}

/// External tool locations; bare names are looked up on `PATH`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ToolsConfig {
    pub ffmpeg: PathBuf,
    pub ffprobe: PathBuf,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            ffmpeg: PathBuf::from("ffmpeg"),
            ffprobe: PathBuf::from("ffprobe"),
        }
    }
}

/// Wall-clock limits for tool runs, in seconds; `0` disables the limit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LimitsConfig {
    pub probe_timeout_secs: u64,
    pub trim_timeout_secs: u64,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            probe_timeout_secs: 60,
            trim_timeout_secs: 3600,
        }
    }
}

impl LimitsConfig {
    pub fn probe_timeout(&self) -> Option<Duration> {
        timeout_from_secs(self.probe_timeout_secs)
    }

    pub fn trim_timeout(&self) -> Option<Duration> {
        timeout_from_secs(self.trim_timeout_secs)
    }
}

/// Range validation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ValidationConfig {
    /// How far `end` may exceed the probed duration
    pub end_tolerance_secs: f64,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            end_tolerance_secs: DEFAULT_END_TOLERANCE_SECS,
        }
    }
}

impl AppConfig {
    /// Reject values no component can honour
    pub fn validate(&self) -> Mp4TrimResult<()> {
        let tolerance = self.validation.end_tolerance_secs;
        if !tolerance.is_finite() || tolerance < 0.0 {
            return Err(Mp4TrimError::InvalidSetting {
                key: "validation.end_tolerance_secs".to_string(),
                message: format!("must be a finite, non-negative number of seconds, got {}", tolerance),
            });
        }

        for (key, program) in [("tools.ffmpeg", &self.tools.ffmpeg), ("tools.ffprobe", &self.tools.ffprobe)] {
            if program.as_os_str().is_empty() {
                return Err(Mp4TrimError::InvalidSetting {
                    key: key.to_string(),
                    message: "must not be empty".to_string(),
                });
            }
        }

        Ok(())
    }
}

/// Config file loader
pub struct TomlConfigAdapter;

impl TomlConfigAdapter {
    /// Looked up in the working directory when no file is given
    pub const DEFAULT_FILE_NAME: &'static str = "mp4trim.toml";

    /// Load the explicit file, else `./mp4trim.toml` if present, else defaults
    pub fn discover(explicit: Option<&Path>) -> Mp4TrimResult<AppConfig> {
        if let Some(path) = explicit {
            return Self::load(path);
        }

        let fallback = Path::new(Self::DEFAULT_FILE_NAME);
        if fallback.is_file() {
            return Self::load(fallback);
        }

        debug!("No config file found, using defaults");
        Ok(AppConfig::default())
    }

    /// Load a config file; `.yaml`/`.yml` files are parsed as YAML, anything else as TOML
    pub fn load(path: &Path) -> Mp4TrimResult<AppConfig> {
        let content = std::fs::read_to_string(path).map_err(|source| Mp4TrimError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;

        let is_yaml = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"));

        let config = if is_yaml {
            Self::parse_yaml(&content, path)?
        } else {
            Self::parse_toml(&content, path)?
        };
        debug!(path = %path.display(), "Loaded configuration file");
        Ok(config)
    }

    pub fn parse_toml(content: &str, path: &Path) -> Mp4TrimResult<AppConfig> {
        toml::from_str(content).map_err(|e| Mp4TrimError::ConfigParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    pub fn parse_yaml(content: &str, path: &Path) -> Mp4TrimResult<AppConfig> {
        serde_yaml::from_str(content).map_err(|e| Mp4TrimError::ConfigParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::logging::LogFormat;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.tools.ffmpeg, PathBuf::from("ffmpeg"));
        assert_eq!(config.tools.ffprobe, PathBuf::from("ffprobe"));
        assert_eq!(config.limits.probe_timeout(), Some(Duration::from_secs(60)));
        assert_eq!(config.limits.trim_timeout(), Some(Duration::from_secs(3600)));
        assert_eq!(config.validation.end_tolerance_secs, DEFAULT_END_TOLERANCE_SECS);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let content = r#"
[tools]
ffmpeg = "/opt/ffmpeg/bin/ffmpeg"

[limits]
trim_timeout_secs = 0

[logging]
format = "json"
"#;
        let config = TomlConfigAdapter::parse_toml(content, Path::new("mp4trim.toml")).unwrap();
        assert_eq!(config.tools.ffmpeg, PathBuf::from("/opt/ffmpeg/bin/ffmpeg"));
        assert_eq!(config.tools.ffprobe, PathBuf::from("ffprobe"));
        assert_eq!(config.limits.trim_timeout(), None);
        assert_eq!(config.limits.probe_timeout_secs, 60);
        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_unknown_keys_are_rejected() {
        let err = TomlConfigAdapter::parse_toml("[tools]\nffmpg = \"x\"\n", Path::new("bad.toml"))
            .unwrap_err();
        assert!(matches!(err, Mp4TrimError::ConfigParse { .. }));
    }

    #[test]
    fn test_yaml_file_is_loaded_by_extension() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("mp4trim.yaml");
        std::fs::write(&path, "validation:\n  end_tolerance_secs: 0.0\nlimits:\n  probe_timeout_secs: 5\n").unwrap();

        let config = TomlConfigAdapter::load(&path).unwrap();
        assert_eq!(config.validation.end_tolerance_secs, 0.0);
        assert_eq!(config.limits.probe_timeout(), Some(Duration::from_secs(5)));
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let err = TomlConfigAdapter::discover(Some(Path::new("/no/such/mp4trim.toml"))).unwrap_err();
        assert!(matches!(err, Mp4TrimError::ConfigRead { .. }));
    }

    #[test]
    fn test_negative_tolerance_fails_validation() {
        let mut config = AppConfig::default();
        config.validation.end_tolerance_secs = -0.5;
        assert!(matches!(
            config.validate(),
            Err(Mp4TrimError::InvalidSetting { ref key, .. }) if key == "validation.end_tolerance_secs"
        ));

        config.validation.end_tolerance_secs = f64::INFINITY;
        assert!(config.validate().is_err());
    }
}
