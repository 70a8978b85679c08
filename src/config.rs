use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{
    align::{AlignStrategy, AlignmentOffsets},
    error::{ConfigError, Result},
};

/// Main configuration for clipfuse
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Alignment settings
    pub align: AlignConfig,

    /// Output encoding settings
    pub output: OutputConfig,

    /// Storage/publishing settings
    pub storage: StorageConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            align: AlignConfig::default(),
            output: OutputConfig::default(),
            storage: StorageConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|_| ConfigError::FileNotFound { path: path.display().to_string() })?;

        let config: Config = toml::from_str(&content)
            .map_err(|_| ConfigError::ParseFailed { path: path.display().to_string() })?;
        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::InvalidValue {
                key: "config".to_string(),
                value: e.to_string()
            })?;

        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        self.align.validate()?;
        self.output.validate()?;
        Ok(())
    }
}

/// Alignment configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlignConfig {
    /// Which alignment semantic to apply
    pub strategy: AlignStrategy,

    /// Default lead-in in seconds (video before the audio starts)
    pub start_duration: f64,

    /// Default lead-out in seconds (video after the audio ends)
    pub end_duration: f64,

    /// When set, offsets with magnitude above this are rejected instead of clamped
    pub max_offset: Option<f64>,
}

impl Default for AlignConfig {
    fn default() -> Self {
        Self {
            strategy: AlignStrategy::default(),
            start_duration: 0.0,
            end_duration: 0.0,
            max_offset: None,
        }
    }
}

impl AlignConfig {
    /// Offsets for one run: explicit values override the configured defaults
    pub fn offsets_with(&self, start: Option<f64>, end: Option<f64>) -> AlignmentOffsets {
        AlignmentOffsets::new(
            start.unwrap_or(self.start_duration),
            end.unwrap_or(self.end_duration),
        )
    }

    fn validate(&self) -> Result<()> {
        if !self.start_duration.is_finite() || !self.end_duration.is_finite() {
            return Err(ConfigError::InvalidValue {
                key: "align.offsets".to_string(),
                value: format!("{}/{}", self.start_duration, self.end_duration),
            }
            .into());
        }

        if let Some(max) = self.max_offset {
            if !max.is_finite() || max <= 0.0 {
                return Err(ConfigError::InvalidValue {
                    key: "align.max_offset".to_string(),
                    value: max.to_string(),
                }
                .into());
            }
        }

        Ok(())
    }
}

/// Output encoding configuration
///
/// These are handed verbatim to the external encoder; clipfuse does not
/// validate codec availability beyond a non-empty name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Video codec passed to the encoder
    pub video_codec: String,

    /// Audio codec passed to the encoder
    pub audio_codec: String,

    /// Overwrite the output file if it already exists
    pub overwrite: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            video_codec: "libx264".to_string(),
            audio_codec: "aac".to_string(),
            overwrite: true,
        }
    }
}

impl OutputConfig {
    fn validate(&self) -> Result<()> {
        if self.video_codec.is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "output.video_codec".to_string(),
                value: String::new(),
            }
            .into());
        }
        if self.audio_codec.is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "output.audio_codec".to_string(),
                value: String::new(),
            }
            .into());
        }
        Ok(())
    }
}

/// Storage/publishing configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Publish the composed file after muxing
    pub publish: bool,

    /// Destination directory for the local storage backend
    pub destination: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            publish: false,
            destination: PathBuf::from("published"),
        }
    }
}
