//! Configuration system
//!
//! Configuration files are selected by extension: `.toml` or `.ron`.

pub use serde::{Serialize, Deserialize};

/// Configuration trait
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Load configuration from file
    fn load_from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(ConfigError::Io)?;

        // Try different formats
        if path.ends_with(".toml") {
            toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else if path.ends_with(".ron") {
            ron::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else {
            Err(ConfigError::UnsupportedFormat(path.to_string()))
        }
    }

    /// Save configuration to file
    fn save_to_file(&self, path: &str) -> Result<(), ConfigError> {
        let contents = if path.ends_with(".toml") {
            toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else if path.ends_with(".ron") {
            ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
                .map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else {
            return Err(ConfigError::UnsupportedFormat(path.to_string()));
        };

        std::fs::write(path, contents).map_err(ConfigError::Io)
    }
}

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Unsupported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Values that parse but cannot be used
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// # Compositor Configuration
///
/// Controls the canvas that part textures are composited onto.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompositorConfig {
    /// Width of every composited texture in pixels
    pub width: u32,
    /// Height of every composited texture in pixels
    pub height: u32,
    /// Tint (`0xRRGGBB`) for slots without an explicit tint
    pub default_tint: u32,
}

impl CompositorConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::Invalid(format!(
                "Composite size must be non-zero, got {}x{}",
                self.width, self.height
            )));
        }
        if self.default_tint > 0x00FF_FFFF {
            return Err(ConfigError::Invalid(format!(
                "Default tint {:#x} is not a 0xRRGGBB color",
                self.default_tint
            )));
        }
        Ok(())
    }
}

impl Default for CompositorConfig {
    fn default() -> Self {
        Self {
            width: 64,
            height: 32,
            default_tint: 0x00FF_FFFF,
        }
    }
}

/// # Tails Configuration
///
/// Top-level configuration for applications embedding the part renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TailsConfig {
    /// Log filter passed to `env_logger` when `RUST_LOG` is unset
    pub log_level: String,
    /// Texture compositing settings
    pub compositor: CompositorConfig,
}

impl TailsConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.log_level.trim().is_empty() {
            return Err(ConfigError::Invalid("Log level cannot be empty".to_string()));
        }
        self.compositor.validate()
    }
}

impl Default for TailsConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            compositor: CompositorConfig::default(),
        }
    }
}

impl Config for TailsConfig {}
