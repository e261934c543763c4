//! Processor configuration.
//!
//! Everything that would otherwise be ambient library state (background
//! color, resampling filter) lives here and is owned by each processor.

use crate::alpha::WHITE;
use crate::error::{Result, ScaleCraftError};
use crate::output::validate_quality;
use image::imageops::FilterType;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Resampling filter used by `scale` and `resize`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResampleFilter {
    /// Nearest neighbour
    Nearest,
    /// Linear
    Triangle,
    /// Cubic
    CatmullRom,
    /// Gaussian
    Gaussian,
    /// Lanczos with window 3
    #[default]
    Lanczos3,
}

impl From<ResampleFilter> for FilterType {
    fn from(filter: ResampleFilter) -> Self {
        match filter {
            ResampleFilter::Nearest => FilterType::Nearest,
            ResampleFilter::Triangle => FilterType::Triangle,
            ResampleFilter::CatmullRom => FilterType::CatmullRom,
            ResampleFilter::Gaussian => FilterType::Gaussian,
            ResampleFilter::Lanczos3 => FilterType::Lanczos3,
        }
    }
}

/// Configuration owned by a processor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProcessorConfig {
    /// Color transparent regions are flattened onto
    #[serde(default = "default_background")]
    pub background: [u8; 3],

    /// Resampling filter
    #[serde(default)]
    pub filter: ResampleFilter,

    /// Default save quality (0-100)
    #[serde(default = "default_quality")]
    pub quality: u8,

    /// Whether JPEG saves create missing output directories by default
    #[serde(default = "default_true")]
    pub create_dirs: bool,
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        Self {
            background: default_background(),
            filter: ResampleFilter::default(),
            quality: default_quality(),
            create_dirs: true,
        }
    }
}

fn default_background() -> [u8; 3] {
    WHITE
}

fn default_quality() -> u8 {
    85
}

fn default_true() -> bool {
    true
}

impl ProcessorConfig {
    /// Load configuration from an explicit path, a well-known file in the
    /// working directory, or defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path.map(Path::to_path_buf).or_else(find_config_file) {
            Some(p) => Self::from_file(&p),
            None => Ok(Self::default()),
        }
    }

    /// Load and parse a TOML configuration file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ScaleCraftError::Config(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;

        Self::from_toml_str(&content).map_err(|e| match e {
            ScaleCraftError::Config(msg) => {
                ScaleCraftError::Config(format!("{}: {}", path.display(), msg))
            }
            other => other,
        })
    }

    /// Parse configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ScaleCraftError::Config(format!("Failed to parse config: {}", e)))?;
        validate_quality(config.quality)
            .map_err(|e| ScaleCraftError::Config(e.to_string()))?;
        Ok(config)
    }

    /// Builder-style override of the background color.
    pub fn with_background(mut self, background: [u8; 3]) -> Self {
        self.background = background;
        self
    }

    /// Builder-style override of the resampling filter.
    pub fn with_filter(mut self, filter: ResampleFilter) -> Self {
        self.filter = filter;
        self
    }
}

/// Find configuration file in standard locations
fn find_config_file() -> Option<PathBuf> {
    let candidates = [
        ".scalecraft.toml",
        "scalecraft.toml",
        ".config/scalecraft.toml",
    ];

    candidates
        .into_iter()
        .map(PathBuf::from)
        .find(|candidate| candidate.exists())
}
