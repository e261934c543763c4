//! Open, flatten, auto-orient, scale and save images.
//!
//! This crate provides:
//! - A chainable processor ([`ScaleCraft`]) for scale/resize/save
//! - Alpha flattening onto a solid background
//! - EXIF orientation correction
//! - Source inspection
//! - TOML-backed processor configuration

#![warn(missing_docs)]

mod alpha;
pub mod config;
mod error;
pub mod geometry;
mod metadata;
pub mod orientation;
pub mod output;
mod processor;

pub use alpha::{flatten_alpha, has_alpha_channel, WHITE};
pub use config::{ProcessorConfig, ResampleFilter};
pub use error::{Result, ScaleCraftError};
pub use metadata::{inspect, inspect_bytes, SourceInfo};
pub use orientation::{read_orientation, Orientation};
pub use output::OutputFormat;
pub use processor::ScaleCraft;
