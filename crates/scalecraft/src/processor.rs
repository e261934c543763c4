//! The chainable image processor.

use crate::alpha::flatten_alpha;
use crate::config::ProcessorConfig;
use crate::error::{Result, ScaleCraftError};
use crate::geometry::{fit_dimensions, scaled_dimensions};
use crate::orientation::read_orientation;
use crate::output::{encode, validate_quality, write_bytes, OutputFormat};
use image::{DynamicImage, GenericImageView};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// An opened, flattened and upright image plus the name it will be saved under.
///
/// Transforms consume the processor and hand it back, so each step fully
/// applies before the next one starts:
///
/// ```no_run
/// use scalecraft::ScaleCraft;
///
/// # fn main() -> scalecraft::Result<()> {
/// let written = ScaleCraft::open("logo.png")?
///     .scale(0.5)?
///     .save_jpeg(85, "./out/", true)?;
/// assert_eq!(written, std::path::Path::new("./out/logo.jpg"));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ScaleCraft {
    image: DynamicImage,
    filename: String,
    config: ProcessorConfig,
}

impl ScaleCraft {
    /// Open an image with the default configuration.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::open_with_config(path, ProcessorConfig::default())
    }

    /// Open an image, flatten transparency onto the configured background
    /// and apply its EXIF orientation.
    pub fn open_with_config(path: impl AsRef<Path>, config: ProcessorConfig) -> Result<Self> {
        let path = path.as_ref();
        let data = std::fs::read(path)
            .map_err(|e| ScaleCraftError::decode(path, image::ImageError::IoError(e)))?;
        let decoded =
            image::load_from_memory(&data).map_err(|e| ScaleCraftError::decode(path, e))?;

        let orientation = read_orientation(&data);
        debug!(
            path = %path.display(),
            width = decoded.width(),
            height = decoded.height(),
            color = ?decoded.color(),
            ?orientation,
            "Decoded image"
        );

        let mut processor = Self::from_image(decoded, stem_of(path), config);
        processor.image = orientation.apply(processor.image);
        Ok(processor)
    }

    /// Wrap an already decoded image. Transparency is flattened; no
    /// orientation is applied since there is no metadata to read.
    pub fn from_image(
        image: DynamicImage,
        filename: impl Into<String>,
        config: ProcessorConfig,
    ) -> Self {
        let flattened = flatten_alpha(&image, config.background);
        Self {
            image: DynamicImage::ImageRgb8(flattened),
            filename: filename.into(),
            config,
        }
    }

    /// Base name (without extension) used for saved files.
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Current `(width, height)`.
    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    /// Current width.
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    /// Current height.
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Borrow the current image buffer.
    pub fn image(&self) -> &DynamicImage {
        &self.image
    }

    /// Take the current image buffer.
    pub fn into_image(self) -> DynamicImage {
        self.image
    }

    /// Configuration this processor was built with.
    pub fn config(&self) -> &ProcessorConfig {
        &self.config
    }

    /// Multiply both dimensions by `factor` (floored).
    ///
    /// # Errors
    /// `InvalidArgument` if `factor` is not a positive finite number or the
    /// result would have a zero dimension.
    pub fn scale(mut self, factor: f64) -> Result<Self> {
        let (width, height) = self.dimensions();
        let (new_width, new_height) = scaled_dimensions(width, height, factor)?;

        debug!(factor, from = ?(width, height), to = ?(new_width, new_height), "Scaling image");
        self.image = self
            .image
            .resize_exact(new_width, new_height, self.config.filter.into());
        Ok(self)
    }

    /// Shrink to fit within `max_width` x `max_height`, keeping the aspect
    /// ratio. Images that already fit are left untouched.
    ///
    /// # Errors
    /// `InvalidArgument` if the bounds would produce an empty image.
    pub fn resize(mut self, max_width: u32, max_height: u32) -> Result<Self> {
        let (width, height) = self.dimensions();

        match fit_dimensions(width, height, max_width, max_height)? {
            None => {
                info!(width, height, max_width, max_height, "No need to resize");
            }
            Some((new_width, new_height)) => {
                debug!(from = ?(width, height), to = ?(new_width, new_height), "Resizing image");
                self.image = self
                    .image
                    .resize_exact(new_width, new_height, self.config.filter.into());
            }
        }

        Ok(self)
    }

    /// Save as `<output_dir>/<filename>.jpg`, creating the directory first
    /// when `create_dir` is set. Returns the path written.
    ///
    /// # Errors
    /// `InvalidArgument` for quality above 100 (nothing is touched on disk),
    /// `Write` if the directory or file cannot be written.
    pub fn save_jpeg(
        &self,
        quality: u8,
        output_dir: impl AsRef<Path>,
        create_dir: bool,
    ) -> Result<PathBuf> {
        self.write_as(OutputFormat::Jpeg, quality, output_dir.as_ref(), create_dir)
    }

    /// Save as `<output_dir>/<filename>.jpg` without creating directories,
    /// with the encoder picked from the destination extension.
    pub fn save(&self, quality: u8, output_dir: impl AsRef<Path>) -> Result<PathBuf> {
        validate_quality(quality)?;
        let path = self.destination(output_dir.as_ref(), OutputFormat::Jpeg);
        let format = OutputFormat::from_path(&path).unwrap_or_default();
        self.write_to_path(&path, format, quality, false)
    }

    /// Save as `<output_dir>/<filename>.png` without creating directories.
    ///
    /// `quality` is range-checked like the JPEG variants but has no effect on
    /// the lossless PNG output.
    pub fn save_png(&self, quality: u8, output_dir: impl AsRef<Path>) -> Result<PathBuf> {
        self.write_as(OutputFormat::Png, quality, output_dir.as_ref(), false)
    }

    /// Save in `format` under `output_dir`.
    pub fn save_as(
        &self,
        format: OutputFormat,
        quality: u8,
        output_dir: impl AsRef<Path>,
        create_dir: bool,
    ) -> Result<PathBuf> {
        self.write_as(format, quality, output_dir.as_ref(), create_dir)
    }

    fn write_as(
        &self,
        format: OutputFormat,
        quality: u8,
        output_dir: &Path,
        create_dir: bool,
    ) -> Result<PathBuf> {
        validate_quality(quality)?;
        let path = self.destination(output_dir, format);
        self.write_to_path(&path, format, quality, create_dir)
    }

    fn write_to_path(
        &self,
        path: &Path,
        format: OutputFormat,
        quality: u8,
        create_dir: bool,
    ) -> Result<PathBuf> {
        if format == OutputFormat::Png {
            debug!(quality, "PNG output ignores quality");
        }

        let bytes = encode(&self.image, format, quality)?;
        write_bytes(path, &bytes, create_dir)?;

        debug!(
            path = %path.display(),
            format = format.mime_type(),
            size = bytes.len(),
            "Saved image"
        );
        Ok(path.to_path_buf())
    }

    fn destination(&self, output_dir: &Path, format: OutputFormat) -> PathBuf {
        output_dir.join(format!("{}.{}", self.filename, format.extension()))
    }
}

/// File name with the last extension removed.
fn stem_of(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}
