//! scalecraft: flatten, auto-orient, scale and re-encode images.

mod report;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use scalecraft::{inspect, OutputFormat, ProcessorConfig, ScaleCraft};
use std::collections::HashMap;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;
use tracing_subscriber::EnvFilter;
use walkdir::WalkDir;

/// Extensions picked up when walking a directory.
const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp"];

#[derive(Parser)]
#[command(name = "scalecraft")]
#[command(about = "Flatten, auto-orient, scale and re-encode images")]
#[command(version)]
struct Cli {
    /// TOML config file (defaults to ./.scalecraft.toml if present)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Multiply image dimensions by a factor
    Scale {
        /// Image file or directory of images
        input: PathBuf,
        /// Scale factor (e.g. 0.5 halves both sides)
        #[arg(short = 's', long, allow_negative_numbers = true)]
        factor: f64,
        #[command(flatten)]
        save: SaveArgs,
    },
    /// Shrink images to fit within a bounding box
    Fit {
        /// Image file or directory of images
        input: PathBuf,
        /// Maximum width in pixels
        #[arg(long = "max-width", short = 'W')]
        max_width: u32,
        /// Maximum height in pixels
        #[arg(long = "max-height", short = 'H')]
        max_height: u32,
        #[command(flatten)]
        save: SaveArgs,
    },
    /// Show source image information
    Info {
        /// Path to image file
        input: PathBuf,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args, Clone)]
struct SaveArgs {
    /// Output directory
    #[arg(short, long, default_value = "out")]
    out: PathBuf,
    /// Quality 0-100 (defaults to the configured quality)
    #[arg(short, long, value_parser = clap::value_parser!(u8).range(0..=100))]
    quality: Option<u8>,
    /// Output format: jpeg or png
    #[arg(short, long, default_value = "jpeg")]
    format: OutputFormat,
    /// Fail instead of creating a missing output directory
    #[arg(long)]
    no_create_dir: bool,
}

#[derive(Clone, Copy)]
enum Transform {
    Scale(f64),
    Fit(u32, u32),
}

struct Job {
    transform: Transform,
    format: OutputFormat,
    quality: u8,
    out: PathBuf,
    create_dir: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(code) => code,
        Err(err) => {
            report::failed("error", format!("{err:#}"));
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "scalecraft=debug" } else { "scalecraft=info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}

fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let config = ProcessorConfig::load(cli.config.as_deref()).context("Failed to load config")?;
    tracing::debug!(?config, "Loaded configuration");

    match cli.command {
        Commands::Scale { input, factor, save } => {
            let job = Job::new(Transform::Scale(factor), save, &config);
            process(&input, &config, &job)
        }
        Commands::Fit {
            input,
            max_width,
            max_height,
            save,
        } => {
            let job = Job::new(Transform::Fit(max_width, max_height), save, &config);
            process(&input, &config, &job)
        }
        Commands::Info { input, json } => {
            let info = inspect(&input)
                .with_context(|| format!("Failed to inspect {}", input.display()))?;
            if json {
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                let (width, height) = info.oriented_dimensions();
                report::title(&input);
                println!("Format: {}", info.format);
                println!("Stored: {}x{}", info.width, info.height);
                println!("Upright: {}x{}", width, height);
                println!("Orientation: {:?} ({})", info.orientation, info.orientation.to_exif());
                println!("Alpha: {}", if info.has_alpha { "yes" } else { "no" });
                println!("Aspect Ratio: {:.2}", info.aspect_ratio());
                println!("Size: {}", report::human_size(info.size_bytes as u64));
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}

impl Job {
    fn new(transform: Transform, save: SaveArgs, config: &ProcessorConfig) -> Self {
        Self {
            transform,
            format: save.format,
            quality: save.quality.unwrap_or(config.quality),
            out: save.out,
            create_dir: config.create_dirs && !save.no_create_dir,
        }
    }

    fn run(&self, path: &Path, config: &ProcessorConfig) -> scalecraft::Result<PathBuf> {
        let processor = ScaleCraft::open_with_config(path, config.clone())?;
        let processor = match self.transform {
            Transform::Scale(factor) => processor.scale(factor)?,
            Transform::Fit(max_width, max_height) => processor.resize(max_width, max_height)?,
        };

        match self.format {
            OutputFormat::Jpeg => processor.save_jpeg(self.quality, &self.out, self.create_dir),
            format => processor.save_as(format, self.quality, &self.out, self.create_dir),
        }
    }
}

fn process(input: &Path, config: &ProcessorConfig, job: &Job) -> anyhow::Result<ExitCode> {
    if input.is_file() {
        let written = job
            .run(input, config)
            .with_context(|| format!("Failed to process {}", input.display()))?;
        report::saved(input, &written);
        return Ok(ExitCode::SUCCESS);
    }

    if !input.is_dir() {
        anyhow::bail!("Input does not exist: {}", input.display());
    }

    let entries = collect_images(input);
    if entries.is_empty() {
        report::note(&format!("No images found in {}", input.display()));
        return Ok(ExitCode::SUCCESS);
    }

    let (entries, collisions) = split_collisions(entries);

    let started = Instant::now();
    let pb = ProgressBar::new(entries.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")?
            .progress_chars("#>-"),
    );

    let mut failures: Vec<(PathBuf, String)> = entries
        .par_iter()
        .filter_map(|path| {
            let result = job.run(path, config);
            pb.inc(1);
            result.err().map(|e| (path.clone(), e.to_string()))
        })
        .collect();
    pb.finish_and_clear();
    let succeeded = entries.len() - failures.len();
    failures.extend(collisions);

    for (path, err) in &failures {
        report::failed(path.display(), err);
    }

    report::batch_summary(succeeded, failures.len(), &job.out, started.elapsed());

    if failures.is_empty() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}

/// Keep the first input (in sorted order) for each output stem; every later
/// input with the same stem would overwrite it and is reported instead.
fn split_collisions(entries: Vec<PathBuf>) -> (Vec<PathBuf>, Vec<(PathBuf, String)>) {
    let mut claimed: HashMap<OsString, PathBuf> = HashMap::new();
    let mut unique = Vec::with_capacity(entries.len());
    let mut collisions = Vec::new();

    for path in entries {
        let stem = path.file_stem().map(OsString::from).unwrap_or_default();
        match claimed.get(&stem) {
            Some(first) => {
                let reason = format!("same output name as {}, skipped", first.display());
                collisions.push((path, reason));
            }
            None => {
                claimed.insert(stem, path.clone());
                unique.push(path);
            }
        }
    }

    (unique, collisions)
}

fn collect_images(dir: &Path) -> Vec<PathBuf> {
    let mut entries: Vec<PathBuf> = WalkDir::new(dir)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .filter(|p| has_image_extension(p))
        .collect();
    entries.sort();
    entries
}

fn has_image_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| IMAGE_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}
