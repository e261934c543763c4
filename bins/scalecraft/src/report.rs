//! Terminal reporting for processed images.

use owo_colors::OwoColorize;
use std::fmt::Display;
use std::path::Path;
use std::time::Duration;

/// One input written to its destination.
pub fn saved(input: &Path, written: &Path) {
    println!("{} {} -> {}", "✓".green(), input.display(), written.display());
}

/// One input (or the whole run) that failed.
pub fn failed(subject: impl Display, err: impl Display) {
    eprintln!("{} {}: {}", "✗".red(), subject, err);
}

/// Informational line that is neither success nor failure.
pub fn note(message: &str) {
    println!("{} {}", "ℹ".blue(), message);
}

/// Title line for `info` output.
pub fn title(input: &Path) {
    println!("{}", input.display().bold());
}

/// Closing lines of a directory run.
pub fn batch_summary(succeeded: usize, failures: usize, out: &Path, elapsed: Duration) {
    println!(
        "{} Processed {} into {} in {:.1}s",
        "✓".green(),
        images(succeeded),
        out.display(),
        elapsed.as_secs_f32()
    );
    if failures > 0 {
        eprintln!("{} {} failed", "✗".red(), images(failures));
    }
}

/// `1 image`, `3 images`.
pub fn images(count: usize) -> String {
    match count {
        1 => "1 image".to_string(),
        n => format!("{n} images"),
    }
}

/// Byte count with a binary unit, e.g. `2.0 KiB`.
pub fn human_size(bytes: u64) -> String {
    match bytes {
        b if b >= 1 << 20 => format!("{:.1} MiB", b as f64 / f64::from(1u32 << 20)),
        b if b >= 1 << 10 => format!("{:.1} KiB", b as f64 / 1024.0),
        b => format!("{b} B"),
    }
}
