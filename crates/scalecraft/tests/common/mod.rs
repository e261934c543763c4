//! Fixture helpers shared by the integration tests.

#![allow(dead_code)]

use image::{DynamicImage, Rgb, RgbImage, Rgba, RgbaImage};
use scalecraft::output::{encode, OutputFormat};
use std::path::{Path, PathBuf};

/// An RGB image where every pixel encodes its own coordinates.
pub fn gradient(width: u32, height: u32) -> DynamicImage {
    let mut img = RgbImage::new(width, height);
    for (x, y, p) in img.enumerate_pixels_mut() {
        *p = Rgb([(x * 255 / width.max(1)) as u8, (y * 255 / height.max(1)) as u8, 64]);
    }
    DynamicImage::ImageRgb8(img)
}

/// Left half opaque red, right half fully transparent.
pub fn half_transparent(width: u32, height: u32) -> DynamicImage {
    let mut img = RgbaImage::new(width, height);
    for (x, _, p) in img.enumerate_pixels_mut() {
        *p = if x < width / 2 {
            Rgba([255, 0, 0, 255])
        } else {
            Rgba([0, 0, 255, 0])
        };
    }
    DynamicImage::ImageRgba8(img)
}

/// Write `img` as PNG at `dir/name`.
pub fn write_png(dir: &Path, name: &str, img: &DynamicImage) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, encode(img, OutputFormat::Png, 0).unwrap()).unwrap();
    path
}

/// JPEG bytes for `img` carrying an EXIF orientation tag.
pub fn jpeg_with_orientation(img: &DynamicImage, orientation: u16) -> Vec<u8> {
    let jpeg = encode(img, OutputFormat::Jpeg, 95).unwrap();
    assert_eq!(&jpeg[..2], &[0xFF, 0xD8]);

    // Big-endian TIFF with a single IFD0 entry: 0x0112 SHORT x1
    let mut tiff = Vec::new();
    tiff.extend_from_slice(b"MM\x00\x2A");
    tiff.extend_from_slice(&8u32.to_be_bytes());
    tiff.extend_from_slice(&1u16.to_be_bytes());
    tiff.extend_from_slice(&0x0112u16.to_be_bytes());
    tiff.extend_from_slice(&3u16.to_be_bytes());
    tiff.extend_from_slice(&1u32.to_be_bytes());
    tiff.extend_from_slice(&orientation.to_be_bytes());
    tiff.extend_from_slice(&[0, 0]);
    tiff.extend_from_slice(&0u32.to_be_bytes());

    let mut payload = b"Exif\x00\x00".to_vec();
    payload.extend_from_slice(&tiff);
    let segment_len = (payload.len() + 2) as u16;

    let mut out = Vec::with_capacity(jpeg.len() + payload.len() + 4);
    out.extend_from_slice(&jpeg[..2]);
    out.extend_from_slice(&[0xFF, 0xE1]);
    out.extend_from_slice(&segment_len.to_be_bytes());
    out.extend_from_slice(&payload);
    out.extend_from_slice(&jpeg[2..]);
    out
}

/// Write an oriented JPEG at `dir/name`, returning its path and bytes.
pub fn write_oriented_jpeg(
    dir: &Path,
    name: &str,
    img: &DynamicImage,
    orientation: u16,
) -> (PathBuf, Vec<u8>) {
    let path = dir.join(name);
    let bytes = jpeg_with_orientation(img, orientation);
    std::fs::write(&path, &bytes).unwrap();
    (path, bytes)
}
