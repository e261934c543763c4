//! Alpha channel flattening.

use image::{DynamicImage, Rgb, RgbImage, Rgba};

/// Background used when no configuration overrides it.
pub const WHITE: [u8; 3] = [255, 255, 255];

/// Check if an image carries an alpha channel (RGBA or luma-alpha, any depth).
pub fn has_alpha_channel(img: &DynamicImage) -> bool {
    img.color().has_alpha()
}

/// Composite an image over a solid background and drop the alpha channel.
///
/// Images without alpha are converted to 8-bit RGB unchanged. Palette and
/// grayscale sources end up as RGB as well, so the result is always opaque.
pub fn flatten_alpha(img: &DynamicImage, background: [u8; 3]) -> RgbImage {
    if !has_alpha_channel(img) {
        return img.to_rgb8();
    }

    let rgba = img.to_rgba8();
    let mut output = RgbImage::new(rgba.width(), rgba.height());

    for (x, y, pixel) in rgba.enumerate_pixels() {
        let Rgba([r, g, b, a]) = *pixel;
        output.put_pixel(
            x,
            y,
            Rgb([
                blend(r, background[0], a),
                blend(g, background[1], a),
                blend(b, background[2], a),
            ]),
        );
    }

    output
}

/// `round((src * a + bg * (255 - a)) / 255)` in integer arithmetic.
#[inline]
fn blend(src: u8, bg: u8, alpha: u8) -> u8 {
    let a = u16::from(alpha);
    let mixed = u16::from(src) * a + u16::from(bg) * (255 - a);
    ((mixed + 127) / 255) as u8
}
