pub use smart_leds::hsv::hsv2rgb;

use crate::color::{Hsv, Rgb};

/// Create an RGB color from a u32 value (0xRRGGBB format)
#[allow(clippy::cast_possible_truncation)]
pub const fn rgb_from_u32(color: u32) -> Rgb {
    Rgb {
        r: ((color >> 16) & 0xFF) as u8,
        g: ((color >> 8) & 0xFF) as u8,
        b: (color & 0xFF) as u8,
    }
}

/// Pack an RGB color into a u32 value (0xRRGGBB format)
pub const fn rgb_to_u32(color: Rgb) -> u32 {
    ((color.r as u32) << 16) | ((color.g as u32) << 8) | color.b as u32
}

/// Check whether every channel is zero
#[inline]
pub const fn is_black(color: Rgb) -> bool {
    color.r == 0 && color.g == 0 && color.b == 0
}

/// Approximate RGB to HSV conversion (all channels are 0-255)
///
/// Hue is represented on a 0-255 circle with red at 0, green at 85 and blue
/// at 171, matching [`hsv2rgb`]. The conversion is integer-only and lossy:
/// converting back with [`hsv2rgb`] lands within a few units of the input.
#[allow(
    clippy::cast_lossless,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
pub fn rgb2hsv_approximate(rgb: Rgb) -> Hsv {
    let Rgb { r, g, b } = rgb;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    let sat = if max == 0 {
        0
    } else {
        ((u16::from(delta) * 255) / u16::from(max)) as u8
    };

    let hue = if delta == 0 {
        0
    } else {
        let (base, a, b) = if max == r {
            (0i16, g, b)
        } else if max == g {
            (85i16, b, r)
        } else {
            (171i16, r, g)
        };
        let h = base + (43i16 * (i16::from(a) - i16::from(b))) / i16::from(delta);
        h.rem_euclid(256) as u8
    };

    Hsv {
        hue,
        sat,
        val: max,
    }
}
