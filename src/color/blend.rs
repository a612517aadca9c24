//! Directional blending primitives used by the fade programs
//!
//! Every step is computed with [`scale8_video`], so a non-zero amount always
//! moves a channel by at least one unit and never past its target.

use crate::color::Rgb;
use crate::math8::{qadd8, scale8_video};

/// Move one channel toward `target` by `amount`/255 of the remaining distance
#[inline]
pub fn blend_u8_toward(current: u8, target: u8, amount: u8) -> u8 {
    if current == target {
        return current;
    }
    if current < target {
        current + scale8_video(target - current, amount)
    } else {
        current - scale8_video(current - target, amount)
    }
}

/// Blend a color toward a target color channel by channel
///
/// Converges to exactly `target` for any `amount > 0`.
#[inline]
pub fn blend_toward(current: Rgb, target: Rgb, amount: u8) -> Rgb {
    Rgb {
        r: blend_u8_toward(current.r, target.r, amount),
        g: blend_u8_toward(current.g, target.g, amount),
        b: blend_u8_toward(current.b, target.b, amount),
    }
}

/// Decay a color toward black by `amount`/255 of each channel
#[inline]
pub fn fade_to_black_by(color: Rgb, amount: u8) -> Rgb {
    Rgb {
        r: color.r - scale8_video(color.r, amount),
        g: color.g - scale8_video(color.g, amount),
        b: color.b - scale8_video(color.b, amount),
    }
}

/// Saturating per-channel addition
#[inline]
pub fn add_color(a: Rgb, b: Rgb) -> Rgb {
    Rgb {
        r: qadd8(a.r, b.r),
        g: qadd8(a.g, b.g),
        b: qadd8(a.b, b.b),
    }
}
