//! Output filter applied on the way to the LED driver
//!
//! Programs read their own cells back on the next tick (fades, trails), so
//! the framebuffer must hold unscaled colors. The filter therefore writes
//! into a separate output buffer instead of modifying the frame in place.

use crate::color::{Rgb, WHITE};
use crate::math8::scale8;

/// Global brightness scale used by default (about 50%)
pub const DEFAULT_BRIGHTNESS_SCALE: u8 = 128;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputFilterConfig {
    /// Global brightness scale (0-255 = 0.0-1.0)
    pub brightness: u8,
    /// Per-channel correction factors (0-255 = 0%-100%)
    pub color_correction: Rgb,
}

impl Default for OutputFilterConfig {
    fn default() -> Self {
        Self {
            brightness: DEFAULT_BRIGHTNESS_SCALE,
            color_correction: WHITE,
        }
    }
}

/// Brightness scaling and color correction
#[derive(Debug, Clone, Copy)]
pub struct OutputFilter {
    brightness: u8,
    correction: Rgb,
}

impl OutputFilter {
    pub const fn new(config: &OutputFilterConfig) -> Self {
        Self {
            brightness: config.brightness,
            correction: config.color_correction,
        }
    }

    pub fn set_brightness(&mut self, brightness: u8) {
        self.brightness = brightness;
    }

    pub fn set_color_correction(&mut self, correction: Rgb) {
        self.correction = correction;
    }

    const fn is_identity(&self) -> bool {
        self.brightness == 255
            && self.correction.r == 255
            && self.correction.g == 255
            && self.correction.b == 255
    }

    /// Write the filtered `frame` into `output`
    pub fn apply(&self, frame: &[Rgb], output: &mut [Rgb]) {
        if self.is_identity() {
            for (out, pixel) in output.iter_mut().zip(frame) {
                *out = *pixel;
            }
            return;
        }

        for (out, pixel) in output.iter_mut().zip(frame) {
            *out = Rgb {
                r: scale8(scale8(pixel.r, self.correction.r), self.brightness),
                g: scale8(scale8(pixel.g, self.correction.g), self.brightness),
                b: scale8(scale8(pixel.b, self.correction.b), self.brightness),
            };
        }
    }
}

impl Default for OutputFilter {
    fn default() -> Self {
        Self::new(&OutputFilterConfig::default())
    }
}
