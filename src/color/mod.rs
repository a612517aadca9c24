mod blend;
mod kelvin;
mod utils;

use smart_leds::RGB8;
use smart_leds::hsv::Hsv as HSV;

pub use blend::{add_color, blend_toward, blend_u8_toward, fade_to_black_by};
pub use kelvin::kelvin_to_rgb;
pub use utils::{hsv2rgb, is_black, rgb2hsv_approximate, rgb_from_u32, rgb_to_u32};

pub type Rgb = RGB8;
pub type Hsv = HSV;

/// All channels off
pub const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };

/// All channels at full scale
pub const WHITE: Rgb = Rgb {
    r: 255,
    g: 255,
    b: 255,
};
