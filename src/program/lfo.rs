use core::f64::consts::PI;

use super::{Program, ProgramContext, ProgramOutcome};
use crate::color::{rgb_from_u32, rgb_to_u32};

/// Sine driven modulation of the packed color value
///
/// The divisor is `round((sin(tick°) + 0.5) * 255)`, which crosses zero
/// around 210° and 330°. Ticks where it is zero leave the cells untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct LfoProgram;

impl LfoProgram {
    /// Divisor for the given tick
    #[allow(clippy::cast_possible_truncation)]
    pub fn divisor(tick: u32) -> i32 {
        let radians = f64::from(tick) * PI / 180.0;
        libm::round((libm::sin(radians) + 0.5) * 255.0) as i32
    }
}

impl Program for LfoProgram {
    #[allow(clippy::cast_possible_wrap, clippy::cast_sign_loss)]
    fn render(&self, ctx: &mut ProgramContext<'_>, _arg: i32) -> ProgramOutcome {
        let packed = rgb_to_u32(*ctx.color) as i32;
        if let Some(value) = packed.checked_rem(Self::divisor(ctx.tick)) {
            ctx.cells.fill(rgb_from_u32(value as u32));
        }
        ProgramOutcome::Running
    }
}
