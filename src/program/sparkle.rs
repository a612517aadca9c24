//! Flicker programs (`warm`, `xmas`)
//!
//! Every few ticks a random cell is picked and the light's color is nudged
//! in hue with a random saturation. Each tick the color is added onto the
//! picked cell, while the whole strip slowly decays.

use super::fade::fade_cells;
use super::{ParamPatch, Params, Program, ProgramContext, ProgramOutcome};
use crate::color::{add_color, hsv2rgb, rgb2hsv_approximate};
use crate::math8::clamp_u8;

const FADE_EVERY: u32 = 7;
const PERTURB_EVERY: u32 = 11;

/// Maximum hue jitter in either direction
const HUE_JITTER: i32 = 5;

/// Lower bound of the randomized saturation
const MIN_SATURATION: u8 = 128;

/// Value written to slot 0 on selection
const ACTIVATE_SLOT0: i32 = 50;

#[derive(Debug, Clone, Copy)]
pub struct SparkleProgram {
    /// Decay applied every `FADE_EVERY` ticks
    fade_amount: u8,
}

impl SparkleProgram {
    pub const fn new(fade_amount: u8) -> Self {
        Self { fade_amount }
    }
}

impl Program for SparkleProgram {
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_possible_wrap,
        clippy::cast_sign_loss
    )]
    fn render(&self, ctx: &mut ProgramContext<'_>, arg: i32) -> ProgramOutcome {
        if ctx.cells.is_empty() {
            return ProgramOutcome::Running;
        }

        if ctx.tick % FADE_EVERY == 0 {
            fade_cells(&mut ctx.cells, self.fade_amount);
        }

        if ctx.tick % PERTURB_EVERY == 0 {
            *ctx.cursor = ctx.rng.below(ctx.cells.len() as u32) as usize;

            let mut hsv = rgb2hsv_approximate(*ctx.color);
            let jitter = ctx.rng.below(2 * HUE_JITTER as u32 + 1) as i32 - HUE_JITTER;
            hsv.hue = hsv.hue.wrapping_add_signed(jitter as i8);
            hsv.sat = MIN_SATURATION + ctx.rng.below(u32::from(MIN_SATURATION)) as u8;
            hsv.val &= clamp_u8(arg);
            *ctx.color = hsv2rgb(hsv);
        }

        let color = *ctx.color;
        ctx.cells.update(*ctx.cursor, |cell| add_color(cell, color));

        ProgramOutcome::Running
    }

    fn on_activate(&self, _params: &Params) -> ParamPatch {
        ParamPatch::NONE.with(0, ACTIVATE_SLOT0)
    }
}
