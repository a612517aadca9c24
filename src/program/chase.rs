use super::fade::fade_cells;
use super::{ARGUMENT_SLOT, ParamPatch, Params, Program, ProgramContext, ProgramOutcome};
use crate::math8::clamp_u8;

/// Trail decay used when none is configured
const DEFAULT_TRAIL_FADE: i32 = 35;

/// Single lit cell running over a decaying trail
///
/// Params: 0 - chase speed, 1 - trail fade amount.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChaseProgram;

impl Program for ChaseProgram {
    #[allow(clippy::cast_possible_truncation)]
    fn render(&self, ctx: &mut ProgramContext<'_>, arg: i32) -> ProgramOutcome {
        if ctx.cells.is_empty() {
            return ProgramOutcome::Running;
        }

        fade_cells(&mut ctx.cells, clamp_u8(arg));
        let head = ctx.tick as usize % ctx.cells.len();
        ctx.cells.set(head, *ctx.color);

        ProgramOutcome::Running
    }

    fn on_activate(&self, params: &Params) -> ParamPatch {
        if params.argument() == 0 {
            ParamPatch::NONE.with(ARGUMENT_SLOT, DEFAULT_TRAIL_FADE)
        } else {
            ParamPatch::NONE
        }
    }
}
