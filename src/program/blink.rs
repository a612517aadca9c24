use super::fade::fade_cells;
use super::{Program, ProgramContext, ProgramOutcome};

/// Background decay applied on every tick
const BLINK_FADE: u8 = 25;

/// Flash period used when the argument is not positive
const DEFAULT_BLINK_PERIOD: u32 = 25;

/// Periodic full flash against a fading background
#[derive(Debug, Clone, Copy, Default)]
pub struct BlinkProgram;

impl Program for BlinkProgram {
    #[allow(clippy::cast_sign_loss)]
    fn render(&self, ctx: &mut ProgramContext<'_>, arg: i32) -> ProgramOutcome {
        fade_cells(&mut ctx.cells, BLINK_FADE);

        let period = if arg > 0 {
            arg as u32
        } else {
            DEFAULT_BLINK_PERIOD
        };
        if ctx.tick % period == 0 {
            ctx.cells.fill(*ctx.color);
        }

        ProgramOutcome::Running
    }
}
