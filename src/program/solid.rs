//! Solid fill program
//!
//! Paints every cell with the light's color on every tick.

use super::{Program, ProgramContext, ProgramOutcome};

/// Fills all cells with the target color
#[derive(Debug, Clone, Copy, Default)]
pub struct SolidProgram;

impl Program for SolidProgram {
    fn render(&self, ctx: &mut ProgramContext<'_>, _arg: i32) -> ProgramOutcome {
        ctx.cells.fill(*ctx.color);
        ProgramOutcome::Running
    }
}
