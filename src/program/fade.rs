//! Fade programs
//!
//! - `fade`: decays every cell toward black and stays there.
//! - `fade_in`: blends every cell toward the target color, then hands over
//!   to `solid`.
//! - `fade_out` / `long_fade`: decay toward black and switch the light off
//!   once every cell is dark.

use super::{Program, ProgramContext, ProgramId, ProgramOutcome};
use crate::bounds::CellView;
use crate::color::{blend_toward, fade_to_black_by, is_black};
use crate::math8::clamp_u8;

/// Decay every cell toward black by `amount`
pub fn fade_cells(cells: &mut CellView<'_>, amount: u8) {
    cells.map(|cell| fade_to_black_by(cell, amount));
}

/// Decays all cells by the program argument
#[derive(Debug, Clone, Copy, Default)]
pub struct FadeProgram;

impl Program for FadeProgram {
    fn render(&self, ctx: &mut ProgramContext<'_>, arg: i32) -> ProgramOutcome {
        fade_cells(&mut ctx.cells, clamp_u8(arg));
        ProgramOutcome::Running
    }
}

/// Cross-fades all cells into the target color
#[derive(Debug, Clone, Copy, Default)]
pub struct FadeInProgram;

impl Program for FadeInProgram {
    fn render(&self, ctx: &mut ProgramContext<'_>, arg: i32) -> ProgramOutcome {
        let target = *ctx.color;
        let amount = clamp_u8(arg);
        ctx.cells.map(|cell| blend_toward(cell, target, amount));

        if ctx.cells.all(|cell| *cell == target) {
            ProgramOutcome::SwitchTo(ProgramId::Solid)
        } else {
            ProgramOutcome::Running
        }
    }
}

/// Fades all cells to black, then powers the light off
#[derive(Debug, Clone, Copy)]
pub struct FadeOutProgram {
    /// Fade only on every n-th tick
    every: u32,
    /// Fixed decay amount, the program argument is used when `None`
    amount: Option<u8>,
}

impl FadeOutProgram {
    pub const fn new(every: u32, amount: Option<u8>) -> Self {
        Self { every, amount }
    }
}

impl Program for FadeOutProgram {
    fn render(&self, ctx: &mut ProgramContext<'_>, arg: i32) -> ProgramOutcome {
        if ctx.tick % self.every.max(1) != 0 {
            return ProgramOutcome::Running;
        }

        let amount = self.amount.unwrap_or_else(|| clamp_u8(arg));
        fade_cells(&mut ctx.cells, amount);

        if ctx.cells.all(|cell| is_black(*cell)) {
            ProgramOutcome::PowerOff
        } else {
            ProgramOutcome::Running
        }
    }
}
