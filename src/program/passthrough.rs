use super::{Program, ProgramContext, ProgramOutcome};

/// Copies the external feed region into the light's cells
///
/// Logical cell `i` receives feed pixel `i`, so reversed lights mirror the
/// feed the same way they mirror every other program.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassThroughProgram;

impl Program for PassThroughProgram {
    fn render(&self, ctx: &mut ProgramContext<'_>, _arg: i32) -> ProgramOutcome {
        let feed = ctx.feed;
        for (index, pixel) in feed.iter().enumerate().take(ctx.cells.len()) {
            ctx.cells.set(index, *pixel);
        }
        ProgramOutcome::Running
    }
}
