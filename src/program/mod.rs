//! Program system with compile-time known program variants
//!
//! A program is re-evaluated once per tick against the cells of one light.
//! The active program is a plain [`ProgramId`] tag; dispatch is a `match`
//! over the fixed set of implementations, each implementing [`Program`].

mod blink;
mod chase;
mod fade;
mod lfo;
mod passthrough;
mod solid;
mod sparkle;

pub use blink::BlinkProgram;
pub use chase::ChaseProgram;
pub use fade::{FadeInProgram, FadeOutProgram, FadeProgram, fade_cells};
pub use lfo::LfoProgram;
pub use passthrough::PassThroughProgram;
pub use solid::SolidProgram;
pub use sparkle::SparkleProgram;

use crate::bounds::CellView;
use crate::color::Rgb;
use crate::error::LightError;
use crate::random::RandomSource;

/// Number of parameter slots per light
pub const NUM_PARAMS: usize = 3;

/// Slot read as the per-tick program argument
pub const ARGUMENT_SLOT: usize = 1;

const PROGRAM_NAME_SOLID: &str = "solid";
const PROGRAM_NAME_FADE: &str = "fade";
const PROGRAM_NAME_FADE_IN: &str = "fade_in";
const PROGRAM_NAME_FADE_OUT: &str = "fade_out";
const PROGRAM_NAME_LONG_FADE: &str = "long_fade";
const PROGRAM_NAME_CHASE: &str = "chase";
const PROGRAM_NAME_WARM: &str = "warm";
const PROGRAM_NAME_XMAS: &str = "xmas";
const PROGRAM_NAME_BLINK: &str = "blink";
const PROGRAM_NAME_LFO: &str = "lfo";
const PROGRAM_NAME_EXTERNAL: &str = "external";
const PROGRAM_NAME_EXTERNAL_ALIAS: &str = "artnet";

const PROGRAM_ID_SOLID: u8 = 0;
const PROGRAM_ID_FADE: u8 = 1;
const PROGRAM_ID_FADE_IN: u8 = 2;
const PROGRAM_ID_FADE_OUT: u8 = 3;
const PROGRAM_ID_LONG_FADE: u8 = 4;
const PROGRAM_ID_CHASE: u8 = 5;
const PROGRAM_ID_WARM: u8 = 6;
const PROGRAM_ID_XMAS: u8 = 7;
const PROGRAM_ID_BLINK: u8 = 8;
const PROGRAM_ID_LFO: u8 = 9;
const PROGRAM_ID_EXTERNAL: u8 = 10;

const FADE_OUT: FadeOutProgram = FadeOutProgram::new(1, None);
const LONG_FADE: FadeOutProgram = FadeOutProgram::new(10, Some(1));
const WARM: SparkleProgram = SparkleProgram::new(10);
const XMAS: SparkleProgram = SparkleProgram::new(1);

/// Ordered parameter slots of a light
///
/// Meaning depends on the active program (e.g. slot 1 is the fade amount of
/// `chase`). Values are not range checked, only indices are.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Params([i32; NUM_PARAMS]);

impl Params {
    pub const fn new(values: [i32; NUM_PARAMS]) -> Self {
        Self(values)
    }

    pub fn get(&self, index: usize) -> Result<i32, LightError> {
        self.0
            .get(index)
            .copied()
            .ok_or(LightError::InvalidParameter { index })
    }

    pub fn set(&mut self, index: usize, value: i32) -> Result<(), LightError> {
        let slot = self
            .0
            .get_mut(index)
            .ok_or(LightError::InvalidParameter { index })?;
        *slot = value;
        Ok(())
    }

    /// Overwrite the leading slots with `values`
    ///
    /// Nothing is written if `values` is longer than the parameter set.
    pub fn set_all(&mut self, values: &[i32]) -> Result<(), LightError> {
        let target = self
            .0
            .get_mut(..values.len())
            .ok_or(LightError::InvalidParameter { index: NUM_PARAMS })?;
        target.copy_from_slice(values);
        Ok(())
    }

    /// Argument handed to the active program each tick
    pub const fn argument(&self) -> i32 {
        self.0[ARGUMENT_SLOT]
    }

    pub const fn set_argument(&mut self, value: i32) {
        self.0[ARGUMENT_SLOT] = value;
    }

    pub const fn as_array(&self) -> [i32; NUM_PARAMS] {
        self.0
    }
}

/// Parameter defaults a program injects when it is (re)selected
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParamPatch([Option<i32>; NUM_PARAMS]);

impl ParamPatch {
    pub const NONE: Self = Self([None; NUM_PARAMS]);

    /// Patch setting a single slot, out of range indices are ignored
    #[must_use]
    pub const fn with(mut self, index: usize, value: i32) -> Self {
        if index < NUM_PARAMS {
            self.0[index] = Some(value);
        }
        self
    }

    pub const fn get(&self, index: usize) -> Option<i32> {
        if index < NUM_PARAMS { self.0[index] } else { None }
    }

    pub const fn is_empty(&self) -> bool {
        let mut i = 0;
        while i < NUM_PARAMS {
            if self.0[i].is_some() {
                return false;
            }
            i += 1;
        }
        true
    }

    pub fn apply(&self, params: &mut Params) {
        for (slot, patch) in params.0.iter_mut().zip(self.0) {
            if let Some(value) = patch {
                *slot = value;
            }
        }
    }
}

/// What the light should do after a program ran
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgramOutcome {
    /// Keep the current program
    Running,
    /// Transition to another program
    SwitchTo(ProgramId),
    /// Clear the on/off flag, keeping the program selected
    PowerOff,
}

/// Everything a program may read or change during one tick
pub struct ProgramContext<'a> {
    /// Ticks elapsed since the light was created
    pub tick: u32,
    /// Cells owned by the light
    pub cells: CellView<'a>,
    /// Target color of the light
    pub color: &'a mut Rgb,
    /// Cell cursor for programs that work on one cell at a time
    pub cursor: &'a mut usize,
    /// External pixel feed region aligned with the light's cells
    pub feed: &'a [Rgb],
    pub rng: &'a mut dyn RandomSource,
}

pub trait Program {
    /// Render a single tick
    fn render(&self, ctx: &mut ProgramContext<'_>, arg: i32) -> ProgramOutcome;

    /// Parameter defaults applied when the program gets selected
    fn on_activate(&self, _params: &Params) -> ParamPatch {
        ParamPatch::NONE
    }
}

/// Known programs that can be selected
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[repr(u8)]
pub enum ProgramId {
    #[default]
    Solid = PROGRAM_ID_SOLID,
    Fade = PROGRAM_ID_FADE,
    FadeIn = PROGRAM_ID_FADE_IN,
    FadeOut = PROGRAM_ID_FADE_OUT,
    LongFade = PROGRAM_ID_LONG_FADE,
    Chase = PROGRAM_ID_CHASE,
    Warm = PROGRAM_ID_WARM,
    Xmas = PROGRAM_ID_XMAS,
    Blink = PROGRAM_ID_BLINK,
    Lfo = PROGRAM_ID_LFO,
    External = PROGRAM_ID_EXTERNAL,
}

impl ProgramId {
    pub fn from_raw(value: u8) -> Option<Self> {
        Some(match value {
            PROGRAM_ID_SOLID => Self::Solid,
            PROGRAM_ID_FADE => Self::Fade,
            PROGRAM_ID_FADE_IN => Self::FadeIn,
            PROGRAM_ID_FADE_OUT => Self::FadeOut,
            PROGRAM_ID_LONG_FADE => Self::LongFade,
            PROGRAM_ID_CHASE => Self::Chase,
            PROGRAM_ID_WARM => Self::Warm,
            PROGRAM_ID_XMAS => Self::Xmas,
            PROGRAM_ID_BLINK => Self::Blink,
            PROGRAM_ID_LFO => Self::Lfo,
            PROGRAM_ID_EXTERNAL => Self::External,
            _ => return None,
        })
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Solid => PROGRAM_NAME_SOLID,
            Self::Fade => PROGRAM_NAME_FADE,
            Self::FadeIn => PROGRAM_NAME_FADE_IN,
            Self::FadeOut => PROGRAM_NAME_FADE_OUT,
            Self::LongFade => PROGRAM_NAME_LONG_FADE,
            Self::Chase => PROGRAM_NAME_CHASE,
            Self::Warm => PROGRAM_NAME_WARM,
            Self::Xmas => PROGRAM_NAME_XMAS,
            Self::Blink => PROGRAM_NAME_BLINK,
            Self::Lfo => PROGRAM_NAME_LFO,
            Self::External => PROGRAM_NAME_EXTERNAL,
        }
    }

    pub fn parse_from_str(s: &str) -> Option<Self> {
        match s {
            PROGRAM_NAME_SOLID => Some(Self::Solid),
            PROGRAM_NAME_FADE => Some(Self::Fade),
            PROGRAM_NAME_FADE_IN => Some(Self::FadeIn),
            PROGRAM_NAME_FADE_OUT => Some(Self::FadeOut),
            PROGRAM_NAME_LONG_FADE => Some(Self::LongFade),
            PROGRAM_NAME_CHASE => Some(Self::Chase),
            PROGRAM_NAME_WARM => Some(Self::Warm),
            PROGRAM_NAME_XMAS => Some(Self::Xmas),
            PROGRAM_NAME_BLINK => Some(Self::Blink),
            PROGRAM_NAME_LFO => Some(Self::Lfo),
            PROGRAM_NAME_EXTERNAL | PROGRAM_NAME_EXTERNAL_ALIAS => Some(Self::External),
            _ => None,
        }
    }

    /// Render one tick of the program
    pub fn render(self, ctx: &mut ProgramContext<'_>, arg: i32) -> ProgramOutcome {
        match self {
            Self::Solid => SolidProgram.render(ctx, arg),
            Self::Fade => FadeProgram.render(ctx, arg),
            Self::FadeIn => FadeInProgram.render(ctx, arg),
            Self::FadeOut => FADE_OUT.render(ctx, arg),
            Self::LongFade => LONG_FADE.render(ctx, arg),
            Self::Chase => ChaseProgram.render(ctx, arg),
            Self::Warm => WARM.render(ctx, arg),
            Self::Xmas => XMAS.render(ctx, arg),
            Self::Blink => BlinkProgram.render(ctx, arg),
            Self::Lfo => LfoProgram.render(ctx, arg),
            Self::External => PassThroughProgram.render(ctx, arg),
        }
    }

    /// Parameter patch injected when this program gets selected
    pub fn on_activate(self, params: &Params) -> ParamPatch {
        match self {
            Self::Solid => SolidProgram.on_activate(params),
            Self::Fade => FadeProgram.on_activate(params),
            Self::FadeIn => FadeInProgram.on_activate(params),
            Self::FadeOut => FADE_OUT.on_activate(params),
            Self::LongFade => LONG_FADE.on_activate(params),
            Self::Chase => ChaseProgram.on_activate(params),
            Self::Warm => WARM.on_activate(params),
            Self::Xmas => XMAS.on_activate(params),
            Self::Blink => BlinkProgram.on_activate(params),
            Self::Lfo => LfoProgram.on_activate(params),
            Self::External => PassThroughProgram.on_activate(params),
        }
    }
}
