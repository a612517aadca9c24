//! Light unit: one named segment of the strip
//!
//! A unit owns its state (color, on/off flag, tick counter, cursor, program
//! and parameters) but not its cells. Cells are resolved against the shared
//! framebuffer through a [`Surface`] on every tick.

use heapless::String;

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::bounds::CellRange;
use crate::color::{BLACK, Hsv, Rgb, WHITE, hsv2rgb, kelvin_to_rgb, rgb2hsv_approximate};
use crate::error::LightError;
use crate::program::{ParamPatch, Params, ProgramContext, ProgramId, ProgramOutcome};
use crate::random::RandomSource;

/// Maximum length of a light name in bytes
pub const NAME_LEN: usize = 16;

/// Fade amount used by [`FadeConfig::default_fades`]
pub const DEFAULT_FADE_AMOUNT: u8 = 15;

/// Upper bound for brightness and saturation writes
const HSV_PERCENT_MAX: i32 = 100;

/// Fade transitions used when switching a light on or off
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FadeConfig {
    /// Blend amount per tick when turning on, instant when `None`
    pub fade_in: Option<u8>,
    /// Decay amount per tick when turning off, instant when `None`
    pub fade_out: Option<u8>,
}

impl FadeConfig {
    pub const DISABLED: Self = Self {
        fade_in: None,
        fade_out: None,
    };

    /// Same amount for both directions
    pub const fn uniform(amount: u8) -> Self {
        Self {
            fade_in: Some(amount),
            fade_out: Some(amount),
        }
    }

    pub const fn default_fades() -> Self {
        Self::uniform(DEFAULT_FADE_AMOUNT)
    }
}

/// Configuration of a single light
#[derive(Debug, Clone)]
pub struct LightConfig<'a> {
    pub name: &'a str,
    pub range: CellRange,
    pub color: Rgb,
    pub program: ProgramId,
    pub fade: FadeConfig,
}

impl<'a> LightConfig<'a> {
    pub const fn new(name: &'a str, range: CellRange) -> Self {
        Self {
            name,
            range,
            color: WHITE,
            program: ProgramId::Solid,
            fade: FadeConfig::DISABLED,
        }
    }

    #[must_use]
    pub const fn with_color(mut self, color: Rgb) -> Self {
        self.color = color;
        self
    }

    #[must_use]
    pub const fn with_program(mut self, program: ProgramId) -> Self {
        self.program = program;
        self
    }

    #[must_use]
    pub const fn with_fade(mut self, fade: FadeConfig) -> Self {
        self.fade = fade;
        self
    }
}

/// Progress of a one-shot flash, drawn over the program output
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
enum FlashPhase {
    #[default]
    Idle,
    White,
    Black,
}

/// Shared resources lent to a light for one tick
pub struct Surface<'a> {
    /// Full framebuffer, the light only touches its own range
    pub frame: &'a mut [Rgb],
    /// External pixel feed, indexed like the framebuffer
    pub feed: &'a [Rgb],
    pub rng: &'a mut dyn RandomSource,
}

/// A named light driving a run of framebuffer cells
#[derive(Debug, Clone)]
pub struct LightUnit {
    name: String<NAME_LEN>,
    range: CellRange,
    color: Rgb,
    power: bool,
    tick: u32,
    cursor: usize,
    program: ProgramId,
    params: Params,
    fade: FadeConfig,
    flash: FlashPhase,
}

impl LightUnit {
    /// Create a light from its configuration
    ///
    /// The light starts switched off; the configured program is selected
    /// with its parameter defaults.
    pub fn new(config: &LightConfig<'_>) -> Result<Self, LightError> {
        let mut name = String::new();
        name.push_str(config.name).map_err(|()| LightError::NameTooLong)?;

        let mut unit = Self {
            name,
            range: config.range,
            color: config.color,
            power: false,
            tick: 0,
            cursor: 0,
            program: ProgramId::Solid,
            params: Params::default(),
            fade: config.fade,
            flash: FlashPhase::Idle,
        };
        unit.select_program(config.program);
        Ok(unit)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub const fn range(&self) -> CellRange {
        self.range
    }

    /// On/off flag
    ///
    /// The flag does not gate rendering: the active program runs on every
    /// tick either way, so a light switched off without a fade-out keeps its
    /// last program output.
    pub const fn is_on(&self) -> bool {
        self.power
    }

    pub const fn program(&self) -> ProgramId {
        self.program
    }

    pub const fn params(&self) -> &Params {
        &self.params
    }

    pub const fn tick_count(&self) -> u32 {
        self.tick
    }

    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    pub const fn fade(&self) -> FadeConfig {
        self.fade
    }

    pub fn set_fade(&mut self, fade: FadeConfig) {
        self.fade = fade;
    }

    /// Target color
    pub const fn get_rgb(&self) -> Rgb {
        self.color
    }

    /// Approximate HSV view of the target color
    pub fn get_hsv(&self) -> Hsv {
        rgb2hsv_approximate(self.color)
    }

    /// Run the active program once and advance the tick counter
    pub fn update(&mut self, surface: &mut Surface<'_>) {
        let arg = self.params.argument();
        let feed = surface.feed.get(self.range.as_range()).unwrap_or_default();
        let mut ctx = ProgramContext {
            tick: self.tick,
            cells: self.range.view(surface.frame),
            color: &mut self.color,
            cursor: &mut self.cursor,
            feed,
            rng: &mut *surface.rng,
        };
        let outcome = self.program.render(&mut ctx, arg);
        self.apply_outcome(outcome);
        self.draw_flash(surface);
        self.tick = self.tick.wrapping_add(1);
    }

    fn draw_flash(&mut self, surface: &mut Surface<'_>) {
        let (color, next) = match self.flash {
            FlashPhase::Idle => return,
            FlashPhase::White => (WHITE, FlashPhase::Black),
            FlashPhase::Black => (BLACK, FlashPhase::Idle),
        };
        self.range.view(surface.frame).fill(color);
        self.flash = next;
    }

    fn apply_outcome(&mut self, outcome: ProgramOutcome) {
        match outcome {
            ProgramOutcome::Running => {}
            ProgramOutcome::SwitchTo(program) => {
                #[cfg(feature = "esp32-log")]
                println!(
                    "[LightUnit.update] {}: {} -> {}",
                    self.name,
                    self.program.as_str(),
                    program.as_str()
                );
                self.program = program;
            }
            ProgramOutcome::PowerOff => {
                #[cfg(feature = "esp32-log")]
                if self.power {
                    println!("[LightUnit.update] {}: faded out", self.name);
                }
                self.power = false;
            }
        }
    }

    /// Switch the light on, fading in when configured, and tick once
    ///
    /// Without a fade-in a finished fade-out is replaced by `solid`, so the
    /// light does not power itself off again on the next tick.
    pub fn turn_on(&mut self, surface: &mut Surface<'_>) {
        if let Some(amount) = self.fade.fade_in {
            self.program = ProgramId::FadeIn;
            self.params.set_argument(i32::from(amount));
        } else if matches!(self.program, ProgramId::FadeOut | ProgramId::LongFade) {
            self.program = ProgramId::Solid;
        }
        self.power = true;
        self.update(surface);
    }

    /// Switch the light off, fading out when configured, and tick once
    ///
    /// Does nothing when the light is already off. With a fade-out the
    /// on/off flag is cleared by the program once every cell is dark.
    pub fn turn_off(&mut self, surface: &mut Surface<'_>) {
        if !self.power {
            return;
        }
        if let Some(amount) = self.fade.fade_out {
            self.program = ProgramId::FadeOut;
            self.params.set_argument(i32::from(amount));
        } else {
            self.power = false;
        }
        self.update(surface);
    }

    pub fn toggle(&mut self, surface: &mut Surface<'_>) {
        if self.power {
            self.turn_off(surface);
        } else {
            self.turn_on(surface);
        }
    }

    /// Flash the light's cells white for one tick, then black for one tick
    ///
    /// The active program keeps running underneath and takes over again on
    /// the tick after the black frame.
    pub fn flash(&mut self) {
        self.flash = FlashPhase::White;
    }

    pub fn is_flashing(&self) -> bool {
        self.flash != FlashPhase::Idle
    }

    /// Force the on/off flag without switching programs or ticking
    pub fn set_on(&mut self, on: bool) {
        self.power = on;
    }

    /// Select a program by name
    ///
    /// Unknown names are ignored on purpose: the active program and all
    /// parameters stay as they are and `false` is returned.
    pub fn set_program(&mut self, name: &str) -> bool {
        let Some(program) = ProgramId::parse_from_str(name) else {
            #[cfg(feature = "esp32-log")]
            println!("[LightUnit.set_program] {}: ignoring {:?}", self.name, name);
            return false;
        };
        self.select_program(program);
        true
    }

    /// Select a program, injecting its parameter defaults
    pub fn select_program(&mut self, program: ProgramId) -> ParamPatch {
        let patch = program.on_activate(&self.params);
        patch.apply(&mut self.params);
        self.program = program;
        patch
    }

    pub fn set_param(&mut self, index: usize, value: i32) -> Result<(), LightError> {
        self.params.set(index, value)
    }

    pub fn get_param(&self, index: usize) -> Result<i32, LightError> {
        self.params.get(index)
    }

    /// Overwrite the leading parameter slots
    pub fn set_params(&mut self, values: &[i32]) -> Result<(), LightError> {
        self.params.set_all(values)
    }

    pub fn set_color(&mut self, color: Rgb) {
        self.color = color;
    }

    pub fn set_hsv(&mut self, hue: u8, sat: u8, val: u8) {
        self.color = hsv2rgb(Hsv { hue, sat, val });
    }

    pub fn set_color_temperature(&mut self, kelvin: u16) {
        self.color = kelvin_to_rgb(kelvin);
    }

    /// Replace the hue, wrapping around the 0-255 hue circle
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn set_hue(&mut self, value: i32) {
        let mut hsv = self.get_hsv();
        hsv.hue = value.rem_euclid(256) as u8;
        self.color = hsv2rgb(hsv);
    }

    /// Replace the HSV value, clamped to 0-100
    pub fn set_brightness(&mut self, value: i32) {
        let mut hsv = self.get_hsv();
        hsv.val = percent(value);
        self.color = hsv2rgb(hsv);
    }

    /// Replace the HSV saturation, clamped to 0-100
    pub fn set_saturation(&mut self, value: i32) {
        let mut hsv = self.get_hsv();
        hsv.sat = percent(value);
        self.color = hsv2rgb(hsv);
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
const fn percent(value: i32) -> u8 {
    if value < 0 {
        0
    } else if value > HSV_PERCENT_MAX {
        HSV_PERCENT_MAX as u8
    } else {
        value as u8
    }
}
