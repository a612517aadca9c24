//! Light registry: framebuffer owner and command router
//!
//! The registry owns the framebuffer, the external feed, the random source
//! and every [`LightUnit`]. Lights are registered once at startup and are
//! updated in registration order on every tick.

use heapless::Vec;

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::color::{BLACK, Rgb};
use crate::command::{Command, CommandReceiver, LightCommand};
use crate::error::LightError;
use crate::feed::ExternalFeed;
use crate::random::RandomSource;
use crate::unit::{LightConfig, LightUnit, Surface};

pub struct LightRegistry<R: RandomSource, const MAX_LEDS: usize, const MAX_LIGHTS: usize> {
    frame: [Rgb; MAX_LEDS],
    feed: ExternalFeed<MAX_LEDS>,
    units: Vec<LightUnit, MAX_LIGHTS>,
    rng: R,
}

impl<R: RandomSource, const MAX_LEDS: usize, const MAX_LIGHTS: usize>
    LightRegistry<R, MAX_LEDS, MAX_LIGHTS>
{
    /// Create an empty registry with a dark framebuffer
    pub fn new(rng: R) -> Self {
        Self {
            frame: [BLACK; MAX_LEDS],
            feed: ExternalFeed::default(),
            units: Vec::new(),
            rng,
        }
    }

    /// Replace the external feed (e.g. to listen to other universes)
    #[must_use]
    pub fn with_feed(mut self, feed: ExternalFeed<MAX_LEDS>) -> Self {
        self.feed = feed;
        self
    }

    /// Register a light
    ///
    /// Fails if the name is taken, the range leaves the framebuffer or
    /// shares cells with another light. Returns the registration index.
    pub fn register(&mut self, config: &LightConfig<'_>) -> Result<usize, LightError> {
        if !config.range.fits(MAX_LEDS) {
            return Err(LightError::RangeOutOfBounds);
        }
        for unit in &self.units {
            if unit.name() == config.name {
                return Err(LightError::DuplicateName);
            }
            if unit.range().overlaps(config.range) {
                return Err(LightError::OverlappingRange);
            }
        }

        let unit = LightUnit::new(config)?;
        self.units
            .push(unit)
            .map_err(|_| LightError::TooManyLights)?;
        Ok(self.units.len() - 1)
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Lights in registration order
    pub fn units(&self) -> impl Iterator<Item = &LightUnit> {
        self.units.iter()
    }

    fn position(&self, name: &str) -> Result<usize, LightError> {
        self.units
            .iter()
            .position(|unit| unit.name() == name)
            .ok_or(LightError::NotFound)
    }

    /// Look up a light by name
    pub fn get(&self, name: &str) -> Result<&LightUnit, LightError> {
        let index = self.position(name)?;
        self.units.get(index).ok_or(LightError::NotFound)
    }

    /// Command handle for a light
    pub fn light(&mut self, name: &str) -> Result<LightHandle<'_>, LightError> {
        let index = self.position(name)?;
        let Self {
            frame,
            feed,
            units,
            rng,
        } = self;
        let unit = units.get_mut(index).ok_or(LightError::NotFound)?;
        Ok(LightHandle {
            unit,
            surface: Surface {
                frame: frame.as_mut_slice(),
                feed: feed.pixels(),
                rng,
            },
        })
    }

    /// Run one tick of every light, in registration order
    pub fn update_all(&mut self) {
        let Self {
            frame,
            feed,
            units,
            rng,
        } = self;
        let mut surface = Surface {
            frame: frame.as_mut_slice(),
            feed: feed.pixels(),
            rng,
        };
        for unit in units.iter_mut() {
            unit.update(&mut surface);
        }
    }

    /// Framebuffer after the last tick
    pub fn frame(&self) -> &[Rgb] {
        &self.frame
    }

    pub fn feed(&self) -> &ExternalFeed<MAX_LEDS> {
        &self.feed
    }

    pub fn feed_mut(&mut self) -> &mut ExternalFeed<MAX_LEDS> {
        &mut self.feed
    }

    /// Apply a command to the light it addresses
    pub fn apply(&mut self, command: &LightCommand) -> Result<(), LightError> {
        self.light(&command.light)?.apply(&command.command)
    }

    /// Apply every pending command (non-blocking)
    ///
    /// Failing commands are skipped. Returns the number of applied commands.
    pub fn process_pending<const SIZE: usize>(
        &mut self,
        commands: &CommandReceiver<'_, SIZE>,
    ) -> usize {
        let mut applied = 0;
        while let Ok(command) = commands.try_receive() {
            match self.apply(&command) {
                Ok(()) => applied += 1,
                Err(_err) => {
                    #[cfg(feature = "esp32-log")]
                    println!(
                        "[LightRegistry.process_pending] {}: {}",
                        command.light, _err
                    );
                }
            }
        }
        applied
    }
}

/// Mutable access to one light together with the resources it ticks against
pub struct LightHandle<'a> {
    unit: &'a mut LightUnit,
    surface: Surface<'a>,
}

impl LightHandle<'_> {
    pub fn unit(&self) -> &LightUnit {
        self.unit
    }

    pub fn turn_on(&mut self) {
        self.unit.turn_on(&mut self.surface);
    }

    pub fn turn_off(&mut self) {
        self.unit.turn_off(&mut self.surface);
    }

    pub fn toggle(&mut self) {
        self.unit.toggle(&mut self.surface);
    }

    pub fn flash(&mut self) {
        self.unit.flash();
    }

    /// Run one tick of this light only
    pub fn update(&mut self) {
        self.unit.update(&mut self.surface);
    }

    pub fn set_on(&mut self, on: bool) {
        self.unit.set_on(on);
    }

    pub fn set_program(&mut self, name: &str) -> bool {
        self.unit.set_program(name)
    }

    pub fn set_param(&mut self, index: usize, value: i32) -> Result<(), LightError> {
        self.unit.set_param(index, value)
    }

    pub fn get_param(&self, index: usize) -> Result<i32, LightError> {
        self.unit.get_param(index)
    }

    pub fn set_params(&mut self, values: &[i32]) -> Result<(), LightError> {
        self.unit.set_params(values)
    }

    pub fn set_color(&mut self, color: Rgb) {
        self.unit.set_color(color);
    }

    pub fn set_hsv(&mut self, hue: u8, sat: u8, val: u8) {
        self.unit.set_hsv(hue, sat, val);
    }

    pub fn set_hue(&mut self, value: i32) {
        self.unit.set_hue(value);
    }

    pub fn set_brightness(&mut self, value: i32) {
        self.unit.set_brightness(value);
    }

    pub fn set_saturation(&mut self, value: i32) {
        self.unit.set_saturation(value);
    }

    pub fn set_color_temperature(&mut self, kelvin: u16) {
        self.unit.set_color_temperature(kelvin);
    }

    /// Apply a queued command
    ///
    /// Unknown program names are not an error, the selection is ignored.
    pub fn apply(&mut self, command: &Command) -> Result<(), LightError> {
        match command {
            Command::TurnOn => self.turn_on(),
            Command::TurnOff => self.turn_off(),
            Command::Toggle => self.toggle(),
            Command::Flash => self.flash(),
            Command::SetProgram(name) => {
                self.set_program(name);
            }
            Command::SetParam { index, value } => self.set_param(*index, *value)?,
            Command::SetHue(value) => self.set_hue(*value),
            Command::SetBrightness(value) => self.set_brightness(*value),
            Command::SetSaturation(value) => self.set_saturation(*value),
            Command::SetRgb(color) => self.set_color(*color),
            Command::SetHsv { hue, sat, val } => self.set_hsv(*hue, *sat, *val),
            Command::SetColorTemperature(kelvin) => self.set_color_temperature(*kelvin),
        }
        Ok(())
    }
}
