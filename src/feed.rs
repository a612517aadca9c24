//! External pixel feed (DMX / Art-Net style)
//!
//! A network collaborator hands over one universe at a time. Each universe
//! carries RGB triples that land in the feed at
//! `(universe - start_universe) * pixels_per_universe`. Once every universe
//! of the window has arrived the frame is complete and a new universe cycle
//! starts. Lights running the pass-through program copy their region of the
//! feed on every tick.

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::color::{BLACK, Rgb};

/// Universes tracked per cycle
pub const MAX_UNIVERSES: u8 = 32;

/// Reassembly buffer for externally supplied pixels
#[derive(Debug, Clone)]
pub struct ExternalFeed<const N: usize> {
    pixels: [Rgb; N],
    start_universe: u16,
    universes: u8,
    /// Bit `n` is set once universe `start_universe + n` arrived this cycle
    received: u32,
    /// Channel count of the previous packet, drives the universe stride
    previous_length: usize,
}

impl<const N: usize> ExternalFeed<N> {
    /// Create a feed listening to `universes` universes from `start_universe`
    ///
    /// `universes` is clamped to `1..=MAX_UNIVERSES`.
    pub const fn new(start_universe: u16, universes: u8) -> Self {
        let universes = if universes == 0 {
            1
        } else if universes > MAX_UNIVERSES {
            MAX_UNIVERSES
        } else {
            universes
        };
        Self {
            pixels: [BLACK; N],
            start_universe,
            universes,
            received: 0,
            previous_length: 0,
        }
    }

    /// Current feed pixels, indexed like the framebuffer
    pub fn pixels(&self) -> &[Rgb] {
        &self.pixels
    }

    /// Write pixels directly, starting at `offset`
    ///
    /// Pixels past the end of the feed are dropped.
    pub fn write(&mut self, offset: usize, pixels: &[Rgb]) {
        let Some(target) = self.pixels.get_mut(offset..) else {
            return;
        };
        for (slot, pixel) in target.iter_mut().zip(pixels) {
            *slot = *pixel;
        }
    }

    /// Bitmask of universes received in the current cycle
    pub const fn received(&self) -> u32 {
        self.received
    }

    const fn complete_mask(&self) -> u32 {
        if self.universes >= MAX_UNIVERSES {
            u32::MAX
        } else {
            (1 << self.universes) - 1
        }
    }

    /// Handle one universe worth of DMX channel data
    ///
    /// Returns `true` when this packet completed the frame. Universes
    /// outside the window are ignored.
    pub fn on_dmx_frame(&mut self, universe: u16, data: &[u8]) -> bool {
        let Some(slot) = universe.checked_sub(self.start_universe) else {
            return false;
        };
        if slot >= u16::from(self.universes) {
            return false;
        }

        let channels_per_universe = if self.previous_length == 0 {
            data.len()
        } else {
            self.previous_length
        };
        let base = usize::from(slot) * (channels_per_universe / 3);
        for (index, channels) in data.chunks_exact(3).enumerate() {
            if let Some(pixel) = self.pixels.get_mut(base + index) {
                *pixel = Rgb::new(channels[0], channels[1], channels[2]);
            }
        }
        self.previous_length = data.len();

        self.received |= 1 << slot;
        if self.received != self.complete_mask() {
            return false;
        }

        #[cfg(feature = "esp32-log")]
        println!("[ExternalFeed] frame complete ({} universes)", self.universes);
        self.start_cycle();
        true
    }

    /// Forget which universes arrived, keeping pixels
    pub fn start_cycle(&mut self) {
        self.received = 0;
    }

    /// Clear pixels and reassembly state
    pub fn reset(&mut self) {
        self.pixels = [BLACK; N];
        self.received = 0;
        self.previous_length = 0;
    }
}

impl<const N: usize> Default for ExternalFeed<N> {
    fn default() -> Self {
        Self::new(0, 1)
    }
}
