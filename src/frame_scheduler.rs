//! Fixed cadence driver for a [`LightRegistry`]
//!
//! One call to [`FrameScheduler::tick`] is one tick of every light. The
//! scheduler never sleeps itself: it reports how long the caller should wait
//! before the next frame.

use embassy_time::{Duration, Instant};

use crate::OutputDriver;
use crate::color::{BLACK, Rgb};
use crate::command::CommandReceiver;
use crate::filter::{OutputFilter, OutputFilterConfig};
use crate::random::RandomSource;
use crate::registry::LightRegistry;

/// Default target frame rate (60 FPS).
pub const DEFAULT_FPS: u32 = 60;

/// Default frame duration based on target FPS.
pub const DEFAULT_FRAME_DURATION: Duration = Duration::from_millis(1000 / DEFAULT_FPS as u64);

/// Result of a frame tick operation.
#[derive(Debug, Clone, Copy)]
pub struct FrameResult {
    /// The deadline for the next frame.
    pub next_deadline: Instant,
    /// How long to wait until the next frame (may be zero if behind schedule).
    pub sleep_duration: Duration,
    /// Commands applied before this frame.
    pub applied_commands: usize,
}

/// Drives a [`LightRegistry`] at a fixed cadence.
///
/// Each tick:
/// - drains pending commands into the registry
/// - runs one update of every light
/// - filters the framebuffer and writes it to the output driver
///
/// # Usage
///
/// ```ignore
/// let mut scheduler = FrameScheduler::new(registry, driver, &OutputFilterConfig::default())
///     .with_commands(queue.receiver());
///
/// loop {
///     let result = scheduler.tick(Instant::from_millis(now_ms()));
///     sleep_ms(result.sleep_duration.as_millis());
/// }
/// ```
pub struct FrameScheduler<
    'a,
    O: OutputDriver,
    R: RandomSource,
    const MAX_LEDS: usize,
    const MAX_LIGHTS: usize,
    const QUEUE_SIZE: usize,
> {
    output: O,
    registry: LightRegistry<R, MAX_LEDS, MAX_LIGHTS>,
    commands: Option<CommandReceiver<'a, QUEUE_SIZE>>,
    filter: OutputFilter,
    output_frame: [Rgb; MAX_LEDS],
    next_frame: Instant,
    frame_duration: Duration,
}

impl<
    'a,
    O: OutputDriver,
    R: RandomSource,
    const MAX_LEDS: usize,
    const MAX_LIGHTS: usize,
    const QUEUE_SIZE: usize,
> FrameScheduler<'a, O, R, MAX_LEDS, MAX_LIGHTS, QUEUE_SIZE>
{
    /// Create a new frame scheduler.
    ///
    /// Uses `DEFAULT_FRAME_DURATION` (60 FPS) for frame timing.
    pub fn new(
        registry: LightRegistry<R, MAX_LEDS, MAX_LIGHTS>,
        driver: O,
        filter: &OutputFilterConfig,
    ) -> Self {
        Self {
            output: driver,
            registry,
            commands: None,
            filter: OutputFilter::new(filter),
            output_frame: [BLACK; MAX_LEDS],
            next_frame: Instant::from_millis(0),
            frame_duration: DEFAULT_FRAME_DURATION,
        }
    }

    /// Drain commands from `commands` before every frame.
    #[must_use]
    pub fn with_commands(mut self, commands: CommandReceiver<'a, QUEUE_SIZE>) -> Self {
        self.commands = Some(commands);
        self
    }

    /// Use a custom frame duration.
    #[must_use]
    pub fn with_frame_duration(mut self, frame_duration: Duration) -> Self {
        self.frame_duration = frame_duration;
        self
    }

    /// Process one frame and return timing information.
    ///
    /// The caller is responsible for waiting until `next_deadline` before
    /// calling `tick` again.
    pub fn tick(&mut self, now: Instant) -> FrameResult {
        // Skip the backlog after long stalls instead of bursting frames
        let max_drift = self.frame_duration.as_millis() * 2;
        if now.as_millis() > self.next_frame.as_millis() + max_drift {
            self.next_frame = now;
        }

        let applied_commands = match &self.commands {
            Some(commands) => self.registry.process_pending(commands),
            None => 0,
        };

        self.registry.update_all();
        self.filter.apply(self.registry.frame(), &mut self.output_frame);
        self.output.write(&self.output_frame);

        self.next_frame += self.frame_duration;

        let sleep_duration = if self.next_frame.as_millis() > now.as_millis() {
            Duration::from_millis(self.next_frame.as_millis() - now.as_millis())
        } else {
            Duration::from_millis(0)
        };

        FrameResult {
            next_deadline: self.next_frame,
            sleep_duration,
            applied_commands,
        }
    }

    pub fn registry(&self) -> &LightRegistry<R, MAX_LEDS, MAX_LIGHTS> {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut LightRegistry<R, MAX_LEDS, MAX_LIGHTS> {
        &mut self.registry
    }

    pub fn filter_mut(&mut self) -> &mut OutputFilter {
        &mut self.filter
    }

    pub fn output(&self) -> &O {
        &self.output
    }
}
