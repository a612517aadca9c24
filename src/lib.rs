#![no_std]

pub mod bounds;
pub mod color;
pub mod command;
pub mod error;
pub mod feed;
pub mod filter;
pub mod frame_scheduler;
pub mod math8;
pub mod program;
pub mod random;
pub mod registry;
pub mod unit;

pub use bounds::{CellRange, CellView};
pub use command::{
    Command, CommandQueue, CommandReceiver, CommandSender, LightCommand, TrySendError,
};
pub use error::LightError;
pub use feed::ExternalFeed;
pub use filter::{OutputFilter, OutputFilterConfig};
pub use frame_scheduler::{FrameResult, FrameScheduler};
pub use program::{NUM_PARAMS, ParamPatch, Params, ProgramId, ProgramOutcome};
pub use random::{RandomSource, SplitMix};
pub use registry::{LightHandle, LightRegistry};
pub use unit::{FadeConfig, LightConfig, LightUnit, Surface};

pub use color::{Hsv, Rgb};
pub use embassy_time::{Duration, Instant};

/// Abstract LED driver trait
///
/// Implement this trait to push finished frames to the hardware.
/// The frame scheduler is generic over this trait.
pub trait OutputDriver {
    /// Write colors to the LED strip
    fn write(&mut self, colors: &[Rgb]);
}
