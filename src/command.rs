//! Command intake for collaborators (MQTT, touch input, ...)
//!
//! Collaborators resolve their own topics and payloads into [`LightCommand`]s
//! and post them into a bounded [`CommandQueue`]. The tick loop drains the
//! queue before every frame, so each tick sees a command either fully applied
//! or not at all. The queue is guarded by `critical-section`, which makes it
//! safe to post from interrupts or other tasks.

use core::cell::RefCell;

use critical_section::Mutex;
use heapless::{Deque, String};

use crate::color::Rgb;
use crate::error::LightError;
use crate::unit::NAME_LEN;

/// Maximum length of a program name carried by a command
pub const PROGRAM_NAME_LEN: usize = 16;

pub type LightName = String<NAME_LEN>;
pub type ProgramName = String<PROGRAM_NAME_LEN>;

/// A single command addressed to one light
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    TurnOn,
    TurnOff,
    Toggle,
    /// One-shot white then black flash
    Flash,
    /// Select a program by name, unknown names are ignored
    SetProgram(ProgramName),
    SetParam { index: usize, value: i32 },
    SetHue(i32),
    SetBrightness(i32),
    SetSaturation(i32),
    SetRgb(Rgb),
    SetHsv { hue: u8, sat: u8, val: u8 },
    SetColorTemperature(u16),
}

impl Command {
    /// Program selection command
    ///
    /// Names longer than [`PROGRAM_NAME_LEN`] cannot match any program and
    /// are carried as an empty name, which is ignored on application.
    pub fn program(name: &str) -> Self {
        let mut program = ProgramName::new();
        if program.push_str(name).is_err() {
            program.clear();
        }
        Self::SetProgram(program)
    }
}

/// Command together with the name of the light it targets
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LightCommand {
    pub light: LightName,
    pub command: Command,
}

impl LightCommand {
    pub fn new(light: &str, command: Command) -> Result<Self, LightError> {
        let mut name = LightName::new();
        name.push_str(light).map_err(|()| LightError::NameTooLong)?;
        Ok(Self {
            light: name,
            command,
        })
    }
}

/// Returned when the queue is full, carrying the rejected command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrySendError(pub LightCommand);

/// Returned when the queue is empty
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TryReceiveError;

/// Bounded FIFO of pending light commands
pub struct CommandQueue<const SIZE: usize> {
    inner: Mutex<RefCell<Deque<LightCommand, SIZE>>>,
}

impl<const SIZE: usize> CommandQueue<SIZE> {
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(RefCell::new(Deque::new())),
        }
    }

    /// Handle for collaborators posting commands
    pub const fn sender(&self) -> CommandSender<'_, SIZE> {
        CommandSender { queue: self }
    }

    /// Handle for the tick loop draining commands
    pub const fn receiver(&self) -> CommandReceiver<'_, SIZE> {
        CommandReceiver { queue: self }
    }

    pub fn try_send(&self, command: LightCommand) -> Result<(), TrySendError> {
        critical_section::with(|cs| {
            self.inner
                .borrow(cs)
                .borrow_mut()
                .push_back(command)
                .map_err(TrySendError)
        })
    }

    pub fn try_receive(&self) -> Result<LightCommand, TryReceiveError> {
        critical_section::with(|cs| {
            self.inner
                .borrow(cs)
                .borrow_mut()
                .pop_front()
                .ok_or(TryReceiveError)
        })
    }

    /// Number of pending commands
    pub fn len(&self) -> usize {
        critical_section::with(|cs| self.inner.borrow(cs).borrow().len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<const SIZE: usize> Default for CommandQueue<SIZE> {
    fn default() -> Self {
        Self::new()
    }
}

/// Posting side of a [`CommandQueue`]
#[derive(Clone, Copy)]
pub struct CommandSender<'a, const SIZE: usize> {
    queue: &'a CommandQueue<SIZE>,
}

impl<const SIZE: usize> CommandSender<'_, SIZE> {
    pub fn try_send(&self, command: LightCommand) -> Result<(), TrySendError> {
        self.queue.try_send(command)
    }

    /// Address `command` to `light` and post it
    pub fn send_to(&self, light: &str, command: Command) -> Result<(), LightError> {
        let command = LightCommand::new(light, command)?;
        self.queue
            .try_send(command)
            .map_err(|_| LightError::QueueFull)
    }
}

/// Draining side of a [`CommandQueue`]
#[derive(Clone, Copy)]
pub struct CommandReceiver<'a, const SIZE: usize> {
    queue: &'a CommandQueue<SIZE>,
}

impl<const SIZE: usize> CommandReceiver<'_, SIZE> {
    pub fn try_receive(&self) -> Result<LightCommand, TryReceiveError> {
        self.queue.try_receive()
    }
}
