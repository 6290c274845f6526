//! In-memory bench for scripted runs
//!
//! Mirrors a hardware-in-the-loop bench on the host: a [`SimBoard`] stands
//! in for the converters and the pin, a [`Bench`] steps a [`ControlLoop`]
//! along a millisecond timeline while applying scripted input changes,
//! and every output change is recorded with its timestamp for later
//! assertions.
//!
//! ```ignore
//! let board = SimBoard::<2>::new(1023);
//! let looped = MonitorLoop::new(monitor, board.analog_input(), board.pin())?;
//! let mut bench = Bench::new(&board, looped);
//! bench.run(&[Stimulus::new(10, Channel(1), 900)], 20);
//! assert_eq!(board.value_at(Probe::Pin, 10), Some(1));
//! ```

use core::cell::{Cell, RefCell};

use benchloop_hal::{AnalogInput, AnalogOutput, Channel, Clock, DigitalOutput, Level};
use heapless::Vec;

use crate::program::ControlLoop;

/// Maximum number of recorded output changes
pub const TRACE_CAPACITY: usize = 512;

/// Recorded output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Probe {
    /// Analog output channel
    Analog(Channel),
    /// The digital output pin
    Pin,
}

/// One recorded output change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Sample {
    /// Bench time of the write
    pub at_ms: u32,
    /// Output written
    pub probe: Probe,
    /// New value (pin: 0 low, 1 high)
    pub value: u8,
}

/// Scripted input change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Stimulus {
    /// Time from which the input holds `value`
    pub at_ms: u32,
    /// Input channel
    pub channel: Channel,
    /// Raw sample value
    pub value: u16,
}

impl Stimulus {
    /// Create a stimulus
    pub const fn new(at_ms: u32, channel: Channel, value: u16) -> Self {
        Self {
            at_ms,
            channel,
            value,
        }
    }
}

/// Simulated board with `N` analog inputs, `N` analog outputs and one pin
pub struct SimBoard<const N: usize> {
    full_scale: u16,
    now_ms: Cell<u32>,
    inputs: [Cell<u16>; N],
    outputs: [Cell<Option<u8>>; N],
    pin: Cell<Option<Level>>,
    trace: RefCell<Vec<Sample, TRACE_CAPACITY>>,
    overflowed: Cell<bool>,
}

impl<const N: usize> SimBoard<N> {
    /// Create a board whose inputs read zero until driven
    pub fn new(full_scale: u16) -> Self {
        Self {
            full_scale,
            now_ms: Cell::new(0),
            inputs: core::array::from_fn(|_| Cell::new(0)),
            outputs: core::array::from_fn(|_| Cell::new(None)),
            pin: Cell::new(None),
            trace: RefCell::new(Vec::new()),
            overflowed: Cell::new(false),
        }
    }

    /// Set the bench time
    pub fn set_time(&self, now_ms: u32) {
        self.now_ms.set(now_ms);
    }

    /// Drive an input to a raw value; out-of-range channels are ignored
    pub fn set_input(&self, channel: Channel, value: u16) {
        if let Some(input) = self.inputs.get(channel.index()) {
            input.set(value);
        }
    }

    /// Last value written to an analog output
    pub fn output(&self, channel: Channel) -> Option<u8> {
        self.outputs.get(channel.index()).and_then(Cell::get)
    }

    /// Last level written to the pin
    pub fn pin_level(&self) -> Option<Level> {
        self.pin.get()
    }

    /// Number of recorded output changes
    pub fn trace_len(&self) -> usize {
        self.trace.borrow().len()
    }

    /// Check if changes were dropped because the trace was full
    pub fn overflowed(&self) -> bool {
        self.overflowed.get()
    }

    /// Recorded changes of one output, oldest first
    pub fn changes_on(&self, probe: Probe) -> Vec<Sample, TRACE_CAPACITY> {
        self.trace
            .borrow()
            .iter()
            .filter(|sample| sample.probe == probe)
            .copied()
            .collect()
    }

    /// Value an output held at `at_ms`, if it had been written by then
    pub fn value_at(&self, probe: Probe, at_ms: u32) -> Option<u8> {
        self.trace
            .borrow()
            .iter()
            .rev()
            .find(|sample| sample.probe == probe && sample.at_ms <= at_ms)
            .map(|sample| sample.value)
    }

    /// Analog input capability backed by this board
    pub fn analog_input(&self) -> SimAnalogInput<'_, N> {
        SimAnalogInput { board: self }
    }

    /// Analog output capability backed by this board
    pub fn analog_output(&self) -> SimAnalogOutput<'_, N> {
        SimAnalogOutput { board: self }
    }

    /// Digital pin capability backed by this board
    pub fn pin(&self) -> SimPin<'_, N> {
        SimPin { board: self }
    }

    fn record(&self, probe: Probe, value: u8) {
        let sample = Sample {
            at_ms: self.now_ms.get(),
            probe,
            value,
        };
        if self.trace.borrow_mut().push(sample).is_err() {
            self.overflowed.set(true);
        }
    }
}

impl<const N: usize> Clock for SimBoard<N> {
    fn now_ms(&self) -> u32 {
        self.now_ms.get()
    }
}

/// [`AnalogInput`] reading a [`SimBoard`]
pub struct SimAnalogInput<'a, const N: usize> {
    board: &'a SimBoard<N>,
}

impl<const N: usize> AnalogInput for SimAnalogInput<'_, N> {
    fn full_scale(&self) -> u16 {
        self.board.full_scale
    }

    fn read(&mut self, channel: Channel) -> u16 {
        self.board
            .inputs
            .get(channel.index())
            .map_or(0, Cell::get)
    }
}

/// [`AnalogOutput`] writing a [`SimBoard`]
pub struct SimAnalogOutput<'a, const N: usize> {
    board: &'a SimBoard<N>,
}

impl<const N: usize> AnalogOutput for SimAnalogOutput<'_, N> {
    fn write(&mut self, channel: Channel, value: u8) {
        let Some(output) = self.board.outputs.get(channel.index()) else {
            return;
        };
        if output.replace(Some(value)) != Some(value) {
            self.board.record(Probe::Analog(channel), value);
        }
    }
}

/// [`DigitalOutput`] driving the [`SimBoard`] pin
pub struct SimPin<'a, const N: usize> {
    board: &'a SimBoard<N>,
}

impl<const N: usize> DigitalOutput for SimPin<'_, N> {
    fn set_level(&mut self, level: Level) {
        if self.board.pin.replace(Some(level)) != Some(level) {
            self.board.record(Probe::Pin, level.is_high() as u8);
        }
    }

    fn level(&self) -> Level {
        self.board.pin.get().unwrap_or(Level::Low)
    }
}

/// Steps a control loop over a simulated timeline
///
/// Polls are instantaneous: after each poll the time advances by the
/// loop's idle delay, or by 1 ms for loops without one.
pub struct Bench<'a, L, const N: usize> {
    board: &'a SimBoard<N>,
    control: L,
    started: bool,
    polls: u32,
}

impl<'a, L: ControlLoop, const N: usize> Bench<'a, L, N> {
    /// Create a bench for a loop wired to `board`
    pub fn new(board: &'a SimBoard<N>, control: L) -> Self {
        Self {
            board,
            control,
            started: false,
            polls: 0,
        }
    }

    /// Number of polls run so far
    pub fn polls(&self) -> u32 {
        self.polls
    }

    /// The loop under test
    pub fn control(&self) -> &L {
        &self.control
    }

    /// Run from the current bench time through `end_ms`
    ///
    /// `stimuli` must be sorted by time; each is applied before the first
    /// poll at or after its timestamp, so stimuli dated before the current
    /// bench time take effect on the first poll. The loop is started on
    /// the first run.
    pub fn run(&mut self, stimuli: &[Stimulus], end_ms: u32) {
        let mut now = self.board.now_ms();
        if !self.started {
            self.control.start(now);
            self.started = true;
        }

        let mut pending = stimuli.iter().peekable();
        while now <= end_ms {
            while let Some(stimulus) = pending.next_if(|s| s.at_ms <= now) {
                self.board.set_input(stimulus.channel, stimulus.value);
            }

            self.board.set_time(now);
            self.control.poll(now);
            self.polls += 1;

            match now.checked_add(self.control.idle_ms().max(1)) {
                Some(next) => now = next,
                None => break,
            }
        }
        self.board.set_time(now);
    }
}
