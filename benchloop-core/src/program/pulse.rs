//! Square-wave generator
//!
//! Free-running oscillator: each poll measures the time since the last
//! transition and flips the output once it exceeds the configured period.
//! The driver sleeps a fixed grain after every poll, so the real half
//! period is `period_ms + 1` ms plus up to one grain of jitter. This is
//! not a hardware timer.

use benchloop_hal::time::elapsed_ms;
use benchloop_hal::{AnalogOutput, DigitalOutput, Level};

use super::ControlLoop;
use crate::config::PulseConfig;
use crate::scale::{OUTPUT_MAX, OUTPUT_MIN};

/// Output phase of the generator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Phase {
    /// Analog output at zero, pin inactive
    #[default]
    Inactive,
    /// Analog output at full scale, pin active
    Active,
}

impl Phase {
    /// The other phase
    pub const fn toggled(self) -> Self {
        match self {
            Phase::Inactive => Phase::Active,
            Phase::Active => Phase::Inactive,
        }
    }
}

/// Output writes for one transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PulseEdge {
    /// Phase entered
    pub phase: Phase,
    /// Analog output level (0 or 255)
    pub analog: u8,
    /// Digital pin level
    pub digital: Level,
}

impl PulseEdge {
    /// Output levels representing `phase`
    pub const fn for_phase(phase: Phase, config: &PulseConfig) -> Self {
        match phase {
            Phase::Active => Self {
                phase,
                analog: OUTPUT_MAX as u8,
                digital: config.active,
            },
            Phase::Inactive => Self {
                phase,
                analog: OUTPUT_MIN as u8,
                digital: config.active.inverted(),
            },
        }
    }
}

/// Generator timing state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PulseState {
    /// Clock reading at the last transition (or at startup)
    pub last_transition_ms: u32,
    /// Current phase
    pub phase: Phase,
}

impl PulseState {
    /// Initial state: INACTIVE, timed from `now_ms`
    pub const fn new(now_ms: u32) -> Self {
        Self {
            last_transition_ms: now_ms,
            phase: Phase::Inactive,
        }
    }

    /// Advance the state to `now_ms`
    ///
    /// Returns the next state and, when a transition fires, the outputs
    /// to write. Without a transition the state is returned unchanged.
    pub const fn poll(self, now_ms: u32, config: &PulseConfig) -> (Self, Option<PulseEdge>) {
        if elapsed_ms(self.last_transition_ms, now_ms) <= config.period_ms {
            return (self, None);
        }

        let phase = self.phase.toggled();
        let next = Self {
            last_transition_ms: now_ms,
            phase,
        };
        (next, Some(PulseEdge::for_phase(phase, config)))
    }
}

/// Generator bound to an analog output and a digital pin
pub struct PulseLoop<O, P> {
    config: PulseConfig,
    state: PulseState,
    dac: O,
    pin: P,
}

impl<O: AnalogOutput, P: DigitalOutput> PulseLoop<O, P> {
    /// Create a new generator loop, timed from zero until started
    pub fn new(config: PulseConfig, dac: O, pin: P) -> Self {
        Self {
            config,
            state: PulseState::default(),
            dac,
            pin,
        }
    }

    /// Current timing state
    pub fn state(&self) -> PulseState {
        self.state
    }

    /// Get access to the output pin
    pub fn pin(&self) -> &P {
        &self.pin
    }

    /// Get access to the analog output
    pub fn dac(&self) -> &O {
        &self.dac
    }

    /// Poll and report the transition, if any
    pub fn step(&mut self, now_ms: u32) -> Option<PulseEdge> {
        let (state, edge) = self.state.poll(now_ms, &self.config);
        self.state = state;

        if let Some(edge) = edge {
            self.dac.write(self.config.output, edge.analog);
            self.pin.set_level(edge.digital);
        }
        edge
    }
}

impl<O: AnalogOutput, P: DigitalOutput> ControlLoop for PulseLoop<O, P> {
    fn start(&mut self, now_ms: u32) {
        self.state = PulseState::new(now_ms);
    }

    fn poll(&mut self, now_ms: u32) {
        self.step(now_ms);
    }

    fn idle_ms(&self) -> u32 {
        self.config.grain_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use benchloop_hal::Channel;

    struct MockDac {
        level: Option<(Channel, u8)>,
        writes: u32,
    }

    impl AnalogOutput for MockDac {
        fn write(&mut self, channel: Channel, value: u8) {
            self.level = Some((channel, value));
            self.writes += 1;
        }
    }

    struct MockPin {
        level: Level,
        writes: u32,
    }

    impl DigitalOutput for MockPin {
        fn set_level(&mut self, level: Level) {
            self.level = level;
            self.writes += 1;
        }

        fn level(&self) -> Level {
            self.level
        }
    }

    fn pulse_loop() -> PulseLoop<MockDac, MockPin> {
        let dac = MockDac {
            level: None,
            writes: 0,
        };
        let pin = MockPin {
            level: Level::Low,
            writes: 0,
        };
        PulseLoop::new(PulseConfig::default(), dac, pin)
    }

    #[test]
    fn test_no_transition_within_period() {
        let config = PulseConfig::default();
        let state = PulseState::new(0);

        let (next, edge) = state.poll(50, &config);
        assert_eq!(next, state);
        assert!(edge.is_none());

        // Exactly the period is not enough
        let (next, edge) = state.poll(100, &config);
        assert_eq!(next, state);
        assert!(edge.is_none());
    }

    #[test]
    fn test_transition_after_period() {
        let config = PulseConfig::default();
        let (next, edge) = PulseState::new(0).poll(101, &config);

        assert_eq!(next.phase, Phase::Active);
        assert_eq!(next.last_transition_ms, 101);
        assert_eq!(
            edge,
            Some(PulseEdge {
                phase: Phase::Active,
                analog: 255,
                digital: Level::High,
            })
        );
    }

    #[test]
    fn test_transition_back_to_inactive() {
        let config = PulseConfig::default();
        let (active, _) = PulseState::new(0).poll(101, &config);

        let (same, edge) = active.poll(201, &config);
        assert_eq!(same, active);
        assert!(edge.is_none());

        let (inactive, edge) = active.poll(202, &config);
        assert_eq!(inactive.phase, Phase::Inactive);
        assert_eq!(inactive.last_transition_ms, 202);
        assert_eq!(edge.map(|e| (e.analog, e.digital)), Some((0, Level::Low)));
    }

    #[test]
    fn test_transition_across_clock_wrap() {
        let config = PulseConfig::default();
        let start = u32::MAX - 50;

        let (_, edge) = PulseState::new(start).poll(49, &config);
        assert!(edge.is_none());

        let (next, edge) = PulseState::new(start).poll(50, &config);
        assert!(edge.is_some());
        assert_eq!(next.last_transition_ms, 50);
    }

    #[test]
    fn test_loop_writes_only_on_transition() {
        let mut looped = pulse_loop();
        looped.start(0);

        for t in 0..=100 {
            looped.poll(t);
        }
        assert_eq!(looped.dac().writes, 0);
        assert_eq!(looped.pin().writes, 0);

        looped.poll(101);
        assert_eq!(looped.dac().level, Some((Channel(1), 255)));
        assert_eq!(looped.pin().level(), Level::High);
        assert_eq!(looped.state().phase, Phase::Active);
        assert_eq!(looped.idle_ms(), 1);
    }

    #[test]
    fn test_start_resets_timing() {
        let mut looped = pulse_loop();
        looped.start(1_000);

        assert!(looped.step(1_050).is_none());
        assert!(looped.step(1_101).is_some());
    }
}
