//! Frame-driven game loop controller
//!
//! The host calls [`GameLoop::frame`] once per display refresh. Elapsed wall
//! time comes from an injectable [`Clock`] and is spent in fixed `SIM_DT`
//! ticks, so a 60 Hz display runs one tick per frame and the serve delay
//! tracks wall-clock time at any refresh rate.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS, SIM_DT};
use crate::sim::{GameState, Snapshot, TickInput, tick};
use crate::tuning::{Tuning, TuningError};

/// Monotonic time source
pub trait Clock {
    /// Time since an arbitrary fixed origin
    fn now(&self) -> Duration;
}

/// Wall clock backed by `std::time::Instant`
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: std::time::Instant,
}

#[cfg(not(target_arch = "wasm32"))]
impl Default for SystemClock {
    fn default() -> Self {
        Self {
            origin: std::time::Instant::now(),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// Hand-driven clock; clones share the same time
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<Duration>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.now.get()
    }
}

/// What the host should draw after a frame
#[derive(Debug, Clone)]
pub enum FrameOutput {
    /// Simulation advanced; draw the playfield
    Playfield { snapshot: Snapshot, ticks: u32 },
    /// Simulation suspended; draw the pause overlay
    Paused { snapshot: Snapshot },
}

impl FrameOutput {
    pub fn snapshot(&self) -> &Snapshot {
        match self {
            FrameOutput::Playfield { snapshot, .. } | FrameOutput::Paused { snapshot } => snapshot,
        }
    }

    pub fn is_paused(&self) -> bool {
        matches!(self, FrameOutput::Paused { .. })
    }
}

/// A play session driven by frame callbacks
pub struct GameLoop<C: Clock> {
    state: GameState,
    clock: C,
    accumulator: f32,
    last_frame: Option<Duration>,
    input: TickInput,
}

impl<C: Clock> GameLoop<C> {
    /// Start a match; the tuning is checked before any state is built
    pub fn new(seed: u64, tuning: Tuning, clock: C) -> Result<Self, TuningError> {
        tuning.validate()?;
        log::info!("New match with seed {}", seed);
        Ok(Self {
            state: GameState::new(seed, tuning),
            clock,
            accumulator: 0.0,
            last_frame: None,
            input: TickInput::default(),
        })
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Latest pointer y in arena coordinates; overwrites any unread value
    pub fn set_pointer_y(&mut self, y: f32) {
        self.input.pointer_y = Some(y);
    }

    pub fn demo_mode(&self) -> bool {
        self.input.demo_mode
    }

    pub fn set_demo_mode(&mut self, on: bool) {
        if self.input.demo_mode != on {
            log::info!("Demo mode: {}", on);
        }
        self.input.demo_mode = on;
    }

    pub fn is_paused(&self) -> bool {
        self.state.is_paused()
    }

    /// Pause or resume
    ///
    /// Wall time spent paused is discarded, so a pending serve keeps exactly
    /// the delay it had left.
    pub fn toggle_pause(&mut self) {
        self.state.toggle_pause();
        if !self.state.is_paused() {
            self.last_frame = Some(self.clock.now());
        }
        log::info!("{}", if self.state.is_paused() { "Paused" } else { "Resumed" });
    }

    /// Pause if running; no-op when already paused
    pub fn pause(&mut self) {
        if !self.state.is_paused() {
            self.toggle_pause();
        }
    }

    /// Start a fresh match with the same tuning
    pub fn restart(&mut self, seed: u64) {
        let tuning = self.state.tuning.clone();
        self.state = GameState::new(seed, tuning);
        self.accumulator = 0.0;
        self.last_frame = None;
        log::info!("Match restarted with seed {}", seed);
    }

    /// Run the simulation for one display refresh
    pub fn frame(&mut self) -> FrameOutput {
        let now = self.clock.now();
        let dt = match self.last_frame {
            Some(prev) => now.saturating_sub(prev).as_secs_f32(),
            None => SIM_DT,
        };
        self.last_frame = Some(now);

        if self.state.is_paused() {
            return FrameOutput::Paused {
                snapshot: self.state.snapshot(),
            };
        }

        self.accumulator += dt.min(MAX_FRAME_DT);

        let mut ticks = 0;
        while self.accumulator >= SIM_DT && ticks < MAX_SUBSTEPS {
            tick(&mut self.state, &self.input, SIM_DT);
            self.accumulator -= SIM_DT;
            ticks += 1;
        }

        FrameOutput::Playfield {
            snapshot: self.state.snapshot(),
            ticks,
        }
    }
}
