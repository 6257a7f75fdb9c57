//! Monotonic clock for frame pacing
//!
//! The clock turns raw hardware tick readings into elapsed seconds anchored at
//! the first read. Some timer sources are known to jump backwards now and then;
//! a backward reading is rejected and the previous value is held, so callers
//! only ever see a non-decreasing sequence.
//!
//! ```text
//! Clock<Unstarted> ──initialize()──► Clock<Ticking> ──now()──► seconds
//! ```

use statum::{machine, state};
use std::collections::VecDeque;
use std::fmt::Debug;
use std::time::Instant;
use tracing::{debug, info, trace};

/// Raw hardware counter the clock samples.
pub trait TickSource: Debug + Send {
    /// Ticks per second. Read once, during [`Clock::initialize`].
    fn frequency(&self) -> u64;

    /// Current counter value. May glitch backwards.
    fn counter(&mut self) -> i64;
}

/// Nanosecond ticks measured from an [`Instant`] captured at construction.
#[derive(Debug, Clone)]
pub struct InstantTicks {
    base: Instant,
}

impl InstantTicks {
    pub fn new() -> Self {
        Self {
            base: Instant::now(),
        }
    }
}

impl Default for InstantTicks {
    fn default() -> Self {
        Self::new()
    }
}

impl TickSource for InstantTicks {
    fn frequency(&self) -> u64 {
        1_000_000_000
    }

    fn counter(&mut self) -> i64 {
        i64::try_from(self.base.elapsed().as_nanos()).unwrap_or(i64::MAX)
    }
}

/// Replays a fixed list of counter readings.
///
/// Once the script runs out the last reading repeats, which looks like a
/// stalled timer to the clock.
#[derive(Debug, Clone)]
pub struct ScriptedTicks {
    frequency: u64,
    readings: VecDeque<i64>,
    last: i64,
}

impl ScriptedTicks {
    pub fn new(frequency: u64, readings: impl IntoIterator<Item = i64>) -> Self {
        Self {
            frequency,
            readings: readings.into_iter().collect(),
            last: 0,
        }
    }
}

impl TickSource for ScriptedTicks {
    fn frequency(&self) -> u64 {
        self.frequency
    }

    fn counter(&mut self) -> i64 {
        if let Some(next) = self.readings.pop_front() {
            self.last = next;
        }
        self.last
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ClockError {
    #[error("Timer source reports a tick frequency of zero")]
    ZeroFrequency,
}

#[state]
#[derive(Debug, Clone)]
pub enum ClockPhase {
    Unstarted,
    Ticking,
}

#[machine]
#[derive(Debug)]
pub struct Clock<S: ClockPhase> {
    source: Box<dyn TickSource>,

    // Captured on the first read after initialization
    anchor_ticks: Option<i64>,

    tick_frequency: u64,

    last_good_ticks: i64,
}

impl Clock<Unstarted> {
    pub fn create(source: impl TickSource + 'static) -> Self {
        debug!("Creating clock over {:?}", source);
        Self::new(Box::new(source), None, 0, 0)
    }

    /// Read the tick frequency and make the clock usable.
    pub fn initialize(mut self) -> Result<Clock<Ticking>, ClockError> {
        let frequency = self.source.frequency();
        if frequency == 0 {
            return Err(ClockError::ZeroFrequency);
        }
        self.tick_frequency = frequency;
        info!("Clock initialized at {} ticks/s", frequency);
        Ok(self.transition())
    }
}

impl Clock<Ticking> {
    /// Seconds since the first read. Never decreases.
    pub fn now(&mut self) -> f64 {
        let ticks = self.source.counter();

        let anchor = match self.anchor_ticks {
            Some(anchor) => {
                if ticks >= self.last_good_ticks {
                    self.last_good_ticks = ticks;
                } else {
                    trace!(
                        "Rejected backward tick reading {} (holding {})",
                        ticks,
                        self.last_good_ticks
                    );
                }
                anchor
            }
            None => {
                self.anchor_ticks = Some(ticks);
                self.last_good_ticks = ticks;
                ticks
            }
        };

        let elapsed = i128::from(self.last_good_ticks) - i128::from(anchor);
        elapsed as f64 / self.tick_frequency as f64
    }

    /// `floor(now() * 1000)`, saturating at `u32::MAX`.
    pub fn now_milliseconds(&mut self) -> u32 {
        // float-to-int casts saturate
        (self.now() * 1000.0).floor() as u32
    }

    pub fn tick_frequency(&self) -> u64 {
        self.tick_frequency
    }
}
