//! Main loop driver
//!
//! Reads the clock and hands the elapsed time since the previous iteration to
//! the engine frame callback. There is no frame cap, no sleep and no minimum
//! delta: a delta of `0.0` is legal and pacing is the callback's business.

use tracing::info;

use crate::clock::{Clock, Ticking};

/// The engine's per-frame entry point.
pub trait Frame {
    fn frame(&mut self, delta_seconds: f64);
}

impl<F: FnMut(f64)> Frame for F {
    fn frame(&mut self, delta_seconds: f64) {
        self(delta_seconds)
    }
}

pub struct MainLoop {
    clock: Clock<Ticking>,
    last_time: f64,
}

impl MainLoop {
    pub fn new(mut clock: Clock<Ticking>) -> Self {
        let last_time = clock.now();
        Self { clock, last_time }
    }

    /// One iteration. Returns the delta handed to the frame.
    pub fn step(&mut self, frame: &mut impl Frame) -> f64 {
        let time = self.clock.now();
        let delta = time - self.last_time;
        frame.frame(delta);
        self.last_time = time;
        delta
    }

    /// Loop forever. Termination only happens through the fatal path or an
    /// external exit request.
    pub fn run(mut self, mut frame: impl Frame) -> ! {
        info!("Entering main loop at t={:.3}s", self.last_time);
        loop {
            self.step(&mut frame);
        }
    }

    pub fn last_time(&self) -> f64 {
        self.last_time
    }
}
