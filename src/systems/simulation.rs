//! Frame driver
//!
//! Plays the part of the render loop: produces one millisecond timestamp
//! per frame and hands it to the session.
//! - Timestamp generation (wall clock or fixed step)
//! - Session frame stepping
//! - Periodic position logging

use std::time::{Duration, Instant};

use orrery_core::{FrameReport, PhysicsError, Session};

/// Source of per-frame timestamps in milliseconds
#[derive(Clone, Debug)]
pub enum FrameClock {
    /// Milliseconds since the clock was created, read from a monotonic clock
    Realtime { start: Instant },
    /// Advances by a fixed interval on every tick
    Fixed { interval_ms: f64, now_ms: f64 },
}

impl FrameClock {
    /// Wall-clock timestamps starting now
    pub fn realtime() -> Self {
        FrameClock::Realtime {
            start: Instant::now(),
        }
    }

    /// Deterministic timestamps: `interval_ms`, `2 * interval_ms`, ...
    pub fn fixed(interval_ms: f64) -> Self {
        FrameClock::Fixed {
            interval_ms,
            now_ms: 0.0,
        }
    }

    /// Timestamp for the next frame
    pub fn tick(&mut self) -> f64 {
        match self {
            FrameClock::Realtime { start } => start.elapsed().as_secs_f64() * 1000.0,
            FrameClock::Fixed {
                interval_ms,
                now_ms,
            } => {
                *now_ms += *interval_ms;
                *now_ms
            }
        }
    }

    pub fn is_realtime(&self) -> bool {
        matches!(self, FrameClock::Realtime { .. })
    }
}

/// Result of a simulation update
pub struct SimulationResult {
    /// Timestamp the frame ran with
    pub now: f64,
    /// What the stepper did
    pub report: FrameReport,
}

/// Drives a session one frame at a time
pub struct SimulationSystem {
    clock: FrameClock,
    frames: u64,
    log_every_n_frames: u64,
}

impl SimulationSystem {
    /// Create a simulation system reading from the given clock
    pub fn new(clock: FrameClock) -> Self {
        Self {
            clock,
            frames: 0,
            log_every_n_frames: 0,
        }
    }

    /// Log the orbiter position every `n` frames (0 disables)
    pub fn with_log_interval(mut self, n: u64) -> Self {
        self.log_every_n_frames = n;
        self
    }

    /// Frames run so far
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Run one simulation frame
    pub fn update(&mut self, session: &mut Session) -> Result<SimulationResult, PhysicsError> {
        let now = self.clock.tick();
        let report = session.frame(now)?;
        self.frames += 1;

        if self.log_every_n_frames > 0 && self.frames % self.log_every_n_frames == 0 {
            let pos = session.orbiter_position()?;
            log::debug!(
                "frame {} t={:.0}ms {} ({:.2}, {:.2}, {:.2}) [{}]",
                self.frames,
                now,
                session.orbiter_name(),
                pos.x,
                pos.y,
                pos.z,
                report.orbiter
            );
        }

        Ok(SimulationResult { now, report })
    }

    /// Run frames until the clock passes `duration_ms`
    ///
    /// With a realtime clock, sleeps `frame_interval_ms` between frames.
    /// Stops early once the session is frozen. Returns the number of frames run.
    pub fn run_for(
        &mut self,
        session: &mut Session,
        duration_ms: f64,
        frame_interval_ms: f64,
    ) -> Result<u64, PhysicsError> {
        let start_frames = self.frames;
        let pause = if frame_interval_ms.is_finite() && frame_interval_ms > 0.0 {
            Duration::from_secs_f64(frame_interval_ms / 1000.0)
        } else {
            Duration::ZERO
        };

        loop {
            let result = self.update(session)?;
            if result.report.is_frozen() {
                log::info!("All bodies frozen at t={:.0}ms, stopping", result.now);
                break;
            }
            if result.now >= duration_ms {
                break;
            }
            if self.clock.is_realtime() {
                std::thread::sleep(pause);
            }
        }

        Ok(self.frames - start_frames)
    }
}

impl Default for SimulationSystem {
    fn default() -> Self {
        Self::new(FrameClock::realtime())
    }
}
