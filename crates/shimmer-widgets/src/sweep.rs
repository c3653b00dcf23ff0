//! The self-repeating gradient sweep.
//!
//! One sweep drives a tweened value `d` linearly from 0 to 2, sampled in
//! 16 ms ticks; each tick recomputes the band offsets `(d - 0.3, d,
//! d + 0.3)`. A completed sweep waits out the configured delay and then
//! starts over, re-reading the configuration at that point. The loop is an
//! explicit state machine rather than a callback rescheduling itself, so
//! cancellation is a plain checkpoint at every tick:
//!
//! - the session token covers both in-flight ticking and an in-flight
//!   delay (an outstanding wait aborts on the next tick), and
//! - [`SweepLoop::abort`] force-stops the named animation immediately,
//!   independent of token propagation.
//!
//! A loop that outlives its attach session detects the stale session id
//! and stops; it never races a successor loop.

use serde::{Deserialize, Serialize};
use shimmer_core::{
    duration_from_secs, Animator, AttachSession, BandOffsets, CancelToken, DiagnosticSink,
    SessionId, Tween, TICK_INTERVAL,
};
use std::time::Duration;

/// Fixed identifier of the sweep animation in the [`Animator`] registry.
pub const SKELETON_ANIMATION: &str = "SkeletonAnimation";

/// The driving value traverses [0, 2] per sweep.
const SWEEP_END: f64 = 2.0;

/// Live configuration read by the loop at each sweep boundary.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SweepConfig {
    /// Cycle duration multiplier in seconds; one sweep takes `1000 * speed` ms.
    pub speed: f64,
    /// Pause between sweeps in seconds.
    pub delay_seconds: f64,
}

/// Phase of the sweep loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SweepPhase {
    /// Never started.
    #[default]
    Idle,
    /// A sweep is ticking.
    Sweeping,
    /// Between sweeps, waiting out the configured delay.
    Delaying {
        /// Time left before the next sweep starts.
        remaining: Duration,
    },
    /// Terminated; no further scheduling occurs.
    Stopped,
}

/// The sweep/delay/stop state machine, advanced by the host ticker.
#[derive(Debug, Default)]
pub struct SweepLoop {
    animator: Animator,
    phase: SweepPhase,
    token: Option<CancelToken>,
    session: Option<SessionId>,
    pending: Duration,
}

impl SweepLoop {
    /// Create an idle loop.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start sweeping under an attach session.
    ///
    /// With no session the request is a lifecycle-ordering defect: a
    /// diagnostic is reported and nothing is scheduled. A session whose
    /// token is already canceled starts nothing, silently.
    pub fn start(
        &mut self,
        session: Option<&AttachSession>,
        config: &SweepConfig,
        sink: &dyn DiagnosticSink,
    ) {
        let Some(session) = session else {
            sink.report("skeleton loader: missing attach session, sweep not scheduled");
            return;
        };
        if session.token.is_canceled() {
            return;
        }

        self.token = Some(session.token.clone());
        self.session = Some(session.id);
        self.pending = Duration::ZERO;
        self.commit_sweep(config.speed);
        self.phase = SweepPhase::Sweeping;
    }

    /// Force-stop the named animation and terminate the loop.
    pub fn abort(&mut self) {
        self.animator.abort(SKELETON_ANIMATION);
        if self.phase != SweepPhase::Idle {
            self.phase = SweepPhase::Stopped;
        }
    }

    /// Advance by a time slice, invoking `write` with the band offsets
    /// once per elapsed 16 ms tick while a sweep is in flight.
    ///
    /// `current` is the owning widget's live session id; a mismatch means
    /// this loop is stale and must stop.
    pub fn advance<F: FnMut(BandOffsets)>(
        &mut self,
        dt: Duration,
        current: Option<SessionId>,
        config: &SweepConfig,
        mut write: F,
    ) {
        self.pending += dt;
        while self.pending >= TICK_INTERVAL {
            self.pending -= TICK_INTERVAL;
            self.tick(current, config, &mut write);
        }
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> SweepPhase {
        self.phase
    }

    /// Whether a sweep is actively ticking.
    #[must_use]
    pub fn is_sweeping(&self) -> bool {
        self.phase == SweepPhase::Sweeping
    }

    /// Whether the loop is waiting between sweeps.
    #[must_use]
    pub fn is_delaying(&self) -> bool {
        matches!(self.phase, SweepPhase::Delaying { .. })
    }

    /// Whether any work remains scheduled (ticking or waiting).
    #[must_use]
    pub fn has_scheduled_work(&self) -> bool {
        self.is_sweeping() || self.is_delaying()
    }

    fn commit_sweep(&mut self, speed: f64) {
        let duration = duration_from_secs(speed);
        self.animator
            .commit(SKELETON_ANIMATION, Tween::new(0.0, SWEEP_END, duration));
    }

    fn stop(&mut self) {
        self.animator.abort(SKELETON_ANIMATION);
        self.phase = SweepPhase::Stopped;
    }

    fn tick<F: FnMut(BandOffsets)>(
        &mut self,
        current: Option<SessionId>,
        config: &SweepConfig,
        write: &mut F,
    ) {
        match self.phase {
            SweepPhase::Idle | SweepPhase::Stopped => {}
            SweepPhase::Sweeping => self.tick_sweep(current, config, write),
            SweepPhase::Delaying { remaining } => self.tick_delay(current, config, remaining),
        }
    }

    fn tick_sweep<F: FnMut(BandOffsets)>(
        &mut self,
        current: Option<SessionId>,
        config: &SweepConfig,
        write: &mut F,
    ) {
        if self.session != current {
            self.stop();
            return;
        }
        let Some(token) = self.token.clone() else {
            self.stop();
            return;
        };
        if token.is_canceled() || !self.animator.is_running(SKELETON_ANIMATION) {
            self.stop();
            return;
        }

        self.animator.advance(TICK_INTERVAL);
        if let Some(d) = self.animator.value(SKELETON_ANIMATION) {
            write(BandOffsets::at(d));
        }

        if self.animator.is_complete(SKELETON_ANIMATION) {
            self.animator.abort(SKELETON_ANIMATION);
            if token.is_canceled() {
                self.phase = SweepPhase::Stopped;
                return;
            }
            let delay = duration_from_secs(config.delay_seconds);
            if delay.is_zero() {
                // Back-to-back restart, no observable pause.
                self.commit_sweep(config.speed);
            } else {
                self.phase = SweepPhase::Delaying { remaining: delay };
            }
        }
    }

    fn tick_delay(&mut self, current: Option<SessionId>, config: &SweepConfig, remaining: Duration) {
        if self.session != current {
            self.stop();
            return;
        }
        if self.token.as_ref().map_or(true, CancelToken::is_canceled) {
            self.stop();
            return;
        }

        let remaining = remaining.saturating_sub(TICK_INTERVAL);
        if remaining.is_zero() {
            // Next sweep re-reads the configuration.
            self.commit_sweep(config.speed);
            self.phase = SweepPhase::Sweeping;
        } else {
            self.phase = SweepPhase::Delaying { remaining };
        }
    }
}
