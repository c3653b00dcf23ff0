//! Tweened values and the named-animation registry.
//!
//! The host ticker is expected to call [`Animator::advance`] on the main
//! thread; everything here is cooperative and single-threaded.

use crate::easing::Easing;
use std::collections::HashMap;
use std::time::Duration;

/// Nominal tick period of the host animation ticker (≈60 Hz).
pub const TICK_INTERVAL: Duration = Duration::from_millis(16);

/// Convert seconds to a `Duration`, treating non-positive and non-finite
/// inputs as zero.
///
/// Misconfigured speeds and delays degrade to an instantly-completing
/// animation rather than a rejected one.
#[must_use]
pub fn duration_from_secs(secs: f64) -> Duration {
    if secs.is_finite() && secs > 0.0 {
        Duration::from_secs_f64(secs)
    } else {
        Duration::ZERO
    }
}

/// A value tweened from `from` to `to` over a fixed duration.
#[derive(Debug, Clone, PartialEq)]
pub struct Tween {
    /// Start value
    pub from: f64,
    /// End value
    pub to: f64,
    /// Total duration
    pub duration: Duration,
    /// Elapsed time
    pub elapsed: Duration,
    /// Easing function
    pub easing: Easing,
}

impl Tween {
    /// Create a new tween.
    #[must_use]
    pub fn new(from: f64, to: f64, duration: Duration) -> Self {
        Self {
            from,
            to,
            duration,
            elapsed: Duration::ZERO,
            easing: Easing::Linear,
        }
    }

    /// Set the easing function.
    #[must_use]
    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Get the current value.
    ///
    /// A zero-duration tween reports the end value immediately.
    #[must_use]
    pub fn value(&self) -> f64 {
        let eased = self.easing.apply(self.progress());
        self.from + (self.to - self.from) * eased
    }

    /// Progress from 0.0 to 1.0.
    #[must_use]
    pub fn progress(&self) -> f64 {
        if self.duration.is_zero() {
            1.0
        } else {
            (self.elapsed.as_secs_f64() / self.duration.as_secs_f64()).clamp(0.0, 1.0)
        }
    }

    /// Whether the tween has reached its end value.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.elapsed >= self.duration
    }

    /// Advance by a time step, saturating at the duration.
    pub fn advance(&mut self, dt: Duration) {
        self.elapsed = (self.elapsed + dt).min(self.duration);
    }
}

/// Registry of named tweens.
///
/// Committing under an existing name replaces the prior animation, and
/// aborting by name drops the animation immediately so no further ticks
/// are delivered for it. Repetition is never native: a completed tween
/// stays complete until the caller replaces or aborts it.
#[derive(Debug, Default)]
pub struct Animator {
    animations: HashMap<String, Tween>,
}

impl Animator {
    /// Create an empty animator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Commit a tween under a name, replacing any prior animation.
    pub fn commit(&mut self, name: &str, tween: Tween) {
        self.animations.insert(name.to_string(), tween);
    }

    /// Abort an animation by name.
    ///
    /// Returns true if an animation was running under that name.
    pub fn abort(&mut self, name: &str) -> bool {
        self.animations.remove(name).is_some()
    }

    /// Advance all animations by a time step.
    pub fn advance(&mut self, dt: Duration) {
        for tween in self.animations.values_mut() {
            tween.advance(dt);
        }
    }

    /// Get the current value of a named animation.
    #[must_use]
    pub fn value(&self, name: &str) -> Option<f64> {
        self.animations.get(name).map(Tween::value)
    }

    /// Whether an animation is registered under the name.
    #[must_use]
    pub fn is_running(&self, name: &str) -> bool {
        self.animations.contains_key(name)
    }

    /// Whether a named animation has completed its traversal.
    #[must_use]
    pub fn is_complete(&self, name: &str) -> bool {
        self.animations.get(name).is_some_and(Tween::is_complete)
    }

    /// Number of registered animations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.animations.len()
    }

    /// Whether no animations are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.animations.is_empty()
    }

    /// Remove all animations.
    pub fn clear(&mut self) {
        self.animations.clear();
    }
}
