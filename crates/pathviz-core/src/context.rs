//! Per-run animation context: a cooperative cancellation token plus the
//! per-step delay.
//!
//! A fresh [`AnimationContext`] is created for every run. Clones share the
//! same state, so the caller keeps one clone as its cancel handle and hands
//! another to the running task.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::thread;
use std::time::Duration;

// ---------------------------------------------------------------------------
// AnimationSpeed
// ---------------------------------------------------------------------------

/// Preset step delays, in milliseconds.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AnimationSpeed {
    VerySlow,
    Slow,
    #[default]
    Normal,
    Fast,
    VeryFast,
}

impl AnimationSpeed {
    pub const ALL: [AnimationSpeed; 5] = [
        AnimationSpeed::VerySlow,
        AnimationSpeed::Slow,
        AnimationSpeed::Normal,
        AnimationSpeed::Fast,
        AnimationSpeed::VeryFast,
    ];

    /// Milliseconds per animation step.
    pub const fn millis(self) -> u64 {
        match self {
            Self::VerySlow => 200,
            Self::Slow => 100,
            Self::Normal => 50,
            Self::Fast => 25,
            Self::VeryFast => 10,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::VerySlow => "Very Slow",
            Self::Slow => "Slow",
            Self::Normal => "Normal",
            Self::Fast => "Fast",
            Self::VeryFast => "Very Fast",
        }
    }
}

impl fmt::Display for AnimationSpeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// AnimationContext
// ---------------------------------------------------------------------------

#[derive(Debug)]
struct Shared {
    cancel: AtomicBool,
    speed: AtomicU64,
}

/// Cooperative cancellation token and step timing for one run.
#[derive(Clone, Debug)]
pub struct AnimationContext {
    shared: Arc<Shared>,
}

impl AnimationContext {
    /// Create a new, non-cancelled context with `speed` milliseconds per step.
    pub fn new(speed: u64) -> Self {
        Self {
            shared: Arc::new(Shared {
                cancel: AtomicBool::new(false),
                speed: AtomicU64::new(speed),
            }),
        }
    }

    /// Whether cancellation has been requested.
    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.shared.cancel.load(Ordering::Relaxed)
    }

    /// Request cancellation. Observed at the next checkpoint of the run.
    #[inline]
    pub fn cancel(&self) {
        self.shared.cancel.store(true, Ordering::Relaxed);
    }

    /// Milliseconds per step.
    #[inline]
    pub fn speed(&self) -> u64 {
        self.shared.speed.load(Ordering::Relaxed)
    }

    /// Change the step delay; takes effect from the next pause.
    #[inline]
    pub fn set_speed(&self, speed: u64) {
        self.shared.speed.store(speed, Ordering::Relaxed);
    }

    /// Delay of one full step.
    #[inline]
    pub fn step(&self) -> Duration {
        Duration::from_millis(self.speed())
    }

    /// Delay of half a step, used by paired maze fills.
    #[inline]
    pub fn half_step(&self) -> Duration {
        Duration::from_millis(self.speed() / 2)
    }

    /// Suspend the calling thread for `d`. Zero durations return immediately.
    pub fn pause(&self, d: Duration) {
        if !d.is_zero() {
            thread::sleep(d);
        }
    }
}

impl From<AnimationSpeed> for AnimationContext {
    fn from(speed: AnimationSpeed) -> Self {
        Self::new(speed.millis())
    }
}

impl Default for AnimationContext {
    fn default() -> Self {
        AnimationSpeed::default().into()
    }
}
