//! Temporal smoothing and lock state machine.
//!
//! Per-frame estimates are noisy; the [`Stabilizer`] accumulates them in a
//! bounded history, commits to one aggregated value once enough frames have
//! arrived, and then holds that value against bounded fluctuation. A
//! sustained run of disagreeing frames is read as an identity change: the
//! tracked subject was replaced, so the machine resets and accumulates
//! fresh.
//!
//! One instance owns the state for exactly one subject stream and is driven
//! synchronously, one raw record per call, in strict arrival order.

use std::collections::VecDeque;

use tracing::debug;

use crate::types::SkinMetrics;

/// Most recent raw records kept while accumulating.
pub const HISTORY_CAPACITY: usize = 90;

/// Frames required before the stabilizer commits to a locked value.
pub const LOCK_THRESHOLD: usize = 30;

/// Maximum age deviation, in years, a locked value tolerates per frame.
pub const AGE_TOLERANCE: i32 = 8;

/// Consecutive out-of-tolerance frames beyond this count mean the tracked
/// subject changed.
pub const MISMATCH_LIMIT: u32 = 20;

/// Fraction of low-end age samples dropped by the trimmed mean.
pub const TRIM_FRACTION: f64 = 0.2;

/// Lock/unlock duality, kept as a tagged variant so both branches of the
/// state machine are explicit and exhaustive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockState {
    /// Accumulating raw frames toward a lock.
    Unlocked,
    /// Committed to `value`; `mismatch_count` tracks the current streak of
    /// out-of-tolerance frames.
    Locked {
        value: SkinMetrics,
        mismatch_count: u32,
    },
}

/// Bounded-history temporal smoother for one subject stream.
#[derive(Debug, Clone)]
pub struct Stabilizer {
    history: VecDeque<SkinMetrics>,
    state: LockState,
}

impl Default for Stabilizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Stabilizer {
    pub fn new() -> Self {
        Self {
            history: VecDeque::with_capacity(LOCK_THRESHOLD),
            state: LockState::Unlocked,
        }
    }

    pub fn state(&self) -> &LockState {
        &self.state
    }

    pub fn is_locked(&self) -> bool {
        matches!(self.state, LockState::Locked { .. })
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Forget everything and start accumulating as if freshly constructed.
    /// The explicit hook for an externally signalled subject change.
    pub fn reset(&mut self) {
        self.history.clear();
        self.state = LockState::Unlocked;
    }

    /// Feed one raw per-frame record, in arrival order, and get the
    /// stabilized record for that frame.
    ///
    /// While unlocked, the raw record passes through unchanged until
    /// [`LOCK_THRESHOLD`] frames have accumulated; the lock then commits to
    /// the aggregate of the window. While locked, the locked value is
    /// returned as long as incoming ages stay within [`AGE_TOLERANCE`]
    /// years; a streak of more than [`MISMATCH_LIMIT`] outliers resets the
    /// machine, and that triggering frame's raw record is returned while
    /// the next call starts fresh accumulation.
    pub fn update(&mut self, raw: SkinMetrics) -> SkinMetrics {
        match &mut self.state {
            LockState::Unlocked => {
                if self.history.len() == HISTORY_CAPACITY {
                    self.history.pop_front();
                }
                self.history.push_back(raw);
                if self.history.len() < LOCK_THRESHOLD {
                    return raw;
                }

                let value = aggregate(self.history.make_contiguous());
                debug!(
                    age = value.estimated_age,
                    frames = self.history.len(),
                    "lock acquired"
                );
                // Stale frames must not bias a future re-lock.
                self.history.clear();
                self.state = LockState::Locked {
                    value,
                    mismatch_count: 0,
                };
                value
            }
            LockState::Locked {
                value,
                mismatch_count,
            } => {
                let delta =
                    (i32::from(raw.estimated_age) - i32::from(value.estimated_age)).abs();
                if delta <= AGE_TOLERANCE {
                    *mismatch_count = 0;
                    return *value;
                }

                *mismatch_count += 1;
                if *mismatch_count > MISMATCH_LIMIT {
                    debug!(
                        locked_age = value.estimated_age,
                        raw_age = raw.estimated_age,
                        "sustained mismatch, treating as new subject"
                    );
                    self.history.clear();
                    self.state = LockState::Unlocked;
                    return raw;
                }
                *value
            }
        }
    }
}

/// Aggregate a full accumulation window: trimmed mean for the age, plain
/// mean for the sub-metrics, both rounded.
fn aggregate(window: &[SkinMetrics]) -> SkinMetrics {
    let mut ages: Vec<u8> = window.iter().map(|m| m.estimated_age).collect();
    ages.sort_unstable();
    let cut = (ages.len() as f64 * TRIM_FRACTION).floor() as usize;
    let kept = &ages[cut..];
    let age = (kept.iter().map(|&a| u32::from(a)).sum::<u32>() as f64 / kept.len() as f64)
        .round() as u8;

    SkinMetrics {
        wrinkles: mean_of(window, |m| m.wrinkles),
        texture: mean_of(window, |m| m.texture),
        volume: mean_of(window, |m| m.volume),
        eye_aging: mean_of(window, |m| m.eye_aging),
        skin_tone: mean_of(window, |m| m.skin_tone),
        estimated_age: age,
    }
}

fn mean_of(window: &[SkinMetrics], field: impl Fn(&SkinMetrics) -> u8) -> u8 {
    let sum: u32 = window.iter().map(|m| u32::from(field(m))).sum();
    (sum as f64 / window.len() as f64).round() as u8
}
