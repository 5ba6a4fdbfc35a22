//! Time system for the Lockon workspace
//!
//! Handles frame delta time and cancellable delayed timers that fire on a later
//! frame's update pass.

use serde::{Deserialize, Serialize};

/// Configuration for game time
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeConfig {
    /// How many in-game seconds pass per real second
    pub time_scale: f32,
    /// Maximum delta time to prevent spiral of death
    pub max_delta_time: f32,
}

impl Default for TimeConfig {
    fn default() -> Self {
        Self {
            time_scale: 1.0,
            max_delta_time: 0.25,
        }
    }
}

/// Game time tracking
#[derive(Debug, Clone, Default)]
pub struct GameTime {
    /// Configuration
    pub config: TimeConfig,
    /// Time since game start in seconds
    pub total_time: f64,
    /// Delta time for this frame (clamped and scaled)
    pub delta_time: f32,
    /// Unscaled delta time
    pub unscaled_delta_time: f32,
    /// Frame counter
    pub frame_count: u64,
}

impl GameTime {
    /// Create a new game time with custom config
    pub fn new(config: TimeConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    /// Update the game time with the raw delta from the previous frame
    pub fn update(&mut self, raw_delta: f32) {
        self.unscaled_delta_time = raw_delta.clamp(0.0, self.config.max_delta_time);
        self.frame_count += 1;
        self.delta_time = self.unscaled_delta_time * self.config.time_scale;
        self.total_time += self.delta_time as f64;
    }
}

/// Handle to a scheduled timer, used to cancel it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerHandle(u64);

/// Delayed invocation service.
///
/// Scheduled payloads are handed back from `advance` once their delay has
/// elapsed. A payload is returned at most once; cancelled timers never fire.
pub trait TimerService<P> {
    /// Schedule `payload` to fire after `delay` seconds
    fn schedule(&mut self, delay: f32, payload: P) -> TimerHandle;

    /// Cancel a pending timer. Returns false if it already fired or was cancelled.
    fn cancel(&mut self, handle: TimerHandle) -> bool;

    /// Whether the timer is still waiting to fire
    fn is_pending(&self, handle: TimerHandle) -> bool;

    /// Advance all timers by `dt` and return the payloads that fired, earliest deadline first
    fn advance(&mut self, dt: f32) -> Vec<P>;
}

#[derive(Debug, Clone)]
struct PendingTimer<P> {
    handle: TimerHandle,
    remaining: f32,
    payload: P,
}

/// Frame-driven timer queue
#[derive(Debug, Clone)]
pub struct TimerQueue<P> {
    timers: Vec<PendingTimer<P>>,
    next_handle: u64,
}

impl<P> TimerQueue<P> {
    /// Create an empty timer queue
    pub fn new() -> Self {
        Self {
            timers: Vec::new(),
            next_handle: 1,
        }
    }

    /// Number of timers waiting to fire
    pub fn pending_count(&self) -> usize {
        self.timers.len()
    }
}

impl<P> Default for TimerQueue<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> TimerService<P> for TimerQueue<P> {
    fn schedule(&mut self, delay: f32, payload: P) -> TimerHandle {
        let handle = TimerHandle(self.next_handle);
        self.next_handle += 1;
        self.timers.push(PendingTimer {
            handle,
            remaining: delay.max(0.0),
            payload,
        });
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) -> bool {
        let before = self.timers.len();
        self.timers.retain(|timer| timer.handle != handle);
        self.timers.len() != before
    }

    fn is_pending(&self, handle: TimerHandle) -> bool {
        self.timers.iter().any(|timer| timer.handle == handle)
    }

    fn advance(&mut self, dt: f32) -> Vec<P> {
        let mut fired = Vec::new();
        let mut waiting = Vec::with_capacity(self.timers.len());

        for mut timer in self.timers.drain(..) {
            timer.remaining -= dt;
            if timer.remaining <= 0.0 {
                fired.push(timer);
            } else {
                waiting.push(timer);
            }
        }
        self.timers = waiting;

        // Most overdue first; equal deadlines keep scheduling order
        fired.sort_by(|a, b| {
            a.remaining
                .total_cmp(&b.remaining)
                .then_with(|| a.handle.cmp(&b.handle))
        });
        fired.into_iter().map(|timer| timer.payload).collect()
    }
}
