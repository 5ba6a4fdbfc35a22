//! Lock session state and its timers

use lockon_core::{EntityId, TimerHandle, TimerService};

/// Which session timer fired
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LockTimerKind {
    /// Line of sight has been lost for the whole break delay
    BreakLineOfSight,
    /// The post-switch cooldown is over
    SwitchCooldown,
}

/// Timer payload, tagged with the session that scheduled it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LockTimer {
    pub session: u64,
    pub kind: LockTimerKind,
}

/// State that only exists while a target is locked.
///
/// The session owns the handles of its pending timers; [`LockSession::end`]
/// is the only way to dispose of it and cancels them.
#[derive(Debug)]
pub struct LockSession {
    target: EntityId,
    generation: u64,
    line_of_sight_timer: Option<TimerHandle>,
    switch_timer: Option<TimerHandle>,
    switch_accumulator: f32,
}

impl LockSession {
    pub(crate) fn new(target: EntityId, generation: u64) -> Self {
        Self {
            target,
            generation,
            line_of_sight_timer: None,
            switch_timer: None,
            switch_accumulator: 0.0,
        }
    }

    pub fn target(&self) -> EntityId {
        self.target
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// True while the line-of-sight break delay is running
    pub fn is_breaking_line_of_sight(&self) -> bool {
        self.line_of_sight_timer.is_some()
    }

    /// True during the cooldown that follows a switch
    pub fn is_switching(&self) -> bool {
        self.switch_timer.is_some()
    }

    pub fn switch_accumulator(&self) -> f32 {
        self.switch_accumulator
    }

    /// Whether a fired timer was scheduled by this session
    pub fn owns(&self, timer: &LockTimer) -> bool {
        timer.session == self.generation
    }

    pub(crate) fn set_target(&mut self, target: EntityId) {
        self.target = target;
    }

    pub(crate) fn accumulate(&mut self, amount: f32) -> f32 {
        self.switch_accumulator += amount;
        self.switch_accumulator
    }

    pub(crate) fn reset_accumulator(&mut self) {
        self.switch_accumulator = 0.0;
    }

    pub(crate) fn start_breaking_line_of_sight<T: TimerService<LockTimer>>(
        &mut self,
        timers: &mut T,
        delay: f32,
    ) {
        if self.line_of_sight_timer.is_some() {
            return;
        }
        let handle = timers.schedule(delay, self.timer(LockTimerKind::BreakLineOfSight));
        self.line_of_sight_timer = Some(handle);
    }

    pub(crate) fn cancel_breaking_line_of_sight<T: TimerService<LockTimer>>(&mut self, timers: &mut T) {
        if let Some(handle) = self.line_of_sight_timer.take() {
            timers.cancel(handle);
        }
    }

    pub(crate) fn start_switch_cooldown<T: TimerService<LockTimer>>(
        &mut self,
        timers: &mut T,
        cooldown: f32,
    ) {
        if let Some(handle) = self.switch_timer.take() {
            timers.cancel(handle);
        }
        let handle = timers.schedule(cooldown, self.timer(LockTimerKind::SwitchCooldown));
        self.switch_timer = Some(handle);
    }

    /// Forget a timer that has just fired
    pub(crate) fn timer_fired(&mut self, kind: LockTimerKind) {
        match kind {
            LockTimerKind::BreakLineOfSight => self.line_of_sight_timer = None,
            LockTimerKind::SwitchCooldown => self.switch_timer = None,
        }
    }

    /// Tear the session down, cancelling every pending timer. Returns the last target.
    pub(crate) fn end<T: TimerService<LockTimer>>(mut self, timers: &mut T) -> EntityId {
        self.cancel_breaking_line_of_sight(timers);
        if let Some(handle) = self.switch_timer.take() {
            timers.cancel(handle);
        }
        self.target
    }

    fn timer(&self, kind: LockTimerKind) -> LockTimer {
        LockTimer {
            session: self.generation,
            kind,
        }
    }
}
