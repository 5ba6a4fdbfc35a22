//! Line-of-sight monitoring with a debounced release

use lockon_core::{EntityId, TimerService};

use super::selector::is_visible_from;
use super::session::{LockSession, LockTimer};
use super::subject::ControlledSubject;
use super::world::TargetWorld;

/// Visibility state of the locked target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineOfSightState {
    Clear,
    /// Hidden, with the break delay running
    Breaking,
}

/// What a monitor tick did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineOfSightTick {
    Clear,
    StartedBreaking,
    StillBreaking,
    Recovered,
}

impl LineOfSightTick {
    pub fn state(self) -> LineOfSightState {
        match self {
            Self::Clear | Self::Recovered => LineOfSightState::Clear,
            Self::StartedBreaking | Self::StillBreaking => LineOfSightState::Breaking,
        }
    }
}

/// Whether the target is still targetable, on screen, and unobstructed
pub fn has_line_of_sight<W: TargetWorld + ?Sized>(
    world: &W,
    subject: &ControlledSubject,
    target: EntityId,
) -> bool {
    let Some(position) = world.position_of(target) else {
        return false;
    };
    world.is_targetable(target) && is_visible_from(world, subject, target, position)
}

/// Run one monitor step against the session's target.
///
/// Losing sight schedules the break timer, regaining it before expiry
/// cancels the timer. Releasing the lock is left to the timer's expiry.
pub(crate) fn tick_line_of_sight<W, T>(
    session: &mut LockSession,
    timers: &mut T,
    world: &W,
    subject: &ControlledSubject,
    break_delay: f32,
) -> LineOfSightTick
where
    W: TargetWorld + ?Sized,
    T: TimerService<LockTimer>,
{
    let visible = has_line_of_sight(world, subject, session.target());

    match (visible, session.is_breaking_line_of_sight()) {
        (true, false) => LineOfSightTick::Clear,
        (true, true) => {
            session.cancel_breaking_line_of_sight(timers);
            LineOfSightTick::Recovered
        }
        (false, false) => {
            session.start_breaking_line_of_sight(timers, break_delay);
            LineOfSightTick::StartedBreaking
        }
        (false, true) => LineOfSightTick::StillBreaking,
    }
}
