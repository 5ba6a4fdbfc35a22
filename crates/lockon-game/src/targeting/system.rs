//! Lock state machine driving acquisition, release, switching and aiming

use glam::Vec3;
use lockon_core::{EntityId, Rotator, TimerQueue, TimerService};
use tracing::{debug, info};

use super::config::TargetConfig;
use super::events::{TargetEvent, UnlockReason};
use super::filter::{filter_candidates, DistanceRange};
use super::geometry::{distance, look_at_rotation, pitch_offset, rinterp_to};
use super::line_of_sight::{
    has_line_of_sight, tick_line_of_sight, LineOfSightState, LineOfSightTick,
};
use super::selector::find_nearest_target;
use super::session::{LockSession, LockTimer, LockTimerKind};
use super::subject::ControlledSubject;
use super::switch::{process_switch, SwitchOutcome};
use super::world::TargetWorld;

/// Target lock-on engine for one controlled subject.
///
/// Call [`TargetSystem::update`] exactly once per frame. Acquisition, release
/// and switch input may be fed at any point in between; notifications are
/// queued and handed out by [`TargetSystem::drain_events`].
pub struct TargetSystem<T: TimerService<LockTimer> = TimerQueue<LockTimer>> {
    config: TargetConfig,
    subject: ControlledSubject,
    session: Option<LockSession>,
    timers: T,
    sessions_started: u64,
    events: Vec<TargetEvent>,
}

impl TargetSystem {
    /// Create a target system with the built-in timer queue
    pub fn new(config: TargetConfig, subject: ControlledSubject) -> Self {
        Self::with_timers(config, subject, TimerQueue::new())
    }
}

impl<T: TimerService<LockTimer>> TargetSystem<T> {
    /// Create a target system backed by a host-provided timer service
    pub fn with_timers(config: TargetConfig, subject: ControlledSubject, timers: T) -> Self {
        Self {
            config,
            subject,
            session: None,
            timers,
            sessions_started: 0,
            events: Vec::new(),
        }
    }

    pub fn config(&self) -> &TargetConfig {
        &self.config
    }

    pub fn subject(&self) -> &ControlledSubject {
        &self.subject
    }

    /// Mutable access for the host to feed position and camera each frame
    pub fn subject_mut(&mut self) -> &mut ControlledSubject {
        &mut self.subject
    }

    /// The active session, if locked
    pub fn session(&self) -> Option<&LockSession> {
        self.session.as_ref()
    }

    pub fn is_locked(&self) -> bool {
        self.session.is_some()
    }

    pub fn active_target(&self) -> Option<EntityId> {
        self.session.as_ref().map(LockSession::target)
    }

    /// Visibility of the locked target, `None` when unlocked
    pub fn line_of_sight_state(&self) -> Option<LineOfSightState> {
        self.session.as_ref().map(|session| {
            if session.is_breaking_line_of_sight() {
                LineOfSightState::Breaking
            } else {
                LineOfSightState::Clear
            }
        })
    }

    /// Take every event queued since the last call
    pub fn drain_events(&mut self) -> Vec<TargetEvent> {
        std::mem::take(&mut self.events)
    }

    /// Lock on to the nearest visible target within the enable distance.
    ///
    /// Returns true when a new lock was created; false if already locked or
    /// nothing qualifies.
    pub fn acquire_target<W: TargetWorld + ?Sized>(&mut self, world: &W) -> bool {
        if self.session.is_some() {
            debug!("Acquire ignored, already locked");
            return false;
        }

        let all = world.entities_with_tag(&self.config.targetable_tag);
        let candidates = filter_candidates(
            world,
            &all,
            &self.subject,
            DistanceRange::up_to(self.config.minimum_distance_to_enable),
        );

        match find_nearest_target(world, &candidates, &self.subject) {
            Some(target) => {
                self.begin_session(target);
                true
            }
            None => {
                debug!("No target to acquire among {} candidates", candidates.len());
                false
            }
        }
    }

    /// Release the lock. Does nothing when unlocked.
    pub fn release_target(&mut self) {
        if self.session.is_some() {
            self.end_session(UnlockReason::Released);
        }
    }

    /// Release when locked, acquire otherwise. Returns whether a lock is held afterwards.
    pub fn toggle_target<W: TargetWorld + ?Sized>(&mut self, world: &W) -> bool {
        if self.session.is_some() {
            self.release_target();
            false
        } else {
            self.acquire_target(world)
        }
    }

    /// Feed switch input: `axis_value * delta` is accumulated against the threshold
    pub fn switch_target<W: TargetWorld + ?Sized>(
        &mut self,
        world: &W,
        axis_value: f32,
        delta: f32,
    ) -> SwitchOutcome {
        let Some(session) = self.session.as_mut() else {
            return SwitchOutcome::Ignored;
        };

        let outcome = process_switch(
            session,
            &mut self.timers,
            world,
            &self.subject,
            &self.config,
            axis_value,
            delta,
        );
        if let SwitchOutcome::Switched { from, to } = outcome {
            self.events.push(TargetEvent::Switched { from, to });
        }
        outcome
    }

    /// [`TargetSystem::switch_target`] with a delta of 1.0
    pub fn switch_target_axis<W: TargetWorld + ?Sized>(
        &mut self,
        world: &W,
        axis_value: f32,
    ) -> SwitchOutcome {
        self.switch_target(world, axis_value, 1.0)
    }

    /// Per-frame update: fire due timers, check the target, monitor line of
    /// sight and aim the control rotation
    pub fn update<W: TargetWorld + ?Sized>(&mut self, world: &W, dt: f32) {
        for timer in self.timers.advance(dt) {
            self.handle_timer(world, timer);
        }

        let Some(target) = self.active_target() else {
            return;
        };

        let Some(target_position) = world.position_of(target) else {
            self.end_session(UnlockReason::TargetInvalid);
            return;
        };

        if self.config.break_on_distance
            && distance(self.subject.position(), target_position)
                > self.config.minimum_distance_to_enable
        {
            self.end_session(UnlockReason::OutOfRange);
            return;
        }

        if let Some(session) = self.session.as_mut() {
            let delay = self.config.break_line_of_sight_delay;
            match tick_line_of_sight(session, &mut self.timers, world, &self.subject, delay) {
                LineOfSightTick::StartedBreaking => {
                    info!("Lost sight of {}, releasing in {:.2}s unless it reappears", target, delay);
                }
                LineOfSightTick::Recovered => info!("Sight of {} restored", target),
                LineOfSightTick::Clear | LineOfSightTick::StillBreaking => {}
            }
        }

        self.update_rotation(target, target_position, dt);
    }

    /// Control rotation that aims the subject at `target_position`, with the
    /// distance-based pitch offset applied when enabled
    pub fn rotation_on_target(&self, target_position: Vec3) -> Rotator {
        let origin = self.subject.position();
        let look_at = look_at_rotation(origin, target_position);

        let mut pitch = look_at.pitch;
        if self.config.adjust_pitch_based_on_distance {
            pitch += pitch_offset(
                distance(origin, target_position),
                self.config.pitch_distance_coefficient,
                self.config.pitch_distance_offset,
                self.config.pitch_min,
                self.config.pitch_max,
            );
        }

        Rotator::new(pitch, look_at.yaw, self.subject.control_rotation().roll)
    }

    fn update_rotation(&mut self, target: EntityId, target_position: Vec3, dt: f32) {
        let current = self.subject.control_rotation();

        if self.config.host_controls_rotation {
            self.events.push(TargetEvent::SetRotation {
                target,
                control_rotation: current,
            });
            return;
        }

        let desired = self.rotation_on_target(target_position);
        self.subject
            .set_control_rotation(rinterp_to(current, desired, dt, self.config.rotation_interp_speed));
    }

    fn handle_timer<W: TargetWorld + ?Sized>(&mut self, world: &W, timer: LockTimer) {
        let Some(session) = self.session.as_mut() else {
            debug!("Dropping {:?} timer fired while unlocked", timer.kind);
            return;
        };
        if !session.owns(&timer) {
            debug!(
                "Dropping {:?} timer from session {} (current {})",
                timer.kind,
                timer.session,
                session.generation()
            );
            return;
        }

        session.timer_fired(timer.kind);
        match timer.kind {
            LockTimerKind::SwitchCooldown => {
                debug!("Switch cooldown over");
            }
            LockTimerKind::BreakLineOfSight => {
                if has_line_of_sight(world, &self.subject, session.target()) {
                    debug!("Line of sight restored as the break delay expired");
                } else {
                    self.end_session(UnlockReason::LineOfSightLost);
                }
            }
        }
    }

    fn begin_session(&mut self, target: EntityId) {
        self.sessions_started += 1;
        self.session = Some(LockSession::new(target, self.sessions_started));

        if self.config.should_control_rotation {
            self.subject.set_rotation_control(true);
        }

        info!("Locked on to {}", target);
        self.events.push(TargetEvent::LockedOn { target });
    }

    /// The only way a session ends: cancels its timers, restores the subject,
    /// and emits a single lock-off
    fn end_session(&mut self, reason: UnlockReason) {
        let Some(session) = self.session.take() else {
            return;
        };
        let target = session.end(&mut self.timers);

        if self.config.should_control_rotation {
            self.subject.set_rotation_control(false);
        }

        let reported = match reason {
            UnlockReason::TargetInvalid if !self.config.report_stale_target => None,
            _ => Some(target),
        };

        info!("Locked off {} ({:?})", target, reason);
        self.events.push(TargetEvent::LockedOff {
            target: reported,
            reason,
        });
    }
}
