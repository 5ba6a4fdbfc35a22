//! Axis-driven target switching

use lockon_core::{EntityId, TimerService};
use serde::Serialize;
use tracing::{debug, info};

use super::config::TargetConfig;
use super::filter::{filter_candidates, DistanceRange};
use super::geometry::{angle_between, look_at_rotation};
use super::selector::select_nearest;
use super::session::{LockSession, LockTimer};
use super::subject::ControlledSubject;
use super::world::TargetWorld;

/// Side of the current target a switch searches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SwitchDirection {
    Left,
    Right,
}

impl SwitchDirection {
    /// Positive input means right
    pub fn from_input(value: f32) -> Self {
        if value > 0.0 {
            Self::Right
        } else {
            Self::Left
        }
    }

    /// Whether a signed yaw offset from the current target lies in this side's cone.
    ///
    /// Right covers `(0, cone]`, left covers `[-cone, 0)`; the current target's
    /// own bearing (exactly 0) belongs to neither.
    pub fn contains(self, angle: f32, cone: f32) -> bool {
        match self {
            Self::Right => angle > 0.0 && angle <= cone,
            Self::Left => angle < 0.0 && angle >= -cone,
        }
    }
}

/// Result of feeding one sample of switch input
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SwitchOutcome {
    /// No session, cooling down, or line of sight is breaking
    Ignored,
    /// Input accumulated but the threshold is not reached yet
    Accumulating { accumulator: f32 },
    /// The lock moved to a new target
    Switched { from: EntityId, to: EntityId },
    /// Threshold reached but nothing lies on the requested side
    NoCandidate { direction: SwitchDirection },
}

/// Farthest a switch may reach. Capped at the enable distance when the lock
/// breaks on distance, so a switch never lands on a target the next update drops.
pub fn switch_range(config: &TargetConfig) -> f32 {
    if config.break_on_distance {
        config
            .switch_distance_max
            .min(config.minimum_distance_to_enable)
    } else {
        config.switch_distance_max
    }
}

/// Accumulate `axis_value * delta` and switch once the threshold is crossed
pub(crate) fn process_switch<W, T>(
    session: &mut LockSession,
    timers: &mut T,
    world: &W,
    subject: &ControlledSubject,
    config: &TargetConfig,
    axis_value: f32,
    delta: f32,
) -> SwitchOutcome
where
    W: TargetWorld + ?Sized,
    T: TimerService<LockTimer>,
{
    if session.is_switching() || session.is_breaking_line_of_sight() {
        return SwitchOutcome::Ignored;
    }

    let current = session.target();
    let Some(current_position) = world.position_of(current) else {
        return SwitchOutcome::Ignored;
    };

    let amount = axis_value * delta;
    if !amount.is_finite() {
        debug!("Ignoring non-finite switch input {} * {}", axis_value, delta);
        return SwitchOutcome::Ignored;
    }

    let accumulator = session.accumulate(amount);
    if accumulator.abs() < config.start_rotating_threshold {
        return SwitchOutcome::Accumulating { accumulator };
    }

    let direction = SwitchDirection::from_input(accumulator);
    let all = world.entities_with_tag(&config.targetable_tag);
    let candidates: Vec<EntityId> = filter_candidates(
        world,
        &all,
        subject,
        DistanceRange::up_to(switch_range(config)),
    )
    .into_iter()
    .filter(|&id| id != current)
    .collect();

    let origin = subject.position();
    let reference = look_at_rotation(origin, current_position);
    let picked = select_nearest(world, &candidates, subject, |_, position| {
        let angle = angle_between(reference, look_at_rotation(origin, position));
        direction.contains(angle, config.switch_cone_angle)
    });

    match picked {
        Some(next) => {
            session.set_target(next);
            session.reset_accumulator();
            session.start_switch_cooldown(timers, config.switch_cooldown);
            info!("Switched target {:?}: {} -> {}", direction, current, next);
            SwitchOutcome::Switched {
                from: current,
                to: next,
            }
        }
        None => {
            if config.reset_accumulator_on_failed_switch {
                session.reset_accumulator();
            }
            debug!("No target to the {:?} of {}", direction, current);
            SwitchOutcome::NoCandidate { direction }
        }
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;
    use lockon_core::TimerQueue;

    use super::*;
    use crate::targeting::testing::MockWorld;

    struct Fixture {
        world: MockWorld,
        subject: ControlledSubject,
        timers: TimerQueue<LockTimer>,
        session: LockSession,
        center: EntityId,
        right: EntityId,
        left: EntityId,
    }

    fn fixture() -> Fixture {
        let mut world = MockWorld::new();
        let player = world.spawn(Vec3::ZERO);
        let center = world.spawn(Vec3::new(0.0, 0.0, -6.0));
        let right = world.spawn(Vec3::new(4.0, 0.0, -6.0));
        let left = world.spawn(Vec3::new(-4.0, 0.0, -6.0));
        Fixture {
            world,
            subject: ControlledSubject::new(player, Vec3::ZERO),
            timers: TimerQueue::new(),
            session: LockSession::new(center, 1),
            center,
            right,
            left,
        }
    }

    fn feed(f: &mut Fixture, config: &TargetConfig, axis: f32, delta: f32) -> SwitchOutcome {
        process_switch(
            &mut f.session,
            &mut f.timers,
            &f.world,
            &f.subject,
            config,
            axis,
            delta,
        )
    }

    #[test]
    fn test_direction_cones() {
        assert!(SwitchDirection::Right.contains(30.0, 90.0));
        assert!(!SwitchDirection::Right.contains(0.0, 90.0));
        assert!(!SwitchDirection::Right.contains(-30.0, 90.0));
        assert!(!SwitchDirection::Right.contains(120.0, 90.0));
        assert!(SwitchDirection::Left.contains(-90.0, 90.0));
        assert!(!SwitchDirection::Left.contains(0.0, 90.0));
    }

    #[test]
    fn test_below_threshold_never_switches() {
        let mut f = fixture();
        let config = TargetConfig::default();

        for _ in 0..4 {
            let outcome = feed(&mut f, &config, 0.2, 1.0);
            assert!(matches!(outcome, SwitchOutcome::Accumulating { .. }));
        }
        assert_eq!(f.session.target(), f.center);
        assert!((f.session.switch_accumulator() - 0.8).abs() < 1.0e-5);
    }

    #[test]
    fn test_crossing_switches_to_requested_side() {
        let mut f = fixture();
        let config = TargetConfig::default();

        let outcome = feed(&mut f, &config, 1.0, 1.0);
        assert_eq!(
            outcome,
            SwitchOutcome::Switched {
                from: f.center,
                to: f.right
            }
        );
        assert_eq!(f.session.target(), f.right);
        assert_eq!(f.session.switch_accumulator(), 0.0);
        assert!(f.session.is_switching());
    }

    #[test]
    fn test_negative_input_goes_left() {
        let mut f = fixture();
        let config = TargetConfig::default();

        let outcome = feed(&mut f, &config, -1.0, 1.0);
        assert_eq!(
            outcome,
            SwitchOutcome::Switched {
                from: f.center,
                to: f.left
            }
        );
    }

    #[test]
    fn test_cooldown_blocks_second_switch() {
        let mut f = fixture();
        let config = TargetConfig::default();

        assert!(matches!(feed(&mut f, &config, -1.0, 1.0), SwitchOutcome::Switched { .. }));
        assert_eq!(feed(&mut f, &config, 1.0, 1.0), SwitchOutcome::Ignored);
        assert_eq!(f.session.target(), f.left);
        assert_eq!(f.session.switch_accumulator(), 0.0);
    }

    #[test]
    fn test_breaking_line_of_sight_blocks_switch() {
        let mut f = fixture();
        let config = TargetConfig::default();
        f.session.start_breaking_line_of_sight(&mut f.timers, 2.0);

        assert_eq!(feed(&mut f, &config, 1.0, 1.0), SwitchOutcome::Ignored);
        assert_eq!(f.session.switch_accumulator(), 0.0);
    }

    #[test]
    fn test_no_candidate_keeps_accumulator_by_default() {
        let mut f = fixture();
        f.world.despawn(f.right);
        let config = TargetConfig::default();

        let outcome = feed(&mut f, &config, 1.0, 1.0);
        assert_eq!(
            outcome,
            SwitchOutcome::NoCandidate {
                direction: SwitchDirection::Right
            }
        );
        assert_eq!(f.session.target(), f.center);
        assert_eq!(f.session.switch_accumulator(), 1.0);

        // Keeps building while the stick is held
        feed(&mut f, &config, 1.0, 0.5);
        assert_eq!(f.session.switch_accumulator(), 1.5);
    }

    #[test]
    fn test_no_candidate_resets_accumulator_when_configured() {
        let mut f = fixture();
        f.world.despawn(f.right);
        let config = TargetConfig {
            reset_accumulator_on_failed_switch: true,
            ..Default::default()
        };

        let outcome = feed(&mut f, &config, 1.0, 1.0);
        assert!(matches!(outcome, SwitchOutcome::NoCandidate { .. }));
        assert_eq!(f.session.target(), f.center);
        assert_eq!(f.session.switch_accumulator(), 0.0);
    }

    #[test]
    fn test_delta_scales_input() {
        let mut f = fixture();
        let config = TargetConfig::default();

        assert!(matches!(
            feed(&mut f, &config, 1.0, 0.5),
            SwitchOutcome::Accumulating { .. }
        ));
        assert!(matches!(
            feed(&mut f, &config, 1.0, 0.5),
            SwitchOutcome::Switched { .. }
        ));
    }

    #[test]
    fn test_non_finite_input_leaves_accumulator_alone() {
        let mut f = fixture();
        let config = TargetConfig::default();

        assert_eq!(feed(&mut f, &config, f32::NAN, 1.0), SwitchOutcome::Ignored);
        assert_eq!(feed(&mut f, &config, 1.0, f32::INFINITY), SwitchOutcome::Ignored);
        assert_eq!(f.session.switch_accumulator(), 0.0);

        // A later push to the right still reaches the right-hand candidate
        assert_eq!(
            feed(&mut f, &config, 1.0, 1.0),
            SwitchOutcome::Switched {
                from: f.center,
                to: f.right
            }
        );
    }

    #[test]
    fn test_switch_range_capped_by_enable_distance() {
        let mut f = fixture();
        f.world.despawn(f.right);
        // About 11.3m away, to the right of the center target
        let distant = f.world.spawn(Vec3::new(8.0, 0.0, -8.0));
        let config = TargetConfig {
            minimum_distance_to_enable: 8.0,
            switch_distance_max: 12.0,
            ..Default::default()
        };
        assert_eq!(switch_range(&config), 8.0);

        let outcome = feed(&mut f, &config, 1.0, 1.0);
        assert!(matches!(outcome, SwitchOutcome::NoCandidate { .. }));
        assert_eq!(f.session.target(), f.center);

        // Without the distance break the full switch range applies
        let config = TargetConfig {
            break_on_distance: false,
            ..config
        };
        assert_eq!(switch_range(&config), 12.0);
        f.session.reset_accumulator();
        assert_eq!(
            feed(&mut f, &config, 1.0, 1.0),
            SwitchOutcome::Switched {
                from: f.center,
                to: distant
            }
        );
    }

    #[test]
    fn test_candidate_outside_cone_is_ignored() {
        let mut f = fixture();
        // Directly to the right of the player: 90 degrees from the center target
        let wide = f.world.spawn(Vec3::new(3.0, 0.0, 0.0));
        f.world.despawn(f.right);
        let config = TargetConfig {
            switch_cone_angle: 60.0,
            ..Default::default()
        };

        let outcome = feed(&mut f, &config, 1.0, 1.0);
        assert!(matches!(outcome, SwitchOutcome::NoCandidate { .. }));
        assert_ne!(f.session.target(), wide);
    }
}
