//! Scripted lock-on session in the arena
//!
//! Plays a fixed list of steps frame by frame: acquire, strafe behind cover
//! until the lock breaks, clear the cover and come back, flick the stick right
//! and left to switch, then kill the locked enemy.

use glam::Vec3;
use lockon_core::{EntityId, GameTime};
use lockon_game::{ControlledSubject, SwitchOutcome, TargetEvent, TargetSystem, TargetWorld};
use rapier3d::prelude::ColliderHandle;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::arena::ArenaWorld;
use crate::settings::{ArenaSettings, GameSettings};

/// Fraction of the way from the player to the target at which cover is dropped
const COVER_FRACTION: f32 = 0.35;
const COVER_HALF_EXTENTS: Vec3 = Vec3::new(1.0, 2.5, 1.0);
const COVER_CENTER_HEIGHT: f32 = 1.0;

/// One scripted instruction
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Step {
    Wait { seconds: f32 },
    /// Lock on unless already locked
    Acquire,
    /// Drop cover between the target and where the player will be after strafing `right` metres
    PlaceCover { right: f32 },
    /// Remove all cover placed so far
    ClearCover,
    /// Move sideways relative to the control rotation
    Strafe { right: f32, seconds: f32 },
    /// Hold the switch stick
    Push { axis: f32, seconds: f32 },
    KillTarget,
}

impl Step {
    fn duration(&self) -> f32 {
        match *self {
            Step::Wait { seconds } | Step::Strafe { seconds, .. } | Step::Push { seconds, .. } => {
                seconds
            }
            _ => 0.0,
        }
    }
}

/// The default demo: lose the target behind cover, reacquire, switch both ways, kill
pub fn default_script(arena: &ArenaSettings) -> Vec<Step> {
    let strafe = arena.strafe_distance;
    vec![
        Step::Wait { seconds: 0.25 },
        Step::Acquire,
        Step::Wait { seconds: 1.0 },
        Step::PlaceCover { right: strafe },
        Step::Strafe {
            right: strafe,
            seconds: 1.0,
        },
        Step::Wait { seconds: 3.0 },
        Step::ClearCover,
        Step::Strafe {
            right: -strafe,
            seconds: 1.0,
        },
        Step::Acquire,
        Step::Wait { seconds: 0.5 },
        Step::Push {
            axis: 1.0,
            seconds: 1.0,
        },
        // Long enough to outlast the cooldown and refill the accumulator
        Step::Push {
            axis: -1.0,
            seconds: 2.5,
        },
        Step::Wait { seconds: 0.5 },
        Step::Acquire,
        Step::KillTarget,
        Step::Wait { seconds: 0.5 },
    ]
}

/// An event with the frame it was drained on
#[derive(Debug, Clone, Serialize)]
pub struct LoggedEvent {
    pub frame: u64,
    pub time: f64,
    pub event: TargetEvent,
}

/// What happened during a run
#[derive(Debug, Clone, Serialize)]
pub struct DemoSummary {
    pub seed: u64,
    pub frames: u64,
    pub elapsed: f64,
    pub locks: usize,
    pub switches: usize,
    pub releases: usize,
    pub enemies_left: usize,
    pub locked_at_end: Option<EntityId>,
    pub events: Vec<LoggedEvent>,
}

pub struct Demo {
    arena: ArenaWorld,
    system: TargetSystem,
    time: GameTime,
    frame_delta: f32,
    seed: u64,
    covers: Vec<ColliderHandle>,
    log: Vec<LoggedEvent>,
}

impl Demo {
    /// Build the arena and target system from settings
    pub fn new(settings: &GameSettings) -> Self {
        let subject = ControlledSubject::new(EntityId::new(), Vec3::ZERO);
        let mut arena = ArenaWorld::new(
            &settings.arena,
            settings.camera.clone(),
            settings.targeting.targetable_tag.clone(),
            &subject,
        );
        arena.spawn_enemy_arc(&settings.arena, subject.position());

        let requested = settings.arena.frame_rate;
        let frame_rate = if requested.is_finite() && requested > 0.0 {
            requested
        } else {
            warn!("Invalid frame rate {}, using 60", requested);
            60.0
        };

        Self {
            arena,
            system: TargetSystem::new(settings.targeting.clone(), subject),
            time: GameTime::new(settings.time.clone()),
            frame_delta: 1.0 / frame_rate,
            seed: settings.arena.seed,
            covers: Vec::new(),
            log: Vec::new(),
        }
    }

    /// Play every step to completion and summarize
    pub fn run(mut self, script: &[Step]) -> DemoSummary {
        for step in script {
            self.play(*step);
        }
        self.summary()
    }

    fn play(&mut self, step: Step) {
        debug!("Step {:?}", step);
        let mut remaining = step.duration();

        match step {
            Step::Acquire => {
                self.frame(|demo, _| {
                    if demo.system.is_locked() {
                        debug!("Already locked on, keeping the current target");
                    } else if !demo.system.acquire_target(&demo.arena) {
                        info!("Nothing to lock on to");
                    }
                });
            }
            Step::KillTarget => {
                self.frame(|demo, _| match demo.system.active_target() {
                    Some(target) => {
                        demo.arena.despawn(target);
                    }
                    None => info!("No locked enemy to kill"),
                });
            }
            Step::PlaceCover { right } => self.frame(|demo, _| demo.place_cover(right)),
            Step::ClearCover => self.frame(|demo, _| {
                for cover in demo.covers.drain(..) {
                    demo.arena.remove_cover(cover);
                }
            }),
            Step::Wait { .. } | Step::Strafe { .. } | Step::Push { .. } => {
                while remaining > 0.0 {
                    self.frame(|demo, dt| match step {
                        Step::Strafe { right, seconds } => demo.strafe(right / seconds * dt),
                        Step::Push { axis, .. } => {
                            if let SwitchOutcome::NoCandidate { direction } =
                                demo.system.switch_target(&demo.arena, axis, dt)
                            {
                                debug!("Nothing to switch to on the {:?}", direction);
                            }
                        }
                        _ => {}
                    });
                    remaining -= self.frame_delta;
                }
            }
        }
    }

    /// Advance one frame: script input, camera, target system, events
    fn frame<F: FnOnce(&mut Self, f32)>(&mut self, input: F) {
        self.time.update(self.frame_delta);
        let dt = self.time.delta_time;

        self.arena.sync(self.system.subject());
        let camera = self.arena.camera().position();
        self.system.subject_mut().set_camera_position(Some(camera));

        input(self, dt);

        self.system.update(&self.arena, dt);
        for event in self.system.drain_events() {
            info!("[{:>7.3}s] {:?}", self.time.total_time, event);
            self.log.push(LoggedEvent {
                frame: self.time.frame_count,
                time: self.time.total_time,
                event,
            });
        }
    }

    /// Right vector of the control rotation, on the ground plane
    fn strafe_direction(&self) -> Vec3 {
        let yaw = self.system.subject().control_rotation().yaw.to_radians();
        Vec3::new(yaw.cos(), 0.0, yaw.sin())
    }

    fn strafe(&mut self, distance: f32) {
        let position = self.system.subject().position() + self.strafe_direction() * distance;
        self.system.subject_mut().set_position(position);
    }

    fn place_cover(&mut self, right: f32) {
        let Some(target) = self
            .system
            .active_target()
            .and_then(|id| self.arena.position_of(id))
        else {
            info!("No locked target to hide from");
            return;
        };

        let destination = self.system.subject().position() + self.strafe_direction() * right;
        let mut center = destination + (target - destination) * COVER_FRACTION;
        center.y = COVER_CENTER_HEIGHT;
        let cover = self.arena.place_cover(center, COVER_HALF_EXTENTS);
        self.covers.push(cover);
    }

    fn summary(&self) -> DemoSummary {
        let count = |pred: fn(&TargetEvent) -> bool| {
            self.log.iter().filter(|logged| pred(&logged.event)).count()
        };

        DemoSummary {
            seed: self.seed,
            frames: self.time.frame_count,
            elapsed: self.time.total_time,
            locks: count(|e| matches!(e, TargetEvent::LockedOn { .. })),
            switches: count(|e| matches!(e, TargetEvent::Switched { .. })),
            releases: count(|e| matches!(e, TargetEvent::LockedOff { .. })),
            enemies_left: self.arena.enemy_count(),
            locked_at_end: self.system.active_target(),
            events: self.log.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use lockon_game::UnlockReason;

    use super::*;

    fn released_for(summary: &DemoSummary, wanted: UnlockReason) -> bool {
        summary.events.iter().any(|logged| {
            matches!(logged.event, TargetEvent::LockedOff { reason, .. } if reason == wanted)
        })
    }

    #[test]
    fn test_default_run_covers_every_beat() {
        let settings = GameSettings::default();
        let summary = Demo::new(&settings).run(&default_script(&settings.arena));

        assert!(matches!(
            summary.events.first().map(|logged| logged.event),
            Some(TargetEvent::LockedOn { .. })
        ));
        assert!(released_for(&summary, UnlockReason::LineOfSightLost));
        assert!(summary.locks >= 2);
        assert!(summary.switches >= 1);
        assert_eq!(summary.enemies_left, settings.arena.enemy_count - 1);
        assert!(matches!(
            summary.events.last().map(|logged| logged.event),
            Some(TargetEvent::LockedOff {
                target: Some(_),
                reason: UnlockReason::TargetInvalid
            })
        ));
        assert_eq!(summary.locked_at_end, None);
    }

    #[test]
    fn test_acquire_without_enemies() {
        let mut settings = GameSettings::default();
        settings.arena.enemy_count = 0;
        let summary = Demo::new(&settings).run(&[Step::Acquire, Step::Wait { seconds: 0.1 }]);

        assert!(summary.events.is_empty());
        assert_eq!(summary.enemies_left, 0);
        assert!(summary.frames > 1);
    }

    #[test]
    fn test_acquire_while_locked_keeps_target() {
        let settings = GameSettings::default();
        let summary = Demo::new(&settings).run(&[Step::Acquire, Step::Acquire]);

        assert_eq!(summary.locks, 1);
        assert!(summary.locked_at_end.is_some());
    }

    #[test]
    fn test_cleared_cover_keeps_lock() {
        let settings = GameSettings::default();
        let summary = Demo::new(&settings).run(&[
            Step::Acquire,
            Step::PlaceCover { right: 0.0 },
            Step::ClearCover,
            Step::Wait {
                seconds: settings.targeting.break_line_of_sight_delay + 0.5,
            },
        ]);

        assert!(!released_for(&summary, UnlockReason::LineOfSightLost));
        assert!(summary.locked_at_end.is_some());
    }

    #[test]
    fn test_kill_reports_target_invalid() {
        let settings = GameSettings::default();
        let summary = Demo::new(&settings).run(&[Step::Acquire, Step::KillTarget]);

        assert_eq!(summary.enemies_left, settings.arena.enemy_count - 1);
        assert!(matches!(
            summary.events.last().map(|logged| logged.event),
            Some(TargetEvent::LockedOff {
                target: Some(_),
                reason: UnlockReason::TargetInvalid
            })
        ));
    }

    #[test]
    fn test_unusable_frame_rate_falls_back() {
        for frame_rate in [f32::INFINITY, f32::NAN, 0.0] {
            let mut settings = GameSettings::default();
            settings.arena.frame_rate = frame_rate;
            let summary = Demo::new(&settings).run(&[Step::Acquire, Step::Wait { seconds: 0.1 }]);

            // One acquire frame plus six waiting frames at 60 fps
            assert!(summary.frames > 1 && summary.frames < 20, "{}", summary.frames);
        }
    }
}
