//! Nearest visible target selection

use glam::Vec3;
use lockon_core::EntityId;

use super::geometry::distance;
use super::subject::ControlledSubject;
use super::world::TargetWorld;

/// Whether `target` is on screen and unobstructed from the subject's viewpoint.
///
/// The trace ignores both the subject and the target itself.
pub fn is_visible_from<W: TargetWorld + ?Sized>(
    world: &W,
    subject: &ControlledSubject,
    target: EntityId,
    target_position: Vec3,
) -> bool {
    world.is_on_screen(target)
        && world.trace_visible(subject.viewpoint(), target_position, &[subject.id, target])
}

/// Nearest visible candidate that also passes `accept`.
///
/// Candidates are visited in order and only a strictly closer one replaces the
/// current best, so equal distances resolve to the earliest candidate.
pub fn select_nearest<W, F>(
    world: &W,
    candidates: &[EntityId],
    subject: &ControlledSubject,
    mut accept: F,
) -> Option<EntityId>
where
    W: TargetWorld + ?Sized,
    F: FnMut(EntityId, Vec3) -> bool,
{
    let mut best: Option<(EntityId, f32)> = None;

    for &candidate in candidates {
        let Some(position) = world.position_of(candidate) else {
            continue;
        };
        if !accept(candidate, position) {
            continue;
        }
        if !is_visible_from(world, subject, candidate, position) {
            continue;
        }

        let candidate_distance = distance(subject.position(), position);
        if best.map_or(true, |(_, best_distance)| candidate_distance < best_distance) {
            best = Some((candidate, candidate_distance));
        }
    }

    best.map(|(id, _)| id)
}

/// Initial lock target: the nearest visible candidate
pub fn find_nearest_target<W: TargetWorld + ?Sized>(
    world: &W,
    candidates: &[EntityId],
    subject: &ControlledSubject,
) -> Option<EntityId> {
    select_nearest(world, candidates, subject, |_, _| true)
}
