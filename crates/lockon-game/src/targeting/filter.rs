//! Candidate filtering: self, targetability and distance range

use lockon_core::EntityId;

use super::geometry::distance;
use super::subject::ControlledSubject;
use super::world::TargetWorld;

/// Inclusive distance bounds `[min, max]`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DistanceRange {
    pub min: f32,
    pub max: f32,
}

impl DistanceRange {
    pub fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// `[0, max]`
    pub fn up_to(max: f32) -> Self {
        Self { min: 0.0, max }
    }

    pub fn contains(&self, distance: f32) -> bool {
        distance >= self.min && distance <= self.max
    }
}

/// Keep the candidates that could be locked on to, preserving input order.
///
/// Drops the subject itself, anything that no longer resolves or refuses to
/// be targeted, and anything outside `range` of the subject.
pub fn filter_candidates<W: TargetWorld + ?Sized>(
    world: &W,
    candidates: &[EntityId],
    subject: &ControlledSubject,
    range: DistanceRange,
) -> Vec<EntityId> {
    candidates
        .iter()
        .copied()
        .filter(|&id| id != subject.id)
        .filter(|&id| world.is_targetable(id))
        .filter(|&id| {
            world
                .position_of(id)
                .is_some_and(|position| range.contains(distance(subject.position(), position)))
        })
        .collect()
}
