//! Scripted world for exercising the target system in tests

use std::collections::HashSet;

use glam::Vec3;
use lockon_core::EntityId;

use super::world::{TargetWorld, Targetable};

pub(crate) struct MockEntity {
    position: Vec3,
    targetable: bool,
}

impl Targetable for MockEntity {
    fn position(&self) -> Vec3 {
        self.position
    }

    fn can_be_targeted(&self) -> bool {
        self.targetable
    }
}

/// Entities in spawn order, plus per-entity occlusion and viewport overrides
#[derive(Default)]
pub(crate) struct MockWorld {
    entities: Vec<(EntityId, MockEntity)>,
    occluded: HashSet<EntityId>,
    off_screen: HashSet<EntityId>,
}

impl MockWorld {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spawn(&mut self, position: Vec3) -> EntityId {
        let id = EntityId::new();
        self.entities.push((
            id,
            MockEntity {
                position,
                targetable: true,
            },
        ));
        id
    }

    pub fn despawn(&mut self, id: EntityId) {
        self.entities.retain(|(entity, _)| *entity != id);
    }

    pub fn move_to(&mut self, id: EntityId, position: Vec3) {
        if let Some((_, entity)) = self.entities.iter_mut().find(|(entity, _)| *entity == id) {
            entity.position = position;
        }
    }

    pub fn set_targetable(&mut self, id: EntityId, targetable: bool) {
        if let Some((_, entity)) = self.entities.iter_mut().find(|(entity, _)| *entity == id) {
            entity.targetable = targetable;
        }
    }

    /// Block every trace that ends at this entity
    pub fn set_occluded(&mut self, id: EntityId, occluded: bool) {
        if occluded {
            self.occluded.insert(id);
        } else {
            self.occluded.remove(&id);
        }
    }

    pub fn set_on_screen(&mut self, id: EntityId, on_screen: bool) {
        if on_screen {
            self.off_screen.remove(&id);
        } else {
            self.off_screen.insert(id);
        }
    }
}

impl TargetWorld for MockWorld {
    fn entities_with_tag(&self, _tag: &str) -> Vec<EntityId> {
        self.entities.iter().map(|(id, _)| *id).collect()
    }

    fn resolve(&self, id: EntityId) -> Option<&dyn Targetable> {
        self.entities
            .iter()
            .find(|(entity, _)| *entity == id)
            .map(|(_, entity)| entity as &dyn Targetable)
    }

    fn trace_visible(&self, _from: Vec3, to: Vec3, _ignore: &[EntityId]) -> bool {
        !self.occluded.iter().any(|id| {
            self.position_of(*id)
                .is_some_and(|position| position.distance(to) < 1.0e-3)
        })
    }

    fn is_on_screen(&self, id: EntityId) -> bool {
        !self.off_screen.contains(&id)
    }
}
