//! Host-world capabilities the target system consumes

use glam::Vec3;
use lockon_core::EntityId;

/// Anything that can be considered for locking on.
pub trait Targetable {
    /// Current world position
    fn position(&self) -> Vec3;

    /// Whether the entity currently accepts being targeted (alive, not hidden, ...)
    fn can_be_targeted(&self) -> bool {
        true
    }
}

/// World queries supplied by the host.
///
/// The target system never owns entities. Every lookup goes through
/// [`TargetWorld::resolve`], which returns `None` once an entity is gone.
pub trait TargetWorld {
    /// Enumerate entities carrying `tag`, in a stable order
    fn entities_with_tag(&self, tag: &str) -> Vec<EntityId>;

    /// Resolve an entity reference, `None` if it no longer exists
    fn resolve(&self, id: EntityId) -> Option<&dyn Targetable>;

    /// True if nothing but the `ignore`d entities blocks the segment `from` → `to`
    fn trace_visible(&self, from: Vec3, to: Vec3, ignore: &[EntityId]) -> bool;

    /// True if the entity projects inside the player's viewport
    fn is_on_screen(&self, id: EntityId) -> bool;

    /// Position of a live entity
    fn position_of(&self, id: EntityId) -> Option<Vec3> {
        self.resolve(id).map(|entity| entity.position())
    }

    /// Whether the entity is live and accepts being targeted
    fn is_targetable(&self, id: EntityId) -> bool {
        self.resolve(id).is_some_and(|entity| entity.can_be_targeted())
    }
}
