//! Lockon Physics - Collision queries using rapier3d
//!
//! Holds static obstacles and entity proxies, and answers the ray/segment
//! queries hosts need to implement line-of-sight tests.

use glam::Vec3;
use rapier3d::prelude::*;
use tracing::debug;

/// Rays shorter than this are treated as unobstructed
const MIN_SEGMENT_LENGTH: f32 = 1.0e-4;

/// Collision world used for visibility queries
pub struct PhysicsWorld {
    /// Rigid body storage (queries need it even when every collider is static)
    pub rigid_body_set: RigidBodySet,
    /// Collider storage
    pub collider_set: ColliderSet,
    /// Island manager, needed to remove colliders
    island_manager: IslandManager,
    /// Query pipeline for raycasts
    query_pipeline: QueryPipeline,
    /// Whether colliders changed since the last pipeline update
    dirty: bool,
}

impl PhysicsWorld {
    /// Create an empty physics world
    pub fn new() -> Self {
        Self {
            rigid_body_set: RigidBodySet::new(),
            collider_set: ColliderSet::new(),
            island_manager: IslandManager::new(),
            query_pipeline: QueryPipeline::new(),
            dirty: false,
        }
    }

    /// Add a static collider (walls, pillars, etc.)
    pub fn add_static_collider(&mut self, collider: Collider) -> ColliderHandle {
        self.dirty = true;
        self.collider_set.insert(collider)
    }

    /// Add an axis-aligned box obstacle
    pub fn add_box_obstacle(&mut self, center: Vec3, half_extents: Vec3) -> ColliderHandle {
        let collider = ColliderBuilder::cuboid(half_extents.x, half_extents.y, half_extents.z)
            .translation(vector![center.x, center.y, center.z])
            .build();
        self.add_static_collider(collider)
    }

    /// Add a sphere standing in for an entity so it can block or be ignored by rays
    pub fn add_entity_proxy(&mut self, position: Vec3, radius: f32) -> ColliderHandle {
        let collider = ColliderBuilder::ball(radius)
            .translation(vector![position.x, position.y, position.z])
            .build();
        self.add_static_collider(collider)
    }

    /// Move a collider to a new position
    pub fn set_collider_position(&mut self, handle: ColliderHandle, position: Vec3) {
        if let Some(collider) = self.collider_set.get_mut(handle) {
            collider.set_translation(vector![position.x, position.y, position.z]);
            self.dirty = true;
        }
    }

    /// Remove a collider
    pub fn remove_collider(&mut self, handle: ColliderHandle) {
        self.collider_set
            .remove(handle, &mut self.island_manager, &mut self.rigid_body_set, true);
        self.dirty = true;
    }

    /// Number of colliders in the world
    pub fn collider_count(&self) -> usize {
        self.collider_set.len()
    }

    /// Refresh the query pipeline after colliders changed
    pub fn update_queries(&mut self) {
        if self.dirty {
            self.query_pipeline.update(&self.collider_set);
            self.dirty = false;
            debug!("Query pipeline rebuilt with {} colliders", self.collider_set.len());
        }
    }

    /// Cast a ray and return the first hit
    pub fn raycast(
        &self,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
        filter: QueryFilter,
    ) -> Option<(ColliderHandle, f32)> {
        let ray = Ray::new(
            point![origin.x, origin.y, origin.z],
            vector![direction.x, direction.y, direction.z],
        );

        self.query_pipeline
            .cast_ray(&self.rigid_body_set, &self.collider_set, &ray, max_distance, true, filter)
    }

    /// True when nothing but the `ignore`d colliders lies between `from` and `to`
    pub fn is_segment_clear(&self, from: Vec3, to: Vec3, ignore: &[ColliderHandle]) -> bool {
        let offset = to - from;
        let length = offset.length();
        if length <= MIN_SEGMENT_LENGTH {
            return true;
        }

        let predicate = |handle: ColliderHandle, _: &Collider| !ignore.contains(&handle);
        let filter = QueryFilter::default().predicate(&predicate);

        self.raycast(from, offset / length, length, filter).is_none()
    }
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new()
    }
}
