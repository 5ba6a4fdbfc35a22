//! Demo arena: enemies, cover and a camera behind the player
//!
//! Implements [`TargetWorld`] on top of a rapier collision world. Every entity
//! has a sphere proxy so entities block each other's line of sight, and the
//! camera decides what is on screen.

use glam::Vec3;
use lockon_core::EntityId;
use lockon_game::{CameraConfig, CameraController, ControlledSubject, TargetWorld, Targetable};
use lockon_physics::PhysicsWorld;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rapier3d::prelude::ColliderHandle;
use tracing::{debug, info};

use crate::settings::ArenaSettings;

/// A targetable enemy standing in the arena
pub struct Enemy {
    pub id: EntityId,
    position: Vec3,
    collider: ColliderHandle,
}

impl Targetable for Enemy {
    fn position(&self) -> Vec3 {
        self.position
    }
}

pub struct ArenaWorld {
    tag: String,
    physics: PhysicsWorld,
    camera: CameraController,
    player_collider: ColliderHandle,
    enemies: Vec<Enemy>,
    proxy_radius: f32,
    player: EntityId,
}

impl ArenaWorld {
    /// Empty arena around the player
    pub fn new(
        settings: &ArenaSettings,
        camera: CameraConfig,
        tag: impl Into<String>,
        player: &ControlledSubject,
    ) -> Self {
        let mut physics = PhysicsWorld::new();
        let player_collider = physics.add_entity_proxy(player.position(), settings.proxy_radius);
        physics.update_queries();

        Self {
            tag: tag.into(),
            physics,
            camera: CameraController::with_config(camera),
            player_collider,
            enemies: Vec::new(),
            proxy_radius: settings.proxy_radius,
            player: player.id,
        }
    }

    /// Spawn `enemy_count` enemies on an arc in front of the player (facing -Z).
    ///
    /// Angles and radii are jittered from `seed`, so the layout is reproducible.
    pub fn spawn_enemy_arc(&mut self, settings: &ArenaSettings, center: Vec3) -> Vec<EntityId> {
        let mut rng = StdRng::seed_from_u64(settings.seed);
        let count = settings.enemy_count;
        let spacing = if count > 1 {
            settings.arc_degrees / (count - 1) as f32
        } else {
            0.0
        };
        let angle_jitter = spacing * 0.25;
        let radius_jitter = settings.radius_jitter.abs();

        let ids: Vec<EntityId> = (0..count)
            .map(|i| {
                let base = if count > 1 {
                    -settings.arc_degrees * 0.5 + spacing * i as f32
                } else {
                    0.0
                };
                let angle = (base + rng.gen_range(-angle_jitter..=angle_jitter)).to_radians();
                let radius = settings.ring_radius + rng.gen_range(-radius_jitter..=radius_jitter);
                let position = center + Vec3::new(angle.sin() * radius, 0.0, -angle.cos() * radius);
                self.spawn_enemy(position)
            })
            .collect();

        info!("Spawned {} enemies (seed {})", ids.len(), settings.seed);
        ids
    }

    pub fn spawn_enemy(&mut self, position: Vec3) -> EntityId {
        let id = EntityId::new();
        let collider = self.physics.add_entity_proxy(position, self.proxy_radius);
        self.physics.update_queries();
        self.enemies.push(Enemy {
            id,
            position,
            collider,
        });
        debug!("Enemy {} at {:?}", id, position);
        id
    }

    /// Remove an enemy and its proxy. Returns false if it was already gone.
    pub fn despawn(&mut self, id: EntityId) -> bool {
        let Some(index) = self.enemies.iter().position(|enemy| enemy.id == id) else {
            return false;
        };
        let enemy = self.enemies.remove(index);
        self.physics.remove_collider(enemy.collider);
        self.physics.update_queries();
        info!("Enemy {} killed", id);
        true
    }

    /// Drop a box of cover into the arena
    pub fn place_cover(&mut self, center: Vec3, half_extents: Vec3) -> ColliderHandle {
        let handle = self.physics.add_box_obstacle(center, half_extents);
        self.physics.update_queries();
        info!("Cover placed at {:?}", center);
        handle
    }

    /// Take a piece of cover back out
    pub fn remove_cover(&mut self, handle: ColliderHandle) {
        self.physics.remove_collider(handle);
        self.physics.update_queries();
        info!("Cover removed");
    }

    /// Move the player's proxy and re-aim the camera; call after the subject
    /// moved or turned
    pub fn sync(&mut self, subject: &ControlledSubject) {
        self.physics
            .set_collider_position(self.player_collider, subject.position());
        self.physics.update_queries();
        self.camera
            .update(subject, Some(&self.physics), &[self.player_collider]);
    }

    pub fn camera(&self) -> &CameraController {
        &self.camera
    }

    pub fn enemy_count(&self) -> usize {
        self.enemies.len()
    }

    fn enemy(&self, id: EntityId) -> Option<&Enemy> {
        self.enemies.iter().find(|enemy| enemy.id == id)
    }

    fn collider_of(&self, id: EntityId) -> Option<ColliderHandle> {
        if id == self.player {
            return Some(self.player_collider);
        }
        self.enemy(id).map(|enemy| enemy.collider)
    }
}

impl TargetWorld for ArenaWorld {
    fn entities_with_tag(&self, tag: &str) -> Vec<EntityId> {
        if tag != self.tag {
            return Vec::new();
        }
        self.enemies.iter().map(|enemy| enemy.id).collect()
    }

    fn resolve(&self, id: EntityId) -> Option<&dyn Targetable> {
        self.enemy(id).map(|enemy| enemy as &dyn Targetable)
    }

    fn trace_visible(&self, from: Vec3, to: Vec3, ignore: &[EntityId]) -> bool {
        let ignored: Vec<ColliderHandle> = ignore
            .iter()
            .filter_map(|&id| self.collider_of(id))
            .collect();
        self.physics.is_segment_clear(from, to, &ignored)
    }

    fn is_on_screen(&self, id: EntityId) -> bool {
        self.position_of(id)
            .is_some_and(|position| self.camera.is_on_screen(position))
    }
}

#[cfg(test)]
mod tests {
    use lockon_game::{TargetConfig, TargetEvent, TargetSystem, UnlockReason};

    use super::*;

    fn setup() -> (ArenaWorld, ControlledSubject) {
        let subject = ControlledSubject::new(EntityId::new(), Vec3::ZERO);
        let mut arena = ArenaWorld::new(
            &ArenaSettings::default(),
            CameraConfig::default(),
            "targetable",
            &subject,
        );
        arena.sync(&subject);
        (arena, subject)
    }

    #[test]
    fn test_enemy_arc_is_seeded() {
        let settings = ArenaSettings::default();
        let (mut a, _) = setup();
        let (mut b, _) = setup();
        let first = a.spawn_enemy_arc(&settings, Vec3::ZERO);
        let second = b.spawn_enemy_arc(&settings, Vec3::ZERO);

        assert_eq!(first.len(), settings.enemy_count);
        for (x, y) in first.iter().zip(&second) {
            let (px, py) = (a.position_of(*x).unwrap(), b.position_of(*y).unwrap());
            assert!(px.abs_diff_eq(py, 1.0e-5));
            let r = px.length();
            assert!(r >= settings.ring_radius - settings.radius_jitter - 1.0e-3);
            assert!(r <= settings.ring_radius + settings.radius_jitter + 1.0e-3);
            assert!(px.z < 0.0);
        }
    }

    #[test]
    fn test_tag_lookup() {
        let (mut arena, _) = setup();
        let id = arena.spawn_enemy(Vec3::new(0.0, 0.0, -6.0));
        assert_eq!(arena.entities_with_tag("targetable"), vec![id]);
        assert!(arena.entities_with_tag("friendly").is_empty());
    }

    #[test]
    fn test_cover_blocks_trace() {
        let (mut arena, subject) = setup();
        let id = arena.spawn_enemy(Vec3::new(0.0, 0.0, -8.0));
        let target = arena.position_of(id).unwrap();
        let from = arena.camera().position();
        assert!(arena.trace_visible(from, target, &[subject.id, id]));

        let cover = arena.place_cover(Vec3::new(0.0, 1.0, -4.0), Vec3::new(1.0, 2.5, 1.0));
        assert!(!arena.trace_visible(from, target, &[subject.id, id]));

        arena.remove_cover(cover);
        assert!(arena.trace_visible(from, target, &[subject.id, id]));
    }

    #[test]
    fn test_enemy_proxy_blocks_enemy_behind() {
        let (mut arena, subject) = setup();
        let front = arena.spawn_enemy(Vec3::new(0.0, 0.0, -5.0));
        let back = arena.spawn_enemy(Vec3::new(0.0, 0.0, -10.0));
        let from = subject.position() + Vec3::new(0.0, 0.0, 1.0);

        assert!(!arena.trace_visible(from, arena.position_of(back).unwrap(), &[subject.id, back]));
        assert!(arena.trace_visible(
            from,
            arena.position_of(back).unwrap(),
            &[subject.id, back, front]
        ));
    }

    #[test]
    fn test_on_screen_follows_camera() {
        let (mut arena, _) = setup();
        let ahead = arena.spawn_enemy(Vec3::new(0.0, 0.0, -8.0));
        let behind = arena.spawn_enemy(Vec3::new(0.0, 0.0, 12.0));
        assert!(arena.is_on_screen(ahead));
        assert!(!arena.is_on_screen(behind));
    }

    #[test]
    fn test_killing_the_target_releases_lock() {
        let (mut arena, subject) = setup();
        let enemy = arena.spawn_enemy(Vec3::new(1.0, 0.0, -7.0));
        let mut system = TargetSystem::new(TargetConfig::default(), subject);
        system
            .subject_mut()
            .set_camera_position(Some(arena.camera().position()));

        assert!(system.acquire_target(&arena));
        assert_eq!(system.active_target(), Some(enemy));

        assert!(arena.despawn(enemy));
        assert!(!arena.despawn(enemy));
        system.update(&arena, 1.0 / 60.0);

        let events = system.drain_events();
        assert_eq!(
            events.last(),
            Some(&TargetEvent::LockedOff {
                target: Some(enemy),
                reason: UnlockReason::TargetInvalid
            })
        );
        assert!(!system.is_locked());
    }
}
