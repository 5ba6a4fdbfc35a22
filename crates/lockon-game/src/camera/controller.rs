//! Camera controller trailing the controlled subject

use glam::{Mat4, Vec3};
use lockon_core::Rotator;
use lockon_physics::PhysicsWorld;
use rapier3d::prelude::{Collider, ColliderHandle, QueryFilter};

use super::CameraConfig;
use crate::targeting::{geometry, ControlledSubject};

/// Camera mode (first-person or third-person)
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CameraMode {
    /// Camera at the eye position
    FirstPerson,
    /// Camera behind the eyes at a distance
    ThirdPerson { distance: f32 },
}

impl CameraMode {
    /// Get the camera distance (0 for first-person)
    pub fn distance(&self) -> f32 {
        match self {
            CameraMode::FirstPerson => 0.0,
            CameraMode::ThirdPerson { distance } => *distance,
        }
    }

    /// Check if in first-person mode
    pub fn is_first_person(&self) -> bool {
        matches!(self, CameraMode::FirstPerson)
    }
}

/// Camera controller
pub struct CameraController {
    /// Configuration
    pub config: CameraConfig,
    /// Current camera mode
    pub mode: CameraMode,
    /// Orientation copied from the subject, pitch clamped to the config limits
    rotation: Rotator,
    /// Camera world position (computed each update)
    position: Vec3,
}

impl CameraController {
    /// Create a new camera controller
    pub fn new() -> Self {
        Self::with_config(CameraConfig::default())
    }

    /// Create a camera controller with custom config
    pub fn with_config(config: CameraConfig) -> Self {
        let distance = config.distance;
        let mut camera = Self {
            config,
            mode: CameraMode::FirstPerson,
            rotation: Rotator::ZERO,
            position: Vec3::ZERO,
        };
        camera.set_distance(distance);
        camera
    }

    /// Get the camera's current world position
    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn rotation(&self) -> Rotator {
        self.rotation
    }

    /// Get the camera's forward direction
    pub fn forward(&self) -> Vec3 {
        self.rotation.forward()
    }

    /// Get the camera's right direction (horizontal)
    pub fn right(&self) -> Vec3 {
        let yaw = self.rotation.yaw.to_radians();
        Vec3::new(yaw.cos(), 0.0, yaw.sin())
    }

    /// Get the view matrix
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_to_rh(self.position, self.forward(), Vec3::Y)
    }

    /// Get the projection matrix
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(
            self.config.fov_degrees.to_radians(),
            self.config.aspect_ratio,
            self.config.near,
            self.config.far,
        )
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Whether a world position lands inside the viewport
    pub fn is_on_screen(&self, position: Vec3) -> bool {
        geometry::is_on_screen(position, self.view_projection())
    }

    /// Follow the subject (call each frame after its control rotation changed).
    ///
    /// With `physics`, the camera is pulled in front of the first collider
    /// behind the subject that is not in `ignore`.
    pub fn update(
        &mut self,
        subject: &ControlledSubject,
        physics: Option<&PhysicsWorld>,
        ignore: &[ColliderHandle],
    ) {
        let control = subject.control_rotation();
        self.rotation = Rotator::new(
            control
                .pitch
                .clamp(self.config.pitch_min, self.config.pitch_max),
            control.yaw,
            0.0,
        );

        let eye = subject.eye_position();
        let distance = match self.mode {
            CameraMode::FirstPerson => {
                self.position = eye;
                return;
            }
            CameraMode::ThirdPerson { distance } => distance,
        };

        let ray_start = eye + self.right() * self.config.shoulder_offset;
        let back = -self.forward();
        let ideal_position = ray_start + back * distance;

        let hit = physics.and_then(|physics| {
            let predicate = |handle: ColliderHandle, _: &Collider| !ignore.contains(&handle);
            let filter = QueryFilter::default().predicate(&predicate);
            physics.raycast(
                ray_start,
                back,
                distance + self.config.collision_radius,
                filter,
            )
        });

        self.position = match hit {
            Some((_handle, toi)) => {
                let safe_distance = (toi - self.config.collision_radius).clamp(0.0, distance);
                ray_start + back * safe_distance
            }
            None => ideal_position,
        };
    }

    /// Set the zoom distance directly
    pub fn set_distance(&mut self, distance: f32) {
        let clamped = distance.clamp(self.config.min_distance, self.config.max_distance);
        if clamped < self.config.fps_threshold {
            self.mode = CameraMode::FirstPerson;
        } else {
            self.mode = CameraMode::ThirdPerson { distance: clamped };
        }
    }
}

impl Default for CameraController {
    fn default() -> Self {
        Self::new()
    }
}
