//! Camera configuration

use serde::{Deserialize, Serialize};

/// Camera configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Starting distance behind the subject's eyes
    pub distance: f32,
    /// Minimum camera distance (0 = first person)
    pub min_distance: f32,
    /// Maximum camera distance
    pub max_distance: f32,
    /// Distance below which the camera sits at the eyes
    pub fps_threshold: f32,
    /// Minimum pitch angle in degrees
    pub pitch_min: f32,
    /// Maximum pitch angle in degrees
    pub pitch_max: f32,
    /// Clearance kept between the camera and geometry
    pub collision_radius: f32,
    /// Horizontal offset to the right (shoulder view)
    pub shoulder_offset: f32,
    /// Vertical field of view in degrees
    pub fov_degrees: f32,
    /// Viewport width / height
    pub aspect_ratio: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            distance: 4.0,
            min_distance: 0.0,
            max_distance: 20.0,
            fps_threshold: 0.5,
            pitch_min: -89.0,
            pitch_max: 89.0,
            collision_radius: 0.3,
            shoulder_offset: 0.3,
            fov_degrees: 70.0,
            aspect_ratio: 16.0 / 9.0,
            near: 0.1,
            far: 1000.0,
        }
    }
}
