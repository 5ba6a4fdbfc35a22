//! The controlled subject whose control rotation the target system drives

use glam::Vec3;
use lockon_core::{EntityId, Rotator};

/// Default eye height above the subject's position
const DEFAULT_EYE_HEIGHT: f32 = 1.6;

/// Player-side state the target system reads and writes every frame
#[derive(Debug, Clone)]
pub struct ControlledSubject {
    /// Entity id of the subject in the host world (never selected as a target)
    pub id: EntityId,
    position: Vec3,
    eye_offset: Vec3,
    camera_position: Option<Vec3>,
    control_rotation: Rotator,
    use_controller_rotation_yaw: bool,
    orient_rotation_to_movement: bool,
}

impl ControlledSubject {
    /// Create a subject at a position, oriented to movement (free camera)
    pub fn new(id: EntityId, position: Vec3) -> Self {
        Self {
            id,
            position,
            eye_offset: Vec3::new(0.0, DEFAULT_EYE_HEIGHT, 0.0),
            camera_position: None,
            control_rotation: Rotator::ZERO,
            use_controller_rotation_yaw: false,
            orient_rotation_to_movement: true,
        }
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    /// Eye position (position + eye offset)
    pub fn eye_position(&self) -> Vec3 {
        self.position + self.eye_offset
    }

    /// Tell the subject where the camera currently is. `None` falls back to the eyes.
    pub fn set_camera_position(&mut self, position: Option<Vec3>) {
        self.camera_position = position;
    }

    /// Where visibility traces start: the camera if known, otherwise the eyes
    pub fn viewpoint(&self) -> Vec3 {
        self.camera_position.unwrap_or_else(|| self.eye_position())
    }

    pub fn control_rotation(&self) -> Rotator {
        self.control_rotation
    }

    pub fn set_control_rotation(&mut self, rotation: Rotator) {
        self.control_rotation = rotation;
    }

    pub fn use_controller_rotation_yaw(&self) -> bool {
        self.use_controller_rotation_yaw
    }

    pub fn orient_rotation_to_movement(&self) -> bool {
        self.orient_rotation_to_movement
    }

    /// Make the body follow the control rotation (strafing around a target)
    /// or go back to facing the movement direction
    pub fn set_rotation_control(&mut self, controlled: bool) {
        self.use_controller_rotation_yaw = controlled;
        self.orient_rotation_to_movement = !controlled;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_viewpoint_prefers_camera() {
        let mut subject = ControlledSubject::new(EntityId::new(), Vec3::ZERO);
        assert_eq!(subject.viewpoint(), Vec3::new(0.0, DEFAULT_EYE_HEIGHT, 0.0));

        subject.set_camera_position(Some(Vec3::new(0.0, 3.0, 5.0)));
        assert_eq!(subject.viewpoint(), Vec3::new(0.0, 3.0, 5.0));
    }

    #[test]
    fn test_rotation_control_flags_are_exclusive() {
        let mut subject = ControlledSubject::new(EntityId::new(), Vec3::ZERO);
        assert!(!subject.use_controller_rotation_yaw());
        assert!(subject.orient_rotation_to_movement());

        subject.set_rotation_control(true);
        assert!(subject.use_controller_rotation_yaw());
        assert!(!subject.orient_rotation_to_movement());
    }
}
