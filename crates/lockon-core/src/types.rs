//! Core types used throughout the Lockon workspace

use std::ops::{Add, Mul, Sub};

use glam::{EulerRot, Quat, Vec3};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for an entity in the host world
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityId(pub Uuid);

impl EntityId {
    /// Create a new random entity ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for EntityId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Pitch/yaw/roll rotation in degrees.
///
/// Y is up and yaw 0 faces -Z. Positive yaw turns toward +X (to the right),
/// positive pitch looks up.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rotator {
    pub pitch: f32,
    pub yaw: f32,
    pub roll: f32,
}

impl Rotator {
    pub const ZERO: Rotator = Rotator::new(0.0, 0.0, 0.0);

    /// Create a rotator from pitch, yaw and roll in degrees
    pub const fn new(pitch: f32, yaw: f32, roll: f32) -> Self {
        Self { pitch, yaw, roll }
    }

    /// Wrap an angle in degrees into (-180, 180]
    pub fn normalize_axis(angle: f32) -> f32 {
        let mut wrapped = angle % 360.0;
        if wrapped > 180.0 {
            wrapped -= 360.0;
        } else if wrapped <= -180.0 {
            wrapped += 360.0;
        }
        wrapped
    }

    /// Return a copy with every axis wrapped into (-180, 180]
    pub fn normalized(self) -> Self {
        Self {
            pitch: Self::normalize_axis(self.pitch),
            yaw: Self::normalize_axis(self.yaw),
            roll: Self::normalize_axis(self.roll),
        }
    }

    /// True when every axis is within `tolerance` degrees of zero
    pub fn is_nearly_zero(&self, tolerance: f32) -> bool {
        self.pitch.abs() <= tolerance && self.yaw.abs() <= tolerance && self.roll.abs() <= tolerance
    }

    /// Unit direction this rotation faces
    pub fn forward(&self) -> Vec3 {
        let yaw = self.yaw.to_radians();
        let pitch = self.pitch.to_radians();
        let cos_pitch = pitch.cos();
        Vec3::new(yaw.sin() * cos_pitch, pitch.sin(), -yaw.cos() * cos_pitch)
    }

    /// Convert to a quaternion (roll applied last, around the facing axis)
    pub fn to_quat(&self) -> Quat {
        Quat::from_euler(
            EulerRot::YXZ,
            -self.yaw.to_radians(),
            self.pitch.to_radians(),
            self.roll.to_radians(),
        )
    }
}

impl Add for Rotator {
    type Output = Rotator;

    fn add(self, rhs: Rotator) -> Rotator {
        Rotator::new(self.pitch + rhs.pitch, self.yaw + rhs.yaw, self.roll + rhs.roll)
    }
}

impl Sub for Rotator {
    type Output = Rotator;

    fn sub(self, rhs: Rotator) -> Rotator {
        Rotator::new(self.pitch - rhs.pitch, self.yaw - rhs.yaw, self.roll - rhs.roll)
    }
}

impl Mul<f32> for Rotator {
    type Output = Rotator;

    fn mul(self, rhs: f32) -> Rotator {
        Rotator::new(self.pitch * rhs, self.yaw * rhs, self.roll * rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_axis() {
        assert_eq!(Rotator::normalize_axis(190.0), -170.0);
        assert_eq!(Rotator::normalize_axis(-190.0), 170.0);
        assert_eq!(Rotator::normalize_axis(180.0), 180.0);
        assert_eq!(Rotator::normalize_axis(-180.0), 180.0);
        assert_eq!(Rotator::normalize_axis(720.0 + 45.0), 45.0);
    }

    #[test]
    fn test_forward_matches_quaternion() {
        for rotator in [
            Rotator::new(0.0, 0.0, 0.0),
            Rotator::new(0.0, 90.0, 0.0),
            Rotator::new(30.0, -45.0, 0.0),
            Rotator::new(-20.0, 135.0, 0.0),
        ] {
            let from_quat = rotator.to_quat() * -Vec3::Z;
            assert!(from_quat.abs_diff_eq(rotator.forward(), 1e-4), "{rotator:?}");
        }
    }

    #[test]
    fn test_positive_yaw_turns_right() {
        let right = Rotator::new(0.0, 90.0, 0.0).forward();
        assert!(right.abs_diff_eq(Vec3::X, 1e-5));
    }

    #[test]
    fn test_entity_ids_are_unique() {
        assert_ne!(EntityId::new(), EntityId::new());
    }
}
