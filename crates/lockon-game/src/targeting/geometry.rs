//! Stateless geometry used by target selection and aiming

use glam::{Mat4, Vec3};
use lockon_core::Rotator;

/// Euclidean distance between two world positions
pub fn distance(a: Vec3, b: Vec3) -> f32 {
    a.distance(b)
}

/// Rotation that points `from` at `to` (yaw and pitch only, roll 0)
pub fn look_at_rotation(from: Vec3, to: Vec3) -> Rotator {
    let direction = to - from;
    let horizontal = (direction.x * direction.x + direction.z * direction.z).sqrt();
    if horizontal <= f32::EPSILON && direction.y.abs() <= f32::EPSILON {
        return Rotator::ZERO;
    }

    let yaw = direction.x.atan2(-direction.z).to_degrees();
    let pitch = direction.y.atan2(horizontal).to_degrees();
    Rotator::new(pitch, yaw, 0.0)
}

/// Signed yaw difference from `a` to `b` in (-180, 180].
///
/// Positive when `b` is to the right of `a`.
pub fn angle_between(a: Rotator, b: Rotator) -> f32 {
    Rotator::normalize_axis(b.yaw - a.yaw)
}

/// Whether `position` projects inside the viewport of `view_projection`
pub fn is_on_screen(position: Vec3, view_projection: Mat4) -> bool {
    let clip = view_projection * position.extend(1.0);
    if clip.w <= 0.0 {
        return false;
    }

    let ndc = clip.truncate() / clip.w;
    (-1.0..=1.0).contains(&ndc.x) && (-1.0..=1.0).contains(&ndc.y)
}

/// Interpolate `current` toward `target` along the shortest path on each axis.
///
/// `speed` of 0 or less snaps straight to the target.
pub fn rinterp_to(current: Rotator, target: Rotator, dt: f32, speed: f32) -> Rotator {
    if speed <= 0.0 {
        return target;
    }
    if dt <= 0.0 {
        return current;
    }

    let delta = (target - current).normalized();
    if delta.is_nearly_zero(1.0e-3) {
        return target;
    }

    let alpha = (dt * speed).clamp(0.0, 1.0);
    (current + delta * alpha).normalized()
}

/// Distance-based pitch adjustment: `(distance * coefficient + base_offset) * -1`,
/// clamped to `[min, max]`
pub fn pitch_offset(distance: f32, coefficient: f32, base_offset: f32, min: f32, max: f32) -> f32 {
    ((distance * coefficient + base_offset) * -1.0).clamp(min, max)
}
