//! Target system configuration

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Tunables for the target lock-on engine. Distances are in metres, times in
/// seconds, angles in degrees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TargetConfig {
    /// Tag the world is queried with when enumerating candidates
    pub targetable_tag: String,
    /// Maximum distance at which a target can be acquired (and kept, see `break_on_distance`)
    pub minimum_distance_to_enable: f32,
    /// Maximum distance of candidates considered when switching
    pub switch_distance_max: f32,
    /// Whether lock-on/off flips the subject's rotation-control and orient-to-movement flags
    pub should_control_rotation: bool,
    /// How long the target may stay hidden before the lock is released
    pub break_line_of_sight_delay: f32,
    /// Accumulated axis input needed to request a switch. Lower is more sensitive.
    pub start_rotating_threshold: f32,
    /// Cooldown after a successful switch during which further switches are ignored
    pub switch_cooldown: f32,
    /// Half-width of the cone, on the requested side, searched for a new target
    pub switch_cone_angle: f32,
    /// Release the lock as soon as the target is farther than `minimum_distance_to_enable`
    pub break_on_distance: bool,
    /// Add a distance-dependent pitch offset to the control rotation
    pub adjust_pitch_based_on_distance: bool,
    /// Pitch offset per metre of distance
    pub pitch_distance_coefficient: f32,
    /// Pitch offset at zero distance (before negation and clamping)
    pub pitch_distance_offset: f32,
    pub pitch_min: f32,
    pub pitch_max: f32,
    /// Interpolation speed toward the target rotation; 0 snaps immediately
    pub rotation_interp_speed: f32,
    /// The host applies rotation itself from `TargetEvent::SetRotation`
    pub host_controls_rotation: bool,
    /// Report the stale id in the lock-off event when the target becomes invalid
    pub report_stale_target: bool,
    /// Reset the switch accumulator when a threshold crossing finds no candidate
    pub reset_accumulator_on_failed_switch: bool,
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self {
            targetable_tag: "targetable".to_string(),
            minimum_distance_to_enable: 12.0,
            switch_distance_max: 12.0,
            should_control_rotation: false,
            break_line_of_sight_delay: 2.0,
            start_rotating_threshold: 0.85,
            switch_cooldown: 0.5,
            switch_cone_angle: 90.0,
            break_on_distance: true,
            adjust_pitch_based_on_distance: false,
            pitch_distance_coefficient: -20.0,
            pitch_distance_offset: 90.0,
            pitch_min: -50.0,
            pitch_max: -20.0,
            rotation_interp_speed: 9.0,
            host_controls_rotation: false,
            report_stale_target: true,
            reset_accumulator_on_failed_switch: false,
        }
    }
}

impl TargetConfig {
    /// Check every tunable for values the engine cannot work with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.targetable_tag.trim().is_empty() {
            return Err(ConfigError::EmptyTag);
        }

        let numbers = [
            ("minimum_distance_to_enable", self.minimum_distance_to_enable),
            ("switch_distance_max", self.switch_distance_max),
            ("break_line_of_sight_delay", self.break_line_of_sight_delay),
            ("start_rotating_threshold", self.start_rotating_threshold),
            ("switch_cooldown", self.switch_cooldown),
            ("switch_cone_angle", self.switch_cone_angle),
            ("pitch_distance_coefficient", self.pitch_distance_coefficient),
            ("pitch_distance_offset", self.pitch_distance_offset),
            ("pitch_min", self.pitch_min),
            ("pitch_max", self.pitch_max),
            ("rotation_interp_speed", self.rotation_interp_speed),
        ];
        for (field, value) in numbers {
            if !value.is_finite() {
                return Err(ConfigError::NotFinite { field, value });
            }
        }

        for (field, value) in [
            ("minimum_distance_to_enable", self.minimum_distance_to_enable),
            ("switch_distance_max", self.switch_distance_max),
            ("break_line_of_sight_delay", self.break_line_of_sight_delay),
            ("switch_cooldown", self.switch_cooldown),
            ("rotation_interp_speed", self.rotation_interp_speed),
        ] {
            if value < 0.0 {
                return Err(ConfigError::Negative { field, value });
            }
        }

        if self.start_rotating_threshold <= 0.0 {
            return Err(ConfigError::NotPositive {
                field: "start_rotating_threshold",
                value: self.start_rotating_threshold,
            });
        }

        if self.switch_cone_angle <= 0.0 || self.switch_cone_angle > 180.0 {
            return Err(ConfigError::ConeOutOfRange(self.switch_cone_angle));
        }

        if self.pitch_min > self.pitch_max {
            return Err(ConfigError::PitchRangeInverted {
                min: self.pitch_min,
                max: self.pitch_max,
            });
        }

        Ok(())
    }
}
