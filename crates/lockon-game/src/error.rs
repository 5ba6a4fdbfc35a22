/// Errors raised while validating targeting configuration.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("'{field}' must be a finite number, got {value}")]
    NotFinite { field: &'static str, value: f32 },

    #[error("'{field}' must not be negative, got {value}")]
    Negative { field: &'static str, value: f32 },

    #[error("'{field}' must be greater than zero, got {value}")]
    NotPositive { field: &'static str, value: f32 },

    #[error("switch cone angle must be within (0, 180] degrees, got {0}")]
    ConeOutOfRange(f32),

    #[error("pitch_min ({min}) is greater than pitch_max ({max})")]
    PitchRangeInverted { min: f32, max: f32 },

    #[error("targetable tag must not be empty")]
    EmptyTag,
}
