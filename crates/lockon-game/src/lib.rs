//! Lockon Game - Target lock-on and camera
//!
//! Provides the target lock-on engine (candidate filtering, nearest-target
//! selection, debounced line-of-sight release, axis-driven switching and
//! control rotation) and a third-person camera that follows the controlled
//! subject.

pub mod camera;
pub mod error;
pub mod targeting;

pub use camera::{CameraConfig, CameraController};
pub use error::ConfigError;
pub use targeting::{
    ControlledSubject, LockTimer, LockTimerKind, SwitchDirection, SwitchOutcome, TargetConfig,
    TargetEvent, TargetSystem, TargetWorld, Targetable, UnlockReason,
};
