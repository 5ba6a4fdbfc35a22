//! Camera module
//!
//! Third-person camera that trails the controlled subject's control rotation
//! and answers on-screen queries for target selection.

mod config;
mod controller;

pub use config::CameraConfig;
pub use controller::{CameraController, CameraMode};
