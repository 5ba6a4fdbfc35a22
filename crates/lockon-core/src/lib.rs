//! Lockon Core - Core types and utilities for the Lockon targeting engine
//!
//! This crate provides the foundational types used throughout the workspace:
//! - Mathematical primitives (re-exported from glam)
//! - Entity identifiers and the degree-based `Rotator`
//! - Frame time tracking and cancellable delayed timers

pub mod time;
pub mod types;

pub use glam::{Mat4, Quat, Vec2, Vec3, Vec4};
pub use time::{GameTime, TimeConfig, TimerHandle, TimerQueue, TimerService};
pub use types::{EntityId, Rotator};
