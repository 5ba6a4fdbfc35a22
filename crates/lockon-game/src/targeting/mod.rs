//! Target lock-on engine
//!
//! Selects, keeps and switches a locked target for a single controlled
//! subject, aims its control rotation at the target, and releases the lock
//! when the target dies, leaves range or stays hidden past the break delay.

mod config;
mod events;
pub mod filter;
pub mod geometry;
pub mod line_of_sight;
pub mod selector;
mod session;
mod subject;
pub mod switch;
mod system;
mod world;

#[cfg(test)]
pub(crate) mod testing;

pub use config::TargetConfig;
pub use events::{TargetEvent, UnlockReason};
pub use filter::DistanceRange;
pub use line_of_sight::{LineOfSightState, LineOfSightTick};
pub use session::{LockSession, LockTimer, LockTimerKind};
pub use subject::ControlledSubject;
pub use switch::{SwitchDirection, SwitchOutcome};
pub use system::TargetSystem;
pub use world::{TargetWorld, Targetable};
