//! Notifications the target system queues for the host

use lockon_core::{EntityId, Rotator};
use serde::Serialize;

/// Why a lock ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum UnlockReason {
    /// The caller released the lock
    Released,
    /// Line of sight stayed blocked for the whole break delay
    LineOfSightLost,
    /// The target no longer exists
    TargetInvalid,
    /// The target moved beyond the enable distance
    OutOfRange,
}

/// One event per state transition, drained by the host each frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum TargetEvent {
    LockedOn {
        target: EntityId,
    },
    /// `target` is `None` only for an invalidated target when stale ids are not reported
    LockedOff {
        target: Option<EntityId>,
        reason: UnlockReason,
    },
    Switched {
        from: EntityId,
        to: EntityId,
    },
    /// Emitted every locked tick instead of rotating when the host controls rotation
    SetRotation {
        target: EntityId,
        control_rotation: Rotator,
    },
}
