//! Typed events emitted by entities during a tick
//!
//! Entities push into a per-tick list; the level drains it after each pass.

use serde::{Deserialize, Serialize};

/// Stable platform identifier (allocated in spawn order)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlatformId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimEvent {
    /// A normal platform got its first player (fires once per platform)
    Landed(PlatformId),
    /// A normal platform scrolled off the bottom of the window
    Killed(PlatformId),
    /// The exit platform has a player attached (fires every such tick)
    ExitReached(PlatformId),
    /// The player fell off the bottom of the window
    Died,
}
