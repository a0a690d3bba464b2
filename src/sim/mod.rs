//! Level simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - One update per tick, no wall-clock time
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod event;
pub mod level;
pub mod platform;
pub mod player;
pub mod rect;

pub use event::{PlatformId, SimEvent};
pub use level::{
    Level, LevelOutcome, LevelSnapshot, LevelStart, PlatformView, SpawnOverrides, TickInput,
};
pub use platform::{Platform, PlatformKind};
pub use player::{MotionState, Player, PlayerStatus};
pub use rect::Rect;
