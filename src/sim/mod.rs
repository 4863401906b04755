//! Frame-driven simulation module
//!
//! All gameplay logic lives here. This module must stay free of rendering and
//! platform dependencies:
//! - One step per host frame, driven by `dt`
//! - Fixed phase order inside a step
//! - State is passed in explicitly, never held globally

pub mod collision;
pub mod dash;
pub mod effects;
pub mod enemy;
pub mod geometry;
pub mod level;
pub mod state;
pub mod tick;
pub mod unlock;

pub use geometry::{Circle, Rect};
pub use level::{
    Axis, Door, Enemy, Key, Level, Powerup, PowerupKind, Switch, SwitchBehavior, Trap, TrapKind,
};
pub use state::{GameEvent, GameMode, GameState, Player, Projectile, QuestProgress, QuestStatus};
pub use tick::{TickInput, TickOutcome, tick};
