//! Level templates
//!
//! A `Level` is an immutable description of a stage. The game state keeps a
//! pristine copy and a working copy; only the working copy is ever mutated,
//! and it is replaced wholesale by a fresh clone on every load.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::{Circle, Rect};
use crate::consts::*;

/// Patrol movement axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    #[default]
    Horizontal,
    Vertical,
}

/// Enemy variants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase", rename_all_fields = "camelCase")]
pub enum Enemy {
    /// Walks back and forth along one axis, bouncing off walls and bounds
    Patrol { rect: Rect, velocity: f32, axis: Axis },
    /// Steps straight toward the player's center every tick
    Chaser { rect: Rect, speed: f32 },
    /// Orbits a fixed center; position is derived from the angle
    Spinner {
        cx: f32,
        cy: f32,
        orbit_radius: f32,
        angle: f32,
        angular_speed: f32,
        size: f32,
    },
}

impl Enemy {
    /// Current body rect
    pub fn rect(&self) -> Rect {
        match *self {
            Enemy::Patrol { rect, .. } | Enemy::Chaser { rect, .. } => rect,
            Enemy::Spinner {
                cx,
                cy,
                orbit_radius,
                angle,
                size,
                ..
            } => spinner_rect(Vec2::new(cx, cy), orbit_radius, angle, size),
        }
    }
}

/// Body of a spinner of `size` at `angle` on its orbit around `center`
pub fn spinner_rect(center: Vec2, orbit_radius: f32, angle: f32, size: f32) -> Rect {
    let body = center + Vec2::from_angle(angle) * orbit_radius;
    Rect::new(body.x - size / 2.0, body.y - size / 2.0, size, size)
}

/// Powerup types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PowerupKind {
    Speed,
    Shield,
    Dash,
    Health,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Powerup {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    #[serde(rename = "type")]
    pub kind: PowerupKind,
}

impl Powerup {
    pub fn circle(&self) -> Circle {
        Circle::new(self.x, self.y, self.radius)
    }
}

/// Trap categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrapKind {
    /// Halves movement speed while standing in it
    Glue,
    /// Damage per second while standing in it
    Fire,
    /// Starts a delayed damage-over-time timer
    Poison,
    /// Large instant damage every frame of contact
    Spike,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trap {
    pub rect: Rect,
    #[serde(rename = "type")]
    pub kind: TrapKind,
    /// Overrides the kind's default damage (per hit for spikes, per second for fire/poison)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub damage: Option<f32>,
}

impl Trap {
    pub fn damage(&self) -> f32 {
        self.damage.unwrap_or(match self.kind {
            TrapKind::Glue => 0.0,
            TrapKind::Fire => FIRE_DAMAGE_PER_SECOND,
            TrapKind::Poison => POISON_DAMAGE_PER_SECOND,
            TrapKind::Spike => SPIKE_DAMAGE,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Key {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    pub key_id: String,
}

impl Key {
    pub fn circle(&self) -> Circle {
        Circle::new(self.x, self.y, self.radius)
    }
}

/// Door variants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase", rename_all_fields = "camelCase")]
pub enum Door {
    /// Opens (and disappears) by spending one matching key
    Key {
        rect: Rect,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        key_id: Option<String>,
    },
    /// Opened and closed by switches
    Switch {
        rect: Rect,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        id: Option<String>,
        #[serde(default)]
        open: bool,
    },
}

impl Door {
    pub fn rect(&self) -> Rect {
        match self {
            Door::Key { rect, .. } | Door::Switch { rect, .. } => *rect,
        }
    }

    /// Whether the door currently blocks movement regardless of inventory
    pub fn is_closed_switch_door(&self) -> bool {
        matches!(self, Door::Switch { open: false, .. })
    }
}

/// How a switch drives its doors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SwitchBehavior {
    /// Each fresh press toggles every door listed in `door_ids`
    Toggle,
    /// First press permanently opens matching (or all) switch doors
    Latch,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Switch {
    pub rect: Rect,
    #[serde(default)]
    pub switch_id: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub door_ids: Vec<String>,
    /// Toggle: player currently standing on it. Latch: has fired.
    #[serde(default)]
    pub pressed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub behavior: Option<SwitchBehavior>,
}

impl Switch {
    /// Explicit behavior, else toggle when linked to doors and latch otherwise
    pub fn behavior(&self) -> SwitchBehavior {
        self.behavior.unwrap_or(if self.door_ids.is_empty() {
            SwitchBehavior::Latch
        } else {
            SwitchBehavior::Toggle
        })
    }
}

/// A complete level template
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Level {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Player spawn (top-left of the player rect)
    pub start: Vec2,
    #[serde(default)]
    pub portal: Option<Circle>,
    #[serde(default)]
    pub obstacles: Vec<Rect>,
    #[serde(default)]
    pub enemies: Vec<Enemy>,
    #[serde(default)]
    pub powerups: Vec<Powerup>,
    #[serde(default)]
    pub traps: Vec<Trap>,
    #[serde(default)]
    pub keys: Vec<Key>,
    #[serde(default)]
    pub doors: Vec<Door>,
    #[serde(default)]
    pub switches: Vec<Switch>,
}

impl Level {
    /// Empty level with a spawn point
    pub fn new(id: impl Into<String>, start: Vec2) -> Self {
        Self {
            id: id.into(),
            start,
            ..Default::default()
        }
    }

    /// Display name, falling back to the id
    pub fn title(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.id)
    }
}
