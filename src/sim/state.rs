//! Game state and core simulation types
//!
//! Everything the presentation layer reads after a step lives here.

use std::collections::HashMap;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::{Circle, Rect};
use super::level::Level;
use crate::consts::*;
use crate::settings::{EnemyTiming, Settings};

/// Quest lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum QuestStatus {
    /// No quest started yet
    #[default]
    Idle,
    /// Simulation running
    Playing,
    /// Portal reached, waiting for an explicit advance
    LevelComplete,
    /// Out of lives, waiting for an explicit restart
    GameOver,
    /// Every level cleared
    QuestComplete,
}

/// Session mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GameMode {
    /// Built-in or imported level sequence with lives
    #[default]
    Quest,
    /// Play-testing a single level from the editor
    CreatorTest,
    /// Endless generated levels
    Freeplay,
}

impl GameMode {
    /// Whether dying costs a life in this mode
    pub fn consumes_lives(&self) -> bool {
        matches!(self, GameMode::Quest)
    }
}

/// Quest progress record
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QuestProgress {
    pub current_level_index: usize,
    pub lives: u8,
    pub status: QuestStatus,
}

/// The player
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
    /// Pixels per reference frame
    pub base_speed: f32,
    pub health: f32,
    pub max_health: f32,
    pub dash_charges: u32,
    /// Seconds remaining on each timer
    pub speed_boost_timer: f32,
    pub shield_timer: f32,
    pub poison_timer: f32,
    pub hazard_invuln_timer: f32,
    /// Damage per second while poisoned (set by the last poison trap touched)
    pub poison_dps: f32,
    pub fire_cooldown: f32,
    /// Movement multiplier from glue (1.0 when free)
    pub slow_factor: f32,
    /// Last nonzero movement direction (unit), used to aim dashes and shots
    pub last_move_dir: Vec2,
    /// Presentation hint: standing in fire this frame
    pub on_fire: bool,
}

impl Player {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            width: PLAYER_WIDTH,
            height: PLAYER_HEIGHT,
            base_speed: PLAYER_BASE_SPEED,
            health: PLAYER_MAX_HEALTH,
            max_health: PLAYER_MAX_HEALTH,
            dash_charges: PLAYER_START_DASH_CHARGES,
            speed_boost_timer: 0.0,
            shield_timer: 0.0,
            poison_timer: 0.0,
            hazard_invuln_timer: 0.0,
            poison_dps: POISON_DAMAGE_PER_SECOND,
            fire_cooldown: 0.0,
            slow_factor: 1.0,
            last_move_dir: Vec2::X,
            on_fire: false,
        }
    }

    #[inline]
    pub fn rect(&self) -> Rect {
        Rect::at(self.pos, self.width, self.height)
    }

    #[inline]
    pub fn rect_at(&self, pos: Vec2) -> Rect {
        Rect::at(pos, self.width, self.height)
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.rect().center()
    }

    #[inline]
    pub fn is_dead(&self) -> bool {
        self.health <= 0.0
    }

    /// Effective movement speed per reference frame
    pub fn effective_speed(&self) -> f32 {
        let boost = if self.speed_boost_timer > 0.0 {
            SPEED_BOOST_MULTIPLIER
        } else {
            1.0
        };
        self.base_speed * boost * self.slow_factor
    }
}

/// A player projectile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub pos: Vec2,
    /// Unit direction
    pub dir: Vec2,
    pub radius: f32,
}

impl Projectile {
    pub fn circle(&self) -> Circle {
        Circle::new(self.pos.x, self.pos.y, self.radius)
    }
}

/// Notable things that happened during a step, for the host (audio, HUD, logs)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    KeyCollected { key_id: String },
    DoorUnlocked { key_id: String },
    SwitchToggled { switch_id: Option<String> },
    PowerupCollected { kind: super::level::PowerupKind },
    ShieldAbsorbed,
    PlayerHurt { amount: f32 },
    PlayerDied,
    Dashed,
    EnemyDestroyed,
    LevelComplete,
    /// Non-fatal data problem (e.g. a key door without a key id)
    Diagnostic(String),
}

/// Complete runtime state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub mode: GameMode,
    /// Pristine copy of the loaded level, used for reloads
    pub template: Level,
    /// Working copy mutated by the simulation
    pub level: Level,
    pub player: Player,
    /// Held keys by key id
    pub key_counts: HashMap<String, u32>,
    pub progress: QuestProgress,
    pub is_paused: bool,
    pub score: u64,
    pub projectiles: Vec<Projectile>,
    /// Enemy time model for patrol and chaser movement
    pub enemy_timing: EnemyTiming,
    /// Events from the most recent step
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Fresh idle state for the given mode
    pub fn new(mode: GameMode, settings: &Settings) -> Self {
        Self {
            mode,
            template: Level::default(),
            level: Level::default(),
            player: Player::new(Vec2::ZERO),
            key_counts: HashMap::new(),
            progress: QuestProgress {
                current_level_index: 0,
                lives: settings.starting_lives,
                status: QuestStatus::Idle,
            },
            is_paused: false,
            score: 0,
            projectiles: Vec::new(),
            enemy_timing: settings.enemy_timing,
            events: Vec::new(),
        }
    }

    #[inline]
    pub fn status(&self) -> QuestStatus {
        self.progress.status
    }

    /// Replace the level wholesale and reset the player and inventory
    pub fn load_level(&mut self, level: &Level) {
        log::info!("Loading level '{}'", level.title());
        self.template = level.clone();
        self.reset_level();
    }

    /// Reload the current template (death, reset request)
    pub fn reset_level(&mut self) {
        self.level = self.template.clone();
        self.player = Player::new(self.template.start);
        self.key_counts.clear();
        self.projectiles.clear();
        self.is_paused = false;
    }

    /// Number of keys held for an id
    pub fn key_count(&self, key_id: &str) -> u32 {
        self.key_counts.get(key_id).copied().unwrap_or(0)
    }

    /// Record an event for the host
    pub fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Record a diagnostic, also sent to the log
    pub fn diagnostic(&mut self, message: String) {
        log::warn!("{}", message);
        self.events.push(GameEvent::Diagnostic(message));
    }

    /// Whether a simulation step may run
    pub fn is_running(&self) -> bool {
        self.progress.status == QuestStatus::Playing && !self.is_paused
    }
}
