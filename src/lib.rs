//! Portal Quest - A top-down key-and-door arcade game
//!
//! Core modules:
//! - `sim`: Frame-driven simulation (movement, enemies, traps, doors, game state)
//! - `quest`: Quest lifecycle (level sequencing, lives, win/loss transitions)
//! - `levels`: Built-in quest levels
//! - `generate`: Seeded freeplay level generation
//! - `persistence`: Level bundle import/export
//! - `settings`: Gameplay configuration

pub mod generate;
pub mod levels;
pub mod persistence;
pub mod quest;
pub mod settings;
pub mod sim;

pub use quest::{LevelPack, LevelRepository, QuestController};
pub use settings::{EnemyTiming, Settings};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Reference frame rate that per-frame speeds are tuned for
    pub const REFERENCE_FPS: f32 = 60.0;

    /// Playfield dimensions (pixels)
    pub const PLAYFIELD_WIDTH: f32 = 800.0;
    pub const PLAYFIELD_HEIGHT: f32 = 600.0;

    /// Player defaults
    pub const PLAYER_WIDTH: f32 = 24.0;
    pub const PLAYER_HEIGHT: f32 = 24.0;
    /// Pixels per reference frame
    pub const PLAYER_BASE_SPEED: f32 = 3.0;
    pub const PLAYER_MAX_HEALTH: f32 = 100.0;
    pub const PLAYER_START_DASH_CHARGES: u32 = 1;

    /// Speed multiplier while the speed-boost timer runs
    pub const SPEED_BOOST_MULTIPLIER: f32 = 1.6;
    /// Movement multiplier while standing in glue
    pub const GLUE_SLOW_FACTOR: f32 = 0.5;

    /// Powerup effect durations (seconds)
    pub const SPEED_BOOST_DURATION: f32 = 5.0;
    pub const SHIELD_DURATION: f32 = 8.0;
    /// Health restored by a health powerup
    pub const HEALTH_POWERUP_AMOUNT: f32 = 30.0;

    /// Trap tuning
    pub const FIRE_DAMAGE_PER_SECOND: f32 = 30.0;
    pub const POISON_DAMAGE_PER_SECOND: f32 = 8.0;
    pub const POISON_DURATION: f32 = 3.0;
    pub const SPIKE_DAMAGE: f32 = 40.0;

    /// Enemy contact damage and the invulnerability it grants (seconds)
    pub const ENEMY_CONTACT_DAMAGE: f32 = 20.0;
    pub const ENEMY_HIT_INVULN: f32 = 1.0;
    /// Invulnerability granted when a shield absorbs a hit
    pub const SHIELD_BREAK_INVULN: f32 = 0.5;

    /// Dash tuning
    pub const DASH_DISTANCE: f32 = 80.0;
    pub const DASH_STEPS: u32 = 8;
    pub const DASH_INVULN: f32 = 0.3;

    /// Projectile tuning
    pub const PROJECTILE_SPEED: f32 = 8.0;
    pub const PROJECTILE_RADIUS: f32 = 4.0;
    pub const FIRE_COOLDOWN: f32 = 0.25;

    /// Score awards
    pub const SCORE_KEY: u64 = 10;
    pub const SCORE_POWERUP: u64 = 5;
    pub const SCORE_ENEMY: u64 = 50;
    pub const SCORE_LEVEL: u64 = 100;

    /// Quest defaults
    pub const STARTING_LIVES: u8 = 3;
}

/// Scale factor turning a per-reference-frame quantity into one for `dt` seconds
#[inline]
pub fn frame_scale(dt: f32) -> f32 {
    dt * consts::REFERENCE_FPS
}

/// Unit direction from held movement keys (diagonals normalized, zero when idle)
#[inline]
pub fn input_direction(up: bool, down: bool, left: bool, right: bool) -> Vec2 {
    let x = (right as i32 - left as i32) as f32;
    let y = (down as i32 - up as i32) as f32;
    Vec2::new(x, y).normalize_or_zero()
}
