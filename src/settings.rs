//! Gameplay settings
//!
//! Persisted as JSON next to the level bundles. A missing file means defaults.

use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::STARTING_LIVES;

/// How patrol and chaser movement relates to elapsed time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnemyTiming {
    /// Fixed step per simulation tick (speed depends on frame rate)
    #[default]
    PerFrame,
    /// Step scaled by `dt` against the 60 FPS reference
    DeltaScaled,
}

impl EnemyTiming {
    pub fn as_str(&self) -> &'static str {
        match self {
            EnemyTiming::PerFrame => "per_frame",
            EnemyTiming::DeltaScaled => "delta_scaled",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "per_frame" | "frame" => Some(EnemyTiming::PerFrame),
            "delta_scaled" | "delta" | "dt" => Some(EnemyTiming::DeltaScaled),
            _ => None,
        }
    }

    /// Multiplier applied to a per-tick enemy step
    pub fn step_scale(&self, dt: f32) -> f32 {
        match self {
            EnemyTiming::PerFrame => 1.0,
            EnemyTiming::DeltaScaled => crate::frame_scale(dt),
        }
    }
}

/// Game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Lives at the start of a quest
    pub starting_lives: u8,
    /// Enemy time model
    pub enemy_timing: EnemyTiming,
    /// Largest `dt` fed into one step (seconds); longer frames are clamped
    pub max_frame_dt: f32,
    /// Seed for freeplay level generation
    pub freeplay_seed: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            starting_lives: STARTING_LIVES,
            enemy_timing: EnemyTiming::PerFrame,
            max_frame_dt: 0.1,
            freeplay_seed: 0x5EED,
        }
    }
}

/// Failure reading or writing settings
#[derive(Debug)]
pub enum SettingsError {
    Io(io::Error),
    Json(serde_json::Error),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "settings i/o error: {err}"),
            Self::Json(err) => write!(f, "settings parse error: {err}"),
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Json(err) => Some(err),
        }
    }
}

impl From<io::Error> for SettingsError {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_json::Error> for SettingsError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}

impl Settings {
    /// Clamp a host frame time into something safe to simulate
    pub fn clamp_dt(&self, dt: f32) -> f32 {
        if dt.is_finite() {
            // A bad settings file may carry a negative or NaN cap
            let cap = if self.max_frame_dt.is_nan() {
                0.0
            } else {
                self.max_frame_dt.max(0.0)
            };
            dt.clamp(0.0, cap)
        } else {
            0.0
        }
    }

    /// Parse settings from JSON; unknown fields are ignored, missing ones default
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load settings from a file, falling back to defaults when it doesn't exist
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        match fs::read_to_string(path) {
            Ok(json) => {
                let settings = Self::from_json(&json)?;
                log::info!("Loaded settings from {}", path.display());
                Ok(settings)
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                log::info!("No settings at {}, using defaults", path.display());
                Ok(Self::default())
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Save settings as pretty JSON
    pub fn save(&self, path: &Path) -> Result<(), SettingsError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }
}
