//! Per-frame simulation step
//!
//! Core game loop that advances the simulation by one host frame.

use super::collision::move_player;
use super::dash::{dash, fire, update_projectiles};
use super::effects::{apply_traps, collect_powerups, enemy_contact, tick_timers};
use super::enemy::update_enemies;
use super::state::{GameEvent, GameState, QuestStatus};
use super::unlock::{collect_keys, update_switches};
use crate::consts::SCORE_LEVEL;
use crate::input_direction;

/// Input for a single frame
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Held movement keys
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    /// Dash (one-shot)
    pub dash: bool,
    /// Shoot a projectile (one-shot)
    pub fire: bool,
    /// Pause toggle (one-shot)
    pub pause: bool,
    /// Reload the current level / restart after the quest ends (one-shot)
    pub reset: bool,
}

/// What the step reported back to the mode controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Nothing ran (paused or not playing)
    Skipped,
    /// A normal frame
    Continue,
    /// Health hit zero this frame
    PlayerDied,
    /// The portal was reached this frame
    LevelComplete,
}

/// Advance the game state by one frame
///
/// Order is fixed: movement, enemies, powerups and timers, traps, keys and
/// switches, enemy contact, portal, projectiles.
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) -> TickOutcome {
    state.events.clear();
    // Timers and positions must never see a NaN or negative step
    let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };

    if !state.is_running() {
        return TickOutcome::Skipped;
    }

    // Movement (or dash) with wall and door resolution
    // Dashing replaces walking, but only when a charge was spent
    if !(input.dash && dash(state)) {
        let direction = input_direction(input.up, input.down, input.left, input.right);
        move_player(state, direction, dt);
    }

    let player_center = state.player.center();
    update_enemies(
        &mut state.level.enemies,
        &state.level.obstacles,
        player_center,
        state.enemy_timing,
        dt,
    );

    collect_powerups(state);
    tick_timers(&mut state.player, dt);

    apply_traps(state, dt);

    collect_keys(state);
    update_switches(state);

    enemy_contact(state);

    if state.player.is_dead() {
        log::info!("Player died on '{}'", state.level.title());
        state.emit(GameEvent::PlayerDied);
        return TickOutcome::PlayerDied;
    }

    // Portal (skipped entirely when the level has none)
    if let Some(portal) = state.level.portal {
        if portal.contains_point(state.player.center()) {
            log::info!("Portal reached on '{}'", state.level.title());
            state.progress.status = QuestStatus::LevelComplete;
            state.is_paused = true;
            state.score += SCORE_LEVEL;
            state.emit(GameEvent::LevelComplete);
            return TickOutcome::LevelComplete;
        }
    }

    if input.fire {
        fire(state);
    }
    update_projectiles(state, dt);

    TickOutcome::Continue
}
