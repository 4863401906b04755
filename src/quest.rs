//! Quest lifecycle
//!
//! The controller owns the level source and the settings; the game state is
//! passed in by the host on every call. It runs the simulation step, then
//! turns what the step reported into status transitions:
//!
//! ```text
//! idle -> playing -> level complete -> playing (next level) | quest complete
//!                 -> (death, lives left) playing (same level, reloaded)
//!                 -> (death, no lives)   game over -> restart -> playing
//! ```

use serde::{Deserialize, Serialize};

use crate::settings::Settings;
use crate::sim::{GameMode, GameState, Level, QuestStatus, TickInput, TickOutcome, tick};

/// Anything that can hand out levels by position
pub trait LevelRepository {
    /// Level at `index`, or None past the end
    fn level(&self, index: usize) -> Option<Level>;

    /// Number of levels, or None for an endless source
    fn level_count(&self) -> Option<usize>;

    /// Position of the level with the given id
    fn index_of(&self, _id: &str) -> Option<usize> {
        None
    }
}

/// An ordered, finite list of levels (built-in quest, imported bundle, editor level)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LevelPack {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub levels: Vec<Level>,
}

impl LevelPack {
    pub fn new(name: impl Into<String>, levels: Vec<Level>) -> Self {
        Self {
            name: name.into(),
            author: None,
            description: None,
            levels,
        }
    }

    /// A pack holding a single level (creator test)
    pub fn single(level: Level) -> Self {
        let name = level.title().to_string();
        Self::new(name, vec![level])
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }
}

impl LevelRepository for LevelPack {
    fn level(&self, index: usize) -> Option<Level> {
        self.levels.get(index).cloned()
    }

    fn level_count(&self) -> Option<usize> {
        Some(self.levels.len())
    }

    fn index_of(&self, id: &str) -> Option<usize> {
        self.levels.iter().position(|level| level.id == id)
    }
}

/// Drives a session over a level source
#[derive(Debug, Clone)]
pub struct QuestController<R> {
    levels: R,
    settings: Settings,
}

impl<R: LevelRepository> QuestController<R> {
    pub fn new(levels: R, settings: Settings) -> Self {
        Self { levels, settings }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn levels(&self) -> &R {
        &self.levels
    }

    /// Fresh idle state configured from the controller's settings
    pub fn new_state(&self, mode: GameMode) -> GameState {
        GameState::new(mode, &self.settings)
    }

    /// Begin from the first level with full lives and no score
    pub fn start(&self, state: &mut GameState) {
        self.start_from(state, 0);
    }

    /// Begin at the level with the given id; false (and no change) if unknown
    pub fn start_at(&self, state: &mut GameState, id: &str) -> bool {
        match self.levels.index_of(id) {
            Some(index) => {
                self.start_from(state, index);
                true
            }
            None => {
                log::warn!("No level with id '{}'", id);
                false
            }
        }
    }

    /// Start over after game over or quest complete
    pub fn restart(&self, state: &mut GameState) {
        log::info!("Restarting quest");
        self.start(state);
    }

    fn start_from(&self, state: &mut GameState, index: usize) {
        state.progress.lives = self.settings.starting_lives;
        state.score = 0;
        self.enter_level(state, index);
    }

    /// Load a level by index and start playing it
    ///
    /// A missing level ends the quest as a win.
    pub fn load_level(&self, state: &mut GameState, index: usize) -> QuestStatus {
        self.enter_level(state, index);
        state.status()
    }

    fn enter_level(&self, state: &mut GameState, index: usize) {
        match self.levels.level(index) {
            Some(level) => {
                state.progress.current_level_index = index;
                state.load_level(&level);
                state.progress.status = QuestStatus::Playing;
            }
            None => {
                log::info!("No level at index {}, quest complete", index);
                Self::complete_quest(state);
            }
        }
    }

    fn complete_quest(state: &mut GameState) {
        state.progress.status = QuestStatus::QuestComplete;
        state.is_paused = true;
    }

    /// Run one frame: handle one-shot commands, step the simulation, apply transitions
    pub fn step(&self, state: &mut GameState, input: &TickInput, dt: f32) -> TickOutcome {
        let dt = self.settings.clamp_dt(dt);

        if input.reset {
            match state.status() {
                QuestStatus::Playing => {
                    log::info!("Resetting level");
                    state.reset_level();
                    return TickOutcome::Skipped;
                }
                QuestStatus::GameOver | QuestStatus::QuestComplete => {
                    self.restart(state);
                    return TickOutcome::Skipped;
                }
                QuestStatus::Idle | QuestStatus::LevelComplete => {}
            }
        }

        if input.pause && state.status() == QuestStatus::Playing {
            state.is_paused = !state.is_paused;
            log::info!("{}", if state.is_paused { "Paused" } else { "Resumed" });
        }

        let outcome = tick(state, input, dt);
        if outcome == TickOutcome::PlayerDied {
            self.on_player_death(state);
        }
        outcome
    }

    fn on_player_death(&self, state: &mut GameState) {
        if state.mode.consumes_lives() {
            state.progress.lives = state.progress.lives.saturating_sub(1);
            if state.progress.lives == 0 {
                log::info!("Out of lives, game over");
                state.progress.status = QuestStatus::GameOver;
                state.is_paused = true;
                return;
            }
            log::info!("{} lives left", state.progress.lives);
        }
        state.reset_level();
        state.progress.status = QuestStatus::Playing;
    }

    /// Move on after a completed level
    ///
    /// Does nothing unless the current level was just completed.
    pub fn advance(&self, state: &mut GameState) -> QuestStatus {
        if state.status() != QuestStatus::LevelComplete {
            return state.status();
        }
        let next = state.progress.current_level_index + 1;
        match self.levels.level_count() {
            Some(count) if next >= count => {
                log::info!("Final level cleared, quest complete");
                Self::complete_quest(state);
            }
            _ => self.enter_level(state, next),
        }
        state.status()
    }
}
