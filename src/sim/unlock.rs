//! Keys and switches
//!
//! Key doors themselves are resolved during movement (see `collision`); this
//! module handles picking keys up and driving switch doors.

use super::level::{Door, SwitchBehavior};
use super::state::{GameEvent, GameState};
use crate::consts::SCORE_KEY;

/// Pick up keys whose center is close enough to the player's center
pub fn collect_keys(state: &mut GameState) {
    let center = state.player.center();
    let reach = state.player.width.min(state.player.height) / 2.0;

    let mut collected = Vec::new();
    state.level.keys.retain(|key| {
        if key.circle().center().distance(center) < key.radius + reach {
            collected.push(key.key_id.clone());
            false
        } else {
            true
        }
    });

    for key_id in collected {
        *state.key_counts.entry(key_id.clone()).or_insert(0) += 1;
        log::debug!("Picked up key '{}'", key_id);
        state.score += SCORE_KEY;
        state.emit(GameEvent::KeyCollected { key_id });
    }
}

/// Set a switch door's open flag, unless closing it would trap the player
fn set_door_open(state: &mut GameState, index: usize, open_now: bool) -> bool {
    let player_rect = state.player.rect();
    match &mut state.level.doors[index] {
        Door::Switch { rect, open, .. } => {
            if !open_now && rect.overlaps(&player_rect) {
                log::debug!("Door at ({}, {}) held open by the player", rect.x, rect.y);
                return false;
            }
            let changed = *open != open_now;
            *open = open_now;
            changed
        }
        Door::Key { .. } => false,
    }
}

fn switch_door_id(door: &Door) -> Option<&str> {
    match door {
        Door::Switch { id, .. } => id.as_deref(),
        Door::Key { .. } => None,
    }
}

/// Update switch presses and the doors they drive
pub fn update_switches(state: &mut GameState) {
    let center = state.player.center();

    for si in 0..state.level.switches.len() {
        let switch = &state.level.switches[si];
        let standing = switch.rect.contains_point(center);
        let fresh_press = standing && !switch.pressed;
        let behavior = switch.behavior();
        let switch_id = switch.switch_id.clone();
        let door_ids = switch.door_ids.clone();

        match behavior {
            SwitchBehavior::Toggle => {
                state.level.switches[si].pressed = standing;
                if !fresh_press {
                    continue;
                }
                for di in 0..state.level.doors.len() {
                    let linked = switch_door_id(&state.level.doors[di])
                        .is_some_and(|id| door_ids.iter().any(|d| d == id));
                    if linked {
                        let open_now = !matches!(state.level.doors[di], Door::Switch { open: true, .. });
                        set_door_open(state, di, open_now);
                    }
                }
            }
            SwitchBehavior::Latch => {
                if !fresh_press {
                    continue;
                }
                state.level.switches[si].pressed = true;
                let matching: Vec<usize> = state
                    .level
                    .doors
                    .iter()
                    .enumerate()
                    .filter(|(_, door)| {
                        switch_id.is_some() && switch_door_id(door) == switch_id.as_deref()
                    })
                    .map(|(i, _)| i)
                    .collect();
                let targets: Vec<usize> = if matching.is_empty() {
                    state
                        .level
                        .doors
                        .iter()
                        .enumerate()
                        .filter(|(_, door)| matches!(door, Door::Switch { .. }))
                        .map(|(i, _)| i)
                        .collect()
                } else {
                    matching
                };
                for di in targets {
                    set_door_open(state, di, true);
                }
            }
        }

        log::debug!("Switch {:?} pressed", switch_id);
        state.emit(GameEvent::SwitchToggled { switch_id });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use crate::sim::geometry::Rect;
    use crate::sim::level::{Key, Level, Switch};
    use crate::sim::state::GameMode;
    use glam::Vec2;

    fn state_with(level: Level) -> GameState {
        let mut state = GameState::new(GameMode::Quest, &Settings::default());
        state.load_level(&level);
        state
    }

    fn switch_door(x: f32, id: Option<&str>, open: bool) -> Door {
        Door::Switch {
            rect: Rect::new(x, 400.0, 20.0, 60.0),
            id: id.map(Into::into),
            open,
        }
    }

    fn door_open(state: &GameState, index: usize) -> bool {
        matches!(state.level.doors[index], Door::Switch { open: true, .. })
    }

    /// Switch under a player spawned at (100, 100)
    fn switch_at_spawn(switch_id: Option<&str>, door_ids: &[&str]) -> Switch {
        Switch {
            rect: Rect::new(100.0, 100.0, 24.0, 24.0),
            switch_id: switch_id.map(Into::into),
            door_ids: door_ids.iter().map(|s| s.to_string()).collect(),
            pressed: false,
            behavior: None,
        }
    }

    #[test]
    fn test_key_pickup_increments_count() {
        let mut level = Level::new("keys", Vec2::new(100.0, 100.0));
        level.keys.push(Key {
            x: 120.0,
            y: 112.0,
            radius: 6.0,
            key_id: "gold".into(),
        });
        level.keys.push(Key {
            x: 500.0,
            y: 500.0,
            radius: 6.0,
            key_id: "gold".into(),
        });
        let mut state = state_with(level);
        collect_keys(&mut state);

        assert_eq!(state.key_count("gold"), 1);
        assert_eq!(state.level.keys.len(), 1);
        assert_eq!(state.score, SCORE_KEY);
    }

    #[test]
    fn test_key_pickup_threshold() {
        // Center distance 18.5 vs threshold 6 + 12 = 18
        let mut level = Level::new("keys", Vec2::new(100.0, 100.0));
        level.keys.push(Key {
            x: 130.5,
            y: 112.0,
            radius: 6.0,
            key_id: "gold".into(),
        });
        let mut state = state_with(level);
        collect_keys(&mut state);
        assert_eq!(state.key_count("gold"), 0);
    }

    #[test]
    fn test_toggle_switch_fires_once_per_press() {
        let mut level = Level::new("toggle", Vec2::new(100.0, 100.0));
        level.switches.push(switch_at_spawn(Some("s1"), &["d1"]));
        level.doors.push(switch_door(300.0, Some("d1"), false));
        level.doors.push(switch_door(340.0, Some("other"), false));
        let mut state = state_with(level);

        // Standing still on the switch toggles only once
        for _ in 0..5 {
            update_switches(&mut state);
        }
        assert!(door_open(&state, 0));
        assert!(!door_open(&state, 1));

        // Step off and back on: toggles closed again
        state.player.pos = Vec2::new(200.0, 200.0);
        update_switches(&mut state);
        assert!(!state.level.switches[0].pressed);
        state.player.pos = Vec2::new(100.0, 100.0);
        update_switches(&mut state);
        assert!(!door_open(&state, 0));
    }

    #[test]
    fn test_latch_switch_opens_matching_doors_permanently() {
        let mut level = Level::new("latch", Vec2::new(100.0, 100.0));
        level.switches.push(switch_at_spawn(Some("gate"), &[]));
        level.doors.push(switch_door(300.0, Some("gate"), false));
        level.doors.push(switch_door(340.0, Some("elsewhere"), false));
        let mut state = state_with(level);

        update_switches(&mut state);
        assert!(door_open(&state, 0));
        assert!(!door_open(&state, 1));

        // Re-entry never closes a latched door
        state.player.pos = Vec2::new(200.0, 200.0);
        update_switches(&mut state);
        state.player.pos = Vec2::new(100.0, 100.0);
        update_switches(&mut state);
        assert!(door_open(&state, 0));
        assert!(state.level.switches[0].pressed);
    }

    #[test]
    fn test_latch_switch_without_matches_opens_all_switch_doors() {
        let mut level = Level::new("legacy", Vec2::new(100.0, 100.0));
        level.switches.push(switch_at_spawn(None, &[]));
        level.doors.push(switch_door(300.0, None, false));
        level.doors.push(switch_door(340.0, Some("x"), false));
        level.doors.push(Door::Key {
            rect: Rect::new(380.0, 400.0, 20.0, 60.0),
            key_id: Some("red".into()),
        });
        let mut state = state_with(level);

        update_switches(&mut state);
        assert!(door_open(&state, 0));
        assert!(door_open(&state, 1));
        assert!(matches!(state.level.doors[2], Door::Key { .. }));
    }

    #[test]
    fn test_toggle_does_not_close_door_on_player() {
        let mut level = Level::new("squish", Vec2::new(100.0, 100.0));
        let mut switch = switch_at_spawn(Some("s"), &["d"]);
        switch.rect = Rect::new(90.0, 90.0, 60.0, 60.0);
        level.switches.push(switch);
        level.doors.push(Door::Switch {
            rect: Rect::new(110.0, 90.0, 10.0, 40.0),
            id: Some("d".into()),
            open: true,
        });
        let mut state = state_with(level);
        update_switches(&mut state);
        assert!(door_open(&state, 0));
    }
}
