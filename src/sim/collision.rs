//! Player movement and collision resolution
//!
//! Movement is resolved against obstacles first, then doors. Each blocker is
//! handled on its own: when the new rect overlaps it, the axis that moved is
//! rolled back (both axes if the move was diagonal). Later blockers may revert
//! a position an earlier one already adjusted, which is always safe.

use glam::Vec2;

use super::geometry::{Rect, clamp_to_bounds};
use super::level::Door;
use super::state::{GameEvent, GameState};
use crate::consts::*;
use crate::frame_scale;

/// Roll back a move that ended overlapping `solid`
///
/// Only the axes that actually changed are reverted.
#[inline]
pub fn resolve_against(old: Vec2, new: Vec2, size: Vec2, solid: &Rect) -> Vec2 {
    if !Rect::at(new, size.x, size.y).overlaps(solid) {
        return new;
    }
    let moved_x = new.x != old.x;
    let moved_y = new.y != old.y;
    match (moved_x, moved_y) {
        (true, false) => Vec2::new(old.x, new.y),
        (false, true) => Vec2::new(new.x, old.y),
        _ => old,
    }
}

/// Resolve a move against every obstacle in list order
pub fn resolve_walls(old: Vec2, new: Vec2, size: Vec2, obstacles: &[Rect]) -> Vec2 {
    obstacles
        .iter()
        .fold(new, |pos, wall| resolve_against(old, pos, size, wall))
}

/// True when a rect at `pos` would overlap an obstacle or a door it can't pass
///
/// Key doors count as solid here; only the walking resolver spends keys.
pub fn blocked_at(state: &GameState, pos: Vec2) -> bool {
    let rect = state.player.rect_at(pos);
    state.level.obstacles.iter().any(|wall| rect.overlaps(wall))
        || state.level.doors.iter().any(|door| match door {
            Door::Switch { open: true, .. } => false,
            _ => rect.overlaps(&door.rect()),
        })
}

/// Resolve a move against doors, spending keys on key doors
///
/// Doors are walked in reverse so unlocked ones can be removed in place.
pub fn resolve_doors(state: &mut GameState, old: Vec2, new: Vec2) -> Vec2 {
    let size = Vec2::new(state.player.width, state.player.height);
    let mut pos = new;

    for i in (0..state.level.doors.len()).rev() {
        let door_rect = state.level.doors[i].rect();
        if !Rect::at(pos, size.x, size.y).overlaps(&door_rect) {
            continue;
        }

        match state.level.doors[i].clone() {
            Door::Switch { open: true, .. } => {}
            Door::Switch { open: false, .. } => {
                pos = resolve_against(old, pos, size, &door_rect);
            }
            Door::Key { key_id: None, .. } => {
                state.diagnostic(format!(
                    "Key door at ({}, {}) has no key id; treating it as a wall",
                    door_rect.x, door_rect.y
                ));
                pos = resolve_against(old, pos, size, &door_rect);
            }
            Door::Key {
                key_id: Some(key_id),
                ..
            } => {
                if state.key_count(&key_id) > 0 {
                    if let Some(count) = state.key_counts.get_mut(&key_id) {
                        *count -= 1;
                    }
                    state.level.doors.remove(i);
                    log::debug!("Unlocked door with key '{}'", key_id);
                    state.emit(GameEvent::DoorUnlocked { key_id });
                } else {
                    pos = resolve_against(old, pos, size, &door_rect);
                }
            }
        }
    }

    pos
}

/// Move the player for one step of held input
pub fn move_player(state: &mut GameState, direction: Vec2, dt: f32) {
    if direction == Vec2::ZERO {
        return;
    }
    state.player.last_move_dir = direction;

    let old = state.player.pos;
    let size = Vec2::new(state.player.width, state.player.height);
    let step = direction * state.player.effective_speed() * frame_scale(dt);
    let tentative = clamp_to_bounds(
        old + step,
        size.x,
        size.y,
        PLAYFIELD_WIDTH,
        PLAYFIELD_HEIGHT,
    );

    let after_walls = resolve_walls(old, tentative, size, &state.level.obstacles);
    let resolved = resolve_doors(state, old, after_walls);
    // A single-axis rollback can land in a corner another blocker already cleared
    state.player.pos = if blocked_at(state, resolved) { old } else { resolved };
}
