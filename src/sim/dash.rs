//! Dash and projectiles

use glam::Vec2;

use super::collision::blocked_at;
use super::geometry::clamp_to_bounds;
use super::level::Door;
use super::state::{GameEvent, GameState, Projectile};
use crate::consts::*;
use crate::frame_scale;

/// Dash along the last movement direction
///
/// Moves in `DASH_STEPS` equal sub-steps and stops at the last position that
/// was clear. Returns false when no charge was available.
pub fn dash(state: &mut GameState) -> bool {
    if state.player.dash_charges == 0 {
        return false;
    }
    state.player.dash_charges -= 1;

    let dir = state.player.last_move_dir.normalize_or(Vec2::X);
    let step = dir * (DASH_DISTANCE / DASH_STEPS as f32);
    let (w, h) = (state.player.width, state.player.height);

    let mut pos = state.player.pos;
    for _ in 0..DASH_STEPS {
        let next = clamp_to_bounds(pos + step, w, h, PLAYFIELD_WIDTH, PLAYFIELD_HEIGHT);
        if next == pos || blocked_at(state, next) {
            break;
        }
        pos = next;
    }

    log::debug!(
        "Dash from ({:.1}, {:.1}) to ({:.1}, {:.1})",
        state.player.pos.x,
        state.player.pos.y,
        pos.x,
        pos.y
    );
    state.player.pos = pos;
    state.player.hazard_invuln_timer = state.player.hazard_invuln_timer.max(DASH_INVULN);
    state.emit(GameEvent::Dashed);
    true
}

/// Fire a projectile from the player's center if the cooldown allows
pub fn fire(state: &mut GameState) -> bool {
    if state.player.fire_cooldown > 0.0 {
        return false;
    }
    state.player.fire_cooldown = FIRE_COOLDOWN;
    state.projectiles.push(Projectile {
        pos: state.player.center(),
        dir: state.player.last_move_dir.normalize_or(Vec2::X),
        radius: PROJECTILE_RADIUS,
    });
    true
}

/// Advance projectiles; drop ones that leave the field or hit walls, and
/// destroy the first enemy each remaining one touches
pub fn update_projectiles(state: &mut GameState, dt: f32) {
    let scale = frame_scale(dt);
    let mut destroyed = 0u32;

    let mut projectiles = std::mem::take(&mut state.projectiles);
    projectiles.retain_mut(|shot| {
        shot.pos += shot.dir * PROJECTILE_SPEED * scale;
        if shot.pos.x < 0.0
            || shot.pos.y < 0.0
            || shot.pos.x > PLAYFIELD_WIDTH
            || shot.pos.y > PLAYFIELD_HEIGHT
        {
            return false;
        }

        let circle = shot.circle();
        let hit_wall = state
            .level
            .obstacles
            .iter()
            .any(|wall| circle.overlaps_rect(wall))
            || state.level.doors.iter().any(|door| match door {
                Door::Switch { open: true, .. } => false,
                _ => circle.overlaps_rect(&door.rect()),
            });
        if hit_wall {
            return false;
        }

        if let Some(index) = state
            .level
            .enemies
            .iter()
            .position(|enemy| circle.overlaps_rect(&enemy.rect()))
        {
            state.level.enemies.remove(index);
            destroyed += 1;
            return false;
        }
        true
    });
    state.projectiles = projectiles;

    for _ in 0..destroyed {
        state.score += SCORE_ENEMY;
        state.emit(GameEvent::EnemyDestroyed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use crate::sim::geometry::Rect;
    use crate::sim::level::{Enemy, Level};
    use crate::sim::state::GameMode;

    const DT: f32 = 1.0 / 60.0;

    fn state_with(level: Level) -> GameState {
        let mut state = GameState::new(GameMode::Quest, &Settings::default());
        state.load_level(&level);
        state
    }

    #[test]
    fn test_dash_stops_before_wall() {
        // Right edge at 124, wall 20px ahead at 144
        let mut level = Level::new("dash", Vec2::new(100.0, 100.0));
        level.obstacles.push(Rect::new(144.0, 0.0, 20.0, 600.0));
        let mut state = state_with(level);
        assert_eq!(state.player.dash_charges, 1);

        assert!(dash(&mut state));
        assert_eq!(state.player.dash_charges, 0);
        assert_eq!(state.player.pos, Vec2::new(120.0, 100.0));
        assert!(state.player.pos.x - 100.0 < DASH_DISTANCE);
        assert!(!state.player.rect().overlaps(&state.level.obstacles[0]));
        assert_eq!(state.player.hazard_invuln_timer, DASH_INVULN);
    }

    #[test]
    fn test_dash_full_distance_in_open_field() {
        let mut state = state_with(Level::new("open", Vec2::new(100.0, 100.0)));
        state.player.last_move_dir = Vec2::new(0.0, 1.0);
        dash(&mut state);
        assert!((state.player.pos - Vec2::new(100.0, 180.0)).length() < 0.001);
    }

    #[test]
    fn test_dash_without_charge_is_noop() {
        let mut state = state_with(Level::new("open", Vec2::new(100.0, 100.0)));
        state.player.dash_charges = 0;
        assert!(!dash(&mut state));
        assert_eq!(state.player.pos, Vec2::new(100.0, 100.0));
        assert_eq!(state.player.hazard_invuln_timer, 0.0);
    }

    #[test]
    fn test_dash_blocked_by_closed_door() {
        let mut level = Level::new("door", Vec2::new(100.0, 100.0));
        level.doors.push(Door::Switch {
            rect: Rect::new(134.0, 0.0, 10.0, 600.0),
            id: None,
            open: false,
        });
        let mut state = state_with(level);
        dash(&mut state);
        assert_eq!(state.player.pos, Vec2::new(110.0, 100.0));
    }

    #[test]
    fn test_projectile_destroys_enemy() {
        let mut level = Level::new("shoot", Vec2::new(100.0, 100.0));
        level.enemies.push(Enemy::Patrol {
            rect: Rect::new(200.0, 100.0, 24.0, 24.0),
            velocity: 0.0,
            axis: Default::default(),
        });
        let mut state = state_with(level);

        assert!(fire(&mut state));
        assert!(!fire(&mut state));
        for _ in 0..20 {
            update_projectiles(&mut state, DT);
        }
        assert!(state.level.enemies.is_empty());
        assert!(state.projectiles.is_empty());
        assert_eq!(state.score, SCORE_ENEMY);
    }

    #[test]
    fn test_projectile_stops_at_wall() {
        let mut level = Level::new("shoot", Vec2::new(100.0, 100.0));
        level.obstacles.push(Rect::new(150.0, 0.0, 10.0, 600.0));
        level.enemies.push(Enemy::Patrol {
            rect: Rect::new(200.0, 100.0, 24.0, 24.0),
            velocity: 0.0,
            axis: Default::default(),
        });
        let mut state = state_with(level);
        fire(&mut state);
        for _ in 0..20 {
            update_projectiles(&mut state, DT);
        }
        assert_eq!(state.level.enemies.len(), 1);
        assert!(state.projectiles.is_empty());
    }
}
