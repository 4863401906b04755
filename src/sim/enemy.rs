//! Enemy behavior
//!
//! Every enemy moves on its own, then snaps back to where it started the tick
//! if the move put it inside an obstacle.

use glam::Vec2;

use super::geometry::Rect;
use super::level::{Axis, Enemy, spinner_rect};
use crate::consts::*;
use crate::settings::EnemyTiming;

/// Advance every enemy by one tick
pub fn update_enemies(
    enemies: &mut [Enemy],
    obstacles: &[Rect],
    player_center: Vec2,
    timing: EnemyTiming,
    dt: f32,
) {
    let step_scale = timing.step_scale(dt);
    for enemy in enemies.iter_mut() {
        update_enemy(enemy, obstacles, player_center, step_scale, dt);
    }
}

fn hits_wall(rect: &Rect, obstacles: &[Rect]) -> bool {
    obstacles.iter().any(|wall| rect.overlaps(wall))
}

fn out_of_bounds(rect: &Rect) -> bool {
    rect.x < 0.0 || rect.y < 0.0 || rect.right() > PLAYFIELD_WIDTH || rect.bottom() > PLAYFIELD_HEIGHT
}

fn update_enemy(
    enemy: &mut Enemy,
    obstacles: &[Rect],
    player_center: Vec2,
    step_scale: f32,
    dt: f32,
) {
    match enemy {
        Enemy::Patrol {
            rect,
            velocity,
            axis,
        } => {
            let before = *rect;
            let step = *velocity * step_scale;
            match axis {
                Axis::Horizontal => rect.x += step,
                Axis::Vertical => rect.y += step,
            }
            if hits_wall(rect, obstacles) || out_of_bounds(rect) {
                *rect = before;
                *velocity = -*velocity;
            }
        }
        Enemy::Chaser { rect, speed } => {
            let before = *rect;
            let to_player = (player_center - rect.center()).normalize_or_zero();
            let step = to_player * *speed * step_scale;
            rect.x += step.x;
            rect.y += step.y;
            if hits_wall(rect, obstacles) || out_of_bounds(rect) {
                *rect = before;
            }
        }
        Enemy::Spinner {
            cx,
            cy,
            orbit_radius,
            angle,
            angular_speed,
            size,
        } => {
            let next = (*angle + *angular_speed * dt).rem_euclid(std::f32::consts::TAU);
            let body = spinner_rect(Vec2::new(*cx, *cy), *orbit_radius, next, *size);
            if !hits_wall(&body, obstacles) {
                *angle = next;
            }
        }
    }
}
