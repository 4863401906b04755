//! Seeded freeplay level generation
//!
//! The same seed and index always produce the same level, so a freeplay run is
//! reproducible from its seed alone.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::consts::*;
use crate::quest::LevelRepository;
use crate::sim::{
    Axis, Circle, Door, Enemy, Key, Level, Powerup, PowerupKind, Rect, Trap, TrapKind,
};

/// Clearance kept around every placed entity
const PADDING: f32 = 12.0;
/// Attempts per entity before giving up on it
const PLACEMENT_TRIES: u32 = 40;
const PORTAL_RADIUS: f32 = 22.0;

/// Endless generated levels
#[derive(Debug, Clone, Copy)]
pub struct FreeplayLevels {
    pub seed: u64,
}

impl FreeplayLevels {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl LevelRepository for FreeplayLevels {
    fn level(&self, index: usize) -> Option<Level> {
        Some(generate_level(self.seed, index))
    }

    fn level_count(&self) -> Option<usize> {
        None
    }
}

/// Tracks occupied space while a level is laid out
struct Layout {
    taken: Vec<Rect>,
}

impl Layout {
    fn is_free(&self, rect: &Rect) -> bool {
        let padded = Rect::new(
            rect.x - PADDING,
            rect.y - PADDING,
            rect.w + PADDING * 2.0,
            rect.h + PADDING * 2.0,
        );
        rect.x >= 0.0
            && rect.y >= 0.0
            && rect.right() <= PLAYFIELD_WIDTH
            && rect.bottom() <= PLAYFIELD_HEIGHT
            && self.taken.iter().all(|t| !t.overlaps(&padded))
    }

    /// Find a free spot for a `w` x `h` rect, reserving it on success
    fn place(&mut self, rng: &mut Pcg32, w: f32, h: f32) -> Option<Rect> {
        for _ in 0..PLACEMENT_TRIES {
            let x = rng.random_range(0.0..(PLAYFIELD_WIDTH - w).max(1.0));
            let y = rng.random_range(0.0..(PLAYFIELD_HEIGHT - h).max(1.0));
            let rect = Rect::new(x.floor(), y.floor(), w, h);
            if self.is_free(&rect) {
                self.taken.push(rect);
                return Some(rect);
            }
        }
        None
    }
}

fn level_rng(seed: u64, index: usize) -> Pcg32 {
    Pcg32::seed_from_u64(seed ^ (index as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15))
}

/// Build freeplay level `index` for `seed`
///
/// Difficulty grows with the index: more walls, enemies and traps.
pub fn generate_level(seed: u64, index: usize) -> Level {
    let mut rng = level_rng(seed, index);
    let tier = index.min(8) as u32;

    let start = Vec2::new(
        30.0,
        rng.random_range(60.0..(PLAYFIELD_HEIGHT - 60.0 - PLAYER_HEIGHT)).floor(),
    );
    let portal = Circle::new(
        PLAYFIELD_WIDTH - 50.0,
        rng.random_range(80.0..(PLAYFIELD_HEIGHT - 80.0)).floor(),
        PORTAL_RADIUS,
    );

    // Keep a generous pocket around the spawn and the portal
    let mut layout = Layout {
        taken: vec![
            Rect::new(start.x - 30.0, start.y - 40.0, PLAYER_WIDTH + 80.0, PLAYER_HEIGHT + 80.0),
            Rect::new(
                portal.x - portal.radius - 30.0,
                portal.y - portal.radius - 30.0,
                portal.radius * 2.0 + 60.0,
                portal.radius * 2.0 + 60.0,
            ),
        ],
    };

    let mut level = Level::new(format!("freeplay-{seed:x}-{index}"), start);
    level.name = Some(format!("Freeplay #{}", index + 1));
    level.portal = Some(portal);

    let wall_count = 4 + tier;
    for _ in 0..wall_count {
        let long = rng.random_range(80.0..200.0_f32).floor();
        let (w, h) = if rng.random_bool(0.5) {
            (long, 20.0)
        } else {
            (20.0, long)
        };
        if let Some(rect) = layout.place(&mut rng, w, h) {
            level.obstacles.push(rect);
        }
    }

    let enemy_count = (1 + tier / 2).min(5);
    for _ in 0..enemy_count {
        let enemy = match rng.random_range(0..3) {
            0 => layout.place(&mut rng, 24.0, 24.0).map(|rect| Enemy::Patrol {
                rect,
                velocity: if rng.random_bool(0.5) { 2.0 } else { -2.0 },
                axis: if rng.random_bool(0.5) {
                    Axis::Horizontal
                } else {
                    Axis::Vertical
                },
            }),
            1 => layout.place(&mut rng, 22.0, 22.0).map(|rect| Enemy::Chaser {
                rect,
                speed: 0.8 + tier as f32 * 0.1,
            }),
            _ => {
                let orbit_radius = rng.random_range(40.0..70.0_f32).floor();
                let size = 18.0;
                let span = (orbit_radius + size) * 2.0;
                layout.place(&mut rng, span, span).map(|area| Enemy::Spinner {
                    cx: area.center().x,
                    cy: area.center().y,
                    orbit_radius,
                    angle: rng.random_range(0.0..std::f32::consts::TAU),
                    angular_speed: rng.random_range(1.0..2.5),
                    size,
                })
            }
        };
        level.enemies.extend(enemy);
    }

    let trap_count = (1 + tier / 2).min(4);
    for _ in 0..trap_count {
        let kind = match rng.random_range(0..4) {
            0 => TrapKind::Glue,
            1 => TrapKind::Fire,
            2 => TrapKind::Poison,
            _ => TrapKind::Spike,
        };
        if let Some(rect) = layout.place(&mut rng, 48.0, 48.0) {
            level.traps.push(Trap {
                rect,
                kind,
                damage: None,
            });
        }
    }

    let powerup_count = rng.random_range(1..=2);
    for _ in 0..powerup_count {
        let kind = match rng.random_range(0..4) {
            0 => PowerupKind::Speed,
            1 => PowerupKind::Shield,
            2 => PowerupKind::Dash,
            _ => PowerupKind::Health,
        };
        if let Some(area) = layout.place(&mut rng, 20.0, 20.0) {
            let c = area.center();
            level.powerups.push(Powerup {
                x: c.x,
                y: c.y,
                radius: 10.0,
                kind,
            });
        }
    }

    // From the second level on, a key and a door it opens
    if index > 0 {
        let key_id = format!("key-{index}");
        let key_area = layout.place(&mut rng, 16.0, 16.0);
        let door_area = layout.place(&mut rng, 20.0, 80.0);
        if let (Some(key_area), Some(door_rect)) = (key_area, door_area) {
            let c = key_area.center();
            level.keys.push(Key {
                x: c.x,
                y: c.y,
                radius: 8.0,
                key_id: key_id.clone(),
            });
            level.doors.push(Door::Key {
                rect: door_rect,
                key_id: Some(key_id),
            });
        }
    }

    log::debug!(
        "Generated freeplay level {} ({} walls, {} enemies, {} traps)",
        index,
        level.obstacles.len(),
        level.enemies.len(),
        level.traps.len()
    );
    level
}
