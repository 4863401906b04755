//! Built-in quest levels

use glam::Vec2;

use crate::quest::LevelPack;
use crate::sim::{
    Axis, Circle, Door, Enemy, Key, Level, Powerup, PowerupKind, Rect, Switch, Trap, TrapKind,
};

fn powerup(x: f32, y: f32, kind: PowerupKind) -> Powerup {
    Powerup {
        x,
        y,
        radius: 10.0,
        kind,
    }
}

fn trap(x: f32, y: f32, w: f32, h: f32, kind: TrapKind) -> Trap {
    Trap {
        rect: Rect::new(x, y, w, h),
        kind,
        damage: None,
    }
}

fn switch_door(x: f32, y: f32, id: &str) -> Door {
    Door::Switch {
        rect: Rect::new(x, y, 20.0, 100.0),
        id: Some(id.to_string()),
        open: false,
    }
}

/// Two offset walls and a lone patrol
fn first_steps() -> Level {
    Level {
        name: Some("First Steps".into()),
        portal: Some(Circle::new(720.0, 300.0, 20.0)),
        obstacles: vec![
            Rect::new(300.0, 0.0, 20.0, 380.0),
            Rect::new(520.0, 220.0, 20.0, 380.0),
        ],
        enemies: vec![Enemy::Patrol {
            rect: Rect::new(360.0, 450.0, 24.0, 24.0),
            velocity: 2.0,
            axis: Axis::Horizontal,
        }],
        powerups: vec![powerup(180.0, 100.0, PowerupKind::Speed)],
        ..Level::new("first-steps", Vec2::new(40.0, 288.0))
    }
}

/// A key door splits the map; spikes and glue guard the key
fn lock_and_key() -> Level {
    Level {
        name: Some("Lock and Key".into()),
        portal: Some(Circle::new(720.0, 100.0, 22.0)),
        obstacles: vec![
            Rect::new(400.0, 0.0, 20.0, 250.0),
            Rect::new(400.0, 350.0, 20.0, 250.0),
            Rect::new(150.0, 300.0, 200.0, 20.0),
        ],
        enemies: vec![Enemy::Chaser {
            rect: Rect::new(650.0, 450.0, 24.0, 24.0),
            speed: 1.2,
        }],
        powerups: vec![powerup(320.0, 80.0, PowerupKind::Shield)],
        traps: vec![
            trap(250.0, 420.0, 40.0, 40.0, TrapKind::Spike),
            trap(100.0, 380.0, 80.0, 60.0, TrapKind::Glue),
        ],
        keys: vec![Key {
            x: 200.0,
            y: 500.0,
            radius: 8.0,
            key_id: "gold".into(),
        }],
        doors: vec![Door::Key {
            rect: Rect::new(400.0, 250.0, 20.0, 100.0),
            key_id: Some("gold".into()),
        }],
        ..Level::new("lock-and-key", Vec2::new(40.0, 40.0))
    }
}

/// A toggle switch and a latch switch open two gates around a spinner
fn switchback() -> Level {
    Level {
        name: Some("Switchback".into()),
        portal: Some(Circle::new(720.0, 300.0, 22.0)),
        obstacles: vec![
            Rect::new(300.0, 0.0, 20.0, 250.0),
            Rect::new(300.0, 350.0, 20.0, 250.0),
            Rect::new(600.0, 0.0, 20.0, 250.0),
            Rect::new(600.0, 350.0, 20.0, 250.0),
        ],
        enemies: vec![Enemy::Spinner {
            cx: 460.0,
            cy: 300.0,
            orbit_radius: 70.0,
            angle: 0.0,
            angular_speed: 1.8,
            size: 20.0,
        }],
        powerups: vec![powerup(200.0, 450.0, PowerupKind::Dash)],
        traps: vec![
            trap(120.0, 250.0, 60.0, 60.0, TrapKind::Fire),
            trap(420.0, 100.0, 60.0, 60.0, TrapKind::Poison),
        ],
        doors: vec![switch_door(300.0, 250.0, "gate"), switch_door(600.0, 250.0, "east")],
        switches: vec![
            Switch {
                rect: Rect::new(150.0, 120.0, 40.0, 40.0),
                switch_id: Some("gate-switch".into()),
                door_ids: vec!["gate".into()],
                pressed: false,
                behavior: None,
            },
            Switch {
                rect: Rect::new(450.0, 480.0, 40.0, 40.0),
                switch_id: Some("east".into()),
                door_ids: Vec::new(),
                pressed: false,
                behavior: None,
            },
        ],
        ..Level::new("switchback", Vec2::new(40.0, 500.0))
    }
}

/// The built-in quest, in play order
pub fn builtin_levels() -> Vec<Level> {
    vec![first_steps(), lock_and_key(), switchback()]
}

/// The built-in quest as a pack
pub fn builtin_pack() -> LevelPack {
    LevelPack::new("Portal Quest", builtin_levels())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use std::collections::HashSet;

    fn in_playfield(rect: &Rect) -> bool {
        rect.x >= 0.0
            && rect.y >= 0.0
            && rect.right() <= PLAYFIELD_WIDTH
            && rect.bottom() <= PLAYFIELD_HEIGHT
    }

    #[test]
    fn test_level_ids_are_unique() {
        let levels = builtin_levels();
        let ids: HashSet<_> = levels.iter().map(|l| l.id.as_str()).collect();
        assert_eq!(ids.len(), levels.len());
    }

    #[test]
    fn test_spawn_is_clear() {
        for level in builtin_levels() {
            let spawn = Rect::at(level.start, PLAYER_WIDTH, PLAYER_HEIGHT);
            assert!(in_playfield(&spawn), "{} spawn out of bounds", level.id);
            assert!(
                level.obstacles.iter().all(|r| !r.overlaps(&spawn)),
                "{} spawn inside a wall",
                level.id
            );
            assert!(
                level.doors.iter().all(|d| !d.rect().overlaps(&spawn)),
                "{} spawn inside a door",
                level.id
            );
            assert!(
                level.enemies.iter().all(|e| !e.rect().overlaps(&spawn)),
                "{} spawn on an enemy",
                level.id
            );
        }
    }

    #[test]
    fn test_every_level_has_a_portal_in_bounds() {
        for level in builtin_levels() {
            let portal = level.portal.expect("built-in levels have portals");
            assert!(portal.x > 0.0 && portal.x < PLAYFIELD_WIDTH);
            assert!(portal.y > 0.0 && portal.y < PLAYFIELD_HEIGHT);
        }
    }

    #[test]
    fn test_key_doors_have_keys() {
        for level in builtin_levels() {
            for door in &level.doors {
                if let Door::Key { key_id, .. } = door {
                    let key_id = key_id.as_deref().expect("built-in key doors have ids");
                    assert!(
                        level.keys.iter().any(|k| k.key_id == key_id),
                        "{}: no key for door '{}'",
                        level.id,
                        key_id
                    );
                }
            }
        }
    }

    #[test]
    fn test_entities_do_not_overlap_walls() {
        for level in builtin_levels() {
            let mut solids: Vec<Rect> = level.obstacles.clone();
            solids.extend(level.doors.iter().map(Door::rect));
            let mut entities: Vec<Rect> = level.traps.iter().map(|t| t.rect).collect();
            entities.extend(level.switches.iter().map(|s| s.rect));
            entities.extend(level.enemies.iter().map(Enemy::rect));
            for entity in &entities {
                assert!(in_playfield(entity), "{}: {:?} out of bounds", level.id, entity);
                assert!(
                    solids.iter().all(|s| !s.overlaps(entity)),
                    "{}: {:?} overlaps a wall",
                    level.id,
                    entity
                );
            }
            for key in &level.keys {
                assert!(solids.iter().all(|s| !key.circle().overlaps_rect(s)));
            }
            for powerup in &level.powerups {
                assert!(solids.iter().all(|s| !powerup.circle().overlaps_rect(s)));
            }
        }
    }
}
