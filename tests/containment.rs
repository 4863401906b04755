use glam::Vec2;
use portal_quest::consts::*;
use portal_quest::sim::*;
use portal_quest::{LevelPack, QuestController, Settings};
use proptest::prelude::*;

const DT: f32 = 1.0 / 60.0;
const SPAWN: Vec2 = Vec2::new(100.0, 100.0);

fn rect_strategy() -> impl Strategy<Value = Rect> {
    (0.0f32..780.0, 0.0f32..580.0, 10.0f32..200.0, 10.0f32..200.0)
        .prop_map(|(x, y, w, h)| Rect::new(x, y, w, h))
}

fn move_strategy() -> impl Strategy<Value = TickInput> {
    (0u8..16, prop::bool::weighted(0.1)).prop_map(|(keys, dash)| TickInput {
        up: keys & 1 != 0,
        down: keys & 2 != 0,
        left: keys & 4 != 0,
        right: keys & 8 != 0,
        dash,
        ..Default::default()
    })
}

fn walled_level(walls: Vec<Rect>, doors: Vec<Rect>) -> Level {
    let spawn = Rect::at(SPAWN, PLAYER_WIDTH, PLAYER_HEIGHT);
    let mut level = Level::new("walled", SPAWN);
    level.obstacles = walls.into_iter().filter(|r| !r.overlaps(&spawn)).collect();
    level.doors = doors
        .into_iter()
        .filter(|r| !r.overlaps(&spawn))
        .enumerate()
        .map(|(i, rect)| {
            if i % 2 == 0 {
                Door::Key {
                    rect,
                    key_id: Some("never-held".into()),
                }
            } else {
                Door::Switch {
                    rect,
                    id: None,
                    open: false,
                }
            }
        })
        .collect();
    level
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn player_never_ends_a_step_inside_a_solid(
        walls in prop::collection::vec(rect_strategy(), 0..12),
        doors in prop::collection::vec(rect_strategy(), 0..4),
        moves in prop::collection::vec(move_strategy(), 1..200),
    ) {
        let level = walled_level(walls, doors);
        let quest = QuestController::new(LevelPack::single(level), Settings::default());
        let mut state = quest.new_state(GameMode::Quest);
        quest.start(&mut state);
        state.player.dash_charges = 5;

        for input in &moves {
            quest.step(&mut state, input, DT);
            let body = state.player.rect();
            for wall in &state.level.obstacles {
                prop_assert!(!body.overlaps(wall), "{:?} inside wall {:?}", body, wall);
            }
            for door in &state.level.doors {
                prop_assert!(!body.overlaps(&door.rect()), "{:?} inside door {:?}", body, door);
            }
        }
    }

    #[test]
    fn player_stays_in_bounds(
        start_x in 0.0f32..(PLAYFIELD_WIDTH - PLAYER_WIDTH),
        start_y in 0.0f32..(PLAYFIELD_HEIGHT - PLAYER_HEIGHT),
        moves in prop::collection::vec(move_strategy(), 1..300),
        dt in 0.0f32..0.2,
    ) {
        let level = Level::new("open", Vec2::new(start_x, start_y));
        let quest = QuestController::new(LevelPack::single(level), Settings::default());
        let mut state = quest.new_state(GameMode::Quest);
        quest.start(&mut state);
        state.player.dash_charges = 10;
        state.player.speed_boost_timer = 100.0;

        for input in &moves {
            quest.step(&mut state, input, dt);
            let pos = state.player.pos;
            prop_assert!(pos.x >= 0.0 && pos.x <= PLAYFIELD_WIDTH - PLAYER_WIDTH);
            prop_assert!(pos.y >= 0.0 && pos.y <= PLAYFIELD_HEIGHT - PLAYER_HEIGHT);
        }
    }

    #[test]
    fn timers_and_health_never_go_negative(
        shield in 0.0f32..2.0,
        poison in 0.0f32..5.0,
        steps in 1usize..400,
    ) {
        let mut level = Level::new("hazards", Vec2::new(100.0, 100.0));
        level.traps.push(Trap {
            rect: Rect::new(0.0, 0.0, 400.0, 400.0),
            kind: TrapKind::Fire,
            damage: None,
        });
        let quest = QuestController::new(LevelPack::single(level), Settings::default());
        let mut state = quest.new_state(GameMode::CreatorTest);
        quest.start(&mut state);
        state.player.shield_timer = shield;
        state.player.poison_timer = poison;
        state.player.poison_dps = POISON_DAMAGE_PER_SECOND;

        for _ in 0..steps {
            quest.step(&mut state, &TickInput::default(), DT);
            let p = &state.player;
            prop_assert!(p.health >= 0.0 && !p.health.is_nan());
            prop_assert!(p.shield_timer >= 0.0);
            prop_assert!(p.poison_timer >= 0.0);
            prop_assert!(p.speed_boost_timer >= 0.0);
            prop_assert!(p.hazard_invuln_timer >= 0.0);
        }
    }
}
