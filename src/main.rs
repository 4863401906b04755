//! Portal Quest headless runner
//!
//! Plays a level pack (or freeplay) with a simple autopilot and logs the
//! quest transitions. Useful for smoke-testing imported bundles.
//!
//! ```text
//! portal-quest [--settings FILE] [--freeplay] [--frames N] [BUNDLE]
//! ```

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::path::PathBuf;

    use anyhow::{Context, Result};
    use clap::Parser;
    use glam::Vec2;
    use portal_quest::generate::FreeplayLevels;
    use portal_quest::levels::builtin_pack;
    use portal_quest::persistence::load_bundle;
    use portal_quest::sim::{GameMode, GameState, QuestStatus, SwitchBehavior, TickInput};
    use portal_quest::{LevelRepository, QuestController, Settings};

    const DT: f32 = 1.0 / 60.0;
    const DEFAULT_MAX_FRAMES: u64 = 60 * 60 * 5;
    /// Frames without progress before the autopilot sidesteps
    const STUCK_FRAMES: u32 = 20;

    #[derive(Parser, Debug)]
    #[command(name = "portal-quest")]
    #[command(about = "Play a Portal Quest level pack headlessly with an autopilot")]
    struct Args {
        /// Level bundle to play (defaults to the built-in quest)
        bundle: Option<PathBuf>,

        /// Settings JSON file
        #[arg(long)]
        settings: Option<PathBuf>,

        /// Play endless generated levels instead of a pack
        #[arg(long)]
        freeplay: bool,

        /// Stop after this many frames
        #[arg(long, default_value_t = DEFAULT_MAX_FRAMES)]
        frames: u64,
    }

    /// Greedy steering: keys first, then unpressed switches, then the portal
    ///
    /// Sidesteps for a while when the player stops making progress.
    #[derive(Debug, Default)]
    struct Autopilot {
        last_pos: Vec2,
        stuck: u32,
        sidestep: u32,
        frame: u64,
    }

    fn nearest(from: Vec2, points: impl Iterator<Item = Vec2>) -> Option<Vec2> {
        points.min_by(|a, b| {
            a.distance_squared(from)
                .partial_cmp(&b.distance_squared(from))
                .unwrap_or(std::cmp::Ordering::Equal)
        })
    }

    impl Autopilot {
        fn target(state: &GameState) -> Option<Vec2> {
            let center = state.player.center();
            let level = &state.level;
            let closed_switch_door = level.doors.iter().any(|d| d.is_closed_switch_door());

            nearest(center, level.keys.iter().map(|k| Vec2::new(k.x, k.y)))
                .or_else(|| {
                    if !closed_switch_door {
                        return None;
                    }
                    nearest(
                        center,
                        level
                            .switches
                            .iter()
                            .filter(|s| !(s.pressed && s.behavior() == SwitchBehavior::Latch))
                            .map(|s| s.rect.center()),
                    )
                })
                .or_else(|| level.portal.map(|p| p.center()))
        }

        fn input(&mut self, state: &GameState) -> TickInput {
            self.frame += 1;
            let mut input = TickInput::default();
            let Some(target) = Self::target(state) else {
                return input;
            };

            let pos = state.player.pos;
            if pos.distance(self.last_pos) < 0.25 {
                self.stuck += 1;
            } else {
                self.stuck = 0;
            }
            self.last_pos = pos;
            if self.stuck > STUCK_FRAMES {
                self.stuck = 0;
                self.sidestep = 45;
            }

            let mut dir = target - state.player.center();
            if self.sidestep > 0 {
                self.sidestep -= 1;
                // Alternate sides between attempts
                dir = if (self.frame / 90) % 2 == 0 {
                    dir.perp()
                } else {
                    -dir.perp()
                };
            }

            input.left = dir.x < -2.0;
            input.right = dir.x > 2.0;
            input.up = dir.y < -2.0;
            input.down = dir.y > 2.0;
            input.fire = !state.level.enemies.is_empty() && self.frame % 30 == 0;
            input
        }
    }

    fn play<R: LevelRepository>(quest: QuestController<R>, mode: GameMode, max_frames: u64) {
        let mut state = quest.new_state(mode);
        quest.start(&mut state);
        let mut pilot = Autopilot::default();
        let mut status = state.status();
        let mut frames = 0;

        while frames < max_frames {
            frames += 1;
            let input = pilot.input(&state);
            quest.step(&mut state, &input, DT);

            if state.status() != status {
                status = state.status();
                log::info!(
                    "Frame {}: {:?} on '{}' (lives {}, score {})",
                    frames,
                    status,
                    state.level.title(),
                    state.progress.lives,
                    state.score
                );
            }

            match status {
                QuestStatus::LevelComplete => {
                    quest.advance(&mut state);
                    pilot = Autopilot::default();
                }
                QuestStatus::GameOver | QuestStatus::QuestComplete | QuestStatus::Idle => break,
                QuestStatus::Playing => {}
            }
        }

        println!(
            "{:?} after {} frames: level {}, score {}, lives {}",
            state.status(),
            frames,
            state.progress.current_level_index + 1,
            state.score,
            state.progress.lives
        );
    }

    pub fn run() -> Result<()> {
        let args = Args::parse();
        let settings = match &args.settings {
            Some(path) => Settings::load(path)
                .with_context(|| format!("loading settings from {}", path.display()))?,
            None => Settings::default(),
        };
        let max_frames = args.frames;

        if args.freeplay {
            log::info!("Freeplay with seed {:#x}", settings.freeplay_seed);
            let levels = FreeplayLevels::new(settings.freeplay_seed);
            play(QuestController::new(levels, settings), GameMode::Freeplay, max_frames);
            return Ok(());
        }

        let pack = match &args.bundle {
            Some(path) => load_bundle(path)
                .with_context(|| format!("loading bundle {}", path.display()))?
                .into_pack(),
            None => builtin_pack(),
        };
        log::info!("Playing '{}' ({} levels)", pack.name, pack.len());
        play(QuestController::new(pack, settings), GameMode::Quest, max_frames);
        Ok(())
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use clap::CommandFactory;

        #[test]
        fn test_cli_definition_is_valid() {
            Args::command().debug_assert();
        }

        #[test]
        fn test_cli_defaults() {
            let args = Args::try_parse_from(["portal-quest"]).unwrap();
            assert!(args.bundle.is_none());
            assert!(args.settings.is_none());
            assert!(!args.freeplay);
            assert_eq!(args.frames, DEFAULT_MAX_FRAMES);
        }

        #[test]
        fn test_cli_flags_and_bundle() {
            let args = Args::try_parse_from([
                "portal-quest",
                "--settings",
                "cfg.json",
                "--freeplay",
                "--frames",
                "120",
                "caves.json",
            ])
            .unwrap();
            assert_eq!(args.settings, Some(PathBuf::from("cfg.json")));
            assert!(args.freeplay);
            assert_eq!(args.frames, 120);
            assert_eq!(args.bundle, Some(PathBuf::from("caves.json")));
        }

        #[test]
        fn test_cli_rejects_bad_frame_count() {
            assert!(Args::try_parse_from(["portal-quest", "--frames", "lots"]).is_err());
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Portal Quest (headless) starting...");
    if let Err(err) = native::run() {
        log::error!("{err:#}");
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The library is embedded by a web host; there is no standalone wasm binary
}
