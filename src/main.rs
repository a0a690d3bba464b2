//! Sky Hopper entry point
//!
//! Rendering, audio and windowing live in the host. Natively this binary runs
//! the simulation headless with a simple autopilot, logging each run.
//!
//! Usage: `sky-hopper [seed] [runs]`

use std::collections::HashSet;

use sky_hopper::backgrounds::CyclingBackgrounds;
use sky_hopper::input::InputEvent;
use sky_hopper::modes::Snapshot;
use sky_hopper::persistence::FileHighScoreStore;
use sky_hopper::sim::{LevelSnapshot, PlatformKind};
use sky_hopper::{Game, GameConfig};

/// Frames per run before the autopilot gives up
const MAX_FRAMES_PER_RUN: u32 = 60 * 60 * 5;
const BACKGROUND_COUNT: u32 = 4;

fn main() {
    env_logger::init();
    log::info!("Sky Hopper (headless) starting...");

    let mut args = std::env::args().skip(1);
    let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or(12345u64);
    let runs = args.next().and_then(|s| s.parse().ok()).unwrap_or(3u32);

    let config_path =
        std::env::var("SKY_HOPPER_CONFIG").unwrap_or_else(|_| "config/sky_hopper.json".to_string());
    let config = GameConfig::load_from(&config_path);

    if let Err(e) = run(config, seed, runs) {
        log::error!("Invalid configuration: {}", e);
        std::process::exit(1);
    }
}

fn run(config: GameConfig, seed: u64, runs: u32) -> Result<(), sky_hopper::ConfigError> {
    let store = FileHighScoreStore::new("data/high_score.txt");
    log::info!("High scores stored in {}", store.path().display());
    let backgrounds = CyclingBackgrounds::new(BACKGROUND_COUNT)?;
    let mut game = Game::new(config, store, backgrounds, seed)?;
    let dt = game.config().tick_dt();

    let mut pilot = Autopilot::default();
    let mut finished_runs = 0;
    let mut frames = 0;

    while !game.quit_requested() {
        let events = match game.snapshot() {
            Snapshot::Splash { .. } => vec![
                InputEvent::KeyDown("Space".to_string()),
                InputEvent::KeyUp("Space".to_string()),
            ],
            Snapshot::Gameplay(level) => {
                frames += 1;
                if frames > MAX_FRAMES_PER_RUN {
                    log::info!("Autopilot survived {} frames, stopping", frames);
                    vec![InputEvent::QuitRequested]
                } else {
                    pilot.steer(&level, game.config().window_width())
                }
            }
            Snapshot::EndGame { score, high_score, .. } => {
                finished_runs += 1;
                log::info!(
                    "Run {} over: score={}, best={}",
                    finished_runs,
                    score,
                    high_score
                );
                frames = 0;
                pilot.release_all();
                if finished_runs >= runs {
                    vec![
                        InputEvent::KeyDown("Escape".to_string()),
                        InputEvent::KeyUp("Escape".to_string()),
                    ]
                } else {
                    vec![InputEvent::KeyDown("Enter".to_string())]
                }
            }
        };

        for event in events {
            game.handle_event(event)?;
        }
        game.update(dt)?;
    }

    game.shutdown();
    println!("Best score: {}", game.high_score());
    Ok(())
}

/// Heads for the closest platform above the player and jumps when under it
#[derive(Default)]
struct Autopilot {
    held: HashSet<&'static str>,
}

impl Autopilot {
    fn release_all(&mut self) {
        self.held.clear();
    }

    fn steer(&mut self, level: &LevelSnapshot, window_width: f32) -> Vec<InputEvent> {
        let player = level.player;
        let player_center = player.x + player.width / 2.0;

        // Prefer the exit; otherwise the lowest platform still above the player
        let target = level
            .platforms
            .iter()
            .filter(|p| p.rect.bottom() < player.top())
            .min_by(|a, b| {
                let exit_rank = |k: PlatformKind| if k == PlatformKind::Exit { 0 } else { 1 };
                exit_rank(a.kind)
                    .cmp(&exit_rank(b.kind))
                    .then(b.rect.y.total_cmp(&a.rect.y))
            });

        let mut want: HashSet<&'static str> = HashSet::new();
        if let Some(target) = target {
            let target_center = target.rect.x + target.rect.width / 2.0;
            let mut dx = target_center - player_center;
            // Going around the edge may be shorter
            if dx.abs() > window_width / 2.0 {
                dx -= window_width * dx.signum();
            }
            if dx < -target.rect.width / 4.0 {
                want.insert("ArrowLeft");
            } else if dx > target.rect.width / 4.0 {
                want.insert("ArrowRight");
            } else {
                want.insert("Space");
            }
        }

        let mut events = Vec::new();
        for code in self.held.difference(&want) {
            events.push(InputEvent::KeyUp(code.to_string()));
        }
        for code in want.difference(&self.held) {
            events.push(InputEvent::KeyDown(code.to_string()));
        }
        self.held = want;
        events
    }
}
