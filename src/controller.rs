//! Top-level game controller
//!
//! Owns the active mode, the persistent payload, the high score store and the
//! background source. The host feeds it events and calls `update` once per
//! frame; rendering reads `snapshot`.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::backgrounds::BackgroundSource;
use crate::config::GameConfig;
use crate::error::ConfigError;
use crate::input::{HeldKeys, InputEvent};
use crate::modes::{Mode, ModeContext, ModeId, Persist, Snapshot};
use crate::persistence::HighScoreStore;

pub struct Game<S: HighScoreStore, B: BackgroundSource> {
    config: GameConfig,
    store: S,
    backgrounds: B,
    rng: Pcg32,
    mode: Mode,
    /// Last payload handed across a transition
    persist: Persist,
    /// High score as last read from / written to the store
    stored_high_score: u64,
    held: HeldKeys,
    quit: bool,
}

impl<S: HighScoreStore, B: BackgroundSource> Game<S, B> {
    /// Validate the configuration, load the high score and show the splash
    pub fn new(
        config: GameConfig,
        mut store: S,
        backgrounds: B,
        seed: u64,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        let stored_high_score = store.load_high_score();
        let persist = Persist {
            high_score: stored_high_score,
            background: backgrounds.background(0),
            ..Default::default()
        };

        let mut rng = Pcg32::seed_from_u64(seed);
        let mode = {
            let mut ctx = ModeContext {
                config: &config,
                backgrounds: &backgrounds,
                rng: &mut rng,
            };
            Mode::enter(ModeId::Splash, &persist, &mut ctx)?
        };

        log::info!("Game initialized with seed {} (best: {})", seed, stored_high_score);

        Ok(Self {
            config,
            store,
            backgrounds,
            rng,
            mode,
            persist,
            stored_high_score,
            held: HeldKeys::new(),
            quit: false,
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    pub fn mode_id(&self) -> ModeId {
        self.mode.id()
    }

    pub fn persist(&self) -> &Persist {
        &self.persist
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Session high score, including live progress in the current level
    pub fn high_score(&self) -> u64 {
        self.mode.high_score().max(self.persist.high_score)
    }

    pub fn quit_requested(&self) -> bool {
        self.quit
    }

    /// Feed one input event. Returns true once quitting has been requested.
    pub fn handle_event(&mut self, event: InputEvent) -> Result<bool, ConfigError> {
        let fresh = self.held.apply(&event);
        // OS key repeat: the key is already held
        if matches!(event, InputEvent::KeyDown(_)) && !fresh {
            return Ok(self.quit);
        }

        let outcome = self.mode.handle_event(&event, &self.config.bindings);
        if outcome.quit {
            log::info!("Quit requested in {:?}", self.mode.id());
            self.quit = true;
            return Ok(true);
        }
        if let Some(next) = outcome.next {
            let persist = Persist {
                high_score: self.high_score(),
                ..self.persist
            };
            self.switch_to(next, persist)?;
        }
        Ok(self.quit)
    }

    /// Run the active mode for one frame
    pub fn update(&mut self, dt: f32) -> Result<(), ConfigError> {
        if self.quit {
            return Ok(());
        }

        let handover = {
            let mut ctx = ModeContext {
                config: &self.config,
                backgrounds: &self.backgrounds,
                rng: &mut self.rng,
            };
            self.mode.update(&self.held, &mut ctx, dt)?
        };

        if let Some((next, persist)) = handover {
            if next == ModeId::EndGame {
                self.on_player_death(&persist);
            }
            self.switch_to(next, persist)?;
        }
        Ok(())
    }

    pub fn snapshot(&self) -> Snapshot {
        self.mode.snapshot()
    }

    /// Flush the high score before the process exits
    pub fn shutdown(&mut self) {
        let best = self.high_score();
        if best > self.stored_high_score {
            self.save_high_score(best);
        }
        log::info!("Shutting down (best: {})", best);
    }

    fn on_player_death(&mut self, persist: &Persist) {
        debug_assert!(persist.high_score >= persist.score);
        if persist.score >= self.stored_high_score {
            self.save_high_score(persist.score);
        }
    }

    fn save_high_score(&mut self, score: u64) {
        match self.store.save_high_score(score) {
            Ok(()) => self.stored_high_score = score,
            Err(e) => log::warn!("Failed to save high score {}: {}", score, e),
        }
    }

    fn switch_to(&mut self, next: ModeId, persist: Persist) -> Result<(), ConfigError> {
        log::info!("{:?} -> {:?}", self.mode.id(), next);
        self.persist = persist;
        let mut ctx = ModeContext {
            config: &self.config,
            backgrounds: &self.backgrounds,
            rng: &mut self.rng,
        };
        self.mode = Mode::enter(next, &self.persist, &mut ctx)?;
        // Movement keys held across a mode switch don't carry over
        self.held.clear();
        Ok(())
    }
}
