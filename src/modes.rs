//! Game modes: Splash → Gameplay → EndGame
//!
//! Exactly one mode is active at a time. The only channel between modes is
//! the `Persist` payload handed over on a transition; the receiving mode copies
//! what it needs on entry.

use rand::Rng;
use rand_pcg::Pcg32;
use serde::Serialize;

use crate::backgrounds::{BackgroundHandle, BackgroundSource};
use crate::config::GameConfig;
use crate::error::ConfigError;
use crate::input::{Action, HeldKeys, InputEvent, KeyBindings};
use crate::sim::{Level, LevelOutcome, LevelSnapshot, LevelStart, TickInput};

/// Mode identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ModeId {
    Splash,
    Gameplay,
    EndGame,
}

impl ModeId {
    pub const ALL: [ModeId; 3] = [ModeId::Splash, ModeId::Gameplay, ModeId::EndGame];
}

/// Things that can move the state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Trigger {
    /// Any non-quit key pressed
    KeyPressed,
    /// The level reported the player's death
    PlayerDied,
    /// The level reported its exit was reached
    LevelCompleted,
}

impl Trigger {
    pub const ALL: [Trigger; 3] = [
        Trigger::KeyPressed,
        Trigger::PlayerDied,
        Trigger::LevelCompleted,
    ];
}

/// Mode transition table. `None` means stay in the current mode.
pub fn transition(mode: ModeId, trigger: Trigger) -> Option<ModeId> {
    match (mode, trigger) {
        (ModeId::Splash, Trigger::KeyPressed) => Some(ModeId::Gameplay),
        (ModeId::Gameplay, Trigger::PlayerDied) => Some(ModeId::EndGame),
        (ModeId::EndGame, Trigger::KeyPressed) => Some(ModeId::Gameplay),
        // Levels cycle inside Gameplay
        (ModeId::Gameplay, Trigger::LevelCompleted) => None,
        _ => None,
    }
}

/// Cross-mode payload
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Persist {
    pub score: u64,
    pub high_score: u64,
    pub background: BackgroundHandle,
    pub level_index: u32,
}

/// Result of feeding one event to a mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EventOutcome {
    pub quit: bool,
    pub next: Option<ModeId>,
}

/// Services a mode may use while entering or updating
pub struct ModeContext<'a> {
    pub config: &'a GameConfig,
    pub backgrounds: &'a dyn BackgroundSource,
    pub rng: &'a mut Pcg32,
}

/// Splash title colours
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum NeonColor {
    Blue,
    Pink,
    Red,
}

const SPLASH_PALETTE: [NeonColor; 3] = [NeonColor::Blue, NeonColor::Pink, NeonColor::Red];

/// Read-only view of the active mode for the render sink
#[derive(Debug, Clone, Serialize)]
pub enum Snapshot {
    Splash {
        accent: NeonColor,
        elapsed: f32,
    },
    Gameplay(LevelSnapshot),
    EndGame {
        score: u64,
        high_score: u64,
        background: BackgroundHandle,
        elapsed: f32,
    },
}

/// Quit handling shared by every mode: window close, or the quit key released
fn quit_requested(event: &InputEvent, bindings: &KeyBindings) -> bool {
    match event {
        InputEvent::QuitRequested => true,
        InputEvent::KeyUp(code) => bindings.is_quit(code),
        InputEvent::KeyDown(_) => false,
    }
}

/// Non-quit key press, the trigger for leaving Splash and EndGame
fn any_key_pressed(event: &InputEvent, bindings: &KeyBindings) -> bool {
    matches!(event, InputEvent::KeyDown(code) if !bindings.is_quit(code))
}

#[derive(Debug, Clone)]
pub struct Splash {
    pub accent: NeonColor,
    pub elapsed: f32,
    high_score: u64,
}

impl Splash {
    pub fn enter(persist: &Persist, ctx: &mut ModeContext<'_>) -> Self {
        let accent = SPLASH_PALETTE[ctx.rng.random_range(0..SPLASH_PALETTE.len())];
        Self {
            accent,
            elapsed: 0.0,
            high_score: persist.high_score,
        }
    }
}

/// Active play. Owns the current level and replaces it on level completion.
#[derive(Debug, Clone)]
pub struct Gameplay {
    pub level: Level,
    pending_pause: bool,
}

impl Gameplay {
    /// Start a fresh run: score 0, start speed, first background
    pub fn enter(persist: &Persist, ctx: &mut ModeContext<'_>) -> Result<Self, ConfigError> {
        let level = Level::new(
            ctx.config,
            LevelStart {
                score: 0,
                high_score: persist.high_score,
                speed: ctx.config.start_platform_speed,
                background: ctx.backgrounds.background(0),
                level_index: 0,
                seed: ctx.rng.random(),
            },
        )?;
        Ok(Self {
            level,
            pending_pause: false,
        })
    }

    fn next_level(
        &mut self,
        score: u64,
        speed: f32,
        ctx: &mut ModeContext<'_>,
    ) -> Result<(), ConfigError> {
        let level_index = self.level.level_index + 1;
        self.level = Level::new(
            ctx.config,
            LevelStart {
                score,
                high_score: self.level.high_score,
                speed,
                background: ctx.backgrounds.background(level_index),
                level_index,
                seed: ctx.rng.random(),
            },
        )?;
        Ok(())
    }

    pub fn persist(&self) -> Persist {
        Persist {
            score: self.level.score,
            high_score: self.level.high_score,
            background: self.level.background,
            level_index: self.level.level_index,
        }
    }
}

#[derive(Debug, Clone)]
pub struct EndGame {
    pub persist: Persist,
    pub elapsed: f32,
}

impl EndGame {
    pub fn enter(persist: &Persist) -> Self {
        Self {
            persist: *persist,
            elapsed: 0.0,
        }
    }
}

/// The active mode
#[derive(Debug, Clone)]
pub enum Mode {
    Splash(Splash),
    Gameplay(Gameplay),
    EndGame(EndGame),
}

impl Mode {
    /// Construct and enter the mode `id` with the given payload
    pub fn enter(
        id: ModeId,
        persist: &Persist,
        ctx: &mut ModeContext<'_>,
    ) -> Result<Self, ConfigError> {
        log::info!("Entering {:?}", id);
        Ok(match id {
            ModeId::Splash => Mode::Splash(Splash::enter(persist, ctx)),
            ModeId::Gameplay => Mode::Gameplay(Gameplay::enter(persist, ctx)?),
            ModeId::EndGame => Mode::EndGame(EndGame::enter(persist)),
        })
    }

    pub fn id(&self) -> ModeId {
        match self {
            Mode::Splash(_) => ModeId::Splash,
            Mode::Gameplay(_) => ModeId::Gameplay,
            Mode::EndGame(_) => ModeId::EndGame,
        }
    }

    /// Best score known to this mode
    pub fn high_score(&self) -> u64 {
        match self {
            Mode::Splash(s) => s.high_score,
            Mode::Gameplay(g) => g.level.high_score,
            Mode::EndGame(e) => e.persist.high_score,
        }
    }

    pub fn handle_event(&mut self, event: &InputEvent, bindings: &KeyBindings) -> EventOutcome {
        let quit = quit_requested(event, bindings);
        let id = self.id();

        let next = match self {
            Mode::Splash(_) | Mode::EndGame(_) => {
                if any_key_pressed(event, bindings) {
                    transition(id, Trigger::KeyPressed)
                } else {
                    None
                }
            }
            Mode::Gameplay(gameplay) => {
                if let InputEvent::KeyDown(code) = event {
                    match bindings.action_for(code) {
                        Some(Action::Pause) => gameplay.pending_pause = true,
                        // Confirm only resumes; it never pauses
                        Some(Action::Confirm) if gameplay.level.paused => {
                            gameplay.pending_pause = true;
                        }
                        _ => {}
                    }
                }
                None
            }
        };

        EventOutcome { quit, next }
    }

    /// Advance the mode by one frame. Returns the next mode and its payload
    /// when the mode wants to hand over.
    pub fn update(
        &mut self,
        held: &HeldKeys,
        ctx: &mut ModeContext<'_>,
        dt: f32,
    ) -> Result<Option<(ModeId, Persist)>, ConfigError> {
        match self {
            Mode::Splash(splash) => {
                splash.elapsed += dt;
                Ok(None)
            }
            Mode::EndGame(end) => {
                end.elapsed += dt;
                Ok(None)
            }
            Mode::Gameplay(gameplay) => {
                let bindings = &ctx.config.bindings;
                let input = TickInput {
                    horizontal: held.horizontal(bindings),
                    jump: held.action_held(bindings, Action::Jump),
                    pause: std::mem::take(&mut gameplay.pending_pause),
                };

                match gameplay.level.update(&input) {
                    Some(LevelOutcome::Completed { score, next_speed }) => {
                        debug_assert_eq!(
                            transition(ModeId::Gameplay, Trigger::LevelCompleted),
                            None
                        );
                        gameplay.next_level(score, next_speed, ctx)?;
                        Ok(None)
                    }
                    Some(LevelOutcome::Died { .. }) => {
                        let next = transition(ModeId::Gameplay, Trigger::PlayerDied);
                        Ok(next.map(|next| (next, gameplay.persist())))
                    }
                    None => Ok(None),
                }
            }
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        match self {
            Mode::Splash(s) => Snapshot::Splash {
                accent: s.accent,
                elapsed: s.elapsed,
            },
            Mode::Gameplay(g) => Snapshot::Gameplay(g.level.snapshot()),
            Mode::EndGame(e) => Snapshot::EndGame {
                score: e.persist.score,
                high_score: e.persist.high_score,
                background: e.persist.background,
                elapsed: e.elapsed,
            },
        }
    }
}
