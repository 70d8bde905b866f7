//! The game session aggregate: field, ledger, and turn engine in one place.

use std::io::Write;

use thiserror::Error;
use tracing::info;

use crate::field::{generate, Faction, Field, FieldConfig, GenerateError, RegionId};
use crate::ledger::MoveLedger;
use crate::snapshot::Snapshot;
use crate::turn::{Tick, Ticker, TurnEngine};

/// Full session configuration, with the design defaults.
#[derive(Debug, Clone)]
pub struct GameConfig {
    /// Field generation parameters.
    pub field: FieldConfig,
    /// Ticks per turn; the display counts `countdown_len - 1` down to 1,
    /// then the next tick resolves.
    pub countdown_len: u32,
    /// Flat per-region strength bonus granted each turn.
    pub reinforcement: u32,
    /// The faction that receives reinforcement and issues pointer moves.
    pub human: Faction,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            field: FieldConfig::default(),
            countdown_len: 6,
            reinforcement: 10,
            human: Faction::Red,
        }
    }
}

/// A fatal configuration or generation failure; the session refuses to
/// start rather than run on bad state.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("human faction must be red or blue, not neutral")]
    NeutralHuman,
    #[error("countdown length must be at least 1")]
    ZeroCountdown,
    #[error("field generation failed: {0}")]
    Generate(#[from] GenerateError),
}

/// Owns all mutable game state and drives it through ticks.
///
/// There are no ambient globals: whatever loop or event handler runs the
/// game holds the session and passes it around explicitly.
pub struct GameSession {
    config: GameConfig,
    field: Field,
    ledger: MoveLedger,
    engine: TurnEngine,
}

impl GameSession {
    /// Validates the configuration and generates a fresh field.
    pub fn new(config: GameConfig) -> Result<GameSession, SessionError> {
        if config.human == Faction::Neutral {
            return Err(SessionError::NeutralHuman);
        }
        if config.countdown_len == 0 {
            return Err(SessionError::ZeroCountdown);
        }
        let field = generate(&config.field)?;
        GameSession::from_field(config, field)
    }

    /// Builds a session around a prebuilt field — the injection seam for
    /// tests and embedders with their own site source.
    pub fn from_field(config: GameConfig, field: Field) -> Result<GameSession, SessionError> {
        if config.human == Faction::Neutral {
            return Err(SessionError::NeutralHuman);
        }
        if config.countdown_len == 0 {
            return Err(SessionError::ZeroCountdown);
        }
        let engine = TurnEngine::new(config.countdown_len, config.reinforcement, config.human);
        info!(
            regions = field.len(),
            countdown = config.countdown_len,
            human = config.human.name(),
            "session started"
        );
        Ok(GameSession {
            config,
            field,
            ledger: MoveLedger::new(),
            engine,
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn field(&self) -> &Field {
        &self.field
    }

    pub fn ledger(&self) -> &MoveLedger {
        &self.ledger
    }

    /// Ticks remaining until the next resolution.
    pub fn countdown(&self) -> u32 {
        self.engine.countdown()
    }

    /// Number of turns resolved so far.
    pub fn turn(&self) -> u64 {
        self.engine.turn()
    }

    /// Queues a move for the acting faction; see [`MoveLedger::submit`].
    pub fn submit(&mut self, source: RegionId, target: RegionId, faction: Faction) -> bool {
        self.ledger.submit(&self.field, source, target, faction)
    }

    /// Advances the session by one tick.
    pub fn tick(&mut self) -> Tick {
        self.engine.tick(&mut self.field, &mut self.ledger)
    }

    /// Serializable view of the current state for the render collaborator.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(self)
    }

    /// Drives the ticker for at most `ticks` ticks, writing one line per
    /// tick to `out`: the countdown value while counting, a turn summary on
    /// resolution.
    pub fn run<W: Write>(&mut self, ticker: &Ticker, ticks: u64, out: &mut W) {
        let mut left = ticks;
        ticker.run(|| {
            if left == 0 {
                return false;
            }
            left -= 1;
            match self.tick() {
                Tick::Counting(value) => {
                    writeln!(out, "countdown {}", value).unwrap();
                }
                Tick::Resolved(report) => {
                    writeln!(
                        out,
                        "turn {} resolved moves {} reinforced {}",
                        report.turn,
                        report.moves.len(),
                        report.reinforced
                    )
                    .unwrap();
                }
            }
            left > 0
        });
        out.flush().unwrap();
    }
}
