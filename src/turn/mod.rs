//! The turn engine: countdown state machine and turn resolution.
//!
//! The engine counts down a fixed number of ticks, then resolves the turn
//! atomically within the tick that reaches zero: drain the ledger, apply
//! every move, reinforce the human faction, restart the countdown. The cycle
//! has no terminal state; only cancelling the driving clock stops it.

pub mod clock;
pub mod resolve;

use tracing::debug;

pub use clock::{CancelHandle, Ticker};
pub use resolve::{apply_moves, reinforce, MoveOutcome, ResolvedMove};

use crate::field::{Faction, Field};
use crate::ledger::MoveLedger;

/// The observable result of one clock tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Tick {
    /// Countdown display value, counting down to 1; the next tick resolves.
    Counting(u32),
    /// The countdown hit zero and the turn resolved.
    Resolved(TurnReport),
}

/// What happened during one turn resolution; the redraw hook payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnReport {
    /// 1-based number of the turn that just resolved.
    pub turn: u64,
    /// Every drained move with its outcome, in applied order.
    pub moves: Vec<ResolvedMove>,
    /// Number of regions that received the reinforcement bonus.
    pub reinforced: usize,
}

/// Advances game time over a field and ledger it does not own.
#[derive(Debug, Clone)]
pub struct TurnEngine {
    countdown_len: u32,
    reinforcement: u32,
    human: Faction,
    remaining: u32,
    turn: u64,
}

impl TurnEngine {
    pub fn new(countdown_len: u32, reinforcement: u32, human: Faction) -> TurnEngine {
        TurnEngine {
            countdown_len,
            reinforcement,
            human,
            remaining: countdown_len,
            turn: 0,
        }
    }

    /// Ticks remaining until the next resolution.
    pub fn countdown(&self) -> u32 {
        self.remaining
    }

    /// Number of turns resolved so far.
    pub fn turn(&self) -> u64 {
        self.turn
    }

    /// Advances one tick. While counting, returns the new display value; on
    /// reaching zero, resolves the turn and restarts the countdown.
    ///
    /// Resolution is atomic with respect to the tick: the ledger is drained
    /// exactly once, so a submission lands either before the drain (and
    /// resolves this turn) or after it (and resolves next turn).
    pub fn tick(&mut self, field: &mut Field, ledger: &mut MoveLedger) -> Tick {
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining > 0 {
            return Tick::Counting(self.remaining);
        }

        let drained = ledger.drain();
        let moves = apply_moves(field, &drained);
        let reinforced = reinforce(field, self.human, self.reinforcement);
        self.turn += 1;
        self.remaining = self.countdown_len;
        debug!(
            turn = self.turn,
            moves = moves.len(),
            reinforced,
            "turn resolved"
        );
        Tick::Resolved(TurnReport {
            turn: self.turn,
            moves,
            reinforced,
        })
    }
}
