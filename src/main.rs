//! Irredenta -- a territory-control engine on a random planar subdivision.
//!
//! This binary reads line commands from stdin and writes responses to
//! stdout, standing in for the pointer-input and rendering collaborators:
//!
//!   new [seed]                 generate a fresh field and session
//!   regions                    list every region with owner and strength
//!   pending                    list queued moves
//!   move <src> <dst> [faction] queue a move (default: the human faction)
//!   tick [n]                   advance n ticks synchronously (default 1)
//!   play <ticks> <ms>          run the real-time clock for some ticks
//!   snapshot                   dump the render view as one JSON line
//!   quit                       exit

use std::io::{self, BufRead, Write};
use std::time::Duration;

use irredenta::field::{Faction, FieldConfig, RegionId};
use irredenta::session::{GameConfig, GameSession};
use irredenta::turn::Ticker;

fn main() {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());
    let mut session: Option<GameSession> = None;

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(_) => break,
        };
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.is_empty() {
            continue;
        }

        match tokens[0] {
            "new" => handle_new(&tokens, &mut session, &mut out),
            "regions" => with_session(&mut session, |s| handle_regions(s, &mut out)),
            "pending" => with_session(&mut session, |s| handle_pending(s, &mut out)),
            "move" => with_session(&mut session, |s| handle_move(&tokens, s, &mut out)),
            "tick" => with_session(&mut session, |s| {
                let ticks = tokens.get(1).and_then(|t| t.parse().ok()).unwrap_or(1);
                s.run(&Ticker::new(Duration::ZERO), ticks, &mut out);
            }),
            "play" => with_session(&mut session, |s| handle_play(&tokens, s, &mut out)),
            "snapshot" => with_session(&mut session, |s| handle_snapshot(s, &mut out)),
            "quit" => break,
            other => eprintln!("unknown command: {}", other),
        }
        out.flush().unwrap();
    }
}

/// Runs a command that needs a live session, or complains.
fn with_session<F>(session: &mut Option<GameSession>, f: F)
where
    F: FnOnce(&mut GameSession),
{
    match session {
        Some(s) => f(s),
        None => eprintln!("no field yet; run 'new' first"),
    }
}

fn handle_new<W: Write>(tokens: &[&str], session: &mut Option<GameSession>, out: &mut W) {
    let seed = tokens.get(1).and_then(|t| t.parse().ok()).unwrap_or(0);
    let config = GameConfig {
        field: FieldConfig {
            seed,
            ..FieldConfig::default()
        },
        ..GameConfig::default()
    };
    match GameSession::new(config) {
        Ok(s) => {
            writeln!(out, "field {} regions", s.field().len()).unwrap();
            *session = Some(s);
        }
        Err(e) => eprintln!("new: {}", e),
    }
}

fn handle_regions<W: Write>(session: &GameSession, out: &mut W) {
    for region in session.field().regions() {
        let neighbors: Vec<String> = region.neighbors().iter().map(|n| n.to_string()).collect();
        writeln!(
            out,
            "region {} owner {} strength {} border {} neighbors {}",
            region.id(),
            region.owner().code(),
            region.strength(),
            region.is_border(),
            neighbors.join(",")
        )
        .unwrap();
    }
}

fn handle_pending<W: Write>(session: &GameSession, out: &mut W) {
    writeln!(out, "pending {}", session.ledger().len()).unwrap();
    for mv in session.ledger().pending() {
        writeln!(out, "move {} {} {}", mv.source, mv.target, mv.faction.code()).unwrap();
    }
}

fn handle_move<W: Write>(tokens: &[&str], session: &mut GameSession, out: &mut W) {
    let (source, target) = match (
        tokens.get(1).and_then(|t| t.parse().ok()),
        tokens.get(2).and_then(|t| t.parse().ok()),
    ) {
        (Some(s), Some(t)) => (RegionId(s), RegionId(t)),
        _ => {
            eprintln!("malformed move: expected 'move <src> <dst> [faction]'");
            return;
        }
    };
    let faction = match tokens.get(3) {
        Some(name) => match Faction::from_name(name) {
            Some(f) => f,
            None => {
                eprintln!("unknown faction: {}", name);
                return;
            }
        },
        None => session.config().human,
    };
    let accepted = session.submit(source, target, faction);
    writeln!(out, "{}", if accepted { "accepted" } else { "rejected" }).unwrap();
}

fn handle_play<W: Write>(tokens: &[&str], session: &mut GameSession, out: &mut W) {
    let (ticks, ms) = match (
        tokens.get(1).and_then(|t| t.parse().ok()),
        tokens.get(2).and_then(|t| t.parse().ok()),
    ) {
        (Some(t), Some(m)) => (t, m),
        _ => {
            eprintln!("malformed play: expected 'play <ticks> <ms>'");
            return;
        }
    };
    session.run(&Ticker::new(Duration::from_millis(ms)), ticks, out);
}

fn handle_snapshot<W: Write>(session: &GameSession, out: &mut W) {
    match session.snapshot().to_json() {
        Ok(json) => writeln!(out, "{}", json).unwrap(),
        Err(e) => eprintln!("snapshot: {}", e),
    }
}
