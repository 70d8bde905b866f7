//! Irredenta engine library.
//!
//! A turn-based territory-control game core on a randomly generated planar
//! subdivision: the field generator, move ledger, turn engine, session
//! aggregate, and snapshot view, for use by integration tests, embedders,
//! and the binary entry point. Rendering and pointer input are external
//! collaborators; they see the session only through these interfaces.

pub mod field;
pub mod ledger;
pub mod session;
pub mod snapshot;
pub mod turn;
