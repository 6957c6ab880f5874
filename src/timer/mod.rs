//! Timer engine for the interval timer.
//!
//! This module contains the interactive core:
//! - `countdown`: the per-phase state machine (ticks, keys, audio lifetime)
//! - `session`: sequencing of sessions and breaks for a whole run

pub mod countdown;
pub mod session;

pub use countdown::{CountdownController, CountdownState, PhasePlan};
pub use session::{PhaseRecord, SessionOrchestrator, Soundtrack};
