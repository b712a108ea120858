//! Randomizer module - Shuffle state machine and the session that drives it
//!
//! Provides:
//! - The Idle/Busy state machine with drop or queue-one busy policies
//! - Best-effort audible cues
//! - The single-threaded session that applies the processing delay

pub mod cue;
pub mod machine;
pub mod session;
