//! Core of a code-gated gift page.
//!
//! A visitor types a code; [`resolver::resolve`] classifies it as the
//! admin code, an easter egg, a profile's access key, or nothing.
//! [`gate::Gate`] owns the page state around it and hands out a
//! [`reveal::RevealSequencer`] whenever a view switch has to be staged.

pub mod audit;
pub mod config;
pub mod countdown;
mod errors;
pub mod editor;
pub mod gate;
pub mod profile;
pub mod resolver;
pub mod reveal;
pub mod seed;
pub mod storage;

pub use audit::{audit, Finding};
pub use config::GateConfig;
pub use countdown::{
    CountdownReading, CountdownTick, CountdownTicker, Direction,
};
pub use editor::RosterEditor;
pub use errors::{GateError, Result};
pub use gate::{ActiveEgg, Gate, Submission, View};
pub use profile::{EasterEgg, EggKind, Profile, ProfileId, Section};
pub use resolver::{resolve, Resolution};
pub use reveal::{
    RevealEvent, RevealScript, RevealSequencer, RevealState, RevealTarget,
};
pub use seed::{seed_roster, ADMIN_CODE};
