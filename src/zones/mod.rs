//! Card locations.
//!
//! Every card a team owns sits in exactly one container: a draw stack,
//! a discard pile, the fatigue stack, a rider's hand, or a rider's played
//! slot. A `CardCensus` walks a team and records where each card is, which
//! makes card conservation checkable at any point of a race.
//!
//! ## Key Types
//!
//! - `Zone`: One card container
//! - `CardCensus`: Card location map and per-zone counts for a team

pub mod census;

pub use census::{CardCensus, Zone};
