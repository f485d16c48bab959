//! Race rules.
//!
//! - `movement`: how far a card carries a rider
//! - `lanes`: lane capacity and blocking
//! - `slipstream`: drafting detection and the slipstream pass
//! - `fatigue`: end-of-turn penalties and redraw
//! - `engine`: `RaceEngine`, which runs the phases in order

pub mod movement;
pub mod lanes;
pub mod slipstream;
pub mod fatigue;
pub mod engine;

pub use movement::movement;
pub use lanes::{move_rider, plan_move, MoveOutcome, MovePlan, Occupancy};
pub use slipstream::{is_drafting, slipstream_pass};
pub use fatigue::fatigue_pass;
pub use engine::{RaceEngine, StepReport};
