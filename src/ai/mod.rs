//! Card choice for riders without a human behind them.
//!
//! `CardPolicy` is the seam: the engine asks a policy for a card whenever
//! a scripted rider still has to play. `ScriptedPolicy` is the default
//! heuristic.

pub mod policy;

pub use policy::{CardPolicy, ScriptedPolicy};
