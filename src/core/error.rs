//! Error types for race operations.

use thiserror::Error;

use super::entity::{CardId, RaceId, RiderId};
use super::phase::Phase;

/// Errors returned by race operations.
///
/// `RaceNotFound`, `RiderNotFound`, `CardNotInHand`, `InvalidPhase`,
/// `RiderFinished` and `NoTeams` are caller errors: the race is left
/// untouched. `IllegalMove` signals an internal consistency fault.
#[derive(Debug, Error)]
pub enum RaceError {
    #[error("race {0} not found")]
    RaceNotFound(RaceId),
    #[error("rider {0} not found")]
    RiderNotFound(RiderId),
    #[error("{card} is not in the hand of {rider}")]
    CardNotInHand { rider: RiderId, card: CardId },
    #[error("action requires phase {expected}, race is in {actual}")]
    InvalidPhase { expected: Phase, actual: Phase },
    #[error("{0} has already finished")]
    RiderFinished(RiderId),
    #[error("a race needs at least one team")]
    NoTeams,
    #[error("illegal move: {0}")]
    IllegalMove(String),
    #[error("storage failure: {0}")]
    Storage(#[from] StoreError),
}

impl RaceError {
    /// True for the "id absent" family of errors.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::RaceNotFound(_) | Self::RiderNotFound(_) | Self::CardNotInHand { .. }
        )
    }
}

/// Errors raised by a [`StateStore`](crate::store::StateStore).
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("could not encode or decode race document: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Errors raised while building a track.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TrackError {
    #[error("track has no tiles")]
    Empty,
    #[error("tile at index {index} claims position {position}")]
    MisnumberedTile { index: usize, position: usize },
    #[error("tile {0} has no lanes")]
    ZeroLanes(usize),
}
