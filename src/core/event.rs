//! Human-readable race events.
//!
//! Every event is rendered into the race's append-only log with its
//! `Display` text.

use crate::cards::CardFamily;

/// Something worth telling the players about.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RaceEvent {
    CardPlayed {
        rider: String,
        family: CardFamily,
        value: u8,
        scripted: bool,
    },
    NoCardToPlay(String),
    Moved {
        rider: String,
        position: usize,
        lane: u8,
    },
    Blocked {
        rider: String,
        position: usize,
    },
    HeldPosition(String),
    CannotMove(String),
    Finished(String),
    Slipstreamed(String),
    Fatigued(String),
}

impl std::fmt::Display for RaceEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CardPlayed {
                rider,
                family,
                value,
                scripted,
            } => {
                let tag = if *scripted { " (AI)" } else { "" };
                write!(f, "{rider}{tag} played {family} {value}")
            }
            Self::NoCardToPlay(rider) => write!(f, "{rider} has no card to play"),
            Self::Moved {
                rider,
                position,
                lane,
            } => write!(f, "{rider} moves to position {position}, lane {lane}"),
            Self::Blocked { rider, position } => {
                write!(f, "{rider} blocked at position {position}")
            }
            Self::HeldPosition(rider) => write!(f, "{rider} holds position"),
            Self::CannotMove(rider) => write!(f, "{rider} cannot move, no available lanes"),
            Self::Finished(rider) => write!(f, "{rider} finished the race!"),
            Self::Slipstreamed(rider) => write!(f, "{rider} slipstreams forward"),
            Self::Fatigued(rider) => write!(f, "{rider} receives fatigue card"),
        }
    }
}
