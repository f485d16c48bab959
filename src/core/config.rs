//! Race configuration.
//!
//! Races are configured at creation by providing a `RaceConfig`:
//! - `DeckConfig`: card values of each team's decks
//! - `HandComposition`: how many cards of each family a rider draws
//! - Team shape, track, weather, and the RNG seed. Without a seed every
//!   race draws its own.
//!
//! Every type here also deserializes from JSON, with any missing field
//! falling back to the standard game.

use serde::{Deserialize, Serialize};

use crate::track::{Track, Weather};

/// Standard sprinteur deck values.
pub const SPRINTEUR_VALUES: [u8; 10] = [2, 2, 2, 3, 3, 3, 4, 4, 5, 9];

/// Standard rouleur deck values.
pub const ROULEUR_VALUES: [u8; 10] = [3, 3, 3, 4, 4, 4, 5, 5, 6, 7];

/// Cards in a team's fatigue stack.
pub const FATIGUE_DECK_SIZE: usize = 20;

/// Value of every fatigue card.
pub const FATIGUE_VALUE: u8 = 2;

/// Cards drawn per family for each new hand.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HandComposition {
    pub sprinteur: usize,
    pub rouleur: usize,
}

impl Default for HandComposition {
    fn default() -> Self {
        Self {
            sprinteur: 2,
            rouleur: 2,
        }
    }
}

impl HandComposition {
    /// Total cards in a full hand.
    #[must_use]
    pub const fn total(self) -> usize {
        self.sprinteur + self.rouleur
    }
}

/// Card values for one team's decks.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeckConfig {
    pub sprinteur: Vec<u8>,
    pub rouleur: Vec<u8>,
    pub fatigue_count: usize,
    pub fatigue_value: u8,
}

impl Default for DeckConfig {
    fn default() -> Self {
        Self {
            sprinteur: SPRINTEUR_VALUES.to_vec(),
            rouleur: ROULEUR_VALUES.to_vec(),
            fatigue_count: FATIGUE_DECK_SIZE,
            fatigue_value: FATIGUE_VALUE,
        }
    }
}

/// Complete race configuration.
///
/// ## Example
///
/// ```
/// use peloton::core::RaceConfig;
/// use peloton::track::Weather;
///
/// let config = RaceConfig::new(7)
///     .with_weather(Weather::Tailwind)
///     .with_riders_per_team(3);
///
/// assert_eq!(config.seed, Some(7));
/// assert_eq!(config.riders_per_team, 3);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RaceConfig {
    /// Seed for every random decision in the race. `None` seeds each
    /// new race from entropy.
    pub seed: Option<u64>,
    /// Riders fielded by each team.
    pub riders_per_team: usize,
    /// Leading teams whose riders are human-controlled.
    pub human_teams: usize,
    pub hand: HandComposition,
    pub decks: DeckConfig,
    pub weather: Weather,
    pub track: Track,
}

impl Default for RaceConfig {
    fn default() -> Self {
        Self {
            seed: None,
            riders_per_team: 2,
            human_teams: 1,
            hand: HandComposition::default(),
            decks: DeckConfig::default(),
            weather: Weather::None,
            track: Track::the_peaks(),
        }
    }
}

impl RaceConfig {
    /// Standard race with a fixed seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Self::default()
        }
    }

    /// Set the race weather.
    #[must_use]
    pub fn with_weather(mut self, weather: Weather) -> Self {
        self.weather = weather;
        self
    }

    /// Set the track.
    #[must_use]
    pub fn with_track(mut self, track: Track) -> Self {
        self.track = track;
        self
    }

    /// Set riders per team.
    #[must_use]
    pub fn with_riders_per_team(mut self, riders: usize) -> Self {
        self.riders_per_team = riders;
        self
    }

    /// Set how many leading teams are human-controlled.
    #[must_use]
    pub fn with_human_teams(mut self, teams: usize) -> Self {
        self.human_teams = teams;
        self
    }

    /// Set the hand composition.
    #[must_use]
    pub fn with_hand(mut self, hand: HandComposition) -> Self {
        self.hand = hand;
        self
    }

    /// Set deck contents.
    #[must_use]
    pub fn with_decks(mut self, decks: DeckConfig) -> Self {
        self.decks = decks;
        self
    }
}
