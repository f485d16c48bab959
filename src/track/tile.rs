//! Track tiles: terrain, lane capacity, and weather.

use serde::{Deserialize, Serialize};

/// Terrain of a tile. Affects movement that starts on it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Terrain {
    Start,
    #[default]
    Normal,
    Cobblestone,
    Mountain,
    Downhill,
    Finish,
}

/// Wind conditions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Weather {
    #[default]
    None,
    Headwind,
    Tailwind,
    /// No effect on movement.
    Crosswind,
}

/// Default lanes per tile.
pub const DEFAULT_LANES: u8 = 2;

/// A single square of the track.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    /// Index of this tile along the track.
    pub position: usize,
    pub terrain: Terrain,
    /// Maximum riders side by side.
    pub lanes: u8,
    /// Local weather. Overrides the race weather when set.
    #[serde(default)]
    pub weather: Option<Weather>,
}

impl Tile {
    /// Create a tile with the default lane count and no local weather.
    #[must_use]
    pub fn new(position: usize, terrain: Terrain) -> Self {
        Self {
            position,
            terrain,
            lanes: DEFAULT_LANES,
            weather: None,
        }
    }

    /// Set the lane count.
    #[must_use]
    pub fn with_lanes(mut self, lanes: u8) -> Self {
        self.lanes = lanes;
        self
    }

    /// Set local weather.
    #[must_use]
    pub fn with_weather(mut self, weather: Weather) -> Self {
        self.weather = Some(weather);
        self
    }

    /// Weather a rider starting on this tile experiences.
    #[must_use]
    pub fn effective_weather(&self, race_weather: Weather) -> Weather {
        self.weather.unwrap_or(race_weather)
    }
}
