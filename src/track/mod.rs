//! Track model: an ordered run of tiles ending at the finish.
//!
//! ## Usage
//!
//! ```
//! use peloton::track::{Terrain, Track};
//!
//! let track = Track::builder("Sprint")
//!     .section(Terrain::Start, 2)
//!     .section(Terrain::Normal, 5)
//!     .section(Terrain::Finish, 1)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(track.length(), 8);
//! assert_eq!(track.finish_index(), 7);
//! ```

pub mod tile;

pub use tile::{Terrain, Tile, Weather, DEFAULT_LANES};

use serde::{Deserialize, Serialize};

use crate::core::TrackError;

/// An ordered sequence of tiles. The last tile is the finish.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    pub name: String,
    tiles: Vec<Tile>,
}

impl Track {
    /// Build a track from tiles, checking that positions are contiguous
    /// from zero and every tile has at least one lane.
    pub fn new(name: impl Into<String>, tiles: Vec<Tile>) -> Result<Self, TrackError> {
        if tiles.is_empty() {
            return Err(TrackError::Empty);
        }
        for (index, tile) in tiles.iter().enumerate() {
            if tile.position != index {
                return Err(TrackError::MisnumberedTile {
                    index,
                    position: tile.position,
                });
            }
            if tile.lanes == 0 {
                return Err(TrackError::ZeroLanes(index));
            }
        }
        Ok(Self {
            name: name.into(),
            tiles,
        })
    }

    /// Start building a track section by section.
    pub fn builder(name: impl Into<String>) -> TrackBuilder {
        TrackBuilder {
            name: name.into(),
            tiles: Vec::new(),
        }
    }

    /// "The Peaks": 27 two-lane tiles.
    ///
    /// 3 start, 6 flat, 7 climbing, 5 descending, a 5-tile run-in with
    /// cobbles on the third and fourth tiles, then the finish.
    #[must_use]
    pub fn the_peaks() -> Self {
        // Sections only append numbered tiles with two lanes, so the
        // result needs no validation.
        let TrackBuilder { name, tiles } = Self::builder("The Peaks")
            .section(Terrain::Start, 3)
            .section(Terrain::Normal, 6)
            .section(Terrain::Mountain, 7)
            .section(Terrain::Downhill, 5)
            .section(Terrain::Normal, 2)
            .section(Terrain::Cobblestone, 2)
            .section(Terrain::Normal, 1)
            .section(Terrain::Finish, 1);
        Self { name, tiles }
    }

    /// Number of tiles.
    #[must_use]
    pub fn length(&self) -> usize {
        self.tiles.len()
    }

    /// Index of the finish tile.
    #[must_use]
    pub fn finish_index(&self) -> usize {
        self.tiles.len() - 1
    }

    /// All tiles in order.
    #[must_use]
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Tile at a position, if on the track.
    #[must_use]
    pub fn tile(&self, position: usize) -> Option<&Tile> {
        self.tiles.get(position)
    }

    /// Lane capacity at a position. Off-track positions have none.
    #[must_use]
    pub fn lanes_at(&self, position: usize) -> u8 {
        self.tile(position).map_or(0, |t| t.lanes)
    }

    /// Clamp a position to the finish.
    #[must_use]
    pub fn clamp(&self, position: usize) -> usize {
        position.min(self.finish_index())
    }
}

impl Default for Track {
    fn default() -> Self {
        Self::the_peaks()
    }
}

/// Builder appending runs of same-terrain tiles.
#[derive(Clone, Debug)]
pub struct TrackBuilder {
    name: String,
    tiles: Vec<Tile>,
}

impl TrackBuilder {
    /// Append `count` two-lane tiles of one terrain.
    #[must_use]
    pub fn section(self, terrain: Terrain, count: usize) -> Self {
        self.section_with_lanes(terrain, count, DEFAULT_LANES)
    }

    /// Append `count` tiles of one terrain with a given lane count.
    #[must_use]
    pub fn section_with_lanes(self, terrain: Terrain, count: usize, lanes: u8) -> Self {
        (0..count).fold(self, |builder, _| {
            builder.tile(Tile::new(0, terrain).with_lanes(lanes))
        })
    }

    /// Append one pre-built tile, renumbered to the next position.
    #[must_use]
    pub fn tile(mut self, mut tile: Tile) -> Self {
        tile.position = self.tiles.len();
        self.tiles.push(tile);
        self
    }

    /// Validate and finish.
    pub fn build(self) -> Result<Track, TrackError> {
        Track::new(self.name, self.tiles)
    }
}
