//! Movement calculus: how far a card carries a rider.

use crate::cards::Card;
use crate::track::{Terrain, Tile, Weather};

/// Distance a card moves a rider starting on `tile`.
///
/// Terrain applies first, then weather. The tile's own weather overrides
/// `race_weather` when set. Never less than 1.
///
/// ```
/// use peloton::cards::{Card, CardFamily};
/// use peloton::core::CardId;
/// use peloton::rules::movement;
/// use peloton::track::{Terrain, Tile, Weather};
///
/// let card = Card::new(CardId(0), CardFamily::Rouleur, 6);
/// let climb = Tile::new(9, Terrain::Mountain);
/// assert_eq!(movement(&card, &climb, Weather::Headwind), 3);
/// ```
#[must_use]
pub fn movement(card: &Card, tile: &Tile, race_weather: Weather) -> u32 {
    let value = u32::from(card.value);

    let after_terrain = match tile.terrain {
        Terrain::Mountain if value >= 5 => value - 2,
        Terrain::Mountain => value,
        Terrain::Downhill => value + 1,
        Terrain::Cobblestone => value.saturating_sub(1),
        Terrain::Start | Terrain::Normal | Terrain::Finish => value,
    }
    .max(1);

    let after_weather = match tile.effective_weather(race_weather) {
        Weather::Headwind => after_terrain.saturating_sub(1),
        Weather::Tailwind => after_terrain + 1,
        Weather::Crosswind | Weather::None => after_terrain,
    };

    after_weather.max(1)
}
