// Player source loading and normalization.
//
// Reads the registration-form CSV export. Column headers vary between
// exports (e.g. "Primary Strength" vs "Primary strength"), so every logical
// field is normalized once at load time; the auction engine only ever sees
// the canonical record shape.

use serde::Deserialize;
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;
use tracing::warn;

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

/// A single player in the auction queue.
///
/// The descriptive fields are opaque display metadata from the registration
/// form; the engine never modifies them. The sale fields are written by the
/// engine exactly once per auction pass (sell or skip) and cleared by a
/// full reset.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerRecord {
    pub name: String,
    pub age_group: String,
    pub primary_strength: String,
    pub availability: String,
    pub profile_link: String,
    pub sold: bool,
    pub sold_to: String,
    pub final_price: u32,
}

impl PlayerRecord {
    /// Overwrite the sale fields back to the unsold state.
    pub fn clear_sale(&mut self) {
        self.sold = false;
        self.sold_to.clear();
        self.final_price = 0;
    }

    /// Record a completed sale.
    pub fn mark_sold(&mut self, team: &str, price: u32) {
        self.sold = true;
        self.sold_to = team.to_string();
        self.final_price = price;
    }
}

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum PlayerSourceError {
    #[error("failed to read player file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("CSV error in {path}: {source}")]
    Csv { path: String, source: csv::Error },
}

// ---------------------------------------------------------------------------
// Raw CSV serde struct (private)
// ---------------------------------------------------------------------------

/// Raw registration row. Serde aliases cover the header variants seen in
/// real form exports. Extra columns (including any Sold/SoldTo/FinalPrice
/// left over from a previous session) are absorbed via `#[serde(flatten)]`
/// and discarded; sale fields always start unsold.
#[derive(Debug, Deserialize)]
#[allow(dead_code)]
struct RawPlayerRow {
    #[serde(rename = "Name", default)]
    name: String,

    #[serde(rename = "Age Group", default)]
    age_group: String,

    #[serde(
        rename = "Primary Strength",
        alias = "Primary strength",
        default
    )]
    primary_strength: String,

    #[serde(
        rename = "Weekend Availability",
        alias = "Are you avaialble to participate on weekends between Nov 1 and Dec 20",
        default
    )]
    availability: String,

    #[serde(
        rename = "CricHeroes Link",
        alias = "link of the cric heroes profile",
        default
    )]
    profile_link: String,

    /// Absorb any extra columns the form export includes.
    #[serde(flatten)]
    _extra: HashMap<String, serde_json::Value>,
}

// ---------------------------------------------------------------------------
// Loaders
// ---------------------------------------------------------------------------

/// Reader-based loader (enables testing without temp files).
pub fn load_players_from_reader<R: Read>(rdr: R) -> Result<Vec<PlayerRecord>, csv::Error> {
    let mut reader = csv::Reader::from_reader(rdr);
    let mut players = Vec::new();
    for result in reader.deserialize::<RawPlayerRow>() {
        match result {
            Ok(raw) => {
                let name = raw.name.trim().to_string();
                if name.is_empty() {
                    warn!("skipping player row with empty Name");
                    continue;
                }
                players.push(PlayerRecord {
                    name,
                    age_group: raw.age_group.trim().to_string(),
                    primary_strength: raw.primary_strength.trim().to_string(),
                    availability: raw.availability.trim().to_string(),
                    profile_link: raw.profile_link.trim().to_string(),
                    sold: false,
                    sold_to: String::new(),
                    final_price: 0,
                });
            }
            Err(e) => {
                warn!("skipping malformed player row: {}", e);
            }
        }
    }
    Ok(players)
}

/// Load the player queue from a CSV file. Row order is preserved; it is the
/// auction order and the identity of each player for the session.
pub fn load_players(path: impl AsRef<Path>) -> Result<Vec<PlayerRecord>, PlayerSourceError> {
    let path = path.as_ref();
    let file = std::fs::File::open(path).map_err(|e| PlayerSourceError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    load_players_from_reader(file).map_err(|e| PlayerSourceError::Csv {
        path: path.display().to_string(),
        source: e,
    })
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
