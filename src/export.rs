// Sale ledger export: the player source augmented with sale results,
// written back out as CSV in original player order.

use std::io::Write;
use std::path::Path;

use tracing::info;

use crate::players::PlayerRecord;

/// Ledger column order. The descriptive columns mirror the canonical input
/// shape; the last three carry the auction results.
pub const LEDGER_HEADERS: [&str; 8] = [
    "Name",
    "Age Group",
    "Primary Strength",
    "Weekend Availability",
    "CricHeroes Link",
    "Sold",
    "SoldTo",
    "FinalPrice",
];

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("failed to create export file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("CSV error writing {path}: {source}")]
    Csv { path: String, source: csv::Error },
}

/// Writer-based export (enables testing without temp files).
pub fn write_ledger<W: Write>(wtr: W, players: &[PlayerRecord]) -> Result<(), csv::Error> {
    let mut writer = csv::Writer::from_writer(wtr);
    writer.write_record(LEDGER_HEADERS)?;
    for player in players {
        writer.write_record([
            player.name.as_str(),
            player.age_group.as_str(),
            player.primary_strength.as_str(),
            player.availability.as_str(),
            player.profile_link.as_str(),
            if player.sold { "True" } else { "False" },
            player.sold_to.as_str(),
            &player.final_price.to_string(),
        ])?;
    }
    writer.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// Export the sale ledger to `path`, one row per player, header included.
pub fn export_ledger(path: impl AsRef<Path>, players: &[PlayerRecord]) -> Result<(), ExportError> {
    let path = path.as_ref();
    let file = std::fs::File::create(path).map_err(|e| ExportError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    write_ledger(file, players).map_err(|e| ExportError::Csv {
        path: path.display().to_string(),
        source: e,
    })?;
    info!("exported {} players to {}", players.len(), path.display());
    Ok(())
}
