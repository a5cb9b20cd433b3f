// Configuration loading and parsing (config/tournament.toml).

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },

    #[error("failed to initialize config from defaults: {message}")]
    DefaultsCopyError { message: String },
}

// ---------------------------------------------------------------------------
// tournament.toml structs
// ---------------------------------------------------------------------------

/// Raw deserialization target for the entire tournament.toml file.
#[derive(Debug, Clone, Deserialize)]
struct TournamentFile {
    tournament: TournamentSection,
    auction: AuctionConfig,
    teams: TeamsSection,
    data: DataPaths,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TournamentSection {
    pub name: String,
    pub currency_symbol: String,
}

/// Operator-set auction parameters. Consumed by every bid/sale validation
/// in the engine.
#[derive(Debug, Clone, Deserialize)]
pub struct AuctionConfig {
    /// Amount each accepted bid rises by.
    pub bid_increment: u32,
    /// Roster cap per team. Displayed as slots-left; not a bidding
    /// precondition (a team at max can still out-bid and win).
    pub max_players_per_team: u32,
    /// Budget every team starts with.
    pub starting_budget: u32,
    /// Countdown duration in seconds for the advisory timer.
    pub timer_seconds: u32,
}

/// The `[teams]` table: team names as operator-edited free text,
/// one per line.
#[derive(Debug, Clone, Deserialize)]
struct TeamsSection {
    list: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DataPaths {
    /// Player source CSV, relative to the working directory.
    pub players: String,
    /// Where the sale ledger export is written.
    pub results: String,
}

// ---------------------------------------------------------------------------
// Top-level assembled Config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct Config {
    pub tournament: TournamentSection,
    pub auction: AuctionConfig,
    /// Active team names, deduplicated preserving first occurrence.
    pub teams: Vec<String>,
    pub data: DataPaths,
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Load and validate configuration from `config/tournament.toml` relative
/// to the given `base_dir`.
///
/// This is the lower-level loading primitive that does not auto-copy
/// defaults. Prefer `load_config()` which handles default initialization
/// automatically.
pub(crate) fn load_config_from(base_dir: &Path) -> Result<Config, ConfigError> {
    let path = base_dir.join("config").join("tournament.toml");
    let text = read_file(&path)?;
    let file: TournamentFile = toml::from_str(&text).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        source: e,
    })?;

    let config = Config {
        tournament: file.tournament,
        auction: file.auction,
        teams: crate::roster::parse_team_names(&file.teams.list),
        data: file.data,
    };

    validate(&config)?;

    Ok(config)
}

/// Ensure `config/tournament.toml` exists by copying it from `defaults/`
/// when missing. Returns the list of files that were copied.
pub fn ensure_config_files(base_dir: &Path) -> Result<Vec<PathBuf>, ConfigError> {
    let defaults_dir = base_dir.join("defaults");
    let config_dir = base_dir.join("config");

    if !defaults_dir.exists() {
        if !config_dir.exists() {
            return Err(ConfigError::DefaultsCopyError {
                message: format!(
                    "neither defaults/ nor config/ directory found in {}; \
                     run from the project root or ensure defaults/ is present",
                    base_dir.display()
                ),
            });
        }
        return Ok(vec![]);
    }

    std::fs::create_dir_all(&config_dir).map_err(|e| ConfigError::DefaultsCopyError {
        message: format!("failed to create config directory: {e}"),
    })?;

    let mut copied = Vec::new();

    let entries = std::fs::read_dir(&defaults_dir).map_err(|e| ConfigError::DefaultsCopyError {
        message: format!("failed to read defaults directory: {e}"),
    })?;

    for entry in entries {
        let entry = entry.map_err(|e| ConfigError::DefaultsCopyError {
            message: format!("failed to read defaults entry: {e}"),
        })?;
        let path = entry.path();

        if !path.is_file() {
            continue;
        }
        let Some(file_name) = path.file_name() else {
            continue;
        };
        let target = config_dir.join(file_name);

        match std::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&target)
        {
            Ok(mut dest) => {
                let content = std::fs::read(&path).map_err(|e| ConfigError::DefaultsCopyError {
                    message: format!("failed to read {}: {e}", path.display()),
                })?;
                std::io::Write::write_all(&mut dest, &content).map_err(|e| {
                    ConfigError::DefaultsCopyError {
                        message: format!("failed to write {}: {e}", target.display()),
                    }
                })?;
                copied.push(target);
            }
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
                // File already exists in config/, skip it
            }
            Err(e) => {
                return Err(ConfigError::DefaultsCopyError {
                    message: format!("failed to create {}: {e}", target.display()),
                });
            }
        }
    }

    Ok(copied)
}

/// Convenience wrapper: loads config relative to the current working
/// directory. Ensures default config files are copied before loading.
pub fn load_config() -> Result<Config, ConfigError> {
    let cwd = std::env::current_dir().map_err(|_| ConfigError::FileNotFound {
        path: PathBuf::from("."),
    })?;
    ensure_config_files(&cwd)?;
    load_config_from(&cwd)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn read_file(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
        path: path.to_path_buf(),
    })
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate(config: &Config) -> Result<(), ConfigError> {
    if config.auction.bid_increment == 0 {
        return Err(ConfigError::ValidationError {
            field: "auction.bid_increment".into(),
            message: "must be at least 1".into(),
        });
    }

    if config.auction.max_players_per_team == 0 {
        return Err(ConfigError::ValidationError {
            field: "auction.max_players_per_team".into(),
            message: "must be at least 1".into(),
        });
    }

    if config.auction.starting_budget < 100 {
        return Err(ConfigError::ValidationError {
            field: "auction.starting_budget".into(),
            message: format!(
                "must be at least 100, got {}",
                config.auction.starting_budget
            ),
        });
    }

    if config.auction.timer_seconds == 0 {
        return Err(ConfigError::ValidationError {
            field: "auction.timer_seconds".into(),
            message: "must be at least 1".into(),
        });
    }

    if config.teams.is_empty() {
        return Err(ConfigError::ValidationError {
            field: "teams.list".into(),
            message: "at least one team name is required".into(),
        });
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
