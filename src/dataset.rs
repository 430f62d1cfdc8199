//! Player dataset: loading, canonicalization and team-scoped subsets.
//!
//! The CSV source is read exactly once per process. Headers are renamed
//! through a fixed translation table and position short codes are mapped to
//! their canonical labels, so downstream code only ever sees canonical
//! fields. The resulting [`Dataset`] is immutable; every derived view is a
//! fresh collection.

use std::collections::HashMap;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{AnalysisError, AnalysisResult};

/// Environment variable overriding the data file location.
pub const DATA_PATH_ENV: &str = "NBA_DATA_PATH";
/// Data file read when no override is set.
pub const DEFAULT_DATA_PATH: &str = "nba_dados_limpos.csv";

/// Source header -> canonical column name.
const COLUMN_RENAMES: &[(&str, &str)] = &[
    ("Player", "player"),
    ("Posicao", "position"),
    ("Time", "team"),
    ("Jogos", "games"),
    ("MP", "minutes_per_game"),
    ("Pontos", "points_per_game"),
    ("TRB", "rebounds_per_game"),
    ("AST", "assists_per_game"),
    ("STL", "steals_per_game"),
    ("BLK", "blocks_per_game"),
    ("FGA", "field_goal_attempts"),
    ("eFG%", "effective_fg_pct"),
];

/// Position short code -> canonical variant.
const POSITION_CODES: &[(&str, Position)] = &[
    ("C", Position::Center),
    ("PF", Position::PowerForward),
    ("SF", Position::Forward),
    ("SG", Position::ShootingGuard),
    ("PG", Position::PointGuard),
];

/// Canonical player positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Position {
    Center,
    PowerForward,
    Forward,
    ShootingGuard,
    PointGuard,
}

impl Position {
    pub const ALL: [Position; 5] = [
        Position::Center,
        Position::PowerForward,
        Position::Forward,
        Position::ShootingGuard,
        Position::PointGuard,
    ];

    /// Translate a source short code (`C`, `PF`, `SF`, `SG`, `PG`).
    pub fn from_code(code: &str) -> Option<Self> {
        let code = code.trim();
        POSITION_CODES
            .iter()
            .find(|(short, _)| *short == code)
            .map(|(_, position)| *position)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Position::Center => "Center",
            Position::PowerForward => "Power Forward",
            Position::Forward => "Forward",
            Position::ShootingGuard => "Shooting Guard",
            Position::PointGuard => "Point Guard",
        }
    }
}

/// One player's season line. All numeric fields are finite after a
/// successful load; the loader rejects anything else.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub name: String,
    pub position: Position,
    pub team: String,
    pub games: u32,
    pub minutes: f64,
    pub points: f64,
    pub rebounds: f64,
    pub assists: f64,
    pub steals: f64,
    pub blocks: f64,
    pub attempts: f64,
    pub efg: f64,
}

/// A numeric per-player statistic, addressable by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Statistic {
    Games,
    Minutes,
    Points,
    Rebounds,
    Assists,
    Steals,
    Blocks,
    Attempts,
    EffectiveFgPct,
}

impl Statistic {
    pub fn value(&self, record: &PlayerRecord) -> f64 {
        match self {
            Statistic::Games => record.games as f64,
            Statistic::Minutes => record.minutes,
            Statistic::Points => record.points,
            Statistic::Rebounds => record.rebounds,
            Statistic::Assists => record.assists,
            Statistic::Steals => record.steals,
            Statistic::Blocks => record.blocks,
            Statistic::Attempts => record.attempts,
            Statistic::EffectiveFgPct => record.efg,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Statistic::Games => "Games Played",
            Statistic::Minutes => "Minutes Per Game",
            Statistic::Points => "Points Per Game",
            Statistic::Rebounds => "Rebounds Per Game",
            Statistic::Assists => "Assists Per Game",
            Statistic::Steals => "Steals Per Game",
            Statistic::Blocks => "Blocks Per Game",
            Statistic::Attempts => "Field Goal Attempts",
            Statistic::EffectiveFgPct => "Effective FG%",
        }
    }

    /// Parse a selector key as passed on the command line.
    pub fn from_key(key: &str) -> Option<Self> {
        match key.trim().to_ascii_lowercase().as_str() {
            "games" => Some(Statistic::Games),
            "minutes" => Some(Statistic::Minutes),
            "points" => Some(Statistic::Points),
            "rebounds" => Some(Statistic::Rebounds),
            "assists" => Some(Statistic::Assists),
            "steals" => Some(Statistic::Steals),
            "blocks" => Some(Statistic::Blocks),
            "attempts" => Some(Statistic::Attempts),
            "efg" => Some(Statistic::EffectiveFgPct),
            _ => None,
        }
    }
}

/// Immutable snapshot of every player record, in source order.
#[derive(Debug, Clone)]
pub struct Dataset {
    players: Vec<PlayerRecord>,
}

impl Dataset {
    pub fn new(players: Vec<PlayerRecord>) -> Self {
        Self { players }
    }

    /// Read and canonicalize the CSV at `path`.
    pub fn load(path: &Path) -> AnalysisResult<Self> {
        let file = File::open(path).map_err(|source| AnalysisError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let dataset = Self::from_reader(file)?;
        info!(
            path = %path.display(),
            players = dataset.players.len(),
            "loaded player dataset"
        );
        Ok(dataset)
    }

    /// Parse CSV content from any reader. Header row required.
    pub fn from_reader(reader: impl io::Read) -> AnalysisResult<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let columns = ColumnIndex::from_headers(csv_reader.headers()?)?;

        let mut players = Vec::new();
        for (idx, row) in csv_reader.records().enumerate() {
            // Row numbers are 1-based and count data rows only.
            players.push(parse_record(&columns, idx + 1, &row?)?);
        }
        Ok(Self { players })
    }

    pub fn players(&self) -> &[PlayerRecord] {
        &self.players
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Sorted distinct team names, for selector population.
    pub fn teams(&self) -> Vec<String> {
        let mut teams: Vec<String> = self.players.iter().map(|p| p.team.clone()).collect();
        teams.sort();
        teams.dedup();
        teams
    }

    /// Records for one team, or the full store when `team` is `None`.
    /// An unknown team yields an empty vec, not an error; selectable teams
    /// come from the store itself.
    pub fn filter_by_team(&self, team: Option<&str>) -> Vec<PlayerRecord> {
        match team {
            None => self.players.clone(),
            Some(team) => self
                .players
                .iter()
                .filter(|p| p.team == team)
                .cloned()
                .collect(),
        }
    }

    /// First record named `name`, in source order.
    pub fn find_player(&self, name: &str) -> AnalysisResult<&PlayerRecord> {
        self.players
            .iter()
            .find(|p| p.name == name)
            .ok_or_else(|| AnalysisError::PlayerNotFound(name.to_string()))
    }
}

/// Sorted distinct player names within a subset, for selector population.
pub fn player_names(records: &[PlayerRecord]) -> Vec<String> {
    let mut names: Vec<String> = records.iter().map(|p| p.name.clone()).collect();
    names.sort();
    names.dedup();
    names
}

static DATASET: OnceCell<Dataset> = OnceCell::new();

/// Process-wide snapshot: loaded on first access, cached for the process's
/// lifetime. The `OnceCell` guard guarantees a single initialization even
/// under concurrent first access; a failed load is not cached, so startup
/// errors stay visible to every caller.
pub fn dataset() -> AnalysisResult<&'static Dataset> {
    DATASET.get_or_try_init(|| Dataset::load(&default_data_path()))
}

/// Data file location: `NBA_DATA_PATH` when set, the bundled default name
/// otherwise.
pub fn default_data_path() -> PathBuf {
    std::env::var(DATA_PATH_ENV)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_PATH))
}

struct ColumnIndex {
    player: usize,
    position: usize,
    team: usize,
    games: usize,
    minutes: usize,
    points: usize,
    rebounds: usize,
    assists: usize,
    steals: usize,
    blocks: usize,
    attempts: usize,
    efg: usize,
}

impl ColumnIndex {
    fn from_headers(headers: &csv::StringRecord) -> AnalysisResult<Self> {
        let mut by_name: HashMap<&'static str, usize> = HashMap::new();
        for (idx, raw) in headers.iter().enumerate() {
            if let Some(canonical) = canonical_header(raw) {
                by_name.entry(canonical).or_insert(idx);
            }
        }
        let lookup = |name: &'static str| {
            by_name
                .get(name)
                .copied()
                .ok_or(AnalysisError::MissingColumn(name))
        };
        Ok(Self {
            player: lookup("player")?,
            position: lookup("position")?,
            team: lookup("team")?,
            games: lookup("games")?,
            minutes: lookup("minutes_per_game")?,
            points: lookup("points_per_game")?,
            rebounds: lookup("rebounds_per_game")?,
            assists: lookup("assists_per_game")?,
            steals: lookup("steals_per_game")?,
            blocks: lookup("blocks_per_game")?,
            attempts: lookup("field_goal_attempts")?,
            efg: lookup("effective_fg_pct")?,
        })
    }
}

fn canonical_header(raw: &str) -> Option<&'static str> {
    let raw = raw.trim();
    COLUMN_RENAMES
        .iter()
        .find(|(source, _)| *source == raw)
        .map(|(_, canonical)| *canonical)
}

fn parse_record(
    columns: &ColumnIndex,
    row: usize,
    record: &csv::StringRecord,
) -> AnalysisResult<PlayerRecord> {
    let field = |idx: usize| record.get(idx).unwrap_or("").trim();

    let name = field(columns.player);
    if name.is_empty() {
        return Err(invalid(row, "player", name));
    }
    let team = field(columns.team);
    if team.is_empty() {
        return Err(invalid(row, "team", team));
    }
    let position_code = field(columns.position);
    let position =
        Position::from_code(position_code).ok_or_else(|| invalid(row, "position", position_code))?;

    Ok(PlayerRecord {
        name: name.to_string(),
        position,
        team: team.to_string(),
        games: parse_u32(row, "games", field(columns.games))?,
        minutes: parse_f64(row, "minutes_per_game", field(columns.minutes))?,
        points: parse_f64(row, "points_per_game", field(columns.points))?,
        rebounds: parse_f64(row, "rebounds_per_game", field(columns.rebounds))?,
        assists: parse_f64(row, "assists_per_game", field(columns.assists))?,
        steals: parse_f64(row, "steals_per_game", field(columns.steals))?,
        blocks: parse_f64(row, "blocks_per_game", field(columns.blocks))?,
        attempts: parse_f64(row, "field_goal_attempts", field(columns.attempts))?,
        efg: parse_f64(row, "effective_fg_pct", field(columns.efg))?,
    })
}

fn parse_f64(row: usize, column: &'static str, raw: &str) -> AnalysisResult<f64> {
    let value: f64 = raw.parse().map_err(|_| invalid(row, column, raw))?;
    // "NaN" and "inf" parse as floats; the finite-fields invariant rejects them.
    if !value.is_finite() {
        return Err(invalid(row, column, raw));
    }
    Ok(value)
}

fn parse_u32(row: usize, column: &'static str, raw: &str) -> AnalysisResult<u32> {
    raw.parse().map_err(|_| invalid(row, column, raw))
}

fn invalid(row: usize, column: &'static str, raw: &str) -> AnalysisError {
    AnalysisError::InvalidField {
        row,
        column,
        value: raw.to_string(),
    }
}
