//! In-memory data store backed by three CSV files.
//!
//! Every table is loaded once at startup and never mutated afterwards. A file
//! that is missing or unreadable leaves its table empty; handlers treat an
//! empty table as "data not available".

use std::collections::{BTreeMap, HashSet};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use csv::StringRecord;
use tracing::{info, warn};

use crate::config::Config;
use crate::models::{
    COUNTING_COLUMNS, GameRow, LeagueAverage, PlayerListItem, PlayerSummary, RATE_COLUMNS,
    SummaryKey, TOTAL_PREFIX,
};

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to read file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("CSV error in {path}: {source}")]
    Csv { path: String, source: csv::Error },
}

/// Player summary rows plus the stat columns the file actually carried.
#[derive(Debug, Clone, Default)]
pub struct SummaryTable {
    pub rows: Vec<PlayerSummary>,
    /// Stat columns present in the header, in header order.
    pub columns: Vec<String>,
}

impl SummaryTable {
    pub fn has_column(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c == column)
    }

    pub fn total_columns(&self) -> impl Iterator<Item = &str> {
        self.columns
            .iter()
            .map(String::as_str)
            .filter(|c| c.starts_with(TOTAL_PREFIX))
    }
}

/// Read-only data context shared by every request.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub games: Vec<GameRow>,
    pub summary: SummaryTable,
    pub league_average: Option<LeagueAverage>,
}

impl Dataset {
    /// Loads all three tables, degrading each failed one to empty.
    pub fn load(config: &Config) -> Self {
        let games = load_or_empty(&config.game_log_path(), load_games_from_reader);
        let summary = load_or_empty(&config.player_summary_path(), load_summary_from_reader);
        let league_rows =
            load_or_empty(&config.league_average_path(), load_league_from_reader);

        let dataset = Self::from_tables(games, summary, league_rows);
        info!(
            games = dataset.games.len(),
            players = dataset.summary.rows.len(),
            league_average = dataset.league_average.is_some(),
            "Data loaded."
        );
        dataset
    }

    /// Builds a dataset from in-memory CSV sources.
    pub fn from_readers<G: Read, S: Read, L: Read>(
        games: G,
        summary: S,
        league: L,
    ) -> Result<Self, csv::Error> {
        Ok(Self::from_tables(
            load_games_from_reader(games)?,
            load_summary_from_reader(summary)?,
            load_league_from_reader(league)?,
        ))
    }

    fn from_tables(
        games: Vec<GameRow>,
        summary: SummaryTable,
        league_rows: Vec<LeagueAverage>,
    ) -> Self {
        if league_rows.len() > 1 {
            warn!(
                rows = league_rows.len(),
                "League average table has several rows; using the first"
            );
        }
        Dataset {
            games,
            summary,
            league_average: league_rows.into_iter().next(),
        }
    }

    /// Both the game log and the summary table are needed for player pages.
    pub fn is_available(&self) -> bool {
        !self.games.is_empty() && !self.summary.rows.is_empty()
    }

    /// Distinct players sorted by full name, then id. The first name seen
    /// for an id wins.
    pub fn players(&self) -> Vec<PlayerListItem> {
        let mut seen = HashSet::new();
        let mut players: Vec<PlayerListItem> = self
            .games
            .iter()
            .filter(|row| seen.insert(row.player_id))
            .map(|row| PlayerListItem {
                player_id: row.player_id,
                player_full_name: row.player_full_name.clone(),
            })
            .collect();
        players.sort_by(|a, b| {
            a.player_full_name
                .cmp(&b.player_full_name)
                .then(a.player_id.cmp(&b.player_id))
        });
        players
    }

    /// All game rows for a player, in file order.
    pub fn games_for(&self, player_id: i64) -> Vec<&GameRow> {
        self.games
            .iter()
            .filter(|row| row.player_id == player_id)
            .collect()
    }

    pub fn summary_for(&self, player_id: i64) -> Option<&PlayerSummary> {
        self.summary
            .rows
            .iter()
            .find(|row| row.player_id == player_id)
    }
}

fn load_or_empty<T: Default>(
    path: &Path,
    parse: impl FnOnce(File) -> Result<T, csv::Error>,
) -> T {
    match open_and_parse(path, parse) {
        Ok(table) => table,
        Err(e) => {
            warn!("{}; continuing with an empty table", e);
            T::default()
        }
    }
}

fn open_and_parse<T>(
    path: &Path,
    parse: impl FnOnce(File) -> Result<T, csv::Error>,
) -> Result<T, LoadError> {
    let display = path.display().to_string();
    let file = File::open(path).map_err(|source| LoadError::Io {
        path: display.clone(),
        source,
    })?;
    parse(file).map_err(|source| LoadError::Csv {
        path: display,
        source,
    })
}

pub fn load_games_from_reader<R: Read>(rdr: R) -> Result<Vec<GameRow>, csv::Error> {
    let mut reader = csv::Reader::from_reader(rdr);
    let mut games = Vec::new();
    for result in reader.deserialize::<GameRow>() {
        match result {
            Ok(row) => games.push(row),
            Err(e) => warn!("skipping malformed game row: {}", e),
        }
    }
    Ok(games)
}

/// Stat columns worth keeping from the summary header.
fn is_stat_column(column: &str) -> bool {
    column.starts_with(TOTAL_PREFIX)
        || COUNTING_COLUMNS.contains(&column)
        || RATE_COLUMNS.contains(&column)
}

pub fn load_summary_from_reader<R: Read>(rdr: R) -> Result<SummaryTable, csv::Error> {
    let mut reader = csv::Reader::from_reader(rdr);
    let headers = reader.headers()?.clone();
    let stat_columns: Vec<(usize, String)> = headers
        .iter()
        .enumerate()
        .filter(|(_, name)| is_stat_column(name))
        .map(|(i, name)| (i, name.to_string()))
        .collect();

    let mut rows = Vec::new();
    for result in reader.records() {
        let record: StringRecord = match result {
            Ok(record) => record,
            Err(e) => {
                warn!("skipping malformed summary row: {}", e);
                continue;
            }
        };
        let key: SummaryKey = match record.deserialize(Some(&headers)) {
            Ok(key) => key,
            Err(e) => {
                warn!("skipping malformed summary row: {}", e);
                continue;
            }
        };

        let mut values = BTreeMap::new();
        for (i, name) in &stat_columns {
            let parsed = record
                .get(*i)
                .and_then(|cell| cell.trim().parse::<f64>().ok())
                .filter(|v| v.is_finite());
            if let Some(v) = parsed {
                values.insert(name.clone(), v);
            }
        }

        rows.push(PlayerSummary {
            player_id: key.player_id,
            games_played: key.games_played,
            values,
        });
    }

    Ok(SummaryTable {
        rows,
        columns: stat_columns.into_iter().map(|(_, name)| name).collect(),
    })
}

pub fn load_league_from_reader<R: Read>(rdr: R) -> Result<Vec<LeagueAverage>, csv::Error> {
    let mut reader = csv::Reader::from_reader(rdr);
    let mut rows = Vec::new();
    for result in reader.deserialize::<LeagueAverage>() {
        match result {
            Ok(row) => rows.push(row),
            Err(e) => warn!("skipping malformed league average row: {}", e),
        }
    }
    Ok(rows)
}

/// Resolves a data file name against the data directory.
pub fn data_path(data_dir: &Path, file: &str) -> PathBuf {
    let file = Path::new(file);
    if file.is_absolute() {
        file.to_path_buf()
    } else {
        data_dir.join(file)
    }
}
