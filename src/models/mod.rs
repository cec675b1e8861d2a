use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

use crate::stats::{CountingInputs, CountingTotals, RateStats};

/// Counting-stat columns, in display order.
pub const COUNTING_COLUMNS: [&str; 10] = ["PA", "AB", "H", "HR", "BB", "K", "HBP", "SF", "TB", "RBI"];

/// Rate-stat columns, in display order.
pub const RATE_COLUMNS: [&str; 4] = ["AVG", "OBP", "SLG", "OPS"];

/// Prefix of the career-total columns in the player summary file.
pub const TOTAL_PREFIX: &str = "total_";

/// Accepts `3`, `3.0` or an empty cell. Negative or non-finite values are dropped.
fn de_count<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u32>, D::Error> {
    let value = Option::<f64>::deserialize(deserializer)?;
    Ok(value
        .filter(|v| v.is_finite() && *v >= 0.0)
        .map(|v| v.round() as u32))
}

fn de_rate<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    let value = Option::<f64>::deserialize(deserializer)?;
    Ok(value.filter(|v| v.is_finite()))
}

fn de_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty()))
}

/// One player's single-game line from the full game log.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GameRow {
    #[serde(rename = "playerId")]
    pub player_id: i64,
    #[serde(rename = "playerFullName")]
    pub player_full_name: String,
    #[serde(default)]
    pub date: String,

    #[serde(rename = "PA", default, deserialize_with = "de_count")]
    pub pa: Option<u32>,
    #[serde(rename = "AB", default, deserialize_with = "de_count")]
    pub ab: Option<u32>,
    #[serde(rename = "H", default, deserialize_with = "de_count")]
    pub h: Option<u32>,
    #[serde(rename = "HR", default, deserialize_with = "de_count")]
    pub hr: Option<u32>,
    #[serde(rename = "BB", default, deserialize_with = "de_count")]
    pub bb: Option<u32>,
    #[serde(rename = "K", default, deserialize_with = "de_count")]
    pub k: Option<u32>,
    #[serde(rename = "HBP", default, deserialize_with = "de_count")]
    pub hbp: Option<u32>,
    #[serde(rename = "SF", default, deserialize_with = "de_count")]
    pub sf: Option<u32>,
    #[serde(rename = "TB", default, deserialize_with = "de_count")]
    pub tb: Option<u32>,
    #[serde(rename = "RBI", default, deserialize_with = "de_count")]
    pub rbi: Option<u32>,

    #[serde(default, deserialize_with = "de_text")]
    pub pos: Option<String>,
    #[serde(rename = "currentTeamName", default, deserialize_with = "de_text")]
    pub current_team_name: Option<String>,
    #[serde(rename = "batsHand", default, deserialize_with = "de_text")]
    pub bats_hand: Option<String>,
    #[serde(rename = "throwsHand", default, deserialize_with = "de_text")]
    pub throws_hand: Option<String>,
    #[serde(rename = "playerImage", default, deserialize_with = "de_text")]
    pub player_image: Option<String>,
    #[serde(rename = "teamImage", default, deserialize_with = "de_text")]
    pub team_image: Option<String>,
    #[serde(rename = "oppImage", default, deserialize_with = "de_text")]
    pub opp_image: Option<String>,

    #[serde(rename = "AVG", default, deserialize_with = "de_rate")]
    pub avg: Option<f64>,
    #[serde(rename = "OBP", default, deserialize_with = "de_rate")]
    pub obp: Option<f64>,
    #[serde(rename = "SLG", default, deserialize_with = "de_rate")]
    pub slg: Option<f64>,
    #[serde(rename = "OPS", default, deserialize_with = "de_rate")]
    pub ops: Option<f64>,
}

impl GameRow {
    pub fn counting(&self, column: &str) -> Option<u32> {
        match column {
            "PA" => self.pa,
            "AB" => self.ab,
            "H" => self.h,
            "HR" => self.hr,
            "BB" => self.bb,
            "K" => self.k,
            "HBP" => self.hbp,
            "SF" => self.sf,
            "TB" => self.tb,
            "RBI" => self.rbi,
            _ => None,
        }
    }

    pub fn rate_inputs(&self) -> CountingInputs {
        let f = |v: Option<u32>| v.map(f64::from);
        CountingInputs {
            ab: f(self.ab),
            h: f(self.h),
            bb: f(self.bb),
            hbp: f(self.hbp),
            sf: f(self.sf),
            tb: f(self.tb),
        }
    }

    pub fn precomputed_rates(&self) -> RateStats {
        RateStats {
            avg: self.avg,
            obp: self.obp,
            slg: self.slg,
            ops: self.ops,
        }
    }
}

/// One row of the per-player summary table.
///
/// `values` holds every numeric stat column that had a finite value for this
/// player, keyed by the column name as it appears in the file (`HR`,
/// `total_HR`, `OPS`, ...). A column missing from the map is undefined.
#[derive(Debug, Clone, Default)]
pub struct PlayerSummary {
    pub player_id: i64,
    pub games_played: Option<u32>,
    pub values: BTreeMap<String, f64>,
}

impl PlayerSummary {
    pub fn value(&self, column: &str) -> Option<f64> {
        self.values.get(column).copied()
    }
}

/// Key columns of a summary row; the stat columns are read by header.
#[derive(Debug, Deserialize)]
pub struct SummaryKey {
    #[serde(rename = "playerId")]
    pub player_id: i64,
    #[serde(default, deserialize_with = "de_count")]
    pub games_played: Option<u32>,
}

/// Population-average rate stats.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LeagueAverage {
    #[serde(rename = "AVG", default, deserialize_with = "de_rate")]
    pub avg: Option<f64>,
    #[serde(rename = "OBP", default, deserialize_with = "de_rate")]
    pub obp: Option<f64>,
    #[serde(rename = "SLG", default, deserialize_with = "de_rate")]
    pub slg: Option<f64>,
    #[serde(rename = "OPS", default, deserialize_with = "de_rate")]
    pub ops: Option<f64>,
}

// Response types

/// Entry of the player list endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerListItem {
    pub player_id: i64,
    pub player_full_name: String,
}

/// A stat value paired with the player's league rank for it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Ranked<T> {
    pub stat: String,
    pub value: Option<T>,
    pub rank: Option<u32>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlayerIdentity {
    pub id: i64,
    pub name: String,
    pub position: Option<String>,
    pub team: Option<String>,
    pub bats: Option<String>,
    pub throws: Option<String>,
    pub image: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CareerLine {
    pub games: usize,
    pub totals: CountingTotals,
    pub rates: RateStats,
}

#[derive(Debug, Clone, Serialize)]
pub struct GameLogEntry {
    pub date: String,
    pub opp_image: Option<String>,
    pub counting: BTreeMap<String, Option<u32>>,
    pub rates: RateStats,
}

/// Everything the player page shows.
#[derive(Debug, Clone, Serialize)]
pub struct PlayerDetail {
    pub player: PlayerIdentity,
    pub games_played: u32,
    pub team_images: Vec<String>,
    pub totals: Vec<Ranked<u64>>,
    pub per_game: Vec<Ranked<f64>>,
    pub rate_stats: Vec<Ranked<f64>>,
    pub career: CareerLine,
    pub game_log: Vec<GameLogEntry>,
}

/// Per-game rate-stat sequences for charts.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub struct RateSeries {
    pub avg: Vec<Option<f64>>,
    pub obp: Vec<Option<f64>>,
    pub slg: Vec<Option<f64>>,
    pub ops: Vec<Option<f64>>,
}

/// Per-game counting-stat sequences for charts.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub struct CountingSeries {
    pub pa: Vec<Option<u32>>,
    pub ab: Vec<Option<u32>>,
    pub h: Vec<Option<u32>>,
    pub hr: Vec<Option<u32>>,
    pub bb: Vec<Option<u32>>,
    pub k: Vec<Option<u32>>,
    pub hbp: Vec<Option<u32>>,
    pub sf: Vec<Option<u32>>,
    pub tb: Vec<Option<u32>>,
    pub rbi: Vec<Option<u32>>,
}

impl CountingSeries {
    pub fn push(&mut self, row: &GameRow) {
        self.pa.push(row.pa);
        self.ab.push(row.ab);
        self.h.push(row.h);
        self.hr.push(row.hr);
        self.bb.push(row.bb);
        self.k.push(row.k);
        self.hbp.push(row.hbp);
        self.sf.push(row.sf);
        self.tb.push(row.tb);
        self.rbi.push(row.rbi);
    }
}

/// Response for the game stats chart endpoint
#[derive(Debug, Clone, Serialize)]
pub struct GameStatsResponse {
    pub dates: Vec<String>,
    #[serde(rename = "oppImages")]
    pub opp_images: Vec<Option<String>>,
    pub rate_stats: RateSeries,
    pub counting_stats: CountingSeries,
    pub league_averages: Option<LeagueAverage>,
}
