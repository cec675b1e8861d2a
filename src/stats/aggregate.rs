use serde::Serialize;

use crate::models::GameRow;
use crate::stats::dates::parse_game_date;
use crate::stats::rates::{CountingInputs, RateStats};

/// Career sums of the counting stats. Missing cells count as zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub struct CountingTotals {
    pub pa: u64,
    pub ab: u64,
    pub h: u64,
    pub hr: u64,
    pub bb: u64,
    pub k: u64,
    pub hbp: u64,
    pub sf: u64,
    pub tb: u64,
    pub rbi: u64,
}

impl CountingTotals {
    fn add(&mut self, row: &GameRow) {
        let add = |total: &mut u64, value: Option<u32>| *total += u64::from(value.unwrap_or(0));
        add(&mut self.pa, row.pa);
        add(&mut self.ab, row.ab);
        add(&mut self.h, row.h);
        add(&mut self.hr, row.hr);
        add(&mut self.bb, row.bb);
        add(&mut self.k, row.k);
        add(&mut self.hbp, row.hbp);
        add(&mut self.sf, row.sf);
        add(&mut self.tb, row.tb);
        add(&mut self.rbi, row.rbi);
    }

    pub fn rate_inputs(&self) -> CountingInputs {
        CountingInputs {
            ab: Some(self.ab as f64),
            h: Some(self.h as f64),
            bb: Some(self.bb as f64),
            hbp: Some(self.hbp as f64),
            sf: Some(self.sf as f64),
            tb: Some(self.tb as f64),
        }
    }
}

/// One game from a player's log together with that game's own rate stats.
#[derive(Debug, Clone)]
pub struct GameLine<'a> {
    pub row: &'a GameRow,
    pub rates: RateStats,
}

/// Career line built from every game row of a single player.
#[derive(Debug, Clone)]
pub struct PlayerAggregate<'a> {
    pub games: usize,
    pub totals: CountingTotals,
    pub rates: RateStats,
    /// Ascending by game date. Rows whose date cannot be parsed come last.
    pub game_log: Vec<GameLine<'a>>,
}

/// Aggregates one player's game rows.
///
/// Returns `None` when there are no rows, so callers can tell an unknown
/// player apart from a player with an empty stat line.
pub fn aggregate<'a>(rows: &[&'a GameRow]) -> Option<PlayerAggregate<'a>> {
    if rows.is_empty() {
        return None;
    }

    let mut totals = CountingTotals::default();
    for row in rows {
        totals.add(row);
    }

    let mut game_log: Vec<GameLine<'a>> = rows
        .iter()
        .map(|&row| GameLine {
            row,
            rates: RateStats::resolve(&row.rate_inputs(), &row.precomputed_rates()),
        })
        .collect();
    // Stable sort keeps file order within a day and among unparseable dates.
    game_log.sort_by_key(|line| match parse_game_date(&line.row.date) {
        Some(date) => (false, Some(date)),
        None => (true, None),
    });

    Some(PlayerAggregate {
        games: rows.len(),
        rates: RateStats::from_counts(&totals.rate_inputs()),
        totals,
        game_log,
    })
}
