use crate::models::PlayerSummary;

/// Stats where a smaller number is the better result.
pub const LOWER_IS_BETTER: [&str; 2] = ["K", "HBP"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    HigherIsBetter,
    LowerIsBetter,
}

impl Direction {
    /// Direction for a summary column. `total_K` ranks like `K`.
    pub fn for_column(column: &str) -> Self {
        let base = column.strip_prefix("total_").unwrap_or(column);
        if LOWER_IS_BETTER.contains(&base) {
            Direction::LowerIsBetter
        } else {
            Direction::HigherIsBetter
        }
    }

    fn is_better(self, candidate: f64, reference: f64) -> bool {
        match self {
            Direction::HigherIsBetter => candidate > reference,
            Direction::LowerIsBetter => candidate < reference,
        }
    }
}

/// Competition ("min") rank of `player_id` for `column` within `population`.
///
/// The rank is 1 + the number of defined values strictly better than the
/// player's, so tied players share the best rank of their group and the next
/// distinct value skips past the whole group. Rows without a value are left
/// out of the count. Returns `None` when the column has no values at all, or
/// when the player is absent or has no value of their own.
pub fn rank(population: &[PlayerSummary], player_id: i64, column: &str) -> Option<u32> {
    let values: Vec<f64> = population.iter().filter_map(|row| row.value(column)).collect();
    if values.is_empty() {
        return None;
    }

    let own = population
        .iter()
        .find(|row| row.player_id == player_id)?
        .value(column)?;

    let direction = Direction::for_column(column);
    let better = values.iter().filter(|&&v| direction.is_better(v, own)).count();
    Some(better as u32 + 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn player(player_id: i64, column: &str, value: Option<f64>) -> PlayerSummary {
        let mut values = BTreeMap::new();
        if let Some(value) = value {
            values.insert(column.to_string(), value);
        }
        PlayerSummary {
            player_id,
            games_played: Some(10),
            values,
        }
    }

    fn population(column: &str, values: &[Option<f64>]) -> Vec<PlayerSummary> {
        values
            .iter()
            .enumerate()
            .map(|(i, v)| player(i as i64 + 1, column, *v))
            .collect()
    }

    #[test]
    fn test_home_run_example() {
        let pop = population("HR", &[Some(10.0), Some(25.0), Some(25.0), Some(5.0)]);
        let ranks: Vec<Option<u32>> = (1..=4).map(|id| rank(&pop, id, "HR")).collect();
        assert_eq!(ranks, vec![Some(3), Some(1), Some(1), Some(4)]);
    }

    #[test]
    fn test_distinct_values_span_one_to_n() {
        let pop = population("AVG", &[Some(0.250), Some(0.310), Some(0.199), Some(0.287)]);
        assert_eq!(rank(&pop, 2, "AVG"), Some(1));
        assert_eq!(rank(&pop, 3, "AVG"), Some(4));
    }

    #[test]
    fn test_tie_for_first_skips_second() {
        let pop = population("H", &[Some(30.0), Some(30.0), Some(20.0)]);
        assert_eq!(rank(&pop, 1, "H"), Some(1));
        assert_eq!(rank(&pop, 2, "H"), Some(1));
        assert_eq!(rank(&pop, 3, "H"), Some(3));
    }

    #[test]
    fn test_fewest_strikeouts_rank_first() {
        let pop = population("K", &[Some(1.2), Some(0.4), Some(0.9)]);
        assert_eq!(rank(&pop, 2, "K"), Some(1));
        assert_eq!(rank(&pop, 1, "K"), Some(3));

        let pop = population("total_HBP", &[Some(3.0), Some(0.0)]);
        assert_eq!(rank(&pop, 2, "total_HBP"), Some(1));
    }

    #[test]
    fn test_missing_values_do_not_shift_ranks() {
        let pop = population("SLG", &[None, Some(0.400), None, Some(0.500)]);
        assert_eq!(rank(&pop, 4, "SLG"), Some(1));
        assert_eq!(rank(&pop, 2, "SLG"), Some(2));
        assert_eq!(rank(&pop, 1, "SLG"), None);
    }

    #[test]
    fn test_all_missing_column_has_no_rank() {
        let pop = population("OPS", &[None, None]);
        assert_eq!(rank(&pop, 1, "OPS"), None);
        assert_eq!(rank(&[], 1, "OPS"), None);
    }

    #[test]
    fn test_absent_player_has_no_rank() {
        let pop = population("HR", &[Some(4.0), Some(9.0)]);
        assert_eq!(rank(&pop, 99, "HR"), None);
    }

    #[test]
    fn test_direction_for_columns() {
        assert_eq!(Direction::for_column("K"), Direction::LowerIsBetter);
        assert_eq!(Direction::for_column("total_K"), Direction::LowerIsBetter);
        assert_eq!(Direction::for_column("HR"), Direction::HigherIsBetter);
        assert_eq!(Direction::for_column("total_BB"), Direction::HigherIsBetter);
    }
}
