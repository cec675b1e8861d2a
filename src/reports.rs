//! Builds the payloads served by the pages and the JSON API.

use std::collections::BTreeMap;

use crate::db::Dataset;
use crate::error::ApiError;
use crate::models::{
    COUNTING_COLUMNS, CareerLine, CountingSeries, GameLogEntry, GameStatsResponse,
    PlayerDetail, PlayerIdentity, PlayerListItem, RATE_COLUMNS, Ranked, RateSeries,
    TOTAL_PREFIX,
};
use crate::stats::dates::{display_date, iso_date};
use crate::stats::{aggregate, rank};

pub fn player_list(data: &Dataset) -> Result<Vec<PlayerListItem>, ApiError> {
    if data.games.is_empty() {
        return Err(ApiError::DataUnavailable);
    }
    Ok(data.players())
}

/// Summary stats, league ranks and the game log for one player.
pub fn player_detail(data: &Dataset, player_id: i64) -> Result<PlayerDetail, ApiError> {
    if !data.is_available() {
        return Err(ApiError::DataUnavailable);
    }

    let rows = data.games_for(player_id);
    let summary = data.summary_for(player_id).ok_or(ApiError::PlayerNotFound)?;
    let career = aggregate(&rows).ok_or(ApiError::PlayerNotFound)?;
    let first = rows[0];
    let population = &data.summary.rows;

    let mut team_images: Vec<String> = Vec::new();
    for image in rows.iter().filter_map(|row| row.team_image.as_ref()) {
        if !team_images.contains(image) {
            team_images.push(image.clone());
        }
    }

    let totals = data
        .summary
        .total_columns()
        .map(|column| Ranked {
            stat: column.trim_start_matches(TOTAL_PREFIX).to_string(),
            value: summary.value(column).map(|v| v.round() as u64),
            rank: rank(population, player_id, column),
        })
        .collect();

    let ranked_columns = |columns: &[&str]| -> Vec<Ranked<f64>> {
        columns
            .iter()
            .filter(|column| data.summary.has_column(column))
            .map(|&column| Ranked {
                stat: column.to_string(),
                value: summary.value(column),
                rank: rank(population, player_id, column),
            })
            .collect()
    };

    let game_log = career
        .game_log
        .iter()
        .map(|line| GameLogEntry {
            date: display_date(&line.row.date),
            opp_image: line.row.opp_image.clone(),
            counting: COUNTING_COLUMNS
                .iter()
                .map(|&column| (column.to_string(), line.row.counting(column)))
                .collect::<BTreeMap<_, _>>(),
            rates: line.rates,
        })
        .collect();

    Ok(PlayerDetail {
        player: PlayerIdentity {
            id: player_id,
            name: first.player_full_name.clone(),
            position: first.pos.clone(),
            team: first.current_team_name.clone(),
            bats: first.bats_hand.clone(),
            throws: first.throws_hand.clone(),
            image: first.player_image.clone(),
        },
        games_played: summary.games_played.unwrap_or(career.games as u32),
        team_images,
        totals,
        per_game: ranked_columns(&COUNTING_COLUMNS),
        rate_stats: ranked_columns(&RATE_COLUMNS),
        career: CareerLine {
            games: career.games,
            totals: career.totals,
            rates: career.rates,
        },
        game_log,
    })
}

/// Date-ordered per-game series for the charts.
pub fn game_stats(data: &Dataset, player_id: i64) -> Result<GameStatsResponse, ApiError> {
    if !data.is_available() {
        return Err(ApiError::DataUnavailable);
    }

    let rows = data.games_for(player_id);
    let career = aggregate(&rows).ok_or(ApiError::PlayerNotFound)?;

    let mut dates = Vec::with_capacity(career.games);
    let mut opp_images = Vec::with_capacity(career.games);
    let mut rate_stats = RateSeries::default();
    let mut counting_stats = CountingSeries::default();

    for line in &career.game_log {
        dates.push(iso_date(&line.row.date));
        opp_images.push(line.row.opp_image.clone());
        rate_stats.avg.push(line.rates.avg);
        rate_stats.obp.push(line.rates.obp);
        rate_stats.slg.push(line.rates.slg);
        rate_stats.ops.push(line.rates.ops);
        counting_stats.push(line.row);
    }

    Ok(GameStatsResponse {
        dates,
        opp_images,
        rate_stats,
        counting_stats,
        league_averages: data.league_average,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const GAMES: &str = "\
playerId,playerFullName,date,PA,AB,H,HR,BB,K,HBP,SF,TB,RBI,pos,currentTeamName,teamImage,oppImage,AVG,OBP,SLG,OPS
10,Ada Alvarez,2024-04-03,4,4,2,1,0,1,0,0,5,2,1B,Astros,hou.png,sea.png,0.5,0.5,1.25,1.75
10,Ada Alvarez,04/01/2024,5,4,1,0,1,2,0,0,1,0,1B,Astros,hou.png,tex.png,,,,
10,Ada Alvarez,2024/04/02,4,0,0,0,3,0,1,0,0,0,1B,Astros,hou2.png,tex.png,,,,
20,Ben Brooks,2024-04-01,4,4,0,0,0,3,0,0,0,0,C,Mets,nym.png,atl.png,0.0,0.0,0.0,0.0
";

    const SUMMARY: &str = "\
playerId,games_played,total_HR,total_K,HR,K,AVG,OPS
10,3,1,3,0.33,1.0,0.375,1.2
20,1,0,3,0.0,3.0,0.0,0.0
";

    const LEAGUE: &str = "AVG,OBP,SLG,OPS\n0.245,0.315,0.405,0.720\n";

    fn dataset() -> Dataset {
        Dataset::from_readers(GAMES.as_bytes(), SUMMARY.as_bytes(), LEAGUE.as_bytes()).unwrap()
    }

    #[test]
    fn test_player_detail_ranks_and_sections() {
        let detail = player_detail(&dataset(), 10).unwrap();

        assert_eq!(detail.player.name, "Ada Alvarez");
        assert_eq!(detail.player.team.as_deref(), Some("Astros"));
        assert_eq!(detail.games_played, 3);
        assert_eq!(detail.team_images, vec!["hou.png", "hou2.png"]);

        let stats: Vec<&str> = detail.totals.iter().map(|t| t.stat.as_str()).collect();
        assert_eq!(stats, vec!["HR", "K"]);
        assert_eq!(detail.totals[0].value, Some(1));
        assert_eq!(detail.totals[0].rank, Some(1));
        // Tied on total strikeouts.
        assert_eq!(detail.totals[1].rank, Some(1));

        let per_game: Vec<&str> = detail.per_game.iter().map(|t| t.stat.as_str()).collect();
        assert_eq!(per_game, vec!["HR", "K"]);
        // Fewer strikeouts per game ranks first.
        assert_eq!(detail.per_game[1].rank, Some(1));

        let rates: Vec<&str> = detail.rate_stats.iter().map(|t| t.stat.as_str()).collect();
        assert_eq!(rates, vec!["AVG", "OPS"]);
        assert_eq!(detail.rate_stats[0].rank, Some(1));
    }

    #[test]
    fn test_player_detail_career_and_log() {
        let detail = player_detail(&dataset(), 10).unwrap();

        assert_eq!(detail.career.games, 3);
        assert_eq!(detail.career.totals.ab, 8);
        assert_eq!(detail.career.totals.h, 3);
        assert_eq!(detail.career.rates.avg, Some(0.375));

        let dates: Vec<&str> = detail.game_log.iter().map(|g| g.date.as_str()).collect();
        assert_eq!(dates, vec!["04/01/2024", "04/02/2024", "04/03/2024"]);
        // No at-bats that day.
        assert_eq!(detail.game_log[1].rates.avg, None);
        assert_eq!(detail.game_log[1].rates.obp, Some(1.0));
    }

    #[test]
    fn test_unknown_player_is_not_found() {
        assert_eq!(player_detail(&dataset(), 99).unwrap_err(), ApiError::PlayerNotFound);
        assert_eq!(game_stats(&dataset(), 99).unwrap_err(), ApiError::PlayerNotFound);
    }

    #[test]
    fn test_empty_dataset_is_unavailable() {
        let data = Dataset::default();
        assert_eq!(player_list(&data).unwrap_err(), ApiError::DataUnavailable);
        assert_eq!(player_detail(&data, 10).unwrap_err(), ApiError::DataUnavailable);
        assert_eq!(game_stats(&data, 10).unwrap_err(), ApiError::DataUnavailable);
    }

    #[test]
    fn test_game_stats_series_align_with_dates() {
        let stats = game_stats(&dataset(), 10).unwrap();

        assert_eq!(stats.dates, vec!["2024-04-01", "2024-04-02", "2024-04-03"]);
        assert_eq!(stats.counting_stats.ab, vec![Some(4), Some(0), Some(4)]);
        assert_eq!(stats.counting_stats.rbi.len(), stats.dates.len());
        assert_eq!(stats.rate_stats.avg, vec![Some(0.25), None, Some(0.5)]);
        assert_eq!(stats.rate_stats.ops[2], Some(1.75));
        assert_eq!(
            stats.opp_images,
            vec![Some("tex.png".to_string()), Some("tex.png".to_string()), Some("sea.png".to_string())]
        );
        assert_eq!(stats.league_averages.and_then(|l| l.avg), Some(0.245));
    }

    #[test]
    fn test_game_stats_without_league_average() {
        let data =
            Dataset::from_readers(GAMES.as_bytes(), SUMMARY.as_bytes(), "AVG\n".as_bytes()).unwrap();
        let stats = game_stats(&data, 20).unwrap();
        assert!(stats.league_averages.is_none());
        assert_eq!(stats.dates.len(), 1);
    }
}
