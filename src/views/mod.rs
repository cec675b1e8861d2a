//! Server-rendered HTML for the player picker and player pages.

use crate::models::{PlayerDetail, PlayerListItem, Ranked};
use crate::stats::RateStats;

const STYLE: &str = "body{font-family:'Segoe UI',Helvetica,Arial,sans-serif;margin:2rem;color:#222}\
table{border-collapse:collapse;margin-bottom:1.5rem}\
th,td{padding:.3rem .7rem;border-bottom:1px solid #ddd;text-align:right}\
th:first-child,td:first-child{text-align:left}\
.rank{color:#666;font-size:.85em}\
.error{color:#b00020}\
img.team{height:32px;margin-right:.4rem}";

pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Three decimals, or `-` when undefined.
fn rate(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{v:.3}"))
}

fn per_game(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{v:.2}"))
}

fn count<T: ToString>(value: Option<T>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}

fn rank_cell(rank: Option<u32>) -> String {
    match rank {
        Some(rank) => format!("<span class=\"rank\">#{rank}</span>"),
        None => "<span class=\"rank\">-</span>".to_string(),
    }
}

fn layout(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{}</title>\n<style>{STYLE}</style>\n</head>\n<body>\n{body}\n</body>\n</html>\n",
        escape(title)
    )
}

pub fn index_page(players: &[PlayerListItem]) -> String {
    let mut body = String::from("<h1>MLB Player Stats</h1>\n");
    if players.is_empty() {
        body.push_str("<p>No player data is loaded.</p>\n");
    } else {
        body.push_str("<ul class=\"players\">\n");
        for player in players {
            body.push_str(&format!(
                "<li><a href=\"/player/{id}\">{name}</a> <span class=\"rank\">{id}</span></li>\n",
                id = player.player_id,
                name = escape(&player.player_full_name),
            ));
        }
        body.push_str("</ul>\n");
    }
    layout("MLB Player Stats", &body)
}

pub fn error_page(message: &str) -> String {
    let body = format!(
        "<h1>MLB Player Stats</h1>\n<p class=\"error\">{}</p>\n<p><a href=\"/\">Back to players</a></p>\n",
        escape(message)
    );
    layout(message, &body)
}

fn ranked_table<T>(title: &str, entries: &[Ranked<T>], fmt: impl Fn(Option<&T>) -> String) -> String {
    if entries.is_empty() {
        return String::new();
    }
    let mut html = format!(
        "<h2>{}</h2>\n<table>\n<tr><th>Stat</th><th>Value</th><th>Rank</th></tr>\n",
        escape(title)
    );
    for entry in entries {
        html.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            escape(&entry.stat),
            fmt(entry.value.as_ref()),
            rank_cell(entry.rank),
        ));
    }
    html.push_str("</table>\n");
    html
}

fn rate_cells(rates: &RateStats) -> String {
    format!(
        "<td>{}</td><td>{}</td><td>{}</td><td>{}</td>",
        rate(rates.avg),
        rate(rates.obp),
        rate(rates.slg),
        rate(rates.ops)
    )
}

pub fn player_page(detail: &PlayerDetail) -> String {
    let player = &detail.player;
    let text = |value: &Option<String>| escape(value.as_deref().unwrap_or("-"));

    let mut body = String::new();
    if let Some(image) = &player.image {
        body.push_str(&format!(
            "<img src=\"{}\" alt=\"{}\" height=\"120\">\n",
            escape(image),
            escape(&player.name)
        ));
    }
    body.push_str(&format!(
        "<h1>{}</h1>\n<p>{} &middot; {} &middot; Bats {} / Throws {} &middot; {} games</p>\n",
        escape(&player.name),
        text(&player.position),
        text(&player.team),
        text(&player.bats),
        text(&player.throws),
        detail.games_played,
    ));

    if !detail.team_images.is_empty() {
        body.push_str("<p>");
        for image in &detail.team_images {
            body.push_str(&format!("<img class=\"team\" src=\"{}\" alt=\"\">", escape(image)));
        }
        body.push_str("</p>\n");
    }

    body.push_str(&ranked_table("Rate Stats", &detail.rate_stats, |v| rate(v.copied())));
    body.push_str(&ranked_table("Per Game", &detail.per_game, |v| per_game(v.copied())));
    body.push_str(&ranked_table("Totals", &detail.totals, |v| count(v)));

    let career = &detail.career;
    body.push_str(&format!(
        "<h2>Career</h2>\n<table>\n<tr><th>G</th><th>AB</th><th>H</th><th>HR</th><th>BB</th>\
         <th>K</th><th>AVG</th><th>OBP</th><th>SLG</th><th>OPS</th></tr>\n\
         <tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td>{}</tr>\n</table>\n",
        career.games,
        career.totals.ab,
        career.totals.h,
        career.totals.hr,
        career.totals.bb,
        career.totals.k,
        rate_cells(&career.rates),
    ));

    body.push_str(
        "<h2>Game Log</h2>\n<table>\n<tr><th>Date</th><th>PA</th><th>AB</th><th>H</th>\
         <th>HR</th><th>BB</th><th>K</th><th>RBI</th><th>AVG</th><th>OBP</th><th>SLG</th>\
         <th>OPS</th></tr>\n",
    );
    for game in &detail.game_log {
        let stat = |column: &str| count(game.counting.get(column).copied().flatten());
        body.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td>\
             <td>{}</td>{}</tr>\n",
            escape(&game.date),
            stat("PA"),
            stat("AB"),
            stat("H"),
            stat("HR"),
            stat("BB"),
            stat("K"),
            stat("RBI"),
            rate_cells(&game.rates),
        ));
    }
    body.push_str("</table>\n<p><a href=\"/\">Back to players</a></p>\n");

    layout(&player.name, &body)
}
