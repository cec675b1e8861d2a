use chrono::NaiveDate;

/// Textual date layouts accepted in the game log, tried in order.
const DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%m/%d/%Y", "%Y/%m/%d", "%d-%m-%Y"];

pub fn parse_game_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
}

/// MM/DD/YYYY for pages; unparseable input is returned as-is.
pub fn display_date(raw: &str) -> String {
    match parse_game_date(raw) {
        Some(date) => date.format("%m/%d/%Y").to_string(),
        None => raw.to_string(),
    }
}

/// YYYY-MM-DD for chart data; unparseable input is returned as-is.
pub fn iso_date(raw: &str) -> String {
    match parse_game_date(raw) {
        Some(date) => date.format("%Y-%m-%d").to_string(),
        None => raw.to_string(),
    }
}
