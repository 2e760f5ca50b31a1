//! Best-effort date normalization.

use chrono::{Datelike, Local, NaiveDate};

/// Input patterns tried in order; the first that parses wins.
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%m/%d/%Y",
    TWO_DIGIT_YEAR_FORMAT,
    "%d %b %Y",
    "%d %m %Y",
];

const TWO_DIGIT_YEAR_FORMAT: &str = "%m/%d/%y";

/// Output pattern for dates that parsed.
pub const OUTPUT_DATE_FORMAT: &str = "%Y-%m-%d";

/// Reformats a date as `YYYY-MM-DD`, returning the input unchanged when no
/// known pattern matches (`circa 1970`, `1968 to 1970`, a bare year).
///
/// Two-digit years that would land after today are read as the previous
/// century, so `01/05/69` is 1969.
pub fn format_date(raw: &str) -> String {
    format_date_as_of(raw, Local::now().date_naive())
}

pub(crate) fn format_date_as_of(raw: &str, today: NaiveDate) -> String {
    let value = raw.trim();
    try_parse_date(value, today)
        .map(|date| date.format(OUTPUT_DATE_FORMAT).to_string())
        .unwrap_or_else(|| value.to_string())
}

fn try_parse_date(value: &str, today: NaiveDate) -> Option<NaiveDate> {
    let four_digit_year = has_four_digit_run(value);
    DATE_FORMATS
        .iter()
        // chrono's %Y takes any digit count; only offer it a real 4-digit year
        .filter(|fmt| four_digit_year || !fmt.contains("%Y"))
        .find_map(|fmt| {
            let date = NaiveDate::parse_from_str(value, fmt).ok()?;
            if *fmt == TWO_DIGIT_YEAR_FORMAT && date > today {
                Some(date.with_year(date.year() - 100).unwrap_or(date))
            } else {
                Some(date)
            }
        })
}

fn has_four_digit_run(value: &str) -> bool {
    value
        .split(|c: char| !c.is_ascii_digit())
        .any(|run| run.len() == 4)
}
