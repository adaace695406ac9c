//! Publication date parsing
//!
//! Article dates are free text such as `15 Janvier 2024` or `1er mars 2024`.
//! French and English month names are accepted, with or without accents,
//! as well as ISO `2024-03-01`.

use std::cmp::Ordering;

use chrono::NaiveDate;

const MONTHS: &[(&str, u32)] = &[
    ("janvier", 1),
    ("january", 1),
    ("jan", 1),
    ("fevrier", 2),
    ("février", 2),
    ("february", 2),
    ("feb", 2),
    ("mars", 3),
    ("march", 3),
    ("mar", 3),
    ("avril", 4),
    ("april", 4),
    ("apr", 4),
    ("mai", 5),
    ("may", 5),
    ("juin", 6),
    ("june", 6),
    ("jun", 6),
    ("juillet", 7),
    ("july", 7),
    ("jul", 7),
    ("aout", 8),
    ("août", 8),
    ("august", 8),
    ("aug", 8),
    ("septembre", 9),
    ("september", 9),
    ("sep", 9),
    ("sept", 9),
    ("octobre", 10),
    ("october", 10),
    ("oct", 10),
    ("novembre", 11),
    ("november", 11),
    ("nov", 11),
    ("decembre", 12),
    ("décembre", 12),
    ("december", 12),
    ("dec", 12),
];

fn month_number(name: &str) -> Option<u32> {
    let name = name.trim_end_matches('.').to_lowercase();
    MONTHS
        .iter()
        .find(|(candidate, _)| *candidate == name)
        .map(|(_, number)| *number)
}

/// Parse an article date, `None` when the format is not recognised
pub fn parse_article_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Some(date);
    }

    let parts: Vec<&str> = value.split_whitespace().collect();
    let [day, month, year] = parts.as_slice() else {
        return None;
    };

    let day = day.trim_end_matches("er").trim_end_matches(',');
    let day: u32 = day.parse().ok()?;
    let month = month_number(month)?;
    let year: i32 = year.parse().ok()?;

    NaiveDate::from_ymd_opt(year, month, day)
}

/// Order two date strings newest first; unparseable dates go last
pub fn cmp_newest_first(a: &str, b: &str) -> Ordering {
    match (parse_article_date(a), parse_article_date(b)) {
        (Some(a), Some(b)) => b.cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
