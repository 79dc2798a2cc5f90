//! Display formatting shared by the terminal and web front ends

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Placeholder for a value the API did not send
pub const MISSING: &str = "—";

/// `$1,234.50`, or `—` when missing
pub fn money(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_finite() => {
            let cents = (v.abs() * 100.0).round() as u64;
            let sign = if v < 0.0 && cents > 0 { "-" } else { "" };
            format!("{}${}.{:02}", sign, group_thousands(cents / 100), cents % 100)
        }
        _ => MISSING.to_string(),
    }
}

/// `$1,234` rounded to the dollar
pub fn whole_money(value: f64) -> String {
    let dollars = value.abs().round() as u64;
    let sign = if value < 0.0 && dollars > 0 { "-" } else { "" };
    format!("{}${}", sign, group_thousands(dollars))
}

/// `12,500 L`
pub fn litres(value: f64) -> String {
    let whole = value.abs().round() as u64;
    let sign = if value < 0.0 && whole > 0 { "-" } else { "" };
    format!("{}{} L", sign, group_thousands(whole))
}

/// `1234567` -> `1,234,567`
pub fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// `land_size_sqm` -> `Land Size Sqm`
pub fn title_case(s: &str) -> String {
    let spaced: String = s
        .chars()
        .map(|c| if c == '_' || c == '-' { ' ' } else { c })
        .collect();

    let mut out = String::with_capacity(spaced.len());
    let mut at_word_start = true;
    for ch in spaced.chars() {
        if at_word_start && ch.is_alphanumeric() {
            out.extend(ch.to_uppercase());
        } else {
            out.push(ch);
        }
        at_word_start = !ch.is_alphanumeric();
    }

    // Runs of separators collapse to one space
    out.split(' ')
        .filter(|w| !w.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Accepts RFC 3339, naive date-times and bare `YYYY-MM-DD`
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }
    for pattern in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%a, %d %b %Y %H:%M:%S GMT"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, pattern) {
            return Some(dt.date());
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

/// `dd/mm/yyyy`, or `—` for a missing or unreadable date
pub fn display_date(s: Option<&str>) -> String {
    s.and_then(parse_date)
        .map(|d| d.format("%d/%m/%Y").to_string())
        .unwrap_or_else(|| MISSING.to_string())
}

/// `Under Review` -> `under-review`
pub fn status_slug(status: &str) -> String {
    status
        .trim()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
}

/// Text or the placeholder
pub fn or_missing(value: Option<&str>) -> String {
    value.unwrap_or(MISSING).to_string()
}
