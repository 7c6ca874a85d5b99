//! Field extractors for the NOA catalog record layout.
//!
//! Each yearly catalog file is plain text with one event per line in a
//! fixed, whitespace-padded column layout:
//!
//! ```text
//! DATE         TIME     LAT.   LONG.  DEPTH    MAGNITUDE
//!                     (GMT)    (N)    (E)    (km)       (Local)
//! 2021 JAN  1   00 38 24.3 38.3894 21.9832    8         1.2
//! ```
//!
//! There are no delimiters, so every extractor works off the spacing runs
//! that separate the numeric fields:
//! - the latitude is the first number of the lat/lon pair, recognized by the
//!   `lat SP lon SP{2,4}` spacing that follows it;
//! - the longitude is the number sitting before `depth SP{2,} magnitude` at
//!   end of line;
//! - the depth is an integer separated from the magnitude by at least five
//!   spaces;
//! - the magnitude is the last number on the line.
//!
//! Lines that do not match a pattern (headers, blanks) yield no value for
//! that field. Values are returned in text order, one per matching line.

use crate::{ExtractError, Result};
use chrono::{NaiveDate, NaiveTime};
use once_cell::sync::Lazy;
use regex::Regex;

static DATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d{4})\s+([A-Z]{3})\s+(\d{1,2})").expect("valid date regex"));
static TIME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d{2})\s(\d{2})\s([\d.]+)").expect("valid time regex"));
static LAT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([\d.]+)\s[\d.]+\s{2,4}").expect("valid latitude regex"));
static LON_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)([\d.]+)\s{2,}\d+\s{2,}[\d.]+$").expect("valid longitude regex"));
static DEPTH_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d+)\s{5,}[\d.]").expect("valid depth regex"));
static MAG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)([\d.]+)$").expect("valid magnitude regex"));

/// Month number for an uppercase 3-letter English abbreviation.
fn month_number(abbrev: &str) -> Result<u32> {
    let n = match abbrev {
        "JAN" => 1,
        "FEB" => 2,
        "MAR" => 3,
        "APR" => 4,
        "MAY" => 5,
        "JUN" => 6,
        "JUL" => 7,
        "AUG" => 8,
        "SEP" => 9,
        "OCT" => 10,
        "NOV" => 11,
        "DEC" => 12,
        _ => return Err(ExtractError::InvalidMonth(abbrev.to_string())),
    };
    Ok(n)
}

/// Extract every `YYYY MMM D` date token from the text, in order.
///
/// The month abbreviation must be a real month and the day must exist in
/// that month, otherwise extraction fails.
pub fn dates(text: &str) -> Result<Vec<NaiveDate>> {
    let mut out = Vec::new();
    for caps in DATE_RE.captures_iter(text) {
        let year: i32 = caps[1].parse().expect("4-digit year");
        let month = month_number(&caps[2])?;
        let day: u32 = caps[3].parse().expect("1-2 digit day");
        let date = NaiveDate::from_ymd_opt(year, month, day)
            .ok_or(ExtractError::InvalidDate { year, month, day })?;
        out.push(date);
    }
    Ok(out)
}

/// Extract every `HH MM SS[.f]` time token from the text, in order.
///
/// The fractional part is optional and carried to microsecond precision.
pub fn times(text: &str) -> Result<Vec<NaiveTime>> {
    let mut out = Vec::new();
    for caps in TIME_RE.captures_iter(text) {
        let token = caps.get(0).expect("whole match").as_str();
        let hour: u32 = caps[1].parse().expect("2-digit hour");
        let minute: u32 = caps[2].parse().expect("2-digit minute");
        let (secs, micros) = parse_seconds(&caps[3])
            .ok_or_else(|| ExtractError::InvalidTime(token.to_string()))?;
        let time = NaiveTime::from_hms_micro_opt(hour, minute, secs, micros)
            .ok_or_else(|| ExtractError::InvalidTime(token.to_string()))?;
        out.push(time);
    }
    Ok(out)
}

/// Split a `SS[.ffffff]` token into whole seconds and microseconds.
fn parse_seconds(token: &str) -> Option<(u32, u32)> {
    let (whole, frac) = match token.split_once('.') {
        Some((w, f)) => (w, f),
        None => (token, ""),
    };
    if frac.contains('.') {
        return None;
    }
    let secs: u32 = whole.parse().ok()?;
    if frac.is_empty() {
        return Some((secs, 0));
    }
    // Zero-pad (or truncate) the fraction to 6 digits.
    let padded = format!("{frac:0<6}");
    let micros: u32 = padded.get(..6)?.parse().ok()?;
    Some((secs, micros))
}

/// Extract every latitude from the text, in order.
///
/// A latitude is the first decimal of a `lat lon` pair, recognized by the
/// single space and 2-4 space run that follow it. This is a spacing
/// heuristic over the fixed layout, not semantic validation.
pub fn latitudes(text: &str) -> Result<Vec<f64>> {
    decimals(&LAT_RE, text)
}

/// Extract every longitude from the text, in order.
///
/// A longitude is the decimal sitting before the depth and magnitude
/// columns at end of line, which makes it the counterpart of the latitude
/// heuristic.
pub fn longitudes(text: &str) -> Result<Vec<f64>> {
    decimals(&LON_RE, text)
}

/// Extract every depth (km, whole number) from the text, in order.
///
/// Depths are disambiguated from neighbouring numeric fields by the run of
/// at least five spaces that separates them from the magnitude column.
pub fn depths(text: &str) -> Result<Vec<i32>> {
    let mut out = Vec::new();
    for caps in DEPTH_RE.captures_iter(text) {
        let token = &caps[1];
        let depth: i32 = token
            .parse()
            .map_err(|_| ExtractError::InvalidNumber(token.to_string()))?;
        out.push(depth);
    }
    Ok(out)
}

/// Extract every magnitude (last decimal on a line) from the text, in order.
pub fn magnitudes(text: &str) -> Result<Vec<f64>> {
    decimals(&MAG_RE, text)
}

fn decimals(re: &Regex, text: &str) -> Result<Vec<f64>> {
    let mut out = Vec::new();
    for caps in re.captures_iter(text) {
        let token = &caps[1];
        let value: f64 = token
            .parse()
            .map_err(|_| ExtractError::InvalidNumber(token.to_string()))?;
        out.push(value);
    }
    Ok(out)
}

/// True if the text contains a date token, the marker of a record line.
pub(crate) fn has_date_token(line: &str) -> bool {
    DATE_RE.is_match(line)
}

/// Day-first display form used throughout the pipeline (`DD/MM/YYYY`).
pub fn format_date(date: &NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// Time display form with the fraction padded to six digits
/// (`HH:MM:SS.ffffff`).
pub fn format_time(time: &NaiveTime) -> String {
    time.format("%H:%M:%S%.6f").to_string()
}
