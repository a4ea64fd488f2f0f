//! Value recognizers used by the candidate types.
//!
//! None of these trim their input except for booleans. A value with stray
//! whitespace falls through to text.
use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};
use once_cell::sync::Lazy;
use regex::Regex;

/// `YYYY-MM-DD HH:MM:SS` or `YYYY-MM-DDTHH:MM:SS`.
///
/// The hour may be a single digit. Any number of fraction digits may follow
/// the seconds, after a period or comma. A zone (`Z` or `+hh:mm`) is only
/// valid with the `T` separator.
static TIMESTAMP_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(\d{4})-(\d{2})-(\d{2})([ T])(\d{1,2}):(\d{2}):(\d{2})(?:[.,](\d+))?(Z|([+-])(\d{2}):(\d{2}))?$",
    )
    .expect("timestamp regex to build")
});

static ISO_DATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{4})-(\d{2})-(\d{2})$").expect("iso date regex to build"));

/// `NN/NN/YYYY`, either month or day first.
static SLASH_DATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{2})/(\d{2})/(\d{4})$").expect("slash date regex to build"));

/// Which layout a date was recognized with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateStyle {
    /// `YYYY-MM-DD`
    Iso,
    /// `MM/DD/YYYY`
    Us,
    /// `DD/MM/YYYY`
    European,
}

pub fn is_boolean(value: &str) -> bool {
    let value = value.trim();
    ["true", "false", "t", "f"]
        .iter()
        .any(|b| value.eq_ignore_ascii_case(b))
}

pub fn is_smallint(value: &str) -> bool {
    value.parse::<i16>().is_ok()
}

pub fn is_int32(value: &str) -> bool {
    value.parse::<i32>().is_ok()
}

pub fn is_int64(value: &str) -> bool {
    value.parse::<i64>().is_ok()
}

/// Parses as a 64 bit float.
///
/// Values overflowing to infinity are rejected, spelled out infinities are
/// accepted.
pub fn is_float(value: &str) -> bool {
    match value.parse::<f64>() {
        Ok(v) if v.is_infinite() => value.to_ascii_lowercase().contains("inf"),
        Ok(_) => true,
        Err(_) => false,
    }
}

pub fn is_timestamp(value: &str) -> bool {
    parse_timestamp(value).is_some()
}

/// Parse a timestamp in one of the accepted layouts.
///
/// Values with a zone are converted to their naive UTC time. Leap seconds
/// (`:60`) are rejected.
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    let caps = TIMESTAMP_RE.captures(value)?;
    let num = |idx: usize| caps.get(idx).and_then(|m| m.as_str().parse::<u32>().ok());

    let zoned = caps.get(9).is_some();
    if zoned && &caps[4] != "T" {
        return None;
    }

    let date = NaiveDate::from_ymd_opt(num(1)? as i32, num(2)?, num(3)?)?;
    let (hour, minute, second) = (num(5)?, num(6)?, num(7)?);
    if second >= 60 {
        return None;
    }
    let nanos = match caps.get(8) {
        Some(frac) => fraction_nanos(frac.as_str())?,
        None => 0,
    };
    let time = NaiveTime::from_hms_nano_opt(hour, minute, second, nanos)?;
    let ts = NaiveDateTime::new(date, time);

    // `Z` has no sign group and is already UTC.
    let Some(sign) = caps.get(10) else {
        return Some(ts);
    };
    let (off_hour, off_minute) = (num(11)?, num(12)?);
    if off_hour > 24 || off_minute > 60 {
        return None;
    }
    let offset = TimeDelta::try_seconds(i64::from(off_hour * 3600 + off_minute * 60))?;
    match sign.as_str() {
        "+" => ts.checked_sub_signed(offset),
        _ => ts.checked_add_signed(offset),
    }
}

/// Fraction digits as nanoseconds, digits past the ninth are truncated.
fn fraction_nanos(digits: &str) -> Option<u32> {
    let significant = &digits[..digits.len().min(9)];
    let scale = 10u32.pow(9 - significant.len() as u32);
    significant.parse::<u32>().ok().map(|n| n * scale)
}

/// Parse a date, trying ISO, then US, then European layouts.
///
/// A slash date valid in both US and European layouts is always read as US.
pub fn parse_date(value: &str) -> Option<(NaiveDate, DateStyle)> {
    if let Some(caps) = ISO_DATE_RE.captures(value) {
        let num = |idx: usize| caps[idx].parse::<u32>().ok();
        return NaiveDate::from_ymd_opt(num(1)? as i32, num(2)?, num(3)?)
            .map(|date| (date, DateStyle::Iso));
    }

    let caps = SLASH_DATE_RE.captures(value)?;
    let first = caps[1].parse::<u32>().ok()?;
    let second = caps[2].parse::<u32>().ok()?;
    let year = caps[3].parse::<i32>().ok()?;

    if let Some(date) = NaiveDate::from_ymd_opt(year, first, second) {
        return Some((date, DateStyle::Us));
    }
    NaiveDate::from_ymd_opt(year, second, first).map(|date| (date, DateStyle::European))
}

/// Length of a value in characters.
pub fn char_len(value: &str) -> usize {
    value.chars().count()
}
