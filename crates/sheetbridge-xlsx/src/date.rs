//! Excel serial date conversion

use chrono::{Duration, NaiveDate, NaiveDateTime};

/// Largest serial Excel accepts (9999-12-31)
const MAX_SERIAL: f64 = 2_958_466.0;

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Convert a serial date number to a timestamp
///
/// In the 1900 system serials below 61 are shifted by one day, because Excel
/// counts a 1900-02-29 that never existed. Negative or out-of-range serials
/// return `None`.
pub(crate) fn serial_to_datetime(serial: f64, date_1904: bool) -> Option<NaiveDateTime> {
    if !serial.is_finite() || serial < 0.0 || serial >= MAX_SERIAL {
        return None;
    }

    let epoch = if date_1904 {
        NaiveDate::from_ymd_opt(1904, 1, 1)?
    } else if serial < 61.0 {
        NaiveDate::from_ymd_opt(1899, 12, 31)?
    } else {
        NaiveDate::from_ymd_opt(1899, 12, 30)?
    };

    let days = serial.trunc();
    let mut seconds = ((serial - days) * SECONDS_PER_DAY).round() as i64;
    let mut days = days as i64;
    // a fraction that rounds up to midnight belongs to the next day
    if seconds >= SECONDS_PER_DAY as i64 {
        days += 1;
        seconds = 0;
    }

    epoch
        .checked_add_signed(Duration::days(days))?
        .and_hms_opt(0, 0, 0)?
        .checked_add_signed(Duration::seconds(seconds))
}

/// Parse an ISO 8601 value from a `t="d"` cell
pub(crate) fn parse_iso(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim_end_matches('Z');
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S"))
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}
