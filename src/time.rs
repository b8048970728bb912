//! GPS time and calendar helpers
use hifitime::{is_gregorian_valid, TimeScale};

use crate::{constants::SECONDS_PER_DAY, error::ParsingError, prelude::Epoch};

/// Builds a GPST [Epoch] from calendar components. Seconds may be fractional.
pub fn gpst_epoch(
    year: i32,
    month: u8,
    day: u8,
    hours: u8,
    minutes: u8,
    seconds: f64,
) -> Result<Epoch, ParsingError> {
    let whole = seconds.trunc();
    let nanos = ((seconds - whole) * 1.0E9).round().min(999_999_999.0) as u32;

    Epoch::maybe_from_gregorian(
        year,
        month,
        day,
        hours,
        minutes,
        whole as u8,
        nanos,
        TimeScale::GPST,
    )
    .or(Err(ParsingError::Epoch(format!(
        "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}",
        year, month, day, hours, minutes, seconds
    ))))
}

/// Returns (GPS week, seconds of week) of this [Epoch].
pub fn gps_week_seconds(t: Epoch) -> (u32, f64) {
    let (week, nanos) = t.to_time_of_week();
    (week, nanos as f64 / 1.0E9)
}

/// Seconds of day, whole seconds only.
pub fn seconds_of_day(hours: u8, minutes: u8, seconds: f64) -> f64 {
    3600.0 * hours as f64 + 60.0 * minutes as f64 + seconds.trunc()
}

/// Returns true when `t` (seconds) is retained by decimation interval `dec` (seconds).
/// A null interval retains everything.
pub fn decimation_match(t: f64, dec: u32) -> bool {
    if dec == 0 {
        return true;
    }
    t.rem_euclid(dec as f64) == 0.0
}

/// Number of days in this year, which is also the day of year of Dec 31.
pub fn days_in_year(year: i32) -> u16 {
    if is_gregorian_valid(year, 2, 29, 0, 0, 0, 0) {
        366
    } else {
        365
    }
}

/// Day of year of this calendar date.
/// Returns None when the date does not exist.
pub fn ymd_to_doy(year: i32, month: u8, day: u8) -> Option<u16> {
    let t = Epoch::maybe_from_gregorian(year, month, day, 0, 0, 0, 0, TimeScale::GPST).ok()?;
    Some(t.day_of_year().floor() as u16)
}

/// Converts (year, day of year) to (year, month, day).
/// Returns None when the day does not exist in this year.
pub fn ydoy_to_ymd(year: i32, doy: u16) -> Option<(i32, u8, u8)> {
    if doy == 0 || doy > days_in_year(year) {
        return None;
    }
    let t = Epoch::from_day_of_year(year, doy as f64, TimeScale::GPST);
    let (y, m, d, _, _, _, _) = t.to_gregorian(TimeScale::GPST);
    Some((y, m, d))
}

/// Midnight (GPST) of the day containing `t`, expressed as seconds of week.
pub(crate) fn day_start_seconds_of_week(t: Epoch) -> f64 {
    let (_, sow) = gps_week_seconds(t);
    sow - sow.rem_euclid(SECONDS_PER_DAY)
}

/// Plans the (year, day of year) pairs to process, from (`year_start`, `doy_start`)
/// to (`year_end`, `doy_end`) included, every `skip` days.
/// The first year starts on `doy_start`, following years start on January 1st.
/// Intermediate years run through December 31st and the stride restarts every year.
/// Days that do not exist are not proposed.
pub fn day_plan(
    year_start: i32,
    doy_start: u16,
    year_end: i32,
    doy_end: u16,
    skip: u16,
) -> Vec<(i32, u16)> {
    let skip = skip.max(1) as usize;
    let mut plan = Vec::new();

    for year in year_start..=year_end {
        let dec31 = days_in_year(year);
        let last = if year != year_end { dec31 } else { doy_end };
        let first = if year == year_start { doy_start } else { 1 };

        for doy in (first..=last).step_by(skip) {
            if doy <= dec31 {
                plan.push((year, doy));
            }
        }
    }
    plan
}
