/*!
A collection of calendar related utility functions.

# Algorithms

The civil date to epoch day conversions are based on
Neri C, Schneider L. "Euclidean affine functions and their application to calendar algorithms":
- https://github.com/cassioneri/eaf/
- https://www.youtube.com/watch?v=0s9F4QWAl-E

The variant written here is the widely used days-from-civil formulation with
a shifted epoch, restated for the `-9999..=9999` year range supported by
this crate.
*/

/// The minimum supported year.
pub(crate) const YEAR_MIN: i16 = -9999;

/// The maximum supported year.
pub(crate) const YEAR_MAX: i16 = 9999;

/// Returns true if and only if the given year is a leap year.
///
/// A leap year is a year with 366 days. Typical years have 365 days.
#[inline]
pub(crate) const fn is_leap_year(year: i16) -> bool {
    year % 400 == 0 || (year % 4 == 0 && year % 100 != 0)
}

/// Returns the number of days in the given year and month.
///
/// This correctly returns `29` when the year is a leap year and the month is
/// February.
#[inline]
pub(crate) const fn days_in_month(year: i16, month: i8) -> i8 {
    match month {
        2 => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

/// Saturates the given day in the month.
///
/// That is, if the day exceeds the maximum number of days in the given year
/// and month, then this returns the maximum. Otherwise, it returns the day
/// given.
#[inline]
pub(crate) fn saturate_day_in_month(year: i16, month: i8, day: i8) -> i8 {
    day.min(days_in_month(year, month))
}

/// Converts a civil date to the number of days since the Unix epoch.
///
/// The input must be a valid date within this crate's supported range, which
/// guarantees the result fits comfortably in an `i32`.
#[inline]
pub(crate) const fn to_epoch_days(year: i16, month: i8, day: i8) -> i32 {
    let y = if month <= 2 { year as i32 - 1 } else { year as i32 };
    let month = month as i32;
    let day = day as i32;
    let era = if y >= 0 { y } else { y - 399 } / 400;
    // Year of the era, in 0..=399.
    let yoe = y - era * 400;
    // Day of the March-first based year, in 0..=365.
    let doy = (153 * (if month > 2 { month - 3 } else { month + 9 }) + 2) / 5
        + day
        - 1;
    // Day of the era, in 0..=146096.
    let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;
    era * 146_097 + doe - 719_468
}

/// Converts a number of days since the Unix epoch to a civil date.
///
/// This is the inverse of [`to_epoch_days`]. The caller is responsible for
/// ensuring that `days` corresponds to a year in this crate's supported
/// range.
#[inline]
pub(crate) const fn from_epoch_days(days: i32) -> (i16, i8, i8) {
    let z = days + 719_468;
    let era = if z >= 0 { z } else { z - 146_096 } / 146_097;
    let doe = z - era * 146_097;
    let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
    let y = yoe + era * 400;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = doy - (153 * mp + 2) / 5 + 1;
    let month = if mp < 10 { mp + 3 } else { mp - 9 };
    let year = if month <= 2 { y + 1 } else { y };
    (year as i16, month as i8, day as i8)
}
