/*!
Routing between the two calendar conversion backends.

Every operation in this crate that moves between civil dates and absolute
day counts funnels through [`to_epoch_days`] and [`from_epoch_days`]. Those
two functions route, once per process, to one of two behaviorally
equivalent implementations:

* The modern backend computes the conversion directly with euclidean
  affine functions (see `util::common`).
* The legacy backend walks year and month lengths the way old calendar
  APIs did. It exists to mirror hosts whose calendar primitives predate
  the direct formulas, and as a differential oracle for the modern one.

The routing decision itself has no algorithmic content. The capability
probe prefers the modern backend unconditionally; setting
`ALMANAC_BACKEND=legacy` in the environment forces the legacy one, which
is how the equivalence property gets exercised end to end.
*/

use std::sync::OnceLock;

use crate::util::common::{self, days_in_month, is_leap_year};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Backend {
    Modern,
    Legacy,
}

static CHOICE: OnceLock<Backend> = OnceLock::new();

pub(crate) fn get() -> Backend {
    *CHOICE.get_or_init(|| {
        let choice = detect();
        debug!("calendar backend routed to {choice:?}");
        choice
    })
}

fn detect() -> Backend {
    match std::env::var("ALMANAC_BACKEND") {
        Ok(which) if which.eq_ignore_ascii_case("legacy") => Backend::Legacy,
        Ok(which) if which.eq_ignore_ascii_case("modern") => Backend::Modern,
        Ok(which) => {
            warn!("unrecognized ALMANAC_BACKEND={which}, using modern");
            Backend::Modern
        }
        Err(_) => Backend::Modern,
    }
}

/// Converts a civil date to days since the Unix epoch via the routed
/// backend.
pub(crate) fn to_epoch_days(year: i16, month: i8, day: i8) -> i32 {
    match get() {
        Backend::Modern => common::to_epoch_days(year, month, day),
        Backend::Legacy => to_epoch_days_legacy(year, month, day),
    }
}

/// Converts days since the Unix epoch to a civil date via the routed
/// backend.
pub(crate) fn from_epoch_days(days: i32) -> (i16, i8, i8) {
    match get() {
        Backend::Modern => common::from_epoch_days(days),
        Backend::Legacy => from_epoch_days_legacy(days),
    }
}

const fn days_in_year(year: i16) -> i32 {
    if is_leap_year(year) {
        366
    } else {
        365
    }
}

fn to_epoch_days_legacy(year: i16, month: i8, day: i8) -> i32 {
    let mut days = 0i32;
    if year >= 1970 {
        for y in 1970..year {
            days += days_in_year(y);
        }
    } else {
        for y in year..1970 {
            days -= days_in_year(y);
        }
    }
    for m in 1..month {
        days += i32::from(days_in_month(year, m));
    }
    days + i32::from(day) - 1
}

fn from_epoch_days_legacy(days: i32) -> (i16, i8, i8) {
    let mut year: i16 = 1970;
    let mut days = days;
    while days < 0 {
        year -= 1;
        days += days_in_year(year);
    }
    while days >= days_in_year(year) {
        days -= days_in_year(year);
        year += 1;
    }
    let mut month: i8 = 1;
    while days >= i32::from(days_in_month(year, month)) {
        days -= i32::from(days_in_month(year, month));
        month += 1;
    }
    (year, month, days as i8 + 1)
}
