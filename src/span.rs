use core::ops::{Add, Neg, Sub};

/// A signed calendar-aware difference between two datetimes.
///
/// A `TimeSpan` decomposes a difference into years, months, days, hours,
/// minutes and seconds. All six fields share a single sign: when the
/// represented interval is negative (the end precedes the start), every
/// field is negative, never a mix.
///
/// The primary way to get a `TimeSpan` is [`DateTime::time_span`], which
/// guarantees the decomposition is calendar exact: applying the six fields
/// as successive additions to the earlier datetime reconstructs the later
/// one.
///
/// # Totals are approximate
///
/// The `total_*` methods use the approximation 1 year = 365 days and
/// 1 month = 30 days. They are convenient magnitudes for display and
/// ordering, not calendar-exact durations.
///
/// [`DateTime::time_span`]: crate::DateTime::time_span
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct TimeSpan {
    years: i32,
    months: i32,
    days: i32,
    hours: i32,
    minutes: i32,
    seconds: i32,
}

impl TimeSpan {
    /// The empty timespan, equal to `TimeSpan::default()`.
    pub const ZERO: TimeSpan =
        TimeSpan { years: 0, months: 0, days: 0, hours: 0, minutes: 0, seconds: 0 };

    /// Creates a new timespan from its six fields.
    ///
    /// No sign convention is enforced here. Timespans produced by
    /// [`DateTime::time_span`](crate::DateTime::time_span) always carry a
    /// single sign, but hand-built or field-wise combined timespans may mix
    /// signs.
    #[inline]
    pub const fn new(
        years: i32,
        months: i32,
        days: i32,
        hours: i32,
        minutes: i32,
        seconds: i32,
    ) -> TimeSpan {
        TimeSpan { years, months, days, hours, minutes, seconds }
    }

    /// Returns the number of years in this timespan.
    #[inline]
    pub const fn years(self) -> i32 {
        self.years
    }

    /// Returns the number of months in this timespan.
    #[inline]
    pub const fn months(self) -> i32 {
        self.months
    }

    /// Returns the number of days in this timespan.
    #[inline]
    pub const fn days(self) -> i32 {
        self.days
    }

    /// Returns the number of hours in this timespan.
    #[inline]
    pub const fn hours(self) -> i32 {
        self.hours
    }

    /// Returns the number of minutes in this timespan.
    #[inline]
    pub const fn minutes(self) -> i32 {
        self.minutes
    }

    /// Returns the number of seconds in this timespan.
    #[inline]
    pub const fn seconds(self) -> i32 {
        self.seconds
    }

    /// Returns true when every field is zero.
    #[inline]
    pub const fn is_zero(self) -> bool {
        self.years == 0
            && self.months == 0
            && self.days == 0
            && self.hours == 0
            && self.minutes == 0
            && self.seconds == 0
    }

    /// Returns true when this timespan represents a negative interval, that
    /// is, when any field is negative.
    #[inline]
    pub const fn is_negative(self) -> bool {
        self.years < 0
            || self.months < 0
            || self.days < 0
            || self.hours < 0
            || self.minutes < 0
            || self.seconds < 0
    }

    /// Returns this timespan with every field negated.
    ///
    /// This is also available via the `-` unary operator.
    #[inline]
    pub const fn negate(self) -> TimeSpan {
        TimeSpan {
            years: -self.years,
            months: -self.months,
            days: -self.days,
            hours: -self.hours,
            minutes: -self.minutes,
            seconds: -self.seconds,
        }
    }

    /// Returns the approximate total number of days in this timespan, using
    /// 1 year = 365 days and 1 month = 30 days.
    #[inline]
    pub const fn total_days(self) -> i64 {
        self.years as i64 * 365 + self.months as i64 * 30 + self.days as i64
    }

    /// Returns the approximate total number of hours in this timespan.
    #[inline]
    pub const fn total_hours(self) -> i64 {
        self.total_days() * 24 + self.hours as i64
    }

    /// Returns the approximate total number of minutes in this timespan.
    #[inline]
    pub const fn total_minutes(self) -> i64 {
        self.total_hours() * 60 + self.minutes as i64
    }

    /// Returns the approximate total number of seconds in this timespan.
    #[inline]
    pub const fn total_seconds(self) -> i64 {
        self.total_minutes() * 60 + self.seconds as i64
    }
}

/// Adds two timespans field-wise.
impl Add for TimeSpan {
    type Output = TimeSpan;

    fn add(self, rhs: TimeSpan) -> TimeSpan {
        TimeSpan {
            years: self.years + rhs.years,
            months: self.months + rhs.months,
            days: self.days + rhs.days,
            hours: self.hours + rhs.hours,
            minutes: self.minutes + rhs.minutes,
            seconds: self.seconds + rhs.seconds,
        }
    }
}

/// Subtracts two timespans field-wise.
impl Sub for TimeSpan {
    type Output = TimeSpan;

    fn sub(self, rhs: TimeSpan) -> TimeSpan {
        self + rhs.negate()
    }
}

impl Neg for TimeSpan {
    type Output = TimeSpan;

    fn neg(self) -> TimeSpan {
        self.negate()
    }
}

impl core::fmt::Display for TimeSpan {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "{}y {}m {}d {}h {}m {}s",
            self.years, self.months, self.days, self.hours, self.minutes, self.seconds,
        )
    }
}
