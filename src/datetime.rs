use crate::{
    backend,
    error::Error,
    fmt::{self, FormatStyle},
    span::TimeSpan,
    tz::{self, Offset},
    util::common::{
        days_in_month, saturate_day_in_month, to_epoch_days, YEAR_MAX,
        YEAR_MIN,
    },
};

/// The smallest epoch day of any representable datetime.
const EPOCH_DAYS_MIN: i32 = to_epoch_days(YEAR_MIN, 1, 1);

/// The biggest epoch day of any representable datetime.
const EPOCH_DAYS_MAX: i32 = to_epoch_days(YEAR_MAX, 12, 31);

const SECONDS_PER_DAY: i64 = 86_400;

/// A representation of a civil datetime in the Gregorian calendar, tagged
/// with an opaque time zone identifier.
///
/// A `DateTime` value corresponds to a sextuple of year, month, day, hour,
/// minute and second, along with the zone identifier string. Every
/// `DateTime` is guaranteed to hold a valid calendar date and a valid time
/// of day. For example, neither `2023-02-29` nor `10:61:00` can be
/// represented. The zone identifier is *not* interpreted at construction;
/// it is resolved through [`crate::tz`] whenever an absolute instant is
/// needed.
///
/// # Immutability
///
/// A `DateTime` is never mutated. Every operation that "changes" one,
/// including all arithmetic, produces a new value and leaves the original
/// untouched. Values are freely shareable across threads.
///
/// # Construction
///
/// All roads lead through [`DateTime::new`], which is the single validation
/// point for the invariants above. Parsing ([`DateTime::from_string`]),
/// epoch conversion ([`DateTime::from_millis`]), the current time
/// ([`DateTime::now`]), the builder ([`DateTime::builder`]) and every
/// arithmetic result are funneled through it.
///
/// # Arithmetic
///
/// Calendar arithmetic respects variable month lengths and leap years.
/// Adding months or years clamps the day to the target month when needed:
///
/// ```
/// use almanac::DateTime;
///
/// let dt = DateTime::new(2024, 1, 31, 0, 0, 0, "UTC")?;
/// let next = dt.add_months(1)?;
/// assert_eq!((next.year(), next.month(), next.day()), (2024, 2, 29));
/// # Ok::<(), almanac::Error>(())
/// ```
///
/// Day, minute and second arithmetic is exact and rolls across month and
/// year boundaries:
///
/// ```
/// use almanac::DateTime;
///
/// let dt = DateTime::new(2023, 12, 31, 23, 59, 30, "UTC")?;
/// let next = dt.add_seconds(45)?;
/// assert_eq!((next.year(), next.month(), next.day()), (2024, 1, 1));
/// assert_eq!((next.hour(), next.minute(), next.second()), (0, 0, 15));
/// # Ok::<(), almanac::Error>(())
/// ```
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct DateTime {
    year: i16,
    month: i8,
    day: i8,
    hour: i8,
    minute: i8,
    second: i8,
    zone: String,
}

impl DateTime {
    /// Creates a new `DateTime` from its components.
    ///
    /// This is the only validation point in the crate. Namely, all of the
    /// following must be true:
    ///
    /// * The year must be in the range `-9999..=9999`.
    /// * The month must be in the range `1..=12`.
    /// * The day must be at least `1` and at most the number of days in the
    /// corresponding month. So for example, `2024-02-29` is valid but
    /// `2023-02-29` is not.
    /// * The hour must be in `0..=23`, and the minute and second in
    /// `0..=59`.
    ///
    /// The zone identifier is stored opaquely and deliberately *not*
    /// resolved here; see the crate docs for the resolution model.
    ///
    /// # Example
    ///
    /// ```
    /// use almanac::DateTime;
    ///
    /// let dt = DateTime::new(2024, 2, 29, 12, 30, 0, "UTC")?;
    /// assert_eq!(dt.day(), 29);
    /// assert!(DateTime::new(2023, 2, 29, 12, 30, 0, "UTC").is_err());
    /// # Ok::<(), almanac::Error>(())
    /// ```
    pub fn new(
        year: i16,
        month: i8,
        day: i8,
        hour: i8,
        minute: i8,
        second: i8,
        zone: impl Into<String>,
    ) -> Result<DateTime, Error> {
        if !(YEAR_MIN..=YEAR_MAX).contains(&year) {
            return Err(Error::range("year", year, YEAR_MIN, YEAR_MAX));
        }
        if !(1..=12).contains(&month) {
            return Err(Error::range("month", month, 1, 12));
        }
        let max_day = days_in_month(year, month);
        if !(1..=max_day).contains(&day) {
            return Err(Error::day(day, year, month, max_day));
        }
        if !(0..=23).contains(&hour) {
            return Err(Error::range("hour", hour, 0, 23));
        }
        if !(0..=59).contains(&minute) {
            return Err(Error::range("minute", minute, 0, 59));
        }
        if !(0..=59).contains(&second) {
            return Err(Error::range("second", second, 0, 59));
        }
        Ok(DateTime { year, month, day, hour, minute, second, zone: zone.into() })
    }

    /// Returns the current moment in the system zone.
    ///
    /// The system zone is described by [`tz::system`].
    ///
    /// # Panics
    ///
    /// This panics when the system clock is set outside the supported year
    /// range of `-9999..=9999`. It is reasonable to expect the clock to be
    /// set to a somewhat sane, if imprecise, value.
    pub fn now() -> DateTime {
        DateTime::now_in(tz::system())
            .expect("system zone resolves and clock is in supported range")
    }

    /// Returns the current moment, converted to the given zone.
    ///
    /// This returns an error when the zone identifier cannot be resolved.
    pub fn now_in(zone: &str) -> Result<DateTime, Error> {
        DateTime::from_millis_in(system_millis(), zone)
    }

    /// Returns a builder for assembling a `DateTime` piecemeal, with unset
    /// fields defaulting to the current moment.
    pub fn builder() -> DateTimeBuilder {
        DateTimeBuilder::default()
    }

    /// Parses a datetime from a string, trying an ordered list of patterns.
    ///
    /// The patterns cover day-month-year and year-month-day orderings, two
    /// and four digit years, `/` and `-` delimiters, and optional time-of-
    /// day with or without fractional seconds. The first pattern that
    /// strictly matches the whole input wins, so ambiguous inputs are
    /// resolved positionally by pattern precedence (day first), never by
    /// locale inference.
    ///
    /// A match without a time-of-day is anchored at midnight in UTC, which
    /// keeps epoch conversion of date-only inputs deterministic. A match
    /// with a time-of-day is anchored in the system zone.
    ///
    /// # Example
    ///
    /// ```
    /// use almanac::DateTime;
    ///
    /// let dt = DateTime::from_string("25-12-23")?;
    /// assert_eq!((dt.year(), dt.month(), dt.day()), (2023, 12, 25));
    /// assert_eq!(dt.zone(), "UTC");
    /// assert!(DateTime::from_string("not a date").is_err());
    /// # Ok::<(), almanac::Error>(())
    /// ```
    pub fn from_string(input: &str) -> Result<DateTime, Error> {
        let parsed = fmt::parse::parse_any(input)?;
        let zone = if parsed.has_time { tz::system() } else { "UTC" };
        DateTime::new(
            parsed.year,
            parsed.month,
            parsed.day,
            parsed.hour,
            parsed.minute,
            parsed.second,
            zone,
        )
    }

    /// Converts epoch milliseconds to a datetime in UTC.
    ///
    /// Milliseconds within a second are truncated, since a `DateTime` has
    /// whole second precision.
    pub fn from_millis(millis: i64) -> Result<DateTime, Error> {
        DateTime::from_millis_with_offset(millis, Offset::UTC, "UTC")
    }

    /// Converts epoch milliseconds to a datetime in the given zone.
    ///
    /// This returns an error when the zone identifier cannot be resolved or
    /// when the resulting year falls outside the supported range.
    pub fn from_millis_in(millis: i64, zone: &str) -> Result<DateTime, Error> {
        let offset = tz::resolve(zone)?;
        DateTime::from_millis_with_offset(millis, offset, zone)
    }

    fn from_millis_with_offset(
        millis: i64,
        offset: Offset,
        zone: &str,
    ) -> Result<DateTime, Error> {
        let secs = millis.div_euclid(1000) + i64::from(offset.seconds());
        let days = secs.div_euclid(SECONDS_PER_DAY);
        let tod = secs.rem_euclid(SECONDS_PER_DAY) as i32;
        if days < i64::from(EPOCH_DAYS_MIN) || days > i64::from(EPOCH_DAYS_MAX)
        {
            return Err(Error::range(
                "epoch days",
                days,
                EPOCH_DAYS_MIN,
                EPOCH_DAYS_MAX,
            ));
        }
        let (year, month, day) = backend::from_epoch_days(days as i32);
        DateTime::new(
            year,
            month,
            day,
            (tod / 3600) as i8,
            ((tod / 60) % 60) as i8,
            (tod % 60) as i8,
            zone,
        )
    }

    /// Converts this datetime to epoch milliseconds, interpreting its wall
    /// clock time in its own zone.
    ///
    /// This returns an error when the zone identifier cannot be resolved.
    pub fn to_millis(&self) -> Result<i64, Error> {
        Ok(self.to_millis_with_offset(tz::resolve(&self.zone)?))
    }

    /// Converts this datetime to epoch milliseconds, interpreting its wall
    /// clock time in the given zone instead of its own.
    pub fn to_millis_in(&self, zone: &str) -> Result<i64, Error> {
        Ok(self.to_millis_with_offset(tz::resolve(zone)?))
    }

    /// Converts this datetime to epoch milliseconds, interpreting its wall
    /// clock time as UTC.
    pub fn to_millis_utc(&self) -> i64 {
        self.to_millis_with_offset(Offset::UTC)
    }

    fn to_millis_with_offset(&self, offset: Offset) -> i64 {
        let secs = i64::from(self.epoch_days()) * SECONDS_PER_DAY
            + i64::from(self.tod_seconds())
            - i64::from(offset.seconds());
        secs * 1000
    }

    /// Returns the year of this datetime, in `-9999..=9999`.
    #[inline]
    pub fn year(&self) -> i16 {
        self.year
    }

    /// Returns the month of this datetime, in `1..=12`.
    #[inline]
    pub fn month(&self) -> i8 {
        self.month
    }

    /// Returns the day of month of this datetime, in `1..=31`.
    #[inline]
    pub fn day(&self) -> i8 {
        self.day
    }

    /// Returns the hour of this datetime, in `0..=23`.
    #[inline]
    pub fn hour(&self) -> i8 {
        self.hour
    }

    /// Returns the minute of this datetime, in `0..=59`.
    #[inline]
    pub fn minute(&self) -> i8 {
        self.minute
    }

    /// Returns the second of this datetime, in `0..=59`.
    #[inline]
    pub fn second(&self) -> i8 {
        self.second
    }

    /// Returns the opaque zone identifier of this datetime.
    #[inline]
    pub fn zone(&self) -> &str {
        &self.zone
    }

    /// Returns the number of days in this datetime's month, accounting for
    /// leap years.
    #[inline]
    pub fn days_in_month(&self) -> i8 {
        days_in_month(self.year, self.month)
    }

    /// Returns a new datetime with the day set to the first day of the
    /// month. All other fields are unchanged.
    ///
    /// This operation is idempotent.
    pub fn first_of_month(&self) -> DateTime {
        DateTime { day: 1, ..self.clone() }
    }

    /// Returns a new datetime with the day set to the last day of the
    /// month. All other fields are unchanged.
    ///
    /// # Example
    ///
    /// ```
    /// use almanac::DateTime;
    ///
    /// let dt = DateTime::new(2024, 2, 10, 0, 0, 0, "UTC")?;
    /// assert_eq!(dt.last_of_month().day(), 29);
    /// # Ok::<(), almanac::Error>(())
    /// ```
    pub fn last_of_month(&self) -> DateTime {
        DateTime { day: self.days_in_month(), ..self.clone() }
    }

    /// Returns a new datetime shifted by the given number of days, which
    /// may be negative. The time of day and zone are carried through
    /// unchanged.
    ///
    /// This returns an error when the result falls outside the supported
    /// year range.
    pub fn add_days(&self, days: i64) -> Result<DateTime, Error> {
        let sum = i64::from(self.epoch_days()).saturating_add(days);
        if sum < i64::from(EPOCH_DAYS_MIN) || sum > i64::from(EPOCH_DAYS_MAX) {
            return Err(Error::range(
                "epoch days",
                sum,
                EPOCH_DAYS_MIN,
                EPOCH_DAYS_MAX,
            ));
        }
        let (year, month, day) = backend::from_epoch_days(sum as i32);
        DateTime::new(
            year,
            month,
            day,
            self.hour,
            self.minute,
            self.second,
            self.zone.clone(),
        )
    }

    /// Returns a new datetime shifted by the given number of months, which
    /// may be negative.
    ///
    /// When the target month is shorter than the current day of month, the
    /// day is clamped to the last day of the target month:
    /// `2024-01-31 + 1 month = 2024-02-29`. Because of clamping, this
    /// operation is not reversible in general.
    ///
    /// This returns an error when the result falls outside the supported
    /// year range.
    pub fn add_months(&self, months: i64) -> Result<DateTime, Error> {
        let (year, month, day) =
            shift_months(self.year, self.month, self.day, months)?;
        DateTime::new(
            year,
            month,
            day,
            self.hour,
            self.minute,
            self.second,
            self.zone.clone(),
        )
    }

    /// Returns a new datetime shifted by the given number of years, which
    /// may be negative.
    ///
    /// The day is clamped exactly as for [`DateTime::add_months`]:
    /// `2024-02-29 + 1 year = 2025-02-28`.
    pub fn add_years(&self, years: i64) -> Result<DateTime, Error> {
        self.add_months(years.saturating_mul(12))
    }

    /// Returns a new datetime shifted by the given number of minutes, which
    /// may be negative. Crossing a day boundary rolls the date correctly.
    pub fn add_minutes(&self, minutes: i64) -> Result<DateTime, Error> {
        self.shift_seconds(minutes.saturating_mul(60))
    }

    /// Returns a new datetime shifted by the given number of seconds, which
    /// may be negative. Crossing a day boundary rolls the date correctly.
    ///
    /// # Example
    ///
    /// ```
    /// use almanac::DateTime;
    ///
    /// let dt = DateTime::new(2024, 3, 1, 0, 0, 0, "UTC")?;
    /// let prev = dt.add_seconds(-1)?;
    /// assert_eq!((prev.month(), prev.day(), prev.second()), (2, 29, 59));
    /// # Ok::<(), almanac::Error>(())
    /// ```
    pub fn add_seconds(&self, seconds: i64) -> Result<DateTime, Error> {
        self.shift_seconds(seconds)
    }

    fn shift_seconds(&self, seconds: i64) -> Result<DateTime, Error> {
        let secs = (i64::from(self.epoch_days()) * SECONDS_PER_DAY
            + i64::from(self.tod_seconds()))
        .saturating_add(seconds);
        let days = secs.div_euclid(SECONDS_PER_DAY);
        let tod = secs.rem_euclid(SECONDS_PER_DAY) as i32;
        if days < i64::from(EPOCH_DAYS_MIN) || days > i64::from(EPOCH_DAYS_MAX)
        {
            return Err(Error::range(
                "epoch days",
                days,
                EPOCH_DAYS_MIN,
                EPOCH_DAYS_MAX,
            ));
        }
        let (year, month, day) = backend::from_epoch_days(days as i32);
        DateTime::new(
            year,
            month,
            day,
            (tod / 3600) as i8,
            ((tod / 60) % 60) as i8,
            (tod % 60) as i8,
            self.zone.clone(),
        )
    }

    /// Computes the signed calendar difference `self - other`.
    ///
    /// The difference is decomposed into years, months, days, hours,
    /// minutes and seconds, with days always smaller than the length of the
    /// relevant month. When `self` precedes `other` (comparing civil fields
    /// only, zones are ignored), every field of the result is negative.
    ///
    /// The decomposition round-trips: applying the six fields of the result
    /// as successive additions to `other` (years first, seconds last)
    /// reconstructs `self`'s civil fields exactly.
    ///
    /// # Example
    ///
    /// ```
    /// use almanac::DateTime;
    ///
    /// let a = DateTime::from_string("2023-01-01")?;
    /// let b = DateTime::from_string("2020-01-01")?;
    /// let span = a.time_span(&b);
    /// assert_eq!((span.years(), span.months(), span.days()), (3, 0, 0));
    /// assert_eq!(b.time_span(&a).years(), -3);
    /// # Ok::<(), almanac::Error>(())
    /// ```
    pub fn time_span(&self, other: &DateTime) -> TimeSpan {
        let negative = self.civil_key() < other.civil_key();
        let (lo, hi) = if negative { (self, other) } else { (other, self) };

        // When the later endpoint's time of day is earlier in the day, the
        // final day has not fully elapsed: borrow it into a sub-24h time
        // component.
        let (lo_tod, hi_tod) = (lo.tod_seconds(), hi.tod_seconds());
        let (day_borrow, duration) = if lo_tod > hi_tod {
            (1, hi_tod + (SECONDS_PER_DAY as i32) - lo_tod)
        } else {
            (0, hi_tod - lo_tod)
        };

        let lo_days = lo.epoch_days();
        let hi_days = hi.epoch_days();
        // The date distance is measured up to the last fully elapsed day.
        let (eff_year, eff_month, eff_day) =
            backend::from_epoch_days(hi_days - day_borrow);

        // Year/month decomposition of the date difference, borrowing one
        // month when the final month has not fully elapsed.
        let mut total_months = (i32::from(eff_year) - i32::from(lo.year)) * 12
            + i32::from(eff_month)
            - i32::from(lo.month);
        if total_months > 0 && eff_day < lo.day {
            total_months -= 1;
        }

        // The leftover days are measured from an anchor date. The anchor is
        // built from the endpoint that a reconstruction starts at (`other`),
        // applying years then months exactly as successive additions would,
        // so that day clamping cannot break the round-trip law.
        let (years, months, days) = loop {
            let years = total_months / 12;
            let months = total_months % 12;
            let days = if negative {
                let anchor = shift_years_months(hi, -years, -months);
                epoch_days_of(anchor) - lo_days - day_borrow
            } else {
                let anchor = shift_years_months(lo, years, months);
                (hi_days - day_borrow) - epoch_days_of(anchor)
            };
            // Day clamping can consume the day that the time component
            // borrowed. Give a month back when that happens.
            if days < 0 {
                total_months -= 1;
                continue;
            }
            break (years, months, days);
        };
        let span = TimeSpan::new(
            years,
            months,
            days,
            duration / 3600,
            (duration / 60) % 60,
            duration % 60,
        );
        if negative {
            span.negate()
        } else {
            span
        }
    }

    /// Formats this datetime in one of the two built-in styles.
    ///
    /// # Example
    ///
    /// ```
    /// use almanac::{DateTime, FormatStyle};
    ///
    /// let dt = DateTime::new(2023, 10, 4, 0, 0, 0, "UTC")?;
    /// assert_eq!(
    ///     dt.format_style(FormatStyle::Short { delimiter: '/' }),
    ///     "04/10/2023",
    /// );
    /// # Ok::<(), almanac::Error>(())
    /// ```
    pub fn format_style(&self, style: FormatStyle) -> String {
        fmt::format::format_style(self, style)
    }

    /// Formats this datetime through a custom pattern.
    ///
    /// See the [`crate::fmt`] module docs for the pattern language. A
    /// malformed pattern is reported as a format error carrying the
    /// pattern.
    pub fn format(&self, pattern: &str) -> Result<String, Error> {
        fmt::format::format(self, pattern)
    }

    fn epoch_days(&self) -> i32 {
        backend::to_epoch_days(self.year, self.month, self.day)
    }

    fn tod_seconds(&self) -> i32 {
        i32::from(self.hour) * 3600
            + i32::from(self.minute) * 60
            + i32::from(self.second)
    }

    /// The civil ordering key. Zones are deliberately not part of it.
    fn civil_key(&self) -> (i16, i8, i8, i8, i8, i8) {
        (self.year, self.month, self.day, self.hour, self.minute, self.second)
    }
}

impl core::fmt::Display for DateTime {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "{}-{:02}-{:02} {}:{}:{} {}",
            self.year,
            self.month,
            self.day,
            self.hour,
            self.minute,
            self.second,
            self.zone,
        )
    }
}

impl core::str::FromStr for DateTime {
    type Err = Error;

    fn from_str(s: &str) -> Result<DateTime, Error> {
        DateTime::from_string(s)
    }
}

/// Shifts a civil date by a number of months, clamping the day to the
/// target month's length.
fn shift_months(
    year: i16,
    month: i8,
    day: i8,
    months: i64,
) -> Result<(i16, i8, i8), Error> {
    let total = (i64::from(year) * 12 + i64::from(month) - 1)
        .saturating_add(months);
    let year = total.div_euclid(12);
    let month = (total.rem_euclid(12) + 1) as i8;
    if year < i64::from(YEAR_MIN) || year > i64::from(YEAR_MAX) {
        return Err(Error::range("year", year, YEAR_MIN, YEAR_MAX));
    }
    let year = year as i16;
    Ok((year, month, saturate_day_in_month(year, month, day)))
}

/// Applies years then months to a datetime's date, as two successive
/// clamping shifts. Used to anchor the timespan decomposition.
fn shift_years_months(dt: &DateTime, years: i32, months: i32) -> (i16, i8, i8) {
    let (year, month, day) =
        shift_months(dt.year, dt.month, dt.day, i64::from(years) * 12)
            .expect("timespan anchor stays within the supported year range");
    shift_months(year, month, day, i64::from(months))
        .expect("timespan anchor stays within the supported year range")
}

fn epoch_days_of((year, month, day): (i16, i8, i8)) -> i32 {
    backend::to_epoch_days(year, month, day)
}

fn system_millis() -> i64 {
    use std::time::{SystemTime, UNIX_EPOCH};

    match SystemTime::now().duration_since(UNIX_EPOCH) {
        Ok(elapsed) => elapsed.as_millis() as i64,
        // The clock is set before 1970. Unusual, but representable.
        Err(err) => -(err.duration().as_millis() as i64),
    }
}

/// A fluent builder for a [`DateTime`], with unset fields defaulting to the
/// current moment.
///
/// Only the date fields can be overridden; the time of day and the zone are
/// always taken from "now", mirroring the one-shot convenience this builder
/// exists for.
///
/// # Example
///
/// ```no_run
/// use almanac::DateTime;
///
/// // Same day and month as today, in 1999.
/// let dt = DateTime::builder().year(1999).build()?;
/// assert_eq!(dt.year(), 1999);
/// # Ok::<(), almanac::Error>(())
/// ```
#[derive(Clone, Debug, Default)]
pub struct DateTimeBuilder {
    year: Option<i16>,
    month: Option<i8>,
    day: Option<i8>,
}

impl DateTimeBuilder {
    /// Overrides the year.
    pub fn year(mut self, year: i16) -> DateTimeBuilder {
        self.year = Some(year);
        self
    }

    /// Overrides the month.
    pub fn month(mut self, month: i8) -> DateTimeBuilder {
        self.month = Some(month);
        self
    }

    /// Overrides the day of month.
    pub fn day(mut self, day: i8) -> DateTimeBuilder {
        self.day = Some(day);
        self
    }

    /// Builds the datetime, validating the combined fields.
    ///
    /// Note that combining overrides with "now" defaults can produce an
    /// invalid date (setting only `month = 2` on the 30th of the current
    /// month, say). Such combinations are reported as validation errors,
    /// never silently corrected.
    pub fn build(self) -> Result<DateTime, Error> {
        let now = DateTime::now();
        DateTime::new(
            self.year.unwrap_or(now.year),
            self.month.unwrap_or(now.month),
            self.day.unwrap_or(now.day),
            now.hour,
            now.minute,
            now.second,
            now.zone,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(input: &str) -> DateTime {
        DateTime::from_string(input).unwrap()
    }

    fn ymd(dt: &DateTime) -> (i16, i8, i8) {
        (dt.year(), dt.month(), dt.day())
    }

    #[test]
    fn construction_validates() {
        assert!(DateTime::new(2024, 2, 29, 0, 0, 0, "UTC").is_ok());
        for (year, month, day, hour, minute, second) in [
            (2023, 2, 29, 0, 0, 0),
            (2023, 0, 1, 0, 0, 0),
            (2023, 13, 1, 0, 0, 0),
            (2023, 1, 0, 0, 0, 0),
            (2023, 4, 31, 0, 0, 0),
            (2023, 1, 1, 24, 0, 0),
            (2023, 1, 1, 0, 60, 0),
            (2023, 1, 1, 0, 0, 60),
            (2023, 1, 1, -1, 0, 0),
            (10_000, 1, 1, 0, 0, 0),
        ] {
            let result =
                DateTime::new(year, month, day, hour, minute, second, "UTC");
            let err = result.unwrap_err();
            assert!(
                err.is_validation(),
                "expected validation error for \
                 {year}-{month}-{day} {hour}:{minute}:{second}",
            );
        }
    }

    #[test]
    fn parse_scenarios() {
        let dt = date("2023-12-25");
        assert_eq!((2023, 12, 25), ymd(&dt));
        assert_eq!((0, 0, 0), (dt.hour(), dt.minute(), dt.second()));
        // Date-only inputs anchor to UTC midnight.
        assert_eq!("UTC", dt.zone());

        // Two digit years resolve positionally, day first.
        assert_eq!((2023, 12, 25), ymd(&date("25-12-23")));

        // Inputs with a time of day anchor to the system zone.
        let dt = date("2023-12-25 14:30:45");
        assert_eq!((14, 30, 45), (dt.hour(), dt.minute(), dt.second()));
        assert_eq!(crate::tz::system(), dt.zone());

        let err = DateTime::from_string("invalid-date").unwrap_err();
        assert!(err.is_parse());

        // Shape-valid but calendar-invalid input fails validation, not
        // parsing.
        let err = DateTime::from_string("30-02-2023").unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn first_and_last_of_month() {
        let dt = date("2023-02-15");
        assert_eq!(1, dt.first_of_month().day());
        assert_eq!(28, dt.last_of_month().day());
        assert_eq!(29, date("2024-02-10").last_of_month().day());
        // Idempotence.
        assert_eq!(dt.first_of_month(), dt.first_of_month().first_of_month());
        assert_eq!(dt.last_of_month(), dt.last_of_month().last_of_month());
        // Other fields carried through.
        let dt = DateTime::new(2023, 2, 15, 13, 14, 15, "UTC").unwrap();
        let first = dt.first_of_month();
        assert_eq!((13, 14, 15), (first.hour(), first.minute(), first.second()));
    }

    #[test]
    fn add_days() {
        let dt = date("2023-01-01");
        assert_eq!((2023, 1, 11), ymd(&dt.add_days(10).unwrap()));
        assert_eq!((2022, 12, 31), ymd(&dt.add_days(-1).unwrap()));
        assert_eq!((2024, 1, 1), ymd(&dt.add_days(365).unwrap()));
        // 2024 is a leap year.
        assert_eq!((2025, 1, 1), ymd(&date("2024-01-01").add_days(366).unwrap()));
        assert!(dt.add_days(100_000_000).unwrap_err().is_validation());
        assert!(dt.add_days(i64::MAX).unwrap_err().is_validation());
    }

    #[test]
    fn add_months_clamps() {
        let dt = date("2023-01-15");
        assert_eq!((2023, 3, 15), ymd(&dt.add_months(2).unwrap()));
        assert_eq!((2022, 11, 15), ymd(&dt.add_months(-2).unwrap()));

        let dt = date("2024-01-31");
        assert_eq!((2024, 2, 29), ymd(&dt.add_months(1).unwrap()));
        assert_eq!((2023, 2, 28), ymd(&date("2023-01-31").add_months(1).unwrap()));
        assert_eq!((2024, 4, 30), ymd(&dt.add_months(3).unwrap()));
        // Clamping is not reversible.
        assert_eq!(
            (2024, 1, 29),
            ymd(&dt.add_months(1).unwrap().add_months(-1).unwrap()),
        );
        assert!(dt.add_months(200_000).unwrap_err().is_validation());
    }

    #[test]
    fn add_years_clamps() {
        let dt = date("2024-02-29");
        assert_eq!((2025, 2, 28), ymd(&dt.add_years(1).unwrap()));
        assert_eq!((2028, 2, 29), ymd(&dt.add_years(4).unwrap()));
        assert_eq!((2023, 2, 28), ymd(&dt.add_years(-1).unwrap()));
        assert!(dt.add_years(8000).unwrap_err().is_validation());
    }

    #[test]
    fn add_minutes_and_seconds_roll_the_date() {
        let dt = DateTime::new(2023, 12, 31, 23, 59, 30, "UTC").unwrap();
        let next = dt.add_seconds(45).unwrap();
        assert_eq!((2024, 1, 1), ymd(&next));
        assert_eq!((0, 0, 15), (next.hour(), next.minute(), next.second()));

        let next = dt.add_minutes(1).unwrap();
        assert_eq!((2024, 1, 1), ymd(&next));
        assert_eq!((0, 0, 30), (next.hour(), next.minute(), next.second()));

        let prev = date("2024-03-01").add_seconds(-1).unwrap();
        assert_eq!((2024, 2, 29), ymd(&prev));
        assert_eq!((23, 59, 59), (prev.hour(), prev.minute(), prev.second()));

        // Time arithmetic carries the zone through.
        assert_eq!(dt.zone(), next.zone());
    }

    #[test]
    fn epoch_conversion() {
        assert_eq!(0, date("1970-01-01").to_millis_utc());
        assert_eq!(
            86_400_000,
            date("1970-01-02").to_millis_utc(),
        );
        assert_eq!(-86_400_000, date("1969-12-31").to_millis_utc());

        let dt = DateTime::from_millis(0).unwrap();
        assert_eq!((1970, 1, 1), ymd(&dt));
        assert_eq!("UTC", dt.zone());

        // Sub-second precision truncates.
        assert_eq!((1970, 1, 1), ymd(&DateTime::from_millis(999).unwrap()));

        // A fixed offset zone shifts the wall clock.
        let dt = DateTime::from_millis_in(0, "+05:30").unwrap();
        assert_eq!((1970, 1, 1), ymd(&dt));
        assert_eq!((5, 30, 0), (dt.hour(), dt.minute(), dt.second()));
        assert_eq!(0, dt.to_millis().unwrap());

        // Interpreting the same wall clock in another zone moves the
        // instant.
        let utc = date("2023-10-04");
        assert_eq!(
            utc.to_millis_utc() + 3 * 3600 * 1000,
            utc.to_millis_in("-03:00").unwrap(),
        );

        assert!(DateTime::from_millis_in(0, "Pluto/Somewhere")
            .unwrap_err()
            .is_validation());
        assert!(DateTime::from_millis(i64::MAX).unwrap_err().is_validation());
    }

    #[test]
    fn epoch_round_trip() {
        for input in
            ["2023-10-04", "1969-07-20", "2024-02-29", "25-12-2023 14:30:45"]
        {
            let dt = date(input);
            let millis = dt.to_millis().unwrap();
            let got = DateTime::from_millis_in(millis, dt.zone()).unwrap();
            assert_eq!(dt, got, "for input {input:?}");
        }
    }

    #[test]
    fn time_span_whole_years() {
        let span = date("2023-01-01").time_span(&date("2020-01-01"));
        assert_eq!(TimeSpan::new(3, 0, 0, 0, 0, 0), span);
        let span = date("2020-01-01").time_span(&date("2023-01-01"));
        assert_eq!(TimeSpan::new(-3, 0, 0, 0, 0, 0), span);
    }

    #[test]
    fn time_span_equal_inputs_are_zero() {
        let dt = DateTime::new(2023, 6, 15, 12, 30, 45, "UTC").unwrap();
        assert_eq!(TimeSpan::ZERO, dt.time_span(&dt));
    }

    #[test]
    fn time_span_borrows_a_day_for_time_of_day() {
        // Less than a full day elapsed: days must be 0 with a sub-24h time
        // component, not 1 day with a negative-looking time.
        let a = DateTime::new(2023, 1, 2, 0, 30, 0, "UTC").unwrap();
        let b = DateTime::new(2023, 1, 1, 23, 0, 0, "UTC").unwrap();
        assert_eq!(TimeSpan::new(0, 0, 0, 1, 30, 0), a.time_span(&b));
        assert_eq!(TimeSpan::new(0, 0, 0, -1, -30, 0), b.time_span(&a));
    }

    #[test]
    fn time_span_borrows_across_month_boundaries() {
        let span = date("2023-03-01").time_span(&date("2023-01-31"));
        assert_eq!(TimeSpan::new(0, 1, 1, 0, 0, 0), span);

        let span = date("2023-04-15").time_span(&date("2019-02-22"));
        assert_eq!(TimeSpan::new(4, 1, 24, 0, 0, 0), span);
    }

    #[test]
    fn time_span_mixed_date_and_time() {
        let a = DateTime::new(2024, 3, 10, 8, 0, 30, "UTC").unwrap();
        let b = DateTime::new(2023, 12, 25, 14, 30, 45, "UTC").unwrap();
        let span = a.time_span(&b);
        assert_eq!(
            TimeSpan::new(0, 2, 13, 17, 29, 45),
            span,
        );
        // Reconstruct a from b.
        let got = b
            .add_years(i64::from(span.years()))
            .unwrap()
            .add_months(i64::from(span.months()))
            .unwrap()
            .add_days(i64::from(span.days()))
            .unwrap()
            .add_minutes(i64::from(span.hours()) * 60 + i64::from(span.minutes()))
            .unwrap()
            .add_seconds(i64::from(span.seconds()))
            .unwrap();
        assert_eq!(a, got);
    }

    #[test]
    fn builder_overrides() {
        let dt = DateTime::builder()
            .year(1999)
            .month(12)
            .day(31)
            .build()
            .unwrap();
        assert_eq!((1999, 12, 31), ymd(&dt));
        // Time of day and zone come from now; just sanity check the zone.
        assert_eq!(crate::tz::system(), dt.zone());
    }

    #[test]
    fn display() {
        let dt = DateTime::new(2023, 10, 4, 9, 5, 7, "UTC").unwrap();
        assert_eq!("2023-10-04 9:5:7 UTC", dt.to_string());
    }

    #[test]
    fn from_str_impl() {
        let dt: DateTime = "2023-12-25".parse().unwrap();
        assert_eq!((2023, 12, 25), ymd(&dt));
    }

    impl quickcheck::Arbitrary for DateTime {
        fn arbitrary(g: &mut quickcheck::Gen) -> DateTime {
            // Roughly 1643 years on either side of the epoch.
            let days = i32::arbitrary(g).rem_euclid(1_200_000) - 600_000;
            let tod = u32::arbitrary(g) % 86_400;
            let (year, month, day) = crate::util::common::from_epoch_days(days);
            DateTime::new(
                year,
                month,
                day,
                (tod / 3600) as i8,
                ((tod / 60) % 60) as i8,
                (tod % 60) as i8,
                "UTC",
            )
            .unwrap()
        }
    }

    quickcheck::quickcheck! {
        fn prop_time_span_reconstructs(a: DateTime, b: DateTime) -> bool {
            let span = a.time_span(&b);
            let got = b
                .add_years(i64::from(span.years()))
                .unwrap()
                .add_months(i64::from(span.months()))
                .unwrap()
                .add_days(i64::from(span.days()))
                .unwrap()
                .add_minutes(
                    i64::from(span.hours()) * 60 + i64::from(span.minutes()),
                )
                .unwrap()
                .add_seconds(i64::from(span.seconds()))
                .unwrap();
            got == a
        }

        fn prop_time_span_single_sign(a: DateTime, b: DateTime) -> bool {
            let span = a.time_span(&b);
            let fields = [
                span.years(),
                span.months(),
                span.days(),
                span.hours(),
                span.minutes(),
                span.seconds(),
            ];
            fields.iter().all(|&f| f >= 0) || fields.iter().all(|&f| f <= 0)
        }

        fn prop_epoch_millis_round_trip(a: DateTime) -> bool {
            let millis = a.to_millis_utc();
            DateTime::from_millis(millis).unwrap() == a
        }

        fn prop_first_of_month_idempotent(a: DateTime) -> bool {
            a.first_of_month() == a.first_of_month().first_of_month()
        }

        fn prop_add_days_inverts(a: DateTime, days: i32) -> bool {
            let days = i64::from(days % 1_000);
            let there = a.add_days(days).unwrap();
            there.add_days(-days).unwrap() == a
        }
    }
}
