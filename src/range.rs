use crate::{datetime::DateTime, error::Error, span::TimeSpan};

/// An inclusive range between two datetimes.
///
/// A range is always well formed: construction fails when the start comes
/// after the end. Both endpoints are compared as absolute instants, so the
/// zone identifiers of the endpoints are resolved once, at construction
/// time, and the resulting epoch milliseconds are cached for the lifetime
/// of the range. Queries like [`DateTimeRange::contains`] and
/// [`DateTimeRange::overlaps`] never re-resolve the endpoints.
///
/// # Example
///
/// ```
/// use almanac::{DateTime, DateTimeRange};
///
/// let january = DateTimeRange::new(
///     DateTime::from_string("2023-01-01")?,
///     DateTime::from_string("2023-01-31")?,
/// )?;
/// assert!(january.contains(&DateTime::from_string("2023-01-15")?)?);
/// assert!(!january.contains(&DateTime::from_string("2023-02-01")?)?);
/// # Ok::<(), almanac::Error>(())
/// ```
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct DateTimeRange {
    start: DateTime,
    end: DateTime,
    start_millis: i64,
    end_millis: i64,
}

impl DateTimeRange {
    /// Creates a new range from its endpoints.
    ///
    /// This returns an error when either endpoint's zone identifier cannot
    /// be resolved, or when the start instant comes strictly after the end
    /// instant. Equal endpoints form a valid single-instant range.
    pub fn new(start: DateTime, end: DateTime) -> Result<DateTimeRange, Error> {
        let start_millis = start.to_millis()?;
        let end_millis = end.to_millis()?;
        if start_millis > end_millis {
            return Err(Error::range_order(start_millis, end_millis));
        }
        Ok(DateTimeRange { start, end, start_millis, end_millis })
    }

    /// Returns a builder for assembling a range with defaults anchored at
    /// the current moment.
    pub fn builder() -> DateTimeRangeBuilder {
        DateTimeRangeBuilder::default()
    }

    /// Returns the starting endpoint of this range.
    #[inline]
    pub fn start(&self) -> &DateTime {
        &self.start
    }

    /// Returns the ending endpoint of this range.
    #[inline]
    pub fn end(&self) -> &DateTime {
        &self.end
    }

    /// Returns true when the given datetime falls within this range,
    /// endpoints included.
    ///
    /// The datetime is compared as an absolute instant, so this returns an
    /// error when its zone identifier cannot be resolved.
    pub fn contains(&self, dt: &DateTime) -> Result<bool, Error> {
        let millis = dt.to_millis()?;
        Ok(self.start_millis <= millis && millis <= self.end_millis)
    }

    /// Returns true when this range and the given range share at least one
    /// instant. Touching at a single endpoint counts as overlap.
    pub fn overlaps(&self, other: &DateTimeRange) -> bool {
        self.start_millis <= other.end_millis
            && other.start_millis <= self.end_millis
    }

    /// Returns the calendar difference between the endpoints, decomposed as
    /// by [`DateTime::time_span`].
    ///
    /// `time_span` compares civil fields and ignores zones, while endpoint
    /// order is validated by instant. A range whose endpoints are written
    /// in different zones can therefore have its civil fields out of order
    /// and a negative span.
    pub fn span(&self) -> TimeSpan {
        self.end.time_span(&self.start)
    }
}

impl core::fmt::Display for DateTimeRange {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "[{} - {}]", self.start, self.end)
    }
}

/// A fluent builder for a [`DateTimeRange`].
///
/// An unset start defaults to the current moment; an unset end defaults to
/// one day after the start.
///
/// # Example
///
/// ```no_run
/// use almanac::DateTimeRange;
///
/// // The 24 hours starting now.
/// let range = DateTimeRange::builder().starting_now().build()?;
/// assert_eq!(1, range.span().days());
/// # Ok::<(), almanac::Error>(())
/// ```
#[derive(Clone, Debug, Default)]
pub struct DateTimeRangeBuilder {
    start: Option<DateTime>,
    end: Option<DateTime>,
}

impl DateTimeRangeBuilder {
    /// Sets the starting endpoint.
    pub fn from(mut self, start: DateTime) -> DateTimeRangeBuilder {
        self.start = Some(start);
        self
    }

    /// Sets the ending endpoint.
    pub fn to(mut self, end: DateTime) -> DateTimeRangeBuilder {
        self.end = Some(end);
        self
    }

    /// Sets the starting endpoint to the current moment.
    pub fn starting_now(self) -> DateTimeRangeBuilder {
        self.from(DateTime::now())
    }

    /// Sets the ending endpoint to the current moment.
    pub fn ending_now(self) -> DateTimeRangeBuilder {
        self.to(DateTime::now())
    }

    /// Builds the range, applying defaults and validating endpoint order.
    pub fn build(self) -> Result<DateTimeRange, Error> {
        let start = match self.start {
            Some(start) => start,
            None => DateTime::now(),
        };
        let end = match self.end {
            Some(end) => end,
            None => start.add_days(1)?,
        };
        DateTimeRange::new(start, end)
    }
}
