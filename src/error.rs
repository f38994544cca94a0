use std::fmt;

/// An error that can occur in this crate.
///
/// There is only one error type for all operations. Errors fall into three
/// broad categories, reflected by the [`Error::is_validation`],
/// [`Error::is_parse`] and [`Error::is_format`] predicates:
///
/// * Validation errors: an invalid month, day or time-of-day at construction,
/// an unresolvable time zone identifier, an arithmetic result outside the
/// supported year range, or a range whose start comes after its end.
/// * Parse errors: no pattern in the ordered pattern list matched the input
/// text. The offending text is carried in the error message.
/// * Format errors: a custom formatting pattern was malformed.
///
/// No operation retries or silently corrects anything. Every failure is
/// reported to the caller immediately through this type.
#[derive(Clone)]
pub struct Error {
    /// The internal representation of an error.
    ///
    /// Boxed to keep the size of `Error` (and thus of every `Result` in this
    /// crate) down to one word.
    inner: Box<ErrorInner>,
}

#[derive(Clone, Debug)]
struct ErrorInner {
    kind: ErrorKind,
    cause: Option<Error>,
}

#[derive(Clone, Debug)]
enum ErrorKind {
    /// A unit with a fixed legal range had a value outside of it. Covers
    /// year, month, hour, minute and second validation as well as arithmetic
    /// overflow past the supported year range.
    Range { what: &'static str, given: i64, min: i64, max: i64 },
    /// A day that does not exist in its year-month. Split out from `Range`
    /// because the legal maximum depends on the year and month.
    Day { given: i64, year: i16, month: i8, max: i8 },
    /// A zone identifier the process-wide resolver could not resolve.
    TimeZone { id: Box<str> },
    /// No parse pattern matched the input.
    Parse { input: Box<str> },
    /// A malformed custom format pattern.
    Format { pattern: Box<str> },
    /// A range constructed with its endpoints out of order.
    RangeOrder { start_millis: i64, end_millis: i64 },
}

impl Error {
    /// Returns true when this error came from validating a civil datetime
    /// component, resolving a time zone identifier, an arithmetic overflow
    /// or an out-of-order range.
    pub fn is_validation(&self) -> bool {
        use self::ErrorKind::*;
        matches!(
            self.inner.kind,
            Range { .. } | Day { .. } | TimeZone { .. } | RangeOrder { .. }
        )
    }

    /// Returns true when this error came from a string that matched none of
    /// the parse patterns.
    pub fn is_parse(&self) -> bool {
        matches!(self.inner.kind, ErrorKind::Parse { .. })
    }

    /// Returns true when this error came from a malformed custom format
    /// pattern.
    pub fn is_format(&self) -> bool {
        matches!(self.inner.kind, ErrorKind::Format { .. })
    }

    /// Returns true when this error already reports an unresolvable time
    /// zone identifier. Used to avoid double-wrapping resolver failures.
    pub(crate) fn is_time_zone(&self) -> bool {
        matches!(self.inner.kind, ErrorKind::TimeZone { .. })
    }
}

impl Error {
    /// Creates a new error indicating that a `given` value is out of the
    /// specified `min..=max` range. The given `what` label is used in the
    /// error message as a human readable description of what exactly is out
    /// of range. (e.g., "month")
    #[inline(never)]
    #[cold]
    pub(crate) fn range(
        what: &'static str,
        given: impl Into<i64>,
        min: impl Into<i64>,
        max: impl Into<i64>,
    ) -> Error {
        Error::from(ErrorKind::Range {
            what,
            given: given.into(),
            min: min.into(),
            max: max.into(),
        })
    }

    /// Creates a new error indicating that a day does not exist in the given
    /// year and month.
    #[inline(never)]
    #[cold]
    pub(crate) fn day(
        given: impl Into<i64>,
        year: i16,
        month: i8,
        max: i8,
    ) -> Error {
        Error::from(ErrorKind::Day { given: given.into(), year, month, max })
    }

    /// Creates a new error indicating that the given zone identifier could
    /// not be resolved to an offset.
    ///
    /// This is the one public constructor, provided so that embedders
    /// implementing [`ZoneResolver`](crate::tz::ZoneResolver) can report
    /// identifiers they don't know.
    #[inline(never)]
    #[cold]
    pub fn time_zone(id: &str) -> Error {
        Error::from(ErrorKind::TimeZone { id: id.into() })
    }

    /// Creates a new error indicating that no parse pattern matched the
    /// given input.
    #[inline(never)]
    #[cold]
    pub(crate) fn parse(input: &str) -> Error {
        Error::from(ErrorKind::Parse { input: input.into() })
    }

    /// Creates a new error indicating that the given custom format pattern
    /// is malformed.
    #[inline(never)]
    #[cold]
    pub(crate) fn format(pattern: &str) -> Error {
        Error::from(ErrorKind::Format { pattern: pattern.into() })
    }

    /// Creates a new error indicating that a range was constructed with a
    /// start strictly after its end.
    #[inline(never)]
    #[cold]
    pub(crate) fn range_order(start_millis: i64, end_millis: i64) -> Error {
        Error::from(ErrorKind::RangeOrder { start_millis, end_millis })
    }

    /// Attaches `self` as the cause of `err` and returns `err`.
    ///
    /// This is used to chain a lower level failure (say, from the zone
    /// resolver) to the higher level error actually surfaced to callers.
    pub(crate) fn context(self, err: Error) -> Error {
        let mut err = err;
        err.inner.cause = Some(self);
        err
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Error {
        Error { inner: Box::new(ErrorInner { kind, cause: None }) }
    }
}

impl std::error::Error for Error {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use self::ErrorKind::*;

        match self.inner.kind {
            Range { what, given, min, max } => {
                write!(
                    f,
                    "parameter '{what}' with value {given} \
                     is not in the required range of {min}..={max}",
                )?;
            }
            Day { given, year, month, max } => {
                write!(
                    f,
                    "day {given} does not exist in year {year} and \
                     month {month} (which has {max} days)",
                )?;
            }
            TimeZone { ref id } => {
                write!(f, "failed to resolve time zone identifier '{id}'")?;
            }
            Parse { ref input } => {
                write!(f, "no date-time pattern matched '{input}'")?;
            }
            Format { ref pattern } => {
                write!(f, "invalid format pattern '{pattern}'")?;
            }
            RangeOrder { start_millis, end_millis } => {
                write!(
                    f,
                    "range start ({start_millis}ms) must be prior or equal \
                     to range end ({end_millis}ms)",
                )?;
            }
        }
        if let Some(ref cause) = self.inner.cause {
            write!(f, ": {cause}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if f.alternate() {
            f.debug_struct("Error")
                .field("kind", &self.inner.kind)
                .field("cause", &self.inner.cause)
                .finish()
        } else {
            fmt::Display::fmt(self, f)
        }
    }
}
