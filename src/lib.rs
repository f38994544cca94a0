/*!
Almanac is a civil datetime value library.

The central type is [`DateTime`]: an immutable value holding a Gregorian
calendar date, a wall clock time and an opaque time zone identifier. A
`DateTime` can be built from heterogeneous textual inputs via
[`DateTime::from_string`], from epoch milliseconds via
[`DateTime::from_millis`], from the system clock via [`DateTime::now`] or
piecemeal via [`DateTime::builder`]. Arithmetic on a `DateTime` always
produces a new value and is calendar correct with respect to variable month
lengths and leap years.

The signed calendar difference between two datetimes is a [`TimeSpan`], and
a closed interval between two datetimes is a [`DateTimeRange`].

# Example

```
use almanac::DateTime;

let dt = DateTime::from_string("2023-12-25")?;
assert_eq!((dt.year(), dt.month(), dt.day()), (2023, 12, 25));

let later = dt.add_days(10)?;
assert_eq!((later.year(), later.month(), later.day()), (2024, 1, 4));

let span = later.time_span(&dt);
assert_eq!(span.days(), 10);
# Ok::<(), almanac::Error>(())
```

# Time zones

This crate does not ship a time zone database. Zone identifiers are opaque
strings resolved through the process-wide [`tz::ZoneResolver`], which by
default understands `UTC`/`GMT`/`Z` and fixed offset spellings like
`+05:30` or `UTC-03`. Embedders that need named IANA zones can install
their own resolver once at startup with [`tz::set_resolver`]. Instants made
ambiguous by DST transitions are out of scope for this crate.
*/

#![deny(rustdoc::broken_intra_doc_links)]
// We generally want all types to impl Debug.
#![warn(missing_debug_implementations)]

pub use crate::{
    datetime::{DateTime, DateTimeBuilder},
    error::Error,
    fmt::FormatStyle,
    range::{DateTimeRange, DateTimeRangeBuilder},
    span::TimeSpan,
};

#[macro_use]
mod logging;

mod backend;
mod datetime;
mod error;
mod fmt;
mod range;
mod span;
pub mod tz;
mod util;
