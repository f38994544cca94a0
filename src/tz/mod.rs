/*!
Routines for resolving opaque time zone identifiers to UTC offsets.

This crate does not implement a time zone database. A [`DateTime`] carries
its zone as an opaque string, and whenever an absolute instant is needed
(epoch conversion, range queries), the identifier is resolved through a
process-wide [`ZoneResolver`].

The default resolver understands `UTC`, `GMT`, `UT`, `Z` and fixed offset
spellings such as `+05:30`, `-0330`, `UTC-03` or `GMT+02:00`. That is enough
for every operation in this crate to be deterministic. Embedders that need
named IANA zones (with their DST rules) can install their own resolver with
[`set_resolver`] before the first resolution happens.

[`DateTime`]: crate::DateTime
*/

use std::sync::OnceLock;

use crate::error::Error;

/// A time zone offset from UTC, with second precision.
///
/// The sign convention matches ISO 8601: positive offsets are east of the
/// prime meridian. The magnitude is limited to strictly less than 24 hours.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub struct Offset {
    seconds: i32,
}

impl Offset {
    /// The offset of UTC itself, i.e., no offset at all.
    pub const UTC: Offset = Offset { seconds: 0 };

    const MAX_SECONDS: i32 = 24 * 60 * 60 - 1;

    /// Creates an offset from a number of seconds east (positive) or west
    /// (negative) of UTC.
    ///
    /// This returns an error when the magnitude is 24 hours or more.
    pub fn from_seconds(seconds: i32) -> Result<Offset, Error> {
        if seconds < -Offset::MAX_SECONDS || seconds > Offset::MAX_SECONDS {
            return Err(Error::range(
                "offset seconds",
                seconds,
                -Offset::MAX_SECONDS,
                Offset::MAX_SECONDS,
            ));
        }
        Ok(Offset { seconds })
    }

    /// Returns this offset as a number of seconds east (positive) or west
    /// (negative) of UTC.
    #[inline]
    pub fn seconds(self) -> i32 {
        self.seconds
    }
}

impl core::fmt::Display for Offset {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        let sign = if self.seconds < 0 { '-' } else { '+' };
        let secs = self.seconds.unsigned_abs();
        let (hours, mins, secs) = (secs / 3600, (secs / 60) % 60, secs % 60);
        if secs == 0 {
            write!(f, "{sign}{hours:02}:{mins:02}")
        } else {
            write!(f, "{sign}{hours:02}:{mins:02}:{secs:02}")
        }
    }
}

/// A read-only source of truth for turning zone identifiers into offsets.
///
/// Implementations must be deterministic: resolving the same identifier
/// twice must produce the same offset. (DST-aware resolution against an
/// instant is explicitly out of scope for this crate.)
pub trait ZoneResolver: Send + Sync + 'static {
    /// Resolves the given zone identifier to a UTC offset.
    ///
    /// An unknown identifier must be reported as an error, never silently
    /// mapped to UTC. [`Error::time_zone`] builds a suitable error.
    fn resolve(&self, id: &str) -> Result<Offset, Error>;
}

/// The resolver used when the embedder doesn't install one: fixed offset
/// spellings only.
#[derive(Debug)]
struct FixedOffsetResolver;

impl ZoneResolver for FixedOffsetResolver {
    fn resolve(&self, id: &str) -> Result<Offset, Error> {
        parse_fixed_offset(id).ok_or_else(|| Error::time_zone(id))
    }
}

/// Parses `UTC`, `GMT`, `UT`, `Z` and fixed offset spellings.
///
/// Accepted offset forms, optionally preceded by one of the names above:
/// `+H`, `+HH`, `+HH:MM`, `+HHMM`, `+HH:MM:SS`. Returns `None` for anything
/// else.
fn parse_fixed_offset(id: &str) -> Option<Offset> {
    if matches!(id, "Z" | "z" | "UTC" | "GMT" | "UT") {
        return Some(Offset::UTC);
    }
    let rest = id
        .strip_prefix("UTC")
        .or_else(|| id.strip_prefix("GMT"))
        .or_else(|| id.strip_prefix("UT"))
        .unwrap_or(id);
    let (sign, rest): (i32, &str) = match rest.as_bytes().first()? {
        b'+' => (1, &rest[1..]),
        b'-' => (-1, &rest[1..]),
        _ => return None,
    };
    let digit_len = rest.bytes().take_while(|b| b.is_ascii_digit()).count();
    let (hours, mins, secs): (u32, u32, u32) = match digit_len {
        // +H or +HH
        1 | 2 if digit_len == rest.len() => (rest.parse().ok()?, 0, 0),
        // +HH:MM or +HH:MM:SS
        2 => {
            let hours = rest[..2].parse().ok()?;
            let tail = rest[2..].strip_prefix(':')?;
            match tail.split_once(':') {
                None => (hours, parse_two_digits(tail)?, 0),
                Some((mins, secs)) => {
                    (hours, parse_two_digits(mins)?, parse_two_digits(secs)?)
                }
            }
        }
        // +HHMM
        4 if digit_len == rest.len() => {
            (rest[..2].parse().ok()?, rest[2..4].parse().ok()?, 0)
        }
        _ => return None,
    };
    if hours > 23 || mins > 59 || secs > 59 {
        return None;
    }
    let seconds = (hours * 3600 + mins * 60 + secs) as i32;
    Offset::from_seconds(sign * seconds).ok()
}

fn parse_two_digits(s: &str) -> Option<u32> {
    if s.len() != 2 || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

static RESOLVER: OnceLock<Box<dyn ZoneResolver>> = OnceLock::new();

/// Installs the process-wide zone resolver.
///
/// This may be called at most once, before any operation that resolves a
/// zone identifier. Returns false (and changes nothing) when a resolver is
/// already in place, including the default one if resolution has already
/// happened.
pub fn set_resolver(resolver: Box<dyn ZoneResolver>) -> bool {
    RESOLVER.set(resolver).is_ok()
}

/// Resolves a zone identifier through the process-wide resolver.
pub(crate) fn resolve(id: &str) -> Result<Offset, Error> {
    let resolver = RESOLVER.get_or_init(|| {
        debug!("no zone resolver installed, using fixed offset resolver");
        Box::new(FixedOffsetResolver)
    });
    resolver.resolve(id).map_err(|err| {
        if err.is_time_zone() {
            err
        } else {
            err.context(Error::time_zone(id))
        }
    })
}

static SYSTEM: OnceLock<Box<str>> = OnceLock::new();

/// Returns the system zone identifier.
///
/// This is taken from the `TZ` environment variable when it is set and
/// resolvable by the process-wide resolver, and is `UTC` otherwise. The
/// value is determined once and cached for the lifetime of the process.
pub fn system() -> &'static str {
    SYSTEM.get_or_init(|| match std::env::var("TZ") {
        Ok(tz) if resolve(&tz).is_ok() => tz.into(),
        Ok(tz) => {
            warn!("TZ={tz} is not resolvable, using UTC as the system zone");
            "UTC".into()
        }
        Err(_) => "UTC".into(),
    })
}
