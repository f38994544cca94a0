use crate::{
    error::Error,
    fmt::{compile, Piece},
};

/// The ordered list of patterns tried by `DateTime::from_string`.
///
/// Order matters: the first pattern that strictly matches the whole input
/// wins. Ambiguous inputs like `01-02-2023` are therefore resolved
/// positionally (day first) by pattern precedence, never by locale
/// inference.
const PATTERNS: &[&str] = &[
    "dd/MM/yyyy",
    "dd-MM-yyyy",
    "dd-MM-yy",
    "yyyy-MM-dd",
    "d-M-yyyy",
    "yyyy-M-d",
    "dd-MM-yyyy HH:mm:ss",
    "dd-MM-yyyy HH:mm",
    "yyyy-MM-dd HH:mm:ss",
    "yyyy-MM-dd HH:mm",
    "yyyy-MM-dd'T'HH:mm:ss.SSSSSS",
    "yyyy-MM-dd'T'HH:mm:ss.SSS",
    "yyyy-MM-dd'T'HH:mm:ss",
];

/// The raw fields recovered from one successful pattern match.
///
/// Values are as written in the input. Range validation is not this type's
/// job; everything is funneled through `DateTime::new` by the caller.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct Parsed {
    pub(crate) year: i16,
    pub(crate) month: i8,
    pub(crate) day: i8,
    pub(crate) hour: i8,
    pub(crate) minute: i8,
    pub(crate) second: i8,
    /// Whether the winning pattern carried a time-of-day component. The
    /// caller's zone anchoring policy depends on it.
    pub(crate) has_time: bool,
}

/// Tries each pattern in order against the input.
///
/// Per-pattern mismatches are the only failures discarded; when no pattern
/// matches, the returned parse error carries the original input for
/// diagnostics.
pub(crate) fn parse_any(input: &str) -> Result<Parsed, Error> {
    for pattern in PATTERNS {
        // The built-in patterns are compiled on every attempt rather than
        // cached. Compilation is a single cheap scan of a short string.
        let pieces = compile(pattern)
            .expect("built-in parse patterns always compile");
        if let Some(parsed) = parse_one(&pieces, input) {
            trace!("parsed {input:?} with pattern {pattern:?}");
            return Ok(parsed);
        }
    }
    Err(Error::parse(input))
}

/// Strictly matches the input against one compiled pattern.
///
/// The whole input must be consumed. Padded fields require exactly two
/// digits, unpadded fields take one or two, `yyyy` takes exactly four and
/// `yy` exactly two (mapped to 2000..=2099).
fn parse_one(pieces: &[Piece], input: &str) -> Option<Parsed> {
    let mut parsed = Parsed::default();
    let mut rest = input.as_bytes();
    for piece in pieces {
        match *piece {
            Piece::Year4 => {
                let (year, r) = digits(rest, 4, 4)?;
                parsed.year = i16::try_from(year).ok()?;
                rest = r;
            }
            Piece::Year2 => {
                let (year, r) = digits(rest, 2, 2)?;
                parsed.year = 2000 + year as i16;
                rest = r;
            }
            Piece::Month { padded } => {
                let (month, r) = digits(rest, min_width(padded), 2)?;
                parsed.month = month as i8;
                rest = r;
            }
            Piece::Day { padded } => {
                let (day, r) = digits(rest, min_width(padded), 2)?;
                parsed.day = day as i8;
                rest = r;
            }
            Piece::Hour { padded } => {
                let (hour, r) = digits(rest, min_width(padded), 2)?;
                parsed.hour = hour as i8;
                rest = r;
            }
            Piece::Minute { padded } => {
                let (minute, r) = digits(rest, min_width(padded), 2)?;
                parsed.minute = minute as i8;
                rest = r;
            }
            Piece::Second { padded } => {
                let (second, r) = digits(rest, min_width(padded), 2)?;
                parsed.second = second as i8;
                rest = r;
            }
            Piece::Fraction { digits: n } => {
                // Sub-second precision is not representable, so the value
                // is checked for digit-ness and width and then dropped.
                let (_, r) = digits(rest, usize::from(n), usize::from(n))?;
                rest = r;
            }
            // No built-in pattern carries a zone field; custom patterns
            // are format-only.
            Piece::Zone => return None,
            Piece::Literal(ch) => {
                let mut buf = [0u8; 4];
                let lit = ch.encode_utf8(&mut buf).as_bytes();
                rest = rest.strip_prefix(lit)?;
            }
        }
        if piece.is_time() {
            parsed.has_time = true;
        }
    }
    if !rest.is_empty() {
        return None;
    }
    Some(parsed)
}

fn min_width(padded: bool) -> usize {
    if padded {
        2
    } else {
        1
    }
}

/// Reads between `min` and `max` leading ASCII digits, greedily.
fn digits(input: &[u8], min: usize, max: usize) -> Option<(i32, &[u8])> {
    let len = input
        .iter()
        .take(max)
        .take_while(|&&b| b.is_ascii_digit())
        .count();
    if len < min {
        return None;
    }
    let mut value = 0i32;
    for &b in &input[..len] {
        value = value * 10 + i32::from(b - b'0');
    }
    Some((value, &input[len..]))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(input: &str) -> (i16, i8, i8) {
        let p = parse_any(input).unwrap();
        assert!(!p.has_time, "expected date-only parse for {input:?}");
        (p.year, p.month, p.day)
    }

    fn datetime(input: &str) -> (i16, i8, i8, i8, i8, i8) {
        let p = parse_any(input).unwrap();
        assert!(p.has_time, "expected date-time parse for {input:?}");
        (p.year, p.month, p.day, p.hour, p.minute, p.second)
    }

    #[test]
    fn date_only_patterns() {
        assert_eq!((2023, 12, 25), date("25/12/2023"));
        assert_eq!((2023, 12, 25), date("25-12-2023"));
        assert_eq!((2023, 12, 25), date("2023-12-25"));
        assert_eq!((2023, 2, 1), date("1-2-2023"));
        assert_eq!((2023, 2, 1), date("2023-2-1"));
    }

    #[test]
    fn two_digit_year_precedence() {
        // `25-12-23` must resolve through the dd-MM-yy pattern, i.e. as
        // 2023-12-25, not through any year-first interpretation.
        assert_eq!((2023, 12, 25), date("25-12-23"));
        assert_eq!((2000, 1, 1), date("01-01-00"));
    }

    #[test]
    fn day_first_precedence() {
        // Positionally ambiguous: resolved as day-month by pattern order.
        assert_eq!((2023, 2, 1), date("01-02-2023"));
    }

    #[test]
    fn date_time_patterns() {
        assert_eq!((2023, 12, 25, 14, 30, 45), datetime("25-12-2023 14:30:45"));
        assert_eq!((2023, 12, 25, 14, 30, 0), datetime("25-12-2023 14:30"));
        assert_eq!((2023, 12, 25, 14, 30, 45), datetime("2023-12-25 14:30:45"));
        assert_eq!((2023, 12, 25, 14, 30, 0), datetime("2023-12-25 14:30"));
        assert_eq!((2023, 12, 25, 14, 30, 45), datetime("2023-12-25T14:30:45"));
        assert_eq!(
            (2023, 12, 25, 14, 30, 45),
            datetime("2023-12-25T14:30:45.123"),
        );
        assert_eq!(
            (2023, 12, 25, 14, 30, 45),
            datetime("2023-12-25T14:30:45.123456"),
        );
    }

    #[test]
    fn rejects_unmatched_input() {
        for input in [
            "invalid-date",
            "",
            "2023-12-25T14:30:45.12",
            "2023-12-25T14:30:45.1234567",
            "25-12-2023 14:30:45 extra",
            "2023/12/25",
            "12345-01-01",
        ] {
            let err = parse_any(input).unwrap_err();
            assert!(err.is_parse(), "expected parse error for {input:?}");
            assert!(err.to_string().contains(input));
        }
    }

    #[test]
    fn zone_pieces_never_parse() {
        // `VV` is a formatting token only.
        let pieces = compile("yyyy VV").unwrap();
        assert_eq!(None, parse_one(&pieces, "2023 UTC"));
    }

    #[test]
    fn out_of_range_fields_are_not_the_parsers_problem() {
        // The parser matches shapes, not calendars. 99-99-2023 matches
        // dd-MM-yyyy and gets rejected later by value construction.
        let p = parse_any("99-99-2023").unwrap();
        assert_eq!((p.day, p.month), (99, 99));
    }
}
