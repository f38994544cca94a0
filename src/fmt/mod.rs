/*!
Pattern based parsing and formatting of datetimes.

Patterns use a small subset of the date field letters popularized by Java's
`SimpleDateFormat`, since the pattern surface of this library (both the
built-in parse patterns and custom format patterns) was defined in those
terms:

| Letters | Meaning                                     |
|---------|---------------------------------------------|
| `yyyy`  | four digit year                             |
| `yy`    | two digit year, mapped to 2000..=2099       |
| `M`/`MM`| month, unpadded/zero padded                 |
| `d`/`dd`| day of month, unpadded/zero padded          |
| `H`/`HH`| hour of day (24h), unpadded/zero padded     |
| `m`/`mm`| minute, unpadded/zero padded                |
| `s`/`ss`| second, unpadded/zero padded                |
| `S`+    | fractional seconds, one digit per letter    |
| `VV`    | zone identifier (formatting only)           |
| `'...'` | quoted literal text, `''` is a literal quote|

Anything else that isn't an ASCII letter is matched literally. Unsupported
letter runs are a format error.

A datetime has whole second precision, so fractional digits are parsed (and
enforced) but discarded, and always format as zeros.
*/

pub(crate) mod format;
pub(crate) mod parse;

use crate::error::Error;

/// The two built-in display styles.
///
/// Both styles print day-month-year with a caller chosen delimiter; the
/// large style appends the time of day and the zone identifier.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FormatStyle {
    /// `dd<delim>MM<delim>yyyy`
    Short {
        /// The character printed between the date fields.
        delimiter: char,
    },
    /// `dd<delim>MM<delim>yyyy H:m:s zone`
    Large {
        /// The character printed between the date fields.
        delimiter: char,
    },
}

/// A single compiled element of a pattern.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Piece {
    Year4,
    Year2,
    Month { padded: bool },
    Day { padded: bool },
    Hour { padded: bool },
    Minute { padded: bool },
    Second { padded: bool },
    Fraction { digits: u8 },
    Zone,
    Literal(char),
}

impl Piece {
    /// Returns true when this piece parses or formats a time-of-day field.
    pub(crate) fn is_time(&self) -> bool {
        matches!(
            *self,
            Piece::Hour { .. }
                | Piece::Minute { .. }
                | Piece::Second { .. }
                | Piece::Fraction { .. }
        )
    }
}

/// Compiles a pattern string into pieces.
///
/// Errors are always reported as a format error carrying the whole pattern,
/// regardless of which part of it was malformed.
pub(crate) fn compile(pattern: &str) -> Result<Vec<Piece>, Error> {
    let mut pieces = Vec::with_capacity(pattern.len());
    let mut chars = pattern.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch.is_ascii_alphabetic() {
            let mut len = 1;
            while chars.peek() == Some(&ch) {
                chars.next();
                len += 1;
            }
            pieces.push(field(ch, len).ok_or_else(|| Error::format(pattern))?);
        } else if ch == '\'' {
            // A doubled quote is a literal quote, inside or outside of
            // quoted text.
            if chars.peek() == Some(&'\'') {
                chars.next();
                pieces.push(Piece::Literal('\''));
                continue;
            }
            let mut closed = false;
            while let Some(ch) = chars.next() {
                if ch != '\'' {
                    pieces.push(Piece::Literal(ch));
                } else if chars.peek() == Some(&'\'') {
                    chars.next();
                    pieces.push(Piece::Literal('\''));
                } else {
                    closed = true;
                    break;
                }
            }
            if !closed {
                return Err(Error::format(pattern));
            }
        } else {
            pieces.push(Piece::Literal(ch));
        }
    }
    Ok(pieces)
}

fn field(letter: char, len: usize) -> Option<Piece> {
    let piece = match (letter, len) {
        ('y', 4) => Piece::Year4,
        ('y', 2) => Piece::Year2,
        ('M', 1) => Piece::Month { padded: false },
        ('M', 2) => Piece::Month { padded: true },
        ('d', 1) => Piece::Day { padded: false },
        ('d', 2) => Piece::Day { padded: true },
        ('H', 1) => Piece::Hour { padded: false },
        ('H', 2) => Piece::Hour { padded: true },
        ('m', 1) => Piece::Minute { padded: false },
        ('m', 2) => Piece::Minute { padded: true },
        ('s', 1) => Piece::Second { padded: false },
        ('s', 2) => Piece::Second { padded: true },
        ('S', 1..=9) => Piece::Fraction { digits: len as u8 },
        ('V', 2) => Piece::Zone,
        _ => return None,
    };
    Some(piece)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compile_simple_date() {
        let pieces = compile("yyyy-MM-dd").unwrap();
        assert_eq!(
            pieces,
            vec![
                Piece::Year4,
                Piece::Literal('-'),
                Piece::Month { padded: true },
                Piece::Literal('-'),
                Piece::Day { padded: true },
            ],
        );
        assert!(pieces.iter().all(|p| !p.is_time()));
    }

    #[test]
    fn compile_quoted_literal() {
        let pieces = compile("yyyy-MM-dd'T'HH:mm:ss").unwrap();
        assert_eq!(pieces[5], Piece::Literal('T'));
        assert!(pieces.iter().any(Piece::is_time));

        let pieces = compile("HH 'o''clock'").unwrap();
        let literal: String = pieces[2..]
            .iter()
            .map(|p| match *p {
                Piece::Literal(ch) => ch,
                ref p => unreachable!("unexpected piece {p:?}"),
            })
            .collect();
        assert_eq!("o'clock", literal);
    }

    #[test]
    fn compile_fraction() {
        let pieces = compile("ss.SSSSSS").unwrap();
        assert_eq!(pieces[2], Piece::Fraction { digits: 6 });
    }

    #[test]
    fn compile_rejects_malformed() {
        // Unsupported letters and widths.
        assert!(compile("yyy").unwrap_err().is_format());
        assert!(compile("QQ").unwrap_err().is_format());
        assert!(compile("MMM").unwrap_err().is_format());
        assert!(compile("V").unwrap_err().is_format());
        // Unterminated quote.
        assert!(compile("'T").unwrap_err().is_format());
    }
}
