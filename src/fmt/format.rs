use std::fmt::Write;

use crate::{
    datetime::DateTime,
    error::Error,
    fmt::{compile, FormatStyle, Piece},
};

/// Formats a datetime through a custom pattern.
///
/// A malformed pattern is reported as a format error carrying the pattern
/// itself. Formatting never fails for a valid pattern.
pub(crate) fn format(dt: &DateTime, pattern: &str) -> Result<String, Error> {
    let pieces = compile(pattern)?;
    let mut out = String::with_capacity(pattern.len() + 8);
    for piece in pieces {
        match piece {
            Piece::Year4 => write!(out, "{:04}", dt.year()),
            Piece::Year2 => write!(out, "{:02}", dt.year().rem_euclid(100)),
            Piece::Month { padded } => field(&mut out, dt.month(), padded),
            Piece::Day { padded } => field(&mut out, dt.day(), padded),
            Piece::Hour { padded } => field(&mut out, dt.hour(), padded),
            Piece::Minute { padded } => field(&mut out, dt.minute(), padded),
            Piece::Second { padded } => field(&mut out, dt.second(), padded),
            // Whole second precision: fractional digits are always zero.
            Piece::Fraction { digits } => {
                write!(out, "{:0>width$}", "", width = usize::from(digits))
            }
            Piece::Zone => write!(out, "{}", dt.zone()),
            Piece::Literal(ch) => {
                out.push(ch);
                Ok(())
            }
        }
        .expect("writing to a String never fails");
    }
    Ok(out)
}

fn field(out: &mut String, value: i8, padded: bool) -> std::fmt::Result {
    if padded {
        write!(out, "{value:02}")
    } else {
        write!(out, "{value}")
    }
}

/// Formats a datetime in one of the two built-in styles.
pub(crate) fn format_style(dt: &DateTime, style: FormatStyle) -> String {
    match style {
        FormatStyle::Short { delimiter } => {
            format!(
                "{:02}{delimiter}{:02}{delimiter}{}",
                dt.day(),
                dt.month(),
                dt.year(),
            )
        }
        FormatStyle::Large { delimiter } => {
            format!(
                "{:02}{delimiter}{:02}{delimiter}{} {}:{}:{} {}",
                dt.day(),
                dt.month(),
                dt.year(),
                dt.hour(),
                dt.minute(),
                dt.second(),
                dt.zone(),
            )
        }
    }
}
