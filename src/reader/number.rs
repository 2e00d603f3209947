// Primitives for reading numbers out of tally cells.

use std::num::ParseFloatError;

use snafu::prelude::*;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum NumberError {
    #[snafu(display("failed to read `{content}` as number: {source}"))]
    NotANumber {
        content: String,
        source: ParseFloatError,
    },
    #[snafu(display("`{content}` is not a finite number"))]
    NotFinite { content: String },
}

/// Reads the number from the input string.
///
/// Surrounding whitespace is ignored and a blank cell reads as zero.
pub fn read_number(s: &str) -> Result<f64, NumberError> {
    let s = s.trim();
    if s.is_empty() {
        return Ok(0.0);
    }
    let n: f64 = s.parse().context(NotANumberSnafu { content: s })?;
    ensure!(n.is_finite(), NotFiniteSnafu { content: s });
    Ok(n)
}

/// True when the cell holds nothing but whitespace.
pub fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_numbers() {
        assert_eq!(read_number("3").unwrap(), 3.0);
        assert_eq!(read_number("  4.25 ").unwrap(), 4.25);
        assert_eq!(read_number("-2").unwrap(), -2.0);
        assert_eq!(read_number("1e3").unwrap(), 1000.0);
        assert_eq!(read_number("0.001").unwrap(), 0.001);
    }

    #[test]
    fn blank_reads_as_zero() {
        assert_eq!(read_number("").unwrap(), 0.0);
        assert_eq!(read_number(" \t ").unwrap(), 0.0);
    }

    #[test]
    fn rejects_labels() {
        assert!(matches!(
            read_number("reject"),
            Err(NumberError::NotANumber { .. })
        ));
        assert!(read_number("Pizza").is_err());
        assert!(read_number("3 apples").is_err());
    }

    #[test]
    fn rejects_non_finite() {
        assert!(matches!(read_number("inf"), Err(NumberError::NotFinite { .. })));
        assert!(matches!(read_number("NaN"), Err(NumberError::NotFinite { .. })));
    }

    #[test]
    fn error_message_names_the_cell() {
        let e = read_number("poor").unwrap_err();
        assert!(e.to_string().starts_with("failed to read `poor` as number"));
    }
}
