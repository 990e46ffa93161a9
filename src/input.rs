use crate::error::{ReportError, Result};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Open `path` and hand every line, without its terminator, to `on_line`.
///
/// Open failures and mid-file read failures (including invalid UTF-8) are
/// reported separately so callers can tell a missing file from a bad one.
pub fn for_each_line<F>(path: &Path, mut on_line: F) -> Result<usize>
where
    F: FnMut(&str),
{
    let file = File::open(path).map_err(|source| ReportError::FileOpen {
        path: path.to_path_buf(),
        source,
    })?;
    let reader = BufReader::new(file);

    let mut count = 0;
    for line in reader.lines() {
        let line = line.map_err(|source| ReportError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        on_line(&line);
        count += 1;
    }
    Ok(count)
}

/// Outcome of reading one line as an integer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedInteger {
    /// Decimal digits with leading zeros removed; zero is `"0"`.
    NonNegative(String),
    Negative,
}

/// Parse an integer the way a line of user data is expected to look:
/// surrounding whitespace ignored, optional sign, decimal digits only.
///
/// Magnitudes of any width are accepted; `-0` is zero.
pub fn parse_integer(raw: &str) -> Option<ParsedInteger> {
    let text = raw.trim();
    let (negative, digits) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if negative && digits.bytes().any(|b| b != b'0') {
        return Some(ParsedInteger::Negative);
    }
    let canonical = digits.trim_start_matches('0');
    let canonical = if canonical.is_empty() { "0" } else { canonical };
    Some(ParsedInteger::NonNegative(canonical.to_string()))
}

/// Parse a floating point value after trimming surrounding whitespace.
pub fn parse_float(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_integer_accepts_signs_and_whitespace() {
        let non_negative = |s: &str| Some(ParsedInteger::NonNegative(s.to_string()));
        assert_eq!(parse_integer(" 42\t"), non_negative("42"));
        assert_eq!(parse_integer("+7"), non_negative("7"));
        assert_eq!(parse_integer("-0"), non_negative("0"));
        assert_eq!(parse_integer("007"), non_negative("7"));
        assert_eq!(parse_integer("000"), non_negative("0"));
        assert_eq!(parse_integer("-3"), Some(ParsedInteger::Negative));
    }

    #[test]
    fn test_parse_integer_rejects_non_integers() {
        for raw in ["", "   ", "abc", "1.5", "1e3", "--1", "+", "12a", "0x1F"] {
            assert_eq!(parse_integer(raw), None, "{raw:?} should be rejected");
        }
    }

    #[test]
    fn test_parse_integer_has_no_width_limit() {
        let forty_digits = format!("1{}", "0".repeat(39));
        assert_eq!(
            parse_integer(&forty_digits),
            Some(ParsedInteger::NonNegative(forty_digits.clone()))
        );
        assert_eq!(
            parse_integer(&format!("-{forty_digits}")),
            Some(ParsedInteger::Negative)
        );
    }

    #[test]
    fn test_parse_float() {
        assert_eq!(parse_float(" 2.5 "), Some(2.5));
        assert_eq!(parse_float("-1"), Some(-1.0));
        assert_eq!(parse_float("1e3"), Some(1000.0));
        assert!(parse_float("inf").unwrap().is_infinite());
        assert_eq!(parse_float("two"), None);
        assert_eq!(parse_float(""), None);
    }

    #[test]
    fn test_for_each_line_yields_lines_in_order() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "first\r\nsecond\n\nlast").unwrap();

        let mut seen = Vec::new();
        let count = for_each_line(file.path(), |line| seen.push(line.to_string())).unwrap();

        assert_eq!(count, 4);
        assert_eq!(seen, vec!["first", "second", "", "last"]);
    }

    #[test]
    fn test_for_each_line_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.txt");
        let err = for_each_line(&missing, |_| {}).unwrap_err();
        assert!(matches!(err, ReportError::FileOpen { .. }));
        assert_eq!(err.path(), Some(&missing));
    }

    #[test]
    fn test_for_each_line_invalid_utf8() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"ok\n\xff\xfe\n").unwrap();
        let err = for_each_line(file.path(), |_| {}).unwrap_err();
        assert!(matches!(err, ReportError::FileRead { .. }));
    }
}
