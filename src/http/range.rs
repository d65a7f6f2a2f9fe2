//! Byte-range resolution for partial content transfers.
//!
//! Only a single `bytes=start-end` range is honored; the first `Range`
//! header wins and multi-range requests are not supported.

/// A byte range requested by the client.
///
/// `start`/`end` are only meaningful when `valid` is set; a resolved valid
/// range always satisfies `end >= start` and spans at least one byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByteRange {
    /// A `Range` header was present on the request.
    pub present: bool,
    /// The range parsed and resolved to a satisfiable interval.
    pub valid: bool,
    /// First byte position, inclusive.
    pub start: i64,
    /// Last byte position, inclusive.
    pub end: i64,
    /// The client sent `bytes=N-` with no last-byte position.
    pub end_absent: bool,
}

impl ByteRange {
    /// Range state for a request with no `Range` header.
    pub fn absent() -> Self {
        Self {
            present: false,
            valid: false,
            start: 0,
            end: 0,
            end_absent: false,
        }
    }

    /// Number of bytes the range spans.
    pub fn size(&self) -> i64 {
        self.end.saturating_sub(self.start).saturating_add(1)
    }
}

/// Scan raw header lines for the first `Range` header and parse its value.
///
/// Later `Range` lines are ignored. The result still needs [`resolve`] to be
/// checked against the file being served.
pub fn parse_range_lines(lines: &[String]) -> ByteRange {
    for line in lines {
        let Some((name, value)) = line.split_once(':') else {
            continue;
        };
        if name.trim().eq_ignore_ascii_case("range") {
            return parse_range_value(value);
        }
    }
    ByteRange::absent()
}

fn parse_range_value(value: &str) -> ByteRange {
    let mut range = ByteRange {
        present: true,
        valid: false,
        start: 0,
        end: 0,
        end_absent: false,
    };

    // anything other than a bytes range is present but unusable
    let Some(idx) = value.find("bytes=") else {
        return range;
    };
    let interval = value[idx + 6..].trim();

    range.end_absent = interval.ends_with('-');

    let Some(dash) = interval.find('-') else {
        return range;
    };
    let Ok(start) = interval[..dash].trim().parse::<i64>() else {
        return range;
    };
    range.start = start;

    if !range.end_absent {
        let Ok(end) = interval[dash + 1..].trim().parse::<i64>() else {
            return range;
        };
        range.end = end;
    }

    range.valid = true;
    range
}

/// Resolve a parsed range against the length of the file being served.
///
/// An absent last-byte position becomes `file_len - 1`. Ranges that end
/// before they start, or span less than one byte, are invalidated here -
/// before any response bytes are written.
pub fn resolve(mut range: ByteRange, file_len: i64) -> ByteRange {
    if !range.present {
        return range;
    }
    if range.end_absent {
        range.end = file_len - 1;
    }
    if range.end < range.start || range.size() < 1 {
        range.valid = false;
    }
    range
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(headers: &[&str]) -> Vec<String> {
        headers.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn no_range_header() {
        let range = parse_range_lines(&lines(&["Host: a", "Accept: */*"]));
        assert!(!range.present);
    }

    #[test]
    fn bounded_range() {
        let range = resolve(parse_range_lines(&lines(&["Range: bytes=10-20"])), 100);
        assert!(range.present && range.valid);
        assert_eq!((range.start, range.end), (10, 20));
        assert_eq!(range.size(), 11);
    }

    #[test]
    fn open_ended_range_resolves_to_file_end() {
        let range = resolve(parse_range_lines(&lines(&["Range: bytes=50-"])), 100);
        assert!(range.valid);
        assert!(range.end_absent);
        assert_eq!((range.start, range.end), (50, 99));
        assert_eq!(range.size(), 50);
    }

    #[test]
    fn header_name_is_case_insensitive() {
        let range = resolve(parse_range_lines(&lines(&["range: bytes=0-0"])), 10);
        assert!(range.valid);
        assert_eq!(range.size(), 1);
    }

    #[test]
    fn first_range_header_wins() {
        let range = resolve(
            parse_range_lines(&lines(&["Range: bytes=1-2", "Range: bytes=5-9"])),
            100,
        );
        assert_eq!((range.start, range.end), (1, 2));
    }

    #[test]
    fn non_bytes_unit_is_invalid() {
        let range = resolve(parse_range_lines(&lines(&["Range: items=1-5"])), 100);
        assert!(range.present && !range.valid);
    }

    #[test]
    fn garbage_values_are_invalid() {
        for value in ["Range: bytes=abc", "Range: bytes=a-b", "Range: bytes=-50"] {
            let range = resolve(parse_range_lines(&lines(&[value])), 100);
            assert!(range.present && !range.valid, "{value}");
        }
    }

    #[test]
    fn inverted_range_is_invalid() {
        let range = resolve(parse_range_lines(&lines(&["Range: bytes=20-10"])), 100);
        assert!(!range.valid);
    }

    #[test]
    fn open_range_on_empty_file_is_invalid() {
        let range = resolve(parse_range_lines(&lines(&["Range: bytes=0-"])), 0);
        assert!(!range.valid);
    }

    #[test]
    fn oversized_values_are_invalid() {
        let range = resolve(
            parse_range_lines(&lines(&["Range: bytes=99999999999999999999-"])),
            100,
        );
        assert!(range.present && !range.valid);
    }

    #[test]
    fn end_past_file_length_stays_valid() {
        // the transfer stops at end-of-file, so an overshooting end is served
        let range = resolve(parse_range_lines(&lines(&["Range: bytes=10-2000"])), 100);
        assert!(range.valid);
        assert_eq!(range.end, 2000);
    }
}
