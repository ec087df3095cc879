//! Domain-specific assertion macros for swiper harnesses.
//!
//! These wrap `pretty_assertions` and add context-rich failure messages that
//! make it clear which query produced the unexpected result.

/// Assert the exact set of matching lines for a query against a document.
///
/// ```rust
/// assert_matches_lines!(SOURCE, "cache !impl", [2]);
/// ```
#[macro_export]
macro_rules! assert_matches_lines {
    ($doc:expr, $query:expr, [$($line:expr),* $(,)?]) => {{
        let query: &str = $query;
        let records = swiper_core::scan(&$doc[..], &swiper_core::parse_query(query));
        let actual: Vec<usize> = records.iter().map(|r| r.line).collect();
        let expected: Vec<usize> = vec![$($line),*];
        pretty_assertions::assert_eq!(
            actual, expected,
            "query {:?} matched the wrong lines", query
        );
    }};
}

/// Assert that `line` of the scan result carries exactly `segments`.
#[macro_export]
macro_rules! assert_segments {
    ($doc:expr, $query:expr, $line:expr, [$(($start:expr, $len:expr)),* $(,)?]) => {{
        let query: &str = $query;
        let records = swiper_core::scan(&$doc[..], &swiper_core::parse_query(query));
        let record = records
            .iter()
            .find(|r| r.line == $line)
            .unwrap_or_else(|| panic!("query {:?} did not match line {}", query, $line));
        let expected: Vec<swiper_core::Segment> =
            vec![$(swiper_core::Segment::new($start, $len)),*];
        pretty_assertions::assert_eq!(
            record.segments, expected,
            "query {:?} recorded the wrong segments on line {}", query, $line
        );
    }};
}
