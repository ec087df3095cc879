//! Headless mode: run one query against a file and print the matches.
//!
//! Plain output mirrors the picker labels (`<line>: <text>`). JSON output is
//! one object per line with the recorded segments, for scripting.

use std::io::Write;

use serde::Serialize;
use swiper_core::{is_searchable, parse_query, scan, Document, Segment};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Plain,
    Json,
}

/// A matching line as printed in headless mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeadlessMatch {
    pub line: usize,
    pub text: String,
    pub segments: Vec<Segment>,
}

/// Matches for `query`, or nothing when the query is too short to search.
pub fn run_query<D: Document + ?Sized>(document: &D, query: &str) -> Vec<HeadlessMatch> {
    if !is_searchable(query) {
        tracing::debug!(query, "headless query below search threshold");
        return Vec::new();
    }
    let predicates = parse_query(query);
    scan(document, &predicates)
        .into_iter()
        .map(|record| HeadlessMatch {
            line: record.line,
            text: document.line_text(record.line).into_owned(),
            segments: record.segments,
        })
        .collect()
}

pub fn write_matches<W: Write>(
    out: &mut W,
    matches: &[HeadlessMatch],
    format: OutputFormat,
) -> anyhow::Result<()> {
    for m in matches {
        match format {
            OutputFormat::Plain => writeln!(out, "{}: {}", m.line, m.text)?,
            OutputFormat::Json => {
                serde_json::to_writer(&mut *out, m)?;
                writeln!(out)?;
            }
        }
    }
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const LINES: &[&str] = &["alpha beta", "beta gamma", "gamma"];

    #[test]
    fn prints_labels() {
        let matches = run_query(LINES, "beta");
        let mut out = Vec::new();
        write_matches(&mut out, &matches, OutputFormat::Plain).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "0: alpha beta\n1: beta gamma\n");
    }

    #[test]
    fn json_lines_carry_segments() {
        let matches = run_query(LINES, "gam !alpha");
        let mut out = Vec::new();
        write_matches(&mut out, &matches, OutputFormat::Json).unwrap();
        let text = String::from_utf8(out).unwrap();
        let first: serde_json::Value = serde_json::from_str(text.lines().next().unwrap()).unwrap();
        assert_eq!(
            first,
            serde_json::json!({
                "line": 1,
                "text": "beta gamma",
                "segments": [{ "start": 5, "len": 3 }]
            })
        );
        assert_eq!(text.lines().count(), 2);
    }

    #[test]
    fn short_query_prints_nothing() {
        assert!(run_query(LINES, " a ").is_empty());
    }
}
