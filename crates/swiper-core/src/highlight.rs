//! Highlight assigner: distributes match segments over a fixed palette.
//!
//! Segment `i` of a record always lands in bucket `i mod N`, so the k-th term
//! of a query keeps the same colour on every line. With more terms than
//! buckets, colours repeat.

use crate::{error::SwiperError, types::MatchRecord};

/// Palettes smaller than this are rejected.
pub const MIN_BUCKETS: usize = 4;

/// Buckets in the stock palette (red, blue, green, yellow, aqua, cyan).
pub const DEFAULT_BUCKETS: usize = 6;

/// A painted span, `start..end` in char columns of `line`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HighlightRange {
    pub line: usize,
    pub start: usize,
    pub end: usize,
}

impl HighlightRange {
    pub fn contains(&self, line: usize, column: usize) -> bool {
        self.line == line && column >= self.start && column < self.end
    }
}

/// Paints coloured overlays on the active buffer.
pub trait HighlightRenderer {
    /// Replace everything painted with `bucket`'s style.
    fn set_highlights(&mut self, bucket: usize, ranges: &[HighlightRange]);

    fn clear_all_highlights(&mut self);
}

/// Group the segments of `records` by bucket. Zero-length segments are
/// dropped. The result always has `buckets` entries.
pub fn assign_buckets(records: &[MatchRecord], buckets: usize) -> Vec<Vec<HighlightRange>> {
    let mut out = vec![Vec::new(); buckets];
    if buckets == 0 {
        return out;
    }
    for record in records {
        for (i, segment) in record.segments.iter().enumerate() {
            if segment.len == 0 {
                continue;
            }
            out[i % buckets].push(HighlightRange {
                line: record.line,
                start: segment.start,
                end: segment.end(),
            });
        }
    }
    out
}

/// Owns the palette size and repaints a renderer from scratch on each search.
#[derive(Debug, Clone, Copy)]
pub struct HighlightAssigner {
    buckets: usize,
}

impl Default for HighlightAssigner {
    fn default() -> Self {
        Self {
            buckets: DEFAULT_BUCKETS,
        }
    }
}

impl HighlightAssigner {
    pub fn new(buckets: usize) -> Result<Self, SwiperError> {
        if buckets < MIN_BUCKETS {
            return Err(SwiperError::PaletteTooSmall {
                min: MIN_BUCKETS,
                got: buckets,
            });
        }
        Ok(Self { buckets })
    }

    pub fn buckets(&self) -> usize {
        self.buckets
    }

    /// Discard all previous highlights, then paint `records`.
    pub fn apply<R: HighlightRenderer + ?Sized>(&self, renderer: &mut R, records: &[MatchRecord]) {
        renderer.clear_all_highlights();
        for (bucket, ranges) in assign_buckets(records, self.buckets).iter().enumerate() {
            renderer.set_highlights(bucket, ranges);
        }
    }

    pub fn clear<R: HighlightRenderer + ?Sized>(&self, renderer: &mut R) {
        renderer.clear_all_highlights();
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Segment;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn record(line: usize, segments: &[(usize, usize)]) -> MatchRecord {
        MatchRecord {
            line,
            segments: segments.iter().map(|&(s, l)| Segment::new(s, l)).collect(),
        }
    }

    fn range(line: usize, start: usize, end: usize) -> HighlightRange {
        HighlightRange { line, start, end }
    }

    #[test]
    fn three_segments_fill_the_first_three_buckets() {
        let out = assign_buckets(&[record(7, &[(0, 3), (4, 2), (9, 1)])], 6);
        assert_eq!(out.len(), 6);
        assert_eq!(out[0], vec![range(7, 0, 3)]);
        assert_eq!(out[1], vec![range(7, 4, 6)]);
        assert_eq!(out[2], vec![range(7, 9, 10)]);
        assert!(out[3..].iter().all(Vec::is_empty));
    }

    #[test]
    fn positions_wrap_around_the_palette() {
        let segs: Vec<(usize, usize)> = (0..5).map(|i| (i * 2, 1)).collect();
        let out = assign_buckets(&[record(0, &segs)], 4);
        assert_eq!(out[0], vec![range(0, 0, 1), range(0, 8, 9)]);
        assert_eq!(out[1], vec![range(0, 2, 3)]);
    }

    #[test]
    fn zero_length_segments_are_never_painted() {
        let out = assign_buckets(&[record(1, &[(0, 0), (3, 2)])], 4);
        assert!(out[0].is_empty());
        // The skipped segment still consumes its bucket position.
        assert_eq!(out[1], vec![range(1, 3, 5)]);
    }

    #[test]
    fn palette_below_minimum_is_rejected() {
        assert!(HighlightAssigner::new(3).is_err());
        assert_eq!(HighlightAssigner::new(4).unwrap().buckets(), 4);
    }

    #[derive(Default)]
    struct Recorder {
        calls: Vec<String>,
    }

    impl HighlightRenderer for Recorder {
        fn set_highlights(&mut self, bucket: usize, ranges: &[HighlightRange]) {
            self.calls.push(format!("set {bucket} {}", ranges.len()));
        }

        fn clear_all_highlights(&mut self) {
            self.calls.push("clear".to_string());
        }
    }

    #[test]
    fn apply_clears_then_sets_every_bucket() {
        let mut recorder = Recorder::default();
        HighlightAssigner::new(4)
            .unwrap()
            .apply(&mut recorder, &[record(0, &[(0, 1), (2, 1)])]);
        assert_eq!(
            recorder.calls,
            vec!["clear", "set 0 1", "set 1 1", "set 2 0", "set 3 0"]
        );
    }

    proptest! {
        #[test]
        fn prop_every_painted_range_is_a_nonempty_segment(
            segs in prop::collection::vec((0usize..50, 0usize..5), 0..8),
            buckets in 4usize..8,
        ) {
            let rec = record(3, &segs);
            let out = assign_buckets(std::slice::from_ref(&rec), buckets);
            let painted: usize = out.iter().map(Vec::len).sum();
            let nonempty = segs.iter().filter(|(_, l)| *l > 0).count();
            prop_assert_eq!(painted, nonempty);
            for r in out.iter().flatten() {
                prop_assert!(r.end > r.start);
                prop_assert!(rec.segments.iter().any(|s| s.start == r.start && s.end() == r.end));
            }
        }
    }
}
