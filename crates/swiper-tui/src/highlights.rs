//! Highlight overlay store: what the document view paints, per bucket.

use std::collections::HashMap;

use swiper_core::{HighlightRange, HighlightRenderer};

/// Current highlight ranges, indexed by line for render-time lookup.
#[derive(Debug, Default)]
pub struct HighlightStore {
    buckets: Vec<Vec<HighlightRange>>,
    by_line: HashMap<usize, Vec<(usize, HighlightRange)>>,
}

impl HighlightStore {
    /// Bucket painting `(line, column)`, if any. When ranges overlap, the
    /// lowest bucket wins.
    pub fn bucket_at(&self, line: usize, column: usize) -> Option<usize> {
        self.by_line
            .get(&line)?
            .iter()
            .filter(|(_, r)| r.contains(line, column))
            .map(|(bucket, _)| *bucket)
            .min()
    }

    pub fn ranges(&self, bucket: usize) -> &[HighlightRange] {
        self.buckets.get(bucket).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_empty(&self) -> bool {
        self.by_line.is_empty()
    }

    fn reindex(&mut self) {
        self.by_line.clear();
        for (bucket, ranges) in self.buckets.iter().enumerate() {
            for range in ranges {
                self.by_line
                    .entry(range.line)
                    .or_default()
                    .push((bucket, *range));
            }
        }
    }
}

impl HighlightRenderer for HighlightStore {
    fn set_highlights(&mut self, bucket: usize, ranges: &[HighlightRange]) {
        if self.buckets.len() <= bucket {
            self.buckets.resize_with(bucket + 1, Vec::new);
        }
        self.buckets[bucket] = ranges.to_vec();
        self.reindex();
    }

    fn clear_all_highlights(&mut self) {
        self.buckets.clear();
        self.by_line.clear();
    }
}
