//! Compaction of code point sets into arithmetic-progression range tables.
//!
//! A range table is split into two buckets: ranges whose members all fit in
//! 16 bits, and ranges starting above U+FFFF. Consumers store the first bucket
//! with 16-bit fields, which roughly halves the size of most tables.

use crate::codepointset::{CodePoint, CODE_POINT_MAX, MAX_CODE_POINT_16, MAX_LATIN1};
use core::cmp::Ordering;

/// The code points {lo, lo+stride, lo+2*stride, ...} up to and including hi.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Range {
    pub lo: CodePoint,
    pub hi: CodePoint,
    pub stride: CodePoint,
}

impl Range {
    pub fn new(lo: CodePoint, hi: CodePoint, stride: CodePoint) -> Range {
        debug_assert!(lo <= hi && stride >= 1);
        debug_assert!((hi - lo) % stride == 0, "hi not reachable from lo");
        Range { lo, hi, stride }
    }

    #[inline]
    fn compare(&self, cp: CodePoint) -> Ordering {
        if self.lo > cp {
            Ordering::Greater
        } else if self.hi < cp {
            Ordering::Less
        } else {
            Ordering::Equal
        }
    }

    /// Return whether \p cp is a member of this progression.
    pub fn contains(&self, cp: CodePoint) -> bool {
        self.compare(cp) == Ordering::Equal && (cp - self.lo) % self.stride == 0
    }

    /// Iterate over the members.
    pub fn iter(&self) -> impl Iterator<Item = CodePoint> {
        (self.lo..=self.hi).step_by(self.stride as usize)
    }

    /// Split a range with members on both sides of U+FFFF/U+10000.
    /// Halves with a single member get a stride of 1.
    fn split_at_16_bits(self) -> (Range, Range) {
        debug_assert!(self.lo <= MAX_CODE_POINT_16 && self.hi > MAX_CODE_POINT_16);
        let last_low = self.lo + (MAX_CODE_POINT_16 - self.lo) / self.stride * self.stride;
        let first_high = last_low + self.stride;
        let part = |lo: CodePoint, hi: CodePoint| {
            if lo == hi {
                Range::new(lo, hi, 1)
            } else {
                Range::new(lo, hi, self.stride)
            }
        };
        (part(self.lo, last_low), part(first_high, self.hi))
    }
}

/// A compacted set of code points.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RangeTable {
    /// Ranges whose members are all <= U+FFFF.
    pub r16: Vec<Range>,
    /// Ranges whose members are all > U+FFFF.
    pub r32: Vec<Range>,
    /// The number of leading r16 ranges which lie entirely within Latin-1.
    pub latin_offset: usize,
}

impl RangeTable {
    /// Compact the code points satisfying \p predicate.
    pub fn compact<F>(predicate: F) -> RangeTable
    where
        F: Fn(CodePoint) -> bool,
    {
        let mut compactor = RangeCompactor::new();
        compactor.scan(predicate);
        compactor.finish()
    }

    /// Build a table from already folded unit-stride ranges; see
    /// [`fold_adjacent`].
    pub fn from_folded(ranges: &[Range]) -> RangeTable {
        let mut compactor = RangeCompactor::new();
        for &r in ranges {
            compactor.push(r);
        }
        compactor.finish()
    }

    pub fn is_empty(&self) -> bool {
        self.r16.is_empty() && self.r32.is_empty()
    }

    /// The total number of ranges in both buckets.
    pub fn len(&self) -> usize {
        self.r16.len() + self.r32.len()
    }

    /// Iterate over the ranges of both buckets, in order.
    pub fn ranges(&self) -> impl Iterator<Item = &Range> {
        self.r16.iter().chain(self.r32.iter())
    }

    /// Iterate over every member code point, in order.
    pub fn code_points(&self) -> impl Iterator<Item = CodePoint> + '_ {
        self.ranges().flat_map(|r| r.iter())
    }

    /// Return whether \p cp is in the table.
    pub fn contains(&self, cp: CodePoint) -> bool {
        let bucket = if cp <= MAX_CODE_POINT_16 {
            &self.r16
        } else {
            &self.r32
        };
        match bucket.binary_search_by(|r| r.compare(cp)) {
            Ok(idx) => bucket[idx].contains(cp),
            Err(_) => false,
        }
    }
}

/// Accumulates ranges into a RangeTable, keeping the bucket invariant.
#[derive(Debug, Default)]
pub struct RangeCompactor {
    table: RangeTable,
}

impl RangeCompactor {
    pub fn new() -> RangeCompactor {
        RangeCompactor::default()
    }

    /// Append a range, which must start after every range pushed so far.
    pub fn push(&mut self, range: Range) {
        debug_assert!(
            self.table.ranges().last().map_or(true, |r| r.hi < range.lo),
            "ranges out of order"
        );
        if range.hi <= MAX_CODE_POINT_16 {
            if range.hi <= MAX_LATIN1 {
                self.table.latin_offset += 1;
            }
            self.table.r16.push(range);
        } else if range.lo > MAX_CODE_POINT_16 {
            self.table.r32.push(range);
        } else {
            let (low, high) = range.split_at_16_bits();
            log::trace!("splitting straddling range {:?}", range);
            self.table.r16.push(low);
            self.table.r32.push(high);
        }
    }

    /// Greedily cover the code points satisfying \p predicate. Each range takes
    /// its stride from its first two members and is extended as long as the
    /// predicate agrees with the progression.
    pub fn scan<F>(&mut self, predicate: F)
    where
        F: Fn(CodePoint) -> bool,
    {
        let end = CODE_POINT_MAX + 1;
        let mut next: CodePoint = 0;
        loop {
            while next < end && !predicate(next) {
                next += 1;
            }
            if next >= end {
                break;
            }

            let lo = next;
            let mut hi = next;
            next += 1;
            while next < end && !predicate(next) {
                next += 1;
            }
            if next >= end {
                self.push(Range::new(lo, lo, 1));
                break;
            }

            let stride = next - lo;
            for cp in next..end {
                let member = predicate(cp);
                if member != ((cp - lo) % stride == 0) {
                    break;
                }
                if member {
                    hi = cp;
                }
            }
            self.push(Range::new(lo, hi, stride));
            next = hi + 1;
        }
    }

    pub fn finish(self) -> RangeTable {
        self.table
    }
}

/// Merge touching or overlapping inclusive ranges into unit-stride ranges.
/// The input must be sorted by lo.
pub fn fold_adjacent(raw: &[(CodePoint, CodePoint)]) -> Vec<Range> {
    let mut folded: Vec<Range> = Vec::with_capacity(raw.len());
    for &(lo, hi) in raw {
        match folded.last_mut() {
            Some(prev) if lo <= prev.hi + 1 => prev.hi = prev.hi.max(hi),
            _ => folded.push(Range::new(lo, hi, 1)),
        }
    }
    folded
}

/// Running totals of the emitted table sizes.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct TableStats {
    pub range16: usize,
    pub range32: usize,
    pub fold_pairs: usize,
}

impl TableStats {
    pub fn add_table(&mut self, table: &RangeTable) {
        self.range16 += table.r16.len();
        self.range32 += table.r32.len();
    }

    pub fn range16_bytes(&self) -> usize {
        self.range16 * 3 * 2
    }

    pub fn range32_bytes(&self) -> usize {
        self.range32 * 3 * 4
    }

    pub fn fold_pair_bytes(&self) -> usize {
        self.fold_pairs * 2 * 2
    }
}
