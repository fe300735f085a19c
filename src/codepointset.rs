use core::cmp::{self, Ordering};

pub type CodePoint = u32;

/// The maximum (inclusive) code point.
pub const CODE_POINT_MAX: CodePoint = 0x10FFFF;

/// The largest code point of the 16-bit range bucket.
pub const MAX_CODE_POINT_16: CodePoint = 0xFFFF;

/// The largest Latin-1 code point.
pub const MAX_LATIN1: CodePoint = 0xFF;

/// An inclusive range of code points.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Interval {
    pub first: CodePoint,
    pub last: CodePoint,
}

impl Interval {
    pub const fn new(first: CodePoint, last: CodePoint) -> Interval {
        debug_assert!(first <= last);
        Interval { first, last }
    }

    #[inline(always)]
    pub fn compare(self, cp: u32) -> Ordering {
        if self.first > cp {
            Ordering::Greater
        } else if self.last < cp {
            Ordering::Less
        } else {
            Ordering::Equal
        }
    }

    /// Return whether self is strictly before rhs.
    /// Overlapping *or abutting* intervals are not considered strictly before.
    fn is_strictly_before(self, rhs: Interval) -> bool {
        self.last + 1 < rhs.first
    }

    /// Compare two intervals.
    /// Overlapping *or abutting* intervals are considered equal.
    fn mergecmp(self, rhs: Interval) -> Ordering {
        if self.is_strictly_before(rhs) {
            Ordering::Less
        } else if rhs.is_strictly_before(self) {
            Ordering::Greater
        } else {
            Ordering::Equal
        }
    }

    /// Return whether self contains a code point \p cp.
    pub fn contains(self, cp: CodePoint) -> bool {
        self.first <= cp && cp <= self.last
    }

    /// Return the interval of codepoints.
    pub fn codepoints(self) -> core::ops::RangeInclusive<u32> {
        self.first..=self.last
    }

    /// Return the number of contained code points.
    pub fn count_codepoints(self) -> usize {
        (self.last - self.first + 1) as usize
    }
}

/// Given that \p ivs is sorted according to \p f, returns the range of indexes
/// where f indicates equal elements.
fn equal_range_by<F>(ivs: &[Interval], mut f: F) -> core::ops::Range<usize>
where
    F: FnMut(&Interval) -> Ordering,
{
    let left = ivs
        .binary_search_by(|v| f(v).then(Ordering::Greater))
        .unwrap_err();
    let right = ivs[left..]
        .binary_search_by(|v| f(v).then(Ordering::Less))
        .unwrap_err()
        + left;
    left..right
}

/// A set of code points stored as disjoint, non-abutting, sorted intervals.
/// Used for category and script membership and for fold exception sets.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CodePointSet {
    ivs: Vec<Interval>,
}

impl CodePointSet {
    pub fn new() -> CodePointSet {
        CodePointSet { ivs: Vec::new() }
    }

    pub fn is_empty(&self) -> bool {
        self.ivs.is_empty()
    }

    pub fn contains(&self, cp: CodePoint) -> bool {
        self.ivs.binary_search_by(|iv| iv.compare(cp)).is_ok()
    }

    #[inline]
    fn assert_is_well_formed(&self) {
        if cfg!(debug_assertions) {
            for iv in &self.ivs {
                debug_assert!(iv.last <= CODE_POINT_MAX);
                debug_assert!(iv.first <= iv.last);
            }
            for w in self.ivs.windows(2) {
                debug_assert!(w[0].is_strictly_before(w[1]));
            }
        }
    }

    /// Add an interval of code points to the set.
    pub fn add(&mut self, new_iv: Interval) {
        // The intervals that intersect or abut new_iv.
        let mergeable = equal_range_by(&self.ivs, |iv| iv.mergecmp(new_iv));
        match mergeable.end - mergeable.start {
            0 => self.ivs.insert(mergeable.start, new_iv),
            1 => {
                let entry = &mut self.ivs[mergeable.start];
                *entry = Interval {
                    first: cmp::min(entry.first, new_iv.first),
                    last: cmp::max(entry.last, new_iv.last),
                };
            }
            _ => {
                let merged = self.ivs[mergeable.clone()]
                    .iter()
                    .fold(new_iv, |acc, iv| Interval {
                        first: cmp::min(acc.first, iv.first),
                        last: cmp::max(acc.last, iv.last),
                    });
                self.ivs[mergeable.start] = merged;
                self.ivs.drain(mergeable.start + 1..mergeable.end);
            }
        }
        self.assert_is_well_formed();
    }

    /// Add a single code point to the set.
    #[inline]
    pub fn add_one(&mut self, cp: CodePoint) {
        self.add(Interval::new(cp, cp))
    }

    /// \return the intervals
    pub fn intervals(&self) -> &[Interval] {
        self.ivs.as_slice()
    }

    /// \return the number of code points in the set.
    pub fn len(&self) -> usize {
        self.ivs.iter().map(|iv| iv.count_codepoints()).sum()
    }

    /// Iterate over every code point in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = CodePoint> + '_ {
        self.ivs.iter().flat_map(|iv| iv.codepoints())
    }

    /// Remove the the given intervals from the set.
    ///
    /// Invariants: The intervals must be sorted and disjoint.
    pub fn remove(&mut self, intervals: &[Interval]) {
        let mut result = Vec::new();
        let mut remove_iter = intervals.iter().peekable();
        let mut current_remove = remove_iter.next();

        for iv in &mut self.ivs {
            while let Some(remove_iv) = current_remove {
                if remove_iv.last < iv.first {
                    current_remove = remove_iter.next();
                } else if remove_iv.first > iv.last {
                    result.push(*iv);
                    break;
                } else {
                    if remove_iv.first > iv.first {
                        result.push(Interval {
                            first: iv.first,
                            last: remove_iv.first - 1,
                        });
                    }
                    if remove_iv.last < iv.last {
                        iv.first = remove_iv.last + 1;
                        current_remove = remove_iter.next();
                    } else {
                        break;
                    }
                }
            }
            if current_remove.is_none() {
                result.push(*iv);
            }
        }

        self.ivs = result;
        self.assert_is_well_formed();
    }
}

impl FromIterator<CodePoint> for CodePointSet {
    fn from_iter<I: IntoIterator<Item = CodePoint>>(iter: I) -> Self {
        let mut set = CodePointSet::new();
        for cp in iter {
            set.add_one(cp);
        }
        set
    }
}
