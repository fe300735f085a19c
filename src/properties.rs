//! Named code point ranges for scripts and binary properties.

use crate::codepointset::{CodePoint, CodePointSet, Interval, CODE_POINT_MAX};
use crate::error::{Error, Result};
use crate::ranges::{fold_adjacent, Range};
use std::collections::BTreeMap;

/// Raw inclusive ranges grouped by script or property name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertyRanges {
    ranges: BTreeMap<String, Vec<(CodePoint, CodePoint)>>,
}

impl PropertyRanges {
    pub fn new() -> PropertyRanges {
        PropertyRanges::default()
    }

    /// Record that \p lo through \p hi (inclusive) have the property \p name.
    pub fn insert(&mut self, name: &str, lo: CodePoint, hi: CodePoint) -> Result<()> {
        if hi > CODE_POINT_MAX {
            return Err(Error::OutOfDomain(hi));
        }
        if lo > hi {
            return Err(Error::Malformed {
                cp: lo,
                reason: format!("range end U+{:04X} before start in {}", hi, name),
            });
        }
        self.ranges
            .entry(name.to_string())
            .or_default()
            .push((lo, hi));
        Ok(())
    }

    /// \return the names, sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.ranges.keys().map(String::as_str)
    }

    pub fn contains_name(&self, name: &str) -> bool {
        self.ranges.contains_key(name)
    }

    /// \return the raw ranges of \p name, in input order.
    pub fn raw(&self, name: &str) -> &[(CodePoint, CodePoint)] {
        self.ranges.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    /// \return the ranges of \p name sorted and with touching ranges merged.
    pub fn folded(&self, name: &str) -> Vec<Range> {
        let mut raw = self.raw(name).to_vec();
        raw.sort_unstable();
        fold_adjacent(&raw)
    }

    /// \return every code point with the property \p name.
    pub fn members(&self, name: &str) -> CodePointSet {
        let mut set = CodePointSet::new();
        for &(lo, hi) in self.raw(name) {
            set.add(Interval::new(lo, hi));
        }
        set
    }
}
