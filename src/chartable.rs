//! The dense per-code-point character table.

use crate::codepointset::{CodePoint, CODE_POINT_MAX};
use crate::error::{Error, Result};
use crate::orbits::CaseOrbits;
use std::fmt;

/// Number of entries in a CharacterTable.
pub const NUM_CODE_POINTS: usize = CODE_POINT_MAX as usize + 1;

/// The merged one-letter categories. A code point belongs to one of these if
/// the first letter of its category matches.
pub const MERGED_CATEGORIES: [&str; 7] = ["C", "L", "M", "N", "P", "S", "Z"];

/// A two letter general category such as "Lu" or "Nd".
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Category([u8; 2]);

impl Category {
    /// Parse a category name, which must be two ASCII letters.
    pub fn new(name: &str) -> Option<Category> {
        match *name.as_bytes() {
            [a, b] if a.is_ascii_alphabetic() && b.is_ascii_alphabetic() => {
                Some(Category([a, b]))
            }
            _ => None,
        }
    }

    pub fn as_str(&self) -> &str {
        // Only constructed from ASCII.
        std::str::from_utf8(&self.0).unwrap_or("")
    }

    /// \return the merged category letter, e.g. 'L' for "Lu".
    pub fn major(&self) -> char {
        self.0[0] as char
    }

    /// \return whether this category is \p name, which may be a merged
    /// one-letter name.
    pub fn matches(&self, name: &str) -> bool {
        match name.as_bytes() {
            [major] => self.0[0] == *major,
            _ => self.as_str() == name,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The decoded properties of one code point.
/// Mapping fields use 0 to mean "no mapping".
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct CharacterRecord {
    /// The code point itself, or 0 if this entry was never defined.
    pub code_point: CodePoint,
    pub category: Option<Category>,
    pub upper_case: CodePoint,
    pub lower_case: CodePoint,
    pub title_case: CodePoint,
    /// Simple case folding target.
    pub fold_case: CodePoint,
    /// Next code point in the simple case folding orbit.
    pub case_orbit_next: CodePoint,
}

impl CharacterRecord {
    /// Return whether this entry was defined by the primary data.
    pub fn is_defined(&self) -> bool {
        self.code_point != 0
    }
}

/// Marks records which open or close a block of identical code points, like
/// `<CJK Ideograph Extension A, First>`.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum RangeMarker {
    Single,
    First,
    Last,
}

/// One parsed row of the primary data set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnicodeDataRecord {
    pub code_point: CodePoint,
    pub category: String,
    pub upper_case: Option<CodePoint>,
    pub lower_case: Option<CodePoint>,
    pub title_case: Option<CodePoint>,
    /// The numeric value, if it is an integer.
    pub numeric_value: Option<i64>,
    pub marker: RangeMarker,
}

impl UnicodeDataRecord {
    /// A record with the given category and no mappings.
    pub fn new(code_point: CodePoint, category: &str) -> UnicodeDataRecord {
        UnicodeDataRecord {
            code_point,
            category: category.to_string(),
            upper_case: None,
            lower_case: None,
            title_case: None,
            numeric_value: None,
            marker: RangeMarker::Single,
        }
    }
}

/// A flat table of CharacterRecords indexed by code point.
pub struct CharacterTable {
    chars: Vec<CharacterRecord>,
    categories: Vec<Category>,
}

impl Default for CharacterTable {
    fn default() -> Self {
        Self::new()
    }
}

impl CharacterTable {
    pub fn new() -> CharacterTable {
        CharacterTable {
            chars: vec![CharacterRecord::default(); NUM_CODE_POINTS],
            categories: Vec::new(),
        }
    }

    /// Build a table from the rows of the primary data set, in file order.
    pub fn load<I>(records: I) -> Result<CharacterTable>
    where
        I: IntoIterator<Item = UnicodeDataRecord>,
    {
        let mut table = CharacterTable::new();
        let mut first: Option<CodePoint> = None;
        for record in records {
            let cp = record.code_point;
            let marker = record.marker;
            table.define(record)?;
            match marker {
                RangeMarker::Single if first.is_some() => {
                    return Err(Error::RangeState { cp, state: "normal" })
                }
                RangeMarker::Single => {}
                RangeMarker::First if first.is_some() => {
                    return Err(Error::RangeState { cp, state: "first" })
                }
                RangeMarker::First => first = Some(cp),
                RangeMarker::Last => match first.take() {
                    Some(lo) => table.fill_block(lo, cp)?,
                    None => return Err(Error::RangeState { cp, state: "last" }),
                },
            }
        }
        Ok(table)
    }

    /// Define a single code point. Each code point may be defined once.
    pub fn define(&mut self, record: UnicodeDataRecord) -> Result<()> {
        let cp = record.code_point;
        if cp > CODE_POINT_MAX {
            return Err(Error::OutOfDomain(cp));
        }
        if cp == 0 {
            // 0 is the unset value.
            return Ok(());
        }
        if self.chars[cp as usize].is_defined() {
            return Err(Error::Duplicate(cp));
        }
        let category = Category::new(&record.category).ok_or_else(|| Error::Malformed {
            cp,
            reason: format!("bad category {:?}", record.category),
        })?;
        if category.as_str() == "Nd" && record.numeric_value.is_none() {
            return Err(Error::Malformed {
                cp,
                reason: "bad numeric field".to_string(),
            });
        }
        for target in [record.upper_case, record.lower_case, record.title_case]
            .into_iter()
            .flatten()
        {
            if target > CODE_POINT_MAX {
                return Err(Error::OutOfDomain(target));
            }
        }

        // A letter's own case mapping is itself.
        let (upper, lower, title) = match category.as_str() {
            "Lu" => (Some(cp), record.lower_case, record.title_case),
            "Ll" => (record.upper_case, Some(cp), record.title_case),
            "Lt" => (record.upper_case, record.lower_case, Some(cp)),
            _ => (record.upper_case, record.lower_case, record.title_case),
        };
        // An absent title case mapping is the upper case mapping.
        let title = title.or(upper);
        log::trace!("define U+{:04X} {}", cp, category);
        self.chars[cp as usize] = CharacterRecord {
            code_point: cp,
            category: Some(category),
            upper_case: upper.unwrap_or(0),
            lower_case: lower.unwrap_or(0),
            title_case: title.unwrap_or(0),
            fold_case: 0,
            case_orbit_next: 0,
        };
        if let Err(idx) = self.categories.binary_search(&category) {
            self.categories.insert(idx, category);
        }
        Ok(())
    }

    /// Copy the record at \p lo to every code point up to and including \p hi.
    /// None of them may already be defined.
    fn fill_block(&mut self, lo: CodePoint, hi: CodePoint) -> Result<()> {
        log::debug!("filling block U+{:04X}..U+{:04X}", lo, hi);
        let template = self.chars[lo as usize];
        for cp in (lo + 1)..=hi {
            let slot = &mut self.chars[cp as usize];
            if slot.is_defined() {
                return Err(Error::Duplicate(cp));
            }
            *slot = CharacterRecord {
                code_point: cp,
                ..template
            };
        }
        Ok(())
    }

    /// Record the simple case folding of \p cp.
    pub fn add_fold(&mut self, cp: CodePoint, target: CodePoint) -> Result<()> {
        for p in [cp, target] {
            if p > CODE_POINT_MAX {
                return Err(Error::OutOfDomain(p));
            }
        }
        self.chars[cp as usize].fold_case = target;
        Ok(())
    }

    /// Write the orbit successors into the records.
    pub fn annotate_orbits(&mut self, orbits: &CaseOrbits) {
        for (cp, next) in orbits.iter() {
            self.chars[cp as usize].case_orbit_next = next;
        }
    }

    /// \return the record for \p cp. Code points past the end get an undefined
    /// record.
    #[inline]
    pub fn get(&self, cp: CodePoint) -> CharacterRecord {
        self.chars.get(cp as usize).copied().unwrap_or_default()
    }

    /// \return whether \p cp is in the category \p name, which may be a merged
    /// one-letter category.
    #[inline]
    pub fn in_category(&self, cp: CodePoint, name: &str) -> bool {
        self.get(cp).category.map_or(false, |c| c.matches(name))
    }

    /// \return every category name seen, plus the merged one-letter names,
    /// sorted.
    pub fn categories(&self) -> Vec<String> {
        let mut names: Vec<String> = MERGED_CATEGORIES.iter().map(|s| s.to_string()).collect();
        names.extend(self.categories.iter().map(|c| c.to_string()));
        names.sort();
        names.dedup();
        names
    }

    /// \return whether \p name is a known category.
    pub fn has_category(&self, name: &str) -> bool {
        MERGED_CATEGORIES.contains(&name) || self.categories.iter().any(|c| c.as_str() == name)
    }

    /// Iterate over every record, including undefined ones.
    pub fn records(&self) -> impl Iterator<Item = &CharacterRecord> {
        self.chars.iter()
    }
}
