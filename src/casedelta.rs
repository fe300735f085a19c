//! Run-length encoding of the simple case mappings.
//!
//! Every code point whose upper, lower or title mapping is not itself gets
//! covered by a CaseDeltaRange. Most ranges store the three signed deltas
//! shared by all their members. The exception is the very common layout of
//! scripts where upper and lower forms alternate (`Ā ā Ă ă ...`): such runs are
//! stored once with the UpperLower marker instead of one range per pair.

use crate::chartable::CharacterTable;
use crate::codepointset::{CodePoint, CODE_POINT_MAX};
use crate::error::{Error, Result};

/// The case a code point plays in its own mappings.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum CaseKind {
    Upper,
    Lower,
    Title,
    None,
    /// Not present in the source data. Never merged with a neighbor.
    Missing,
}

/// Which mapping to look up.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum CaseMapping {
    Upper,
    Lower,
    Title,
}

/// The case behavior of a single code point.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct CaseState {
    pub point: CodePoint,
    pub kind: CaseKind,
    pub delta_to_upper: i32,
    pub delta_to_lower: i32,
    pub delta_to_title: i32,
}

impl CaseState {
    pub fn of(chars: &CharacterTable, cp: CodePoint) -> CaseState {
        let ch = chars.get(cp);
        let mut state = CaseState {
            point: cp,
            kind: CaseKind::None,
            delta_to_upper: 0,
            delta_to_lower: 0,
            delta_to_title: 0,
        };
        if !ch.is_defined() {
            state.kind = CaseKind::Missing;
            return state;
        }
        state.kind = if ch.code_point == ch.upper_case {
            CaseKind::Upper
        } else if ch.code_point == ch.lower_case {
            CaseKind::Lower
        } else if ch.code_point == ch.title_case {
            CaseKind::Title
        } else if ch.lower_case != 0 {
            // Things like ROMAN NUMERAL TWO do not call themselves upper case
            // but have a lower case.
            CaseKind::Upper
        } else if ch.upper_case != 0 {
            CaseKind::Lower
        } else {
            CaseKind::None
        };

        let delta = |target: CodePoint| {
            if target == 0 {
                0
            } else {
                target as i32 - cp as i32
            }
        };
        state.delta_to_upper = delta(ch.upper_case);
        state.delta_to_lower = delta(ch.lower_case);
        state.delta_to_title = delta(ch.title_case);
        state
    }

    fn deltas(&self) -> (i32, i32, i32) {
        (self.delta_to_upper, self.delta_to_lower, self.delta_to_title)
    }

    /// Whether this code point maps to itself in every case.
    fn is_identity(&self) -> bool {
        self.deltas() == (0, 0, 0)
    }

    /// Does this code point begin an upper/lower pair: lower is the next code
    /// point, no other mappings.
    fn is_upper_lower(&self) -> bool {
        self.deltas() == (0, 1, 0)
    }

    /// Does this code point end an upper/lower pair: upper and title are the
    /// previous code point.
    fn is_lower_upper(&self) -> bool {
        self.deltas() == (-1, 0, -1)
    }

    /// Is \p d a continuation of the run ending with self?
    fn adjacent(&self, d: &CaseState) -> bool {
        let (c, d) = if d.point < self.point {
            (d, self)
        } else {
            (self, d)
        };
        if d.point != c.point + 1 {
            false
        } else if d.kind != c.kind {
            c.upper_lower_adjacent(d)
        } else if matches!(c.kind, CaseKind::None | CaseKind::Missing) {
            false
        } else {
            c.deltas() == d.deltas()
        }
    }

    /// Are \p self and \p d the two halves of an upper/lower pair, in either
    /// order?
    fn upper_lower_adjacent(&self, d: &CaseState) -> bool {
        let (upper, lower) = match (self.kind, d.kind) {
            (CaseKind::Upper, CaseKind::Lower) => (self, d),
            (CaseKind::Lower, CaseKind::Upper) => (d, self),
            _ => return false,
        };
        upper.is_upper_lower() && lower.is_lower_upper()
    }
}

/// How the members of a CaseDeltaRange map.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum CaseDelta {
    /// Every member maps by adding these deltas.
    Deltas { upper: i32, lower: i32, title: i32 },
    /// Members alternate upper, lower, upper, lower, ... starting at lo.
    UpperLower,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct CaseDeltaRange {
    pub lo: CodePoint,
    pub hi: CodePoint,
    pub delta: CaseDelta,
}

impl CaseDeltaRange {
    /// Apply this range's mapping to \p cp, which must be within the range.
    pub fn apply(&self, mapping: CaseMapping, cp: CodePoint) -> CodePoint {
        debug_assert!(self.lo <= cp && cp <= self.hi);
        match self.delta {
            CaseDelta::UpperLower => {
                // Even offsets are the upper (and title) forms.
                let pair_start = self.lo + ((cp - self.lo) & !1);
                match mapping {
                    CaseMapping::Upper | CaseMapping::Title => pair_start,
                    CaseMapping::Lower => pair_start + 1,
                }
            }
            CaseDelta::Deltas {
                upper,
                lower,
                title,
            } => {
                let delta = match mapping {
                    CaseMapping::Upper => upper,
                    CaseMapping::Lower => lower,
                    CaseMapping::Title => title,
                };
                (cp as i64 + delta as i64) as CodePoint
            }
        }
    }
}

/// \return the range for a finished run, or None if the run maps to itself.
fn finish_run(lo: &CaseState, hi: &CaseState) -> Result<Option<CaseDeltaRange>> {
    if lo.is_identity() {
        return Ok(None);
    }
    let delta = if hi.point > lo.point && lo.is_upper_lower() {
        CaseDelta::UpperLower
    } else if hi.point > lo.point && lo.is_lower_upper() {
        return Err(Error::LowerUpper(lo.point));
    } else {
        CaseDelta::Deltas {
            upper: lo.delta_to_upper,
            lower: lo.delta_to_lower,
            title: lo.delta_to_title,
        }
    };
    Ok(Some(CaseDeltaRange {
        lo: lo.point,
        hi: hi.point,
        delta,
    }))
}

/// Compact the case mappings of every code point into maximal runs.
pub fn compact_case_deltas(chars: &CharacterTable) -> Result<Vec<CaseDeltaRange>> {
    let mut ranges = Vec::new();
    // The first state of the current run, if the run is worth recording.
    let mut start: Option<CaseState> = None;
    let mut prev = CaseState::of(chars, 0);
    for cp in 1..=CODE_POINT_MAX {
        let state = CaseState::of(chars, cp);
        if prev.adjacent(&state) {
            prev = state;
            continue;
        }
        if let Some(lo) = start.take() {
            ranges.extend(finish_run(&lo, &prev)?);
        }
        if !matches!(state.kind, CaseKind::None | CaseKind::Missing) {
            start = Some(state);
        }
        prev = state;
    }
    if let Some(lo) = start {
        ranges.extend(finish_run(&lo, &prev)?);
    }
    log::debug!("{} case ranges", ranges.len());
    Ok(ranges)
}

/// Look up the \p mapping of \p cp in \p ranges, which must be sorted.
/// Code points not covered map to themselves.
pub fn to_case(ranges: &[CaseDeltaRange], mapping: CaseMapping, cp: CodePoint) -> CodePoint {
    let found = ranges.binary_search_by(|r| {
        if r.lo > cp {
            core::cmp::Ordering::Greater
        } else if r.hi < cp {
            core::cmp::Ordering::Less
        } else {
            core::cmp::Ordering::Equal
        }
    });
    match found {
        Ok(idx) => ranges[idx].apply(mapping, cp),
        Err(_) => cp,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chartable::UnicodeDataRecord;

    fn rec(cp: u32, cat: &str, upper: Option<u32>, lower: Option<u32>) -> UnicodeDataRecord {
        UnicodeDataRecord {
            upper_case: upper,
            lower_case: lower,
            title_case: upper,
            ..UnicodeDataRecord::new(cp, cat)
        }
    }

    #[test]
    fn test_single_pair_is_alternating() {
        let table = CharacterTable::load(vec![
            rec(0x100, "Lu", None, Some(0x101)),
            rec(0x101, "Ll", Some(0x100), None),
        ])
        .unwrap();
        let ranges = compact_case_deltas(&table).unwrap();
        assert_eq!(
            ranges,
            vec![CaseDeltaRange {
                lo: 0x100,
                hi: 0x101,
                delta: CaseDelta::UpperLower
            }]
        );
    }

    #[test]
    fn test_title_defaults_to_upper() {
        // Neither record has a title mapping, nor is it a letter.
        let table = CharacterTable::load(vec![
            UnicodeDataRecord {
                lower_case: Some(0x2C01),
                ..UnicodeDataRecord::new(0x2C00, "So")
            },
            UnicodeDataRecord {
                upper_case: Some(0x2C00),
                ..UnicodeDataRecord::new(0x2C01, "So")
            },
        ])
        .unwrap();
        let ranges = compact_case_deltas(&table).unwrap();
        assert_eq!(
            ranges,
            vec![CaseDeltaRange {
                lo: 0x2C00,
                hi: 0x2C01,
                delta: CaseDelta::UpperLower
            }]
        );
    }

    #[test]
    fn test_alternating_run_and_uniform_run() {
        let mut records = Vec::new();
        for cp in 0x41..=0x43 {
            records.push(rec(cp, "Lu", None, Some(cp + 0x20)));
        }
        for cp in 0x61..=0x63 {
            records.push(rec(cp, "Ll", Some(cp - 0x20), None));
        }
        for cp in (0x100..0x106).step_by(2) {
            records.push(rec(cp, "Lu", None, Some(cp + 1)));
            records.push(rec(cp + 1, "Ll", Some(cp), None));
        }
        records.sort_by_key(|r| r.code_point);
        let table = CharacterTable::load(records).unwrap();
        let ranges = compact_case_deltas(&table).unwrap();
        assert_eq!(
            ranges,
            vec![
                CaseDeltaRange {
                    lo: 0x41,
                    hi: 0x43,
                    delta: CaseDelta::Deltas {
                        upper: 0,
                        lower: 32,
                        title: 0
                    }
                },
                CaseDeltaRange {
                    lo: 0x61,
                    hi: 0x63,
                    delta: CaseDelta::Deltas {
                        upper: -32,
                        lower: 0,
                        title: -32
                    }
                },
                CaseDeltaRange {
                    lo: 0x100,
                    hi: 0x105,
                    delta: CaseDelta::UpperLower
                },
            ]
        );
        for cp in 0x100..=0x105 {
            let want_upper = cp & !1;
            assert_eq!(to_case(&ranges, CaseMapping::Upper, cp), want_upper);
            assert_eq!(to_case(&ranges, CaseMapping::Title, cp), want_upper);
            assert_eq!(to_case(&ranges, CaseMapping::Lower, cp), want_upper + 1);
        }
        assert_eq!(to_case(&ranges, CaseMapping::Lower, 0x42), 0x62);
        assert_eq!(to_case(&ranges, CaseMapping::Upper, 0x62), 0x42);
        assert_eq!(to_case(&ranges, CaseMapping::Upper, 0x42), 0x42);
        assert_eq!(to_case(&ranges, CaseMapping::Upper, 0x30), 0x30);
    }

    #[test]
    fn test_uncased_letters_omitted() {
        let table = CharacterTable::load(vec![
            UnicodeDataRecord::new(0x5D0, "Lo"),
            UnicodeDataRecord::new(0x5D1, "Lo"),
        ])
        .unwrap();
        assert!(compact_case_deltas(&table).unwrap().is_empty());
    }

    #[test]
    fn test_case_state_second_guesses() {
        // ROMAN NUMERAL TWO: Nl with a lower mapping.
        let table = CharacterTable::load(vec![
            rec(0x2161, "Nl", None, Some(0x2171)),
            rec(0x2171, "Nl", Some(0x2161), None),
        ])
        .unwrap();
        let state = CaseState::of(&table, 0x2161);
        assert_eq!(state.kind, CaseKind::Upper);
        assert_eq!(state.delta_to_lower, 0x10);
        let state = CaseState::of(&table, 0x2171);
        assert_eq!(state.kind, CaseKind::Lower);
        assert_eq!(state.delta_to_upper, -0x10);
        assert_eq!(CaseState::of(&table, 0x2162).kind, CaseKind::Missing);
    }

    #[test]
    fn test_lower_upper_is_fatal() {
        // A lower case letter followed by its upper case form.
        let table = CharacterTable::load(vec![
            rec(0x200, "Ll", Some(0x1FF), None),
            rec(0x201, "Lu", None, Some(0x202)),
            rec(0x202, "Ll", Some(0x201), None),
        ])
        .unwrap();
        assert_eq!(compact_case_deltas(&table), Err(Error::LowerUpper(0x200)));
    }
}
