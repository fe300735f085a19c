//! Simple case folding orbits and fold exceptions.
//!
//! Code points that fold to the same value form an orbit. Each orbit is stored
//! as a cyclic chain sorted by code point, so that repeatedly asking for the
//! "next" fold of a code point visits every case variant. Orbits that are just
//! an upper/lower pair are left out: consumers recover those from the plain
//! case tables.

use crate::chartable::CharacterTable;
use crate::codepointset::{CodePoint, CodePointSet, CODE_POINT_MAX};
use crate::properties::PropertyRanges;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CaseOrbits {
    next: BTreeMap<CodePoint, CodePoint>,
}

impl CaseOrbits {
    pub fn build(chars: &CharacterTable) -> CaseOrbits {
        // Groups keyed by the canonical folded code point.
        let mut groups: BTreeMap<CodePoint, Vec<CodePoint>> = BTreeMap::new();
        for (cp, ch) in (0..=CODE_POINT_MAX).zip(chars.records()) {
            if ch.fold_case != 0 {
                groups
                    .entry(ch.fold_case)
                    .or_insert_with(|| vec![ch.fold_case])
                    .push(cp);
            }
        }

        // Code points with a case mapping but no fold group: assuming they pair
        // with their upper or lower form would be wrong.
        for (cp, ch) in (0..=CODE_POINT_MAX).zip(chars.records()) {
            let folded = if ch.fold_case == 0 { cp } else { ch.fold_case };
            let changes_case = (ch.upper_case != 0 && ch.upper_case != cp)
                || (ch.lower_case != 0 && ch.lower_case != cp);
            if changes_case && !groups.contains_key(&folded) {
                groups.insert(cp, vec![cp]);
            }
        }

        groups.retain(|_, group| {
            group.sort_unstable();
            group.dedup();
            !is_case_pair(chars, group)
        });

        let mut next = BTreeMap::new();
        for group in groups.values() {
            for (idx, &cp) in group.iter().enumerate() {
                next.insert(cp, group[(idx + 1) % group.len()]);
            }
        }
        log::debug!("{} orbit groups, {} pairs", groups.len(), next.len());
        CaseOrbits { next }
    }

    /// \return the successor of \p cp in its orbit, if it has one.
    pub fn next(&self, cp: CodePoint) -> Option<CodePoint> {
        self.next.get(&cp).copied()
    }

    /// Iterate over (code point, successor) in code point order.
    pub fn iter(&self) -> impl Iterator<Item = (CodePoint, CodePoint)> + '_ {
        self.next.iter().map(|(&cp, &next)| (cp, next))
    }

    pub fn len(&self) -> usize {
        self.next.len()
    }

    pub fn is_empty(&self) -> bool {
        self.next.is_empty()
    }

    /// \return the members of the orbit containing \p cp, starting at \p cp.
    pub fn orbit(&self, cp: CodePoint) -> Vec<CodePoint> {
        let mut members = vec![cp];
        let mut cur = cp;
        while let Some(next) = self.next(cur) {
            if next == cp {
                break;
            }
            members.push(next);
            cur = next;
        }
        members
    }

    /// \return the code points that are case-fold equivalent to \p cp,
    /// including \p cp itself.
    pub fn fold_equivalents(&self, chars: &CharacterTable, cp: CodePoint) -> Vec<CodePoint> {
        if self.next.contains_key(&cp) {
            return self.orbit(cp);
        }
        let ch = chars.get(cp);
        let mut equivalents = vec![cp];
        equivalents.extend([ch.upper_case, ch.lower_case].into_iter().filter(|&c| c != 0));
        equivalents
    }
}

/// Is \p group exactly an upper case letter and its lower case form, each
/// mapping to the other?
fn is_case_pair(chars: &CharacterTable, group: &[CodePoint]) -> bool {
    let &[a, b] = group else {
        return false;
    };
    let pairs = |upper: CodePoint, lower: CodePoint| {
        chars.get(upper).lower_case == lower && chars.get(lower).upper_case == upper
    };
    pairs(a, b) || pairs(b, a)
}

/// Code points that are fold-equivalent to a member of a category or script
/// without being members themselves.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FoldExceptions {
    pub categories: BTreeMap<String, CodePointSet>,
    pub scripts: BTreeMap<String, CodePointSet>,
}

impl FoldExceptions {
    pub fn build(
        chars: &CharacterTable,
        orbits: &CaseOrbits,
        scripts: &PropertyRanges,
    ) -> FoldExceptions {
        let mut result = FoldExceptions::default();
        for name in chars.categories() {
            let class: CodePointSet = (0..=CODE_POINT_MAX)
                .filter(|&cp| chars.in_category(cp, &name))
                .collect();
            let exceptions = fold_exceptions(chars, orbits, &class);
            if !exceptions.is_empty() {
                log::debug!("category {}: {} fold exceptions", name, exceptions.len());
                result.categories.insert(name, exceptions);
            }
        }
        for name in scripts.names() {
            let exceptions = fold_exceptions(chars, orbits, &scripts.members(name));
            if !exceptions.is_empty() {
                log::debug!("script {}: {} fold exceptions", name, exceptions.len());
                result.scripts.insert(name.to_string(), exceptions);
            }
        }
        result
    }
}

/// \return the code points fold-equivalent to members of \p class but not in
/// \p class.
pub fn fold_exceptions(
    chars: &CharacterTable,
    orbits: &CaseOrbits,
    class: &CodePointSet,
) -> CodePointSet {
    let mut equivalents = CodePointSet::new();
    for cp in class.iter() {
        for eq in orbits.fold_equivalents(chars, cp) {
            // cp itself is removed below.
            if eq != cp {
                equivalents.add_one(eq);
            }
        }
    }
    equivalents.remove(class.intervals());
    equivalents
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chartable::UnicodeDataRecord;

    fn cased(cp: u32, cat: &str, upper: Option<u32>, lower: Option<u32>) -> UnicodeDataRecord {
        UnicodeDataRecord {
            upper_case: upper,
            lower_case: lower,
            ..UnicodeDataRecord::new(cp, cat)
        }
    }

    #[test]
    fn test_plain_orbit() {
        let mut table = CharacterTable::load(vec![
            UnicodeDataRecord::new(10, "So"),
            UnicodeDataRecord::new(20, "So"),
            UnicodeDataRecord::new(30, "So"),
        ])
        .unwrap();
        table.add_fold(20, 10).unwrap();
        table.add_fold(30, 10).unwrap();
        let orbits = CaseOrbits::build(&table);
        assert_eq!(
            orbits.iter().collect::<Vec<_>>(),
            vec![(10, 20), (20, 30), (30, 10)]
        );
        assert_eq!(orbits.orbit(20), vec![20, 30, 10]);

        table.annotate_orbits(&orbits);
        assert_eq!(table.get(30).case_orbit_next, 10);
        assert_eq!(table.get(31).case_orbit_next, 0);
    }

    #[test]
    fn test_case_pair_is_pruned() {
        let mut table = CharacterTable::load(vec![
            cased(0x41, "Lu", None, Some(0x61)),
            cased(0x61, "Ll", Some(0x41), None),
        ])
        .unwrap();
        table.add_fold(0x41, 0x61).unwrap();
        let orbits = CaseOrbits::build(&table);
        assert!(orbits.is_empty());
        assert_eq!(orbits.fold_equivalents(&table, 0x41), vec![0x41, 0x41, 0x61]);
    }

    #[test]
    fn test_kelvin_sign() {
        // K, k and KELVIN SIGN all fold to k.
        let mut table = CharacterTable::load(vec![
            cased(0x4B, "Lu", None, Some(0x6B)),
            cased(0x6B, "Ll", Some(0x4B), None),
            cased(0x212A, "Lu", None, Some(0x6B)),
        ])
        .unwrap();
        table.add_fold(0x4B, 0x6B).unwrap();
        table.add_fold(0x212A, 0x6B).unwrap();
        let orbits = CaseOrbits::build(&table);
        assert_eq!(
            orbits.iter().collect::<Vec<_>>(),
            vec![(0x4B, 0x6B), (0x6B, 0x212A), (0x212A, 0x4B)]
        );

        let exceptions = FoldExceptions::build(&table, &orbits, &PropertyRanges::new());
        // Ll contains k, whose orbit reaches K and KELVIN SIGN.
        let ll = &exceptions.categories["Ll"];
        assert_eq!(ll.iter().collect::<Vec<_>>(), vec![0x4B, 0x212A]);
        let lu = &exceptions.categories["Lu"];
        assert_eq!(lu.iter().collect::<Vec<_>>(), vec![0x6B]);
        // L contains all of them.
        assert!(!exceptions.categories.contains_key("L"));
    }

    #[test]
    fn test_singleton_override() {
        // U+0130 lower cases to i, but does not fold to it.
        let table = CharacterTable::load(vec![
            cased(0x69, "Ll", Some(0x49), None),
            cased(0x130, "Lu", None, Some(0x69)),
        ])
        .unwrap();
        let orbits = CaseOrbits::build(&table);
        assert_eq!(orbits.next(0x130), Some(0x130));
        assert_eq!(orbits.next(0x69), Some(0x69));
        assert_eq!(orbits.fold_equivalents(&table, 0x130), vec![0x130]);
    }

    #[test]
    fn test_script_exceptions() {
        let mut table = CharacterTable::load(vec![
            cased(0x4B, "Lu", None, Some(0x6B)),
            cased(0x6B, "Ll", Some(0x4B), None),
            cased(0x212A, "Lu", None, Some(0x6B)),
        ])
        .unwrap();
        table.add_fold(0x4B, 0x6B).unwrap();
        table.add_fold(0x212A, 0x6B).unwrap();
        let orbits = CaseOrbits::build(&table);
        let mut scripts = PropertyRanges::new();
        scripts.insert("Latin", 0x41, 0x5A).unwrap();
        scripts.insert("Latin", 0x61, 0x7A).unwrap();
        scripts.insert("Common", 0x20, 0x20).unwrap();
        let exceptions = FoldExceptions::build(&table, &orbits, &scripts);
        assert_eq!(
            exceptions.scripts["Latin"].iter().collect::<Vec<_>>(),
            vec![0x212A]
        );
        assert!(!exceptions.scripts.contains_key("Common"));
    }
}
