//! Comparison of freshly built tables against a trusted reference.
//!
//! Nothing here is fatal: every check runs to completion and returns the
//! mismatches it found, so that one bad table does not hide the others.

use crate::casedelta::CaseMapping;
use crate::chartable::CharacterTable;
use crate::codepointset::{CodePoint, CODE_POINT_MAX};
use crate::error::TableKind;
use crate::properties::PropertyRanges;
use crate::tables::CompiledTables;
use std::collections::BTreeSet;
use std::fmt;

/// Range table comparisons stop after this many mismatches per table.
pub const MAX_MISMATCHES_PER_TABLE: usize = 10;

/// The fold exception families.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum FoldFamily {
    Category,
    Script,
}

impl fmt::Display for FoldFamily {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            FoldFamily::Category => "fold category",
            FoldFamily::Script => "fold script",
        })
    }
}

/// Tables to check against. Every query returns None if the reference does not
/// have the table it needs.
pub trait Reference {
    fn contains(&self, kind: TableKind, name: &str, cp: CodePoint) -> Option<bool>;

    fn to_case(&self, mapping: CaseMapping, cp: CodePoint) -> Option<CodePoint>;

    fn simple_fold(&self, cp: CodePoint) -> Option<CodePoint>;

    /// \return the names of the fold exception tables of \p family.
    fn fold_names(&self, family: FoldFamily) -> Option<Vec<String>>;

    /// \return the members of a fold exception table, in order.
    fn fold_members(&self, family: FoldFamily, name: &str) -> Option<Vec<CodePoint>>;
}

impl Reference for CompiledTables {
    fn contains(&self, kind: TableKind, name: &str, cp: CodePoint) -> Option<bool> {
        self.table(kind, name).map(|t| t.contains(cp))
    }

    fn to_case(&self, mapping: CaseMapping, cp: CodePoint) -> Option<CodePoint> {
        CompiledTables::to_case(self, mapping, cp)
    }

    fn simple_fold(&self, cp: CodePoint) -> Option<CodePoint> {
        CompiledTables::simple_fold(self, cp)
    }

    fn fold_names(&self, family: FoldFamily) -> Option<Vec<String>> {
        self.orbits.as_ref()?;
        let tables = match family {
            FoldFamily::Category => &self.fold_categories,
            FoldFamily::Script => &self.fold_scripts,
        };
        Some(tables.keys().cloned().collect())
    }

    fn fold_members(&self, family: FoldFamily, name: &str) -> Option<Vec<CodePoint>> {
        let tables = match family {
            FoldFamily::Category => &self.fold_categories,
            FoldFamily::Script => &self.fold_scripts,
        };
        tables.get(name).map(|t| t.code_points().collect())
    }
}

/// A difference between the built data and the reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mismatch {
    /// The reference lacks a table.
    MissingTable { table: String },
    /// Membership of \p cp in \p table differs.
    Membership {
        table: String,
        cp: CodePoint,
        expected: bool,
        found: bool,
    },
    /// A case mapping or simple fold of \p cp differs.
    Mapping {
        what: &'static str,
        cp: CodePoint,
        expected: CodePoint,
        found: CodePoint,
    },
    /// A fold exception family has a different number of tables.
    TableCount {
        family: FoldFamily,
        expected: usize,
        found: usize,
    },
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Mismatch::MissingTable { table } => write!(f, "{}: missing from reference", table),
            Mismatch::Membership {
                table,
                cp,
                expected,
                found,
            } => write!(
                f,
                "{}: U+{:04X}: built={} reference={}",
                table, cp, expected, found
            ),
            Mismatch::Mapping {
                what,
                cp,
                expected,
                found,
            } => write!(
                f,
                "{} U+{:04X} should be U+{:04X} is U+{:04X}",
                what, cp, expected, found
            ),
            Mismatch::TableCount {
                family,
                expected,
                found,
            } => write!(f, "{}: {} tables, want {}", family, found, expected),
        }
    }
}

/// Compare membership of every code point in \p table, as decided by
/// \p expected, against the reference's answer.
fn verify_range<R, F>(
    reference: &R,
    kind: TableKind,
    table: &str,
    expected: F,
    out: &mut Vec<Mismatch>,
) where
    R: Reference + ?Sized,
    F: Fn(CodePoint) -> bool,
{
    let mut count = 0;
    for cp in 0..=CODE_POINT_MAX {
        let found = match reference.contains(kind, table, cp) {
            Some(found) => found,
            None => {
                out.push(Mismatch::MissingTable {
                    table: table.to_string(),
                });
                return;
            }
        };
        let expected = expected(cp);
        if expected != found {
            out.push(Mismatch::Membership {
                table: table.to_string(),
                cp,
                expected,
                found,
            });
            count += 1;
            if count >= MAX_MISMATCHES_PER_TABLE {
                return;
            }
        }
    }
}

/// Check the category tables \p names.
pub fn verify_categories<R: Reference + ?Sized>(
    chars: &CharacterTable,
    names: &[String],
    reference: &R,
) -> Vec<Mismatch> {
    let mut out = Vec::new();
    for name in names {
        verify_range(
            reference,
            TableKind::Category,
            name,
            |cp| chars.in_category(cp, name),
            &mut out,
        );
    }
    out
}

/// Check the script or property tables \p names.
pub fn verify_property_ranges<R: Reference + ?Sized>(
    kind: TableKind,
    ranges: &PropertyRanges,
    names: &[String],
    reference: &R,
) -> Vec<Mismatch> {
    let mut out = Vec::new();
    for name in names {
        let members = ranges.members(name);
        verify_range(reference, kind, name, |cp| members.contains(cp), &mut out);
    }
    out
}

/// Check the upper, lower and title mapping of every code point.
pub fn verify_cases<R: Reference + ?Sized>(chars: &CharacterTable, reference: &R) -> Vec<Mismatch> {
    let mut out = Vec::new();
    let checks = [
        (CaseMapping::Lower, "lower"),
        (CaseMapping::Upper, "upper"),
        (CaseMapping::Title, "title"),
    ];
    for cp in 0..=CODE_POINT_MAX {
        let ch = chars.get(cp);
        for &(mapping, what) in &checks {
            let target = match mapping {
                CaseMapping::Lower => ch.lower_case,
                CaseMapping::Upper => ch.upper_case,
                CaseMapping::Title => ch.title_case,
            };
            let expected = if target == 0 { cp } else { target };
            let found = match reference.to_case(mapping, cp) {
                Some(found) => found,
                None => {
                    out.push(Mismatch::MissingTable {
                        table: "case ranges".to_string(),
                    });
                    return out;
                }
            };
            if found != expected {
                out.push(Mismatch::Mapping {
                    what,
                    cp,
                    expected,
                    found,
                });
            }
        }
    }
    out
}

/// Check the simple fold of every code point. \p chars must have been
/// annotated with its case orbits.
pub fn verify_orbits<R: Reference + ?Sized>(chars: &CharacterTable, reference: &R) -> Vec<Mismatch> {
    let mut out = Vec::new();
    for cp in 0..=CODE_POINT_MAX {
        let ch = chars.get(cp);
        let expected = if ch.case_orbit_next != 0 {
            ch.case_orbit_next
        } else if ch.lower_case != cp && ch.lower_case != 0 {
            ch.lower_case
        } else if ch.upper_case != cp && ch.upper_case != 0 {
            ch.upper_case
        } else {
            cp
        };
        match reference.simple_fold(cp) {
            Some(found) if found != expected => out.push(Mismatch::Mapping {
                what: "simple fold",
                cp,
                expected,
                found,
            }),
            Some(_) => {}
            None => {
                out.push(Mismatch::MissingTable {
                    table: "case orbit".to_string(),
                });
                break;
            }
        }
    }
    out
}

/// Check every fold exception table of \p family.
pub fn verify_fold_exceptions<R: Reference + ?Sized>(
    family: FoldFamily,
    built: &CompiledTables,
    reference: &R,
) -> Vec<Mismatch> {
    let mut out = Vec::new();
    let tables = match family {
        FoldFamily::Category => &built.fold_categories,
        FoldFamily::Script => &built.fold_scripts,
    };
    match reference.fold_names(family) {
        Some(names) if names.len() != tables.len() => {
            out.push(Mismatch::TableCount {
                family,
                expected: tables.len(),
                found: names.len(),
            });
            return out;
        }
        Some(_) => {}
        None => {
            out.push(Mismatch::MissingTable {
                table: family.to_string(),
            });
            return out;
        }
    }
    for (name, table) in tables {
        let label = format!("{} {}", family, name);
        let found = match reference.fold_members(family, name) {
            Some(found) => found,
            None => {
                out.push(Mismatch::MissingTable { table: label });
                continue;
            }
        };
        let expected: BTreeSet<CodePoint> = table.code_points().collect();
        let found: BTreeSet<CodePoint> = found.into_iter().collect();
        let membership = |cp: CodePoint, expected: bool| Mismatch::Membership {
            table: label.clone(),
            cp,
            expected,
            found: !expected,
        };
        out.extend(
            found
                .difference(&expected)
                .map(|&cp| membership(cp, false))
                .chain(expected.difference(&found).map(|&cp| membership(cp, true)))
                .take(MAX_MISMATCHES_PER_TABLE),
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chartable::UnicodeDataRecord;
    use crate::ranges::RangeTable;
    use crate::tables::{compile, Options};

    fn build() -> (CharacterTable, CompiledTables) {
        let mut chars = CharacterTable::load(vec![
            UnicodeDataRecord {
                lower_case: Some(0x101),
                ..UnicodeDataRecord::new(0x100, "Lu")
            },
            UnicodeDataRecord {
                upper_case: Some(0x100),
                title_case: Some(0x100),
                ..UnicodeDataRecord::new(0x101, "Ll")
            },
            UnicodeDataRecord::new(0x2000, "Zs"),
        ])
        .unwrap();
        chars.add_fold(0x100, 0x101).unwrap();
        let tables = compile(
            &mut chars,
            &PropertyRanges::new(),
            &PropertyRanges::new(),
            &Options::default(),
        )
        .unwrap();
        (chars, tables)
    }

    #[test]
    fn test_self_check_is_clean() {
        let (chars, tables) = build();
        let names: Vec<String> = tables.categories.keys().cloned().collect();
        assert_eq!(verify_categories(&chars, &names, &tables), vec![]);
        assert_eq!(verify_cases(&chars, &tables), vec![]);
        assert_eq!(verify_orbits(&chars, &tables), vec![]);
        assert_eq!(
            verify_fold_exceptions(FoldFamily::Category, &tables, &tables),
            vec![]
        );
    }

    #[test]
    fn test_mismatches_are_capped() {
        let (chars, mut tables) = build();
        // Claim every code point below 0x20 is upper case.
        tables.categories.insert(
            "Lu".to_string(),
            RangeTable::compact(|cp| cp < 0x20 || cp == 0x100),
        );
        let found = verify_categories(&chars, &["Lu".to_string()], &tables);
        assert_eq!(found.len(), MAX_MISMATCHES_PER_TABLE);
        assert_eq!(
            found[0],
            Mismatch::Membership {
                table: "Lu".to_string(),
                cp: 0,
                expected: false,
                found: true
            }
        );
    }

    #[test]
    fn test_missing_tables() {
        let (chars, mut tables) = build();
        let found = verify_categories(&chars, &["Sm".to_string()], &tables);
        assert_eq!(
            found,
            vec![Mismatch::MissingTable {
                table: "Sm".to_string()
            }]
        );
        tables.case_ranges = None;
        assert_eq!(verify_cases(&chars, &tables).len(), 1);
        assert_eq!(verify_orbits(&chars, &tables).len(), 1);
    }

    #[test]
    fn test_wrong_mapping() {
        let (chars, mut tables) = build();
        if let Some(ranges) = tables.case_ranges.as_mut() {
            ranges.clear();
        }
        let found = verify_cases(&chars, &tables);
        assert_eq!(
            found[0],
            Mismatch::Mapping {
                what: "lower",
                cp: 0x100,
                expected: 0x101,
                found: 0x100
            }
        );
        assert_eq!(
            found[0].to_string(),
            "lower U+0100 should be U+0101 is U+0100"
        );
    }
}
