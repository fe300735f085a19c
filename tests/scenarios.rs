// Work around dead code warnings: rust-lang issue #46379
pub mod common;

use common::cased;
use unitables::{
    compile, CaseDelta, CaseDeltaRange, CharacterTable, Options, PropertyRanges, Range,
    RangeTable, Selection, UnicodeDataRecord,
};

fn compact_set(members: &[u32]) -> RangeTable {
    RangeTable::compact(|cp| members.contains(&cp))
}

#[test]
fn test_unit_stride_run() {
    let table = compact_set(&[5, 6, 7]);
    assert_eq!(table.r16, vec![Range::new(5, 7, 1)]);
    assert!(table.r32.is_empty());
    assert_eq!(table.latin_offset, 1);
}

#[test]
fn test_strided_run() {
    let table = compact_set(&[5, 7, 9, 11]);
    assert_eq!(table.r16, vec![Range::new(5, 11, 2)]);
}

#[test]
fn test_straddle_is_split() {
    let table = compact_set(&[0xFFFE, 0x10000]);
    assert_eq!(table.r16, vec![Range::new(0xFFFE, 0xFFFE, 1)]);
    assert_eq!(table.r32, vec![Range::new(0x10000, 0x10000, 1)]);
    assert_eq!(table.latin_offset, 0);
}

#[test]
fn test_alternating_pair() {
    let mut chars = CharacterTable::load(vec![
        cased(0x1E00, "Lu", None, Some(0x1E01)),
        cased(0x1E01, "Ll", Some(0x1E00), None),
    ])
    .unwrap();
    let options = Options {
        categories: Selection::Skip,
        scripts: Selection::Skip,
        properties: Selection::Skip,
        cases: true,
        folds: false,
    };
    let tables = compile(
        &mut chars,
        &PropertyRanges::new(),
        &PropertyRanges::new(),
        &options,
    )
    .unwrap();
    assert_eq!(
        tables.case_ranges,
        Some(vec![CaseDeltaRange {
            lo: 0x1E00,
            hi: 0x1E01,
            delta: CaseDelta::UpperLower,
        }])
    );
    assert!(tables.orbits.is_none());
    assert!(tables.categories.is_empty());
}

#[test]
fn test_shared_fold_target() {
    let mut chars = CharacterTable::load(vec![
        UnicodeDataRecord::new(10, "So"),
        UnicodeDataRecord::new(20, "So"),
        UnicodeDataRecord::new(30, "So"),
    ])
    .unwrap();
    chars.add_fold(20, 10).unwrap();
    chars.add_fold(30, 10).unwrap();
    let tables = compile(
        &mut chars,
        &PropertyRanges::new(),
        &PropertyRanges::new(),
        &Options::default(),
    )
    .unwrap();
    let orbits = tables.orbits.as_ref().unwrap();
    assert_eq!(
        orbits.iter().collect::<Vec<_>>(),
        vec![(10, 20), (20, 30), (30, 10)]
    );
    assert_eq!(chars.get(20).case_orbit_next, 30);
    assert_eq!(tables.simple_fold(30), Some(10));
    // All three share a category, so there are no exceptions.
    assert!(tables.fold_categories.is_empty());
}
