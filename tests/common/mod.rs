#![allow(dead_code)]

use unitables::{
    compile, CharacterTable, CodePoint, CompiledTables, Options, PropertyRanges, RangeMarker,
    RangeTable, UnicodeDataRecord, CODE_POINT_MAX,
};

/// A record with simple case mappings.
pub fn cased(
    cp: CodePoint,
    category: &str,
    upper: Option<CodePoint>,
    lower: Option<CodePoint>,
) -> UnicodeDataRecord {
    UnicodeDataRecord {
        upper_case: upper,
        lower_case: lower,
        ..UnicodeDataRecord::new(cp, category)
    }
}

/// A small slice of the UCD, exercising the interesting corners: ASCII
/// letters, the Latin Extended-A alternating pairs, MICRO SIGN and the Greek
/// sigmas, KELVIN SIGN, DOTTED CAPITAL I, Roman numerals, an ideograph block
/// and the Deseret pairs above U+FFFF.
pub struct Fixture {
    pub chars: CharacterTable,
    pub scripts: PropertyRanges,
    pub props: PropertyRanges,
}

impl Fixture {
    pub fn new() -> Fixture {
        let mut records = vec![UnicodeDataRecord::new(0x20, "Zs")];
        for cp in 0x30..=0x39 {
            records.push(UnicodeDataRecord {
                numeric_value: Some(i64::from(cp - 0x30)),
                ..UnicodeDataRecord::new(cp, "Nd")
            });
        }
        for cp in 0x41..=0x5A {
            records.push(cased(cp, "Lu", None, Some(cp + 0x20)));
        }
        for cp in 0x61..=0x7A {
            records.push(cased(cp, "Ll", Some(cp - 0x20), None));
        }
        records.push(cased(0xB5, "Ll", Some(0x39C), None));
        for cp in (0x100..0x130).step_by(2) {
            records.push(cased(cp, "Lu", None, Some(cp + 1)));
            records.push(cased(cp + 1, "Ll", Some(cp), None));
        }
        records.push(cased(0x130, "Lu", None, Some(0x69)));
        records.push(cased(0x39C, "Lu", None, Some(0x3BC)));
        records.push(cased(0x3A3, "Lu", None, Some(0x3C3)));
        records.push(cased(0x3BC, "Ll", Some(0x39C), None));
        records.push(cased(0x3C2, "Ll", Some(0x3A3), None));
        records.push(cased(0x3C3, "Ll", Some(0x3A3), None));
        records.push(cased(0x212A, "Lu", None, Some(0x6B)));
        for cp in 0x2160..=0x2162 {
            records.push(cased(cp, "Nl", None, Some(cp + 0x10)));
        }
        for cp in 0x2170..=0x2172 {
            records.push(cased(cp, "Nl", Some(cp - 0x10), None));
        }
        records.push(UnicodeDataRecord {
            marker: RangeMarker::First,
            ..UnicodeDataRecord::new(0x3400, "Lo")
        });
        records.push(UnicodeDataRecord {
            marker: RangeMarker::Last,
            ..UnicodeDataRecord::new(0x4DBF, "Lo")
        });
        for cp in 0x10400..=0x10401 {
            records.push(cased(cp, "Lu", None, Some(cp + 0x28)));
        }
        for cp in 0x10428..=0x10429 {
            records.push(cased(cp, "Ll", Some(cp - 0x28), None));
        }
        records.push(UnicodeDataRecord::new(0x1F600, "So"));

        let mut chars = CharacterTable::load(records).unwrap();
        let mut folds: Vec<(CodePoint, CodePoint)> =
            (0x41..=0x5A).map(|cp| (cp, cp + 0x20)).collect();
        folds.extend((0x100..0x130).step_by(2).map(|cp| (cp, cp + 1)));
        folds.extend((0x2160..=0x2162).map(|cp| (cp, cp + 0x10)));
        folds.extend((0x10400..=0x10401).map(|cp| (cp, cp + 0x28)));
        folds.extend([
            (0xB5, 0x3BC),
            (0x39C, 0x3BC),
            (0x3A3, 0x3C3),
            (0x3C2, 0x3C3),
            (0x212A, 0x6B),
        ]);
        for (cp, target) in folds {
            chars.add_fold(cp, target).unwrap();
        }

        let mut scripts = PropertyRanges::new();
        for (name, lo, hi) in [
            ("Common", 0x20, 0x20),
            ("Common", 0x30, 0x39),
            ("Latin", 0x41, 0x5A),
            ("Latin", 0x61, 0x7A),
            ("Common", 0xB5, 0xB5),
            ("Latin", 0x100, 0x130),
            ("Greek", 0x39C, 0x39C),
            ("Greek", 0x3A3, 0x3A3),
            ("Greek", 0x3BC, 0x3BC),
            ("Greek", 0x3C2, 0x3C3),
            ("Latin", 0x212A, 0x212A),
            ("Latin", 0x2160, 0x2162),
            ("Latin", 0x2170, 0x2172),
            ("Han", 0x3400, 0x4DBF),
            ("Deseret", 0x10400, 0x1044F),
            ("Common", 0x1F600, 0x1F600),
        ] {
            scripts.insert(name, lo, hi).unwrap();
        }

        let mut props = PropertyRanges::new();
        for (name, lo, hi) in [
            ("White_Space", 0x20, 0x20),
            ("ASCII_Hex_Digit", 0x30, 0x39),
            ("ASCII_Hex_Digit", 0x41, 0x46),
            ("ASCII_Hex_Digit", 0x61, 0x66),
        ] {
            props.insert(name, lo, hi).unwrap();
        }

        Fixture {
            chars,
            scripts,
            props,
        }
    }

    /// Compile with \p options.
    pub fn compile(&mut self, options: &Options) -> CompiledTables {
        compile(&mut self.chars, &self.scripts, &self.props, options).unwrap()
    }
}

/// Assert the structural invariants of a range table.
pub fn check_well_formed(name: &str, table: &RangeTable) {
    let mut prev_hi: Option<CodePoint> = None;
    for r in table.ranges() {
        assert!(r.lo <= r.hi && r.stride >= 1, "{}: bad range {:?}", name, r);
        assert_eq!((r.hi - r.lo) % r.stride, 0, "{}: {:?}", name, r);
        if let Some(prev_hi) = prev_hi {
            assert!(prev_hi < r.lo, "{}: {:?} out of order", name, r);
        }
        prev_hi = Some(r.hi);
    }
    assert!(table.r16.iter().all(|r| r.hi <= 0xFFFF), "{}", name);
    assert!(table.r32.iter().all(|r| r.lo > 0xFFFF), "{}", name);
    let latin = table.r16.iter().take_while(|r| r.hi <= 0xFF).count();
    assert_eq!(table.latin_offset, latin, "{}", name);
}

/// Assert that \p table contains exactly the code points satisfying
/// \p predicate.
pub fn check_coverage<F: Fn(CodePoint) -> bool>(name: &str, table: &RangeTable, predicate: F) {
    for cp in 0..=CODE_POINT_MAX {
        assert_eq!(table.contains(cp), predicate(cp), "{}: U+{:04X}", name, cp);
    }
}
