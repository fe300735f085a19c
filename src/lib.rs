/*!

# unitables - compact Unicode tables

This crate turns the Unicode Character Database into compact tables suitable for embedding as static data: sorted range tables for categories, scripts and properties, run-length encoded case mappings, and simple case folding orbits.

It does no Unicode processing at query time. The lookup helpers exist to test and verify the built tables.

# Example: compile tables from parsed records

```rust
use unitables::{compile, CharacterTable, Options, PropertyRanges, UnicodeDataRecord};

let mut chars = CharacterTable::load(vec![
    UnicodeDataRecord {
        lower_case: Some(0x61),
        ..UnicodeDataRecord::new(0x41, "Lu")
    },
    UnicodeDataRecord {
        upper_case: Some(0x41),
        title_case: Some(0x41),
        ..UnicodeDataRecord::new(0x61, "Ll")
    },
])
.unwrap();
chars.add_fold(0x41, 0x61).unwrap();

let tables = compile(
    &mut chars,
    &PropertyRanges::new(),
    &PropertyRanges::new(),
    &Options::default(),
)
.unwrap();
assert!(tables.categories["Lu"].contains(0x41));
assert_eq!(tables.simple_fold(0x61), Some(0x41));
```

# Range tables

A set of code points is stored as a list of `(lo, hi, stride)` progressions, found by a single greedy pass over the code point space. Ranges are split into a 16-bit bucket and a 32-bit bucket; no range crosses U+FFFF. The number of leading ranges entirely within Latin-1 is recorded so lookups of common characters can stop early.

# Case ranges

Upper, lower and title mappings are stored as runs of code points sharing the same three deltas. Runs of alternating upper and lower case letters (`Ā ā Ă ă ...`) are stored as a single range with a marker instead of one range per pair.

# Case orbits

Code points which fold to the same value form an orbit, stored as a cyclic successor chain. Iterating the chain visits every case variant of a code point, e.g. `K → k → K (KELVIN SIGN) → K`. Orbits which are just an upper and lower pair are left out.

For each category and script, the code points which are fold-equivalent to a member without being members themselves are collected into a fold exception table.

*/

#![warn(clippy::all)]
// Clippy's manual_range_contains suggestion produces worse codegen.
#![allow(clippy::manual_range_contains)]

pub mod casedelta;
pub mod chartable;
pub mod codepointset;
pub mod latin;
pub mod orbits;
pub mod properties;
pub mod ranges;
pub mod tables;
pub mod verify;

mod error;

pub use crate::casedelta::{compact_case_deltas, to_case, CaseDelta, CaseDeltaRange, CaseMapping};
pub use crate::chartable::{
    Category, CharacterRecord, CharacterTable, RangeMarker, UnicodeDataRecord,
};
pub use crate::codepointset::{CodePoint, CodePointSet, Interval, CODE_POINT_MAX};
pub use crate::error::{Error, Result, TableKind};
pub use crate::orbits::{CaseOrbits, FoldExceptions};
pub use crate::properties::PropertyRanges;
pub use crate::ranges::{fold_adjacent, Range, RangeCompactor, RangeTable, TableStats};
pub use crate::tables::{compile, CompiledTables, Options, Selection};
