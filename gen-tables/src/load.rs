//! Reading the Unicode Character Database.

use crate::error::Result;
use std::path::Path;
use ucd_parse::{CaseStatus, Codepoints, UnicodeDataNumeric};
use unitables::{CharacterTable, Error, PropertyRanges, RangeMarker, UnicodeDataRecord};

/// Everything the tables are built from.
pub struct Ucd {
    pub version: String,
    pub chars: CharacterTable,
    pub scripts: PropertyRanges,
    pub props: PropertyRanges,
}

/// Load UnicodeData.txt, CaseFolding.txt, Scripts.txt and PropList.txt from
/// \p dir.
pub fn load(dir: &Path) -> Result<Ucd> {
    let (major, minor, update) = ucd_parse::ucd_directory_version(dir)?;
    let version = format!("{}.{}.{}", major, minor, update);
    log::info!("loading UCD {} from {}", version, dir.display());

    let rows = ucd_parse::parse::<_, ucd_parse::UnicodeData>(dir)?;
    let mut chars = CharacterTable::load(rows.iter().map(unicode_data_record))?;

    for row in ucd_parse::parse::<_, ucd_parse::CaseFold>(dir)? {
        // Only the common and simple foldings.
        if !matches!(row.status, CaseStatus::Common | CaseStatus::Simple) {
            continue;
        }
        let cp = row.codepoint.value();
        match row.mapping.as_slice() {
            [target] => chars.add_fold(cp, target.value())?,
            _ => {
                return Err(Error::Malformed {
                    cp,
                    reason: format!("simple fold to {} code points", row.mapping.len()),
                }
                .into())
            }
        }
    }

    let mut scripts = PropertyRanges::new();
    for row in ucd_parse::parse::<_, ucd_parse::Script>(dir)? {
        let (lo, hi) = codepoints_to_range(&row.codepoints);
        scripts.insert(&row.script, lo, hi)?;
    }

    let mut props = PropertyRanges::new();
    for row in ucd_parse::parse::<_, ucd_parse::Property>(dir)? {
        let (lo, hi) = codepoints_to_range(&row.codepoints);
        props.insert(&row.property, lo, hi)?;
    }

    log::debug!(
        "{} categories, {} scripts, {} properties",
        chars.categories().len(),
        scripts.names().count(),
        props.names().count()
    );
    Ok(Ucd {
        version,
        chars,
        scripts,
        props,
    })
}

fn unicode_data_record(row: &ucd_parse::UnicodeData) -> UnicodeDataRecord {
    let marker = if row.is_range_start() {
        RangeMarker::First
    } else if row.is_range_end() {
        RangeMarker::Last
    } else {
        RangeMarker::Single
    };
    let numeric_value = match row.numeric_type_numeric {
        Some(UnicodeDataNumeric::Integer(n)) => Some(n),
        _ => None,
    };
    UnicodeDataRecord {
        code_point: row.codepoint.value(),
        category: row.general_category.clone(),
        upper_case: row.simple_uppercase_mapping.map(|c| c.value()),
        lower_case: row.simple_lowercase_mapping.map(|c| c.value()),
        title_case: row.simple_titlecase_mapping.map(|c| c.value()),
        numeric_value,
        marker,
    }
}

fn codepoints_to_range(cp: &Codepoints) -> (u32, u32) {
    match cp {
        Codepoints::Single(cp) => (cp.value(), cp.value()),
        Codepoints::Range(range) => (range.start.value(), range.end.value()),
    }
}
