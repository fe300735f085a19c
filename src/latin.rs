//! One property byte per Latin-1 code point, for fast classification of
//! the most common characters.

use crate::chartable::CharacterTable;
use crate::codepointset::{CodePoint, MAX_LATIN1};
use crate::error::{Error, Result};

/// A control character.
pub const CONTROL: u8 = 1 << 0;
/// A punctuation character.
pub const PUNCT: u8 = 1 << 1;
/// A numeral.
pub const NUMBER: u8 = 1 << 2;
/// A symbolic character.
pub const SYMBOL: u8 = 1 << 3;
/// A spacing character.
pub const SPACE: u8 = 1 << 4;
/// An upper-case letter.
pub const UPPER: u8 = 1 << 5;
/// A lower-case letter.
pub const LOWER: u8 = 1 << 6;
/// A printable character.
pub const PRINT: u8 = 1 << 7;
/// A letter that is neither upper nor lower case.
pub const OTHER_LETTER: u8 = UPPER | LOWER;

pub type LatinProperties = [u8; MAX_LATIN1 as usize + 1];

/// \return the property byte for every code point in 0..=0xFF.
pub fn latin_properties(chars: &CharacterTable) -> Result<LatinProperties> {
    let mut props = [0; MAX_LATIN1 as usize + 1];
    for (cp, prop) in (0..=MAX_LATIN1).zip(props.iter_mut()) {
        *prop = property_of(chars, cp)?;
    }
    Ok(props)
}

fn property_of(chars: &CharacterTable, cp: CodePoint) -> Result<u8> {
    if cp == ' ' as CodePoint {
        return Ok(SPACE | PRINT);
    }
    // NUL has no category.
    let category = match chars.get(cp).category {
        Some(c) => c,
        None => return Ok(CONTROL),
    };
    let prop = match category.as_str() {
        "Cc" => CONTROL,
        // Soft hyphen: not printable.
        "Cf" => 0,
        "Ll" => LOWER | PRINT,
        "Lo" => OTHER_LETTER | PRINT,
        "Lu" => UPPER | PRINT,
        "Nd" | "No" => NUMBER | PRINT,
        "Pc" | "Pd" | "Pe" | "Pf" | "Pi" | "Po" | "Ps" => PUNCT | PRINT,
        "Sc" | "Sk" | "Sm" | "So" => SYMBOL | PRINT,
        "Zs" => SPACE,
        other => {
            return Err(Error::LatinCategory {
                cp,
                category: other.to_string(),
            })
        }
    };
    Ok(prop)
}
