use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GenError {
    #[error(transparent)]
    Table(#[from] unitables::Error),

    #[error("reading UCD: {0}")]
    Ucd(#[from] ucd_parse::Error),

    #[error("writing {}: {source}", path.display())]
    Write { path: PathBuf, source: io::Error },

    #[error("case orbit pair at U+{0:04X} does not fit in 16 bits")]
    WideFoldPair(u32),

    #[error("{0} mismatches found")]
    Mismatches(usize),
}

pub type Result<T> = std::result::Result<T, GenError>;
