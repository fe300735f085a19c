//! Selection of the tables to build, and the driver which builds them.

use crate::casedelta::{compact_case_deltas, to_case, CaseDeltaRange, CaseMapping};
use crate::chartable::CharacterTable;
use crate::codepointset::{CodePoint, CodePointSet};
use crate::error::{Error, Result, TableKind};
use crate::latin::{latin_properties, LatinProperties};
use crate::orbits::{CaseOrbits, FoldExceptions};
use crate::properties::PropertyRanges;
use crate::ranges::{RangeTable, TableStats};
use std::collections::BTreeMap;
use std::convert::Infallible;
use std::str::FromStr;

/// Which tables of one family to build.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Selection {
    /// Every table the data defines, plus the name → table map.
    #[default]
    All,
    /// Just these names.
    Only(Vec<String>),
    /// None at all.
    Skip,
}

impl FromStr for Selection {
    type Err = Infallible;

    /// Parse "all", the empty string, or a comma-separated list of names.
    /// Empty names in a list are kept, and rejected when resolved.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let s = s.trim();
        Ok(match s {
            "all" => Selection::All,
            "" => Selection::Skip,
            _ => Selection::Only(s.split(',').map(|name| name.trim().to_string()).collect()),
        })
    }
}

impl Selection {
    pub fn is_all(&self) -> bool {
        matches!(self, Selection::All)
    }

    /// \return the names to build, given every name of this \p kind that
    /// exists.
    fn resolve(&self, kind: TableKind, available: Vec<String>) -> Result<Vec<String>> {
        match self {
            Selection::All => Ok(available),
            Selection::Skip => Ok(Vec::new()),
            Selection::Only(names) => {
                for name in names {
                    if !available.contains(name) {
                        return Err(Error::UnknownTable {
                            kind,
                            name: name.clone(),
                        });
                    }
                }
                Ok(names.clone())
            }
        }
    }
}

/// What to compile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    pub categories: Selection,
    pub scripts: Selection,
    pub properties: Selection,
    /// Build the case delta table.
    pub cases: bool,
    /// Build the case orbit and the fold exception tables.
    pub folds: bool,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            categories: Selection::All,
            scripts: Selection::All,
            properties: Selection::All,
            cases: true,
            folds: true,
        }
    }
}

/// Every derived table, ready to be emitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledTables {
    pub categories: BTreeMap<String, RangeTable>,
    pub scripts: BTreeMap<String, RangeTable>,
    pub properties: BTreeMap<String, RangeTable>,
    /// Present if cases were requested.
    pub case_ranges: Option<Vec<CaseDeltaRange>>,
    /// Present if folds were requested.
    pub orbits: Option<CaseOrbits>,
    pub fold_categories: BTreeMap<String, RangeTable>,
    pub fold_scripts: BTreeMap<String, RangeTable>,
    pub latin_properties: LatinProperties,
    pub stats: TableStats,
    /// The selection each family was built from.
    pub options: Options,
}

fn compact_set(set: &CodePointSet) -> RangeTable {
    RangeTable::compact(|cp| set.contains(cp))
}

fn compact_properties(props: &PropertyRanges, names: &[String]) -> BTreeMap<String, RangeTable> {
    names
        .iter()
        .map(|name| {
            log::debug!("compacting {}", name);
            (name.clone(), RangeTable::from_folded(&props.folded(name)))
        })
        .collect()
}

/// Build every table requested by \p options.
/// Every requested name is checked before any table is built. If fold tables
/// are requested, the orbit successors are also written into \p chars.
pub fn compile(
    chars: &mut CharacterTable,
    scripts: &PropertyRanges,
    props: &PropertyRanges,
    options: &Options,
) -> Result<CompiledTables> {
    let category_names = options
        .categories
        .resolve(TableKind::Category, chars.categories())?;
    let script_names = options
        .scripts
        .resolve(TableKind::Script, scripts.names().map(str::to_string).collect())?;
    let property_names = options
        .properties
        .resolve(TableKind::Property, props.names().map(str::to_string).collect())?;

    let mut stats = TableStats::default();
    let mut categories = BTreeMap::new();
    for name in category_names {
        log::debug!("compacting category {}", name);
        let table = RangeTable::compact(|cp| chars.in_category(cp, &name));
        categories.insert(name, table);
    }
    let scripts_out = compact_properties(scripts, &script_names);
    let properties = compact_properties(props, &property_names);

    let case_ranges = if options.cases {
        Some(compact_case_deltas(chars)?)
    } else {
        None
    };
    let latin_properties = latin_properties(chars)?;

    let mut fold_categories = BTreeMap::new();
    let mut fold_scripts = BTreeMap::new();
    let orbits = if options.folds {
        let orbits = CaseOrbits::build(chars);
        chars.annotate_orbits(&orbits);
        let exceptions = FoldExceptions::build(chars, &orbits, scripts);
        for (name, set) in &exceptions.categories {
            fold_categories.insert(name.clone(), compact_set(set));
        }
        for (name, set) in &exceptions.scripts {
            fold_scripts.insert(name.clone(), compact_set(set));
        }
        stats.fold_pairs = orbits.len();
        Some(orbits)
    } else {
        None
    };

    for table in categories
        .values()
        .chain(scripts_out.values())
        .chain(properties.values())
        .chain(fold_categories.values())
        .chain(fold_scripts.values())
    {
        stats.add_table(table);
    }
    log::info!(
        "compiled {} categories, {} scripts, {} properties",
        categories.len(),
        scripts_out.len(),
        properties.len()
    );

    Ok(CompiledTables {
        categories,
        scripts: scripts_out,
        properties,
        case_ranges,
        orbits,
        fold_categories,
        fold_scripts,
        latin_properties,
        stats,
        options: options.clone(),
    })
}

impl CompiledTables {
    /// \return the table for \p name in the family \p kind.
    pub fn table(&self, kind: TableKind, name: &str) -> Option<&RangeTable> {
        match kind {
            TableKind::Category => self.categories.get(name),
            TableKind::Script => self.scripts.get(name),
            TableKind::Property => self.properties.get(name),
        }
    }

    /// \return the \p mapping of \p cp, if case tables were built.
    pub fn to_case(&self, mapping: CaseMapping, cp: CodePoint) -> Option<CodePoint> {
        self.case_ranges
            .as_deref()
            .map(|ranges| to_case(ranges, mapping, cp))
    }

    /// \return the next code point in the simple case folding orbit of \p cp:
    /// the orbit successor if there is one, else the lower case form, else the
    /// upper case form, else \p cp itself.
    /// None if case or fold tables were not built.
    pub fn simple_fold(&self, cp: CodePoint) -> Option<CodePoint> {
        let orbits = self.orbits.as_ref()?;
        if let Some(next) = orbits.next(cp) {
            return Some(next);
        }
        let lower = self.to_case(CaseMapping::Lower, cp)?;
        if lower != cp {
            return Some(lower);
        }
        self.to_case(CaseMapping::Upper, cp)
    }
}
