use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use structopt::StructOpt;
use unitables::verify::{self, FoldFamily, Mismatch};
use unitables::{compile, CompiledTables, Options, RangeTable, Selection, TableKind};

mod emit;
mod error;
mod load;

use error::{GenError, Result};

#[derive(Debug, StructOpt)]
#[structopt(
    name = "gen-tables",
    about = "Compile the Unicode Character Database into Rust tables"
)]
struct Opt {
    /// Directory holding UnicodeData.txt, CaseFolding.txt, Scripts.txt and
    /// PropList.txt.
    #[structopt(parse(from_os_str))]
    ucd_dir: PathBuf,

    /// Comma-separated list of categories to generate, or "all". Empty for none.
    #[structopt(long, default_value = "all")]
    tables: Selection,

    /// Comma-separated list of scripts to generate, or "all". Empty for none.
    #[structopt(long, default_value = "all")]
    scripts: Selection,

    /// Comma-separated list of properties to generate, or "all". Empty for none.
    #[structopt(long, default_value = "all")]
    props: Selection,

    /// Skip the case tables.
    #[structopt(long)]
    no_cases: bool,

    /// Skip the case orbit and fold exception tables.
    #[structopt(long)]
    no_folds: bool,

    /// Check the tables instead of writing them.
    #[structopt(long)]
    test: bool,

    /// With --test, a second UCD directory to check against. Without it the
    /// tables are checked against the data they were built from.
    #[structopt(long, parse(from_os_str), requires = "test")]
    reference: Option<PathBuf>,

    /// Directory to write unicode_tables.rs to.
    #[structopt(long, parse(from_os_str), default_value = ".")]
    out: PathBuf,
}

impl Opt {
    fn options(&self) -> Options {
        Options {
            categories: self.tables.clone(),
            scripts: self.scripts.clone(),
            properties: self.props.clone(),
            cases: !self.no_cases,
            folds: !self.no_folds,
        }
    }
}

fn write_tables(out_dir: &Path, tables: &CompiledTables, version: &str) -> Result<()> {
    let src = emit::emit(tables, version)?;
    let path = out_dir.join("unicode_tables.rs");
    fs::write(&path, src).map_err(|source| GenError::Write {
        path: path.clone(),
        source,
    })?;
    let stats = &tables.stats;
    log::info!(
        "wrote {}: {} 16-bit and {} 32-bit ranges, {} orbit pairs",
        path.display(),
        stats.range16,
        stats.range32,
        stats.fold_pairs
    );
    Ok(())
}

fn names(tables: &BTreeMap<String, RangeTable>) -> Vec<String> {
    tables.keys().cloned().collect()
}

/// Check everything built from \p ucd against \p reference.
fn check(ucd: &load::Ucd, built: &CompiledTables, reference: &CompiledTables) -> Vec<Mismatch> {
    let mut found = verify::verify_categories(&ucd.chars, &names(&built.categories), reference);
    found.extend(verify::verify_property_ranges(
        TableKind::Script,
        &ucd.scripts,
        &names(&built.scripts),
        reference,
    ));
    found.extend(verify::verify_property_ranges(
        TableKind::Property,
        &ucd.props,
        &names(&built.properties),
        reference,
    ));
    if built.case_ranges.is_some() {
        found.extend(verify::verify_cases(&ucd.chars, reference));
    }
    if built.orbits.is_some() {
        found.extend(verify::verify_orbits(&ucd.chars, reference));
        for family in [FoldFamily::Category, FoldFamily::Script] {
            found.extend(verify::verify_fold_exceptions(family, built, reference));
        }
    }
    found
}

fn run(opt: &Opt) -> Result<()> {
    let options = opt.options();
    let mut ucd = load::load(&opt.ucd_dir)?;
    let built = compile(&mut ucd.chars, &ucd.scripts, &ucd.props, &options)?;

    if !opt.test {
        return write_tables(&opt.out, &built, &ucd.version);
    }

    let reference = match &opt.reference {
        Some(dir) => {
            // Build every table of the reference, so that a missing one is
            // reported as a mismatch.
            let mut other = load::load(dir)?;
            compile(
                &mut other.chars,
                &other.scripts,
                &other.props,
                &Options::default(),
            )?
        }
        None => built.clone(),
    };
    let mismatches = check(&ucd, &built, &reference);
    for mismatch in &mismatches {
        log::warn!("{}", mismatch);
    }
    if mismatches.is_empty() {
        log::info!("no mismatches");
        Ok(())
    } else {
        Err(GenError::Mismatches(mismatches.len()))
    }
}

fn main() -> ExitCode {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let opt = Opt::from_args();
    match run(&opt) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
