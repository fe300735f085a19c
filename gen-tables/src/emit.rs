//! Writing the compiled tables as Rust source.

use crate::error::{GenError, Result};
use codegen::{Scope, Struct};
use std::collections::BTreeMap;
use unitables::ranges::Range;
use unitables::{CaseDelta, CompiledTables, RangeTable, Selection};

/// Marks a CaseRange whose members alternate upper and lower case.
const UPPER_LOWER: i64 = unitables::CODE_POINT_MAX as i64 + 1;

/// Category tables that get a descriptive alias.
const ALIASES: [(&str, &str); 11] = [
    ("C", "OTHER"),
    ("L", "LETTER"),
    ("M", "MARK"),
    ("N", "NUMBER"),
    ("P", "PUNCT"),
    ("S", "SYMBOL"),
    ("Z", "SPACE"),
    ("Nd", "DIGIT"),
    ("Lu", "UPPER"),
    ("Ll", "LOWER"),
    ("Lt", "TITLE"),
];

const GRAPHIC_RANGES: [&str; 6] = ["L", "M", "N", "P", "S", "Zs"];
const PRINT_RANGES: [&str; 5] = ["L", "M", "N", "P", "S"];

const HEADER: &str = "// Generated by gen-tables from the Unicode Character Database.
// DO NOT EDIT

#![allow(non_upper_case_globals, dead_code)]";

fn format_ranges(bucket: &str, ranges: &[Range]) -> String {
    if ranges.is_empty() {
        return "&[]".to_string();
    }
    let lines: Vec<String> = ranges
        .iter()
        .map(|r| {
            format!(
                "{} {{ lo: {:#06X}, hi: {:#06X}, stride: {} }},",
                bucket, r.lo, r.hi, r.stride
            )
        })
        .collect();
    format!("&[\n        {}\n    ]", lines.join("\n        "))
}

fn format_table(name: &str, table: &RangeTable) -> String {
    format!(
        "pub const {}: RangeTable = RangeTable {{\n    r16: {},\n    r32: {},\n    latin_offset: {},\n}};",
        name,
        format_ranges("Range16", &table.r16),
        format_ranges("Range32", &table.r32),
        table.latin_offset
    )
}

fn format_map(map_name: &str, prefix: &str, names: &[&String]) -> String {
    format!(
        "pub const {}: &[(&str, &RangeTable)] = &[\n    {}\n];",
        map_name,
        names
            .iter()
            .map(|name| format!("({:?}, &{}{}),", name, prefix, name))
            .collect::<Vec<String>>()
            .join("\n    ")
    )
}

fn push_types(scope: &mut Scope) {
    for (name, ty) in [("Range16", "u16"), ("Range32", "u32")] {
        let mut s = Struct::new(name);
        s.vis("pub")
            .derive("Debug")
            .derive("Copy")
            .derive("Clone")
            .doc(&format!("The code points lo, lo+stride, ... up to hi, as {}.", ty))
            .field("pub lo", ty)
            .field("pub hi", ty)
            .field("pub stride", ty);
        scope.push_struct(s);
    }

    scope
        .new_struct("RangeTable")
        .vis("pub")
        .derive("Debug")
        .derive("Copy")
        .derive("Clone")
        .field("pub r16", "&'static [Range16]")
        .field("pub r32", "&'static [Range32]")
        .field("pub latin_offset", "usize");

    scope
        .new_impl("RangeTable")
        .new_fn("contains")
        .vis("pub")
        .arg_ref_self()
        .arg("cp", "u32")
        .ret("bool")
        .line("let hit = |lo: u32, hi: u32, stride: u32| lo <= cp && cp <= hi && (cp - lo) % stride == 0;")
        .line("if cp <= 0xFFFF {")
        .line("    let idx = self.r16.partition_point(|r| u32::from(r.hi) < cp);")
        .line("    self.r16.get(idx).map_or(false, |r| hit(r.lo.into(), r.hi.into(), r.stride.into()))")
        .line("} else {")
        .line("    let idx = self.r32.partition_point(|r| r.hi < cp);")
        .line("    self.r32.get(idx).map_or(false, |r| hit(r.lo, r.hi, r.stride))")
        .line("}");

    scope
        .new_struct("CaseRange")
        .vis("pub")
        .derive("Debug")
        .derive("Copy")
        .derive("Clone")
        .doc("Code points lo..=hi map by adding delta[upper, lower, title], unless delta is UPPER_LOWER.")
        .field("pub lo", "u32")
        .field("pub hi", "u32")
        .field("pub delta", "[i32; 3]");

    scope
        .new_struct("FoldPair")
        .vis("pub")
        .derive("Debug")
        .derive("Copy")
        .derive("Clone")
        .field("pub from", "u16")
        .field("pub to", "u16");

    scope.raw(&format!("pub const UPPER_LOWER: i32 = {:#X};", UPPER_LOWER));
}

fn push_family(
    scope: &mut Scope,
    tables: &BTreeMap<String, RangeTable>,
    selection: &Selection,
    map_name: &str,
    prefix: &str,
) {
    for (name, table) in tables {
        scope.raw(&format_table(&format!("{}{}", prefix, name), table));
    }
    if selection.is_all() {
        let names: Vec<&String> = tables.keys().collect();
        scope.raw(&format_map(map_name, prefix, &names));
    }
}

fn push_case_ranges(scope: &mut Scope, tables: &CompiledTables) {
    let ranges = match &tables.case_ranges {
        Some(ranges) => ranges,
        None => return,
    };
    let lines: Vec<String> = ranges
        .iter()
        .map(|r| {
            let delta = match r.delta {
                CaseDelta::Deltas {
                    upper,
                    lower,
                    title,
                } => format!("[{}, {}, {}]", upper, lower, title),
                CaseDelta::UpperLower => "[UPPER_LOWER, UPPER_LOWER, UPPER_LOWER]".to_string(),
            };
            format!(
                "CaseRange {{ lo: {:#06X}, hi: {:#06X}, delta: {} }},",
                r.lo, r.hi, delta
            )
        })
        .collect();
    scope.raw(&format!(
        "pub const CASE_RANGES: [CaseRange; {}] = [\n    {}\n];",
        lines.len(),
        lines.join("\n    ")
    ));
}

fn push_case_orbit(scope: &mut Scope, tables: &CompiledTables) -> Result<()> {
    let orbits = match &tables.orbits {
        Some(orbits) => orbits,
        None => return Ok(()),
    };
    let mut lines = Vec::with_capacity(orbits.len());
    for (from, to) in orbits.iter() {
        if from > 0xFFFF || to > 0xFFFF {
            return Err(GenError::WideFoldPair(from));
        }
        lines.push(format!("FoldPair {{ from: {:#06X}, to: {:#06X} }},", from, to));
    }
    scope.raw(&format!(
        "pub const CASE_ORBIT: [FoldPair; {}] = [\n    {}\n];",
        lines.len(),
        lines.join("\n    ")
    ));
    Ok(())
}

fn push_latin_properties(scope: &mut Scope, tables: &CompiledTables) {
    let lines: Vec<String> = tables
        .latin_properties
        .iter()
        .enumerate()
        .map(|(cp, prop)| format!("{:#04X}, // {:#04X}", prop, cp))
        .collect();
    scope.raw(&format!(
        "pub const LATIN_PROPERTIES: [u8; {}] = [\n    {}\n];",
        lines.len(),
        lines.join("\n    ")
    ));
}

fn push_range_list(scope: &mut Scope, tables: &CompiledTables, name: &str, members: &[&str]) {
    if members.iter().all(|m| tables.categories.contains_key(*m)) {
        scope.raw(&format!(
            "pub const {}: [&RangeTable; {}] = [{}];",
            name,
            members.len(),
            members
                .iter()
                .map(|m| format!("&{}", m))
                .collect::<Vec<_>>()
                .join(", ")
        ));
    } else {
        log::debug!("skipping {}: not every category was generated", name);
    }
}

fn size_comment(tables: &CompiledTables) -> String {
    let stats = &tables.stats;
    format!(
        "// Range entries: {} 16-bit, {} 32-bit, {} total.\n\
         // Range bytes: {} 16-bit, {} 32-bit, {} total.\n\
         // Fold orbit bytes: {} pairs, {} bytes",
        stats.range16,
        stats.range32,
        stats.range16 + stats.range32,
        stats.range16_bytes(),
        stats.range32_bytes(),
        stats.range16_bytes() + stats.range32_bytes(),
        stats.fold_pairs,
        stats.fold_pair_bytes()
    )
}

/// \return the source of unicode_tables.rs.
pub fn emit(tables: &CompiledTables, version: &str) -> Result<String> {
    let mut scope = Scope::new();
    scope.raw(HEADER);
    scope.raw(&format!(
        "/// The Unicode edition from which the tables are derived.\npub const VERSION: &str = {:?};",
        version
    ));
    push_types(&mut scope);

    let options = &tables.options;
    push_family(
        &mut scope,
        &tables.categories,
        &options.categories,
        "CATEGORIES",
        "",
    );
    for (category, alias) in ALIASES {
        if tables.categories.contains_key(category) {
            scope.raw(&format!("pub const {}: RangeTable = {};", alias, category));
        }
    }
    push_family(&mut scope, &tables.scripts, &options.scripts, "SCRIPTS", "");
    push_family(
        &mut scope,
        &tables.properties,
        &options.properties,
        "PROPERTIES",
        "",
    );

    push_case_ranges(&mut scope, tables);
    push_latin_properties(&mut scope, tables);
    if tables.orbits.is_some() {
        push_case_orbit(&mut scope, tables)?;
        push_family(
            &mut scope,
            &tables.fold_categories,
            &Selection::All,
            "FOLD_CATEGORY",
            "fold",
        );
        push_family(
            &mut scope,
            &tables.fold_scripts,
            &Selection::All,
            "FOLD_SCRIPT",
            "fold",
        );
    }

    push_range_list(&mut scope, tables, "GRAPHIC_RANGES", &GRAPHIC_RANGES);
    push_range_list(&mut scope, tables, "PRINT_RANGES", &PRINT_RANGES);
    scope.raw(&size_comment(tables));
    Ok(scope.to_string())
}
