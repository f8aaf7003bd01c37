// codegen/mod.rs

//! The grammar generator driven by `build.rs`.
//!
//! Each `commands/<group>.json` file is parsed into [`schema::CommandDef`]s,
//! compiled into a state graph by [`grammar`], and written out as Rust source
//! by [`emit`]. The output lands in `OUT_DIR` as `gen_<group>.rs` plus a single
//! `gen_registry.rs` holding the static command table.

mod emit;
mod grammar;
mod naming;
mod schema;

use anyhow::{Context, Result, bail};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Generates every group found under `schema_dir` into `out_dir`.
pub fn run(schema_dir: &Path, out_dir: &Path) -> Result<()> {
    let mut groups: BTreeMap<String, Vec<grammar::Grammar>> = BTreeMap::new();

    let mut entries = fs::read_dir(schema_dir)
        .with_context(|| format!("Failed to list schema directory '{}'", schema_dir.display()))?
        .collect::<Result<Vec<_>, _>>()?;
    entries.sort_by_key(|entry| entry.path());

    for entry in entries {
        let path = entry.path();
        if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
            continue;
        }
        let group = path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .with_context(|| format!("Schema file name is not valid UTF-8: '{}'", path.display()))?
            .to_string();

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read schema '{}'", path.display()))?;
        let defs: BTreeMap<String, schema::CommandDef> = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse schema '{}'", path.display()))?;

        let mut compiled = Vec::with_capacity(defs.len());
        for (name, def) in &defs {
            let grammar = grammar::compile(name, &group, def)
                .with_context(|| format!("Invalid grammar for '{name}' in '{}'", path.display()))?;
            compiled.push(grammar);
        }
        groups.insert(group, compiled);
    }

    if groups.is_empty() {
        bail!("No command schemas found in '{}'", schema_dir.display());
    }

    check_unique_types(&groups)?;

    for (group, grammars) in &groups {
        let source = emit::group(group, grammars);
        let target = out_dir.join(format!("gen_{group}.rs"));
        fs::write(&target, source)
            .with_context(|| format!("Failed to write '{}'", target.display()))?;
    }

    let registry = emit::registry(&groups);
    let target = out_dir.join("gen_registry.rs");
    fs::write(&target, registry).with_context(|| format!("Failed to write '{}'", target.display()))?;

    Ok(())
}

/// All generated types share one namespace once re-exported, so a state name
/// may appear only once across every group.
fn check_unique_types(groups: &BTreeMap<String, Vec<grammar::Grammar>>) -> Result<()> {
    const IMPORTED: &[&str] = &[
        "Builder",
        "Bytes",
        "Cacheable",
        "CommandFlags",
        "Completed",
        "Incomplete",
        "IntoToken",
        "Variadic",
    ];
    let mut seen: BTreeMap<&str, &str> = IMPORTED.iter().map(|name| (*name, "the runtime")).collect();
    for grammars in groups.values() {
        for grammar in grammars {
            for node in &grammar.nodes {
                if let Some(previous) = seen.insert(node.state.as_str(), grammar.name.as_str()) {
                    bail!(
                        "State type '{}' is generated by both '{previous}' and '{}'",
                        node.state,
                        grammar.name
                    );
                }
            }
        }
    }

    // Builder methods all live on `Builder`.
    let mut methods: BTreeMap<&str, &str> = BTreeMap::new();
    for grammars in groups.values() {
        for grammar in grammars {
            if let Some(previous) = methods.insert(grammar.method.as_str(), grammar.name.as_str()) {
                bail!(
                    "Builder method '{}' is generated by both '{previous}' and '{}'",
                    grammar.method,
                    grammar.name
                );
            }
        }
    }
    Ok(())
}
