// codegen/emit.rs

//! Writes compiled grammars out as Rust source.

use super::grammar::{Emit, Grammar, Node, ParamKind};
use std::collections::BTreeMap;
use std::fmt::Write;

const HEADER: &str = "// @generated by build.rs from the command schemas. Do not edit.\n";

/// Source for one `gen_<group>.rs` file.
pub fn group(name: &str, grammars: &[Grammar]) -> String {
    let mut out = String::new();
    out.push_str(HEADER);
    let _ = writeln!(out, "// Group: {name}");
    out.push('\n');
    out.push_str("#[allow(unused_imports)]\n");
    out.push_str(
        "use crate::core::commands::{Builder, Cacheable, CommandFlags, Completed, Incomplete, IntoToken, Variadic};\n",
    );
    out.push_str("#[allow(unused_imports)]\nuse bytes::Bytes;\n");

    for grammar in grammars {
        command(&mut out, grammar);
    }
    out
}

/// Source for `gen_registry.rs`: the static command table.
pub fn registry(groups: &BTreeMap<String, Vec<Grammar>>) -> String {
    let mut out = String::new();
    out.push_str(HEADER);
    out.push('\n');
    out.push_str("pub(crate) static COMMAND_SPECS: &[CommandSpec] = &[\n");
    for grammars in groups.values() {
        for grammar in grammars {
            let since = match &grammar.since {
                Some(since) => format!("Some({since:?})"),
                None => "None".to_string(),
            };
            let _ = writeln!(
                out,
                "    CommandSpec {{ name: {:?}, group: {:?}, summary: {:?}, syntax: {:?}, since: {since}, flags: {}, cacheable: {}, states: {}, terminals: {} }},",
                grammar.name,
                grammar.group,
                grammar.summary,
                grammar.syntax,
                flags_expr(&grammar.flags),
                grammar.cacheable,
                grammar.nodes.len(),
                grammar.terminals(),
            );
        }
    }
    out.push_str("];\n");
    out
}

fn command(out: &mut String, grammar: &Grammar) {
    out.push('\n');
    for node in &grammar.nodes {
        if node.state == grammar.type_name {
            if !grammar.summary.is_empty() {
                let _ = writeln!(out, "#[doc = {:?}]", grammar.summary);
                out.push_str("#[doc = \"\"]\n");
            }
            let _ = writeln!(out, "#[doc = {:?}]", format!("`{}`", grammar.syntax));
        }
        out.push_str("#[derive(Debug)]\n");
        out.push_str("#[must_use = \"a command builder does nothing until it is built\"]\n");
        let _ = writeln!(out, "pub struct {}(Incomplete);", node.state);
        out.push('\n');
    }

    let name_tokens: Vec<String> = grammar
        .name_tokens
        .iter()
        .map(|token| format!("{token:?}"))
        .collect();
    out.push_str("impl Builder {\n");
    if !grammar.summary.is_empty() {
        let _ = writeln!(out, "    #[doc = {:?}]", grammar.summary);
    }
    let _ = writeln!(
        out,
        "    pub fn {}(&self) -> {} {{",
        grammar.method, grammar.type_name
    );
    let _ = writeln!(
        out,
        "        {}(self.start(&[{}], {}))",
        grammar.type_name,
        name_tokens.join(", "),
        flags_expr(&grammar.flags)
    );
    out.push_str("    }\n}\n");

    for node in &grammar.nodes {
        out.push('\n');
        let _ = writeln!(out, "impl {} {{", node.state);
        let mut first = true;

        for &target in &node.next {
            let target = &grammar.nodes[target];
            separate(out, &mut first);
            edge(out, target, &target.enter, &target.state);
        }
        if let Some(repeat) = &node.repeat {
            separate(out, &mut first);
            edge(out, node, repeat, "Self");
        }
        if node.terminal {
            separate(out, &mut first);
            out.push_str("    pub fn build(self) -> Completed {\n        self.0.build()\n    }\n");
            if grammar.cacheable {
                out.push('\n');
                out.push_str("    pub fn cache(self) -> Cacheable {\n        self.0.cache()\n    }\n");
            }
        }
        out.push_str("}\n");
    }
}

fn separate(out: &mut String, first: &mut bool) {
    if !*first {
        out.push('\n');
    }
    *first = false;
}

/// One transition method: takes the target's parameters, appends `emits`,
/// applies the target's flag side effects and returns `returns`.
fn edge(out: &mut String, target: &Node, emits: &[Emit], returns: &str) {
    let mut signature = format!("    pub fn {}(mut self", target.method);
    for param in &target.params {
        let ty = match (param.kind, param.variadic) {
            (ParamKind::Key | ParamKind::Str, false) => "impl IntoToken",
            (ParamKind::Key | ParamKind::Str, true) => "impl Variadic<Bytes>",
            (ParamKind::Int, false) => "i64",
            (ParamKind::Int, true) => "impl Variadic<i64>",
            (ParamKind::Float, false) => "f64",
            (ParamKind::Float, true) => "impl Variadic<f64>",
        };
        let _ = write!(signature, ", {}: {ty}", param.name);
    }
    let _ = writeln!(out, "{signature}) -> {returns} {{");

    for flag in &target.flags {
        let _ = writeln!(out, "        self.0.tag(CommandFlags::{flag});");
    }
    for emit in emits {
        match emit {
            Emit::Literal(token) => {
                let _ = writeln!(out, "        self.0.push_static({token:?});");
            }
            Emit::Value(idx) => {
                let param = &target.params[*idx];
                let _ = writeln!(out, "        self.0.{}({});", push_fn(param.kind), param.name);
            }
            Emit::Each { param, token } => {
                let param = &target.params[*param];
                match token {
                    Some(token) => {
                        let _ = writeln!(
                            out,
                            "        {}.each(|item| {{\n            self.0.push_static({token:?});\n            self.0.{}(item);\n        }});",
                            param.name,
                            push_fn(param.kind)
                        );
                    }
                    None => {
                        let _ = writeln!(
                            out,
                            "        {}.each(|item| self.0.{}(item));",
                            param.name,
                            push_fn(param.kind)
                        );
                    }
                }
            }
        }
    }

    if returns == "Self" {
        out.push_str("        self\n");
    } else {
        let _ = writeln!(out, "        {returns}(self.0)");
    }
    out.push_str("    }\n");
}

fn push_fn(kind: ParamKind) -> &'static str {
    match kind {
        ParamKind::Key => "push_key",
        ParamKind::Str => "push",
        ParamKind::Int => "push_int",
        ParamKind::Float => "push_float",
    }
}

fn flags_expr(flags: &[&str]) -> String {
    match flags.split_first() {
        None => "CommandFlags::empty()".to_string(),
        Some((first, rest)) => rest
            .iter()
            .fold(format!("CommandFlags::{first}"), |acc, flag| {
                format!("{acc}.union(CommandFlags::{flag})")
            }),
    }
}
