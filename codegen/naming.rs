// codegen/naming.rs

//! Identifier derivation for generated types and methods.

use anyhow::{Result, bail};

const KEYWORDS: &[&str] = &[
    "abstract", "as", "async", "await", "become", "box", "break", "const", "continue", "do",
    "dyn", "else", "enum", "extern", "false", "final", "fn", "for", "gen", "if", "impl", "in",
    "let", "loop", "macro", "match", "mod", "move", "mut", "override", "priv", "pub", "ref",
    "return", "static", "struct", "trait", "true", "try", "type", "typeof", "unsafe", "unsized",
    "use", "virtual", "where", "while", "yield",
];

const UNRAWABLE: &[&str] = &["self", "Self", "super", "crate", "_"];

/// Splits `"ON_DUPLICATE"`, `"retentionPeriod"` or `"TS.ADD"` into lowercase words.
pub fn words(input: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut current = String::new();
    let mut prev_lower = false;

    for ch in input.chars() {
        if ch.is_ascii_alphanumeric() {
            if ch.is_ascii_uppercase() && prev_lower && !current.is_empty() {
                out.push(std::mem::take(&mut current));
            }
            prev_lower = ch.is_ascii_lowercase() || ch.is_ascii_digit();
            current.push(ch.to_ascii_lowercase());
        } else {
            if !current.is_empty() {
                out.push(std::mem::take(&mut current));
            }
            prev_lower = false;
        }
    }
    if !current.is_empty() {
        out.push(current);
    }
    out
}

pub fn camel(input: &str) -> String {
    words(input)
        .iter()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect()
}

pub fn snake(input: &str) -> String {
    words(input).join("_")
}

/// Turns a snake_case name into a usable Rust identifier.
pub fn ident(name: &str) -> Result<String> {
    if name.is_empty() {
        bail!("empty identifier");
    }
    if name.starts_with(|c: char| c.is_ascii_digit()) {
        bail!("identifier '{name}' starts with a digit");
    }
    if UNRAWABLE.contains(&name) {
        bail!("'{name}' cannot be used as an identifier");
    }
    if KEYWORDS.contains(&name) {
        return Ok(format!("r#{name}"));
    }
    Ok(name.to_string())
}

/// The label of an argument: its token when the token reads as a word,
/// otherwise its name.
pub fn label(name: &str, token: Option<&str>) -> String {
    match token {
        Some(token) if token.chars().any(|c| c.is_ascii_alphabetic()) => camel(token),
        _ => camel(name),
    }
}
