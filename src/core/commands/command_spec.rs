// src/core/commands/command_spec.rs

//! Static metadata about every command the builders know, for introspection
//! by the layers above (e.g. listing supported commands or checking flags
//! before dispatch).

use crate::core::commands::command_trait::CommandFlags;

/// Describes one command as declared in its schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandSpec {
    /// The full command name in upper case (`"TS.ADD"`, `"CLUSTER ADDSLOTS"`).
    pub name: &'static str,
    /// The schema group the command belongs to (`"timeseries"`).
    pub group: &'static str,
    pub summary: &'static str,
    /// The documented syntax, rendered from the schema.
    pub syntax: &'static str,
    /// The server version that introduced the command, when known.
    pub since: Option<&'static str>,
    /// The flags seeded into every construction of this command.
    pub flags: CommandFlags,
    /// Whether the terminal states offer `cache()`.
    pub cacheable: bool,
    /// Number of state types in the command's grammar.
    pub states: usize,
    /// Number of those states that can `build()`.
    pub terminals: usize,
}

impl CommandSpec {
    pub fn is_read_only(&self) -> bool {
        self.flags.contains(CommandFlags::READ_ONLY)
    }
}

include!(concat!(env!("OUT_DIR"), "/gen_registry.rs"));

/// Every known command, grouped by schema file and sorted by name.
pub fn all() -> impl Iterator<Item = &'static CommandSpec> {
    COMMAND_SPECS.iter()
}

/// Finds a command by name, ignoring ASCII case and surrounding whitespace.
/// Multi-word names match with any run of whitespace between the words.
pub fn lookup(name: &str) -> Option<&'static CommandSpec> {
    COMMAND_SPECS.iter().find(|spec| {
        let mut wanted = name.split_whitespace();
        let mut actual = spec.name.split_whitespace();
        loop {
            match (wanted.next(), actual.next()) {
                (Some(w), Some(a)) if w.eq_ignore_ascii_case(a) => continue,
                (None, None) => return true,
                _ => return false,
            }
        }
    })
}
