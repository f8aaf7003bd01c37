// codegen/schema.rs

//! Serde model of the command schema files.
//!
//! The argument layout mirrors the upstream Redis `commands.json`; the
//! `client_flags` and `cacheable` fields are client-side extensions.

use serde::Deserialize;

/// One command entry, keyed by its full name (`"TS.ADD"`, `"CLUSTER ADDSLOTS"`).
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CommandDef {
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub since: Option<String>,
    /// Upstream command flags. Only `READONLY` influences the builder.
    #[serde(default)]
    pub command_flags: Vec<String>,
    /// Flag bits seeded into every construction of this command.
    #[serde(default)]
    pub client_flags: Vec<String>,
    /// Every terminal state of a cacheable command gets `cache()`.
    #[serde(default)]
    pub cacheable: bool,
    #[serde(default)]
    pub arguments: Vec<Argument>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Argument {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ArgKind,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub optional: bool,
    #[serde(default)]
    pub multiple: bool,
    #[serde(default)]
    pub multiple_token: bool,
    #[serde(default)]
    pub arguments: Vec<Argument>,
    /// Flag bits set when the edge into this argument is taken.
    #[serde(default)]
    pub client_flags: Vec<String>,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum ArgKind {
    Key,
    String,
    Integer,
    Double,
    UnixTime,
    Pattern,
    PureToken,
    Oneof,
    Block,
}

impl ArgKind {
    /// Whether the argument carries a caller-supplied value.
    pub fn is_value(self) -> bool {
        matches!(
            self,
            Self::Key | Self::String | Self::Integer | Self::Double | Self::UnixTime | Self::Pattern
        )
    }
}

impl Argument {
    /// A block made only of required, non-repeating leaves becomes one edge.
    pub fn is_flat_block(&self) -> bool {
        self.kind == ArgKind::Block
            && !self.arguments.is_empty()
            && self.arguments.iter().all(|sub| {
                (sub.kind.is_value() || sub.kind == ArgKind::PureToken)
                    && !sub.optional
                    && !sub.multiple
            })
    }
}
