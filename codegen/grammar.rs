// codegen/grammar.rs

//! Compiles a command schema into a type-state graph.
//!
//! Every node of the graph becomes one nominal state type. The edge into a
//! node appends `enter`; a node with `repeat` also carries a self-edge. The
//! root node is the start state handed out by `Builder`.

use super::naming;
use super::schema::{ArgKind, Argument, CommandDef};
use anyhow::{Context, Result, bail};

/// Flag bits a schema may name in `client_flags`.
const CLIENT_FLAGS: &[&str] = &[
    "BLOCK_TAG",
    "NO_REPLY",
    "MULTI_GET",
    "OPT_IN",
    "UNSUBSCRIBE",
    "SCRIPT_READ_ONLY",
];

#[derive(Debug)]
pub struct Grammar {
    pub name: String,
    pub group: String,
    pub type_name: String,
    pub method: String,
    pub name_tokens: Vec<String>,
    pub summary: String,
    pub since: Option<String>,
    pub syntax: String,
    pub flags: Vec<&'static str>,
    pub cacheable: bool,
    /// `nodes[0]` is the start state.
    pub nodes: Vec<Node>,
}

impl Grammar {
    pub fn terminals(&self) -> usize {
        self.nodes.iter().filter(|node| node.terminal).count()
    }
}

#[derive(Debug)]
pub struct Node {
    pub state: String,
    pub method: String,
    pub params: Vec<Param>,
    pub enter: Vec<Emit>,
    pub repeat: Option<Vec<Emit>>,
    pub flags: Vec<&'static str>,
    pub next: Vec<usize>,
    pub terminal: bool,
}

impl Node {
    fn new(state: String, method: String) -> Self {
        Self {
            state,
            method,
            params: Vec::new(),
            enter: Vec::new(),
            repeat: None,
            flags: Vec::new(),
            next: Vec::new(),
            terminal: false,
        }
    }

    fn add_param(&mut self, param: Param) -> Result<usize> {
        if self.params.iter().any(|p| p.name == param.name) {
            bail!("parameter '{}' appears twice on '{}'", param.name, self.method);
        }
        self.params.push(param);
        Ok(self.params.len() - 1)
    }

    fn add_flags(&mut self, flags: &[&'static str]) {
        for flag in flags {
            if !self.flags.contains(flag) {
                self.flags.push(flag);
            }
        }
    }
}

#[derive(Debug)]
pub struct Param {
    pub name: String,
    pub kind: ParamKind,
    pub variadic: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    Key,
    Str,
    Int,
    Float,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Emit {
    Literal(String),
    Value(usize),
    /// Every item of a variadic parameter, each optionally preceded by a token.
    Each { param: usize, token: Option<String> },
}

#[derive(Debug, Default)]
struct Fragment {
    entries: Vec<usize>,
    exits: Vec<usize>,
    nullable: bool,
}

struct Compiler {
    nodes: Vec<Node>,
}

pub fn compile(name: &str, group: &str, def: &CommandDef) -> Result<Grammar> {
    let name_tokens: Vec<String> = name.split_whitespace().map(str::to_string).collect();
    if name_tokens.is_empty() {
        bail!("command name is empty");
    }
    let type_name = naming::camel(name);
    let method = naming::ident(&naming::snake(name))?;

    let mut flags = Vec::new();
    if def.command_flags.iter().any(|flag| flag == "READONLY") {
        flags.push("READ_ONLY");
    }
    for flag in client_flags(&def.client_flags)? {
        if flag == "BLOCK_TAG" {
            bail!("BLOCK_TAG must be declared on the blocking argument, not on the command");
        }
        if !flags.contains(&flag) {
            flags.push(flag);
        }
    }
    if def.cacheable {
        if !flags.contains(&"READ_ONLY") {
            bail!("a cacheable command must be READONLY");
        }
        let mut keys = Vec::new();
        key_arguments(&def.arguments, false, &mut keys);
        if let Some((name, _)) = keys.iter().find(|(_, repeated)| *repeated) {
            bail!("a cacheable command cannot repeat key argument '{name}'");
        }
        if keys.len() > 1 {
            bail!(
                "a cacheable command takes at most one key argument, found {}",
                keys.len()
            );
        }
    }

    let mut compiler = Compiler { nodes: Vec::new() };
    let root = compiler.push(Node::new(type_name.clone(), method.clone()));
    let body = compiler.sequence(&type_name, &def.arguments)?;
    compiler.connect(&[root], &body.entries);

    let mut terminals = body.exits;
    if body.nullable {
        terminals.push(root);
    }
    for id in terminals {
        compiler.nodes[id].terminal = true;
    }

    let nodes = compiler.nodes;
    validate(&nodes, def.cacheable)?;

    let mut syntax = name.to_string();
    for arg in &def.arguments {
        syntax.push(' ');
        syntax.push_str(&render(arg));
    }

    Ok(Grammar {
        name: name.to_string(),
        group: group.to_string(),
        type_name,
        method,
        name_tokens,
        summary: def.summary.clone(),
        since: def.since.clone(),
        syntax,
        flags,
        cacheable: def.cacheable,
        nodes,
    })
}

impl Compiler {
    fn push(&mut self, node: Node) -> usize {
        self.nodes.push(node);
        self.nodes.len() - 1
    }

    fn connect(&mut self, from: &[usize], to: &[usize]) {
        for &source in from {
            for &target in to {
                if !self.nodes[source].next.contains(&target) {
                    self.nodes[source].next.push(target);
                }
            }
        }
    }

    /// Chains arguments in order. Optional arguments leave the frontier open,
    /// so every state reaches each later clause up to the first required one.
    fn sequence(&mut self, prefix: &str, args: &[Argument]) -> Result<Fragment> {
        let mut entries = Vec::new();
        let mut frontier: Vec<usize> = Vec::new();
        let mut open = true;

        for arg in args {
            let fragment = self.argument(prefix, arg)?;
            self.connect(&frontier, &fragment.entries);
            if open {
                entries.extend(fragment.entries.iter().copied());
            }
            if arg.optional || fragment.nullable {
                frontier.extend(fragment.exits);
            } else {
                frontier = fragment.exits;
                open = false;
            }
        }

        Ok(Fragment {
            entries,
            exits: frontier,
            nullable: open,
        })
    }

    fn argument(&mut self, prefix: &str, arg: &Argument) -> Result<Fragment> {
        match arg.kind {
            ArgKind::Oneof => self.oneof(prefix, arg),
            ArgKind::Block if !arg.is_flat_block() => self.block(prefix, arg),
            _ => self.leaf(prefix, arg),
        }
    }

    fn leaf(&mut self, prefix: &str, arg: &Argument) -> Result<Fragment> {
        let label = naming::label(&arg.name, arg.token.as_deref());
        let mut node = Node::new(
            format!("{prefix}{label}"),
            naming::ident(&naming::snake(&label))?,
        );
        node.add_flags(&client_flags(&arg.client_flags)?);

        match arg.kind {
            ArgKind::PureToken => {
                let token = arg
                    .token
                    .as_ref()
                    .with_context(|| format!("pure-token '{}' has no token", arg.name))?;
                if arg.multiple {
                    bail!("repeating pure-token '{}' is not supported", arg.name);
                }
                node.enter.push(Emit::Literal(token.clone()));
            }
            ArgKind::Block => {
                let mut body = Vec::new();
                for sub in &arg.arguments {
                    if let Some(token) = &sub.token {
                        body.push(Emit::Literal(token.clone()));
                    } else if sub.kind == ArgKind::PureToken {
                        bail!("pure-token '{}' has no token", sub.name);
                    }
                    if sub.kind.is_value() {
                        let idx = node.add_param(param(sub, false)?)?;
                        body.push(Emit::Value(idx));
                    }
                }
                let once: Vec<Emit> = arg.token.iter().cloned().map(Emit::Literal).collect();
                node.enter = once.iter().cloned().chain(body.iter().cloned()).collect();
                if arg.multiple {
                    node.repeat = Some(if arg.multiple_token {
                        once.into_iter().chain(body).collect()
                    } else {
                        body
                    });
                }
            }
            _ => {
                let idx = node.add_param(param(arg, arg.multiple)?)?;
                if arg.multiple {
                    let per_item = if arg.multiple_token {
                        arg.token.clone()
                    } else {
                        if let Some(token) = &arg.token {
                            node.enter.push(Emit::Literal(token.clone()));
                        }
                        None
                    };
                    node.enter.push(Emit::Each {
                        param: idx,
                        token: per_item.clone(),
                    });
                    node.repeat = Some(vec![Emit::Each {
                        param: idx,
                        token: per_item,
                    }]);
                } else {
                    if let Some(token) = &arg.token {
                        node.enter.push(Emit::Literal(token.clone()));
                    }
                    node.enter.push(Emit::Value(idx));
                }
            }
        }

        let id = self.push(node);
        Ok(Fragment {
            entries: vec![id],
            exits: vec![id],
            nullable: false,
        })
    }

    fn block(&mut self, prefix: &str, arg: &Argument) -> Result<Fragment> {
        if arg.arguments.is_empty() {
            bail!("block '{}' has no arguments", arg.name);
        }
        let label = naming::label(&arg.name, arg.token.as_deref());
        let inner = format!("{prefix}{label}");
        let flags = client_flags(&arg.client_flags)?;

        let Some(token) = &arg.token else {
            let body = self.sequence(&inner, &arg.arguments)?;
            for &entry in &body.entries {
                self.nodes[entry].add_flags(&flags);
            }
            if arg.multiple {
                self.connect(&body.exits, &body.entries);
            }
            return Ok(body);
        };

        let mut head = Node::new(inner.clone(), naming::ident(&naming::snake(&label))?);
        head.enter.push(Emit::Literal(token.clone()));
        head.add_flags(&flags);
        let head = self.push(head);

        let body = self.sequence(&inner, &arg.arguments)?;
        self.connect(&[head], &body.entries);
        if arg.multiple {
            if arg.multiple_token {
                self.connect(&body.exits, &[head]);
            } else {
                self.connect(&body.exits, &body.entries);
            }
        }

        let mut exits = body.exits;
        if body.nullable {
            exits.push(head);
        }
        Ok(Fragment {
            entries: vec![head],
            exits,
            nullable: false,
        })
    }

    fn oneof(&mut self, prefix: &str, arg: &Argument) -> Result<Fragment> {
        if arg.arguments.is_empty() {
            bail!("oneof '{}' has no alternatives", arg.name);
        }
        let label = naming::label(&arg.name, arg.token.as_deref());
        let inner = format!("{prefix}{label}");
        let flags = client_flags(&arg.client_flags)?;

        let mut fragment = Fragment::default();
        for alt in &arg.arguments {
            let alt_fragment = self.argument(&inner, alt)?;
            for &entry in &alt_fragment.entries {
                let node = &mut self.nodes[entry];
                if let Some(token) = &arg.token {
                    node.enter.insert(0, Emit::Literal(token.clone()));
                    let method = format!(
                        "{}_{}",
                        naming::snake(&label),
                        node.method.trim_start_matches("r#")
                    );
                    node.method = naming::ident(&method)?;
                }
                node.add_flags(&flags);
            }
            fragment.entries.extend(alt_fragment.entries);
            fragment.exits.extend(alt_fragment.exits);
            fragment.nullable |= alt_fragment.nullable;
        }

        if arg.multiple {
            if arg.token.is_some() && !arg.multiple_token {
                bail!(
                    "repeating oneof '{}' with a once-only token is not supported",
                    arg.name
                );
            }
            let exits = fragment.exits.clone();
            let entries = fragment.entries.clone();
            self.connect(&exits, &entries);
        }
        Ok(fragment)
    }
}

fn param(arg: &Argument, variadic: bool) -> Result<Param> {
    let kind = match arg.kind {
        ArgKind::Key => ParamKind::Key,
        ArgKind::String | ArgKind::Pattern => ParamKind::Str,
        ArgKind::Integer | ArgKind::UnixTime => ParamKind::Int,
        ArgKind::Double => ParamKind::Float,
        other => bail!("argument '{}' of type {other:?} carries no value", arg.name),
    };
    Ok(Param {
        name: naming::ident(&naming::snake(&arg.name))?,
        kind,
        variadic,
    })
}

/// Collects every key argument, nested ones included, with whether it can
/// occur more than once.
fn key_arguments<'a>(args: &'a [Argument], repeated: bool, out: &mut Vec<(&'a str, bool)>) {
    for arg in args {
        let repeated = repeated || arg.multiple;
        if arg.kind == ArgKind::Key {
            out.push((arg.name.as_str(), repeated));
        }
        key_arguments(&arg.arguments, repeated, out);
    }
}

fn client_flags(names: &[String]) -> Result<Vec<&'static str>> {
    names
        .iter()
        .map(|name| {
            CLIENT_FLAGS
                .iter()
                .copied()
                .find(|known| *known == name)
                .with_context(|| format!("unknown client flag '{name}'"))
        })
        .collect()
}

fn validate(nodes: &[Node], cacheable: bool) -> Result<()> {
    let mut states: Vec<&str> = Vec::with_capacity(nodes.len());
    for node in nodes {
        if states.contains(&node.state.as_str()) {
            bail!("state '{}' is generated twice", node.state);
        }
        states.push(&node.state);
    }

    for node in nodes {
        let mut methods: Vec<&str> = Vec::new();
        for &target in &node.next {
            methods.push(&nodes[target].method);
        }
        if node.repeat.is_some() {
            methods.push(&node.method);
        }
        for method in &methods {
            if *method == "build" || *method == "cache" {
                bail!("state '{}' has an edge named '{method}'", node.state);
            }
        }
        for (i, method) in methods.iter().enumerate() {
            if methods[..i].contains(method) {
                bail!("state '{}' has two edges named '{method}'", node.state);
            }
        }
        if !node.terminal && node.next.is_empty() {
            bail!("state '{}' can neither continue nor finish", node.state);
        }
    }

    if cacheable && !nodes.iter().any(|node| node.terminal) {
        bail!("a cacheable command needs a terminal state");
    }
    Ok(())
}

/// Renders an argument back into the documented syntax.
fn render(arg: &Argument) -> String {
    let inner = match arg.kind {
        ArgKind::PureToken => arg.token.clone().unwrap_or_else(|| arg.name.clone()),
        ArgKind::Oneof => {
            let alternatives: Vec<String> = arg.arguments.iter().map(render).collect();
            let joined = alternatives.join(" | ");
            if arg.optional {
                joined
            } else {
                format!("<{joined}>")
            }
        }
        ArgKind::Block => arg
            .arguments
            .iter()
            .map(render)
            .collect::<Vec<_>>()
            .join(" "),
        _ => arg.name.clone(),
    };

    let with_token = match (&arg.token, arg.kind) {
        (Some(token), kind) if kind != ArgKind::PureToken => format!("{token} {inner}"),
        _ => inner.clone(),
    };

    let rendered = if arg.multiple {
        let again = if arg.multiple_token {
            with_token.clone()
        } else {
            inner
        };
        format!("{with_token} [{again} ...]")
    } else {
        with_token
    };

    if arg.optional {
        format!("[{rendered}]")
    } else {
        rendered
    }
}
