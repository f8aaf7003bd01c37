// src/core/commands/args.rs

//! The ordered token buffer a command is assembled in.

use bytes::Bytes;

/// A growable, ordered list of command tokens.
///
/// The buffer is append-only until it is frozen at finalization. Pushing into
/// a frozen buffer is a programming error and panics; the generated grammars
/// give no way to reach it.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ArgBuffer {
    tokens: Vec<Bytes>,
    frozen: bool,
}

impl ArgBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            tokens: Vec::with_capacity(capacity),
            frozen: false,
        }
    }

    pub fn push(&mut self, token: Bytes) {
        assert!(!self.frozen, "push into a frozen argument buffer");
        self.tokens.push(token);
    }

    pub fn push_all<I>(&mut self, tokens: I)
    where
        I: IntoIterator<Item = Bytes>,
    {
        assert!(!self.frozen, "push into a frozen argument buffer");
        self.tokens.extend(tokens);
    }

    pub fn freeze(&mut self) {
        self.frozen = true;
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    /// Clears the tokens and the frozen marker, keeping the allocation.
    pub fn reset(&mut self) {
        self.tokens.clear();
        self.frozen = false;
    }

    pub fn as_slice(&self) -> &[Bytes] {
        &self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.tokens.capacity()
    }
}
