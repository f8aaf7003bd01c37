// src/core/commands/command_trait.rs

//! Defines the flag set carried by every command and the traits through which
//! caller values become command tokens.

use bitflags::bitflags;
use bytes::Bytes;

bitflags! {
    /// Flags that describe how the wire layer should treat a built command.
    /// The bit positions are shared with the cluster client and are stable.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
    pub struct CommandFlags: u16 {
        /// The command only reads data.
        const READ_ONLY        = 1 << 0;
        /// The command was finalized through `cache()`.
        const CACHE_ELIGIBLE   = 1 << 1;
        /// A blocking variant was chosen (a `BLOCK` policy or a blocking timeout).
        const BLOCK_TAG        = 1 << 2;
        /// The server sends no reply to this command.
        const NO_REPLY         = 1 << 3;
        /// A multi-key read whose reply is split per key.
        const MULTI_GET        = 1 << 4;
        /// `CLIENT CACHING YES`, which must precede an opt-in cached read.
        const OPT_IN           = 1 << 5;
        /// One of the unsubscribe commands.
        const UNSUBSCRIBE      = 1 << 6;
        /// A read-only script or query call (`*_RO`).
        const SCRIPT_READ_ONLY = 1 << 7;
    }
}

/// A value that can be written as one command token.
///
/// Implemented for the usual string and byte types. Owned `Bytes` and
/// `String` values move in without copying.
pub trait IntoToken {
    fn into_token(self) -> Bytes;
}

impl IntoToken for Bytes {
    fn into_token(self) -> Bytes {
        self
    }
}

impl IntoToken for &Bytes {
    fn into_token(self) -> Bytes {
        self.clone()
    }
}

impl IntoToken for String {
    fn into_token(self) -> Bytes {
        Bytes::from(self)
    }
}

impl IntoToken for &String {
    fn into_token(self) -> Bytes {
        Bytes::copy_from_slice(self.as_bytes())
    }
}

impl IntoToken for &str {
    fn into_token(self) -> Bytes {
        Bytes::copy_from_slice(self.as_bytes())
    }
}

impl IntoToken for Vec<u8> {
    fn into_token(self) -> Bytes {
        Bytes::from(self)
    }
}

impl IntoToken for &[u8] {
    fn into_token(self) -> Bytes {
        Bytes::copy_from_slice(self)
    }
}

impl<const N: usize> IntoToken for &[u8; N] {
    fn into_token(self) -> Bytes {
        Bytes::copy_from_slice(self)
    }
}

/// One or more values for a repeating parameter.
///
/// `.key("a")`, `.key(["a", "b"])` and `.key(vec![a, b])` all satisfy
/// `impl Variadic<Bytes>`; items are visited in order.
pub trait Variadic<T> {
    fn each(self, f: impl FnMut(T));
}

macro_rules! variadic_single_token {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Variadic<Bytes> for $ty {
                fn each(self, mut f: impl FnMut(Bytes)) {
                    f(self.into_token());
                }
            }
        )*
    };
}

variadic_single_token!(Bytes, &Bytes, String, &String, &str, &[u8]);

impl<const N: usize> Variadic<Bytes> for &[u8; N] {
    fn each(self, mut f: impl FnMut(Bytes)) {
        f(self.into_token());
    }
}

impl<S: IntoToken, const N: usize> Variadic<Bytes> for [S; N] {
    fn each(self, f: impl FnMut(Bytes)) {
        self.into_iter().map(IntoToken::into_token).for_each(f);
    }
}

impl<S: IntoToken> Variadic<Bytes> for Vec<S> {
    fn each(self, f: impl FnMut(Bytes)) {
        self.into_iter().map(IntoToken::into_token).for_each(f);
    }
}

impl<S: IntoToken + Clone> Variadic<Bytes> for &[S] {
    fn each(self, f: impl FnMut(Bytes)) {
        self.iter().cloned().map(IntoToken::into_token).for_each(f);
    }
}

macro_rules! variadic_numbers {
    ($($num:ty),*) => {
        $(
            impl Variadic<$num> for $num {
                fn each(self, mut f: impl FnMut($num)) {
                    f(self);
                }
            }

            impl<const N: usize> Variadic<$num> for [$num; N] {
                fn each(self, f: impl FnMut($num)) {
                    self.into_iter().for_each(f);
                }
            }

            impl Variadic<$num> for Vec<$num> {
                fn each(self, f: impl FnMut($num)) {
                    self.into_iter().for_each(f);
                }
            }

            impl Variadic<$num> for &[$num] {
                fn each(self, f: impl FnMut($num)) {
                    self.iter().copied().for_each(f);
                }
            }
        )*
    };
}

variadic_numbers!(i64, f64);
