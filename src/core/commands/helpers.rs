// src/core/commands/helpers.rs

//! Number formatting for integer and double arguments.

use bytes::Bytes;

/// Formats an integer argument.
pub fn int_token(value: i64) -> Bytes {
    let mut buf = itoa::Buffer::new();
    Bytes::copy_from_slice(buf.format(value).as_bytes())
}

/// Formats a double argument as the shortest decimal that reads back to the
/// same value, so `1.0` becomes `"1"` and `1.5` stays `"1.5"`.
///
/// Infinities are written as `+inf` / `-inf`, which the server accepts for
/// score and range arguments.
pub fn float_token(value: f64) -> Bytes {
    if value.is_infinite() {
        return Bytes::from_static(if value > 0.0 { b"+inf" } else { b"-inf" });
    }
    Bytes::from(value.to_string())
}
