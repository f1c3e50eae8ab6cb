//! Scalar wrappers with dedicated decoding rules.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Text that is never echoed in `Debug` or `Display` output.
///
/// The raw value is passed through by the decoder unchanged; use
/// [`Secret::expose`] to read it.
#[derive(Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct Secret(String);

impl Secret {
    const REDACTED: &'static str = "**********";

    /// Wrap `value`.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Borrow the secret text.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Secret({:?})", Self::REDACTED)
    }
}

impl fmt::Display for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(Self::REDACTED)
    }
}

/// Byte sequence decoded from the UTF-8 encoding of a raw value.
///
/// `Vec<u8>` is described as a sequence of integers and therefore parsed as
/// a JSON array; `Bytes` takes the raw string verbatim.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct Bytes(Vec<u8>);

impl Bytes {
    /// Borrow the bytes.
    #[must_use]
    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }

    /// Take ownership of the bytes.
    #[must_use]
    pub fn into_vec(self) -> Vec<u8> {
        self.0
    }
}

impl From<Vec<u8>> for Bytes {
    fn from(value: Vec<u8>) -> Self {
        Self(value)
    }
}

impl AsRef<[u8]> for Bytes {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn secret_is_redacted() {
        let secret = Secret::new("very secret");
        assert_eq!(secret.to_string(), "**********");
        assert_eq!(format!("{secret:?}"), "Secret(\"**********\")");
        assert_eq!(secret.expose(), "very secret");
    }

    #[test]
    fn bytes_deserialize_from_integer_array() -> anyhow::Result<()> {
        let bytes: Bytes = serde_json::from_str("[97, 0, 98]")?;
        anyhow::ensure!(bytes.as_slice() == b"a\0b", "unexpected bytes {bytes:?}");
        Ok(())
    }
}
