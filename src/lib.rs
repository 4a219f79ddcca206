//! A raw bytes container for deferred decoding.
//!
//! [`RawBytes`] holds the encoded form of a sub-message without interpreting it.
//! This allows partially decoding an envelope (e.g. a type name plus a payload)
//! and decoding the payload later, once the concrete target type is known.
//!
//! `RawBytes` plugs into two serialization protocols:
//!
//! - JSON via [`TextEncode`]/[`TextDecode`] and, with the `json` feature, `serde`
//! - protobuf wire format via [`BinaryEncode`]/[`BinaryDecode`] and the
//!   length-delimited helpers on [`RawBytes`]
//!
//! In both directions the bytes are copied verbatim. Encoding exposes the held
//! bytes, decoding replaces them with a copy of the input.
//!
//! ## Absent containers
//!
//! The decode traits and [`ToDisplayString`] are also implemented for
//! `Option<RawBytes>`, where `None` stands for a container that does not exist.
//! Decoding into `None` fails with [`RawBytesError::NilReceiver`], displaying it
//! yields an empty string.
//!
//! ## Non goals
//! - Parsing or validating the held bytes
//! - Knowing the schema of the payload
//! - Envelope dispatch

mod binary;
mod error;
#[cfg(feature = "json")]
mod json;
mod slice_reader;
mod text;
mod varint;

pub use binary::{BinaryDecode, BinaryEncode};
pub use error::RawBytesError;
pub use text::{TextDecode, TextEncode};

use std::fmt;

/// Raw encoded bytes of a value that has not been decoded yet.
///
/// Two instances are equal if they hold the same bytes in the same order.
///
/// ## Example
///
/// ```
/// use rawbuf::{BinaryDecode, BinaryEncode, RawBytes};
///
/// let mut payload = RawBytes::new();
/// payload.decode_binary(&[0x01, 0x02, 0x03]).unwrap();
/// assert_eq!(payload.size(), 3);
/// assert_eq!(payload.encode_binary().unwrap().as_ref(), [0x01, 0x02, 0x03]);
/// assert_eq!(payload, RawBytes::from(vec![0x01, 0x02, 0x03]));
/// ```
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash)]
pub struct RawBytes {
    data: Vec<u8>,
}

impl RawBytes {
    /// Creates an empty container.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of bytes held.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Replaces the held bytes with a copy of `data`.
    ///
    /// Nothing of the previous content survives, also when `data` is shorter.
    ///
    /// ## Example
    ///
    /// ```
    /// # use rawbuf::RawBytes;
    /// let mut raw = RawBytes::from("long payload");
    /// raw.set(b"ok");
    /// assert_eq!(raw.as_bytes(), b"ok");
    /// ```
    pub fn set(&mut self, data: impl AsRef<[u8]>) {
        self.data.clear();
        self.data.extend_from_slice(data.as_ref());
    }

    /// Returns the held bytes.
    ///
    /// The data is the same as [`RawBytes::into_vec`] but does not consume the instance.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Takes the instance and returns the held bytes without cloning them.
    pub fn into_vec(self) -> Vec<u8> {
        self.data
    }
}

/// Renders a value as a display string, recovering from absent values.
pub trait ToDisplayString {
    fn to_display_string(&self) -> String;
}

impl ToDisplayString for RawBytes {
    /// The held bytes as text. Invalid UTF-8 sequences are replaced with U+FFFD.
    fn to_display_string(&self) -> String {
        String::from_utf8_lossy(&self.data).into_owned()
    }
}

impl ToDisplayString for Option<RawBytes> {
    /// Like [`RawBytes::to_display_string`], but an absent container yields `""`.
    fn to_display_string(&self) -> String {
        match self {
            Some(raw) => raw.to_display_string(),
            None => String::new(),
        }
    }
}

impl fmt::Display for RawBytes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&String::from_utf8_lossy(&self.data))
    }
}

impl AsRef<[u8]> for RawBytes {
    fn as_ref(&self) -> &[u8] {
        &self.data
    }
}

impl From<Vec<u8>> for RawBytes {
    fn from(data: Vec<u8>) -> Self {
        Self { data }
    }
}

impl From<&[u8]> for RawBytes {
    fn from(data: &[u8]) -> Self {
        Self {
            data: data.to_vec(),
        }
    }
}

impl<const N: usize> From<&[u8; N]> for RawBytes {
    fn from(data: &[u8; N]) -> Self {
        Self::from(data.as_slice())
    }
}

impl From<&str> for RawBytes {
    fn from(text: &str) -> Self {
        Self::from(text.as_bytes())
    }
}

impl From<String> for RawBytes {
    fn from(text: String) -> Self {
        Self {
            data: text.into_bytes(),
        }
    }
}

impl From<RawBytes> for Vec<u8> {
    fn from(raw: RawBytes) -> Self {
        raw.data
    }
}

impl PartialEq<[u8]> for RawBytes {
    fn eq(&self, rhs: &[u8]) -> bool {
        self.data == rhs
    }
}

impl PartialEq<&[u8]> for RawBytes {
    fn eq(&self, rhs: &&[u8]) -> bool {
        self.data == *rhs
    }
}

impl PartialEq<Vec<u8>> for RawBytes {
    fn eq(&self, rhs: &Vec<u8>) -> bool {
        &self.data == rhs
    }
}
