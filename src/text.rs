use std::borrow::Cow;

use crate::{RawBytes, RawBytesError};

/// Produces the structured-text (JSON) encoding of a value.
pub trait TextEncode {
    fn encode_text(&self) -> Result<Cow<'_, [u8]>, RawBytesError>;
}

/// Replaces a value with the one encoded in structured text (JSON).
pub trait TextDecode {
    fn decode_text(&mut self, input: &[u8]) -> Result<(), RawBytesError>;
}

impl TextEncode for RawBytes {
    /// Returns the held bytes as they are. They are assumed to be encoded text already.
    ///
    /// ## Example
    ///
    /// ```
    /// use rawbuf::{RawBytes, TextEncode};
    ///
    /// let raw = RawBytes::from(r#"{"a":1}"#);
    /// assert_eq!(raw.encode_text().unwrap().as_ref(), br#"{"a":1}"#);
    /// ```
    fn encode_text(&self) -> Result<Cow<'_, [u8]>, RawBytesError> {
        Ok(Cow::Borrowed(self.as_bytes()))
    }
}

impl TextDecode for RawBytes {
    /// Sets the held bytes to a copy of `input`. This never fails.
    fn decode_text(&mut self, input: &[u8]) -> Result<(), RawBytesError> {
        self.set(input);
        Ok(())
    }
}

impl TextDecode for Option<RawBytes> {
    /// Sets the held bytes of a present container to a copy of `input`.
    ///
    /// ## Example
    ///
    /// ```
    /// use rawbuf::{RawBytes, RawBytesError, TextDecode};
    ///
    /// let mut absent: Option<RawBytes> = None;
    /// let err = absent.decode_text(b"{}").unwrap_err();
    /// assert!(matches!(err, RawBytesError::NilReceiver { .. }));
    /// ```
    fn decode_text(&mut self, input: &[u8]) -> Result<(), RawBytesError> {
        match self {
            Some(raw) => raw.decode_text(input),
            None => Err(RawBytesError::nil_receiver("decode_text")),
        }
    }
}
