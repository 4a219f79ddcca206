use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RawBytesError {
    /// A decode was attempted on a container that does not exist
    #[error("RawBytes: {operation} on absent container")]
    NilReceiver { operation: &'static str },
    /// Found tag that is either not valid protobuf or unsupported
    #[error("invalid tag")]
    InvalidTag,
    /// Field number must be between 1 and 536,870,911
    #[error("field number must be between 1 and 536,870,911")]
    InvalidFieldNumber,
    #[error("unsupported wire type {0}")]
    UnsupportedWireType(u8),
    #[error("error decoding varint")]
    ErrorDecodingVarint,
    /// The remaining data is not long enough to read the expected length
    #[error("unexpected end of data")]
    UnexpectedEndOfData,
}

impl RawBytesError {
    pub(crate) fn nil_receiver(operation: &'static str) -> Self {
        tracing::debug!(operation, "rejected decode into absent RawBytes");
        RawBytesError::NilReceiver { operation }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_works() {
        let err = RawBytesError::NilReceiver {
            operation: "decode_text",
        };
        assert_eq!(err.to_string(), "RawBytes: decode_text on absent container");
        assert_eq!(
            RawBytesError::UnsupportedWireType(3).to_string(),
            "unsupported wire type 3"
        );
    }
}
