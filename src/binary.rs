use std::borrow::Cow;

use crate::slice_reader::SliceReader;
use crate::varint::{read_unsigned_varint, unsigned_varint_encode, unsigned_varint_len};
use crate::{RawBytes, RawBytesError};

/// Produces the compact-binary (protobuf wire format) encoding of a value.
pub trait BinaryEncode {
    fn encode_binary(&self) -> Result<Cow<'_, [u8]>, RawBytesError>;

    /// Writes the encoding into `dest` and returns the number of bytes written.
    fn encode_binary_into(&self, dest: &mut [u8]) -> Result<usize, RawBytesError>;

    /// Length of the encoding in bytes
    fn size(&self) -> usize;
}

/// Replaces a value with the one encoded in the compact-binary format.
pub trait BinaryDecode {
    fn decode_binary(&mut self, input: &[u8]) -> Result<(), RawBytesError>;
}

impl BinaryEncode for RawBytes {
    /// Returns the held bytes as they are.
    fn encode_binary(&self) -> Result<Cow<'_, [u8]>, RawBytesError> {
        Ok(Cow::Borrowed(self.as_bytes()))
    }

    /// Copies as many held bytes as fit into `dest` and returns that count.
    ///
    /// `dest` is never grown. If the result is smaller than [`BinaryEncode::size`]
    /// the output was truncated.
    ///
    /// ## Example
    ///
    /// ```
    /// use rawbuf::{BinaryEncode, RawBytes};
    ///
    /// let raw = RawBytes::from(vec![1, 2, 3]);
    ///
    /// let mut large = [0u8; 5];
    /// assert_eq!(raw.encode_binary_into(&mut large).unwrap(), 3);
    /// assert_eq!(large, [1, 2, 3, 0, 0]);
    ///
    /// let mut small = [0u8; 2];
    /// assert_eq!(raw.encode_binary_into(&mut small).unwrap(), 2);
    /// assert_eq!(small, [1, 2]);
    /// ```
    fn encode_binary_into(&self, dest: &mut [u8]) -> Result<usize, RawBytesError> {
        let written = self.len().min(dest.len());
        dest[..written].copy_from_slice(&self.as_bytes()[..written]);
        Ok(written)
    }

    fn size(&self) -> usize {
        self.len()
    }
}

impl BinaryDecode for RawBytes {
    /// Sets the held bytes to a copy of `input`. This never fails.
    fn decode_binary(&mut self, input: &[u8]) -> Result<(), RawBytesError> {
        self.set(input);
        Ok(())
    }
}

impl BinaryDecode for Option<RawBytes> {
    fn decode_binary(&mut self, input: &[u8]) -> Result<(), RawBytesError> {
        match self {
            Some(raw) => raw.decode_binary(input),
            None => Err(RawBytesError::nil_receiver("decode_binary")),
        }
    }
}

/// The protobuf wire types
///
/// <https://protobuf.dev/programming-guides/encoding/#structure>
#[repr(u8)]
enum WireType {
    /// Variable length field (int32, int64, uint32, uint64, sint32, sint64, bool, enum)
    Varint = 0,
    /// 64-bit fixed length field (fixed64, sfixed64, double)
    I64 = 1,
    /// Lengths prefixed field (string, bytes, embedded messages, packed repeated fields)
    Len = 2,
    // group start/end (deprecated, unsupported)
    // SGROUP = 3,
    // EGROUP = 4,
    /// 32-bit fixed length field (fixed32, sfixed32, float)
    I32 = 5,
}

impl WireType {
    fn from_tag(tag: u64) -> Result<Self, RawBytesError> {
        match (tag & 0x07) as u8 {
            0 => Ok(WireType::Varint),
            1 => Ok(WireType::I64),
            2 => Ok(WireType::Len),
            5 => Ok(WireType::I32),
            other => Err(RawBytesError::UnsupportedWireType(other)),
        }
    }
}

const MAX_FIELD_NUMBER: u32 = (1 << 29) - 1;

impl RawBytes {
    /// Length of the output of [`RawBytes::encode_length_delimited`].
    pub fn encoded_len_delimited(&self) -> usize {
        unsigned_varint_len(self.len() as u64) + self.len()
    }

    /// Appends a varint length prefix followed by the held bytes to `dest`.
    ///
    /// ## Example
    ///
    /// ```
    /// # use rawbuf::RawBytes;
    /// let mut out = Vec::new();
    /// RawBytes::from("true").encode_length_delimited(&mut out);
    /// assert_eq!(out, [4, b't', b'r', b'u', b'e']);
    /// ```
    pub fn encode_length_delimited(&self, dest: &mut Vec<u8>) {
        dest.reserve(self.encoded_len_delimited());
        unsigned_varint_encode(self.len() as u64, dest);
        dest.extend_from_slice(self.as_bytes());
    }

    /// Reads one length-delimited payload from the start of `input`.
    ///
    /// Returns a copy of the payload and the unread remainder of `input`, so
    /// consecutive payloads can be read in a loop.
    ///
    /// ## Example
    ///
    /// ```
    /// # use rawbuf::RawBytes;
    /// let stream = [2, 0xAA, 0xBB, 0, 1, 0x07];
    ///
    /// let (first, rest) = RawBytes::split_length_delimited(&stream).unwrap();
    /// assert_eq!(first, vec![0xAA, 0xBB]);
    /// let (second, rest) = RawBytes::split_length_delimited(rest).unwrap();
    /// assert!(second.is_empty());
    /// let (third, rest) = RawBytes::split_length_delimited(rest).unwrap();
    /// assert_eq!(third, vec![0x07]);
    /// assert!(rest.is_empty());
    /// ```
    pub fn split_length_delimited(input: &[u8]) -> Result<(RawBytes, &[u8]), RawBytesError> {
        let mut reader = SliceReader::new(input);
        let payload = read_len_value(&mut reader)?;
        Ok((RawBytes::from(payload), reader.rest()))
    }

    /// Appends this payload as a length-delimited field with the given field number.
    ///
    /// Unlike proto3 scalar fields an empty payload is written too, as a present
    /// but empty embedded message differs from an absent one.
    ///
    /// Fails with [`RawBytesError::InvalidFieldNumber`] unless `field_number` is
    /// between 1 and 536,870,911. Nothing is written to `dest` in that case.
    ///
    /// ## Example
    ///
    /// ```
    /// # use rawbuf::RawBytes;
    /// let mut message = Vec::new();
    /// RawBytes::from(vec![0x08, 0x96, 0x01]).encode_field(2, &mut message).unwrap();
    /// assert_eq!(message, [0x12, 3, 0x08, 0x96, 0x01]);
    /// ```
    pub fn encode_field(
        &self,
        field_number: u32,
        dest: &mut Vec<u8>,
    ) -> Result<(), RawBytesError> {
        if !(1..=MAX_FIELD_NUMBER).contains(&field_number) {
            return Err(RawBytesError::InvalidFieldNumber);
        }
        // The top 3 bits of a valid field number are unset, so this shift cannot overflow
        let tag = (field_number << 3) | WireType::Len as u32;
        unsigned_varint_encode(tag as u64, dest);
        self.encode_length_delimited(dest);
        Ok(())
    }

    /// Finds the first length-delimited field with the given number in a protobuf
    /// message and returns a copy of its bytes.
    ///
    /// All other fields are skipped without being interpreted, as is a field with
    /// the given number but a different wire type. Returns `Ok(None)` if no such
    /// field exists.
    ///
    /// ## Example
    ///
    /// ```
    /// # use rawbuf::RawBytes;
    /// // field 1: varint 150, field 2: bytes [0xF0, 0x00]
    /// let message = [0x08, 0x96, 0x01, 0x12, 0x02, 0xF0, 0x00];
    /// let payload = RawBytes::from_field(&message, 2).unwrap();
    /// assert_eq!(payload, Some(RawBytes::from(vec![0xF0, 0x00])));
    /// assert_eq!(RawBytes::from_field(&message, 1).unwrap(), None);
    /// assert_eq!(RawBytes::from_field(&message, 3).unwrap(), None);
    /// ```
    pub fn from_field(
        message: &[u8],
        field_number: u32,
    ) -> Result<Option<RawBytes>, RawBytesError> {
        let mut reader = SliceReader::new(message);

        while !reader.is_empty() {
            let tag = read_unsigned_varint(&mut reader).ok_or_else(|| {
                tracing::trace!(offset = message.len() - reader.len(), "invalid tag");
                RawBytesError::InvalidTag
            })?;

            // valid field numbers are between 1 and 536,870,911
            let number: u32 = (tag >> 3)
                .try_into()
                .map_err(|_| RawBytesError::InvalidFieldNumber)?;
            if number == 0 || number > MAX_FIELD_NUMBER {
                tracing::trace!(number, "field number out of range");
                return Err(RawBytesError::InvalidFieldNumber);
            }

            match WireType::from_tag(tag)? {
                WireType::Len => {
                    let value = read_len_value(&mut reader)?;
                    if number == field_number {
                        return Ok(Some(RawBytes::from(value)));
                    }
                }
                WireType::Varint => {
                    read_unsigned_varint(&mut reader).ok_or(RawBytesError::ErrorDecodingVarint)?;
                }
                WireType::I64 => skip_exact(&mut reader, 8)?,
                WireType::I32 => skip_exact(&mut reader, 4)?,
            }
        }

        Ok(None)
    }
}

fn read_len_value<'a>(reader: &mut SliceReader<'a>) -> Result<&'a [u8], RawBytesError> {
    let length = read_unsigned_varint(reader).ok_or(RawBytesError::ErrorDecodingVarint)?;
    let length: usize = length
        .try_into()
        .map_err(|_| RawBytesError::UnexpectedEndOfData)?;
    reader.read(length).ok_or_else(|| {
        tracing::trace!(length, remaining = reader.len(), "length exceeds remaining data");
        RawBytesError::UnexpectedEndOfData
    })
}

fn skip_exact(reader: &mut SliceReader, n: usize) -> Result<(), RawBytesError> {
    if reader.skip(n) {
        Ok(())
    } else {
        Err(RawBytesError::UnexpectedEndOfData)
    }
}
