use crate::slice_reader::SliceReader;

/// A u64 never needs more than 10 groups of 7 bits.
const MAX_VARINT_LEN: usize = 10;

/// Encodes the unsigned integer `n` using the protobuf varint (variable integer)
/// format.
pub fn unsigned_varint_encode(mut n: u64, dest: &mut Vec<u8>) {
    let mut buf = [0u8; MAX_VARINT_LEN];
    let mut len = 0;
    loop {
        // Read least significant 7 bits
        let mut b = (n & 0b0111_1111) as u8;
        n >>= 7;
        // Set top bit when not yet done
        if n != 0 {
            b |= 0b1000_0000;
        }
        buf[len] = b;
        len += 1;
        if n == 0 {
            break;
        }
    }
    dest.extend_from_slice(&buf[0..len]);
}

/// Number of bytes [`unsigned_varint_encode`] writes for `n`.
pub fn unsigned_varint_len(n: u64) -> usize {
    let bits = 64 - (n | 1).leading_zeros() as usize;
    bits.div_ceil(7)
}

/// Reads a protobuf varint. Returns None if the data ends before the last group,
/// the encoding is longer than 10 bytes or the value does not fit in a u64.
pub fn read_unsigned_varint(data: &mut SliceReader) -> Option<u64> {
    let mut out = 0u64;
    for byte_counter in 0..MAX_VARINT_LEN {
        let byte = data.read_one()?;
        // the 10th group only has room for bit 63
        if byte_counter == MAX_VARINT_LEN - 1 && byte > 1 {
            return None;
        }
        let value = (byte & 0x7f) as u64;
        out |= value << (byte_counter * 7);
        if byte & 0x80 == 0 {
            return Some(out);
        }
    }
    None
}
