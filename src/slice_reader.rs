/// A mutable reader of an immutable data source
pub struct SliceReader<'x> {
    data: &'x [u8],
    pos: usize,
}

impl<'x> SliceReader<'x> {
    pub fn new(data: &'x [u8]) -> Self {
        Self { data, pos: 0 }
    }

    pub fn is_empty(&self) -> bool {
        self.pos == self.data.len()
    }

    /// Remaining data to read
    pub fn len(&self) -> usize {
        self.data.len() - self.pos
    }

    /// The unread tail of the data source
    pub fn rest(&self) -> &'x [u8] {
        &self.data[self.pos..]
    }

    /// Reads `n` bytes and advances the reader by `n`
    pub fn read(&mut self, n: usize) -> Option<&'x [u8]> {
        if self.len() < n {
            return None;
        }
        let out = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Some(out)
    }

    /// Reads one byte and advances the reader by 1
    pub fn read_one(&mut self) -> Option<u8> {
        let out = *self.data.get(self.pos)?;
        self.pos += 1;
        Some(out)
    }

    /// Advances the reader by `n` without looking at the bytes.
    /// Returns false and leaves the position unchanged if fewer than `n` bytes remain.
    pub fn skip(&mut self, n: usize) -> bool {
        self.read(n).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_works() {
        let original = [5u8, 7, 234, 2, 45];

        let mut reader = SliceReader::new(&original);
        assert_eq!(reader.read(2).unwrap(), [5, 7]);
        assert_eq!(reader.len(), 3);
        assert_eq!(reader.rest(), [234, 2, 45]);

        // read 0
        assert_eq!(reader.read(0).unwrap(), b"");
        assert_eq!(reader.len(), 3);

        // exceeds length, position unchanged
        assert!(reader.read(4).is_none());
        assert_eq!(reader.len(), 3);

        assert_eq!(reader.read(3).unwrap(), [234, 2, 45]);
        assert!(reader.is_empty());
        assert_eq!(reader.rest(), b"");
    }

    #[test]
    fn read_one_works() {
        let mut reader = SliceReader::new(&[0xAA, 0xBB]);
        assert_eq!(reader.read_one(), Some(0xAA));
        assert_eq!(reader.read_one(), Some(0xBB));
        assert_eq!(reader.read_one(), None);
        assert!(reader.is_empty());
    }

    #[test]
    fn skip_works() {
        let mut reader = SliceReader::new(&[1, 2, 3, 4]);
        assert!(reader.skip(3));
        assert_eq!(reader.rest(), [4]);
        assert!(!reader.skip(2));
        assert_eq!(reader.rest(), [4]);
    }
}
