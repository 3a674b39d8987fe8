//! Bit-addressed view over a session's sample region.

use thiserror::Error;

/// An error reading from a bit stream or decoding a code.
///
/// Inside the session decoder both end-of-stream variants are normal
/// termination signals, not failures.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// A read would extend past the end of the stream.
    #[error("Read of {width} bits at offset {offset} exceeds stream length ({len}).")]
    OutOfRange {
        offset: usize,
        width: usize,
        len: usize,
    },
    /// Fewer bits remain than the code at this offset requires.
    #[error("Code needs {needed} bits, but only {remaining} remain.")]
    InsufficientBits { needed: usize, remaining: usize },
    /// Requested a read width outside `1..=32`.
    #[error("Invalid read width ({0}).")]
    InvalidWidth(usize),
}

/// An immutable sequence of bits, backed by a byte slice.
///
/// Bits are numbered from the most significant bit of the first byte. The
/// stream has no cursor; every read names its own offset.
#[derive(Clone, Copy, Debug)]
pub struct BitStream<'a> {
    bytes: &'a [u8],
}

impl<'a> BitStream<'a> {
    pub const fn new(bytes: &'a [u8]) -> Self {
        Self { bytes }
    }

    /// The total number of bits in the stream.
    pub const fn len(&self) -> usize {
        self.bytes.len() * 8
    }

    pub const fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// The number of bits from `offset` to the end of the stream.
    pub const fn remaining(&self, offset: usize) -> usize {
        self.len().saturating_sub(offset)
    }

    /// The underlying bytes.
    pub const fn as_bytes(&self) -> &'a [u8] {
        self.bytes
    }

    /// Read a `width`-bit unsigned integer starting at `offset`, most
    /// significant bit first.
    pub fn read_bits(&self, offset: usize, width: usize) -> Result<u32, DecodeError> {
        if !(1..=32).contains(&width) {
            Err(DecodeError::InvalidWidth(width))?;
        }

        let len = self.len();
        let end = offset
            .checked_add(width)
            .filter(|&end| end <= len)
            .ok_or(DecodeError::OutOfRange { offset, width, len })?;

        // A 32-bit read spans at most five bytes, which fit in a `u64`.
        let first = offset / 8;
        let last = (end - 1) / 8;

        let word = self.bytes[first..=last]
            .iter()
            .fold(0u64, |acc, &b| (acc << 8) | u64::from(b));

        let trailing = (last + 1) * 8 - end;
        let mask = (1u64 << width) - 1;

        Ok(((word >> trailing) & mask) as u32)
    }

    /// Count the bits set to `1` in the `width` bits starting at `offset`.
    pub fn count_ones(&self, offset: usize, width: usize) -> Result<u32, DecodeError> {
        let len = self.len();
        let end = offset
            .checked_add(width)
            .filter(|&end| end <= len)
            .ok_or(DecodeError::OutOfRange { offset, width, len })?;

        let mut ones = 0;
        let mut i = offset;

        while i < end {
            let chunk = (end - i).min(32);
            ones += self.read_bits(i, chunk)?.count_ones();
            i += chunk;
        }

        Ok(ones)
    }
}

impl<'a> From<&'a [u8]> for BitStream<'a> {
    fn from(bytes: &'a [u8]) -> Self {
        Self::new(bytes)
    }
}
