//! Detection of lap marker blocks.
//!
//! In sessions without positioning data, the watch marks each lap by inserting
//! a fixed-length block into the sample stream. The block is almost entirely
//! zero padding, whereas heart-rate codes never produce long low-density runs,
//! so a block is recognized by the proportion of set bits ahead of the cursor.

use super::bits::BitStream;

/// Length of a lap marker block.
pub const LAP_BLOCK_BITS: usize = 416;
/// Proportion of set bits below which a region is taken to be a lap block.
pub const LAP_DENSITY_THRESHOLD: f32 = 0.15;

/// Recognizes lap marker blocks by bit density.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LapBlockDetector {
    block_bits: usize,
    density_threshold: f32,
}

impl LapBlockDetector {
    pub const fn new(block_bits: usize, density_threshold: f32) -> Self {
        Self {
            block_bits,
            density_threshold,
        }
    }

    /// The number of bits to skip once a block has been detected.
    pub const fn block_bits(&self) -> usize {
        self.block_bits
    }

    pub const fn density_threshold(&self) -> f32 {
        self.density_threshold
    }

    /// The proportion of set bits in the block-length region at `offset`, or
    /// `None` if the stream ends before the region does.
    pub fn density(&self, stream: &BitStream, offset: usize) -> Option<f32> {
        if self.block_bits == 0 {
            return None;
        }

        let ones = stream.count_ones(offset, self.block_bits).ok()?;

        Some(ones as f32 / self.block_bits as f32)
    }

    /// Whether a lap block begins at `offset`.
    ///
    /// A region shorter than a full block is never a block.
    pub fn detect(&self, stream: &BitStream, offset: usize) -> bool {
        self.density(stream, offset)
            .is_some_and(|density| density < self.density_threshold)
    }
}

impl Default for LapBlockDetector {
    fn default() -> Self {
        Self::new(LAP_BLOCK_BITS, LAP_DENSITY_THRESHOLD)
    }
}
