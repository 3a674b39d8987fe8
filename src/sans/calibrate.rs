//! Search for the bit offset of a session's first code.
//!
//! When the header length is in doubt, the first sample does not start at
//! bit zero. Each candidate offset is decoded in isolation; only full-value
//! codes can be judged without a preceding value, and those are scored
//! against the heart-rate average stored in the header.
//!
//! [`calibrate`] and [`candidates`] judge plausibility by the default
//! validity range. A decode with a custom range should calibrate with
//! [`calibrate_with`] and
//! [`DecoderConfig::valid_hr`](super::config::DecoderConfig::valid_hr), so
//! both agree on which values are heart rates.

use core::ops::{Range, RangeInclusive};

use super::{
    bits::BitStream,
    code::{self, DecoderState},
    config::{HR_MAX_VALID, HR_MIN_VALID},
};

/// A candidate start offset.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Calibration {
    pub offset: usize,
    /// The value decoded at the offset.
    pub hr: u16,
    /// Distance from the expected average.
    pub difference: u16,
}

/// Score every offset in `range` that decodes to a plausible full value.
pub fn candidates<'a>(
    stream: &'a BitStream<'a>,
    expected_avg: u8,
    range: Range<usize>,
) -> impl Iterator<Item = Calibration> + 'a {
    candidates_with(stream, expected_avg, range, HR_MIN_VALID..=HR_MAX_VALID)
}

/// Score every offset in `range` that decodes to a full value within `valid`.
pub fn candidates_with<'a>(
    stream: &'a BitStream<'a>,
    expected_avg: u8,
    range: Range<usize>,
    valid: RangeInclusive<u16>,
) -> impl Iterator<Item = Calibration> + 'a {
    range.filter_map(move |offset| {
        let (code, _) = code::decode(stream, offset, DecoderState::new()).ok()?;

        if !code.kind.is_full() || !valid.contains(&code.value) {
            return None;
        }

        let candidate = Calibration {
            offset,
            hr: code.value,
            difference: code.value.abs_diff(expected_avg.into()),
        };

        tracing::trace!(offset, hr = candidate.hr, difference = candidate.difference, "candidate");

        Some(candidate)
    })
}

/// Find the offset whose full value lies closest to `expected_avg`.
///
/// The lowest offset wins ties. Returns `None` if no offset in `range` decodes
/// to a plausible full value.
pub fn calibrate(stream: &BitStream, expected_avg: u8, range: Range<usize>) -> Option<Calibration> {
    calibrate_with(stream, expected_avg, range, HR_MIN_VALID..=HR_MAX_VALID)
}

/// Find the offset whose full value within `valid` lies closest to
/// `expected_avg`.
pub fn calibrate_with(
    stream: &BitStream,
    expected_avg: u8,
    range: Range<usize>,
    valid: RangeInclusive<u16>,
) -> Option<Calibration> {
    let best = candidates_with(stream, expected_avg, range, valid)
        .fold(None, |best: Option<Calibration>, c| match best {
            Some(b) if b.difference <= c.difference => Some(b),
            _ => Some(c),
        });

    match &best {
        Some(c) => tracing::debug!(offset = c.offset, hr = c.hr, expected_avg, "calibrated"),
        None => tracing::debug!(expected_avg, "no calibration candidate"),
    }

    best
}
