//! Convenience interfaces for common decoding patterns.
//!
//! The functions in this module drive the finite-state machine in
//! [`crate::sans`] to completion, collecting samples and lap events into a
//! [`DecodedSession`]. [`decode_slice`] and [`decode_reader`] accept a whole
//! session dump (header included); [`decode_record`] accepts a record whose
//! sample region has already been extracted.
//!
//! # Example
//!
//! ```
//! use heartbits::sans::record::{PositioningPolicy, RecordOptions};
//!
//! let dump = std::fs::read("session.bin")?;
//! let options = RecordOptions {
//!     positioning: PositioningPolicy::ForceOff,
//!     ..Default::default()
//! };
//!
//! let (header, session) = heartbits::avec::decode_slice(&dump, &options)?;
//!
//! for sample in &session.samples {
//!     let t = sample.elapsed_seconds(session.sample_interval_seconds);
//!     println!("{t}: {:?}", sample.hr);
//! }
//! ```

#[cfg(feature = "std")]
pub mod reader;
pub mod slice;

#[cfg(feature = "std")]
pub use reader::decode as decode_reader;
pub use slice::decode as decode_slice;

use alloc::vec::Vec;

use either::Either::{Left, Right};

use crate::sans::{
    Decoder,
    bits::BitStream,
    config::{DecoderConfig, HR_AVG_TOLERANCE},
    record::SessionRecord,
    session::{DecodeStatus, LapEvent, Sample, Step},
};

/// Samples and lap events decoded from one session.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct DecodedSession {
    /// Samples in stream order, including implausible placeholders.
    pub samples: Vec<Sample>,
    pub laps: Vec<LapEvent>,
    /// Whether the whole sample region was consumed. Statistics over a
    /// truncated decode may be unrepresentative.
    pub status: DecodeStatus,
    /// The number of bits consumed from the start offset.
    pub bits_consumed: usize,
    pub sample_interval_seconds: u32,
}

/// Statistics over the plausible samples of a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct HrSummary {
    pub min: u16,
    /// Mean, rounded down.
    pub avg: u16,
    pub max: u16,
    /// The number of samples contributing.
    pub count: usize,
}

impl DecodedSession {
    /// Heart rates of the plausible samples.
    pub fn heart_rates(&self) -> impl Iterator<Item = u16> + '_ {
        self.samples.iter().filter_map(|s| s.hr)
    }

    /// Minimum, mean and maximum of the plausible samples, if any.
    pub fn hr_summary(&self) -> Option<HrSummary> {
        let (min, max, sum, count) = self.heart_rates().fold(
            (u16::MAX, u16::MIN, 0u64, 0usize),
            |(min, max, sum, count), hr| (min.min(hr), max.max(hr), sum + u64::from(hr), count + 1),
        );

        (count != 0).then(|| HrSummary {
            min,
            avg: (sum / count as u64) as u16,
            max,
            count,
        })
    }

    /// Seconds covered by the decoded samples.
    pub fn duration_seconds(&self) -> u32 {
        (self.samples.len() as u32).saturating_mul(self.sample_interval_seconds)
    }

    /// Whether the number of laps found matches a header hint, if one is
    /// available.
    pub fn lap_count_agrees(&self, hint: Option<u32>) -> Option<bool> {
        lap_count_agrees(hint, self.laps.len())
    }

    /// Whether the mean of the plausible samples lies within `tolerance` bpm
    /// of a stored average. `None` without an average or without plausible
    /// samples.
    ///
    /// A gap beyond [`HR_AVG_TOLERANCE`] usually means the decode started at
    /// the wrong bit offset.
    pub fn hr_agrees(&self, avg: Option<u8>, tolerance: u16) -> Option<bool> {
        let avg = u64::from(avg?);
        let (sum, count) = self
            .heart_rates()
            .fold((0u64, 0u64), |(sum, count), hr| (sum + u64::from(hr), count + 1));

        // Compare the exact mean without dividing.
        (count != 0).then(|| sum.abs_diff(avg * count) <= u64::from(tolerance) * count)
    }

    /// The number of samples decoded, and the number a session lasting
    /// `duration_seconds` should hold. `None` if the sample interval is zero.
    pub fn coverage(&self, duration_seconds: u32) -> Option<(u32, u32)> {
        let expected = duration_seconds.checked_div(self.sample_interval_seconds)?;

        Some((self.samples.len() as u32, expected))
    }
}

/// Decode the sample region of a record.
///
/// Never fails: decoding stops at the first position where no complete code
/// remains, and [`DecodedSession::status`] reports whether that was the end of
/// the region. A record without heart-rate data yields no samples.
pub fn decode_record(record: &SessionRecord, config: &DecoderConfig) -> DecodedSession {
    let mut samples = Vec::new();
    let mut laps = Vec::new();

    if !record.has_hr {
        tracing::debug!("session has no heart-rate data");

        return DecodedSession {
            samples,
            laps,
            status: DecodeStatus::Complete,
            bits_consumed: 0,
            sample_interval_seconds: config.sample_interval_seconds,
        };
    }

    let stream = BitStream::new(record.samples);

    // Expect roughly one sample per byte in heart-rate-only streams.
    samples.reserve(record.samples.len());

    let mut state = Decoder::new(config.start_offset);

    let done = loop {
        state = match state.advance(&stream, config) {
            Left((step, state)) => {
                match step {
                    Step::Lap(lap) => laps.push(lap),
                    Step::Sample(sample, _) => samples.push(sample),
                }
                state
            }
            Right(done) => break done,
        };
    };

    if let Some(false) = lap_count_agrees(record.lap_count_hint, laps.len()) {
        tracing::warn!(
            hint = ?record.lap_count_hint,
            found = laps.len(),
            "lap count differs from header hint"
        );
    }

    let session = DecodedSession {
        samples,
        laps,
        status: done.status,
        bits_consumed: done.cursor.saturating_sub(config.start_offset),
        sample_interval_seconds: config.sample_interval_seconds,
    };

    if let Some(false) = session.hr_agrees(record.hr_avg, HR_AVG_TOLERANCE) {
        tracing::warn!(
            avg = ?record.hr_avg,
            min = ?record.hr_min,
            max = ?record.hr_max,
            decoded = ?session.hr_summary(),
            "heart rates differ from header statistics"
        );
    }

    let coverage = record.duration_seconds.and_then(|d| session.coverage(d));

    // An aligned decode never exceeds the header duration.
    if let Some((found, expected)) = coverage.filter(|(found, expected)| found > expected) {
        tracing::warn!(found, expected, "more samples than the header duration allows");
    }

    tracing::debug!(
        samples = session.samples.len(),
        laps = session.laps.len(),
        ?coverage,
        status = ?session.status,
        bits = stream.len(),
        cursor = done.cursor,
        "decoded session"
    );

    session
}

fn lap_count_agrees(hint: Option<u32>, found: usize) -> Option<bool> {
    hint.map(|hint| hint as usize == found)
}
