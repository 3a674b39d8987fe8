//! Parameters controlling a session decode.

use core::ops::RangeInclusive;

use super::{lap::LapBlockDetector, record::SessionRecord};

/// Lowest heart rate reported as plausible.
pub const HR_MIN_VALID: u16 = 30;
/// Highest heart rate reported as plausible.
pub const HR_MAX_VALID: u16 = 250;
/// Sample interval assumed when none is known.
pub const DEFAULT_SAMPLE_INTERVAL: u32 = 5;
/// Largest gap, in bpm, between the decoded and stored heart-rate averages
/// of a correctly aligned session.
pub const HR_AVG_TOLERANCE: u16 = 20;

/// Parameters for the session decoder.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DecoderConfig {
    /// Seconds between consecutive samples.
    pub sample_interval_seconds: u32,
    /// Bit offset of the first code in the sample region.
    pub start_offset: usize,
    /// Whether to look for lap blocks before each code.
    pub detect_laps: bool,
    pub lap_detector: LapBlockDetector,
    /// Lowest decoded value kept as a heart rate.
    pub hr_min_valid: u16,
    /// Highest decoded value kept as a heart rate.
    pub hr_max_valid: u16,
}

impl DecoderConfig {
    /// Configuration suited to a record: its sample interval, and lap
    /// detection only when no positioning data is in effect (lap blocks are
    /// only interleaved in heart-rate-only streams).
    pub fn for_record(record: &SessionRecord) -> Self {
        Self {
            sample_interval_seconds: record.sample_interval_seconds,
            detect_laps: !record.has_positioning,
            ..Self::default()
        }
    }

    pub fn with_start_offset(self, start_offset: usize) -> Self {
        Self {
            start_offset,
            ..self
        }
    }

    pub fn valid_hr(&self) -> RangeInclusive<u16> {
        self.hr_min_valid..=self.hr_max_valid
    }

    /// The value to report for a decoded code: `None` if implausible.
    pub fn plausible(&self, value: u16) -> Option<u16> {
        self.valid_hr().contains(&value).then_some(value)
    }
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            sample_interval_seconds: DEFAULT_SAMPLE_INTERVAL,
            start_offset: 0,
            detect_laps: true,
            lap_detector: LapBlockDetector::default(),
            hr_min_valid: HR_MIN_VALID,
            hr_max_valid: HR_MAX_VALID,
        }
    }
}
