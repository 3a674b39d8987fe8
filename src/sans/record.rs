//! Splitting a session dump into header and sample regions.

use super::{
    config::DEFAULT_SAMPLE_INTERVAL,
    header::{
        HEADER_LEN_BASIC, HEADER_LEN_POSITIONING, HeaderError, HeaderLayout, SessionHeader,
    },
};

/// How to decide whether positioning data is in effect.
///
/// The stored flag is unreliable: watches without any positioning capability
/// have been seen to set it. Since the flag decides the header length, a wrong
/// decision shifts every bit offset in the sample region.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PositioningPolicy {
    /// Use the flag stored in the header.
    #[default]
    TrustFlag,
    /// Treat the session as heart-rate-only, whatever the flag says.
    ForceOff,
    /// Treat the session as carrying positioning data.
    ForceOn,
}

impl PositioningPolicy {
    pub const fn resolve(self, flag: bool) -> bool {
        match self {
            Self::TrustFlag => flag,
            Self::ForceOff => false,
            Self::ForceOn => true,
        }
    }
}

/// Options for splitting a session dump.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RecordOptions {
    pub positioning: PositioningPolicy,
    pub layout: HeaderLayout,
    pub sample_interval_seconds: u32,
}

impl Default for RecordOptions {
    fn default() -> Self {
        Self {
            positioning: PositioningPolicy::default(),
            layout: HeaderLayout::default(),
            sample_interval_seconds: DEFAULT_SAMPLE_INTERVAL,
        }
    }
}

/// A session's sample region and the header fields the decoder consumes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SessionRecord<'a> {
    /// Sample region bytes, following the header.
    pub samples: &'a [u8],
    pub has_hr: bool,
    /// Whether positioning data is in effect, after applying the policy.
    pub has_positioning: bool,
    pub sample_interval_seconds: u32,
    /// Usually, but not reliably, the number of recorded laps.
    pub lap_count_hint: Option<u32>,
    /// Session duration stored in the header, for validation only.
    pub duration_seconds: Option<u32>,
    /// Header statistics, for calibration and validation only.
    pub hr_avg: Option<u8>,
    pub hr_max: Option<u8>,
    pub hr_min: Option<u8>,
}

impl<'a> SessionRecord<'a> {
    /// Build a record from an already-extracted sample region.
    pub const fn new(samples: &'a [u8], has_hr: bool, sample_interval_seconds: u32) -> Self {
        Self {
            samples,
            has_hr,
            has_positioning: false,
            sample_interval_seconds,
            lap_count_hint: None,
            duration_seconds: None,
            hr_avg: None,
            hr_max: None,
            hr_min: None,
        }
    }

    /// Split a session dump, returning the decoded header alongside the
    /// record.
    pub fn from_bytes(
        r: &'a [u8],
        options: &RecordOptions,
    ) -> Result<(SessionHeader, Self), HeaderError> {
        let header = SessionHeader::parse_with(r, &options.layout)?;
        let has_positioning = options.positioning.resolve(header.has_positioning);

        let header_len = if has_positioning {
            HEADER_LEN_POSITIONING
        } else {
            HEADER_LEN_BASIC
        };

        let samples = r.get(header_len..).ok_or(HeaderError::TooShort {
            len: r.len(),
            needed: header_len,
        })?;

        tracing::debug!(
            header_len,
            sample_bytes = samples.len(),
            flag = header.has_positioning,
            has_positioning,
            "split session dump"
        );

        let record = Self {
            samples,
            has_hr: header.has_hr,
            has_positioning,
            sample_interval_seconds: options.sample_interval_seconds,
            lap_count_hint: header.lap_count_hint,
            duration_seconds: Some(header.duration_seconds),
            hr_avg: header.hr_avg,
            hr_max: header.hr_max,
            hr_min: header.hr_min,
        };

        Ok((header, record))
    }
}
