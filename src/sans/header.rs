//! Session header fields.
//!
//! Only the fields with a known position are decoded. Offsets are counted from
//! the first byte of the session dump.

use tartan_bitfield::bitfield;
use thiserror::Error;
use zerocopy::FromBytes;

/// Header length when positioning data is in effect.
pub const HEADER_LEN_POSITIONING: usize = 349;
/// Header length for heart-rate-only sessions.
pub const HEADER_LEN_BASIC: usize = 351;

/// Number of leading header bytes covering every decoded field.
const KNOWN_HEADER_LEN: usize = 206;

/// An error decoding a session header.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum HeaderError {
    /// Fewer bytes than the header requires.
    #[error("Header too short ({len} of {needed} bytes).")]
    TooShort { len: usize, needed: usize },
    /// A time field held a nibble above nine.
    #[error("Invalid binary-coded decimal byte (0x{0:02X}).")]
    InvalidBcd(u8),
}

#[repr(C, packed)]
#[derive(FromBytes)]
struct RawHeader {
    _reserved0: [u8; 36],
    /// Seconds, minutes, hours; binary-coded decimal.
    duration: [u8; 3],
    /// Seconds, minutes, hours; binary-coded decimal.
    start_time: [u8; 3],
    /// Day, month, years since 1920.
    start_date: [u8; 3],
    _reserved1: [u8; 120],
    has_hr: u8,
    has_positioning: u8,
    _reserved2: [u8; 34],
    hr_avg: u8,
    _reserved3: u8,
    hr_min: u8,
    _reserved4: u8,
    hr_max: u8,
}

/// Positions of header fields whose location is not fixed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HeaderLayout {
    /// Offset of the byte believed to count recorded laps. The value is only
    /// ever a cross-check, and no offset is assumed by default.
    pub lap_count_offset: Option<usize>,
}

/// Local wall-clock time at which a session started.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StartTime {
    pub year: u16,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
}

/// Decoded session header.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SessionHeader {
    pub start: StartTime,
    pub duration_seconds: u32,
    pub has_hr: bool,
    /// The positioning flag as stored. This flag is known to be set on
    /// sessions recorded without any positioning capability.
    pub has_positioning: bool,
    pub hr_avg: Option<u8>,
    pub hr_min: Option<u8>,
    pub hr_max: Option<u8>,
    pub lap_count_hint: Option<u32>,
}

impl SessionHeader {
    /// Decode a header using the default layout.
    pub fn parse(r: &[u8]) -> Result<Self, HeaderError> {
        Self::parse_with(r, &HeaderLayout::default())
    }

    /// Decode a header, reading optional fields from the given layout.
    pub fn parse_with(r: &[u8], layout: &HeaderLayout) -> Result<Self, HeaderError> {
        let known: [u8; KNOWN_HEADER_LEN] = *r.first_chunk().ok_or(HeaderError::TooShort {
            len: r.len(),
            needed: KNOWN_HEADER_LEN,
        })?;

        let RawHeader {
            duration,
            start_time,
            start_date,
            has_hr,
            has_positioning,
            hr_avg,
            hr_min,
            hr_max,
            ..
        } = zerocopy::transmute!(known);

        let [seconds, minutes, hours] = duration;
        let duration_seconds = u32::from(bcd_to_int(hours)?) * 3600
            + u32::from(bcd_to_int(minutes)?) * 60
            + u32::from(bcd_to_int(seconds)?);

        let [second, minute, hour] = start_time;
        let [day, month, year] = start_date;
        let start = StartTime {
            year: 1920 + u16::from(year),
            month,
            day,
            hour: bcd_to_int(hour)?,
            minute: bcd_to_int(minute)?,
            second: bcd_to_int(second)?,
        };

        let has_hr = has_hr != 0;
        let stat = |v: u8| has_hr.then_some(v);

        let lap_count_hint = layout
            .lap_count_offset
            .and_then(|i| r.get(i))
            .map(|&v| u32::from(v));

        Ok(Self {
            start,
            duration_seconds,
            has_hr,
            has_positioning: has_positioning != 0,
            hr_avg: stat(hr_avg),
            hr_min: stat(hr_min),
            hr_max: stat(hr_max),
            lap_count_hint,
        })
    }
}

/// Convert a two-digit binary-coded decimal byte to its value.
pub fn bcd_to_int(b: u8) -> Result<u8, HeaderError> {
    bitfield! {
        struct Bcd(u8) {
            [0..4] ones: u8,
            [4..8] tens: u8,
        }
    }

    let bcd = Bcd(b);
    let (tens, ones) = (bcd.tens(), bcd.ones());

    if tens > 9 || ones > 9 {
        Err(HeaderError::InvalidBcd(b))?;
    }

    Ok(tens * 10 + ones)
}
