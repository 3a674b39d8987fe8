//! Slice-based decoder implementation.

use thiserror::Error;

use crate::sans::{
    config::DecoderConfig,
    header::{HeaderError, SessionHeader},
    record::{RecordOptions, SessionRecord},
};

use super::{DecodedSession, decode_record};

/// Errors occurring while decoding from a slice.
#[derive(Debug, Error)]
pub enum Error {
    /// Incorrect session header.
    #[error("Incorrect session header: {0}")]
    Header(#[from] HeaderError),
}

/// Decode a session dump held in a slice.
///
/// The dump is split into header and sample regions according to `options`,
/// and the sample region decoded with [`DecoderConfig::for_record`].
///
/// This method is also re-exported as `heartbits::avec::decode_slice`.
pub fn decode(
    r: &[u8],
    options: &RecordOptions,
) -> Result<(SessionHeader, DecodedSession), Error> {
    let (header, record) = SessionRecord::from_bytes(r, options)?;
    let config = DecoderConfig::for_record(&record);

    Ok((header, decode_record(&record, &config)))
}
