//! Reader-based decoder implementation.
//!
//! _Requires Cargo feature `std`._

use std::{io::Read, vec::Vec};

use thiserror::Error;

use crate::sans::{header::SessionHeader, record::RecordOptions};

use super::{DecodedSession, slice};

extern crate std;

/// Errors occurring while decoding from a reader.
#[derive(Debug, Error)]
pub enum Error {
    /// An error from the supplied reader.
    #[error(transparent)]
    Io(#[from] std::io::Error),
    /// Incorrect session header.
    #[error("Incorrect session header: {0}")]
    Header(#[from] crate::sans::header::HeaderError),
}

impl From<slice::Error> for Error {
    fn from(err: slice::Error) -> Self {
        match err {
            slice::Error::Header(err) => Self::Header(err),
        }
    }
}

/// Decode a session dump from a reader.
///
/// The lap-block search looks ahead of the cursor, so the whole dump is read
/// before decoding begins.
///
/// This method is also re-exported as `heartbits::avec::decode_reader`.
///
/// _Requires Cargo feature `std`._
pub fn decode(
    r: &mut impl Read,
    options: &RecordOptions,
) -> Result<(SessionHeader, DecodedSession), Error> {
    let mut buf = Vec::new();
    r.read_to_end(&mut buf)?;

    tracing::debug!(bytes = buf.len(), "read session dump");

    Ok(slice::decode(&buf, options)?)
}
