//! Allocation-free building blocks and the session finite-state machine.
//!
//! This module is intended for applications that need fine control over
//! decoding: bounding the number of iterations, probing a stream at arbitrary
//! offsets, or running without an allocator. See [`crate::avec`] for
//! implementations covering common decoding patterns.
//!
//! # Architecture
//!
//! A session's sample region is viewed through a [`bits::BitStream`], which
//! has no cursor of its own. Cursors live in callers, so the same stream can
//! be probed at many offsets (as [`calibrate`] does) without coordination.
//!
//! Each heart-rate reading is one variable-length code, decoded by
//! [`code::decode`] from a bit offset and the [`code::DecoderState`] left
//! behind by the previous code. The state is a plain value threaded through
//! calls; nothing is shared.
//!
//! Decoding a whole session is represented by a finite-state machine. The
//! initial state, re-exported for convenience as [`Decoder`], is a
//! [`session::Scanning`] token. Calling its `advance` method performs exactly
//! one iteration (skipping a lap block, or decoding one sample) and returns
//! either the emitted step with a successor token, or the terminal
//! [`session::Done`] state once the stream is exhausted.
//!
//! Some parts of the decoding process are not represented in the
//! finite-state machine and must be carefully handled by callers:
//!
//! - Skipping the correct number of header bytes before the sample region.
//!   The header length depends on whether positioning data is in effect; see
//!   [`record::SessionRecord::from_bytes`].
//!
//! - Choosing the first bit offset. Usually zero, but [`calibrate`] can search
//!   for it when the header skip is in doubt.

pub mod bits;
pub mod calibrate;
pub mod code;
pub mod config;
pub mod header;
pub mod lap;
pub mod record;
pub mod session;

/// Entrypoint to the finite-state machine.
pub type Decoder = session::Scanning;
