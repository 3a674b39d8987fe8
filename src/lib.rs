#![no_std]

//! A decoder for heart-rate sample streams recorded by Polar RCX5 training
//! computers.
//!
//! The watch stores each training session as a header followed by a bit
//! stream of variable-length heart-rate codes. In sessions without
//! positioning data, the stream is interrupted by fixed-length, mostly-zero
//! lap marker blocks. Heartbits decodes this stream into samples and lap
//! events.
//!
//! Most users should begin with the functions in the [`avec`] module, which
//! split a raw session dump and decode it into owned collections. If these
//! prove insufficient (for example, to bound the work done per call, or to
//! decode without allocating), drive the finite-state machine in the [`sans`]
//! module directly.
//!
//! ## Cargo Features
//!
//! The following crate feature flags are available:
//!
//! - `std`: enable reader-based decoder (default).
//! - `serde`: implement `Serialize` for decoded samples, lap events and
//!   sessions.

extern crate alloc;

pub mod avec;
pub mod sans;
