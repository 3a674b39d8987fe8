//! States decoding a session's sample region.

use either::Either::{self, Left, Right};

use super::{
    bits::BitStream,
    code::{self, Code, DecoderState},
    config::DecoderConfig,
};

/// A decoded heart-rate sample.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Sample {
    /// The heart rate, or `None` if the decoded value was implausible.
    pub hr: Option<u16>,
    /// Position in the decoded stream, counting implausible samples.
    pub sequence_index: u32,
}

impl Sample {
    /// Seconds from the start of the session to this sample.
    pub const fn elapsed_seconds(&self, sample_interval_seconds: u32) -> u32 {
        self.sequence_index.saturating_mul(sample_interval_seconds)
    }
}

/// A lap marker found in the sample region.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct LapEvent {
    /// Ordinal of the lap, starting from one.
    pub lap_number: u32,
    /// The number of samples decoded before the marker.
    pub sample_index_at_detection: u32,
    pub elapsed_seconds: u32,
    /// Bit offset at which the marker block began.
    pub bit_offset: usize,
}

/// How decoding ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum DecodeStatus {
    /// Every bit of the stream was consumed.
    Complete,
    /// Bits remained that could not form a complete code.
    Truncated,
}

/// Data emitted by one iteration of the decoder.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    /// A lap block was skipped.
    Lap(LapEvent),
    /// A code was decoded. The code holds the raw value, even where the
    /// sample reports it as implausible.
    Sample(Sample, Code),
}

/// State token scanning for the next lap block or code.
#[derive(Debug)]
pub struct Scanning {
    cursor: usize,
    state: DecoderState,
    samples: u32,
    laps: u32,
}

impl Scanning {
    /// Begin decoding at a bit offset, with a fresh decoder state.
    pub const fn new(start_offset: usize) -> Self {
        Self {
            cursor: start_offset,
            state: DecoderState::new(),
            samples: 0,
            laps: 0,
        }
    }

    /// The bit offset of the next iteration.
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    pub const fn state(&self) -> DecoderState {
        self.state
    }

    /// Transition to another state by skipping a lap block or decoding a
    /// code.
    ///
    /// Returns the emitted step and a successor state token, or the terminal
    /// state once no further code can be decoded.
    pub fn advance(self, stream: &BitStream, config: &DecoderConfig) -> Either<(Step, Self), Done> {
        let Self {
            cursor,
            state,
            samples,
            laps,
        } = self;

        // Detection comes first: the leading bits of a block would otherwise
        // read as a code.
        let detector = &config.lap_detector;
        if config.detect_laps
            && stream.remaining(cursor) >= detector.block_bits()
            && detector.detect(stream, cursor)
        {
            let lap = LapEvent {
                lap_number: laps + 1,
                sample_index_at_detection: samples,
                elapsed_seconds: samples.saturating_mul(config.sample_interval_seconds),
                bit_offset: cursor,
            };

            tracing::trace!(offset = cursor, lap = lap.lap_number, "skipped lap block");

            // The device restarts its encoding context after a marker.
            let successor = Self {
                cursor: cursor + detector.block_bits(),
                state: DecoderState::new(),
                samples,
                laps: laps + 1,
            };

            return Left((Step::Lap(lap), successor));
        }

        match code::decode(stream, cursor, state) {
            Ok((code, state)) => {
                let sample = Sample {
                    hr: config.plausible(code.value),
                    sequence_index: samples,
                };

                let successor = Self {
                    cursor: cursor + usize::from(code.bits),
                    state,
                    samples: samples + 1,
                    laps,
                };

                Left((Step::Sample(sample, code), successor))
            }
            Err(err) => {
                let status = if cursor == stream.len() {
                    DecodeStatus::Complete
                } else {
                    DecodeStatus::Truncated
                };

                tracing::trace!(offset = cursor, %err, "reached end of sample region");

                Right(Done {
                    cursor,
                    status,
                    samples,
                    laps,
                })
            }
        }
    }
}

/// Terminal state, reached once no further code can be decoded.
#[derive(Debug)]
pub struct Done {
    /// The bit offset at which decoding stopped.
    pub cursor: usize,
    pub status: DecodeStatus,
    /// The number of samples emitted.
    pub samples: u32,
    /// The number of lap blocks skipped.
    pub laps: u32,
}
