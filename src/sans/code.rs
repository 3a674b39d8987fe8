//! Decoding of individual heart-rate codes.
//!
//! Every reading is stored as a two-bit prefix followed by a payload:
//!
//! | Prefix | Kind                         | Width | Payload                          |
//! |--------|------------------------------|-------|----------------------------------|
//! | `01`   | [`CodeKind::FullPrefixed`]   | 11    | bits `[3, 11)`, absolute         |
//! | `00`   | [`CodeKind::FullPrefixless`] | 11    | bits `[0, 11)`, absolute         |
//! | `10`   | [`CodeKind::PositiveDelta`]  | 6     | bits `[2, 6)`, unsigned          |
//! | `11`   | [`CodeKind::NegativeDelta`]  | 6     | bits `[2, 6)`, two's complement  |

use super::bits::{BitStream, DecodeError};

/// Width of a full-value code.
pub const FULL_CODE_BITS: u8 = 11;
/// Width of a delta code, and the fewest bits any code can occupy.
pub const DELTA_CODE_BITS: u8 = 6;

/// The four code layouts, selected by a two-bit prefix.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CodeKind {
    /// Absolute value in the low eight bits of an eleven-bit field. Bit 2 is
    /// reserved.
    FullPrefixed,
    /// Absolute value spanning all eleven bits, including the zero prefix.
    FullPrefixless,
    /// Four-bit magnitude added to the previous value.
    PositiveDelta,
    /// Four-bit two's complement offset added to the previous value.
    NegativeDelta,
}

impl CodeKind {
    pub const fn from_prefix(prefix: u32) -> Self {
        match prefix & 0b11 {
            0b01 => Self::FullPrefixed,
            0b00 => Self::FullPrefixless,
            0b10 => Self::PositiveDelta,
            _ => Self::NegativeDelta,
        }
    }

    pub const fn prefix(self) -> u32 {
        match self {
            Self::FullPrefixed => 0b01,
            Self::FullPrefixless => 0b00,
            Self::PositiveDelta => 0b10,
            Self::NegativeDelta => 0b11,
        }
    }

    /// The total number of bits a code of this kind occupies.
    pub const fn width(self) -> u8 {
        if self.is_full() {
            FULL_CODE_BITS
        } else {
            DELTA_CODE_BITS
        }
    }

    /// Whether the code stores an absolute value rather than a delta.
    pub const fn is_full(self) -> bool {
        matches!(self, Self::FullPrefixed | Self::FullPrefixless)
    }
}

/// Context carried from one code to the next.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DecoderState {
    /// The most recently decoded value, used as the base for deltas.
    pub last_hr: Option<u16>,
    /// The number of consecutive zero-magnitude deltas. A long run suggests
    /// the decoder has lost synchronization; it never affects decoded values.
    pub zero_delta_run: u32,
}

impl DecoderState {
    pub const fn new() -> Self {
        Self {
            last_hr: None,
            zero_delta_run: 0,
        }
    }
}

/// A single decoded code.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Code {
    /// The decoded heart rate. Not checked for plausibility.
    pub value: u16,
    /// The number of bits the code occupied.
    pub bits: u8,
    pub kind: CodeKind,
}

/// Decode the code starting at `offset`.
///
/// Returns the code and the state to pass when decoding the next one. Fails
/// with [`DecodeError::InsufficientBits`] when the stream ends before the
/// code does, which callers should treat as the end of the stream.
pub fn decode(
    stream: &BitStream,
    offset: usize,
    state: DecoderState,
) -> Result<(Code, DecoderState), DecodeError> {
    let remaining = stream.remaining(offset);
    if remaining < usize::from(DELTA_CODE_BITS) {
        Err(DecodeError::InsufficientBits {
            needed: DELTA_CODE_BITS.into(),
            remaining,
        })?;
    }

    let kind = CodeKind::from_prefix(stream.read_bits(offset, 2)?);
    let bits = kind.width();

    if remaining < usize::from(bits) {
        Err(DecodeError::InsufficientBits {
            needed: bits.into(),
            remaining,
        })?;
    }

    let field = stream.read_bits(offset, bits.into())?;

    let (value, zero_delta_run) = match kind {
        CodeKind::FullPrefixed => ((field & 0xFF) as u16, 0),
        CodeKind::FullPrefixless => (field as u16, 0),
        CodeKind::PositiveDelta | CodeKind::NegativeDelta => {
            let payload = (field & 0xF) as u16;
            let base = state.last_hr.unwrap_or(0);

            let value = if kind == CodeKind::PositiveDelta {
                base.saturating_add(payload)
            } else {
                // Four-bit two's complement, always negative: 0b1111 is -1,
                // 0b0000 is -16.
                base.saturating_sub((payload ^ 0xF) + 1)
            };

            let run = if payload == 0 && kind == CodeKind::PositiveDelta {
                state.zero_delta_run.saturating_add(1)
            } else {
                0
            };

            (value, run)
        }
    };

    let code = Code { value, bits, kind };
    let state = DecoderState {
        last_hr: Some(value),
        zero_delta_run,
    };

    Ok((code, state))
}
