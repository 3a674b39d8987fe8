mod encoder;

use encoder::{BitWriter, Unit};
use heartbits::sans::{
    bits::BitStream,
    calibrate::{Calibration, calibrate, calibrate_with, candidates},
    config::DecoderConfig,
};

#[test]
fn finds_first_full_value() {
    let bytes = BitWriter::new()
        .ones(5)
        .unit(Unit::Full(141))
        .unit(Unit::Delta(1))
        .to_bytes();
    let stream = BitStream::new(&bytes);

    assert_eq!(
        calibrate(&stream, 140, 0..20),
        Some(Calibration {
            offset: 5,
            hr: 141,
            difference: 1
        })
    );

    let offsets: Vec<_> = candidates(&stream, 140, 0..20).map(|c| c.offset).collect();
    assert_eq!(offsets, [5, 7, 9, 11]);
}

#[test]
fn lowest_offset_wins_ties() {
    let bytes = BitWriter::new()
        .unit(Unit::Full(141))
        .unit(Unit::Full(141))
        .to_bytes();
    let stream = BitStream::new(&bytes);

    let best = calibrate(&stream, 140, 0..24).unwrap();
    assert_eq!(best.offset, 0);

    let offsets: Vec<_> = candidates(&stream, 140, 0..24)
        .filter(|c| c.difference == 1)
        .map(|c| c.offset)
        .collect();
    assert_eq!(offsets, [0, 11]);
}

#[test]
fn deltas_are_not_candidates() {
    let bytes = [0xFF; 16];
    let stream = BitStream::new(&bytes);

    assert_eq!(calibrate(&stream, 140, 0..100), None);
}

#[test]
fn implausible_values_are_not_candidates() {
    let bytes = BitWriter::new().unit(Unit::Full(20)).to_bytes();
    let stream = BitStream::new(&bytes);

    assert_eq!(candidates(&stream, 20, 0..1).count(), 0);
}

#[test]
fn range_past_end_is_empty() {
    let bytes = BitWriter::new().unit(Unit::Full(141)).to_bytes();
    let stream = BitStream::new(&bytes);

    assert_eq!(calibrate(&stream, 141, 16..100), None);
}

#[test]
fn calibration_follows_decoder_validity_range() {
    let bytes = BitWriter::new().unit(Unit::Full(20)).to_bytes();
    let stream = BitStream::new(&bytes);

    let config = DecoderConfig {
        hr_min_valid: 10,
        ..Default::default()
    };
    assert_eq!(config.plausible(20), Some(20));

    assert_eq!(calibrate(&stream, 20, 0..1), None);
    assert_eq!(
        calibrate_with(&stream, 20, 0..1, config.valid_hr()),
        Some(Calibration {
            offset: 0,
            hr: 20,
            difference: 0
        })
    );

    let strict = DecoderConfig {
        hr_max_valid: 140,
        ..Default::default()
    };
    let bytes = BitWriter::new().unit(Unit::Full(141)).to_bytes();
    let stream = BitStream::new(&bytes);

    assert_eq!(calibrate_with(&stream, 141, 0..1, strict.valid_hr()), None);
}
