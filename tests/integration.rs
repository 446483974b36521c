//! Integration tests for spectrum-link.
//!
//! These tests drive a session through the public API the way a transport
//! would: bytes land in a link buffer, then `on_bytes_available` is called.

use std::collections::VecDeque;

use spectrum_link::protocol::{
    encode_data_frame, encode_setup_frame, encode_word, DecoderState, DATA_BEGIN, FRAME_END,
    SETUP_BEGIN,
};
use spectrum_link::{AxisBounds, Presenter, Spectrum, SpectrumError, SpectrumSession};

fn concat(parts: &[&[u8]]) -> Vec<u8> {
    parts.iter().flat_map(|p| p.iter().copied()).collect()
}

fn magnitudes(spectrum: &Spectrum) -> Vec<f64> {
    spectrum.points().iter().map(|p| p.magnitude).collect()
}

fn frequencies(spectrum: &Spectrum) -> Vec<f64> {
    spectrum.points().iter().map(|p| p.frequency).collect()
}

/// Wire bytes written by hand, independent of the crate's encoders.
#[test]
fn test_wire_byte_order_reaches_parsers() {
    // 1000.0 = 0x408F400000000000, 8.0 = 0x4020000000000000
    let setup: [u8; 32] = [
        0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, // begin setup
        0x40, 0x8F, 0x40, 0x00, 0x00, 0x00, 0x00, 0x00, // 1000.0
        0x40, 0x20, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, // 8.0
        0x00, 0x00, 0x00, 0x00, 0xFF, 0xFF, 0xFF, 0xFF, // end
    ];
    // 2.5 = 0x4004000000000000, -0.75 = 0xBFE8000000000000
    let data: [u8; 40] = [
        0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0xFF, 0xFF, // begin data
        0x3F, 0xF0, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, // leading 1.0
        0x40, 0x04, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, // 2.5
        0xBF, 0xE8, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, // -0.75
        0x00, 0x00, 0x00, 0x00, 0xFF, 0xFF, 0xFF, 0xFF, // end
    ];

    let mut session = SpectrumSession::new(());
    let mut link: VecDeque<u8> = concat(&[&setup, &data]).into_iter().collect();

    let report = session.on_bytes_available(&mut link).unwrap();

    assert_eq!(report.setups, 1);
    assert_eq!(report.data, 1);
    assert_eq!(frequencies(session.spectrum()), vec![125.0, 250.0, 375.0]);
    assert_eq!(magnitudes(session.spectrum()), vec![2.5, -0.75, 0.0]);
    assert_eq!(session.spectrum().max_magnitude(), 2.5);

    // Encoders agree with the hand-written bytes.
    assert_eq!(&encode_setup_frame(1000.0, 8.0)[..], &setup[..]);
    assert_eq!(&encode_data_frame(1.0, &[2.5, -0.75])[..], &data[..]);
}

#[test]
fn test_setup_round_trip() {
    let mut session = SpectrumSession::new(());
    session.push(&encode_setup_frame(1000.0, 8.0));

    let spectrum = session.spectrum();
    assert_eq!(spectrum.len(), 3);
    assert_eq!(frequencies(spectrum), vec![125.0, 250.0, 375.0]);
    assert_eq!(spectrum.axis().frequency_min, 125.0);
    assert_eq!(spectrum.axis().frequency_max, 500.0);
}

#[test]
fn test_chunking_invariance() {
    let stream = concat(&[
        &encode_word(0x0123_4567_89AB_CDEF),
        &encode_setup_frame(1000.0, 8.0),
        &encode_data_frame(0.0, &[1.0, 4.0, 2.0]),
        &encode_word(99),
        &encode_data_frame(1.0, &[3.0]),
        &encode_setup_frame(2000.0, 16.0),
        &encode_data_frame(2.0, &[8.0, 0.5, 0.25, 6.0, 1.0, 2.0, 3.0, 4.0]),
    ]);

    let mut whole = SpectrumSession::new(());
    let mut link: VecDeque<u8> = stream.iter().copied().collect();
    whole.on_bytes_available(&mut link).unwrap();

    for chunk in [1, 2, 5, 8, 11, 24, 100] {
        let mut session = SpectrumSession::new(());
        let mut link = VecDeque::new();
        for piece in stream.chunks(chunk) {
            link.extend(piece.iter().copied());
            session.on_bytes_available(&mut link).unwrap();
            assert!(link.len() < 8, "a whole word was left unread");
        }

        assert_eq!(
            session.spectrum().points(),
            whole.spectrum().points(),
            "chunk size {}",
            chunk
        );
        assert_eq!(session.spectrum().axis(), whole.spectrum().axis());
        assert_eq!(session.decoder().stats(), whole.decoder().stats());
    }
}

#[test]
fn test_push_matches_on_bytes_available() {
    let stream = concat(&[
        &encode_setup_frame(48_000.0, 64.0),
        &encode_data_frame(0.0, &[1.0; 31]),
    ]);

    let mut pushed = SpectrumSession::new(());
    for piece in stream.chunks(3) {
        pushed.push(piece);
    }

    let mut drained = SpectrumSession::new(());
    let mut link: VecDeque<u8> = stream.into_iter().collect();
    drained.on_bytes_available(&mut link).unwrap();

    assert_eq!(pushed.spectrum().points(), drained.spectrum().points());
}

#[test]
fn test_unknown_words_leave_decoder_idle() {
    let mut session = SpectrumSession::new(());
    let noise: Vec<u8> = [0u64, 1, 0xFFFF_0000, FRAME_END, 0x7FF8_0000_0000_0000]
        .iter()
        .flat_map(|w| encode_word(*w))
        .collect();

    let report = session.push(&noise);

    assert!(report.is_empty());
    assert_eq!(session.decoder().state(), DecoderState::Idle);
    assert_eq!(session.decoder().buffered_len(), 0);
    assert_eq!(session.decoder().stats().ignored_words, 5);
}

#[test]
fn test_short_data_frame_keeps_stale_point() {
    let mut session = SpectrumSession::new(());
    session.push(&encode_setup_frame(1000.0, 8.0));
    session.push(&encode_data_frame(0.0, &[1.0, 2.0, 3.0]));

    session.push(&encode_data_frame(0.0, &[5.0, 7.0]));

    assert_eq!(magnitudes(session.spectrum()), vec![5.0, 7.0, 3.0]);
}

#[test]
fn test_max_magnitude_monotone_across_frames() {
    let mut session = SpectrumSession::new(());
    session.push(&encode_setup_frame(1000.0, 8.0));

    let sweeps = [
        [3.0, 1.0, 0.0],
        [10.0, 2.0, 1.0],
        [0.1, 0.1, 0.1],
        [-5.0, 4.0, 9.5],
        [0.0, 0.0, 0.0],
    ];
    let mut previous = session.spectrum().max_magnitude();
    for sweep in sweeps {
        session.push(&encode_data_frame(0.0, &sweep));
        let current = session.spectrum().max_magnitude();
        assert!(current >= previous);
        previous = current;
    }

    assert_eq!(previous, 10.0);
}

#[test]
fn test_data_before_setup_has_no_effect() {
    let mut session = SpectrumSession::new(());

    let report = session.push(&encode_data_frame(0.0, &[4.0, 5.0]));

    assert!(report.errors.is_empty());
    assert_eq!(report.data, 1);
    assert!(session.spectrum().is_empty());
    assert_eq!(session.spectrum().max_magnitude(), 0.0);
}

#[test]
fn test_empty_setup_is_error_and_keeps_model() {
    let mut session = SpectrumSession::new(());
    session.push(&encode_setup_frame(1000.0, 8.0));
    session.push(&encode_data_frame(0.0, &[1.0, 2.0, 3.0]));
    let before = session.spectrum().snapshot();

    let report = session.push(&concat(&[&encode_word(SETUP_BEGIN), &encode_word(FRAME_END)]));

    assert_eq!(report.errors.len(), 1);
    assert!(matches!(
        report.errors[0],
        SpectrumError::TruncatedSetup { len: 0 }
    ));
    assert_eq!(session.spectrum().snapshot(), before);
    assert_eq!(session.decoder().state(), DecoderState::Idle);

    // Decoder still usable.
    let report = session.push(&encode_setup_frame(2000.0, 8.0));
    assert_eq!(report.setups, 1);
    assert_eq!(session.spectrum().axis().frequency_max, 1000.0);
}

#[test]
fn test_empty_data_frame_is_noop() {
    let mut session = SpectrumSession::new(());
    session.push(&encode_setup_frame(1000.0, 8.0));
    session.push(&encode_data_frame(0.0, &[1.0, 2.0, 3.0]));
    let before = session.spectrum().snapshot();

    let report = session.push(&concat(&[&encode_word(DATA_BEGIN), &encode_word(FRAME_END)]));

    assert!(report.errors.is_empty());
    assert_eq!(session.spectrum().snapshot(), before);
}

#[test]
fn test_non_finite_values_propagate() {
    let mut session = SpectrumSession::new(());
    session.push(&encode_setup_frame(1000.0, 8.0));

    session.push(&encode_data_frame(0.0, &[f64::INFINITY, f64::NAN, 1.0]));

    let points = session.spectrum().points();
    assert_eq!(points[0].magnitude, f64::INFINITY);
    assert!(points[1].magnitude.is_nan());
    assert_eq!(session.spectrum().max_magnitude(), f64::INFINITY);
}

#[test]
fn test_presenter_sees_every_change() {
    #[derive(Default)]
    struct Recorder {
        point_counts: Vec<usize>,
        axes: Vec<AxisBounds>,
    }

    impl Presenter for Recorder {
        fn points_changed(&mut self, spectrum: &Spectrum) {
            self.point_counts.push(spectrum.len());
        }

        fn axis_changed(&mut self, axis: &AxisBounds) {
            self.axes.push(*axis);
        }
    }

    let mut session = SpectrumSession::new(Recorder::default());
    session.push(&concat(&[
        &encode_setup_frame(1000.0, 8.0),
        &encode_data_frame(0.0, &[2.0, 6.0]),
        &encode_setup_frame(1000.0, 12.0),
    ]));

    let (_, recorder) = session.into_parts();
    assert_eq!(recorder.point_counts, vec![3, 3, 5]);
    assert_eq!(recorder.axes.len(), 3);
    assert_eq!(recorder.axes[1].magnitude_max, 6.0);
    assert_eq!(recorder.axes[2].frequency_min, 1000.0 / 12.0);
    assert_eq!(recorder.axes[2].magnitude_max, 6.0);
}

#[test]
fn test_half_received_frame_survives_between_notifications() {
    let mut session = SpectrumSession::new(());
    let frame = encode_setup_frame(1000.0, 8.0);
    let mut link: VecDeque<u8> = frame[..20].iter().copied().collect();

    session.on_bytes_available(&mut link).unwrap();
    assert_eq!(session.decoder().state(), DecoderState::Setup);
    assert!(session.spectrum().is_empty());

    // Nothing new: still waiting.
    session.on_bytes_available(&mut link).unwrap();
    assert_eq!(session.decoder().state(), DecoderState::Setup);

    link.extend(frame[20..].iter().copied());
    session.on_bytes_available(&mut link).unwrap();
    assert_eq!(session.spectrum().len(), 3);
}
