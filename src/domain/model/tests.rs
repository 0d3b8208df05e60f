// Unit tests for domain models

use super::*;

#[test]
fn test_timecode_parse_comma_and_dot() {
    let comma = Timecode::parse("00:01:30,500").unwrap();
    let dot = Timecode::parse("00:01:30.500").unwrap();
    assert_eq!(comma.as_millis(), 90_500);
    assert_eq!(comma, dot);
}

#[test]
fn test_timecode_round_trip() {
    for text in [
        "00:00:00,000",
        "00:00:05,000",
        "00:59:59,999",
        "01:02:03,004",
        "12:00:00,001",
    ] {
        assert_eq!(Timecode::parse(text).unwrap().format(), text);
    }
}

#[test]
fn test_timecode_dot_form_formats_with_comma() {
    assert_eq!(Timecode::parse("00:00:10.250").unwrap().format(), "00:00:10,250");
}

#[test]
fn test_timecode_rejects_out_of_range_fields() {
    assert!(matches!(
        Timecode::parse("00:60:00,000"),
        Err(ClipError::MalformedTimecode { .. })
    ));
    assert!(matches!(
        Timecode::parse("00:00:60,000"),
        Err(ClipError::MalformedTimecode { .. })
    ));
}

#[test]
fn test_timecode_rejects_bad_patterns() {
    for text in ["", "1:2:3,4", "00:00:05", "00:00:05,5", "-00:00:01,000", "aa:bb:cc,ddd"] {
        assert!(
            matches!(Timecode::parse(text), Err(ClipError::MalformedTimecode { .. })),
            "expected {:?} to be rejected",
            text
        );
    }
}

#[test]
fn test_timecode_shift() {
    let timecode = Timecode::parse("00:00:12,345").unwrap();
    let shifted = timecode.shift(Duration::from_secs(5)).unwrap();
    assert_eq!(shifted.format(), "00:00:07,345");
    assert_eq!(timecode.shift(Duration::from_millis(12_345)).unwrap(), Timecode::ZERO);
}

#[test]
fn test_timecode_shift_negative() {
    let timecode = Timecode::parse("00:00:01,000").unwrap();
    assert!(matches!(
        timecode.shift(Duration::from_millis(1_001)),
        Err(ClipError::NegativeTimecode { .. })
    ));
}

#[test]
fn test_timecode_serde_as_text() {
    let timecode = Timecode::parse("00:01:20,000").unwrap();
    let json = serde_json::to_string(&timecode).unwrap();
    assert_eq!(json, "\"00:01:20,000\"");
    let back: Timecode = serde_json::from_str(&json).unwrap();
    assert_eq!(back, timecode);
}

#[test]
fn test_clip_window_duration() {
    let window = ClipWindow::new(
        Timecode::parse("00:00:10,000").unwrap(),
        Timecode::parse("00:01:20,000").unwrap(),
    )
    .unwrap();
    assert_eq!(window.duration(), Duration::from_secs(70));
}

#[test]
fn test_clip_window_rejects_reversed_bounds() {
    let result = ClipWindow::new(
        Timecode::parse("00:01:00,000").unwrap(),
        Timecode::parse("00:00:59,999").unwrap(),
    );
    assert!(matches!(result, Err(ClipError::MalformedTimecode { .. })));
}

#[test]
fn test_crop_mode_parse() {
    assert_eq!(CropMode::parse("original").unwrap(), CropMode::Original);
    assert_eq!(CropMode::parse("Square").unwrap(), CropMode::Square);
    assert_eq!(CropMode::parse("1:1").unwrap(), CropMode::Square);
    assert!(CropMode::parse("portrait").is_err());
}

#[test]
fn test_crop_rectangle_filter() {
    let crop = CropRectangle { x: 420, y: 0, side: 1080 };
    assert_eq!(crop.to_filter(), "crop=1080:1080:420:0");
}

#[test]
fn test_track_keeps_cues_in_order() {
    let cue = |index, start: &str, end: &str| SubtitleCue {
        index,
        start: Timecode::parse(start).unwrap(),
        end: Timecode::parse(end).unwrap(),
        lines: vec!["line".to_string()],
    };
    let track = SubtitleTrack::new(vec![
        cue(2, "00:00:40,000", "00:01:20,000"),
        cue(1, "00:00:10,000", "00:00:12,000"),
    ]);

    assert_eq!(track.len(), 2);
    assert_eq!(track.cues[0].index, 2);
    assert!(SubtitleTrack::default().is_empty());
}

#[test]
fn test_timecode_rejects_overflowing_hours() {
    let result = Timecode::parse("99999999999999999:00:00,000");
    match result {
        Err(ClipError::MalformedTimecode { reason, .. }) => assert_eq!(reason, "out of range"),
        other => panic!("expected MalformedTimecode, got {:?}", other),
    }
    assert!(Timecode::from_components(u64::MAX, 0, 0, 0).is_err());
}

#[test]
fn test_timecode_shift_by_huge_delta() {
    let timecode = Timecode::parse("00:00:01,000").unwrap();
    assert!(matches!(
        timecode.shift(Duration::MAX),
        Err(ClipError::NegativeTimecode { .. })
    ));
}
