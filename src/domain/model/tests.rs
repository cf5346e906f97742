// Unit tests for domain models

use super::*;

#[test]
fn test_clip_metadata_from_millis() {
    let meta = ClipMetadata::from_millis("abc123", 10_000, 15_000);
    assert_eq!(meta.source_video_id, "abc123");
    assert_eq!(meta.start_time_seconds, 10.0);
    assert_eq!(meta.duration_seconds, 5.0);
    assert_eq!(meta.end_time_seconds(), 15.0);
}

#[test]
fn test_clip_metadata_fractional_millis() {
    let meta = ClipMetadata::from_millis("id", 12_345, 20_000);
    assert_eq!(meta.start_time_seconds, 12.345);
    assert!((meta.duration_seconds - 7.655).abs() < 1e-9);
}

#[test]
fn test_clip_metadata_negative_duration_is_kept() {
    let meta = ClipMetadata::from_millis("id", 20_000, 15_000);
    assert_eq!(meta.duration_seconds, -5.0);
}

#[test]
fn test_trim_window_ranges() {
    let window = TrimWindow::new(10.0, 5.0);
    let video = window.video_range();
    assert_eq!(video.start, 10.0);
    assert_eq!(video.end, 15.0);
    assert_eq!(video.duration(), 5.0);

    let audio = window.audio_range(0.25);
    assert_eq!(audio.start, 10.25);
    assert_eq!(audio.end, 15.0);
    assert_eq!(audio.start - video.start, 0.25);
}

#[test]
fn test_trim_window_audio_range_empty_when_shorter_than_offset() {
    let window = TrimWindow::new(3.0, 0.2);
    assert!(window.audio_range(0.25).is_empty());
    assert!(!window.audio_range(0.1).is_empty());
}

#[test]
fn test_resolution_parse() {
    assert_eq!("1080p".parse::<Resolution>().unwrap(), Resolution::new(1080));
    assert_eq!("720".parse::<Resolution>().unwrap(), Resolution::new(720));
    assert_eq!(" 480P ".parse::<Resolution>().unwrap(), Resolution::new(480));
    assert!("hd".parse::<Resolution>().is_err());
    assert!("0p".parse::<Resolution>().is_err());
    assert_eq!(Resolution::new(1080).to_string(), "1080p");
}

fn variant(id: &str, ext: &str, height: Option<u32>, video: bool, audio: bool) -> StreamVariant {
    StreamVariant {
        format_id: id.to_string(),
        ext: ext.to_string(),
        height,
        vcodec: video.then(|| "avc1".to_string()),
        acodec: audio.then(|| "mp4a".to_string()),
        has_video: video,
        has_audio: audio,
    }
}

#[test]
fn test_select_stream_first_match() {
    let listing = vec![
        variant("18", "mp4", Some(360), true, true),
        variant("140", "m4a", None, false, true),
        variant("248", "webm", Some(1080), true, false),
        variant("137", "mp4", Some(1080), true, false),
        variant("399", "mp4", Some(1080), true, false),
        variant("251", "webm", None, false, true),
    ];

    let video = select_stream(&listing, &StreamQuery::video("mp4", Resolution::new(1080))).unwrap();
    assert_eq!(video.format_id, "137");

    let audio = select_stream(&listing, &StreamQuery::audio()).unwrap();
    assert_eq!(audio.format_id, "140");
}

#[test]
fn test_select_stream_no_fallback_resolution() {
    let listing = vec![
        variant("136", "mp4", Some(720), true, false),
        variant("140", "m4a", None, false, true),
    ];
    assert!(select_stream(&listing, &StreamQuery::video("mp4", Resolution::new(1080))).is_none());
}

#[test]
fn test_select_stream_muxed_is_not_video_only() {
    let listing = vec![variant("22", "mp4", Some(1080), true, true)];
    assert!(select_stream(&listing, &StreamQuery::video("mp4", Resolution::new(1080))).is_none());
    assert!(select_stream(&listing, &StreamQuery::audio()).is_none());
}

#[test]
fn test_stream_query_display() {
    let query = StreamQuery::video("mp4", Resolution::new(1080));
    assert_eq!(query.to_string(), "video-only mp4 1080p");
    assert_eq!(StreamQuery::audio().to_string(), "audio-only");
}

#[test]
fn test_cleanup_policy_parse() {
    assert_eq!("keep".parse::<CleanupPolicy>().unwrap(), CleanupPolicy::Keep);
    assert_eq!("DELETE".parse::<CleanupPolicy>().unwrap(), CleanupPolicy::Delete);
    assert!("sometimes".parse::<CleanupPolicy>().is_err());
    assert_eq!(CleanupPolicy::default(), CleanupPolicy::Keep);
}
