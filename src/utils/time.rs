//! Time formatting utilities

/// Seconds as used in file names: shortest round-trip form, always with a
/// fractional part (`10.0`, `12.345`).
pub fn seconds_label(seconds: f64) -> String {
    format!("{:?}", seconds)
}

/// Seconds as an ffmpeg timestamp argument
pub fn ffmpeg_seconds(seconds: f64) -> String {
    format!("{:.3}", seconds)
}

/// Format seconds as HH:MM:SS.ms, or MM:SS.ms under an hour
pub fn format_time(seconds: f64) -> String {
    let total_ms = (seconds.max(0.0) * 1000.0).round() as u64;
    let hours = total_ms / 3_600_000;
    let minutes = (total_ms % 3_600_000) / 60_000;
    let secs = (total_ms % 60_000) / 1000;
    let milliseconds = total_ms % 1000;

    if hours > 0 {
        format!("{:02}:{:02}:{:02}.{:03}", hours, minutes, secs, milliseconds)
    } else {
        format!("{:02}:{:02}.{:03}", minutes, secs, milliseconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seconds_label() {
        assert_eq!(seconds_label(10.0), "10.0");
        assert_eq!(seconds_label(12.345), "12.345");
        assert_eq!(seconds_label(0.0), "0.0");
        assert_eq!(seconds_label(61.5), "61.5");
    }

    #[test]
    fn test_ffmpeg_seconds() {
        assert_eq!(ffmpeg_seconds(10.25), "10.250");
        assert_eq!(ffmpeg_seconds(4.75), "4.750");
    }

    #[test]
    fn test_format_time() {
        assert_eq!(format_time(90.5), "01:30.500");
        assert_eq!(format_time(3723.456), "01:02:03.456");
        assert_eq!(format_time(0.0), "00:00.000");
    }
}
