//! Output naming and URL list input

use std::path::{Path, PathBuf};

use crate::domain::model::ClipReference;
use crate::error::ReelResult;
use crate::utils::time::seconds_label;

/// File name of the segment for one clip: `clip_<id>_<start>.mp4`.
///
/// Path separators in the id are replaced so the segment stays inside the
/// output directory.
pub fn segment_file_name(source_video_id: &str, start_seconds: f64) -> String {
    let safe_id: String = source_video_id
        .chars()
        .map(|c| if c == '/' || c == '\\' { '_' } else { c })
        .collect();
    format!("clip_{}_{}.mp4", safe_id, seconds_label(start_seconds))
}

/// Segment path inside `output_dir`
pub fn segment_path(output_dir: &Path, source_video_id: &str, start_seconds: f64) -> PathBuf {
    output_dir.join(segment_file_name(source_video_id, start_seconds))
}

/// Parse newline-delimited clip URLs. Lines are trimmed; blank lines are skipped.
pub fn parse_url_list(content: &str) -> Vec<ClipReference> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(ClipReference::new)
        .collect()
}

/// Read clip URLs from a file, one per line
pub fn read_url_list(path: &Path) -> ReelResult<Vec<ClipReference>> {
    let content = std::fs::read_to_string(path)?;
    Ok(parse_url_list(&content))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_file_name() {
        assert_eq!(segment_file_name("dQw4w9WgXcQ", 10.0), "clip_dQw4w9WgXcQ_10.0.mp4");
        assert_eq!(segment_file_name("abc", 12.345), "clip_abc_12.345.mp4");
        assert_eq!(segment_file_name("a/b\\c", 1.0), "clip_a_b_c_1.0.mp4");
    }

    #[test]
    fn test_segment_path() {
        let path = segment_path(Path::new("downloads"), "xyz", 3.5);
        assert_eq!(path, PathBuf::from("downloads").join("clip_xyz_3.5.mp4"));
    }

    #[test]
    fn test_parse_url_list_trims_and_skips_blank() {
        let urls = parse_url_list("  https://a/clip/1  \n\nhttps://a/clip/2\r\n   \n");
        let urls: Vec<&str> = urls.iter().map(|c| c.as_str()).collect();
        assert_eq!(urls, vec!["https://a/clip/1", "https://a/clip/2"]);
    }

    #[test]
    fn test_read_url_list() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("clips.txt");
        std::fs::write(&file, "https://example.com/clip/one\nhttps://example.com/clip/two\n").unwrap();
        let urls = read_url_list(&file).unwrap();
        assert_eq!(urls.len(), 2);
        assert_eq!(urls[1].as_str(), "https://example.com/clip/two");
    }
}
