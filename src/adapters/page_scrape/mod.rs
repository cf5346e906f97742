// Page scrape adapter - Clip metadata recovered from the clip page markup

use async_trait::async_trait;
use regex::Regex;
use reqwest::Client;
use scraper::Html;
use std::sync::OnceLock;
use tracing::{debug, info};
use url::Url;

use crate::domain::model::{ClipMetadata, ClipReference};
use crate::error::{ExtractError, ReelError, ReelResult};
use crate::ports::ClipExtractor;

fn clip_config_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r#""clipConfig":(\{.*?\})"#).expect("valid clipConfig pattern"))
}

fn video_id_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r#""videoId":"(.*?)""#).expect("valid videoId pattern"))
}

/// Every text node of the document, script bodies included, in document
/// order and joined by newlines. Entities are decoded.
fn collect_document_text(html: &str) -> String {
    let document = Html::parse_document(html);
    document.root_element().text().collect::<Vec<_>>().join("\n")
}

/// First capture of `pattern` across `haystacks`, searched in order
fn first_capture<'a>(pattern: &Regex, haystacks: &[&'a str]) -> Option<&'a str> {
    haystacks
        .iter()
        .find_map(|&text| pattern.captures(text))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Millisecond field of the clip config; accepts `"10000"` as well as `10000`
fn millis_field(config: &serde_json::Value, key: &str) -> Result<i64, ExtractError> {
    let malformed = |detail: &str| ExtractError::MalformedClipConfig {
        message: format!("{} {}", key, detail),
    };

    match config.get(key) {
        Some(serde_json::Value::String(s)) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| malformed("is not an integer")),
        Some(serde_json::Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f.trunc() as i64))
            .ok_or_else(|| malformed("is out of range")),
        Some(_) => Err(malformed("has an unexpected type")),
        None => Err(malformed("is missing")),
    }
}

/// Recover clip metadata from clip page HTML.
///
/// The page text is searched in document order, so the first match
/// anywhere in the page wins. Markup such as attribute values is only
/// searched when the text has no match. The patterns track an
/// undocumented page format and need updating when it changes.
pub fn parse_clip_page(html: &str) -> Result<ClipMetadata, ExtractError> {
    let text = collect_document_text(html);
    let haystacks = [text.as_str(), html];

    let config_json =
        first_capture(clip_config_pattern(), &haystacks).ok_or(ExtractError::MissingClipConfig)?;
    let video_id =
        first_capture(video_id_pattern(), &haystacks).ok_or(ExtractError::MissingVideoId)?;

    let config: serde_json::Value =
        serde_json::from_str(config_json).map_err(|e| ExtractError::MalformedClipConfig {
            message: e.to_string(),
        })?;

    let start_ms = millis_field(&config, "startTimeMs")?;
    let end_ms = millis_field(&config, "endTimeMs")?;

    Ok(ClipMetadata::from_millis(video_id, start_ms, end_ms))
}

/// Clip extractor that downloads the clip page and scrapes it
pub struct PageScrapeExtractor {
    client: Client,
}

impl PageScrapeExtractor {
    /// Create an extractor that identifies itself with `user_agent`
    pub fn new(user_agent: &str) -> ReelResult<Self> {
        let client = Client::builder()
            .user_agent(user_agent)
            .build()
            .map_err(|e| ReelError::config(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self { client })
    }

    async fn fetch_page(&self, clip: &ClipReference) -> Result<String, ExtractError> {
        let request_error = |message: String| ExtractError::Request {
            url: clip.to_string(),
            message,
        };

        let url = Url::parse(clip.as_str()).map_err(|e| request_error(format!("invalid URL: {}", e)))?;

        debug!("Fetching clip page {}", url);
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| request_error(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ExtractError::HttpStatus {
                url: clip.to_string(),
                status: status.as_u16(),
            });
        }

        response.text().await.map_err(|e| request_error(e.to_string()))
    }
}

#[async_trait]
impl ClipExtractor for PageScrapeExtractor {
    async fn extract(&self, clip: &ClipReference) -> Result<ClipMetadata, ExtractError> {
        let body = self.fetch_page(clip).await?;
        let metadata = parse_clip_page(&body)?;

        info!(
            video_id = %metadata.source_video_id,
            start = metadata.start_time_seconds,
            duration = metadata.duration_seconds,
            "Extracted clip metadata from {}",
            clip
        );
        Ok(metadata)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(script: &str) -> String {
        format!(
            "<html><head><title>clip</title></head><body><div id=\"app\"></div>\
             <script>var ytInitialData = {};</script></body></html>",
            script
        )
    }

    #[test]
    fn test_parse_string_millis() {
        let html = page(
            r#"{"videoId":"dQw4w9WgXcQ","clipConfig":{"postId":"Ugkx1","startTimeMs":"10000","endTimeMs":"15000"}}"#,
        );
        let meta = parse_clip_page(&html).unwrap();
        assert_eq!(meta.source_video_id, "dQw4w9WgXcQ");
        assert_eq!(meta.start_time_seconds, 10.0);
        assert_eq!(meta.duration_seconds, 5.0);
    }

    #[test]
    fn test_parse_numeric_millis() {
        let html = page(r#"{"clipConfig":{"startTimeMs":12345,"endTimeMs":20000},"videoId":"abc"}"#);
        let meta = parse_clip_page(&html).unwrap();
        assert_eq!(meta.source_video_id, "abc");
        assert_eq!(meta.start_time_seconds, 12.345);
        assert!((meta.duration_seconds - 7.655).abs() < 1e-9);
    }

    #[test]
    fn test_first_video_id_wins() {
        let html = page(
            r#"{"videoId":"first","clipConfig":{"startTimeMs":"0","endTimeMs":"1000"},"related":{"videoId":"second"}}"#,
        );
        assert_eq!(parse_clip_page(&html).unwrap().source_video_id, "first");
    }

    #[test]
    fn test_text_before_scripts_wins() {
        let html = r#"<html><body><p>"videoId":"early"</p><script>{"videoId":"late","clipConfig":{"startTimeMs":"0","endTimeMs":"1000"}}</script></body></html>"#;
        assert_eq!(parse_clip_page(html).unwrap().source_video_id, "early");
    }

    #[test]
    fn test_pattern_in_attribute_is_found() {
        let html = r#"<html><body><div data-config='"clipConfig":{"startTimeMs":"0","endTimeMs":"3000"},"videoId":"attr"'></div></body></html>"#;
        let meta = parse_clip_page(html).unwrap();
        assert_eq!(meta.source_video_id, "attr");
        assert_eq!(meta.duration_seconds, 3.0);
    }

    #[test]
    fn test_pattern_outside_script_is_found() {
        let html = r#"<html><body><pre>"clipConfig":{"startTimeMs":"2000","endTimeMs":"4000"} "videoId":"raw"</pre></body></html>"#;
        let meta = parse_clip_page(html).unwrap();
        assert_eq!(meta.source_video_id, "raw");
        assert_eq!(meta.duration_seconds, 2.0);
    }

    #[test]
    fn test_missing_clip_config() {
        let html = page(r#"{"videoId":"abc"}"#);
        assert!(matches!(parse_clip_page(&html), Err(ExtractError::MissingClipConfig)));
    }

    #[test]
    fn test_missing_video_id() {
        let html = page(r#"{"clipConfig":{"startTimeMs":"0","endTimeMs":"1000"}}"#);
        assert!(matches!(parse_clip_page(&html), Err(ExtractError::MissingVideoId)));
    }

    #[test]
    fn test_malformed_json() {
        let html = page(r#"{"videoId":"abc","clipConfig":{"startTimeMs":"0",}}"#);
        assert!(matches!(
            parse_clip_page(&html),
            Err(ExtractError::MalformedClipConfig { .. })
        ));
    }

    #[test]
    fn test_missing_end_time() {
        let html = page(r#"{"videoId":"abc","clipConfig":{"startTimeMs":"0"}}"#);
        assert!(matches!(
            parse_clip_page(&html),
            Err(ExtractError::MalformedClipConfig { .. })
        ));
    }

    #[test]
    fn test_non_integer_millis() {
        let html = page(r#"{"videoId":"abc","clipConfig":{"startTimeMs":"soon","endTimeMs":"1000"}}"#);
        assert!(matches!(
            parse_clip_page(&html),
            Err(ExtractError::MalformedClipConfig { .. })
        ));
    }

    #[test]
    fn test_empty_page() {
        assert!(parse_clip_page("").is_err());
    }
}
