// Adapters - External system implementations

pub mod exec_ffmpeg;
pub mod fetch_ytdlp;
pub mod page_scrape;
pub mod probe_ffprobe;
#[cfg(feature = "libav")]
pub mod probe_libav;
pub mod toml_config;

// Re-export adapters
pub use exec_ffmpeg::FfmpegAssembler;
pub use fetch_ytdlp::YtDlpFetcher;
pub use page_scrape::PageScrapeExtractor;
pub use probe_ffprobe::FfprobeAdapter;
#[cfg(feature = "libav")]
pub use probe_libav::ProbeLibavAdapter;
pub use toml_config::{PipelineConfig, TomlConfigAdapter};
