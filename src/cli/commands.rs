//! Command implementations

use anyhow::{Context, Result};
use tracing::info;

use crate::app::{AppContainer, DefaultAppContainer};
use crate::cli::args::{CompileArgs, InspectArgs, VerifyArgs};
use crate::config_initialization::{resolve_config, ConfigOverrides};
use crate::domain::model::{ClipReference, RunReport};
use crate::utils::path::read_url_list;

/// Clip URLs from the positional arguments followed by the URL file
pub fn collect_clip_urls(args: &CompileArgs) -> Result<Vec<ClipReference>> {
    let mut clips: Vec<ClipReference> = args
        .urls
        .iter()
        .map(|url| url.trim())
        .filter(|url| !url.is_empty())
        .map(ClipReference::new)
        .collect();

    if let Some(path) = &args.urls_file {
        let from_file = read_url_list(path)
            .with_context(|| format!("Failed to read URL list {}", path.display()))?;
        info!("Read {} clip URLs from {}", from_file.len(), path.display());
        clips.extend(from_file);
    }

    Ok(clips)
}

/// Execute the compile command
pub async fn compile(args: CompileArgs) -> Result<()> {
    if args.urls.is_empty() && args.urls_file.is_none() {
        anyhow::bail!("No clip URLs given. Pass URLs as arguments or use --urls-file");
    }

    let config = resolve_config(args.config.as_deref(), &ConfigOverrides::from(&args))
        .context("Failed to load configuration")?;
    let clips = collect_clip_urls(&args)?;

    info!(
        "Compiling {} clips into {}",
        clips.len(),
        config.final_path().display()
    );

    let container =
        DefaultAppContainer::new(&config).context("Failed to initialize pipeline")?;
    let report = container
        .compile_interactor()
        .run(&clips, &config.output_dir, &config.final_name)
        .await
        .context("Compilation failed")?;

    print_report(&report);
    Ok(())
}

fn print_report(report: &RunReport) {
    println!("Segments written: {}", report.segments.len());
    for segment in &report.segments {
        println!("  {}", segment.display());
    }
    if !report.skipped.is_empty() {
        println!("Clips skipped: {}", report.skipped.len());
        for skipped in &report.skipped {
            println!("  {} ({})", skipped.url, skipped.reason);
        }
    }
    if !report.unverified.is_empty() {
        println!("Segments failing verification: {}", report.unverified.len());
        for path in &report.unverified {
            println!("  {}", path.display());
        }
    }
    match &report.compilation {
        Some(path) => println!("Compilation: {}", path.display()),
        None => println!("No compilation written"),
    }
}

/// Execute the inspect command
pub async fn inspect(args: InspectArgs) -> Result<()> {
    let config = resolve_config(args.config.as_deref(), &ConfigOverrides::default())
        .context("Failed to load configuration")?;
    let container =
        DefaultAppContainer::new(&config).context("Failed to initialize pipeline")?;

    let report = container
        .inspect_interactor()
        .execute(&ClipReference::new(args.clip_url.trim()))
        .await
        .with_context(|| format!("No clip metadata found at {}", args.clip_url))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", report.summary());
    }
    Ok(())
}

/// Execute the verify command
pub async fn verify(args: VerifyArgs) -> Result<()> {
    let config = resolve_config(args.config.as_deref(), &ConfigOverrides::default())
        .context("Failed to load configuration")?;
    let container =
        DefaultAppContainer::new(&config).context("Failed to initialize pipeline")?;

    let result = container
        .verify_interactor()
        .execute(&args.input, args.duration, args.tolerance)
        .await
        .with_context(|| format!("Failed to verify {}", args.input.display()))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!(
            "Expected {:.3}s, actual {:.3}s ({:.1}% accurate)",
            result.expected,
            result.actual,
            result.accuracy * 100.0
        );
    }

    if !result.success {
        anyhow::bail!(
            "Verification failed: {}",
            result.error.as_deref().unwrap_or("unknown")
        );
    }
    println!("Verification passed");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn args(urls: &[&str], urls_file: Option<PathBuf>) -> CompileArgs {
        CompileArgs {
            urls: urls.iter().map(|s| s.to_string()).collect(),
            urls_file,
            output_dir: None,
            final_name: None,
            sync_offset: None,
            resolution: None,
            container: None,
            codec: None,
            threads: None,
            cleanup: None,
            config: None,
        }
    }

    #[test]
    fn test_collect_positional_then_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("clips.txt");
        std::fs::write(&file, "https://a/clip/2\n\n  https://a/clip/3  \n").unwrap();

        let clips = collect_clip_urls(&args(&["https://a/clip/1", " "], Some(file))).unwrap();
        let urls: Vec<&str> = clips.iter().map(|c| c.as_str()).collect();
        assert_eq!(urls, vec!["https://a/clip/1", "https://a/clip/2", "https://a/clip/3"]);
    }

    #[test]
    fn test_collect_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.txt");
        assert!(collect_clip_urls(&args(&[], Some(missing))).is_err());
    }
}
