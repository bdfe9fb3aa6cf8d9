mod cli;

use reelsort::{
    config,
    library::{self, BatchProcessor, BatchReport, ItemStatus},
    media::Metadata,
    scraper::{ReleaseNameScraper, ScraperChain},
};

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use reelsort_common::paths::{is_subtitle_file, is_video_file};
use std::path::Path;
use std::sync::Arc;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Respect RUST_LOG env var if set, otherwise use defaults based on verbose flag
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "reelsort=debug,reelsort_common=debug".to_string()
        } else {
            "reelsort=info,reelsort_common=info".to_string()
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Rename {
            root,
            action,
            strict,
            force,
            dry_run,
        } => {
            let mut config = config::load_config_or_default(cli.config.as_deref())?;
            if let Some(action) = action {
                config.action = action;
            }
            config.strict |= strict;
            config.force |= force;

            let rt = tokio::runtime::Runtime::new()?;
            let report = rt.block_on(rename_library(&root, &config, dry_run))?;
            print_report(&report);

            if report.has_failures() {
                anyhow::bail!("{} item(s) failed", report.failed);
            }
            Ok(())
        }
        Commands::Scan { root, json } => scan_library(&root, json),
        Commands::Parse { name, json } => parse_name(&name, json),
        Commands::Validate {
            config: config_path,
        } => {
            let path = config_path.or(cli.config);
            validate_config(path.as_deref())
        }
        Commands::Version => {
            println!("reelsort {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

async fn rename_library(
    root: &Path,
    config: &config::Config,
    dry_run: bool,
) -> Result<BatchReport> {
    let scan = library::scan_directory(root)
        .with_context(|| format!("Failed to scan {:?}", root))?;
    let media = scan.videos();
    tracing::info!(
        videos = media.len(),
        subtitles = scan.subtitles().count(),
        "Videos selected for renaming"
    );

    let mut chain = ScraperChain::new();
    chain.register(Arc::new(ReleaseNameScraper::new()));

    let processor = BatchProcessor::new(
        chain,
        config.renderer().context("Invalid template")?,
        config.renamer(),
        config.policy(),
    );

    let report = if dry_run {
        processor.plan(media).await?
    } else {
        processor.process(media).await?
    };
    Ok(report)
}

fn print_report(report: &BatchReport) {
    for outcome in &report.outcomes {
        let dest = outcome
            .destination
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_default();
        match &outcome.status {
            ItemStatus::Renamed => println!("renamed  {} -> {}", outcome.source, dest),
            ItemStatus::Planned => println!("[DRY RUN] {} -> {}", outcome.source, dest),
            ItemStatus::Skipped => println!("skipped  {} (exists: {})", outcome.source, dest),
            ItemStatus::Failed(err) => println!("failed   {}: {}", outcome.source, err),
        }
    }
    println!(
        "\n{} renamed, {} planned, {} skipped, {} failed",
        report.renamed, report.planned, report.skipped, report.failed
    );
}

fn scan_library(root: &Path, json: bool) -> Result<()> {
    let scan = library::scan_directory(root)
        .with_context(|| format!("Failed to scan {:?}", root))?;

    if json {
        let json_str = serde_json::to_string_pretty(&scan.media)?;
        println!("{}", json_str);
        return Ok(());
    }

    for media in &scan.media {
        print!("{:<9} {}", media.kind().as_str(), media);
        if let Some(metadata) = media.metadata() {
            print!("  [{}]", metadata);
        }
        println!();
    }
    println!(
        "\n{} media found, {} subtitle(s), {} skipped",
        scan.media.len(),
        scan.subtitles().count(),
        scan.skipped
    );

    Ok(())
}

fn parse_name(name: &str, json: bool) -> Result<()> {
    let path = Path::new(name);
    let stem = if is_video_file(path) || is_subtitle_file(path) {
        path.file_stem().and_then(|s| s.to_str()).unwrap_or(name)
    } else {
        name
    };
    let release = reelsort_parser::parse_release(stem);
    let metadata = Metadata::parse(stem);

    if json {
        let value = serde_json::json!({
            "release": release,
            "metadata": metadata,
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    println!("Title: {}", release.title);
    if let Some(year) = release.year {
        println!("Year: {}", year);
    }
    if let (Some(season), Some(episode)) = (release.season, release.episode) {
        println!("Episode: S{:02}E{:02}", season, episode);
        if !release.episode_title.is_empty() {
            println!("Episode title: {}", release.episode_title);
        }
    }
    println!("Group: {}", metadata.group());
    println!(
        "Codec: {}",
        tag_or_unknown(metadata.codec().is_unknown(), metadata.codec().as_str())
    );
    println!(
        "Quality: {}",
        tag_or_unknown(metadata.quality().is_unknown(), metadata.quality().as_str())
    );
    println!(
        "Source: {}",
        tag_or_unknown(metadata.source().is_unknown(), metadata.source().as_str())
    );
    println!("Tags: {}", metadata.tags().join(", "));

    Ok(())
}

fn tag_or_unknown(unknown: bool, tag: &str) -> &str {
    if unknown {
        "unknown"
    } else {
        tag
    }
}

fn validate_config(path: Option<&Path>) -> Result<()> {
    let config = match path {
        Some(p) => {
            println!("Validating config: {:?}", p);
            let config = config::load_config(p)?;
            println!("✓ Configuration is valid");
            config
        }
        None => {
            println!("No config file specified, using defaults");
            config::Config::default()
        }
    };

    println!("  Action: {}", config.action);
    println!("  Strict: {}", config.strict);
    println!("  Force: {}", config.force);
    println!("  Scrape concurrency: {}", config.scrape_concurrency);
    println!(
        "  Movies: {} ({})",
        config.movies.directory.display(),
        config.movies.template
    );
    println!(
        "  TV shows: {} ({})",
        config.tvshows.directory.display(),
        config.tvshows.template
    );

    Ok(())
}
