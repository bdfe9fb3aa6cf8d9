//! Shared fixtures for integration tests.
//!
//! Library layouts are built inside a [`tempfile::TempDir`]; the helpers
//! here create release files and the default renderer/scraper wiring.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use reelsort::media::MediaKind;
use reelsort::rename::{Renderer, Template};
use reelsort::scraper::{ReleaseNameScraper, ScraperChain};

pub const MOVIE_TEMPLATE: &str = "{title} ({year})/{title} ({year}) [{quality}]";
pub const EPISODE_TEMPLATE: &str =
    "{show}/Season {season:02}/{show} - S{season:02}E{episode:02} - {name}";

/// Create `rel` under `root` with `contents`, making parent directories.
pub fn write_file(root: &Path, rel: &str, contents: &str) -> PathBuf {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, contents).unwrap();
    path
}

/// Renderer writing movies to `<library>/Movies` and episodes to `<library>/TV`.
pub fn renderer(library: &Path) -> Renderer {
    Renderer::new()
        .with_movies(
            library.join("Movies"),
            Template::parse(MediaKind::Movie, MOVIE_TEMPLATE).unwrap(),
        )
        .unwrap()
        .with_episodes(
            library.join("TV"),
            Template::parse(MediaKind::Episode, EPISODE_TEMPLATE).unwrap(),
        )
        .unwrap()
}

/// Chain with only the offline release-name scraper.
pub fn release_chain() -> ScraperChain {
    let mut chain = ScraperChain::new();
    chain.register(Arc::new(ReleaseNameScraper::new()));
    chain
}

/// Every regular file under `root`, relative and sorted.
pub fn list_files(root: &Path) -> Vec<String> {
    let mut files: Vec<String> = walkdir::WalkDir::new(root)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| !e.file_type().is_dir())
        .filter_map(|e| {
            e.path()
                .strip_prefix(root)
                .ok()
                .map(|p| p.to_string_lossy().into_owned())
        })
        .collect();
    files.sort();
    files
}
