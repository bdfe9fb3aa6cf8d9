//! Directory walking.

use std::io;
use std::path::Path;
use std::sync::Arc;

use reelsort_common::paths::{is_subtitle_file, is_video_file};
use reelsort_common::Result;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::media::{DiskFile, Media, MediaKind};

/// Media found under a directory.
#[derive(Debug, Default)]
pub struct ScanOutcome {
    /// Parsed media, ordered by path.
    pub media: Vec<Media>,
    /// Media files that could not be parsed or read.
    pub skipped: usize,
}

impl ScanOutcome {
    /// Movies and episodes, the media that can be renamed.
    pub fn videos(&self) -> Vec<Media> {
        self.media
            .iter()
            .filter(|m| m.kind() != MediaKind::Subtitle)
            .cloned()
            .collect()
    }

    /// Subtitles found during the scan.
    pub fn subtitles(&self) -> impl Iterator<Item = &Media> {
        self.media.iter().filter(|m| m.kind() == MediaKind::Subtitle)
    }
}

/// Walk `root` and build local media for every video and subtitle file.
///
/// Files with other extensions are ignored. Media files whose names cannot
/// be parsed are logged and counted as skipped. Symlinks are not followed.
pub fn scan_directory(root: &Path) -> Result<ScanOutcome> {
    if !root.exists() {
        return Err(io::Error::new(
            io::ErrorKind::NotFound,
            format!("library root does not exist: {}", root.display()),
        )
        .into());
    }

    info!(path = %root.display(), "Scanning directory");
    let mut outcome = ScanOutcome::default();

    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                warn!(error = %err, "Failed to read directory entry");
                outcome.skipped += 1;
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        if !is_video_file(path) && !is_subtitle_file(path) {
            continue;
        }

        match Media::from_file(Arc::new(DiskFile::new(path))) {
            Ok(media) => {
                debug!(path = %path.display(), kind = %media.kind(), "Found media");
                outcome.media.push(media);
            }
            Err(err) => {
                warn!(path = %path.display(), error = %err, "Skipping unparseable media");
                outcome.skipped += 1;
            }
        }
    }

    info!(
        found = outcome.media.len(),
        skipped = outcome.skipped,
        "Scan complete"
    );
    Ok(outcome)
}
