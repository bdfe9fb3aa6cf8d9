//! Batch rename orchestration.
//!
//! Each item goes through scrape, merge, render and rename. Scraping may run
//! ahead for several items at once; merging and renaming happen one item at
//! a time, in input order.

use std::path::PathBuf;
use std::pin::pin;

use futures::stream::{self, StreamExt};
use reelsort_common::{Error, Result};
use serde::Serialize;
use tracing::{error, info, warn};

use crate::media::{merge, Media};
use crate::rename::{Renamer, Renderer};
use crate::scraper::ScraperChain;

/// How the batch reacts to per-item failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchPolicy {
    /// Stop at the first failed item and return its error.
    pub strict: bool,
    /// Under strict mode, also stop when a destination already exists.
    pub existing_is_fatal: bool,
    /// Number of items scraped concurrently.
    pub scrape_concurrency: usize,
}

impl Default for BatchPolicy {
    fn default() -> Self {
        Self {
            strict: false,
            existing_is_fatal: false,
            scrape_concurrency: 1,
        }
    }
}

/// Result of one item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "error", rename_all = "lowercase")]
pub enum ItemStatus {
    Renamed,
    /// Dry run: the item would have been renamed.
    Planned,
    Skipped,
    Failed(String),
}

/// What happened to one media item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemOutcome {
    /// Name of the local media.
    pub source: String,
    /// Destination path, when it was rendered.
    pub destination: Option<PathBuf>,
    #[serde(flatten)]
    pub status: ItemStatus,
}

/// Summary of a batch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchReport {
    pub renamed: usize,
    pub planned: usize,
    pub skipped: usize,
    pub failed: usize,
    pub outcomes: Vec<ItemOutcome>,
}

impl BatchReport {
    /// Returns `true` when at least one item failed.
    pub fn has_failures(&self) -> bool {
        self.failed > 0
    }

    fn push(&mut self, outcome: ItemOutcome) {
        match outcome.status {
            ItemStatus::Renamed => self.renamed += 1,
            ItemStatus::Planned => self.planned += 1,
            ItemStatus::Skipped => self.skipped += 1,
            ItemStatus::Failed(_) => self.failed += 1,
        }
        self.outcomes.push(outcome);
    }
}

/// Drives media through scrape, merge, render and rename.
#[derive(Debug)]
pub struct BatchProcessor {
    chain: ScraperChain,
    renderer: Renderer,
    renamer: Renamer,
    policy: BatchPolicy,
}

impl BatchProcessor {
    pub fn new(
        chain: ScraperChain,
        renderer: Renderer,
        renamer: Renamer,
        policy: BatchPolicy,
    ) -> Self {
        Self {
            chain,
            renderer,
            renamer,
            policy,
        }
    }

    pub fn policy(&self) -> BatchPolicy {
        self.policy
    }

    /// Rename every item.
    ///
    /// In lenient mode failures are logged and counted and the batch goes on.
    /// In strict mode the first failure is returned and later items are left
    /// alone. An existing destination is a skip, and only aborts a strict
    /// batch when `existing_is_fatal` is set.
    pub async fn process(&self, media: Vec<Media>) -> Result<BatchReport> {
        let mut report = BatchReport::default();
        let mut scraped = pin!(self.scrape_all(media));

        while let Some((local, remote)) = scraped.next().await {
            let source = local.name();
            let result = remote.and_then(|remote| {
                let dest = self.resolve(&local, &remote)?;
                let file = local.file().ok_or_else(|| {
                    Error::UnsupportedOperation("cannot rename media without a file".to_string())
                })?;
                self.renamer.rename(file.as_ref(), &dest)?;
                Ok(dest)
            });

            match result {
                Ok(dest) => {
                    info!(
                        media = %source,
                        action = %self.renamer.action(),
                        path = %dest.display(),
                        "Media renamed"
                    );
                    report.push(ItemOutcome {
                        source,
                        destination: Some(dest),
                        status: ItemStatus::Renamed,
                    });
                }
                Err(Error::MediaExists(dest)) => {
                    if self.policy.strict && self.policy.existing_is_fatal {
                        return Err(Error::MediaExists(dest));
                    }
                    warn!(
                        media = %source,
                        action = %self.renamer.action(),
                        reason = "media already exists",
                        "Rename skipped"
                    );
                    report.push(ItemOutcome {
                        source,
                        destination: Some(dest),
                        status: ItemStatus::Skipped,
                    });
                }
                Err(err) => {
                    if self.policy.strict {
                        return Err(err);
                    }
                    error!(
                        media = %source,
                        action = %self.renamer.action(),
                        error = %err,
                        "Rename failed"
                    );
                    report.push(ItemOutcome {
                        source,
                        destination: None,
                        status: ItemStatus::Failed(err.to_string()),
                    });
                }
            }
        }

        Ok(report)
    }

    /// Resolve destinations without touching the filesystem.
    ///
    /// Runs scrape, merge and render and reports each destination as planned.
    /// Failures follow the same strict/lenient policy as [`process`].
    ///
    /// [`process`]: BatchProcessor::process
    pub async fn plan(&self, media: Vec<Media>) -> Result<BatchReport> {
        let mut report = BatchReport::default();
        let mut scraped = pin!(self.scrape_all(media));

        while let Some((local, remote)) = scraped.next().await {
            let source = local.name();
            match remote.and_then(|remote| self.resolve(&local, &remote)) {
                Ok(dest) => report.push(ItemOutcome {
                    source,
                    destination: Some(dest),
                    status: ItemStatus::Planned,
                }),
                Err(err) if self.policy.strict => return Err(err),
                Err(err) => {
                    warn!(media = %source, error = %err, "Cannot plan rename");
                    report.push(ItemOutcome {
                        source,
                        destination: None,
                        status: ItemStatus::Failed(err.to_string()),
                    });
                }
            }
        }

        Ok(report)
    }

    /// Scrape items with bounded concurrency, yielding in input order.
    fn scrape_all(
        &self,
        media: Vec<Media>,
    ) -> impl futures::Stream<Item = (Media, Result<Media>)> + '_ {
        let chain = &self.chain;
        stream::iter(media)
            .map(move |local| async move {
                let remote = chain.scrape(&local).await;
                (local, remote)
            })
            .buffered(self.policy.scrape_concurrency.max(1))
    }

    /// Merge and render one item.
    fn resolve(&self, local: &Media, remote: &Media) -> Result<PathBuf> {
        let fused = merge(local, remote)?;
        self.renderer.render(&fused)
    }
}
