//! Scraper capability and the ordered scraper chain.
//!
//! A [`Scraper`] resolves the canonical identity of a piece of media, usually
//! by asking an external database. The [`ScraperChain`] tries scrapers in
//! registration order and returns the first answer.

pub mod release;

pub use release::ReleaseNameScraper;

use std::sync::Arc;

use async_trait::async_trait;
use reelsort_common::{Error, Result};
use tracing::debug;

use crate::media::Media;

/// Resolves remote media for local media.
///
/// Implementations return [`Error::MediaNotSupported`] for kinds they do not
/// handle so the chain can move on to the next scraper. Any other error ends
/// the lookup.
#[async_trait]
pub trait Scraper: Send + Sync {
    /// Short, lowercase identifier for this scraper (e.g. `"tmdb"`).
    fn name(&self) -> &'static str;

    /// Look up `media` and return the remote view of it.
    async fn scrape(&self, media: &Media) -> Result<Media>;
}

/// An ordered list of scrapers tried until one succeeds.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use reelsort::media::{Media, MemoryFile};
/// use reelsort::scraper::{ReleaseNameScraper, ScraperChain};
///
/// let mut chain = ScraperChain::new();
/// chain.register(Arc::new(ReleaseNameScraper::new()));
/// assert_eq!(chain.names(), vec!["release"]);
///
/// let local = Media::from_file(Arc::new(MemoryFile::new("Movie.Name.2020.720p.mkv", Vec::new()))).unwrap();
/// let remote = tokio_test::block_on(chain.scrape(&local)).unwrap();
/// assert_eq!(remote.to_string(), "Movie Name (2020)");
/// ```
#[derive(Clone, Default)]
pub struct ScraperChain {
    scrapers: Vec<Arc<dyn Scraper>>,
}

impl ScraperChain {
    /// Create an empty chain.
    pub fn new() -> Self {
        Self {
            scrapers: Vec::new(),
        }
    }

    /// Append a scraper; it is tried after every scraper registered before.
    pub fn register(&mut self, scraper: Arc<dyn Scraper>) {
        self.scrapers.push(scraper);
    }

    pub fn len(&self) -> usize {
        self.scrapers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scrapers.is_empty()
    }

    /// Names of the registered scrapers, in order.
    pub fn names(&self) -> Vec<&'static str> {
        self.scrapers.iter().map(|s| s.name()).collect()
    }

    /// Ask each scraper in turn.
    ///
    /// A scraper that declines the media is skipped. The first success is
    /// returned and later scrapers are not called. Any other error is
    /// returned immediately. When every scraper declines, the result is
    /// [`Error::NoScraper`].
    pub async fn scrape(&self, media: &Media) -> Result<Media> {
        for scraper in &self.scrapers {
            debug!(scraper = scraper.name(), media = %media, "Trying scraper");
            match scraper.scrape(media).await {
                Ok(remote) => {
                    debug!(scraper = scraper.name(), media = %media, remote = %remote, "Media scraped");
                    return Ok(remote);
                }
                Err(err) if err.is_not_supported() => {
                    debug!(scraper = scraper.name(), media = %media, "Media not supported by scraper");
                }
                Err(err) => return Err(err),
            }
        }
        Err(Error::NoScraper)
    }
}

impl std::fmt::Debug for ScraperChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScraperChain")
            .field("scrapers", &self.names())
            .finish()
    }
}
