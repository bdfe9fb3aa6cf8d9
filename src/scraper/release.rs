//! Offline scraper that reads identity from the file name.

use async_trait::async_trait;
use reelsort_common::{Error, Result};
use reelsort_parser::parse_release;

use super::Scraper;
use crate::media::{Episode, Media, Movie};

/// Resolves movies and episodes from their release names alone.
///
/// This is the default scraper when no online database is configured. It
/// declines subtitles and fails for names with no readable title.
#[derive(Debug, Clone, Default)]
pub struct ReleaseNameScraper;

impl ReleaseNameScraper {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Scraper for ReleaseNameScraper {
    fn name(&self) -> &'static str {
        "release"
    }

    async fn scrape(&self, media: &Media) -> Result<Media> {
        if media.as_subtitle().is_some() {
            return Err(Error::not_supported(self.name()));
        }

        let file = media
            .file()
            .ok_or_else(|| Error::scraper(self.name(), "media has no file name"))?;
        let name = file.name();
        let stem = name.rsplit_once('.').map_or(name, |(stem, _)| stem);
        let release = parse_release(stem);

        if release.title.is_empty() {
            return Err(Error::scraper(
                self.name(),
                format!("no title in release name {name:?}"),
            ));
        }

        let remote = match (media, release.season, release.episode) {
            (Media::Episode(_), Some(season), Some(episode)) => Media::Episode(Episode::new(
                release.title,
                season,
                episode,
                release.episode_title,
            )),
            (Media::Movie(_), _, _) => Media::Movie(Movie::new(release.title, release.year)),
            _ => {
                return Err(Error::scraper(
                    self.name(),
                    format!("no episode numbering in {name:?}"),
                ))
            }
        };
        Ok(remote)
    }
}
