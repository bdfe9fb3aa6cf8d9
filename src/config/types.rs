use reelsort_common::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::library::BatchPolicy;
use crate::media::MediaKind;
use crate::rename::{LinkAction, Renamer, Renderer, Template};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// How files are placed in the library: copy, move, symlink or hardlink.
    #[serde(default)]
    pub action: LinkAction,

    /// Abort the batch on the first failed item.
    #[serde(default)]
    pub strict: bool,

    /// Replace existing destinations.
    #[serde(default)]
    pub force: bool,

    /// Under strict mode, treat an existing destination as fatal.
    #[serde(default)]
    pub existing_is_fatal: bool,

    /// Number of items scraped concurrently (default: 1)
    #[serde(default = "default_scrape_concurrency")]
    pub scrape_concurrency: usize,

    #[serde(default = "LibraryConfig::default_movies")]
    pub movies: LibraryConfig,

    #[serde(default = "LibraryConfig::default_tvshows")]
    pub tvshows: LibraryConfig,
}

fn default_scrape_concurrency() -> usize {
    1
}

impl Default for Config {
    fn default() -> Self {
        Self {
            action: LinkAction::default(),
            strict: false,
            force: false,
            existing_is_fatal: false,
            scrape_concurrency: default_scrape_concurrency(),
            movies: LibraryConfig::default_movies(),
            tvshows: LibraryConfig::default_tvshows(),
        }
    }
}

/// Output directory and filename template for one kind of media.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LibraryConfig {
    pub directory: PathBuf,

    /// Filename template; an empty template disables renaming this kind.
    #[serde(default)]
    pub template: String,
}

const DEFAULT_MOVIE_TEMPLATE: &str = "{title} ({year})/{title} ({year}) [{quality}]";
const DEFAULT_EPISODE_TEMPLATE: &str =
    "{show}/Season {season:02}/{show} - S{season:02}E{episode:02} - {name}";

impl LibraryConfig {
    fn default_movies() -> Self {
        Self {
            directory: PathBuf::from("Movies"),
            template: DEFAULT_MOVIE_TEMPLATE.to_string(),
        }
    }

    fn default_tvshows() -> Self {
        Self {
            directory: PathBuf::from("TV Shows"),
            template: DEFAULT_EPISODE_TEMPLATE.to_string(),
        }
    }

    /// Compile the template, or `None` when it is empty.
    pub fn template(&self, kind: MediaKind) -> Result<Option<Template>> {
        if self.template.trim().is_empty() {
            return Ok(None);
        }
        Template::parse(kind, &self.template).map(Some)
    }
}

impl Config {
    /// Build the destination renderer from the library sections.
    pub fn renderer(&self) -> Result<Renderer> {
        let mut renderer = Renderer::new();
        if let Some(template) = self.movies.template(MediaKind::Movie)? {
            renderer = renderer.with_movies(&self.movies.directory, template)?;
        }
        if let Some(template) = self.tvshows.template(MediaKind::Episode)? {
            renderer = renderer.with_episodes(&self.tvshows.directory, template)?;
        }
        Ok(renderer)
    }

    pub fn renamer(&self) -> Renamer {
        Renamer::new(self.action, self.force)
    }

    pub fn policy(&self) -> BatchPolicy {
        BatchPolicy {
            strict: self.strict,
            existing_is_fatal: self.existing_is_fatal,
            scrape_concurrency: self.scrape_concurrency,
        }
    }
}
