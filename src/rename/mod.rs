//! Destination rendering and file placement.
//!
//! [`Renderer`] turns fused media into a library path using the configured
//! template for its kind; [`Renamer`] places the file there.

mod link;
mod template;

pub use link::{LinkAction, LinkFn, Renamer};
pub use template::{Field, Template, Value};

use std::path::{Component, Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use reelsort_common::paths::dotted_extension;
use reelsort_common::{Error, Result};

use crate::media::{Episode, Media, MediaKind, Movie};

static ILLEGAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"[%/?\\*:|"<>\n\r\x00-\x1f\x7f]"#).expect("valid regex"));

static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));

/// Remove characters that are unsafe in a file name, path separators
/// included.
///
/// ```
/// use reelsort::rename::clean_string;
///
/// assert_eq!(clean_string("Mission: Impossible / Fallout?"), "Mission Impossible  Fallout");
/// ```
pub fn clean_string(s: &str) -> String {
    ILLEGAL.replace_all(s, "").into_owned()
}

/// Collapse every run of whitespace into one space.
///
/// ```
/// use reelsort::rename::truncate_spaces;
///
/// assert_eq!(truncate_spaces("Movie  Name \t (2020)"), "Movie Name (2020)");
/// ```
pub fn truncate_spaces(s: &str) -> String {
    WHITESPACE.replace_all(s, " ").into_owned()
}

/// Output directory and template for one media kind.
#[derive(Debug, Clone)]
pub struct Destination {
    pub directory: PathBuf,
    pub template: Template,
}

/// Renders library destinations for movies and episodes.
#[derive(Debug, Clone, Default)]
pub struct Renderer {
    movies: Option<Destination>,
    episodes: Option<Destination>,
}

impl Renderer {
    /// A renderer with no templates; every render fails until one is set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the movie destination. The template must be a movie template.
    pub fn with_movies(mut self, directory: impl Into<PathBuf>, template: Template) -> Result<Self> {
        expect_kind(&template, MediaKind::Movie)?;
        self.movies = Some(Destination {
            directory: directory.into(),
            template,
        });
        Ok(self)
    }

    /// Set the episode destination. The template must be an episode template.
    pub fn with_episodes(
        mut self,
        directory: impl Into<PathBuf>,
        template: Template,
    ) -> Result<Self> {
        expect_kind(&template, MediaKind::Episode)?;
        self.episodes = Some(Destination {
            directory: directory.into(),
            template,
        });
        Ok(self)
    }

    /// Render the destination path of `media`.
    ///
    /// Text fields are cleaned of unsafe characters, the original file
    /// extension is appended, whitespace runs are collapsed and every path
    /// component is trimmed. Unknown tags and years render empty.
    pub fn render(&self, media: &Media) -> Result<PathBuf> {
        let (destination, rendered) = match media {
            Media::Movie(movie) => {
                let destination = self
                    .movies
                    .as_ref()
                    .ok_or_else(|| Error::TemplateMissing("movies".to_string()))?;
                (destination, destination.template.render(|f| movie_value(movie, f)))
            }
            Media::Episode(episode) => {
                let destination = self
                    .episodes
                    .as_ref()
                    .ok_or_else(|| Error::TemplateMissing("tvshows".to_string()))?;
                (destination, destination.template.render(|f| episode_value(episode, f)))
            }
            Media::Subtitle(_) => {
                return Err(Error::UnsupportedOperation(
                    "unknown media format cannot rename".to_string(),
                ))
            }
        };

        let extension = media
            .file()
            .map(|file| dotted_extension(file.name()))
            .unwrap_or_default();
        let filename = truncate_spaces(&(rendered + &extension));

        let mut path = destination.directory.clone();
        let mut pushed = 0;
        for part in filename.split('/').map(str::trim) {
            // Skip empty, `.` and `..` parts so output stays under the directory.
            if matches!(Path::new(part).components().next(), Some(Component::Normal(_)))
                && !part.is_empty()
            {
                path.push(part);
                pushed += 1;
            }
        }
        if pushed == 0 {
            return Err(Error::Template(format!(
                "template {:?} rendered an empty file name for {media}",
                destination.template.as_str()
            )));
        }
        Ok(path)
    }
}

fn expect_kind(template: &Template, kind: MediaKind) -> Result<()> {
    if template.kind() == kind {
        Ok(())
    } else {
        Err(Error::Template(format!(
            "{} template used for {kind}",
            template.kind()
        )))
    }
}

fn movie_value(movie: &Movie, field: Field) -> Value {
    let meta = movie.metadata();
    match field {
        Field::Title => Value::Text(clean_string(movie.title())),
        Field::Year => Value::Number(movie.year().map(u32::from)),
        Field::Quality => Value::Text(meta.quality().as_str().to_string()),
        Field::Codec => Value::Text(meta.codec().as_str().to_string()),
        Field::Group => Value::Text(clean_string(meta.group())),
        _ => Value::Text(String::new()),
    }
}

fn episode_value(episode: &Episode, field: Field) -> Value {
    let meta = episode.metadata();
    match field {
        Field::Show => Value::Text(clean_string(episode.show())),
        Field::Name => Value::Text(clean_string(episode.name())),
        Field::Season => Value::Number(Some(episode.season())),
        Field::Episode => Value::Number(Some(episode.episode())),
        Field::Quality => Value::Text(meta.quality().as_str().to_string()),
        Field::Codec => Value::Text(meta.codec().as_str().to_string()),
        Field::Group => Value::Text(clean_string(meta.group())),
        _ => Value::Text(String::new()),
    }
}
