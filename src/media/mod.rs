//! Media entity model.
//!
//! A [`Media`] value is exactly one of a movie, a TV episode or a subtitle.
//! Values built from a library file carry a [`FileRef`] and the technical
//! [`Metadata`] parsed from the file name; values returned by a scraper carry
//! only identity fields. [`merge`] combines the two.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use reelsort::media::{Media, MediaKind, MemoryFile};
//!
//! let file = Arc::new(MemoryFile::new("Show.S01E02.en.srt", Vec::new()));
//! let media = Media::from_file(file).unwrap();
//!
//! assert_eq!(media.kind(), MediaKind::Subtitle);
//! assert_eq!(media.as_subtitle().unwrap().language().to_string(), "en");
//! assert!(media.as_movie().is_none());
//! assert!(media.as_episode().is_none());
//! ```

mod file;
mod merge;
mod metadata;

pub use file::{DiskFile, FileRef, LocalFile, MemoryFile};
pub use merge::merge;
pub use metadata::Metadata;

use std::fmt;
use std::path::Path;

use reelsort_common::paths::{is_subtitle_file, is_video_file};
use reelsort_common::{Error, LanguageTag, Result};
use reelsort_parser::parse_release;
use serde::{Serialize, Serializer};

/// Discriminant of a [`Media`] value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Movie,
    Episode,
    Subtitle,
}

impl MediaKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaKind::Movie => "movie",
            MediaKind::Episode => "episode",
            MediaKind::Subtitle => "subtitle",
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn serialize_file_name<S: Serializer>(
    file: &Option<FileRef>,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    match file {
        Some(file) => serializer.serialize_some(file.name()),
        None => serializer.serialize_none(),
    }
}

/// A feature film.
#[derive(Debug, Clone, Serialize)]
pub struct Movie {
    #[serde(rename = "filename", serialize_with = "serialize_file_name")]
    file: Option<FileRef>,
    title: String,
    year: Option<u16>,
    metadata: Metadata,
}

impl Movie {
    /// A movie identity with no file and no technical metadata.
    pub fn new(title: impl Into<String>, year: Option<u16>) -> Self {
        Self {
            file: None,
            title: title.into(),
            year,
            metadata: Metadata::default(),
        }
    }

    pub fn with_file(mut self, file: FileRef) -> Self {
        self.file = Some(file);
        self
    }

    pub fn with_metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = metadata;
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Release year; `None` when unknown.
    pub fn year(&self) -> Option<u16> {
        self.year
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    pub fn file(&self) -> Option<&FileRef> {
        self.file.as_ref()
    }
}

/// A single episode of a TV show.
#[derive(Debug, Clone, Serialize)]
pub struct Episode {
    #[serde(rename = "filename", serialize_with = "serialize_file_name")]
    file: Option<FileRef>,
    show: String,
    season: u32,
    episode: u32,
    name: String,
    metadata: Metadata,
}

impl Episode {
    /// An episode identity with no file and no technical metadata.
    pub fn new(show: impl Into<String>, season: u32, episode: u32, name: impl Into<String>) -> Self {
        Self {
            file: None,
            show: show.into(),
            season,
            episode,
            name: name.into(),
            metadata: Metadata::default(),
        }
    }

    pub fn with_file(mut self, file: FileRef) -> Self {
        self.file = Some(file);
        self
    }

    pub fn with_metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = metadata;
        self
    }

    pub fn show(&self) -> &str {
        &self.show
    }

    pub fn season(&self) -> u32 {
        self.season
    }

    pub fn episode(&self) -> u32 {
        self.episode
    }

    /// Episode title; may be empty.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    pub fn file(&self) -> Option<&FileRef> {
        self.file.as_ref()
    }
}

/// A subtitle track in a given language.
#[derive(Debug, Clone, Serialize)]
pub struct Subtitle {
    #[serde(rename = "filename", serialize_with = "serialize_file_name")]
    file: Option<FileRef>,
    language: LanguageTag,
    hearing_impaired: bool,
}

impl Subtitle {
    pub fn new(language: LanguageTag, hearing_impaired: bool) -> Self {
        Self {
            file: None,
            language,
            hearing_impaired,
        }
    }

    pub fn with_file(mut self, file: FileRef) -> Self {
        self.file = Some(file);
        self
    }

    /// Build a local subtitle; the language is the second-to-last dotted
    /// segment of the file name (`Show.S01E02.en.srt`).
    fn from_file(file: FileRef) -> Result<Self> {
        let name = file.name();
        let segments: Vec<&str> = name.split('.').collect();
        if segments.len() < 2 {
            return Err(Error::parse(format!("error parsing subtitle file {name:?}")));
        }
        let language = LanguageTag::parse(segments[segments.len() - 2])
            .map_err(|_| Error::parse(format!("no language in subtitle file {name:?}")))?;

        Ok(Self::new(language, false).with_file(file))
    }

    pub fn language(&self) -> &LanguageTag {
        &self.language
    }

    pub fn is_hearing_impaired(&self) -> bool {
        self.hearing_impaired
    }

    pub fn file(&self) -> Option<&FileRef> {
        self.file.as_ref()
    }
}

/// A movie, an episode or a subtitle.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Media {
    Movie(Movie),
    Episode(Episode),
    Subtitle(Subtitle),
}

impl Media {
    /// Build local media from a file, classifying it by extension.
    ///
    /// Subtitles take their language from the file name. Videos are read as
    /// an episode when the name has a season/episode marker and as a movie
    /// otherwise; the identity is provisional until merged with a scraped
    /// value. Any other file is a [`Error::Parse`].
    pub fn from_file(file: FileRef) -> Result<Self> {
        let path = Path::new(file.name());

        if is_subtitle_file(path) {
            return Subtitle::from_file(file).map(Media::Subtitle);
        }

        if !is_video_file(path) {
            return Err(Error::parse(format!("not a media file: {:?}", file.name())));
        }

        let release = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();
        let metadata = Metadata::parse(&release);
        let identity = parse_release(&release);

        let media = match (identity.season, identity.episode) {
            (Some(season), Some(episode)) => Media::Episode(
                Episode::new(identity.title, season, episode, identity.episode_title)
                    .with_metadata(metadata)
                    .with_file(file),
            ),
            _ => Media::Movie(
                Movie::new(identity.title, identity.year)
                    .with_metadata(metadata)
                    .with_file(file),
            ),
        };
        Ok(media)
    }

    pub fn kind(&self) -> MediaKind {
        match self {
            Media::Movie(_) => MediaKind::Movie,
            Media::Episode(_) => MediaKind::Episode,
            Media::Subtitle(_) => MediaKind::Subtitle,
        }
    }

    pub fn as_movie(&self) -> Option<&Movie> {
        match self {
            Media::Movie(movie) => Some(movie),
            _ => None,
        }
    }

    pub fn as_episode(&self) -> Option<&Episode> {
        match self {
            Media::Episode(episode) => Some(episode),
            _ => None,
        }
    }

    pub fn as_subtitle(&self) -> Option<&Subtitle> {
        match self {
            Media::Subtitle(subtitle) => Some(subtitle),
            _ => None,
        }
    }

    /// The backing file; `None` for scraped values.
    pub fn file(&self) -> Option<&FileRef> {
        match self {
            Media::Movie(movie) => movie.file(),
            Media::Episode(episode) => episode.file(),
            Media::Subtitle(subtitle) => subtitle.file(),
        }
    }

    /// Technical metadata; subtitles have none.
    pub fn metadata(&self) -> Option<&Metadata> {
        match self {
            Media::Movie(movie) => Some(movie.metadata()),
            Media::Episode(episode) => Some(episode.metadata()),
            Media::Subtitle(_) => None,
        }
    }

    /// The file name for local media, the identity otherwise.
    pub fn name(&self) -> String {
        match self.file() {
            Some(file) => file.name().to_string(),
            None => self.to_string(),
        }
    }
}

impl fmt::Display for Media {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Media::Movie(movie) => match movie.year {
                Some(year) => write!(f, "{} ({})", movie.title, year),
                None => write!(f, "{}", movie.title),
            },
            Media::Episode(episode) => write!(
                f,
                "{} S{:02}E{:02}",
                episode.show, episode.season, episode.episode
            ),
            Media::Subtitle(subtitle) => write!(f, "subtitle [{}]", subtitle.language),
        }
    }
}
