//! Technical metadata read from a release name.

use std::fmt;

use reelsort_parser::{codec, group, quality, source, tags, Codec, Quality, Source};
use serde::ser::{Serialize, SerializeStruct, Serializer};

/// Release group, codec, quality, source and keyword tags of a release.
///
/// Built once from the release name and never changed afterwards; merging
/// media produces a new value instead.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Metadata {
    group: String,
    codec: Codec,
    quality: Quality,
    source: Source,
    tags: Vec<String>,
}

impl Metadata {
    /// Extract metadata from a release name (no directory, no extension).
    ///
    /// ```
    /// use reelsort::media::Metadata;
    /// use reelsort_parser::Quality;
    ///
    /// let meta = Metadata::parse("Movie.Name.2020.1080p.BluRay.x264-GROUP");
    /// assert_eq!(meta.group(), "GROUP");
    /// assert_eq!(meta.quality(), Quality::Hd1080p);
    /// assert_eq!(meta.to_string(), "GROUP,x264,1080p,BluRay");
    /// ```
    pub fn parse(release: &str) -> Self {
        Self {
            group: group(release),
            codec: codec(release),
            quality: quality(release),
            source: source(release),
            tags: tags(release),
        }
    }

    /// Build metadata from known parts, as a scraper would.
    pub fn new(
        group: impl Into<String>,
        codec: Codec,
        quality: Quality,
        source: Source,
        tags: Vec<String>,
    ) -> Self {
        Self {
            group: group.into(),
            codec,
            quality,
            source,
            tags,
        }
    }

    pub fn group(&self) -> &str {
        &self.group
    }

    pub fn codec(&self) -> Codec {
        self.codec
    }

    pub fn quality(&self) -> Quality {
        self.quality
    }

    pub fn source(&self) -> Source {
        self.source
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }
}

impl fmt::Display for Metadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{},{},{},{}",
            self.group,
            self.codec.as_str(),
            self.quality.as_str(),
            self.source.as_str()
        )
    }
}

// Tags serialize as their canonical display strings.
impl Serialize for Metadata {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Metadata", 5)?;
        state.serialize_field("group", &self.group)?;
        state.serialize_field("codec", self.codec.as_str())?;
        state.serialize_field("quality", self.quality.as_str())?;
        state.serialize_field("source", self.source.as_str())?;
        state.serialize_field("tags", &self.tags)?;
        state.end()
    }
}
