//! Tag enums and the parsed release identity.

use std::fmt;
use std::str::FromStr;

/// Error type for parsing tag values from strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError(pub String);

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "parse error: {}", self.0)
    }
}

impl std::error::Error for ParseError {}

// ---------------------------------------------------------------------------
// Codec
// ---------------------------------------------------------------------------

/// Video codec or encoder named in a release.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Codec {
    #[default]
    Unknown,
    X265,
    X264,
    Hevc,
    Avc,
    Av1,
    Vp9,
    Xvid,
    Divx,
    Mpeg2,
}

impl Codec {
    /// Canonical display string; empty for [`Codec::Unknown`].
    pub fn as_str(&self) -> &'static str {
        match self {
            Codec::Unknown => "",
            Codec::X265 => "x265",
            Codec::X264 => "x264",
            Codec::Hevc => "HEVC",
            Codec::Avc => "AVC",
            Codec::Av1 => "AV1",
            Codec::Vp9 => "VP9",
            Codec::Xvid => "XviD",
            Codec::Divx => "DivX",
            Codec::Mpeg2 => "MPEG-2",
        }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Codec::Unknown)
    }
}

impl fmt::Display for Codec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Codec::Unknown => write!(f, "unknown"),
            other => write!(f, "{}", other.as_str()),
        }
    }
}

impl FromStr for Codec {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "unknown" | "" => Ok(Codec::Unknown),
            "x265" => Ok(Codec::X265),
            "x264" => Ok(Codec::X264),
            "hevc" | "h265" | "h.265" => Ok(Codec::Hevc),
            "avc" | "h264" | "h.264" => Ok(Codec::Avc),
            "av1" => Ok(Codec::Av1),
            "vp9" => Ok(Codec::Vp9),
            "xvid" => Ok(Codec::Xvid),
            "divx" => Ok(Codec::Divx),
            "mpeg2" | "mpeg-2" => Ok(Codec::Mpeg2),
            _ => Err(ParseError(format!("invalid codec: {s}"))),
        }
    }
}

// ---------------------------------------------------------------------------
// Quality
// ---------------------------------------------------------------------------

/// Resolution class of a release.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Quality {
    #[default]
    Unknown,
    #[cfg_attr(feature = "serde", serde(rename = "2160p"))]
    Uhd2160p,
    #[cfg_attr(feature = "serde", serde(rename = "1080p"))]
    Hd1080p,
    #[cfg_attr(feature = "serde", serde(rename = "1080i"))]
    Hd1080i,
    #[cfg_attr(feature = "serde", serde(rename = "720p"))]
    Hd720p,
    #[cfg_attr(feature = "serde", serde(rename = "576p"))]
    Sd576p,
    #[cfg_attr(feature = "serde", serde(rename = "480p"))]
    Sd480p,
}

impl Quality {
    /// Canonical display string; empty for [`Quality::Unknown`].
    pub fn as_str(&self) -> &'static str {
        match self {
            Quality::Unknown => "",
            Quality::Uhd2160p => "2160p",
            Quality::Hd1080p => "1080p",
            Quality::Hd1080i => "1080i",
            Quality::Hd720p => "720p",
            Quality::Sd576p => "576p",
            Quality::Sd480p => "480p",
        }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Quality::Unknown)
    }
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Quality::Unknown => write!(f, "unknown"),
            other => write!(f, "{}", other.as_str()),
        }
    }
}

impl FromStr for Quality {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "unknown" | "" => Ok(Quality::Unknown),
            "2160p" | "4k" | "uhd" => Ok(Quality::Uhd2160p),
            "1080p" => Ok(Quality::Hd1080p),
            "1080i" => Ok(Quality::Hd1080i),
            "720p" => Ok(Quality::Hd720p),
            "576p" => Ok(Quality::Sd576p),
            "480p" => Ok(Quality::Sd480p),
            _ => Err(ParseError(format!("invalid quality: {s}"))),
        }
    }
}

// ---------------------------------------------------------------------------
// Source
// ---------------------------------------------------------------------------

/// Origin of a release (disc, broadcast, web, theater capture).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Source {
    #[default]
    Unknown,
    Remux,
    BluRay,
    WebDl,
    WebRip,
    Web,
    Hdtv,
    DvdRip,
    Dvd,
    Telecine,
    Telesync,
    Cam,
}

impl Source {
    /// Canonical display string; empty for [`Source::Unknown`].
    pub fn as_str(&self) -> &'static str {
        match self {
            Source::Unknown => "",
            Source::Remux => "Remux",
            Source::BluRay => "BluRay",
            Source::WebDl => "WEB-DL",
            Source::WebRip => "WEBRip",
            Source::Web => "WEB",
            Source::Hdtv => "HDTV",
            Source::DvdRip => "DVDRip",
            Source::Dvd => "DVD",
            Source::Telecine => "Telecine",
            Source::Telesync => "Telesync",
            Source::Cam => "CAM",
        }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Source::Unknown)
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Unknown => write!(f, "unknown"),
            other => write!(f, "{}", other.as_str()),
        }
    }
}

impl FromStr for Source {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "unknown" | "" => Ok(Source::Unknown),
            "remux" => Ok(Source::Remux),
            "bluray" | "blu-ray" | "bdrip" | "brrip" => Ok(Source::BluRay),
            "web-dl" | "webdl" => Ok(Source::WebDl),
            "webrip" | "web-rip" => Ok(Source::WebRip),
            "web" => Ok(Source::Web),
            "hdtv" => Ok(Source::Hdtv),
            "dvdrip" => Ok(Source::DvdRip),
            "dvd" | "dvdr" | "dvd5" | "dvd9" => Ok(Source::Dvd),
            "telecine" | "tc" => Ok(Source::Telecine),
            "telesync" | "ts" => Ok(Source::Telesync),
            "cam" | "camrip" => Ok(Source::Cam),
            _ => Err(ParseError(format!("invalid source: {s}"))),
        }
    }
}

// ---------------------------------------------------------------------------
// ReleaseInfo
// ---------------------------------------------------------------------------

/// Identity fields recovered from a release name.
///
/// These are a best-effort reading of the name; a scraper is the authority
/// on the final identity.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReleaseInfo {
    /// Movie title or show name, separators replaced by spaces.
    pub title: String,
    /// Release year, if one was found.
    pub year: Option<u16>,
    /// Season number from an episode marker.
    pub season: Option<u32>,
    /// Episode number from an episode marker.
    pub episode: Option<u32>,
    /// Text between the episode marker and the technical tags.
    pub episode_title: String,
}

impl ReleaseInfo {
    /// Returns `true` when the name carried a season/episode marker.
    pub fn is_episode(&self) -> bool {
        self.season.is_some() && self.episode.is_some()
    }
}
