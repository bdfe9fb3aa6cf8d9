//! Priority-ordered keyword tables.
//!
//! Each table is a list of `(tag, pattern)` pairs compiled once on first use.
//! Table order is the classification priority: when a release contains
//! keywords for two tags of the same category, the entry listed first wins
//! regardless of where the keywords appear in the input.
//!
//! Patterns are case-insensitive and must be bounded on both sides by the
//! start/end of input or a character that is not an ASCII letter or digit,
//! so `x264` matches in `Movie.x264-GRP` but `DV` does not match in `DVD`.

use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;

use crate::types::{Codec, Quality, Source};

const CODEC_KEYWORDS: &[(Codec, &str)] = &[
    (Codec::X265, r"x\.?265"),
    (Codec::X264, r"x\.?264"),
    (Codec::Hevc, r"hevc|h\.?265"),
    (Codec::Avc, r"avc|h\.?264"),
    (Codec::Av1, r"av1"),
    (Codec::Vp9, r"vp9"),
    (Codec::Xvid, r"xvid"),
    (Codec::Divx, r"divx"),
    (Codec::Mpeg2, r"mpeg-?2"),
];

const QUALITY_KEYWORDS: &[(Quality, &str)] = &[
    (Quality::Uhd2160p, r"2160p|4k|uhd"),
    (Quality::Hd1080p, r"1080p"),
    (Quality::Hd1080i, r"1080i"),
    (Quality::Hd720p, r"720p"),
    (Quality::Sd576p, r"576p"),
    (Quality::Sd480p, r"480p"),
];

const SOURCE_KEYWORDS: &[(Source, &str)] = &[
    (Source::Remux, r"remux"),
    (Source::BluRay, r"blu-?ray|bdrip|brrip"),
    (Source::WebDl, r"web-?dl"),
    (Source::WebRip, r"web-?rip"),
    (Source::Web, r"web"),
    (Source::Hdtv, r"hdtv"),
    (Source::DvdRip, r"dvd-?rip"),
    (Source::Dvd, r"dvd(?:r|5|9)?"),
    (Source::Telecine, r"telecine"),
    (Source::Telesync, r"telesync|hdts"),
    (Source::Cam, r"cam(?:rip)?|hdcam"),
];

/// Keywords that only contribute to the free-form tag list.
const EXTRA_KEYWORDS: &[(&str, &str)] = &[
    ("HDR10+", r"hdr10\+|hdr10plus"),
    ("HDR10", r"hdr10"),
    ("HDR", r"hdr"),
    ("DV", r"dv|dovi"),
    ("10bit", r"10-?bit"),
    ("Atmos", r"atmos"),
    ("TrueHD", r"truehd"),
    ("DTS-HD", r"dts-?hd(?:\.?ma)?"),
    ("DTS", r"dts"),
    ("DDP", r"(?:ddp|dd\+|e-?ac-?3)(?:\d\.\d)?"),
    ("AC3", r"(?:ac-?3|dd)(?:\d\.\d)?"),
    ("AAC", r"aac(?:\d\.\d)?"),
    ("REPACK", r"repack"),
    ("PROPER", r"proper"),
    ("EXTENDED", r"extended"),
    ("UNRATED", r"unrated"),
    ("REMASTERED", r"remastered"),
    ("IMAX", r"imax"),
];

/// A compiled keyword pattern and the tag it stands for.
#[derive(Debug)]
pub struct Keyword<T> {
    tag: T,
    regex: Regex,
}

impl<T: Copy> Keyword<T> {
    fn compile(tag: T, pattern: &'static str) -> Self {
        let bounded = format!("(?i)(?:^|[^0-9A-Za-z])({pattern})(?:$|[^0-9A-Za-z])");
        let regex = Regex::new(&bounded).expect("keyword patterns are valid");
        Self { tag, regex }
    }

    /// The tag this keyword classifies as.
    pub fn tag(&self) -> T {
        self.tag
    }

    /// Returns `true` if the keyword occurs anywhere in `input`.
    pub fn is_match(&self, input: &str) -> bool {
        self.regex.is_match(input)
    }

    /// Byte spans of every occurrence of the keyword in `input`.
    pub fn spans(&self, input: &str) -> Vec<Range<usize>> {
        bounded_spans(&self.regex, input)
    }
}

/// Spans of capture group 1 for every match of a separator-bounded regex.
pub(crate) fn bounded_spans(regex: &Regex, input: &str) -> Vec<Range<usize>> {
    let mut spans = Vec::new();
    let mut at = 0;
    while at <= input.len() {
        let Some(m) = regex.captures_at(input, at).and_then(|caps| caps.get(1)) else {
            break;
        };
        spans.push(m.range());
        // Resume at the end of the group itself so the separator after it
        // can serve as the leading boundary of the next occurrence.
        at = if m.end() > m.start() { m.end() } else { m.end() + 1 };
    }
    spans
}

/// An ordered list of keywords for one tag category.
#[derive(Debug)]
pub struct KeywordTable<T> {
    entries: Vec<Keyword<T>>,
}

impl<T: Copy> KeywordTable<T> {
    fn new(source: &[(T, &'static str)]) -> Self {
        Self {
            entries: source
                .iter()
                .map(|&(tag, pattern)| Keyword::compile(tag, pattern))
                .collect(),
        }
    }

    /// The first tag, in table order, with a keyword present in `input`.
    pub fn classify(&self, input: &str) -> Option<T> {
        self.entries
            .iter()
            .find(|k| k.is_match(input))
            .map(|k| k.tag)
    }

    /// Iterate over the entries in priority order.
    pub fn iter(&self) -> impl Iterator<Item = &Keyword<T>> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

static CODECS: LazyLock<KeywordTable<Codec>> = LazyLock::new(|| KeywordTable::new(CODEC_KEYWORDS));
static QUALITIES: LazyLock<KeywordTable<Quality>> =
    LazyLock::new(|| KeywordTable::new(QUALITY_KEYWORDS));
static SOURCES: LazyLock<KeywordTable<Source>> =
    LazyLock::new(|| KeywordTable::new(SOURCE_KEYWORDS));
static EXTRAS: LazyLock<KeywordTable<&'static str>> =
    LazyLock::new(|| KeywordTable::new(EXTRA_KEYWORDS));

/// The codec table, highest priority first.
pub fn codec_table() -> &'static KeywordTable<Codec> {
    &CODECS
}

/// The quality table, highest priority first.
pub fn quality_table() -> &'static KeywordTable<Quality> {
    &QUALITIES
}

/// The source table, highest priority first.
pub fn source_table() -> &'static KeywordTable<Source> {
    &SOURCES
}

/// Keywords that are recognized as tags but belong to no classified category.
pub fn extra_table() -> &'static KeywordTable<&'static str> {
    &EXTRAS
}

/// A keyword occurrence found in an input string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordMatch {
    /// Canonical tag string.
    pub tag: &'static str,
    /// Byte span of the keyword in the input.
    pub span: Range<usize>,
    /// Whether the keyword is a codec, quality or source keyword (as opposed
    /// to an extra tag).
    pub classified: bool,
}

fn collect<T: Copy>(
    table: &KeywordTable<T>,
    input: &str,
    classified: bool,
    name: impl Fn(T) -> &'static str,
    out: &mut Vec<KeywordMatch>,
) {
    for keyword in table.iter() {
        for span in keyword.spans(input) {
            out.push(KeywordMatch {
                tag: name(keyword.tag()),
                span,
                classified,
            });
        }
    }
}

/// Every keyword occurrence in `input` across all tables, ordered by start
/// position, with occurrences nested inside a longer one removed.
pub fn scan(input: &str) -> Vec<KeywordMatch> {
    let mut found = Vec::new();
    collect(codec_table(), input, true, |t| t.as_str(), &mut found);
    collect(quality_table(), input, true, |t| t.as_str(), &mut found);
    collect(source_table(), input, true, |t| t.as_str(), &mut found);
    collect(extra_table(), input, false, |t| t, &mut found);

    found.sort_by(|a, b| {
        a.span
            .start
            .cmp(&b.span.start)
            .then_with(|| b.span.len().cmp(&a.span.len()))
    });

    let mut kept: Vec<KeywordMatch> = Vec::with_capacity(found.len());
    for m in found {
        let nested = kept
            .iter()
            .any(|k| k.span.start <= m.span.start && m.span.end <= k.span.end);
        if !nested {
            kept.push(m);
        }
    }
    kept
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tables_compile_and_keep_declared_order() {
        assert_eq!(codec_table().len(), CODEC_KEYWORDS.len());
        assert_eq!(quality_table().len(), QUALITY_KEYWORDS.len());
        assert_eq!(source_table().len(), SOURCE_KEYWORDS.len());
        assert_eq!(extra_table().len(), EXTRA_KEYWORDS.len());

        let order: Vec<Codec> = codec_table().iter().map(|k| k.tag()).collect();
        assert_eq!(order[0], Codec::X265);
        assert_eq!(order[1], Codec::X264);
    }

    #[test]
    fn keywords_need_separator_boundaries() {
        let dv = extra_table().iter().find(|k| k.tag() == "DV").unwrap();
        assert!(dv.is_match("Movie.2019.DV.2160p"));
        assert!(!dv.is_match("Movie.2019.DVD"));
        assert!(!dv.is_match("Movie.2019.DVDRip"));
    }

    #[test]
    fn spans_find_adjacent_occurrences() {
        let x264 = codec_table().iter().find(|k| k.tag() == Codec::X264).unwrap();
        assert_eq!(x264.spans("a.x264.x264"), vec![2..6, 7..11]);
    }

    #[test]
    fn scan_drops_nested_matches() {
        let tags: Vec<&str> = scan("Movie.WEB-DL.HDR10+.DTS-HD.MA")
            .into_iter()
            .map(|m| m.tag)
            .collect();
        assert_eq!(tags, vec!["WEB-DL", "HDR10+", "DTS-HD"]);
    }

    #[test]
    fn classify_uses_table_order_not_position() {
        // HEVC appears before x265 in the input, x265 is listed first.
        assert_eq!(codec_table().classify("Movie.HEVC.x265"), Some(Codec::X265));
        assert_eq!(codec_table().classify("nothing here"), None);
    }
}
