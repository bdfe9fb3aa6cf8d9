//! Tag extraction functions.
//!
//! All functions are pure: the same input always yields the same output, and
//! no input, however malformed, causes an error or a panic.

use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;

use crate::keywords::{self, codec_table, quality_table, source_table};
use crate::types::{Codec, Quality, Source};

static TRAILING_BRACKET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*\[[^\[\]]*\]\s*$").expect("valid regex"));

static TRAILING_GROUP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"-([0-9A-Za-z_@&]+)\s*$").expect("valid regex"));

/// Extract the trailing release group.
///
/// The group is the token after the last dash at the end of the name. A
/// trailing bracketed site tag is ignored. Returns an empty string when the
/// name has no such token or the dash belongs to a keyword like `WEB-DL`.
///
/// ```
/// use reelsort_parser::group;
///
/// assert_eq!(group("Movie.Name.2020.1080p.BluRay.x264-GROUP"), "GROUP");
/// assert_eq!(group("Movie.Name.2020.1080p.WEB-DL"), "");
/// assert_eq!(group("Movie Name 2020"), "");
/// ```
pub fn group(input: &str) -> String {
    locate_group(input)
        .map(|(_, name)| input[name].to_string())
        .unwrap_or_default()
}

/// Byte offset of the group's dash and the byte range of the group name.
pub(crate) fn locate_group(input: &str) -> Option<(usize, Range<usize>)> {
    let trimmed = TRAILING_BRACKET.replace(input, "");
    let caps = TRAILING_GROUP.captures(&trimmed)?;
    let dash = caps.get(0)?.start();
    let name = caps.get(1)?.range();

    let part_of_keyword = keywords::scan(&trimmed)
        .iter()
        .any(|m| m.span.contains(&dash) || m.span == name);
    if part_of_keyword {
        return None;
    }

    // Only a suffix was trimmed, so offsets into `trimmed` are valid in `input`.
    Some((dash, name))
}

/// Classify the video codec. The first codec in priority order present in
/// the input wins; see [`codec_table`].
///
/// ```
/// use reelsort_parser::{codec, Codec};
///
/// assert_eq!(codec("Movie.2020.1080p.BluRay.x264-GROUP"), Codec::X264);
/// assert_eq!(codec("Movie.2020"), Codec::Unknown);
/// ```
pub fn codec(input: &str) -> Codec {
    codec_table().classify(input).unwrap_or_default()
}

/// Classify the resolution. See [`quality_table`] for priority.
///
/// ```
/// use reelsort_parser::{quality, Quality};
///
/// assert_eq!(quality("Movie.2020.1080P.BluRay"), Quality::Hd1080p);
/// ```
pub fn quality(input: &str) -> Quality {
    quality_table().classify(input).unwrap_or_default()
}

/// Classify the release source. See [`source_table`] for priority.
///
/// ```
/// use reelsort_parser::{source, Source};
///
/// assert_eq!(source("Show.S01E01.720p.HDTV.x264-GRP"), Source::Hdtv);
/// ```
pub fn source(input: &str) -> Source {
    source_table().classify(input).unwrap_or_default()
}

/// Every recognized keyword, as canonical tags, in order of first
/// appearance. Duplicates are collapsed.
///
/// ```
/// use reelsort_parser::tags;
///
/// assert_eq!(
///     tags("Movie.2020.1080p.BluRay.x264.DTS-GROUP"),
///     vec!["1080p", "BluRay", "x264", "DTS"]
/// );
/// ```
pub fn tags(input: &str) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for m in keywords::scan(input) {
        if !out.iter().any(|t| t == m.tag) {
            out.push(m.tag.to_string());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn group_ignores_trailing_site_tag() {
        assert_eq!(group("Movie.2020.720p.WEBRip.x264-GRP[rarbg]"), "GRP");
        assert_eq!(group("Movie.2020.720p.WEBRip.x264-GRP [eztv]"), "GRP");
    }

    #[test]
    fn group_rejects_keyword_suffixes() {
        assert_eq!(group("Movie.2020.WEB-DL"), "");
        assert_eq!(group("Movie.2020.DTS-HD"), "");
        assert_eq!(group("Movie.2020-x264"), "");
    }

    #[test]
    fn group_requires_dash() {
        assert_eq!(group(""), "");
        assert_eq!(group("GROUP"), "");
        assert_eq!(group("Movie.2020.x264.GROUP"), "");
    }

    #[test]
    fn codec_priority_is_table_order() {
        assert_eq!(codec("Movie.H.264.x265"), Codec::X265);
        assert_eq!(codec("Movie.h265"), Codec::Hevc);
        assert_eq!(codec("Movie.AVC"), Codec::Avc);
        assert_eq!(codec("Movie.XviD-GRP"), Codec::Xvid);
    }

    #[test]
    fn quality_matches_case_insensitively() {
        for input in ["a.1080p.b", "a.1080P.b", "A 1080p B", "a_1080p_b"] {
            assert_eq!(quality(input), Quality::Hd1080p, "{input}");
        }
        assert_eq!(quality("Movie.4K.HDR"), Quality::Uhd2160p);
        assert_eq!(quality("Movie.UHD.BluRay"), Quality::Uhd2160p);
        assert_eq!(quality("Movie.720p.1080p"), Quality::Hd1080p);
        assert_eq!(quality("Movie.10800p"), Quality::Unknown);
    }

    #[test]
    fn source_prefers_specific_web_variants() {
        assert_eq!(source("Show.S01E01.WEB-DL.x264"), Source::WebDl);
        assert_eq!(source("Show.S01E01.WEBRip.x264"), Source::WebRip);
        assert_eq!(source("Show.S01E01.WEB.x264"), Source::Web);
        assert_eq!(source("Movie.BDRip"), Source::BluRay);
        assert_eq!(source("Movie.DVDRip"), Source::DvdRip);
        assert_eq!(source("Movie.DVDR"), Source::Dvd);
        assert_eq!(source("Movie.HDCAM"), Source::Cam);
    }

    #[test]
    fn tags_are_ordered_and_deduplicated() {
        assert_eq!(
            tags("Movie.x264.1080p.x264.REPACK.1080p"),
            vec!["x264", "1080p", "REPACK"]
        );
        assert_eq!(
            tags("Show.S02E03.2160p.WEB-DL.DDP5.1.Atmos.DV.HDR.H.265-GRP"),
            vec!["2160p", "WEB-DL", "DDP", "Atmos", "DV", "HDR", "HEVC"]
        );
    }

    #[test]
    fn tolerates_arbitrary_unicode() {
        let inputs = [
            "",
            "-",
            "----",
            "ファイル名.1080p.x264-グループ",
            "Amélie.2001.720p.BluRay-ÉQUIPE",
            "\u{0}\u{ffff}\u{1F3AC}",
            "[]",
            "  [  ]  ",
        ];
        for input in inputs {
            let _ = group(input);
            let _ = codec(input);
            let _ = quality(input);
            let _ = source(input);
            let _ = tags(input);
        }
        assert_eq!(quality("ファイル名.1080p.x264-グループ"), Quality::Hd1080p);
        assert_eq!(group("ファイル名.1080p.x264-グループ"), "");
    }

    #[test]
    fn repeated_runs_are_stable() {
        let input = "Movie.2020.2160p.UHD.BluRay.Remux.HEVC.x265-GROUP";
        let first = (codec(input), quality(input), source(input), tags(input));
        for _ in 0..10 {
            assert_eq!(first, (codec(input), quality(input), source(input), tags(input)));
        }
        assert_eq!(first.2, Source::Remux);
    }
}
