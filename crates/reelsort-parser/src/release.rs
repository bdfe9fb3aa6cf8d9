//! Release identity: title, year and episode numbering.
//!
//! Identity is read positionally. The title runs from the start of the name
//! up to the first structural marker (year, episode marker, technical
//! keyword or the release group dash). Everything after that marker is
//! ignored for identity purposes, except the free text between an episode
//! marker and the technical keywords, which becomes the episode title.

use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;

use crate::extract::locate_group;
use crate::keywords::{self, bounded_spans};
use crate::types::ReleaseInfo;

static EPISODE_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)(?:^|[^0-9A-Za-z])(s(\d{1,3})[ ._-]?e(\d{1,4})(?:-?e\d{1,4})*|(\d{1,2})x(\d{2,3}))(?:$|[^0-9A-Za-z])",
    )
    .expect("valid regex")
});

static YEAR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:^|[^0-9A-Za-z])((?:19|20)\d{2})(?:$|[^0-9A-Za-z])").expect("valid regex")
});

static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));

struct EpisodeMarker {
    span: Range<usize>,
    season: Option<u32>,
    episode: Option<u32>,
}

fn episode_marker(input: &str) -> Option<EpisodeMarker> {
    let caps = EPISODE_MARKER.captures(input)?;
    let span = caps.get(1)?.range();
    let number = |a: usize, b: usize| {
        caps.get(a)
            .or_else(|| caps.get(b))
            .and_then(|m| m.as_str().parse::<u32>().ok())
    };
    Some(EpisodeMarker {
        span,
        season: number(2, 4),
        episode: number(3, 5),
    })
}

/// Turn a raw name fragment into readable text.
fn tidy(fragment: &str) -> String {
    let spaced = fragment.replace(['.', '_'], " ");
    let collapsed = WHITESPACE.replace_all(&spaced, " ");
    collapsed
        .trim_start_matches([' ', '-'])
        .trim_end_matches([' ', '-', '(', '[', '{'])
        .to_string()
}

/// Parse the identity fields of a release name.
///
/// Never fails: fields that cannot be found are left empty or `None`.
///
/// ```
/// use reelsort_parser::parse_release;
///
/// let movie = parse_release("Movie.Name.2020.1080p.BluRay.x264-GROUP");
/// assert_eq!(movie.title, "Movie Name");
/// assert_eq!(movie.year, Some(2020));
/// assert!(!movie.is_episode());
///
/// let episode = parse_release("Show.Name.S01E02.Pilot.720p.HDTV.x264-GRP");
/// assert_eq!(episode.title, "Show Name");
/// assert_eq!((episode.season, episode.episode), (Some(1), Some(2)));
/// assert_eq!(episode.episode_title, "Pilot");
/// ```
pub fn parse_release(input: &str) -> ReleaseInfo {
    let found = keywords::scan(input);
    let marker = episode_marker(input);
    let dash = locate_group(input).map(|(dash, _)| dash);

    // A keyword at the very start is part of the title (`Cam.2018...`).
    let first_keyword = found.iter().map(|m| m.span.start).find(|&start| start > 0);

    let limit = [marker.as_ref().map(|m| m.span.start), first_keyword, dash]
        .into_iter()
        .flatten()
        .min()
        .unwrap_or(input.len());

    let year_span = bounded_spans(&YEAR, input)
        .into_iter()
        .filter(|span| span.start > 0 && span.start < limit)
        .last();
    let year = year_span
        .as_ref()
        .and_then(|span| input[span.clone()].parse::<u16>().ok());

    let title_end = year_span.map(|span| span.start).unwrap_or(limit);
    let title = tidy(&input[..title_end]);

    let mut info = ReleaseInfo {
        title,
        year,
        ..ReleaseInfo::default()
    };

    if let Some(marker) = marker {
        let after = marker.span.end;
        let end = found
            .iter()
            .map(|m| m.span.start)
            .chain(dash)
            .filter(|&pos| pos >= after)
            .min()
            .unwrap_or(input.len());
        info.season = marker.season;
        info.episode = marker.episode;
        info.episode_title = tidy(&input[after..end]);
    }

    info
}
