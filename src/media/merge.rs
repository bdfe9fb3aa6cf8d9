//! Fusion of local and scraped media.

use reelsort_common::{Error, Result};

use super::{Episode, Media, Movie};

/// Combine a local media value with the scraper's view of the same media.
///
/// Identity (title and year, or show, numbering and episode name) comes from
/// `remote`, except that an empty remote title or name or a missing remote
/// year keeps the local value. Technical metadata and the file always come
/// from `local`. Neither input is modified.
///
/// Subtitles cannot be merged, and both values must be the same kind.
///
/// ```
/// use reelsort::media::{merge, Media, Metadata, Movie};
///
/// let local = Media::Movie(
///     Movie::new("movie name", None).with_metadata(Metadata::parse("movie.name.1080p-GRP")),
/// );
/// let remote = Media::Movie(Movie::new("Movie Name", Some(2020)));
///
/// let fused = merge(&local, &remote).unwrap();
/// let movie = fused.as_movie().unwrap();
/// assert_eq!(movie.title(), "Movie Name");
/// assert_eq!(movie.year(), Some(2020));
/// assert_eq!(movie.metadata().group(), "GRP");
/// ```
pub fn merge(local: &Media, remote: &Media) -> Result<Media> {
    match (local, remote) {
        (Media::Subtitle(_), _) | (_, Media::Subtitle(_)) => Err(Error::UnsupportedOperation(
            "merging of subtitles is not supported".to_string(),
        )),
        (Media::Movie(local), Media::Movie(remote)) => Ok(Media::Movie(Movie {
            file: local.file.clone().or_else(|| remote.file.clone()),
            title: prefer(&remote.title, &local.title),
            year: remote.year.or(local.year),
            metadata: local.metadata.clone(),
        })),
        (Media::Episode(local), Media::Episode(remote)) => Ok(Media::Episode(Episode {
            file: local.file.clone().or_else(|| remote.file.clone()),
            show: prefer(&remote.show, &local.show),
            season: remote.season,
            episode: remote.episode,
            name: prefer(&remote.name, &local.name),
            metadata: local.metadata.clone(),
        })),
        (local, remote) => Err(Error::type_mismatch(
            local.kind().as_str(),
            remote.kind().as_str(),
        )),
    }
}

fn prefer(remote: &str, local: &str) -> String {
    if remote.trim().is_empty() {
        local.to_string()
    } else {
        remote.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::{FileRef, MemoryFile, Metadata, Subtitle};
    use std::sync::Arc;

    fn local_movie() -> Media {
        let file: FileRef = Arc::new(MemoryFile::new("movie.name.1080p.x264-GRP.mkv", Vec::new()));
        Media::from_file(file).unwrap()
    }

    #[test]
    fn movie_identity_from_remote_metadata_from_local() {
        let local = local_movie();
        let remote = Media::Movie(
            Movie::new("Movie Name", Some(2020))
                .with_metadata(Metadata::parse("Other.2160p.REMUX-ELSE")),
        );

        let fused = merge(&local, &remote).unwrap();
        let movie = fused.as_movie().unwrap();
        assert_eq!(movie.title(), "Movie Name");
        assert_eq!(movie.year(), Some(2020));
        assert_eq!(movie.metadata(), local.metadata().unwrap());
        assert_eq!(movie.file().unwrap().name(), "movie.name.1080p.x264-GRP.mkv");
    }

    #[test]
    fn unknown_remote_fields_keep_local() {
        let local = Media::Movie(Movie::new("Local Title", Some(1999)));
        let remote = Media::Movie(Movie::new("  ", None));
        let fused = merge(&local, &remote).unwrap();
        assert_eq!(fused.as_movie().unwrap().title(), "Local Title");
        assert_eq!(fused.as_movie().unwrap().year(), Some(1999));
    }

    #[test]
    fn episode_numbers_always_from_remote() {
        let local = Media::Episode(Episode::new("show", 1, 1, "local name"));
        let remote = Media::Episode(Episode::new("Show", 2, 5, ""));
        let fused = merge(&local, &remote).unwrap();
        let episode = fused.as_episode().unwrap();
        assert_eq!(episode.show(), "Show");
        assert_eq!((episode.season(), episode.episode()), (2, 5));
        assert_eq!(episode.name(), "local name");
    }

    #[test]
    fn inputs_are_untouched() {
        let local = local_movie();
        let remote = Media::Movie(Movie::new("Movie Name", Some(2020)));
        let _ = merge(&local, &remote).unwrap();
        assert_eq!(local.as_movie().unwrap().title(), "movie name");
        assert_eq!(local.as_movie().unwrap().year(), None);
        assert!(remote.file().is_none());
    }

    #[test]
    fn mismatched_kinds_fail() {
        let movie = Media::Movie(Movie::new("A", None));
        let episode = Media::Episode(Episode::new("B", 1, 2, ""));
        match merge(&movie, &episode) {
            Err(Error::TypeMismatch { local, remote }) => {
                assert_eq!(local, "movie");
                assert_eq!(remote, "episode");
            }
            other => panic!("expected type mismatch, got {other:?}"),
        }
        assert!(matches!(
            merge(&episode, &movie),
            Err(Error::TypeMismatch { .. })
        ));
    }

    #[test]
    fn subtitles_never_merge() {
        let subtitle = Media::Subtitle(Subtitle::new("en".parse().unwrap(), false));
        let movie = Media::Movie(Movie::new("A", None));
        assert!(matches!(
            merge(&subtitle, &subtitle),
            Err(Error::UnsupportedOperation(_))
        ));
        assert!(matches!(
            merge(&movie, &subtitle),
            Err(Error::UnsupportedOperation(_))
        ));
    }
}
