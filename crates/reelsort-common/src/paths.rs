//! Path utilities for detecting media files by extension.
//!
//! These are used by the library scanner and by media construction to decide
//! whether a file is a video, a subtitle, or something to ignore.

use std::path::Path;

/// List of supported video file extensions.
const VIDEO_EXTENSIONS: &[&str] = &[
    "avi", "mkv", "mp4", "m4v", "flv", "mov", "wmv", "webm", "mpg", "mpeg", "ts",
];

/// List of supported subtitle file extensions.
const SUBTITLE_EXTENSIONS: &[&str] = &["srt", "ass", "ssa", "sub", "vtt"];

fn has_extension(path: &Path, set: &[&str]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| set.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

/// Check if a path has a video file extension.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use reelsort_common::paths::is_video_file;
///
/// assert!(is_video_file(Path::new("movie.mkv")));
/// assert!(is_video_file(Path::new("/path/to/video.MP4")));
/// assert!(!is_video_file(Path::new("subtitle.srt")));
/// ```
pub fn is_video_file(path: &Path) -> bool {
    has_extension(path, VIDEO_EXTENSIONS)
}

/// Check if a path has a subtitle file extension.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use reelsort_common::paths::is_subtitle_file;
///
/// assert!(is_subtitle_file(Path::new("movie.en.srt")));
/// assert!(!is_subtitle_file(Path::new("video.mkv")));
/// ```
pub fn is_subtitle_file(path: &Path) -> bool {
    has_extension(path, SUBTITLE_EXTENSIONS)
}

/// Returns the extension of `name` including the leading dot, or an empty
/// string when there is none.
///
/// ```
/// use reelsort_common::paths::dotted_extension;
///
/// assert_eq!(dotted_extension("Movie.2020.mkv"), ".mkv");
/// assert_eq!(dotted_extension("README"), "");
/// ```
pub fn dotted_extension(name: &str) -> String {
    Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| format!(".{ext}"))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_video_file() {
        for ext in VIDEO_EXTENSIONS {
            assert!(is_video_file(Path::new(&format!("movie.{ext}"))));
        }

        // Case insensitive
        assert!(is_video_file(Path::new("movie.MKV")));
        assert!(is_video_file(Path::new("movie.Mp4")));

        // With paths
        assert!(is_video_file(Path::new("/path/to/movie.mkv")));
        assert!(is_video_file(Path::new("relative/path/movie.mp4")));

        // Not video files
        assert!(!is_video_file(Path::new("subtitle.srt")));
        assert!(!is_video_file(Path::new("image.jpg")));
        assert!(!is_video_file(Path::new("no_extension")));
    }

    #[test]
    fn test_is_subtitle_file() {
        assert!(is_subtitle_file(Path::new("movie.srt")));
        assert!(is_subtitle_file(Path::new("movie.ass")));
        assert!(is_subtitle_file(Path::new("movie.vtt")));
        assert!(is_subtitle_file(Path::new("movie.SRT")));

        assert!(!is_subtitle_file(Path::new("movie.mkv")));
        assert!(!is_subtitle_file(Path::new("no_extension")));
    }

    #[test]
    fn test_dotted_extension() {
        assert_eq!(dotted_extension("Show.S01E02.en.srt"), ".srt");
        assert_eq!(dotted_extension("a.b.MKV"), ".MKV");
        assert_eq!(dotted_extension(""), "");
    }
}
