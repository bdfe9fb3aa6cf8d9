//! Reelsort-Common: shared types and utilities.
//!
//! This crate provides functionality used across reelsort:
//!
//! - **Error Handling**: the unified [`Error`] type and [`Result`] alias
//! - **Path Utilities**: functions to detect video and subtitle files by extension
//! - **Language Tags**: the [`LanguageTag`] locale identifier carried by subtitles
//!
//! # Examples
//!
//! ```
//! use reelsort_common::{Error, LanguageTag, Result};
//! use reelsort_common::paths::is_video_file;
//! use std::path::Path;
//!
//! assert!(is_video_file(Path::new("movie.mkv")));
//!
//! let tag: LanguageTag = "pt-br".parse().unwrap();
//! assert_eq!(tag.to_string(), "pt-BR");
//!
//! fn example() -> Result<()> {
//!     Err(Error::NoScraper)
//! }
//! assert!(example().is_err());
//! ```

pub mod error;
pub mod language;
pub mod paths;

pub use error::{Error, Result};
pub use language::LanguageTag;
