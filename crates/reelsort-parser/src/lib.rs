//! # reelsort-parser
//!
//! Keyword extraction for media release names.
//!
//! A release name such as `Movie.Name.2020.1080p.BluRay.x264-GROUP` carries
//! its technical metadata as loosely placed keywords. This crate classifies
//! those keywords into canonical tags using priority-ordered tables, and
//! reads the identity part of the name (title, year, episode numbering).
//!
//! ## Quick Start
//!
//! ```
//! use reelsort_parser::{codec, group, quality, source, tags, Codec, Quality, Source};
//!
//! let name = "Movie.Name.2020.1080p.BluRay.x264-GROUP";
//!
//! assert_eq!(group(name), "GROUP");
//! assert_eq!(codec(name), Codec::X264);
//! assert_eq!(quality(name), Quality::Hd1080p);
//! assert_eq!(source(name), Source::BluRay);
//! assert_eq!(tags(name), vec!["1080p", "BluRay", "x264"]);
//! ```
//!
//! Every function is pure and total: any string, including arbitrary
//! Unicode, produces a result.

pub mod keywords;
mod extract;
mod release;
mod types;

pub use extract::{codec, group, quality, source, tags};
pub use keywords::{codec_table, extra_table, quality_table, source_table};
pub use release::parse_release;
pub use types::{Codec, ParseError, Quality, ReleaseInfo, Source};
