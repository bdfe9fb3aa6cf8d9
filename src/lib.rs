//! Reelsort - media library organizer
//!
//! Turns loosely named release files into a consistently named library:
//! release names are parsed into [`media::Media`], completed by a
//! [`scraper::ScraperChain`], merged, rendered through a filename
//! [`rename::Template`] and placed with a [`rename::LinkAction`]. The
//! [`library::BatchProcessor`] drives a whole directory through that flow.

pub mod config;
pub mod library;
pub mod media;
pub mod rename;
pub mod scraper;
