//! Unified error type for reelsort.
//!
//! Every stage of the rename pipeline funnels its failures into [`Error`].
//! The batch orchestrator inspects the variant to decide whether an item is
//! skipped, counted as failed, or aborts the whole batch.

use std::path::PathBuf;

/// Unified error type covering all failure modes in reelsort.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A file name could not be parsed into a media entity.
    #[error("Parse error: {0}")]
    Parse(String),

    /// Two media values of different kinds were merged.
    #[error("Type mismatch: cannot merge {local} with {remote}")]
    TypeMismatch {
        /// Kind of the locally parsed media.
        local: String,
        /// Kind of the remotely resolved media.
        remote: String,
    },

    /// The operation is not defined for this kind of media.
    #[error("Unsupported operation: {0}")]
    UnsupportedOperation(String),

    /// A scraper cannot handle this kind of media.
    #[error("Media not supported by scraper {scraper}")]
    MediaNotSupported {
        /// Name of the scraper that declined.
        scraper: String,
    },

    /// Every configured scraper declined the media.
    #[error("No scrapers to use for media")]
    NoScraper,

    /// A scraper failed for a reason other than declining the media.
    #[error("Scraper error [{scraper}]: {message}")]
    Scraper {
        /// Name of the scraper that failed.
        scraper: String,
        /// Human-readable error description.
        message: String,
    },

    /// No filename template is configured for this kind of media.
    #[error("Missing template for {0}")]
    TemplateMissing(String),

    /// A filename template is malformed.
    #[error("Template error: {0}")]
    Template(String),

    /// The rename destination already exists and force is off.
    #[error("Media already exists: {}", .0.display())]
    MediaExists(PathBuf),

    /// The link action needs a filesystem path the source does not expose.
    #[error("Can't {action} media without a path")]
    PathUnavailable {
        /// The link action that was requested.
        action: String,
    },

    /// An I/O operation failed.
    #[error("IO error: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },
}

impl Error {
    /// Convenience constructor for [`Error::Parse`].
    pub fn parse(msg: impl Into<String>) -> Self {
        Error::Parse(msg.into())
    }

    /// Convenience constructor for [`Error::TypeMismatch`].
    pub fn type_mismatch(local: impl Into<String>, remote: impl Into<String>) -> Self {
        Error::TypeMismatch {
            local: local.into(),
            remote: remote.into(),
        }
    }

    /// Convenience constructor for [`Error::MediaNotSupported`].
    pub fn not_supported(scraper: impl Into<String>) -> Self {
        Error::MediaNotSupported {
            scraper: scraper.into(),
        }
    }

    /// Convenience constructor for [`Error::Scraper`].
    pub fn scraper(scraper: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Scraper {
            scraper: scraper.into(),
            message: message.into(),
        }
    }

    /// Convenience constructor for [`Error::PathUnavailable`].
    pub fn path_unavailable(action: impl Into<String>) -> Self {
        Error::PathUnavailable {
            action: action.into(),
        }
    }

    /// Returns `true` when a scraper declined the media and the next one
    /// should be tried.
    pub fn is_not_supported(&self) -> bool {
        matches!(self, Error::MediaNotSupported { .. })
    }

    /// Returns `true` for outcomes that mean "nothing to do" rather than a
    /// processing failure.
    pub fn is_skip(&self) -> bool {
        matches!(self, Error::MediaExists(_))
    }
}

/// Result alias using the crate-level [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
