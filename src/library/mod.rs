//! Library scanning and batch renaming.

pub mod batch;
pub mod scan;

pub use batch::{BatchPolicy, BatchProcessor, BatchReport, ItemOutcome, ItemStatus};
pub use scan::{scan_directory, ScanOutcome};
