//! Link strategies and the renamer.
//!
//! A [`LinkAction`] names one of four ways to place a file at its library
//! destination. The action is resolved once into a plain function, and the
//! [`Renamer`] wraps it with the destination checks shared by all of them.

use std::fmt;
use std::fs::{self, File};
use std::io;
use std::path::Path;
use std::str::FromStr;

use reelsort_common::{Error, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::media::LocalFile;

/// How a file is placed at its destination.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkAction {
    /// Stream the bytes into a new file.
    #[default]
    Copy,
    /// Rename the source file.
    Move,
    /// Create a symbolic link to the absolute source path.
    Symlink,
    /// Create a hard link to the source file.
    Hardlink,
}

/// A link strategy: place `file` at `dest`, whose parent already exists.
pub type LinkFn = fn(&dyn LocalFile, &Path) -> Result<()>;

impl LinkAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            LinkAction::Copy => "copy",
            LinkAction::Move => "move",
            LinkAction::Symlink => "symlink",
            LinkAction::Hardlink => "hardlink",
        }
    }

    /// Returns `true` when the action needs a filesystem path for the source.
    pub fn needs_path(&self) -> bool {
        !matches!(self, LinkAction::Copy)
    }

    /// The function implementing this action.
    pub fn strategy(&self) -> LinkFn {
        match self {
            LinkAction::Copy => copy_file,
            LinkAction::Move => move_file,
            LinkAction::Symlink => symlink_file,
            LinkAction::Hardlink => hardlink_file,
        }
    }
}

impl fmt::Display for LinkAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LinkAction {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "copy" => Ok(LinkAction::Copy),
            "move" => Ok(LinkAction::Move),
            "symlink" => Ok(LinkAction::Symlink),
            "hardlink" => Ok(LinkAction::Hardlink),
            _ => Err(Error::parse(format!("{s}: unknown action"))),
        }
    }
}

fn source_path(file: &dyn LocalFile, action: LinkAction) -> Result<&Path> {
    file.path()
        .ok_or_else(|| Error::path_unavailable(action.as_str()))
}

fn copy_file(file: &dyn LocalFile, dest: &Path) -> Result<()> {
    let mut reader = file.open()?;
    let mut out = File::create(dest)?;
    let copied = io::copy(&mut reader, &mut out).and_then(|_| out.sync_all());
    drop(out);

    if let Err(err) = copied {
        // Leave no truncated file behind.
        let _ = fs::remove_file(dest);
        return Err(err.into());
    }
    debug!(path = %dest.display(), "Media copied");
    Ok(())
}

fn move_file(file: &dyn LocalFile, dest: &Path) -> Result<()> {
    let source = source_path(file, LinkAction::Move)?;
    fs::rename(source, dest)?;
    debug!(path = %dest.display(), "Media moved");
    Ok(())
}

fn symlink_file(file: &dyn LocalFile, dest: &Path) -> Result<()> {
    let source = std::path::absolute(source_path(file, LinkAction::Symlink)?)?;
    #[cfg(unix)]
    std::os::unix::fs::symlink(&source, dest)?;
    #[cfg(windows)]
    std::os::windows::fs::symlink_file(&source, dest)?;
    debug!(path = %dest.display(), target = %source.display(), "Media symlinked");
    Ok(())
}

fn hardlink_file(file: &dyn LocalFile, dest: &Path) -> Result<()> {
    let source = source_path(file, LinkAction::Hardlink)?;
    fs::hard_link(source, dest)?;
    debug!(path = %dest.display(), "Media hardlinked");
    Ok(())
}

/// Whether `dest` resolves to the file backing `file`, however either path
/// is spelled.
fn is_same_file(file: &dyn LocalFile, dest: &Path) -> bool {
    let Some(source) = file.path() else {
        return false;
    };
    match (fs::canonicalize(source), fs::canonicalize(dest)) {
        (Ok(source), Ok(dest)) => source == dest,
        _ => false,
    }
}

/// Places files at their destination with a fixed link action.
#[derive(Clone, Copy)]
pub struct Renamer {
    action: LinkAction,
    link: LinkFn,
    force: bool,
}

impl Renamer {
    /// Create a renamer; with `force` an existing destination is replaced.
    pub fn new(action: LinkAction, force: bool) -> Self {
        Self {
            action,
            link: action.strategy(),
            force,
        }
    }

    pub fn action(&self) -> LinkAction {
        self.action
    }

    pub fn force(&self) -> bool {
        self.force
    }

    /// Place `file` at `dest`.
    ///
    /// An existing destination (a dangling symlink included) is an
    /// [`Error::MediaExists`] unless force is on, in which case it is removed
    /// first. Missing parent directories are created.
    pub fn rename(&self, file: &dyn LocalFile, dest: &Path) -> Result<()> {
        let exists = match fs::symlink_metadata(dest) {
            Ok(_) => true,
            Err(err) if err.kind() == io::ErrorKind::NotFound => false,
            Err(err) => return Err(err.into()),
        };

        if exists && !self.force {
            return Err(Error::MediaExists(dest.to_path_buf()));
        }

        // Check before removing anything: a forced rename that cannot run
        // must leave the existing file in place.
        if self.action.needs_path() {
            source_path(file, self.action)?;
        }
        if exists && is_same_file(file, dest) {
            debug!(path = %dest.display(), "Media already in place");
            return Ok(());
        }

        if exists {
            fs::remove_file(dest)?;
            debug!(path = %dest.display(), "Removed existing media");
        }

        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)?;
        }
        (self.link)(file, dest)
    }
}

impl fmt::Debug for Renamer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Renamer")
            .field("action", &self.action)
            .field("force", &self.force)
            .finish()
    }
}
