//! Storage abstraction for file systems
//!
//! The navigation engine never touches clusters or directory entries itself.
//! It drives a [`Navigator`]: a cursor over one mounted volume that can select
//! entries of the current directory, enter and leave directories, switch
//! drives and read a play-list file line by line.
//!
//! # Listing model
//!
//! Inside a directory the file list enumerates every sub-directory first and
//! every file afterwards (the FAT navigator convention):
//!
//! ```text
//! [dir 0] [dir 1] ... [dir n] [file 0] [file 1] ... [file m]
//! ```
//!
//! [`Navigator::step`] walks that combined list one entry at a time, while
//! [`Navigator::select_first`] / [`Navigator::select_last`] jump to the first or
//! last entry of one [`EntryKind`].

use heapless::String;

/// Maximum length in bytes of one play-list line handed to the engine.
pub const LINE_CAPACITY: usize = 256;

/// One line of a play-list file.
pub type Line = String<LINE_CAPACITY>;

/// Direction of a move through a file list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    /// Towards the end of the list.
    Next,
    /// Towards the beginning of the list.
    Prev,
}

impl Direction {
    /// The opposite direction.
    #[must_use]
    pub const fn reverse(self) -> Self {
        match self {
            Self::Next => Self::Prev,
            Self::Prev => Self::Next,
        }
    }

    /// `true` for [`Direction::Next`].
    #[must_use]
    pub const fn is_next(self) -> bool {
        matches!(self, Self::Next)
    }
}

/// Kind of directory entry targeted by a selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EntryKind {
    /// A regular file.
    File,
    /// A sub-directory.
    Dir,
}

/// File system errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FsError {
    /// No entry matches (end of list, empty directory, missing path, root reached).
    NotFound,
    /// The drive is absent or cannot be mounted.
    NoDisk,
    /// The medium returned a read error.
    Disk,
    /// A text operation was issued without an open play-list file.
    NotOpen,
    /// The path or entry name cannot be represented.
    InvalidPath,
}

impl FsError {
    /// `true` when the error only means "nothing there" and the caller may
    /// fall back to another strategy.
    #[must_use]
    pub const fn is_not_found(self) -> bool {
        matches!(self, Self::NotFound)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for FsError {}

impl core::fmt::Display for FsError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::NotFound => write!(f, "Entry not found"),
            Self::NoDisk => write!(f, "No disk present"),
            Self::Disk => write!(f, "Disk read error"),
            Self::NotOpen => write!(f, "No play-list file open"),
            Self::InvalidPath => write!(f, "Invalid path"),
        }
    }
}

/// Cursor over the mounted volumes.
///
/// All operations are synchronous; the caller serialises access. A failing
/// selection operation leaves the previous selection in place.
pub trait Navigator {
    /// Opaque position token: drive, directory and selected entry.
    type Index: Clone + PartialEq + core::fmt::Debug;

    // ── Drives ──────────────────────────────────────────────────────────

    /// Number of drives known to the navigator.
    fn drive_count(&self) -> u8;

    /// Currently selected drive.
    fn drive(&self) -> u8;

    /// Select drive `drive` without mounting it.
    ///
    /// Returns `Err(FsError::NotFound)` when `drive >= drive_count()`.
    fn select_drive(&mut self, drive: u8) -> Result<(), FsError>;

    /// Mount the selected drive and go to its root with nothing selected.
    fn mount(&mut self) -> Result<(), FsError>;

    /// Go to the root directory of the current drive, nothing selected.
    fn goto_root(&mut self) -> Result<(), FsError>;

    // ── File list of the current directory ─────────────────────────────

    /// Clear the selection; the directory stays current.
    fn reset_selection(&mut self);

    /// `true` when an entry is selected.
    fn has_selection(&self) -> bool;

    /// `true` when the selected entry is a directory.
    fn is_dir(&self) -> bool;

    /// `true` when the selected entry is a file whose extension passes `filter`.
    fn check_extension(&self, filter: &str) -> bool;

    /// Select the first entry of `kind` in the current directory.
    fn select_first(&mut self, kind: EntryKind) -> Result<(), FsError>;

    /// Select the last entry of `kind` in the current directory.
    fn select_last(&mut self, kind: EntryKind) -> Result<(), FsError>;

    /// Select the neighbouring entry. With nothing selected, `Next` selects the
    /// first entry and `Prev` the last one.
    fn step(&mut self, direction: Direction) -> Result<(), FsError>;

    // ── Directory tree ──────────────────────────────────────────────────

    /// Enter the selected directory; nothing is selected afterwards.
    fn enter_dir(&mut self) -> Result<(), FsError>;

    /// Go to the parent directory and select the directory just left.
    ///
    /// Returns `Err(FsError::NotFound)` at the root of the drive.
    fn goto_parent(&mut self) -> Result<(), FsError>;

    /// Capture the current position.
    fn index(&self) -> Self::Index;

    /// Return to a position captured with [`Navigator::index`].
    fn goto_index(&mut self, index: &Self::Index) -> Result<(), FsError>;

    // ── Play-list text access ───────────────────────────────────────────

    /// Open the selected file for line reading.
    fn open_text(&mut self) -> Result<(), FsError>;

    /// Go back to the first line of the open file.
    fn rewind_text(&mut self) -> Result<(), FsError>;

    /// Read the next line (without terminator) into `line`.
    ///
    /// Returns `Ok(false)` at end of file. Lines longer than
    /// [`LINE_CAPACITY`] are truncated.
    fn read_line(&mut self, line: &mut Line) -> Result<bool, FsError>;

    /// Close the open file and re-select it in its directory.
    fn close_text(&mut self);

    /// Select the entry named by `path`, relative to the directory of the open
    /// text file (or to the drive root when `path` starts with a separator).
    ///
    /// A dead path clears the selection and returns `Err(FsError::NotFound)`.
    fn select_path(&mut self, path: &str) -> Result<(), FsError>;
}

/// Returns `true` when `name` has an extension listed in `filter`.
///
/// `filter` is a comma-separated list such as `"mp3,wav"`; comparison is
/// ASCII case-insensitive. An empty filter or `"*"` accepts any name.
pub fn extension_matches(name: &str, filter: &str) -> bool {
    let filter = filter.trim();
    if filter.is_empty() || filter == "*" {
        return true;
    }
    let Some((_, ext)) = name.rsplit_once('.') else {
        return false;
    };
    filter
        .split(',')
        .map(str::trim)
        .any(|wanted| !wanted.is_empty() && wanted.eq_ignore_ascii_case(ext))
}

/// Split a play-list path into its components, accepting `/` and `\`.
pub fn path_components(path: &str) -> impl Iterator<Item = &str> {
    path.split(['/', '\\']).filter(|c| !c.is_empty() && *c != ".")
}

/// `true` when `path` is anchored at the drive root.
pub fn is_absolute(path: &str) -> bool {
    path.starts_with(['/', '\\'])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_single() {
        assert!(extension_matches("song.mp3", "mp3"));
        assert!(!extension_matches("song.wav", "mp3"));
    }

    #[test]
    fn test_extension_list_case_insensitive() {
        assert!(extension_matches("SONG.MP3", "wav, mp3"));
        assert!(extension_matches("a.Wav", "wav,mp3"));
        assert!(!extension_matches("cover.jpg", "wav,mp3"));
    }

    #[test]
    fn test_extension_wildcard() {
        assert!(extension_matches("anything.bin", "*"));
        assert!(extension_matches("noext", ""));
    }

    #[test]
    fn test_extension_missing() {
        assert!(!extension_matches("README", "mp3"));
    }

    #[test]
    fn test_path_components_mixed_separators() {
        let parts: heapless::Vec<&str, 4> = path_components("\\Music/./Album\\01.mp3").collect();
        assert_eq!(parts.as_slice(), &["Music", "Album", "01.mp3"]);
    }

    #[test]
    fn test_direction_reverse() {
        assert_eq!(Direction::Next.reverse(), Direction::Prev);
        assert!(Direction::Next.is_next());
        assert!(!Direction::Prev.is_next());
    }
}
