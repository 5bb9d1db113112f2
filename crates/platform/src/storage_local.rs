//! Local filesystem Navigator implementation for host tooling.
//!
//! `LocalVolume` implements [`Navigator`] using `std::fs`.
//! Used when the `std` feature is enabled (xtask and host tests only).
//! Each root directory handed to [`LocalVolume::new`] becomes one drive.
//!
//! Directory listings are read when a directory becomes current and sorted by
//! name, sub-directories before files, so the traversal order is stable across
//! hosts.

use std::fs;
use std::path::{Path, PathBuf};

use crate::storage::{
    extension_matches, is_absolute, path_components, Direction, EntryKind, FsError, Line,
    Navigator,
};

/// Error wrapper used when building a [`LocalVolume`].
#[derive(Debug)]
pub struct LocalStorageError(pub std::io::Error);

impl core::fmt::Display for LocalStorageError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "local storage error: {}", self.0)
    }
}

impl std::error::Error for LocalStorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.0)
    }
}

#[derive(Debug, Clone)]
struct LocalEntry {
    name: String,
    is_dir: bool,
}

/// Position token of a [`LocalVolume`]: drive, directory relative to the
/// drive root, and selected entry name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalIndex {
    drive: u8,
    dir: Vec<String>,
    entry: Option<String>,
}

#[derive(Debug)]
struct OpenText {
    index: LocalIndex,
    lines: Vec<String>,
    next: usize,
}

/// A [`Navigator`] over directories of the host filesystem.
///
/// # Example
/// ```ignore
/// use platform::storage_local::LocalVolume;
/// use platform::Navigator;
///
/// let mut volume = LocalVolume::new(["/home/user/Music"]).unwrap();
/// volume.step(platform::Direction::Next).unwrap();
/// ```
#[derive(Debug)]
pub struct LocalVolume {
    roots: Vec<PathBuf>,
    drive: u8,
    dir: Vec<String>,
    listing: Vec<LocalEntry>,
    selected: Option<usize>,
    text: Option<OpenText>,
}

impl LocalVolume {
    /// Create a volume with one drive per root directory, drive 0 mounted.
    ///
    /// # Errors
    ///
    /// Returns the I/O error of the first root that cannot be listed.
    pub fn new<I, P>(roots: I) -> Result<Self, LocalStorageError>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let roots: Vec<PathBuf> = roots.into_iter().map(|p| p.as_ref().to_path_buf()).collect();
        for root in &roots {
            fs::read_dir(root).map_err(LocalStorageError)?;
        }
        let mut volume = Self {
            roots,
            drive: 0,
            dir: Vec::new(),
            listing: Vec::new(),
            selected: None,
            text: None,
        };
        // An empty root list leaves an empty listing; every operation then
        // reports NoDisk.
        let _ = volume.reload();
        Ok(volume)
    }

    /// Host path of the selected entry.
    pub fn selected_path(&self) -> Option<PathBuf> {
        let entry = self.listing.get(self.selected?)?;
        Some(self.dir_path().join(&entry.name))
    }

    /// Host path of the current directory.
    pub fn dir_path(&self) -> PathBuf {
        let mut path = self
            .roots
            .get(usize::from(self.drive))
            .cloned()
            .unwrap_or_default();
        for part in &self.dir {
            path.push(part);
        }
        path
    }

    fn root(&self) -> Result<&Path, FsError> {
        self.roots
            .get(usize::from(self.drive))
            .map(PathBuf::as_path)
            .ok_or(FsError::NoDisk)
    }

    /// Read and sort the listing of the current directory.
    fn reload(&mut self) -> Result<(), FsError> {
        let dir = self.dir_path();
        self.root()?;
        let reader = fs::read_dir(&dir).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => FsError::NoDisk,
            _ => FsError::Disk,
        })?;
        let mut listing = Vec::new();
        for entry in reader {
            let entry = entry.map_err(|_| FsError::Disk)?;
            let Ok(name) = entry.file_name().into_string() else {
                continue;
            };
            let is_dir = entry.file_type().map_err(|_| FsError::Disk)?.is_dir();
            listing.push(LocalEntry { name, is_dir });
        }
        listing.sort_by(|a, b| b.is_dir.cmp(&a.is_dir).then_with(|| a.name.cmp(&b.name)));
        self.listing = listing;
        self.selected = None;
        Ok(())
    }

    fn dir_count(&self) -> usize {
        self.listing.iter().take_while(|e| e.is_dir).count()
    }

    fn find(&self, name: &str) -> Option<usize> {
        self.listing
            .iter()
            .position(|e| e.name == name)
            .or_else(|| self.listing.iter().position(|e| e.name.eq_ignore_ascii_case(name)))
    }

    fn goto_dir(&mut self, drive: u8, dir: Vec<String>) -> Result<(), FsError> {
        let saved = (self.drive, core::mem::replace(&mut self.dir, dir));
        self.drive = drive;
        if let Err(e) = self.reload() {
            self.drive = saved.0;
            self.dir = saved.1;
            let _ = self.reload();
            return Err(e);
        }
        Ok(())
    }
}

impl Navigator for LocalVolume {
    type Index = LocalIndex;

    fn drive_count(&self) -> u8 {
        u8::try_from(self.roots.len()).unwrap_or(u8::MAX)
    }

    fn drive(&self) -> u8 {
        self.drive
    }

    fn select_drive(&mut self, drive: u8) -> Result<(), FsError> {
        if drive >= self.drive_count() {
            return Err(FsError::NotFound);
        }
        self.drive = drive;
        self.dir.clear();
        self.listing.clear();
        self.selected = None;
        Ok(())
    }

    fn mount(&mut self) -> Result<(), FsError> {
        self.dir.clear();
        self.reload()
    }

    fn goto_root(&mut self) -> Result<(), FsError> {
        self.goto_dir(self.drive, Vec::new())
    }

    fn reset_selection(&mut self) {
        self.selected = None;
    }

    fn has_selection(&self) -> bool {
        self.selected.is_some_and(|i| i < self.listing.len())
    }

    fn is_dir(&self) -> bool {
        self.selected
            .and_then(|i| self.listing.get(i))
            .is_some_and(|e| e.is_dir)
    }

    fn check_extension(&self, filter: &str) -> bool {
        self.selected
            .and_then(|i| self.listing.get(i))
            .is_some_and(|e| !e.is_dir && extension_matches(&e.name, filter))
    }

    fn select_first(&mut self, kind: EntryKind) -> Result<(), FsError> {
        self.root()?;
        let dirs = self.dir_count();
        let target = match kind {
            EntryKind::Dir if dirs > 0 => 0,
            EntryKind::File if self.listing.len() > dirs => dirs,
            _ => return Err(FsError::NotFound),
        };
        self.selected = Some(target);
        Ok(())
    }

    fn select_last(&mut self, kind: EntryKind) -> Result<(), FsError> {
        self.root()?;
        let dirs = self.dir_count();
        let target = match kind {
            EntryKind::Dir => dirs.checked_sub(1),
            EntryKind::File if self.listing.len() > dirs => self.listing.len().checked_sub(1),
            EntryKind::File => None,
        };
        self.selected = Some(target.ok_or(FsError::NotFound)?);
        Ok(())
    }

    fn step(&mut self, direction: Direction) -> Result<(), FsError> {
        self.root()?;
        let len = self.listing.len();
        let target = match (self.selected, direction) {
            (None, Direction::Next) => (len > 0).then_some(0),
            (None, Direction::Prev) => len.checked_sub(1),
            (Some(i), Direction::Next) => i.checked_add(1).filter(|&n| n < len),
            (Some(i), Direction::Prev) => i.checked_sub(1).filter(|&n| n < len),
        };
        self.selected = Some(target.ok_or(FsError::NotFound)?);
        Ok(())
    }

    fn enter_dir(&mut self) -> Result<(), FsError> {
        let entry = self
            .selected
            .and_then(|i| self.listing.get(i))
            .filter(|e| e.is_dir)
            .ok_or(FsError::NotFound)?;
        let mut dir = self.dir.clone();
        dir.push(entry.name.clone());
        self.goto_dir(self.drive, dir)
    }

    fn goto_parent(&mut self) -> Result<(), FsError> {
        let mut dir = self.dir.clone();
        let left = dir.pop().ok_or(FsError::NotFound)?;
        self.goto_dir(self.drive, dir)?;
        self.selected = self.find(&left);
        Ok(())
    }

    fn index(&self) -> LocalIndex {
        LocalIndex {
            drive: self.drive,
            dir: self.dir.clone(),
            entry: self
                .selected
                .and_then(|i| self.listing.get(i))
                .map(|e| e.name.clone()),
        }
    }

    fn goto_index(&mut self, index: &LocalIndex) -> Result<(), FsError> {
        if self.drive != index.drive || self.dir != index.dir {
            self.goto_dir(index.drive, index.dir.clone())?;
        }
        self.selected = match &index.entry {
            Some(name) => Some(self.find(name).ok_or(FsError::NotFound)?),
            None => None,
        };
        Ok(())
    }

    fn open_text(&mut self) -> Result<(), FsError> {
        let path = self.selected_path().ok_or(FsError::NotFound)?;
        if self.is_dir() {
            return Err(FsError::NotFound);
        }
        let bytes = fs::read(&path).map_err(|_| FsError::Disk)?;
        let content = String::from_utf8_lossy(&bytes);
        self.text = Some(OpenText {
            index: self.index(),
            lines: content
                .lines()
                .map(|l| l.trim_end_matches('\r').to_owned())
                .collect(),
            next: 0,
        });
        Ok(())
    }

    fn rewind_text(&mut self) -> Result<(), FsError> {
        let text = self.text.as_mut().ok_or(FsError::NotOpen)?;
        text.next = 0;
        Ok(())
    }

    fn read_line(&mut self, line: &mut Line) -> Result<bool, FsError> {
        let text = self.text.as_mut().ok_or(FsError::NotOpen)?;
        line.clear();
        let Some(src) = text.lines.get(text.next) else {
            return Ok(false);
        };
        text.next = text.next.saturating_add(1);
        for c in src.chars() {
            if line.push(c).is_err() {
                break;
            }
        }
        Ok(true)
    }

    fn close_text(&mut self) {
        if let Some(text) = self.text.take() {
            let _ = self.goto_index(&text.index);
        }
    }

    fn select_path(&mut self, path: &str) -> Result<(), FsError> {
        let (drive, base) = match &self.text {
            Some(t) => (t.index.drive, t.index.dir.clone()),
            None => (self.drive, self.dir.clone()),
        };
        let mut dir = if is_absolute(path) { Vec::new() } else { base };
        let parts: Vec<&str> = path_components(path).collect();
        let Some((last, parents)) = parts.split_last() else {
            self.selected = None;
            return Err(FsError::InvalidPath);
        };
        for part in parents {
            if *part == ".." {
                if dir.pop().is_none() {
                    self.selected = None;
                    return Err(FsError::NotFound);
                }
            } else {
                dir.push((*part).to_owned());
            }
        }
        if let Err(e) = self.goto_dir(drive, dir) {
            self.selected = None;
            return Err(if e == FsError::NoDisk { FsError::NotFound } else { e });
        }
        self.selected = self.find(last);
        if self.selected.is_none() {
            return Err(FsError::NotFound);
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::indexing_slicing
)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn touch(root: &Path, rel: &str) {
        let path = root.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, b"").unwrap();
    }

    #[test]
    fn local_volume_sorts_dirs_first() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "b.mp3");
        touch(tmp.path(), "a.mp3");
        touch(tmp.path(), "Z/1.mp3");
        let mut v = LocalVolume::new([tmp.path()]).unwrap();
        v.step(Direction::Next).unwrap();
        assert!(v.is_dir());
        v.step(Direction::Next).unwrap();
        assert!(v.selected_path().unwrap().ends_with("a.mp3"));
        assert!(v.check_extension("mp3"));
    }

    #[test]
    fn local_volume_enter_and_parent() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "A/1.mp3");
        touch(tmp.path(), "B/2.mp3");
        let mut v = LocalVolume::new([tmp.path()]).unwrap();
        v.select_last(EntryKind::Dir).unwrap();
        v.enter_dir().unwrap();
        v.select_first(EntryKind::File).unwrap();
        assert!(v.selected_path().unwrap().ends_with("2.mp3"));
        v.goto_parent().unwrap();
        assert!(v.selected_path().unwrap().ends_with("B"));
        assert_eq!(v.goto_parent(), Err(FsError::NotFound));
    }

    #[test]
    fn local_volume_missing_root_is_error() {
        let tmp = TempDir::new().unwrap();
        assert!(LocalVolume::new([tmp.path().join("nope")]).is_err());
    }

    #[test]
    fn local_volume_playlist_paths() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "music/a.mp3");
        fs::write(tmp.path().join("music/list.m3u"), b"a.mp3\r\n/music/a.mp3\n").unwrap();
        let mut v = LocalVolume::new([tmp.path()]).unwrap();
        v.goto_index(&LocalIndex {
            drive: 0,
            dir: vec!["music".to_owned()],
            entry: Some("list.m3u".to_owned()),
        })
        .unwrap();
        v.open_text().unwrap();
        let mut line = Line::new();
        assert!(v.read_line(&mut line).unwrap());
        assert_eq!(line.as_str(), "a.mp3");
        v.select_path(line.as_str()).unwrap();
        assert!(v.check_extension("mp3"));
        assert!(v.read_line(&mut line).unwrap());
        v.select_path(line.as_str()).unwrap();
        assert!(v.selected_path().unwrap().ends_with("a.mp3"));
        v.close_text();
        assert!(v.selected_path().unwrap().ends_with("list.m3u"));
    }
}
