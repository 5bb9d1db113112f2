//! Directory cursor: the walker's view of a [`Navigator`].
//!
//! Every call folds `FsError::NotFound` into a `false` result, since hitting a
//! boundary is how the walker discovers the shape of the tree. Other storage
//! errors abort the move with the matching [`MoveStatus`].

use platform::{Direction, EntryKind, FsError, Navigator};

use crate::outcome::MoveStatus;

/// `Ok(true)` on success, `Ok(false)` on `NotFound`, `Err` otherwise.
fn found(result: Result<(), FsError>) -> Result<bool, MoveStatus> {
    match result {
        Ok(()) => Ok(true),
        Err(FsError::NotFound) => Ok(false),
        Err(e) => Err(e.into()),
    }
}

/// Borrowing adapter over a [`Navigator`] with the session's extension
/// filter.
pub struct DirectoryCursor<'a, N: Navigator> {
    nav: &'a mut N,
    filter: &'a str,
}

impl<'a, N: Navigator> DirectoryCursor<'a, N> {
    /// Wrap `nav`; files must pass `filter` to be playable.
    pub fn new(nav: &'a mut N, filter: &'a str) -> Self {
        Self { nav, filter }
    }

    /// Select the first (`Next`) or last (`Prev`) entry of `kind`.
    pub fn select_limit(
        &mut self,
        kind: EntryKind,
        direction: Direction,
    ) -> Result<bool, MoveStatus> {
        found(match direction {
            Direction::Next => self.nav.select_first(kind),
            Direction::Prev => self.nav.select_last(kind),
        })
    }

    /// Move the selection by one entry.
    pub fn step(&mut self, direction: Direction) -> Result<bool, MoveStatus> {
        found(self.nav.step(direction))
    }

    /// Enter the selected directory.
    pub fn enter(&mut self) -> Result<bool, MoveStatus> {
        found(self.nav.enter_dir())
    }

    /// Go to the parent directory, selecting the directory just left.
    pub fn parent(&mut self) -> Result<bool, MoveStatus> {
        found(self.nav.goto_parent())
    }

    /// Mount the selected drive.
    pub fn mount(&mut self) -> Result<bool, MoveStatus> {
        match self.nav.mount() {
            Ok(()) => Ok(true),
            Err(FsError::NoDisk | FsError::NotFound) => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    /// Select drive `drive` (not mounted yet).
    pub fn select_drive(&mut self, drive: u8) -> Result<bool, MoveStatus> {
        found(self.nav.select_drive(drive))
    }

    /// Number of drives.
    pub fn drive_count(&self) -> u8 {
        self.nav.drive_count()
    }

    /// Current drive.
    pub fn drive(&self) -> u8 {
        self.nav.drive()
    }

    /// Clear the selection.
    pub fn reset(&mut self) {
        self.nav.reset_selection();
    }

    /// `true` when an entry is selected.
    pub fn has_selection(&self) -> bool {
        self.nav.has_selection()
    }

    /// `true` when the selection is a directory.
    pub fn is_dir(&self) -> bool {
        self.nav.is_dir()
    }

    /// `true` when the selection is a file passing the filter.
    pub fn is_playable(&self) -> bool {
        self.nav.has_selection() && !self.nav.is_dir() && self.nav.check_extension(self.filter)
    }

    /// Capture the current position.
    pub fn index(&self) -> N::Index {
        self.nav.index()
    }

    /// Return to a captured position.
    pub fn goto_index(&mut self, index: &N::Index) -> Result<(), MoveStatus> {
        self.nav.goto_index(index).map_err(MoveStatus::from)
    }

    /// Count the playable files of the current directory; the selection is
    /// left on the first of them (or cleared when there is none).
    pub fn count_files(&mut self) -> Result<u16, MoveStatus> {
        let mut count: u16 = 0;
        if !self.select_limit(EntryKind::File, Direction::Next)? {
            self.reset();
            return Ok(0);
        }
        loop {
            if self.is_playable() {
                count = count.saturating_add(1);
            }
            if !self.step(Direction::Next)? {
                break;
            }
        }
        if !self.select_limit(EntryKind::File, Direction::Next)? {
            self.reset();
        }
        while self.has_selection() && !self.is_playable() {
            if !self.step(Direction::Next)? {
                self.reset();
            }
        }
        Ok(count)
    }

    /// Depth of the current directory below the drive root; the position is
    /// restored afterwards.
    pub fn depth(&mut self) -> Result<u16, MoveStatus> {
        let here = self.index();
        let mut depth: u16 = 0;
        while self.parent()? {
            depth = depth.saturating_add(1);
        }
        self.goto_index(&here)?;
        Ok(depth)
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
    use platform::mocks::MockVolume;

    #[test]
    fn test_not_found_is_false() {
        let mut v = MockVolume::new().with_drive(&["/a.mp3"]);
        let mut c = DirectoryCursor::new(&mut v, "mp3");
        assert!(!c.select_limit(EntryKind::Dir, Direction::Next).unwrap());
        assert!(c.select_limit(EntryKind::File, Direction::Next).unwrap());
        assert!(c.is_playable());
        assert!(!c.step(Direction::Next).unwrap());
        assert!(!c.parent().unwrap());
    }

    #[test]
    fn test_no_disk_is_error() {
        let mut v = MockVolume::new().with_drive(&["/a.mp3"]);
        v.eject(0);
        let mut c = DirectoryCursor::new(&mut v, "mp3");
        assert_eq!(c.step(Direction::Next), Err(MoveStatus::NoDiskPresent));
        assert!(!c.mount().unwrap());
    }

    #[test]
    fn test_count_files_skips_filtered() {
        let mut v = MockVolume::new().with_drive(&["/d/x.mp3", "/cover.jpg", "/a.mp3", "/b.mp3"]);
        let mut c = DirectoryCursor::new(&mut v, "mp3");
        assert_eq!(c.count_files().unwrap(), 2);
        assert!(c.is_playable());
        drop(c);
        assert_eq!(v.selected_path().as_deref(), Some("/a.mp3"));
    }

    #[test]
    fn test_depth_restores_position() {
        let mut v = MockVolume::new().with_drive(&["/a/b/c/1.mp3"]);
        v.select_path_abs("/a/b/c/1.mp3").unwrap();
        let mut c = DirectoryCursor::new(&mut v, "mp3");
        assert_eq!(c.depth().unwrap(), 3);
        drop(c);
        assert_eq!(v.selected_path().as_deref(), Some("/a/b/c/1.mp3"));
    }
}
