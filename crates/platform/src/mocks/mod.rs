//! Mock implementations for testing
//!
//! [`MockVolume`] is an in-memory [`Navigator`] with any number of drives.
//! Trees are declared with slash-separated paths:
//!
//! ```ignore
//! use platform::mocks::MockVolume;
//!
//! let volume = MockVolume::new()
//!     .with_drive(&["/A/1.mp3", "/A/2.mp3", "/B/3.mp3", "/empty/"]);
//! assert_eq!(volume.drive_paths(0).len(), 3);
//! ```
//!
//! A path ending with `/` declares an empty directory. Entries keep their
//! declaration order, directories listed before files.

#![cfg(any(test, feature = "std"))]

use crate::storage::{
    is_absolute, path_components, Direction, EntryKind, FsError, Line, Navigator,
};

#[derive(Debug, Clone)]
struct MockFile {
    name: String,
    content: String,
}

#[derive(Debug, Clone)]
struct MockDir {
    name: String,
    parent: Option<usize>,
    dirs: Vec<usize>,
    files: Vec<MockFile>,
}

impl MockDir {
    fn new(name: &str, parent: Option<usize>) -> Self {
        Self {
            name: name.to_owned(),
            parent,
            dirs: Vec::new(),
            files: Vec::new(),
        }
    }

    fn len(&self) -> usize {
        self.dirs.len().saturating_add(self.files.len())
    }
}

#[derive(Debug, Clone)]
struct MockDrive {
    dirs: Vec<MockDir>,
    present: bool,
}

impl MockDrive {
    fn new() -> Self {
        Self {
            dirs: vec![MockDir::new("", None)],
            present: true,
        }
    }

    fn child_dir(&self, dir: usize, name: &str) -> Option<usize> {
        self.dirs.get(dir)?.dirs.iter().copied().find(|&child| {
            self.dirs
                .get(child)
                .is_some_and(|d| d.name.eq_ignore_ascii_case(name))
        })
    }

    fn ensure_dir(&mut self, parent: usize, name: &str) -> usize {
        if let Some(existing) = self.child_dir(parent, name) {
            return existing;
        }
        let id = self.dirs.len();
        self.dirs.push(MockDir::new(name, Some(parent)));
        if let Some(p) = self.dirs.get_mut(parent) {
            p.dirs.push(id);
        }
        id
    }

    fn add_path(&mut self, path: &str, content: &str) {
        let is_dir = path.ends_with('/');
        let parts: Vec<&str> = path_components(path).collect();
        let mut dir = 0;
        for (i, part) in parts.iter().enumerate() {
            let last = i.saturating_add(1) == parts.len();
            if last && !is_dir {
                if let Some(d) = self.dirs.get_mut(dir) {
                    d.files.push(MockFile {
                        name: (*part).to_owned(),
                        content: content.to_owned(),
                    });
                }
            } else {
                dir = self.ensure_dir(dir, part);
            }
        }
    }

    /// Position of `name` in the combined listing of `dir`.
    fn find_entry(&self, dir: usize, name: &str) -> Option<usize> {
        let d = self.dirs.get(dir)?;
        if let Some(pos) = d.dirs.iter().position(|&child| {
            self.dirs
                .get(child)
                .is_some_and(|c| c.name.eq_ignore_ascii_case(name))
        }) {
            return Some(pos);
        }
        d.files
            .iter()
            .position(|f| f.name.eq_ignore_ascii_case(name))
            .and_then(|pos| pos.checked_add(d.dirs.len()))
    }

    fn dir_path(&self, mut dir: usize) -> String {
        let mut parts = Vec::new();
        while let Some(d) = self.dirs.get(dir) {
            match d.parent {
                Some(parent) => {
                    parts.push(d.name.clone());
                    dir = parent;
                }
                None => break,
            }
        }
        parts.reverse();
        let mut out = String::from("/");
        out.push_str(&parts.join("/"));
        out
    }

    fn collect_files(&self, dir: usize, out: &mut Vec<String>) {
        let Some(d) = self.dirs.get(dir) else {
            return;
        };
        let base = self.dir_path(dir);
        for f in &d.files {
            out.push(join(&base, &f.name));
        }
        for &child in &d.dirs {
            self.collect_files(child, out);
        }
    }
}

fn join(base: &str, name: &str) -> String {
    if base.ends_with('/') {
        format!("{base}{name}")
    } else {
        format!("{base}/{name}")
    }
}

#[derive(Debug, Clone)]
struct TextCursor {
    drive: u8,
    dir: usize,
    entry: usize,
    lines: Vec<String>,
    next: usize,
}

/// Position token of a [`MockVolume`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockIndex {
    drive: u8,
    dir: usize,
    entry: Option<usize>,
}

/// In-memory multi-drive volume implementing [`Navigator`].
#[derive(Debug, Clone)]
pub struct MockVolume {
    drives: Vec<MockDrive>,
    drive: u8,
    dir: usize,
    selected: Option<usize>,
    mounted: bool,
    text: Option<TextCursor>,
    parent_calls: usize,
    read_error: bool,
}

impl MockVolume {
    /// Create a volume without drives.
    pub fn new() -> Self {
        Self {
            drives: Vec::new(),
            drive: 0,
            dir: 0,
            selected: None,
            mounted: true,
            text: None,
            parent_calls: 0,
            read_error: false,
        }
    }

    /// Add a drive holding `paths` (files, or empty directories when the path
    /// ends with `/`).
    #[must_use]
    pub fn with_drive(mut self, paths: &[&str]) -> Self {
        let mut drive = MockDrive::new();
        for path in paths {
            drive.add_path(path, "");
        }
        self.drives.push(drive);
        self
    }

    /// Add a text file (typically a play-list) to drive `drive`.
    #[must_use]
    pub fn with_text(mut self, drive: u8, path: &str, content: &str) -> Self {
        if let Some(d) = self.drives.get_mut(usize::from(drive)) {
            d.add_path(path, content);
        }
        self
    }

    /// Simulate removal of the medium in `drive`.
    pub fn eject(&mut self, drive: u8) {
        if let Some(d) = self.drives.get_mut(usize::from(drive)) {
            d.present = false;
        }
        if drive == self.drive {
            self.mounted = false;
        }
    }

    /// Re-insert the medium in `drive`.
    pub fn insert(&mut self, drive: u8) {
        if let Some(d) = self.drives.get_mut(usize::from(drive)) {
            d.present = true;
        }
    }

    /// While `fail` is set every directory and text read reports
    /// [`FsError::Disk`]; the selection is kept.
    pub fn fail_reads(&mut self, fail: bool) {
        self.read_error = fail;
    }

    /// Select `path` on the current drive (absolute, `/`-separated).
    pub fn select_path_abs(&mut self, path: &str) -> Result<(), FsError> {
        self.ready()?;
        self.dir = 0;
        self.selected = None;
        self.resolve_from(0, path)
    }

    /// Absolute path of the selected entry on the current drive.
    pub fn selected_path(&self) -> Option<String> {
        let drive = self.cur_drive()?;
        let d = drive.dirs.get(self.dir)?;
        let sel = self.selected?;
        let base = drive.dir_path(self.dir);
        if let Some(&child) = d.dirs.get(sel) {
            return drive.dirs.get(child).map(|c| join(&base, &c.name));
        }
        sel.checked_sub(d.dirs.len())
            .and_then(|i| d.files.get(i))
            .map(|f| join(&base, &f.name))
    }

    /// Absolute path of the current directory.
    pub fn current_dir(&self) -> String {
        self.cur_drive()
            .map_or_else(|| String::from("/"), |d| d.dir_path(self.dir))
    }

    /// Every file of `drive` in depth-first, files-before-subdirectories order.
    pub fn drive_paths(&self, drive: u8) -> Vec<String> {
        let mut out = Vec::new();
        if let Some(d) = self.drives.get(usize::from(drive)) {
            d.collect_files(0, &mut out);
        }
        out
    }

    /// Number of successful [`Navigator::goto_parent`] calls so far.
    pub fn parent_calls(&self) -> usize {
        self.parent_calls
    }

    fn cur_drive(&self) -> Option<&MockDrive> {
        self.drives.get(usize::from(self.drive))
    }

    fn ready(&self) -> Result<&MockDrive, FsError> {
        match self.cur_drive() {
            Some(_) if self.read_error => Err(FsError::Disk),
            Some(d) if d.present && self.mounted => Ok(d),
            _ => Err(FsError::NoDisk),
        }
    }

    fn cur_dir(&self) -> Result<&MockDir, FsError> {
        self.ready()?.dirs.get(self.dir).ok_or(FsError::Disk)
    }

    fn resolve_from(&mut self, start: usize, path: &str) -> Result<(), FsError> {
        let parts: Vec<&str> = path_components(path).collect();
        let drive = self.ready()?;
        let mut dir = start;
        let Some((last, parents)) = parts.split_last() else {
            return Err(FsError::InvalidPath);
        };
        for part in parents {
            dir = if *part == ".." {
                drive.dirs.get(dir).and_then(|d| d.parent).ok_or(FsError::NotFound)?
            } else {
                drive.child_dir(dir, part).ok_or(FsError::NotFound)?
            };
        }
        let entry = drive.find_entry(dir, last).ok_or(FsError::NotFound)?;
        self.dir = dir;
        self.selected = Some(entry);
        Ok(())
    }
}

impl Default for MockVolume {
    fn default() -> Self {
        Self::new()
    }
}

impl Navigator for MockVolume {
    type Index = MockIndex;

    fn drive_count(&self) -> u8 {
        u8::try_from(self.drives.len()).unwrap_or(u8::MAX)
    }

    fn drive(&self) -> u8 {
        self.drive
    }

    fn select_drive(&mut self, drive: u8) -> Result<(), FsError> {
        if drive >= self.drive_count() {
            return Err(FsError::NotFound);
        }
        self.drive = drive;
        self.dir = 0;
        self.selected = None;
        self.mounted = false;
        Ok(())
    }

    fn mount(&mut self) -> Result<(), FsError> {
        match self.cur_drive() {
            Some(d) if d.present => {
                self.mounted = true;
                self.dir = 0;
                self.selected = None;
                Ok(())
            }
            _ => Err(FsError::NoDisk),
        }
    }

    fn goto_root(&mut self) -> Result<(), FsError> {
        self.ready()?;
        self.dir = 0;
        self.selected = None;
        Ok(())
    }

    fn reset_selection(&mut self) {
        self.selected = None;
    }

    fn has_selection(&self) -> bool {
        match (self.cur_dir(), self.selected) {
            (Ok(d), Some(sel)) => sel < d.len(),
            _ => false,
        }
    }

    fn is_dir(&self) -> bool {
        match (self.cur_dir(), self.selected) {
            (Ok(d), Some(sel)) => sel < d.dirs.len(),
            _ => false,
        }
    }

    fn check_extension(&self, filter: &str) -> bool {
        let (Ok(d), Some(sel)) = (self.cur_dir(), self.selected) else {
            return false;
        };
        sel.checked_sub(d.dirs.len())
            .and_then(|i| d.files.get(i))
            .is_some_and(|f| crate::storage::extension_matches(&f.name, filter))
    }

    fn select_first(&mut self, kind: EntryKind) -> Result<(), FsError> {
        let d = self.cur_dir()?;
        let target = match kind {
            EntryKind::Dir if !d.dirs.is_empty() => 0,
            EntryKind::File if !d.files.is_empty() => d.dirs.len(),
            _ => return Err(FsError::NotFound),
        };
        self.selected = Some(target);
        Ok(())
    }

    fn select_last(&mut self, kind: EntryKind) -> Result<(), FsError> {
        let d = self.cur_dir()?;
        let target = match kind {
            EntryKind::Dir => d.dirs.len().checked_sub(1),
            EntryKind::File if !d.files.is_empty() => d.len().checked_sub(1),
            EntryKind::File => None,
        };
        self.selected = Some(target.ok_or(FsError::NotFound)?);
        Ok(())
    }

    fn step(&mut self, direction: Direction) -> Result<(), FsError> {
        let len = self.cur_dir()?.len();
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
        let d = self.cur_dir()?;
        let child = self
            .selected
            .and_then(|sel| d.dirs.get(sel))
            .copied()
            .ok_or(FsError::NotFound)?;
        self.dir = child;
        self.selected = None;
        Ok(())
    }

    fn goto_parent(&mut self) -> Result<(), FsError> {
        let drive = self.ready()?;
        let parent = drive
            .dirs
            .get(self.dir)
            .and_then(|d| d.parent)
            .ok_or(FsError::NotFound)?;
        let pos = drive
            .dirs
            .get(parent)
            .and_then(|p| p.dirs.iter().position(|&c| c == self.dir))
            .ok_or(FsError::Disk)?;
        self.dir = parent;
        self.selected = Some(pos);
        self.parent_calls = self.parent_calls.saturating_add(1);
        Ok(())
    }

    fn index(&self) -> MockIndex {
        MockIndex {
            drive: self.drive,
            dir: self.dir,
            entry: self.selected,
        }
    }

    fn goto_index(&mut self, index: &MockIndex) -> Result<(), FsError> {
        let drive = self
            .drives
            .get(usize::from(index.drive))
            .ok_or(FsError::NotFound)?;
        if !drive.present {
            return Err(FsError::NoDisk);
        }
        let dir = drive.dirs.get(index.dir).ok_or(FsError::NotFound)?;
        if index.entry.is_some_and(|e| e >= dir.len()) {
            return Err(FsError::NotFound);
        }
        self.drive = index.drive;
        self.mounted = true;
        self.dir = index.dir;
        self.selected = index.entry;
        Ok(())
    }

    fn open_text(&mut self) -> Result<(), FsError> {
        let d = self.cur_dir()?;
        let entry = self.selected.ok_or(FsError::NotFound)?;
        let file = entry
            .checked_sub(d.dirs.len())
            .and_then(|i| d.files.get(i))
            .ok_or(FsError::NotFound)?;
        self.text = Some(TextCursor {
            drive: self.drive,
            dir: self.dir,
            entry,
            lines: file.content.lines().map(str::to_owned).collect(),
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
        if self.read_error {
            return Err(FsError::Disk);
        }
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
            self.drive = text.drive;
            self.mounted = true;
            self.dir = text.dir;
            self.selected = Some(text.entry);
        }
    }

    fn select_path(&mut self, path: &str) -> Result<(), FsError> {
        let (drive, base) = self
            .text
            .as_ref()
            .map_or((self.drive, self.dir), |t| (t.drive, t.dir));
        if drive != self.drive {
            self.drive = drive;
            self.mounted = true;
        }
        let start = if is_absolute(path) { 0 } else { base };
        let result = self.resolve_from(start, path);
        if result.is_err() {
            self.selected = None;
        }
        result
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

    fn tree() -> MockVolume {
        MockVolume::new().with_drive(&["/A/1.mp3", "/A/2.mp3", "/B/3.mp3", "/top.mp3"])
    }

    #[test]
    fn test_root_lists_dirs_before_files() {
        let mut v = tree();
        v.step(Direction::Next).expect("first entry");
        assert!(v.is_dir());
        assert_eq!(v.selected_path().as_deref(), Some("/A"));
        v.select_first(EntryKind::File).expect("first file");
        assert_eq!(v.selected_path().as_deref(), Some("/top.mp3"));
    }

    #[test]
    fn test_step_stops_at_boundary() {
        let mut v = tree();
        v.select_last(EntryKind::File).expect("last file");
        assert_eq!(v.step(Direction::Next), Err(FsError::NotFound));
        assert_eq!(v.selected_path().as_deref(), Some("/top.mp3"));
    }

    #[test]
    fn test_enter_and_parent_round_trip() {
        let mut v = tree();
        v.select_last(EntryKind::Dir).expect("dir B");
        v.enter_dir().expect("enter");
        assert!(!v.has_selection());
        assert_eq!(v.current_dir(), "/B");
        v.goto_parent().expect("parent");
        assert_eq!(v.selected_path().as_deref(), Some("/B"));
        assert_eq!(v.goto_parent(), Err(FsError::NotFound));
    }

    #[test]
    fn test_index_round_trip() {
        let mut v = tree();
        v.select_path_abs("/A/2.mp3").expect("select");
        let idx = v.index();
        v.goto_root().expect("root");
        v.goto_index(&idx).expect("goto");
        assert_eq!(v.selected_path().as_deref(), Some("/A/2.mp3"));
    }

    #[test]
    fn test_eject_reports_no_disk() {
        let mut v = tree();
        v.eject(0);
        assert_eq!(v.step(Direction::Next), Err(FsError::NoDisk));
        assert_eq!(v.mount(), Err(FsError::NoDisk));
    }

    #[test]
    fn test_text_lines_and_relative_paths() {
        let mut v = MockVolume::new()
            .with_drive(&["/music/a.mp3", "/music/b.mp3"])
            .with_text(0, "/music/list.m3u", "#EXTM3U\na.mp3\n../music/b.mp3\n");
        v.select_path_abs("/music/list.m3u").expect("select list");
        v.open_text().expect("open");
        let mut line = Line::new();
        assert!(v.read_line(&mut line).expect("line 1"));
        assert_eq!(line.as_str(), "#EXTM3U");
        assert!(v.read_line(&mut line).expect("line 2"));
        v.select_path(line.as_str()).expect("a.mp3");
        assert_eq!(v.selected_path().as_deref(), Some("/music/a.mp3"));
        assert!(v.read_line(&mut line).expect("line 3"));
        v.select_path(line.as_str()).expect("b.mp3");
        assert_eq!(v.selected_path().as_deref(), Some("/music/b.mp3"));
        assert!(!v.read_line(&mut line).expect("eof"));
        assert_eq!(v.select_path("missing.mp3"), Err(FsError::NotFound));
        assert!(!v.has_selection());
        v.close_text();
        assert_eq!(v.selected_path().as_deref(), Some("/music/list.m3u"));
    }

    #[test]
    fn test_drive_paths_files_first() {
        let v = tree();
        assert_eq!(
            v.drive_paths(0),
            vec!["/top.mp3", "/A/1.mp3", "/A/2.mp3", "/B/3.mp3"]
        );
    }

    #[test]
    fn test_fail_reads_reports_disk_error() {
        let mut v = tree();
        v.step(Direction::Next).unwrap();
        v.fail_reads(true);
        assert_eq!(v.step(Direction::Next), Err(FsError::Disk));
        assert_eq!(v.select_first(EntryKind::File), Err(FsError::Disk));
        assert_eq!(v.goto_root(), Err(FsError::Disk));
        v.fail_reads(false);
        assert!(v.has_selection());
        assert_eq!(v.selected_path().as_deref(), Some("/A"));
    }
}
