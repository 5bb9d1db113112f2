//! Directory-tree walker.
//!
//! The explorer turns a directory tree into a virtual ordered list of
//! playable files without ever materialising it. Each move is an explicit
//! state loop over the current selection:
//!
//! ```text
//! no selection ─▶ probe files / sub-dirs of the directory (order policy)
//!                 nothing found ─▶ parent directory, or Empty at the root
//! directory    ─▶ next sibling directory ─▶ enter it
//!                 none left ─▶ files of this directory, or parent directory
//! file         ─▶ next playable sibling file
//!                 none left ─▶ sub-dirs of this directory, or parent directory
//! root reached ─▶ list boundary: Looped, or next drive in AllDisks mode
//! ```
//!
//! Depth is tracked in `dir_level`; ascent stops at `dir_level_root` in
//! [`Mode::DirectoryAndSubtree`] and is never allowed in
//! [`Mode::DirectoryOnly`], which does not descend either.

use platform::{Direction, EntryKind, Navigator};

use crate::config::{EntryOrder, ListState, Mode, POS_NONE};
use crate::cursor::DirectoryCursor;
use crate::log::{nav_debug, nav_warn};
use crate::outcome::{MoveOptions, MoveStatus, TraversalOutcome};
use crate::shuffle::ShuffleGenerator;

/// Extra attempts when a shuffled move lands on the previous position.
const SHUFFLE_RETRIES: u8 = 4;

/// Transition produced by one state of the walk loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    /// A playable file is selected.
    Found,
    /// The list boundary was crossed; a file is selected.
    Looped,
    /// Nothing playable.
    Empty,
    /// The selection changed; evaluate the new state.
    Again,
}

/// Terminal result of a walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Walked {
    Found,
    Looped,
    Empty,
}

/// Action tried when a group of entries is exhausted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Probe {
    /// First or last playable file of the directory.
    Files,
    /// First or last sub-directory, entered.
    Dirs,
    /// Parent directory.
    Up,
}

impl EntryOrder {
    /// Probes for a directory with nothing selected.
    const fn on_new_dir(self, direction: Direction) -> [Probe; 2] {
        match (self, direction) {
            (Self::FilesFirst, Direction::Next) | (Self::DirsFirst, Direction::Prev) => {
                [Probe::Files, Probe::Dirs]
            }
            (Self::FilesFirst, Direction::Prev) | (Self::DirsFirst, Direction::Next) => {
                [Probe::Dirs, Probe::Files]
            }
        }
    }

    /// Probe once the sibling directories are exhausted.
    const fn after_dirs(self, direction: Direction) -> Probe {
        match (self, direction) {
            (Self::FilesFirst, Direction::Next) | (Self::DirsFirst, Direction::Prev) => Probe::Up,
            (Self::FilesFirst, Direction::Prev) | (Self::DirsFirst, Direction::Next) => {
                Probe::Files
            }
        }
    }

    /// Probe once the sibling files are exhausted.
    const fn after_files(self, direction: Direction) -> Probe {
        match (self, direction) {
            (Self::FilesFirst, Direction::Next) | (Self::DirsFirst, Direction::Prev) => {
                Probe::Dirs
            }
            (Self::FilesFirst, Direction::Prev) | (Self::DirsFirst, Direction::Next) => Probe::Up,
        }
    }
}

const fn advance(position: u16, direction: Direction) -> u16 {
    match direction {
        Direction::Next => position.wrapping_add(1),
        Direction::Prev => position.wrapping_sub(1),
    }
}

/// Walker state of a directory-backed list.
#[derive(Debug, Clone)]
pub(crate) struct Explorer {
    mode: Mode,
    order: EntryOrder,
    heartbeat: fn(),
    dir_level: u16,
    dir_level_root: u16,
    folder_changed: bool,
}

impl Explorer {
    pub(crate) const fn new(mode: Mode, order: EntryOrder, heartbeat: fn()) -> Self {
        Self {
            mode,
            order,
            heartbeat,
            dir_level: 0,
            dir_level_root: 0,
            folder_changed: false,
        }
    }

    pub(crate) const fn mode(&self) -> Mode {
        self.mode
    }

    pub(crate) fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
    }

    pub(crate) const fn dir_level(&self) -> u16 {
        self.dir_level
    }

    /// Anchor the walk: current depth and depth of the traversal root.
    pub(crate) fn set_levels(&mut self, level: u16, root: u16) {
        self.dir_level = level;
        self.dir_level_root = root;
    }

    /// Move to the next or previous playable file.
    ///
    /// With `rng` the direction is ignored: a target position is drawn and
    /// reached by single steps, so folder bookkeeping stays exact.
    pub(crate) fn mov<N: Navigator>(
        &mut self,
        cur: &mut DirectoryCursor<'_, N>,
        list: &mut ListState,
        mut rng: Option<&mut ShuffleGenerator>,
        direction: Direction,
        options: MoveOptions,
    ) -> TraversalOutcome {
        let mut folder_changed = false;
        let mut attempts: u8 = 0;
        loop {
            let result = self.mov_once(cur, list, rng.as_deref_mut(), direction, options);
            folder_changed |= self.folder_changed;
            let (status, repeated) = result.unwrap_or_else(|status| (status, false));
            if let MoveStatus::DiskError | MoveStatus::NoDiskPresent = status {
                nav_warn!("explorer move aborted: {}", status);
            }
            attempts = attempts.saturating_add(1);
            if !repeated || attempts > SHUFFLE_RETRIES {
                return TraversalOutcome {
                    status,
                    folder_changed,
                };
            }
        }
    }

    /// One move; the flag reports a shuffled move that ended on the position
    /// it started from.
    fn mov_once<N: Navigator>(
        &mut self,
        cur: &mut DirectoryCursor<'_, N>,
        list: &mut ListState,
        rng: Option<&mut ShuffleGenerator>,
        direction: Direction,
        options: MoveOptions,
    ) -> Result<(MoveStatus, bool), MoveStatus> {
        self.folder_changed = false;
        let previous = list.position;
        let shuffled = rng.is_some();
        let mut direction = direction;
        let mut steps: u16 = 1;

        if let Some(rng) = rng {
            if rng.take_restart() {
                self.prime(cur, list, options)?;
            }
            let target = rng.next(list.position, list.size);
            (direction, steps) = if list.position == POS_NONE || target > list.position {
                (Direction::Next, target.wrapping_sub(list.position))
            } else {
                (Direction::Prev, list.position.wrapping_sub(target))
            };
        }

        for _ in 0..steps {
            match self.walk(cur, list, direction, options)? {
                Walked::Found => list.position = advance(list.position, direction),
                Walked::Looped => {
                    return self.wrap(cur, list, direction, options).map(|s| (s, false));
                }
                Walked::Empty => return Ok((MoveStatus::Empty, false)),
            }
        }
        let repeated = shuffled && previous == list.position && list.size > 1;
        Ok((MoveStatus::Ok, repeated))
    }

    /// First shuffled move: restart from the first file of the list, or
    /// count the current directory when staying in it.
    fn prime<N: Navigator>(
        &mut self,
        cur: &mut DirectoryCursor<'_, N>,
        list: &mut ListState,
        options: MoveOptions,
    ) -> Result<(), MoveStatus> {
        if options.stays_in_dir() {
            list.size = cur.count_files()?;
            list.position = 0;
        } else {
            self.limit(cur)?;
            list.position = 0;
            if self.walk(cur, list, Direction::Next, MoveOptions::None)? == Walked::Empty {
                return Err(MoveStatus::Empty);
            }
        }
        nav_debug!("shuffle primed: size={}", list.size);
        Ok(())
    }

    /// The list boundary was crossed: fix the counters, go back to the
    /// traversal root and select the first (or last) file again.
    fn wrap<N: Navigator>(
        &mut self,
        cur: &mut DirectoryCursor<'_, N>,
        list: &mut ListState,
        direction: Direction,
        options: MoveOptions,
    ) -> Result<MoveStatus, MoveStatus> {
        match direction {
            Direction::Next => {
                list.size = list.position.wrapping_add(1);
                list.position = 0;
            }
            Direction::Prev => list.position = list.size.wrapping_sub(1),
        }
        nav_debug!("list wrapped: size={} position={}", list.size, list.position);
        self.limit(cur)?;
        match self.walk(cur, list, direction, options)? {
            Walked::Found => Ok(MoveStatus::OkLooped),
            // A second boundary right after the first: nothing to play.
            Walked::Looped | Walked::Empty => {
                nav_debug!("list empty");
                Ok(MoveStatus::Empty)
            }
        }
    }

    /// Go back to the traversal root with nothing selected.
    pub(crate) fn limit<N: Navigator>(
        &mut self,
        cur: &mut DirectoryCursor<'_, N>,
    ) -> Result<(), MoveStatus> {
        while self.updir(cur)? {}
        self.dir_level = self.dir_level_root;
        cur.reset();
        Ok(())
    }

    fn walk<N: Navigator>(
        &mut self,
        cur: &mut DirectoryCursor<'_, N>,
        list: &mut ListState,
        direction: Direction,
        options: MoveOptions,
    ) -> Result<Walked, MoveStatus> {
        let mut drive_wrapped = false;
        loop {
            (self.heartbeat)();
            let step = if !cur.has_selection() {
                self.on_new_dir(cur, direction, &mut drive_wrapped)?
            } else if cur.is_dir() {
                self.on_dir(cur, direction, &mut drive_wrapped)?
            } else {
                self.on_file(cur, list, direction, options, &mut drive_wrapped)?
            };
            match step {
                Step::Again => {}
                Step::Found if drive_wrapped => return Ok(Walked::Looped),
                Step::Found => return Ok(Walked::Found),
                Step::Looped => return Ok(Walked::Looped),
                Step::Empty => return Ok(Walked::Empty),
            }
        }
    }

    fn on_new_dir<N: Navigator>(
        &mut self,
        cur: &mut DirectoryCursor<'_, N>,
        direction: Direction,
        wrapped: &mut bool,
    ) -> Result<Step, MoveStatus> {
        for probe in self.order.on_new_dir(direction) {
            match probe {
                Probe::Files => {
                    if self.select_limit_file(cur, direction)? {
                        return Ok(Step::Found);
                    }
                }
                Probe::Dirs => {
                    if self.select_limit_dir(cur, direction)? {
                        return Ok(Step::Again);
                    }
                }
                Probe::Up => {}
            }
        }
        if self.updir(cur)? {
            return Ok(Step::Again);
        }
        if self.mode == Mode::AllDisks {
            return self.next_drive(cur, direction, wrapped);
        }
        Ok(Step::Empty)
    }

    fn on_dir<N: Navigator>(
        &mut self,
        cur: &mut DirectoryCursor<'_, N>,
        direction: Direction,
        wrapped: &mut bool,
    ) -> Result<Step, MoveStatus> {
        if cur.step(direction)? && cur.is_dir() {
            // A directory that cannot be entered is stepped over next round.
            self.enter(cur)?;
            return Ok(Step::Again);
        }
        if self.order.after_dirs(direction) == Probe::Files
            && self.select_limit_file(cur, direction)?
        {
            return Ok(Step::Found);
        }
        if self.updir(cur)? {
            return Ok(Step::Again);
        }
        self.boundary(cur, direction, wrapped)
    }

    fn on_file<N: Navigator>(
        &mut self,
        cur: &mut DirectoryCursor<'_, N>,
        list: &mut ListState,
        direction: Direction,
        options: MoveOptions,
        wrapped: &mut bool,
    ) -> Result<Step, MoveStatus> {
        while cur.step(direction)? {
            if cur.is_dir() {
                break;
            }
            if cur.is_playable() {
                return Ok(Step::Found);
            }
        }
        if options.stays_in_dir() || self.mode == Mode::DirectoryOnly {
            return self.wrap_in_dir(cur, list, direction, options);
        }
        if self.order.after_files(direction) == Probe::Dirs
            && self.select_limit_dir(cur, direction)?
        {
            return Ok(Step::Again);
        }
        if self.updir(cur)? {
            return Ok(Step::Again);
        }
        self.boundary(cur, direction, wrapped)
    }

    /// Wrap inside the current directory. With `StayInCurrentDir` the
    /// position is rebased so the caller's single step lands on the
    /// directory's first (or last) file; otherwise the wrap is the list
    /// boundary of `DirectoryOnly`.
    fn wrap_in_dir<N: Navigator>(
        &mut self,
        cur: &mut DirectoryCursor<'_, N>,
        list: &mut ListState,
        direction: Direction,
        options: MoveOptions,
    ) -> Result<Step, MoveStatus> {
        let stay = options.stays_in_dir();
        if stay {
            let back = direction.reverse();
            if cur.is_playable() {
                list.position = advance(list.position, back);
            }
            while cur.step(back)? {
                if cur.is_dir() {
                    break;
                }
                if cur.is_playable() {
                    list.position = advance(list.position, back);
                }
            }
        }
        if self.select_limit_file(cur, direction)? {
            return Ok(if stay { Step::Found } else { Step::Looped });
        }
        Ok(Step::Empty)
    }

    fn boundary<N: Navigator>(
        &mut self,
        cur: &mut DirectoryCursor<'_, N>,
        direction: Direction,
        wrapped: &mut bool,
    ) -> Result<Step, MoveStatus> {
        if self.mode == Mode::AllDisks {
            self.next_drive(cur, direction, wrapped)
        } else {
            Ok(Step::Looped)
        }
    }

    /// Mount the next (or previous) drive, skipping absent ones. Crossing
    /// from the last drive to the first counts as a list wrap; a second wrap
    /// in the same walk means no drive holds a playable file.
    fn next_drive<N: Navigator>(
        &mut self,
        cur: &mut DirectoryCursor<'_, N>,
        direction: Direction,
        wrapped: &mut bool,
    ) -> Result<Step, MoveStatus> {
        let count = cur.drive_count();
        let last = count.saturating_sub(1);
        let mut drive = cur.drive();
        for _ in 0..count {
            let (next, crossed) = match direction {
                Direction::Next if drive >= last => (0, true),
                Direction::Next => (drive.saturating_add(1), false),
                Direction::Prev if drive == 0 => (last, true),
                Direction::Prev => (drive.saturating_sub(1), false),
            };
            if crossed {
                if *wrapped {
                    nav_debug!("no playable file on any drive");
                    return Ok(Step::Empty);
                }
                *wrapped = true;
            }
            drive = next;
            if cur.select_drive(drive)? && cur.mount()? {
                nav_debug!("drive {} mounted", drive);
                self.dir_level = 0;
                self.dir_level_root = 0;
                self.folder_changed = true;
                return Ok(Step::Again);
            }
            nav_warn!("drive {} not mountable, skipped", drive);
        }
        Err(MoveStatus::NoDiskPresent)
    }

    /// Select the first (or last) playable file of the current directory.
    fn select_limit_file<N: Navigator>(
        &mut self,
        cur: &mut DirectoryCursor<'_, N>,
        direction: Direction,
    ) -> Result<bool, MoveStatus> {
        if !cur.select_limit(EntryKind::File, direction)? {
            return Ok(false);
        }
        while !cur.is_playable() {
            if !cur.step(direction)? || cur.is_dir() {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Select the first (or last) sub-directory and enter it.
    fn select_limit_dir<N: Navigator>(
        &mut self,
        cur: &mut DirectoryCursor<'_, N>,
        direction: Direction,
    ) -> Result<bool, MoveStatus> {
        Ok(cur.select_limit(EntryKind::Dir, direction)? && self.enter(cur)?)
    }

    fn enter<N: Navigator>(
        &mut self,
        cur: &mut DirectoryCursor<'_, N>,
    ) -> Result<bool, MoveStatus> {
        if self.mode == Mode::DirectoryOnly || !cur.enter()? {
            return Ok(false);
        }
        self.dir_level = self.dir_level.saturating_add(1);
        self.folder_changed = true;
        Ok(true)
    }

    fn updir<N: Navigator>(
        &mut self,
        cur: &mut DirectoryCursor<'_, N>,
    ) -> Result<bool, MoveStatus> {
        match self.mode {
            Mode::DirectoryOnly => return Ok(false),
            Mode::DirectoryAndSubtree if self.dir_level <= self.dir_level_root => return Ok(false),
            _ => {}
        }
        if !cur.parent()? {
            return Ok(false);
        }
        self.dir_level = self.dir_level.saturating_sub(1);
        self.folder_changed = true;
        Ok(true)
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

    const TREE: &[&str] = &["/A/1.mp3", "/A/2.mp3", "/B/3.mp3", "/top.mp3"];

    fn mov(
        ex: &mut Explorer,
        v: &mut MockVolume,
        list: &mut ListState,
        direction: Direction,
        options: MoveOptions,
    ) -> (MoveStatus, String) {
        let mut cur = DirectoryCursor::new(v, "mp3");
        let outcome = ex.mov(&mut cur, list, None, direction, options);
        (outcome.status, v.selected_path().unwrap_or_default())
    }

    fn walk(
        paths: &[&str],
        mode: Mode,
        order: EntryOrder,
        direction: Direction,
        n: usize,
    ) -> Vec<String> {
        let mut v = MockVolume::new().with_drive(paths);
        let mut ex = Explorer::new(mode, order, || {});
        let mut list = ListState::unknown();
        (0..n)
            .map(|_| mov(&mut ex, &mut v, &mut list, direction, MoveOptions::None).1)
            .collect()
    }

    #[test]
    fn test_files_first_order() {
        let seen = walk(TREE, Mode::SingleDisk, EntryOrder::FilesFirst, Direction::Next, 5);
        assert_eq!(seen, ["/top.mp3", "/A/1.mp3", "/A/2.mp3", "/B/3.mp3", "/top.mp3"]);
    }

    #[test]
    fn test_dirs_first_order() {
        let seen = walk(TREE, Mode::SingleDisk, EntryOrder::DirsFirst, Direction::Next, 5);
        assert_eq!(seen, ["/A/1.mp3", "/A/2.mp3", "/B/3.mp3", "/top.mp3", "/A/1.mp3"]);
    }

    #[test]
    fn test_reverse_order() {
        let seen = walk(TREE, Mode::SingleDisk, EntryOrder::FilesFirst, Direction::Prev, 5);
        assert_eq!(seen, ["/B/3.mp3", "/A/2.mp3", "/A/1.mp3", "/top.mp3", "/B/3.mp3"]);
    }

    #[test]
    fn test_wrap_sets_list_size() {
        let mut v = MockVolume::new().with_drive(TREE);
        let mut ex = Explorer::new(Mode::SingleDisk, EntryOrder::FilesFirst, || {});
        let mut list = ListState::unknown();
        for expected in 0..4u16 {
            let (status, _) = mov(&mut ex, &mut v, &mut list, Direction::Next, MoveOptions::None);
            assert_eq!(status, MoveStatus::Ok);
            assert_eq!(list.position, expected);
        }
        let (status, path) = mov(&mut ex, &mut v, &mut list, Direction::Next, MoveOptions::None);
        assert_eq!(status, MoveStatus::OkLooped);
        assert_eq!(path, "/top.mp3");
        assert_eq!(list, ListState { position: 0, size: 4 });
        let (status, path) = mov(&mut ex, &mut v, &mut list, Direction::Prev, MoveOptions::None);
        assert_eq!(status, MoveStatus::OkLooped);
        assert_eq!(path, "/B/3.mp3");
        assert_eq!(list.position, 3);
    }

    #[test]
    fn test_filter_skips_other_files() {
        let seen = walk(
            &["/a.mp3", "/b.txt", "/c.mp3", "/d/e.txt"],
            Mode::SingleDisk,
            EntryOrder::FilesFirst,
            Direction::Next,
            3,
        );
        assert_eq!(seen, ["/a.mp3", "/c.mp3", "/a.mp3"]);
    }

    #[test]
    fn test_directory_only_never_descends() {
        let seen = walk(
            &["/A/1.mp3", "/x.mp3", "/y.mp3"],
            Mode::DirectoryOnly,
            EntryOrder::FilesFirst,
            Direction::Next,
            3,
        );
        assert_eq!(seen, ["/x.mp3", "/y.mp3", "/x.mp3"]);
        let seen = walk(
            &["/A/1.mp3", "/x.mp3", "/y.mp3"],
            Mode::DirectoryOnly,
            EntryOrder::FilesFirst,
            Direction::Prev,
            3,
        );
        assert_eq!(seen, ["/y.mp3", "/x.mp3", "/y.mp3"]);
    }

    #[test]
    fn test_directory_only_without_files_is_empty() {
        let mut v = MockVolume::new().with_drive(&["/A/1.mp3"]);
        let mut ex = Explorer::new(Mode::DirectoryOnly, EntryOrder::FilesFirst, || {});
        let mut list = ListState::unknown();
        let (status, _) = mov(&mut ex, &mut v, &mut list, Direction::Next, MoveOptions::None);
        assert_eq!(status, MoveStatus::Empty);
    }

    #[test]
    fn test_subtree_stays_below_root() {
        let mut v = MockVolume::new().with_drive(&["/A/1.mp3", "/A/S/2.mp3", "/B/3.mp3"]);
        v.select_path_abs("/A").unwrap();
        v.enter_dir().unwrap();
        let mut ex = Explorer::new(Mode::DirectoryAndSubtree, EntryOrder::FilesFirst, || {});
        ex.set_levels(1, 1);
        let mut list = ListState::unknown();
        let seen: Vec<String> = (0..3)
            .map(|_| mov(&mut ex, &mut v, &mut list, Direction::Next, MoveOptions::None).1)
            .collect();
        assert_eq!(seen, ["/A/1.mp3", "/A/S/2.mp3", "/A/1.mp3"]);
        assert_eq!(ex.dir_level(), 1);
    }

    #[test]
    fn test_stay_in_current_dir_rebases_position() {
        let mut v =
            MockVolume::new().with_drive(&["/A/1.mp3", "/A/2.mp3", "/A/3.mp3", "/B/4.mp3"]);
        let mut ex = Explorer::new(Mode::SingleDisk, EntryOrder::FilesFirst, || {});
        let mut list = ListState::unknown();
        for _ in 0..3 {
            mov(&mut ex, &mut v, &mut list, Direction::Next, MoveOptions::None);
        }
        assert_eq!(list.position, 2);
        let stay = MoveOptions::StayInCurrentDir;
        let (status, path) = mov(&mut ex, &mut v, &mut list, Direction::Next, stay);
        assert_eq!(status, MoveStatus::Ok);
        assert_eq!(path, "/A/1.mp3");
        assert_eq!(list.position, 0);
        let (status, path) = mov(&mut ex, &mut v, &mut list, Direction::Prev, stay);
        assert_eq!(status, MoveStatus::Ok);
        assert_eq!(path, "/A/3.mp3");
        assert_eq!(list.position, 2);
    }

    #[test]
    fn test_folder_changed_flag() {
        let mut v = MockVolume::new().with_drive(&["/A/1.mp3", "/A/2.mp3", "/B/3.mp3"]);
        let mut ex = Explorer::new(Mode::SingleDisk, EntryOrder::FilesFirst, || {});
        let mut list = ListState::unknown();
        let mut cur = DirectoryCursor::new(&mut v, "mp3");
        let mut next = || {
            ex.mov(&mut cur, &mut list, None, Direction::Next, MoveOptions::None)
                .folder_changed
        };
        assert!(next());
        assert!(!next());
        assert!(next());
    }

    #[test]
    fn test_enter_then_updir_round_trip() {
        let mut v = MockVolume::new().with_drive(TREE);
        v.select_path_abs("/B").unwrap();
        let mut ex = Explorer::new(Mode::SingleDisk, EntryOrder::FilesFirst, || {});
        let mut cur = DirectoryCursor::new(&mut v, "mp3");
        let before = ex.dir_level();
        assert_eq!(before, 0);
        assert!(ex.enter(&mut cur).unwrap());
        assert_eq!(ex.dir_level(), 1);
        assert!(ex.updir(&mut cur).unwrap());
        assert_eq!(ex.dir_level(), before);
        drop(cur);
        assert_eq!(v.selected_path().as_deref(), Some("/B"));
    }

    #[test]
    fn test_all_disks_crosses_drives() {
        let mut v = MockVolume::new()
            .with_drive(&["/a.mp3"])
            .with_drive(&["/b.mp3"]);
        let mut ex = Explorer::new(Mode::AllDisks, EntryOrder::FilesFirst, || {});
        let mut list = ListState::unknown();
        let (s1, p1) = mov(&mut ex, &mut v, &mut list, Direction::Next, MoveOptions::None);
        let (s2, p2) = mov(&mut ex, &mut v, &mut list, Direction::Next, MoveOptions::None);
        assert_eq!((s1, p1.as_str()), (MoveStatus::Ok, "/a.mp3"));
        assert_eq!((s2, p2.as_str()), (MoveStatus::Ok, "/b.mp3"));
        assert_eq!(v.drive(), 1);
        let (s3, p3) = mov(&mut ex, &mut v, &mut list, Direction::Next, MoveOptions::None);
        assert_eq!((s3, p3.as_str()), (MoveStatus::OkLooped, "/a.mp3"));
        assert_eq!(v.drive(), 0);
        assert_eq!(list, ListState { position: 0, size: 2 });
    }

    #[test]
    fn test_all_disks_empty_terminates() {
        let mut v = MockVolume::new().with_drive(&["/x.txt"]).with_drive(&["/empty/"]);
        let mut ex = Explorer::new(Mode::AllDisks, EntryOrder::FilesFirst, || {});
        let mut list = ListState::unknown();
        let (status, _) = mov(&mut ex, &mut v, &mut list, Direction::Next, MoveOptions::None);
        assert_eq!(status, MoveStatus::Empty);
    }

    #[test]
    fn test_heartbeat_called() {
        use core::sync::atomic::{AtomicUsize, Ordering};
        static BEATS: AtomicUsize = AtomicUsize::new(0);
        fn beat() {
            BEATS.fetch_add(1, Ordering::Relaxed);
        }
        let mut v = MockVolume::new().with_drive(TREE);
        let mut ex = Explorer::new(Mode::SingleDisk, EntryOrder::FilesFirst, beat);
        let mut list = ListState::unknown();
        mov(&mut ex, &mut v, &mut list, Direction::Next, MoveOptions::None);
        assert!(BEATS.load(Ordering::Relaxed) > 0);
    }
}
