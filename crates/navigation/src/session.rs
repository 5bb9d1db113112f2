//! Navigation session.
//!
//! `NavigationSession` is the façade the playback controller drives: it owns
//! the [`Navigator`], the list counters and the shuffle generator, and
//! dispatches every move to the directory explorer or to the play-list
//! walker depending on the open source.
//!
//! The session is synchronous and single-owner. A call runs to completion
//! (including a full directory traversal on [`NavigationSession::open`])
//! before returning; the configured heartbeat hook is invoked once per walker
//! iteration so long traversals can feed a watchdog.

use platform::{Direction, Navigator};

use crate::config::{ListState, Mode, NavConfig, Shuffle, SourceKind, POS_NONE};
use crate::cursor::DirectoryCursor;
use crate::explorer::Explorer;
use crate::log::{nav_debug, nav_warn};
use crate::outcome::{MoveOptions, MoveStatus, NavError, TraversalOutcome};
use crate::playlist::{playable, PlaylistReader};
use crate::shuffle::ShuffleGenerator;

/// Automatic navigation over a [`Navigator`].
///
/// # Example
///
/// ```ignore
/// use navigation::{MoveOptions, NavConfig, NavigationSession};
/// use platform::{mocks::MockVolume, Direction};
///
/// let volume = MockVolume::new().with_drive(&["/A/1.mp3", "/A/2.mp3"]);
/// let mut session = NavigationSession::new(volume, NavConfig::new("mp3").unwrap());
/// session.open(false, 0)?;
/// assert_eq!(session.getnb(), 2);
/// session.mov(Direction::Next, MoveOptions::None);
/// assert_eq!(session.getpos(), 1);
/// ```
pub struct NavigationSession<N: Navigator> {
    nav: N,
    config: NavConfig,
    source: SourceKind,
    active: bool,
    shuffle: Shuffle,
    rng: ShuffleGenerator,
    list: ListState,
    explorer: Explorer,
    playlist: Option<PlaylistReader>,
    /// Directory the list of a directory-scoped mode is rooted at.
    anchor: Option<N::Index>,
}

impl<N: Navigator> NavigationSession<N> {
    /// Create a closed session over `nav`.
    pub fn new(nav: N, config: NavConfig) -> Self {
        Self {
            explorer: Explorer::new(config.mode(), config.order(), config.heartbeat()),
            rng: ShuffleGenerator::new(config.seed()),
            shuffle: config.shuffle(),
            nav,
            config,
            source: SourceKind::Directory,
            active: false,
            list: ListState::unknown(),
            playlist: None,
            anchor: None,
        }
    }

    /// Open a list.
    ///
    /// - `use_playlist == false`: the list is every playable file under the
    ///   current [`Mode`]. The whole list is walked once to count it, and the
    ///   file selected on entry (if it belongs to the list) stays selected
    ///   with its position; otherwise the first file is selected. `start_pos`
    ///   is not used.
    /// - `use_playlist == true`: the selected file must be an `m3u`, `pls` or
    ///   `smp` play-list. Entry `start_pos` (0-based) is selected when shuffle
    ///   is off and it is playable, else the first playable entry. A dead
    ///   start entry is therefore not an error.
    ///
    /// With shuffle on, a random entry is selected in both cases.
    ///
    /// # Errors
    ///
    /// - [`NavError::Empty`] when the list holds no playable file.
    /// - [`NavError::NotAPlaylist`] when a play-list is requested on another file.
    /// - [`NavError::NoDisk`] / [`NavError::Disk`] on storage failures.
    pub fn open(&mut self, use_playlist: bool, start_pos: u16) -> Result<(), NavError> {
        if let Some(mut reader) = self.playlist.take() {
            reader.close(&mut self.nav);
        }
        self.active = false;
        let result = if use_playlist {
            self.open_playlist(start_pos)
        } else {
            self.open_directory()
        };
        match result {
            Ok(()) => {
                self.active = true;
                nav_debug!(
                    "list opened: size={} position={}",
                    self.list.size,
                    self.list.position
                );
            }
            Err(e) => nav_warn!("open failed: {}", e),
        }
        result
    }

    fn open_playlist(&mut self, start_pos: u16) -> Result<(), NavError> {
        self.source = SourceKind::PlayList;
        self.list = ListState::unknown();
        let mut reader = PlaylistReader::open(&mut self.nav)?;
        match self.start_playlist(&mut reader, start_pos) {
            Ok(()) => {
                self.playlist = Some(reader);
                Ok(())
            }
            Err(e) => {
                reader.close(&mut self.nav);
                Err(e)
            }
        }
    }

    fn start_playlist(
        &mut self,
        reader: &mut PlaylistReader,
        start_pos: u16,
    ) -> Result<(), NavError> {
        if reader.size() == 0 {
            return Err(NavError::Empty);
        }
        self.list.size = reader.size();
        if !self.shuffle.is_on()
            && reader.set_pos(&mut self.nav, start_pos.wrapping_add(1))?
            && playable(&self.nav, self.config.filter())
        {
            self.list.position = start_pos;
            return Ok(());
        }
        let rng = if self.shuffle.is_on() {
            self.rng.reset();
            Some(&mut self.rng)
        } else {
            None
        };
        let outcome = reader.mov(
            &mut self.nav,
            self.config.filter(),
            self.config.heartbeat(),
            &mut self.list,
            rng,
            Direction::Next,
        );
        match outcome.status {
            MoveStatus::Ok | MoveStatus::OkLooped => Ok(()),
            // Two wraps without a playable entry.
            MoveStatus::DiskError => Err(NavError::Empty),
            status => Err(status.into()),
        }
    }

    fn open_directory(&mut self) -> Result<(), NavError> {
        self.source = SourceKind::Directory;
        let mode = self.explorer.mode();
        let mut cur = DirectoryCursor::new(&mut self.nav, self.config.filter());

        let entry = cur.is_playable().then(|| cur.index());
        let anchor = match (mode, self.anchor.take()) {
            (Mode::DirectoryOnly | Mode::DirectoryAndSubtree, Some(anchor)) => anchor,
            (Mode::DirectoryOnly | Mode::DirectoryAndSubtree, None) => {
                let here = cur.index();
                cur.reset();
                let dir = cur.index();
                cur.goto_index(&here)?;
                dir
            }
            (Mode::SingleDisk, _) => {
                if !cur.select_drive(cur.drive())? || !cur.mount()? {
                    return Err(NavError::NoDisk);
                }
                cur.index()
            }
            (Mode::AllDisks, _) => {
                let mut mounted = None;
                for drive in 0..cur.drive_count() {
                    if cur.select_drive(drive)? && cur.mount()? {
                        mounted = Some(cur.index());
                        break;
                    }
                    nav_warn!("drive {} not mountable, skipped", drive);
                }
                mounted.ok_or(NavError::NoDisk)?
            }
        };

        cur.goto_index(&anchor)?;
        let depth = cur.depth()?;
        let root = if mode.is_directory_scoped() { depth } else { 0 };
        self.explorer.set_levels(depth, root);
        self.list = ListState::unknown();

        // Count the list; remember where the entry file sits in it.
        let mut relocated = None;
        loop {
            let outcome = self.explorer.mov(
                &mut cur,
                &mut self.list,
                None,
                Direction::Next,
                MoveOptions::None,
            );
            match outcome.status {
                MoveStatus::Ok => {
                    if relocated.is_none() && entry.as_ref() == Some(&cur.index()) {
                        relocated = Some((self.list.position, self.explorer.dir_level()));
                    }
                }
                MoveStatus::OkLooped => break,
                status => return Err(status.into()),
            }
        }

        if let (Some(index), Some((position, level))) = (entry, relocated) {
            cur.goto_index(&index)?;
            self.list.position = position;
            self.explorer.set_levels(level, root);
        }
        if mode.is_directory_scoped() {
            self.anchor = Some(anchor);
        }

        if self.shuffle.is_on() {
            self.rng.reset();
            let outcome = self.explorer.mov(
                &mut cur,
                &mut self.list,
                Some(&mut self.rng),
                Direction::Next,
                MoveOptions::None,
            );
            if !outcome.is_ok() {
                return Err(outcome.status.into());
            }
        }
        Ok(())
    }

    /// Close the list.
    ///
    /// Returns the last position for a play-list (the play-list file is
    /// selected again), or the directory depth of the selected file for a
    /// directory list.
    pub fn close(&mut self) -> u16 {
        self.active = false;
        match self.source {
            SourceKind::PlayList => {
                if let Some(mut reader) = self.playlist.take() {
                    reader.close(&mut self.nav);
                }
                nav_debug!("play-list closed at {}", self.list.position);
                self.list.position
            }
            SourceKind::Directory => {
                self.anchor = None;
                nav_debug!("directory list closed at level {}", self.explorer.dir_level());
                self.explorer.dir_level()
            }
        }
    }

    /// Move to the next or previous entry (a random one with shuffle on).
    pub fn mov(&mut self, direction: Direction, options: MoveOptions) -> TraversalOutcome {
        let rng = if self.shuffle.is_on() {
            Some(&mut self.rng)
        } else {
            None
        };
        match self.source {
            SourceKind::PlayList => match self.playlist.as_mut() {
                Some(reader) => reader.mov(
                    &mut self.nav,
                    self.config.filter(),
                    self.config.heartbeat(),
                    &mut self.list,
                    rng,
                    direction,
                ),
                None => TraversalOutcome::new(MoveStatus::Empty),
            },
            SourceKind::Directory => {
                let mut cur = DirectoryCursor::new(&mut self.nav, self.config.filter());
                self.explorer
                    .mov(&mut cur, &mut self.list, rng, direction, options)
            }
        }
    }

    /// Select the entry at `position`. A play-list entry is opened directly;
    /// a directory list is stepped through in order. Shuffle does not apply.
    ///
    /// # Errors
    ///
    /// - [`NavError::OutOfRange`] when `position >= getnb()`, or when the
    ///   directory walk passes `position` without landing on it.
    /// - [`NavError::NotPlayable`] when the play-list entry is dead or
    ///   filtered out; the previous entry stays selected.
    /// - The status of the first step that does not report [`MoveStatus::Ok`].
    pub fn setpos(&mut self, position: u16) -> Result<(), NavError> {
        if position >= self.list.size {
            return Err(NavError::OutOfRange);
        }
        match self.source {
            SourceKind::PlayList => self.setpos_playlist(position),
            SourceKind::Directory => self.setpos_directory(position),
        }
    }

    fn setpos_playlist(&mut self, position: u16) -> Result<(), NavError> {
        let reader = self.playlist.as_mut().ok_or(NavError::Empty)?;
        if reader.set_pos(&mut self.nav, position.wrapping_add(1))?
            && playable(&self.nav, self.config.filter())
        {
            self.list.position = position;
            return Ok(());
        }
        nav_debug!("play-list entry {} not playable", position);
        let previous = self.list.position;
        if previous != POS_NONE {
            reader.set_pos(&mut self.nav, previous.wrapping_add(1))?;
        }
        Err(NavError::NotPlayable)
    }

    fn setpos_directory(&mut self, position: u16) -> Result<(), NavError> {
        let forward = self.list.position == POS_NONE || self.list.position < position;
        let direction = if forward {
            Direction::Next
        } else {
            Direction::Prev
        };
        while self.list.position != position {
            let mut cur = DirectoryCursor::new(&mut self.nav, self.config.filter());
            let outcome = self
                .explorer
                .mov(&mut cur, &mut self.list, None, direction, MoveOptions::None);
            if outcome.status != MoveStatus::Ok {
                return Err(outcome.status.into());
            }
            let passed = if forward {
                self.list.position > position
            } else {
                self.list.position < position
            };
            if passed {
                return Err(NavError::OutOfRange);
            }
        }
        Ok(())
    }

    /// 0-based position of the selected entry, [`POS_NONE`] when none is.
    #[must_use]
    pub const fn getpos(&self) -> u16 {
        self.list.position
    }

    /// Number of entries of the open list (`0` when not known).
    #[must_use]
    pub const fn getnb(&self) -> u16 {
        self.list.size
    }

    /// Change the directory mode. An open directory list is reopened so its
    /// size and position follow the new mode, anchored at the directory of
    /// the selected file.
    ///
    /// # Errors
    ///
    /// The errors of [`NavigationSession::open`] for the reopened list.
    pub fn setmode(&mut self, mode: Mode) -> Result<(), NavError> {
        self.explorer.set_mode(mode);
        nav_debug!("mode set to {}", mode);
        if self.active && self.source == SourceKind::Directory {
            self.anchor = None;
            return self.open(false, 0);
        }
        Ok(())
    }

    /// Current directory mode.
    #[must_use]
    pub const fn getmode(&self) -> Mode {
        self.explorer.mode()
    }

    /// Switch shuffle on or off. The generator forgets its parameters and the
    /// next shuffled move starts a fresh pass.
    pub fn setrand(&mut self, shuffle: Shuffle) {
        self.shuffle = shuffle;
        self.rng.reset();
        nav_debug!("shuffle {}", shuffle);
    }

    /// Current shuffle state.
    #[must_use]
    pub const fn getrand(&self) -> Shuffle {
        self.shuffle
    }

    /// Kind of the last opened list.
    #[must_use]
    pub const fn source(&self) -> SourceKind {
        self.source
    }

    /// `true` between a successful [`NavigationSession::open`] and
    /// [`NavigationSession::close`].
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.active
    }

    /// Directory depth of the selection below the drive root.
    #[must_use]
    pub const fn dir_level(&self) -> u16 {
        self.explorer.dir_level()
    }

    /// Session configuration.
    #[must_use]
    pub const fn config(&self) -> &NavConfig {
        &self.config
    }

    /// The navigator, e.g. to read the selected file name.
    #[must_use]
    pub const fn navigator(&self) -> &N {
        &self.nav
    }

    /// Mutable access to the navigator. Moving the selection behind the
    /// session's back invalidates the position until the next `open`.
    pub fn navigator_mut(&mut self) -> &mut N {
        &mut self.nav
    }

    /// Give the navigator back.
    pub fn into_navigator(self) -> N {
        self.nav
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

    fn session(paths: &[&str], mode: Mode) -> NavigationSession<MockVolume> {
        let config = NavConfig::new("mp3").unwrap().with_mode(mode);
        NavigationSession::new(MockVolume::new().with_drive(paths), config)
    }

    #[test]
    fn test_new_session_is_closed() {
        let s = session(&["/a.mp3"], Mode::SingleDisk);
        assert!(!s.is_open());
        assert_eq!(s.getpos(), POS_NONE);
        assert_eq!(s.getnb(), 0);
        assert_eq!(s.getmode(), Mode::SingleDisk);
        assert_eq!(s.getrand(), Shuffle::Off);
    }

    #[test]
    fn test_open_counts_and_selects_first() {
        let mut s = session(&["/x/1.mp3", "/x/2.mp3", "/3.mp3"], Mode::SingleDisk);
        s.open(false, 0).unwrap();
        assert!(s.is_open());
        assert_eq!(s.getnb(), 3);
        assert_eq!(s.getpos(), 0);
        assert_eq!(s.navigator().selected_path().as_deref(), Some("/3.mp3"));
        assert_eq!(s.dir_level(), 0);
    }

    #[test]
    fn test_open_relocates_selected_file() {
        let mut s = session(&["/x/1.mp3", "/x/2.mp3", "/3.mp3"], Mode::SingleDisk);
        s.navigator_mut().select_path_abs("/x/2.mp3").unwrap();
        s.open(false, 0).unwrap();
        assert_eq!(s.getpos(), 2);
        assert_eq!(s.dir_level(), 1);
        assert_eq!(s.navigator().selected_path().as_deref(), Some("/x/2.mp3"));
    }

    #[test]
    fn test_open_empty_list() {
        let mut s = session(&["/a.txt", "/b/"], Mode::SingleDisk);
        assert_eq!(s.open(false, 0), Err(NavError::Empty));
        assert!(!s.is_open());
    }

    #[test]
    fn test_setpos_range_and_walk() {
        let mut s = session(&["/1.mp3", "/2.mp3", "/3.mp3"], Mode::SingleDisk);
        s.open(false, 0).unwrap();
        assert_eq!(s.setpos(3), Err(NavError::OutOfRange));
        s.setpos(2).unwrap();
        assert_eq!(s.navigator().selected_path().as_deref(), Some("/3.mp3"));
        s.setpos(0).unwrap();
        assert_eq!(s.navigator().selected_path().as_deref(), Some("/1.mp3"));
    }

    #[test]
    fn test_close_returns_dir_level() {
        let mut s = session(&["/x/y/1.mp3"], Mode::SingleDisk);
        s.open(false, 0).unwrap();
        assert_eq!(s.close(), 2);
        assert!(!s.is_open());
    }

    #[test]
    fn test_setmode_reopens() {
        let mut s = session(&["/x/1.mp3", "/x/2.mp3", "/3.mp3"], Mode::SingleDisk);
        s.navigator_mut().select_path_abs("/x/2.mp3").unwrap();
        s.open(false, 0).unwrap();
        s.setmode(Mode::DirectoryOnly).unwrap();
        assert_eq!(s.getnb(), 2);
        assert_eq!(s.getpos(), 1);
        s.setmode(Mode::SingleDisk).unwrap();
        assert_eq!(s.getnb(), 3);
        assert_eq!(s.getpos(), 2);
    }

    #[test]
    fn test_setrand_toggles() {
        let mut s = session(&["/1.mp3"], Mode::SingleDisk);
        s.setrand(Shuffle::On);
        assert_eq!(s.getrand(), Shuffle::On);
        s.setrand(Shuffle::Off);
        assert_eq!(s.getrand(), Shuffle::Off);
    }

    #[test]
    fn test_playlist_not_a_playlist() {
        let mut s = session(&["/1.mp3"], Mode::SingleDisk);
        s.navigator_mut().select_path_abs("/1.mp3").unwrap();
        assert_eq!(s.open(true, 0), Err(NavError::NotAPlaylist));
    }
}
