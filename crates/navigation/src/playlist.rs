//! Play-list walker.
//!
//! A play-list is a text file read line by line through the [`Navigator`].
//! Path lines are counted once when the list is opened; afterwards entry `n`
//! (1-based) is reached by reading forward from the current line, or from the
//! start of the file when moving backwards. The selected path is resolved by
//! the navigator relative to the play-list's directory.
//!
//! | Format | Path lines                                   |
//! |--------|----------------------------------------------|
//! | `m3u`  | any line of 2+ characters not starting `#`    |
//! | `pls`  | `FileN=path`, up to three digits for `N`     |
//! | `smp`  | `File=path`                                  |

use platform::{Direction, FsError, Line, Navigator};

use crate::config::{ListState, POS_NONE};
use crate::log::{nav_debug, nav_warn};
use crate::outcome::{MoveStatus, NavError, TraversalOutcome};
use crate::shuffle::ShuffleGenerator;

/// Shortest `pls`/`smp` line that can hold a path (`File=x`).
const PLS_MIN_LINE: usize = 6;

/// Play-list file format, chosen by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PlaylistKind {
    /// Extended or plain M3U.
    M3u,
    /// Winamp PLS.
    Pls,
    /// SMP list (`File=` lines).
    Smp,
}

impl PlaylistKind {
    /// Format of the selected file, or `None` when it is not a play-list.
    pub fn detect<N: Navigator>(nav: &N) -> Option<Self> {
        if !nav.has_selection() || nav.is_dir() {
            return None;
        }
        [Self::M3u, Self::Pls, Self::Smp]
            .into_iter()
            .find(|kind| nav.check_extension(kind.extension()))
    }

    /// File extension of the format.
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::M3u => "m3u",
            Self::Pls => "pls",
            Self::Smp => "smp",
        }
    }

    /// Path held by `line`, or `None` for comments and other lines.
    ///
    /// ```
    /// use navigation::PlaylistKind;
    ///
    /// assert_eq!(PlaylistKind::M3u.parse_line("a/b.mp3"), Some("a/b.mp3"));
    /// assert_eq!(PlaylistKind::M3u.parse_line("#EXTINF:12,Title"), None);
    /// assert_eq!(PlaylistKind::Pls.parse_line("File12=c.mp3"), Some("c.mp3"));
    /// assert_eq!(PlaylistKind::Pls.parse_line("Title1=Song"), None);
    /// ```
    #[must_use]
    pub fn parse_line(self, line: &str) -> Option<&str> {
        let line = line.trim_end_matches(['\r', '\n']);
        match self {
            Self::M3u => {
                if line.len() < 2 || line.starts_with('#') {
                    return None;
                }
                Some(line)
            }
            Self::Pls | Self::Smp => {
                if line.len() < PLS_MIN_LINE || !line.starts_with("File") {
                    return None;
                }
                // Up to three digits between `File` and `=`.
                let rest = line.get(4..)?;
                let eq = rest.find('=')?;
                if eq > 3 {
                    return None;
                }
                rest.get(eq.checked_add(1)?..)
            }
        }
    }
}

/// Open play-list file and the 1-based index of the selected entry.
#[derive(Debug, Clone)]
pub(crate) struct PlaylistReader {
    kind: PlaylistKind,
    size: u16,
    /// Path lines read since the last rewind; `0` right after a rewind.
    selected: u16,
    line: Line,
}

impl PlaylistReader {
    /// Open the selected play-list file and count its entries.
    pub(crate) fn open<N: Navigator>(nav: &mut N) -> Result<Self, NavError> {
        let kind = PlaylistKind::detect(nav).ok_or(NavError::NotAPlaylist)?;
        nav.open_text()?;
        let mut reader = Self {
            kind,
            size: 0,
            selected: 0,
            line: Line::new(),
        };
        let counted = reader.count(nav);
        match counted {
            Ok(size) => {
                reader.size = size;
                nav_debug!("play-list opened: {} entries", size);
                Ok(reader)
            }
            Err(e) => {
                nav.close_text();
                Err(e.into())
            }
        }
    }

    fn count<N: Navigator>(&mut self, nav: &mut N) -> Result<u16, FsError> {
        let mut size: u16 = 0;
        while nav.read_line(&mut self.line)? {
            if self.kind.parse_line(self.line.as_str()).is_some() {
                size = size.saturating_add(1);
            }
        }
        nav.rewind_text()?;
        Ok(size)
    }

    pub(crate) const fn size(&self) -> u16 {
        self.size
    }

    /// Select entry `n` (1-based). Returns `false` when `n` is outside the
    /// list; a dead path leaves nothing selected and still returns `true`.
    pub(crate) fn set_pos<N: Navigator>(
        &mut self,
        nav: &mut N,
        n: u16,
    ) -> Result<bool, MoveStatus> {
        if n == 0 || n > self.size {
            return Ok(false);
        }
        if n == self.selected {
            return Ok(true);
        }
        if n < self.selected {
            nav.rewind_text()?;
            self.selected = 0;
        }
        while self.selected < n {
            if !nav.read_line(&mut self.line)? {
                // File shorter than when it was counted.
                return Ok(false);
            }
            let Some(path) = self.kind.parse_line(self.line.as_str()) else {
                continue;
            };
            self.selected = self.selected.saturating_add(1);
            if self.selected == n {
                match nav.select_path(path) {
                    Ok(()) | Err(FsError::NotFound | FsError::InvalidPath) => {}
                    Err(e) => return Err(e.into()),
                }
            }
        }
        Ok(true)
    }

    /// Close the file; the play-list itself is selected again.
    pub(crate) fn close<N: Navigator>(&mut self, nav: &mut N) {
        nav.close_text();
        self.selected = 0;
    }

    /// Move to the next or previous playable entry, or to a random one.
    ///
    /// Without shuffle a dead entry is skipped; crossing an end of the list
    /// wraps once and reports [`MoveStatus::OkLooped`], a second wrap means
    /// no entry is playable and reports [`MoveStatus::DiskError`].
    pub(crate) fn mov<N: Navigator>(
        &mut self,
        nav: &mut N,
        filter: &str,
        heartbeat: fn(),
        list: &mut ListState,
        rng: Option<&mut ShuffleGenerator>,
        direction: Direction,
    ) -> TraversalOutcome {
        let result = match rng {
            Some(rng) => self.mov_shuffled(nav, filter, heartbeat, list, rng),
            None => self.mov_linear(nav, filter, heartbeat, list, direction),
        };
        let status = result.unwrap_or_else(|status| status);
        if let MoveStatus::DiskError | MoveStatus::NoDiskPresent = status {
            nav_warn!("play-list move aborted: {}", status);
        }
        TraversalOutcome::new(status)
    }

    fn mov_linear<N: Navigator>(
        &mut self,
        nav: &mut N,
        filter: &str,
        heartbeat: fn(),
        list: &mut ListState,
        direction: Direction,
    ) -> Result<MoveStatus, MoveStatus> {
        let mut pos = list.position;
        let mut looped = false;
        loop {
            heartbeat();
            pos = match direction {
                Direction::Next => pos.wrapping_add(1),
                Direction::Prev => pos.wrapping_sub(1),
            };
            if !self.set_pos(nav, pos.wrapping_add(1))? {
                if looped {
                    nav_debug!("play-list holds no playable entry");
                    return Err(MoveStatus::DiskError);
                }
                looped = true;
                pos = match direction {
                    Direction::Next => POS_NONE,
                    Direction::Prev => self.size,
                };
                continue;
            }
            if playable(nav, filter) {
                break;
            }
        }
        list.position = pos;
        if looped {
            nav_debug!("play-list wrapped");
            return Ok(MoveStatus::OkLooped);
        }
        Ok(MoveStatus::Ok)
    }

    fn mov_shuffled<N: Navigator>(
        &mut self,
        nav: &mut N,
        filter: &str,
        heartbeat: fn(),
        list: &mut ListState,
        rng: &mut ShuffleGenerator,
    ) -> Result<MoveStatus, MoveStatus> {
        // The list is flat: every draw is reached directly.
        rng.take_restart();
        let mut pos = list.position;
        for _ in 0..=self.size {
            heartbeat();
            pos = rng.next(pos, self.size);
            if self.set_pos(nav, pos.wrapping_add(1))? && playable(nav, filter) {
                list.position = pos;
                return Ok(MoveStatus::Ok);
            }
        }
        Ok(MoveStatus::Empty)
    }
}

pub(crate) fn playable<N: Navigator>(nav: &N, filter: &str) -> bool {
    nav.has_selection() && !nav.is_dir() && nav.check_extension(filter)
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

    const M3U: &str = "#EXTM3U\n#EXTINF:1,One\na.mp3\nb.mp3\nmissing.mp3\ncover.jpg\nsub/c.mp3\n";

    fn volume() -> MockVolume {
        MockVolume::new()
            .with_drive(&["/music/a.mp3", "/music/b.mp3", "/music/cover.jpg", "/music/sub/c.mp3"])
            .with_text(0, "/music/list.m3u", M3U)
    }

    fn open(v: &mut MockVolume) -> PlaylistReader {
        v.select_path_abs("/music/list.m3u").unwrap();
        PlaylistReader::open(v).unwrap()
    }

    #[test]
    fn test_parse_m3u() {
        assert_eq!(PlaylistKind::M3u.parse_line("x.mp3\r"), Some("x.mp3"));
        assert_eq!(PlaylistKind::M3u.parse_line("x"), None);
        assert_eq!(PlaylistKind::M3u.parse_line("#EXTM3U"), None);
    }

    #[test]
    fn test_parse_pls_and_smp() {
        assert_eq!(PlaylistKind::Pls.parse_line("File1=a.mp3"), Some("a.mp3"));
        assert_eq!(PlaylistKind::Pls.parse_line("File123=a.mp3"), Some("a.mp3"));
        assert_eq!(PlaylistKind::Pls.parse_line("File1234=a.mp3"), None);
        assert_eq!(PlaylistKind::Smp.parse_line("File=a.mp3"), Some("a.mp3"));
        assert_eq!(PlaylistKind::Pls.parse_line("File=x"), Some("x"));
        assert_eq!(PlaylistKind::Pls.parse_line("Length1=12"), None);
        assert_eq!(PlaylistKind::Pls.parse_line("File1"), None);
    }

    #[test]
    fn test_detect_by_extension() {
        let mut v = MockVolume::new()
            .with_drive(&["/a.mp3"])
            .with_text(0, "/l.PLS", "File1=a.mp3\n");
        v.select_path_abs("/l.PLS").unwrap();
        assert_eq!(PlaylistKind::detect(&v), Some(PlaylistKind::Pls));
        v.select_path_abs("/a.mp3").unwrap();
        assert_eq!(PlaylistKind::detect(&v), None);
        assert!(matches!(PlaylistReader::open(&mut v), Err(NavError::NotAPlaylist)));
    }

    #[test]
    fn test_open_counts_path_lines() {
        let mut v = volume();
        let r = open(&mut v);
        assert_eq!(r.size(), 5);
    }

    #[test]
    fn test_set_pos_forward_and_back() {
        let mut v = volume();
        let mut r = open(&mut v);
        assert!(r.set_pos(&mut v, 2).unwrap());
        assert_eq!(v.selected_path().as_deref(), Some("/music/b.mp3"));
        assert!(r.set_pos(&mut v, 5).unwrap());
        assert_eq!(v.selected_path().as_deref(), Some("/music/sub/c.mp3"));
        assert!(r.set_pos(&mut v, 1).unwrap());
        assert_eq!(v.selected_path().as_deref(), Some("/music/a.mp3"));
        assert!(!r.set_pos(&mut v, 0).unwrap());
        assert!(!r.set_pos(&mut v, 6).unwrap());
        assert!(r.set_pos(&mut v, 3).unwrap());
        assert!(!v.has_selection());
    }

    #[test]
    fn test_linear_move_skips_dead_entries() {
        let mut v = volume();
        let mut r = open(&mut v);
        let mut list = ListState { position: 1, size: r.size() };
        r.set_pos(&mut v, 2).unwrap();
        let o = r.mov(&mut v, "mp3", || {}, &mut list, None, Direction::Next);
        assert_eq!(o.status, MoveStatus::Ok);
        assert_eq!(list.position, 4);
        assert_eq!(v.selected_path().as_deref(), Some("/music/sub/c.mp3"));
        let o = r.mov(&mut v, "mp3", || {}, &mut list, None, Direction::Next);
        assert_eq!(o.status, MoveStatus::OkLooped);
        assert_eq!(list.position, 0);
        let o = r.mov(&mut v, "mp3", || {}, &mut list, None, Direction::Prev);
        assert_eq!(o.status, MoveStatus::OkLooped);
        assert_eq!(list.position, 4);
        let o = r.mov(&mut v, "mp3", || {}, &mut list, None, Direction::Prev);
        assert_eq!(o.status, MoveStatus::Ok);
        assert_eq!(list.position, 1);
    }

    #[test]
    fn test_nothing_playable_is_disk_error() {
        let mut v = MockVolume::new()
            .with_drive(&["/a.wav"])
            .with_text(0, "/l.m3u", "a.wav\nmissing.mp3\n");
        v.select_path_abs("/l.m3u").unwrap();
        let mut r = PlaylistReader::open(&mut v).unwrap();
        let mut list = ListState { position: POS_NONE, size: r.size() };
        let o = r.mov(&mut v, "mp3", || {}, &mut list, None, Direction::Next);
        assert_eq!(o.status, MoveStatus::DiskError);
        let mut rng = ShuffleGenerator::new(1);
        let o = r.mov(&mut v, "mp3", || {}, &mut list, Some(&mut rng), Direction::Next);
        assert_eq!(o.status, MoveStatus::Empty);
    }

    #[test]
    fn test_shuffled_move_lands_on_playable() {
        let mut v = volume();
        let mut r = open(&mut v);
        let mut list = ListState { position: POS_NONE, size: r.size() };
        let mut rng = ShuffleGenerator::new(3);
        for _ in 0..20 {
            let o = r.mov(&mut v, "mp3", || {}, &mut list, Some(&mut rng), Direction::Next);
            assert_eq!(o.status, MoveStatus::Ok);
            assert!([0, 1, 4].contains(&list.position), "{}", list.position);
        }
    }

    #[test]
    fn test_close_reselects_list() {
        let mut v = volume();
        let mut r = open(&mut v);
        r.set_pos(&mut v, 1).unwrap();
        r.close(&mut v);
        assert_eq!(v.selected_path().as_deref(), Some("/music/list.m3u"));
    }
}
