//! Session configuration and list-shape enums.

use heapless::String;

/// Position sentinel: no entry of the list is selected.
pub const POS_NONE: u16 = 0xFFFF;

/// Position and size of the logical list, shared by both walkers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ListState {
    /// 0-based index of the selected entry, or [`POS_NONE`].
    pub position: u16,
    /// Number of entries; `0` while unknown.
    pub size: u16,
}

impl ListState {
    pub(crate) const fn unknown() -> Self {
        Self {
            position: POS_NONE,
            size: 0,
        }
    }
}

/// Maximum length in bytes of the extension filter.
pub const FILTER_CAPACITY: usize = 32;

/// Extension filter handed to the directory cursor, e.g. `"mp3,wav"`.
pub type Filter = String<FILTER_CAPACITY>;

/// Directory limitation of a directory-backed list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
    /// Every file of every mounted drive; wraps from one drive to the next.
    #[default]
    AllDisks,
    /// Every file of the current drive.
    SingleDisk,
    /// Files of the traversal root directory only.
    DirectoryOnly,
    /// Files of the traversal root directory and all its sub-directories.
    DirectoryAndSubtree,
}

impl Mode {
    /// `true` for the modes anchored at a directory rather than a drive root.
    #[must_use]
    pub const fn is_directory_scoped(self) -> bool {
        matches!(self, Self::DirectoryOnly | Self::DirectoryAndSubtree)
    }

    /// Short lowercase name, as used on the xtask command line.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AllDisks => "disks",
            Self::SingleDisk => "disk",
            Self::DirectoryOnly => "dir",
            Self::DirectoryAndSubtree => "subtree",
        }
    }
}

impl core::fmt::Display for Mode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Shuffle state of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Shuffle {
    /// Entries are visited in list order.
    #[default]
    Off,
    /// Entries are visited in a pseudo-random order without repeats.
    On,
}

impl Shuffle {
    /// `true` for [`Shuffle::On`].
    #[must_use]
    pub const fn is_on(self) -> bool {
        matches!(self, Self::On)
    }
}

impl From<bool> for Shuffle {
    fn from(on: bool) -> Self {
        if on {
            Self::On
        } else {
            Self::Off
        }
    }
}

impl core::fmt::Display for Shuffle {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Off => f.write_str("off"),
            Self::On => f.write_str("on"),
        }
    }
}

/// Which walker backs a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SourceKind {
    /// Files found by walking directories.
    #[default]
    Directory,
    /// Entries of an open play-list file.
    PlayList,
}

/// Place of a directory's own files relative to its sub-directories in the
/// list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EntryOrder {
    /// A directory's files are listed before the content of its
    /// sub-directories.
    #[default]
    FilesFirst,
    /// The content of the sub-directories is listed before the directory's
    /// own files.
    DirsFirst,
}

fn no_heartbeat() {}

/// Runtime configuration of a [`NavigationSession`](crate::NavigationSession).
///
/// # Example
///
/// ```
/// use navigation::{Mode, NavConfig, Shuffle};
///
/// let config = NavConfig::new("mp3,wav")
///     .unwrap()
///     .with_mode(Mode::DirectoryAndSubtree)
///     .with_shuffle(Shuffle::On)
///     .with_seed(7);
/// assert_eq!(config.filter(), "mp3,wav");
/// ```
#[derive(Debug, Clone)]
pub struct NavConfig {
    filter: Filter,
    order: EntryOrder,
    mode: Mode,
    shuffle: Shuffle,
    seed: u64,
    heartbeat: fn(),
}

impl NavConfig {
    /// Default shuffle seed.
    pub const DEFAULT_SEED: u64 = 0x5EED_0F_5EED;

    /// Configuration with `filter` and defaults for everything else.
    ///
    /// Returns `None` when `filter` exceeds [`FILTER_CAPACITY`] bytes.
    pub fn new(filter: &str) -> Option<Self> {
        let mut f = Filter::new();
        f.push_str(filter).ok()?;
        Some(Self {
            filter: f,
            order: EntryOrder::default(),
            mode: Mode::default(),
            shuffle: Shuffle::default(),
            seed: Self::DEFAULT_SEED,
            heartbeat: no_heartbeat,
        })
    }

    /// Set the entry order.
    #[must_use]
    pub const fn with_order(mut self, order: EntryOrder) -> Self {
        self.order = order;
        self
    }

    /// Set the initial mode.
    #[must_use]
    pub const fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    /// Set the initial shuffle state.
    #[must_use]
    pub const fn with_shuffle(mut self, shuffle: Shuffle) -> Self {
        self.shuffle = shuffle;
        self
    }

    /// Set the seed of the shuffle RNG.
    #[must_use]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Hook called once per walker iteration (watchdog feed on hardware).
    #[must_use]
    pub const fn with_heartbeat(mut self, heartbeat: fn()) -> Self {
        self.heartbeat = heartbeat;
        self
    }

    /// Extension filter.
    #[must_use]
    pub fn filter(&self) -> &str {
        self.filter.as_str()
    }

    /// Entry order.
    #[must_use]
    pub const fn order(&self) -> EntryOrder {
        self.order
    }

    /// Initial mode.
    #[must_use]
    pub const fn mode(&self) -> Mode {
        self.mode
    }

    /// Initial shuffle state.
    #[must_use]
    pub const fn shuffle(&self) -> Shuffle {
        self.shuffle
    }

    /// Shuffle RNG seed.
    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// Heartbeat hook.
    #[must_use]
    pub const fn heartbeat(&self) -> fn() {
        self.heartbeat
    }
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            filter: Filter::new(),
            order: EntryOrder::default(),
            mode: Mode::default(),
            shuffle: Shuffle::default(),
            seed: Self::DEFAULT_SEED,
            heartbeat: no_heartbeat,
        }
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

    #[test]
    fn test_filter_too_long() {
        let long = "x".repeat(FILTER_CAPACITY + 1);
        assert!(NavConfig::new(&long).is_none());
    }

    #[test]
    fn test_builder_keeps_fields() {
        let c = NavConfig::new("flac")
            .unwrap()
            .with_order(EntryOrder::DirsFirst)
            .with_mode(Mode::SingleDisk)
            .with_seed(42);
        assert_eq!(c.filter(), "flac");
        assert_eq!(c.order(), EntryOrder::DirsFirst);
        assert_eq!(c.mode(), Mode::SingleDisk);
        assert_eq!(c.shuffle(), Shuffle::Off);
        assert_eq!(c.seed(), 42);
    }

    #[test]
    fn test_default_accepts_everything() {
        let c = NavConfig::default();
        assert_eq!(c.filter(), "");
        assert_eq!(c.mode(), Mode::AllDisks);
    }

    #[test]
    fn test_mode_scope() {
        assert!(Mode::DirectoryOnly.is_directory_scoped());
        assert!(Mode::DirectoryAndSubtree.is_directory_scoped());
        assert!(!Mode::AllDisks.is_directory_scoped());
    }
}
