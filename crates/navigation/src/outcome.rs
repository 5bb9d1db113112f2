//! Move results and session errors.

use platform::FsError;

/// Status of a move through the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MoveStatus {
    /// A playable file is selected.
    Ok,
    /// A playable file is selected after crossing the end or the beginning of
    /// the list (or, in [`Mode::AllDisks`](crate::Mode::AllDisks), of the
    /// last drive).
    OkLooped,
    /// No playable entry under the current mode and filter.
    Empty,
    /// The medium failed during the move.
    DiskError,
    /// The drive disappeared during the move.
    NoDiskPresent,
}

impl MoveStatus {
    /// `true` for [`MoveStatus::Ok`] and [`MoveStatus::OkLooped`].
    #[must_use]
    pub const fn is_ok(self) -> bool {
        matches!(self, Self::Ok | Self::OkLooped)
    }
}

impl From<FsError> for MoveStatus {
    fn from(e: FsError) -> Self {
        match e {
            FsError::NoDisk => Self::NoDiskPresent,
            FsError::NotFound | FsError::Disk | FsError::NotOpen | FsError::InvalidPath => {
                Self::DiskError
            }
        }
    }
}

impl core::fmt::Display for MoveStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Ok => write!(f, "ok"),
            Self::OkLooped => write!(f, "ok (looped)"),
            Self::Empty => write!(f, "empty list"),
            Self::DiskError => write!(f, "disk error"),
            Self::NoDiskPresent => write!(f, "no disk present"),
        }
    }
}

/// Result of every move: the status plus whether a directory boundary was
/// crossed on the way.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TraversalOutcome {
    /// Move status.
    pub status: MoveStatus,
    /// A directory was entered or left (or the drive changed) during the move.
    pub folder_changed: bool,
}

impl TraversalOutcome {
    /// Outcome with `status` and no folder change.
    #[must_use]
    pub const fn new(status: MoveStatus) -> Self {
        Self {
            status,
            folder_changed: false,
        }
    }

    /// `true` when a playable file is selected.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.status.is_ok()
    }
}

/// Extra behaviour requested for one move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MoveOptions {
    /// Follow the mode boundaries.
    #[default]
    None,
    /// Wrap inside the directory of the current file (repeat-folder and
    /// shuffle-within-folder). The move reports [`MoveStatus::Ok`] on wrap.
    StayInCurrentDir,
}

impl MoveOptions {
    /// `true` for [`MoveOptions::StayInCurrentDir`].
    #[must_use]
    pub const fn stays_in_dir(self) -> bool {
        matches!(self, Self::StayInCurrentDir)
    }
}

/// Errors of the session operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum NavError {
    /// The list holds no playable entry.
    Empty,
    /// No drive could be mounted.
    NoDisk,
    /// The medium failed.
    Disk,
    /// The selected file is not an `m3u`, `pls` or `smp` play-list.
    NotAPlaylist,
    /// The requested position is outside the list.
    OutOfRange,
    /// The requested play-list entry does not resolve to a playable file.
    NotPlayable,
    /// A move stopped with a status other than `Ok`.
    Move(MoveStatus),
}

impl From<FsError> for NavError {
    fn from(e: FsError) -> Self {
        match e {
            FsError::NoDisk => Self::NoDisk,
            FsError::NotFound | FsError::Disk | FsError::NotOpen | FsError::InvalidPath => {
                Self::Disk
            }
        }
    }
}

impl From<MoveStatus> for NavError {
    fn from(status: MoveStatus) -> Self {
        match status {
            MoveStatus::Empty => Self::Empty,
            MoveStatus::DiskError => Self::Disk,
            MoveStatus::NoDiskPresent => Self::NoDisk,
            MoveStatus::Ok | MoveStatus::OkLooped => Self::Move(status),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for NavError {}

impl core::fmt::Display for NavError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Empty => write!(f, "No playable file in list"),
            Self::NoDisk => write!(f, "No disk present"),
            Self::Disk => write!(f, "Disk error"),
            Self::NotAPlaylist => write!(f, "Selected file is not a play-list"),
            Self::OutOfRange => write!(f, "Position out of range"),
            Self::NotPlayable => write!(f, "Entry is not playable"),
            Self::Move(status) => write!(f, "Move stopped: {status}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fs_error_mapping() {
        assert_eq!(MoveStatus::from(FsError::NoDisk), MoveStatus::NoDiskPresent);
        assert_eq!(MoveStatus::from(FsError::Disk), MoveStatus::DiskError);
        assert_eq!(NavError::from(FsError::NoDisk), NavError::NoDisk);
    }

    #[test]
    fn test_status_to_error() {
        assert_eq!(NavError::from(MoveStatus::Empty), NavError::Empty);
        assert_eq!(NavError::from(MoveStatus::DiskError), NavError::Disk);
        assert_eq!(
            NavError::from(MoveStatus::OkLooped),
            NavError::Move(MoveStatus::OkLooped)
        );
    }

    #[test]
    fn test_is_ok() {
        assert!(MoveStatus::Ok.is_ok());
        assert!(MoveStatus::OkLooped.is_ok());
        assert!(!MoveStatus::Empty.is_ok());
        assert!(!TraversalOutcome::new(MoveStatus::DiskError).is_ok());
    }

    #[test]
    fn test_display() {
        assert_eq!(NavError::OutOfRange.to_string(), "Position out of range");
        assert_eq!(
            NavError::Move(MoveStatus::Empty).to_string(),
            "Move stopped: empty list"
        );
    }
}
