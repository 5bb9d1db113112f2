//! End-to-end navigation scenarios over the in-memory volume.

#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::indexing_slicing,
    missing_docs
)]

use navigation::{
    EntryOrder, Mode, MoveOptions, MoveStatus, NavConfig, NavError, NavigationSession, Shuffle,
    SourceKind,
};
use platform::mocks::MockVolume;
use platform::Direction;

fn config(mode: Mode) -> NavConfig {
    NavConfig::new("mp3").unwrap().with_mode(mode)
}

fn selected(s: &NavigationSession<MockVolume>) -> String {
    s.navigator().selected_path().unwrap_or_default()
}

#[test]
fn subtree_walk_from_root() {
    let volume = MockVolume::new().with_drive(&["/A/1.mp3", "/A/2.mp3", "/B/3.mp3"]);
    let mut s = NavigationSession::new(volume, config(Mode::DirectoryAndSubtree));
    s.open(false, 0).unwrap();
    assert_eq!((s.getnb(), s.getpos()), (3, 0));
    assert_eq!(selected(&s), "/A/1.mp3");

    let o = s.mov(Direction::Next, MoveOptions::None);
    assert_eq!(o.status, MoveStatus::Ok);
    assert!(!o.folder_changed);
    assert_eq!((s.getpos(), selected(&s).as_str()), (1, "/A/2.mp3"));

    let o = s.mov(Direction::Next, MoveOptions::None);
    assert_eq!(o.status, MoveStatus::Ok);
    assert!(o.folder_changed);
    assert_eq!((s.getpos(), selected(&s).as_str()), (2, "/B/3.mp3"));

    let o = s.mov(Direction::Next, MoveOptions::None);
    assert_eq!(o.status, MoveStatus::OkLooped);
    assert_eq!((s.getpos(), selected(&s).as_str()), (0, "/A/1.mp3"));
    assert_eq!(s.getnb(), 3);
}

#[test]
fn backward_walk_wraps_to_last() {
    let volume = MockVolume::new().with_drive(&["/A/1.mp3", "/A/2.mp3", "/B/3.mp3"]);
    let mut s = NavigationSession::new(volume, config(Mode::SingleDisk));
    s.open(false, 0).unwrap();
    let o = s.mov(Direction::Prev, MoveOptions::None);
    assert_eq!(o.status, MoveStatus::OkLooped);
    assert_eq!((s.getpos(), selected(&s).as_str()), (2, "/B/3.mp3"));
    let o = s.mov(Direction::Prev, MoveOptions::None);
    assert_eq!(o.status, MoveStatus::Ok);
    assert_eq!((s.getpos(), selected(&s).as_str()), (1, "/A/2.mp3"));
}

#[test]
fn single_file_shuffle_never_empty() {
    let volume = MockVolume::new().with_drive(&["/only.mp3"]);
    let mut s = NavigationSession::new(volume, config(Mode::SingleDisk).with_shuffle(Shuffle::On));
    s.open(false, 0).unwrap();
    assert_eq!(s.getnb(), 1);
    for _ in 0..10 {
        let o = s.mov(Direction::Next, MoveOptions::None);
        assert_eq!(o.status, MoveStatus::Ok);
        assert_eq!(s.getpos(), 0);
        assert_eq!(selected(&s), "/only.mp3");
    }
}

#[test]
fn shuffle_visits_every_file_once_per_pass() {
    let paths = [
        "/a/1.mp3",
        "/a/2.mp3",
        "/a/3.mp3",
        "/b/4.mp3",
        "/b/c/5.mp3",
        "/6.mp3",
        "/7.mp3",
        "/d/8.mp3",
    ];
    let volume = MockVolume::new().with_drive(&paths);
    let mut s = NavigationSession::new(
        volume,
        config(Mode::SingleDisk).with_shuffle(Shuffle::On).with_seed(99),
    );
    s.open(false, 0).unwrap();
    assert_eq!(s.getnb(), 8);
    for _ in 0..24 {
        let before = s.getpos();
        let o = s.mov(Direction::Next, MoveOptions::None);
        assert!(o.is_ok(), "{:?}", o.status);
        assert!(s.getpos() < 8);
        assert_ne!(s.getpos(), before);
        // The selection always matches the position in list order.
        let expected = s.navigator().drive_paths(0)[usize::from(s.getpos())].clone();
        assert_eq!(selected(&s), expected);
    }
}

#[test]
fn reopen_is_idempotent() {
    let volume =
        MockVolume::new().with_drive(&["/A/1.mp3", "/A/B/2.mp3", "/A/B/3.mp3", "/C/4.mp3"]);
    for mode in [
        Mode::AllDisks,
        Mode::SingleDisk,
        Mode::DirectoryOnly,
        Mode::DirectoryAndSubtree,
    ] {
        let mut v = volume.clone();
        v.select_path_abs("/A/B/3.mp3").unwrap();
        let mut s = NavigationSession::new(v, config(mode));
        s.open(false, 0).unwrap();
        let first = (s.getnb(), s.getpos(), selected(&s));
        s.open(false, 0).unwrap();
        assert_eq!((s.getnb(), s.getpos(), selected(&s)), first, "mode {mode}");
        assert_eq!(selected(&s), "/A/B/3.mp3");
    }
}

#[test]
fn reopen_after_moving_keeps_directory_anchor() {
    let volume = MockVolume::new().with_drive(&["/A/1.mp3", "/A/B/2.mp3", "/C/3.mp3"]);
    let mut v = volume;
    v.select_path_abs("/A/1.mp3").unwrap();
    let mut s = NavigationSession::new(v, config(Mode::DirectoryAndSubtree));
    s.open(false, 0).unwrap();
    assert_eq!(s.getnb(), 2);
    s.mov(Direction::Next, MoveOptions::None);
    assert_eq!(selected(&s), "/A/B/2.mp3");
    s.open(false, 0).unwrap();
    assert_eq!((s.getnb(), s.getpos()), (2, 1));
}

#[test]
fn directory_only_prev_at_first_file_stays_in_directory() {
    let volume =
        MockVolume::new().with_drive(&["/A/x.mp3", "/A/y.mp3", "/A/sub/z.mp3", "/top.mp3"]);
    let mut v = volume;
    v.select_path_abs("/A/x.mp3").unwrap();
    let mut s = NavigationSession::new(v, config(Mode::DirectoryOnly));
    s.open(false, 0).unwrap();
    assert_eq!((s.getnb(), s.getpos()), (2, 0));
    let level = s.dir_level();
    for _ in 0..4 {
        let o = s.mov(Direction::Prev, MoveOptions::None);
        assert!(o.is_ok());
        assert_eq!(s.navigator().current_dir(), "/A");
        assert_eq!(s.dir_level(), level);
    }
    assert_eq!(s.navigator().parent_calls(), 1);
}

#[test]
fn all_disks_spans_drives() {
    let volume = MockVolume::new()
        .with_drive(&["/1.mp3"])
        .with_drive(&["/x/"])
        .with_drive(&["/d/2.mp3", "/3.mp3"]);
    let mut s = NavigationSession::new(volume, config(Mode::AllDisks));
    s.open(false, 0).unwrap();
    assert_eq!(s.getnb(), 3);
    let mut seen = vec![selected(&s)];
    for _ in 0..3 {
        s.mov(Direction::Next, MoveOptions::None);
        seen.push(selected(&s));
    }
    assert_eq!(seen, ["/1.mp3", "/3.mp3", "/d/2.mp3", "/1.mp3"]);
}

#[test]
fn all_disks_without_files_is_empty() {
    let volume = MockVolume::new()
        .with_drive(&["/a.txt"])
        .with_drive(&["/empty/"]);
    let mut s = NavigationSession::new(volume, config(Mode::AllDisks));
    assert_eq!(s.open(false, 0), Err(NavError::Empty));
}

#[test]
fn all_disks_skips_missing_drive() {
    let mut volume = MockVolume::new()
        .with_drive(&["/1.mp3"])
        .with_drive(&["/2.mp3"]);
    volume.eject(0);
    let mut s = NavigationSession::new(volume, config(Mode::AllDisks));
    s.open(false, 0).unwrap();
    assert_eq!(s.getnb(), 1);
    assert_eq!(selected(&s), "/2.mp3");
}

#[test]
fn ejected_disk_reports_no_disk() {
    let volume = MockVolume::new().with_drive(&["/1.mp3", "/2.mp3"]);
    let mut s = NavigationSession::new(volume, config(Mode::SingleDisk));
    s.open(false, 0).unwrap();
    s.navigator_mut().eject(0);
    let o = s.mov(Direction::Next, MoveOptions::None);
    assert_eq!(o.status, MoveStatus::NoDiskPresent);
    assert_eq!(s.open(false, 0), Err(NavError::NoDisk));
}

#[test]
fn stay_in_current_dir_loops_folder() {
    let volume = MockVolume::new().with_drive(&["/A/1.mp3", "/A/2.mp3", "/B/3.mp3"]);
    let mut s = NavigationSession::new(volume, config(Mode::SingleDisk));
    s.open(false, 0).unwrap();
    s.mov(Direction::Next, MoveOptions::StayInCurrentDir);
    assert_eq!(selected(&s), "/A/2.mp3");
    let o = s.mov(Direction::Next, MoveOptions::StayInCurrentDir);
    assert_eq!(o.status, MoveStatus::Ok);
    assert_eq!((s.getpos(), selected(&s).as_str()), (0, "/A/1.mp3"));
}

#[test]
fn dirs_first_order() {
    let volume = MockVolume::new().with_drive(&["/A/1.mp3", "/top.mp3"]);
    let cfg = config(Mode::SingleDisk).with_order(EntryOrder::DirsFirst);
    let mut s = NavigationSession::new(volume, cfg);
    s.open(false, 0).unwrap();
    assert_eq!(selected(&s), "/A/1.mp3");
    s.mov(Direction::Next, MoveOptions::None);
    assert_eq!(selected(&s), "/top.mp3");
}

#[test]
fn setmode_changes_list() {
    let volume = MockVolume::new().with_drive(&["/A/1.mp3", "/A/2.mp3", "/B/3.mp3"]);
    let mut v = volume;
    v.select_path_abs("/B/3.mp3").unwrap();
    let mut s = NavigationSession::new(v, config(Mode::SingleDisk));
    s.open(false, 0).unwrap();
    assert_eq!((s.getnb(), s.getpos()), (3, 2));
    s.setmode(Mode::DirectoryOnly).unwrap();
    assert_eq!(s.getmode(), Mode::DirectoryOnly);
    assert_eq!((s.getnb(), s.getpos()), (1, 0));
    assert_eq!(selected(&s), "/B/3.mp3");
}

#[test]
fn playlist_two_entries_wraps() {
    let volume = MockVolume::new()
        .with_drive(&["/m/a.mp3", "/m/b.mp3"])
        .with_text(0, "/m/list.m3u", "#EXTM3U\na.mp3\nb.mp3\n");
    let mut v = volume;
    v.select_path_abs("/m/list.m3u").unwrap();
    let mut s = NavigationSession::new(v, config(Mode::SingleDisk));
    s.open(true, 0).unwrap();
    assert_eq!(s.source(), SourceKind::PlayList);
    assert_eq!((s.getnb(), s.getpos()), (2, 0));
    s.setpos(1).unwrap();
    assert_eq!(selected(&s), "/m/b.mp3");
    let o = s.mov(Direction::Next, MoveOptions::None);
    assert_eq!(o.status, MoveStatus::OkLooped);
    assert_eq!((s.getpos(), selected(&s).as_str()), (0, "/m/a.mp3"));
    assert_eq!(s.close(), 0);
    assert_eq!(selected(&s), "/m/list.m3u");
}

#[test]
fn playlist_start_position_and_dead_entries() {
    let volume = MockVolume::new()
        .with_drive(&["/a.mp3", "/c.mp3"])
        .with_text(
            0,
            "/l.pls",
            "[playlist]\nFile1=a.mp3\nFile2=gone.mp3\nFile3=c.mp3\nNumberOfEntries=3\n",
        );
    let mut v = volume;
    v.select_path_abs("/l.pls").unwrap();
    let mut s = NavigationSession::new(v, config(Mode::SingleDisk));
    s.open(true, 2).unwrap();
    assert_eq!((s.getnb(), s.getpos()), (3, 2));
    assert_eq!(selected(&s), "/c.mp3");
    s.close();
    // A dead start entry falls back to the first playable one.
    s.open(true, 1).unwrap();
    assert_eq!((s.getpos(), selected(&s).as_str()), (0, "/a.mp3"));
    let o = s.mov(Direction::Next, MoveOptions::None);
    assert_eq!(o.status, MoveStatus::Ok);
    assert_eq!((s.getpos(), selected(&s).as_str()), (2, "/c.mp3"));
    let o = s.mov(Direction::Prev, MoveOptions::None);
    assert_eq!(o.status, MoveStatus::Ok);
    assert_eq!((s.getpos(), selected(&s).as_str()), (0, "/a.mp3"));
}

#[test]
fn playlist_setpos_on_dead_entry_keeps_selection() {
    let volume = MockVolume::new()
        .with_drive(&["/a.mp3", "/c.mp3"])
        .with_text(0, "/l.m3u", "a.mp3\ngone.mp3\nc.mp3\n");
    let mut v = volume;
    v.select_path_abs("/l.m3u").unwrap();
    let mut s = NavigationSession::new(v, config(Mode::SingleDisk));
    s.open(true, 0).unwrap();
    assert_eq!(s.getnb(), 3);
    assert_eq!(s.setpos(1), Err(NavError::NotPlayable));
    assert_eq!((s.getpos(), selected(&s).as_str()), (0, "/a.mp3"));
    s.setpos(2).unwrap();
    assert_eq!((s.getpos(), selected(&s).as_str()), (2, "/c.mp3"));
    assert_eq!(s.setpos(1), Err(NavError::NotPlayable));
    assert_eq!((s.getpos(), selected(&s).as_str()), (2, "/c.mp3"));
    s.setpos(0).unwrap();
    assert_eq!((s.getpos(), selected(&s).as_str()), (0, "/a.mp3"));
    assert_eq!(s.setpos(3), Err(NavError::OutOfRange));
}

#[test]
fn read_failure_aborts_move_with_disk_error() {
    let volume = MockVolume::new().with_drive(&["/a.mp3", "/b.mp3"]);
    let mut s = NavigationSession::new(volume, config(Mode::SingleDisk));
    s.open(false, 0).unwrap();
    s.navigator_mut().fail_reads(true);
    let o = s.mov(Direction::Next, MoveOptions::None);
    assert_eq!(o.status, MoveStatus::DiskError);
    assert_eq!(s.getpos(), 0);
    assert_eq!(s.setpos(1), Err(NavError::Disk));
    s.navigator_mut().fail_reads(false);
    let o = s.mov(Direction::Next, MoveOptions::None);
    assert_eq!(o.status, MoveStatus::Ok);
    assert_eq!((s.getpos(), selected(&s).as_str()), (1, "/b.mp3"));
}

#[test]
fn empty_playlist_is_rejected() {
    let volume = MockVolume::new()
        .with_drive(&["/a.mp3"])
        .with_text(0, "/l.m3u", "#EXTM3U\n# nothing\n");
    let mut v = volume;
    v.select_path_abs("/l.m3u").unwrap();
    let mut s = NavigationSession::new(v, config(Mode::SingleDisk));
    assert_eq!(s.open(true, 0), Err(NavError::Empty));
    assert_eq!(selected(&s), "/l.m3u");
}
