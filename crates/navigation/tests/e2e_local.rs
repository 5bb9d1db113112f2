//! Navigation over real directories through `LocalVolume`.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic, missing_docs)]

use std::fs;
use std::path::Path;

use navigation::{Mode, MoveOptions, MoveStatus, NavConfig, NavigationSession};
use platform::storage_local::LocalVolume;
use platform::{Direction, EntryKind, Navigator};
use tempfile::TempDir;

fn touch(root: &Path, rel: &str) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, b"").unwrap();
}

fn relative(s: &NavigationSession<LocalVolume>, root: &Path) -> String {
    let path = s.navigator().selected_path().unwrap();
    path.strip_prefix(root)
        .unwrap()
        .to_string_lossy()
        .replace('\\', "/")
}

#[test]
fn walks_sorted_tree_files_first() {
    let tmp = TempDir::new().unwrap();
    for rel in ["b.mp3", "a.mp3", "cover.jpg", "Album/02.mp3", "Album/01.mp3", "Album/CD2/01.mp3"] {
        touch(tmp.path(), rel);
    }
    let volume = LocalVolume::new([tmp.path()]).unwrap();
    let config = NavConfig::new("mp3").unwrap().with_mode(Mode::SingleDisk);
    let mut s = NavigationSession::new(volume, config);
    s.open(false, 0).unwrap();
    assert_eq!(s.getnb(), 5);

    let mut seen = vec![relative(&s, tmp.path())];
    for _ in 0..5 {
        s.mov(Direction::Next, MoveOptions::None);
        seen.push(relative(&s, tmp.path()));
    }
    assert_eq!(
        seen,
        ["a.mp3", "b.mp3", "Album/01.mp3", "Album/02.mp3", "Album/CD2/01.mp3", "a.mp3"]
    );
}

#[test]
fn playlist_resolves_relative_and_rooted_paths() {
    let tmp = TempDir::new().unwrap();
    touch(tmp.path(), "music/a.mp3");
    touch(tmp.path(), "other/b.mp3");
    fs::write(
        tmp.path().join("music/list.m3u"),
        b"#EXTM3U\r\na.mp3\r\n../other/b.mp3\r\n/music/a.mp3\r\n",
    )
    .unwrap();
    let mut volume = LocalVolume::new([tmp.path()]).unwrap();
    volume.select_first(EntryKind::Dir).unwrap();
    volume.enter_dir().unwrap();
    volume.select_last(EntryKind::File).unwrap();
    assert!(volume.selected_path().unwrap().ends_with("list.m3u"));

    let mut s = NavigationSession::new(volume, NavConfig::new("mp3").unwrap());
    s.open(true, 0).unwrap();
    assert_eq!((s.getnb(), s.getpos()), (3, 0));
    assert_eq!(relative(&s, tmp.path()), "music/a.mp3");
    assert_eq!(s.mov(Direction::Next, MoveOptions::None).status, MoveStatus::Ok);
    assert_eq!(relative(&s, tmp.path()), "other/b.mp3");
    assert_eq!(s.mov(Direction::Next, MoveOptions::None).status, MoveStatus::Ok);
    assert_eq!(relative(&s, tmp.path()), "music/a.mp3");
    assert_eq!(s.mov(Direction::Next, MoveOptions::None).status, MoveStatus::OkLooped);
    assert_eq!(s.getpos(), 0);
    s.close();
    assert!(s.navigator().selected_path().unwrap().ends_with("list.m3u"));
}

#[test]
fn all_disks_over_two_roots() {
    let one = TempDir::new().unwrap();
    let two = TempDir::new().unwrap();
    touch(one.path(), "x.mp3");
    touch(two.path(), "y.mp3");
    let volume = LocalVolume::new([one.path(), two.path()]).unwrap();
    let mut s = NavigationSession::new(volume, NavConfig::new("mp3").unwrap());
    s.open(false, 0).unwrap();
    assert_eq!(s.getnb(), 2);
    let o = s.mov(Direction::Next, MoveOptions::None);
    assert_eq!(o.status, MoveStatus::Ok);
    assert!(o.folder_changed);
    assert!(s.navigator().selected_path().unwrap().ends_with("y.mp3"));
}
