//! The in-memory and the host volume present the same tree the same way.

#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::indexing_slicing,
    missing_docs
)]

use std::fs;
use std::path::Path;

use platform::mocks::MockVolume;
use platform::storage_local::LocalVolume;
use platform::{Direction, EntryKind, FsError, Navigator};
use tempfile::TempDir;

// Insertion order of the mock equals the sorted order of the host volume.
const TREE: &[&str] = &[
    "/Album/CD2/01.mp3",
    "/Album/01.mp3",
    "/Album/02.mp3",
    "/Zeta/z.flac",
    "/a.mp3",
    "/b.wav",
];

fn host_tree() -> TempDir {
    let tmp = TempDir::new().unwrap();
    for path in TREE {
        let full = tmp.path().join(path.trim_start_matches('/'));
        fs::create_dir_all(full.parent().unwrap()).unwrap();
        fs::write(full, b"").unwrap();
    }
    tmp
}

/// Depth-first listing of the current directory through the trait only.
fn walk<N: Navigator>(nav: &mut N, name: &dyn Fn(&N) -> String, out: &mut Vec<String>) {
    nav.reset_selection();
    while nav.step(Direction::Next).is_ok() {
        out.push(name(nav));
        if nav.is_dir() {
            nav.enter_dir().unwrap();
            walk(nav, name, out);
            nav.goto_parent().unwrap();
        }
    }
}

fn local_name(root: &Path) -> impl Fn(&LocalVolume) -> String + '_ {
    move |nav| {
        let path = nav.selected_path().unwrap();
        let rel = path.strip_prefix(root).unwrap();
        format!("/{}", rel.to_string_lossy().replace('\\', "/"))
    }
}

#[test]
fn depth_first_listing_matches() {
    let expected = [
        "/Album",
        "/Album/CD2",
        "/Album/CD2/01.mp3",
        "/Album/01.mp3",
        "/Album/02.mp3",
        "/Zeta",
        "/Zeta/z.flac",
        "/a.mp3",
        "/b.wav",
    ];

    let mut mock = MockVolume::new().with_drive(TREE);
    mock.mount().unwrap();
    let mut from_mock = Vec::new();
    walk(&mut mock, &|nav: &MockVolume| nav.selected_path().unwrap(), &mut from_mock);
    assert_eq!(from_mock, expected);

    let tmp = host_tree();
    let mut local = LocalVolume::new([tmp.path()]).unwrap();
    local.mount().unwrap();
    let mut from_local = Vec::new();
    walk(&mut local, &local_name(tmp.path()), &mut from_local);
    assert_eq!(from_local, expected);
}

fn kind_selection<N: Navigator>(nav: &mut N) -> [bool; 4] {
    nav.mount().unwrap();
    let first_dir = nav.select_first(EntryKind::Dir).is_ok() && nav.is_dir();
    let last_file = nav.select_last(EntryKind::File).is_ok() && nav.check_extension("wav");
    nav.reset_selection();
    let prev_from_nothing = nav.step(Direction::Prev).is_ok() && nav.check_extension("wav");
    let root_parent = nav.goto_parent() == Err(FsError::NotFound);
    [first_dir, last_file, prev_from_nothing, root_parent]
}

#[test]
fn selection_by_kind_matches() {
    let mut mock = MockVolume::new().with_drive(TREE);
    assert_eq!(kind_selection(&mut mock), [true; 4]);

    let tmp = host_tree();
    let mut local = LocalVolume::new([tmp.path()]).unwrap();
    assert_eq!(kind_selection(&mut local), [true; 4]);
}

#[test]
fn index_round_trip_matches() {
    fn round_trip<N: Navigator>(nav: &mut N) -> bool {
        nav.mount().unwrap();
        nav.select_first(EntryKind::Dir).unwrap();
        nav.enter_dir().unwrap();
        nav.select_last(EntryKind::File).unwrap();
        let here = nav.index();
        nav.goto_root().unwrap();
        nav.goto_index(&here).unwrap();
        nav.index() == here && nav.check_extension("mp3")
    }

    let mut mock = MockVolume::new().with_drive(TREE);
    assert!(round_trip(&mut mock));

    let tmp = host_tree();
    let mut local = LocalVolume::new([tmp.path()]).unwrap();
    assert!(round_trip(&mut local));
}
