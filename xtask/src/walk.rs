//! xtask walk: print a local music folder in navigation order.
//!
//! Each `--music-dir` becomes one drive of a [`LocalVolume`]. The list size
//! reported by the session is cross-checked against a `walkdir` scan that
//! honours the same extension filter.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use colored::Colorize;
use navigation::{EntryOrder, Mode, MoveOptions, NavConfig, NavigationSession, Shuffle};
use platform::storage_local::LocalVolume;
use platform::{extension_matches, Direction};
use walkdir::WalkDir;

#[derive(Args)]
pub struct WalkArgs {
    /// Music folder; repeat the flag to add further drives
    #[arg(long, required = true)]
    music_dir: Vec<PathBuf>,
    /// Navigation mode
    #[arg(long, value_enum, default_value_t = ModeArg::Disks)]
    mode: ModeArg,
    /// Walk in shuffled order
    #[arg(long)]
    shuffle: bool,
    /// List sub-directories before the files of each folder
    #[arg(long)]
    dirs_first: bool,
    /// Comma-separated extension filter ("*" accepts everything)
    #[arg(long, default_value = "mp3,flac,wav")]
    filter: String,
    /// Number of files to print (defaults to one full pass)
    #[arg(long)]
    count: Option<u16>,
}

#[derive(Clone, Copy, ValueEnum)]
enum ModeArg {
    /// Every drive, wrapping from the last to the first
    Disks,
    /// The whole current drive
    Disk,
    /// Files of the starting folder only
    Dir,
    /// The starting folder and everything below it
    Subtree,
}

impl From<ModeArg> for Mode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Disks => Mode::AllDisks,
            ModeArg::Disk => Mode::SingleDisk,
            ModeArg::Dir => Mode::DirectoryOnly,
            ModeArg::Subtree => Mode::DirectoryAndSubtree,
        }
    }
}

/// Entry point called from main.rs
pub fn run(args: &WalkArgs) -> Result<()> {
    init_tracing();

    let mode = Mode::from(args.mode);
    let order = if args.dirs_first {
        EntryOrder::DirsFirst
    } else {
        EntryOrder::FilesFirst
    };
    let shuffle = if args.shuffle { Shuffle::On } else { Shuffle::Off };
    let config = NavConfig::new(&args.filter)
        .context("extension filter too long")?
        .with_mode(mode)
        .with_order(order)
        .with_shuffle(shuffle);

    let volume = LocalVolume::new(&args.music_dir).context("failed to open music folder")?;
    let mut session = NavigationSession::new(volume, config);
    session
        .open(false, 0)
        .with_context(|| format!("no playable file in mode {mode}"))?;

    let size = session.getnb();
    println!();
    println!(
        "{}",
        format!("Walking {size} files (mode {mode}, shuffle {shuffle})").cyan().bold()
    );
    println!();

    let roots = &args.music_dir;
    print_entry(&session, roots, false);
    for _ in 1..args.count.unwrap_or(size) {
        let outcome = session.mov(Direction::Next, MoveOptions::None);
        if !outcome.is_ok() {
            println!("{}", format!("  ✗ move stopped: {}", outcome.status).red());
            break;
        }
        print_entry(&session, roots, outcome.folder_changed);
    }
    println!();

    let expected = scan_count(roots, mode, &args.filter)?;
    if expected == usize::from(size) {
        println!("{}", format!("✓ {size} files, matches directory scan").green());
    } else {
        println!(
            "{}",
            format!("⚠ navigation counted {size} files, directory scan found {expected}").yellow()
        );
    }
    println!();
    session.close();
    Ok(())
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    // A second init (tests) keeps the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn print_entry(session: &NavigationSession<LocalVolume>, roots: &[PathBuf], folder_changed: bool) {
    let path = session.navigator().selected_path().unwrap_or_default();
    let shown = roots
        .iter()
        .find_map(|root| path.strip_prefix(root).ok())
        .unwrap_or(&path);
    let marker = if folder_changed { "▸" } else { " " };
    println!(
        "  {:>5} {} {}",
        session.getpos().saturating_add(1),
        marker.blue(),
        shown.display()
    );
}

/// Files below `roots` the navigator would count in `mode` when opened
/// from the root of the first drive.
pub(crate) fn scan_count(roots: &[PathBuf], mode: Mode, filter: &str) -> Result<usize> {
    let (scanned, depth) = match mode {
        Mode::AllDisks => (roots, usize::MAX),
        Mode::SingleDisk | Mode::DirectoryAndSubtree => {
            (roots.get(..1).unwrap_or(roots), usize::MAX)
        }
        Mode::DirectoryOnly => (roots.get(..1).unwrap_or(roots), 1),
    };
    scanned.iter().try_fold(0usize, |total, root| {
        Ok(total.saturating_add(count_files(root, depth, filter)?))
    })
}

fn count_files(root: &Path, max_depth: usize, filter: &str) -> Result<usize> {
    let mut count = 0usize;
    for entry in WalkDir::new(root).min_depth(1).max_depth(max_depth) {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy();
        if entry.file_type().is_file() && extension_matches(&name, filter) {
            count = count.saturating_add(1);
        }
    }
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn tree(paths: &[&str]) -> TempDir {
        let tmp = TempDir::new().unwrap();
        for path in paths {
            let full = tmp.path().join(path);
            fs::create_dir_all(full.parent().unwrap()).unwrap();
            fs::write(full, b"").unwrap();
        }
        tmp
    }

    #[test]
    fn scan_count_honours_mode_and_filter() {
        let tmp = tree(&["a.mp3", "cover.jpg", "Album/01.mp3", "Album/02.FLAC"]);
        let roots = vec![tmp.path().to_path_buf()];
        assert_eq!(scan_count(&roots, Mode::SingleDisk, "mp3,flac").unwrap(), 3);
        assert_eq!(scan_count(&roots, Mode::DirectoryOnly, "mp3,flac").unwrap(), 1);
        assert_eq!(scan_count(&roots, Mode::SingleDisk, "*").unwrap(), 4);
    }

    #[test]
    fn navigation_matches_scan() {
        let tmp = tree(&["a.mp3", "b.mp3", "Album/01.mp3", "Album/CD2/01.mp3", "notes.txt"]);
        let roots = vec![tmp.path().to_path_buf()];
        let config = NavConfig::new("mp3").unwrap().with_mode(Mode::SingleDisk);
        let mut session = NavigationSession::new(LocalVolume::new(&roots).unwrap(), config);
        session.open(false, 0).unwrap();
        let expected = scan_count(&roots, Mode::SingleDisk, "mp3").unwrap();
        assert_eq!(usize::from(session.getnb()), expected);
    }

    #[test]
    fn all_disks_scans_every_root() {
        let first = tree(&["x.mp3"]);
        let second = tree(&["y.mp3", "z/w.mp3"]);
        let roots = vec![first.path().to_path_buf(), second.path().to_path_buf()];
        assert_eq!(scan_count(&roots, Mode::AllDisks, "mp3").unwrap(), 3);
        assert_eq!(scan_count(&roots, Mode::SingleDisk, "mp3").unwrap(), 1);
    }
}
