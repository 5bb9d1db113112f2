//! Automatic navigation engine
//!
//! Turns a directory tree, a set of drives or a play-list file into one
//! ordered list of playable files the player can step through forwards,
//! backwards or in shuffled order, without ever holding the list in memory.
//!
//! # Architecture
//!
//! ```text
//! NavigationSession (open / mov / setpos / setmode / setrand)
//!     ├── Explorer ────────── directory-tree walker (modes, entry order)
//!     │       └── DirectoryCursor ── filtered view of a Navigator
//!     ├── PlaylistReader ──── m3u / pls / smp walker
//!     └── ShuffleGenerator ── non-repeating LCG order
//!             ↓
//! platform::Navigator (FAT navigator, std::fs, in-memory mock)
//! ```
//!
//! # Features
//!
//! - `std`: `std::error::Error` impls, host volumes of the platform crate
//! - `defmt`: defmt logging and `defmt::Format` derives (firmware)
//! - `tracing`: tracing events (host tooling)
//!
//! # Example
//!
//! ```
//! use navigation::{MoveOptions, MoveStatus, NavConfig, NavigationSession};
//! use platform::{Direction, Navigator};
//!
//! fn skip<N: Navigator>(session: &mut NavigationSession<N>) -> bool {
//!     let outcome = session.mov(Direction::Next, MoveOptions::None);
//!     outcome.status == MoveStatus::Ok
//! }
//! ```

// ── Lint policy ─────────────────────────────────────────────────────────────
#![deny(clippy::unwrap_used)] // no .unwrap() in production code
#![deny(clippy::expect_used)] // no .expect() in production code
#![deny(clippy::panic)] // no panic!() in production code
#![deny(clippy::unreachable)] // no unreachable!() that isn't documented
#![deny(unused_must_use)]
// all Results must be handled
// ────────────────────────────────────────────────────────────────────────────
#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::print_stdout)] // prefer tracing/defmt over println! in lib code
#![allow(clippy::must_use_candidate)]
#![allow(clippy::module_name_repetitions)]

mod log;

pub mod config;
pub mod cursor;
mod explorer;
pub mod outcome;
pub mod playlist;
pub mod session;
pub mod shuffle;

pub use config::{
    EntryOrder, Filter, Mode, NavConfig, Shuffle, SourceKind, FILTER_CAPACITY, POS_NONE,
};
pub use cursor::DirectoryCursor;
pub use outcome::{MoveOptions, MoveStatus, NavError, TraversalOutcome};
pub use playlist::PlaylistKind;
pub use session::NavigationSession;
pub use shuffle::ShuffleGenerator;
