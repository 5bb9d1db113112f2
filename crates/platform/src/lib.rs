//! Storage Abstraction Layer for the navigation engine
//!
//! This crate defines the file-system cursor the navigation engine drives,
//! so the engine can be developed and tested without a real medium.
//!
//! # Architecture Layers
//!
//! ```text
//! Tooling / player (xtask, firmware)
//!         ↓
//! Navigation engine (navigation crate)
//!         ↓
//! Storage abstraction (this crate - Navigator trait)
//!         ↓
//! Volume implementations (FAT navigator, std::fs, in-memory mock)
//! ```
//!
//! # Implementations
//!
//! - [`mocks::MockVolume`] - in-memory drives for unit and integration tests
//! - [`storage_local::LocalVolume`] - host directories through `std::fs`
//!
//! # Features
//!
//! - `std`: Enable standard library support (host tooling, mock and local volumes)
//! - `defmt`: Enable defmt logging
//!
//! # Example
//!
//! ```
//! use platform::{Direction, Navigator};
//!
//! fn first_is_audio<N: Navigator>(volume: &mut N) -> bool {
//!     volume.reset_selection();
//!     volume.step(Direction::Next).is_ok() && volume.check_extension("mp3,wav")
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
#![allow(clippy::must_use_candidate)] // cursor accessors, callers decide
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

#[cfg(any(test, feature = "std"))]
pub mod mocks;
pub mod storage;
#[cfg(any(test, feature = "std"))]
pub mod storage_local;

pub use storage::{
    extension_matches, Direction, EntryKind, FsError, Line, Navigator, LINE_CAPACITY,
};
