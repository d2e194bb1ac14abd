// font-cache/src/error.rs
//
// Copyright © 2018 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Various types of errors that the engines behind the cache can report.
//!
//! None of these cross the public boundary of [`FontCache::get`](crate::cache::FontCache::get):
//! a failed resolution is reported there as `None`.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Reasons why a font query might fail to resolve to a font file.
#[derive(PartialEq, Debug, Error)]
pub enum SelectionError {
    /// The query string could not be parsed into a matching pattern.
    #[error("could not parse font '{0}'")]
    Unparseable(String),
    /// No installed font matched the query.
    #[error("no font found")]
    NotFound,
    /// The cache was built without a working matching or outline engine.
    #[error("font backend unavailable")]
    Unavailable,
}

/// Reasons why an outline engine might fail to load a face.
#[derive(Debug, Error)]
pub enum FontLoadingError {
    /// The engine rejected the file or the face index within it.
    #[error("engine error {code} loading '{}' (index {index})", .path.display())]
    Engine {
        /// The file that was being loaded.
        path: PathBuf,
        /// The requested face index.
        index: u32,
        /// The engine-specific error code.
        code: i32,
    },

    /// The path could not be handed to the engine (for example, it contains a NUL byte).
    #[error("invalid font path '{}'", .0.display())]
    InvalidPath(PathBuf),

    /// A disk or similar I/O error occurred while attempting to load the font.
    #[error("I/O error")]
    Io(#[from] io::Error),
}

/// Reasons why a character map could not be activated on a face.
#[derive(PartialEq, Debug, Error)]
pub enum CharmapError {
    /// The face has no charmap at the requested position.
    #[error("no charmap at index {0}")]
    NoSuchCharmap(usize),
    /// The engine refused to activate the charmap.
    #[error("engine error {0} activating charmap")]
    Engine(i32),
}

/// Reasons why a matching or outline engine might fail to come up.
#[derive(PartialEq, Debug, Error)]
pub enum BackendError {
    /// The Fontconfig configuration could not be loaded.
    #[error("can't initialize fontconfig library")]
    Fontconfig,
    /// The FreeType library could not be initialized.
    #[error("can't initialize freetype library (error {0})")]
    FreeType(i32),
    /// The font database could not be built.
    #[error("can't build the font database")]
    Database,
}

/// Reasons why an application font file or directory could not be registered.
#[derive(PartialEq, Debug, Error)]
pub enum RegistrationError {
    /// The path is not a directory.
    #[error("'{}' is not a directory", .0.display())]
    NotADirectory(PathBuf),
    /// The engine rejected the file or directory.
    #[error("can't register '{}'", .0.display())]
    Rejected(PathBuf),
    /// The engine does not support registering application fonts.
    #[error("font registration is not supported by this engine")]
    Unsupported,
    /// The cache was built without a working matching engine.
    #[error("font backend unavailable")]
    Unavailable,
}
