// font-cache/src/matcher.rs
//
// Copyright © 2018 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! A common interface to the engines that match font patterns against the installed fonts.

use std::path::{Path, PathBuf};

use crate::error::{BackendError, RegistrationError};

/// The concrete font file chosen for a pattern.
#[derive(Clone, Debug, PartialEq)]
pub struct FontMatch {
    /// The path to the font file.
    pub path: PathBuf,
    /// The index of the face, if the file is a collection.
    ///
    /// If the file holds a single font, this value will be 0.
    pub face_index: u32,
    /// The shaping features configured for the font, as a `;`-separated list.
    pub features: Option<String>,
}

/// One entry of a font listing.
///
/// Engines report whatever they know; entries missing a family, style or file are dropped by the
/// enumerator.
#[derive(Clone, Debug, PartialEq)]
pub struct ListedFont {
    /// The name of the font family.
    pub family: Option<String>,
    /// The style within the family.
    pub style: Option<String>,
    /// The path to the font file.
    pub file: Option<PathBuf>,
    /// A structural hash of the engine's pattern for this font.
    pub fingerprint: u32,
}

/// A database of installed fonts that can be queried with structured patterns.
pub trait Matcher {
    /// The structured pattern type this engine matches with.
    type Pattern;

    /// Parses a query such as `"Liberation Sans:style=Regular"` into a pattern.
    ///
    /// Returns `None` if the string is not valid query syntax.
    fn parse_query(&self, query: &str) -> Option<Self::Pattern>;

    /// Returns a pattern with no constraints.
    fn empty_pattern(&self) -> Self::Pattern;

    /// Constrains `pattern` to scalable fonts that have outlines.
    fn require_scalable_outline(&self, pattern: &mut Self::Pattern);

    /// Constrains `pattern` to fonts whose character coverage includes every one of `chars`.
    fn require_coverage(&self, pattern: &mut Self::Pattern, chars: &[char]);

    /// Substitutes configured and default values into `pattern` and returns the best installed
    /// font for it.
    fn best_match(&self, pattern: Self::Pattern) -> Option<FontMatch>;

    /// Returns every installed font that satisfies `pattern`.
    fn list(&self, pattern: &Self::Pattern) -> Vec<ListedFont>;

    /// Adds a single font file to the application font set.
    fn add_font_file(&mut self, _path: &Path) -> Result<(), RegistrationError> {
        Err(RegistrationError::Unsupported)
    }

    /// Adds every font in a directory to the application font set.
    fn add_font_dir(&mut self, _path: &Path) -> Result<(), RegistrationError> {
        Err(RegistrationError::Unsupported)
    }

    /// Builds the font database. This is the potentially slow one-shot step run through the
    /// cache's [`InitHandler`](crate::init::InitHandler).
    fn build_database(&mut self) -> Result<(), BackendError> {
        Ok(())
    }

    /// Returns the directories the engine scans for fonts.
    fn font_dirs(&self) -> Vec<PathBuf> {
        vec![]
    }
}
