// font-cache/src/loader.rs
//
// Copyright © 2018 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Provides a common interface to the outline engine that parses font files into faces.

use std::path::Path;

use crate::error::{CharmapError, FontLoadingError};

/// The platform/encoding pair that tags a character map inside a font file.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CharmapId {
    /// The platform ID (`0` Apple Unicode, `1` Macintosh, `2` ISO, `3` Microsoft).
    pub platform_id: u16,
    /// The platform-specific encoding ID.
    pub encoding_id: u16,
}

impl CharmapId {
    /// Creates a new charmap ID from a platform ID and an encoding ID.
    #[inline]
    pub const fn new(platform_id: u16, encoding_id: u16) -> CharmapId {
        CharmapId {
            platform_id,
            encoding_id,
        }
    }
}

/// Loads faces from font files.
///
/// A loader corresponds to one initialized instance of an outline engine.
pub trait Loader {
    /// The face type this loader produces.
    type Face: Face;

    /// Loads the face at `face_index` from the `.ttf`/`.otf`/etc. file at `path`.
    ///
    /// If the file is a collection (`.ttc`/`.otc`/etc.), `face_index` selects the face within it.
    /// For a single font, pass 0.
    fn load(&self, path: &Path, face_index: u32) -> Result<Self::Face, FontLoadingError>;
}

/// A loaded face, as exposed by an outline engine.
///
/// Only the mutating methods are used while a face is being prepared; once a face has been wrapped
/// in a [`FontFace`](crate::face::FontFace) it is never mutated again.
pub trait Face {
    /// Returns the name of the font family, if the face declares one.
    fn family_name(&self) -> Option<String>;

    /// Returns the name of the style within the family, if the face declares one.
    fn style_name(&self) -> Option<String>;

    /// Returns the platform/encoding pairs of every charmap in the face, in table order.
    fn charmaps(&self) -> Vec<CharmapId>;

    /// Returns the platform/encoding pair of the active charmap, if one is active.
    fn active_charmap(&self) -> Option<CharmapId>;

    /// Asks the engine to pick its own Unicode charmap.
    fn select_unicode_charmap(&mut self) -> Result<(), CharmapError>;

    /// Activates the charmap at `index` in the table returned by `charmaps()`.
    fn set_charmap(&mut self, index: usize) -> Result<(), CharmapError>;

    /// Returns the first character code defined by the active charmap together with its glyph
    /// index, or `None` if the charmap maps nothing.
    fn first_char(&self) -> Option<(u32, u32)>;
}
