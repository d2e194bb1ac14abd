// font-cache/src/charmap.rs
//
// Copyright © 2018 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Selects a character map that makes a freshly loaded face usable for Unicode text.
//!
//! The engine's own Unicode selection is tried first. If that fails, the face's charmap table is
//! searched for a fixed, priority-ordered list of platform/encoding pairs, and the first one that
//! can be activated wins.

use log::{debug, warn};

use crate::loader::{CharmapId, Face};
use crate::FONT_WARNING;

pub const TT_PLATFORM_APPLE_UNICODE: u16 = 0;
pub const TT_PLATFORM_MACINTOSH: u16 = 1;
pub const TT_PLATFORM_ISO: u16 = 2;
pub const TT_PLATFORM_MICROSOFT: u16 = 3;

pub const TT_MAC_ID_ROMAN: u16 = 0;

pub const TT_ISO_ID_7BIT_ASCII: u16 = 0;
pub const TT_ISO_ID_10646: u16 = 1;
pub const TT_ISO_ID_8859_1: u16 = 2;

pub const TT_MS_ID_SYMBOL_CS: u16 = 0;
pub const TT_MS_ID_UNICODE_CS: u16 = 1;

/// Fonts whose symbol charmap starts at or above this code keep their glyphs in the Private Use
/// Area.
const WINDOWS_SYMBOL_FONT_FIRST_CHAR: u32 = 0xf000;

/// The fallback charmaps, in priority order. `None` matches any encoding.
pub const FALLBACK_CHARMAPS: [(u16, Option<u16>); 7] = [
    (TT_PLATFORM_MICROSOFT, Some(TT_MS_ID_UNICODE_CS)),
    (TT_PLATFORM_ISO, Some(TT_ISO_ID_10646)),
    (TT_PLATFORM_APPLE_UNICODE, None),
    (TT_PLATFORM_MICROSOFT, Some(TT_MS_ID_SYMBOL_CS)),
    (TT_PLATFORM_MACINTOSH, Some(TT_MAC_ID_ROMAN)),
    (TT_PLATFORM_ISO, Some(TT_ISO_ID_8859_1)),
    (TT_PLATFORM_ISO, Some(TT_ISO_ID_7BIT_ASCII)),
];

/// How a charmap was chosen for a face.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CharmapSelection {
    /// The engine selected a Unicode charmap by itself.
    Unicode,
    /// A charmap from the fallback list was activated.
    Fallback {
        /// The charmap that was activated.
        charmap: CharmapId,
        /// Its position in the face's charmap table.
        index: usize,
    },
}

/// Ensures that `face` has an active charmap usable for text lookup.
///
/// Returns `None`, after logging a font warning, if nothing could be activated. The face is still
/// usable for everything that does not need character lookup.
pub fn select_charmap<F>(face: &mut F) -> Option<CharmapSelection>
where
    F: Face,
{
    for (index, charmap) in face.charmaps().iter().enumerate() {
        debug!(
            "charmap = {}: platform = {}, encoding = {}",
            index, charmap.platform_id, charmap.encoding_id
        );
    }

    if face.select_unicode_charmap().is_ok() {
        debug!(
            "Successfully selected unicode charmap: {}/{}",
            face.family_name().unwrap_or_default(),
            face.style_name().unwrap_or_default()
        );
        return Some(CharmapSelection::Unicode);
    }

    for &(platform_id, encoding_id) in FALLBACK_CHARMAPS.iter() {
        if let Some(index) = try_charmap(face, platform_id, encoding_id) {
            let charmap = face.charmaps()[index];
            return Some(CharmapSelection::Fallback { charmap, index });
        }
    }

    warn!(
        target: FONT_WARNING,
        "Could not select a char map for font '{}/{}'",
        face.family_name().unwrap_or_default(),
        face.style_name().unwrap_or_default()
    );
    None
}

/// Activates the first charmap of `face` tagged with `platform_id` and `encoding_id` that the
/// engine accepts, and returns its table index.
///
/// An `encoding_id` of `None` matches any encoding.
pub fn try_charmap<F>(face: &mut F, platform_id: u16, encoding_id: Option<u16>) -> Option<usize>
where
    F: Face,
{
    let charmaps = face.charmaps();
    for (index, charmap) in charmaps.iter().enumerate() {
        if charmap.platform_id != platform_id {
            continue;
        }
        if encoding_id.map_or(false, |encoding_id| charmap.encoding_id != encoding_id) {
            continue;
        }
        if face.set_charmap(index).is_err() {
            continue;
        }

        debug!(
            "Selected charmap: platform_id = {}, encoding_id = {}",
            charmap.platform_id, charmap.encoding_id
        );
        if is_windows_symbol_font(face) {
            debug!(
                "Detected windows symbol font with character codes in the Private Use Area of \
                 Unicode at 0xf000: {}/{}",
                face.family_name().unwrap_or_default(),
                face.style_name().unwrap_or_default()
            );
        }
        return Some(index);
    }
    None
}

/// Returns true if and only if the active charmap is the Microsoft symbol charmap and the first
/// character it maps lies at or above `0xf000`.
pub fn is_windows_symbol_font<F>(face: &F) -> bool
where
    F: Face,
{
    match face.active_charmap() {
        Some(CharmapId {
            platform_id: TT_PLATFORM_MICROSOFT,
            encoding_id: TT_MS_ID_SYMBOL_CS,
        }) => {}
        _ => return false,
    }

    match face.first_char() {
        Some((charcode, glyph_index)) => {
            glyph_index != 0 && charcode >= WINDOWS_SYMBOL_FONT_FIRST_CHAR
        }
        None => false,
    }
}
