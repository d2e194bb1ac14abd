// font-cache/src/resolver.rs
//
// Copyright © 2018 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Turns a query string into a loaded face.

use log::{debug, warn};
use std::sync::Arc;

use crate::charmap;
use crate::error::SelectionError;
use crate::face::{split_features, FaceHandle, FontFace};
use crate::loader::Loader;
use crate::matcher::Matcher;
use crate::FONT_WARNING;

/// The query used when the caller asks for the empty string.
pub const DEFAULT_FONT: &str = "Liberation Sans:style=Regular";

/// Trims `query` and substitutes [`DEFAULT_FONT`] if nothing is left.
///
/// The result is the cache key. Queries that differ only in surrounding whitespace share a key,
/// but semantically equal queries spelled differently (e.g. with attributes in another order) do
/// not.
pub fn normalize_query(query: &str) -> &str {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        DEFAULT_FONT
    } else {
        trimmed
    }
}

/// Resolves an already normalized query to a face.
///
/// The query is parsed by the matching engine and constrained to scalable outline fonts; the best
/// match is loaded through `loader` and given a usable charmap. A face whose charmap could not be
/// set up is still returned.
pub fn resolve<M, L>(
    matcher: &M,
    loader: &L,
    query: &str,
) -> Result<FaceHandle<L::Face>, SelectionError>
where
    M: Matcher,
    L: Loader,
{
    let mut pattern = match matcher.parse_query(query) {
        Some(pattern) => pattern,
        None => {
            warn!(target: FONT_WARNING, "Could not parse font '{}'", query);
            return Err(SelectionError::Unparseable(query.to_owned()));
        }
    };
    matcher.require_scalable_outline(&mut pattern);

    let font_match = matcher.best_match(pattern).ok_or(SelectionError::NotFound)?;
    if let Some(ref features) = font_match.features {
        debug!("Found font features: '{}'", features);
    }

    let mut face = loader
        .load(&font_match.path, font_match.face_index)
        .map_err(|error| {
            debug!("{}", error);
            SelectionError::NotFound
        })?;

    let features = split_features(font_match.features.as_deref().unwrap_or(""));
    charmap::select_charmap(&mut face);
    Ok(Arc::new(FontFace::new(face, features)))
}
