// font-cache/src/face.rs
//
// Copyright © 2018 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! A loaded face, ready to hand out to any number of holders.

use std::fmt::{self, Debug, Formatter};
use std::sync::Arc;

use crate::loader::Face;

/// A shared handle to a loaded face.
///
/// The face is released when the last holder (cache entry or caller) drops its handle, so a handle
/// obtained from the cache stays valid after the entry is evicted.
pub type FaceHandle<F> = Arc<FontFace<F>>;

/// A loaded face together with the shaping features configured for it.
///
/// Immutable once constructed.
pub struct FontFace<F> {
    face: F,
    features: Vec<String>,
}

impl<F> FontFace<F>
where
    F: Face,
{
    /// Wraps a fully prepared face.
    #[inline]
    pub fn new(face: F, features: Vec<String>) -> FontFace<F> {
        FontFace { face, features }
    }

    /// Returns the underlying engine face.
    #[inline]
    pub fn face(&self) -> &F {
        &self.face
    }

    /// Returns the shaping feature tags, in the order the matching engine listed them.
    #[inline]
    pub fn features(&self) -> &[String] {
        &self.features
    }

    /// Returns the name of the font family.
    #[inline]
    pub fn family_name(&self) -> Option<String> {
        self.face.family_name()
    }

    /// Returns the name of the style within the family.
    #[inline]
    pub fn style_name(&self) -> Option<String> {
        self.face.style_name()
    }
}

impl<F> Debug for FontFace<F>
where
    F: Face,
{
    fn fmt(&self, fmt: &mut Formatter) -> Result<(), fmt::Error> {
        fmt.debug_struct("FontFace")
            .field("family", &self.face.family_name())
            .field("style", &self.face.style_name())
            .field("features", &self.features)
            .finish()
    }
}

/// Splits a `;`-separated feature string into its tags.
///
/// The split is literal: an empty string yields one empty tag, and empty segments are kept.
pub fn split_features(features: &str) -> Vec<String> {
    features.split(';').map(|tag| tag.to_owned()).collect()
}

#[cfg(test)]
mod test {
    use super::split_features;

    #[test]
    fn split_keeps_order() {
        assert_eq!(split_features("liga;kern;-calt"), vec!["liga", "kern", "-calt"]);
    }

    #[test]
    fn split_empty_yields_one_empty_tag() {
        assert_eq!(split_features(""), vec![""]);
    }

    #[test]
    fn split_keeps_empty_segments() {
        assert_eq!(split_features("liga;;kern;"), vec!["liga", "", "kern", ""]);
    }
}
