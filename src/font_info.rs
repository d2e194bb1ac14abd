// font-cache/src/font_info.rs
//
// Copyright © 2018 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! A summary of one installed font, for listings.

use std::path::{Path, PathBuf};

/// A summary of one installed font, for listings.
///
/// Sorts by family, then style, then file. The fingerprint only breaks ties between otherwise
/// identical entries; it is a display/deduplication aid and never a cache key.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FontInfo {
    family: String,
    style: String,
    file: PathBuf,
    fingerprint: u32,
}

impl FontInfo {
    /// Creates a record for one installed font.
    #[inline]
    pub fn new(family: String, style: String, file: PathBuf, fingerprint: u32) -> FontInfo {
        FontInfo {
            family,
            style,
            file,
            fingerprint,
        }
    }

    /// Returns the name of the font family.
    #[inline]
    pub fn family(&self) -> &str {
        &self.family
    }

    /// Returns the style within the family.
    #[inline]
    pub fn style(&self) -> &str {
        &self.style
    }

    /// Returns the path to the font file.
    #[inline]
    pub fn file(&self) -> &Path {
        &self.file
    }

    /// A structural hash of the matching engine's pattern for this font.
    #[inline]
    pub fn fingerprint(&self) -> u32 {
        self.fingerprint
    }
}

#[cfg(test)]
mod test {
    use super::FontInfo;

    fn info(family: &str, style: &str, file: &str) -> FontInfo {
        FontInfo::new(family.to_owned(), style.to_owned(), file.into(), 0)
    }

    #[test]
    fn family_decides_before_style() {
        // A smaller style must not win over a larger family.
        assert!(info("Liberation Sans", "Bold", "b.ttf") < info("Liberation Serif", "Regular", "a.ttf"));
        assert!(info("Liberation Serif", "Bold", "a.ttf") > info("Liberation Sans", "Regular", "b.ttf"));
    }

    #[test]
    fn style_decides_before_file() {
        assert!(info("DejaVu Sans", "Bold", "z.ttf") < info("DejaVu Sans", "Oblique", "a.ttf"));
    }

    #[test]
    fn file_decides_last() {
        assert!(info("DejaVu Sans", "Bold", "a.ttf") < info("DejaVu Sans", "Bold", "b.ttf"));
    }

    #[test]
    fn sorting_is_lexicographic() {
        let mut infos = vec![
            info("B", "A", "1"),
            info("A", "B", "2"),
            info("A", "A", "3"),
            info("A", "A", "1"),
        ];
        infos.sort();
        assert_eq!(
            infos,
            vec![
                info("A", "A", "1"),
                info("A", "A", "3"),
                info("A", "B", "2"),
                info("B", "A", "1"),
            ]
        );
    }
}
