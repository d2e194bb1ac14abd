// font-cache/src/enumerator.rs
//
// Copyright © 2018 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Read-only queries against the matching engine's database. Nothing here loads a face.

use crate::font_info::FontInfo;
use crate::matcher::{ListedFont, Matcher};

/// Lists every installed scalable outline font, in the engine's order.
///
/// Fonts the engine reports without a family, style or file are skipped.
pub fn list_fonts<M>(matcher: &M) -> Vec<FontInfo>
where
    M: Matcher,
{
    let mut pattern = matcher.empty_pattern();
    matcher.require_scalable_outline(&mut pattern);

    matcher
        .list(&pattern)
        .into_iter()
        .filter_map(|listed| match listed {
            ListedFont {
                family: Some(family),
                style: Some(style),
                file: Some(file),
                fingerprint,
            } => Some(FontInfo::new(family, style, file, fingerprint)),
            _ => None,
        })
        .collect()
}

/// Returns the fingerprints of every installed scalable outline font that covers all of `chars`.
pub fn filter<M>(matcher: &M, chars: &[char]) -> Vec<u32>
where
    M: Matcher,
{
    let mut pattern = matcher.empty_pattern();
    matcher.require_scalable_outline(&mut pattern);
    matcher.require_coverage(&mut pattern, chars);

    matcher
        .list(&pattern)
        .into_iter()
        .map(|listed| listed.fingerprint)
        .collect()
}
