// font-cache/tests/charmap.rs
//
// Copyright © 2018 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

// Charmap selection on faces whose engine finds no Unicode charmap.

mod common;

use font_cache::charmap::{self, CharmapSelection};
use font_cache::loader::{CharmapId, Face, Loader};
use font_cache::sources::mem::{FontRecord, MemMatcher};
use std::path::Path;

use common::{cache_with, FakeFace, TableLoader};

static OLD_FONT_PATH: &'static str = "/fonts/OldStyle.ttf";

fn loader_with(charmaps: &[(u16, u16)]) -> TableLoader {
    let mut loader = TableLoader::new();
    loader.insert(
        OLD_FONT_PATH,
        FakeFace::without_unicode("Old Style", "Roman", charmaps),
    );
    loader
}

fn matcher() -> MemMatcher {
    MemMatcher::from_records(vec![FontRecord::new("Old Style", "Roman", OLD_FONT_PATH)])
}

#[test]
fn mac_roman_only_face_uses_mac_roman() {
    let mut face = loader_with(&[(1, 0)]).load(Path::new(OLD_FONT_PATH), 0).unwrap();
    assert_eq!(
        charmap::select_charmap(&mut face),
        Some(CharmapSelection::Fallback {
            charmap: CharmapId::new(1, 0),
            index: 0,
        })
    );
    assert_eq!(face.active_charmap(), Some(CharmapId::new(1, 0)));
}

#[test]
fn fallback_follows_priority_not_table_order() {
    let mut face = loader_with(&[(1, 0), (3, 0), (2, 1), (0, 3)])
        .load(Path::new(OLD_FONT_PATH), 0)
        .unwrap();
    assert_eq!(
        charmap::select_charmap(&mut face),
        Some(CharmapSelection::Fallback {
            charmap: CharmapId::new(2, 1),
            index: 2,
        })
    );
}

#[test]
fn apple_unicode_matches_any_encoding() {
    let mut face = loader_with(&[(1, 0), (0, 4)])
        .load(Path::new(OLD_FONT_PATH), 0)
        .unwrap();
    assert_eq!(face.charmaps().len(), 2);
    charmap::select_charmap(&mut face);
    assert_eq!(face.active_charmap(), Some(CharmapId::new(0, 4)));
}

#[test]
fn unusable_charmaps_still_yield_a_face() {
    let mut cache = cache_with(matcher(), loader_with(&[(4, 0), (1, 1)]), 3);
    let face = cache.get("Old Style").unwrap();
    assert_eq!(face.face().active_charmap(), None);
    assert_eq!(face.family_name().as_deref(), Some("Old Style"));
    assert!(cache.contains("Old Style"));
}

#[test]
fn symbol_charmap_is_selected_through_the_cache() {
    let mut loader = TableLoader::new();
    let mut fake = FakeFace::without_unicode("Old Style", "Roman", &[(3, 0)]);
    fake.first_char = Some((0xf021, 5));
    loader.insert(OLD_FONT_PATH, fake);

    let mut cache = cache_with(matcher(), loader, 3);
    let face = cache.get("Old Style").unwrap();
    assert_eq!(face.face().active_charmap(), Some(CharmapId::new(3, 0)));
    assert!(charmap::is_windows_symbol_font(face.face()));
}
