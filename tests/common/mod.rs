// font-cache/tests/common/mod.rs
//
// Copyright © 2018 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

// Synthetic engines shared by the integration tests.

#![allow(dead_code)]

use font_cache::cache::FontCache;
use font_cache::config::Config;
use font_cache::error::{BackendError, CharmapError, FontLoadingError, RegistrationError};
use font_cache::init::Synchronous;
use font_cache::loader::{CharmapId, Face, Loader};
use font_cache::matcher::{FontMatch, ListedFont, Matcher};
use font_cache::sources::mem::{FontRecord, MemMatcher, MemPattern};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

pub type TestCache = FontCache<MemMatcher, TableLoader>;

/// What a font file looks like to the synthetic outline engine.
#[derive(Clone, Debug)]
pub struct FakeFace {
    pub family: String,
    pub style: String,
    pub charmaps: Vec<CharmapId>,
    pub unicode: bool,
    pub first_char: Option<(u32, u32)>,
}

impl FakeFace {
    pub fn unicode(family: &str, style: &str) -> FakeFace {
        FakeFace {
            family: family.to_owned(),
            style: style.to_owned(),
            charmaps: vec![CharmapId::new(3, 1)],
            unicode: true,
            first_char: Some((0x20, 3)),
        }
    }

    pub fn without_unicode(family: &str, style: &str, charmaps: &[(u16, u16)]) -> FakeFace {
        FakeFace {
            family: family.to_owned(),
            style: style.to_owned(),
            charmaps: charmaps
                .iter()
                .map(|&(platform_id, encoding_id)| CharmapId::new(platform_id, encoding_id))
                .collect(),
            unicode: false,
            first_char: None,
        }
    }
}

/// An outline engine over a table of font files. Files not in the table fail to load.
#[derive(Debug, Default)]
pub struct TableLoader {
    files: BTreeMap<PathBuf, FakeFace>,
}

impl TableLoader {
    pub fn new() -> TableLoader {
        TableLoader::default()
    }

    /// Creates a loader that can load every file in `matcher`'s database as a Unicode face.
    pub fn for_matcher(matcher: &MemMatcher) -> TableLoader {
        let mut loader = TableLoader::new();
        for record in matcher.records() {
            if let (Some(family), Some(style), Some(file)) =
                (&record.family, &record.style, &record.file)
            {
                loader.insert(file, FakeFace::unicode(family, style));
            }
        }
        loader
    }

    pub fn insert<P>(&mut self, path: P, fake: FakeFace)
    where
        P: Into<PathBuf>,
    {
        self.files.insert(path.into(), fake);
    }

    pub fn remove(&mut self, path: &Path) {
        self.files.remove(path);
    }
}

impl Loader for TableLoader {
    type Face = TableFace;

    fn load(&self, path: &Path, face_index: u32) -> Result<TableFace, FontLoadingError> {
        match self.files.get(path) {
            Some(fake) => Ok(TableFace {
                fake: fake.clone(),
                active: None,
                path: path.to_owned(),
            }),
            None => Err(FontLoadingError::Engine {
                path: path.to_owned(),
                index: face_index,
                code: 1,
            }),
        }
    }
}

#[derive(Debug)]
pub struct TableFace {
    fake: FakeFace,
    active: Option<usize>,
    path: PathBuf,
}

impl TableFace {
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Face for TableFace {
    fn family_name(&self) -> Option<String> {
        Some(self.fake.family.clone())
    }

    fn style_name(&self) -> Option<String> {
        Some(self.fake.style.clone())
    }

    fn charmaps(&self) -> Vec<CharmapId> {
        self.fake.charmaps.clone()
    }

    fn active_charmap(&self) -> Option<CharmapId> {
        self.active.map(|index| self.fake.charmaps[index])
    }

    fn select_unicode_charmap(&mut self) -> Result<(), CharmapError> {
        if !self.fake.unicode {
            return Err(CharmapError::Engine(6));
        }
        self.active = Some(0);
        Ok(())
    }

    fn set_charmap(&mut self, index: usize) -> Result<(), CharmapError> {
        if index >= self.fake.charmaps.len() {
            return Err(CharmapError::NoSuchCharmap(index));
        }
        self.active = Some(index);
        Ok(())
    }

    fn first_char(&self) -> Option<(u32, u32)> {
        self.active.and(self.fake.first_char)
    }
}

/// A small database: two Liberation Sans styles, a collection face and a monospace font.
pub fn database() -> MemMatcher {
    MemMatcher::from_records(vec![
        FontRecord::new("Liberation Sans", "Regular", "/fonts/LiberationSans-Regular.ttf"),
        FontRecord::new("Liberation Sans", "Bold", "/fonts/LiberationSans-Bold.ttf"),
        FontRecord::new("DejaVu Sans", "Book", "/fonts/DejaVuSans.ttc")
            .face_index(1)
            .features("liga;kern"),
        FontRecord::new("Liberation Mono", "Regular", "/fonts/LiberationMono-Regular.ttf"),
        FontRecord::new("Noto Sans", "Regular", "/fonts/NotoSans-Regular.ttf"),
    ])
}

pub fn cache_with(matcher: MemMatcher, loader: TableLoader, max_entries: usize) -> TestCache {
    let mut config = Config::new();
    config.max_entries(max_entries);
    FontCache::from_backends(&config, Ok(matcher), Ok(loader), &mut Synchronous)
}

pub fn cache(max_entries: usize) -> TestCache {
    let matcher = database();
    let loader = TableLoader::for_matcher(&matcher);
    cache_with(matcher, loader, max_entries)
}

pub fn broken_cache() -> TestCache {
    FontCache::from_backends(
        &Config::new(),
        Err(BackendError::Fontconfig),
        Ok(TableLoader::new()),
        &mut Synchronous,
    )
}

/// A matching engine over a `MemMatcher` that records every directory registered with it.
#[derive(Debug, Default)]
pub struct RecordingMatcher {
    inner: MemMatcher,
    font_dirs: Arc<Mutex<Vec<PathBuf>>>,
}

impl RecordingMatcher {
    pub fn new(inner: MemMatcher) -> RecordingMatcher {
        RecordingMatcher {
            inner,
            font_dirs: Arc::new(Mutex::new(vec![])),
        }
    }

    /// The registered directories, in order. Stays readable after the matcher moves into a cache.
    pub fn registered_dirs(&self) -> Arc<Mutex<Vec<PathBuf>>> {
        self.font_dirs.clone()
    }
}

impl Matcher for RecordingMatcher {
    type Pattern = MemPattern;

    fn parse_query(&self, query: &str) -> Option<MemPattern> {
        self.inner.parse_query(query)
    }

    fn empty_pattern(&self) -> MemPattern {
        self.inner.empty_pattern()
    }

    fn require_scalable_outline(&self, pattern: &mut MemPattern) {
        self.inner.require_scalable_outline(pattern)
    }

    fn require_coverage(&self, pattern: &mut MemPattern, chars: &[char]) {
        self.inner.require_coverage(pattern, chars)
    }

    fn best_match(&self, pattern: MemPattern) -> Option<FontMatch> {
        self.inner.best_match(pattern)
    }

    fn list(&self, pattern: &MemPattern) -> Vec<ListedFont> {
        self.inner.list(pattern)
    }

    fn add_font_dir(&mut self, path: &Path) -> Result<(), RegistrationError> {
        self.font_dirs.lock().unwrap().push(path.to_owned());
        Ok(())
    }

    fn font_dirs(&self) -> Vec<PathBuf> {
        self.font_dirs.lock().unwrap().clone()
    }
}
