// font-cache/src/cache.rs
//
// Copyright © 2018 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! A bounded cache of loaded faces, keyed by query string.
//!
//! A lookup that misses resolves the query through the matching and outline engines and inserts
//! the result; when the cache is full, the least recently used entry is evicted first. Failed
//! resolutions are never cached.
//!
//! All operations take `&mut self`, so lookup, insertion and eviction form one unit. Wrap the
//! cache in a `Mutex` to share it between threads.

use log::{debug, info, warn};
use std::collections::BTreeMap;
use std::fmt::{self, Debug, Formatter, Write};
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::enumerator;
use crate::error::{BackendError, RegistrationError, SelectionError};
use crate::face::FaceHandle;
use crate::font_info::FontInfo;
use crate::init::{InitHandler, Initializer};
use crate::loader::Loader;
use crate::matcher::Matcher;
use crate::resolver;
use crate::FONT_WARNING;

#[cfg(any(
    not(any(
        target_family = "windows",
        target_os = "macos",
        target_os = "ios",
        target_arch = "wasm32"
    )),
    all(feature = "source-fontconfig", feature = "loader-freetype")
))]
use crate::{loaders::freetype::FreeTypeLoader, sources::fontconfig::FontconfigMatcher};

/// A cache backed by Fontconfig and FreeType.
#[cfg(any(
    not(any(
        target_family = "windows",
        target_os = "macos",
        target_os = "ios",
        target_arch = "wasm32"
    )),
    all(feature = "source-fontconfig", feature = "loader-freetype")
))]
pub type SystemFontCache = FontCache<FontconfigMatcher, FreeTypeLoader>;

/// One cached face and the logical time it was last handed out.
struct CacheEntry<F> {
    face: FaceHandle<F>,
    last_access: u64,
}

/// A bounded cache of loaded faces, keyed by query string.
pub struct FontCache<M, L>
where
    L: Loader,
{
    matcher: Option<M>,
    loader: Option<L>,
    entries: BTreeMap<String, CacheEntry<L::Face>>,
    max_entries: usize,
    clock: u64,
    font_dirs: Vec<PathBuf>,
}

#[cfg(any(
    not(any(
        target_family = "windows",
        target_os = "macos",
        target_os = "ios",
        target_arch = "wasm32"
    )),
    all(feature = "source-fontconfig", feature = "loader-freetype")
))]
impl FontCache<FontconfigMatcher, FreeTypeLoader> {
    /// Creates a cache over the system's Fontconfig database, loading faces with FreeType.
    pub fn new<H>(config: &Config, handler: &mut H) -> SystemFontCache
    where
        H: InitHandler + ?Sized,
    {
        FontCache::from_backends(
            config,
            FontconfigMatcher::new(config),
            FreeTypeLoader::new(),
            handler,
        )
    }
}

impl<M, L> Debug for FontCache<M, L>
where
    L: Loader,
{
    fn fmt(&self, fmt: &mut Formatter) -> Result<(), fmt::Error> {
        fmt.debug_struct("FontCache")
            .field("keys", &self.entries.keys().collect::<Vec<_>>())
            .field("max_entries", &self.max_entries)
            .field("init_ok", &(self.matcher.is_some() && self.loader.is_some()))
            .finish()
    }
}

impl<M, L> FontCache<M, L>
where
    M: Matcher + Send,
    L: Loader,
{
    /// Creates a cache over the given engines.
    ///
    /// The configured font directories are registered with the matching engine, then `handler`
    /// runs the font database build. If either engine failed to come up, a font warning is
    /// logged and every lookup on the returned cache fails.
    pub fn from_backends<H>(
        config: &Config,
        matcher: Result<M, BackendError>,
        loader: Result<L, BackendError>,
        handler: &mut H,
    ) -> FontCache<M, L>
    where
        H: InitHandler + ?Sized,
    {
        let mut cache = FontCache {
            matcher: None,
            loader: None,
            entries: BTreeMap::new(),
            max_entries: config.max_entries.max(1),
            clock: 0,
            font_dirs: vec![],
        };

        let mut matcher = match matcher {
            Ok(matcher) => matcher,
            Err(error) => {
                warn!(target: FONT_WARNING, "{}, text will not be rendered", error);
                return cache;
            }
        };

        for path in config.font_dirs() {
            if let Err(error) = matcher.add_font_dir(&path) {
                info!("Can't register font directory '{}': {}", path.display(), error);
            }
        }

        let mut result = None;
        {
            let mut build = || matcher.build_database();
            handler.run(Initializer::new(&mut build, &mut result));
        }
        match result {
            Some(Ok(())) => {}
            Some(Err(error)) => warn!(target: FONT_WARNING, "{}", error),
            None => debug!("font database build was skipped by the init handler"),
        }

        cache.font_dirs = matcher.font_dirs();
        cache.matcher = Some(matcher);

        match loader {
            Ok(loader) => cache.loader = Some(loader),
            Err(error) => warn!(target: FONT_WARNING, "{}, text will not be rendered", error),
        }
        cache
    }
}

impl<M, L> FontCache<M, L>
where
    M: Matcher,
    L: Loader,
{
    /// Returns true if and only if both engines came up.
    #[inline]
    pub fn is_init_ok(&self) -> bool {
        self.matcher.is_some() && self.loader.is_some()
    }

    /// Returns the face for `query`, resolving and caching it on a miss.
    ///
    /// The query is trimmed, and an empty query means [`resolver::DEFAULT_FONT`]. Returns `None` if
    /// the query cannot be resolved; nothing is cached in that case.
    pub fn get(&mut self, query: &str) -> Option<FaceHandle<L::Face>> {
        let key = resolver::normalize_query(query);
        debug!("font = \"{}\", lookup = \"{}\"", query, key);

        self.clock += 1;
        let now = self.clock;

        if let Some(entry) = self.entries.get_mut(key) {
            entry.last_access = now;
            return Some(entry.face.clone());
        }

        let face = match self.find_face(key) {
            Ok(face) => face,
            Err(error) => {
                debug!("font not found: {}", error);
                return None;
            }
        };
        debug!(
            "result = \"{}\", style = \"{}\"",
            face.family_name().unwrap_or_default(),
            face.style_name().unwrap_or_default()
        );

        self.check_cleanup();
        self.entries.insert(
            key.to_owned(),
            CacheEntry {
                face: face.clone(),
                last_access: now,
            },
        );
        Some(face)
    }

    fn find_face(&self, key: &str) -> Result<FaceHandle<L::Face>, SelectionError> {
        match (&self.matcher, &self.loader) {
            (Some(matcher), Some(loader)) => resolver::resolve(matcher, loader, key),
            _ => Err(SelectionError::Unavailable),
        }
    }

    /// Evicts the least recently used entry if the cache is full.
    fn check_cleanup(&mut self) {
        if self.entries.len() < self.max_entries {
            return;
        }

        let mut oldest: Option<(&String, u64)> = None;
        for (key, entry) in &self.entries {
            match oldest {
                Some((_, last_access)) if last_access <= entry.last_access => {}
                _ => oldest = Some((key, entry.last_access)),
            }
        }

        let key = match oldest {
            Some((key, _)) => key.clone(),
            None => return,
        };
        debug!("evicting \"{}\"", key);
        self.entries.remove(&key);
    }

    /// Drops every entry. Faces still held by callers stay alive.
    #[inline]
    pub fn clear(&mut self) {
        self.entries.clear()
    }

    /// Returns the number of cached faces.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if and only if no face is cached.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the most faces the cache holds at once.
    #[inline]
    pub fn max_entries(&self) -> usize {
        self.max_entries
    }

    /// Returns true if and only if `query` has a cached face.
    #[inline]
    pub fn contains(&self, query: &str) -> bool {
        self.entries.contains_key(resolver::normalize_query(query))
    }

    /// Returns the logical time at which the face for `query` was last handed out.
    ///
    /// Every lookup advances the cache's clock by one, so a larger value means a more recent
    /// access.
    #[inline]
    pub fn last_access(&self, query: &str) -> Option<u64> {
        self.entries
            .get(resolver::normalize_query(query))
            .map(|entry| entry.last_access)
    }

    /// Returns the cached keys in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(|key| key.as_str())
    }

    /// Formats the cache contents as `info: key (time) key (time) ...` and logs the line.
    pub fn dump(&self, info: &str) -> String {
        let mut line = format!("{}:", info);
        for (key, entry) in &self.entries {
            let _ = write!(line, " {} ({})", key, entry.last_access);
        }
        debug!("{}", line);
        line
    }

    /// Returns the directories the matching engine scans for fonts.
    #[inline]
    pub fn font_dirs(&self) -> &[PathBuf] {
        &self.font_dirs
    }

    /// Adds a font file to the matching engine's application fonts. Independent of the cache.
    pub fn register_font_file(&mut self, path: &Path) -> Result<(), RegistrationError> {
        let matcher = self.matcher.as_mut().ok_or(RegistrationError::Unavailable)?;
        matcher.add_font_file(path).map_err(|error| {
            info!("Can't register font '{}': {}", path.display(), error);
            error
        })
    }

    /// Adds every font in a directory to the matching engine's application fonts.
    ///
    /// Paths that are not directories are ignored.
    pub fn add_font_dir(&mut self, path: &Path) -> Result<(), RegistrationError> {
        if !path.is_dir() {
            return Err(RegistrationError::NotADirectory(path.to_owned()));
        }
        let matcher = self.matcher.as_mut().ok_or(RegistrationError::Unavailable)?;
        matcher.add_font_dir(path).map_err(|error| {
            info!("Can't register font directory '{}': {}", path.display(), error);
            error
        })
    }

    /// Lists every installed scalable outline font.
    pub fn list_fonts(&self) -> Vec<FontInfo> {
        match self.matcher {
            Some(ref matcher) => enumerator::list_fonts(matcher),
            None => vec![],
        }
    }

    /// Returns the fingerprints of the installed fonts that cover every character in `chars`.
    pub fn filter(&self, chars: &[char]) -> Vec<u32> {
        match self.matcher {
            Some(ref matcher) => enumerator::filter(matcher, chars),
            None => vec![],
        }
    }
}
