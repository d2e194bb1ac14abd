// font-cache/src/sources/mem.rs
//
// Copyright © 2018 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! A matching engine that keeps its font database in memory.
//!
//! Queries use the Fontconfig name syntax subset `family[,family...][:name=value...]`; of the
//! properties only `style` takes part in matching. Like Fontconfig, `best_match` always picks the
//! closest font rather than requiring an exact family match.

use std::collections::BTreeSet;
use std::path::PathBuf;

use crate::matcher::{FontMatch, ListedFont, Matcher};

bitflags! {
    /// Capabilities a font declares.
    #[derive(Default)]
    pub struct FontFlags: u8 {
        /// The font can be drawn at any size.
        const SCALABLE = 0x01;
        /// The font has vector outlines.
        const OUTLINE = 0x02;
    }
}

/// One font in a [`MemMatcher`] database.
///
/// Fields are optional because real databases contain incomplete entries.
#[derive(Clone, Debug, PartialEq)]
pub struct FontRecord {
    pub family: Option<String>,
    pub style: Option<String>,
    pub file: Option<PathBuf>,
    pub face_index: u32,
    pub features: Option<String>,
    pub flags: FontFlags,
    pub coverage: BTreeSet<char>,
}

impl FontRecord {
    /// Creates a scalable outline font record with no declared coverage.
    pub fn new<P>(family: &str, style: &str, file: P) -> FontRecord
    where
        P: Into<PathBuf>,
    {
        FontRecord {
            family: Some(family.to_owned()),
            style: Some(style.to_owned()),
            file: Some(file.into()),
            face_index: 0,
            features: None,
            flags: FontFlags::SCALABLE | FontFlags::OUTLINE,
            coverage: BTreeSet::new(),
        }
    }

    #[inline]
    pub fn face_index(mut self, face_index: u32) -> FontRecord {
        self.face_index = face_index;
        self
    }

    #[inline]
    pub fn features(mut self, features: &str) -> FontRecord {
        self.features = Some(features.to_owned());
        self
    }

    #[inline]
    pub fn flags(mut self, flags: FontFlags) -> FontRecord {
        self.flags = flags;
        self
    }

    #[inline]
    pub fn coverage<I>(mut self, chars: I) -> FontRecord
    where
        I: IntoIterator<Item = char>,
    {
        self.coverage.extend(chars);
        self
    }

    /// A 32-bit FNV-1a hash over family, style, file and face index. Stable across runs.
    pub fn fingerprint(&self) -> u32 {
        const FNV_OFFSET_BASIS: u32 = 0x811c_9dc5;
        const FNV_PRIME: u32 = 0x0100_0193;

        let file = self
            .file
            .as_ref()
            .map(|file| file.to_string_lossy().into_owned());
        let fields = [
            self.family.as_deref(),
            self.style.as_deref(),
            file.as_deref(),
        ];

        let mut hash = FNV_OFFSET_BASIS;
        let mut feed = |bytes: &[u8]| {
            for &byte in bytes {
                hash ^= byte as u32;
                hash = hash.wrapping_mul(FNV_PRIME);
            }
        };
        for field in fields.iter() {
            match *field {
                Some(value) => {
                    feed(&[1]);
                    feed(value.as_bytes());
                }
                None => feed(&[0]),
            }
        }
        feed(&self.face_index.to_le_bytes());
        hash
    }

    fn satisfies(&self, pattern: &MemPattern) -> bool {
        self.flags.contains(pattern.required) && pattern.coverage.is_subset(&self.coverage)
    }
}

/// A pattern for a [`MemMatcher`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MemPattern {
    families: Vec<String>,
    style: Option<String>,
    required: FontFlags,
    coverage: BTreeSet<char>,
}

impl MemPattern {
    /// Parses `family[,family...][:name=value...]`.
    ///
    /// Returns `None` if a property is missing its `=` or its name.
    pub fn parse(query: &str) -> Option<MemPattern> {
        let mut elements = query.split(':');
        let mut pattern = MemPattern::default();

        pattern.families = elements
            .next()
            .unwrap_or("")
            .split(',')
            .map(|family| family.trim())
            .filter(|family| !family.is_empty())
            .map(|family| family.to_owned())
            .collect();

        for element in elements {
            let mut parts = element.splitn(2, '=');
            let name = parts.next().unwrap_or("").trim();
            let value = parts.next()?.trim();
            if name.is_empty() {
                return None;
            }
            if name.eq_ignore_ascii_case("style") {
                pattern.style = Some(value.to_owned());
            }
        }
        Some(pattern)
    }

    fn accepts(&self, record: &FontRecord) -> bool {
        let family_ok = self.families.is_empty()
            || record.family.as_ref().map_or(false, |family| {
                self.families
                    .iter()
                    .any(|wanted| wanted.eq_ignore_ascii_case(family))
            });
        let style_ok = match (&self.style, &record.style) {
            (None, _) => true,
            (Some(wanted), Some(style)) => wanted.eq_ignore_ascii_case(style),
            (Some(_), None) => false,
        };
        family_ok && style_ok && record.satisfies(self)
    }

    // Lower is better: family priority first, then whether the style matches.
    fn distance(&self, record: &FontRecord) -> (usize, bool) {
        let family_rank = record
            .family
            .as_ref()
            .and_then(|family| {
                self.families
                    .iter()
                    .position(|wanted| wanted.eq_ignore_ascii_case(family))
            })
            .unwrap_or(usize::MAX);
        let style_mismatch = match (&self.style, &record.style) {
            (Some(wanted), Some(style)) => !wanted.eq_ignore_ascii_case(style),
            (Some(_), None) => true,
            (None, _) => false,
        };
        (family_rank, style_mismatch)
    }
}

/// A matching engine that keeps its font database in memory.
#[derive(Clone, Debug, Default)]
pub struct MemMatcher {
    records: Vec<FontRecord>,
}

impl MemMatcher {
    /// Creates an empty database.
    #[inline]
    pub fn new() -> MemMatcher {
        MemMatcher::default()
    }

    /// Creates a database holding `records`, in order.
    pub fn from_records<I>(records: I) -> MemMatcher
    where
        I: IntoIterator<Item = FontRecord>,
    {
        MemMatcher {
            records: records.into_iter().collect(),
        }
    }

    /// Adds a record to the database.
    #[inline]
    pub fn push(&mut self, record: FontRecord) {
        self.records.push(record)
    }

    /// Returns all records, in order.
    #[inline]
    pub fn records(&self) -> &[FontRecord] {
        &self.records
    }
}

impl Matcher for MemMatcher {
    type Pattern = MemPattern;

    #[inline]
    fn parse_query(&self, query: &str) -> Option<MemPattern> {
        MemPattern::parse(query)
    }

    #[inline]
    fn empty_pattern(&self) -> MemPattern {
        MemPattern::default()
    }

    #[inline]
    fn require_scalable_outline(&self, pattern: &mut MemPattern) {
        pattern.required |= FontFlags::SCALABLE | FontFlags::OUTLINE;
    }

    #[inline]
    fn require_coverage(&self, pattern: &mut MemPattern, chars: &[char]) {
        pattern.coverage.extend(chars.iter().cloned());
    }

    fn best_match(&self, pattern: MemPattern) -> Option<FontMatch> {
        let mut best: Option<(&FontRecord, (usize, bool))> = None;
        for record in self.records.iter().filter(|record| record.satisfies(&pattern)) {
            let distance = pattern.distance(record);
            match best {
                Some((_, best_distance)) if best_distance <= distance => {}
                _ => best = Some((record, distance)),
            }
        }

        let record = best?.0;
        Some(FontMatch {
            path: record.file.clone()?,
            face_index: record.face_index,
            features: record.features.clone(),
        })
    }

    fn list(&self, pattern: &MemPattern) -> Vec<ListedFont> {
        self.records
            .iter()
            .filter(|record| pattern.accepts(record))
            .map(|record| ListedFont {
                family: record.family.clone(),
                style: record.style.clone(),
                file: record.file.clone(),
                fingerprint: record.fingerprint(),
            })
            .collect()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn database() -> MemMatcher {
        MemMatcher::from_records(vec![
            FontRecord::new("Liberation Sans", "Regular", "/fonts/LiberationSans-Regular.ttf"),
            FontRecord::new("Liberation Sans", "Bold", "/fonts/LiberationSans-Bold.ttf"),
            FontRecord::new("DejaVu Sans", "Book", "/fonts/DejaVuSans.ttc").face_index(2),
            FontRecord::new("Fixed", "Regular", "/fonts/fixed.pcf").flags(FontFlags::empty()),
        ])
    }

    fn best(matcher: &MemMatcher, query: &str) -> Option<FontMatch> {
        let mut pattern = matcher.parse_query(query)?;
        matcher.require_scalable_outline(&mut pattern);
        matcher.best_match(pattern)
    }

    #[test]
    fn parse_family_and_style() {
        let pattern = MemPattern::parse("Liberation Sans:style=Bold").unwrap();
        assert_eq!(pattern.families, vec!["Liberation Sans"]);
        assert_eq!(pattern.style.as_deref(), Some("Bold"));
    }

    #[test]
    fn parse_family_list_and_ignored_properties() {
        let pattern = MemPattern::parse("Foo, Bar:weight=200:style=Italic").unwrap();
        assert_eq!(pattern.families, vec!["Foo", "Bar"]);
        assert_eq!(pattern.style.as_deref(), Some("Italic"));
    }

    #[test]
    fn parse_rejects_malformed_properties() {
        assert_eq!(MemPattern::parse("Sans:style"), None);
        assert_eq!(MemPattern::parse("Sans:=Bold"), None);
    }

    #[test]
    fn style_selects_face() {
        let font_match = best(&database(), "liberation sans:style=bold").unwrap();
        assert_eq!(font_match.path, PathBuf::from("/fonts/LiberationSans-Bold.ttf"));
    }

    #[test]
    fn collection_index_is_reported() {
        let font_match = best(&database(), "DejaVu Sans").unwrap();
        assert_eq!(font_match.face_index, 2);
    }

    #[test]
    fn unknown_family_falls_back_to_closest() {
        let font_match = best(&database(), "Nonexistent:style=Bold").unwrap();
        assert_eq!(font_match.path, PathBuf::from("/fonts/LiberationSans-Bold.ttf"));
    }

    #[test]
    fn bitmap_fonts_never_match() {
        let matcher = MemMatcher::from_records(vec![
            FontRecord::new("Fixed", "Regular", "/fonts/fixed.pcf").flags(FontFlags::SCALABLE),
        ]);
        assert_eq!(best(&matcher, "Fixed"), None);
    }

    #[test]
    fn record_without_file_is_no_match() {
        let mut record = FontRecord::new("Ghost", "Regular", "/nowhere");
        record.file = None;
        assert_eq!(best(&MemMatcher::from_records(vec![record]), "Ghost"), None);
    }

    #[test]
    fn fingerprint_is_structural() {
        let a = FontRecord::new("A", "Regular", "/a.ttf");
        assert_eq!(a.fingerprint(), a.clone().features("liga").fingerprint());
        assert_ne!(a.fingerprint(), a.clone().face_index(1).fingerprint());
        assert_ne!(
            FontRecord::new("AB", "", "/x").fingerprint(),
            FontRecord::new("A", "B", "/x").fingerprint()
        );
    }
}
