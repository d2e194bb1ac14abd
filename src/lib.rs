// font-cache/src/lib.rs
//
// Copyright © 2018 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! `font-cache` resolves textual font requests such as `"Liberation Sans:style=Regular"` into
//! loaded faces and keeps a small cache of the most recently used ones.
//!
//! Font matching and font loading are delegated to engines behind the [`Matcher`] and [`Loader`]
//! traits. On Unix-like systems these are Fontconfig and FreeType; elsewhere the Cargo features
//! `source-fontconfig` and `loader-freetype` opt into them. An in-memory matching engine,
//! [`MemMatcher`], is always available.
//!
//! Typical use:
//!
//! ```no_run
//! # #[cfg(target_os = "linux")]
//! # fn main() {
//! use font_cache::cache::SystemFontCache;
//! use font_cache::config::Config;
//! use font_cache::init::Synchronous;
//!
//! let mut cache = SystemFontCache::new(&Config::from_env(), &mut Synchronous);
//! if let Some(face) = cache.get("DejaVu Sans:style=Bold") {
//!     println!("{:?}", face.family_name());
//! }
//! # }
//! # #[cfg(not(target_os = "linux"))]
//! # fn main() {}
//! ```
//!
//! Font warnings (engines that failed to come up, unparseable queries, faces without a usable
//! charmap) are logged with the target [`FONT_WARNING`]; the individual resolution steps are
//! logged at debug level.
//!
//! [`Matcher`]: matcher::Matcher
//! [`Loader`]: loader::Loader
//! [`MemMatcher`]: sources::mem::MemMatcher

#![warn(missing_debug_implementations)]

#[macro_use]
extern crate bitflags;

pub mod cache;
pub mod charmap;
pub mod config;
pub mod enumerator;
pub mod error;
pub mod face;
pub mod font_info;
pub mod init;
pub mod loader;
pub mod loaders;
pub mod matcher;
pub mod resolver;
pub mod sources;

/// The log target of font warnings.
pub const FONT_WARNING: &str = "font_cache::warning";
