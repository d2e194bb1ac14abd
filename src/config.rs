// font-cache/src/config.rs
//
// Copyright © 2018 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Settings consumed when a cache is constructed.

use std::env;
use std::path::{Path, PathBuf};

/// The environment variable that lists additional font directories, separated by the platform's
/// path separator (`:` on Unix, `;` on Windows).
pub const FONT_PATH_ENV: &str = "FONT_CACHE_PATH";

/// The number of faces a cache keeps unless configured otherwise.
pub const DEFAULT_MAX_ENTRIES: usize = 3;

/// Settings consumed when a cache is constructed.
///
/// This object supports a method chaining style for initialization; e.g.
///
///     # use font_cache::config::Config;
///     let mut config = Config::new();
///     config.max_entries(8).resource_font_dir("/opt/app/fonts");
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    /// The most faces the cache holds at once.
    pub max_entries: usize,
    /// A font directory bundled with the application. If it contains a `fonts.conf`, that
    /// configuration is loaded as well.
    pub resource_font_dir: Option<PathBuf>,
    /// The per-user font directory.
    pub user_font_dir: Option<PathBuf>,
    /// Additional font directories.
    pub extra_font_dirs: Vec<PathBuf>,
}

impl Default for Config {
    fn default() -> Config {
        Config {
            max_entries: DEFAULT_MAX_ENTRIES,
            resource_font_dir: None,
            user_font_dir: None,
            extra_font_dirs: vec![],
        }
    }
}

impl Config {
    /// Creates a configuration with the default cache size and no font directories.
    #[inline]
    pub fn new() -> Config {
        Config::default()
    }

    /// Creates a configuration from the environment: `~/.fonts` as the user font directory and
    /// the entries of [`FONT_PATH_ENV`] as additional directories.
    pub fn from_env() -> Config {
        let mut config = Config::new();
        config.user_font_dir = default_user_font_dir();
        if let Some(paths) = env::var_os(FONT_PATH_ENV) {
            config.extra_font_dirs = env::split_paths(&paths)
                .filter(|path| !path.as_os_str().is_empty())
                .collect();
        }
        config
    }

    /// Sets the cache size and returns this configuration for method chaining.
    #[inline]
    pub fn max_entries(&mut self, max_entries: usize) -> &mut Config {
        self.max_entries = max_entries;
        self
    }

    /// Sets the bundled font directory and returns this configuration for method chaining.
    #[inline]
    pub fn resource_font_dir<P>(&mut self, path: P) -> &mut Config
    where
        P: Into<PathBuf>,
    {
        self.resource_font_dir = Some(path.into());
        self
    }

    /// Sets the per-user font directory and returns this configuration for method chaining.
    #[inline]
    pub fn user_font_dir<P>(&mut self, path: P) -> &mut Config
    where
        P: Into<PathBuf>,
    {
        self.user_font_dir = Some(path.into());
        self
    }

    /// Appends an additional font directory and returns this configuration for method chaining.
    #[inline]
    pub fn extra_font_dir<P>(&mut self, path: P) -> &mut Config
    where
        P: Into<PathBuf>,
    {
        self.extra_font_dirs.push(path.into());
        self
    }

    /// Returns the bundled Fontconfig configuration file, if the resource directory has one.
    pub fn bundled_fonts_conf(&self) -> Option<PathBuf> {
        let path = self.resource_font_dir.as_ref()?.join("fonts.conf");
        if path.is_file() {
            Some(path)
        } else {
            None
        }
    }

    /// Returns every configured directory that exists, as an absolute path, in registration
    /// order: resource directory, user directory, additional directories.
    pub fn font_dirs(&self) -> Vec<PathBuf> {
        self.resource_font_dir
            .iter()
            .chain(self.user_font_dir.iter())
            .chain(self.extra_font_dirs.iter())
            .filter(|path| path.is_dir())
            .filter_map(|path| absolute(path))
            .collect()
    }
}

fn absolute(path: &Path) -> Option<PathBuf> {
    if path.is_absolute() {
        return Some(path.to_owned());
    }
    env::current_dir().ok().map(|current_dir| current_dir.join(path))
}

#[cfg(not(any(target_arch = "wasm32", target_family = "windows", target_os = "android")))]
fn default_user_font_dir() -> Option<PathBuf> {
    dirs_next::home_dir().map(|path| path.join(".fonts"))
}

#[cfg(any(target_arch = "wasm32", target_family = "windows", target_os = "android"))]
fn default_user_font_dir() -> Option<PathBuf> {
    None
}
