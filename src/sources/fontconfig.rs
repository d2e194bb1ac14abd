// font-cache/src/sources/fontconfig.rs
//
// Copyright © 2018 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! A matching engine that contains the fonts installed on the system, as reported by the
//! Fontconfig library.
//!
//! On macOS and Windows, the Cargo feature `source-fontconfig` can be used to opt into fontconfig
//! support.

use fontconfig::fontconfig::{FcBool, FcChar8, FcCharSet, FcConfig, FcFontList, FcFontSetDestroy};
use fontconfig::fontconfig::{FcObjectSet, FcObjectSetAdd, FcObjectSetCreate, FcObjectSetDestroy};
use fontconfig::fontconfig::{FcPattern, FcPatternCreate, FcPatternDestroy, FcPatternGetInteger};
use fontconfig::fontconfig::{FcPatternGetString, FcResultMatch, FcStrList};
use libc::{c_char, c_int};
use log::debug;
use std::env;
use std::ffi::{CStr, CString};
use std::path::{Path, PathBuf};
use std::ptr;
use std::slice;

use crate::config::Config;
use crate::error::{BackendError, RegistrationError};
use crate::matcher::{FontMatch, ListedFont, Matcher};

#[allow(non_upper_case_globals)]
const FcFalse: FcBool = 0;
#[allow(non_upper_case_globals)]
const FcTrue: FcBool = 1;

#[allow(non_upper_case_globals)]
const FcMatchPattern: c_int = 0;

const FC_FAMILY: &[u8] = b"family\0";
const FC_STYLE: &[u8] = b"style\0";
const FC_FILE: &[u8] = b"file\0";
const FC_INDEX: &[u8] = b"index\0";
const FC_SCALABLE: &[u8] = b"scalable\0";
const FC_OUTLINE: &[u8] = b"outline\0";
const FC_CHARSET: &[u8] = b"charset\0";
const FC_FONT_FEATURES: &[u8] = b"fontfeatures\0";

const FONTCONFIG_PATH_ENV: &str = "FONTCONFIG_PATH";

/// A matching engine that contains the fonts installed on the system, as reported by the
/// Fontconfig library.
#[allow(missing_debug_implementations)]
pub struct FontconfigMatcher {
    config: *mut FcConfig,
}

// The configuration is owned exclusively by this object and only touched through `&self`/`&mut
// self`, so moving it to another thread is sound.
unsafe impl Send for FontconfigMatcher {}

impl FontconfigMatcher {
    /// Loads the Fontconfig configuration, without building the font database yet.
    ///
    /// If the configured resource font directory carries a `fonts.conf`, `FONTCONFIG_PATH` is
    /// pointed at that directory (unless already set) and the directory's configuration is loaded
    /// on top.
    pub fn new(config: &Config) -> Result<FontconfigMatcher, BackendError> {
        if let Some(fonts_conf) = config.bundled_fonts_conf() {
            if env::var_os(FONTCONFIG_PATH_ENV).is_none() {
                if let Some(dir) = fonts_conf.parent() {
                    env::set_var(FONTCONFIG_PATH_ENV, dir);
                }
            }
        }

        let matcher = unsafe {
            let fontconfig = FcInitLoadConfig();
            if fontconfig.is_null() {
                return Err(BackendError::Fontconfig);
            }
            FontconfigMatcher { config: fontconfig }
        };

        if let Some(ref dir) = config.resource_font_dir {
            if dir.is_dir() {
                let dir = dir.canonicalize().unwrap_or_else(|_| dir.clone());
                if let Some(c_dir) = path_to_c_string(&dir) {
                    unsafe {
                        FcConfigParseAndLoad(matcher.config, c_dir.as_ptr() as *const FcChar8, FcFalse);
                    }
                }
            }
        }
        Ok(matcher)
    }
}

impl Drop for FontconfigMatcher {
    fn drop(&mut self) {
        unsafe { FcConfigDestroy(self.config) }
    }
}

impl Matcher for FontconfigMatcher {
    type Pattern = FcPatternObject;

    fn parse_query(&self, query: &str) -> Option<FcPatternObject> {
        let c_query = CString::new(query).ok()?;
        unsafe {
            let pattern = FcNameParse(c_query.as_ptr() as *const FcChar8);
            FcPatternObject::from_raw(pattern)
        }
    }

    #[inline]
    fn empty_pattern(&self) -> FcPatternObject {
        FcPatternObject::new()
    }

    fn require_scalable_outline(&self, pattern: &mut FcPatternObject) {
        unsafe {
            pattern.push_bool(FC_OUTLINE, true);
            pattern.push_bool(FC_SCALABLE, true);
        }
    }

    fn require_coverage(&self, pattern: &mut FcPatternObject, chars: &[char]) {
        if chars.is_empty() {
            return;
        }
        unsafe { pattern.push_charset(FC_CHARSET, chars) }
    }

    fn best_match(&self, pattern: FcPatternObject) -> Option<FontMatch> {
        unsafe {
            FcConfigSubstitute(self.config, pattern.pattern, FcMatchPattern);
            FcDefaultSubstitute(pattern.pattern);

            let mut result = 0;
            let font_match =
                FcPatternObject::from_raw(FcFontMatch(self.config, pattern.pattern, &mut result))?;

            let path = fc_pattern_get_string(font_match.pattern, FC_FILE)?;
            let face_index = fc_pattern_get_integer(font_match.pattern, FC_INDEX)?;
            Some(FontMatch {
                path: PathBuf::from(path),
                face_index: face_index as u32,
                features: fc_pattern_get_string(font_match.pattern, FC_FONT_FEATURES),
            })
        }
    }

    fn list(&self, pattern: &FcPatternObject) -> Vec<ListedFont> {
        unsafe {
            let mut object_set = FcObjectSetObject::new();
            object_set.push_string(FC_FAMILY);
            object_set.push_string(FC_STYLE);
            object_set.push_string(FC_FILE);

            let font_set = FcFontList(self.config, pattern.pattern, object_set.object_set);
            if font_set.is_null() {
                return vec![];
            }
            // An empty set may have no font array at all.
            if (*font_set).nfont <= 0 || (*font_set).fonts.is_null() {
                FcFontSetDestroy(font_set);
                return vec![];
            }

            let font_patterns = slice::from_raw_parts((*font_set).fonts, (*font_set).nfont as usize);
            let fonts = font_patterns
                .iter()
                .map(|&font_pattern| ListedFont {
                    family: fc_pattern_get_string(font_pattern, FC_FAMILY),
                    style: fc_pattern_get_string(font_pattern, FC_STYLE),
                    file: fc_pattern_get_string(font_pattern, FC_FILE).map(PathBuf::from),
                    fingerprint: FcPatternHash(font_pattern),
                })
                .collect();
            FcFontSetDestroy(font_set);
            fonts
        }
    }

    fn add_font_file(&mut self, path: &Path) -> Result<(), RegistrationError> {
        let c_path =
            path_to_c_string(path).ok_or_else(|| RegistrationError::Rejected(path.to_owned()))?;
        unsafe {
            if FcConfigAppFontAddFile(self.config, c_path.as_ptr() as *const FcChar8) == FcTrue {
                Ok(())
            } else {
                Err(RegistrationError::Rejected(path.to_owned()))
            }
        }
    }

    fn add_font_dir(&mut self, path: &Path) -> Result<(), RegistrationError> {
        if !path.is_dir() {
            return Err(RegistrationError::NotADirectory(path.to_owned()));
        }
        let c_path =
            path_to_c_string(path).ok_or_else(|| RegistrationError::Rejected(path.to_owned()))?;
        unsafe {
            if FcConfigAppFontAddDir(self.config, c_path.as_ptr() as *const FcChar8) == FcTrue {
                debug!("registered font directory '{}'", path.display());
                Ok(())
            } else {
                Err(RegistrationError::Rejected(path.to_owned()))
            }
        }
    }

    fn build_database(&mut self) -> Result<(), BackendError> {
        unsafe {
            if FcConfigBuildFonts(self.config) == FcTrue {
                Ok(())
            } else {
                Err(BackendError::Database)
            }
        }
    }

    fn font_dirs(&self) -> Vec<PathBuf> {
        let mut dirs = vec![];
        unsafe {
            let list = FcConfigGetFontDirs(self.config);
            if list.is_null() {
                return dirs;
            }
            loop {
                let dir = FcStrListNext(list);
                if dir.is_null() {
                    break;
                }
                if let Ok(dir) = CStr::from_ptr(dir as *const c_char).to_str() {
                    dirs.push(PathBuf::from(dir));
                }
            }
            FcStrListDone(list);
        }
        dirs
    }
}

/// An owned Fontconfig pattern.
#[allow(missing_debug_implementations)]
pub struct FcPatternObject {
    pattern: *mut FcPattern,
}

impl Drop for FcPatternObject {
    #[inline]
    fn drop(&mut self) {
        unsafe { FcPatternDestroy(self.pattern) }
    }
}

impl FcPatternObject {
    fn new() -> FcPatternObject {
        unsafe {
            FcPatternObject {
                pattern: FcPatternCreate(),
            }
        }
    }

    unsafe fn from_raw(pattern: *mut FcPattern) -> Option<FcPatternObject> {
        if pattern.is_null() {
            None
        } else {
            Some(FcPatternObject { pattern })
        }
    }

    unsafe fn push_bool(&mut self, object: &'static [u8], value: bool) {
        let value = if value { FcTrue } else { FcFalse };
        FcPatternAddBool(self.pattern, object.as_ptr() as *const c_char, value);
    }

    unsafe fn push_charset(&mut self, object: &'static [u8], chars: &[char]) {
        let char_set = FcCharSetCreate();
        for &character in chars {
            FcCharSetAddChar(char_set, character as u32);
        }
        // The pattern keeps its own reference.
        FcPatternAddCharSet(self.pattern, object.as_ptr() as *const c_char, char_set);
        FcCharSetDestroy(char_set);
    }
}

struct FcObjectSetObject {
    object_set: *mut FcObjectSet,
}

impl Drop for FcObjectSetObject {
    fn drop(&mut self) {
        unsafe { FcObjectSetDestroy(self.object_set) }
    }
}

impl FcObjectSetObject {
    fn new() -> FcObjectSetObject {
        unsafe {
            FcObjectSetObject {
                object_set: FcObjectSetCreate(),
            }
        }
    }

    unsafe fn push_string(&mut self, object: &'static [u8]) {
        assert_eq!(
            FcObjectSetAdd(self.object_set, object.as_ptr() as *const c_char),
            FcTrue
        );
    }
}

fn path_to_c_string(path: &Path) -> Option<CString> {
    CString::new(path.to_str()?).ok()
}

unsafe fn fc_pattern_get_string(pattern: *mut FcPattern, object: &'static [u8]) -> Option<String> {
    let mut string = ptr::null_mut();
    if FcPatternGetString(pattern, object.as_ptr() as *const c_char, 0, &mut string)
        != FcResultMatch
    {
        return None;
    }
    if string.is_null() {
        return None;
    }
    CStr::from_ptr(string as *const c_char)
        .to_str()
        .ok()
        .map(|string| string.to_owned())
}

unsafe fn fc_pattern_get_integer(pattern: *mut FcPattern, object: &'static [u8]) -> Option<i32> {
    let mut integer = 0;
    if FcPatternGetInteger(pattern, object.as_ptr() as *const c_char, 0, &mut integer)
        != FcResultMatch
    {
        return None;
    }
    Some(integer)
}

extern "C" {
    fn FcInitLoadConfig() -> *mut FcConfig;
    fn FcConfigDestroy(config: *mut FcConfig);
    fn FcConfigParseAndLoad(config: *mut FcConfig, file: *const FcChar8, complain: FcBool)
        -> FcBool;
    fn FcConfigBuildFonts(config: *mut FcConfig) -> FcBool;
    fn FcConfigAppFontAddFile(config: *mut FcConfig, file: *const FcChar8) -> FcBool;
    fn FcConfigAppFontAddDir(config: *mut FcConfig, dir: *const FcChar8) -> FcBool;
    fn FcConfigGetFontDirs(config: *mut FcConfig) -> *mut FcStrList;
    fn FcConfigSubstitute(config: *mut FcConfig, pattern: *mut FcPattern, kind: c_int) -> FcBool;
    fn FcDefaultSubstitute(pattern: *mut FcPattern);
    fn FcFontMatch(
        config: *mut FcConfig,
        pattern: *mut FcPattern,
        result: *mut c_int,
    ) -> *mut FcPattern;
    fn FcNameParse(name: *const FcChar8) -> *mut FcPattern;
    fn FcPatternAddBool(pattern: *mut FcPattern, object: *const c_char, value: FcBool) -> FcBool;
    fn FcPatternAddCharSet(
        pattern: *mut FcPattern,
        object: *const c_char,
        char_set: *const FcCharSet,
    ) -> FcBool;
    fn FcPatternHash(pattern: *const FcPattern) -> u32;
    fn FcCharSetCreate() -> *mut FcCharSet;
    fn FcCharSetAddChar(char_set: *mut FcCharSet, ucs4: u32) -> FcBool;
    fn FcCharSetDestroy(char_set: *mut FcCharSet);
    fn FcStrListNext(list: *mut FcStrList) -> *mut FcChar8;
    fn FcStrListDone(list: *mut FcStrList);
}
