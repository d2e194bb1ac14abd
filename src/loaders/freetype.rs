// font-cache/src/loaders/freetype.rs
//
// Copyright © 2018 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! An outline engine that uses the FreeType library to load faces.
//!
//! On macOS and Windows, the Cargo feature `loader-freetype` can be used to opt into this loader.

use freetype::freetype::{FT_Done_Face, FT_Done_FreeType, FT_Error, FT_Face, FT_Get_First_Char};
use freetype::freetype::{FT_Init_FreeType, FT_Library, FT_Long, FT_New_Face, FT_Set_Charmap};
use freetype::freetype::FT_UInt;
use std::ffi::{CStr, CString};
use std::fmt::{self, Debug, Formatter};
use std::os::raw::c_char;
use std::path::Path;
use std::ptr;
use std::slice;
use std::sync::Arc;

use crate::error::{BackendError, CharmapError, FontLoadingError};
use crate::loader::{CharmapId, Face, Loader};

// FT_ENC_TAG('u', 'n', 'i', 'c')
const FT_ENCODING_UNICODE: u32 = 0x756e_6963;

/// An initialized FreeType library. Faces keep it alive until they are all gone.
struct Library {
    library: FT_Library,
}

impl Drop for Library {
    fn drop(&mut self) {
        unsafe {
            FT_Done_FreeType(self.library);
        }
    }
}

/// An outline engine that uses the FreeType library to load faces.
#[derive(Clone)]
pub struct FreeTypeLoader {
    library: Arc<Library>,
}

impl FreeTypeLoader {
    /// Initializes a FreeType library instance.
    pub fn new() -> Result<FreeTypeLoader, BackendError> {
        unsafe {
            let mut library = ptr::null_mut();
            let error = FT_Init_FreeType(&mut library);
            if error != 0 {
                return Err(BackendError::FreeType(error as i32));
            }
            Ok(FreeTypeLoader {
                library: Arc::new(Library { library }),
            })
        }
    }
}

impl Debug for FreeTypeLoader {
    fn fmt(&self, fmt: &mut Formatter) -> Result<(), fmt::Error> {
        fmt.write_str("FreeTypeLoader")
    }
}

impl Loader for FreeTypeLoader {
    type Face = FreeTypeFace;

    fn load(&self, path: &Path, face_index: u32) -> Result<FreeTypeFace, FontLoadingError> {
        let c_path = path
            .to_str()
            .and_then(|path| CString::new(path).ok())
            .ok_or_else(|| FontLoadingError::InvalidPath(path.to_owned()))?;
        unsafe {
            let mut freetype_face = ptr::null_mut();
            let error = FT_New_Face(
                self.library.library,
                c_path.as_ptr(),
                face_index as FT_Long,
                &mut freetype_face,
            );
            if error != 0 {
                return Err(FontLoadingError::Engine {
                    path: path.to_owned(),
                    index: face_index,
                    code: error as i32,
                });
            }
            Ok(FreeTypeFace {
                freetype_face,
                _library: self.library.clone(),
            })
        }
    }
}

/// A face loaded by FreeType.
pub struct FreeTypeFace {
    freetype_face: FT_Face,
    _library: Arc<Library>,
}

impl FreeTypeFace {
    /// Returns the wrapped native face handle. It stays owned by this object.
    #[inline]
    pub fn native_face(&self) -> FT_Face {
        self.freetype_face
    }
}

impl Drop for FreeTypeFace {
    fn drop(&mut self) {
        unsafe {
            if !self.freetype_face.is_null() {
                assert_eq!(FT_Done_Face(self.freetype_face), 0);
            }
        }
    }
}

impl Debug for FreeTypeFace {
    fn fmt(&self, fmt: &mut Formatter) -> Result<(), fmt::Error> {
        self.family_name().fmt(fmt)
    }
}

impl Face for FreeTypeFace {
    fn family_name(&self) -> Option<String> {
        unsafe { c_string_to_owned((*self.freetype_face).family_name) }
    }

    fn style_name(&self) -> Option<String> {
        unsafe { c_string_to_owned((*self.freetype_face).style_name) }
    }

    fn charmaps(&self) -> Vec<CharmapId> {
        unsafe {
            let face = &*self.freetype_face;
            if face.charmaps.is_null() || face.num_charmaps <= 0 {
                return vec![];
            }
            slice::from_raw_parts(face.charmaps, face.num_charmaps as usize)
                .iter()
                .map(|&charmap| CharmapId::new((*charmap).platform_id, (*charmap).encoding_id))
                .collect()
        }
    }

    fn active_charmap(&self) -> Option<CharmapId> {
        unsafe {
            let charmap = (*self.freetype_face).charmap;
            if charmap.is_null() {
                None
            } else {
                Some(CharmapId::new((*charmap).platform_id, (*charmap).encoding_id))
            }
        }
    }

    fn select_unicode_charmap(&mut self) -> Result<(), CharmapError> {
        unsafe {
            match FT_Select_Charmap(self.freetype_face, FT_ENCODING_UNICODE) {
                0 => Ok(()),
                error => Err(CharmapError::Engine(error as i32)),
            }
        }
    }

    fn set_charmap(&mut self, index: usize) -> Result<(), CharmapError> {
        unsafe {
            let face = &*self.freetype_face;
            if face.charmaps.is_null() || index >= face.num_charmaps.max(0) as usize {
                return Err(CharmapError::NoSuchCharmap(index));
            }
            let charmap = *face.charmaps.add(index);
            match FT_Set_Charmap(self.freetype_face, charmap) {
                0 => Ok(()),
                error => Err(CharmapError::Engine(error as i32)),
            }
        }
    }

    fn first_char(&self) -> Option<(u32, u32)> {
        unsafe {
            if (*self.freetype_face).charmap.is_null() {
                return None;
            }
            let mut glyph_index: FT_UInt = 0;
            let charcode = FT_Get_First_Char(self.freetype_face, &mut glyph_index);
            if glyph_index == 0 {
                None
            } else {
                Some((charcode as u32, glyph_index as u32))
            }
        }
    }
}

unsafe fn c_string_to_owned(string: *const c_char) -> Option<String> {
    if string.is_null() {
        return None;
    }
    CStr::from_ptr(string).to_str().ok().map(|string| string.to_owned())
}

extern "C" {
    fn FT_Select_Charmap(face: FT_Face, encoding: u32) -> FT_Error;
}
