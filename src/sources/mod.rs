// font-cache/src/sources/mod.rs
//
// Copyright © 2018 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Matching engines: databases of installed fonts that can be queried with patterns.
//!
//! The Fontconfig engine reports the fonts installed on the system. The `mem` engine holds an
//! application-supplied list of fonts.

#[cfg(any(
    not(any(
        target_family = "windows",
        target_os = "macos",
        target_os = "ios",
        target_arch = "wasm32"
    )),
    feature = "source-fontconfig"
))]
pub mod fontconfig;

pub mod mem;
