// font-cache/demos/list-fonts.rs
//
// Copyright © 2018 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Lists all scalable fonts on the system.
//!
//! If a string is given, only fonts that cover every character in it are listed.

extern crate font_cache;
extern crate prettytable;

#[cfg(any(
    not(any(
        target_family = "windows",
        target_os = "macos",
        target_os = "ios",
        target_arch = "wasm32"
    )),
    all(feature = "source-fontconfig", feature = "loader-freetype")
))]
fn main() {
    use font_cache::cache::SystemFontCache;
    use font_cache::config::Config;
    use font_cache::init::Synchronous;
    use prettytable::Cell;
    use prettytable::Row;
    use prettytable::{Attr, Table};
    use std::env;

    let mut table = Table::new();
    table.set_format(*prettytable::format::consts::FORMAT_NO_BORDER_LINE_SEPARATOR);
    table.set_titles(Row::new(vec![
        Cell::new("Family").with_style(Attr::Bold),
        Cell::new("Style").with_style(Attr::Bold),
        Cell::new("File").with_style(Attr::Bold),
        Cell::new("Fingerprint").with_style(Attr::Bold),
    ]));

    let cache = SystemFontCache::new(&Config::from_env(), &mut Synchronous);
    if !cache.is_init_ok() {
        eprintln!("The font backends could not be initialized.");
        std::process::exit(1);
    }

    let covering = env::args().nth(1).map(|text| {
        let chars: Vec<char> = text.chars().collect();
        cache.filter(&chars)
    });

    let mut fonts = cache.list_fonts();
    fonts.sort();
    for font in fonts {
        if let Some(ref covering) = covering {
            if !covering.contains(&font.fingerprint()) {
                continue;
            }
        }
        table.add_row(Row::new(vec![
            Cell::new(font.family()),
            Cell::new(font.style()),
            Cell::new(&font.file().display().to_string()),
            Cell::new(&format!("{:08x}", font.fingerprint())),
        ]));
    }

    table.printstd();
}

#[cfg(not(any(
    not(any(
        target_family = "windows",
        target_os = "macos",
        target_os = "ios",
        target_arch = "wasm32"
    )),
    all(feature = "source-fontconfig", feature = "loader-freetype")
)))]
fn main() {
    println!("Enable the `source-fontconfig` and `loader-freetype` features to list fonts.");
}
