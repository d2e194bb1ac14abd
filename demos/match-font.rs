// font-cache/demos/match-font.rs
//
// Copyright © 2020 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Resolves font queries through a cache and shows which ones were served from it.

extern crate clap;
extern crate colored;
extern crate font_cache;

use clap::{App, Arg, ArgMatches};

fn get_args() -> ArgMatches<'static> {
    let query_arg = Arg::with_name("QUERY")
        .help("Font queries, e.g. \"DejaVu Sans:style=Bold\"; an empty query means the default font")
        .multiple(true)
        .index(1);
    let max_entries_arg = Arg::with_name("max-entries")
        .long("max-entries")
        .short("n")
        .takes_value(true)
        .help("Number of faces the cache keeps");
    let dump_arg = Arg::with_name("dump")
        .long("dump")
        .help("Print the cache contents after every query");
    App::new("match-font")
        .version("0.1")
        .arg(query_arg)
        .arg(max_entries_arg)
        .arg(dump_arg)
        .get_matches()
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
fn main() {
    use colored::Colorize;
    use font_cache::cache::SystemFontCache;
    use font_cache::config::Config;
    use font_cache::init::Synchronous;

    let matches = get_args();

    let mut config = Config::from_env();
    if let Some(max_entries) = matches.value_of("max-entries") {
        match max_entries.parse() {
            Ok(max_entries) => {
                config.max_entries(max_entries);
            }
            Err(_) => {
                eprintln!("{} invalid cache size '{}'", "error:".red().bold(), max_entries);
                std::process::exit(1);
            }
        }
    }

    let mut cache = SystemFontCache::new(&config, &mut Synchronous);
    if !cache.is_init_ok() {
        eprintln!("{} the font backends could not be initialized", "error:".red().bold());
        std::process::exit(1);
    }

    let queries: Vec<&str> = match matches.values_of("QUERY") {
        Some(values) => values.collect(),
        None => vec![""],
    };
    for query in queries {
        let cached = cache.contains(query);
        match cache.get(query) {
            Some(face) => {
                let status = if cached { "hit".green() } else { "loaded".yellow() };
                println!(
                    "{:>8} {:?} -> {} {}",
                    status,
                    query,
                    face.family_name().unwrap_or_default().bold(),
                    face.style_name().unwrap_or_default()
                );
                if face.features().iter().any(|feature| !feature.is_empty()) {
                    println!("         features: {}", face.features().join(";"));
                }
            }
            None => println!("{:>8} {:?}", "missing".red(), query),
        }
        if matches.is_present("dump") {
            println!("{}", cache.dump("cache").dimmed());
        }
    }
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
    let _ = get_args();
    println!("Enable the `source-fontconfig` and `loader-freetype` features to match fonts.");
}
