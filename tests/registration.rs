// font-cache/tests/registration.rs
//
// Copyright © 2018 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

// Font directory discovery and registration at cache construction.

mod common;

use font_cache::cache::FontCache;
use font_cache::config::{Config, FONT_PATH_ENV};
use font_cache::init::Synchronous;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use common::{database, RecordingMatcher, TableLoader};

fn scratch_dir(name: &str) -> PathBuf {
    let path = env::temp_dir().join(format!(
        "font-cache-registration-{}-{}",
        name,
        std::process::id()
    ));
    fs::create_dir_all(&path).unwrap();
    path
}

#[test]
fn existing_directories_are_registered_in_order() {
    let root = scratch_dir("order");
    let resource = root.join("resource");
    let extra = root.join("extra");
    let file = root.join("Stray.ttf");
    fs::create_dir_all(&resource).unwrap();
    fs::create_dir_all(&extra).unwrap();
    fs::write(&file, b"").unwrap();

    let mut config = Config::new();
    config
        .resource_font_dir(&resource)
        .user_font_dir(root.join("missing"))
        .extra_font_dir(&file)
        .extra_font_dir(&extra)
        .extra_font_dir("tests/common");

    let matcher = RecordingMatcher::new(database());
    let registered = matcher.registered_dirs();
    let loader = TableLoader::for_matcher(&database());
    let cache = FontCache::from_backends(&config, Ok(matcher), Ok(loader), &mut Synchronous);

    let common_dir = env::current_dir().unwrap().join("tests/common");
    let expected = vec![resource.clone(), extra.clone(), common_dir];
    assert_eq!(*registered.lock().unwrap(), expected);
    assert!(registered.lock().unwrap().iter().all(|path| path.is_absolute()));
    assert_eq!(cache.font_dirs(), &expected[..]);
    assert!(cache.is_init_ok());

    fs::remove_dir_all(&root).unwrap();
}

#[test]
fn no_directories_means_no_registration() {
    let matcher = RecordingMatcher::new(database());
    let registered = matcher.registered_dirs();
    let loader = TableLoader::for_matcher(&database());
    let cache = FontCache::from_backends(&Config::new(), Ok(matcher), Ok(loader), &mut Synchronous);
    assert!(registered.lock().unwrap().is_empty());
    assert!(cache.font_dirs().is_empty());
}

#[test]
fn font_path_variable_is_split_on_path_separator() {
    let root = scratch_dir("env");
    let first = root.join("first");
    let second = root.join("second");
    let missing = root.join("missing");
    fs::create_dir_all(&first).unwrap();
    fs::create_dir_all(&second).unwrap();

    let paths = env::join_paths(vec![
        first.as_path(),
        Path::new(""),
        missing.as_path(),
        second.as_path(),
    ])
    .unwrap();
    env::set_var(FONT_PATH_ENV, &paths);
    let config = Config::from_env();
    env::remove_var(FONT_PATH_ENV);

    assert_eq!(
        config.extra_font_dirs,
        vec![first.clone(), missing.clone(), second.clone()]
    );
    assert!(config.font_dirs().ends_with(&[first, second]));
    assert!(Config::from_env().extra_font_dirs.is_empty());

    fs::remove_dir_all(&root).unwrap();
}
