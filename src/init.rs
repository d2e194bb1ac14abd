// font-cache/src/init.rs
//
// Copyright © 2018 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The hook through which an application runs the one-shot font database build.
//!
//! Building the database can take a long time on a system with many fonts, so the application
//! decides where it runs: inline, or on a worker thread while a progress indicator is shown. The
//! handler must not return before the build has finished, which the borrow on [`Initializer`]
//! enforces for scoped threads.

use crate::error::BackendError;

/// The one-shot font database build, handed to an [`InitHandler`].
pub struct Initializer<'a> {
    build: &'a mut (dyn FnMut() -> Result<(), BackendError> + Send),
    result: &'a mut Option<Result<(), BackendError>>,
}

impl<'a> Initializer<'a> {
    pub(crate) fn new(
        build: &'a mut (dyn FnMut() -> Result<(), BackendError> + Send),
        result: &'a mut Option<Result<(), BackendError>>,
    ) -> Initializer<'a> {
        Initializer { build, result }
    }

    /// Builds the font database on the current thread.
    pub fn run(self) {
        *self.result = Some((self.build)());
    }
}

/// Decides how the font database build runs.
pub trait InitHandler {
    /// Runs `initializer`, on this thread or another one, and returns once it has finished.
    fn run(&mut self, initializer: Initializer);
}

impl<F> InitHandler for F
where
    F: FnMut(Initializer),
{
    #[inline]
    fn run(&mut self, initializer: Initializer) {
        self(initializer)
    }
}

/// Runs the build inline on the calling thread.
#[derive(Clone, Copy, Debug, Default)]
pub struct Synchronous;

impl InitHandler for Synchronous {
    #[inline]
    fn run(&mut self, initializer: Initializer) {
        initializer.run()
    }
}
