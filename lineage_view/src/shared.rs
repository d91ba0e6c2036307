// Copyright 2025 the Lineage Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Versioned handoff of the current view transform between threads.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use crate::ViewTransform;

/// The current [`ViewTransform`], shared between the input thread that edits it and
/// the materializing thread that reads it.
///
/// Readers take an [`Arc`] snapshot and release the lock immediately, so a frame is
/// always built from one consistent transform. Every update bumps a version counter;
/// [`load_if_newer`](Self::load_if_newer) lets a render loop skip frames when nothing
/// changed.
///
/// Readers do take the mutex, but only long enough to clone the `Arc`; the version
/// check in `load_if_newer` is a lock-free atomic load.
#[derive(Debug)]
pub struct SharedTransform {
    current: Mutex<Arc<ViewTransform>>,
    version: AtomicU64,
}

impl SharedTransform {
    /// Share `initial` at version `0`.
    pub fn new(initial: ViewTransform) -> Self {
        Self {
            current: Mutex::new(Arc::new(initial)),
            version: AtomicU64::new(0),
        }
    }

    /// Version of the most recent update.
    pub fn version(&self) -> u64 {
        self.version.load(Ordering::Acquire)
    }

    /// Current snapshot.
    pub fn load(&self) -> Arc<ViewTransform> {
        self.load_versioned().1
    }

    /// Current snapshot together with its version.
    pub fn load_versioned(&self) -> (u64, Arc<ViewTransform>) {
        let guard = self.current.lock().unwrap_or_else(PoisonError::into_inner);
        (self.version.load(Ordering::Acquire), Arc::clone(&guard))
    }

    /// The current snapshot if its version differs from `seen`.
    pub fn load_if_newer(&self, seen: u64) -> Option<(u64, Arc<ViewTransform>)> {
        if self.version() == seen {
            return None;
        }
        let (version, transform) = self.load_versioned();
        (version != seen).then_some((version, transform))
    }

    /// Edit a copy of the current transform with `f` and publish it. Returns the new
    /// version.
    ///
    /// Snapshots already handed out are unaffected.
    pub fn update(&self, f: impl FnOnce(&mut ViewTransform)) -> u64 {
        let mut guard = self.current.lock().unwrap_or_else(PoisonError::into_inner);
        let mut next = **guard;
        f(&mut next);
        *guard = Arc::new(next);
        self.version.fetch_add(1, Ordering::AcqRel) + 1
    }

    /// Publish `transform` as-is. Returns the new version.
    pub fn store(&self, transform: ViewTransform) -> u64 {
        self.update(|t| *t = transform)
    }
}
