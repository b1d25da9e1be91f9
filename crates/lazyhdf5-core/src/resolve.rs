//! File-or-handle resolution.
//!
//! Public operations accept either a path or an already-open handle. A path
//! is opened for the duration of one operation and closed on every exit
//! path; a borrowed handle is never closed.

use std::ops::Deref;
use std::path::Path;

use crate::container::{Container, OpenMode};
use crate::error::Result;

/// Where an operation gets its container from.
#[derive(Debug)]
pub enum Source<'a, C> {
    /// Open this path, and close it again afterwards.
    Path(&'a Path),
    /// Use a handle the caller already owns.
    Handle(&'a C),
}

impl<'a, C> Clone for Source<'a, C> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, C> Copy for Source<'a, C> {}

impl<'a, C> From<&'a str> for Source<'a, C> {
    fn from(path: &'a str) -> Self {
        Source::Path(Path::new(path))
    }
}

impl<'a, C> From<&'a Path> for Source<'a, C> {
    fn from(path: &'a Path) -> Self {
        Source::Path(path)
    }
}

impl<'a, C: Container> From<&'a C> for Source<'a, C> {
    fn from(handle: &'a C) -> Self {
        Source::Handle(handle)
    }
}

enum Slot<'a, C> {
    Owned(C),
    Borrowed(&'a C),
    Released,
}

/// A usable handle plus the knowledge of whether it must be closed.
///
/// Dropping a `Resolved` that owns its handle closes it; close failures at
/// that point are logged because there is nobody left to return them to.
/// Call [`Resolved::close_if_owned`] to observe them instead.
pub struct Resolved<'a, C: Container> {
    slot: Slot<'a, C>,
}

impl<'a, C: Container> Resolved<'a, C> {
    /// Wrap a handle the caller keeps ownership of.
    pub fn borrowed(handle: &'a C) -> Self {
        Self {
            slot: Slot::Borrowed(handle),
        }
    }

    /// Wrap a handle this wrapper is responsible for.
    pub fn owned(handle: C) -> Self {
        Self {
            slot: Slot::Owned(handle),
        }
    }

    /// True when this wrapper opened the file itself.
    pub fn owns_handle(&self) -> bool {
        matches!(self.slot, Slot::Owned(_))
    }

    pub fn handle(&self) -> &C {
        match &self.slot {
            Slot::Owned(handle) => handle,
            Slot::Borrowed(handle) => handle,
            Slot::Released => unreachable!("handle accessed after release"),
        }
    }

    /// Close the handle if this wrapper opened it; otherwise do nothing.
    pub fn close_if_owned(mut self) -> Result<()> {
        match std::mem::replace(&mut self.slot, Slot::Released) {
            Slot::Owned(handle) => {
                log::debug!("closing owned container handle");
                handle.close()
            }
            _ => Ok(()),
        }
    }
}

impl<'a, C: Container> Deref for Resolved<'a, C> {
    type Target = C;

    fn deref(&self) -> &C {
        self.handle()
    }
}

impl<'a, C: Container> Drop for Resolved<'a, C> {
    fn drop(&mut self) {
        if let Slot::Owned(handle) = std::mem::replace(&mut self.slot, Slot::Released) {
            if let Err(e) = handle.close() {
                log::warn!("failed to close container handle: {e}");
            }
        }
    }
}

impl<'a, C: Container> std::fmt::Debug for Resolved<'a, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Resolved")
            .field("owns_handle", &self.owns_handle())
            .finish()
    }
}

/// Turn a path or handle into a usable handle.
///
/// Paths are opened with `mode`; open failures propagate as returned by the
/// engine. Handles pass through untouched and `mode` is ignored.
pub fn resolve<'a, C: Container>(source: Source<'a, C>, mode: OpenMode) -> Result<Resolved<'a, C>> {
    match source {
        Source::Handle(handle) => Ok(Resolved::borrowed(handle)),
        Source::Path(path) => {
            log::debug!("opening {} in mode {mode}", path.display());
            let handle = C::open(path, mode)?;
            Ok(Resolved::owned(handle))
        }
    }
}

/// Run `op` against the resolved container, then close it if it was opened
/// here.
///
/// The handle is released whether `op` succeeds or fails. A close failure is
/// only reported when `op` itself succeeded.
pub fn with_container<'a, C, T, F>(source: Source<'a, C>, mode: OpenMode, op: F) -> Result<T>
where
    C: Container,
    F: FnOnce(&C) -> Result<T>,
{
    let resolved = resolve(source, mode)?;
    let out = op(resolved.handle())?;
    resolved.close_if_owned()?;
    Ok(out)
}

/// Whether a handle's underlying resource is still open.
pub fn is_open<C: Container>(handle: &C) -> bool {
    handle.is_open()
}
