//! Bridging `hdf5` errors into the core error type.
//!
//! Engine errors are boxed as they are, so callers can downcast the source
//! of [`Error::Open`] and [`Error::Backend`] back to [`hdf5::Error`].

use std::path::Path;

use lazyhdf5_core::{Error, Result};

/// Conversion of `hdf5` results at the trait boundary.
pub(crate) trait EngineResultExt<T> {
    /// Any engine failure becomes [`Error::Backend`].
    fn engine(self) -> Result<T>;

    /// Any engine failure becomes [`Error::Open`] for `path`.
    fn opening(self, path: &Path) -> Result<T>;
}

impl<T> EngineResultExt<T> for hdf5::Result<T> {
    fn engine(self) -> Result<T> {
        self.map_err(|e| Error::backend(e))
    }

    fn opening(self, path: &Path) -> Result<T> {
        self.map_err(|e| Error::open(path, e))
    }
}
