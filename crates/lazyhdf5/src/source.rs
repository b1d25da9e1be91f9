//! Path-or-handle arguments of the public API.

use std::path::{Path, PathBuf};

use hdf5::File;

use lazyhdf5_core::{Result, Source};

use crate::file::H5File;

/// A file given either by path or as an open [`hdf5::File`].
///
/// Paths are opened for the duration of one call and closed before it
/// returns. Open handles are left open.
#[derive(Debug, Clone, Copy)]
pub enum FileSource<'a> {
    Path(&'a Path),
    Handle(&'a File),
}

impl<'a> From<&'a str> for FileSource<'a> {
    fn from(path: &'a str) -> Self {
        FileSource::Path(Path::new(path))
    }
}

impl<'a> From<&'a String> for FileSource<'a> {
    fn from(path: &'a String) -> Self {
        FileSource::Path(Path::new(path))
    }
}

impl<'a> From<&'a Path> for FileSource<'a> {
    fn from(path: &'a Path) -> Self {
        FileSource::Path(path)
    }
}

impl<'a> From<&'a PathBuf> for FileSource<'a> {
    fn from(path: &'a PathBuf) -> Self {
        FileSource::Path(path)
    }
}

impl<'a> From<&'a File> for FileSource<'a> {
    fn from(file: &'a File) -> Self {
        FileSource::Handle(file)
    }
}

/// Run `op` with the core view of `source`.
pub(crate) fn with_source<T>(
    source: FileSource<'_>,
    op: impl FnOnce(Source<'_, H5File>) -> Result<T>,
) -> Result<T> {
    match source {
        FileSource::Path(path) => op(Source::Path(path)),
        FileSource::Handle(file) => {
            let handle = H5File::from(file.clone());
            op(Source::Handle(&handle))
        }
    }
}
