//! Writing a dataset together with its attributes.

use hdf5::Group;
use ndarray::ArrayD;

use lazyhdf5_core::{with_container, write_attr_dict, AttrValue, Error, OpenMode, Result};

use crate::attrs::LocationAttrs;
use crate::error::EngineResultExt;
use crate::file::H5File;
use crate::source::{with_source, FileSource};

/// Open `path` below `root` as a group, creating every missing segment.
fn ensure_groups(root: &Group, path: &str) -> Result<Group> {
    let mut current = root.clone();
    for segment in path.split('/').filter(|s| !s.is_empty()) {
        current = if current.link_exists(segment) {
            current.group(segment).map_err(|_| {
                Error::InvalidArgument(format!("{segment} in {path} exists and is not a group"))
            })?
        } else {
            log::debug!("creating group {segment} in {}", current.name());
            current.create_group(segment).engine()?
        };
    }
    Ok(current)
}

/// Write `data` to `dataset_path` and attach `attrs` to the new dataset.
///
/// Missing intermediate groups are created. An existing dataset is replaced
/// when `overwrite` is set and reported as [`Error::DatasetExists`]
/// otherwise. `mode` applies when `source` is a path and must allow writes.
pub fn save<'a, S: AsRef<str>>(
    source: impl Into<FileSource<'a>>,
    dataset_path: &str,
    data: &ArrayD<f64>,
    attrs: &[(S, AttrValue)],
    mode: OpenMode,
    overwrite: bool,
) -> Result<()> {
    let source = source.into();
    if matches!(source, FileSource::Path(_)) && !mode.is_writable() {
        return Err(Error::InvalidArgument(format!(
            "cannot save {dataset_path} with read-only mode {mode}"
        )));
    }
    let path = dataset_path.trim_matches('/');
    if path.is_empty() {
        return Err(Error::InvalidArgument("empty dataset path".to_string()));
    }

    with_source(source, |source| {
        with_container(source, mode, |f: &H5File| {
            let file = f.inner();
            if file.link_exists(path) {
                if !overwrite {
                    return Err(Error::DatasetExists(path.to_string()));
                }
                log::debug!("overwriting dataset {path}");
                file.unlink(path).engine()?;
            }

            let root = file.group("/").engine()?;
            let (parent, name) = match path.rsplit_once('/') {
                Some((groups, name)) => (ensure_groups(&root, groups)?, name),
                None => (root, path),
            };
            let dset = parent
                .new_dataset_builder()
                .with_data(data)
                .create(name)
                .engine()?;
            write_attr_dict(&LocationAttrs::new(&dset), attrs, false)
        })
    })
}
