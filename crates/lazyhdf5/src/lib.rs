//! Convenience utilities over HDF5 files.
//!
//! Inspect a file's layout, read every attribute of a node in one call,
//! rewrite attributes with or without a type check, and filter name lists.
//! Functions that take a file accept either a path, which is opened
//! read-only and closed again, or an open [`hdf5::File`], which is left as
//! it is.
//!
//! # Example
//!
//! ```no_run
//! use lazyhdf5::{alter_strict, build_hierarchy, get_attributes, OpenMode};
//!
//! let hierarchy = build_hierarchy("scan.h5", true, true).unwrap();
//! for (group, datasets) in &hierarchy {
//!     println!("{group}: {datasets:?}");
//! }
//!
//! let attrs = get_attributes("scan.h5", "Group1/ingroup1_1", true).unwrap();
//! println!("{attrs:?}");
//!
//! let file = hdf5::File::open_rw("scan.h5").unwrap();
//! let dset = file.dataset("base").unwrap();
//! alter_strict(&dset, "Attribute_int", 5i64, true).unwrap();
//! ```

mod attrs;
mod error;
mod ffi;
mod file;
mod save;
mod source;

use std::collections::BTreeSet;
use std::path::Path;

use hdf5::Location;

pub use attrs::LocationAttrs;
pub use file::{H5File, H5Node};
pub use lazyhdf5_core::{
    compatible, family_of, filter_list, AttrMap, AttrProps, AttrValue, ElementType, Error,
    Filters, Hierarchy, NodeKind, NumArray, OpenMode, Result, TypeFamily,
};
pub use save::save;
pub use source::FileSource;

use source::with_source;

/// Every group path in the file, including the root `/`.
pub fn list_groups<'a>(source: impl Into<FileSource<'a>>) -> Result<BTreeSet<String>> {
    with_source(source.into(), |s| lazyhdf5_core::list_groups(s))
}

/// Every dataset path in the file, sorted. With `full_path == false` only
/// leaf names are returned.
pub fn list_datasets<'a>(source: impl Into<FileSource<'a>>, full_path: bool) -> Result<Vec<String>> {
    with_source(source.into(), |s| lazyhdf5_core::list_datasets(s, full_path))
}

/// Map of every group to the datasets it directly holds.
pub fn build_hierarchy<'a>(
    source: impl Into<FileSource<'a>>,
    full_path: bool,
    only_nonempty_groups: bool,
) -> Result<Hierarchy> {
    with_source(source.into(), |s| {
        lazyhdf5_core::build_hierarchy(s, full_path, only_nonempty_groups)
    })
}

/// All attributes of the group or dataset at `path`, keys sorted.
pub fn get_attributes<'a>(
    source: impl Into<FileSource<'a>>,
    path: &str,
    decode_bytes_to_text: bool,
) -> Result<AttrMap> {
    get_attributes_with(source, path, decode_bytes_to_text, &AttrProps::default())
}

/// [`get_attributes`] with explicit attribute properties.
pub fn get_attributes_with<'a>(
    source: impl Into<FileSource<'a>>,
    path: &str,
    decode_bytes_to_text: bool,
    props: &AttrProps,
) -> Result<AttrMap> {
    with_source(source.into(), |s| {
        lazyhdf5_core::get_attributes_with(s, path, decode_bytes_to_text, props)
    })
}

/// Rewrite attribute `key` of `loc`, refusing to change its type family.
pub fn alter_strict(
    loc: &Location,
    key: &str,
    value: impl Into<AttrValue>,
    must_exist: bool,
) -> Result<()> {
    alter_strict_with(loc, key, value, must_exist, &AttrProps::default())
}

/// [`alter_strict`] with explicit attribute properties.
pub fn alter_strict_with(
    loc: &Location,
    key: &str,
    value: impl Into<AttrValue>,
    must_exist: bool,
    props: &AttrProps,
) -> Result<()> {
    let value = value.into();
    lazyhdf5_core::alter_strict_with(&LocationAttrs::new(loc), key, &value, must_exist, props)
}

/// Rewrite attribute `key` of `loc` with any supported value.
pub fn alter_permissive(
    loc: &Location,
    key: &str,
    value: impl Into<AttrValue>,
    must_exist: bool,
) -> Result<()> {
    alter_permissive_with(loc, key, value, must_exist, &AttrProps::default())
}

/// [`alter_permissive`] with explicit attribute properties.
pub fn alter_permissive_with(
    loc: &Location,
    key: &str,
    value: impl Into<AttrValue>,
    must_exist: bool,
    props: &AttrProps,
) -> Result<()> {
    let value = value.into();
    lazyhdf5_core::alter_permissive_with(&LocationAttrs::new(loc), key, &value, must_exist, props)
}

/// Write several attributes to `loc`, replacing existing ones.
pub fn write_attr_dict<S: AsRef<str>>(
    loc: &Location,
    attrs: &[(S, AttrValue)],
    sort_keys: bool,
) -> Result<()> {
    lazyhdf5_core::write_attr_dict(&LocationAttrs::new(loc), attrs, sort_keys)
}

/// Whether `path` is an existing file the HDF5 library can open.
pub fn valid_file(path: impl AsRef<Path>) -> bool {
    lazyhdf5_core::valid_file::<H5File>(path.as_ref())
}

/// Whether every entry of `paths` names a dataset in the file.
pub fn valid_datasets<'a, S: AsRef<str>>(
    source: impl Into<FileSource<'a>>,
    paths: &[S],
) -> Result<bool> {
    with_source(source.into(), |s| lazyhdf5_core::valid_datasets(s, paths))
}

/// Whether `file` is still an open handle.
pub fn is_open(file: &hdf5::File) -> bool {
    file.is_valid()
}
