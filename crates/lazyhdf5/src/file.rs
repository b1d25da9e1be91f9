//! The `hdf5` crate as a [`Container`].

use std::collections::HashSet;
use std::path::Path;

use hdf5::{Dataset, File, Group, Location};

use lazyhdf5_core::{AttrProps, AttrStore, AttrValue, Container, Error, NodeKind, OpenMode, Result};

use crate::attrs::LocationAttrs;
use crate::error::EngineResultExt;

/// An open HDF5 file.
///
/// Cloning an [`hdf5::File`] only bumps the library's reference count, so a
/// caller's handle can be wrapped without taking it over.
#[derive(Debug, Clone)]
pub struct H5File {
    file: File,
}

impl H5File {
    pub fn inner(&self) -> &File {
        &self.file
    }
}

impl From<File> for H5File {
    fn from(file: File) -> Self {
        Self { file }
    }
}

/// A group or dataset inside an [`H5File`].
#[derive(Debug, Clone)]
pub enum H5Node {
    Group(Group),
    Dataset(Dataset),
}

impl H5Node {
    pub fn location(&self) -> &Location {
        match self {
            H5Node::Group(g) => g,
            H5Node::Dataset(d) => d,
        }
    }

    fn attrs(&self) -> LocationAttrs<'_> {
        LocationAttrs::new(self.location())
    }
}

impl AttrStore for H5Node {
    fn attr_keys(&self) -> Result<Vec<String>> {
        self.attrs().attr_keys()
    }

    fn read_attr(&self, key: &str, props: &AttrProps) -> Result<AttrValue> {
        self.attrs().read_attr(key, props)
    }

    fn check_value(&self, key: &str, value: &AttrValue, props: &AttrProps) -> Result<()> {
        self.attrs().check_value(key, value, props)
    }

    fn create_attr(&self, key: &str, value: &AttrValue, props: &AttrProps) -> Result<()> {
        self.attrs().create_attr(key, value, props)
    }

    fn delete_attr(&self, key: &str) -> Result<()> {
        self.attrs().delete_attr(key)
    }
}

/// Strip the leading `/` the library puts on every object name.
fn relative(name: &str) -> &str {
    name.trim_start_matches('/')
}

fn walk(
    group: &Group,
    visitor: &mut dyn FnMut(&str, NodeKind),
    seen: &mut HashSet<String>,
) -> hdf5::Result<()> {
    for child in group.groups()? {
        let name = relative(&child.name()).to_string();
        if !seen.insert(name.clone()) {
            continue;
        }
        visitor(&name, NodeKind::Group);
        walk(&child, visitor, seen)?;
    }
    for dset in group.datasets()? {
        visitor(relative(&dset.name()), NodeKind::Dataset);
    }
    Ok(())
}

impl Container for H5File {
    type Node = H5Node;

    fn open(path: &Path, mode: OpenMode) -> Result<Self> {
        let file = match mode {
            OpenMode::Read => File::open(path),
            OpenMode::ReadWrite => File::open_rw(path),
            OpenMode::Truncate => File::create(path),
            OpenMode::CreateExclusive => File::create_excl(path),
            OpenMode::Append => File::append(path),
        }
        .opening(path)?;
        Ok(Self { file })
    }

    fn close(self) -> Result<()> {
        self.file.close().engine()
    }

    fn is_open(&self) -> bool {
        self.file.is_valid()
    }

    fn visit(&self, visitor: &mut dyn FnMut(&str, NodeKind)) -> Result<()> {
        let mut seen = HashSet::new();
        walk(&self.file, visitor, &mut seen).engine()
    }

    fn kind(&self, path: &str) -> Result<NodeKind> {
        let path = relative(path);
        if path.is_empty() {
            return Ok(NodeKind::Group);
        }
        if !self.file.link_exists(path) {
            return Err(Error::NotFound(path.to_string()));
        }
        if self.file.group(path).is_ok() {
            Ok(NodeKind::Group)
        } else if self.file.dataset(path).is_ok() {
            Ok(NodeKind::Dataset)
        } else {
            Err(Error::NotFound(path.to_string()))
        }
    }

    fn node(&self, path: &str) -> Result<H5Node> {
        let rel = relative(path);
        if rel.is_empty() {
            return self.file.group("/").map(H5Node::Group).engine();
        }
        match self.kind(rel)? {
            NodeKind::Group => self.file.group(rel).map(H5Node::Group).engine(),
            NodeKind::Dataset => self.file.dataset(rel).map(H5Node::Dataset).engine(),
        }
    }
}
