//! Storage-engine seam.
//!
//! The core never touches the on-disk format. Everything it needs from the
//! engine (open/close, namespace traversal, node kinds, attribute CRUD and a
//! validity probe) goes through the two traits defined here. The `lazyhdf5`
//! crate implements them for the `hdf5` crate.
//!
//! ```text
//! ┌───────────────────────────┐
//! │ inspect / alter / resolve │
//! ├───────────────────────────┤
//! │   Container + AttrStore   │  ← traits defined here
//! ├───────────────────────────┤
//! │        HDF5 engine        │
//! └───────────────────────────┘
//! ```

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::props::AttrProps;
use crate::value::AttrValue;

/// How a path is opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OpenMode {
    /// Read-only, file must exist (`r`).
    #[default]
    Read,
    /// Read/write, file must exist (`r+`).
    ReadWrite,
    /// Create, truncating an existing file (`w`).
    Truncate,
    /// Create, fail if the file exists (`w-` or `x`).
    CreateExclusive,
    /// Read/write if it exists, create otherwise (`a`).
    Append,
}

impl OpenMode {
    /// Short mode string.
    pub fn as_str(self) -> &'static str {
        match self {
            OpenMode::Read => "r",
            OpenMode::ReadWrite => "r+",
            OpenMode::Truncate => "w",
            OpenMode::CreateExclusive => "x",
            OpenMode::Append => "a",
        }
    }

    /// Whether handles opened in this mode accept writes.
    pub fn is_writable(self) -> bool {
        !matches!(self, OpenMode::Read)
    }
}

impl fmt::Display for OpenMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OpenMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "r" => Ok(OpenMode::Read),
            "r+" => Ok(OpenMode::ReadWrite),
            "w" => Ok(OpenMode::Truncate),
            "w-" | "x" => Ok(OpenMode::CreateExclusive),
            "a" => Ok(OpenMode::Append),
            other => Err(Error::InvalidArgument(format!(
                "unknown open mode {other:?}, expected one of r, r+, w, w-, x, a"
            ))),
        }
    }
}

/// Kind of a node reached through a link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Group,
    Dataset,
}

/// Attribute access on a single group or dataset.
pub trait AttrStore {
    /// Attribute keys in engine order.
    fn attr_keys(&self) -> Result<Vec<String>>;

    /// Whether an attribute with this key exists.
    fn contains_attr(&self, key: &str) -> Result<bool> {
        Ok(self.attr_keys()?.iter().any(|k| k == key))
    }

    /// Read one attribute.
    fn read_attr(&self, key: &str, props: &AttrProps) -> Result<AttrValue>;

    /// Reject a key/value pair that [`AttrStore::create_attr`] would refuse,
    /// without touching the store.
    ///
    /// Rewriters call this before deleting the old value, so a store whose
    /// encoder can refuse values must report every such refusal here.
    fn check_value(&self, _key: &str, _value: &AttrValue, _props: &AttrProps) -> Result<()> {
        Ok(())
    }

    /// Create a new attribute. The key must not exist yet.
    fn create_attr(&self, key: &str, value: &AttrValue, props: &AttrProps) -> Result<()>;

    /// Delete an existing attribute.
    fn delete_attr(&self, key: &str) -> Result<()>;
}

/// An open hierarchical container file.
pub trait Container: Sized {
    /// Group or dataset handle inside this container.
    type Node: AttrStore;

    /// Open or create the file at `path`.
    ///
    /// Engine failures are reported as [`Error::Open`] carrying the engine
    /// error as its source.
    fn open(path: &Path, mode: OpenMode) -> Result<Self>;

    /// Release the handle.
    fn close(self) -> Result<()>;

    /// Whether the underlying resource is still valid.
    fn is_open(&self) -> bool;

    /// Depth-first traversal of every link below the root.
    ///
    /// Paths are relative to the root (`Group2/Group3`, no leading `/`) and
    /// the root itself is not reported.
    fn visit(&self, visitor: &mut dyn FnMut(&str, NodeKind)) -> Result<()>;

    /// Kind of the node at `path`, or [`Error::NotFound`].
    fn kind(&self, path: &str) -> Result<NodeKind>;

    /// Open the node at `path` for attribute access.
    fn node(&self, path: &str) -> Result<Self::Node>;
}
