//! In-memory container used by the unit tests.

use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use std::rc::Rc;

use ndarray::array;

use crate::container::{AttrStore, Container, NodeKind, OpenMode};
use crate::error::{Error, Result};
use crate::props::AttrProps;
use crate::value::AttrValue;

/// `None` marks an attribute that exists but cannot be read.
type AttrMap = BTreeMap<String, Option<AttrValue>>;

struct State {
    open: Cell<bool>,
    nodes: RefCell<BTreeMap<String, (NodeKind, Rc<RefCell<AttrMap>>)>>,
    ops: Rc<RefCell<Vec<String>>>,
}

#[derive(Clone)]
pub(crate) struct MemContainer {
    state: Rc<State>,
}

thread_local! {
    static REGISTRY: RefCell<HashMap<PathBuf, MemContainer>> = RefCell::new(HashMap::new());
}

impl MemContainer {
    pub(crate) fn new() -> Self {
        let state = State {
            open: Cell::new(true),
            nodes: RefCell::new(BTreeMap::new()),
            ops: Rc::new(RefCell::new(Vec::new())),
        };
        let c = Self {
            state: Rc::new(state),
        };
        c.insert("/", NodeKind::Group);
        c
    }

    fn insert(&self, path: &str, kind: NodeKind) {
        self.state
            .nodes
            .borrow_mut()
            .entry(path.to_string())
            .or_insert_with(|| (kind, Rc::new(RefCell::new(BTreeMap::new()))));
    }

    fn insert_parents(&self, path: &str) {
        let mut prefix = String::new();
        let parts: Vec<&str> = path.split('/').collect();
        for part in &parts[..parts.len() - 1] {
            if !prefix.is_empty() {
                prefix.push('/');
            }
            prefix.push_str(part);
            self.insert(&prefix, NodeKind::Group);
        }
    }

    pub(crate) fn add_group(&self, path: &str) -> &Self {
        self.insert_parents(path);
        self.insert(path, NodeKind::Group);
        self
    }

    pub(crate) fn add_dataset(&self, path: &str) -> &Self {
        self.insert_parents(path);
        self.insert(path, NodeKind::Dataset);
        self
    }

    pub(crate) fn set_attr(&self, path: &str, key: &str, value: impl Into<AttrValue>) -> &Self {
        self.attrs(path)
            .borrow_mut()
            .insert(key.to_string(), Some(value.into()));
        self
    }

    pub(crate) fn set_unreadable(&self, path: &str, key: &str) -> &Self {
        self.attrs(path).borrow_mut().insert(key.to_string(), None);
        self
    }

    pub(crate) fn attr(&self, path: &str, key: &str) -> Option<AttrValue> {
        let attrs = self.attrs(path);
        let value = attrs.borrow().get(key).cloned().flatten();
        value
    }

    pub(crate) fn ops(&self) -> Vec<String> {
        self.state.ops.borrow().clone()
    }

    fn attrs(&self, path: &str) -> Rc<RefCell<AttrMap>> {
        let nodes = self.state.nodes.borrow();
        let (_, attrs) = nodes.get(path).unwrap_or_else(|| panic!("no node {path}"));
        Rc::clone(attrs)
    }

    /// Make this container reachable through `Container::open`.
    pub(crate) fn register(&self, name: &str) -> PathBuf {
        let path = PathBuf::from(format!("mem://{name}"));
        REGISTRY.with(|r| r.borrow_mut().insert(path.clone(), self.clone()));
        path
    }

    /// Groups `/`, `Group1`, `Group2/Group3`, `Group4/Group5/Group6` with the
    /// six datasets and the `base` attributes used throughout the tests.
    pub(crate) fn fixture() -> Self {
        let c = Self::new();
        c.add_dataset("base")
            .add_group("Group1")
            .add_group("Group2/Group3")
            .add_group("Group4/Group5/Group6")
            .add_dataset("Group1/ingroup1_1")
            .add_dataset("Group1/ingroup1_2")
            .add_dataset("Group2/ingroup2")
            .add_dataset("Group2/Group3/ingroup3")
            .add_dataset("Group4/Group5/Group6/ingroup6");

        c.set_attr("base", "Attribute_str", "Test")
            .set_attr("base", "Attribute_bytes", b"Test")
            .set_attr("base", "Attribute_int", 1i64)
            .set_attr("base", "Attribute_float", 1.1f64)
            .set_attr("base", "Attribute_np_1d", array![1i64, 2, 3].into_dyn())
            .set_attr(
                "base",
                "Attribute_np_2d",
                array![[1i64, 2, 3], [4, 5, 6]].into_dyn(),
            );
        c
    }
}

pub(crate) struct MemNode {
    path: String,
    attrs: Rc<RefCell<AttrMap>>,
    ops: Rc<RefCell<Vec<String>>>,
}

impl AttrStore for MemNode {
    fn attr_keys(&self) -> Result<Vec<String>> {
        Ok(self.attrs.borrow().keys().cloned().collect())
    }

    fn read_attr(&self, key: &str, _props: &AttrProps) -> Result<AttrValue> {
        match self.attrs.borrow().get(key) {
            Some(Some(v)) => Ok(v.clone()),
            Some(None) => Err(Error::backend(format!("cannot read {key}"))),
            None => Err(Error::KeyNotFound(key.to_string())),
        }
    }

    /// Mirrors the HDF5 backend: containers and non-ASCII byte strings
    /// cannot be stored.
    fn check_value(&self, _key: &str, value: &AttrValue, _props: &AttrProps) -> Result<()> {
        match value {
            AttrValue::List(_) | AttrValue::Record(_) => Err(Error::Unsupported(value.kind_name())),
            AttrValue::Bytes(b) if !b.is_ascii() => {
                Err(Error::Unsupported("non-ASCII byte string".to_string()))
            }
            _ => Ok(()),
        }
    }

    fn create_attr(&self, key: &str, value: &AttrValue, props: &AttrProps) -> Result<()> {
        self.check_value(key, value, props)?;
        let mut attrs = self.attrs.borrow_mut();
        if attrs.contains_key(key) {
            return Err(Error::backend(format!("attribute {key} already exists")));
        }
        attrs.insert(key.to_string(), Some(value.clone()));
        self.ops.borrow_mut().push(format!("create {}:{key}", self.path));
        Ok(())
    }

    fn delete_attr(&self, key: &str) -> Result<()> {
        if self.attrs.borrow_mut().remove(key).is_none() {
            return Err(Error::KeyNotFound(key.to_string()));
        }
        self.ops.borrow_mut().push(format!("delete {}:{key}", self.path));
        Ok(())
    }
}

impl Container for MemContainer {
    type Node = MemNode;

    fn open(path: &Path, _mode: OpenMode) -> Result<Self> {
        let found = REGISTRY.with(|r| r.borrow().get(path).cloned());
        match found {
            Some(c) => {
                c.state.open.set(true);
                Ok(c)
            }
            None => Err(Error::open(
                path,
                std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
            )),
        }
    }

    fn close(self) -> Result<()> {
        self.state.open.set(false);
        Ok(())
    }

    fn is_open(&self) -> bool {
        self.state.open.get()
    }

    fn visit(&self, visitor: &mut dyn FnMut(&str, NodeKind)) -> Result<()> {
        for (path, (kind, _)) in self.state.nodes.borrow().iter() {
            if path != "/" {
                visitor(path, *kind);
            }
        }
        Ok(())
    }

    fn kind(&self, path: &str) -> Result<NodeKind> {
        let key = path.trim_start_matches('/');
        let key = if key.is_empty() { "/" } else { key };
        self.state
            .nodes
            .borrow()
            .get(key)
            .map(|(kind, _)| *kind)
            .ok_or_else(|| Error::NotFound(path.to_string()))
    }

    fn node(&self, path: &str) -> Result<MemNode> {
        self.kind(path)?;
        let key = path.trim_start_matches('/');
        let key = if key.is_empty() { "/" } else { key };
        Ok(MemNode {
            path: key.to_string(),
            attrs: self.attrs(key),
            ops: Rc::clone(&self.state.ops),
        })
    }
}
