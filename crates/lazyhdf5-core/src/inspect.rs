//! Namespace and attribute inspection over any [`Container`].
//!
//! Every function takes a [`Source`]: a path is opened read-only and closed
//! again before returning, a handle is used as-is.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use crate::container::{AttrStore, Container, NodeKind, OpenMode};
use crate::error::Result;
use crate::hierarchy::{self, Hierarchy, ROOT};
use crate::props::AttrProps;
use crate::resolve::{with_container, Source};
use crate::value::AttrValue;

/// Attribute values keyed by name; `None` marks an attribute that could not
/// be read.
pub type AttrMap = BTreeMap<String, Option<AttrValue>>;

fn collect_groups<C: Container>(c: &C) -> Result<BTreeSet<String>> {
    let mut groups = BTreeSet::new();
    groups.insert(ROOT.to_string());
    c.visit(&mut |path: &str, kind: NodeKind| {
        if kind == NodeKind::Group {
            groups.insert(path.to_string());
        }
    })?;
    Ok(groups)
}

fn collect_datasets<C: Container>(c: &C) -> Result<Vec<String>> {
    let mut datasets = BTreeSet::new();
    c.visit(&mut |path: &str, kind: NodeKind| {
        if kind == NodeKind::Dataset {
            datasets.insert(path.to_string());
        }
    })?;
    Ok(datasets.into_iter().collect())
}

/// Every group path in the container, including the root `/`.
///
/// Nested groups are reported by their path from the root (`Group2/Group3`),
/// never by their bare name.
pub fn list_groups<C: Container>(source: Source<'_, C>) -> Result<BTreeSet<String>> {
    with_container(source, OpenMode::Read, collect_groups)
}

/// Every dataset path in the container, deduplicated and sorted.
///
/// With `full_path == false` each path is cut down to its leaf name after
/// sorting. Datasets sharing a leaf name in different groups then show up as
/// repeated, indistinguishable entries.
pub fn list_datasets<C: Container>(source: Source<'_, C>, full_path: bool) -> Result<Vec<String>> {
    with_container(source, OpenMode::Read, |c| {
        let datasets = collect_datasets(c)?;
        if full_path {
            return Ok(datasets);
        }
        Ok(datasets
            .iter()
            .map(|d| hierarchy::leaf_name(d).to_string())
            .collect())
    })
}

/// Group → dataset map of the whole container.
///
/// See [`hierarchy::assemble`] for the meaning of the flags.
pub fn build_hierarchy<C: Container>(
    source: Source<'_, C>,
    full_path: bool,
    only_nonempty_groups: bool,
) -> Result<Hierarchy> {
    with_container(source, OpenMode::Read, |c| {
        let groups = collect_groups(c)?;
        let datasets = collect_datasets(c)?;
        Ok(hierarchy::assemble(
            groups,
            datasets,
            full_path,
            only_nonempty_groups,
        ))
    })
}

/// Read all attributes of the node at `path`, keys sorted.
///
/// With `decode_bytes_to_text`, byte-string values are decoded as UTF-8.
/// An attribute that fails to read is logged and recorded as `None`; the
/// remaining attributes are still returned.
pub fn get_attributes<C: Container>(
    source: Source<'_, C>,
    path: &str,
    decode_bytes_to_text: bool,
) -> Result<AttrMap> {
    get_attributes_with(source, path, decode_bytes_to_text, &AttrProps::default())
}

/// [`get_attributes`] with explicit attribute properties.
pub fn get_attributes_with<C: Container>(
    source: Source<'_, C>,
    path: &str,
    decode_bytes_to_text: bool,
    props: &AttrProps,
) -> Result<AttrMap> {
    with_container(source, OpenMode::Read, |c| {
        let node = c.node(path)?;
        read_all(&node, path, decode_bytes_to_text, props)
    })
}

pub(crate) fn read_all<N: AttrStore + ?Sized>(
    node: &N,
    path: &str,
    decode_bytes_to_text: bool,
    props: &AttrProps,
) -> Result<AttrMap> {
    let mut keys = node.attr_keys()?;
    keys.sort();

    let mut out = AttrMap::new();
    for key in keys {
        let value = match node.read_attr(&key, props) {
            Ok(v) if decode_bytes_to_text => Some(v.decode_bytes()),
            Ok(v) => Some(v),
            Err(e) => {
                log::warn!("could not read attribute {key} of {path}, recording it as empty: {e}");
                None
            }
        };
        out.insert(key, value);
    }
    Ok(out)
}

/// Whether `path` names an existing file that the engine can open.
pub fn valid_file<C: Container>(path: &Path) -> bool {
    if !path.is_file() {
        log::debug!("{} is not a regular file", path.display());
        return false;
    }
    with_container::<C, _, _>(Source::Path(path), OpenMode::Read, |_| Ok(())).is_ok()
}

/// Whether every path in `paths` names a dataset.
pub fn valid_datasets<C, S>(source: Source<'_, C>, paths: &[S]) -> Result<bool>
where
    C: Container,
    S: AsRef<str>,
{
    with_container(source, OpenMode::Read, |c| {
        for path in paths {
            let path = path.as_ref();
            match c.kind(path) {
                Ok(NodeKind::Dataset) => {}
                Ok(NodeKind::Group) => {
                    log::debug!("{path} is a group, not a dataset");
                    return Ok(false);
                }
                Err(e) => {
                    log::debug!("{path} is not reachable: {e}");
                    return Ok(false);
                }
            }
        }
        Ok(true)
    })
}
