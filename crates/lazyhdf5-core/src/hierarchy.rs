//! Group → dataset maps built from flat path lists.

use std::collections::BTreeMap;

/// Key of the root group.
pub const ROOT: &str = "/";

/// Ordered map from group path to the datasets it directly holds.
pub type Hierarchy = BTreeMap<String, Vec<String>>;

/// Final path segment (text after the last `/`).
pub fn leaf_name(path: &str) -> &str {
    match path.rsplit_once('/') {
        Some((_, leaf)) => leaf,
        None => path,
    }
}

/// Group holding `path`; [`ROOT`] when the path has no separator.
pub fn parent_group(path: &str) -> &str {
    match path.rsplit_once('/') {
        Some(("", _)) | None => ROOT,
        Some((parent, _)) => parent,
    }
}

/// Build a [`Hierarchy`] from group and dataset paths.
///
/// Every group gets an entry, empty to begin with. Each dataset is then
/// appended to the entry of its parent group, as a full path or as its leaf
/// name depending on `full_path`. With `only_nonempty_groups`, entries that
/// stayed empty are dropped.
pub fn assemble<G, D>(
    groups: impl IntoIterator<Item = G>,
    datasets: impl IntoIterator<Item = D>,
    full_path: bool,
    only_nonempty_groups: bool,
) -> Hierarchy
where
    G: Into<String>,
    D: AsRef<str>,
{
    let mut map: Hierarchy = groups
        .into_iter()
        .map(|g| (g.into(), Vec::new()))
        .collect();

    for dset in datasets {
        let dset = dset.as_ref();
        let entry = if full_path {
            dset.to_string()
        } else {
            leaf_name(dset).to_string()
        };
        map.entry(parent_group(dset).to_string())
            .or_default()
            .push(entry);
    }

    if only_nonempty_groups {
        map.retain(|_, dsets| !dsets.is_empty());
    }
    map
}
