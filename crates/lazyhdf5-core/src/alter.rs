//! Attribute rewriting.
//!
//! Overwriting an attribute is a delete followed by a create, so a failure
//! between the two leaves the attribute missing. Every check that can fail
//! runs before the delete.

use crate::container::AttrStore;
use crate::error::{Error, Result};
use crate::family::family_of;
use crate::props::AttrProps;
use crate::value::AttrValue;

/// Rewrite `key` only if the new value keeps the stored value's type family.
///
/// When the attribute is missing it is created, unless `must_exist` is set,
/// in which case [`Error::KeyNotFound`] is returned and nothing is written.
pub fn alter_strict<N: AttrStore + ?Sized>(
    node: &N,
    key: &str,
    value: &AttrValue,
    must_exist: bool,
) -> Result<()> {
    alter_strict_with(node, key, value, must_exist, &AttrProps::default())
}

/// [`alter_strict`] with explicit attribute properties.
pub fn alter_strict_with<N: AttrStore + ?Sized>(
    node: &N,
    key: &str,
    value: &AttrValue,
    must_exist: bool,
    props: &AttrProps,
) -> Result<()> {
    let exists = present(node, key, must_exist)?;
    let new = family_of(value)?;
    if !exists {
        return node.create_attr(key, value, props);
    }

    let existing = family_of(&node.read_attr(key, props)?)?;
    if existing != new {
        return Err(Error::TypeMismatch {
            key: key.to_string(),
            existing,
            new,
        });
    }
    replace(node, key, value, props)
}

/// Rewrite `key` with any supported value, whatever was stored before.
pub fn alter_permissive<N: AttrStore + ?Sized>(
    node: &N,
    key: &str,
    value: &AttrValue,
    must_exist: bool,
) -> Result<()> {
    alter_permissive_with(node, key, value, must_exist, &AttrProps::default())
}

/// [`alter_permissive`] with explicit attribute properties.
pub fn alter_permissive_with<N: AttrStore + ?Sized>(
    node: &N,
    key: &str,
    value: &AttrValue,
    must_exist: bool,
    props: &AttrProps,
) -> Result<()> {
    let exists = present(node, key, must_exist)?;
    family_of(value)?;
    if !exists {
        return node.create_attr(key, value, props);
    }
    replace(node, key, value, props)
}

/// Write a batch of attributes, replacing any that already exist.
///
/// With `sort_keys` the attributes are written in key order, otherwise in
/// the order given. Stops at the first failure; earlier writes stay.
pub fn write_attr_dict<N, S>(node: &N, attrs: &[(S, AttrValue)], sort_keys: bool) -> Result<()>
where
    N: AttrStore + ?Sized,
    S: AsRef<str>,
{
    write_attr_dict_with(node, attrs, sort_keys, &AttrProps::default())
}

/// [`write_attr_dict`] with explicit attribute properties.
pub fn write_attr_dict_with<N, S>(
    node: &N,
    attrs: &[(S, AttrValue)],
    sort_keys: bool,
    props: &AttrProps,
) -> Result<()>
where
    N: AttrStore + ?Sized,
    S: AsRef<str>,
{
    let mut order: Vec<&(S, AttrValue)> = attrs.iter().collect();
    if sort_keys {
        order.sort_by(|a, b| a.0.as_ref().cmp(b.0.as_ref()));
    }
    for (key, value) in order {
        alter_permissive_with(node, key.as_ref(), value, false, props)?;
    }
    Ok(())
}

fn present<N: AttrStore + ?Sized>(node: &N, key: &str, must_exist: bool) -> Result<bool> {
    let exists = node.contains_attr(key)?;
    if !exists && must_exist {
        return Err(Error::KeyNotFound(key.to_string()));
    }
    if !exists {
        log::debug!("attribute {key} does not exist, creating it");
    }
    Ok(exists)
}

fn replace<N: AttrStore + ?Sized>(
    node: &N,
    key: &str,
    value: &AttrValue,
    props: &AttrProps,
) -> Result<()> {
    node.check_value(key, value, props)?;
    log::debug!("replacing attribute {key}");
    node.delete_attr(key)?;
    node.create_attr(key, value, props)
}
