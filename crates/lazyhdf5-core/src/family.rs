//! Canonical type families used to decide whether an attribute rewrite keeps
//! the stored value's kind.
//!
//! Classification is an ordered chain, first match wins:
//!
//! 1. booleans
//! 2. byte strings
//! 3. text strings
//! 4. integers (signed and unsigned)
//! 5. real floats
//! 6. complex floats
//! 7. numeric arrays, classified through their element type
//!
//! Anything else (lists, records) has no family.

use std::fmt;

use crate::error::{Error, Result};
use crate::value::AttrValue;

/// Value-kind bucket. Two values are compatible when they share one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TypeFamily {
    Integer,
    Float,
    Complex,
    Text,
    Bytes,
    Boolean,
}

impl fmt::Display for TypeFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeFamily::Integer => write!(f, "int"),
            TypeFamily::Float => write!(f, "float"),
            TypeFamily::Complex => write!(f, "complex"),
            TypeFamily::Text => write!(f, "str"),
            TypeFamily::Bytes => write!(f, "bytes"),
            TypeFamily::Boolean => write!(f, "bool"),
        }
    }
}

/// Classify a value into its [`TypeFamily`].
///
/// An array's family is its element family: the element type is probed with
/// the value `1` cast to that type and the probe is classified in turn.
pub fn family_of(value: &AttrValue) -> Result<TypeFamily> {
    match value {
        AttrValue::Bool(_) => Ok(TypeFamily::Boolean),
        AttrValue::Bytes(_) => Ok(TypeFamily::Bytes),
        AttrValue::Text(_) => Ok(TypeFamily::Text),
        AttrValue::Int(_) | AttrValue::UInt(_) => Ok(TypeFamily::Integer),
        AttrValue::Float(_) => Ok(TypeFamily::Float),
        AttrValue::Complex(_) => Ok(TypeFamily::Complex),
        AttrValue::Array(arr) => family_of(&arr.element_type().one()),
        AttrValue::List(_) | AttrValue::Record(_) => {
            Err(Error::Unsupported(value.kind_name()))
        }
    }
}

/// True iff both values classify into the same family.
///
/// Fails when either side cannot be classified; it never reports `false`
/// for an unclassifiable value.
pub fn compatible(a: &AttrValue, b: &AttrValue) -> Result<bool> {
    let left = family_of(a)?;
    let right = family_of(b)?;
    Ok(left == right)
}
