//! Attribute values as they are read from and written to a container.

use std::fmt;

use ndarray::ArrayD;
use num_complex::Complex64;

/// A single attribute value.
///
/// Scalars and rectangular numeric arrays map onto a [`TypeFamily`];
/// [`AttrValue::List`] and [`AttrValue::Record`] exist so that containers can
/// hand back what they find (string arrays, compound values) even though no
/// family covers them.
///
/// [`TypeFamily`]: crate::family::TypeFamily
#[derive(Debug, Clone, PartialEq)]
pub enum AttrValue {
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    Complex(Complex64),
    /// UTF-8 text.
    Text(String),
    /// Raw byte string (ASCII / fixed-length strings on disk).
    Bytes(Vec<u8>),
    /// Rectangular n-dimensional numeric array.
    Array(NumArray),
    /// Heterogeneous or non-numeric sequence.
    List(Vec<AttrValue>),
    /// Named fields, e.g. a compound value.
    Record(Vec<(String, AttrValue)>),
}

/// Numeric n-dimensional array payload.
#[derive(Debug, Clone, PartialEq)]
pub enum NumArray {
    Bool(ArrayD<bool>),
    Int(ArrayD<i64>),
    UInt(ArrayD<u64>),
    Float(ArrayD<f64>),
    Complex(ArrayD<Complex64>),
}

/// Element type of a [`NumArray`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementType {
    Bool,
    Int,
    UInt,
    Float,
    Complex,
}

impl ElementType {
    /// The value `1` cast to this element type.
    pub fn one(self) -> AttrValue {
        match self {
            ElementType::Bool => AttrValue::Bool(true),
            ElementType::Int => AttrValue::Int(1),
            ElementType::UInt => AttrValue::UInt(1),
            ElementType::Float => AttrValue::Float(1.0),
            ElementType::Complex => AttrValue::Complex(Complex64::new(1.0, 0.0)),
        }
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ElementType::Bool => write!(f, "bool"),
            ElementType::Int => write!(f, "i64"),
            ElementType::UInt => write!(f, "u64"),
            ElementType::Float => write!(f, "f64"),
            ElementType::Complex => write!(f, "c128"),
        }
    }
}

impl NumArray {
    pub fn element_type(&self) -> ElementType {
        match self {
            NumArray::Bool(_) => ElementType::Bool,
            NumArray::Int(_) => ElementType::Int,
            NumArray::UInt(_) => ElementType::UInt,
            NumArray::Float(_) => ElementType::Float,
            NumArray::Complex(_) => ElementType::Complex,
        }
    }

    pub fn shape(&self) -> &[usize] {
        match self {
            NumArray::Bool(a) => a.shape(),
            NumArray::Int(a) => a.shape(),
            NumArray::UInt(a) => a.shape(),
            NumArray::Float(a) => a.shape(),
            NumArray::Complex(a) => a.shape(),
        }
    }

    /// Total number of elements.
    pub fn len(&self) -> usize {
        self.shape().iter().product()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl AttrValue {
    /// Short name of the value kind, used in diagnostics.
    pub fn kind_name(&self) -> String {
        match self {
            AttrValue::Bool(_) => "bool".into(),
            AttrValue::Int(_) => "i64".into(),
            AttrValue::UInt(_) => "u64".into(),
            AttrValue::Float(_) => "f64".into(),
            AttrValue::Complex(_) => "c128".into(),
            AttrValue::Text(_) => "str".into(),
            AttrValue::Bytes(_) => "bytes".into(),
            AttrValue::Array(a) => format!("array<{}, {:?}>", a.element_type(), a.shape()),
            AttrValue::List(items) => format!("list[{}]", items.len()),
            AttrValue::Record(fields) => format!("record[{}]", fields.len()),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            AttrValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            AttrValue::Bytes(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&NumArray> {
        match self {
            AttrValue::Array(a) => Some(a),
            _ => None,
        }
    }

    /// Decode a byte string, or every byte string in a list, as UTF-8 text.
    ///
    /// Any other value, and byte strings that are not valid UTF-8, come back
    /// unchanged.
    pub fn decode_bytes(self) -> AttrValue {
        match self {
            AttrValue::Bytes(bytes) => match String::from_utf8(bytes) {
                Ok(text) => AttrValue::Text(text),
                Err(e) => {
                    log::debug!("keeping non-UTF-8 byte string as bytes: {e}");
                    AttrValue::Bytes(e.into_bytes())
                }
            },
            AttrValue::List(items) => {
                AttrValue::List(items.into_iter().map(AttrValue::decode_bytes).collect())
            }
            other => other,
        }
    }
}

macro_rules! from_scalar {
    ($variant:ident: $($t:ty),+ => $target:ty) => {
        $(
            impl From<$t> for AttrValue {
                fn from(v: $t) -> Self {
                    AttrValue::$variant(<$target>::from(v))
                }
            }
        )+
    };
}

from_scalar!(Int: i8, i16, i32, i64 => i64);
from_scalar!(UInt: u8, u16, u32, u64 => u64);
from_scalar!(Float: f32, f64 => f64);

impl From<bool> for AttrValue {
    fn from(v: bool) -> Self {
        AttrValue::Bool(v)
    }
}

impl From<Complex64> for AttrValue {
    fn from(v: Complex64) -> Self {
        AttrValue::Complex(v)
    }
}

impl From<&str> for AttrValue {
    fn from(v: &str) -> Self {
        AttrValue::Text(v.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(v: String) -> Self {
        AttrValue::Text(v)
    }
}

impl From<&[u8]> for AttrValue {
    fn from(v: &[u8]) -> Self {
        AttrValue::Bytes(v.to_vec())
    }
}

impl<const N: usize> From<&[u8; N]> for AttrValue {
    fn from(v: &[u8; N]) -> Self {
        AttrValue::Bytes(v.to_vec())
    }
}

impl From<NumArray> for AttrValue {
    fn from(v: NumArray) -> Self {
        AttrValue::Array(v)
    }
}

impl From<ArrayD<bool>> for AttrValue {
    fn from(v: ArrayD<bool>) -> Self {
        AttrValue::Array(NumArray::Bool(v))
    }
}

impl From<ArrayD<i64>> for AttrValue {
    fn from(v: ArrayD<i64>) -> Self {
        AttrValue::Array(NumArray::Int(v))
    }
}

impl From<ArrayD<u64>> for AttrValue {
    fn from(v: ArrayD<u64>) -> Self {
        AttrValue::Array(NumArray::UInt(v))
    }
}

impl From<ArrayD<f64>> for AttrValue {
    fn from(v: ArrayD<f64>) -> Self {
        AttrValue::Array(NumArray::Float(v))
    }
}

impl From<ArrayD<Complex64>> for AttrValue {
    fn from(v: ArrayD<Complex64>) -> Self {
        AttrValue::Array(NumArray::Complex(v))
    }
}
