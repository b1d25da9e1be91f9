//! Conversion between [`AttrValue`] and HDF5 attributes.
//!
//! Type mapping on read:
//!
//! | HDF5 type                          | value                      |
//! |------------------------------------|----------------------------|
//! | boolean enum                       | `Bool`                     |
//! | signed / unsigned integer          | `Int` / `UInt`             |
//! | float                              | `Float`                    |
//! | two-float compound, complex names  | `Complex`                  |
//! | variable-length UTF-8 / fixed UTF-8| `Text`                     |
//! | variable-length ASCII / fixed ASCII| `Bytes`                    |
//!
//! Non-scalar numeric attributes become [`NumArray`]s of the same element
//! type; non-scalar string attributes become a `List`. Anything else is
//! [`Error::Unsupported`].
//!
//! On write, text is stored as variable-length UTF-8 and bytes as
//! variable-length ASCII.

use hdf5::types::{
    CompoundField, CompoundType, FloatSize, TypeDescriptor, VarLenAscii, VarLenUnicode,
};
use hdf5::{Attribute, Datatype, H5Type, Location};
use ndarray::{ArrayD, IxDyn};
use num_complex::Complex64;

use lazyhdf5_core::{AttrProps, AttrStore, AttrValue, Error, NumArray, Result};

use crate::error::EngineResultExt;
use crate::ffi;

/// Attribute access on any HDF5 location (file, group or dataset).
#[derive(Debug, Clone, Copy)]
pub struct LocationAttrs<'a> {
    loc: &'a Location,
}

impl<'a> LocationAttrs<'a> {
    pub fn new(loc: &'a Location) -> Self {
        Self { loc }
    }
}

impl AttrStore for LocationAttrs<'_> {
    fn attr_keys(&self) -> Result<Vec<String>> {
        self.loc.attr_names().engine()
    }

    fn read_attr(&self, key: &str, props: &AttrProps) -> Result<AttrValue> {
        read_value(self.loc, key, props)
    }

    fn check_value(&self, key: &str, value: &AttrValue, props: &AttrProps) -> Result<()> {
        check_value(key, value, props)
    }

    fn create_attr(&self, key: &str, value: &AttrValue, props: &AttrProps) -> Result<()> {
        write_value(self.loc, key, value, props)
    }

    fn delete_attr(&self, key: &str) -> Result<()> {
        if !self.contains_attr(key)? {
            return Err(Error::KeyNotFound(key.to_string()));
        }
        ffi::delete_attr(self.loc, key).engine()
    }
}

// ---------------------------------------------------------------------------
// Reading
// ---------------------------------------------------------------------------

/// Read attribute `key` of `loc`.
pub(crate) fn read_value(loc: &Location, key: &str, props: &AttrProps) -> Result<AttrValue> {
    let attr = loc.attr(key).engine()?;
    let dtype = attr.dtype().engine()?;
    let desc = dtype.to_descriptor().engine()?;

    match desc {
        TypeDescriptor::Boolean => numeric(&attr, AttrValue::Bool, NumArray::Bool),
        TypeDescriptor::Integer(_) => numeric(&attr, AttrValue::Int, NumArray::Int),
        TypeDescriptor::Unsigned(_) => numeric(&attr, AttrValue::UInt, NumArray::UInt),
        TypeDescriptor::Float(_) => numeric(&attr, AttrValue::Float, NumArray::Float),
        TypeDescriptor::VarLenUnicode => {
            strings(&attr, |s: VarLenUnicode| AttrValue::Text(s.as_str().to_string()))
        }
        TypeDescriptor::VarLenAscii => {
            strings(&attr, |s: VarLenAscii| AttrValue::Bytes(s.as_bytes().to_vec()))
        }
        TypeDescriptor::FixedAscii(_) => fixed_strings(&attr, &dtype, |raw| {
            Ok(AttrValue::Bytes(raw.to_vec()))
        }),
        TypeDescriptor::FixedUnicode(_) => fixed_strings(&attr, &dtype, |raw| {
            String::from_utf8(raw.to_vec())
                .map(AttrValue::Text)
                .map_err(|e| Error::backend(format!("attribute {key} is not valid UTF-8: {e}")))
        }),
        TypeDescriptor::Compound(ref compound) if is_complex(compound, props) => {
            read_complex(&attr, props)
        }
        other => Err(Error::Unsupported(format!(
            "attribute {key} has HDF5 type {other:?}"
        ))),
    }
}

fn numeric<T: H5Type>(
    attr: &Attribute,
    scalar: impl FnOnce(T) -> AttrValue,
    array: impl FnOnce(ArrayD<T>) -> NumArray,
) -> Result<AttrValue> {
    if attr.is_scalar() {
        return attr.read_scalar::<T>().map(scalar).engine();
    }
    let data = attr.read_dyn::<T>().engine()?;
    Ok(AttrValue::Array(array(data)))
}

fn strings<T: H5Type + Clone>(
    attr: &Attribute,
    convert: impl Fn(T) -> AttrValue,
) -> Result<AttrValue> {
    if attr.is_scalar() {
        return attr.read_scalar::<T>().map(convert).engine();
    }
    let data = attr.read_dyn::<T>().engine()?;
    Ok(AttrValue::List(data.iter().cloned().map(convert).collect()))
}

fn fixed_strings(
    attr: &Attribute,
    dtype: &Datatype,
    convert: impl Fn(&[u8]) -> Result<AttrValue>,
) -> Result<AttrValue> {
    let width = dtype.size();
    let mut buf = vec![0u8; attr.size() * width];
    ffi::read_attr(attr, dtype, &mut buf).engine()?;

    let mut values = buf
        .chunks(width.max(1))
        .map(|raw| convert(trim_nul(raw)))
        .collect::<Result<Vec<_>>>()?;

    if attr.is_scalar() {
        return values
            .pop()
            .ok_or_else(|| Error::backend("empty fixed-length string attribute"));
    }
    Ok(AttrValue::List(values))
}

fn trim_nul(raw: &[u8]) -> &[u8] {
    let end = raw.iter().rposition(|&b| b != 0).map_or(0, |i| i + 1);
    &raw[..end]
}

// ---------------------------------------------------------------------------
// Complex numbers as two-float compounds
// ---------------------------------------------------------------------------

const COMPLEX_SIZE: usize = 16;

fn is_complex(compound: &CompoundType, props: &AttrProps) -> bool {
    match compound.fields.as_slice() {
        [re, im] => {
            matches!(re.ty, TypeDescriptor::Float(_))
                && matches!(im.ty, TypeDescriptor::Float(_))
                && props.is_complex_pair(&re.name, &im.name)
        }
        _ => false,
    }
}

/// In-memory layout used for complex values: two `f64` fields named after
/// `props.complex_names`.
fn complex_descriptor(props: &AttrProps) -> TypeDescriptor {
    let (re, im) = &props.complex_names;
    TypeDescriptor::Compound(CompoundType {
        fields: vec![
            CompoundField {
                name: re.clone(),
                ty: TypeDescriptor::Float(FloatSize::U8),
                offset: 0,
                index: 0,
            },
            CompoundField {
                name: im.clone(),
                ty: TypeDescriptor::Float(FloatSize::U8),
                offset: 8,
                index: 1,
            },
        ],
        size: COMPLEX_SIZE,
    })
}

fn read_complex(attr: &Attribute, props: &AttrProps) -> Result<AttrValue> {
    let mem_type = Datatype::from_descriptor(&complex_descriptor(props)).engine()?;
    let mut buf = vec![0u8; attr.size() * COMPLEX_SIZE];
    ffi::read_attr(attr, &mem_type, &mut buf).engine()?;

    let values: Vec<Complex64> = buf.chunks_exact(COMPLEX_SIZE).map(decode_complex).collect();
    if attr.is_scalar() {
        return values
            .first()
            .copied()
            .map(AttrValue::Complex)
            .ok_or_else(|| Error::backend("empty complex attribute"));
    }
    let data = ArrayD::from_shape_vec(IxDyn(&attr.shape()), values)
        .map_err(|e| Error::backend(format!("complex attribute shape: {e}")))?;
    Ok(AttrValue::Array(NumArray::Complex(data)))
}

fn decode_complex(raw: &[u8]) -> Complex64 {
    let mut re = [0u8; 8];
    let mut im = [0u8; 8];
    re.copy_from_slice(&raw[..8]);
    im.copy_from_slice(&raw[8..16]);
    Complex64::new(f64::from_ne_bytes(re), f64::from_ne_bytes(im))
}

fn write_complex<'a>(
    loc: &Location,
    key: &str,
    values: impl Iterator<Item = &'a Complex64>,
    shape: Option<&[usize]>,
    props: &AttrProps,
) -> Result<()> {
    let desc = complex_descriptor(props);
    let builder = loc.new_attr_builder().empty_as(&desc);
    let attr = match shape {
        Some(shape) => builder.shape(shape.to_vec()).create(key),
        None => builder.create(key),
    }
    .engine()?;

    let mut buf = Vec::with_capacity(attr.size() * COMPLEX_SIZE);
    for c in values {
        buf.extend_from_slice(&c.re.to_ne_bytes());
        buf.extend_from_slice(&c.im.to_ne_bytes());
    }
    let mem_type = Datatype::from_descriptor(&desc).engine()?;
    ffi::write_attr(&attr, &mem_type, &buf).engine()
}

// ---------------------------------------------------------------------------
// Writing
// ---------------------------------------------------------------------------

/// Refuse what [`write_value`] would refuse, before anything is written.
pub(crate) fn check_value(key: &str, value: &AttrValue, props: &AttrProps) -> Result<()> {
    if key.contains('\0') {
        return Err(Error::InvalidArgument(format!(
            "attribute name {key:?} contains a NUL byte"
        )));
    }
    match value {
        AttrValue::Text(s) => text(key, s).map(drop),
        AttrValue::Bytes(b) => ascii(key, b).map(drop),
        AttrValue::Complex(_) | AttrValue::Array(NumArray::Complex(_)) => complex_names(props),
        AttrValue::List(_) | AttrValue::Record(_) => Err(Error::Unsupported(value.kind_name())),
        _ => Ok(()),
    }
}

fn text(key: &str, s: &str) -> Result<VarLenUnicode> {
    s.parse::<VarLenUnicode>()
        .map_err(|e| Error::InvalidArgument(format!("attribute {key} cannot hold {s:?}: {e}")))
}

fn ascii(key: &str, b: &[u8]) -> Result<VarLenAscii> {
    VarLenAscii::from_ascii(b).map_err(|e| {
        Error::Unsupported(format!("non-ASCII byte string for attribute {key}: {e}"))
    })
}

fn complex_names(props: &AttrProps) -> Result<()> {
    let (re, im) = &props.complex_names;
    if re == im || re.contains('\0') || im.contains('\0') {
        return Err(Error::InvalidArgument(format!(
            "complex field names {re:?} and {im:?} must differ and hold no NUL byte"
        )));
    }
    Ok(())
}

/// Create attribute `key` on `loc` holding `value`. The key must be free.
pub(crate) fn write_value(
    loc: &Location,
    key: &str,
    value: &AttrValue,
    props: &AttrProps,
) -> Result<()> {
    check_value(key, value, props)?;
    match value {
        AttrValue::Bool(v) => scalar(loc, key, v),
        AttrValue::Int(v) => scalar(loc, key, v),
        AttrValue::UInt(v) => scalar(loc, key, v),
        AttrValue::Float(v) => scalar(loc, key, v),
        AttrValue::Complex(c) => write_complex(loc, key, std::iter::once(c), None, props),
        AttrValue::Text(s) => scalar(loc, key, &text(key, s)?),
        AttrValue::Bytes(b) => scalar(loc, key, &ascii(key, b)?),
        AttrValue::Array(NumArray::Bool(a)) => array(loc, key, a),
        AttrValue::Array(NumArray::Int(a)) => array(loc, key, a),
        AttrValue::Array(NumArray::UInt(a)) => array(loc, key, a),
        AttrValue::Array(NumArray::Float(a)) => array(loc, key, a),
        AttrValue::Array(NumArray::Complex(a)) => {
            write_complex(loc, key, a.iter(), Some(a.shape()), props)
        }
        AttrValue::List(_) | AttrValue::Record(_) => Err(Error::Unsupported(value.kind_name())),
    }
}

fn scalar<T: H5Type>(loc: &Location, key: &str, value: &T) -> Result<()> {
    loc.new_attr::<T>()
        .create(key)
        .and_then(|attr| attr.write_scalar(value))
        .engine()
}

fn array<T: H5Type>(loc: &Location, key: &str, data: &ArrayD<T>) -> Result<()> {
    loc.new_attr_builder()
        .with_data(data)
        .create(key)
        .map(|_| ())
        .engine()
}
