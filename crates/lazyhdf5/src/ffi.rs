//! Raw attribute calls the `hdf5` crate does not wrap.
//!
//! Every call runs under the library-wide lock the `hdf5` crate uses for
//! its own calls.

use std::ffi::{c_void, CString};

use hdf5::{Attribute, Datatype, Location};
use hdf5_sys::h5::herr_t;
use hdf5_sys::h5a::{H5Adelete, H5Aread, H5Awrite};

fn check(status: herr_t, call: &str, name: &str) -> hdf5::Result<()> {
    if status < 0 {
        return Err(format!("{call} failed for attribute {name:?}").into());
    }
    Ok(())
}

fn c_name(name: &str) -> hdf5::Result<CString> {
    CString::new(name).map_err(|_| format!("attribute name {name:?} contains a NUL byte").into())
}

/// Remove attribute `name` from `loc`.
pub(crate) fn delete_attr(loc: &Location, name: &str) -> hdf5::Result<()> {
    let c_name = c_name(name)?;
    let status = hdf5::sync::sync(|| unsafe { H5Adelete(loc.id(), c_name.as_ptr()) });
    check(status, "H5Adelete", name)
}

/// Read the whole of `attr` into `buf`, converting to `mem_type`.
///
/// `buf` must hold `attr.size()` elements of `mem_type.size()` bytes each.
pub(crate) fn read_attr(
    attr: &Attribute,
    mem_type: &Datatype,
    buf: &mut [u8],
) -> hdf5::Result<()> {
    let needed = attr.size() * mem_type.size();
    if buf.len() < needed {
        return Err(format!(
            "read buffer holds {} bytes, attribute needs {needed}",
            buf.len()
        )
        .into());
    }
    let status = hdf5::sync::sync(|| unsafe {
        H5Aread(attr.id(), mem_type.id(), buf.as_mut_ptr().cast::<c_void>())
    });
    check(status, "H5Aread", &attr.name())
}

/// Write `buf`, laid out as `mem_type`, over the whole of `attr`.
pub(crate) fn write_attr(attr: &Attribute, mem_type: &Datatype, buf: &[u8]) -> hdf5::Result<()> {
    let needed = attr.size() * mem_type.size();
    if buf.len() < needed {
        return Err(format!(
            "write buffer holds {} bytes, attribute needs {needed}",
            buf.len()
        )
        .into());
    }
    let status = hdf5::sync::sync(|| unsafe {
        H5Awrite(attr.id(), mem_type.id(), buf.as_ptr().cast::<c_void>())
    });
    check(status, "H5Awrite", &attr.name())
}
