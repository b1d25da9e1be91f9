//! Engine-agnostic core of lazyhdf5.
//!
//! The attribute value model, type-family classification, type-checked
//! attribute rewrites, hierarchy assembly and list filtering live here. None
//! of it touches the on-disk format: storage goes through the
//! [`Container`] and [`AttrStore`] traits, which the `lazyhdf5` crate
//! implements on top of the `hdf5` crate.
//!
//! # Example
//!
//! ```
//! use lazyhdf5_core::{compatible, filter_list, AttrValue};
//!
//! assert!(!compatible(&AttrValue::Int(1), &AttrValue::Float(2.0)).unwrap());
//!
//! let names = ["Keep1", "Keep2", "KeepExclude", "Exclude1", "Exclude2"];
//! assert_eq!(filter_list(&names, ["Keep", "1"], true, true), vec!["Keep1"]);
//! ```

pub mod alter;
pub mod container;
pub mod error;
pub mod family;
pub mod filter;
pub mod hierarchy;
pub mod inspect;
pub mod props;
pub mod resolve;
pub mod value;

#[cfg(test)]
mod testing;

pub use alter::{
    alter_permissive, alter_permissive_with, alter_strict, alter_strict_with, write_attr_dict,
    write_attr_dict_with,
};
pub use container::{AttrStore, Container, NodeKind, OpenMode};
pub use error::{BoxError, Error, Result};
pub use family::{compatible, family_of, TypeFamily};
pub use filter::{filter_list, Filters};
pub use hierarchy::{Hierarchy, ROOT};
pub use inspect::{
    build_hierarchy, get_attributes, get_attributes_with, list_datasets, list_groups,
    valid_datasets, valid_file, AttrMap,
};
pub use props::AttrProps;
pub use resolve::{is_open, resolve, with_container, Resolved, Source};
pub use value::{AttrValue, ElementType, NumArray};
