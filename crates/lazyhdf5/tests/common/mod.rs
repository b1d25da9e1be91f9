//! Shared fixture for the integration tests.

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use hdf5::types::{FixedAscii, VarLenUnicode};
use hdf5::{File, Group};
use ndarray::array;

pub const GROUPS: [&str; 7] = [
    "/",
    "Group1",
    "Group2",
    "Group2/Group3",
    "Group4",
    "Group4/Group5",
    "Group4/Group5/Group6",
];

pub const DATASETS: [&str; 6] = [
    "Group1/ingroup1_1",
    "Group1/ingroup1_2",
    "Group2/Group3/ingroup3",
    "Group2/ingroup2",
    "Group4/Group5/Group6/ingroup6",
    "base",
];

fn small_dataset(group: &Group, name: &str) {
    group
        .new_dataset_builder()
        .with_data(&array![1.0f64, 2.0])
        .create(name)
        .unwrap();
}

/// Build the test file under `dir` and close it again.
///
/// Layout: `base` at the root carrying one attribute of each common kind,
/// plus datasets in `Group1`, `Group2`, `Group2/Group3` and
/// `Group4/Group5/Group6`. `Group4` and `Group4/Group5` hold no datasets.
pub fn create_fixture(dir: &Path) -> PathBuf {
    let path = dir.join("fixture.h5");
    let file = File::create(&path).unwrap();

    let base = file
        .new_dataset_builder()
        .with_data(&array![1.0f64, 2.0, 3.0])
        .create("base")
        .unwrap();
    base.new_attr::<VarLenUnicode>()
        .create("Attribute_str")
        .unwrap()
        .write_scalar(&"Test".parse::<VarLenUnicode>().unwrap())
        .unwrap();
    base.new_attr::<FixedAscii<4>>()
        .create("Attribute_bytes")
        .unwrap()
        .write_scalar(&FixedAscii::<4>::from_ascii(b"Test").unwrap())
        .unwrap();
    base.new_attr::<i64>()
        .create("Attribute_int")
        .unwrap()
        .write_scalar(&1i64)
        .unwrap();
    base.new_attr::<f64>()
        .create("Attribute_float")
        .unwrap()
        .write_scalar(&1.1f64)
        .unwrap();
    base.new_attr_builder()
        .with_data(&array![1i64, 2, 3])
        .create("Attribute_np_1d")
        .unwrap();
    base.new_attr_builder()
        .with_data(&array![[1i64, 2, 3], [4, 5, 6]])
        .create("Attribute_np_2d")
        .unwrap();

    let group1 = file.create_group("Group1").unwrap();
    small_dataset(&group1, "ingroup1_1");
    small_dataset(&group1, "ingroup1_2");

    let group2 = file.create_group("Group2").unwrap();
    small_dataset(&group2, "ingroup2");
    let group3 = group2.create_group("Group3").unwrap();
    small_dataset(&group3, "ingroup3");

    let group6 = file
        .create_group("Group4")
        .unwrap()
        .create_group("Group5")
        .unwrap()
        .create_group("Group6")
        .unwrap();
    small_dataset(&group6, "ingroup6");

    file.close().unwrap();
    path
}
