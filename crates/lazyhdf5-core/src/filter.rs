//! Substring filtering of name lists.

use crate::error::{Error, Result};
use crate::value::AttrValue;

/// One substring filter or several.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Filters {
    One(String),
    Many(Vec<String>),
}

impl Filters {
    fn as_slice(&self) -> &[String] {
        match self {
            Filters::One(f) => std::slice::from_ref(f),
            Filters::Many(fs) => fs,
        }
    }
}

impl From<&str> for Filters {
    fn from(f: &str) -> Self {
        Filters::One(f.to_string())
    }
}

impl From<String> for Filters {
    fn from(f: String) -> Self {
        Filters::One(f)
    }
}

impl From<Vec<String>> for Filters {
    fn from(fs: Vec<String>) -> Self {
        Filters::Many(fs)
    }
}

impl From<Vec<&str>> for Filters {
    fn from(fs: Vec<&str>) -> Self {
        Filters::Many(fs.into_iter().map(String::from).collect())
    }
}

impl From<&[&str]> for Filters {
    fn from(fs: &[&str]) -> Self {
        Filters::Many(fs.iter().map(|f| f.to_string()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for Filters {
    fn from(fs: [&str; N]) -> Self {
        Filters::Many(fs.iter().map(|f| f.to_string()).collect())
    }
}

impl TryFrom<&AttrValue> for Filters {
    type Error = Error;

    /// Text becomes a single filter, a list of text a sequence. Anything else
    /// is rejected.
    fn try_from(value: &AttrValue) -> Result<Self> {
        match value {
            AttrValue::Text(f) => Ok(Filters::One(f.clone())),
            AttrValue::List(items) => items
                .iter()
                .map(|item| match item {
                    AttrValue::Text(f) => Ok(f.clone()),
                    other => Err(not_a_filter(other)),
                })
                .collect::<Result<Vec<_>>>()
                .map(Filters::Many),
            other => Err(not_a_filter(other)),
        }
    }
}

fn not_a_filter(value: &AttrValue) -> Error {
    Error::InvalidArgument(format!(
        "filters must be text or a list of text, got {}",
        value.kind_name()
    ))
}

/// Filter `items` by substring.
///
/// With `keep`, entries containing a filter are kept; otherwise entries
/// containing it are dropped.
///
/// `exclusive` applies the filters one after another, so every filter must
/// agree for an entry to survive. Without it each filter makes its own pass
/// over `items` and the passes are merged, deduplicated, in the order
/// entries were first seen.
pub fn filter_list<S: AsRef<str>>(
    items: &[S],
    filters: impl Into<Filters>,
    keep: bool,
    exclusive: bool,
) -> Vec<String> {
    let filters = filters.into();
    let passes = |item: &str, filter: &str| item.contains(filter) == keep;

    if exclusive {
        let mut out: Vec<String> = items.iter().map(|i| i.as_ref().to_string()).collect();
        for filter in filters.as_slice() {
            out.retain(|item| passes(item, filter));
        }
        return out;
    }

    let mut out: Vec<String> = Vec::new();
    for filter in filters.as_slice() {
        for item in items.iter().map(AsRef::as_ref) {
            if passes(item, filter) && !out.iter().any(|seen| seen == item) {
                out.push(item.to_string());
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const ITEMS: [&str; 5] = ["Keep1", "Keep2", "KeepExclude", "Exclude1", "Exclude2"];

    #[test]
    fn keep_single_filter() {
        assert_eq!(
            filter_list(&ITEMS, "Keep", true, true),
            vec!["Keep1", "Keep2", "KeepExclude"]
        );
        assert_eq!(
            filter_list(&ITEMS, vec!["Keep"], true, true),
            vec!["Keep1", "Keep2", "KeepExclude"]
        );
    }

    #[test]
    fn exclude_single_filter() {
        assert_eq!(filter_list(&ITEMS, "Exclude", false, true), vec!["Keep1", "Keep2"]);
    }

    #[test]
    fn keep_exclusive_needs_every_filter() {
        assert_eq!(filter_list(&ITEMS, ["Keep", "1"], true, true), vec!["Keep1"]);
    }

    #[test]
    fn keep_non_exclusive_takes_union() {
        assert_eq!(
            filter_list(&ITEMS, ["Keep", "1"], true, false),
            vec!["Keep1", "Keep2", "KeepExclude", "Exclude1"]
        );
    }

    #[test]
    fn exclude_exclusive_drops_any_match() {
        assert_eq!(filter_list(&ITEMS, ["Exclude", "2"], false, true), vec!["Keep1"]);
    }

    #[test]
    fn exclude_non_exclusive_takes_union() {
        assert_eq!(
            filter_list(&ITEMS, ["Exclude", "2"], false, false),
            vec!["Keep1", "Keep2", "KeepExclude", "Exclude1"]
        );
    }

    #[test]
    fn exclusive_keeps_input_duplicates() {
        let items = ["a1", "a1", "b1"];
        assert_eq!(filter_list(&items, "a", true, true), vec!["a1", "a1"]);
        assert_eq!(filter_list(&items, "a", true, false), vec!["a1"]);
    }

    #[test]
    fn empty_filter_list() {
        let none: Vec<&str> = Vec::new();
        assert_eq!(filter_list(&ITEMS, none.clone(), true, true).len(), ITEMS.len());
        assert!(filter_list(&ITEMS, none, true, false).is_empty());
    }

    #[test]
    fn filters_from_values() {
        assert_eq!(
            Filters::try_from(&AttrValue::from("Keep")).unwrap(),
            Filters::One("Keep".into())
        );
        let list = AttrValue::List(vec![AttrValue::from("Keep"), AttrValue::from("1")]);
        assert_eq!(
            Filters::try_from(&list).unwrap(),
            Filters::Many(vec!["Keep".into(), "1".into()])
        );
    }

    #[test]
    fn non_text_filter_is_invalid() {
        for value in [
            AttrValue::Int(1),
            AttrValue::List(vec![AttrValue::from("a"), AttrValue::Int(1)]),
        ] {
            assert!(matches!(
                Filters::try_from(&value),
                Err(Error::InvalidArgument(_))
            ));
        }
    }
}
