//! Query engine for the record table
//!
//! Pure functions over the full in-memory record set: filter, stable sort,
//! paginate, and derive facet options. Nothing here fails; a filter that
//! cannot match degrades to an empty result.

pub mod facets;
pub mod filter;
pub mod sort;

pub use facets::{options, FacetOptions};
pub use filter::{
    ExactMatches, FilterSpec, HobbyFilter, HobbyMatch, PhoneField, PhoneFilter, PhoneMatch, TextField,
    TextOperator, TextSearch,
};
pub use sort::{SortDirection, SortField, SortSpec};

use serde::Serialize;

use crate::model::Record;
use crate::pagination::{total_pages, Page};

/// One page of the filtered, sorted record set
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueryView {
    pub visible: Vec<Record>,
    pub total_filtered: usize,
    pub total_pages: usize,
}

/// Filter then stable-sort, without paginating
pub fn select<'a>(records: &'a [Record], filter: &FilterSpec, sort: &SortSpec) -> Vec<&'a Record> {
    let mut selected: Vec<&Record> = records.iter().filter(|r| filter.matches(r)).collect();
    sort::sort_records(&mut selected, sort);
    selected
}

/// Produce the visible slice for `page`
///
/// The page index is not clamped: an index past `total_pages` (or 0) yields
/// an empty `visible` while the totals still describe the filtered set.
pub fn view(records: &[Record], filter: &FilterSpec, sort: &SortSpec, page: Page) -> QueryView {
    let selected = select(records, filter, sort);

    QueryView {
        visible: page.slice(&selected).iter().map(|r| (*r).clone()).collect(),
        total_filtered: selected.len(),
        total_pages: total_pages(selected.len(), page.size),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Person, RecordId};

    fn records(n: usize) -> Vec<Record> {
        (0..n)
            .map(|i| {
                Record::new(
                    RecordId::new(),
                    Person {
                        first_name: format!("person{i:02}"),
                        last_name: "Test".to_string(),
                        gender: if i % 2 == 0 { "Male" } else { "Female" }.to_string(),
                        ..Person::default()
                    },
                )
            })
            .collect()
    }

    #[test]
    fn test_view_empty_set_has_one_page() {
        let v = view(&[], &FilterSpec::default(), &SortSpec::default(), Page::new(1));
        assert!(v.visible.is_empty());
        assert_eq!(v.total_filtered, 0);
        assert_eq!(v.total_pages, 1);
    }

    #[test]
    fn test_view_does_not_clamp_page() {
        let all = records(7);
        let v = view(&all, &FilterSpec::default(), &SortSpec::default(), Page::new(9));
        assert!(v.visible.is_empty());
        assert_eq!(v.total_filtered, 7);
        assert_eq!(v.total_pages, 2);
    }

    #[test]
    fn test_view_filters_before_paginating() {
        let all = records(12);
        let mut filter = FilterSpec::default();
        filter.exact_matches.gender = "Female".to_string();

        let v = view(&all, &filter, &SortSpec::default(), Page::new(2));
        assert_eq!(v.total_filtered, 6);
        assert_eq!(v.total_pages, 2);
        assert_eq!(v.visible.len(), 1);
        assert_eq!(v.visible[0].person.first_name, "person11");
    }

    #[test]
    fn test_select_sorts_descending() {
        let all = records(3);
        let sorted = select(
            &all,
            &FilterSpec::default(),
            &SortSpec::by(SortField::Name, SortDirection::Desc),
        );
        let names: Vec<_> = sorted.iter().map(|r| r.person.first_name.as_str()).collect();
        assert_eq!(names, ["person02", "person01", "person00"]);
    }
}
