use std::collections::BTreeMap;

use crate::domain::entities::list::{SortDirection, SortSpec, ALL_FILTER};
use crate::domain::wire::{pair, FormPairs};

/// What the next list fetch will ask for.
///
/// Every change except `set_page` puts the screen back on page 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQueryState {
    page: i64,
    search: String,
    filters: BTreeMap<String, String>,
    sort: SortSpec,
}

impl ListQueryState {
    pub fn new(filters: &[&str], default_sort: SortSpec) -> Self {
        Self {
            page: 1,
            search: String::new(),
            filters: filters
                .iter()
                .map(|name| ((*name).to_string(), ALL_FILTER.to_string()))
                .collect(),
            sort: default_sort,
        }
    }

    pub fn page(&self) -> i64 {
        self.page
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn filter(&self, name: &str) -> &str {
        self.filters
            .get(name)
            .map(String::as_str)
            .unwrap_or(ALL_FILTER)
    }

    pub fn sort(&self) -> &SortSpec {
        &self.sort
    }

    pub fn set_search(&mut self, text: &str) {
        self.search = text.to_string();
        self.page = 1;
    }

    pub fn set_filter(&mut self, name: &str, value: &str) {
        let value = if value.trim().is_empty() {
            ALL_FILTER
        } else {
            value
        };
        self.filters.insert(name.to_string(), value.to_string());
        self.page = 1;
    }

    /// Same field flips the direction; a new field starts ascending.
    pub fn set_sort(&mut self, field: &str) {
        if self.sort.field == field {
            self.sort.direction = self.sort.direction.toggled();
        } else {
            self.sort = SortSpec::new(field, SortDirection::Asc);
        }
        self.page = 1;
    }

    /// Returns whether the page actually changed.
    pub fn set_page(&mut self, page: i64) -> bool {
        let page = page.max(1);
        let changed = page != self.page;
        self.page = page;
        changed
    }

    /// Pulls `page` back into `[1, total_pages]`. Returns whether it moved.
    pub fn clamp_page(&mut self, total_pages: i64) -> bool {
        let clamped = self.page.min(total_pages.max(1)).max(1);
        let changed = clamped != self.page;
        self.page = clamped;
        changed
    }

    pub fn to_form(&self) -> FormPairs {
        let mut form = vec![
            pair("action", "fetch"),
            pair("page", self.page.to_string()),
            pair("search", self.search.clone()),
        ];
        form.extend(
            self.filters
                .iter()
                .map(|(name, value)| (name.clone(), value.clone())),
        );
        form.push(pair("sort", self.sort.to_param()));
        form
    }
}
