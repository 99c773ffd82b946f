use std::collections::BTreeMap;

/// Filter value meaning "no restriction".
pub const ALL_FILTER: &str = "all";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "asc" => Some(SortDirection::Asc),
            "desc" => Some(SortDirection::Desc),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec {
    pub field: String,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn new(field: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            field: field.into(),
            direction,
        }
    }

    /// Wire form: `<field>_<asc|desc>`.
    pub fn to_param(&self) -> String {
        format!("{}_{}", self.field, self.direction.as_str())
    }

    /// Field names may contain underscores, so the direction is split off the end.
    pub fn parse_param(value: &str) -> Option<Self> {
        let (field, direction) = value.rsplit_once('_')?;
        if field.is_empty() {
            return None;
        }
        Some(Self::new(field, SortDirection::parse(direction)?))
    }
}

/// Server-side view of a list request after form decoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    pub page: i64,
    pub page_size: i64,
    pub search: String,
    pub filters: BTreeMap<String, String>,
    pub sort: Option<SortSpec>,
}

impl ListQuery {
    pub fn new(page_size: i64) -> Self {
        Self {
            page: 1,
            page_size,
            search: String::new(),
            filters: BTreeMap::new(),
            sort: None,
        }
    }

    /// Returns the filter value unless it is empty or the `all` sentinel.
    pub fn filter(&self, name: &str) -> Option<&str> {
        self.filters
            .get(name)
            .map(|value| value.trim())
            .filter(|value| !value.is_empty() && *value != ALL_FILTER)
    }

    /// `None` when the page lies beyond any offset SQLite can address.
    pub fn offset(&self) -> Option<i64> {
        (self.page.max(1) - 1).checked_mul(self.page_size)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSlice<R> {
    pub rows: Vec<R>,
    pub total_items: i64,
}

impl<R> PageSlice<R> {
    pub fn total_pages(&self, page_size: i64) -> i64 {
        if page_size <= 0 || self.total_items <= 0 {
            return 0;
        }
        (self.total_items + page_size - 1) / page_size
    }
}
