use serde::de::DeserializeOwned;

use crate::domain::entities::election::{CandidateRow, ElectionRow, PositionRow, VotingCodeRow};
use crate::domain::entities::kind::EntityKind;
use crate::domain::entities::list::{SortDirection, SortSpec};
use crate::domain::wire::{parse_list_response, FetchError, ListPage};
use crate::ui::state::fetch::DisplayRow;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    pub label: &'static str,
    /// Sort key sent to the endpoint; `None` for columns that cannot be sorted.
    pub sort: Option<&'static str>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterSource {
    Fixed(&'static [(&'static str, &'static str)]),
    Elections,
    /// Positions of whatever the `election` filter currently holds.
    PositionsOfElection,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterDef {
    pub name: &'static str,
    pub label: &'static str,
    pub source: FilterSource,
    /// Filters put back to "all" when this one changes.
    pub resets: &'static [&'static str],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListDescriptor {
    pub kind: EntityKind,
    pub title: &'static str,
    pub search_placeholder: &'static str,
    pub columns: &'static [Column],
    pub filters: &'static [FilterDef],
    pub default_sort: (&'static str, SortDirection),
    pub editable: bool,
    pub exportable: bool,
    pub empty_message: &'static str,
}

impl ListDescriptor {
    pub fn default_sort(&self) -> SortSpec {
        SortSpec::new(self.default_sort.0, self.default_sort.1)
    }

    pub fn filter_def(&self, name: &str) -> Option<&'static FilterDef> {
        self.filters.iter().find(|def| def.name == name)
    }

    pub fn filter_names(&self) -> Vec<&'static str> {
        self.filters.iter().map(|def| def.name).collect()
    }
}

const fn sortable(label: &'static str, key: &'static str) -> Column {
    Column {
        label,
        sort: Some(key),
    }
}

const fn plain(label: &'static str) -> Column {
    Column { label, sort: None }
}

const ELECTION_FILTER: FilterDef = FilterDef {
    name: "election",
    label: "Election",
    source: FilterSource::Elections,
    resets: &[],
};

static ELECTIONS: ListDescriptor = ListDescriptor {
    kind: EntityKind::Elections,
    title: "Elections",
    search_placeholder: "Search title or description",
    columns: &[
        sortable("Title", "title"),
        sortable("Starts", "starts"),
        sortable("Ends", "ends"),
        plain("Status"),
        sortable("Positions", "positions"),
    ],
    filters: &[FilterDef {
        name: "status",
        label: "Status",
        source: FilterSource::Fixed(&[
            ("upcoming", "Upcoming"),
            ("active", "Active"),
            ("closed", "Closed"),
        ]),
        resets: &[],
    }],
    default_sort: ("starts", SortDirection::Desc),
    editable: false,
    exportable: false,
    empty_message: "No elections found.",
};

static POSITIONS: ListDescriptor = ListDescriptor {
    kind: EntityKind::Positions,
    title: "Positions",
    search_placeholder: "Search position or election",
    columns: &[
        sortable("Position", "name"),
        sortable("Election", "election"),
        sortable("Max votes", "max_votes"),
        sortable("Candidates", "candidates"),
    ],
    filters: &[ELECTION_FILTER],
    default_sort: ("order", SortDirection::Asc),
    editable: false,
    exportable: false,
    empty_message: "No positions found.",
};

static CANDIDATES: ListDescriptor = ListDescriptor {
    kind: EntityKind::Candidates,
    title: "Candidates",
    search_placeholder: "Search name, party or position",
    columns: &[
        sortable("Name", "name"),
        sortable("Party", "party"),
        sortable("Position", "position"),
        sortable("Election", "election"),
        sortable("Votes", "votes"),
    ],
    filters: &[
        FilterDef {
            name: "election",
            label: "Election",
            source: FilterSource::Elections,
            resets: &["position"],
        },
        FilterDef {
            name: "position",
            label: "Position",
            source: FilterSource::PositionsOfElection,
            resets: &[],
        },
    ],
    default_sort: ("name", SortDirection::Asc),
    editable: true,
    exportable: true,
    empty_message: "No candidates found.",
};

static VOTING_CODES: ListDescriptor = ListDescriptor {
    kind: EntityKind::VotingCodes,
    title: "Voting codes",
    search_placeholder: "Search code or election",
    columns: &[
        sortable("Code", "code"),
        sortable("Election", "election"),
        sortable("Status", "status"),
        sortable("Used at", "used"),
        sortable("Created", "created"),
    ],
    filters: &[
        ELECTION_FILTER,
        FilterDef {
            name: "status",
            label: "Status",
            source: FilterSource::Fixed(&[("unused", "Unused"), ("used", "Used")]),
            resets: &[],
        },
    ],
    default_sort: ("created", SortDirection::Desc),
    editable: false,
    exportable: true,
    empty_message: "No voting codes found.",
};

pub fn descriptor(kind: EntityKind) -> &'static ListDescriptor {
    match kind {
        EntityKind::Elections => &ELECTIONS,
        EntityKind::Positions => &POSITIONS,
        EntityKind::Candidates => &CANDIDATES,
        EntityKind::VotingCodes => &VOTING_CODES,
    }
}

/// A wire row that knows how to show itself in a list table.
pub trait ListRow: DeserializeOwned {
    fn display_row(&self) -> DisplayRow;
}

impl ListRow for ElectionRow {
    fn display_row(&self) -> DisplayRow {
        DisplayRow {
            id: self.id.to_string(),
            cells: vec![
                self.title.clone(),
                self.starts_at.clone(),
                self.ends_at.clone(),
                self.status.clone(),
                self.position_count.to_string(),
            ],
        }
    }
}

impl ListRow for PositionRow {
    fn display_row(&self) -> DisplayRow {
        DisplayRow {
            id: self.id.to_string(),
            cells: vec![
                self.name.clone(),
                self.election_title.clone(),
                self.max_votes.to_string(),
                self.candidate_count.to_string(),
            ],
        }
    }
}

impl ListRow for CandidateRow {
    fn display_row(&self) -> DisplayRow {
        let party = if self.party.is_empty() {
            "Independent".to_string()
        } else {
            self.party.clone()
        };
        DisplayRow {
            id: self.id.to_string(),
            cells: vec![
                self.name.clone(),
                party,
                self.position_name.clone(),
                self.election_title.clone(),
                self.votes.to_string(),
            ],
        }
    }
}

impl ListRow for VotingCodeRow {
    fn display_row(&self) -> DisplayRow {
        DisplayRow {
            id: self.id.to_string(),
            cells: vec![
                self.code.clone(),
                self.election_title.clone(),
                if self.used { "Used" } else { "Unused" }.to_string(),
                self.used_at.clone().unwrap_or_else(|| "-".to_string()),
                self.created_at.clone(),
            ],
        }
    }
}

fn decode_as<R: ListRow>(body: &str, rows_key: &str) -> Result<ListPage<DisplayRow>, FetchError> {
    let page = parse_list_response::<R>(body, rows_key)?;
    Ok(ListPage {
        rows: page.rows.iter().map(ListRow::display_row).collect(),
        total_pages: page.total_pages,
    })
}

/// Turns a list response body for `kind` into table rows.
pub fn decode_display_page(
    kind: EntityKind,
    body: &str,
) -> Result<ListPage<DisplayRow>, FetchError> {
    let key = kind.rows_key();
    match kind {
        EntityKind::Elections => decode_as::<ElectionRow>(body, key),
        EntityKind::Positions => decode_as::<PositionRow>(body, key),
        EntityKind::Candidates => decode_as::<CandidateRow>(body, key),
        EntityKind::VotingCodes => decode_as::<VotingCodeRow>(body, key),
    }
}
