use tracing::{info, warn};

use crate::domain::entities::kind::EntityKind;
use crate::domain::wire::{FetchError, ListPage};
use crate::ui::state::descriptors::{descriptor, ListDescriptor};
use crate::ui::state::fetch::{DisplayRow, FetchTicket, FetchTracker, ListView};
use crate::ui::state::list_query::ListQueryState;
use crate::ui::state::selection::{HeaderCheck, SelectionSet};

/// What the screen should do with a finished fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// A newer request was issued in the meantime; the response was dropped.
    Stale,
    Rendered,
    /// The page fell outside the new total and was clamped; fetch again.
    Refetch(FetchTicket),
    /// Previous rows are back on screen; show the message once.
    Failed(String),
}

/// Per-screen list state: the query, the in-flight guard, the last render
/// and the checked rows.
///
/// Every query change clears the selection so a bulk action can only reach
/// rows the admin has actually seen under the current query.
#[derive(Debug, Clone)]
pub struct ListController {
    descriptor: &'static ListDescriptor,
    query: ListQueryState,
    /// Query behind the rows on screen; a failed fetch rolls back to it.
    rendered: Option<ListQueryState>,
    tracker: FetchTracker,
    view: ListView,
    selection: SelectionSet,
}

impl ListController {
    pub fn new(kind: EntityKind) -> Self {
        let descriptor = descriptor(kind);
        Self {
            descriptor,
            query: ListQueryState::new(&descriptor.filter_names(), descriptor.default_sort()),
            rendered: None,
            tracker: FetchTracker::default(),
            view: ListView::default(),
            selection: SelectionSet::default(),
        }
    }

    pub fn kind(&self) -> EntityKind {
        self.descriptor.kind
    }

    pub fn descriptor(&self) -> &'static ListDescriptor {
        self.descriptor
    }

    pub fn query(&self) -> &ListQueryState {
        &self.query
    }

    pub fn view(&self) -> &ListView {
        &self.view
    }

    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    pub fn set_search(&mut self, text: &str) -> FetchTicket {
        self.query.set_search(text);
        self.selection.clear_all();
        self.begin_fetch()
    }

    pub fn set_filter(&mut self, name: &str, value: &str) -> FetchTicket {
        self.query.set_filter(name, value);
        if let Some(def) = self.descriptor.filter_def(name) {
            for dependent in def.resets {
                self.query.set_filter(dependent, "");
            }
        }
        self.selection.clear_all();
        self.begin_fetch()
    }

    pub fn set_sort(&mut self, field: &str) -> FetchTicket {
        self.query.set_sort(field);
        self.selection.clear_all();
        self.begin_fetch()
    }

    /// `None` for the current page or a disabled boundary control.
    pub fn set_page(&mut self, page: i64) -> Option<FetchTicket> {
        if !self.query.set_page(page) {
            return None;
        }
        self.selection.clear_all();
        Some(self.begin_fetch())
    }

    /// Re-issues the current query, e.g. after a mutation.
    pub fn begin_fetch(&mut self) -> FetchTicket {
        let ticket = self.tracker.issue(self.query.to_form());
        self.view.start_loading();
        info!(
            endpoint = self.kind().endpoint(),
            seq = ticket.seq,
            page = self.query.page(),
            "list fetch issued"
        );
        ticket
    }

    pub fn finish_fetch(
        &mut self,
        ticket: &FetchTicket,
        result: Result<ListPage<DisplayRow>, FetchError>,
    ) -> FetchOutcome {
        if !self.tracker.is_current(ticket) {
            warn!(
                endpoint = self.kind().endpoint(),
                seq = ticket.seq,
                latest = self.tracker.latest(),
                "discarding stale list response"
            );
            return FetchOutcome::Stale;
        }

        match result {
            Ok(page) => {
                if self.query.clamp_page(page.total_pages) {
                    return FetchOutcome::Refetch(self.begin_fetch());
                }
                self.view.render(page.rows, page.total_pages);
                self.rendered = Some(self.query.clone());
                FetchOutcome::Rendered
            }
            Err(err) => {
                warn!(%err, endpoint = self.kind().endpoint(), "list fetch failed");
                self.view.restore();
                if let Some(rendered) = &self.rendered {
                    self.query = rendered.clone();
                }
                let fallback = format!("Could not load {}.", self.kind().noun(2));
                FetchOutcome::Failed(err.notice_message(&fallback))
            }
        }
    }

    pub fn toggle_row(&mut self, id: &str) -> bool {
        self.selection.toggle(id)
    }

    /// Checks every visible row, or clears them all when they already are.
    pub fn toggle_all_visible(&mut self) {
        if self.header_state() == HeaderCheck::Checked {
            self.selection.clear_all();
        } else {
            let ids = self.view.visible_ids().map(str::to_string).collect::<Vec<_>>();
            self.selection.select_all(ids);
        }
    }

    pub fn header_state(&self) -> HeaderCheck {
        self.selection.header_state(self.view.visible_ids())
    }

    pub fn bulk_targets(&self) -> Vec<String> {
        self.selection.ids()
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear_all();
    }
}
