use dioxus::prelude::*;
use rfd::FileDialog;
use tracing::warn;

use crate::domain::entities::election::LookupOption;
use crate::domain::entities::kind::EntityKind;
use crate::domain::entities::list::{SortDirection, ALL_FILTER};
use crate::domain::wire::pair;
use crate::ui::client;
use crate::ui::components::forms::{
    CandidateEditor, ElectionCreateForm, GenerateCodesForm, PositionCreateForm,
};
use crate::ui::components::pagination::PaginationBar;
use crate::ui::state::app_state::AppState;
use crate::ui::state::bulk::bulk_delete_prompt;
use crate::ui::state::debounce::Debounce;
use crate::ui::state::descriptors::{FilterDef, FilterSource};
use crate::ui::state::fetch::{FetchTicket, LoadPhase};
use crate::ui::state::list_controller::{FetchOutcome, ListController};
use crate::ui::state::notifications::Severity;
use crate::ui::state::selection::HeaderCheck;

const TOOLBAR: &str = "display: flex; flex-wrap: wrap; gap: 12px; align-items: center; margin: 12px 0;";
const INPUT: &str = "border: 1px solid #bbb; padding: 5px 8px; border-radius: 6px;";
const BUTTON: &str = "border: 1px solid #bbb; background: #fff; padding: 4px 10px; border-radius: 6px; cursor: pointer;";
const DANGER: &str = "border: 1px solid #c62828; background: #c62828; color: #fff; padding: 4px 10px; border-radius: 6px; cursor: pointer;";
const TABLE: &str = "width: 100%; border-collapse: collapse;";
const HEADER_CELL: &str = "text-align: left; padding: 8px; border-bottom: 2px solid #ddd; background: #f7f7f7; white-space: nowrap;";
const CELL: &str = "padding: 8px; border-bottom: 1px solid #eee;";

#[derive(Debug, Clone, PartialEq, Eq)]
enum RowAction {
    Toggle(String),
    Edit(String),
    Delete(String),
}

/// Fetches `ticket` and follows up until the response is rendered, dropped
/// as stale, or reported as a failure.
async fn drive_fetch(
    app: AppState,
    mut controller: Signal<ListController>,
    mut ticket: FetchTicket,
) {
    let kind = controller.peek().kind();
    loop {
        let result = client::fetch_list(app.endpoint(), kind, ticket.form.clone()).await;
        let outcome = controller.write().finish_fetch(&ticket, result);
        match outcome {
            FetchOutcome::Refetch(next) => ticket = next,
            FetchOutcome::Failed(message) => {
                app.notify(message, Severity::Error);
                break;
            }
            FetchOutcome::Stale | FetchOutcome::Rendered => break,
        }
    }
}

fn header_glyph(state: HeaderCheck) -> (&'static str, &'static str) {
    match state {
        HeaderCheck::Unchecked => ("☐", "false"),
        HeaderCheck::Indeterminate => ("⊟", "mixed"),
        HeaderCheck::Checked => ("☑", "true"),
    }
}

#[component]
pub fn ListScreen(kind: EntityKind) -> Element {
    let app = use_context::<AppState>();
    let mut controller = use_signal(move || ListController::new(kind));
    let mut search_text = use_signal(String::new);
    let mut election_options = use_signal(Vec::<LookupOption>::new);
    let mut position_options = use_signal(Vec::<LookupOption>::new);
    let mut editing = use_signal(|| None::<String>);
    let descriptor = controller.peek().descriptor();

    let fetch = move |ticket: FetchTicket| {
        spawn(drive_fetch(app, controller, ticket));
    };

    let reload_elections = move || {
        spawn(async move {
            match client::election_options(app.endpoint()).await {
                Ok(options) => election_options.set(options),
                Err(err) => app.notify(
                    err.notice_message("Could not load elections."),
                    Severity::Error,
                ),
            }
        });
    };

    let reload_positions = move |election: String| {
        spawn(async move {
            if election.is_empty() || election == ALL_FILTER {
                position_options.set(Vec::new());
                return;
            }
            match client::position_options(app.endpoint(), election).await {
                Ok(options) => position_options.set(options),
                Err(err) => app.notify(
                    err.notice_message("Could not load positions."),
                    Severity::Error,
                ),
            }
        });
    };

    use_hook(move || {
        let ticket = controller.write().begin_fetch();
        fetch(ticket);
        reload_elections();
    });

    let search_debounce = app.config().search_debounce;
    let debounced_search = use_hook(move || {
        Debounce::new(search_debounce, move |text: String| {
            let mut controller = controller;
            let ticket = controller.write().set_search(&text);
            fetch(ticket);
        })
    });

    let mut refresh = move |_: ()| {
        let ticket = controller.write().begin_fetch();
        fetch(ticket);
        reload_elections();
    };

    let mut on_row_action = move |action: RowAction| match action {
        RowAction::Toggle(id) => {
            controller.write().toggle_row(&id);
        }
        RowAction::Edit(id) => editing.set(Some(id)),
        RowAction::Delete(id) => {
            let message = format!("Delete this {}? This cannot be undone.", kind.noun(1));
            app.ask("Confirm delete", message, move || {
                spawn(async move {
                    let form = vec![pair("action", "delete"), pair("id", id)];
                    match client::mutate(app.endpoint(), kind, form).await {
                        Ok(response) => app.notify(
                            response
                                .message
                                .unwrap_or_else(|| format!("Deleted {}.", kind.noun(1))),
                            Severity::Success,
                        ),
                        Err(err) => app.notify(
                            err.notice_message(&format!("Could not delete the {}.", kind.noun(1))),
                            Severity::Error,
                        ),
                    }
                    let ticket = controller.write().begin_fetch();
                    drive_fetch(app, controller, ticket).await;
                });
            });
        }
    };

    let on_bulk_delete = move |_| {
        let ids = controller.peek().bulk_targets();
        let Some(prompt) = bulk_delete_prompt(kind, ids.len()) else {
            return;
        };
        app.ask("Confirm bulk delete", prompt, move || {
            spawn(async move {
                let report = client::bulk_delete(app.endpoint(), kind, ids).await;
                let (message, severity) = report.notice(kind);
                app.notify(message, severity);
                controller.write().clear_selection();
                let ticket = controller.write().begin_fetch();
                drive_fetch(app, controller, ticket).await;
            });
        });
    };

    let on_export = move |_| {
        let form = controller.peek().query().to_form();
        spawn(async move {
            let download = match client::export(app.endpoint(), kind, form).await {
                Ok(download) => download,
                Err(err) => {
                    app.notify(err.notice_message("Export failed."), Severity::Error);
                    return;
                }
            };
            let Some(path) = FileDialog::new()
                .set_file_name(&download.file_name)
                .add_filter("CSV", &["csv"])
                .save_file()
            else {
                return;
            };
            match std::fs::write(&path, &download.bytes) {
                Ok(()) => app.notify(
                    format!("Exported to {}", path.display()),
                    Severity::Success,
                ),
                Err(err) => {
                    warn!(%err, path = %path.display(), "failed to write export");
                    app.notify(format!("Could not save the file: {err}"), Severity::Error);
                }
            }
        });
    };

    let state = controller.read();
    let query = state.query();
    let view = state.view();
    let header = state.header_state();
    let (header_mark, header_aria) = header_glyph(header);
    let selected_count = state.selection().len();
    let sort = query.sort().clone();
    let current_page = query.page();
    let total_pages = view.total_pages();
    let phase = view.phase();
    let loading = view.is_loading();
    let rows = view
        .visible_rows()
        .iter()
        .map(|row| (row.clone(), state.selection().contains(&row.id)))
        .collect::<Vec<_>>();
    let filter_values = descriptor
        .filters
        .iter()
        .map(|def| (def, query.filter(def.name).to_string()))
        .collect::<Vec<_>>();
    drop(state);

    let column_count = descriptor.columns.len() + 2;
    let window = app.config().pagination_window;

    rsx! {
        div {
            h2 { style: "margin: 0 0 8px 0;", "{descriptor.title}" }

            match kind {
                EntityKind::Elections => rsx! { ElectionCreateForm { on_saved: refresh } },
                EntityKind::Positions => rsx! {
                    PositionCreateForm { elections: election_options(), on_saved: refresh }
                },
                EntityKind::Candidates => {
                    let key = editing().unwrap_or_else(|| "new".to_string());
                    rsx! {
                        CandidateEditor {
                            key: "{key}",
                            elections: election_options(),
                            editing: editing(),
                            on_saved: move |_| {
                                editing.set(None);
                                refresh(());
                            },
                            on_cancel: move |_| editing.set(None),
                        }
                    }
                }
                EntityKind::VotingCodes => rsx! {
                    GenerateCodesForm { elections: election_options(), on_saved: refresh }
                },
            }

            div { style: TOOLBAR,
                input {
                    style: "{INPUT} min-width: 260px;",
                    placeholder: "{descriptor.search_placeholder}",
                    value: "{search_text}",
                    oninput: move |event| {
                        let text = event.value();
                        search_text.set(text.clone());
                        let debounced = debounced_search.clone();
                        spawn(async move {
                            debounced.call(text).await;
                        });
                    },
                }
                {filter_values.into_iter().map(|(def, value)| {
                    let def: &'static FilterDef = def;
                    let options = match def.source {
                        FilterSource::Fixed(fixed) => fixed
                            .iter()
                            .map(|(value, label)| LookupOption {
                                value: (*value).to_string(),
                                label: (*label).to_string(),
                            })
                            .collect::<Vec<_>>(),
                        FilterSource::Elections => election_options(),
                        FilterSource::PositionsOfElection => position_options(),
                    };
                    rsx!(
                        select {
                            key: "{def.name}",
                            style: INPUT,
                            "aria-label": def.label,
                            onchange: move |event| {
                                let value = event.value();
                                let ticket = controller.write().set_filter(def.name, &value);
                                fetch(ticket);
                                if !def.resets.is_empty() {
                                    reload_positions(value);
                                }
                            },
                            option { value: ALL_FILTER, selected: value == ALL_FILTER, "All {def.label}" }
                            {options.into_iter().map(|opt| {
                                let selected = opt.value == value;
                                rsx!( option { value: "{opt.value}", selected: selected, "{opt.label}" } )
                            })}
                        }
                    )
                })}
                if selected_count > 0 {
                    button { style: DANGER, onclick: on_bulk_delete, "Delete selected ({selected_count})" }
                }
                if descriptor.exportable {
                    button { style: BUTTON, disabled: loading, onclick: on_export, "Export CSV" }
                }
            }

            table { style: TABLE,
                thead {
                    tr {
                        th { style: "{HEADER_CELL} width: 32px;",
                            span {
                                role: "checkbox",
                                "aria-checked": header_aria,
                                style: "cursor: pointer; font-size: 18px;",
                                onclick: move |_| controller.write().toggle_all_visible(),
                                "{header_mark}"
                            }
                        }
                        {descriptor.columns.iter().map(|column| {
                            let label = column.label;
                            match column.sort {
                                Some(key) => {
                                    let marker = match (sort.field == key, sort.direction) {
                                        (true, SortDirection::Asc) => " ▲",
                                        (true, SortDirection::Desc) => " ▼",
                                        (false, _) => "",
                                    };
                                    rsx!(
                                        th {
                                            style: "{HEADER_CELL} cursor: pointer;",
                                            onclick: move |_| {
                                                let ticket = controller.write().set_sort(key);
                                                fetch(ticket);
                                            },
                                            "{label}{marker}"
                                        }
                                    )
                                }
                                None => rsx!( th { style: HEADER_CELL, "{label}" } ),
                            }
                        })}
                        th { style: HEADER_CELL, "Actions" }
                    }
                }
                tbody {
                    match phase {
                        LoadPhase::Idle | LoadPhase::Loading => rsx! {
                            tr { td { style: "{CELL} color: #777;", colspan: "{column_count}", "Loading…" } }
                        },
                        LoadPhase::Empty => rsx! {
                            tr { td { style: "{CELL} color: #777;", colspan: "{column_count}", "{descriptor.empty_message}" } }
                        },
                        LoadPhase::Ready => rsx! {
                            {rows.into_iter().map(|(row, checked)| {
                                let toggle_id = row.id.clone();
                                let edit_id = row.id.clone();
                                let delete_id = row.id.clone();
                                rsx!(
                                    tr { key: "{row.id}",
                                        td { style: CELL,
                                            input {
                                                r#type: "checkbox",
                                                checked: checked,
                                                onchange: move |_| on_row_action(RowAction::Toggle(toggle_id.clone())),
                                            }
                                        }
                                        {row.cells.into_iter().map(|cell| rsx!( td { style: CELL, "{cell}" } ))}
                                        td { style: "{CELL} white-space: nowrap;",
                                            if descriptor.editable {
                                                button {
                                                    style: "{BUTTON} margin-right: 6px;",
                                                    onclick: move |_| on_row_action(RowAction::Edit(edit_id.clone())),
                                                    "Edit"
                                                }
                                            }
                                            button {
                                                style: DANGER,
                                                onclick: move |_| on_row_action(RowAction::Delete(delete_id.clone())),
                                                "Delete"
                                            }
                                        }
                                    }
                                )
                            })}
                        },
                    }
                }
            }

            PaginationBar {
                total_pages,
                current: current_page,
                window,
                on_page: move |page| {
                    if let Some(ticket) = controller.write().set_page(page) {
                        fetch(ticket);
                    }
                },
            }
        }
    }
}
