use dioxus::prelude::*;

use crate::domain::entities::election::LookupOption;
use crate::domain::entities::kind::EntityKind;
use crate::domain::wire::{pair, FetchError, FormPairs, MutationResponse};
use crate::ui::client;
use crate::ui::state::app_state::AppState;
use crate::ui::state::notifications::Severity;

const FORM: &str = "display: flex; flex-wrap: wrap; gap: 12px; align-items: flex-end; padding: 12px; margin-bottom: 12px; border: 1px solid #e0e0e0; border-radius: 8px; background: #fafafa;";
const FIELD: &str = "display: flex; flex-direction: column; gap: 4px;";
const INPUT: &str = "border: 1px solid #bbb; padding: 5px 8px; border-radius: 6px;";
const PRIMARY: &str = "border: 1px solid #1565c0; background: #1565c0; color: #fff; padding: 6px 14px; border-radius: 6px; cursor: pointer;";
const SECONDARY: &str = "border: 1px solid #bbb; background: #fff; padding: 6px 14px; border-radius: 6px; cursor: pointer;";

/// `(field, message)` of the last rejected submit.
type FieldErrorSignal = Signal<Option<(String, String)>>;

fn error_for(errors: FieldErrorSignal, field: &str) -> Option<String> {
    errors
        .read()
        .as_ref()
        .filter(|(name, _)| name == field)
        .map(|(_, message)| message.clone())
}

/// Routes a submit result to the field, the notification stack or the caller.
fn settle(
    app: AppState,
    mut errors: FieldErrorSignal,
    outcome: Result<MutationResponse, FetchError>,
    fallback: &str,
) -> bool {
    match outcome {
        Ok(response) => {
            errors.set(None);
            app.notify(
                response.message.unwrap_or_else(|| "Saved.".to_string()),
                Severity::Success,
            );
            true
        }
        Err(FetchError::Invalid { field, message }) => {
            errors.set(Some((field, message)));
            false
        }
        Err(err) => {
            app.notify(err.notice_message(fallback), Severity::Error);
            false
        }
    }
}

async fn submit(
    app: AppState,
    kind: EntityKind,
    form: FormPairs,
) -> Result<MutationResponse, FetchError> {
    client::mutate(app.endpoint(), kind, form).await
}

#[component]
fn FieldHint(errors: FieldErrorSignal, field: &'static str) -> Element {
    match error_for(errors, field) {
        Some(message) => rsx! {
            span { style: "color: #c62828; font-size: 12px;", "{message}" }
        },
        None => rsx! {},
    }
}

#[component]
fn OptionSelect(
    label: &'static str,
    placeholder: &'static str,
    options: Vec<LookupOption>,
    value: String,
    on_change: EventHandler<String>,
) -> Element {
    rsx! {
        select {
            style: INPUT,
            "aria-label": label,
            value: "{value}",
            onchange: move |event| on_change.call(event.value()),
            option { value: "", "{placeholder}" }
            {options.iter().map(|opt| {
                let selected = opt.value == value;
                rsx!( option { value: "{opt.value}", selected: selected, "{opt.label}" } )
            })}
        }
    }
}

#[component]
pub fn ElectionCreateForm(on_saved: EventHandler<()>) -> Element {
    let app = use_context::<AppState>();
    let mut title = use_signal(String::new);
    let mut description = use_signal(String::new);
    let mut starts_at = use_signal(String::new);
    let mut ends_at = use_signal(String::new);
    let errors = use_signal(|| None::<(String, String)>);

    let on_submit = move |_| {
        let form = vec![
            pair("action", "create"),
            pair("title", title()),
            pair("description", description()),
            pair("starts_at", starts_at()),
            pair("ends_at", ends_at()),
        ];
        spawn(async move {
            let outcome = submit(app, EntityKind::Elections, form).await;
            if settle(app, errors, outcome, "Could not create the election.") {
                title.set(String::new());
                description.set(String::new());
                starts_at.set(String::new());
                ends_at.set(String::new());
                on_saved.call(());
            }
        });
    };

    rsx! {
        div { style: FORM,
            label { style: FIELD, "Title"
                input { style: INPUT, value: "{title}", oninput: move |event| title.set(event.value()) }
                FieldHint { errors, field: "title" }
            }
            label { style: FIELD, "Description"
                input { style: INPUT, value: "{description}", oninput: move |event| description.set(event.value()) }
            }
            label { style: FIELD, "Starts"
                input { style: INPUT, r#type: "datetime-local", value: "{starts_at}", oninput: move |event| starts_at.set(event.value()) }
                FieldHint { errors, field: "starts_at" }
            }
            label { style: FIELD, "Ends"
                input { style: INPUT, r#type: "datetime-local", value: "{ends_at}", oninput: move |event| ends_at.set(event.value()) }
                FieldHint { errors, field: "ends_at" }
            }
            button { style: PRIMARY, onclick: on_submit, "Create election" }
        }
    }
}

#[component]
pub fn PositionCreateForm(elections: Vec<LookupOption>, on_saved: EventHandler<()>) -> Element {
    let app = use_context::<AppState>();
    let mut election = use_signal(String::new);
    let mut name = use_signal(String::new);
    let mut max_votes = use_signal(|| "1".to_string());
    let errors = use_signal(|| None::<(String, String)>);

    let on_submit = move |_| {
        let form = vec![
            pair("action", "create"),
            pair("election", election()),
            pair("name", name()),
            pair("max_votes", max_votes()),
        ];
        spawn(async move {
            let outcome = submit(app, EntityKind::Positions, form).await;
            if settle(app, errors, outcome, "Could not create the position.") {
                name.set(String::new());
                max_votes.set("1".to_string());
                on_saved.call(());
            }
        });
    };

    rsx! {
        div { style: FORM,
            label { style: FIELD, "Election"
                OptionSelect {
                    label: "Election",
                    placeholder: "Select election",
                    options: elections,
                    value: election(),
                    on_change: move |value| election.set(value),
                }
                FieldHint { errors, field: "election_id" }
            }
            label { style: FIELD, "Position"
                input { style: INPUT, value: "{name}", oninput: move |event| name.set(event.value()) }
                FieldHint { errors, field: "name" }
            }
            label { style: FIELD, "Max votes"
                input { style: INPUT, r#type: "number", min: "1", value: "{max_votes}", oninput: move |event| max_votes.set(event.value()) }
                FieldHint { errors, field: "max_votes" }
            }
            button { style: PRIMARY, onclick: on_submit, "Add position" }
        }
    }
}

/// Add form, or edit form when `editing` holds a candidate id.
///
/// Mount it under a key derived from `editing` so a new target starts fresh.
#[component]
pub fn CandidateEditor(
    elections: Vec<LookupOption>,
    editing: Option<String>,
    on_saved: EventHandler<()>,
    on_cancel: EventHandler<()>,
) -> Element {
    let app = use_context::<AppState>();
    let mut election = use_signal(String::new);
    let mut position = use_signal(String::new);
    let mut name = use_signal(String::new);
    let mut party = use_signal(String::new);
    let mut positions = use_signal(Vec::<LookupOption>::new);
    let errors = use_signal(|| None::<(String, String)>);

    let load_positions = move |election_id: String| {
        spawn(async move {
            if election_id.is_empty() {
                positions.set(Vec::new());
                return;
            }
            match client::position_options(app.endpoint(), election_id).await {
                Ok(options) => positions.set(options),
                Err(err) => app.notify(
                    err.notice_message("Could not load positions."),
                    Severity::Error,
                ),
            }
        });
    };

    let editing_id = editing.clone();
    use_hook(move || {
        let Some(id) = editing_id else {
            return;
        };
        spawn(async move {
            match client::load_candidate(app.endpoint(), id).await {
                Ok(candidate) => {
                    election.set(candidate.election_id.to_string());
                    position.set(candidate.position_id.to_string());
                    name.set(candidate.name);
                    party.set(candidate.party);
                    load_positions(candidate.election_id.to_string());
                }
                Err(err) => {
                    app.notify(
                        err.notice_message("Could not load the candidate."),
                        Severity::Error,
                    );
                    on_cancel.call(());
                }
            }
        });
    });

    let target = editing.clone();
    let on_submit = move |_| {
        let mut form = vec![
            pair("position", position()),
            pair("name", name()),
            pair("party", party()),
        ];
        let fallback = match &target {
            Some(id) => {
                form.push(pair("action", "update"));
                form.push(pair("id", id.clone()));
                "Could not update the candidate."
            }
            None => {
                form.push(pair("action", "add"));
                "Could not add the candidate."
            }
        };
        spawn(async move {
            let outcome = submit(app, EntityKind::Candidates, form).await;
            if settle(app, errors, outcome, fallback) {
                name.set(String::new());
                party.set(String::new());
                on_saved.call(());
            }
        });
    };

    let heading = if editing.is_some() { "Edit candidate" } else { "Add candidate" };
    let submit_label = if editing.is_some() { "Save changes" } else { "Add candidate" };

    rsx! {
        div { style: FORM,
            strong { style: "width: 100%;", "{heading}" }
            label { style: FIELD, "Election"
                OptionSelect {
                    label: "Election",
                    placeholder: "Select election",
                    options: elections,
                    value: election(),
                    on_change: move |value: String| {
                        election.set(value.clone());
                        position.set(String::new());
                        load_positions(value);
                    },
                }
            }
            label { style: FIELD, "Position"
                OptionSelect {
                    label: "Position",
                    placeholder: "Select position",
                    options: positions(),
                    value: position(),
                    on_change: move |value| position.set(value),
                }
                FieldHint { errors, field: "position_id" }
            }
            label { style: FIELD, "Name"
                input { style: INPUT, value: "{name}", oninput: move |event| name.set(event.value()) }
                FieldHint { errors, field: "name" }
            }
            label { style: FIELD, "Party"
                input { style: INPUT, value: "{party}", oninput: move |event| party.set(event.value()) }
            }
            button { style: PRIMARY, onclick: on_submit, "{submit_label}" }
            if editing.is_some() {
                button { style: SECONDARY, onclick: move |_| on_cancel.call(()), "Cancel" }
            }
        }
    }
}

#[component]
pub fn GenerateCodesForm(elections: Vec<LookupOption>, on_saved: EventHandler<()>) -> Element {
    let app = use_context::<AppState>();
    let mut election = use_signal(String::new);
    let mut count = use_signal(|| "10".to_string());
    let errors = use_signal(|| None::<(String, String)>);

    let on_submit = move |_| {
        let form = vec![
            pair("action", "create"),
            pair("election", election()),
            pair("count", count()),
        ];
        spawn(async move {
            let outcome = submit(app, EntityKind::VotingCodes, form).await;
            if settle(app, errors, outcome, "Could not generate voting codes.") {
                on_saved.call(());
            }
        });
    };

    rsx! {
        div { style: FORM,
            label { style: FIELD, "Election"
                OptionSelect {
                    label: "Election",
                    placeholder: "Select election",
                    options: elections,
                    value: election(),
                    on_change: move |value| election.set(value),
                }
                FieldHint { errors, field: "election_id" }
            }
            label { style: FIELD, "How many"
                input { style: INPUT, r#type: "number", min: "1", value: "{count}", oninput: move |event| count.set(event.value()) }
                FieldHint { errors, field: "count" }
            }
            button { style: PRIMARY, onclick: on_submit, "Generate codes" }
        }
    }
}
