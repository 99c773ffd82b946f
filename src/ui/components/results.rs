use dioxus::prelude::*;

use crate::domain::entities::election::{ElectionResults, LookupOption};
use crate::ui::client;
use crate::ui::state::app_state::AppState;
use crate::ui::state::notifications::Severity;

const INPUT: &str = "border: 1px solid #bbb; padding: 5px 8px; border-radius: 6px;";
const CARD: &str = "border: 1px solid #e0e0e0; border-radius: 8px; padding: 12px 16px; margin-bottom: 12px; background: #fff;";

#[component]
pub fn ResultsDashboard() -> Element {
    let app = use_context::<AppState>();
    let mut elections = use_signal(Vec::<LookupOption>::new);
    let mut selected = use_signal(String::new);
    let mut results = use_signal(|| None::<ElectionResults>);
    let mut loading = use_signal(|| false);

    let load = move |election: String| {
        spawn(async move {
            if election.is_empty() {
                results.set(None);
                return;
            }
            loading.set(true);
            match client::load_results(app.endpoint(), election).await {
                Ok(loaded) => results.set(Some(loaded)),
                Err(err) => {
                    results.set(None);
                    app.notify(err.notice_message("Could not load results."), Severity::Error);
                }
            }
            loading.set(false);
        });
    };

    use_hook(move || {
        spawn(async move {
            match client::election_options(app.endpoint()).await {
                Ok(options) => {
                    let first = options.first().map(|opt| opt.value.clone());
                    elections.set(options);
                    if let Some(first) = first {
                        selected.set(first.clone());
                        load(first);
                    }
                }
                Err(err) => {
                    app.notify(err.notice_message("Could not load elections."), Severity::Error);
                }
            }
        });
    });

    rsx! {
        div {
            h2 { style: "margin: 0 0 8px 0;", "Results" }
            div { style: "display: flex; gap: 12px; align-items: center; margin: 12px 0;",
                select {
                    style: INPUT,
                    "aria-label": "Election",
                    onchange: move |event| {
                        let value = event.value();
                        selected.set(value.clone());
                        load(value);
                    },
                    option { value: "", "Select election" }
                    {elections().into_iter().map(|opt| {
                        let is_selected = opt.value == selected();
                        rsx!( option { value: "{opt.value}", selected: is_selected, "{opt.label}" } )
                    })}
                }
                if loading() {
                    span { style: "color: #777;", "Loading…" }
                }
            }

            if let Some(loaded) = results() {
                ResultsSummary { results: loaded }
            } else if !loading() {
                p { style: "color: #777;", "Select an election to see its results." }
            }
        }
    }
}

#[component]
fn ResultsSummary(results: ElectionResults) -> Element {
    let turnout = results.turnout_percent();

    rsx! {
        div { style: CARD,
            h3 { style: "margin: 0 0 6px 0;", "{results.title}" }
            p { style: "margin: 0;",
                "Turnout: {results.codes_used} of {results.codes_issued} codes used ({turnout:.1}%)"
            }
        }
        if results.positions.is_empty() {
            p { style: "color: #777;", "This election has no positions yet." }
        }
        {results.positions.iter().map(|position| rsx!(
            div { key: "{position.position_id}", style: CARD,
                h4 { style: "margin: 0 0 8px 0;", "{position.name} ({position.total_votes} votes)" }
                if position.candidates.is_empty() {
                    p { style: "color: #777; margin: 0;", "No candidates." }
                }
                {position.candidates.iter().map(|candidate| {
                    let width = candidate.share_percent.clamp(0.0, 100.0);
                    rsx!(
                        div { key: "{candidate.candidate_id}", style: "margin-bottom: 8px;",
                            div { style: "display: flex; justify-content: space-between;",
                                span { "{candidate.name}" }
                                span { "{candidate.votes} ({candidate.share_percent:.1}%)" }
                            }
                            div { style: "background: #eee; border-radius: 4px; height: 10px;",
                                div { style: "background: #1565c0; border-radius: 4px; height: 10px; width: {width}%;" }
                            }
                        }
                    )
                })}
            }
        ))}
    }
}
