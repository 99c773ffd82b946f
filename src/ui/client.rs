use std::sync::Arc;

use serde::de::DeserializeOwned;

use crate::domain::entities::election::{CandidateRow, ElectionResults, LookupOption};
use crate::domain::entities::kind::{EntityKind, LOOKUPS_ENDPOINT, RESULTS_ENDPOINT};
use crate::domain::wire::{
    pair, parse_mutation_response, parse_payload, FetchError, FormPairs, ListPage,
    MutationResponse,
};
use crate::platform::desktop::blocking::run_blocking;
use crate::ui::state::bulk::{dispatch_bulk_delete, BulkReport};
use crate::ui::state::descriptors::decode_display_page;
use crate::ui::state::fetch::DisplayRow;
use crate::usecase::ports::endpoint::{AdminEndpoint, Download};

async fn post(
    endpoint: Arc<dyn AdminEndpoint>,
    name: &'static str,
    form: FormPairs,
) -> Result<String, FetchError> {
    run_blocking(move || endpoint.post(name, &form))
        .await
        .map_err(|err| FetchError::Transport(err.to_string()))?
        .map_err(|err| FetchError::Transport(err.to_string()))
}

async fn post_payload<T: DeserializeOwned>(
    endpoint: Arc<dyn AdminEndpoint>,
    name: &'static str,
    form: FormPairs,
    key: &str,
) -> Result<T, FetchError> {
    let body = post(endpoint, name, form).await?;
    parse_payload(&body, key)
}

pub async fn fetch_list(
    endpoint: Arc<dyn AdminEndpoint>,
    kind: EntityKind,
    form: FormPairs,
) -> Result<ListPage<DisplayRow>, FetchError> {
    let body = post(endpoint, kind.endpoint(), form).await?;
    decode_display_page(kind, &body)
}

pub async fn mutate(
    endpoint: Arc<dyn AdminEndpoint>,
    kind: EntityKind,
    form: FormPairs,
) -> Result<MutationResponse, FetchError> {
    let body = post(endpoint, kind.endpoint(), form).await?;
    parse_mutation_response(&body)
}

pub async fn election_options(
    endpoint: Arc<dyn AdminEndpoint>,
) -> Result<Vec<LookupOption>, FetchError> {
    post_payload(
        endpoint,
        LOOKUPS_ENDPOINT,
        vec![pair("action", "elections")],
        "options",
    )
    .await
}

pub async fn position_options(
    endpoint: Arc<dyn AdminEndpoint>,
    election: String,
) -> Result<Vec<LookupOption>, FetchError> {
    post_payload(
        endpoint,
        LOOKUPS_ENDPOINT,
        vec![pair("action", "positions"), pair("election", election)],
        "options",
    )
    .await
}

pub async fn load_candidate(
    endpoint: Arc<dyn AdminEndpoint>,
    id: String,
) -> Result<CandidateRow, FetchError> {
    post_payload(
        endpoint,
        EntityKind::Candidates.endpoint(),
        vec![pair("action", "get"), pair("id", id)],
        "candidate",
    )
    .await
}

pub async fn load_results(
    endpoint: Arc<dyn AdminEndpoint>,
    election: String,
) -> Result<ElectionResults, FetchError> {
    post_payload(
        endpoint,
        RESULTS_ENDPOINT,
        vec![pair("action", "fetch"), pair("election", election)],
        "results",
    )
    .await
}

/// Exports whatever the list currently shows, without paging.
pub async fn export(
    endpoint: Arc<dyn AdminEndpoint>,
    kind: EntityKind,
    mut form: FormPairs,
) -> Result<Download, FetchError> {
    form.push(pair("action", "export"));
    run_blocking(move || endpoint.download(kind.endpoint(), &form))
        .await
        .map_err(|err| FetchError::Transport(err.to_string()))?
        .map_err(|err| FetchError::Transport(err.to_string()))
}

pub async fn bulk_delete(
    endpoint: Arc<dyn AdminEndpoint>,
    kind: EntityKind,
    ids: Vec<String>,
) -> BulkReport {
    let requested = ids.len();
    let fallback_ids = ids.clone();
    match run_blocking(move || dispatch_bulk_delete(endpoint.as_ref(), kind, &ids)).await {
        Ok(report) => report,
        Err(err) => BulkReport {
            requested,
            deleted: 0,
            failed: fallback_ids
                .into_iter()
                .map(|id| (id, err.to_string()))
                .collect(),
        },
    }
}
