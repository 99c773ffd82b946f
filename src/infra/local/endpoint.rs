use std::sync::Arc;

use serde::Serialize;
use serde_json::{json, Map, Value};
use tracing::{debug, error, warn};

use crate::domain::entities::election::ElectionId;
use crate::domain::entities::kind::{EntityKind, LOOKUPS_ENDPOINT, RESULTS_ENDPOINT};
use crate::domain::entities::list::{ListQuery, PageSlice, SortSpec};
use crate::domain::wire::form_value;
use crate::usecase::ports::endpoint::{AdminEndpoint, Download, TransportError};
use crate::usecase::ports::repo::{ElectionRepository, RepoError};
use crate::usecase::services::edit_service::{
    CandidateForm, EditError, EditService, ElectionForm, PositionForm,
};
use crate::usecase::services::export_service::{
    ExportService, CANDIDATES_EXPORT_NAME, VOTING_CODES_EXPORT_NAME,
};
use crate::usecase::services::query_service::QueryService;

/// In-process implementation of the admin endpoints.
///
/// Requests and responses go through the same form/JSON shapes a remote
/// endpoint would use, so the screens never see service types directly.
pub struct LocalEndpoint {
    query: QueryService,
    edit: EditService,
    export: ExportService,
}

/// Decodes the list part of a form: `page`, `search`, entity filters and `sort`.
pub fn decode_list_query(kind: EntityKind, form: &[(String, String)]) -> ListQuery {
    let mut query = ListQuery::new(kind.page_size());
    query.page = form_value(form, "page")
        .and_then(|page| page.trim().parse::<i64>().ok())
        .unwrap_or(1)
        .max(1);
    query.search = form_value(form, "search").unwrap_or_default().to_string();
    for name in kind.filters() {
        if let Some(value) = form_value(form, name) {
            query.filters.insert((*name).to_string(), value.to_string());
        }
    }
    query.sort = form_value(form, "sort").and_then(SortSpec::parse_param);
    query
}

fn failure(message: impl Into<String>) -> Value {
    json!({ "success": false, "message": message.into() })
}

fn success(message: impl Into<String>) -> Value {
    json!({ "success": true, "message": message.into() })
}

fn repo_failure(err: &RepoError, fallback: &str) -> Value {
    match err {
        RepoError::Message(detail) => {
            error!(%detail, "{fallback}");
            failure(fallback)
        }
        RepoError::NotFound(what) => failure(format!("The {what} no longer exists.")),
        RepoError::Invalid(reason) => failure(reason.clone()),
    }
}

fn edit_failure(err: &EditError, fallback: &str) -> Value {
    match err {
        EditError::Field(field) => json!({
            "success": false,
            "field": field.field,
            "message": field.message,
        }),
        EditError::Repo(err) => repo_failure(err, fallback),
    }
}

fn list_body<R: Serialize>(
    kind: EntityKind,
    query: &ListQuery,
    slice: Result<PageSlice<R>, RepoError>,
) -> Value {
    let slice = match slice {
        Ok(slice) => slice,
        Err(err) => return repo_failure(&err, &format!("Could not load {}.", kind.noun(2))),
    };
    let total_pages = slice.total_pages(query.page_size);
    let rows = match serde_json::to_value(&slice.rows) {
        Ok(rows) => rows,
        Err(err) => {
            error!(%err, "failed to encode rows");
            return failure(format!("Could not load {}.", kind.noun(2)));
        }
    };

    let mut body = Map::new();
    body.insert("success".to_string(), Value::Bool(true));
    body.insert(kind.rows_key().to_string(), rows);
    body.insert("total_pages".to_string(), json!(total_pages));
    body.insert("total_items".to_string(), json!(slice.total_items));
    Value::Object(body)
}

fn parse_id(form: &[(String, String)], key: &str) -> Option<i64> {
    form_value(form, key).and_then(|value| value.trim().parse().ok())
}

fn field(form: &[(String, String)], key: &str) -> String {
    form_value(form, key).unwrap_or_default().to_string()
}

impl LocalEndpoint {
    pub fn new(repo: Arc<dyn ElectionRepository>) -> Self {
        Self {
            query: QueryService::new(repo.clone()),
            edit: EditService::new(repo.clone()),
            export: ExportService::new(repo),
        }
    }

    fn handle_list(&self, kind: EntityKind, action: &str, form: &[(String, String)]) -> Value {
        match (kind, action) {
            (_, "fetch") => {
                let query = decode_list_query(kind, form);
                match kind {
                    EntityKind::Elections => list_body(kind, &query, self.query.elections(&query)),
                    EntityKind::Positions => list_body(kind, &query, self.query.positions(&query)),
                    EntityKind::Candidates => {
                        list_body(kind, &query, self.query.candidates(&query))
                    }
                    EntityKind::VotingCodes => {
                        list_body(kind, &query, self.query.voting_codes(&query))
                    }
                }
            }
            (_, "delete") => self.handle_delete(kind, form),
            (EntityKind::Elections, "create") => {
                let election = ElectionForm {
                    title: field(form, "title"),
                    description: field(form, "description"),
                    starts_at: field(form, "starts_at"),
                    ends_at: field(form, "ends_at"),
                };
                match self.edit.create_election(&election) {
                    Ok(_) => success("Election created."),
                    Err(err) => edit_failure(&err, "Could not create the election."),
                }
            }
            (EntityKind::Positions, "create") => {
                let position = PositionForm {
                    election_id: field(form, "election"),
                    name: field(form, "name"),
                    max_votes: field(form, "max_votes"),
                };
                match self.edit.create_position(&position) {
                    Ok(_) => success("Position created."),
                    Err(err) => edit_failure(&err, "Could not create the position."),
                }
            }
            (EntityKind::Candidates, "add") => {
                match self.edit.add_candidate(&candidate_form(form)) {
                    Ok(_) => success("Candidate added."),
                    Err(err) => edit_failure(&err, "Could not add the candidate."),
                }
            }
            (EntityKind::Candidates, "get") => {
                let Some(id) = parse_id(form, "id") else {
                    return failure("Missing candidate id.");
                };
                match self.query.candidate(id) {
                    Ok(candidate) => json!({ "success": true, "candidate": candidate }),
                    Err(err) => repo_failure(&err, "Could not load the candidate."),
                }
            }
            (EntityKind::Candidates, "update") => {
                let Some(id) = parse_id(form, "id") else {
                    return failure("Missing candidate id.");
                };
                match self.edit.update_candidate(id, &candidate_form(form)) {
                    Ok(()) => success("Candidate updated."),
                    Err(err) => edit_failure(&err, "Could not update the candidate."),
                }
            }
            (EntityKind::VotingCodes, "create") => {
                match self
                    .edit
                    .generate_voting_codes(&field(form, "election"), &field(form, "count"))
                {
                    Ok(created) => success(format!("Generated {created} voting codes.")),
                    Err(err) => edit_failure(&err, "Could not generate voting codes."),
                }
            }
            _ => failure("Unknown action"),
        }
    }

    fn handle_delete(&self, kind: EntityKind, form: &[(String, String)]) -> Value {
        let Some(id) = parse_id(form, "id") else {
            return failure(format!("Missing {} id.", kind.noun(1)));
        };
        let result = match kind {
            EntityKind::Elections => self.edit.delete_election(id),
            EntityKind::Positions => self.edit.delete_position(id),
            EntityKind::Candidates => self.edit.delete_candidate(id),
            EntityKind::VotingCodes => self.edit.delete_voting_code(id),
        };
        match result {
            Ok(()) => success(format!("Deleted {}.", kind.noun(1))),
            Err(err) => repo_failure(&err, &format!("Could not delete the {}.", kind.noun(1))),
        }
    }

    fn handle_lookup(&self, action: &str, form: &[(String, String)]) -> Value {
        let options = match action {
            "elections" => self.query.election_options(),
            "positions" => match parse_id(form, "election") {
                Some(id) => self.query.position_options(ElectionId(id)),
                None => Ok(Vec::new()),
            },
            _ => return failure("Unknown action"),
        };
        match options {
            Ok(options) => json!({ "success": true, "options": options }),
            Err(err) => repo_failure(&err, "Could not load options."),
        }
    }

    fn handle_results(&self, action: &str, form: &[(String, String)]) -> Value {
        if action != "fetch" {
            return failure("Unknown action");
        }
        let Some(id) = parse_id(form, "election") else {
            return failure("Select an election.");
        };
        match self.query.results(ElectionId(id)) {
            Ok(results) => json!({ "success": true, "results": results }),
            Err(err) => repo_failure(&err, "Could not load results."),
        }
    }
}

fn candidate_form(form: &[(String, String)]) -> CandidateForm {
    CandidateForm {
        position_id: field(form, "position"),
        name: field(form, "name"),
        party: field(form, "party"),
    }
}

impl AdminEndpoint for LocalEndpoint {
    fn post(&self, endpoint: &str, form: &[(String, String)]) -> Result<String, TransportError> {
        let action = form_value(form, "action").unwrap_or_default();
        debug!(endpoint, action, "handling request");
        let body = if endpoint == LOOKUPS_ENDPOINT {
            self.handle_lookup(action, form)
        } else if endpoint == RESULTS_ENDPOINT {
            self.handle_results(action, form)
        } else {
            let kind = EntityKind::from_endpoint(endpoint)
                .ok_or_else(|| TransportError::UnknownEndpoint(endpoint.to_string()))?;
            self.handle_list(kind, action, form)
        };
        serde_json::to_string(&body).map_err(|err| TransportError::Request(err.to_string()))
    }

    fn download(
        &self,
        endpoint: &str,
        form: &[(String, String)],
    ) -> Result<Download, TransportError> {
        let kind = EntityKind::from_endpoint(endpoint)
            .ok_or_else(|| TransportError::UnknownEndpoint(endpoint.to_string()))?;
        if form_value(form, "action") != Some("export") {
            return Err(TransportError::Request("Unknown action".to_string()));
        }

        let query = decode_list_query(kind, form);
        let (file_name, bytes) = match kind {
            EntityKind::Candidates => (CANDIDATES_EXPORT_NAME, self.export.candidates_csv(&query)),
            EntityKind::VotingCodes => {
                (VOTING_CODES_EXPORT_NAME, self.export.voting_codes_csv(&query))
            }
            _ => {
                return Err(TransportError::Request(format!(
                    "{} cannot be exported",
                    kind.noun(2)
                )))
            }
        };
        let bytes = bytes.map_err(|err| {
            warn!(%err, endpoint, "export failed");
            TransportError::Request(err.to_string())
        })?;
        Ok(Download {
            file_name: file_name.to_string(),
            bytes,
        })
    }
}
