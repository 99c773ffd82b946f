use tracing::{info, warn};

use crate::domain::entities::kind::EntityKind;
use crate::domain::wire::{pair, parse_mutation_response, FetchError};
use crate::ui::state::notifications::Severity;
use crate::usecase::ports::endpoint::AdminEndpoint;

/// Outcome of deleting a batch of rows one request at a time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BulkReport {
    pub requested: usize,
    pub deleted: usize,
    /// `(id, reason)` for every row the endpoint refused or never answered for.
    pub failed: Vec<(String, String)>,
}

impl BulkReport {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }

    pub fn notice(&self, kind: EntityKind) -> (String, Severity) {
        if self.is_complete() {
            return (
                format!("Deleted {} {}.", self.deleted, kind.noun(self.deleted)),
                Severity::Success,
            );
        }
        if self.deleted == 0 {
            let reason = self
                .failed
                .first()
                .map(|(_, reason)| reason.as_str())
                .unwrap_or("Delete failed.");
            return (
                format!(
                    "Could not delete the selected {}: {reason}",
                    kind.noun(self.requested)
                ),
                Severity::Error,
            );
        }
        (
            format!(
                "Deleted {} of {} {}; {} failed.",
                self.deleted,
                self.requested,
                kind.noun(self.requested),
                self.failed.len()
            ),
            Severity::Warning,
        )
    }
}

/// Confirmation text for a bulk delete, or `None` when nothing is selected.
pub fn bulk_delete_prompt(kind: EntityKind, count: usize) -> Option<String> {
    if count == 0 {
        return None;
    }
    Some(format!(
        "Delete {count} selected {}? This cannot be undone.",
        kind.noun(count)
    ))
}

pub fn dispatch_bulk_delete(
    endpoint: &dyn AdminEndpoint,
    kind: EntityKind,
    ids: &[String],
) -> BulkReport {
    let mut report = BulkReport {
        requested: ids.len(),
        ..BulkReport::default()
    };
    for id in ids {
        let form = vec![pair("action", "delete"), pair("id", id.clone())];
        let outcome = endpoint
            .post(kind.endpoint(), &form)
            .map_err(|err| FetchError::Transport(err.to_string()))
            .and_then(|body| parse_mutation_response(&body));
        match outcome {
            Ok(_) => report.deleted += 1,
            Err(err) => {
                warn!(%err, id = %id, endpoint = kind.endpoint(), "bulk delete item failed");
                report
                    .failed
                    .push((id.clone(), err.notice_message("Delete failed.")));
            }
        }
    }
    info!(
        endpoint = kind.endpoint(),
        requested = report.requested,
        deleted = report.deleted,
        "bulk delete finished"
    );
    report
}
