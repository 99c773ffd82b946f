use std::sync::Arc;

use crate::domain::entities::list::ListQuery;
use crate::infra::export::csv::{candidates_to_csv, voting_codes_to_csv};
use crate::usecase::ports::repo::{ElectionRepository, RepoError};

pub const CANDIDATES_EXPORT_NAME: &str = "candidates.csv";
pub const VOTING_CODES_EXPORT_NAME: &str = "voting_codes.csv";

/// Exports every row matching the filters, ignoring the requested page.
pub struct ExportService {
    repo: Arc<dyn ElectionRepository>,
}

fn unpaged(query: &ListQuery) -> ListQuery {
    ListQuery {
        page: 1,
        page_size: i64::MAX,
        ..query.clone()
    }
}

impl ExportService {
    pub fn new(repo: Arc<dyn ElectionRepository>) -> Self {
        Self { repo }
    }

    pub fn candidates_csv(&self, query: &ListQuery) -> Result<Vec<u8>, RepoError> {
        let slice = self.repo.list_candidates(&unpaged(query))?;
        candidates_to_csv(&slice.rows).map_err(RepoError::from_anyhow)
    }

    pub fn voting_codes_csv(&self, query: &ListQuery) -> Result<Vec<u8>, RepoError> {
        let slice = self.repo.list_voting_codes(&unpaged(query))?;
        voting_codes_to_csv(&slice.rows).map_err(RepoError::from_anyhow)
    }
}
