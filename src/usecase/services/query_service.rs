use std::sync::Arc;

use crate::domain::entities::election::{
    CandidateRow, ElectionId, ElectionResults, ElectionRow, LookupOption, PositionRow,
    VotingCodeRow,
};
use crate::domain::entities::list::{ListQuery, PageSlice};
use crate::usecase::ports::repo::{ElectionRepository, RepoError};

pub struct QueryService {
    repo: Arc<dyn ElectionRepository>,
}

impl QueryService {
    pub fn new(repo: Arc<dyn ElectionRepository>) -> Self {
        Self { repo }
    }

    pub fn elections(&self, query: &ListQuery) -> Result<PageSlice<ElectionRow>, RepoError> {
        self.repo.list_elections(query)
    }

    pub fn positions(&self, query: &ListQuery) -> Result<PageSlice<PositionRow>, RepoError> {
        self.repo.list_positions(query)
    }

    pub fn candidates(&self, query: &ListQuery) -> Result<PageSlice<CandidateRow>, RepoError> {
        self.repo.list_candidates(query)
    }

    pub fn voting_codes(&self, query: &ListQuery) -> Result<PageSlice<VotingCodeRow>, RepoError> {
        self.repo.list_voting_codes(query)
    }

    pub fn candidate(&self, id: i64) -> Result<CandidateRow, RepoError> {
        self.repo.get_candidate(id)
    }

    pub fn election_options(&self) -> Result<Vec<LookupOption>, RepoError> {
        self.repo.election_options()
    }

    pub fn position_options(&self, election_id: ElectionId) -> Result<Vec<LookupOption>, RepoError> {
        self.repo.position_options(election_id)
    }

    pub fn results(&self, election_id: ElectionId) -> Result<ElectionResults, RepoError> {
        self.repo.election_results(election_id)
    }
}
