use thiserror::Error;

use crate::domain::entities::admin::AdminRecord;
use crate::domain::entities::election::{
    CandidateInput, CandidateRow, ElectionId, ElectionRow, ElectionResults, LookupOption,
    NewElection, NewPosition, PositionRow, VotingCodeRow,
};
use crate::domain::entities::list::{ListQuery, PageSlice};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepoError {
    #[error("{0}")]
    Message(String),
    #[error("{0} not found")]
    NotFound(String),
    #[error("{0}")]
    Invalid(String),
}

impl RepoError {
    pub fn from_anyhow(err: anyhow::Error) -> Self {
        RepoError::Message(format!("{err:#}"))
    }
}

pub trait ElectionRepository: Send + Sync {
    fn init(&self) -> Result<(), RepoError>;

    fn list_elections(&self, query: &ListQuery) -> Result<PageSlice<ElectionRow>, RepoError>;
    fn list_positions(&self, query: &ListQuery) -> Result<PageSlice<PositionRow>, RepoError>;
    fn list_candidates(&self, query: &ListQuery) -> Result<PageSlice<CandidateRow>, RepoError>;
    fn list_voting_codes(&self, query: &ListQuery) -> Result<PageSlice<VotingCodeRow>, RepoError>;

    fn election_options(&self) -> Result<Vec<LookupOption>, RepoError>;
    fn position_options(&self, election_id: ElectionId) -> Result<Vec<LookupOption>, RepoError>;

    fn create_election(&self, election: NewElection) -> Result<ElectionId, RepoError>;
    fn delete_election(&self, id: i64) -> Result<(), RepoError>;
    fn create_position(&self, position: NewPosition) -> Result<i64, RepoError>;
    fn delete_position(&self, id: i64) -> Result<(), RepoError>;
    fn add_candidate(&self, candidate: CandidateInput) -> Result<i64, RepoError>;
    fn get_candidate(&self, id: i64) -> Result<CandidateRow, RepoError>;
    fn update_candidate(&self, id: i64, candidate: CandidateInput) -> Result<(), RepoError>;
    fn delete_candidate(&self, id: i64) -> Result<(), RepoError>;
    fn insert_voting_codes(
        &self,
        election_id: ElectionId,
        codes: &[String],
    ) -> Result<usize, RepoError>;
    fn delete_voting_code(&self, id: i64) -> Result<(), RepoError>;

    fn cast_ballot(&self, code: &str, candidate_ids: &[i64]) -> Result<(), RepoError>;
    fn election_results(&self, election_id: ElectionId) -> Result<ElectionResults, RepoError>;

    fn find_admin(&self, username: &str) -> Result<Option<AdminRecord>, RepoError>;
    fn count_admins(&self) -> Result<i64, RepoError>;
    fn insert_admin(&self, username: &str, password_hash: &str, salt: &str)
        -> Result<i64, RepoError>;
    fn update_admin_password(
        &self,
        admin_id: i64,
        password_hash: &str,
        salt: &str,
    ) -> Result<(), RepoError>;
}
