use std::path::PathBuf;

use crate::domain::entities::admin::AdminRecord;
use crate::domain::entities::election::{
    CandidateInput, CandidateRow, ElectionId, ElectionResults, ElectionRow, LookupOption,
    NewElection, NewPosition, PositionRow, VotingCodeRow,
};
use crate::domain::entities::list::{ListQuery, PageSlice};
use crate::infra::sqlite::queries::{
    add_candidate, cast_ballot, count_admins, create_election, create_position, delete_candidate,
    delete_election, delete_position, delete_voting_code, election_options, election_results,
    find_admin, get_candidate, insert_admin, insert_voting_codes, list_candidates,
    list_elections, list_positions, list_voting_codes, position_options, update_admin_password,
    update_candidate, BallotOutcome, RowChange,
};
use crate::infra::sqlite::schema::init_db;
use crate::usecase::ports::repo::{ElectionRepository, RepoError};

pub struct SqliteRepo {
    pub db_path: PathBuf,
}

impl SqliteRepo {
    pub fn new(db_path: PathBuf) -> Self {
        Self { db_path }
    }
}

fn now_minutes() -> String {
    chrono::Local::now().format("%Y-%m-%d %H:%M").to_string()
}

fn expect_applied(change: RowChange, target: &str, parent: &str) -> Result<i64, RepoError> {
    match change {
        RowChange::Applied(id) => Ok(id),
        RowChange::MissingTarget => Err(RepoError::NotFound(target.to_string())),
        RowChange::MissingParent => Err(RepoError::Invalid(format!("{parent} does not exist"))),
    }
}

impl ElectionRepository for SqliteRepo {
    fn init(&self) -> Result<(), RepoError> {
        init_db(&self.db_path).map_err(RepoError::from_anyhow)
    }

    fn list_elections(&self, query: &ListQuery) -> Result<PageSlice<ElectionRow>, RepoError> {
        list_elections(&self.db_path, query, &now_minutes()).map_err(RepoError::from_anyhow)
    }

    fn list_positions(&self, query: &ListQuery) -> Result<PageSlice<PositionRow>, RepoError> {
        list_positions(&self.db_path, query).map_err(RepoError::from_anyhow)
    }

    fn list_candidates(&self, query: &ListQuery) -> Result<PageSlice<CandidateRow>, RepoError> {
        list_candidates(&self.db_path, query).map_err(RepoError::from_anyhow)
    }

    fn list_voting_codes(&self, query: &ListQuery) -> Result<PageSlice<VotingCodeRow>, RepoError> {
        list_voting_codes(&self.db_path, query).map_err(RepoError::from_anyhow)
    }

    fn election_options(&self) -> Result<Vec<LookupOption>, RepoError> {
        election_options(&self.db_path).map_err(RepoError::from_anyhow)
    }

    fn position_options(&self, election_id: ElectionId) -> Result<Vec<LookupOption>, RepoError> {
        position_options(&self.db_path, election_id.0).map_err(RepoError::from_anyhow)
    }

    fn create_election(&self, election: NewElection) -> Result<ElectionId, RepoError> {
        create_election(&self.db_path, &election)
            .map(ElectionId)
            .map_err(RepoError::from_anyhow)
    }

    fn delete_election(&self, id: i64) -> Result<(), RepoError> {
        let change = delete_election(&self.db_path, id).map_err(RepoError::from_anyhow)?;
        expect_applied(change, "election", "election").map(|_| ())
    }

    fn create_position(&self, position: NewPosition) -> Result<i64, RepoError> {
        let change = create_position(&self.db_path, &position).map_err(RepoError::from_anyhow)?;
        expect_applied(change, "position", "election")
    }

    fn delete_position(&self, id: i64) -> Result<(), RepoError> {
        let change = delete_position(&self.db_path, id).map_err(RepoError::from_anyhow)?;
        expect_applied(change, "position", "election").map(|_| ())
    }

    fn add_candidate(&self, candidate: CandidateInput) -> Result<i64, RepoError> {
        let change = add_candidate(&self.db_path, &candidate).map_err(RepoError::from_anyhow)?;
        expect_applied(change, "candidate", "position")
    }

    fn get_candidate(&self, id: i64) -> Result<CandidateRow, RepoError> {
        get_candidate(&self.db_path, id)
            .map_err(RepoError::from_anyhow)?
            .ok_or_else(|| RepoError::NotFound("candidate".to_string()))
    }

    fn update_candidate(&self, id: i64, candidate: CandidateInput) -> Result<(), RepoError> {
        let change =
            update_candidate(&self.db_path, id, &candidate).map_err(RepoError::from_anyhow)?;
        expect_applied(change, "candidate", "position").map(|_| ())
    }

    fn delete_candidate(&self, id: i64) -> Result<(), RepoError> {
        let change = delete_candidate(&self.db_path, id).map_err(RepoError::from_anyhow)?;
        expect_applied(change, "candidate", "position").map(|_| ())
    }

    fn insert_voting_codes(
        &self,
        election_id: ElectionId,
        codes: &[String],
    ) -> Result<usize, RepoError> {
        let change = insert_voting_codes(&self.db_path, election_id.0, codes)
            .map_err(RepoError::from_anyhow)?;
        expect_applied(change, "voting code", "election").map(|count| count as usize)
    }

    fn delete_voting_code(&self, id: i64) -> Result<(), RepoError> {
        let change = delete_voting_code(&self.db_path, id).map_err(RepoError::from_anyhow)?;
        expect_applied(change, "voting code", "election").map(|_| ())
    }

    fn cast_ballot(&self, code: &str, candidate_ids: &[i64]) -> Result<(), RepoError> {
        match cast_ballot(&self.db_path, code, candidate_ids).map_err(RepoError::from_anyhow)? {
            BallotOutcome::Recorded => Ok(()),
            BallotOutcome::UnknownCode => Err(RepoError::NotFound("voting code".to_string())),
            BallotOutcome::CodeAlreadyUsed => Err(RepoError::Invalid(
                "voting code has already been used".to_string(),
            )),
            BallotOutcome::InvalidSelection(reason) => Err(RepoError::Invalid(reason)),
        }
    }

    fn election_results(&self, election_id: ElectionId) -> Result<ElectionResults, RepoError> {
        election_results(&self.db_path, election_id.0)
            .map_err(RepoError::from_anyhow)?
            .ok_or_else(|| RepoError::NotFound("election".to_string()))
    }

    fn find_admin(&self, username: &str) -> Result<Option<AdminRecord>, RepoError> {
        find_admin(&self.db_path, username).map_err(RepoError::from_anyhow)
    }

    fn count_admins(&self) -> Result<i64, RepoError> {
        count_admins(&self.db_path).map_err(RepoError::from_anyhow)
    }

    fn insert_admin(
        &self,
        username: &str,
        password_hash: &str,
        salt: &str,
    ) -> Result<i64, RepoError> {
        insert_admin(&self.db_path, username, password_hash, salt).map_err(RepoError::from_anyhow)
    }

    fn update_admin_password(
        &self,
        admin_id: i64,
        password_hash: &str,
        salt: &str,
    ) -> Result<(), RepoError> {
        let change = update_admin_password(&self.db_path, admin_id, password_hash, salt)
            .map_err(RepoError::from_anyhow)?;
        expect_applied(change, "admin", "admin").map(|_| ())
    }
}
