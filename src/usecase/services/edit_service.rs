use std::sync::Arc;

use rand::Rng;
use thiserror::Error;
use tracing::{info, warn};

use crate::domain::entities::election::{CandidateInput, ElectionId, NewElection, NewPosition};
use crate::domain::validation::{positive_int, required, timestamp, FieldError};
use crate::usecase::ports::repo::{ElectionRepository, RepoError};

pub const MAX_CODES_PER_BATCH: i64 = 500;
pub const MAX_VOTES_PER_POSITION: i64 = 20;
pub const CODE_LENGTH: usize = 8;
/// No 0/O or 1/I so printed codes can be read back unambiguously.
const CODE_ALPHABET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";
const CODE_ATTEMPTS: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    #[error(transparent)]
    Field(#[from] FieldError),
    #[error(transparent)]
    Repo(#[from] RepoError),
}

/// Raw form input for an election, as typed by the admin.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ElectionForm {
    pub title: String,
    pub description: String,
    pub starts_at: String,
    pub ends_at: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PositionForm {
    pub election_id: String,
    pub name: String,
    pub max_votes: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CandidateForm {
    pub position_id: String,
    pub name: String,
    pub party: String,
}

pub fn validate_election(form: &ElectionForm) -> Result<NewElection, FieldError> {
    let title = required("title", &form.title)?;
    let starts_at = timestamp("starts_at", &form.starts_at)?;
    let ends_at = timestamp("ends_at", &form.ends_at)?;
    if ends_at <= starts_at {
        return Err(FieldError::new(
            "ends_at",
            "The election must end after it starts.",
        ));
    }
    Ok(NewElection {
        title,
        description: form.description.trim().to_string(),
        starts_at,
        ends_at,
    })
}

pub fn validate_position(form: &PositionForm) -> Result<NewPosition, FieldError> {
    let election_id = parse_id("election_id", &form.election_id)?;
    let name = required("name", &form.name)?;
    let max_votes = positive_int("max_votes", &form.max_votes, MAX_VOTES_PER_POSITION)?;
    Ok(NewPosition {
        election_id: ElectionId(election_id),
        name,
        max_votes,
    })
}

pub fn validate_candidate(form: &CandidateForm) -> Result<CandidateInput, FieldError> {
    let position_id = parse_id("position_id", &form.position_id)?;
    let name = required("name", &form.name)?;
    Ok(CandidateInput {
        position_id,
        name,
        party: form.party.trim().to_string(),
    })
}

fn parse_id(field: &'static str, value: &str) -> Result<i64, FieldError> {
    required(field, value)?
        .parse::<i64>()
        .map_err(|_| FieldError::new(field, "Select an option."))
}

pub fn generate_code(rng: &mut impl Rng) -> String {
    (0..CODE_LENGTH)
        .map(|_| CODE_ALPHABET[rng.gen_range(0..CODE_ALPHABET.len())] as char)
        .collect()
}

pub struct EditService {
    repo: Arc<dyn ElectionRepository>,
}

impl EditService {
    pub fn new(repo: Arc<dyn ElectionRepository>) -> Self {
        Self { repo }
    }

    pub fn create_election(&self, form: &ElectionForm) -> Result<ElectionId, EditError> {
        let election = validate_election(form)?;
        let id = self.repo.create_election(election)?;
        info!(election_id = id.0, "election created");
        Ok(id)
    }

    pub fn delete_election(&self, id: i64) -> Result<(), RepoError> {
        self.repo.delete_election(id)?;
        info!(election_id = id, "election deleted");
        Ok(())
    }

    pub fn create_position(&self, form: &PositionForm) -> Result<i64, EditError> {
        let position = validate_position(form)?;
        let id = self.repo.create_position(position)?;
        info!(position_id = id, "position created");
        Ok(id)
    }

    pub fn delete_position(&self, id: i64) -> Result<(), RepoError> {
        self.repo.delete_position(id)?;
        info!(position_id = id, "position deleted");
        Ok(())
    }

    pub fn add_candidate(&self, form: &CandidateForm) -> Result<i64, EditError> {
        let candidate = validate_candidate(form)?;
        let id = self.repo.add_candidate(candidate)?;
        info!(candidate_id = id, "candidate added");
        Ok(id)
    }

    pub fn update_candidate(&self, id: i64, form: &CandidateForm) -> Result<(), EditError> {
        let candidate = validate_candidate(form)?;
        self.repo.update_candidate(id, candidate)?;
        info!(candidate_id = id, "candidate updated");
        Ok(())
    }

    pub fn delete_candidate(&self, id: i64) -> Result<(), RepoError> {
        self.repo.delete_candidate(id)?;
        info!(candidate_id = id, "candidate deleted");
        Ok(())
    }

    /// Generates `count` fresh codes, retrying the shortfall when a random code collides.
    pub fn generate_voting_codes(
        &self,
        election_id: &str,
        count: &str,
    ) -> Result<usize, EditError> {
        let election_id = ElectionId(parse_id("election_id", election_id)?);
        let count = positive_int("count", count, MAX_CODES_PER_BATCH)? as usize;

        let mut rng = rand::thread_rng();
        let mut created = 0;
        for _ in 0..CODE_ATTEMPTS {
            if created == count {
                break;
            }
            let batch = (0..count - created)
                .map(|_| generate_code(&mut rng))
                .collect::<Vec<_>>();
            created += self.repo.insert_voting_codes(election_id, &batch)?;
        }

        if created < count {
            warn!(created, requested = count, "voting code generation fell short");
        }
        info!(election_id = election_id.0, created, "voting codes generated");
        Ok(created)
    }

    pub fn delete_voting_code(&self, id: i64) -> Result<(), RepoError> {
        self.repo.delete_voting_code(id)?;
        info!(voting_code_id = id, "voting code deleted");
        Ok(())
    }

    pub fn cast_ballot(&self, code: &str, candidate_ids: &[i64]) -> Result<(), RepoError> {
        self.repo.cast_ballot(code.trim(), candidate_ids)
    }
}
