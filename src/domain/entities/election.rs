use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElectionId(pub i64);

impl From<i64> for ElectionId {
    fn from(value: i64) -> Self {
        ElectionId(value)
    }
}

impl From<ElectionId> for i64 {
    fn from(value: ElectionId) -> Self {
        value.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElectionStatus {
    Upcoming,
    Active,
    Closed,
}

impl ElectionStatus {
    /// Timestamps are `YYYY-MM-DD HH:MM`, so text order is time order.
    pub fn at(now: &str, starts_at: &str, ends_at: &str) -> Self {
        if now < starts_at {
            ElectionStatus::Upcoming
        } else if now <= ends_at {
            ElectionStatus::Active
        } else {
            ElectionStatus::Closed
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ElectionStatus::Upcoming => "upcoming",
            ElectionStatus::Active => "active",
            ElectionStatus::Closed => "closed",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElectionRow {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub starts_at: String,
    pub ends_at: String,
    pub status: String,
    pub position_count: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionRow {
    pub id: i64,
    pub election_id: i64,
    pub election_title: String,
    pub name: String,
    pub max_votes: i64,
    pub candidate_count: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateRow {
    pub id: i64,
    pub name: String,
    pub party: String,
    pub election_id: i64,
    pub election_title: String,
    pub position_id: i64,
    pub position_name: String,
    pub votes: i64,
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VotingCodeRow {
    pub id: i64,
    pub code: String,
    pub election_id: i64,
    pub election_title: String,
    pub used: bool,
    pub used_at: Option<String>,
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewElection {
    pub title: String,
    pub description: String,
    pub starts_at: String,
    pub ends_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPosition {
    pub election_id: ElectionId,
    pub name: String,
    pub max_votes: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateInput {
    pub position_id: i64,
    pub name: String,
    pub party: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupOption {
    pub value: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateTally {
    pub candidate_id: i64,
    pub name: String,
    pub party: String,
    pub votes: i64,
    pub share_percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionResult {
    pub position_id: i64,
    pub name: String,
    pub total_votes: i64,
    pub candidates: Vec<CandidateTally>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElectionResults {
    pub election_id: i64,
    pub title: String,
    pub codes_issued: i64,
    pub codes_used: i64,
    pub positions: Vec<PositionResult>,
}

impl ElectionResults {
    pub fn turnout_percent(&self) -> f64 {
        if self.codes_issued <= 0 {
            return 0.0;
        }
        round_one_decimal(self.codes_used as f64 * 100.0 / self.codes_issued as f64)
    }
}

pub fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
