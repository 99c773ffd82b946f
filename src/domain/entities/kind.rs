/// The admin list screens, each backed by its own list endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Elections,
    Positions,
    Candidates,
    VotingCodes,
}

pub const LOOKUPS_ENDPOINT: &str = "lookups_ajax";
pub const RESULTS_ENDPOINT: &str = "results_ajax";

impl EntityKind {
    pub const ALL: [EntityKind; 4] = [
        EntityKind::Elections,
        EntityKind::Positions,
        EntityKind::Candidates,
        EntityKind::VotingCodes,
    ];

    pub fn endpoint(self) -> &'static str {
        match self {
            EntityKind::Elections => "elections_ajax",
            EntityKind::Positions => "positions_ajax",
            EntityKind::Candidates => "candidates_ajax",
            EntityKind::VotingCodes => "voting_codes_ajax",
        }
    }

    pub fn from_endpoint(endpoint: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.endpoint() == endpoint)
    }

    /// Key of the row array in a list response.
    pub fn rows_key(self) -> &'static str {
        match self {
            EntityKind::Elections => "elections",
            EntityKind::Positions => "positions",
            EntityKind::Candidates => "candidates",
            EntityKind::VotingCodes => "codes",
        }
    }

    pub fn page_size(self) -> i64 {
        match self {
            EntityKind::VotingCodes => 20,
            _ => 10,
        }
    }

    pub fn filters(self) -> &'static [&'static str] {
        match self {
            EntityKind::Elections => &["status"],
            EntityKind::Positions => &["election"],
            EntityKind::Candidates => &["election", "position"],
            EntityKind::VotingCodes => &["election", "status"],
        }
    }

    pub fn noun(self, count: usize) -> &'static str {
        match (self, count == 1) {
            (EntityKind::Elections, true) => "election",
            (EntityKind::Elections, false) => "elections",
            (EntityKind::Positions, true) => "position",
            (EntityKind::Positions, false) => "positions",
            (EntityKind::Candidates, true) => "candidate",
            (EntityKind::Candidates, false) => "candidates",
            (EntityKind::VotingCodes, true) => "voting code",
            (EntityKind::VotingCodes, false) => "voting codes",
        }
    }
}
