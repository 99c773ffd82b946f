use std::cell::{Cell, RefCell};
use std::collections::{BTreeSet, HashMap};
use std::fs;
use std::path::PathBuf;
use std::rc::Rc;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use pretty_assertions::assert_eq;
use rusqlite::Connection;
use serde_json::Value;

use crate::app::build_services;
use crate::config::AppConfig;
use crate::domain::entities::election::{
    CandidateInput, CandidateRow, ElectionId, ElectionStatus, NewElection, NewPosition,
};
use crate::domain::entities::kind::EntityKind;
use crate::domain::entities::list::{ListQuery, SortDirection, SortSpec};
use crate::domain::wire::{
    form_value, pair, parse_list_response, parse_mutation_response, FetchError, FormPairs,
    ListPage, GENERIC_NETWORK_ERROR,
};
use crate::infra::local::endpoint::{decode_list_query, LocalEndpoint};
use crate::infra::sqlite::queries::{delete_candidate, list_elections, RowChange};
use crate::infra::sqlite::repo::SqliteRepo;
use crate::infra::sqlite::schema::init_db;
use crate::ui::state::bulk::{bulk_delete_prompt, dispatch_bulk_delete};
use crate::ui::state::confirm::ConfirmDialog;
use crate::ui::state::debounce::Debounce;
use crate::ui::state::descriptors::{decode_display_page, descriptor};
use crate::ui::state::fetch::{DisplayRow, LoadPhase};
use crate::ui::state::list_controller::{FetchOutcome, ListController};
use crate::ui::state::list_query::ListQueryState;
use crate::ui::state::notifications::{Notifications, Severity, NOTICE_TTL};
use crate::ui::state::pagination::{build_page_items, page_numbers, PageItem};
use crate::ui::state::selection::{HeaderCheck, SelectionSet};
use crate::usecase::ports::endpoint::{AdminEndpoint, Download, TransportError};
use crate::usecase::ports::repo::{ElectionRepository, RepoError};
use crate::usecase::services::auth_service::{AuthError, AuthService, PasswordChangeForm};
use crate::usecase::services::edit_service::{
    validate_election, EditError, EditService, ElectionForm, CODE_LENGTH,
};

fn unique_test_dir(prefix: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock should be after epoch")
        .as_nanos();
    std::env::temp_dir().join(format!("evote-{prefix}-{nanos}"))
}

struct Fixture {
    temp_dir: PathBuf,
    repo: Arc<dyn ElectionRepository>,
    council: ElectionId,
    sports: ElectionId,
    president: i64,
    secretary: i64,
    captain: i64,
    alice: i64,
    bob: i64,
    carol: i64,
    dave: i64,
}

impl Fixture {
    fn db_path(&self) -> PathBuf {
        self.temp_dir.join("app.sqlite")
    }

    fn endpoint(&self) -> LocalEndpoint {
        LocalEndpoint::new(self.repo.clone())
    }

    fn cleanup(self) {
        fs::remove_dir_all(&self.temp_dir).expect("should cleanup temp dir");
    }
}

fn seed_fixture(prefix: &str) -> Fixture {
    let temp_dir = unique_test_dir(prefix);
    fs::create_dir_all(&temp_dir).expect("should create temp dir");
    let repo: Arc<dyn ElectionRepository> = Arc::new(SqliteRepo::new(temp_dir.join("app.sqlite")));
    repo.init().expect("init should succeed");

    let council = repo
        .create_election(NewElection {
            title: "Student Council".to_string(),
            description: "Yearly council vote".to_string(),
            starts_at: "2026-03-01 08:00".to_string(),
            ends_at: "2026-03-01 17:00".to_string(),
        })
        .expect("should create council election");
    let sports = repo
        .create_election(NewElection {
            title: "Sports Captain".to_string(),
            description: String::new(),
            starts_at: "2026-05-01 08:00".to_string(),
            ends_at: "2026-05-02 17:00".to_string(),
        })
        .expect("should create sports election");

    let position = |election_id: ElectionId, name: &str| {
        repo.create_position(NewPosition {
            election_id,
            name: name.to_string(),
            max_votes: 1,
        })
        .expect("should create position")
    };
    let president = position(council, "President");
    let secretary = position(council, "Secretary");
    let captain = position(sports, "Captain");

    let candidate = |position_id: i64, name: &str, party: &str| {
        repo.add_candidate(CandidateInput {
            position_id,
            name: name.to_string(),
            party: party.to_string(),
        })
        .expect("should add candidate")
    };
    let alice = candidate(president, "Alice", "Blue");
    let bob = candidate(president, "Bob", "Green");
    let carol = candidate(secretary, "Carol", "Blue");
    let dave = candidate(captain, "Dave", "");

    let council_codes = ["AAAA2222", "BBBB3333", "CCCC4444"].map(String::from);
    repo.insert_voting_codes(council, &council_codes)
        .expect("should insert council codes");
    repo.insert_voting_codes(sports, &["DDDD5555".to_string()])
        .expect("should insert sports codes");

    Fixture {
        temp_dir,
        repo,
        council,
        sports,
        president,
        secretary,
        captain,
        alice,
        bob,
        carol,
        dave,
    }
}

fn query_with(page_size: i64, filters: &[(&str, String)]) -> ListQuery {
    let mut query = ListQuery::new(page_size);
    for (name, value) in filters {
        query.filters.insert((*name).to_string(), value.clone());
    }
    query
}

fn names(rows: &[CandidateRow]) -> Vec<String> {
    rows.iter().map(|row| row.name.clone()).collect()
}

fn display_rows(ids: &[&str]) -> Vec<DisplayRow> {
    ids.iter()
        .map(|id| DisplayRow {
            id: (*id).to_string(),
            cells: vec![format!("row {id}")],
        })
        .collect()
}

fn post_json(endpoint: &LocalEndpoint, name: &str, form: &[(String, String)]) -> Value {
    let body = endpoint.post(name, form).expect("post should reach endpoint");
    serde_json::from_str(&body).expect("response should be json")
}

/// Records every request and fails deletes for the listed ids.
#[derive(Default)]
struct RecordingEndpoint {
    calls: Mutex<Vec<(String, FormPairs)>>,
    reject_ids: BTreeSet<String>,
    offline: bool,
}

impl AdminEndpoint for RecordingEndpoint {
    fn post(&self, endpoint: &str, form: &[(String, String)]) -> Result<String, TransportError> {
        self.calls
            .lock()
            .expect("calls lock should not be poisoned")
            .push((endpoint.to_string(), form.to_vec()));
        if self.offline {
            return Err(TransportError::Request("connection refused".to_string()));
        }
        let id = form_value(form, "id").unwrap_or_default();
        if self.reject_ids.contains(id) {
            return Ok(r#"{"success":false,"message":"The candidate no longer exists."}"#.to_string());
        }
        Ok(r#"{"success":true,"message":"Deleted candidate."}"#.to_string())
    }

    fn download(
        &self,
        endpoint: &str,
        _form: &[(String, String)],
    ) -> Result<Download, TransportError> {
        Err(TransportError::UnknownEndpoint(endpoint.to_string()))
    }
}

#[test]
fn init_db_creates_required_tables() {
    let temp_dir = unique_test_dir("init-db");
    fs::create_dir_all(&temp_dir).expect("should create temp dir");
    let db_path = temp_dir.join("app.sqlite");

    let result = init_db(&db_path);

    assert!(result.is_ok(), "init_db should succeed: {result:?}");

    let conn = Connection::open(&db_path).expect("should open sqlite db");
    let table_count: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name IN ('admin','election','position','candidate','voting_code','vote')",
            [],
            |row| row.get(0),
        )
        .expect("table count query should succeed");

    assert_eq!(table_count, 6, "required tables should exist");

    fs::remove_dir_all(&temp_dir).expect("should cleanup temp dir");
}

#[test]
fn init_db_is_idempotent() {
    let temp_dir = unique_test_dir("init-twice");
    fs::create_dir_all(&temp_dir).expect("should create temp dir");
    let db_path = temp_dir.join("app.sqlite");

    init_db(&db_path).expect("first init should succeed");
    init_db(&db_path).expect("second init should succeed");

    fs::remove_dir_all(&temp_dir).expect("should cleanup temp dir");
}

#[test]
fn list_candidates_filters_by_election_and_position() {
    let fixture = seed_fixture("candidates-filter");

    let by_election = fixture
        .repo
        .list_candidates(&query_with(10, &[("election", fixture.council.0.to_string())]))
        .expect("election filter should succeed");
    assert_eq!(by_election.total_items, 3);
    assert_eq!(names(&by_election.rows), vec!["Alice", "Bob", "Carol"]);

    let by_position = fixture
        .repo
        .list_candidates(&query_with(
            10,
            &[
                ("election", fixture.council.0.to_string()),
                ("position", fixture.president.to_string()),
            ],
        ))
        .expect("position filter should succeed");
    assert_eq!(names(&by_position.rows), vec!["Alice", "Bob"]);

    let everything = fixture
        .repo
        .list_candidates(&query_with(10, &[("election", "all".to_string())]))
        .expect("all filter should succeed");
    assert_eq!(everything.total_items, 4, "`all` should not filter");

    fixture.cleanup();
}

#[test]
fn list_candidates_search_is_case_insensitive_across_columns() {
    let fixture = seed_fixture("candidates-search");
    let mut query = ListQuery::new(10);
    query.search = "blue".to_string();

    let slice = fixture
        .repo
        .list_candidates(&query)
        .expect("search should succeed");

    assert_eq!(names(&slice.rows), vec!["Alice", "Carol"]);

    query.search = "captain".to_string();
    let slice = fixture
        .repo
        .list_candidates(&query)
        .expect("search by position should succeed");
    assert_eq!(names(&slice.rows), vec!["Dave"]);

    fixture.cleanup();
}

#[test]
fn list_search_treats_like_wildcards_literally() {
    let fixture = seed_fixture("candidates-wildcard");
    let mut query = ListQuery::new(10);
    query.search = "%".to_string();

    let slice = fixture
        .repo
        .list_candidates(&query)
        .expect("wildcard search should succeed");

    assert_eq!(slice.total_items, 0, "`%` should match only a literal percent");

    fixture.cleanup();
}

#[test]
fn list_candidates_sorts_and_pages() {
    let fixture = seed_fixture("candidates-sort");
    let mut query = ListQuery::new(2);
    query.sort = Some(SortSpec::new("name", SortDirection::Desc));

    let first = fixture
        .repo
        .list_candidates(&query)
        .expect("first page should succeed");
    query.page = 2;
    let second = fixture
        .repo
        .list_candidates(&query)
        .expect("second page should succeed");

    assert_eq!(names(&first.rows), vec!["Dave", "Carol"]);
    assert_eq!(names(&second.rows), vec!["Bob", "Alice"]);
    assert_eq!(second.total_items, 4);
    assert_eq!(second.total_pages(2), 2);

    fixture.cleanup();
}

#[test]
fn list_page_past_the_end_is_empty_but_keeps_total() {
    let fixture = seed_fixture("candidates-past-end");
    let mut query = ListQuery::new(10);
    query.page = 9;

    let slice = fixture
        .repo
        .list_candidates(&query)
        .expect("page past end should succeed");

    assert!(slice.rows.is_empty());
    assert_eq!(slice.total_items, 4);

    fixture.cleanup();
}

#[test]
fn list_unknown_sort_field_falls_back_to_default_order() {
    let fixture = seed_fixture("candidates-bad-sort");
    let mut query = ListQuery::new(10);
    query.sort = Some(SortSpec::new("name; DROP TABLE candidate", SortDirection::Asc));

    let slice = fixture
        .repo
        .list_candidates(&query)
        .expect("unknown sort should fall back");

    assert_eq!(names(&slice.rows), vec!["Alice", "Bob", "Carol", "Dave"]);

    fixture.cleanup();
}

#[test]
fn list_rejects_non_numeric_id_filter() {
    let fixture = seed_fixture("candidates-bad-filter");

    let result = fixture
        .repo
        .list_candidates(&query_with(10, &[("election", "abc".to_string())]));

    assert!(
        matches!(result, Err(RepoError::Message(ref message)) if message.contains("invalid election filter")),
        "bad filter should be rejected: {result:?}"
    );

    fixture.cleanup();
}

#[test]
fn list_elections_derives_status_from_now() {
    let fixture = seed_fixture("elections-status");
    let db_path = fixture.db_path();
    let now = "2026-03-01 12:00";

    let active = list_elections(&db_path, &query_with(10, &[("status", "active".to_string())]), now)
        .expect("active filter should succeed");
    let upcoming =
        list_elections(&db_path, &query_with(10, &[("status", "upcoming".to_string())]), now)
            .expect("upcoming filter should succeed");
    let closed = list_elections(&db_path, &query_with(10, &[("status", "closed".to_string())]), now)
        .expect("closed filter should succeed");

    assert_eq!(active.rows.len(), 1);
    assert_eq!(active.rows[0].title, "Student Council");
    assert_eq!(active.rows[0].status, "active");
    assert_eq!(active.rows[0].position_count, 2);
    assert_eq!(upcoming.rows.len(), 1);
    assert_eq!(upcoming.rows[0].status, "upcoming");
    assert!(closed.rows.is_empty());

    fixture.cleanup();
}

#[test]
fn election_status_compares_minute_timestamps() {
    assert_eq!(
        ElectionStatus::at("2026-01-01 07:59", "2026-01-01 08:00", "2026-01-01 17:00"),
        ElectionStatus::Upcoming
    );
    assert_eq!(
        ElectionStatus::at("2026-01-01 17:00", "2026-01-01 08:00", "2026-01-01 17:00"),
        ElectionStatus::Active
    );
    assert_eq!(
        ElectionStatus::at("2026-01-01 17:01", "2026-01-01 08:00", "2026-01-01 17:00"),
        ElectionStatus::Closed
    );
}

#[test]
fn positions_keep_creation_order_per_election() {
    let fixture = seed_fixture("positions-order");
    let mut query = query_with(10, &[("election", fixture.council.0.to_string())]);
    query.sort = Some(SortSpec::new("order", SortDirection::Asc));

    let slice = fixture
        .repo
        .list_positions(&query)
        .expect("positions should list");

    let listed = slice
        .rows
        .iter()
        .map(|row| (row.name.as_str(), row.candidate_count))
        .collect::<Vec<_>>();
    assert_eq!(listed, vec![("President", 2), ("Secretary", 1)]);

    fixture.cleanup();
}

#[test]
fn create_position_requires_existing_election() {
    let fixture = seed_fixture("positions-parent");

    let result = fixture.repo.create_position(NewPosition {
        election_id: ElectionId(9999),
        name: "Treasurer".to_string(),
        max_votes: 1,
    });

    assert_eq!(
        result,
        Err(RepoError::Invalid("election does not exist".to_string()))
    );

    fixture.cleanup();
}

#[test]
fn deleting_election_cascades_to_children() {
    let fixture = seed_fixture("cascade");

    fixture
        .repo
        .delete_election(fixture.council.0)
        .expect("delete should succeed");

    let candidates = fixture
        .repo
        .list_candidates(&ListQuery::new(10))
        .expect("candidates should list");
    let codes = fixture
        .repo
        .list_voting_codes(&ListQuery::new(20))
        .expect("codes should list");
    let positions = fixture
        .repo
        .list_positions(&ListQuery::new(10))
        .expect("positions should list");

    assert_eq!(names(&candidates.rows), vec!["Dave"]);
    assert_eq!(codes.total_items, 1);
    assert_eq!(positions.rows.len(), 1);
    assert_eq!(
        fixture.repo.delete_election(fixture.council.0),
        Err(RepoError::NotFound("election".to_string())),
        "second delete should report a missing row"
    );

    fixture.cleanup();
}

#[test]
fn update_candidate_moves_between_positions() {
    let fixture = seed_fixture("candidate-update");

    fixture
        .repo
        .update_candidate(
            fixture.bob,
            CandidateInput {
                position_id: fixture.captain,
                name: "Bob".to_string(),
                party: "Red".to_string(),
            },
        )
        .expect("update should succeed");
    let bob = fixture
        .repo
        .get_candidate(fixture.bob)
        .expect("candidate should load");

    assert_eq!(bob.position_id, fixture.captain);
    assert_eq!(bob.election_id, fixture.sports.0, "election follows the position");
    assert_eq!(bob.party, "Red");

    fixture.cleanup();
}

#[test]
fn voting_codes_filter_by_status() {
    let fixture = seed_fixture("codes-status");
    fixture
        .repo
        .cast_ballot("AAAA2222", &[fixture.alice])
        .expect("ballot should be recorded");

    let used = fixture
        .repo
        .list_voting_codes(&query_with(20, &[("status", "used".to_string())]))
        .expect("used filter should succeed");
    let unused = fixture
        .repo
        .list_voting_codes(&query_with(20, &[("status", "unused".to_string())]))
        .expect("unused filter should succeed");

    assert_eq!(used.rows.len(), 1);
    assert_eq!(used.rows[0].code, "AAAA2222");
    assert!(used.rows[0].used);
    assert!(used.rows[0].used_at.is_some());
    assert_eq!(unused.total_items, 3);

    fixture.cleanup();
}

#[test]
fn insert_voting_codes_skips_duplicates() {
    let fixture = seed_fixture("codes-duplicates");

    let inserted = fixture
        .repo
        .insert_voting_codes(
            fixture.council,
            &["AAAA2222".to_string(), "EEEE6666".to_string()],
        )
        .expect("insert should succeed");

    assert_eq!(inserted, 1);

    fixture.cleanup();
}

#[test]
fn generate_voting_codes_creates_requested_count() {
    let fixture = seed_fixture("codes-generate");
    let edit = EditService::new(fixture.repo.clone());

    let created = edit
        .generate_voting_codes(&fixture.sports.0.to_string(), "25")
        .expect("generation should succeed");

    let codes = fixture
        .repo
        .list_voting_codes(&query_with(50, &[("election", fixture.sports.0.to_string())]))
        .expect("codes should list");
    assert_eq!(created, 25);
    assert_eq!(codes.total_items, 26);
    assert!(codes.rows.iter().all(|row| row.code.len() == CODE_LENGTH
        && row.code.chars().all(|ch| !matches!(ch, '0' | 'O' | '1' | 'I'))));

    fixture.cleanup();
}

#[test]
fn generate_voting_codes_validates_count() {
    let fixture = seed_fixture("codes-count");
    let edit = EditService::new(fixture.repo.clone());

    for count in ["0", "501", "many", ""] {
        let result = edit.generate_voting_codes(&fixture.sports.0.to_string(), count);
        assert!(
            matches!(&result, Err(EditError::Field(err)) if err.field == "count"),
            "count {count:?} should be rejected: {result:?}"
        );
    }

    fixture.cleanup();
}

#[test]
fn validate_election_requires_end_after_start() {
    let form = ElectionForm {
        title: "Prefects".to_string(),
        description: String::new(),
        starts_at: "2026-06-01T09:00".to_string(),
        ends_at: "2026-06-01 09:00".to_string(),
    };

    let err = validate_election(&form).expect_err("equal times should be rejected");
    assert_eq!(err.field, "ends_at");

    let ok = validate_election(&ElectionForm {
        ends_at: "2026-06-01 10:30".to_string(),
        ..form
    })
    .expect("valid form should pass");
    assert_eq!(ok.starts_at, "2026-06-01 09:00", "`T` separator is normalised");
}

#[test]
fn cast_ballot_records_votes_once() {
    let fixture = seed_fixture("ballot");

    fixture
        .repo
        .cast_ballot("AAAA2222", &[fixture.alice, fixture.carol])
        .expect("ballot should be recorded");

    assert_eq!(
        fixture.repo.cast_ballot("AAAA2222", &[fixture.bob]),
        Err(RepoError::Invalid(
            "voting code has already been used".to_string()
        ))
    );
    assert_eq!(
        fixture.repo.cast_ballot("ZZZZ9999", &[fixture.bob]),
        Err(RepoError::NotFound("voting code".to_string()))
    );

    fixture.cleanup();
}

#[test]
fn cast_ballot_rejects_invalid_selections() {
    let fixture = seed_fixture("ballot-invalid");

    let too_many = fixture
        .repo
        .cast_ballot("BBBB3333", &[fixture.alice, fixture.bob]);
    let foreign = fixture.repo.cast_ballot("BBBB3333", &[fixture.dave]);
    let empty = fixture.repo.cast_ballot("BBBB3333", &[]);
    let repeated = fixture
        .repo
        .cast_ballot("BBBB3333", &[fixture.alice, fixture.alice]);

    for result in [too_many, foreign, empty, repeated] {
        assert!(
            matches!(result, Err(RepoError::Invalid(_))),
            "selection should be rejected: {result:?}"
        );
    }
    let unused = fixture
        .repo
        .list_voting_codes(&query_with(20, &[("status", "unused".to_string())]))
        .expect("codes should list");
    assert_eq!(unused.total_items, 4, "rejected ballots leave the code unused");

    fixture.cleanup();
}

#[test]
fn election_results_tally_votes_and_turnout() {
    let fixture = seed_fixture("results");
    fixture
        .repo
        .cast_ballot("AAAA2222", &[fixture.alice, fixture.carol])
        .expect("first ballot should be recorded");
    fixture
        .repo
        .cast_ballot("BBBB3333", &[fixture.alice])
        .expect("second ballot should be recorded");

    let results = fixture
        .repo
        .election_results(fixture.council)
        .expect("results should load");

    assert_eq!(results.codes_issued, 3);
    assert_eq!(results.codes_used, 2);
    assert_eq!(results.turnout_percent(), 66.7);
    let president = &results.positions[0];
    assert_eq!(president.position_id, fixture.president);
    assert_eq!(president.total_votes, 2);
    let tallies = president
        .candidates
        .iter()
        .map(|tally| (tally.name.as_str(), tally.votes, tally.share_percent))
        .collect::<Vec<_>>();
    assert_eq!(tallies, vec![("Alice", 2, 100.0), ("Bob", 0, 0.0)]);
    assert_eq!(results.positions[1].position_id, fixture.secretary);

    fixture.cleanup();
}

#[test]
fn endpoint_fetch_returns_rows_and_total_pages() {
    let fixture = seed_fixture("endpoint-fetch");
    let endpoint = fixture.endpoint();

    let body = post_json(
        &endpoint,
        "candidates_ajax",
        &[
            pair("action", "fetch"),
            pair("page", "1"),
            pair("search", ""),
            pair("election", "all"),
            pair("position", "all"),
            pair("sort", "votes_desc"),
        ],
    );

    assert_eq!(body["success"], Value::Bool(true));
    assert_eq!(body["candidates"].as_array().map(Vec::len), Some(4));
    assert_eq!(body["total_pages"], Value::from(1));
    assert_eq!(body["total_items"], Value::from(4));

    let codes = post_json(&endpoint, "voting_codes_ajax", &[pair("action", "fetch")]);
    assert_eq!(codes["codes"].as_array().map(Vec::len), Some(4));

    fixture.cleanup();
}

#[test]
fn endpoint_page_beyond_any_offset_is_empty() {
    let fixture = seed_fixture("endpoint-huge-page");
    let endpoint = fixture.endpoint();

    let body = post_json(
        &endpoint,
        "candidates_ajax",
        &[pair("action", "fetch"), pair("page", i64::MAX.to_string())],
    );

    assert_eq!(body["success"], Value::Bool(true));
    assert_eq!(body["candidates"].as_array().map(Vec::len), Some(0));
    assert_eq!(body["total_pages"], Value::from(1));
    assert_eq!(body["total_items"], Value::from(4));

    fixture.cleanup();
}

#[test]
fn endpoint_rejects_unknown_action_and_endpoint() {
    let fixture = seed_fixture("endpoint-unknown");
    let endpoint = fixture.endpoint();

    let body = post_json(&endpoint, "voting_codes_ajax", &[pair("action", "purge")]);
    let missing = endpoint.post("ballots_ajax", &[pair("action", "fetch")]);

    assert_eq!(
        body,
        serde_json::json!({ "success": false, "message": "Unknown action" })
    );
    assert_eq!(
        missing,
        Err(TransportError::UnknownEndpoint("ballots_ajax".to_string()))
    );

    fixture.cleanup();
}

#[test]
fn endpoint_reports_field_errors() {
    let fixture = seed_fixture("endpoint-field");
    let endpoint = fixture.endpoint();

    let body = endpoint
        .post(
            "elections_ajax",
            &[
                pair("action", "create"),
                pair("title", "  "),
                pair("starts_at", "2026-06-01 09:00"),
                pair("ends_at", "2026-06-01 10:00"),
            ],
        )
        .expect("post should reach endpoint");

    assert_eq!(
        parse_mutation_response(&body),
        Err(FetchError::Invalid {
            field: "title".to_string(),
            message: "This field is required.".to_string(),
        })
    );

    fixture.cleanup();
}

#[test]
fn endpoint_candidate_get_and_update_round_trip() {
    let fixture = seed_fixture("endpoint-candidate");
    let endpoint = fixture.endpoint();
    let id = fixture.carol.to_string();

    let updated = post_json(
        &endpoint,
        "candidates_ajax",
        &[
            pair("action", "update"),
            pair("id", id.clone()),
            pair("position", fixture.secretary.to_string()),
            pair("name", "Caroline"),
            pair("party", "Blue"),
        ],
    );
    let loaded = post_json(
        &endpoint,
        "candidates_ajax",
        &[pair("action", "get"), pair("id", id)],
    );

    assert_eq!(updated["success"], Value::Bool(true));
    assert_eq!(loaded["candidate"]["name"], Value::from("Caroline"));
    assert_eq!(loaded["candidate"]["position_name"], Value::from("Secretary"));

    fixture.cleanup();
}

#[test]
fn endpoint_lookups_follow_the_selected_election() {
    let fixture = seed_fixture("endpoint-lookups");
    let endpoint = fixture.endpoint();

    let positions = post_json(
        &endpoint,
        "lookups_ajax",
        &[
            pair("action", "positions"),
            pair("election", fixture.council.0.to_string()),
        ],
    );

    let labels = positions["options"]
        .as_array()
        .expect("options should be an array")
        .iter()
        .map(|option| option["label"].as_str().unwrap_or_default().to_string())
        .collect::<Vec<_>>();
    assert_eq!(labels, vec!["President", "Secretary"]);

    fixture.cleanup();
}

#[test]
fn endpoint_export_ignores_paging_and_keeps_filters() {
    let fixture = seed_fixture("endpoint-export");
    let endpoint = fixture.endpoint();

    let download = endpoint
        .download(
            "candidates_ajax",
            &[
                pair("action", "export"),
                pair("page", "3"),
                pair("election", fixture.council.0.to_string()),
            ],
        )
        .expect("export should succeed");

    let text = String::from_utf8(download.bytes).expect("csv should be utf-8");
    let lines = text.lines().collect::<Vec<_>>();
    assert_eq!(download.file_name, "candidates.csv");
    assert_eq!(lines[0], "Name,Party,Position,Election,Votes");
    assert_eq!(lines.len(), 4, "header plus three council candidates");

    let refused = endpoint.download("elections_ajax", &[pair("action", "export")]);
    assert!(refused.is_err(), "elections have no export");

    fixture.cleanup();
}

#[test]
fn decode_list_query_reads_form_fields() {
    let form = vec![
        pair("action", "fetch"),
        pair("page", "0"),
        pair("search", "ali"),
        pair("election", "3"),
        pair("position", "all"),
        pair("unrelated", "x"),
        pair("sort", "created_desc"),
    ];

    let query = decode_list_query(EntityKind::Candidates, &form);

    assert_eq!(query.page, 1, "page is clamped to at least 1");
    assert_eq!(query.page_size, 10);
    assert_eq!(query.search, "ali");
    assert_eq!(query.filter("election"), Some("3"));
    assert_eq!(query.filter("position"), None);
    assert!(!query.filters.contains_key("unrelated"));
    assert_eq!(
        query.sort,
        Some(SortSpec::new("created", SortDirection::Desc))
    );
}

#[test]
fn sort_param_splits_direction_from_the_end() {
    assert_eq!(
        SortSpec::parse_param("max_votes_desc"),
        Some(SortSpec::new("max_votes", SortDirection::Desc))
    );
    assert_eq!(SortSpec::parse_param("name"), None);
    assert_eq!(SortSpec::parse_param("name_sideways"), None);
    assert_eq!(
        SortSpec::new("used", SortDirection::Asc).to_param(),
        "used_asc"
    );
}

#[test]
fn wire_parsing_classifies_failures() {
    let malformed = parse_list_response::<Value>("<html>502</html>", "codes");
    let rejected = parse_list_response::<Value>(r#"{"success":false,"message":"Denied"}"#, "codes");
    let silent = parse_mutation_response(r#"{"success":false}"#);
    let empty =
        parse_list_response::<Value>(r#"{"success":true,"total_pages":0}"#, "codes")
            .expect("missing rows should read as empty");

    assert!(matches!(malformed, Err(FetchError::Transport(_))));
    assert_eq!(rejected, Err(FetchError::Rejected(Some("Denied".to_string()))));
    assert_eq!(
        silent
            .expect_err("success false should fail")
            .notice_message("Delete failed."),
        "Delete failed."
    );
    assert_eq!(
        FetchError::Transport("reset".to_string()).notice_message("ignored"),
        GENERIC_NETWORK_ERROR
    );
    assert_eq!(empty, ListPage { rows: Vec::new(), total_pages: 0 });
}

#[test]
fn list_query_state_resets_page_on_every_change_but_paging() {
    let mut state = ListQueryState::new(
        &["election", "status"],
        SortSpec::new("created", SortDirection::Desc),
    );

    assert!(state.set_page(4));
    state.set_search("abc");
    assert_eq!(state.page(), 1);

    state.set_page(3);
    state.set_filter("status", "used");
    assert_eq!(state.page(), 1);

    state.set_page(2);
    state.set_sort("created");
    assert_eq!(state.page(), 1);
    assert_eq!(state.sort().direction, SortDirection::Asc, "same field toggles");

    state.set_sort("code");
    assert_eq!(state.sort(), &SortSpec::new("code", SortDirection::Asc));

    state.set_filter("status", "");
    assert_eq!(state.filter("status"), "all");
    assert!(!state.set_page(1), "current page is a no-op");
}

#[test]
fn list_query_state_serialises_to_form() {
    let mut state = ListQueryState::new(
        &["election", "position"],
        SortSpec::new("name", SortDirection::Asc),
    );
    state.set_filter("election", "7");
    state.set_search("blue");
    state.set_page(2);

    assert_eq!(
        state.to_form(),
        vec![
            pair("action", "fetch"),
            pair("page", "2"),
            pair("search", "blue"),
            pair("election", "7"),
            pair("position", "all"),
            pair("sort", "name_asc"),
        ]
    );
}

#[test]
fn clamp_page_pulls_page_into_range() {
    let mut state = ListQueryState::new(&[], SortSpec::new("name", SortDirection::Asc));
    state.set_page(6);

    assert!(state.clamp_page(4));
    assert_eq!(state.page(), 4);
    assert!(state.clamp_page(0), "no pages still means page 1");
    assert_eq!(state.page(), 1);
    assert!(!state.clamp_page(0));
}

#[test]
fn pagination_windows_large_totals() {
    assert_eq!(
        page_numbers(7, 4, 1),
        vec![Some(1), None, Some(3), Some(4), Some(5), None, Some(7)]
    );
    assert_eq!(
        page_numbers(7, 1, 1),
        vec![Some(1), Some(2), None, Some(7)]
    );
    assert_eq!(
        page_numbers(7, 7, 1),
        vec![Some(1), None, Some(6), Some(7)]
    );
    assert_eq!(
        page_numbers(5, 3, 1),
        vec![Some(1), Some(2), Some(3), Some(4), Some(5)],
        "small totals list every page"
    );
    assert_eq!(page_numbers(0, 1, 1), Vec::<Option<i64>>::new());
}

#[test]
fn pagination_items_disable_boundaries_and_current_page() {
    let items = build_page_items(3, 1, 1);

    assert_eq!(
        items,
        vec![
            PageItem::Previous(None),
            PageItem::Page { number: 1, current: true },
            PageItem::Page { number: 2, current: false },
            PageItem::Page { number: 3, current: false },
            PageItem::Next(Some(2)),
        ]
    );
    assert_eq!(items[0].target(), None);
    assert_eq!(items[1].target(), None);
    assert_eq!(items[2].target(), Some(2));
    assert!(build_page_items(1, 1, 1).is_empty());
}

#[test]
fn selection_header_is_tri_state_over_visible_rows() {
    let visible = ["1", "2", "3"];
    let mut selection = SelectionSet::default();

    assert_eq!(selection.header_state(visible), HeaderCheck::Unchecked);
    selection.select_all(visible);
    assert_eq!(selection.len(), 3);
    assert_eq!(selection.header_state(visible), HeaderCheck::Checked);

    assert!(!selection.toggle("2"));
    assert_eq!(selection.header_state(visible), HeaderCheck::Indeterminate);

    selection.toggle("99");
    assert_eq!(
        selection.header_state(["1", "3"]),
        HeaderCheck::Checked,
        "ids outside the visible rows do not count"
    );
    selection.clear_all();
    assert!(selection.is_empty());
    assert_eq!(selection.header_state(Vec::<&str>::new()), HeaderCheck::Unchecked);
}

#[test]
fn controller_renders_only_the_latest_fetch() {
    let mut controller = ListController::new(EntityKind::VotingCodes);
    let query_a = controller.set_search("a");
    let query_b = controller.set_search("b");

    let late_b = controller.finish_fetch(
        &query_b,
        Ok(ListPage { rows: display_rows(&["b1"]), total_pages: 1 }),
    );
    let late_a = controller.finish_fetch(
        &query_a,
        Ok(ListPage { rows: display_rows(&["a1", "a2"]), total_pages: 1 }),
    );

    assert_eq!(late_b, FetchOutcome::Rendered);
    assert_eq!(late_a, FetchOutcome::Stale);
    assert_eq!(controller.view().visible_ids().collect::<Vec<_>>(), vec!["b1"]);
}

#[test]
fn controller_discards_earlier_response_arriving_first() {
    let mut controller = ListController::new(EntityKind::Candidates);
    let query_a = controller.set_sort("party");
    let query_b = controller.set_sort("party");

    let early_a = controller.finish_fetch(
        &query_a,
        Ok(ListPage { rows: display_rows(&["a1"]), total_pages: 1 }),
    );

    assert_eq!(early_a, FetchOutcome::Stale);
    assert!(controller.view().is_loading(), "still waiting for the newer request");
    assert_eq!(
        controller.finish_fetch(
            &query_b,
            Ok(ListPage { rows: display_rows(&["b1"]), total_pages: 1 }),
        ),
        FetchOutcome::Rendered
    );
}

#[test]
fn controller_keeps_previous_rows_on_transport_failure() {
    let mut controller = ListController::new(EntityKind::Candidates);
    let first = controller.begin_fetch();
    controller.finish_fetch(
        &first,
        Ok(ListPage { rows: display_rows(&["1", "2"]), total_pages: 1 }),
    );

    let retry = controller.set_search("x");
    assert!(controller.view().visible_rows().is_empty(), "rows hide while loading");
    let outcome = controller.finish_fetch(&retry, Err(FetchError::Transport("offline".to_string())));

    assert_eq!(outcome, FetchOutcome::Failed(GENERIC_NETWORK_ERROR.to_string()));
    assert_eq!(controller.view().phase(), LoadPhase::Ready);
    assert_eq!(controller.view().visible_ids().collect::<Vec<_>>(), vec!["1", "2"]);
}

#[test]
fn controller_failed_page_change_can_be_retried() {
    let mut controller = ListController::new(EntityKind::VotingCodes);
    let first = controller.begin_fetch();
    controller.finish_fetch(
        &first,
        Ok(ListPage { rows: display_rows(&["1"]), total_pages: 3 }),
    );

    let failed = controller.set_page(2).expect("page change should fetch");
    let outcome = controller.finish_fetch(&failed, Err(FetchError::Transport("offline".to_string())));

    assert_eq!(outcome, FetchOutcome::Failed(GENERIC_NETWORK_ERROR.to_string()));
    assert_eq!(controller.query().page(), 1, "page bar follows the rows on screen");
    let retry = controller
        .set_page(2)
        .expect("clicking the failed page again should fetch");
    assert_eq!(form_value(&retry.form, "page"), Some("2"));
}

#[test]
fn controller_failed_filter_change_rolls_back() {
    let mut controller = ListController::new(EntityKind::VotingCodes);
    let first = controller.begin_fetch();
    controller.finish_fetch(
        &first,
        Ok(ListPage { rows: display_rows(&["1"]), total_pages: 1 }),
    );

    let failed = controller.set_filter("status", "used");
    controller.finish_fetch(&failed, Err(FetchError::Rejected(None)));

    assert_eq!(controller.query().filter("status"), "all");
}

#[test]
fn controller_refetches_when_page_falls_past_the_end() {
    let mut controller = ListController::new(EntityKind::Positions);
    let ticket = controller.set_page(5).expect("page change should fetch");

    let outcome = controller.finish_fetch(
        &ticket,
        Ok(ListPage { rows: Vec::new(), total_pages: 3 }),
    );

    let FetchOutcome::Refetch(next) = outcome else {
        panic!("expected a refetch, got {outcome:?}");
    };
    assert_eq!(controller.query().page(), 3);
    assert_eq!(form_value(&next.form, "page"), Some("3"));
    assert_eq!(
        controller.finish_fetch(&ticket, Ok(ListPage { rows: Vec::new(), total_pages: 3 })),
        FetchOutcome::Stale,
        "the clamped-away request is now stale"
    );
}

#[test]
fn controller_empty_result_shows_empty_state() {
    let mut controller = ListController::new(EntityKind::Elections);
    let ticket = controller.begin_fetch();

    controller.finish_fetch(&ticket, Ok(ListPage { rows: Vec::new(), total_pages: 0 }));

    assert_eq!(controller.view().phase(), LoadPhase::Empty);
    assert_eq!(controller.query().page(), 1);
}

#[test]
fn controller_clears_selection_on_query_change() {
    let mut controller = ListController::new(EntityKind::VotingCodes);
    let ticket = controller.begin_fetch();
    controller.finish_fetch(
        &ticket,
        Ok(ListPage { rows: display_rows(&["1", "2", "3"]), total_pages: 4 }),
    );

    controller.toggle_all_visible();
    assert_eq!(controller.selection().len(), 3);
    assert_eq!(controller.header_state(), HeaderCheck::Checked);
    controller.toggle_row("2");
    assert_eq!(controller.header_state(), HeaderCheck::Indeterminate);

    assert!(controller.set_page(1).is_none(), "current page does nothing");
    assert_eq!(controller.selection().len(), 2);
    controller.set_page(2).expect("new page should fetch");
    assert!(controller.selection().is_empty());
}

#[test]
fn controller_resets_dependent_filters() {
    let mut controller = ListController::new(EntityKind::Candidates);
    controller.set_filter("position", "4");

    let ticket = controller.set_filter("election", "2");

    assert_eq!(controller.query().filter("position"), "all");
    assert_eq!(form_value(&ticket.form, "election"), Some("2"));
    assert_eq!(form_value(&ticket.form, "position"), Some("all"));
}

#[test]
fn controller_renders_endpoint_response_end_to_end() {
    let fixture = seed_fixture("controller-e2e");
    let endpoint = fixture.endpoint();
    let mut controller = ListController::new(EntityKind::Candidates);
    let ticket = controller.set_search("blue");

    let body = endpoint
        .post(EntityKind::Candidates.endpoint(), &ticket.form)
        .expect("post should reach endpoint");
    let outcome = controller.finish_fetch(
        &ticket,
        decode_display_page(EntityKind::Candidates, &body),
    );

    assert_eq!(outcome, FetchOutcome::Rendered);
    let rows = controller.view().visible_rows();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].id, fixture.alice.to_string());
    assert_eq!(
        rows[0].cells,
        vec!["Alice", "Blue", "President", "Student Council", "0"]
    );

    fixture.cleanup();
}

#[test]
fn descriptors_match_endpoint_filters() {
    for kind in EntityKind::ALL {
        let listed = descriptor(kind).filter_names();
        assert_eq!(listed, kind.filters().to_vec(), "{kind:?} filters should agree");
        assert_eq!(descriptor(kind).kind, kind);
    }
}

#[test]
fn bulk_delete_with_nothing_selected_is_a_no_op() {
    let endpoint = RecordingEndpoint::default();

    assert_eq!(bulk_delete_prompt(EntityKind::Candidates, 0), None);
    let report = dispatch_bulk_delete(&endpoint, EntityKind::Candidates, &[]);

    assert_eq!(report.deleted, 0);
    assert!(
        endpoint
            .calls
            .lock()
            .expect("calls lock should not be poisoned")
            .is_empty(),
        "no request should be issued"
    );
}

#[test]
fn bulk_delete_surfaces_partial_success() {
    let endpoint = RecordingEndpoint {
        reject_ids: ["7".to_string()].into_iter().collect(),
        ..RecordingEndpoint::default()
    };
    let ids = vec!["5".to_string(), "6".to_string(), "7".to_string()];

    let report = dispatch_bulk_delete(&endpoint, EntityKind::Candidates, &ids);

    assert_eq!(report.deleted, 2);
    assert_eq!(
        report.failed,
        vec![("7".to_string(), "The candidate no longer exists.".to_string())]
    );
    assert_eq!(
        report.notice(EntityKind::Candidates),
        ("Deleted 2 of 3 candidates; 1 failed.".to_string(), Severity::Warning)
    );
    assert_eq!(
        bulk_delete_prompt(EntityKind::Candidates, 3).as_deref(),
        Some("Delete 3 selected candidates? This cannot be undone.")
    );
}

#[test]
fn bulk_delete_against_database_reports_stale_ids() {
    let fixture = seed_fixture("bulk-db");
    let endpoint = fixture.endpoint();
    let ids = vec![fixture.alice.to_string(), fixture.bob.to_string(), "9999".to_string()];

    let report = dispatch_bulk_delete(&endpoint, EntityKind::Candidates, &ids);

    assert_eq!(report.deleted, 2);
    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.failed[0].0, "9999");
    let remaining = fixture
        .repo
        .list_candidates(&ListQuery::new(10))
        .expect("candidates should list");
    assert_eq!(names(&remaining.rows), vec!["Carol", "Dave"]);

    fixture.cleanup();
}

#[test]
fn bulk_delete_when_offline_reports_every_failure() {
    let endpoint = RecordingEndpoint {
        offline: true,
        ..RecordingEndpoint::default()
    };

    let report = dispatch_bulk_delete(&endpoint, EntityKind::VotingCodes, &["1".to_string()]);
    let (message, severity) = report.notice(EntityKind::VotingCodes);

    assert_eq!(severity, Severity::Error);
    assert_eq!(
        message,
        format!("Could not delete the selected voting code: {GENERIC_NETWORK_ERROR}")
    );
}

#[test]
fn confirm_dialog_cancel_never_runs_callback() {
    let runs = Rc::new(Cell::new(0));
    let mut dialog = ConfirmDialog::default();
    let counter = runs.clone();
    dialog.open("Delete", "Delete 2 rows?", move || counter.set(counter.get() + 1));

    dialog.cancel();

    assert_eq!(runs.get(), 0);
    assert!(!dialog.is_open());
    assert!(!dialog.confirm(), "nothing left to confirm");
    assert_eq!(runs.get(), 0);
}

#[test]
fn confirm_dialog_confirm_runs_callback_once() {
    let runs = Rc::new(Cell::new(0));
    let mut dialog = ConfirmDialog::default();
    let counter = runs.clone();
    dialog.open("Delete", "Delete 2 rows?", move || counter.set(counter.get() + 1));
    assert_eq!(dialog.message(), Some("Delete 2 rows?"));

    assert!(dialog.confirm());
    assert!(!dialog.confirm());

    assert_eq!(runs.get(), 1);
    assert!(!dialog.is_open());
}

#[test]
fn notifications_stack_and_expire() {
    let start = Instant::now();
    let mut notifications = Notifications::default();
    let first = notifications.push_at("Saved.", Severity::Success, start);
    notifications.push_at("Network error.", Severity::Error, start + Duration::from_secs(2));

    assert_eq!(notifications.len(), 2, "notices stack instead of replacing");
    assert_eq!(notifications.expire(start + NOTICE_TTL), 1);
    assert_eq!(notifications.items()[0].message, "Network error.");
    assert!(!notifications.dismiss(first), "already expired");

    let id = notifications.items()[0].id;
    assert!(notifications.dismiss(id));
    assert!(notifications.is_empty());
}

#[tokio::test(start_paused = true)]
async fn debounce_runs_only_the_last_call() {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = seen.clone();
    let debounce = Debounce::new(Duration::from_millis(300), move |text: String| {
        sink.borrow_mut().push(text)
    });

    let typing = debounce.clone();
    tokio::join!(debounce.call("a".to_string()), async {
        tokio::time::sleep(Duration::from_millis(100)).await;
        typing.call("ab".to_string()).await;
    });

    assert_eq!(*seen.borrow(), vec!["ab".to_string()]);
}

#[tokio::test(start_paused = true)]
async fn debounce_runs_calls_separated_by_a_pause() {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = seen.clone();
    let debounce = Debounce::new(Duration::from_millis(300), move |value: u32| {
        sink.borrow_mut().push(value)
    });

    debounce.call(1).await;
    tokio::time::sleep(Duration::from_millis(500)).await;
    debounce.call(2).await;

    assert_eq!(*seen.borrow(), vec![1, 2]);
}

#[test]
fn auth_login_and_password_change() {
    let fixture = seed_fixture("auth");
    let auth = AuthService::with_iterations(fixture.repo.clone(), 1_000);

    assert_eq!(auth.ensure_admin("admin", "admin"), Ok(true));
    assert_eq!(auth.ensure_admin("admin", "other"), Ok(false), "only seeds once");
    assert_eq!(
        auth.login("admin", "wrong"),
        Err(AuthError::InvalidCredentials)
    );
    assert_eq!(
        auth.login("nobody", "admin"),
        Err(AuthError::InvalidCredentials)
    );
    let session = auth.login(" admin ", "admin").expect("login should succeed");
    assert_eq!(session.username, "admin");

    let attempt = |current: &str, new: &str, confirm: &str| {
        auth.change_password(
            &session,
            &PasswordChangeForm {
                current_password: current.to_string(),
                new_password: new.to_string(),
                confirm_password: confirm.to_string(),
            },
        )
    };
    let field_of = |result: Result<(), AuthError>| match result {
        Err(AuthError::Field(err)) => err.field,
        other => panic!("expected a field error, got {other:?}"),
    };
    assert_eq!(field_of(attempt("nope", "long-enough", "long-enough")), "current_password");
    assert_eq!(field_of(attempt("admin", "short", "short")), "new_password");
    assert_eq!(field_of(attempt("admin", "long-enough", "different")), "confirm_password");

    attempt("admin", "long-enough", "long-enough").expect("change should succeed");
    assert!(auth.login("admin", "admin").is_err());
    assert!(auth.login("admin", "long-enough").is_ok());

    fixture.cleanup();
}

#[test]
fn password_hashes_are_salted() {
    let fixture = seed_fixture("auth-salt");
    let auth = AuthService::with_iterations(fixture.repo.clone(), 1_000);

    let (hash_a, salt_a) = auth.hash_password("same");
    let (hash_b, salt_b) = auth.hash_password("same");

    assert_ne!(salt_a, salt_b);
    assert_ne!(hash_a, hash_b);
    assert!(auth.verify_password("same", &hash_a, &salt_a));
    assert!(!auth.verify_password("same", &hash_a, &salt_b));
    assert!(!auth.verify_password("same", "not base64!", &salt_a));

    fixture.cleanup();
}

#[test]
fn config_reads_overrides_and_defaults() {
    let temp_dir = unique_test_dir("config");
    let db_path = temp_dir.join("custom.sqlite");
    let env = HashMap::from([
        ("EVOTE_DB_PATH", db_path.display().to_string()),
        ("EVOTE_SEARCH_DEBOUNCE_MS", "150".to_string()),
    ]);

    let config = AppConfig::from_lookup(|key| env.get(key).cloned()).expect("config should load");

    assert_eq!(config.db_path, db_path);
    assert_eq!(config.search_debounce, Duration::from_millis(150));
    assert_eq!(config.pagination_window, 1);
    assert_eq!(config.admin_user, "admin");
}

#[test]
fn config_rejects_invalid_numbers() {
    let env = HashMap::from([
        ("EVOTE_DB_PATH", "/tmp/evote.sqlite".to_string()),
        ("EVOTE_PAGINATION_WINDOW", "wide".to_string()),
    ]);

    let result = AppConfig::from_lookup(|key| env.get(key).cloned());

    assert!(result.is_err(), "non-numeric window should be rejected");
}

#[test]
fn build_services_seeds_admin_and_serves_requests() {
    let temp_dir = unique_test_dir("services");
    fs::create_dir_all(&temp_dir).expect("should create temp dir");
    let env = HashMap::from([
        ("EVOTE_DB_PATH", temp_dir.join("app.sqlite").display().to_string()),
        ("EVOTE_ADMIN_PASSWORD", "first-login".to_string()),
    ]);
    let config = AppConfig::from_lookup(|key| env.get(key).cloned()).expect("config should load");

    let services = build_services(config).expect("services should start");

    assert!(services.auth.login("admin", "first-login").is_ok());
    let body = services
        .endpoint
        .post("elections_ajax", &[pair("action", "fetch")])
        .expect("endpoint should answer");
    assert_eq!(
        parse_list_response::<Value>(&body, "elections"),
        Ok(ListPage { rows: Vec::new(), total_pages: 0 })
    );

    fs::remove_dir_all(&temp_dir).expect("should cleanup temp dir");
}

#[test]
fn create_and_delete_report_row_changes() {
    let fixture = seed_fixture("row-change");
    let db_path = fixture.db_path();

    let deleted = delete_candidate(&db_path, fixture.dave)
        .expect("delete should run");
    let missing = delete_candidate(&db_path, fixture.dave)
        .expect("second delete should run");

    assert_eq!(deleted, RowChange::Applied(fixture.dave));
    assert_eq!(missing, RowChange::MissingTarget);

    fixture.cleanup();
}
