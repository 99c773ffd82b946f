use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use anyhow::{Context, Result};
use rusqlite::{params, params_from_iter, types::Value, Connection, OptionalExtension};

use crate::domain::entities::admin::AdminRecord;
use crate::domain::entities::election::{
    round_one_decimal, CandidateInput, CandidateRow, CandidateTally, ElectionResults,
    ElectionRow, ElectionStatus, LookupOption, NewElection, NewPosition, PositionResult,
    PositionRow, VotingCodeRow,
};
use crate::domain::entities::list::{ListQuery, PageSlice, SortDirection};
use crate::infra::sqlite::schema::open_connection;

/// Result of a write that targets an existing row or needs a parent row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowChange {
    Applied(i64),
    MissingTarget,
    MissingParent,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BallotOutcome {
    Recorded,
    UnknownCode,
    CodeAlreadyUsed,
    InvalidSelection(String),
}

/// Sortable field key plus the SQL expression it orders by.
type SortColumn = (&'static str, &'static str);

struct ListPlan {
    clauses: Vec<String>,
    params: Vec<Value>,
}

impl ListPlan {
    fn new() -> Self {
        Self {
            clauses: Vec::new(),
            params: Vec::new(),
        }
    }

    fn push(&mut self, clause: impl Into<String>, params: impl IntoIterator<Item = Value>) {
        self.clauses.push(clause.into());
        self.params.extend(params);
    }

    fn push_clause(&mut self, clause: &str) {
        self.clauses.push(clause.to_string());
    }

    fn search(&mut self, search: &str, columns: &[&str]) {
        let term = search.trim();
        if term.is_empty() || columns.is_empty() {
            return;
        }
        let pattern = format!("%{}%", escape_like(term));
        let clause = columns
            .iter()
            .map(|column| format!("{column} LIKE ? ESCAPE '\\'"))
            .collect::<Vec<_>>()
            .join(" OR ");
        self.push(
            format!("({clause})"),
            columns.iter().map(|_| Value::Text(pattern.clone())),
        );
    }

    fn id_filter(&mut self, query: &ListQuery, name: &str, column: &str) -> Result<()> {
        if let Some(raw) = query.filter(name) {
            let id = raw
                .parse::<i64>()
                .with_context(|| format!("invalid {name} filter: {raw}"))?;
            self.push(format!("{column} = ?"), [Value::Integer(id)]);
        }
        Ok(())
    }

    fn where_sql(&self) -> String {
        if self.clauses.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", self.clauses.join(" AND "))
        }
    }
}

fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for ch in term.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

fn order_sql(
    query: &ListQuery,
    columns: &[SortColumn],
    default: (&str, SortDirection),
    tiebreak: &str,
) -> String {
    let (expr, direction) = query
        .sort
        .as_ref()
        .and_then(|sort| {
            columns
                .iter()
                .find(|(key, _)| *key == sort.field)
                .map(|(_, expr)| (*expr, sort.direction))
        })
        .unwrap_or(default);
    let direction = match direction {
        SortDirection::Asc => "ASC",
        SortDirection::Desc => "DESC",
    };
    format!("{expr} {direction}, {tiebreak} ASC")
}

fn run_list<R>(
    conn: &Connection,
    select_sql: &str,
    from_sql: &str,
    plan: &ListPlan,
    order: &str,
    query: &ListQuery,
    map_row: impl FnMut(&rusqlite::Row<'_>) -> rusqlite::Result<R>,
) -> Result<PageSlice<R>> {
    if query.page_size <= 0 {
        anyhow::bail!("page_size must be greater than zero")
    }

    let where_sql = plan.where_sql();
    let count_sql = format!("SELECT COUNT(*) {from_sql} {where_sql}");
    let total_items: i64 = conn
        .query_row(
            &count_sql,
            params_from_iter(plan.params.iter().cloned()),
            |row| row.get(0),
        )
        .context("failed to query filtered row count")?;

    let Some(offset) = query.offset() else {
        return Ok(PageSlice {
            rows: Vec::new(),
            total_items,
        });
    };
    let mut row_params = plan.params.clone();
    row_params.push(Value::Integer(query.page_size));
    row_params.push(Value::Integer(offset));

    let row_sql =
        format!("SELECT {select_sql} {from_sql} {where_sql} ORDER BY {order} LIMIT ? OFFSET ?");
    let mut stmt = conn
        .prepare(&row_sql)
        .context("failed to prepare page query")?;
    let rows = stmt
        .query_map(params_from_iter(row_params), map_row)
        .context("failed to query page rows")?
        .collect::<rusqlite::Result<Vec<_>>>()
        .context("failed to collect page rows")?;

    Ok(PageSlice { rows, total_items })
}

pub fn list_elections(db_path: &Path, query: &ListQuery, now: &str) -> Result<PageSlice<ElectionRow>> {
    const SORT: &[SortColumn] = &[
        ("title", "e.title COLLATE NOCASE"),
        ("starts", "e.starts_at"),
        ("ends", "e.ends_at"),
        ("positions", "position_count"),
    ];

    let conn = open_connection(db_path)?;
    let mut plan = ListPlan::new();
    plan.search(&query.search, &["e.title", "e.description"]);
    match query.filter("status") {
        Some("upcoming") => plan.push("? < e.starts_at", [Value::Text(now.to_string())]),
        Some("active") => plan.push(
            "? >= e.starts_at AND ? <= e.ends_at",
            [Value::Text(now.to_string()), Value::Text(now.to_string())],
        ),
        Some("closed") => plan.push("? > e.ends_at", [Value::Text(now.to_string())]),
        Some(other) => anyhow::bail!("invalid status filter: {other}"),
        None => {}
    }

    let order = order_sql(query, SORT, ("e.starts_at", SortDirection::Desc), "e.id");
    run_list(
        &conn,
        "e.id, e.title, e.description, e.starts_at, e.ends_at,
         (SELECT COUNT(*) FROM position p WHERE p.election_id = e.id) AS position_count",
        "FROM election e",
        &plan,
        &order,
        query,
        |row| {
            let starts_at: String = row.get(3)?;
            let ends_at: String = row.get(4)?;
            let status = ElectionStatus::at(now, &starts_at, &ends_at);
            Ok(ElectionRow {
                id: row.get(0)?,
                title: row.get(1)?,
                description: row.get(2)?,
                starts_at,
                ends_at,
                status: status.as_str().to_string(),
                position_count: row.get(5)?,
            })
        },
    )
}

pub fn list_positions(db_path: &Path, query: &ListQuery) -> Result<PageSlice<PositionRow>> {
    const SORT: &[SortColumn] = &[
        ("order", "p.sort_order"),
        ("name", "p.name COLLATE NOCASE"),
        ("election", "e.title COLLATE NOCASE"),
        ("max_votes", "p.max_votes"),
        ("candidates", "candidate_count"),
    ];

    let conn = open_connection(db_path)?;
    let mut plan = ListPlan::new();
    plan.search(&query.search, &["p.name", "e.title"]);
    plan.id_filter(query, "election", "p.election_id")?;

    let order = order_sql(query, SORT, ("p.sort_order", SortDirection::Asc), "p.id");
    run_list(
        &conn,
        "p.id, p.election_id, e.title, p.name, p.max_votes,
         (SELECT COUNT(*) FROM candidate c WHERE c.position_id = p.id) AS candidate_count",
        "FROM position p JOIN election e ON e.id = p.election_id",
        &plan,
        &order,
        query,
        |row| {
            Ok(PositionRow {
                id: row.get(0)?,
                election_id: row.get(1)?,
                election_title: row.get(2)?,
                name: row.get(3)?,
                max_votes: row.get(4)?,
                candidate_count: row.get(5)?,
            })
        },
    )
}

const CANDIDATE_SELECT: &str = "c.id, c.name, c.party, c.election_id, e.title, c.position_id, p.name,
     (SELECT COUNT(*) FROM vote v WHERE v.candidate_id = c.id) AS votes, c.created_at";
const CANDIDATE_FROM: &str = "FROM candidate c
     JOIN position p ON p.id = c.position_id
     JOIN election e ON e.id = c.election_id";

fn candidate_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<CandidateRow> {
    Ok(CandidateRow {
        id: row.get(0)?,
        name: row.get(1)?,
        party: row.get(2)?,
        election_id: row.get(3)?,
        election_title: row.get(4)?,
        position_id: row.get(5)?,
        position_name: row.get(6)?,
        votes: row.get(7)?,
        created_at: row.get(8)?,
    })
}

pub fn list_candidates(db_path: &Path, query: &ListQuery) -> Result<PageSlice<CandidateRow>> {
    const SORT: &[SortColumn] = &[
        ("name", "c.name COLLATE NOCASE"),
        ("party", "c.party COLLATE NOCASE"),
        ("position", "p.name COLLATE NOCASE"),
        ("election", "e.title COLLATE NOCASE"),
        ("votes", "votes"),
        ("created", "c.created_at"),
    ];

    let conn = open_connection(db_path)?;
    let mut plan = ListPlan::new();
    plan.search(&query.search, &["c.name", "c.party", "p.name", "e.title"]);
    plan.id_filter(query, "election", "c.election_id")?;
    plan.id_filter(query, "position", "c.position_id")?;

    let order = order_sql(query, SORT, ("c.name COLLATE NOCASE", SortDirection::Asc), "c.id");
    run_list(
        &conn,
        CANDIDATE_SELECT,
        CANDIDATE_FROM,
        &plan,
        &order,
        query,
        candidate_from_row,
    )
}

pub fn list_voting_codes(db_path: &Path, query: &ListQuery) -> Result<PageSlice<VotingCodeRow>> {
    const SORT: &[SortColumn] = &[
        ("code", "vc.code"),
        ("election", "e.title COLLATE NOCASE"),
        ("status", "(vc.used_at IS NOT NULL)"),
        ("used", "vc.used_at"),
        ("created", "vc.created_at"),
    ];

    let conn = open_connection(db_path)?;
    let mut plan = ListPlan::new();
    plan.search(&query.search, &["vc.code", "e.title"]);
    plan.id_filter(query, "election", "vc.election_id")?;
    match query.filter("status") {
        Some("used") => plan.push_clause("vc.used_at IS NOT NULL"),
        Some("unused") => plan.push_clause("vc.used_at IS NULL"),
        Some(other) => anyhow::bail!("invalid status filter: {other}"),
        None => {}
    }

    let order = order_sql(query, SORT, ("vc.created_at", SortDirection::Desc), "vc.id");
    run_list(
        &conn,
        "vc.id, vc.code, vc.election_id, e.title, vc.used_at, vc.created_at",
        "FROM voting_code vc JOIN election e ON e.id = vc.election_id",
        &plan,
        &order,
        query,
        |row| {
            let used_at: Option<String> = row.get(4)?;
            Ok(VotingCodeRow {
                id: row.get(0)?,
                code: row.get(1)?,
                election_id: row.get(2)?,
                election_title: row.get(3)?,
                used: used_at.is_some(),
                used_at,
                created_at: row.get(5)?,
            })
        },
    )
}

pub fn election_options(db_path: &Path) -> Result<Vec<LookupOption>> {
    let conn = open_connection(db_path)?;
    let mut stmt = conn
        .prepare("SELECT id, title FROM election ORDER BY starts_at DESC, id ASC")
        .context("failed to prepare election options query")?;
    let options = stmt
        .query_map([], |row| {
            Ok(LookupOption {
                value: row.get::<_, i64>(0)?.to_string(),
                label: row.get(1)?,
            })
        })
        .context("failed to query election options")?
        .collect::<rusqlite::Result<Vec<_>>>()
        .context("failed to collect election options")?;
    Ok(options)
}

pub fn position_options(db_path: &Path, election_id: i64) -> Result<Vec<LookupOption>> {
    let conn = open_connection(db_path)?;
    let mut stmt = conn
        .prepare(
            "SELECT id, name FROM position
             WHERE election_id = ?1
             ORDER BY sort_order ASC, id ASC",
        )
        .context("failed to prepare position options query")?;
    let options = stmt
        .query_map([election_id], |row| {
            Ok(LookupOption {
                value: row.get::<_, i64>(0)?.to_string(),
                label: row.get(1)?,
            })
        })
        .context("failed to query position options")?
        .collect::<rusqlite::Result<Vec<_>>>()
        .context("failed to collect position options")?;
    Ok(options)
}

pub fn create_election(db_path: &Path, election: &NewElection) -> Result<i64> {
    let conn = open_connection(db_path)?;
    conn.execute(
        "INSERT INTO election(title, description, starts_at, ends_at) VALUES (?1, ?2, ?3, ?4)",
        params![
            election.title,
            election.description,
            election.starts_at,
            election.ends_at
        ],
    )
    .context("failed to insert election")?;
    Ok(conn.last_insert_rowid())
}

fn delete_row(db_path: &Path, sql: &str, id: i64, what: &str) -> Result<RowChange> {
    let conn = open_connection(db_path)?;
    let affected = conn
        .execute(sql, params![id])
        .with_context(|| format!("failed to delete {what} #{id}"))?;
    Ok(if affected == 0 {
        RowChange::MissingTarget
    } else {
        RowChange::Applied(id)
    })
}

pub fn delete_election(db_path: &Path, id: i64) -> Result<RowChange> {
    delete_row(db_path, "DELETE FROM election WHERE id = ?1", id, "election")
}

pub fn create_position(db_path: &Path, position: &NewPosition) -> Result<RowChange> {
    let conn = open_connection(db_path)?;
    let election_exists = conn
        .query_row(
            "SELECT 1 FROM election WHERE id = ?1",
            [position.election_id.0],
            |_| Ok(()),
        )
        .optional()
        .context("failed to look up election")?
        .is_some();
    if !election_exists {
        return Ok(RowChange::MissingParent);
    }

    conn.execute(
        "INSERT INTO position(election_id, name, max_votes, sort_order)
         VALUES (?1, ?2, ?3,
                 (SELECT COALESCE(MAX(sort_order), 0) + 1 FROM position WHERE election_id = ?1))",
        params![position.election_id.0, position.name, position.max_votes],
    )
    .context("failed to insert position")?;
    Ok(RowChange::Applied(conn.last_insert_rowid()))
}

pub fn delete_position(db_path: &Path, id: i64) -> Result<RowChange> {
    delete_row(db_path, "DELETE FROM position WHERE id = ?1", id, "position")
}

fn position_election(conn: &Connection, position_id: i64) -> Result<Option<i64>> {
    conn.query_row(
        "SELECT election_id FROM position WHERE id = ?1",
        [position_id],
        |row| row.get(0),
    )
    .optional()
    .context("failed to look up position")
}

pub fn add_candidate(db_path: &Path, candidate: &CandidateInput) -> Result<RowChange> {
    let conn = open_connection(db_path)?;
    let Some(election_id) = position_election(&conn, candidate.position_id)? else {
        return Ok(RowChange::MissingParent);
    };
    conn.execute(
        "INSERT INTO candidate(election_id, position_id, name, party) VALUES (?1, ?2, ?3, ?4)",
        params![
            election_id,
            candidate.position_id,
            candidate.name,
            candidate.party
        ],
    )
    .context("failed to insert candidate")?;
    Ok(RowChange::Applied(conn.last_insert_rowid()))
}

pub fn get_candidate(db_path: &Path, id: i64) -> Result<Option<CandidateRow>> {
    let conn = open_connection(db_path)?;
    conn.query_row(
        &format!("SELECT {CANDIDATE_SELECT} {CANDIDATE_FROM} WHERE c.id = ?1"),
        [id],
        candidate_from_row,
    )
    .optional()
    .with_context(|| format!("failed to load candidate #{id}"))
}

pub fn update_candidate(db_path: &Path, id: i64, candidate: &CandidateInput) -> Result<RowChange> {
    let conn = open_connection(db_path)?;
    let Some(election_id) = position_election(&conn, candidate.position_id)? else {
        return Ok(RowChange::MissingParent);
    };
    let affected = conn
        .execute(
            "UPDATE candidate
             SET election_id = ?1, position_id = ?2, name = ?3, party = ?4
             WHERE id = ?5",
            params![
                election_id,
                candidate.position_id,
                candidate.name,
                candidate.party,
                id
            ],
        )
        .with_context(|| format!("failed to update candidate #{id}"))?;
    Ok(if affected == 0 {
        RowChange::MissingTarget
    } else {
        RowChange::Applied(id)
    })
}

pub fn delete_candidate(db_path: &Path, id: i64) -> Result<RowChange> {
    delete_row(db_path, "DELETE FROM candidate WHERE id = ?1", id, "candidate")
}

/// Inserts codes, skipping any that already exist. Applied carries the inserted count.
pub fn insert_voting_codes(db_path: &Path, election_id: i64, codes: &[String]) -> Result<RowChange> {
    let mut conn = open_connection(db_path)?;
    let tx = conn
        .transaction()
        .context("failed to start voting code transaction")?;

    let election_exists = tx
        .query_row("SELECT 1 FROM election WHERE id = ?1", [election_id], |_| {
            Ok(())
        })
        .optional()
        .context("failed to look up election")?
        .is_some();
    if !election_exists {
        return Ok(RowChange::MissingParent);
    }

    let mut inserted = 0_i64;
    {
        let mut insert_code = tx
            .prepare("INSERT OR IGNORE INTO voting_code(election_id, code) VALUES (?1, ?2)")
            .context("failed to prepare voting code insert")?;
        for code in codes {
            inserted += insert_code
                .execute(params![election_id, code])
                .context("failed to insert voting code")? as i64;
        }
    }

    tx.commit()
        .context("failed to commit voting code transaction")?;
    Ok(RowChange::Applied(inserted))
}

pub fn delete_voting_code(db_path: &Path, id: i64) -> Result<RowChange> {
    delete_row(db_path, "DELETE FROM voting_code WHERE id = ?1", id, "voting code")
}

pub fn cast_ballot(db_path: &Path, code: &str, candidate_ids: &[i64]) -> Result<BallotOutcome> {
    let mut conn = open_connection(db_path)?;
    let tx = conn
        .transaction()
        .context("failed to start ballot transaction")?;

    let code_row = tx
        .query_row(
            "SELECT id, election_id, used_at FROM voting_code WHERE code = ?1",
            [code],
            |row| {
                Ok((
                    row.get::<_, i64>(0)?,
                    row.get::<_, i64>(1)?,
                    row.get::<_, Option<String>>(2)?,
                ))
            },
        )
        .optional()
        .context("failed to look up voting code")?;
    let Some((code_id, election_id, used_at)) = code_row else {
        return Ok(BallotOutcome::UnknownCode);
    };
    if used_at.is_some() {
        return Ok(BallotOutcome::CodeAlreadyUsed);
    }

    if candidate_ids.is_empty() {
        return Ok(BallotOutcome::InvalidSelection(
            "no candidates were selected".to_string(),
        ));
    }

    let unique: BTreeSet<i64> = candidate_ids.iter().copied().collect();
    if unique.len() != candidate_ids.len() {
        return Ok(BallotOutcome::InvalidSelection(
            "a candidate was selected more than once".to_string(),
        ));
    }

    let mut per_position: BTreeMap<i64, (i64, i64)> = BTreeMap::new();
    for candidate_id in &unique {
        let found = tx
            .query_row(
                "SELECT c.position_id, p.max_votes
                 FROM candidate c JOIN position p ON p.id = c.position_id
                 WHERE c.id = ?1 AND c.election_id = ?2",
                params![candidate_id, election_id],
                |row| Ok((row.get::<_, i64>(0)?, row.get::<_, i64>(1)?)),
            )
            .optional()
            .context("failed to look up candidate")?;
        let Some((position_id, max_votes)) = found else {
            return Ok(BallotOutcome::InvalidSelection(format!(
                "candidate #{candidate_id} is not running in this election"
            )));
        };
        let entry = per_position.entry(position_id).or_insert((0, max_votes));
        entry.0 += 1;
        if entry.0 > entry.1 {
            return Ok(BallotOutcome::InvalidSelection(format!(
                "too many selections for position #{position_id}"
            )));
        }
    }

    {
        let mut insert_vote = tx
            .prepare(
                "INSERT INTO vote(voting_code_id, candidate_id, position_id)
                 SELECT ?1, c.id, c.position_id FROM candidate c WHERE c.id = ?2",
            )
            .context("failed to prepare vote insert")?;
        for candidate_id in &unique {
            insert_vote
                .execute(params![code_id, candidate_id])
                .context("failed to insert vote")?;
        }
    }
    tx.execute(
        "UPDATE voting_code SET used_at = datetime('now') WHERE id = ?1",
        [code_id],
    )
    .context("failed to mark voting code used")?;

    tx.commit().context("failed to commit ballot")?;
    Ok(BallotOutcome::Recorded)
}

pub fn election_results(db_path: &Path, election_id: i64) -> Result<Option<ElectionResults>> {
    let conn = open_connection(db_path)?;
    let Some(title) = conn
        .query_row(
            "SELECT title FROM election WHERE id = ?1",
            [election_id],
            |row| row.get::<_, String>(0),
        )
        .optional()
        .context("failed to look up election")?
    else {
        return Ok(None);
    };

    let (codes_issued, codes_used): (i64, i64) = conn
        .query_row(
            "SELECT COUNT(*), COUNT(used_at) FROM voting_code WHERE election_id = ?1",
            [election_id],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )
        .context("failed to count voting codes")?;

    let mut stmt = conn
        .prepare(
            "SELECT p.id, p.name, c.id, c.name, c.party,
                    (SELECT COUNT(*) FROM vote v WHERE v.candidate_id = c.id) AS votes
             FROM position p
             LEFT JOIN candidate c ON c.position_id = p.id
             WHERE p.election_id = ?1
             ORDER BY p.sort_order ASC, p.id ASC, votes DESC, c.name ASC",
        )
        .context("failed to prepare results query")?;
    let mut rows = stmt
        .query([election_id])
        .context("failed to run results query")?;

    let mut positions: Vec<PositionResult> = Vec::new();
    while let Some(row) = rows.next().context("failed to read results row")? {
        let position_id: i64 = row.get(0).context("failed to read position id")?;
        if positions.last().map(|p| p.position_id) != Some(position_id) {
            positions.push(PositionResult {
                position_id,
                name: row.get(1).context("failed to read position name")?,
                total_votes: 0,
                candidates: Vec::new(),
            });
        }
        let candidate_id: Option<i64> = row.get(2).context("failed to read candidate id")?;
        if let (Some(candidate_id), Some(position)) = (candidate_id, positions.last_mut()) {
            let votes: i64 = row.get(5).context("failed to read votes")?;
            position.total_votes += votes;
            position.candidates.push(CandidateTally {
                candidate_id,
                name: row.get(3).context("failed to read candidate name")?,
                party: row.get(4).context("failed to read candidate party")?,
                votes,
                share_percent: 0.0,
            });
        }
    }

    for position in &mut positions {
        let total = position.total_votes;
        for tally in &mut position.candidates {
            tally.share_percent = if total > 0 {
                round_one_decimal(tally.votes as f64 * 100.0 / total as f64)
            } else {
                0.0
            };
        }
    }

    Ok(Some(ElectionResults {
        election_id,
        title,
        codes_issued,
        codes_used,
        positions,
    }))
}

pub fn find_admin(db_path: &Path, username: &str) -> Result<Option<AdminRecord>> {
    let conn = open_connection(db_path)?;
    conn.query_row(
        "SELECT id, username, password_hash, salt FROM admin WHERE username = ?1",
        [username],
        |row| {
            Ok(AdminRecord {
                id: row.get(0)?,
                username: row.get(1)?,
                password_hash: row.get(2)?,
                salt: row.get(3)?,
            })
        },
    )
    .optional()
    .context("failed to look up admin")
}

pub fn count_admins(db_path: &Path) -> Result<i64> {
    let conn = open_connection(db_path)?;
    conn.query_row("SELECT COUNT(*) FROM admin", [], |row| row.get(0))
        .context("failed to count admins")
}

pub fn insert_admin(db_path: &Path, username: &str, password_hash: &str, salt: &str) -> Result<i64> {
    let conn = open_connection(db_path)?;
    conn.execute(
        "INSERT INTO admin(username, password_hash, salt) VALUES (?1, ?2, ?3)",
        params![username, password_hash, salt],
    )
    .with_context(|| format!("failed to insert admin {username}"))?;
    Ok(conn.last_insert_rowid())
}

pub fn update_admin_password(
    db_path: &Path,
    admin_id: i64,
    password_hash: &str,
    salt: &str,
) -> Result<RowChange> {
    let conn = open_connection(db_path)?;
    let affected = conn
        .execute(
            "UPDATE admin SET password_hash = ?1, salt = ?2 WHERE id = ?3",
            params![password_hash, salt, admin_id],
        )
        .context("failed to update admin password")?;
    Ok(if affected == 0 {
        RowChange::MissingTarget
    } else {
        RowChange::Applied(admin_id)
    })
}
