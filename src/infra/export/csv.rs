use anyhow::{Context, Result};

use crate::domain::entities::election::{CandidateRow, VotingCodeRow};

pub const CANDIDATE_HEADERS: [&str; 5] = ["Name", "Party", "Position", "Election", "Votes"];
pub const VOTING_CODE_HEADERS: [&str; 4] = ["Code", "Election", "Status", "Used at"];

fn write_records<I, R>(headers: &[&str], records: I) -> Result<Vec<u8>>
where
    I: IntoIterator<Item = R>,
    R: IntoIterator<Item = String>,
{
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record(headers)
        .context("failed to write csv header")?;
    for record in records {
        writer
            .write_record(record)
            .context("failed to write csv record")?;
    }
    writer
        .into_inner()
        .map_err(|err| anyhow::anyhow!("failed to flush csv: {}", err.error()))
}

pub fn candidates_to_csv(rows: &[CandidateRow]) -> Result<Vec<u8>> {
    write_records(
        &CANDIDATE_HEADERS,
        rows.iter().map(|row| {
            [
                row.name.clone(),
                row.party.clone(),
                row.position_name.clone(),
                row.election_title.clone(),
                row.votes.to_string(),
            ]
        }),
    )
}

pub fn voting_codes_to_csv(rows: &[VotingCodeRow]) -> Result<Vec<u8>> {
    write_records(
        &VOTING_CODE_HEADERS,
        rows.iter().map(|row| {
            [
                row.code.clone(),
                row.election_title.clone(),
                if row.used { "used" } else { "unused" }.to_string(),
                row.used_at.clone().unwrap_or_default(),
            ]
        }),
    )
}
