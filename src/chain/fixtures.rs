//! Fixed chain data
//!
//! The roster, tallies and connected account the mock chain serves.

use super::types::{Address, BallotEntry, Candidate, ElectionResults, Voter};

/// The account every wallet connection resolves to
pub const DEMO_ACCOUNT: &str = "0x1234567890123456789012345678901234567890";

pub const PLACEHOLDER_IMAGE: &str = "/placeholder.svg?height=100&width=100";

pub fn demo_account() -> Address {
    Address::new(DEMO_ACCOUNT)
}

/// The static voter roster
pub fn voter_roster() -> Vec<Voter> {
    [
        ("1", "0x1234567890123456789012345678901234567890", "Alice Johnson", "2024-04-01", true),
        ("2", "0x2345678901234567890123456789012345678901", "Bob Smith", "2024-04-02", false),
        ("3", "0x3456789012345678901234567890123456789012", "Charlie Brown", "2024-04-03", true),
        ("4", "0x4567890123456789012345678901234567890123", "Diana Prince", "2024-04-04", false),
        ("5", "0x5678901234567890123456789012345678901234", "Edward Stark", "2024-04-05", true),
    ]
    .into_iter()
    .map(|(id, address, name, date, has_voted)| Voter {
        id: id.to_string(),
        address: Address::new(address),
        name: name.to_string(),
        registration_date: date.to_string(),
        has_voted,
    })
    .collect()
}

/// The static result set
pub fn election_results() -> ElectionResults {
    let candidates = [
        (1, "Jane Smith", "Progressive Party", 68, 43.6),
        (2, "John Doe", "Conservative Party", 52, 33.3),
        (3, "Alex Johnson", "Liberty Party", 24, 15.4),
        (4, "Sam Wilson", "Green Party", 12, 7.7),
    ]
    .into_iter()
    .map(|(id, name, party, votes, percentage)| Candidate {
        id,
        name: name.to_string(),
        party: party.to_string(),
        image: PLACEHOLDER_IMAGE.to_string(),
        votes,
        percentage,
    })
    .collect();

    ElectionResults {
        total_votes: 156,
        candidates,
    }
}

/// Candidates as listed on the ballot
pub fn ballot() -> Vec<BallotEntry> {
    election_results()
        .candidates
        .iter()
        .map(BallotEntry::from)
        .collect()
}
