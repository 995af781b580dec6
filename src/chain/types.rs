//! Core data types for the mock voting chain
//!
//! This module defines the records the chain hands out:
//! - `Address`: A simulated account identifier
//! - `Voter`, `Candidate`, `BallotEntry`: Static roster and ballot entries
//! - `Election`: The single mutable election record
//! - `VoterStatus`: Derived registration/voting progress of an address
//! - `TxHash`: Fake transaction identifier returned by a cast vote

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A simulated account identifier
///
/// Never validated: any string is accepted, and comparisons against the
/// roster ignore case.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Address(String);

impl Address {
    pub fn new(address: impl Into<String>) -> Self {
        Self(address.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Case-insensitive comparison against another address string
    pub fn matches(&self, other: &str) -> bool {
        self.0.to_lowercase() == other.to_lowercase()
    }

    /// Abbreviated form for tables and headers, e.g. `0x1234...7890`
    pub fn short(&self) -> String {
        let chars: Vec<char> = self.0.chars().collect();
        if chars.len() <= 10 {
            return self.0.clone();
        }

        let head: String = chars[..6].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{}...{}", head, tail)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Address {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// A registered voter on the static roster
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Voter {
    pub id: String,
    pub address: Address,
    pub name: String,
    pub registration_date: String,
    pub has_voted: bool,
}

/// A candidate together with its (fixed) tally
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Candidate {
    pub id: u32,
    pub name: String,
    pub party: String,
    pub image: String,
    pub votes: u64,
    pub percentage: f64,
}

/// A candidate as shown on the ballot, without tallies
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BallotEntry {
    pub id: u32,
    pub name: String,
    pub party: String,
    pub image: String,
}

impl From<&Candidate> for BallotEntry {
    fn from(candidate: &Candidate) -> Self {
        Self {
            id: candidate.id,
            name: candidate.name.clone(),
            party: candidate.party.clone(),
            image: candidate.image.clone(),
        }
    }
}

/// Election results as returned by the chain
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ElectionResults {
    pub total_votes: u64,
    pub candidates: Vec<Candidate>,
}

impl ElectionResults {
    /// Candidates ordered by votes, highest first
    pub fn ranked(&self) -> Vec<&Candidate> {
        let mut ranked: Vec<&Candidate> = self.candidates.iter().collect();
        ranked.sort_by(|a, b| b.votes.cmp(&a.votes));
        ranked
    }
}

/// The single shared election record
///
/// `Default` is the inactive literal: not active, all text fields empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Election {
    pub active: bool,
    pub title: String,
    pub start_date: String,
    pub end_date: String,
}

impl Election {
    /// The inactive election literal
    pub fn inactive() -> Self {
        Self::default()
    }

    /// An active election with the given metadata
    pub fn open(
        title: impl Into<String>,
        start_date: impl Into<String>,
        end_date: impl Into<String>,
    ) -> Self {
        Self {
            active: true,
            title: title.into(),
            start_date: start_date.into(),
            end_date: end_date.into(),
        }
    }
}

/// Registration/voting progress of an address
///
/// Progresses `Unregistered → Registered → Voted` and never moves back.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum VoterStatus {
    Unregistered,
    Registered,
    Voted,
}

impl VoterStatus {
    /// Classify an address against a roster
    pub fn of(roster: &[Voter], address: &str) -> Self {
        match roster.iter().find(|v| v.address.matches(address)) {
            None => VoterStatus::Unregistered,
            Some(voter) if voter.has_voted => VoterStatus::Voted,
            Some(_) => VoterStatus::Registered,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            VoterStatus::Unregistered => "unregistered",
            VoterStatus::Registered => "registered",
            VoterStatus::Voted => "voted",
        }
    }

    pub fn can_vote(&self) -> bool {
        matches!(self, VoterStatus::Registered)
    }
}

impl fmt::Display for VoterStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fake transaction hash: `0x` followed by 64 lowercase hex characters
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TxHash(String);

impl TxHash {
    /// Generate a fresh random hash
    pub fn random() -> Self {
        let bytes: [u8; 32] = rand::random();
        Self(format!("0x{}", hex::encode(bytes)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TxHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Voter registration form as submitted from the registration page
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub id_number: String,
}

impl RegistrationForm {
    /// Names of required fields that are blank
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.name.trim().is_empty() {
            missing.push("name");
        }
        if self.email.trim().is_empty() {
            missing.push("email");
        }
        if self.id_number.trim().is_empty() {
            missing.push("idNumber");
        }
        missing
    }
}

/// Acknowledgement of a submitted registration form
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationReceipt {
    pub name: String,
    pub email: String,
    pub received_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster() -> Vec<Voter> {
        vec![
            Voter {
                id: "1".to_string(),
                address: Address::new("0xAbC0000000000000000000000000000000000001"),
                name: "Voted".to_string(),
                registration_date: "2024-04-01".to_string(),
                has_voted: true,
            },
            Voter {
                id: "2".to_string(),
                address: Address::new("0xabc0000000000000000000000000000000000002"),
                name: "Waiting".to_string(),
                registration_date: "2024-04-02".to_string(),
                has_voted: false,
            },
        ]
    }

    #[test]
    fn test_voter_status_classification() {
        let roster = roster();
        assert_eq!(
            VoterStatus::of(&roster, "0xabc0000000000000000000000000000000000001"),
            VoterStatus::Voted
        );
        assert_eq!(
            VoterStatus::of(&roster, "0xABC0000000000000000000000000000000000002"),
            VoterStatus::Registered
        );
        assert_eq!(VoterStatus::of(&roster, "0xdead"), VoterStatus::Unregistered);
        assert_eq!(VoterStatus::of(&[], ""), VoterStatus::Unregistered);
    }

    #[test]
    fn test_voter_status_serializes_lowercase() {
        let json = serde_json::to_string(&VoterStatus::Unregistered).unwrap();
        assert_eq!(json, "\"unregistered\"");
        assert_eq!(VoterStatus::Voted.to_string(), "voted");
        assert!(VoterStatus::Registered.can_vote());
        assert!(!VoterStatus::Voted.can_vote());
    }

    #[test]
    fn test_address_short() {
        let addr = Address::new("0x1234567890123456789012345678901234567890");
        assert_eq!(addr.short(), "0x1234...7890");
        assert_eq!(Address::new("0x12").short(), "0x12");
    }

    #[test]
    fn test_election_serializes_camel_case() {
        let election = Election::open("Board", "2024-05-01", "2024-05-02");
        let json = serde_json::to_value(&election).unwrap();
        assert_eq!(json["active"], true);
        assert_eq!(json["startDate"], "2024-05-01");
        assert_eq!(json["endDate"], "2024-05-02");
        assert_eq!(Election::inactive(), Election::default());
    }

    #[test]
    fn test_tx_hash_format() {
        let hash = TxHash::random();
        let s = hash.as_str();
        assert_eq!(s.len(), 66);
        assert!(s.starts_with("0x"));
        assert!(s[2..].chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(hash, TxHash::random());
    }

    #[test]
    fn test_registration_missing_fields() {
        let form = RegistrationForm {
            name: "Ada".to_string(),
            email: "  ".to_string(),
            id_number: String::new(),
        };
        assert_eq!(form.missing_fields(), vec!["email", "idNumber"]);
    }

    #[test]
    fn test_ranked_results() {
        let results = ElectionResults {
            total_votes: 3,
            candidates: vec![
                Candidate {
                    id: 1,
                    name: "A".to_string(),
                    party: "P".to_string(),
                    image: String::new(),
                    votes: 1,
                    percentage: 33.3,
                },
                Candidate {
                    id: 2,
                    name: "B".to_string(),
                    party: "Q".to_string(),
                    image: String::new(),
                    votes: 2,
                    percentage: 66.7,
                },
            ],
        };
        let ranked = results.ranked();
        assert_eq!(ranked[0].id, 2);
        assert_eq!(ranked[1].id, 1);
    }
}
