//! BlockVote CLI
//!
//! Command-line client for a running BlockVote server:
//! - Connect or disconnect the wallet
//! - Inspect voters, candidates and results
//! - Cast votes and submit registrations
//! - Manage the election

use anyhow::{anyhow, bail, Context};
use blockvote::chain::{BallotEntry, Election, ElectionResults, Voter};
use clap::{Parser, Subcommand, ValueEnum};
use reqwest::Url;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "blockvote-cli")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Command-line client for the BlockVote server")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Server URL
    #[arg(long, default_value = "http://localhost:8080", global = true)]
    pub api_url: String,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table, global = true)]
    pub format: OutputFormat,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Connect the wallet
    Connect {
        /// Only report an existing connection
        #[arg(long)]
        check: bool,
    },

    /// Disconnect the wallet
    Disconnect,

    /// Check whether an address is an admin
    Admin {
        address: String,
    },

    /// Show the voter status of an address
    Status {
        address: String,
    },

    /// List registered voters
    Voters,

    /// List candidates on the ballot
    Candidates,

    /// Cast a vote
    Vote {
        /// Candidate ID (not validated by the server)
        candidate_id: i64,
    },

    /// Show election results
    Results,

    /// Submit a voter registration
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        id_number: String,
    },

    /// Manage the election
    Election {
        #[command(subcommand)]
        action: ElectionAction,
    },

    /// Show server health
    Health,

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
pub enum ElectionAction {
    /// Show the current election
    Show,

    /// Open an election
    Create {
        title: String,
        /// Start date, e.g. 2024-11-01
        #[arg(long)]
        start: String,
        /// End date, e.g. 2024-11-05
        #[arg(long)]
        end: String,
    },

    /// End the current election
    End,
}

/// Thin wrapper over the JSON API
struct ApiClient {
    http: reqwest::Client,
    base: String,
}

impl ApiClient {
    fn new(api_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base: api_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    /// URL for a path built from segments; each segment is percent-encoded
    fn segment_url(&self, segments: &[&str]) -> anyhow::Result<Url> {
        let mut url =
            Url::parse(&self.base).with_context(|| format!("Invalid server URL: {}", self.base))?;
        url.path_segments_mut()
            .map_err(|_| anyhow!("Server URL cannot carry a path: {}", self.base))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn send<T: DeserializeOwned>(&self, request: reqwest::RequestBuilder) -> anyhow::Result<T> {
        let response = request.send().await.with_context(|| {
            format!(
                "Cannot connect to BlockVote at {}. Is the server running? (cargo run --bin blockvote)",
                self.base
            )
        })?;

        let status = response.status();
        let text = response.text().await.unwrap_or_default();
        if !status.is_success() {
            bail!("Request failed ({}): {}", status, error_message(&text));
        }

        // 204 responses carry no body
        let body = if text.trim().is_empty() { "null" } else { text.as_str() };
        serde_json::from_str(body).context("Unexpected response body")
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> anyhow::Result<T> {
        self.send(self.http.get(self.url(path))).await
    }

    async fn get_segments<T: DeserializeOwned>(&self, segments: &[&str]) -> anyhow::Result<T> {
        let url = self.segment_url(segments)?;
        self.send(self.http.get(url)).await
    }

    async fn post<T: DeserializeOwned>(&self, path: &str, body: Value) -> anyhow::Result<T> {
        self.send(self.http.post(self.url(path)).json(&body)).await
    }

    async fn delete<T: DeserializeOwned>(&self, path: &str) -> anyhow::Result<T> {
        self.send(self.http.delete(self.url(path))).await
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let client = ApiClient::new(&cli.api_url);
    let json_output = cli.format == OutputFormat::Json;

    match cli.command {
        Commands::Connect { check } => {
            let path = format!("/api/v1/wallet/connect?checkOnly={}", check);
            let wallet: Value = client.post(&path, json!({})).await?;
            if json_output {
                print_json(&wallet)?;
            } else {
                println!("Connected: {}", wallet["address"].as_str().unwrap_or("-"));
            }
        }

        Commands::Disconnect => {
            let _: Value = client.delete("/api/v1/wallet").await?;
            if json_output {
                print_json(&json!({ "connected": false }))?;
            } else {
                println!("Wallet disconnected");
            }
        }

        Commands::Admin { address } => {
            let result: Value = client
                .get_segments(&["api", "v1", "admins", address.as_str()])
                .await?;
            if json_output {
                print_json(&result)?;
            } else {
                let is_admin = result["isAdmin"].as_bool().unwrap_or(false);
                println!("{}: {}", address, if is_admin { "admin" } else { "not an admin" });
            }
        }

        Commands::Status { address } => {
            let result: Value = client
                .get_segments(&["api", "v1", "voters", address.as_str(), "status"])
                .await?;
            if json_output {
                print_json(&result)?;
            } else {
                println!("{}: {}", address, result["status"].as_str().unwrap_or("unknown"));
            }
        }

        Commands::Voters => {
            let result: Value = client.get("/api/v1/voters").await?;
            if json_output {
                print_json(&result)?;
            } else {
                let voters: Vec<Voter> = serde_json::from_value(result["voters"].clone())?;
                print_voters(&voters);
            }
        }

        Commands::Candidates => {
            let ballot: Vec<BallotEntry> = client.get("/api/v1/candidates").await?;
            if json_output {
                print_json(&ballot)?;
            } else {
                println!("{:<4} {:<20} {}", "ID", "Name", "Party");
                println!("{}", "-".repeat(45));
                for entry in ballot {
                    println!("{:<4} {:<20} {}", entry.id, entry.name, entry.party);
                }
            }
        }

        Commands::Vote { candidate_id } => {
            let result: Value = client
                .post("/api/v1/votes", json!({ "candidateId": candidate_id }))
                .await?;
            if json_output {
                print_json(&result)?;
            } else {
                println!("Vote cast for candidate {}", candidate_id);
                println!("Transaction: {}", result["txHash"].as_str().unwrap_or("-"));
            }
        }

        Commands::Results => {
            let results: ElectionResults = client.get("/api/v1/results").await?;
            if json_output {
                print_json(&results)?;
            } else {
                print_results(&results);
            }
        }

        Commands::Register {
            name,
            email,
            id_number,
        } => {
            let receipt: Value = client
                .post(
                    "/api/v1/registrations",
                    json!({ "name": name, "email": email, "idNumber": id_number }),
                )
                .await?;
            if json_output {
                print_json(&receipt)?;
            } else {
                println!(
                    "Registration received for {} at {}",
                    receipt["name"].as_str().unwrap_or("-"),
                    receipt["receivedAt"].as_str().unwrap_or("-")
                );
            }
        }

        Commands::Election { action } => {
            let election: Election = match action {
                ElectionAction::Show => client.get("/api/v1/election").await?,
                ElectionAction::Create { title, start, end } => {
                    let result: Value = client
                        .post(
                            "/api/v1/election",
                            json!({ "title": title, "startDate": start, "endDate": end }),
                        )
                        .await?;
                    serde_json::from_value(result["election"].clone())?
                }
                ElectionAction::End => {
                    let result: Value = client.delete("/api/v1/election").await?;
                    serde_json::from_value(result["election"].clone())?
                }
            };

            if json_output {
                print_json(&election)?;
            } else {
                print_election(&election);
            }
        }

        Commands::Health => {
            let health: Value = client.get("/health").await?;
            if json_output {
                print_json(&health)?;
            } else {
                println!("BlockVote v{}", health["version"].as_str().unwrap_or("?"));
                println!();
                println!("Status: {}", health["status"].as_str().unwrap_or("unknown"));
                println!("Chain: {}", health["chain"].as_str().unwrap_or("unknown"));
                println!(
                    "WebSocket connections: {}",
                    health["ws_connections"].as_u64().unwrap_or(0)
                );
                if let Some(uptime) = health["uptime_seconds"].as_u64() {
                    println!("Uptime: {}", format_duration(uptime));
                }
            }
        }

        Commands::Config { output } => {
            let config = blockvote::config::generate_default_config();

            match output {
                Some(path) => {
                    if let Some(parent) = path.parent() {
                        std::fs::create_dir_all(parent)?;
                    }
                    std::fs::write(&path, &config)?;
                    println!("Config written to {:?}", path);
                }
                None => {
                    print!("{}", config);
                }
            }
        }
    }

    Ok(())
}

fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Pull `error.message` out of an API error body, or return the body as-is
fn error_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v["error"]["message"].as_str().map(str::to_string))
        .unwrap_or_else(|| body.to_string())
}

fn print_voters(voters: &[Voter]) {
    if voters.is_empty() {
        println!("No registered voters found.");
        return;
    }

    println!("{:<16} {:<16} {:<12} {}", "Name", "Address", "Registered", "Voted");
    println!("{}", "-".repeat(52));
    for voter in voters {
        println!(
            "{:<16} {:<16} {:<12} {}",
            voter.name,
            voter.address.short(),
            voter.registration_date,
            if voter.has_voted { "Yes" } else { "No" }
        );
    }
}

fn print_results(results: &ElectionResults) {
    println!("Total votes: {}", results.total_votes);
    println!();
    for candidate in results.ranked() {
        println!(
            "{:<16} {:<20} {:>5} {:>6.1}%  {}",
            candidate.name,
            candidate.party,
            candidate.votes,
            candidate.percentage,
            bar(candidate.percentage, 30)
        );
    }
}

fn print_election(election: &Election) {
    if !election.active {
        println!("No active election");
        return;
    }
    println!("Title: {}", election.title);
    println!("Status: In Progress");
    println!("Start: {}", election.start_date);
    println!("End: {}", election.end_date);
}

/// Text progress bar for a percentage
fn bar(percentage: f64, width: usize) -> String {
    let filled = ((percentage.clamp(0.0, 100.0) / 100.0) * width as f64).round() as usize;
    format!("{}{}", "#".repeat(filled), ".".repeat(width - filled))
}

fn format_duration(seconds: u64) -> String {
    if seconds < 60 {
        format!("{}s", seconds)
    } else if seconds < 3600 {
        format!("{}m {}s", seconds / 60, seconds % 60)
    } else if seconds < 86400 {
        format!("{}h {}m", seconds / 3600, (seconds % 3600) / 60)
    } else {
        format!("{}d {}h", seconds / 86400, (seconds % 86400) / 3600)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_message() {
        let body = r#"{"error":{"code":"WALLET_NOT_CONNECTED","message":"No wallet connected"},"request_id":"x"}"#;
        assert_eq!(error_message(body), "No wallet connected");
        assert_eq!(error_message("Bad Gateway"), "Bad Gateway");
    }

    #[test]
    fn test_segment_url_encodes_address() {
        let client = ApiClient::new("http://localhost:8080/");
        let url = client
            .segment_url(&["api", "v1", "voters", "0xab/cd?x#y", "status"])
            .unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:8080/api/v1/voters/0xab%2Fcd%3Fx%23y/status"
        );

        let url = client.segment_url(&["api", "v1", "admins", "0x12"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/api/v1/admins/0x12");
        assert_eq!(url.path_segments().unwrap().count(), 4);
    }

    #[test]
    fn test_bar() {
        assert_eq!(bar(50.0, 10), "#####.....");
        assert_eq!(bar(0.0, 4), "....");
        assert_eq!(bar(150.0, 4), "####");
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(42), "42s");
        assert_eq!(format_duration(125), "2m 5s");
        assert_eq!(format_duration(7260), "2h 1m");
        assert_eq!(format_duration(90000), "1d 1h");
    }

    #[test]
    fn test_cli_parses_election_create() {
        let cli = Cli::try_parse_from([
            "blockvote-cli",
            "--format",
            "json",
            "election",
            "create",
            "Mayor",
            "--start",
            "2024-11-01",
            "--end",
            "2024-11-05",
        ])
        .unwrap();

        assert!(cli.format == OutputFormat::Json);
        match cli.command {
            Commands::Election {
                action: ElectionAction::Create { title, start, end },
            } => {
                assert_eq!(title, "Mayor");
                assert_eq!(start, "2024-11-01");
                assert_eq!(end, "2024-11-05");
            }
            _ => panic!("expected election create"),
        }
    }

    #[test]
    fn test_api_client_trims_slash() {
        let client = ApiClient::new("http://localhost:8080/");
        assert_eq!(client.url("/health"), "http://localhost:8080/health");
    }
}
