//! Voting page
//!
//! - GET /vote - Check the stored connection, then show the ballot or a prompt
//! - POST /vote/connect - Connect the wallet
//! - POST /vote - Cast a vote for the selected candidate

use axum::{extract::State, response::Html, Form};
use serde::Deserialize;
use std::sync::Arc;

use super::layout::{alert, card, document, escape, link_button, page_nav, post_button, site_header};
use crate::api::state::AppState;
use crate::chain::{Address, BallotEntry, TxHash, VoterStatus};
use crate::websocket::WsEvent;

const TITLE: &str = "Cast Your Vote";

/// Submitted ballot; `candidate` is absent when nothing was selected
#[derive(Debug, Default, Deserialize)]
pub struct VoteForm {
    #[serde(default)]
    pub candidate: Option<String>,
}

impl VoteForm {
    fn candidate_id(&self) -> Option<i64> {
        self.candidate
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .and_then(|value| value.parse().ok())
    }
}

/// GET /vote
pub async fn vote_page(State(state): State<Arc<AppState>>) -> Html<String> {
    match state.chain.connect_wallet(true).await {
        Ok(address) => render(&connected_view(&state, &address).await),
        Err(e) => {
            tracing::debug!(error = %e, "No wallet connected");
            render(&connect_card())
        }
    }
}

/// POST /vote/connect
pub async fn connect(State(state): State<Arc<AppState>>) -> Html<String> {
    match state.chain.connect_wallet(false).await {
        Ok(address) => {
            state.notify(WsEvent::wallet_connected(&address)).await;
            render(&connected_view(&state, &address).await)
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to connect wallet");
            render(&connect_card())
        }
    }
}

/// POST /vote
pub async fn submit(
    State(state): State<Arc<AppState>>,
    Form(form): Form<VoteForm>,
) -> Html<String> {
    let address = match state.chain.connect_wallet(true).await {
        Ok(address) => address,
        Err(e) => {
            tracing::warn!(error = %e, "Vote submitted without a wallet");
            return render(&connect_card());
        }
    };

    // Only the registered view carries a ballot
    match state.chain.check_voter_status(address.as_str()).await {
        Ok(status) if status.can_vote() => {}
        Ok(status) => {
            tracing::warn!(address = %address, status = %status, "Vote rejected");
            return render(&connected_view(&state, &address).await);
        }
        Err(e) => {
            tracing::error!(error = %e, address = %address, "Voter status check failed");
            return render(&connect_card());
        }
    }

    let Some(candidate_id) = form.candidate_id() else {
        return render(&ballot_view(&state, Some("Select a candidate before submitting.")).await);
    };

    match state.chain.cast_vote(candidate_id).await {
        Ok(tx_hash) => {
            state.notify(WsEvent::vote_cast(candidate_id, &tx_hash)).await;
            render(&voted_card(Some(&tx_hash)))
        }
        Err(e) => {
            tracing::error!(error = %e, candidate_id, "Failed to cast vote");
            render(&ballot_view(&state, Some(&e.to_string())).await)
        }
    }
}

fn render(content: &str) -> Html<String> {
    let main = format!("<div class=\"container\" style=\"max-width:42rem\">{content}</div>");
    document("Vote", &site_header(&page_nav("/vote"), ""), &main)
}

async fn connected_view(state: &AppState, address: &Address) -> String {
    match state.chain.check_voter_status(address.as_str()).await {
        Ok(VoterStatus::Unregistered) => not_registered_card(),
        Ok(VoterStatus::Voted) => voted_card(None),
        Ok(VoterStatus::Registered) => ballot_view(state, None).await,
        Err(e) => {
            tracing::error!(error = %e, address = %address, "Voter status check failed");
            connect_card()
        }
    }
}

fn connect_card() -> String {
    let body = format!(
        "<p>Connect your Ethereum wallet to verify your identity and cast your vote.</p>{}",
        post_button("/vote/connect", "Connect Wallet", "primary")
    );
    card(TITLE, "Connect Your Wallet", &body, "")
}

fn not_registered_card() -> String {
    let body = alert(
        true,
        "Not Registered",
        &format!(
            "You are not registered to vote. Please register first. {}",
            link_button("/register", "Register to Vote", "")
        ),
    );
    card(TITLE, "Registration required", &body, "")
}

fn voted_card(tx_hash: Option<&TxHash>) -> String {
    let receipt = tx_hash
        .map(|tx| {
            format!(
                "<p><strong>Vote Successfully Cast!</strong></p>\
                 <p>Transaction Hash:</p><p class=\"mono\">{}</p>",
                escape(tx.as_str())
            )
        })
        .unwrap_or_default();

    let body = format!(
        "{receipt}<p>Thank you for participating in this election. \
         Your vote has been securely recorded and cannot be altered.</p>"
    );
    card(
        "Vote Recorded",
        "Your vote has been recorded on the blockchain.",
        &body,
        &link_button("/results", "View Election Results", ""),
    )
}

async fn ballot_view(state: &AppState, error: Option<&str>) -> String {
    match state.chain.ballot().await {
        Ok(entries) => ballot_card(&entries, error),
        Err(e) => {
            tracing::error!(error = %e, "Failed to load ballot");
            let body = alert(true, "Ballot Unavailable", &escape(&e.to_string()));
            card(TITLE, "Select Your Candidate", &body, "")
        }
    }
}

fn ballot_card(entries: &[BallotEntry], error: Option<&str>) -> String {
    let error = error
        .map(|message| alert(true, "Vote Not Submitted", &escape(message)))
        .unwrap_or_default();

    let options: String = entries
        .iter()
        .map(|c| {
            format!(
                "<label for=\"candidate-{id}\" class=\"card\" style=\"display:flex;gap:1rem;align-items:center\">\
                 <input type=\"radio\" name=\"candidate\" id=\"candidate-{id}\" value=\"{id}\">\
                 <img src=\"{image}\" alt=\"{name}\" width=\"60\" height=\"60\">\
                 <span><strong>{name}</strong><br>{party}</span></label>",
                id = c.id,
                image = escape(&c.image),
                name = escape(&c.name),
                party = escape(&c.party),
            )
        })
        .collect();

    let body = format!(
        "{error}<form method=\"post\" action=\"/vote\">{options}\
         <button type=\"submit\" class=\"button primary\">Submit Vote</button></form>"
    );
    card(
        "Select Your Candidate",
        "Choose one candidate from the list below.",
        &body,
        "",
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::fixtures;

    #[test]
    fn test_vote_form_candidate_id() {
        let form = |c: Option<&str>| VoteForm {
            candidate: c.map(str::to_string),
        };
        assert_eq!(form(Some("2")).candidate_id(), Some(2));
        assert_eq!(form(Some(" 42 ")).candidate_id(), Some(42));
        assert_eq!(form(Some("")).candidate_id(), None);
        assert_eq!(form(Some("abc")).candidate_id(), None);
        assert_eq!(form(None).candidate_id(), None);
    }

    #[test]
    fn test_ballot_card_lists_candidates() {
        let html = ballot_card(&fixtures::ballot(), None);
        assert!(html.contains("Jane Smith"));
        assert!(html.contains("Green Party"));
        assert!(html.contains("value=\"4\""));
        assert!(!html.contains("Vote Not Submitted"));
    }

    #[test]
    fn test_voted_card_shows_hash() {
        let tx = TxHash::random();
        let html = voted_card(Some(&tx));
        assert!(html.contains("Vote Successfully Cast!"));
        assert!(html.contains(tx.as_str()));
        assert!(html.contains("href=\"/results\""));

        let html = voted_card(None);
        assert!(html.contains("Vote Recorded"));
        assert!(!html.contains("Transaction Hash"));
    }
}
