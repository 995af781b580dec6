//! Results page

use axum::{extract::State, response::Html};
use chrono::{DateTime, Utc};
use std::sync::Arc;

use super::layout::{alert, card, document, escape, link_button, page_nav, site_header};
use crate::api::state::AppState;
use crate::chain::ElectionResults;

/// GET /results
pub async fn results_page(State(state): State<Arc<AppState>>) -> Html<String> {
    let content = match state.chain.get_election_results().await {
        Ok(results) => results_card(&results, Utc::now()),
        Err(e) => {
            tracing::error!(error = %e, "Failed to fetch results");
            card(
                "Election Results",
                "Results could not be loaded.",
                &alert(true, "Results Unavailable", &escape(&e.to_string())),
                &link_button("/results", "Refresh", ""),
            )
        }
    };

    let main = format!(
        "<div class=\"container\">{content}{}</div>",
        card(
            "Blockchain Verification",
            "All votes are recorded on the Ethereum blockchain for transparency and verification.",
            "<p>You can verify the election results by checking the smart contract directly on the blockchain.</p>",
            "",
        )
    );
    document("Results", &site_header(&page_nav("/results"), ""), &main)
}

fn results_card(results: &ElectionResults, updated_at: DateTime<Utc>) -> String {
    let rows: String = results
        .ranked()
        .into_iter()
        .map(|c| {
            format!(
                "<div style=\"margin-bottom:1rem\">\
                 <div style=\"display:flex;gap:.75rem;align-items:center\">\
                 <img src=\"{image}\" alt=\"{name}\" width=\"40\" height=\"40\">\
                 <span><strong>{name}</strong><br>{party}</span>\
                 <span style=\"margin-left:auto\">{votes} votes ({pct:.1}%)</span></div>\
                 <div class=\"progress\"><div style=\"width:{pct}%\"></div></div></div>",
                image = escape(&c.image),
                name = escape(&c.name),
                party = escape(&c.party),
                votes = c.votes,
                pct = c.percentage,
            )
        })
        .collect();

    let description = format!(
        "Total votes: {} \u{2022} Last updated: {}",
        results.total_votes,
        updated_at.format("%H:%M:%S UTC")
    );

    card(
        "Election Results",
        &description,
        &rows,
        &link_button("/results", "Refresh", ""),
    )
}
