//! Admin dashboard
//!
//! - GET /admin - Authenticate and show the dashboard
//! - POST /admin/connect - Connect the admin wallet
//! - POST /admin/election - Open an election
//! - POST /admin/election/end - End the election

use axum::{extract::State, response::Html, Form};
use std::sync::Arc;

use super::layout::{alert, card, document, escape, link_button, post_button, site_header};
use crate::api::dto::CreateElectionRequest;
use crate::api::routes::election::validate_create_request;
use crate::api::state::AppState;
use crate::chain::{Address, ChainResult, Election, Voter};
use crate::websocket::WsEvent;

const SETTINGS: &[(&str, &str)] = &[
    ("Voter Verification", "Require ID verification for voter registration"),
    ("Public Results", "Show real-time results during active election"),
    ("Gas Optimization", "Optimize smart contracts for lower gas fees"),
];

/// GET /admin
pub async fn admin_page(State(state): State<Arc<AppState>>) -> Html<String> {
    match state.chain.connect_wallet(true).await {
        Ok(address) => dashboard(&state, &address, None).await,
        Err(e) => {
            tracing::debug!(error = %e, "Admin check failed");
            auth_page()
        }
    }
}

/// POST /admin/connect
pub async fn connect(State(state): State<Arc<AppState>>) -> Html<String> {
    match state.chain.connect_wallet(false).await {
        Ok(address) => {
            state.notify(WsEvent::wallet_connected(&address)).await;
            dashboard(&state, &address, None).await
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to connect wallet");
            auth_page()
        }
    }
}

/// POST /admin/election
pub async fn create_election(
    State(state): State<Arc<AppState>>,
    Form(form): Form<CreateElectionRequest>,
) -> Html<String> {
    let address = match authorize(&state).await {
        Ok(address) => address,
        Err(page) => return page,
    };

    if let Err(e) = validate_create_request(&form) {
        return dashboard(&state, &address, Some(Notice::error(e.to_string()))).await;
    }

    let notice = match state
        .chain
        .create_election(&form.title, &form.start_date, &form.end_date)
        .await
    {
        Ok(_) => match state.chain.get_election_status().await {
            Ok(election) => {
                state.notify(WsEvent::election_created(&election)).await;
                Notice::success(format!("Election \"{}\" is now active.", form.title))
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to read back election");
                Notice::error(e.to_string())
            }
        },
        Err(e) => {
            tracing::error!(error = %e, "Failed to create election");
            Notice::error(e.to_string())
        }
    };

    dashboard(&state, &address, Some(notice)).await
}

/// POST /admin/election/end
pub async fn end_election(State(state): State<Arc<AppState>>) -> Html<String> {
    let address = match authorize(&state).await {
        Ok(address) => address,
        Err(page) => return page,
    };

    let notice = match state.chain.end_election().await {
        Ok(_) => {
            state.notify(WsEvent::election_ended()).await;
            Notice::success("Election ended.".to_string())
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to end election");
            Notice::error(e.to_string())
        }
    };

    dashboard(&state, &address, Some(notice)).await
}

/// Outcome banner shown above the dashboard after an action
struct Notice {
    failed: bool,
    message: String,
}

impl Notice {
    fn success(message: String) -> Self {
        Self {
            failed: false,
            message,
        }
    }

    fn error(message: String) -> Self {
        Self {
            failed: true,
            message,
        }
    }

    fn render(&self) -> String {
        let title = if self.failed { "Action Failed" } else { "Done" };
        alert(self.failed, title, &escape(&self.message))
    }
}

/// Connected admin address, or the page to show instead
async fn authorize(state: &AppState) -> Result<Address, Html<String>> {
    let address = state.chain.connect_wallet(true).await.map_err(|e| {
        tracing::warn!(error = %e, "Admin action without a wallet");
        auth_page()
    })?;

    match state.chain.is_admin(address.as_str()).await {
        Ok(true) => Ok(address),
        Ok(false) => Err(denied_page(&address)),
        Err(e) => {
            tracing::error!(error = %e, "Admin check failed");
            Err(auth_page())
        }
    }
}

async fn dashboard(state: &AppState, address: &Address, notice: Option<Notice>) -> Html<String> {
    match state.chain.is_admin(address.as_str()).await {
        Ok(true) => {}
        Ok(false) => return denied_page(address),
        Err(e) => {
            tracing::error!(error = %e, "Admin check failed");
            return auth_page();
        }
    }

    match load_dashboard(state).await {
        Ok((voters, election)) => {
            let notice = notice.map(|n| n.render()).unwrap_or_default();
            render(
                Some(address),
                &format!(
                    "{notice}<nav style=\"display:flex;gap:1rem;margin-bottom:1rem\">\
                     <a href=\"#election\">Election Management</a>\
                     <a href=\"#voters\">Voter Registry</a>\
                     <a href=\"#settings\">System Settings</a></nav>{}{}{}",
                    election_card(&election),
                    registry_card(&voters),
                    settings_card()
                ),
            )
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to load admin dashboard");
            render(
                Some(address),
                &alert(true, "Dashboard Unavailable", &escape(&e.to_string())),
            )
        }
    }
}

async fn load_dashboard(state: &AppState) -> ChainResult<(Vec<Voter>, Election)> {
    let voters = state.chain.get_voter_list().await?;
    let election = state.chain.get_election_status().await?;
    Ok((voters, election))
}

fn render(address: Option<&Address>, content: &str) -> Html<String> {
    let extra = match address {
        Some(address) => format!(
            "<span class=\"mono\">Admin: {}</span>{}",
            escape(&address.short()),
            link_button("/", "Exit Admin", "")
        ),
        None => String::new(),
    };
    let main = format!("<div class=\"container\" style=\"max-width:64rem\">{content}</div>");
    document("Admin", &site_header(&[], &extra), &main)
}

fn auth_page() -> Html<String> {
    let body = post_button("/admin/connect", "Connect Admin Wallet", "primary");
    render(
        None,
        &card(
            "Admin Authentication",
            "Connect your wallet to access the admin panel.",
            &body,
            "",
        ),
    )
}

fn denied_page(address: &Address) -> Html<String> {
    let body = format!(
        "<p>The connected wallet is not authorized to access the admin panel. \
         Please connect with an admin wallet.</p>{}",
        post_button("/logout", "Connect Different Wallet", "")
    );
    render(
        Some(address),
        &card(
            "Access Denied",
            "Your wallet does not have admin privileges.",
            &body,
            "",
        ),
    )
}

fn election_card(election: &Election) -> String {
    let body = if election.active {
        format!(
            "<div class=\"alert\"><h3>Active Election</h3><table>\
             <tr><th>Title</th><td>{}</td></tr>\
             <tr><th>Status</th><td>In Progress</td></tr>\
             <tr><th>Start Date</th><td>{}</td></tr>\
             <tr><th>End Date</th><td>{}</td></tr></table></div>{}",
            escape(&election.title),
            escape(&election.start_date),
            escape(&election.end_date),
            post_button("/admin/election/end", "End Election", "danger")
        )
    } else {
        "<form method=\"post\" action=\"/admin/election\">\
         <label for=\"title\">Election Title</label>\
         <input type=\"text\" id=\"title\" name=\"title\" placeholder=\"e.g., Presidential Election 2024\" required>\
         <label for=\"startDate\">Start Date</label>\
         <input type=\"date\" id=\"startDate\" name=\"startDate\" required>\
         <label for=\"endDate\">End Date</label>\
         <input type=\"date\" id=\"endDate\" name=\"endDate\" required>\
         <p><button type=\"submit\" class=\"button primary\">Create Election</button></p></form>"
            .to_string()
    };

    format!(
        "<div id=\"election\">{}</div>",
        card(
            "Election Management",
            "Create, manage, and end elections.",
            &body,
            ""
        )
    )
}

fn registry_card(voters: &[Voter]) -> String {
    let body = if voters.is_empty() {
        "<p class=\"description\">No registered voters found.</p>".to_string()
    } else {
        let rows: String = voters
            .iter()
            .map(|v| {
                format!(
                    "<tr><td>{}</td><td class=\"mono\">{}</td><td>{}</td><td>{}</td><td>Active</td></tr>",
                    escape(&v.name),
                    escape(&v.address.short()),
                    escape(&v.registration_date),
                    if v.has_voted { "Yes" } else { "No" }
                )
            })
            .collect();
        format!(
            "<table><thead><tr><th>Name</th><th>Wallet Address</th><th>Registration Date</th>\
             <th>Voted</th><th>Status</th></tr></thead><tbody>{rows}</tbody></table>"
        )
    };

    format!(
        "<div id=\"voters\">{}</div>",
        card(
            "Voter Registry",
            "View and manage registered voters.",
            &body,
            ""
        )
    )
}

fn settings_card() -> String {
    let rows: String = SETTINGS
        .iter()
        .map(|(name, description)| {
            format!(
                "<label style=\"display:flex;align-items:center\"><span><strong>{name}</strong><br>\
                 <span class=\"description\">{description}</span></span>\
                 <input type=\"checkbox\" checked disabled style=\"margin-left:auto\"></label>"
            )
        })
        .collect();

    format!(
        "<div id=\"settings\">{}</div>",
        card(
            "System Settings",
            "Configure blockchain voting system settings.",
            &rows,
            ""
        )
    )
}
