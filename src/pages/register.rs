//! Voter registration page
//!
//! - GET /register - Connect card
//! - POST /register/connect - Connect the wallet, then show the form
//! - POST /register - Submit the registration form

use axum::{extract::State, response::Html, Form};
use std::sync::Arc;

use super::layout::{alert, card, document, escape, page_nav, post_button, site_header};
use crate::api::state::AppState;
use crate::chain::{Address, RegistrationForm, RegistrationReceipt};
use crate::websocket::WsEvent;

const TITLE: &str = "Voter Registration";
const DESCRIPTION: &str = "Register to participate in the blockchain voting system.";

/// GET /register
pub async fn register_page() -> Html<String> {
    render(&connect_card(None))
}

/// POST /register/connect
pub async fn connect(State(state): State<Arc<AppState>>) -> Html<String> {
    match state.chain.connect_wallet(false).await {
        Ok(address) => {
            state.notify(WsEvent::wallet_connected(&address)).await;
            render(&form_card(&address, &RegistrationForm::default(), None))
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to connect wallet");
            render(&connect_card(Some(&e.to_string())))
        }
    }
}

/// POST /register
pub async fn submit(
    State(state): State<Arc<AppState>>,
    Form(form): Form<RegistrationForm>,
) -> Html<String> {
    let address = match state.chain.connect_wallet(true).await {
        Ok(address) => address,
        Err(e) => {
            tracing::warn!(error = %e, "Registration submitted without a wallet");
            return render(&connect_card(None));
        }
    };

    let missing = form.missing_fields();
    if !missing.is_empty() {
        let message = format!("Please fill in: {}", missing.join(", "));
        return render(&form_card(&address, &form, Some(&message)));
    }

    match state.chain.submit_registration(form.clone()).await {
        Ok(receipt) => render(&receipt_card(&address, &receipt)),
        Err(e) => {
            tracing::error!(error = %e, "Registration failed");
            render(&form_card(&address, &form, Some(&e.to_string())))
        }
    }
}

fn render(content: &str) -> Html<String> {
    let main = format!("<div class=\"container\" style=\"max-width:28rem\">{content}</div>");
    document("Register", &site_header(&page_nav("/register"), ""), &main)
}

fn footer() -> String {
    "<p>Already registered? <a href=\"/vote\">Cast your vote</a></p>".to_string()
}

fn connect_card(error: Option<&str>) -> String {
    let error = error
        .map(|message| alert(true, "Connection Failed", &escape(message)))
        .unwrap_or_default();

    let body = format!(
        "{error}<p>Connect your Ethereum wallet to begin the registration process.</p>{}",
        post_button("/register/connect", "Connect Wallet", "primary")
    );
    card(TITLE, DESCRIPTION, &body, &footer())
}

fn wallet_alert(address: &Address) -> String {
    alert(
        false,
        "Wallet Connected",
        &format!("<span class=\"mono\">{}</span>", escape(address.as_str())),
    )
}

fn form_card(address: &Address, form: &RegistrationForm, error: Option<&str>) -> String {
    let error = error
        .map(|message| alert(true, "Incomplete Form", &escape(message)))
        .unwrap_or_default();

    let body = format!(
        "{wallet}{error}<form method=\"post\" action=\"/register\">\
         <label for=\"name\">Full Name</label>\
         <input type=\"text\" id=\"name\" name=\"name\" placeholder=\"Enter your full name\" required value=\"{name}\">\
         <label for=\"email\">Email Address</label>\
         <input type=\"email\" id=\"email\" name=\"email\" placeholder=\"Enter your email\" required value=\"{email}\">\
         <label for=\"idNumber\">ID Number</label>\
         <input type=\"text\" id=\"idNumber\" name=\"idNumber\" placeholder=\"Enter your ID number\" required value=\"{id_number}\">\
         <p class=\"description\">This will be used for verification purposes only and will be encrypted.</p>\
         <button type=\"submit\" class=\"button primary\">Register to Vote</button></form>",
        wallet = wallet_alert(address),
        name = escape(&form.name),
        email = escape(&form.email),
        id_number = escape(&form.id_number),
    );
    card(TITLE, DESCRIPTION, &body, &footer())
}

fn receipt_card(address: &Address, receipt: &RegistrationReceipt) -> String {
    let body = format!(
        "{}{}",
        wallet_alert(address),
        alert(
            false,
            "Registration Submitted",
            &format!(
                "Thank you, {}. Confirmation will be sent to {}.",
                escape(&receipt.name),
                escape(&receipt.email)
            ),
        )
    );
    card(TITLE, DESCRIPTION, &body, &footer())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::fixtures::demo_account;

    #[tokio::test]
    async fn test_register_page_shows_connect_card() {
        let Html(html) = register_page().await;
        assert!(html.contains("Voter Registration"));
        assert!(html.contains("action=\"/register/connect\""));
        assert!(!html.contains("name=\"idNumber\""));
    }

    #[test]
    fn test_form_card_keeps_values_escaped() {
        let form = RegistrationForm {
            name: "Ada <Lovelace>".to_string(),
            email: String::new(),
            id_number: "A-1".to_string(),
        };
        let html = form_card(&demo_account(), &form, Some("Please fill in: email"));
        assert!(html.contains("Wallet Connected"));
        assert!(html.contains("value=\"Ada &lt;Lovelace&gt;\""));
        assert!(html.contains("value=\"A-1\""));
        assert!(html.contains("Please fill in: email"));
    }
}
