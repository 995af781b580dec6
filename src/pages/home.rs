//! Landing page

use axum::response::Html;

use super::layout::{card, document, link_button, site_header, HOME_NAV};

const FEATURES: &[(&str, &str, &str)] = &[
    (
        "Secure & Transparent",
        "Built on blockchain technology for maximum security and transparency.",
        "Every vote is securely recorded on the blockchain, making it immutable and verifiable by anyone while maintaining voter privacy.",
    ),
    (
        "Tamper-Proof",
        "Votes cannot be altered once cast, ensuring election integrity.",
        "Our smart contracts ensure that once a vote is recorded, it cannot be changed or deleted, preventing fraud and manipulation.",
    ),
    (
        "Real-Time Results",
        "View election results as they happen with our real-time dashboard.",
        "Watch the voting process unfold in real-time with our transparent counting system, while still maintaining voter anonymity.",
    ),
];

const STEPS: &[(&str, &str)] = &[
    (
        "Register",
        "Create an account and verify your identity to receive voting rights.",
    ),
    (
        "Connect Wallet",
        "Connect your Ethereum wallet to interact with our voting smart contracts.",
    ),
    (
        "Cast Vote",
        "Select your candidate and submit your vote securely on the blockchain.",
    ),
    (
        "Verify",
        "Confirm your vote was recorded correctly and view real-time results.",
    ),
];

/// GET /
pub async fn home_page() -> Html<String> {
    let features: String = FEATURES
        .iter()
        .map(|(title, description, body)| card(title, description, &format!("<p>{body}</p>"), ""))
        .collect();

    let steps: String = STEPS
        .iter()
        .enumerate()
        .map(|(i, (title, body))| format!("<li><strong>{}. {title}</strong><p>{body}</p></li>", i + 1))
        .collect();

    let main = format!(
        "<div class=\"container\">\
         <section id=\"about\" style=\"text-align:center;padding:3rem 0\">\
         <h1>Secure Blockchain Voting System</h1>\
         <p>A transparent, secure, and immutable voting platform powered by blockchain technology.</p>\
         <p>{register} {vote}</p></section>\
         <section>{features}</section>\
         <section id=\"how-it-works\"><h2>How It Works</h2>\
         <p>Our blockchain voting system is designed to be simple, secure, and transparent.</p>\
         <ol>{steps}</ol></section></div>",
        register = link_button("/register", "Register to Vote", "primary"),
        vote = link_button("/vote", "Cast Your Vote", ""),
    );

    document("Home", &site_header(HOME_NAV, ""), &main)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_home_page_content() {
        let Html(html) = home_page().await;
        assert!(html.contains("Secure Blockchain Voting System"));
        assert!(html.contains("href=\"/register\""));
        assert!(html.contains("href=\"/vote\""));
        assert!(html.contains("Tamper-Proof"));
        assert!(html.contains("4. Verify"));
    }
}
