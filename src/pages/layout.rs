//! Shared page shell and small HTML building blocks
//!
//! Every piece of dynamic text must go through [`escape`] before it is
//! interpolated into markup.

use axum::response::Html;

/// Navigation used by the landing page
pub const HOME_NAV: &[(&str, &str)] = &[
    ("#about", "About"),
    ("#how-it-works", "How It Works"),
    ("#contact", "Contact"),
];

const SITE_NAV: &[(&str, &str)] = &[
    ("/", "Home"),
    ("/register", "Register"),
    ("/vote", "Vote"),
    ("/results", "Results"),
];

/// Site navigation without the link to the page being rendered
pub fn page_nav(current: &str) -> Vec<(&'static str, &'static str)> {
    SITE_NAV
        .iter()
        .copied()
        .filter(|(href, _)| *href != current)
        .collect()
}

/// Escape text for use in HTML content and attribute values
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

const STYLE: &str = "\
body{margin:0;font-family:system-ui,sans-serif;color:#111827;background:#fff}\
header{display:flex;align-items:center;height:4rem;padding:0 1.5rem;border-bottom:1px solid #e5e7eb}\
header .brand{font-weight:700;font-size:1.25rem;color:#059669;text-decoration:none}\
header nav{margin-left:auto;display:flex;gap:1.5rem;align-items:center}\
header nav a{color:#111827;font-size:.875rem;text-decoration:none}\
main{min-height:calc(100vh - 9rem);padding:2rem 1rem;background:#f9fafb}\
footer{display:flex;gap:1rem;padding:1.5rem;border-top:1px solid #e5e7eb;font-size:.75rem;color:#6b7280}\
.container{max-width:48rem;margin:0 auto}\
.card{background:#fff;border:1px solid #e5e7eb;border-radius:.5rem;padding:1.5rem;margin-bottom:1.5rem}\
.card h2{margin:0 0 .25rem}.card .description{color:#6b7280;margin:0 0 1rem}\
.alert{border-radius:.5rem;padding:1rem;margin-bottom:1rem;border:1px solid #a7f3d0;background:#ecfdf5}\
.alert.destructive{border-color:#fecaca;background:#fef2f2}\
.button{display:inline-block;padding:.5rem 1rem;border-radius:.375rem;border:1px solid #d1d5db;background:#fff;color:#111827;text-decoration:none;cursor:pointer}\
.button.primary{background:#059669;border-color:#059669;color:#fff}\
.button.danger{background:#dc2626;border-color:#dc2626;color:#fff}\
.mono{font-family:ui-monospace,monospace;word-break:break-all;font-size:.75rem}\
.progress{height:.5rem;background:#e5e7eb;border-radius:9999px}\
.progress>div{height:100%;background:#059669;border-radius:9999px}\
label{display:block;font-size:.875rem;margin:.75rem 0 .25rem}\
input[type=text],input[type=email],input[type=date]{width:100%;padding:.5rem;border:1px solid #d1d5db;border-radius:.375rem;box-sizing:border-box}\
table{width:100%;border-collapse:collapse}th,td{text-align:left;padding:.5rem;border-bottom:1px solid #e5e7eb}";

/// Site header: brand, navigation links and an optional trailing fragment
pub fn site_header(nav: &[(&str, &str)], extra: &str) -> String {
    let links: String = nav
        .iter()
        .map(|(href, label)| format!("<a href=\"{}\">{}</a>", escape(href), escape(label)))
        .collect();

    format!(
        "<header><a class=\"brand\" href=\"/\">&#128737; BlockVote</a>\
         <nav>{links}{extra}</nav></header>"
    )
}

/// Full HTML document around a header fragment and main content
pub fn document(title: &str, header: &str, main: &str) -> Html<String> {
    Html(format!(
        "<!DOCTYPE html><html lang=\"en\"><head><meta charset=\"utf-8\">\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\
         <title>{title} | BlockVote</title><style>{STYLE}</style></head>\
         <body>{header}<main>{main}</main>\
         <footer><p>&copy; 2024 BlockVote. All rights reserved.</p>\
         <nav style=\"margin-left:auto;display:flex;gap:1rem\">\
         <a href=\"#terms\">Terms of Service</a><a href=\"#privacy\">Privacy</a></nav>\
         </footer></body></html>",
        title = escape(title),
    ))
}

/// Card with title, description, body and optional footer (all pre-rendered HTML
/// except `title` and `description`, which are escaped here)
pub fn card(title: &str, description: &str, content: &str, footer: &str) -> String {
    let footer = if footer.is_empty() {
        String::new()
    } else {
        format!("<div class=\"card-footer\">{footer}</div>")
    };

    format!(
        "<section class=\"card\"><h2>{}</h2><p class=\"description\">{}</p>{content}{footer}</section>",
        escape(title),
        escape(description),
    )
}

/// Alert box; `body` is pre-rendered HTML
pub fn alert(destructive: bool, title: &str, body: &str) -> String {
    let class = if destructive { "alert destructive" } else { "alert" };
    format!(
        "<div class=\"{class}\" role=\"alert\"><strong>{}</strong><div>{body}</div></div>",
        escape(title)
    )
}

/// A form that posts to `action` with a single submit button
pub fn post_button(action: &str, label: &str, class: &str) -> String {
    format!(
        "<form method=\"post\" action=\"{}\"><button type=\"submit\" class=\"button {}\">{}</button></form>",
        escape(action),
        escape(class),
        escape(label)
    )
}

/// A link styled as a button
pub fn link_button(href: &str, label: &str, class: &str) -> String {
    format!(
        "<a class=\"button {}\" href=\"{}\">{}</a>",
        escape(class),
        escape(href),
        escape(label)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape() {
        assert_eq!(
            escape(r#"<script>alert("x") & 'y'</script>"#),
            "&lt;script&gt;alert(&quot;x&quot;) &amp; &#39;y&#39;&lt;/script&gt;"
        );
        assert_eq!(escape("plain"), "plain");
    }

    #[test]
    fn test_document_shell() {
        let header = site_header(HOME_NAV, "");
        let Html(html) = document("Home <1>", &header, "<p>hi</p>");
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>Home &lt;1&gt; | BlockVote</title>"));
        assert!(html.contains("How It Works"));
        assert!(html.contains("&copy; 2024 BlockVote. All rights reserved."));
        assert!(html.contains("<main><p>hi</p></main>"));
    }

    #[test]
    fn test_card_escapes_title() {
        let html = card("<b>", "desc", "<p>body</p>", "");
        assert!(html.contains("<h2>&lt;b&gt;</h2>"));
        assert!(html.contains("<p>body</p>"));
        assert!(!html.contains("card-footer"));
    }

    #[test]
    fn test_page_nav_skips_current() {
        let nav = page_nav("/vote");
        assert_eq!(nav.len(), 3);
        assert!(nav.iter().all(|(href, _)| *href != "/vote"));
        assert_eq!(page_nav("/admin").len(), 4);
    }

    #[test]
    fn test_post_button() {
        let html = post_button("/vote/connect", "Connect Wallet", "primary");
        assert!(html.contains("method=\"post\" action=\"/vote/connect\""));
        assert!(html.contains("Connect Wallet"));
    }
}
