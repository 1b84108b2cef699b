//! Server-rendered HTML pages.
//!
//! Every user-supplied string goes through `html_escape` before it lands in
//! markup.

use axum::http::StatusCode;
use html_escape::{encode_double_quoted_attribute as attr, encode_text as text};
use std::fmt::Write;

use crate::models::Bug;

const STYLE: &str = "body{font-family:sans-serif;max-width:960px;margin:2rem auto;padding:0 1rem}\
nav{display:flex;gap:1rem;margin-bottom:1.5rem}\
table{border-collapse:collapse;width:100%}\
th,td{border:1px solid #ccc;padding:.4rem;text-align:left;vertical-align:top}\
.flash{background:#e7f5e7;padding:.5rem}.error{background:#fbe4e4;padding:.5rem}\
label{display:block;margin:.5rem 0}input,textarea{width:100%}";

/// Notices shown above the page body.
#[derive(Debug, Default, Clone, Copy)]
pub struct Notice<'a> {
    pub flash: Option<&'a str>,
    pub error: Option<&'a str>,
}

impl<'a> Notice<'a> {
    #[must_use]
    pub const fn flash(message: Option<&'a str>) -> Self {
        Self {
            flash: message,
            error: None,
        }
    }

    #[must_use]
    pub const fn error(message: &'a str) -> Self {
        Self {
            flash: None,
            error: Some(message),
        }
    }
}

fn layout(title: &str, signed_in_as: Option<&str>, notice: Notice<'_>, body: &str) -> String {
    let mut html = String::with_capacity(body.len() + 1024);
    let _ = write!(
        html,
        "<!DOCTYPE html><html lang=\"en\"><head><meta charset=\"utf-8\">\
         <title>{} - Bug Tracker</title><style>{}</style></head><body><nav>",
        text(title),
        STYLE
    );

    match signed_in_as {
        Some(username) => {
            let _ = write!(
                html,
                "<a href=\"/\">Dashboard</a><a href=\"/report\">Report a bug</a>\
                 <a href=\"/export\">Export CSV</a><span>Signed in as {}</span>\
                 <a href=\"/logout\">Log out</a>",
                text(username)
            );
        }
        None => html.push_str("<a href=\"/login\">Log in</a><a href=\"/register\">Register</a>"),
    }
    html.push_str("</nav>");

    if let Some(message) = notice.flash {
        let _ = write!(html, "<p class=\"flash\">{}</p>", text(message));
    }
    if let Some(message) = notice.error {
        let _ = write!(html, "<p class=\"error\">{}</p>", text(message));
    }

    html.push_str(body);
    html.push_str("</body></html>");
    html
}

fn credentials_form(action: &str, submit: &str, username: &str) -> String {
    format!(
        "<form method=\"post\" action=\"{action}\">\
         <label>Username <input name=\"username\" value=\"{}\" maxlength=\"80\" required></label>\
         <label>Password <input name=\"password\" type=\"password\" required></label>\
         <button type=\"submit\">{submit}</button></form>",
        attr(username)
    )
}

#[must_use]
pub fn login_page(notice: Notice<'_>, username: &str) -> String {
    let body = format!(
        "<h1>Log in</h1>{}<p>No account? <a href=\"/register\">Register</a></p>",
        credentials_form("/login", "Log in", username)
    );
    layout("Log in", None, notice, &body)
}

#[must_use]
pub fn register_page(notice: Notice<'_>, username: &str) -> String {
    let body = format!(
        "<h1>Register</h1>{}<p>Already registered? <a href=\"/login\">Log in</a></p>",
        credentials_form("/register", "Register", username)
    );
    layout("Register", None, notice, &body)
}

#[must_use]
pub fn dashboard_page(signed_in_as: Option<&str>, notice: Notice<'_>, bugs: &[Bug]) -> String {
    let mut body = String::from("<h1>Reported bugs</h1>");

    if bugs.is_empty() {
        body.push_str("<p>No bugs reported yet.</p>");
    } else {
        body.push_str(
            "<table><thead><tr><th>ID</th><th>Title</th><th>Description</th><th>Tag</th>\
             <th>Status</th><th>Reported by</th><th>Reported at</th></tr></thead><tbody>",
        );
        for bug in bugs {
            let _ = write!(
                body,
                "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
                bug.id,
                text(&bug.title),
                text(&bug.description),
                text(bug.tag.as_deref().unwrap_or_default()),
                text(&bug.status),
                text(&bug.reported_by),
                text(&bug.created_at),
            );
        }
        body.push_str("</tbody></table>");
    }

    layout("Dashboard", signed_in_as, notice, &body)
}

#[must_use]
pub fn report_page(
    signed_in_as: Option<&str>,
    notice: Notice<'_>,
    title: &str,
    description: &str,
    tag: &str,
) -> String {
    let body = format!(
        "<h1>Report a bug</h1><form method=\"post\" action=\"/report\">\
         <label>Title <input name=\"title\" value=\"{}\" maxlength=\"200\" required></label>\
         <label>Description <textarea name=\"description\" rows=\"6\" required>{}</textarea></label>\
         <label>Tag <input name=\"tag\" value=\"{}\" maxlength=\"50\" placeholder=\"UI, Backend, ...\"></label>\
         <button type=\"submit\">Submit</button></form>",
        attr(title),
        text(description),
        attr(tag)
    );
    layout("Report a bug", signed_in_as, notice, &body)
}

#[must_use]
pub fn error_page(status: StatusCode, message: &str) -> String {
    let body = format!(
        "<h1>{}</h1><p>{}</p><p><a href=\"/\">Back to the dashboard</a></p>",
        status.as_u16(),
        text(message)
    );
    layout(
        status.canonical_reason().unwrap_or("Error"),
        None,
        Notice::default(),
        &body,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BugId;

    #[test]
    fn test_dashboard_escapes_user_text() {
        let bug = Bug {
            id: BugId(1),
            title: "<script>alert(1)</script>".to_string(),
            description: "a & b".to_string(),
            tag: None,
            status: "Open".to_string(),
            reported_by: "alice".to_string(),
            created_at: String::new(),
        };

        let html = dashboard_page(Some("alice"), Notice::default(), &[bug]);
        assert!(!html.contains("<script>alert(1)</script>"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("a &amp; b"));
        assert!(html.contains("Signed in as alice"));
    }

    #[test]
    fn test_login_page_shows_error_and_keeps_username() {
        let html = login_page(Notice::error("Invalid username or password"), "bob\"");
        assert!(html.contains("Invalid username or password"));
        assert!(html.contains("value=\"bob&quot;\""));
        assert!(!html.contains("Log out"));
    }

    #[test]
    fn test_empty_dashboard() {
        let html = dashboard_page(None, Notice::flash(Some("Bug reported")), &[]);
        assert!(html.contains("No bugs reported yet."));
        assert!(html.contains("class=\"flash\""));
    }
}
