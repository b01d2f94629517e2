//! Minimal inline HTML pages. There is deliberately no templating engine;
//! every page is a small `format!` over an escaped value set.

use crate::entities::inspection_request::Model;

/// Statuses offered in the admin edit form. The column itself is an open
/// string and the update path accepts any value.
pub const SUGGESTED_STATUSES: [&str; 5] =
    ["New", "Contacted", "Scheduled", "Completed", "Cancelled"];

pub fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

fn layout(title: &str, body: &str) -> String {
    format!(
        "<!doctype html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{} - HomeCheck</title>\n\
         <style>body{{font-family:sans-serif;max-width:60rem;margin:2rem auto;padding:0 1rem}}\
         label{{display:block;margin-top:.75rem}}input,select,textarea{{width:100%;max-width:24rem}}\
         table{{border-collapse:collapse;width:100%}}td,th{{border:1px solid #ccc;padding:.35rem;text-align:left}}</style>\n\
         </head>\n<body>\n{}\n</body>\n</html>\n",
        escape(title),
        body
    )
}

pub fn intake_form() -> String {
    let body = "<h1>Request a Home Inspection</h1>\n\
<form method=\"post\" action=\"/\">\n\
<label>Name* <input name=\"name\" required></label>\n\
<label>Phone* <input name=\"phone\" required></label>\n\
<label>Property address* <input name=\"address\" required></label>\n\
<label>Occupancy <input name=\"occupancy\"></label>\n\
<label>Escrow close date <input name=\"escrow_date\" type=\"date\"></label>\n\
<label>Lockbox code / location <input name=\"lockbox\"></label>\n\
<label>Meeting someone at the property? <input name=\"meeting_someone\"></label>\n\
<label><input type=\"checkbox\" name=\"text_consent\" value=\"on\" style=\"width:auto\"> \
It's OK to text me about this request</label>\n\
<p><button type=\"submit\">Submit request</button></p>\n\
</form>";
    layout("Request an inspection", body)
}

pub fn success_page() -> String {
    layout(
        "Request received",
        "<h1>Thank you!</h1>\n<p>Your inspection request has been received. \
         We will contact you shortly.</p>\n<p><a href=\"/\">Submit another request</a></p>",
    )
}

pub fn login_page(failed: bool) -> String {
    let notice = if failed {
        "<p><strong>Incorrect password, try again.</strong></p>\n"
    } else {
        ""
    };
    let body = format!(
        "<h1>Admin login</h1>\n{notice}\
<form method=\"post\" action=\"/admin/login\">\n\
<label>Password <input name=\"password\" type=\"password\" required></label>\n\
<p><button type=\"submit\">Log in</button></p>\n\
</form>"
    );
    layout("Admin login", &body)
}

pub fn dashboard(rows: &[Model]) -> String {
    let mut table = String::from(
        "<h1>Inspection requests</h1>\n\
<p><a href=\"/admin/export.csv\">Download CSV</a> | <a href=\"/admin/logout\">Log out</a></p>\n\
<table>\n<tr><th>#</th><th>Received</th><th>Name</th><th>Phone</th>\
<th>Address</th><th>Status</th></tr>\n",
    );
    for row in rows {
        table.push_str(&format!(
            "<tr><td><a href=\"/admin/request/{}\">{}</a></td><td>{}</td>\
             <td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            row.id,
            row.id,
            row.created_at.format("%Y-%m-%d %H:%M"),
            escape(&row.name),
            escape(&row.phone),
            escape(&row.address),
            escape(&row.status),
        ));
    }
    table.push_str("</table>");
    if rows.is_empty() {
        table.push_str("\n<p>No requests yet.</p>");
    }
    layout("Dashboard", &table)
}

pub fn request_detail(row: &Model) -> String {
    let mut options = String::new();
    let mut saw_current = false;
    for status in SUGGESTED_STATUSES {
        let selected = if row.status == status {
            saw_current = true;
            " selected"
        } else {
            ""
        };
        options.push_str(&format!(
            "<option value=\"{status}\"{selected}>{status}</option>\n"
        ));
    }
    if !saw_current {
        // The column is an open string; keep whatever value the row carries.
        let current = escape(&row.status);
        options.push_str(&format!(
            "<option value=\"{current}\" selected>{current}</option>\n"
        ));
    }

    let optional = |value: &Option<String>| match value {
        Some(text) if !text.is_empty() => escape(text),
        _ => "-".to_string(),
    };
    let escrow = row
        .escrow_date
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "-".to_string());

    let body = format!(
        "<h1>Request #{id}</h1>\n\
<p><a href=\"/admin\">Back to dashboard</a></p>\n\
<table>\n\
<tr><th>Received</th><td>{created}</td></tr>\n\
<tr><th>Name</th><td>{name}</td></tr>\n\
<tr><th>Phone</th><td>{phone}</td></tr>\n\
<tr><th>Address</th><td>{address}</td></tr>\n\
<tr><th>Occupancy</th><td>{occupancy}</td></tr>\n\
<tr><th>Escrow date</th><td>{escrow}</td></tr>\n\
<tr><th>Lockbox</th><td>{lockbox}</td></tr>\n\
<tr><th>Meeting someone</th><td>{meeting}</td></tr>\n\
<tr><th>OK to text</th><td>{consent}</td></tr>\n\
</table>\n\
<form method=\"post\" action=\"/admin/request/{id}\">\n\
<label>Status <select name=\"status\">\n{options}</select></label>\n\
<label>Notes <textarea name=\"admin_notes\" rows=\"5\">{notes}</textarea></label>\n\
<p><button type=\"submit\">Save</button></p>\n\
</form>",
        id = row.id,
        created = row.created_at.format("%Y-%m-%d %H:%M"),
        name = escape(&row.name),
        phone = escape(&row.phone),
        address = escape(&row.address),
        occupancy = optional(&row.occupancy),
        escrow = escrow,
        lockbox = optional(&row.lockbox),
        meeting = optional(&row.meeting_someone),
        consent = escape(&row.text_consent),
        options = options,
        notes = escape(row.admin_notes.as_deref().unwrap_or("")),
    );
    layout(&format!("Request #{}", row.id), &body)
}

pub fn error_page(title: &str, message: &str) -> String {
    let body = format!(
        "<h1>{}</h1>\n<p>{}</p>\n<p><a href=\"/\">Back to the intake form</a></p>",
        escape(title),
        escape(message)
    );
    layout(title, &body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn sample_row() -> Model {
        Model {
            id: 7,
            created_at: Utc.with_ymd_and_hms(2026, 8, 1, 12, 30, 0).unwrap().into(),
            name: "Jane <Doe>".to_string(),
            phone: "555-1234".to_string(),
            address: "1 Main St".to_string(),
            occupancy: None,
            escrow_date: None,
            lockbox: Some("1234".to_string()),
            meeting_someone: None,
            text_consent: "Yes".to_string(),
            status: "New".to_string(),
            admin_notes: None,
        }
    }

    #[test]
    fn escape_covers_html_metacharacters() {
        assert_eq!(
            escape("<b>\"T&C's\"</b>"),
            "&lt;b&gt;&quot;T&amp;C&#39;s&quot;&lt;/b&gt;"
        );
        assert_eq!(escape("plain text"), "plain text");
    }

    #[test]
    fn dashboard_escapes_user_text() {
        let html = dashboard(&[sample_row()]);
        assert!(html.contains("Jane &lt;Doe&gt;"));
        assert!(!html.contains("Jane <Doe>"));
        assert!(html.contains("/admin/request/7"));
    }

    #[test]
    fn dashboard_handles_empty_table() {
        let html = dashboard(&[]);
        assert!(html.contains("No requests yet."));
    }

    #[test]
    fn detail_marks_current_status_selected() {
        let html = request_detail(&sample_row());
        assert!(html.contains("<option value=\"New\" selected>"));
        assert!(html.contains("<option value=\"Contacted\">"));
    }

    #[test]
    fn detail_keeps_unknown_status_value() {
        let mut row = sample_row();
        row.status = "On Hold".to_string();
        let html = request_detail(&row);
        assert!(html.contains("<option value=\"On Hold\" selected>"));
    }

    #[test]
    fn login_page_shows_failure_notice_only_after_mismatch() {
        assert!(!login_page(false).contains("Incorrect password"));
        assert!(login_page(true).contains("Incorrect password"));
    }
}
