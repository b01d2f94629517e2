//! CSV assembly for the admin export. Quoting follows RFC 4180: any field
//! containing a comma, quote, CR, or LF is wrapped in quotes with inner
//! quotes doubled.

use crate::entities::inspection_request::Model;

pub const EXPORT_FILENAME: &str = "homecheck_requests.csv";

const HEADER: [&str; 12] = [
    "id",
    "created_at",
    "name",
    "phone",
    "address",
    "occupancy",
    "escrow_date",
    "lockbox",
    "meeting_someone",
    "text_consent",
    "status",
    "admin_notes",
];

/// Renders the full table, header row first, in the order the rows arrive
/// (callers pass the store's id-descending listing).
pub fn render_csv(rows: &[Model]) -> String {
    let mut out = String::new();
    push_row(&mut out, HEADER.iter().map(|s| s.to_string()));
    for row in rows {
        push_row(&mut out, row_fields(row).into_iter());
    }
    out
}

fn row_fields(row: &Model) -> Vec<String> {
    vec![
        row.id.to_string(),
        row.created_at.to_rfc3339(),
        row.name.clone(),
        row.phone.clone(),
        row.address.clone(),
        row.occupancy.clone().unwrap_or_default(),
        row.escrow_date
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_default(),
        row.lockbox.clone().unwrap_or_default(),
        row.meeting_someone.clone().unwrap_or_default(),
        row.text_consent.clone(),
        row.status.clone(),
        row.admin_notes.clone().unwrap_or_default(),
    ]
}

fn push_row(out: &mut String, fields: impl Iterator<Item = String>) {
    let mut first = true;
    for field in fields {
        if !first {
            out.push(',');
        }
        first = false;
        out.push_str(&quote_field(&field));
    }
    out.push_str("\r\n");
}

fn quote_field(field: &str) -> String {
    if field.contains([',', '"', '\r', '\n']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn row(id: i64, name: &str, notes: Option<&str>) -> Model {
        Model {
            id,
            created_at: Utc.with_ymd_and_hms(2026, 8, 1, 9, 0, 0).unwrap().into(),
            name: name.to_string(),
            phone: "555-1234".to_string(),
            address: "1 Main St".to_string(),
            occupancy: None,
            escrow_date: None,
            lockbox: None,
            meeting_someone: None,
            text_consent: "No".to_string(),
            status: "New".to_string(),
            admin_notes: notes.map(str::to_string),
        }
    }

    #[test]
    fn header_row_comes_first() {
        let csv = render_csv(&[]);
        assert_eq!(
            csv,
            "id,created_at,name,phone,address,occupancy,escrow_date,lockbox,\
             meeting_someone,text_consent,status,admin_notes\r\n"
        );
    }

    #[test]
    fn fields_with_commas_and_quotes_are_quoted() {
        assert_eq!(quote_field("plain"), "plain");
        assert_eq!(quote_field("a,b"), "\"a,b\"");
        assert_eq!(quote_field("say \"hi\""), "\"say \"\"hi\"\"\"");
        assert_eq!(quote_field("line\nbreak"), "\"line\nbreak\"");
    }

    #[test]
    fn rows_preserve_input_order() {
        let csv = render_csv(&[
            row(3, "Charlie", None),
            row(2, "Bob", Some("call, then text")),
            row(1, "Alice", None),
        ]);
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[1].starts_with("3,"));
        assert!(lines[2].starts_with("2,"));
        assert!(lines[3].starts_with("1,"));
        assert!(lines[2].ends_with("\"call, then text\""));
    }

    #[test]
    fn absent_optionals_export_as_empty_fields() {
        let csv = render_csv(&[row(1, "Alice", None)]);
        let data_line = csv.lines().nth(1).unwrap();
        assert!(data_line.ends_with(",No,New,"));
    }
}
