//! CSV rendering of the bug list.

use crate::models::Bug;

pub const CSV_HEADER: [&str; 6] = ["ID", "Title", "Description", "Tag", "Status", "Reported By"];

pub const EXPORT_FILENAME: &str = "bug_report.csv";

pub const EXPORT_CONTENT_TYPE: &str = "text/csv";

const LINE_TERMINATOR: &str = "\r\n";

/// Renders `bugs` in the order given as a UTF-8 CSV document.
///
/// Fields holding a comma, double quote, CR or LF are quoted with inner
/// quotes doubled; a missing tag is an empty field.
#[must_use]
pub fn export_csv(bugs: &[Bug]) -> Vec<u8> {
    let mut out = String::new();
    write_row(&mut out, &CSV_HEADER);

    for bug in bugs {
        let id = bug.id.to_string();
        write_row(
            &mut out,
            &[
                &id,
                &bug.title,
                &bug.description,
                bug.tag.as_deref().unwrap_or_default(),
                &bug.status,
                &bug.reported_by,
            ],
        );
    }

    out.into_bytes()
}

fn write_row(out: &mut String, fields: &[&str]) {
    for (i, field) in fields.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        write_field(out, field);
    }
    out.push_str(LINE_TERMINATOR);
}

fn write_field(out: &mut String, field: &str) {
    if field.contains([',', '"', '\r', '\n']) {
        out.push('"');
        out.push_str(&field.replace('"', "\"\""));
        out.push('"');
    } else {
        out.push_str(field);
    }
}
