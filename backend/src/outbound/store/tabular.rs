//! Flat tabular (comma-separated) encoding for the applications collection.
//!
//! A deployment can keep intake records as a spreadsheet-friendly table
//! instead of JSON. Both encodings round-trip the same logical record set;
//! the codec here covers exactly the application schema, with RFC-4180
//! style quoting for fields containing commas, quotes, or line breaks.

use chrono::{DateTime, Utc};

use crate::domain::Application;

/// Column order of the table; also the header line.
pub const HEADER: &str = "id,timestamp,fullName,email,phone,courseId,note";

/// Encode the full collection as a header line plus one row per record.
pub fn encode(records: &[Application]) -> String {
    let mut out = String::with_capacity(64 * (records.len() + 1));
    out.push_str(HEADER);
    out.push('\n');
    for record in records {
        let row = [
            record.id.to_string(),
            record.timestamp.to_rfc3339(),
            record.full_name.clone(),
            record.email.clone(),
            record.phone.clone(),
            record.course_id.to_string(),
            record.note.clone(),
        ];
        let encoded: Vec<String> = row.iter().map(|field| quote(field)).collect();
        out.push_str(&encoded.join(","));
        out.push('\n');
    }
    out
}

/// Decode a table produced by [`encode`] back into records.
///
/// # Errors
/// Returns a diagnostic message when the header does not match, a row has
/// the wrong arity, a quoted field is unterminated, or a numeric/timestamp
/// cell does not parse. Callers surface this as collection corruption.
pub fn decode(input: &str) -> Result<Vec<Application>, String> {
    let mut rows = parse_rows(input)?.into_iter();
    let header = rows.next().ok_or_else(|| "missing header row".to_owned())?;
    if header.join(",") != HEADER {
        return Err(format!("unexpected header: {}", header.join(",")));
    }

    let mut records = Vec::new();
    for (index, row) in rows.enumerate() {
        let line = index + 2;
        let [id, timestamp, full_name, email, phone, course_id, note]: [String; 7] =
            row.try_into()
                .map_err(|row: Vec<String>| {
                    format!("row {line} has {} fields, expected 7", row.len())
                })?;
        records.push(Application {
            id: id
                .parse()
                .map_err(|_| format!("row {line}: invalid id: {id}"))?,
            timestamp: parse_timestamp(&timestamp)
                .ok_or_else(|| format!("row {line}: invalid timestamp: {timestamp}"))?,
            full_name,
            email,
            phone,
            course_id: course_id
                .parse()
                .map_err(|_| format!("row {line}: invalid courseId: {course_id}"))?,
            note,
        });
    }
    Ok(records)
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|stamp| stamp.with_timezone(&Utc))
}

fn quote(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_owned()
    }
}

fn parse_rows(input: &str) -> Result<Vec<Vec<String>>, String> {
    let mut rows = Vec::new();
    let mut row: Vec<String> = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = input.chars().peekable();

    while let Some(ch) = chars.next() {
        if in_quotes {
            match ch {
                '"' if chars.peek() == Some(&'"') => {
                    chars.next();
                    field.push('"');
                }
                '"' => in_quotes = false,
                other => field.push(other),
            }
            continue;
        }
        match ch {
            '"' if field.is_empty() => in_quotes = true,
            ',' => row.push(std::mem::take(&mut field)),
            '\r' => {}
            '\n' => {
                row.push(std::mem::take(&mut field));
                if row.iter().any(|cell| !cell.is_empty()) {
                    rows.push(std::mem::take(&mut row));
                } else {
                    row.clear();
                }
            }
            other => field.push(other),
        }
    }
    if in_quotes {
        return Err("unterminated quoted field".to_owned());
    }
    if !field.is_empty() || !row.is_empty() {
        row.push(field);
        if row.iter().any(|cell| !cell.is_empty()) {
            rows.push(row);
        }
    }
    Ok(rows)
}
