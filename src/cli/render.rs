//! Output rendering for fetched records.

use crate::api::PostRecord;

pub(super) fn record_text(record: &PostRecord) -> String {
    let date = record
        .created()
        .map(|stamp| stamp.date().to_string())
        .unwrap_or_else(|| record.created_date.clone());
    format!(
        "{}\nby {} on {}\n\n{}",
        record.title, record.author.username, date, record.body
    )
}

pub(super) fn record_json(record: &PostRecord) -> String {
    serde_json::to_string_pretty(record).unwrap_or_else(|_| "{}".to_string())
}
