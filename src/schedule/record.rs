//! Schedule response shapes and lesson-record flattening
//!
//! The API returns `{ "data": [ { "date": ..., "lessons": [ {...} ] } ] }`
//! where lesson objects carry an open-ended set of fields. Flattening
//! produces one record per lesson occurrence, merging in the containing
//! day's date, preserving response order, and passing unknown fields
//! through untouched.

use std::collections::HashMap;

use serde::Deserialize;
use serde_json::Value;

// ---------------------------------------------------------------------------
// Response shapes
// ---------------------------------------------------------------------------

/// Top-level schedule API response.
#[derive(Debug, Deserialize)]
pub struct ScheduleResponse {
    /// One entry per calendar day in the requested range.
    pub data: Vec<ScheduleDay>,
}

/// A single day of the schedule.
///
/// Fields of the day object other than `date` and `lessons` are ignored;
/// only lesson fields are passed through to the flattened records.
#[derive(Debug, Deserialize)]
pub struct ScheduleDay {
    /// Calendar date in `YYYY-MM-DD` form.
    pub date: String,

    /// Lesson occurrences on this day, in timetable order.
    ///
    /// Kept as raw JSON objects so the upstream schema can grow fields
    /// without breaking the client.
    pub lessons: Vec<serde_json::Map<String, Value>>,
}

/// A flattened lesson occurrence: field name to string value, always
/// including a `date` entry merged in from the containing day.
///
/// Records have no identity beyond their position in the result sequence.
pub type LessonRecord = HashMap<String, String>;

// ---------------------------------------------------------------------------
// Flattening
// ---------------------------------------------------------------------------

/// Flattens a schedule response into one record per lesson.
///
/// Days are visited in response order and lessons within a day in response
/// order; no deduplication or filtering is applied. The day's `date` is
/// inserted first, so a lesson field of the same name overwrites it.
///
/// # Examples
///
/// ```
/// use itmo_schedule::schedule::record::{flatten, ScheduleResponse};
///
/// let response: ScheduleResponse = serde_json::from_str(
///     r#"{"data":[{"date":"2024-01-01","lessons":[{"name":"Math"}]}]}"#,
/// ).unwrap();
///
/// let records = flatten(response);
/// assert_eq!(records.len(), 1);
/// assert_eq!(records[0]["date"], "2024-01-01");
/// assert_eq!(records[0]["name"], "Math");
/// ```
pub fn flatten(response: ScheduleResponse) -> Vec<LessonRecord> {
    let mut records = Vec::new();

    for day in response.data {
        for lesson in day.lessons {
            let mut record = LessonRecord::new();
            record.insert("date".to_string(), day.date.clone());

            for (field, value) in lesson {
                record.insert(field, stringify(&value));
            }

            records.push(record);
        }
    }

    records
}

/// Renders a JSON value as the string the record carries.
///
/// Strings flatten to their inner value, null to the empty string, and
/// everything else to its compact JSON text.
fn stringify(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> ScheduleResponse {
        serde_json::from_str(json).expect("test JSON must parse")
    }

    #[test]
    fn test_flatten_single_lesson_merges_date() {
        let response = parse(r#"{"data":[{"date":"2024-01-01","lessons":[{"name":"Math"}]}]}"#);
        let records = flatten(response);

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].get("date"), Some(&"2024-01-01".to_string()));
        assert_eq!(records[0].get("name"), Some(&"Math".to_string()));
    }

    #[test]
    fn test_flatten_preserves_day_and_lesson_order() {
        let response = parse(
            r#"{"data":[
                {"date":"2024-01-01","lessons":[{"name":"Math"},{"name":"Physics"}]},
                {"date":"2024-01-02","lessons":[{"name":"Chemistry"}]}
            ]}"#,
        );
        let records = flatten(response);

        assert_eq!(records.len(), 3);
        assert_eq!(records[0]["name"], "Math");
        assert_eq!(records[1]["name"], "Physics");
        assert_eq!(records[1]["date"], "2024-01-01");
        assert_eq!(records[2]["name"], "Chemistry");
        assert_eq!(records[2]["date"], "2024-01-02");
    }

    #[test]
    fn test_flatten_empty_data_produces_no_records() {
        let response = parse(r#"{"data":[]}"#);
        assert!(flatten(response).is_empty());
    }

    #[test]
    fn test_flatten_day_with_no_lessons_produces_no_records() {
        let response = parse(r#"{"data":[{"date":"2024-01-01","lessons":[]}]}"#);
        assert!(flatten(response).is_empty());
    }

    #[test]
    fn test_flatten_stringifies_non_string_values() {
        let response = parse(
            r#"{"data":[{"date":"2024-01-01","lessons":[
                {"pair_id":5,"online":true,"room":null,"zoom":{"url":"https://z"}}
            ]}]}"#,
        );
        let records = flatten(response);

        assert_eq!(records[0]["pair_id"], "5");
        assert_eq!(records[0]["online"], "true");
        assert_eq!(records[0]["room"], "");
        assert_eq!(records[0]["zoom"], r#"{"url":"https://z"}"#);
    }

    #[test]
    fn test_flatten_lesson_date_field_overwrites_day_date() {
        let response = parse(
            r#"{"data":[{"date":"2024-01-01","lessons":[{"date":"override","name":"Math"}]}]}"#,
        );
        let records = flatten(response);

        assert_eq!(records[0]["date"], "override");
    }

    #[test]
    fn test_flatten_passes_unknown_fields_through() {
        let response = parse(
            r#"{"data":[{"date":"2024-01-01","lessons":[
                {"name":"Math","some_future_field":"value","teacher_name":"Ivanov I.I."}
            ]}]}"#,
        );
        let records = flatten(response);

        assert_eq!(records[0]["some_future_field"], "value");
        assert_eq!(records[0]["teacher_name"], "Ivanov I.I.");
    }

    #[test]
    fn test_response_rejects_day_without_lessons_array() {
        let result =
            serde_json::from_str::<ScheduleResponse>(r#"{"data":[{"date":"2024-01-01"}]}"#);
        assert!(result.is_err(), "a day without lessons is a schema violation");
    }
}
