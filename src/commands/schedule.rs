//! `schedule` command: fetch the personal schedule and render it
//!
//! Acquires a fresh token, fetches the requested date range, and prints
//! either a table or JSON. A token is acquired per invocation; there is no
//! cache to go stale.

use std::sync::Arc;

use chrono::{Days, Local, NaiveDate};
use colored::Colorize;
use prettytable::{format, Table};

use crate::auth::AuthFlow;
use crate::config::Config;
use crate::error::{ItmoError, Result};
use crate::schedule::{LessonRecord, ScheduleClient};

/// Lesson fields shown as table columns, in display order.
///
/// Everything else the API sends is still present in `--json` output; the
/// table keeps to the fields a timetable reader actually scans for.
const TABLE_FIELDS: [(&str, &str); 6] = [
    ("date", "Date"),
    ("time_start", "Start"),
    ("time_end", "End"),
    ("subject", "Subject"),
    ("room", "Room"),
    ("teacher_name", "Teacher"),
];

/// Handles the `schedule` subcommand.
///
/// # Arguments
///
/// * `config` - Loaded application configuration.
/// * `username`/`password` - ITMO account credentials.
/// * `from`/`to` - Optional date range; `from` defaults to today, `to` to
///   `from` plus the configured `days_ahead`.
/// * `json` - Render records as pretty-printed JSON instead of a table.
pub async fn run_schedule(
    config: Config,
    username: String,
    password: String,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
    json: bool,
) -> Result<()> {
    let date_start = from.unwrap_or_else(|| Local::now().date_naive());
    let date_end = match to {
        Some(date) => date,
        None => date_start
            .checked_add_days(Days::new(u64::from(config.schedule.days_ahead)))
            .ok_or_else(|| ItmoError::Config("date range end overflows".to_string()))?,
    };

    if date_end < date_start {
        return Err(ItmoError::Config(format!(
            "--to ({date_end}) must not precede --from ({date_start})"
        ))
        .into());
    }

    let http = Arc::new(AuthFlow::http_client()?);
    let flow = AuthFlow::new(Arc::clone(&http), config.auth);
    let token = flow.acquire_token(&username, &password).await?;

    let client = ScheduleClient::new(http, config.api);
    let lessons = client.fetch_lessons(&token, date_start, date_end).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&lessons)?);
        return Ok(());
    }

    print_lessons_table(&lessons, date_start, date_end);
    Ok(())
}

/// Renders lesson records as a bordered table on stdout.
fn print_lessons_table(lessons: &[LessonRecord], date_start: NaiveDate, date_end: NaiveDate) {
    if lessons.is_empty() {
        println!(
            "{}",
            format!("No lessons between {date_start} and {date_end}.").yellow()
        );
        return;
    }

    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_BORDERS_ONLY);

    table.add_row(prettytable::Row::new(
        TABLE_FIELDS
            .iter()
            .map(|(_, header)| prettytable::Cell::new(&header.bold().to_string()))
            .collect(),
    ));

    for lesson in lessons {
        table.add_row(prettytable::Row::new(
            TABLE_FIELDS
                .iter()
                .map(|(field, _)| {
                    let value = lesson.get(*field).map(String::as_str).unwrap_or("-");
                    prettytable::Cell::new(value)
                })
                .collect(),
        ));
    }

    println!(
        "\nSchedule for {} ({} lessons):",
        format!("{date_start} to {date_end}").cyan(),
        lessons.len()
    );
    table.printstd();
    println!();
}
