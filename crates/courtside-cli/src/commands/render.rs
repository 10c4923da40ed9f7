//! Terminal rendering.

use chrono::Local;
use colored::{ColoredString, Colorize};
use courtside_application::{AttendanceView, DirectoryView, RsvpTableView};
use courtside_application::rsvp_usecase::MSG_NO_OPEN_SESSIONS;
use courtside_core::rsvp::{AttendanceSummary, Bucket, RsvpRecord};
use courtside_core::session::Session;

pub fn directory(view: &DirectoryView) {
    if !view.has_open_session() {
        println!("{}", MSG_NO_OPEN_SESSIONS.yellow());
        return;
    }
    for session in &view.open_sessions {
        let is_default = view.default_session_id.as_deref() == Some(session.session_id.as_str());
        let marker = if is_default { "▶".green().bold() } else { " ".normal() };
        println!("{marker} {}  {}", session.label(false), session.session_id.dimmed());
    }
}

fn summary(summary: &AttendanceSummary) {
    println!("{}", summary.zh_lines());
    println!("{}", summary.en_lines().dimmed());
}

fn name_list(records: &[RsvpRecord], empty: &str) {
    if records.is_empty() {
        println!("  {}", empty.dimmed());
        return;
    }
    for (i, record) in records.iter().enumerate() {
        println!("  {:>2}. {} {}", i + 1, record.name, format!("({})", record.effective_pax()).dimmed());
    }
}

/// Player view: confirmed list and waitlist.
pub fn attendance(view: &AttendanceView) {
    println!("{}", view.session.label(false).bold());
    if !view.session.title.is_empty() {
        println!("{}", view.session.title.dimmed());
    }
    println!();
    summary(&view.summary);

    println!();
    println!("{}", "目前出席名單 / Current Attendees".green().bold());
    name_list(&view.allocation.confirmed, "暫時無出席 / No confirmed attendees");

    println!();
    println!("{}", "候補名單 / Waitlist".yellow().bold());
    name_list(&view.allocation.waitlist, "暫時無候補 / No one on waitlist");
}

fn open_flag(session: &Session) -> ColoredString {
    if session.is_open {
        "OPEN  ".green()
    } else {
        "CLOSED".red()
    }
}

/// Admin session table.
pub fn session_table(sessions: &[&Session]) {
    if sessions.is_empty() {
        println!("{}", "（沒有場次）/ No sessions".dimmed());
        return;
    }
    for session in sessions {
        let note = if session.note.is_empty() {
            String::new()
        } else {
            format!("  ({})", session.note)
        };
        println!(
            "{} {} {}  cap {:<3} {}{}",
            format!("{:<8}", session.session_id).bold(),
            open_flag(session),
            session.label(false),
            session.capacity,
            session.title,
            note.dimmed()
        );
    }
}

fn bucket_label(bucket: Bucket) -> ColoredString {
    let label = format!("{:<9}", bucket.to_string());
    match bucket {
        Bucket::Confirmed => label.green(),
        Bucket::Waitlist => label.yellow(),
        Bucket::Declined => label.dimmed(),
        Bucket::Overflow => label.red(),
    }
}

/// Admin RSVP table.
pub fn rsvp_table(view: &RsvpTableView) {
    match &view.session {
        Some(session) => println!("{}", session.label(true).bold()),
        None => println!("{}", "Session not in the current list; capacity treated as 0".yellow()),
    }
    summary(&view.summary);
    println!();

    if view.rows.is_empty() {
        println!("{}", "（沒有記錄）/ No RSVPs".dimmed());
        return;
    }
    for row in &view.rows {
        let record = &row.record;
        let when = record.timestamp.with_timezone(&Local).format("%m-%d %H:%M");
        println!(
            "{} {:<20} {:>2}  {}  {}",
            bucket_label(row.bucket),
            record.name,
            record.effective_pax(),
            when.to_string().dimmed(),
            record.note
        );
    }
}

pub fn success(message: &str) {
    println!("{}", message.green());
}

pub fn notice(message: &str) {
    println!("{}", message.yellow());
}
