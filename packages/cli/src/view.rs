//! Terminal rendering of the edit form and the read-only listing

use colored::Colorize;
use quizsheet_editor::{option_label, QuizCollection, QuizRecord, TextField, MAX_RECORDS};
use std::fmt::Write;

/// Tabs, the active record's form, and the listing when the preview is shown
pub fn render(collection: &QuizCollection) -> String {
    let mut out = String::new();
    out.push_str(&render_tabs(collection));
    out.push('\n');
    out.push_str(&render_form(collection));
    if collection.preview_visible() {
        out.push('\n');
        out.push_str(&render_listing(collection));
    }
    out
}

/// One tab per record, the active one highlighted
pub fn render_tabs(collection: &QuizCollection) -> String {
    let mut line = String::new();
    for (index, record) in collection.records().iter().enumerate() {
        let mark = if record.is_complete() { "✓" } else { "…" };
        let tab = format!("[Question {} {}]", index + 1, mark);
        if index == collection.active_index() {
            let _ = write!(line, "{} ", tab.bright_blue().bold());
        } else {
            let _ = write!(line, "{} ", tab);
        }
    }
    if collection.is_full() {
        let _ = write!(line, "{}", format!("({} max)", MAX_RECORDS).dimmed());
    } else {
        let _ = write!(line, "{}", "(+ add)".dimmed());
    }
    line.push('\n');
    line
}

pub fn render_form(collection: &QuizCollection) -> String {
    let record = collection.active();
    let mut out = String::new();

    let _ = writeln!(
        out,
        "{}",
        format!("Editing question {}", collection.active_index() + 1).bold()
    );
    let _ = writeln!(out, "  Question:    {}", or_placeholder(record.text(TextField::Question)));
    for (index, option) in record.options.iter().enumerate() {
        let marker = if index == record.correct_answer {
            "(correct)".green().to_string()
        } else {
            String::new()
        };
        let _ = writeln!(out, "  {}. {} {}", option_label(index), or_placeholder(option), marker);
    }
    let _ = writeln!(out, "  Explanation: {}", or_placeholder(record.text(TextField::Explanation)));

    let status = if record.is_complete() {
        "complete".green()
    } else {
        "incomplete".yellow()
    };
    let _ = writeln!(out, "  Status:      {}", status);
    out
}

/// Plain-text counterpart of the HTML preview
pub fn render_listing(collection: &QuizCollection) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", "Preview".bright_blue().bold());

    let last = collection.len() - 1;
    for (index, record) in collection.records().iter().enumerate() {
        render_listing_item(&mut out, index, record);
        if index < last {
            let _ = writeln!(out, "  {}", "-".repeat(40).dimmed());
        }
    }
    out
}

fn render_listing_item(out: &mut String, index: usize, record: &QuizRecord) {
    let _ = writeln!(out, "  Question {}", index + 1);
    let _ = writeln!(out, "  Question: {}", record.question);
    for (option_index, option) in record.options.iter().enumerate() {
        let _ = writeln!(out, "  {}. {}", option_label(option_index), option);
    }
    if record.has_explanation() {
        let _ = writeln!(out, "  Explanation: {}", record.explanation);
    }
}

fn or_placeholder(text: &str) -> String {
    if text.trim().is_empty() {
        "(empty)".dimmed().to_string()
    } else {
        text.to_string()
    }
}
