//! # Quiz Records
//!
//! A quiz record is one multiple-choice question: the question text, exactly
//! four answer options, the index of the correct option, and an optional
//! explanation.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Number of answer options on every record (fixed arity)
pub const OPTION_COUNT: usize = 4;

/// Opaque record identity, stable for the record's lifetime
///
/// Only used to tell records apart when rendering lists; records are never
/// looked up by id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RecordId(Uuid);

impl RecordId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RecordId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Free-text field of a record that can be replaced wholesale
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextField {
    Question,
    Explanation,
}

/// One multiple-choice question
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizRecord {
    pub id: RecordId,
    pub question: String,
    pub options: [String; OPTION_COUNT],
    /// Index into `options`, always `< OPTION_COUNT`
    pub correct_answer: usize,
    /// Empty string means no explanation
    pub explanation: String,
}

impl QuizRecord {
    /// Fresh record: new id, empty text, first option marked correct
    pub fn blank() -> Self {
        Self {
            id: RecordId::new(),
            question: String::new(),
            options: Default::default(),
            correct_answer: 0,
            explanation: String::new(),
        }
    }

    /// A record is complete when its question and all four options are non-blank.
    ///
    /// The correct answer and the explanation don't take part.
    pub fn is_complete(&self) -> bool {
        !self.question.trim().is_empty() && self.options.iter().all(|o| !o.trim().is_empty())
    }

    pub fn text(&self, field: TextField) -> &str {
        match field {
            TextField::Question => &self.question,
            TextField::Explanation => &self.explanation,
        }
    }

    pub(crate) fn text_mut(&mut self, field: TextField) -> &mut String {
        match field {
            TextField::Question => &mut self.question,
            TextField::Explanation => &mut self.explanation,
        }
    }

    pub fn has_explanation(&self) -> bool {
        !self.explanation.is_empty()
    }

    pub fn correct_option(&self) -> &str {
        &self.options[self.correct_answer]
    }
}

impl Default for QuizRecord {
    fn default() -> Self {
        Self::blank()
    }
}

/// Letter shown next to option `index` (`0 → 'A'`)
pub fn option_label(index: usize) -> char {
    debug_assert!(index < OPTION_COUNT);
    (b'A' + index as u8) as char
}

/// Parse an option letter or 1-based number back into an index
pub fn parse_option_label(label: &str) -> Option<usize> {
    let label = label.trim();
    let mut chars = label.chars();
    let c = chars.next()?;
    if chars.next().is_some() {
        return None;
    }

    let index = match c {
        'A'..='Z' => c as usize - 'A' as usize,
        'a'..='z' => c as usize - 'a' as usize,
        '1'..='9' => c as usize - '1' as usize,
        _ => return None,
    };

    (index < OPTION_COUNT).then_some(index)
}
