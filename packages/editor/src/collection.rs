//! # Quiz Collection
//!
//! The editable state of a session: the ordered records, which one is
//! active, and whether the preview is showing.
//!
//! ## Invariants
//!
//! ```text
//! 1 <= records.len() <= MAX_RECORDS
//! active_index < records.len()
//! record.correct_answer < OPTION_COUNT
//! ```
//!
//! Every method below leaves these intact. Operations with an index argument
//! reject out-of-range values instead of clamping them.

use crate::errors::EditorError;
use crate::mutations::MutationError;
use crate::quiz::{QuizRecord, TextField, OPTION_COUNT};
use serde::{Deserialize, Serialize};

/// Upper bound on the number of records in a collection
pub const MAX_RECORDS: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawCollection")]
pub struct QuizCollection {
    records: Vec<QuizRecord>,
    active_index: usize,
    preview_visible: bool,
}

/// Unchecked wire form; only becomes a collection through `TryFrom`
#[derive(Deserialize)]
struct RawCollection {
    records: Vec<QuizRecord>,
    active_index: usize,
    preview_visible: bool,
}

impl TryFrom<RawCollection> for QuizCollection {
    type Error = EditorError;

    fn try_from(raw: RawCollection) -> Result<Self, Self::Error> {
        let len = raw.records.len();
        if len == 0 || len > MAX_RECORDS {
            return Err(EditorError::InvalidCollection(format!(
                "expected 1..={} records, got {}",
                MAX_RECORDS, len
            )));
        }
        if raw.active_index >= len {
            return Err(EditorError::InvalidCollection(format!(
                "active index {} out of range for {} records",
                raw.active_index, len
            )));
        }
        if let Some(position) = raw.records.iter().position(|r| r.correct_answer >= OPTION_COUNT) {
            return Err(EditorError::InvalidCollection(format!(
                "record {} has correct answer {}",
                position + 1,
                raw.records[position].correct_answer
            )));
        }

        Ok(Self {
            records: raw.records,
            active_index: raw.active_index,
            preview_visible: raw.preview_visible,
        })
    }
}

impl QuizCollection {
    /// One blank record, first record active, preview hidden
    pub fn new() -> Self {
        Self {
            records: vec![QuizRecord::blank()],
            active_index: 0,
            preview_visible: false,
        }
    }

    pub fn records(&self) -> &[QuizRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Always false; kept for symmetry with `len`
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.records.len() >= MAX_RECORDS
    }

    pub fn active_index(&self) -> usize {
        self.active_index
    }

    pub fn active(&self) -> &QuizRecord {
        &self.records[self.active_index]
    }

    fn active_mut(&mut self) -> &mut QuizRecord {
        &mut self.records[self.active_index]
    }

    pub fn preview_visible(&self) -> bool {
        self.preview_visible
    }

    /// Replace the question or explanation of the active record
    pub fn edit_field(&mut self, field: TextField, value: impl Into<String>) {
        *self.active_mut().text_mut(field) = value.into();
    }

    /// Replace one option of the active record
    pub fn edit_option(&mut self, index: usize, value: impl Into<String>) -> Result<(), MutationError> {
        check_option(index)?;
        self.active_mut().options[index] = value.into();
        Ok(())
    }

    /// Mark option `value` of the active record as the correct one
    pub fn set_correct_answer(&mut self, value: usize) -> Result<(), MutationError> {
        if value >= OPTION_COUNT {
            return Err(MutationError::AnswerOutOfRange(value));
        }
        self.active_mut().correct_answer = value;
        Ok(())
    }

    /// Append a blank record and make it active.
    ///
    /// Returns false without touching state when the collection is full.
    pub fn add_record(&mut self) -> bool {
        if self.is_full() {
            return false;
        }

        self.records.push(QuizRecord::blank());
        self.active_index = self.records.len() - 1;
        true
    }

    /// Remove the record at `index`.
    ///
    /// The last remaining record can't be removed: any index returns `Ok(false)`.
    /// The active record keeps its identity when another record goes away;
    /// when the active record itself is removed, the pointer stays at the
    /// same position, clamped to the new last record.
    pub fn remove_record(&mut self, index: usize) -> Result<bool, MutationError> {
        if self.records.len() == 1 {
            return Ok(false);
        }

        self.check_record(index)?;
        self.records.remove(index);

        if index < self.active_index {
            self.active_index -= 1;
        }
        if self.active_index >= self.records.len() {
            self.active_index = self.records.len() - 1;
        }

        Ok(true)
    }

    pub fn select(&mut self, index: usize) -> Result<(), MutationError> {
        self.check_record(index)?;
        self.active_index = index;
        Ok(())
    }

    /// No validation; callers gate on `is_active_complete` first
    pub fn set_preview_visible(&mut self, visible: bool) {
        self.preview_visible = visible;
    }

    /// Back to a single fresh record with the preview hidden
    pub fn clear_all(&mut self) {
        *self = Self::new();
    }

    pub fn is_active_complete(&self) -> bool {
        self.active().is_complete()
    }

    pub fn are_all_complete(&self) -> bool {
        self.records.iter().all(QuizRecord::is_complete)
    }

    /// Preview can be exported or printed only while visible and complete
    pub fn is_exportable(&self) -> bool {
        self.preview_visible && self.are_all_complete()
    }

    pub(crate) fn check_record(&self, index: usize) -> Result<(), MutationError> {
        if index >= self.records.len() {
            return Err(MutationError::RecordOutOfRange {
                index,
                len: self.records.len(),
            });
        }
        Ok(())
    }
}

pub(crate) fn check_option(index: usize) -> Result<(), MutationError> {
    if index >= OPTION_COUNT {
        return Err(MutationError::OptionOutOfRange(index));
    }
    Ok(())
}

impl Default for QuizCollection {
    fn default() -> Self {
        Self::new()
    }
}
