//! # Collection Mutations
//!
//! Every edit a user can make to a quiz collection, as a value.
//!
//! ## Design Principles
//!
//! 1. **Intent-preserving**: one variant per user-level operation
//! 2. **Validated**: index arguments are checked before anything changes
//! 3. **Scriptable**: mutations serialize to JSON, so a session can be replayed
//!
//! ## No-op Semantics
//!
//! `AddRecord` on a full collection and `RemoveRecord` on a single-record
//! collection are valid but change nothing. `apply` reports them with
//! `applied: false`.

use crate::collection::{check_option, QuizCollection};
use crate::quiz::{TextField, OPTION_COUNT};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Semantic mutations of a quiz collection
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Mutation {
    /// Replace the question or explanation of the active record
    EditField { field: TextField, value: String },

    /// Replace one answer option of the active record
    EditOption { index: usize, value: String },

    /// Choose which option of the active record is correct
    SetCorrectAnswer { value: usize },

    /// Append a blank record and select it
    AddRecord,

    /// Remove a record by position
    RemoveRecord { index: usize },

    /// Make another record active
    Select { index: usize },

    /// Show or hide the read-only preview
    SetPreviewVisible { visible: bool },

    /// Reset to a single blank record
    ClearAll,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MutationError {
    #[error("Option index out of range: {0} (expected 0..4)")]
    OptionOutOfRange(usize),

    #[error("Correct answer out of range: {0} (expected 0..4)")]
    AnswerOutOfRange(usize),

    #[error("Record index out of range: {index} (collection has {len})")]
    RecordOutOfRange { index: usize, len: usize },
}

impl Mutation {
    /// Apply mutation to the collection with validation
    pub fn apply(&self, collection: &mut QuizCollection) -> Result<bool, MutationError> {
        self.validate(collection)?;

        let applied = match self {
            Mutation::EditField { field, value } => {
                collection.edit_field(*field, value.clone());
                true
            }

            Mutation::EditOption { index, value } => {
                collection.edit_option(*index, value.clone())?;
                true
            }

            Mutation::SetCorrectAnswer { value } => {
                collection.set_correct_answer(*value)?;
                true
            }

            Mutation::AddRecord => collection.add_record(),

            Mutation::RemoveRecord { index } => collection.remove_record(*index)?,

            Mutation::Select { index } => {
                collection.select(*index)?;
                true
            }

            Mutation::SetPreviewVisible { visible } => {
                collection.set_preview_visible(*visible);
                true
            }

            Mutation::ClearAll => {
                collection.clear_all();
                true
            }
        };

        Ok(applied)
    }

    /// Validate without applying
    pub fn validate(&self, collection: &QuizCollection) -> Result<(), MutationError> {
        match self {
            Mutation::EditOption { index, .. } => check_option(*index),

            Mutation::SetCorrectAnswer { value } => {
                if *value >= OPTION_COUNT {
                    return Err(MutationError::AnswerOutOfRange(*value));
                }
                Ok(())
            }

            // Removing from a single-record collection is a no-op for any index
            Mutation::RemoveRecord { .. } if collection.len() == 1 => Ok(()),

            Mutation::RemoveRecord { index } | Mutation::Select { index } => {
                collection.check_record(*index)
            }

            Mutation::EditField { .. }
            | Mutation::AddRecord
            | Mutation::SetPreviewVisible { .. }
            | Mutation::ClearAll => Ok(()),
        }
    }

    /// Short name for logs
    pub fn name(&self) -> &'static str {
        match self {
            Mutation::EditField { .. } => "edit_field",
            Mutation::EditOption { .. } => "edit_option",
            Mutation::SetCorrectAnswer { .. } => "set_correct_answer",
            Mutation::AddRecord => "add_record",
            Mutation::RemoveRecord { .. } => "remove_record",
            Mutation::Select { .. } => "select",
            Mutation::SetPreviewVisible { .. } => "set_preview_visible",
            Mutation::ClearAll => "clear_all",
        }
    }
}

/// Parse a JSON array of mutations (the format `quizsheet export` replays)
pub fn parse_script(json: &str) -> Result<Vec<Mutation>, crate::EditorError> {
    Ok(serde_json::from_str(json)?)
}

/// Result of applying a mutation through a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MutationResult {
    /// Session version after the mutation
    pub version: u64,

    /// False when the mutation was a valid no-op
    pub applied: bool,
}
