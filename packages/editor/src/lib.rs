//! # Quizsheet Editor
//!
//! In-memory editing engine for quiz collections.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ user input → Mutation                       │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor: EditSession owns a QuizCollection   │
//! │  - Validate and apply mutations             │
//! │  - Version every applied change             │
//! │  - Notify observers (explicit redraw)       │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ compiler-html: collection → preview HTML    │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use quizsheet_editor::{EditSession, Mutation, TextField};
//!
//! let mut session = EditSession::start();
//! session.subscribe(|event: &quizsheet_editor::ChangeEvent<'_>| {
//!     println!("v{}: {}", event.version, event.mutation.name());
//! });
//!
//! session.apply(Mutation::EditField {
//!     field: TextField::Question,
//!     value: "I ___ to school.".to_string(),
//! })?;
//!
//! for (index, value) in ["go", "goes", "going", "went"].into_iter().enumerate() {
//!     session.apply(Mutation::EditOption { index, value: value.to_string() })?;
//! }
//!
//! assert!(session.collection().is_active_complete());
//! # Ok::<(), quizsheet_editor::EditorError>(())
//! ```

mod collection;
mod errors;
mod mutations;
mod observer;
mod quiz;
mod session;

pub use collection::{QuizCollection, MAX_RECORDS};
pub use errors::EditorError;
pub use mutations::{parse_script, Mutation, MutationError, MutationResult};
pub use observer::{ChangeEvent, Observer, ObserverSet, SubscriptionId};
pub use quiz::{option_label, parse_option_label, QuizRecord, RecordId, TextField, OPTION_COUNT};
pub use session::EditSession;
