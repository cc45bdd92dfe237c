//! # Edit Session
//!
//! Owns the quiz collection for the lifetime of one editing session.
//!
//! ```text
//! start → apply* → end
//!           ↓
//!       observers (redraw)
//! ```
//!
//! There is no process-wide collection. Whoever starts a session holds it and
//! passes it by reference; ending the session drops the state.

use crate::observer::{ChangeEvent, Observer, ObserverSet, SubscriptionId};
use crate::{EditorError, Mutation, MutationResult, QuizCollection};
use tracing::{debug, info};
use uuid::Uuid;

#[derive(Debug)]
pub struct EditSession {
    /// Unique session identifier (for logs)
    pub id: String,

    /// Increments on every mutation that changed state
    version: u64,

    collection: QuizCollection,

    observers: ObserverSet,
}

impl EditSession {
    /// Start a session with a fresh collection
    pub fn start() -> Self {
        let session = Self::with_collection(QuizCollection::new());
        info!(session = %session.id, "edit session started");
        session
    }

    pub fn with_collection(collection: QuizCollection) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            version: 0,
            collection,
            observers: ObserverSet::new(),
        }
    }

    pub fn collection(&self) -> &QuizCollection {
        &self.collection
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    /// Apply a mutation and notify observers if it changed anything
    pub fn apply(&mut self, mutation: Mutation) -> Result<MutationResult, EditorError> {
        let applied = match mutation.apply(&mut self.collection) {
            Ok(applied) => applied,
            Err(err) => {
                debug!(session = %self.id, mutation = mutation.name(), error = %err, "mutation rejected");
                return Err(err.into());
            }
        };

        if applied {
            self.version += 1;
            debug!(session = %self.id, mutation = mutation.name(), version = self.version, "mutation applied");

            self.observers.notify(&ChangeEvent {
                version: self.version,
                mutation: &mutation,
                collection: &self.collection,
            });
        } else {
            debug!(session = %self.id, mutation = mutation.name(), "mutation was a no-op");
        }

        Ok(MutationResult {
            version: self.version,
            applied,
        })
    }

    /// Apply a sequence of mutations, stopping at the first rejection
    pub fn replay<I>(&mut self, mutations: I) -> Result<MutationResult, EditorError>
    where
        I: IntoIterator<Item = Mutation>,
    {
        let mut last = MutationResult {
            version: self.version,
            applied: false,
        };

        for mutation in mutations {
            last = self.apply(mutation)?;
        }

        Ok(last)
    }

    pub fn subscribe(&mut self, observer: impl Observer + 'static) -> SubscriptionId {
        self.observers.subscribe(Box::new(observer))
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }

    /// End the session; the collection is discarded
    pub fn end(self) {
        info!(session = %self.id, version = self.version, "edit session ended");
    }
}
