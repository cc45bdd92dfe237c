//! # Change Observers
//!
//! Nothing redraws itself when the collection changes. Anything that shows
//! collection state (an edit form, a preview, a log) registers an observer
//! with the session and is told about every applied mutation.
//!
//! Observers are:
//! - **Post-commit**: they see the collection after the mutation landed
//! - **Ordered**: notified in subscription order
//! - **Skipped on rejection**: invalid mutations and no-ops don't notify

use crate::collection::QuizCollection;
use crate::mutations::Mutation;

/// What an observer is told after a mutation lands
#[derive(Debug, Clone, Copy)]
pub struct ChangeEvent<'a> {
    /// Session version after the mutation
    pub version: u64,

    pub mutation: &'a Mutation,

    pub collection: &'a QuizCollection,
}

/// Receives change notifications from an edit session
pub trait Observer {
    fn on_change(&mut self, event: &ChangeEvent<'_>);
}

impl<F> Observer for F
where
    F: FnMut(&ChangeEvent<'_>),
{
    fn on_change(&mut self, event: &ChangeEvent<'_>) {
        self(event)
    }
}

/// Handle returned by `subscribe`, used to unsubscribe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Ordered set of observers owned by a session
#[derive(Default)]
pub struct ObserverSet {
    next_id: u64,
    observers: Vec<(SubscriptionId, Box<dyn Observer>)>,
}

impl ObserverSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, observer: Box<dyn Observer>) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.observers.push((id, observer));
        id
    }

    /// Returns false if the id was unknown
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(sid, _)| *sid != id);
        self.observers.len() != before
    }

    pub fn notify(&mut self, event: &ChangeEvent<'_>) {
        for (_, observer) in &mut self.observers {
            observer.on_change(event);
        }
    }

    pub fn len(&self) -> usize {
        self.observers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }
}

impl std::fmt::Debug for ObserverSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObserverSet")
            .field("observers", &self.observers.len())
            .finish()
    }
}
