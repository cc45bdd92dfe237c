//! Invariant checks over long mutation sequences
//!
//! This tests:
//! - Record count bounds after add/remove chains
//! - Active index bounds after every removal
//! - Active record identity across removals of other records
//! - clear_all idempotence

use quizsheet_editor::{EditSession, Mutation, QuizCollection, MAX_RECORDS};

fn assert_invariants(collection: &QuizCollection) {
    assert!(collection.len() >= 1, "collection emptied");
    assert!(collection.len() <= MAX_RECORDS, "collection over capacity");
    assert!(collection.active_index() < collection.len(), "active index out of bounds");
    for record in collection.records() {
        assert!(record.correct_answer < 4);
    }
}

/// Small deterministic generator so the sequences are reproducible
struct Lcg(u64);

impl Lcg {
    fn next(&mut self, bound: usize) -> usize {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        ((self.0 >> 33) as usize) % bound
    }
}

#[test]
fn test_random_add_remove_select_keeps_invariants() {
    for seed in 0..50 {
        let mut rng = Lcg(seed);
        let mut session = EditSession::start();

        for _ in 0..200 {
            let len = session.collection().len();
            let mutation = match rng.next(4) {
                0 => Mutation::AddRecord,
                1 => Mutation::RemoveRecord { index: rng.next(len) },
                2 => Mutation::Select { index: rng.next(len) },
                _ => Mutation::EditOption {
                    index: rng.next(4),
                    value: format!("option {}", rng.next(100)),
                },
            };

            session.apply(mutation).unwrap();
            assert_invariants(session.collection());
        }
    }
}

#[test]
fn test_removing_other_records_preserves_active_identity() {
    for active in 0..MAX_RECORDS {
        for removed in 0..MAX_RECORDS {
            if removed == active {
                continue;
            }

            let mut session = EditSession::start();
            for _ in 1..MAX_RECORDS {
                session.apply(Mutation::AddRecord).unwrap();
            }
            session.apply(Mutation::Select { index: active }).unwrap();
            let active_id = session.collection().active().id;

            session.apply(Mutation::RemoveRecord { index: removed }).unwrap();

            assert_eq!(session.collection().active().id, active_id);
            assert_invariants(session.collection());
        }
    }
}

#[test]
fn test_removing_active_record_stays_in_bounds() {
    for active in 0..MAX_RECORDS {
        let mut session = EditSession::start();
        for _ in 1..MAX_RECORDS {
            session.apply(Mutation::AddRecord).unwrap();
        }
        session.apply(Mutation::Select { index: active }).unwrap();

        session.apply(Mutation::RemoveRecord { index: active }).unwrap();

        let expected = active.min(MAX_RECORDS - 2);
        assert_eq!(session.collection().active_index(), expected);
        assert_invariants(session.collection());
    }
}

#[test]
fn test_remove_down_to_one() {
    let mut session = EditSession::start();
    for _ in 1..MAX_RECORDS {
        session.apply(Mutation::AddRecord).unwrap();
    }

    while session.collection().len() > 1 {
        let last = session.collection().len() - 1;
        assert!(session.apply(Mutation::RemoveRecord { index: last }).unwrap().applied);
        assert_invariants(session.collection());
    }

    assert!(!session.apply(Mutation::RemoveRecord { index: 0 }).unwrap().applied);
    assert_eq!(session.collection().len(), 1);
}

#[test]
fn test_clear_all_twice_matches_once() {
    let mut session = EditSession::start();
    session.apply(Mutation::AddRecord).unwrap();
    session.apply(Mutation::SetPreviewVisible { visible: true }).unwrap();

    session.apply(Mutation::ClearAll).unwrap();
    let once = session.collection().clone();
    session.apply(Mutation::ClearAll).unwrap();
    let twice = session.collection().clone();

    // fresh ids differ; everything observable is the same
    assert_eq!(once.len(), twice.len());
    assert_eq!(once.active_index(), twice.active_index());
    assert_eq!(once.preview_visible(), twice.preview_visible());
    assert_eq!(once.active().question, twice.active().question);
    assert_eq!(once.active().options, twice.active().options);
    assert_eq!(once.active().correct_answer, twice.active().correct_answer);
}
