//! Integration tests for editor crate

use quizsheet_editor::{
    parse_script, ChangeEvent, EditSession, Mutation, MutationError, EditorError, TextField,
    MAX_RECORDS,
};
use std::cell::RefCell;
use std::rc::Rc;

fn fill_active(session: &mut EditSession) {
    session
        .apply(Mutation::EditField {
            field: TextField::Question,
            value: "I ___ to school.".to_string(),
        })
        .unwrap();

    for (index, value) in ["go", "goes", "going", "went"].into_iter().enumerate() {
        session
            .apply(Mutation::EditOption {
                index,
                value: value.to_string(),
            })
            .unwrap();
    }
}

#[test]
fn test_fill_question_makes_active_complete() {
    let mut session = EditSession::start();
    assert!(!session.collection().is_active_complete());

    fill_active(&mut session);

    assert!(session.collection().is_active_complete());
    assert_eq!(session.collection().active().question, "I ___ to school.");
    assert_eq!(session.collection().active().options[1], "goes");
}

#[test]
fn test_four_adds_reach_capacity() {
    let mut session = EditSession::start();
    for _ in 0..4 {
        assert!(session.apply(Mutation::AddRecord).unwrap().applied);
    }
    assert_eq!(session.collection().len(), MAX_RECORDS);

    let result = session.apply(Mutation::AddRecord).unwrap();
    assert!(!result.applied);
    assert_eq!(session.collection().len(), MAX_RECORDS);
}

#[test]
fn test_remove_active_last_record() {
    let mut session = EditSession::start();
    session.apply(Mutation::AddRecord).unwrap();
    session.apply(Mutation::AddRecord).unwrap();
    assert_eq!(session.collection().active_index(), 2);

    session.apply(Mutation::RemoveRecord { index: 2 }).unwrap();

    assert_eq!(session.collection().len(), 2);
    assert_eq!(session.collection().active_index(), 1);
}

#[test]
fn test_correct_answer_and_explanation() {
    let mut session = EditSession::start();
    fill_active(&mut session);

    session.apply(Mutation::SetCorrectAnswer { value: 0 }).unwrap();
    session
        .apply(Mutation::EditField {
            field: TextField::Explanation,
            value: "First person singular takes the base form.".to_string(),
        })
        .unwrap();

    let active = session.collection().active();
    assert_eq!(active.correct_option(), "go");
    assert!(active.has_explanation());

    let err = session.apply(Mutation::SetCorrectAnswer { value: 4 }).unwrap_err();
    assert_eq!(err, EditorError::Mutation(MutationError::AnswerOutOfRange(4)));
    assert_eq!(session.collection().active().correct_answer, 0);
}

#[test]
fn test_observers_see_each_applied_mutation() {
    let mut session = EditSession::start();
    let seen: Rc<RefCell<Vec<(u64, &'static str, usize)>>> = Rc::new(RefCell::new(Vec::new()));

    let sink = Rc::clone(&seen);
    let id = session.subscribe(move |event: &ChangeEvent<'_>| {
        sink.borrow_mut()
            .push((event.version, event.mutation.name(), event.collection.len()));
    });

    session.apply(Mutation::AddRecord).unwrap();
    session.apply(Mutation::Select { index: 0 }).unwrap();
    // rejected and no-op mutations stay silent
    let _ = session.apply(Mutation::Select { index: 8 });
    session.apply(Mutation::ClearAll).unwrap();
    session.apply(Mutation::RemoveRecord { index: 0 }).unwrap();

    assert_eq!(
        *seen.borrow(),
        vec![(1, "add_record", 2), (2, "select", 2), (3, "clear_all", 1)]
    );

    assert!(session.unsubscribe(id));
    session.apply(Mutation::AddRecord).unwrap();
    assert_eq!(seen.borrow().len(), 3);
}

#[test]
fn test_preview_flag_round_trip() {
    let mut session = EditSession::start();
    fill_active(&mut session);

    session.apply(Mutation::SetPreviewVisible { visible: true }).unwrap();
    assert!(session.collection().is_exportable());

    session.apply(Mutation::AddRecord).unwrap();
    assert!(session.collection().preview_visible());
    assert!(!session.collection().is_exportable());

    session.apply(Mutation::ClearAll).unwrap();
    assert!(!session.collection().preview_visible());
}

#[test]
fn test_replay_script() {
    let script = r#"[
        {"type": "edit_field", "field": "question", "value": "She ___ English."},
        {"type": "edit_option", "index": 0, "value": "speak"},
        {"type": "edit_option", "index": 1, "value": "speaks"},
        {"type": "edit_option", "index": 2, "value": "speaking"},
        {"type": "edit_option", "index": 3, "value": "spoke"},
        {"type": "set_correct_answer", "value": 1},
        {"type": "set_preview_visible", "visible": true}
    ]"#;

    let mutations = parse_script(script).unwrap();
    let mut session = EditSession::start();
    let result = session.replay(mutations).unwrap();

    assert_eq!(result.version, 7);
    assert!(session.collection().is_exportable());
    assert_eq!(session.collection().active().correct_option(), "speaks");
}

#[test]
fn test_bad_script_is_reported() {
    let err = parse_script(r#"[{"type": "rename_record"}]"#).unwrap_err();
    assert!(matches!(err, EditorError::Script(_)));
}
