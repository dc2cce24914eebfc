use super::*;
use chat::{ManualClock, Session};
use events::ChatHandler;

fn store() -> ChatStore {
    let mut store = ChatStore::new(ManualClock::new(0));
    store.set_sessions(vec![Session {
        id: "s1".to_owned(),
        title: "sales".to_owned(),
        created_at: String::new(),
        updated_at: String::new(),
    }]);
    store.select("s1");
    store
}

// =============================================================================
// KEYS
// =============================================================================

#[test]
fn answer_chunks_keep_the_same_keys() {
    let mut store = store();
    store.begin_turn("total sales?").unwrap();
    let before = message_ids(&store);
    assert_eq!(before.len(), 2);

    store.on_sql("SELECT 1".to_owned());
    store.on_answer("Sales ".to_owned());
    store.on_answer("are up.".to_owned());
    assert_eq!(message_ids(&store), before);
}

#[test]
fn a_new_turn_only_appends_keys() {
    let mut store = store();
    store.begin_turn("first").unwrap();
    store.on_done();
    let first = message_ids(&store);

    store.begin_turn("second").unwrap();
    let both = message_ids(&store);
    assert_eq!(both.len(), 4);
    assert_eq!(both[..2], first[..]);
}

// =============================================================================
// STREAMING FLAG
// =============================================================================

#[test]
fn only_the_last_reply_is_streaming() {
    let mut store = store();
    store.begin_turn("total sales?").unwrap();
    let ids = message_ids(&store);

    assert!(!is_streaming_message(&store, &ids[0]));
    assert!(is_streaming_message(&store, &ids[1]));

    store.on_done();
    assert!(!is_streaming_message(&store, &ids[1]));
}

#[test]
fn unknown_id_is_not_streaming() {
    let mut store = store();
    store.begin_turn("total sales?").unwrap();
    assert!(!is_streaming_message(&store, "missing"));
}
