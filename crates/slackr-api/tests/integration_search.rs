mod common;

use slackr_api::message::message_send;
use slackr_api::search::search;

#[test]
fn test_blank_queries_find_nothing() {
    let state = common::workspace();
    let ada = common::register(&state, "Ada", "Lovelace");
    let channel_id = common::public_channel(&state, &ada.token, "general");
    message_send(&state, &ada.token, channel_id, "   ").unwrap();
    message_send(&state, &ada.token, channel_id, "hello").unwrap();

    for query in ["", " ", "\t\n  "] {
        assert!(search(&state, &ada.token, query).unwrap().is_empty());
    }
}

#[test]
fn test_search_is_case_insensitive_substring() {
    let state = common::workspace();
    let ada = common::register(&state, "Ada", "Lovelace");
    let channel_id = common::public_channel(&state, &ada.token, "general");

    let hit = message_send(&state, &ada.token, channel_id, "The Analytical ENGINE").unwrap();
    message_send(&state, &ada.token, channel_id, "difference machine").unwrap();

    let results = search(&state, &ada.token, "  engine ").unwrap();
    let ids: Vec<_> = results.iter().map(|m| m.message_id).collect();
    assert_eq!(ids, vec![hit]);
    assert_eq!(results[0].message, "The Analytical ENGINE");
}

#[test]
fn test_results_are_grouped_by_channel() {
    let state = common::workspace();
    let ada = common::register(&state, "Ada", "Lovelace");
    let first = common::public_channel(&state, &ada.token, "first");
    let second = common::public_channel(&state, &ada.token, "second");

    let a = message_send(&state, &ada.token, second, "match a").unwrap();
    let b = message_send(&state, &ada.token, first, "match b").unwrap();
    let c = message_send(&state, &ada.token, second, "match c").unwrap();
    let d = message_send(&state, &ada.token, first, "match d").unwrap();

    let ids: Vec<_> = search(&state, &ada.token, "match")
        .unwrap()
        .iter()
        .map(|m| m.message_id)
        .collect();
    assert_eq!(ids, vec![d, b, c, a]);
}

#[test]
fn test_search_without_session_is_empty() {
    let state = common::workspace();
    let ada = common::register(&state, "Ada", "Lovelace");
    let channel_id = common::public_channel(&state, &ada.token, "general");
    message_send(&state, &ada.token, channel_id, "hello").unwrap();

    assert!(search(&state, "garbage", "hello").unwrap().is_empty());
    assert_eq!(search(&state, &ada.token, "hello").unwrap().len(), 1);
}
