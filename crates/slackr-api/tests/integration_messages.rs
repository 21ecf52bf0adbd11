mod common;

use chrono::Utc;
use slackr_api::ApiError;
use slackr_api::channel::{channel_addowner, channel_invite, channel_join, channel_messages};
use slackr_api::message::{message_edit, message_remove, message_send, message_send_later};
use slackr_api::reactions::{
    REACT_THUMBS_UP, message_pin, message_react, message_unpin, message_unreact,
};
use slackr_api::search::search;

fn visible_ids(state: &slackr_api::AppState, token: &str, channel_id: u32) -> Vec<u32> {
    channel_messages(state, token, channel_id, 0)
        .unwrap()
        .messages
        .iter()
        .map(|m| m.message_id)
        .collect()
}

#[test]
fn test_send_validation() {
    let state = common::workspace();
    let ada = common::register(&state, "Ada", "Lovelace");
    let bob = common::register(&state, "Bob", "Builder");
    let channel_id = common::public_channel(&state, &ada.token, "general");

    let too_long = message_send(&state, &ada.token, channel_id, &"x".repeat(1001));
    assert!(matches!(too_long, Err(ApiError::Input(_))));
    assert!(message_send(&state, &ada.token, channel_id, &"x".repeat(1000)).is_ok());

    let outsider = message_send(&state, &bob.token, channel_id, "hello");
    assert!(matches!(outsider, Err(ApiError::Access(_))));

    let unknown_channel = message_send(&state, &ada.token, 999, "hello");
    assert!(matches!(unknown_channel, Err(ApiError::Input(_))));
}

#[test]
fn test_send_later_is_hidden_until_due() {
    let state = common::workspace();
    let ada = common::register(&state, "Ada", "Lovelace");
    let channel_id = common::public_channel(&state, &ada.token, "general");

    let now = Utc::now().timestamp();
    let past = message_send_later(&state, &ada.token, channel_id, "too late", now - 60);
    assert!(matches!(past, Err(ApiError::Input(_))));

    let scheduled =
        message_send_later(&state, &ada.token, channel_id, "from the future", now + 3600).unwrap();
    let sent = message_send(&state, &ada.token, channel_id, "right now").unwrap();

    assert!(scheduled < sent);
    assert_eq!(visible_ids(&state, &ada.token, channel_id), vec![sent]);
    assert!(search(&state, &ada.token, "future").unwrap().is_empty());
}

#[test]
fn test_edit_and_remove() {
    let state = common::workspace();
    let ada = common::register(&state, "Ada", "Lovelace");
    let bob = common::register(&state, "Bob", "Builder");
    let channel_id = common::public_channel(&state, &ada.token, "general");
    channel_join(&state, &bob.token, channel_id).unwrap();

    let by_ada = message_send(&state, &ada.token, channel_id, "first draft").unwrap();
    let by_bob = message_send(&state, &bob.token, channel_id, "bob says hi").unwrap();

    // Bob neither wrote Ada's message nor owns the channel.
    let denied = message_edit(&state, &bob.token, by_ada, "hijacked");
    assert!(matches!(denied, Err(ApiError::Access(_))));
    let denied = message_remove(&state, &bob.token, by_ada);
    assert!(matches!(denied, Err(ApiError::Access(_))));

    message_edit(&state, &ada.token, by_ada, "final draft").unwrap();
    let page = channel_messages(&state, &ada.token, channel_id, 0).unwrap();
    let edited = page.messages.iter().find(|m| m.message_id == by_ada).unwrap();
    assert_eq!(edited.message, "final draft");

    // Edits obey the same length limit as sends and leave the text alone on failure.
    let too_long = message_edit(&state, &ada.token, by_ada, &"x".repeat(1001));
    assert!(matches!(too_long, Err(ApiError::Input(_))));
    let page = channel_messages(&state, &ada.token, channel_id, 0).unwrap();
    let unchanged = page.messages.iter().find(|m| m.message_id == by_ada).unwrap();
    assert_eq!(unchanged.message, "final draft");

    let at_limit = "y".repeat(1000);
    message_edit(&state, &ada.token, by_ada, &at_limit).unwrap();
    let page = channel_messages(&state, &ada.token, channel_id, 0).unwrap();
    let edited = page.messages.iter().find(|m| m.message_id == by_ada).unwrap();
    assert_eq!(edited.message, at_limit);

    // The channel owner may remove anyone's message.
    message_remove(&state, &ada.token, by_bob).unwrap();
    assert_eq!(visible_ids(&state, &ada.token, channel_id), vec![by_ada]);

    let gone = message_remove(&state, &ada.token, by_bob);
    assert!(matches!(gone, Err(ApiError::Input(_))));
    let gone = message_edit(&state, &ada.token, by_bob, "resurrect");
    assert!(matches!(gone, Err(ApiError::Input(_))));
}

#[test]
fn test_edit_to_empty_removes() {
    let state = common::workspace();
    let ada = common::register(&state, "Ada", "Lovelace");
    let channel_id = common::public_channel(&state, &ada.token, "general");

    let message_id = message_send(&state, &ada.token, channel_id, "ephemeral").unwrap();
    message_edit(&state, &ada.token, message_id, "").unwrap();

    assert!(visible_ids(&state, &ada.token, channel_id).is_empty());
    assert!(search(&state, &ada.token, "ephemeral").unwrap().is_empty());
}

#[test]
fn test_workspace_owner_can_moderate_any_channel() {
    let state = common::workspace();
    let ada = common::register(&state, "Ada", "Lovelace");
    let bob = common::register(&state, "Bob", "Builder");
    let channel_id = common::public_channel(&state, &bob.token, "bobs");

    let message_id = message_send(&state, &bob.token, channel_id, "bob's message").unwrap();
    message_edit(&state, &ada.token, message_id, "moderated").unwrap();
    message_remove(&state, &ada.token, message_id).unwrap();
}

#[test]
fn test_react_and_unreact() {
    let state = common::workspace();
    let ada = common::register(&state, "Ada", "Lovelace");
    let bob = common::register(&state, "Bob", "Builder");
    let eve = common::register(&state, "Eve", "Dropper");
    let channel_id = common::public_channel(&state, &ada.token, "general");
    channel_invite(&state, &ada.token, channel_id, bob.u_id).unwrap();

    let message_id = message_send(&state, &ada.token, channel_id, "react to me").unwrap();

    let bad_kind = message_react(&state, &ada.token, message_id, 2);
    assert!(matches!(bad_kind, Err(ApiError::Input(_))));
    let missing = message_react(&state, &ada.token, 999, REACT_THUMBS_UP);
    assert!(matches!(missing, Err(ApiError::Input(_))));
    let outsider = message_react(&state, &eve.token, message_id, REACT_THUMBS_UP);
    assert!(matches!(outsider, Err(ApiError::Access(_))));

    message_react(&state, &ada.token, message_id, REACT_THUMBS_UP).unwrap();
    message_react(&state, &bob.token, message_id, REACT_THUMBS_UP).unwrap();
    let twice = message_react(&state, &bob.token, message_id, REACT_THUMBS_UP);
    assert!(matches!(twice, Err(ApiError::Input(_))));

    let page = channel_messages(&state, &bob.token, channel_id, 0).unwrap();
    let reacts = &page.messages[0].reacts;
    assert_eq!(reacts.len(), 1);
    assert_eq!(reacts[0].react_id, REACT_THUMBS_UP);
    assert_eq!(reacts[0].u_ids, vec![ada.u_id, bob.u_id]);
    assert!(reacts[0].is_this_user_reacted);

    let outsider = message_unreact(&state, &eve.token, message_id, REACT_THUMBS_UP);
    assert!(matches!(outsider, Err(ApiError::Access(_))));

    message_unreact(&state, &bob.token, message_id, REACT_THUMBS_UP).unwrap();
    let never = message_unreact(&state, &bob.token, message_id, REACT_THUMBS_UP);
    assert!(matches!(never, Err(ApiError::Input(_))));

    message_unreact(&state, &ada.token, message_id, REACT_THUMBS_UP).unwrap();
    let none_left = message_unreact(&state, &ada.token, message_id, REACT_THUMBS_UP);
    assert!(matches!(none_left, Err(ApiError::Input(_))));

    let page = channel_messages(&state, &ada.token, channel_id, 0).unwrap();
    assert!(page.messages[0].reacts.is_empty());
}

#[test]
fn test_pin_and_unpin() {
    let state = common::workspace();
    let ada = common::register(&state, "Ada", "Lovelace");
    let bob = common::register(&state, "Bob", "Builder");
    let eve = common::register(&state, "Eve", "Dropper");
    let channel_id = common::public_channel(&state, &ada.token, "general");
    channel_join(&state, &bob.token, channel_id).unwrap();

    let message_id = message_send(&state, &ada.token, channel_id, "pin me").unwrap();

    // Plain members may pin.
    message_pin(&state, &bob.token, message_id).unwrap();
    let again = message_pin(&state, &ada.token, message_id);
    assert!(matches!(again, Err(ApiError::Input(_))));

    let outsider = message_unpin(&state, &eve.token, message_id);
    assert!(matches!(outsider, Err(ApiError::Access(_))));

    let page = channel_messages(&state, &ada.token, channel_id, 0).unwrap();
    assert!(page.messages[0].is_pinned);

    message_unpin(&state, &ada.token, message_id).unwrap();
    let again = message_unpin(&state, &bob.token, message_id);
    assert!(matches!(again, Err(ApiError::Input(_))));

    let missing = message_pin(&state, &ada.token, 999);
    assert!(matches!(missing, Err(ApiError::Input(_))));
}

#[test]
fn test_owner_promotion_grants_moderation() {
    let state = common::workspace();
    let _ada = common::register(&state, "Ada", "Lovelace");
    let bob = common::register(&state, "Bob", "Builder");
    let cat = common::register(&state, "Cat", "Stevens");
    let channel_id = common::public_channel(&state, &bob.token, "general");
    channel_join(&state, &cat.token, channel_id).unwrap();

    let message_id = message_send(&state, &bob.token, channel_id, "owner's note").unwrap();
    assert!(message_remove(&state, &cat.token, message_id).is_err());

    channel_addowner(&state, &bob.token, channel_id, cat.u_id).unwrap();
    message_remove(&state, &cat.token, message_id).unwrap();
}
