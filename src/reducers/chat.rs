//! Message reconciliation: inbound messages, history, read receipts and the
//! optimistic local send.

use crate::messages::{Command, Message};
use crate::models::ChatMessage;
use crate::network::messages::{builders, InboundEvent, RoomHistoryData, RoomMessageData};
use crate::notifications::NotificationRequest;
use crate::reducers::typing;
use crate::state::AppState;
use crate::utils::now_iso;
use crate::{debug_log, warn_log};

/// Returns `true` when the message was handled by the chat reducer.
pub fn update(state: &mut AppState, msg: &Message, cmds: &mut Vec<Command>) -> bool {
    match msg {
        Message::SendChat(content) => {
            send_chat(state, content, cmds);
            true
        }
        Message::Inbound(InboundEvent::ReceiveMessage(RoomMessageData { room, message })) => {
            receive_message(state, room, message.clone(), cmds);
            true
        }
        Message::Inbound(InboundEvent::RoomMessageHistory(RoomHistoryData { room, messages })) => {
            state.ensure_room(room);
            state.room_messages.replace_history(room, messages.clone());
            debug_log!("Loaded {} messages for {}", messages.len(), room);
            if room == state.current_room() {
                cmds.push(Command::send(Message::MarkRoomSeen));
            }
            true
        }
        Message::Inbound(InboundEvent::SeenUpdate(seen)) => {
            let grew = state.room_messages.mark_seen(&seen.room, &seen.seen_by);
            if grew > 0 {
                debug_log!("{} has seen {} messages in {}", seen.seen_by, grew, seen.room);
            }
            true
        }
        Message::MarkRoomSeen => {
            let Some(user) = state.user.as_deref() else {
                return true;
            };
            let room = state.current_room();
            if state.settings.read_receipts && !state.room_messages.get(room).is_empty() {
                cmds.push(Command::Emit(builders::create_seen(user, room)));
            }
            true
        }
        _ => false,
    }
}

/// Optimistic send: the message is emitted and appended locally with the
/// same timestamp, so the server echo dedups against the local copy.
fn send_chat(state: &mut AppState, content: &str, cmds: &mut Vec<Command>) {
    let content = content.trim();
    if content.is_empty() {
        return;
    }
    let Some(user) = state.user.clone() else {
        warn_log!("Cannot send a message before logging in");
        return;
    };
    let room = state.current_room().to_string();

    let mut message = ChatMessage::new(&user, content, &now_iso());
    message.add_seen_by(&user);

    cmds.push(Command::Emit(builders::create_send_room_message(&room, message.clone())));
    typing::stop_now(state, cmds);
    append(state, &room, message, cmds);
}

fn receive_message(state: &mut AppState, room: &str, message: ChatMessage, cmds: &mut Vec<Command>) {
    append(state, room, message, cmds);
}

/// Shared append path for local sends and inbound messages. Any room that
/// ends up holding messages is listed.
fn append(state: &mut AppState, room: &str, message: ChatMessage, cmds: &mut Vec<Command>) {
    state.ensure_room(room);
    let from_other = state.username() != Some(message.username.as_str());
    let request = if from_other {
        NotificationRequest::for_message(room, &message, &state.settings)
    } else {
        None
    };

    if !state.room_messages.append(room, message) {
        debug_log!("Dropping duplicate message in {}", room);
        return;
    }
    if let Some(request) = request {
        cmds.push(Command::Notify(request));
    }
    if room == state.current_room() {
        cmds.push(Command::send(Message::MarkRoomSeen));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn connected() -> AppState {
        let mut state = AppState::new();
        state.dispatch(Message::Login("alice".into()));
        state.dispatch(Message::SocketConnected);
        state
    }

    fn receive(room: &str, message: ChatMessage) -> Message {
        Message::Inbound(InboundEvent::ReceiveMessage(RoomMessageData {
            room: room.into(),
            message,
        }))
    }

    #[test]
    fn optimistic_send_emits_and_appends_same_copy() {
        let mut state = connected();
        let cmds = state.dispatch(Message::SendChat("hi".into()));

        let stored = state.room_messages.get("General");
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].seen_by, vec!["alice".to_string()]);
        assert_eq!(
            cmds[0],
            Command::Emit(builders::create_send_room_message("General", stored[0].clone()))
        );
        assert!(cmds.contains(&Command::CancelStopTyping));
        assert!(cmds.contains(&Command::Emit(builders::create_stop_typing("alice", "General"))));
        assert_eq!(cmds.last(), Some(&Command::send(Message::MarkRoomSeen)));
    }

    #[test]
    fn server_echo_of_own_message_is_suppressed() {
        let mut state = connected();
        state.dispatch(Message::SendChat("hi".into()));
        let sent = state.room_messages.get("General")[0].clone();

        let echo = ChatMessage::new("alice", "hi", &sent.timestamp);
        let cmds = state.dispatch(receive("General", echo));
        assert!(cmds.is_empty());
        assert_eq!(state.room_messages.get("General").len(), 1);
    }

    #[test]
    fn blank_send_is_ignored() {
        let mut state = connected();
        assert!(state.dispatch(Message::SendChat("   ".into())).is_empty());
    }

    #[test]
    fn message_from_other_notifies_and_marks_seen() {
        let mut state = connected();
        let cmds = state.dispatch(receive("General", ChatMessage::new("bob", "yo", "T1")));
        assert!(matches!(&cmds[0], Command::Notify(r) if r.title == "bob in General"));
        assert_eq!(cmds[1], Command::send(Message::MarkRoomSeen));
    }

    #[test]
    fn message_for_other_room_adds_room_without_seen() {
        let mut state = connected();
        let cmds = state.dispatch(receive("Random", ChatMessage::new("bob", "yo", "T1")));
        assert!(state.is_known_room("Random"));
        assert_eq!(cmds.len(), 1);
        assert!(matches!(cmds[0], Command::Notify(_)));
    }

    #[test]
    fn history_replaces_and_requests_seen_for_current_room() {
        let mut state = connected();
        state.dispatch(receive("General", ChatMessage::new("bob", "old", "T0")));

        let history = vec![
            ChatMessage::new("bob", "a", "T1"),
            ChatMessage::new("carol", "b", "T2"),
        ];
        let cmds = state.dispatch(Message::Inbound(InboundEvent::RoomMessageHistory(
            RoomHistoryData {
                room: "General".into(),
                messages: history.clone(),
            },
        )));
        assert_eq!(state.room_messages.get("General"), history.as_slice());
        assert_eq!(cmds, vec![Command::send(Message::MarkRoomSeen)]);
    }

    #[test]
    fn mark_seen_respects_read_receipts_and_empty_rooms() {
        let mut state = connected();
        assert!(state.dispatch(Message::MarkRoomSeen).is_empty());

        state.dispatch(receive("General", ChatMessage::new("bob", "yo", "T1")));
        assert_eq!(
            state.dispatch(Message::MarkRoomSeen),
            vec![Command::Emit(builders::create_seen("alice", "General"))]
        );

        state.settings.read_receipts = false;
        assert!(state.dispatch(Message::MarkRoomSeen).is_empty());
    }

    #[test]
    fn send_into_room_dropped_by_server_list_keeps_it_listed() {
        let mut state = connected();
        state.ensure_room("Dev");
        state.dispatch(Message::SelectRoom("Dev".into()));
        state.dispatch(Message::Inbound(InboundEvent::RoomList(vec!["General".into()])));
        state.dispatch(Message::SendChat("hello".into()));

        assert_eq!(state.room_messages.get("Dev").len(), 1);
        for room in state.room_messages.room_names() {
            assert!(state.is_known_room(room), "{} missing from room list", room);
        }
    }

    #[test]
    fn seen_update_is_idempotent() {
        let mut state = connected();
        state.dispatch(receive("General", ChatMessage::new("bob", "yo", "T1")));
        let seen = Message::Inbound(InboundEvent::SeenUpdate(
            crate::network::messages::SeenUpdateData {
                room: "General".into(),
                seen_by: "carol".into(),
            },
        ));
        assert!(state.dispatch(seen.clone()).is_empty());
        state.dispatch(seen);
        assert_eq!(state.room_messages.get("General")[0].seen_by, vec!["carol".to_string()]);
    }
}
