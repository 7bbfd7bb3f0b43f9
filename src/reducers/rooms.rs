//! Room list, room creation and room selection.

use crate::messages::{Command, Message};
use crate::network::messages::{builders, InboundEvent};
use crate::reducers::typing;
use crate::state::AppState;
use crate::{debug_log, warn_log};

/// Returns `true` when the message was handled by the rooms reducer.
pub fn update(state: &mut AppState, msg: &Message, cmds: &mut Vec<Command>) -> bool {
    match msg {
        Message::SelectRoom(room) => {
            select_room(state, room, cmds);
            true
        }
        Message::CreateRoom(name) => {
            let name = name.trim();
            if name.is_empty() || state.is_known_room(name) {
                debug_log!("Ignoring create_room for '{}'", name);
                return true;
            }
            if state.user.is_none() {
                warn_log!("Cannot create a room before logging in");
                return true;
            }
            cmds.push(Command::Emit(builders::create_room(name)));
            true
        }
        Message::Inbound(InboundEvent::RoomList(rooms)) => {
            replace_room_list(state, rooms);
            true
        }
        _ => false,
    }
}

fn select_room(state: &mut AppState, room: &str, cmds: &mut Vec<Command>) {
    if !state.is_known_room(room) {
        warn_log!("Ignoring selection of unknown room '{}'", room);
        return;
    }
    if room == state.current_room() {
        return;
    }

    // A pending stop_typing belongs to the room being left.
    if state.pending_stop_typing.is_some() {
        typing::stop_now(state, cmds);
    }

    state.selection.select(room);
    debug_log!("Selected room {}", room);

    if !state.connected {
        // Membership catches up once the socket opens.
        return;
    }
    if let Some(user) = state.user.clone() {
        for event in state.selection.sync(&user) {
            cmds.push(Command::Emit(event));
        }
    }
}

/// The server's list wins, but the selected room and rooms we already hold
/// messages for stay.
fn replace_room_list(state: &mut AppState, rooms: &[String]) {
    let mut next: Vec<String> = Vec::with_capacity(rooms.len() + 1);
    for room in rooms {
        if !next.contains(room) {
            next.push(room.clone());
        }
    }
    let current = state.current_room();
    if !next.iter().any(|r| r == current) {
        next.push(current.to_string());
    }
    let mut retained: Vec<String> = state
        .room_messages
        .room_names()
        .filter(|name| !next.iter().any(|r| r.as_str() == *name))
        .map(str::to_string)
        .collect();
    retained.sort();
    next.extend(retained);

    state.rooms = next;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ChatMessage;

    fn connected(name: &str) -> AppState {
        let mut state = AppState::new();
        state.dispatch(Message::Login(name.into()));
        state.dispatch(Message::SocketConnected);
        state.dispatch(Message::Inbound(InboundEvent::RoomList(vec![
            "General".into(),
            "Dev".into(),
        ])));
        state
    }

    #[test]
    fn general_to_dev_leaves_then_joins_once() {
        let mut state = connected("alice");

        let cmds = state.dispatch(Message::SelectRoom("Dev".into()));
        assert_eq!(
            cmds,
            vec![
                Command::Emit(builders::create_leave_room("alice", "General")),
                Command::Emit(builders::create_join_room("alice", "Dev")),
            ]
        );
        assert_eq!(state.current_room(), "Dev");

        assert!(state.dispatch(Message::SelectRoom("Dev".into())).is_empty());
    }

    #[test]
    fn selection_while_offline_defers_membership() {
        let mut state = AppState::new();
        state.dispatch(Message::Login("alice".into()));
        state.ensure_room("Dev");

        assert!(state.dispatch(Message::SelectRoom("Dev".into())).is_empty());
        let cmds = state.dispatch(Message::SocketConnected);
        assert_eq!(
            cmds,
            vec![
                Command::Emit(builders::create_join("alice")),
                Command::Emit(builders::create_join_room("alice", "Dev")),
            ]
        );
    }

    #[test]
    fn unknown_room_is_not_selected() {
        let mut state = connected("alice");
        assert!(state.dispatch(Message::SelectRoom("Nope".into())).is_empty());
        assert_eq!(state.current_room(), "General");
    }

    #[test]
    fn switching_rooms_flushes_pending_typing() {
        let mut state = connected("alice");
        state.dispatch(Message::InputChanged);

        let cmds = state.dispatch(Message::SelectRoom("Dev".into()));
        assert_eq!(cmds[0], Command::CancelStopTyping);
        assert_eq!(
            cmds[1],
            Command::Emit(builders::create_stop_typing("alice", "General"))
        );
        assert!(state.pending_stop_typing.is_none());
    }

    #[test]
    fn create_room_validates_name() {
        let mut state = connected("alice");
        assert_eq!(
            state.dispatch(Message::CreateRoom("  Random ".into())),
            vec![Command::Emit(builders::create_room("Random"))]
        );
        assert!(state.dispatch(Message::CreateRoom("   ".into())).is_empty());
        assert!(state.dispatch(Message::CreateRoom("Dev".into())).is_empty());
    }

    #[test]
    fn room_list_keeps_rooms_with_messages() {
        let mut state = connected("alice");
        state.ensure_room("Old");
        state
            .room_messages
            .append("Old", ChatMessage::new("bob", "hey", "T1"));

        state.dispatch(Message::Inbound(InboundEvent::RoomList(vec![
            "General".into(),
            "Music".into(),
            "General".into(),
        ])));
        assert_eq!(state.rooms, vec!["General", "Music", "Old"]);
    }

    #[test]
    fn room_list_keeps_selected_room() {
        let mut state = connected("alice");
        state.dispatch(Message::SelectRoom("Dev".into()));
        state.dispatch(Message::Inbound(InboundEvent::RoomList(vec!["General".into()])));
        assert_eq!(state.rooms, vec!["General", "Dev"]);
        assert_eq!(state.current_room(), "Dev");
    }
}
