//! Online users and the remote typing indicator.

use crate::messages::{Command, Message};
use crate::network::messages::InboundEvent;
use crate::state::AppState;

/// Returns `true` when the message was handled by the presence reducer.
pub fn update(state: &mut AppState, msg: &Message, _cmds: &mut Vec<Command>) -> bool {
    match msg {
        Message::Inbound(InboundEvent::OnlineUsers(users)) => {
            state.online_users = users.clone();
            true
        }
        Message::Inbound(InboundEvent::UserTyping(username)) => {
            if state.username() != Some(username.as_str()) {
                state.typing_user = Some(username.clone());
            }
            true
        }
        Message::Inbound(InboundEvent::UserStopTyping(username)) => {
            if state.typing_user.as_deref() == Some(username.as_str()) {
                state.typing_user = None;
            }
            true
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inbound(event: InboundEvent) -> Message {
        Message::Inbound(event)
    }

    fn alice() -> AppState {
        let mut state = AppState::new();
        state.user = Some("alice".into());
        state
    }

    #[test]
    fn online_users_are_replaced_wholesale() {
        let mut state = alice();
        state.dispatch(inbound(InboundEvent::OnlineUsers(vec!["a".into(), "b".into()])));
        state.dispatch(inbound(InboundEvent::OnlineUsers(vec!["c".into()])));
        assert_eq!(state.online_users, vec!["c".to_string()]);
    }

    #[test]
    fn own_typing_echo_is_ignored() {
        let mut state = alice();
        state.dispatch(inbound(InboundEvent::UserTyping("alice".into())));
        assert!(state.typing_user.is_none());
    }

    #[test]
    fn latest_typer_wins() {
        let mut state = alice();
        state.dispatch(inbound(InboundEvent::UserTyping("bob".into())));
        state.dispatch(inbound(InboundEvent::UserTyping("carol".into())));
        assert_eq!(state.typing_user.as_deref(), Some("carol"));
    }

    #[test]
    fn stop_only_clears_matching_typer() {
        let mut state = alice();
        state.dispatch(inbound(InboundEvent::UserTyping("bob".into())));
        state.dispatch(inbound(InboundEvent::UserStopTyping("carol".into())));
        assert_eq!(state.typing_user.as_deref(), Some("bob"));

        state.dispatch(inbound(InboundEvent::UserStopTyping("bob".into())));
        assert!(state.typing_user.is_none());
    }
}
