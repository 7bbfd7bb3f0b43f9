//! Login, logout and socket lifecycle.

use crate::messages::{Command, Message};
use crate::network::messages::builders;
use crate::reducers::settings::persist;
use crate::state::AppState;
use crate::{debug_log, warn_log};

/// Returns `true` when the message was handled by the session reducer.
pub fn update(state: &mut AppState, msg: &Message, cmds: &mut Vec<Command>) -> bool {
    match msg {
        Message::Login(name) => {
            let name = name.trim();
            if name.is_empty() {
                warn_log!("Ignoring login with an empty username");
                return true;
            }
            if let Some(current) = &state.user {
                warn_log!("Already logged in as {}, ignoring login as {}", current, name);
                return true;
            }

            debug_log!("Logging in as {}", name);
            state.user = Some(name.to_string());
            if state.settings.username.is_empty() {
                state.settings.username = name.to_string();
                persist(state, cmds);
            }
            cmds.push(Command::OpenConnection);
            true
        }
        Message::Logout => {
            if state.user.is_none() {
                return true;
            }
            debug_log!("Logging out");
            cmds.push(Command::CancelStopTyping);
            cmds.push(Command::CloseConnection);
            state.reset_session();
            true
        }
        Message::SocketConnected => {
            state.connected = true;
            let Some(user) = state.user.clone() else {
                warn_log!("Socket opened without a logged-in user");
                return true;
            };
            // Announce the identity, then join whichever room is selected.
            cmds.push(Command::Emit(builders::create_join(&user)));
            for event in state.selection.sync(&user) {
                cmds.push(Command::Emit(event));
            }
            true
        }
        Message::SocketDisconnected => {
            warn_log!("Chat connection closed");
            state.connected = false;
            true
        }
        _ => false,
    }
}
