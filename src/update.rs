// src/update.rs
//
use crate::messages::{Command, Message};
use crate::reducers;
use crate::state::AppState;
use crate::debug_log;

/// Root reducer. Each domain reducer returns `true` once it has handled the
/// message; the first one to claim it wins.
pub fn update(state: &mut AppState, msg: Message) -> Vec<Command> {
    let mut commands = Vec::new();

    if reducers::session::update(state, &msg, &mut commands) {
        return commands;
    }
    if reducers::rooms::update(state, &msg, &mut commands) {
        return commands;
    }
    if reducers::chat::update(state, &msg, &mut commands) {
        return commands;
    }
    if reducers::typing::update(state, &msg, &mut commands) {
        return commands;
    }
    if reducers::presence::update(state, &msg, &mut commands) {
        return commands;
    }
    if reducers::settings::update(state, &msg, &mut commands) {
        return commands;
    }

    debug_log!("Unhandled message: {:?}", msg);
    commands
}
