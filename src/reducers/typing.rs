//! Local typing indicator with a single debounced `stop_typing`.
//!
//! Every keystroke emits `typing` and re-arms the timer under a fresh
//! generation number. A timer firing for an older generation is ignored.

use crate::constants::TYPING_STOP_DELAY_MS;
use crate::messages::{Command, Message};
use crate::network::messages::builders;
use crate::state::{AppState, PendingStopTyping};
use crate::debug_log;

/// Returns `true` when the message was handled by the typing reducer.
pub fn update(state: &mut AppState, msg: &Message, cmds: &mut Vec<Command>) -> bool {
    match msg {
        Message::InputChanged => {
            let Some(user) = state.user.clone() else {
                return true;
            };
            if !state.settings.typing_indicators {
                return true;
            }
            state.typing_generation += 1;
            let generation = state.typing_generation;
            let room = state.current_room().to_string();

            cmds.push(Command::Emit(builders::create_typing(&user, &room)));
            cmds.push(Command::ScheduleStopTyping {
                generation,
                delay_ms: TYPING_STOP_DELAY_MS,
            });
            state.pending_stop_typing = Some(PendingStopTyping { generation, room });
            true
        }
        Message::InputBlurred | Message::InputCancelled => {
            stop_now(state, cmds);
            true
        }
        Message::StopTypingElapsed { generation } => {
            match state.pending_stop_typing.take() {
                Some(pending) if pending.generation == *generation => {
                    if let Some(user) = state.user.as_deref() {
                        cmds.push(Command::Emit(builders::create_stop_typing(user, &pending.room)));
                    }
                }
                other => {
                    debug_log!("Ignoring stale stop-typing timer #{}", generation);
                    state.pending_stop_typing = other;
                }
            }
            true
        }
        _ => false,
    }
}

/// Cancel the debounce and emit `stop_typing` right away. Used on send,
/// blur, escape and room switches.
///
/// An announced `typing` is always retracted in the room it was sent to,
/// even if indicators were switched off since.
pub fn stop_now(state: &mut AppState, cmds: &mut Vec<Command>) {
    cmds.push(Command::CancelStopTyping);
    let pending = state.pending_stop_typing.take();

    let Some(user) = state.user.as_deref() else {
        return;
    };
    let room = match pending {
        Some(pending) => pending.room,
        None if state.settings.typing_indicators => state.current_room().to_string(),
        None => return,
    };
    cmds.push(Command::Emit(builders::create_stop_typing(user, &room)));
}
