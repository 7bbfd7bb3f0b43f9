// src/views.rs
//
// Serialisable snapshot of what the chat screen should show. The
// presentation layer renders it as-is; nothing here mutates state.
//
use serde::Serialize;

use crate::models::ChatMessage;
use crate::state::AppState;
use crate::storage::{FontSize, Theme};
use crate::user_color::{avatar_initial, contrast_text_color, user_color, Palette};
use crate::utils::format_time_label;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Route {
    Login,
    Chat,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomView {
    pub name: String,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageView {
    pub username: String,
    pub content: String,
    pub timestamp: String,
    pub time_label: String,
    pub color: String,
    pub text_color: String,
    pub initial: String,
    pub own: bool,
    pub seen_label: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserView {
    pub username: String,
    pub color: String,
    pub initial: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatView {
    pub route: Route,
    pub username: Option<String>,
    pub connected: bool,
    pub rooms: Vec<RoomView>,
    pub selected_room: String,
    pub messages: Vec<MessageView>,
    pub online_users: Vec<UserView>,
    pub typing_label: Option<String>,
    pub theme: Theme,
    pub font_size: FontSize,
    pub compact_mode: bool,
    pub enter_to_send: bool,
}

/// "✓ Seen by N", shown once someone besides the author has read it.
fn seen_label(message: &ChatMessage) -> Option<String> {
    let count = message.seen_by.len();
    (count > 1).then(|| format!("✓ Seen by {}", count))
}

fn message_view(message: &ChatMessage, me: Option<&str>, palette: Palette) -> MessageView {
    let color = user_color(&message.username, palette, &[]);
    MessageView {
        username: message.username.clone(),
        content: message.content.clone(),
        timestamp: message.timestamp.clone(),
        time_label: format_time_label(&message.timestamp),
        color: color.to_string(),
        text_color: contrast_text_color(color).to_string(),
        initial: avatar_initial(&message.username),
        own: me == Some(message.username.as_str()),
        seen_label: seen_label(message),
    }
}

impl ChatView {
    pub fn from_state(state: &AppState) -> Self {
        let palette = Palette::from(state.settings.theme);
        let me = state.username();
        let current = state.current_room();

        let rooms = state
            .rooms
            .iter()
            .map(|name| RoomView {
                name: name.clone(),
                selected: name == current,
            })
            .collect();

        let messages = state
            .room_messages
            .get(current)
            .iter()
            .map(|m| message_view(m, me, palette))
            .collect();

        let online_users = state
            .online_users
            .iter()
            .map(|name| UserView {
                username: name.clone(),
                color: user_color(name, palette, &[]).to_string(),
                initial: avatar_initial(name),
            })
            .collect();

        Self {
            route: if me.is_some() { Route::Chat } else { Route::Login },
            username: state.user.clone(),
            connected: state.connected,
            rooms,
            selected_room: current.to_string(),
            messages,
            online_users,
            typing_label: state
                .typing_user
                .as_ref()
                .map(|user| format!("{} is typing...", user)),
            theme: state.settings.theme,
            font_size: state.settings.font_size,
            compact_mode: state.settings.compact_mode,
            enter_to_send: state.settings.enter_to_send,
        }
    }
}
