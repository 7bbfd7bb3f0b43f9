// src/messages.rs
//
// Everything that can happen to the chat client, and the side effects the
// reducers ask for in return.
//
use serde_json::Value;

use crate::network::messages::{InboundEvent, OutboundEvent};
use crate::notifications::NotificationRequest;
use crate::storage::UserSettings;

#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    // Session
    Login(String),
    Logout,
    SocketConnected,
    SocketDisconnected,
    Inbound(InboundEvent),

    // Rooms
    SelectRoom(String),
    CreateRoom(String),

    // Composer
    SendChat(String),
    InputChanged,
    InputBlurred,
    InputCancelled,              // Escape key
    StopTypingElapsed { generation: u64 },

    // Read receipts for the selected room
    MarkRoomSeen,

    // Settings
    UpdateSetting { key: String, value: Value },
    ResetSettings,
    SettingsLoaded(UserSettings),
}

/// Side effects, executed after the state borrow is released.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Fire-and-forget socket emission
    Emit(OutboundEvent),
    OpenConnection,
    CloseConnection,

    /// (Re)arm the single stop-typing timer
    ScheduleStopTyping { generation: u64, delay_ms: u32 },
    CancelStopTyping,

    Notify(NotificationRequest),

    /// Persist the serialised settings record
    PersistSettings(String),
    ClearSettings,

    /// Feed another message back through the reducers
    SendMessage(Message),
}

impl Command {
    pub fn send(msg: Message) -> Self {
        Command::SendMessage(msg)
    }
}
