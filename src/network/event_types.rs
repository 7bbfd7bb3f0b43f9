use serde::{Deserialize, Serialize};
use std::fmt;

/// Named events the server pushes to the client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InboundEventType {
    ReceiveMessage,
    RoomList,
    RoomMessageHistory,
    OnlineUsers,
    UserTyping,
    UserStopTyping,
    SeenUpdate,
}

/// Named events the client emits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutboundEventType {
    Join,
    JoinRoom,
    LeaveRoom,
    CreateRoom,
    SendRoomMessage,
    Typing,
    StopTyping,
    Seen,
}

impl InboundEventType {
    /// Every handler the session registers on connect.
    pub const ALL: [InboundEventType; 7] = [
        InboundEventType::ReceiveMessage,
        InboundEventType::RoomList,
        InboundEventType::RoomMessageHistory,
        InboundEventType::OnlineUsers,
        InboundEventType::UserTyping,
        InboundEventType::UserStopTyping,
        InboundEventType::SeenUpdate,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            InboundEventType::ReceiveMessage => "receive_message",
            InboundEventType::RoomList => "room_list",
            InboundEventType::RoomMessageHistory => "room_message_history",
            InboundEventType::OnlineUsers => "online_users",
            InboundEventType::UserTyping => "user_typing",
            InboundEventType::UserStopTyping => "user_stop_typing",
            InboundEventType::SeenUpdate => "seen_update",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == name)
    }
}

impl OutboundEventType {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutboundEventType::Join => "join",
            OutboundEventType::JoinRoom => "join_room",
            OutboundEventType::LeaveRoom => "leave_room",
            OutboundEventType::CreateRoom => "create_room",
            OutboundEventType::SendRoomMessage => "send_room_message",
            OutboundEventType::Typing => "typing",
            OutboundEventType::StopTyping => "stop_typing",
            OutboundEventType::Seen => "seen",
        }
    }
}

impl fmt::Display for InboundEventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for OutboundEventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
