use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use super::event_types::{InboundEventType, OutboundEventType};
use crate::models::ChatMessage;

/// Every text frame on the socket: a named event plus its payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventFrame {
    pub event: String,
    #[serde(default)]
    pub data: Value,
}

/// `{room, message}` – used by `receive_message` and `send_room_message`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomMessageData {
    pub room: String,
    pub message: ChatMessage,
}

/// `{room, messages}` – delivered once per room join
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomHistoryData {
    pub room: String,
    pub messages: Vec<ChatMessage>,
}

/// `{room, seenBy}` – somebody has read the room
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeenUpdateData {
    pub room: String,
    #[serde(rename = "seenBy")]
    pub seen_by: String,
}

/// `{username, room}` – membership, typing and seen emissions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomUserData {
    pub username: String,
    pub room: String,
}

/// Decoded server → client events.
#[derive(Debug, Clone, PartialEq)]
pub enum InboundEvent {
    ReceiveMessage(RoomMessageData),
    RoomList(Vec<String>),
    RoomMessageHistory(RoomHistoryData),
    OnlineUsers(Vec<String>),
    UserTyping(String),
    UserStopTyping(String),
    SeenUpdate(SeenUpdateData),
}

impl InboundEvent {
    pub fn event_type(&self) -> InboundEventType {
        match self {
            InboundEvent::ReceiveMessage(_) => InboundEventType::ReceiveMessage,
            InboundEvent::RoomList(_) => InboundEventType::RoomList,
            InboundEvent::RoomMessageHistory(_) => InboundEventType::RoomMessageHistory,
            InboundEvent::OnlineUsers(_) => InboundEventType::OnlineUsers,
            InboundEvent::UserTyping(_) => InboundEventType::UserTyping,
            InboundEvent::UserStopTyping(_) => InboundEventType::UserStopTyping,
            InboundEvent::SeenUpdate(_) => InboundEventType::SeenUpdate,
        }
    }
}

/// Client → server emissions. All of them are fire-and-forget.
#[derive(Debug, Clone, PartialEq)]
pub enum OutboundEvent {
    Join(String),
    JoinRoom(RoomUserData),
    LeaveRoom(RoomUserData),
    CreateRoom(String),
    SendRoomMessage(RoomMessageData),
    Typing(RoomUserData),
    StopTyping(RoomUserData),
    Seen(RoomUserData),
}

impl OutboundEvent {
    pub fn event_type(&self) -> OutboundEventType {
        match self {
            OutboundEvent::Join(_) => OutboundEventType::Join,
            OutboundEvent::JoinRoom(_) => OutboundEventType::JoinRoom,
            OutboundEvent::LeaveRoom(_) => OutboundEventType::LeaveRoom,
            OutboundEvent::CreateRoom(_) => OutboundEventType::CreateRoom,
            OutboundEvent::SendRoomMessage(_) => OutboundEventType::SendRoomMessage,
            OutboundEvent::Typing(_) => OutboundEventType::Typing,
            OutboundEvent::StopTyping(_) => OutboundEventType::StopTyping,
            OutboundEvent::Seen(_) => OutboundEventType::Seen,
        }
    }

    /// Wrap the payload in an [`EventFrame`].
    pub fn to_frame(&self) -> Result<EventFrame, FrameError> {
        let data = match self {
            OutboundEvent::Join(username) => Value::String(username.clone()),
            OutboundEvent::CreateRoom(room) => Value::String(room.clone()),
            OutboundEvent::SendRoomMessage(payload) => serde_json::to_value(payload)?,
            OutboundEvent::JoinRoom(payload)
            | OutboundEvent::LeaveRoom(payload)
            | OutboundEvent::Typing(payload)
            | OutboundEvent::StopTyping(payload)
            | OutboundEvent::Seen(payload) => serde_json::to_value(payload)?,
        };
        Ok(EventFrame {
            event: self.event_type().to_string(),
            data,
        })
    }

    /// Serialise to the JSON text sent over the socket.
    pub fn to_json(&self) -> Result<String, FrameError> {
        Ok(serde_json::to_string(&self.to_frame()?)?)
    }
}

/// Why an inbound frame was dropped.
#[derive(Debug)]
pub enum FrameError {
    Json(serde_json::Error),
    InvalidEnvelope,
    UnknownEvent(String),
}

impl fmt::Display for FrameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FrameError::Json(e) => write!(f, "invalid JSON payload: {}", e),
            FrameError::InvalidEnvelope => write!(f, "frame does not match the event envelope"),
            FrameError::UnknownEvent(name) => write!(f, "unknown event: {}", name),
        }
    }
}

impl std::error::Error for FrameError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FrameError::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for FrameError {
    fn from(e: serde_json::Error) -> Self {
        FrameError::Json(e)
    }
}

/// Helper functions for creating outbound events
pub mod builders {
    use super::*;

    fn room_user(username: &str, room: &str) -> RoomUserData {
        RoomUserData {
            username: username.to_string(),
            room: room.to_string(),
        }
    }

    pub fn create_join(username: &str) -> OutboundEvent {
        OutboundEvent::Join(username.to_string())
    }

    pub fn create_join_room(username: &str, room: &str) -> OutboundEvent {
        OutboundEvent::JoinRoom(room_user(username, room))
    }

    pub fn create_leave_room(username: &str, room: &str) -> OutboundEvent {
        OutboundEvent::LeaveRoom(room_user(username, room))
    }

    pub fn create_room(room: &str) -> OutboundEvent {
        OutboundEvent::CreateRoom(room.to_string())
    }

    pub fn create_send_room_message(room: &str, message: ChatMessage) -> OutboundEvent {
        OutboundEvent::SendRoomMessage(RoomMessageData {
            room: room.to_string(),
            message,
        })
    }

    pub fn create_typing(username: &str, room: &str) -> OutboundEvent {
        OutboundEvent::Typing(room_user(username, room))
    }

    pub fn create_stop_typing(username: &str, room: &str) -> OutboundEvent {
        OutboundEvent::StopTyping(room_user(username, room))
    }

    pub fn create_seen(username: &str, room: &str) -> OutboundEvent {
        OutboundEvent::Seen(room_user(username, room))
    }
}

/// Frame parsing
pub mod handlers {
    use super::*;
    use crate::schema_validation::validate_frame;

    /// Parse a raw text frame into a typed inbound event.
    pub fn parse_frame(json: &str) -> Result<InboundEvent, FrameError> {
        let value: Value = serde_json::from_str(json)?;
        parse_value(value)
    }

    /// Same as [`parse_frame`] for an already parsed JSON value.
    pub fn parse_value(value: Value) -> Result<InboundEvent, FrameError> {
        if !validate_frame(&value) {
            return Err(FrameError::InvalidEnvelope);
        }
        let frame: EventFrame = serde_json::from_value(value)?;

        let event_type = InboundEventType::from_name(&frame.event)
            .ok_or_else(|| FrameError::UnknownEvent(frame.event.clone()))?;

        let data = frame.data;
        let event = match event_type {
            InboundEventType::ReceiveMessage => {
                InboundEvent::ReceiveMessage(serde_json::from_value(data)?)
            }
            InboundEventType::RoomList => InboundEvent::RoomList(serde_json::from_value(data)?),
            InboundEventType::RoomMessageHistory => {
                InboundEvent::RoomMessageHistory(serde_json::from_value(data)?)
            }
            InboundEventType::OnlineUsers => {
                InboundEvent::OnlineUsers(serde_json::from_value(data)?)
            }
            InboundEventType::UserTyping => InboundEvent::UserTyping(serde_json::from_value(data)?),
            InboundEventType::UserStopTyping => {
                InboundEvent::UserStopTyping(serde_json::from_value(data)?)
            }
            InboundEventType::SeenUpdate => InboundEvent::SeenUpdate(serde_json::from_value(data)?),
        };
        Ok(event)
    }
}
