// Re-export network modules
pub mod config;
pub mod event_types;
pub mod messages;
pub mod session;
pub mod ws_client;

// Re-export commonly used items
pub use config::ChatConfig;
pub use event_types::{InboundEventType, OutboundEventType};
pub use messages::{builders as message_builders, InboundEvent, OutboundEvent};
pub use session::ChatSession;
pub use ws_client::{ConnectionState, IWsClient, WsClient, WsError};
