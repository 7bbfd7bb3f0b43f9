//! One live connection per logged-in user.
//!
//! The session wires the socket callbacks to the reducer loop: socket open,
//! socket close, and every decoded inbound frame become [`Message`]s. Logout
//! tears the handlers down before closing so nothing fires afterwards.

use std::cell::RefCell;
use std::rc::Rc;

use super::messages::{handlers, OutboundEvent};
use super::ws_client::{ConnectionState, IWsClient, WsError};
use crate::messages::Message;
use crate::{debug_log, error_log, warn_log};

/// Sink the session feeds decoded events into.
pub type Dispatcher = Rc<dyn Fn(Message)>;

pub struct ChatSession {
    client: Rc<RefCell<dyn IWsClient>>,
}

impl ChatSession {
    /// Register the handlers on `client` and start connecting.
    pub fn open(client: Rc<RefCell<dyn IWsClient>>, dispatch: Dispatcher) -> Result<Self, WsError> {
        {
            let mut ws = client.borrow_mut();

            let on_connect = dispatch.clone();
            ws.set_on_connect(Box::new(move || on_connect(Message::SocketConnected)));

            let on_disconnect = dispatch.clone();
            ws.set_on_disconnect(Box::new(move || on_disconnect(Message::SocketDisconnected)));

            let on_message = dispatch;
            ws.set_on_message(Box::new(move |value| match handlers::parse_value(value) {
                Ok(event) => on_message(Message::Inbound(event)),
                Err(e) => warn_log!("Dropping inbound frame: {}", e),
            }));

            ws.connect()?;
        }
        Ok(Self { client })
    }

    /// Fire-and-forget emission. Failures are logged and the event dropped.
    pub fn emit(&self, event: &OutboundEvent) {
        let json = match event.to_json() {
            Ok(json) => json,
            Err(e) => {
                error_log!("Failed to encode {}: {}", event.event_type(), e);
                return;
            }
        };
        let result = self.client.borrow().send_serialized_message(&json);
        match result {
            Ok(()) => debug_log!("Emitted {}", event.event_type()),
            Err(e) => warn_log!("Dropped {}: {}", event.event_type(), e),
        }
    }

    pub fn connection_state(&self) -> ConnectionState {
        self.client.borrow().connection_state()
    }

    /// Detach every handler, then close the socket.
    pub fn close(self) {
        let mut ws = self.client.borrow_mut();
        ws.clear_handlers();
        if let Err(e) = ws.close() {
            warn_log!("Error while closing socket: {}", e);
        }
    }
}
