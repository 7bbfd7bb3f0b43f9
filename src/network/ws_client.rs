use serde_json::Value;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{MessageEvent, WebSocket};

use crate::{debug_log, error_log, warn_log};

/// Trait defining the WebSocket client interface
pub trait IWsClient {
    fn connect(&mut self) -> Result<(), WsError>;
    fn send_serialized_message(&self, message_json: &str) -> Result<(), WsError>;
    fn connection_state(&self) -> ConnectionState;
    fn close(&mut self) -> Result<(), WsError>;
    fn set_on_connect(&mut self, callback: Box<dyn FnMut() + 'static>);
    fn set_on_message(&mut self, callback: Box<dyn FnMut(Value) + 'static>);
    fn set_on_disconnect(&mut self, callback: Box<dyn FnMut() + 'static>);
    /// Drop every registered callback so no stale handler can fire.
    fn clear_handlers(&mut self);
}

/// Represents the current state of the WebSocket connection
#[derive(Debug, Clone, PartialEq)]
pub enum ConnectionState {
    Disconnected,
    Connecting,
    Connected,
    Error(String),
}

impl fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConnectionState::Disconnected => write!(f, "Disconnected"),
            ConnectionState::Connecting => write!(f, "Connecting"),
            ConnectionState::Connected => write!(f, "Connected"),
            ConnectionState::Error(msg) => write!(f, "Error: {}", msg),
        }
    }
}

/// Transport failures. Sends never retry; the caller logs and moves on.
#[derive(Debug, Clone, PartialEq)]
pub enum WsError {
    NotInitialized,
    NotConnected,
    Browser(String),
}

impl fmt::Display for WsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WsError::NotInitialized => write!(f, "WebSocket is not initialized"),
            WsError::NotConnected => write!(f, "WebSocket is not connected"),
            WsError::Browser(msg) => write!(f, "WebSocket error: {}", msg),
        }
    }
}

impl std::error::Error for WsError {}

impl From<JsValue> for WsError {
    fn from(value: JsValue) -> Self {
        WsError::Browser(format!("{:?}", value))
    }
}

impl From<WsError> for JsValue {
    fn from(err: WsError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

/// Configuration for the WebSocket client
#[derive(Debug, Clone)]
pub struct WsConfig {
    /// Full `ws://` / `wss://` URL
    pub url: String,
}

type OnConnectCallback = Rc<RefCell<Box<dyn FnMut()>>>;
type OnMessageCallback = Rc<RefCell<Box<dyn FnMut(Value)>>>;
type OnDisconnectCallback = Rc<RefCell<Box<dyn FnMut()>>>;

/// Shared callback slots. The browser closures read these on every event,
/// so clearing a slot detaches the handler immediately.
#[derive(Default)]
struct Callbacks {
    on_connect: Option<OnConnectCallback>,
    on_message: Option<OnMessageCallback>,
    on_disconnect: Option<OnDisconnectCallback>,
}

/// Browser WebSocket client.
///
/// There is no reconnect loop: a closed socket stays closed until the next
/// login opens a fresh client.
pub struct WsClient {
    config: WsConfig,
    websocket: Option<WebSocket>,
    state: Rc<RefCell<ConnectionState>>,
    callbacks: Rc<RefCell<Callbacks>>,
    onopen: Option<Closure<dyn FnMut(web_sys::Event)>>,
    onerror: Option<Closure<dyn FnMut(web_sys::Event)>>,
    onclose: Option<Closure<dyn FnMut(web_sys::Event)>>,
    onmessage: Option<Closure<dyn FnMut(MessageEvent)>>,
}

impl WsClient {
    pub fn new(config: WsConfig) -> Self {
        Self {
            config,
            websocket: None,
            state: Rc::new(RefCell::new(ConnectionState::Disconnected)),
            callbacks: Rc::new(RefCell::new(Callbacks::default())),
            onopen: None,
            onerror: None,
            onclose: None,
            onmessage: None,
        }
    }

    /// Creates the WebSocket and attaches the browser event handlers.
    fn establish_connection(&mut self) -> Result<WebSocket, WsError> {
        let ws = WebSocket::new(&self.config.url)?;

        let state_clone = self.state.clone();
        let callbacks_clone = self.callbacks.clone();
        let onopen = Closure::wrap(Box::new(move |_: web_sys::Event| {
            debug_log!("WebSocket connected");
            *state_clone.borrow_mut() = ConnectionState::Connected;
            let callback = callbacks_clone.borrow().on_connect.clone();
            if let Some(callback_rc) = callback {
                (callback_rc.borrow_mut())();
            }
        }) as Box<dyn FnMut(web_sys::Event)>);
        ws.set_onopen(Some(onopen.as_ref().unchecked_ref()));

        let state_clone = self.state.clone();
        let onerror = Closure::wrap(Box::new(move |e: web_sys::Event| {
            error_log!("WebSocket error: {:?}", e.type_());
            *state_clone.borrow_mut() = ConnectionState::Error(e.type_());
        }) as Box<dyn FnMut(web_sys::Event)>);
        ws.set_onerror(Some(onerror.as_ref().unchecked_ref()));

        let state_clone = self.state.clone();
        let callbacks_clone = self.callbacks.clone();
        let onclose = Closure::wrap(Box::new(move |evt: web_sys::Event| {
            if let Ok(close_evt) = evt.dyn_into::<web_sys::CloseEvent>() {
                debug_log!("WebSocket closed (code {})", close_evt.code());
            }
            *state_clone.borrow_mut() = ConnectionState::Disconnected;
            let callback = callbacks_clone.borrow().on_disconnect.clone();
            if let Some(callback_rc) = callback {
                (callback_rc.borrow_mut())();
            }
        }) as Box<dyn FnMut(web_sys::Event)>);
        ws.set_onclose(Some(onclose.as_ref().unchecked_ref()));

        // Parse JSON once and forward the value; frame-level validation
        // happens in the session layer.
        let callbacks_clone = self.callbacks.clone();
        let onmessage = Closure::wrap(Box::new(move |event: MessageEvent| {
            let Some(text) = event.data().as_string() else {
                warn_log!("Received non-text WebSocket message");
                return;
            };
            match serde_json::from_str::<Value>(&text) {
                Ok(parsed) => {
                    let callback = callbacks_clone.borrow().on_message.clone();
                    if let Some(callback_rc) = callback {
                        (callback_rc.borrow_mut())(parsed);
                    }
                }
                Err(e) => error_log!("Failed to parse incoming WebSocket message: {} ({})", e, text),
            }
        }) as Box<dyn FnMut(MessageEvent)>);
        ws.set_onmessage(Some(onmessage.as_ref().unchecked_ref()));

        self.onopen = Some(onopen);
        self.onerror = Some(onerror);
        self.onclose = Some(onclose);
        self.onmessage = Some(onmessage);

        Ok(ws)
    }

    fn detach_browser_handlers(&mut self) {
        if let Some(ws) = &self.websocket {
            ws.set_onopen(None);
            ws.set_onerror(None);
            ws.set_onclose(None);
            ws.set_onmessage(None);
        }
        self.onopen = None;
        self.onerror = None;
        self.onclose = None;
        self.onmessage = None;
    }
}

impl IWsClient for WsClient {
    fn connect(&mut self) -> Result<(), WsError> {
        debug_log!("Initiating WebSocket connection to {}", self.config.url);
        *self.state.borrow_mut() = ConnectionState::Connecting;
        let ws = self.establish_connection()?;
        self.websocket = Some(ws);
        Ok(())
    }

    fn send_serialized_message(&self, message_json: &str) -> Result<(), WsError> {
        let ws = self.websocket.as_ref().ok_or(WsError::NotInitialized)?;
        if *self.state.borrow() != ConnectionState::Connected {
            return Err(WsError::NotConnected);
        }
        ws.send_with_str(message_json)?;
        Ok(())
    }

    fn connection_state(&self) -> ConnectionState {
        self.state.borrow().clone()
    }

    fn close(&mut self) -> Result<(), WsError> {
        debug_log!("Closing WebSocket connection...");
        self.detach_browser_handlers();
        *self.state.borrow_mut() = ConnectionState::Disconnected;
        if let Some(ws) = self.websocket.take() {
            ws.close_with_code(1000)?;
        }
        Ok(())
    }

    fn set_on_connect(&mut self, callback: Box<dyn FnMut() + 'static>) {
        self.callbacks.borrow_mut().on_connect = Some(Rc::new(RefCell::new(callback)));
    }

    fn set_on_message(&mut self, callback: Box<dyn FnMut(Value) + 'static>) {
        self.callbacks.borrow_mut().on_message = Some(Rc::new(RefCell::new(callback)));
    }

    fn set_on_disconnect(&mut self, callback: Box<dyn FnMut() + 'static>) {
        self.callbacks.borrow_mut().on_disconnect = Some(Rc::new(RefCell::new(callback)));
    }

    fn clear_handlers(&mut self) {
        *self.callbacks.borrow_mut() = Callbacks::default();
    }
}

impl Drop for WsClient {
    fn drop(&mut self) {
        self.detach_browser_handlers();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(WsError::NotConnected.to_string(), "WebSocket is not connected");
        assert_eq!(WsError::NotInitialized.to_string(), "WebSocket is not initialized");
    }

    #[test]
    fn test_connection_state_display() {
        assert_eq!(ConnectionState::Connecting.to_string(), "Connecting");
        assert_eq!(ConnectionState::Error("boom".into()).to_string(), "Error: boom");
    }
}
