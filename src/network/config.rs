use std::cell::RefCell;
use wasm_bindgen::prelude::*;

use crate::constants::DEFAULT_SERVER_URL;
use crate::debug_log;

/// Chat server location
#[derive(Debug, Clone, PartialEq)]
pub struct ChatConfig {
    base_url: String,
}

impl Default for ChatConfig {
    /// Uses the compile-time `CHAT_SERVER_URL` when set, otherwise the local
    /// development server.
    fn default() -> Self {
        Self::new().unwrap_or_else(|_| Self::from_url(DEFAULT_SERVER_URL))
    }
}

impl ChatConfig {
    /// Create a new ChatConfig from the CHAT_SERVER_URL environment variable
    pub fn new() -> Result<Self, &'static str> {
        match option_env!("CHAT_SERVER_URL") {
            Some(url) => Ok(Self::from_url(url)),
            None => Err("CHAT_SERVER_URL environment variable is not set"),
        }
    }

    /// Create a new ChatConfig from a URL string
    pub fn from_url(url: &str) -> Self {
        Self {
            base_url: url.trim().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Get the WebSocket URL
    pub fn ws_url(&self) -> String {
        let ws_base = if let Some(rest) = self.base_url.strip_prefix("https://") {
            format!("wss://{}", rest)
        } else if let Some(rest) = self.base_url.strip_prefix("http://") {
            format!("ws://{}", rest)
        } else {
            self.base_url.clone()
        };
        format!("{}/ws", ws_base)
    }
}

thread_local! {
    static CHAT_CONFIG: RefCell<Option<ChatConfig>> = const { RefCell::new(None) };
}

/// Store the configuration used by every connection opened afterwards.
pub fn init_chat_config(config: ChatConfig) {
    debug_log!("Chat server configured at {}", config.base_url());
    CHAT_CONFIG.with(|cell| *cell.borrow_mut() = Some(config));
}

/// The configured server, falling back to [`ChatConfig::default`].
pub fn current() -> ChatConfig {
    CHAT_CONFIG.with(|cell| cell.borrow().clone().unwrap_or_default())
}

/// Runtime override for hosts that only know the server URL after load.
#[wasm_bindgen]
pub fn init_chat_config_js(base_url: &str) {
    init_chat_config(ChatConfig::from_url(base_url));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ws_url_mapping() {
        assert_eq!(ChatConfig::from_url("http://chat.local:3001/").ws_url(), "ws://chat.local:3001/ws");
        assert_eq!(ChatConfig::from_url("https://chat.example.com").ws_url(), "wss://chat.example.com/ws");
        assert_eq!(ChatConfig::from_url("ws://raw").ws_url(), "ws://raw/ws");
    }

    #[test]
    fn test_runtime_override() {
        init_chat_config(ChatConfig::from_url("https://override.test"));
        assert_eq!(current().base_url(), "https://override.test");
    }
}
