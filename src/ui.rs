// src/ui.rs
//
// JavaScript-facing handle. The page forwards user input here and re-renders
// from `snapshot()` whenever the change callback fires.
//
use serde_json::Value;
use wasm_bindgen::prelude::*;

use crate::command_executors::Effects;
use crate::messages::Message;
use crate::state::ChatRuntime;
use crate::error_log;

#[wasm_bindgen]
pub struct ChatApp {
    runtime: ChatRuntime,
}

#[wasm_bindgen]
impl ChatApp {
    #[wasm_bindgen(constructor)]
    pub fn new() -> ChatApp {
        ChatApp {
            runtime: ChatRuntime::new(Effects::browser()),
        }
    }

    pub fn login(&self, username: &str) {
        self.runtime.dispatch(Message::Login(username.to_string()));
    }

    pub fn logout(&self) {
        self.runtime.dispatch(Message::Logout);
    }

    #[wasm_bindgen(js_name = selectRoom)]
    pub fn select_room(&self, room: &str) {
        self.runtime.dispatch(Message::SelectRoom(room.to_string()));
    }

    #[wasm_bindgen(js_name = createRoom)]
    pub fn create_room(&self, name: &str) {
        self.runtime.dispatch(Message::CreateRoom(name.to_string()));
    }

    #[wasm_bindgen(js_name = sendMessage)]
    pub fn send_message(&self, content: &str) {
        self.runtime.dispatch(Message::SendChat(content.to_string()));
    }

    #[wasm_bindgen(js_name = inputChanged)]
    pub fn input_changed(&self) {
        self.runtime.dispatch(Message::InputChanged);
    }

    #[wasm_bindgen(js_name = inputBlurred)]
    pub fn input_blurred(&self) {
        self.runtime.dispatch(Message::InputBlurred);
    }

    #[wasm_bindgen(js_name = inputCancelled)]
    pub fn input_cancelled(&self) {
        self.runtime.dispatch(Message::InputCancelled);
    }

    /// Validates against a copy first so the caller gets the error back.
    #[wasm_bindgen(js_name = updateSetting)]
    pub fn update_setting(&self, key: &str, value: JsValue) -> Result<(), JsValue> {
        let value: Value = serde_wasm_bindgen::from_value(value)?;
        let mut probe = self.runtime.with_state(|s| s.settings.clone());
        probe.update_setting(key, value.clone())?;

        self.runtime.dispatch(Message::UpdateSetting {
            key: key.to_string(),
            value,
        });
        Ok(())
    }

    #[wasm_bindgen(js_name = resetSettings)]
    pub fn reset_settings(&self) {
        self.runtime.dispatch(Message::ResetSettings);
    }

    pub fn settings(&self) -> Result<JsValue, JsValue> {
        let settings = self.runtime.with_state(|s| s.settings.clone());
        Ok(serde_wasm_bindgen::to_value(&settings)?)
    }

    pub fn snapshot(&self) -> Result<JsValue, JsValue> {
        Ok(serde_wasm_bindgen::to_value(&self.runtime.snapshot())?)
    }

    /// `callback()` runs after every processed batch of events.
    #[wasm_bindgen(js_name = setOnChange)]
    pub fn set_on_change(&self, callback: js_sys::Function) {
        self.runtime.set_on_change(Box::new(move || {
            if let Err(e) = callback.call0(&JsValue::NULL) {
                error_log!("Change callback failed: {:?}", e);
            }
        }));
    }
}

impl Default for ChatApp {
    fn default() -> Self {
        Self::new()
    }
}
