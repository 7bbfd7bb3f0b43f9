//! Persisted user preferences.
//!
//! The whole record lives as one JSON object under a single localStorage key.
//! Loading never fails: a bad value for one key falls back to that key's
//! default and an unreadable record falls back to all defaults.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;
use wasm_bindgen::JsValue;

use crate::constants::SETTINGS_STORAGE_KEY;
use crate::{debug_log, warn_log};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    Available,
    Busy,
    Away,
    Invisible,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Theme {
    Light,
    Dark,
    Auto,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FontSize {
    Small,
    Medium,
    Large,
    ExtraLarge,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AutoDownload {
    Never,
    Wifi,
    Always,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Visibility {
    Everyone,
    Contacts,
    Nobody,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AddPolicy {
    Everyone,
    Contacts,
    AdminApproval,
}

/// Everything the settings panel can change.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSettings {
    // Profile
    pub username: String,
    pub status: Status,

    // Notifications
    pub sound_enabled: bool,
    pub desktop_notifications: bool,
    pub message_preview: bool,
    pub mute_during_calls: bool,
    pub notification_volume: u8, // percent, 0-100

    // Appearance
    pub theme: Theme,
    pub font_size: FontSize,
    pub message_animations: bool,
    pub compact_mode: bool,

    // Chat behaviour
    pub enter_to_send: bool,
    pub typing_indicators: bool,
    pub read_receipts: bool,
    pub message_history: u32,
    pub auto_download: AutoDownload,

    // Privacy
    pub last_seen_visibility: Visibility,
    pub profile_photo_visibility: Visibility,
    pub who_can_add_me: AddPolicy,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            username: String::new(),
            status: Status::Available,
            sound_enabled: true,
            desktop_notifications: true,
            message_preview: true,
            mute_during_calls: false,
            notification_volume: 70,
            theme: Theme::Light,
            font_size: FontSize::Medium,
            message_animations: true,
            compact_mode: false,
            enter_to_send: true,
            typing_indicators: true,
            read_receipts: true,
            message_history: 1000,
            auto_download: AutoDownload::Wifi,
            last_seen_visibility: Visibility::Everyone,
            profile_photo_visibility: Visibility::Everyone,
            who_can_add_me: AddPolicy::Everyone,
        }
    }
}

#[derive(Debug)]
pub enum SettingsError {
    UnknownKey(String),
    InvalidValue { key: String, reason: String },
    Serialize(serde_json::Error),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::UnknownKey(key) => write!(f, "unknown setting '{}'", key),
            SettingsError::InvalidValue { key, reason } => {
                write!(f, "invalid value for '{}': {}", key, reason)
            }
            SettingsError::Serialize(e) => write!(f, "failed to serialise settings: {}", e),
        }
    }
}

impl std::error::Error for SettingsError {}

impl From<serde_json::Error> for SettingsError {
    fn from(e: serde_json::Error) -> Self {
        SettingsError::Serialize(e)
    }
}

impl From<SettingsError> for JsValue {
    fn from(err: SettingsError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

impl UserSettings {
    fn to_map(&self) -> Result<Map<String, Value>, SettingsError> {
        match serde_json::to_value(self)? {
            Value::Object(map) => Ok(map),
            _ => unreachable!("UserSettings serialises to an object"),
        }
    }

    /// Set a single key by its persisted (camelCase) name.
    /// On error the settings are left untouched.
    pub fn update_setting(&mut self, key: &str, value: Value) -> Result<(), SettingsError> {
        let mut map = self.to_map()?;
        if !map.contains_key(key) {
            return Err(SettingsError::UnknownKey(key.to_string()));
        }
        map.insert(key.to_string(), value);

        let updated: UserSettings =
            serde_json::from_value(Value::Object(map)).map_err(|e| SettingsError::InvalidValue {
                key: key.to_string(),
                reason: e.to_string(),
            })?;
        if updated.notification_volume > 100 {
            return Err(SettingsError::InvalidValue {
                key: key.to_string(),
                reason: "volume must be between 0 and 100".to_string(),
            });
        }

        *self = updated;
        Ok(())
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Recover settings from a persisted record, key by key.
    pub fn from_persisted(raw: &str) -> Self {
        let parsed = match serde_json::from_str::<Value>(raw) {
            Ok(Value::Object(map)) => map,
            Ok(_) => {
                warn_log!("Saved settings are not an object, using defaults");
                return Self::default();
            }
            Err(e) => {
                warn_log!("Failed to parse saved settings: {}", e);
                return Self::default();
            }
        };

        let mut settings = Self::default();
        for (key, value) in parsed {
            if let Err(e) = settings.update_setting(&key, value) {
                warn_log!("Ignoring saved setting: {}", e);
            }
        }
        settings
    }
}

/// Where the settings record is kept.
pub trait SettingsStore {
    fn load(&self) -> Option<String>;
    fn save(&self, json: &str);
    fn clear(&self);
}

/// Load settings from `store`, defaulting when nothing is saved.
pub fn load_settings(store: &dyn SettingsStore) -> UserSettings {
    match store.load() {
        Some(raw) => UserSettings::from_persisted(&raw),
        None => UserSettings::default(),
    }
}

/// `window.localStorage`, keyed by [`SETTINGS_STORAGE_KEY`].
pub struct LocalStorageStore;

impl LocalStorageStore {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok()?
    }
}

impl SettingsStore for LocalStorageStore {
    fn load(&self) -> Option<String> {
        Self::storage()?.get_item(SETTINGS_STORAGE_KEY).ok()?
    }

    fn save(&self, json: &str) {
        match Self::storage() {
            Some(storage) => {
                if let Err(e) = storage.set_item(SETTINGS_STORAGE_KEY, json) {
                    warn_log!("Failed to save settings: {:?}", e);
                }
            }
            None => warn_log!("localStorage unavailable, settings not saved"),
        }
    }

    fn clear(&self) {
        if let Some(storage) = Self::storage() {
            match storage.remove_item(SETTINGS_STORAGE_KEY) {
                Ok(()) => debug_log!("Cleared saved settings"),
                Err(e) => warn_log!("Failed to clear saved settings: {:?}", e),
            }
        }
    }
}

/// In-memory store, used when localStorage is unavailable.
#[derive(Clone, Default)]
pub struct MemoryStore {
    items: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_record(json: &str) -> Self {
        let store = Self::default();
        store.save(json);
        store
    }
}

impl SettingsStore for MemoryStore {
    fn load(&self) -> Option<String> {
        self.items.borrow().get(SETTINGS_STORAGE_KEY).cloned()
    }

    fn save(&self, json: &str) {
        self.items
            .borrow_mut()
            .insert(SETTINGS_STORAGE_KEY.to_string(), json.to_string());
    }

    fn clear(&self) {
        self.items.borrow_mut().remove(SETTINGS_STORAGE_KEY);
    }
}
