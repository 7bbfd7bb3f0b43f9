// Defaults shared by the reducers and the browser runtime.
pub const DEFAULT_ROOM: &str = "General";

// Quiet period after the last keystroke before `stop_typing` goes out.
pub const TYPING_STOP_DELAY_MS: u32 = 1000;

// localStorage key holding the serialised `UserSettings` record.
pub const SETTINGS_STORAGE_KEY: &str = "chatSettings";

// Notification assets served next to the wasm bundle
pub const NOTIFICATION_SOUND_URL: &str = "/notification.mp3";
pub const NOTIFICATION_ICON_URL: &str = "/chat-icon.svg";

// Body used when message previews are disabled.
pub const HIDDEN_PREVIEW_BODY: &str = "New message";

pub const DEFAULT_SERVER_URL: &str = "http://localhost:3001";
