//! Desktop notification + sound for messages from other users.
//! Only fires while the tab is hidden.

use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::{HtmlAudioElement, Notification, NotificationOptions, NotificationPermission, VisibilityState};

use crate::constants::{HIDDEN_PREVIEW_BODY, NOTIFICATION_ICON_URL, NOTIFICATION_SOUND_URL};
use crate::models::ChatMessage;
use crate::storage::UserSettings;
use crate::{debug_log, warn_log};

/// What to show for one incoming message.
#[derive(Debug, Clone, PartialEq)]
pub struct NotificationRequest {
    pub title: String,
    pub body: String,
    pub show_desktop: bool,
    pub play_sound: bool,
    pub volume: f64, // 0.0 - 1.0
}

impl NotificationRequest {
    /// `None` when the user disabled both the popup and the sound.
    pub fn for_message(room: &str, message: &ChatMessage, settings: &UserSettings) -> Option<Self> {
        if !settings.desktop_notifications && !settings.sound_enabled {
            return None;
        }
        let body = if settings.message_preview {
            message.content.clone()
        } else {
            HIDDEN_PREVIEW_BODY.to_string()
        };
        Some(Self {
            title: format!("{} in {}", message.username, room),
            body,
            show_desktop: settings.desktop_notifications,
            play_sound: settings.sound_enabled,
            volume: f64::from(settings.notification_volume.min(100)) / 100.0,
        })
    }
}

pub trait Notifier {
    fn notify(&self, request: &NotificationRequest);
}

pub struct BrowserNotifier {
    sound: Option<HtmlAudioElement>,
}

impl BrowserNotifier {
    pub fn new() -> Self {
        let sound = HtmlAudioElement::new_with_src(NOTIFICATION_SOUND_URL).ok();
        if sound.is_none() {
            warn_log!("Notification sound unavailable");
        }
        Self { sound }
    }

    fn document_hidden() -> bool {
        web_sys::window()
            .and_then(|w| w.document())
            .map(|d| d.visibility_state() != VisibilityState::Visible)
            .unwrap_or(false)
    }

    pub fn play_sound(&self, volume: f64) {
        if let Some(sound) = &self.sound {
            sound.set_current_time(0.0);
            sound.set_volume(volume);
            match sound.play() {
                // Autoplay may be refused; the rejection is observed so it
                // never surfaces as an uncaught promise.
                Ok(promise) => spawn_local(async move {
                    if let Err(e) = JsFuture::from(promise).await {
                        debug_log!("Notification sound blocked: {:?}", e);
                    }
                }),
                Err(e) => debug_log!("Notification sound unavailable: {:?}", e),
            }
        }
    }
}

impl Default for BrowserNotifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Notifier for BrowserNotifier {
    fn notify(&self, request: &NotificationRequest) {
        if !Self::document_hidden() {
            return;
        }
        if request.show_desktop && Notification::permission() == NotificationPermission::Granted {
            let options = NotificationOptions::new();
            options.set_body(&request.body);
            options.set_icon(NOTIFICATION_ICON_URL);
            if let Err(e) = Notification::new_with_options(&request.title, &options) {
                warn_log!("Failed to show notification: {:?}", e);
            }
        }
        if request.play_sound {
            self.play_sound(request.volume);
        }
    }
}

/// Ask for notification permission once, if the user has not decided yet.
pub async fn request_permission_if_needed() {
    if Notification::permission() != NotificationPermission::Default {
        return;
    }
    match Notification::request_permission() {
        Ok(promise) => match JsFuture::from(promise).await {
            Ok(result) => {
                let granted = result.as_string().as_deref() == Some("granted");
                debug_log!("Notification permission granted: {}", granted);
            }
            Err(e) => warn_log!("Notification permission request failed: {:?}", e),
        },
        Err(e) => warn_log!("Notification permission unavailable: {:?}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message() -> ChatMessage {
        ChatMessage::new("bob", "lunch?", "2024-05-01T12:00:00.000Z")
    }

    #[test]
    fn request_uses_room_title_and_content() {
        let request = NotificationRequest::for_message("General", &message(), &UserSettings::default()).unwrap();
        assert_eq!(request.title, "bob in General");
        assert_eq!(request.body, "lunch?");
        assert!(request.show_desktop && request.play_sound);
        assert!((request.volume - 0.7).abs() < f64::EPSILON);
    }

    #[test]
    fn preview_off_hides_content() {
        let settings = UserSettings {
            message_preview: false,
            ..UserSettings::default()
        };
        let request = NotificationRequest::for_message("Dev", &message(), &settings).unwrap();
        assert_eq!(request.body, HIDDEN_PREVIEW_BODY);
    }

    #[test]
    fn nothing_when_popup_and_sound_are_off() {
        let settings = UserSettings {
            desktop_notifications: false,
            sound_enabled: false,
            ..UserSettings::default()
        };
        assert!(NotificationRequest::for_message("Dev", &message(), &settings).is_none());
    }
}
