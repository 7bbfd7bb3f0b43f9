//! Settings panel changes. Every accepted change is persisted.

use crate::messages::{Command, Message};
use crate::state::AppState;
use crate::storage::UserSettings;
use crate::{debug_log, error_log, warn_log};

/// Returns `true` when the message was handled by the settings reducer.
pub fn update(state: &mut AppState, msg: &Message, cmds: &mut Vec<Command>) -> bool {
    match msg {
        Message::UpdateSetting { key, value } => {
            match state.settings.update_setting(key, value.clone()) {
                Ok(()) => {
                    debug_log!("Setting {} updated", key);
                    persist(state, cmds);
                }
                Err(e) => warn_log!("Rejected setting update: {}", e),
            }
            true
        }
        Message::ResetSettings => {
            state.settings = UserSettings::default();
            cmds.push(Command::ClearSettings);
            true
        }
        Message::SettingsLoaded(settings) => {
            state.settings = settings.clone();
            true
        }
        _ => false,
    }
}

/// Queue a write of the current settings record.
pub fn persist(state: &AppState, cmds: &mut Vec<Command>) {
    match state.settings.to_json() {
        Ok(json) => cmds.push(Command::PersistSettings(json)),
        Err(e) => error_log!("Failed to serialise settings: {}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::Theme;
    use serde_json::json;

    #[test]
    fn accepted_update_is_persisted() {
        let mut state = AppState::new();
        let cmds = state.dispatch(Message::UpdateSetting {
            key: "theme".into(),
            value: json!("dark"),
        });
        assert_eq!(state.settings.theme, Theme::Dark);
        match cmds.as_slice() {
            [Command::PersistSettings(json)] => assert!(json.contains("\"theme\":\"dark\"")),
            other => panic!("unexpected commands {:?}", other),
        }
    }

    #[test]
    fn rejected_update_changes_nothing() {
        let mut state = AppState::new();
        let cmds = state.dispatch(Message::UpdateSetting {
            key: "notificationVolume".into(),
            value: json!(400),
        });
        assert!(cmds.is_empty());
        assert_eq!(state.settings, UserSettings::default());
    }

    #[test]
    fn reset_restores_defaults_and_clears_record() {
        let mut state = AppState::new();
        state.settings.compact_mode = true;
        assert_eq!(state.dispatch(Message::ResetSettings), vec![Command::ClearSettings]);
        assert_eq!(state.settings, UserSettings::default());
    }
}
