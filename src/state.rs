// src/state.rs
//
// Client-side chat state plus the runtime that feeds messages through the
// reducers and executes the resulting commands.
//
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use crate::command_executors::{execute_command, Effects};
use crate::constants::DEFAULT_ROOM;
use crate::messages::{Command, Message};
use crate::models::RoomMessages;
use crate::network::messages::{builders, OutboundEvent};
use crate::network::session::Dispatcher;
use crate::storage::{load_settings, UserSettings};
use crate::update::update;
use crate::views::ChatView;
use crate::debug_log;

/// Membership tracking for the selected room.
///
/// `previous` is the room the server last heard a `join_room` for. Syncing
/// leaves it (when set) and joins `current`.
#[derive(Debug, Clone, PartialEq)]
pub struct RoomSelection {
    previous: Option<String>,
    current: String,
}

impl Default for RoomSelection {
    fn default() -> Self {
        Self {
            previous: None,
            current: DEFAULT_ROOM.to_string(),
        }
    }
}

impl RoomSelection {
    pub fn current(&self) -> &str {
        &self.current
    }

    pub fn previous(&self) -> Option<&str> {
        self.previous.as_deref()
    }

    /// Returns `false` when `room` is already selected.
    pub fn select(&mut self, room: &str) -> bool {
        if self.current == room {
            return false;
        }
        self.current = room.to_string();
        true
    }

    /// Membership events needed to move the server over to `current`.
    pub fn sync(&mut self, username: &str) -> Vec<OutboundEvent> {
        if self.previous.as_deref() == Some(self.current.as_str()) {
            return Vec::new();
        }
        let mut events = Vec::with_capacity(2);
        if let Some(previous) = self.previous.take() {
            events.push(builders::create_leave_room(username, &previous));
        }
        events.push(builders::create_join_room(username, &self.current));
        self.previous = Some(self.current.clone());
        events
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// A scheduled `stop_typing` that has not gone out yet.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingStopTyping {
    pub generation: u64,
    pub room: String,
}

#[derive(Debug, Clone)]
pub struct AppState {
    pub user: Option<String>,
    pub connected: bool,

    pub rooms: Vec<String>,
    pub selection: RoomSelection,
    pub room_messages: RoomMessages,

    // Transient, cleared on logout
    pub online_users: Vec<String>,
    pub typing_user: Option<String>,

    pub pending_stop_typing: Option<PendingStopTyping>,
    pub typing_generation: u64,

    pub settings: UserSettings,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        Self {
            user: None,
            connected: false,
            rooms: vec![DEFAULT_ROOM.to_string()],
            selection: RoomSelection::default(),
            room_messages: RoomMessages::new(),
            online_users: Vec::new(),
            typing_user: None,
            pending_stop_typing: None,
            typing_generation: 0,
            settings: UserSettings::default(),
        }
    }

    /// Fold one message into the state and return the side effects to run.
    pub fn dispatch(&mut self, msg: Message) -> Vec<Command> {
        update(self, msg)
    }

    pub fn username(&self) -> Option<&str> {
        self.user.as_deref()
    }

    pub fn current_room(&self) -> &str {
        self.selection.current()
    }

    pub fn is_known_room(&self, room: &str) -> bool {
        self.rooms.iter().any(|r| r == room)
    }

    /// Add `room` to the room list if it is missing.
    pub fn ensure_room(&mut self, room: &str) {
        if !self.is_known_room(room) {
            self.rooms.push(room.to_string());
        }
    }

    /// Forget everything tied to the logged-in session. Settings survive.
    pub fn reset_session(&mut self) {
        self.user = None;
        self.connected = false;
        self.rooms = vec![DEFAULT_ROOM.to_string()];
        self.selection.reset();
        self.room_messages.clear();
        self.online_users.clear();
        self.typing_user = None;
        self.pending_stop_typing = None;
    }
}

struct RuntimeInner {
    state: RefCell<AppState>,
    effects: RefCell<Effects>,
    queue: RefCell<VecDeque<Message>>,
    dispatching: Cell<bool>,
    on_change: RefCell<Option<Rc<dyn Fn()>>>,
}

/// Owns the state and its effects. Cloning shares the same runtime.
///
/// Messages dispatched while another message is being processed (socket
/// callbacks, `Command::SendMessage`) are queued and drained in order, so
/// the state is never borrowed twice.
#[derive(Clone)]
pub struct ChatRuntime {
    inner: Rc<RuntimeInner>,
}

impl ChatRuntime {
    pub fn new(effects: Effects) -> Self {
        let settings = load_settings(effects.store.as_ref());
        let runtime = Self {
            inner: Rc::new(RuntimeInner {
                state: RefCell::new(AppState::new()),
                effects: RefCell::new(effects),
                queue: RefCell::new(VecDeque::new()),
                dispatching: Cell::new(false),
                on_change: RefCell::new(None),
            }),
        };
        runtime.dispatch(Message::SettingsLoaded(settings));
        runtime
    }

    /// Sink handed to socket and timer callbacks. Holds only a weak
    /// reference so a dropped runtime silently ignores late events.
    pub fn dispatcher(&self) -> Dispatcher {
        let weak = Rc::downgrade(&self.inner);
        Rc::new(move |msg: Message| match weak.upgrade() {
            Some(inner) => ChatRuntime { inner }.dispatch(msg),
            None => debug_log!("Runtime gone, dropping {:?}", msg),
        })
    }

    pub fn dispatch(&self, msg: Message) {
        self.inner.queue.borrow_mut().push_back(msg);
        if self.inner.dispatching.replace(true) {
            return;
        }

        let dispatcher = self.dispatcher();
        loop {
            let next = self.inner.queue.borrow_mut().pop_front();
            let Some(msg) = next else { break };

            let commands = self.inner.state.borrow_mut().dispatch(msg);
            for cmd in commands {
                let follow_up = {
                    let mut effects = self.inner.effects.borrow_mut();
                    execute_command(&mut effects, cmd, &dispatcher)
                };
                if let Some(msg) = follow_up {
                    self.inner.queue.borrow_mut().push_back(msg);
                }
            }
        }
        self.inner.dispatching.set(false);

        let on_change = self.inner.on_change.borrow().clone();
        if let Some(callback) = on_change {
            callback();
        }
    }

    /// Called once after every drained batch of messages.
    pub fn set_on_change(&self, callback: Box<dyn Fn()>) {
        *self.inner.on_change.borrow_mut() = Some(Rc::from(callback));
    }

    pub fn with_state<R>(&self, f: impl FnOnce(&AppState) -> R) -> R {
        f(&self.inner.state.borrow())
    }

    pub fn snapshot(&self) -> ChatView {
        self.with_state(ChatView::from_state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_sync_only_joins() {
        let mut selection = RoomSelection::default();
        assert_eq!(
            selection.sync("alice"),
            vec![builders::create_join_room("alice", "General")]
        );
        assert_eq!(selection.previous(), Some("General"));
        assert!(selection.sync("alice").is_empty());
    }

    #[test]
    fn switching_rooms_leaves_then_joins() {
        let mut selection = RoomSelection::default();
        selection.sync("alice");

        assert!(selection.select("Dev"));
        assert_eq!(
            selection.sync("alice"),
            vec![
                builders::create_leave_room("alice", "General"),
                builders::create_join_room("alice", "Dev"),
            ]
        );

        assert!(!selection.select("Dev"));
        assert!(selection.sync("alice").is_empty());
    }

    #[test]
    fn reset_forgets_membership() {
        let mut selection = RoomSelection::default();
        selection.select("Dev");
        selection.sync("alice");
        selection.reset();
        assert_eq!(selection.current(), DEFAULT_ROOM);
        assert_eq!(selection.previous(), None);
    }

    #[test]
    fn reset_session_keeps_settings() {
        let mut state = AppState::new();
        state.user = Some("alice".into());
        state.settings.compact_mode = true;
        state.ensure_room("Dev");
        state.online_users = vec!["bob".into()];
        state.typing_user = Some("bob".into());

        state.reset_session();
        assert!(state.user.is_none());
        assert_eq!(state.rooms, vec![DEFAULT_ROOM.to_string()]);
        assert!(state.online_users.is_empty());
        assert!(state.typing_user.is_none());
        assert!(state.settings.compact_mode);
    }
}
