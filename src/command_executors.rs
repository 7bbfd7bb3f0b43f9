// src/command_executors.rs
//
// Runs the side effects the reducers return. Everything that touches the
// browser (socket, timer, notifications, localStorage) sits behind a trait
// object in `Effects`, so the same executor drives the native tests.
//
use std::cell::RefCell;
use std::rc::Rc;

use crate::messages::{Command, Message};
use crate::network::config::{self, ChatConfig};
use crate::network::session::{ChatSession, Dispatcher};
use crate::network::ws_client::{IWsClient, WsClient, WsConfig};
use crate::notifications::{BrowserNotifier, Notifier};
use crate::storage::{LocalStorageStore, SettingsStore};
use crate::timers::{BrowserTimer, StopTypingTimer};
use crate::{debug_log, error_log};

/// Builds a fresh socket client for each login.
pub type SocketFactory = Box<dyn Fn(&ChatConfig) -> Rc<RefCell<dyn IWsClient>>>;

pub struct Effects {
    pub socket_factory: SocketFactory,
    pub session: Option<ChatSession>,
    pub timer: Box<dyn StopTypingTimer>,
    pub notifier: Box<dyn Notifier>,
    pub store: Box<dyn SettingsStore>,
}

impl Effects {
    pub fn new(
        socket_factory: SocketFactory,
        timer: Box<dyn StopTypingTimer>,
        notifier: Box<dyn Notifier>,
        store: Box<dyn SettingsStore>,
    ) -> Self {
        Self {
            socket_factory,
            session: None,
            timer,
            notifier,
            store,
        }
    }

    /// Real browser collaborators.
    pub fn browser() -> Self {
        Self::new(
            Box::new(|cfg: &ChatConfig| {
                let client: Rc<RefCell<dyn IWsClient>> =
                    Rc::new(RefCell::new(WsClient::new(WsConfig { url: cfg.ws_url() })));
                client
            }),
            Box::new(BrowserTimer::new()),
            Box::new(BrowserNotifier::new()),
            Box::new(LocalStorageStore),
        )
    }
}

/// Execute one command. A returned message is fed back through the reducers.
pub fn execute_command(effects: &mut Effects, cmd: Command, dispatch: &Dispatcher) -> Option<Message> {
    match cmd {
        Command::Emit(event) => {
            match &effects.session {
                Some(session) => session.emit(&event),
                None => debug_log!("No session, dropping {}", event.event_type()),
            }
            None
        }
        Command::OpenConnection => {
            if let Some(stale) = effects.session.take() {
                stale.close();
            }
            let client = (effects.socket_factory)(&config::current());
            match ChatSession::open(client, dispatch.clone()) {
                Ok(session) => effects.session = Some(session),
                Err(e) => error_log!("Failed to open chat connection: {}", e),
            }
            None
        }
        Command::CloseConnection => {
            if let Some(session) = effects.session.take() {
                session.close();
            }
            None
        }
        Command::ScheduleStopTyping { generation, delay_ms } => {
            let dispatch = dispatch.clone();
            effects.timer.schedule(
                delay_ms,
                Box::new(move || dispatch(Message::StopTypingElapsed { generation })),
            );
            None
        }
        Command::CancelStopTyping => {
            effects.timer.cancel();
            None
        }
        Command::Notify(request) => {
            effects.notifier.notify(&request);
            None
        }
        Command::PersistSettings(json) => {
            effects.store.save(&json);
            None
        }
        Command::ClearSettings => {
            effects.store.clear();
            None
        }
        Command::SendMessage(msg) => Some(msg),
    }
}
