//! Browser-only checks for the web_sys backed collaborators.
#![cfg(target_arch = "wasm32")]

use std::cell::Cell;
use std::rc::Rc;

use chat_frontend::notifications::BrowserNotifier;
use chat_frontend::storage::{load_settings, LocalStorageStore, SettingsStore, Theme, UserSettings};
use chat_frontend::timers::{BrowserTimer, StopTypingTimer};
use gloo_timers::future::TimeoutFuture;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn local_storage_round_trip() {
    let store = LocalStorageStore;
    store.clear();
    assert_eq!(load_settings(&store), UserSettings::default());

    let mut settings = UserSettings::default();
    settings.theme = Theme::Dark;
    store.save(&settings.to_json().unwrap());
    assert_eq!(load_settings(&store).theme, Theme::Dark);

    store.clear();
    assert!(store.load().is_none());
}

#[wasm_bindgen_test]
async fn cancelled_timer_never_fires() {
    let fired = Rc::new(Cell::new(0));
    let mut timer = BrowserTimer::new();

    let counter = fired.clone();
    timer.schedule(20, Box::new(move || counter.set(counter.get() + 1)));
    timer.cancel();

    let counter = fired.clone();
    timer.schedule(20, Box::new(move || counter.set(counter.get() + 10)));

    TimeoutFuture::new(60).await;
    assert_eq!(fired.get(), 10);
}

#[wasm_bindgen_test]
async fn refused_sound_is_absorbed() {
    // No user gesture in the test page, so autoplay is refused.
    BrowserNotifier::new().play_sound(0.0);
    TimeoutFuture::new(50).await;
}

#[wasm_bindgen_test]
fn clearing_twice_is_harmless() {
    let store = LocalStorageStore;
    store.clear();
    store.clear();
    assert!(store.load().is_none());
}
