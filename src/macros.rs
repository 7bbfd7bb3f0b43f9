//! Small crate-wide convenience macros.

/// Log a debug line to the browser console.
///
/// On native targets (unit and integration tests) the line goes to stderr
/// instead, since `web_sys::console` is only callable inside a JS host.
///
/// ```rust,ignore
/// debug_log!("joined room {}", room);
/// ```
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {{
        #[cfg(target_arch = "wasm32")]
        web_sys::console::log_1(&format!($($arg)*).into());
        #[cfg(not(target_arch = "wasm32"))]
        eprintln!("[debug] {}", format!($($arg)*));
    }};
}

/// Same as [`debug_log!`] but routed to `console.warn`.
#[macro_export]
macro_rules! warn_log {
    ($($arg:tt)*) => {{
        #[cfg(target_arch = "wasm32")]
        web_sys::console::warn_1(&format!($($arg)*).into());
        #[cfg(not(target_arch = "wasm32"))]
        eprintln!("[warn] {}", format!($($arg)*));
    }};
}

/// Same as [`debug_log!`] but routed to `console.error`.
#[macro_export]
macro_rules! error_log {
    ($($arg:tt)*) => {{
        #[cfg(target_arch = "wasm32")]
        web_sys::console::error_1(&format!($($arg)*).into());
        #[cfg(not(target_arch = "wasm32"))]
        eprintln!("[error] {}", format!($($arg)*));
    }};
}
