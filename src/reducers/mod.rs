//! Domain reducers. `update.rs` tries them in turn.
//!
//! Each takes the message by reference, mutates the state it owns and pushes
//! side effects onto `cmds`.

pub mod chat;
pub mod presence;
pub mod rooms;
pub mod session;
pub mod settings;
pub mod typing;
