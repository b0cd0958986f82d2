// src/connection/mod.rs

//! Manages the lifecycle of a DICT session: the greeting handshake, the
//! serialized request/reply exchanges and the final `QUIT`.

mod block;
mod client;
mod exchanges;
mod session;

pub use client::DictConnection;
