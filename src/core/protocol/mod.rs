// src/core/protocol/mod.rs

//! The DICT reply grammar: line framing, status lines, atoms and commands.

pub mod atoms;
pub mod command;
pub mod line_codec;
pub mod status;

pub use atoms::split_atoms;
pub use command::DictCommand;
pub use line_codec::{DictLineCodec, MAX_LINE_LENGTH};
pub use status::{Status, codes};
