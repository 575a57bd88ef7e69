//! Chat-facing layer: command parsing, dispatch, and reply rendering.

mod command;
mod dispatcher;
pub mod format;
mod reply;

pub use command::{Command, Inbound};
pub use dispatcher::Dispatcher;
pub use reply::{Button, ButtonAction, ParseMode, Reply, escape_markdown};
