//! Terminal UI: rendering and input for the messaging shell.

pub mod event_source;
pub mod message_input;
pub mod message_rendering;
pub mod shell;
pub mod styles;
pub mod terminal;
pub mod view;
