//! Terminal keyboard input handling for HOP

mod commands;
mod keymap;

pub use commands::Command;
pub use keymap::InputHandler;
