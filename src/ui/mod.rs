//! UI module - terminal front end
//!
//! A line-oriented stand-in for a graphical board:
//!
//! - **commands**: parses typed lines into session intents
//! - **render**: draws the displayed board, the status line and event messages
//!
//! The binary owns the loop; everything here is synchronous and side-effect
//! free so it can be tested without a terminal.

pub mod commands;
pub mod render;

pub use commands::{Command, CommandError, HELP};
pub use render::{describe_event, render_board, render_session, status_line, Highlights};
