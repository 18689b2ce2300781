//! Interactive shell
//!
//! A line-oriented front end over the file store. Parses commands, runs the
//! store calls off the async runtime and renders the outcome.

mod commands;
mod handlers;
mod session;

pub use commands::{Command, CommandResult, CommandStatus, parse_command};
pub use handlers::*;
pub use session::{CONTENT_TERMINATOR, run_session};
