//! Module `commands`
//!
//! Defines the shell command parsing logic and the structures used to
//! report a command's outcome.

/// A command typed at the shell prompt.
///
/// Commands that are missing required arguments parse to `Usage` with the
/// expected form.
#[derive(Debug, PartialEq, Eq)]
pub enum Command {
    List,
    Read(String),
    Write(String),  // content follows on the next lines
    Append(String), // content follows on the next lines
    Create(String),
    Delete(String), // asks for confirmation
    Rename(String, String),
    Help,
    Quit,
    Empty,
    Usage(&'static str),
    Unknown(String),
}

/// Represents the outcome status of executing a command.
#[derive(Debug, PartialEq, Eq)]
pub enum CommandStatus {
    Success,
    Failure(String),
    Quit,
}

/// Struct encapsulating the full result of a command execution.
#[derive(Debug)]
pub struct CommandResult {
    pub status: CommandStatus,
    pub message: Option<String>,
}

impl CommandResult {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            status: CommandStatus::Success,
            message: Some(message.into()),
        }
    }

    pub fn failure(reason: impl Into<String>) -> Self {
        let reason = reason.into();
        Self {
            message: Some(format!("Error: {reason}\n")),
            status: CommandStatus::Failure(reason),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == CommandStatus::Success
    }
}

/// Parses one input line into a `Command`.
pub fn parse_command(raw: &str) -> Command {
    let trimmed = raw.trim();
    let mut parts = trimmed.splitn(2, char::is_whitespace);
    let cmd = parts.next().unwrap_or("").to_ascii_lowercase();
    let arg = parts.next().unwrap_or("").trim();

    match cmd.as_str() {
        "" => Command::Empty,
        "list" | "ls" => Command::List,
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        "read" if !arg.is_empty() => Command::Read(arg.to_string()),
        "write" if !arg.is_empty() => Command::Write(arg.to_string()),
        "append" if !arg.is_empty() => Command::Append(arg.to_string()),
        "create" | "new" if !arg.is_empty() => Command::Create(arg.to_string()),
        "delete" | "rm" if !arg.is_empty() => Command::Delete(arg.to_string()),
        "rename" | "mv" => match arg.split_whitespace().collect::<Vec<_>>().as_slice() {
            [old, new] => Command::Rename(old.to_string(), new.to_string()),
            _ => Command::Usage("rename <old_name> <new_name>"),
        },
        "read" => Command::Usage("read <filename>"),
        "write" => Command::Usage("write <filename>"),
        "append" => Command::Usage("append <filename>"),
        "create" | "new" => Command::Usage("create <filename>"),
        "delete" | "rm" => Command::Usage("delete <filename>"),
        _ => Command::Unknown(trimmed.to_string()),
    }
}
