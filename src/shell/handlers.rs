//! Command handlers for the sandbox shell.
//!
//! Each handler runs its store call on the blocking thread pool and turns
//! the outcome into a `CommandResult` carrying the text to show the user.

use log::error;
use std::sync::Arc;
use tokio::task;

use crate::error::OpError;
use crate::error::handlers::{handle_error, user_message};
use crate::shell::commands::CommandResult;
use crate::storage::{FileRecord, FileStore};

const HELP: &str = "\
Available commands:
  list                      List files in the sandbox
  read <filename>           Show a file
  write <filename>          Replace a file with the lines that follow
  append <filename>         Append the lines that follow to a file
  create <filename>         Create an empty file
  delete <filename>         Delete a file (asks for confirmation)
  rename <old> <new>        Rename a file
  help                      Show this help
  quit                      Leave the shell
";

/// Runs a blocking store call off the async runtime.
async fn run_blocking<T, F>(store: &Arc<FileStore>, op: F) -> Option<Result<T, OpError>>
where
    T: Send + 'static,
    F: FnOnce(&FileStore) -> Result<T, OpError> + Send + 'static,
{
    let store = Arc::clone(store);
    match task::spawn_blocking(move || op(store.as_ref())).await {
        Ok(result) => Some(result),
        Err(e) => {
            error!("Store task failed: {e}");
            None
        }
    }
}

/// Turns a store outcome into a shell result.
async fn respond<T, F, M>(
    store: &Arc<FileStore>,
    operation: &str,
    op: F,
    on_success: M,
) -> CommandResult
where
    T: Send + 'static,
    F: FnOnce(&FileStore) -> Result<T, OpError> + Send + 'static,
    M: FnOnce(T) -> String,
{
    match run_blocking(store, op).await {
        Some(Ok(value)) => CommandResult::success(on_success(value)),
        Some(Err(e)) => {
            handle_error(operation, &e);
            CommandResult::failure(user_message(&e, store.allowed_extensions()))
        }
        None => CommandResult::failure("internal error, see log"),
    }
}

pub async fn handle_list(store: &Arc<FileStore>) -> CommandResult {
    respond(store, "list", |s| Ok(s.list()), |records: Vec<FileRecord>| {
        if records.is_empty() {
            return "No files found in sandbox.\n".to_string();
        }
        let mut out = String::from("Files in sandbox:\n");
        for record in records {
            out.push_str(&format!("  - {} ({} bytes)\n", record.name, record.size));
        }
        out
    })
    .await
}

pub async fn handle_read(store: &Arc<FileStore>, name: String) -> CommandResult {
    let shown = name.clone();
    respond(store, "read", move |s| s.read_to_string(&name), move |content| {
        format!("\n--- Content of {shown} ---\n\n{content}\n\n--- End of {shown} ---\n")
    })
    .await
}

pub async fn handle_write(store: &Arc<FileStore>, name: String, content: String) -> CommandResult {
    let shown = name.clone();
    respond(store, "write", move |s| s.write(&name, content), move |_| {
        format!("Successfully wrote to {shown}\n")
    })
    .await
}

pub async fn handle_append(store: &Arc<FileStore>, name: String, content: String) -> CommandResult {
    let shown = name.clone();
    respond(store, "append", move |s| s.append(&name, content), move |_| {
        format!("Successfully appended to {shown}\n")
    })
    .await
}

pub async fn handle_create(store: &Arc<FileStore>, name: String) -> CommandResult {
    let shown = name.clone();
    respond(store, "create", move |s| s.create(&name), move |_| {
        format!("Created {shown}\n")
    })
    .await
}

pub async fn handle_delete(store: &Arc<FileStore>, name: String) -> CommandResult {
    let shown = name.clone();
    respond(store, "delete", move |s| s.delete(&name), move |_| {
        format!("Successfully deleted {shown}\n")
    })
    .await
}

pub async fn handle_rename(store: &Arc<FileStore>, old: String, new: String) -> CommandResult {
    let message = format!("Successfully renamed {old} to {new}\n");
    respond(store, "rename", move |s| s.rename(&old, &new), move |_| message).await
}

pub fn handle_help() -> CommandResult {
    CommandResult::success(HELP)
}

pub fn handle_usage(usage: &str) -> CommandResult {
    CommandResult::failure(format!("Usage: {usage}"))
}

pub fn handle_unknown(input: &str) -> CommandResult {
    CommandResult::failure(format!("Unknown command '{input}'. Type 'help' for a list"))
}
