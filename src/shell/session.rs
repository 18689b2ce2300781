//! Shell session loop

use log::{debug, info};
use std::io;
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, Lines};

use crate::shell::commands::{Command, CommandResult, CommandStatus, parse_command};
use crate::shell::handlers::*;
use crate::storage::FileStore;

/// A line holding only this ends multi-line content input
pub const CONTENT_TERMINATOR: &str = "###";

const MAX_COMMAND_LENGTH: usize = 512;
const INTRO: &str = "Welcome to the sandbox shell! Type 'help' to see available commands.\n";
const PROMPT: &str = "sandbox> ";

/// Runs the shell until `quit` or end of input.
///
/// Store calls run on the blocking pool; this loop only moves lines in and
/// rendered results out.
pub async fn run_session<R, W>(store: Arc<FileStore>, reader: R, mut writer: W) -> io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = reader.lines();
    writer.write_all(INTRO.as_bytes()).await?;
    info!("Shell started on {}", store.root().path().display());

    loop {
        writer.write_all(PROMPT.as_bytes()).await?;
        writer.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        if line.len() > MAX_COMMAND_LENGTH {
            writer.write_all(b"Error: command too long\n").await?;
            continue;
        }

        let command = parse_command(&line);
        debug!("Received command: {command:?}");

        let result = match command {
            Command::Empty => continue,
            Command::List => handle_list(&store).await,
            Command::Read(name) => handle_read(&store, name).await,
            Command::Write(name) => {
                let prompt = content_prompt(&format!("Enter content for {name}"));
                writer.write_all(prompt.as_bytes()).await?;
                writer.flush().await?;
                let content = read_content(&mut lines).await?;
                handle_write(&store, name, content).await
            }
            Command::Append(name) => {
                let prompt = content_prompt(&format!("Enter content to append to {name}"));
                writer.write_all(prompt.as_bytes()).await?;
                writer.flush().await?;
                let content = read_content(&mut lines).await?;
                handle_append(&store, name, content).await
            }
            Command::Create(name) => handle_create(&store, name).await,
            Command::Delete(name) => {
                let prompt = format!("Are you sure you want to delete {name}? (y/n): ");
                writer.write_all(prompt.as_bytes()).await?;
                writer.flush().await?;
                let answer = lines.next_line().await?.unwrap_or_default();
                if answer.trim().eq_ignore_ascii_case("y") {
                    handle_delete(&store, name).await
                } else {
                    CommandResult::success("Operation cancelled.\n")
                }
            }
            Command::Rename(old, new) => handle_rename(&store, old, new).await,
            Command::Help => handle_help(),
            Command::Quit => CommandResult {
                status: CommandStatus::Quit,
                message: Some("Goodbye!\n".into()),
            },
            Command::Usage(usage) => handle_usage(usage),
            Command::Unknown(input) => handle_unknown(&input),
        };

        if let Some(msg) = &result.message {
            writer.write_all(msg.as_bytes()).await?;
        }
        if result.status == CommandStatus::Quit {
            break;
        }
    }

    writer.flush().await?;
    info!("Shell session ended");
    Ok(())
}

fn content_prompt(lead: &str) -> String {
    format!("{lead} (type '{CONTENT_TERMINATOR}' on a line by itself to finish):\n")
}

/// Collects lines up to the terminator (or end of input), joined with `\n`.
async fn read_content<R>(lines: &mut Lines<R>) -> io::Result<String>
where
    R: AsyncBufRead + Unpin,
{
    let mut content = Vec::new();
    while let Some(line) = lines.next_line().await? {
        if line.trim() == CONTENT_TERMINATOR {
            break;
        }
        content.push(line);
    }
    Ok(content.join("\n"))
}
