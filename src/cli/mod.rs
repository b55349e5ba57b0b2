//! CLI module for the relabs driver.
//!
//! This module provides the headless command-line surface:
//! - Argument parsing
//! - Version display
//! - Loading and printing a thread
//! - Posting a reply
//!
//! # Usage
//!
//! ```ignore
//! use relabs::cli::{parse_args, run_cli_command};
//!
//! let command = parse_args(std::env::args())?;
//! run_cli_command(command, &ForumConfig::from_env()).await?;
//! ```

pub mod args;
pub mod version;

pub use args::{parse_args, ArgsError, CliCommand};
pub use version::{version_string, VERSION};

use std::fmt::Write as _;
use std::sync::Arc;

use color_eyre::eyre::eyre;
use color_eyre::Result;
use tokio_util::sync::CancellationToken;

use crate::models::ThreadId;
use crate::navigation::{NavCommand, NavigationHandle};
use crate::startup::{bootstrap, ForumConfig};
use crate::state::{LoadOutcome, ReplyCoordinator, SubmitOutcome, ThreadSnapshot, ThreadSyncState};

/// Run a parsed command to completion.
pub async fn run_cli_command(command: CliCommand, config: &ForumConfig) -> Result<()> {
    match command {
        CliCommand::Version => {
            println!("{}", version_string());
            Ok(())
        }
        CliCommand::ShowRoute => {
            let startup = bootstrap(config).await?;
            println!("{}", startup.initial_route);
            Ok(())
        }
        CliCommand::Thread { thread_id, pages } => show_thread(config, thread_id, pages).await,
        CliCommand::Reply { thread_id, body } => post_reply(config, thread_id, &body).await,
    }
}

async fn show_thread(config: &ForumConfig, thread_id: ThreadId, pages: u32) -> Result<()> {
    let startup = bootstrap(config).await?;
    let state = ThreadSyncState::new(Arc::new(startup.forum), CancellationToken::new());

    state.load_initial(thread_id).await?;
    for _ in 0..pages {
        match state.load_next_page().await? {
            LoadOutcome::Applied => {}
            LoadOutcome::Skipped(reason) => {
                tracing::info!(%reason, "Stopped paging");
                break;
            }
            LoadOutcome::Discarded => break,
        }
    }

    print!("{}", render_snapshot(&state.snapshot()));
    Ok(())
}

async fn post_reply(config: &ForumConfig, thread_id: ThreadId, body: &str) -> Result<()> {
    let startup = bootstrap(config).await?;
    if !startup.session.is_authenticated() {
        return Err(eyre!("not signed in; no session token found"));
    }

    let (navigation, mut nav_rx) = NavigationHandle::channel();
    let coordinator = ReplyCoordinator::new(Arc::new(startup.forum), navigation);

    match coordinator.submit(thread_id, body).await? {
        SubmitOutcome::Succeeded(reply) => {
            let post_id = reply.post.map(|p| p.post_id).unwrap_or_default();
            println!("Reply posted to thread {} (post {})", thread_id, post_id);
        }
        SubmitOutcome::Rejected(_) => return Err(eyre!("the forum refused the reply")),
        SubmitOutcome::Ignored(reason) => return Err(eyre!("reply not sent: {}", reason)),
    }

    if let Ok(NavCommand::Back) = nav_rx.try_recv() {
        tracing::debug!("Reply screen closed");
    }
    Ok(())
}

/// Plain-text rendering of a thread snapshot.
pub fn render_snapshot(snapshot: &ThreadSnapshot) -> String {
    let mut out = String::new();
    let thread = &snapshot.thread;
    let _ = writeln!(out, "# {} (thread {})", thread.title, thread.thread_id);
    let _ = writeln!(
        out,
        "{} replies, {} views, page {}{}",
        thread.reply_count,
        thread.view_count,
        snapshot.current_page.max(1),
        snapshot
            .pagination
            .map(|p| format!(" of {}", p.last_page))
            .unwrap_or_default()
    );
    for post in &snapshot.posts {
        let _ = writeln!(out);
        let _ = writeln!(out, "[{}] {} (post {})", post.position, post.author, post.post_id);
        let _ = writeln!(out, "{}", post.body);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Pagination, Post, Thread};

    #[test]
    fn test_render_snapshot() {
        let snapshot = ThreadSnapshot {
            thread: Thread {
                thread_id: 7,
                title: "Kernel builds".to_string(),
                reply_count: 1,
                view_count: 20,
                ..Default::default()
            },
            posts: vec![Post {
                post_id: 70,
                thread_id: 7,
                author: "alice".to_string(),
                body: "hello".to_string(),
                position: 0,
                ..Default::default()
            }],
            pagination: Some(Pagination {
                current_page: 1,
                last_page: 3,
                per_page: 20,
                total: 41,
            }),
            ..Default::default()
        };

        let text = render_snapshot(&snapshot);
        assert!(text.starts_with("# Kernel builds (thread 7)\n"));
        assert!(text.contains("1 replies, 20 views, page 1 of 3"));
        assert!(text.contains("[0] alice (post 70)\nhello\n"));
    }

    #[tokio::test]
    async fn test_version_command() {
        assert!(run_cli_command(CliCommand::Version, &ForumConfig::default())
            .await
            .is_ok());
    }
}
