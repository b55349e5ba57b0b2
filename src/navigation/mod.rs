//! Navigation interface between the sync core and the screen host.
//!
//! The core never drives screens directly. It sends [`NavCommand`]s
//! through a [`NavigationHandle`]; whoever owns the screen stack drains
//! the receiving end.

mod route;

pub use route::{initial_route, Route, RULES_THREAD_ID};

use tokio::sync::mpsc;

use crate::models::ThreadId;

/// A request to change screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavCommand {
    /// Pop the current screen
    Back,
    /// Open a thread screen
    ToThread(ThreadId),
}

/// Sending half of the navigation channel.
#[derive(Debug, Clone)]
pub struct NavigationHandle {
    tx: mpsc::UnboundedSender<NavCommand>,
}

impl NavigationHandle {
    /// Create a handle and the receiver the screen host listens on.
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<NavCommand>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    pub fn navigate_back(&self) {
        self.send(NavCommand::Back);
    }

    pub fn navigate_to_thread(&self, thread_id: ThreadId) {
        self.send(NavCommand::ToThread(thread_id));
    }

    /// Shortcut to the forum rules thread.
    pub fn open_rules_thread(&self) {
        if let Some(thread_id) = Route::rules_thread().thread_id() {
            self.navigate_to_thread(thread_id);
        }
    }

    fn send(&self, command: NavCommand) {
        // Host gone means the screens are gone; nothing left to navigate.
        if self.tx.send(command).is_err() {
            tracing::debug!(?command, "Navigation receiver dropped");
        }
    }
}
