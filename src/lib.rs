//! relabs - thread and post synchronization for a XenForo forum client
//!
//! The library holds the sync core (thread loading, paging, reply
//! submission) and the seams it talks through. Screens are expected to
//! observe the watch channels in [`state`] and drain navigation commands
//! from [`navigation`].

pub mod adapters;
pub mod cli;
pub mod error;
pub mod forum;
pub mod models;
pub mod navigation;
pub mod prelude;
pub mod session;
pub mod startup;
pub mod state;
pub mod traits;
