//! Client core for the MAKE makerspace portal.
//!
//! SYSTEM CONTEXT
//! ==============
//! Keeps a local view of the server's inventory and the student's storage
//! allocation fresh through timed refreshes, and re-applies the inventory
//! search whenever the filter controls or the inventory change. Session,
//! rendering and network access are injected through traits so the same
//! core runs behind the terminal client and in tests.

pub mod api;
pub mod bootstrap;
pub mod config;
pub mod console;
pub mod controls;
pub mod poller;
pub mod render;
pub mod search;
pub mod session;
pub mod snapshot;
pub mod types;

#[cfg(test)]
pub(crate) mod test_support;
