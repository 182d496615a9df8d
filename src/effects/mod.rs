//! Asynchronous shell around the controller.
//!
//! The controller itself never awaits anything. This module owns the part
//! that does: starting fetch futures on a tokio runtime, aborting them, and
//! marshalling their results back to the owner over a channel.
//!
//! # Key Concepts
//!
//! - **Fetch**: a closure producing a boxed future per request
//! - **Completion channel**: results travel back tagged with their operation id
//! - **Settling**: the owner applies results one at a time; stale ones are dropped

mod loader;

pub use loader::{FetchFn, ListLoader, Settled};
