//! Listload: load-state control for paged list screens
//!
//! A list screen shows exactly one of four views (progress, content, empty,
//! network error) and has to stay consistent with at most one in-flight fetch.
//! Listload keeps that logic in a small state machine with a pure core and a
//! thin asynchronous shell.
//!
//! # Core Concepts
//!
//! - **LoadState**: immutable load flags, replaced wholesale on every event
//! - **DisplayState**: derived from item presence and load flags, never stored
//! - **ListLoadController**: the three events (start, success, failure)
//! - **ListLoader**: spawns fetches, cancels them, and feeds results back
//!
//! # Example
//!
//! ```rust
//! use listload::builder::ListLoadBuilder;
//! use listload::controller::{CancelHandle, PendingOperation, RecordingView};
//! use listload::core::{DisplayState, ErrorClass};
//!
//! struct NoopHandle;
//! impl CancelHandle for NoopHandle {
//!     fn cancel(&mut self) {}
//! }
//!
//! let mut controller = ListLoadBuilder::new()
//!     .view(RecordingView::new())
//!     .merge(|items: &mut Vec<u32>, page: Vec<u32>, _| items.extend(page))
//!     .has_more(|page: &Vec<u32>| page.len() == 10)
//!     .classify(|_: &std::io::Error| ErrorClass::Network)
//!     .build()
//!     .unwrap();
//!
//! controller.begin(PendingOperation::new(true, NoopHandle));
//! assert_eq!(controller.display_state(), DisplayState::Progress);
//!
//! controller.on_success(vec![1, 2, 3], true);
//! assert_eq!(controller.display_state(), DisplayState::Content);
//! assert!(!controller.has_more());
//! ```

pub mod builder;
pub mod controller;
pub mod core;
pub mod effects;
pub mod error;

// Re-export commonly used types
pub use crate::builder::{ListLoadBuilder, LoadConfig};
pub use crate::controller::{ListLoadController, ListView, StartDecision};
pub use crate::core::{DisplayState, ErrorClass, LoadState};
pub use crate::effects::ListLoader;
pub use crate::error::{FetchError, LoadError};
