//! Builder API for assembling list controllers.
//!
//! The controller's caller-specific steps (merge, pagination rule, error
//! classification) are injected as closures here instead of being supplied
//! by a subtype.

pub mod config;
pub mod controller;
pub mod error;

pub use config::LoadConfig;
pub use controller::ListLoadBuilder;
pub use error::{BuildError, Requirement};
