//! Error taxonomy used to pick a display state for failures.

use serde::{Deserialize, Serialize};

/// Coarse classification of a fetch failure.
///
/// Only the class matters to the controller: a network-class failure on an
/// empty list shows the network error view, anything else shows the empty view.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum ErrorClass {
    /// Connectivity, timeout and I/O failures.
    Network,
    /// Everything else: decoding, server-side business errors, bugs.
    Other,
}

impl ErrorClass {
    pub fn is_network(self) -> bool {
        matches!(self, Self::Network)
    }
}

/// Errors that know their own class.
///
/// Implement this for your transport's error type and use
/// [`ListLoadBuilder::classify_by_trait`](crate::builder::ListLoadBuilder::classify_by_trait)
/// instead of passing a closure.
///
/// ```rust
/// use listload::core::{Classify, ErrorClass};
///
/// enum ApiError {
///     Offline,
///     BadPayload,
/// }
///
/// impl Classify for ApiError {
///     fn class(&self) -> ErrorClass {
///         match self {
///             Self::Offline => ErrorClass::Network,
///             Self::BadPayload => ErrorClass::Other,
///         }
///     }
/// }
///
/// assert!(ApiError::Offline.class().is_network());
/// ```
pub trait Classify {
    fn class(&self) -> ErrorClass;
}

impl Classify for std::io::Error {
    fn class(&self) -> ErrorClass {
        ErrorClass::Network
    }
}

impl Classify for tokio::time::error::Elapsed {
    fn class(&self) -> ErrorClass {
        ErrorClass::Network
    }
}
