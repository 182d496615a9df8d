//! Tunables for a list controller.

use crate::builder::error::BuildError;
use crate::core::DEFAULT_HISTORY_LIMIT;
use serde::{Deserialize, Serialize};

/// Controller configuration.
///
/// Every field has a default, so partial JSON documents are accepted:
///
/// ```rust
/// use listload::builder::LoadConfig;
///
/// let config = LoadConfig::from_json(r#"{ "history_limit": 8 }"#).unwrap();
/// assert_eq!(config.history_limit, 8);
/// assert!(config.initial_has_more);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoadConfig {
    /// `has_more` before the first completed load.
    pub initial_has_more: bool,

    /// Allow `can_load_more` to report `true` before any load has completed.
    pub load_more_before_first_page: bool,

    /// Clear the collection before merging a refresh result.
    pub clear_on_refresh: bool,

    /// Number of display transitions kept in the history.
    pub history_limit: usize,
}

impl Default for LoadConfig {
    fn default() -> Self {
        Self {
            initial_has_more: true,
            load_more_before_first_page: false,
            clear_on_refresh: true,
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }
}

impl LoadConfig {
    pub fn from_json(json: &str) -> Result<Self, BuildError> {
        Ok(serde_json::from_str(json)?)
    }
}
