//! Tunable validation behavior.

use serde::{Deserialize, Serialize};

/// How an array's `maxItems` bound is enforced.
///
/// # Examples
///
/// ```
/// use content_schema_core::MaxItemsPolicy;
///
/// assert!(MaxItemsPolicy::RejectAtLimit.exceeds(3, 3));
/// assert!(!MaxItemsPolicy::RejectAtLimit.exceeds(2, 3));
/// assert!(!MaxItemsPolicy::AllowAtLimit.exceeds(3, 3));
/// assert!(MaxItemsPolicy::AllowAtLimit.exceeds(4, 3));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaxItemsPolicy {
    /// An array whose length equals `maxItems` is rejected.
    ///
    /// Existing schemas declare `maxItems` one past the largest accepted
    /// length, so this is the default.
    #[default]
    RejectAtLimit,
    /// `maxItems` is the largest accepted length.
    AllowAtLimit,
}

impl MaxItemsPolicy {
    /// Returns `true` if an array of `length` elements violates `max_items`.
    pub fn exceeds(self, length: usize, max_items: usize) -> bool {
        match self {
            MaxItemsPolicy::RejectAtLimit => length >= max_items,
            MaxItemsPolicy::AllowAtLimit => length > max_items,
        }
    }
}

/// Options threaded through every validator call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationOptions {
    pub max_items: MaxItemsPolicy,
}

impl ValidationOptions {
    pub fn with_max_items(mut self, policy: MaxItemsPolicy) -> Self {
        self.max_items = policy;
        self
    }
}
