//! String identifiers for plans, elements and categories.
//!
//! Ids are plain strings on the wire so a plan file reads the same as the
//! document structure; the newtypes keep them from being mixed up in code.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Fresh id of the form `{prefix}-{uuid}`
            pub fn generate(prefix: &str) -> Self {
                Self(format!("{}-{}", prefix, Uuid::new_v4().simple()))
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }
    };
}

string_id!(
    /// Identifier of a plan document
    PlanId
);

string_id!(
    /// Document-unique element identifier, never reused
    ElementId
);

string_id!(
    /// Seat category key in the plan's category map
    CategoryId
);

impl ElementId {
    /// Id of seat `number` (1-based) of `row`: `{row}-seat-{number}`
    pub fn seat(row: &ElementId, number: u32) -> Self {
        Self(format!("{}-seat-{}", row.0, number))
    }
}
