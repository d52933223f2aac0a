//! # Interactions
//!
//! Interactions are counter-style side effects (views, likes, downloads, stars,
//! forks) that the client signals and the server owns. Every interactive resource
//! reuses the same `PATCH {base}/{pid}/interact` call; only the set of supported
//! kinds differs, declared through [`Interactive::INTERACTIONS`].

use crate::entity::ResourceEntity;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The closed set of interaction counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InteractionKind {
    Views,
    Downloads,
    Likes,
    Stars,
    Forks,
}

impl InteractionKind {
    pub const ALL: [InteractionKind; 5] = [
        Self::Views,
        Self::Downloads,
        Self::Likes,
        Self::Stars,
        Self::Forks,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Views => "views",
            Self::Downloads => "downloads",
            Self::Likes => "likes",
            Self::Stars => "stars",
            Self::Forks => "forks",
        }
    }
}

impl fmt::Display for InteractionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Marks a resource that accepts interaction signals.
pub trait Interactive: ResourceEntity {
    /// Kinds this resource accepts. Anything else is rejected before the network.
    const INTERACTIONS: &'static [InteractionKind];

    fn supports(kind: InteractionKind) -> bool {
        Self::INTERACTIONS.contains(&kind)
    }
}

/// Body of the interaction PATCH: `{"type": "<kind>"}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InteractionRequest {
    #[serde(rename = "type")]
    pub kind: InteractionKind,
}
