//! # Domain Model
//!
//! Wire shapes of the GameHub API. Each entity carries a numeric internal `id` and a
//! public `pid`; only the `pid` ever appears in a route.
//!
//! Every entity implements [`ResourceEntity`](resource_framework::ResourceEntity),
//! naming its base path, listing shape and creation payload. Entities that accept
//! interactions also implement [`Interactive`](resource_framework::Interactive).
//!
//! Counters (`views`, `likes`, ...) are read-only echoes of server state. The client
//! never computes them; it only signals interactions.

pub mod category;
pub mod game;
pub mod role;
pub mod snippet;
pub mod submission;
pub mod tutorial;
pub mod user;

pub use category::*;
pub use game::*;
pub use role::*;
pub use snippet::*;
pub use submission::*;
pub use tutorial::*;
pub use user::*;

use resource_framework::QueryParams;
use serde::{Deserialize, Serialize};

/// Public summary of the user who published a game, snippet, tutorial or submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    pub pid: String,
    pub username: String,
    #[serde(default)]
    pub avatar: Option<String>,
}

/// Paging shared by every listing filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Page {
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl Page {
    pub fn new(page: u32, limit: u32) -> Self {
        Self {
            page: Some(page),
            limit: Some(limit),
        }
    }

    pub(crate) fn write_to(&self, params: &mut QueryParams) {
        params.insert_opt("page", self.page);
        params.insert_opt("limit", self.limit);
    }
}
