use super::{Author, Page};
use chrono::{DateTime, Utc};
use resource_framework::{
    ClientError, InteractionKind, Interactive, PaginatedResult, QueryParams, ResourceEntity,
};
use serde::{Deserialize, Serialize};

/// A published game release.
///
/// # Resource Framework
/// Served under `/games`. Creation requires a credential; see
/// [`GameService`](crate::clients::GameService).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Game {
    pub id: u64,
    pub pid: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Engine the game is built with (`godot`, `bevy`, `unity`, ...).
    #[serde(default)]
    pub engine: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub download_url: Option<String>,
    #[serde(default)]
    pub cover_image: Option<String>,
    #[serde(default)]
    pub author: Option<Author>,
    #[serde(default)]
    pub views: u64,
    #[serde(default)]
    pub downloads: u64,
    #[serde(default)]
    pub likes: u64,
    #[serde(default)]
    pub stars: u64,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Payload for publishing a game.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameCreate {
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub engine: Option<String>,
    /// `pid` of the category the game is filed under.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_pid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub download_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<String>,
}

/// Query for the game catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GameFilter {
    pub search: Option<String>,
    pub engine: Option<String>,
    /// Category slug.
    pub category: Option<String>,
    /// Server-side sort key, e.g. `recent` or `popular`.
    pub sort: Option<String>,
    pub page: Page,
}

impl GameFilter {
    pub fn to_params(&self) -> QueryParams {
        let mut params = QueryParams::new();
        params
            .insert_opt("search", self.search.as_deref())
            .insert_opt("engine", self.engine.as_deref())
            .insert_opt("category", self.category.as_deref())
            .insert_opt("sort", self.sort.as_deref());
        self.page.write_to(&mut params);
        params
    }
}

impl ResourceEntity for Game {
    type Listing = PaginatedResult<Game>;
    type Create = GameCreate;
    const RESOURCE: &'static str = "games";
    const BASE_PATH: &'static str = "/games";

    fn pid(&self) -> &str {
        &self.pid
    }

    fn handle_service_error(operation: &'static str, error: ClientError) -> ClientError {
        error.labeled(operation, Self::RESOURCE)
    }
}

impl Interactive for Game {
    const INTERACTIONS: &'static [InteractionKind] = &[
        InteractionKind::Views,
        InteractionKind::Downloads,
        InteractionKind::Likes,
        InteractionKind::Stars,
    ];
}
