use super::{Author, Page};
use chrono::{DateTime, Utc};
use resource_framework::{
    ClientError, InteractionKind, Interactive, PaginatedResult, QueryParams, ResourceEntity,
};
use serde::{Deserialize, Serialize};

/// A shareable piece of game code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snippet {
    pub id: u64,
    pub pid: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub code: String,
    pub language: String,
    #[serde(default)]
    pub engine: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub author: Option<Author>,
    /// `pid` of the snippet this one was forked from.
    #[serde(default)]
    pub forked_from: Option<String>,
    #[serde(default)]
    pub views: u64,
    #[serde(default)]
    pub likes: u64,
    #[serde(default)]
    pub stars: u64,
    #[serde(default)]
    pub forks: u64,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SnippetCreate {
    pub title: String,
    pub description: String,
    pub code: String,
    pub language: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub engine: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SnippetFilter {
    pub search: Option<String>,
    pub language: Option<String>,
    pub engine: Option<String>,
    pub tag: Option<String>,
    pub sort: Option<String>,
    pub page: Page,
}

impl SnippetFilter {
    pub fn to_params(&self) -> QueryParams {
        let mut params = QueryParams::new();
        params
            .insert_opt("search", self.search.as_deref())
            .insert_opt("language", self.language.as_deref())
            .insert_opt("engine", self.engine.as_deref())
            .insert_opt("tag", self.tag.as_deref())
            .insert_opt("sort", self.sort.as_deref());
        self.page.write_to(&mut params);
        params
    }
}

impl ResourceEntity for Snippet {
    type Listing = PaginatedResult<Snippet>;
    type Create = SnippetCreate;
    const RESOURCE: &'static str = "snippets";
    const BASE_PATH: &'static str = "/snippets";

    fn pid(&self) -> &str {
        &self.pid
    }

    fn handle_service_error(operation: &'static str, error: ClientError) -> ClientError {
        error.labeled(operation, Self::RESOURCE)
    }
}

impl Interactive for Snippet {
    const INTERACTIONS: &'static [InteractionKind] = &[
        InteractionKind::Views,
        InteractionKind::Likes,
        InteractionKind::Stars,
        InteractionKind::Forks,
    ];
}
