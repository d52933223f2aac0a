use super::{Author, Page};
use chrono::{DateTime, Utc};
use resource_framework::{
    ClientError, InteractionKind, Interactive, PaginatedResult, QueryParams, ResourceEntity,
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Skill level a tutorial targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A long-form, markdown-bodied guide.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tutorial {
    pub id: u64,
    pub pid: String,
    pub title: String,
    #[serde(default)]
    pub summary: String,
    /// Markdown source. Rendering is the UI's business.
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub difficulty: Option<Difficulty>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub author: Option<Author>,
    #[serde(default)]
    pub views: u64,
    #[serde(default)]
    pub likes: u64,
    #[serde(default)]
    pub stars: u64,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TutorialCreate {
    pub title: String,
    pub summary: String,
    pub content: String,
    pub difficulty: Difficulty,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TutorialFilter {
    pub search: Option<String>,
    pub difficulty: Option<Difficulty>,
    pub tag: Option<String>,
    pub page: Page,
}

impl TutorialFilter {
    pub fn to_params(&self) -> QueryParams {
        let mut params = QueryParams::new();
        params
            .insert_opt("search", self.search.as_deref())
            .insert_opt("difficulty", self.difficulty.map(|d| d.as_str()))
            .insert_opt("tag", self.tag.as_deref());
        self.page.write_to(&mut params);
        params
    }
}

impl ResourceEntity for Tutorial {
    type Listing = PaginatedResult<Tutorial>;
    type Create = TutorialCreate;
    const RESOURCE: &'static str = "tutorials";
    const BASE_PATH: &'static str = "/tutorials";

    fn pid(&self) -> &str {
        &self.pid
    }

    fn handle_service_error(operation: &'static str, error: ClientError) -> ClientError {
        error.labeled(operation, Self::RESOURCE)
    }
}

impl Interactive for Tutorial {
    const INTERACTIONS: &'static [InteractionKind] = &[
        InteractionKind::Views,
        InteractionKind::Likes,
        InteractionKind::Stars,
    ];
}
