use super::{Author, Page};
use chrono::{DateTime, Utc};
use resource_framework::{
    ClientError, InteractionKind, Interactive, PaginatedResult, QueryParams, ResourceEntity,
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Review state of a submission.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl SubmissionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }
}

impl fmt::Display for SubmissionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An entry submitted to a game (jam entries, mods, levels).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub id: u64,
    pub pid: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// `pid` of the game this submission belongs to.
    #[serde(default)]
    pub game_pid: Option<String>,
    #[serde(default)]
    pub status: SubmissionStatus,
    #[serde(default)]
    pub author: Option<Author>,
    #[serde(default)]
    pub views: u64,
    #[serde(default)]
    pub likes: u64,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionCreate {
    pub title: String,
    pub description: String,
    pub game_pid: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repository_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmissionFilter {
    pub game: Option<String>,
    pub status: Option<SubmissionStatus>,
    pub page: Page,
}

impl SubmissionFilter {
    /// Submissions of one game, any status.
    pub fn for_game(game_pid: impl Into<String>) -> Self {
        Self {
            game: Some(game_pid.into()),
            ..Default::default()
        }
    }

    pub fn to_params(&self) -> QueryParams {
        let mut params = QueryParams::new();
        params
            .insert_opt("game", self.game.as_deref())
            .insert_opt("status", self.status.map(|s| s.as_str()));
        self.page.write_to(&mut params);
        params
    }
}

impl ResourceEntity for Submission {
    type Listing = PaginatedResult<Submission>;
    type Create = SubmissionCreate;
    const RESOURCE: &'static str = "submissions";
    const BASE_PATH: &'static str = "/submissions";

    fn pid(&self) -> &str {
        &self.pid
    }

    fn handle_service_error(operation: &'static str, error: ClientError) -> ClientError {
        error.labeled(operation, Self::RESOURCE)
    }
}

impl Interactive for Submission {
    const INTERACTIONS: &'static [InteractionKind] =
        &[InteractionKind::Views, InteractionKind::Likes];
}
