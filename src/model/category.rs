use resource_framework::ResourceEntity;
use serde::{Deserialize, Serialize};

/// A catalog category games are filed under.
///
/// The API returns categories as a plain array, not a page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: u64,
    pub pid: String,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryCreate {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ResourceEntity for Category {
    type Listing = Vec<Category>;
    type Create = CategoryCreate;
    const RESOURCE: &'static str = "categories";
    const BASE_PATH: &'static str = "/categories";

    fn pid(&self) -> &str {
        &self.pid
    }
}
