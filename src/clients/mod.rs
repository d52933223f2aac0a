//! # Resource Services
//!
//! One typed service per GameHub resource. Each wraps a
//! [`ResourceClient`](resource_framework::ResourceClient) and adds domain methods
//! (`list`, `get`, `create`, ...) on top of the generic operations it inherits through
//! [`ServiceClient`](resource_framework::ServiceClient) and, for interactive resources,
//! [`InteractiveService`](resource_framework::InteractiveService).

pub mod category_service;
pub mod game_service;
pub mod role_service;
pub mod snippet_service;
pub mod submission_service;
pub mod tutorial_service;
pub mod user_service;

pub use category_service::CategoryService;
pub use game_service::GameService;
pub use role_service::RoleService;
pub use snippet_service::SnippetService;
pub use submission_service::SubmissionService;
pub use tutorial_service::TutorialService;
pub use user_service::UserService;
