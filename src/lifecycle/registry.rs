use crate::clients::{
    CategoryService, GameService, RoleService, SnippetService, SubmissionService,
    TutorialService, UserService,
};
use crate::lifecycle::config::{ClientConfig, ConfigError};
use crate::session::{AuthSession, CredentialStore, FileCredentialStore};
use resource_framework::{
    ApiError, CredentialSource, HttpTransport, ResourceClient, ResourceConfig, ResourceEntity,
    SharedCredential, Transport,
};
use std::sync::Arc;
use tracing::info;

#[derive(Debug, thiserror::Error)]
pub enum SetupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Could not build HTTP transport: {0}")]
    Transport(#[from] ApiError),
}

/// The wired service graph of a GameHub client.
///
/// `ServiceRegistry` is responsible for:
/// - **Sharing**: one transport and one credential slot behind every service
/// - **Wiring**: each resource service built over its own base path and auth policy
/// - **Session**: the single [`AuthSession`] of the process, writing the same
///   credential slot the services read from
///
/// # Example
///
/// ```ignore
/// let registry = ServiceRegistry::new(&ClientConfig::load()?)?;
/// registry.session.init().await;
///
/// let games = registry.games.list(&GameFilter::default()).await?;
/// registry.games.add_interaction(&games.data[0].pid, InteractionKind::Views).await?;
/// ```
pub struct ServiceRegistry {
    pub users: UserService,
    pub games: GameService,
    pub snippets: SnippetService,
    pub tutorials: TutorialService,
    pub categories: CategoryService,
    pub roles: RoleService,
    pub submissions: SubmissionService,
    pub session: Arc<AuthSession>,
    credential: SharedCredential,
}

impl ServiceRegistry {
    /// Builds the graph over HTTP, persisting the credential to a JSON file.
    pub fn new(config: &ClientConfig) -> Result<Self, SetupError> {
        let transport = HttpTransport::new(config.api_base_url.as_str())?;
        let store = FileCredentialStore::new(config.credential_path()?);
        info!(
            api = %transport.base_url(),
            credential_file = %store.path().display(),
            environment = ?config.environment,
            "Service registry ready"
        );
        Ok(Self::with_transport(Arc::new(transport), Arc::new(store), config))
    }

    /// Builds the same graph over any transport and credential store.
    pub fn with_transport(
        transport: Arc<dyn Transport>,
        store: Arc<dyn CredentialStore>,
        config: &ClientConfig,
    ) -> Self {
        let credential = SharedCredential::new();
        let source: Arc<dyn CredentialSource> = Arc::new(credential.clone());

        let users = UserService::new(client(&transport, &source, false));
        let session = AuthSession::new(
            users.clone(),
            credential.clone(),
            store,
            config.credential_policy(),
        );

        Self {
            games: GameService::new(client(&transport, &source, true)),
            snippets: SnippetService::new(client(&transport, &source, true)),
            tutorials: TutorialService::new(client(&transport, &source, true)),
            categories: CategoryService::new(client(&transport, &source, true)),
            roles: RoleService::new(client(&transport, &source, true)),
            submissions: SubmissionService::new(client(&transport, &source, true)),
            users,
            session: Arc::new(session),
            credential,
        }
    }

    /// The credential slot every service reads its bearer token from.
    pub fn credential(&self) -> &SharedCredential {
        &self.credential
    }
}

fn client<T: ResourceEntity>(
    transport: &Arc<dyn Transport>,
    credentials: &Arc<dyn CredentialSource>,
    auth_required: bool,
) -> ResourceClient<T> {
    ResourceClient::new(
        ResourceConfig::for_entity::<T>().auth_required(auth_required),
        transport.clone(),
        credentials.clone(),
    )
}
