//! # Generic Client
//!
//! This module defines the generic client every resource service is built on.
//!
//! `ResourceClient<T>` is produced by a factory taking a [`ResourceConfig`]
//! (`base_path`, `auth_required`) and closing over a shared [`Transport`] and
//! [`CredentialSource`]. Its operations (`find`, `create`, custom actions and, for
//! [`Interactive`] resources, `add_interaction`) all funnel through
//! [`ResourceClient::execute_request`], the single seam where the credential header
//! is attached and failures are handed to the resource's error hook.

use crate::credentials::CredentialSource;
use crate::entity::ResourceEntity;
use crate::error::ClientError;
use crate::interaction::{InteractionKind, InteractionRequest, Interactive};
use crate::request::{redact_path, HttpMethod, HttpRequest, RequestOptions};
use crate::transport::{self, Transport};
use crate::url::{self, UrlBuilder};
use serde::de::{DeserializeOwned, IgnoredAny};
use serde::Serialize;
use serde_json::Value;
use std::marker::PhantomData;
use std::sync::Arc;
use tracing::{debug, info_span, warn, Instrument};

/// Construction parameters of a [`ResourceClient`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceConfig {
    pub base_path: String,
    /// Attach the credential to writes (`create`, custom POSTs, interactions)
    /// unless a call says otherwise. Reads only follow the per-call flag.
    pub auth_required: bool,
}

impl ResourceConfig {
    pub fn new(base_path: impl Into<String>) -> Self {
        Self {
            base_path: base_path.into(),
            auth_required: false,
        }
    }

    /// Config rooted at `T::BASE_PATH`.
    pub fn for_entity<T: ResourceEntity>() -> Self {
        Self::new(T::BASE_PATH)
    }

    pub fn auth_required(mut self, auth_required: bool) -> Self {
        self.auth_required = auth_required;
        self
    }
}

/// ## ResourceClient
///
/// A type-safe, async client for one remote resource.
///
/// * **Cloneable** – holds only `Arc`s and the base path, so cloning is inexpensive.
/// * **Async API** – every operation resolves to `Result<…, ClientError>`.
/// * **Generic** – works with any entity that implements [`ResourceEntity`].
pub struct ResourceClient<T: ResourceEntity> {
    urls: UrlBuilder,
    auth_required: bool,
    transport: Arc<dyn Transport>,
    credentials: Arc<dyn CredentialSource>,
    _entity: PhantomData<fn() -> T>,
}

impl<T: ResourceEntity> Clone for ResourceClient<T> {
    fn clone(&self) -> Self {
        Self {
            urls: self.urls.clone(),
            auth_required: self.auth_required,
            transport: self.transport.clone(),
            credentials: self.credentials.clone(),
            _entity: PhantomData,
        }
    }
}

impl<T: ResourceEntity> ResourceClient<T> {
    pub fn new(
        config: ResourceConfig,
        transport: Arc<dyn Transport>,
        credentials: Arc<dyn CredentialSource>,
    ) -> Self {
        Self {
            urls: UrlBuilder::new(config.base_path),
            auth_required: config.auth_required,
            transport,
            credentials,
            _entity: PhantomData,
        }
    }

    pub fn base_path(&self) -> &str {
        self.urls.base_path()
    }

    /// The path (with query) a call with `options` would hit.
    pub fn build_url(&self, options: &RequestOptions) -> String {
        self.urls
            .build_url(options.sub_endpoint.as_deref(), options.params.as_ref())
    }

    /// `/{value}` with `value` percent-encoded as a single path segment.
    ///
    /// Values no segment can carry (`""`, `.`, `..`) fail with
    /// [`ClientError::InvalidRequest`] through the resource's error hook.
    pub fn encode_segment(
        &self,
        operation: &'static str,
        value: &str,
    ) -> Result<String, ClientError> {
        url::path_segment(value).ok_or_else(|| {
            let err = ClientError::InvalidRequest(format!("{value:?} is not a valid path segment"));
            T::handle_service_error(operation, err)
        })
    }

    /// GET on the base path (plus sub-endpoint/params), decoded as `T::Listing`.
    pub async fn find(&self, options: RequestOptions) -> Result<T::Listing, ClientError> {
        self.execute_request("find", HttpMethod::Get, options, None)
            .await
    }

    /// GET with an explicit response shape, e.g. a single entity under `/{pid}`.
    pub async fn find_as<O: DeserializeOwned>(
        &self,
        options: RequestOptions,
    ) -> Result<O, ClientError> {
        self.execute_request("find", HttpMethod::Get, options, None)
            .await
    }

    /// GET `{base}/{pid}` decoded as `T`. The pid is encoded as one segment.
    pub async fn get(&self, pid: &str) -> Result<T, ClientError> {
        let path = self.encode_segment("find", pid)?;
        self.find_as(RequestOptions::new().sub_endpoint(path)).await
    }

    /// POST `dto` to the base path (plus sub-endpoint).
    pub async fn create<O: DeserializeOwned>(
        &self,
        dto: &T::Create,
        options: RequestOptions,
    ) -> Result<O, ClientError> {
        let body = Self::to_body("create", dto)?;
        self.execute_request("create", HttpMethod::Post, options, Some(body))
            .await
    }

    /// Custom POST action with an arbitrary body (login-style calls).
    pub async fn post<B, O>(
        &self,
        operation: &'static str,
        body: &B,
        options: RequestOptions,
    ) -> Result<O, ClientError>
    where
        B: Serialize + Sync + ?Sized,
        O: DeserializeOwned,
    {
        let body = Self::to_body(operation, body)?;
        self.execute_request(operation, HttpMethod::Post, options, Some(body))
            .await
    }

    fn to_body<B: Serialize + ?Sized>(
        operation: &'static str,
        body: &B,
    ) -> Result<Value, ClientError> {
        serde_json::to_value(body).map_err(|e| {
            T::handle_service_error(operation, ClientError::InvalidRequest(e.to_string()))
        })
    }

    fn wants_auth(&self, method: HttpMethod, options: &RequestOptions) -> bool {
        options
            .requires_auth
            .unwrap_or(method != HttpMethod::Get && self.auth_required)
    }

    /// Low-level dispatch every operation funnels through.
    ///
    /// Attaches `Authorization: Bearer <token>` when the call wants auth and a
    /// credential exists. A missing credential does not stop the call; the server
    /// decides. Failures go through `T::handle_service_error`.
    pub async fn execute_request<O: DeserializeOwned>(
        &self,
        operation: &'static str,
        method: HttpMethod,
        options: RequestOptions,
        body: Option<Value>,
    ) -> Result<O, ClientError> {
        let path = self.build_url(&options);
        let logged_path = redact_path(&path);
        let span = info_span!(
            "request",
            resource = T::RESOURCE,
            operation,
            %method,
            path = %logged_path,
        );

        async move {
            let mut request = HttpRequest::new(method, path);
            if let Some(body) = body {
                request = request.with_body(body);
            }

            if self.wants_auth(method, &options) {
                match self.credentials.credential() {
                    Some(token) => {
                        request = request.with_header("Authorization", format!("Bearer {token}"));
                    }
                    None => debug!("No credential available, sending unauthenticated"),
                }
            }

            let call = transport::request::<O>(self.transport.as_ref(), request);
            let result = match options.cancel {
                Some(token) => tokio::select! {
                    biased;
                    _ = token.cancelled() => Err(ClientError::Cancelled),
                    result = call => result.map_err(ClientError::from),
                },
                None => call.await.map_err(ClientError::from),
            };

            match result {
                Ok(value) => {
                    debug!("Request ok");
                    Ok(value)
                }
                Err(e) => {
                    warn!(error = %e, "Request failed");
                    Err(T::handle_service_error(operation, e))
                }
            }
        }
        .instrument(span)
        .await
    }
}

impl<T: Interactive> ResourceClient<T> {
    /// Signals one interaction on the instance `pid`.
    ///
    /// Sends `PATCH {base}/{pid}/interact` with `{"type": kind}`. The response body
    /// is ignored. Kinds outside `T::INTERACTIONS` fail without a network call.
    pub async fn add_interaction(
        &self,
        pid: &str,
        kind: InteractionKind,
    ) -> Result<(), ClientError> {
        if !T::supports(kind) {
            warn!(resource = T::RESOURCE, %kind, "Unsupported interaction");
            let err = ClientError::UnsupportedInteraction {
                resource: T::RESOURCE,
                kind,
            };
            return Err(T::handle_service_error("add_interaction", err));
        }

        let body = Self::to_body("add_interaction", &InteractionRequest { kind })?;
        let segment = self.encode_segment("add_interaction", pid)?;
        let options = RequestOptions::new().sub_endpoint(format!("{segment}/interact"));
        self.execute_request::<IgnoredAny>(
            "add_interaction",
            HttpMethod::Patch,
            options,
            Some(body),
        )
        .await?;
        Ok(())
    }
}
