//! Authenticated request client
//!
//! Every outbound call goes through [`ApiClient::request`], which:
//!
//! - defaults `Content-Type` to `application/json` unless the caller set one
//! - attaches `Authorization: Bearer <token>` when a session is stored and
//!   the call asks for it; the stored token replaces any caller-supplied
//!   `Authorization` header
//! - tags the request with an `x-request-id` for tracing
//! - clears the token store when the server answers 401
//!
//! Responses are returned as-is whatever their status. Mapping statuses to
//! errors is up to the typed operations built on top. There is no automatic
//! retry.

use std::sync::Arc;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Method, Response, StatusCode};
use stayfolio_auth::TokenStore;
use tracing::instrument;

use crate::metrics::{self, RequestTimer};
use crate::{ClientConfig, ClientError};

/// Header carrying the per-request correlation id
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Per-call options for [`ApiClient::request`]
#[derive(Debug, Clone)]
pub struct RequestOptions {
    headers: HeaderMap,
    body: Option<serde_json::Value>,
    attach_auth: bool,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self {
            headers: HeaderMap::new(),
            body: None,
            attach_auth: true,
        }
    }
}

impl RequestOptions {
    /// Options with no extra headers, no body, and the session attached
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a header. Later calls with the same name replace earlier ones.
    #[must_use]
    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Send a JSON body
    #[must_use]
    pub fn json(mut self, body: serde_json::Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Do not attach the stored session token
    #[must_use]
    pub fn without_auth(mut self) -> Self {
        self.attach_auth = false;
        self
    }

    /// Whether the stored session token will be attached
    pub fn attach_auth(&self) -> bool {
        self.attach_auth
    }
}

/// Build a bearer `Authorization` value for a token.
pub fn bearer_header(token: &str) -> Result<HeaderValue, ClientError> {
    let mut value =
        HeaderValue::from_str(&format!("Bearer {token}")).map_err(|_| ClientError::InvalidToken)?;
    value.set_sensitive(true);
    Ok(value)
}

/// HTTP client bound to the remote API origin and the session token store
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    store: Arc<TokenStore>,
}

impl ApiClient {
    /// Create a client for the configured API origin
    pub fn new(config: &ClientConfig, store: Arc<TokenStore>) -> Result<Self, ClientError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| ClientError::transport(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            base_url: config.api_base_url().to_string(),
            store,
        })
    }

    /// Token store this client reads from and invalidates
    pub fn store(&self) -> &Arc<TokenStore> {
        &self.store
    }

    /// Remote API origin
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for an API path such as `/api/apartments`
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Send a request and return the raw response.
    ///
    /// Only a transport failure (no response at all) is an error here.
    #[instrument(skip(self, options), fields(request_id = tracing::field::Empty), level = "debug")]
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        options: RequestOptions,
    ) -> Result<Response, ClientError> {
        let request_id = uuid::Uuid::new_v4().to_string();
        tracing::Span::current().record("request_id", request_id.as_str());

        let headers = self.build_headers(options.headers, options.attach_auth, &request_id)?;
        let mut request = self
            .http
            .request(method.clone(), self.url(path))
            .headers(headers);
        if let Some(body) = &options.body {
            request = request.body(serde_json::to_vec(body)?);
        }

        let timer = RequestTimer::start(method.as_str());
        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                timer.error();
                tracing::debug!(error = %e, "request failed without a response");
                return Err(ClientError::transport(e.to_string()));
            }
        };

        let status = response.status();
        if status.is_success() {
            timer.success();
        } else {
            timer.rejected();
        }
        tracing::debug!(status = status.as_u16(), "response received");

        if status == StatusCode::UNAUTHORIZED {
            self.invalidate_session();
        }

        Ok(response)
    }

    fn build_headers(
        &self,
        caller: HeaderMap,
        attach_auth: bool,
        request_id: &str,
    ) -> Result<HeaderMap, ClientError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.extend(caller);

        if attach_auth {
            if let Some(token) = self.store.read() {
                headers.insert(AUTHORIZATION, bearer_header(&token)?);
            }
        }

        let request_id_header = HeaderName::from_static(REQUEST_ID_HEADER);
        if !headers.contains_key(&request_id_header) {
            if let Ok(value) = HeaderValue::from_str(request_id) {
                headers.insert(request_id_header, value);
            }
        }

        Ok(headers)
    }

    /// Drop the session after the server rejected it. The next guard check
    /// redirects to login; nothing navigates from here.
    fn invalidate_session(&self) {
        let had_token = self.store.is_logged_in();

        if let Err(e) = self.store.clear() {
            tracing::warn!(
                error = %e,
                code = e.error_code(),
                "failed to persist session invalidation"
            );
        }

        if had_token {
            metrics::record_session_invalidation();
            tracing::warn!("session rejected by server, token cleared");
        } else {
            tracing::debug!("401 response without a stored session");
        }
    }
}
