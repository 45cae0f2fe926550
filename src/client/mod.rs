//! Shared HTTP client pipeline.
//!
//! Every outbound call goes through one [`ApiClient`]: the request
//! interceptor attaches the bearer token from the injected session store,
//! and the response interceptor performs the global side effects for
//! failures (session teardown on 401, one user-facing notice per error)
//! before propagating the error to the caller. Callers keep their own
//! local recovery; nothing is swallowed here.

pub mod envelope;
pub mod error;
pub mod notify;

pub use envelope::{Envelope, CREATED, NO_CONTENT, OK};
pub use error::ApiError;
pub use notify::{Notice, Notifier, RecordingNotifier, StderrNotifier};

use std::sync::Arc;
use std::time::Duration;

use parking_lot::RwLock;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::{Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::config::Config;
use crate::session::SessionStore;
use error::ErrorBody;

pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    store: Arc<dyn SessionStore>,
    notifier: Arc<dyn Notifier>,
    // Current view path; session-expired notices are suppressed on the
    // login view. Starts there so a cold client never emits one.
    view: RwLock<String>,
}

impl ApiClient {
    pub fn new(
        config: &Config,
        store: Arc<dyn SessionStore>,
        notifier: Arc<dyn Notifier>,
    ) -> Result<Self, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.api.timeout_secs))
            .build()
            .map_err(ApiError::Transport)?;

        Ok(Self {
            http,
            base_url: config.api.base_url.trim_end_matches('/').to_string(),
            store,
            notifier,
            view: RwLock::new("/login".to_string()),
        })
    }

    /// The injected session store, for auth flows that write to it.
    pub fn store(&self) -> &Arc<dyn SessionStore> {
        &self.store
    }

    /// Record the view the user is currently on.
    pub fn set_view(&self, path: &str) {
        *self.view.write() = path.to_string();
    }

    fn on_login_view(&self) -> bool {
        self.view.read().contains("login")
    }

    // -------------------------------------------------------------------------
    // Request surface
    // -------------------------------------------------------------------------

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.request(Method::GET, path, &[], None::<&()>).await
    }

    pub async fn get_with<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        self.request(Method::GET, path, query, None::<&()>).await
    }

    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.request(Method::POST, path, &[], Some(body)).await
    }

    pub async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.request(Method::POST, path, &[], None::<&()>).await
    }

    pub async fn put<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.request(Method::PUT, path, &[], Some(body)).await
    }

    pub async fn put_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.request(Method::PUT, path, &[], None::<&()>).await
    }

    /// PUT where the parameters ride in the query string, not the body.
    pub async fn put_with<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        self.request(Method::PUT, path, query, None::<&()>).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.request(Method::DELETE, path, &[], None::<&()>).await
    }

    // -------------------------------------------------------------------------
    // Pipeline
    // -------------------------------------------------------------------------

    async fn request<B, T>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<&B>,
    ) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        debug!("{} {}", method, path);

        let request = match self.build(method, path, query, body).build() {
            Ok(request) => request,
            Err(e) => return Err(self.intercept(ApiError::Transport(e))),
        };

        let response = match self.http.execute(request).await {
            Ok(response) => response,
            Err(e) => return Err(self.intercept(classify_send_error(e))),
        };

        let status = response.status();
        let bytes = match response.bytes().await {
            Ok(bytes) => bytes,
            Err(e) => return Err(self.intercept(ApiError::Network(e))),
        };

        if status.is_success() {
            // Empty 204-style bodies decode as an all-default envelope.
            let raw: &[u8] = if bytes.is_empty() { b"{}" } else { &bytes };
            serde_json::from_slice(raw).map_err(ApiError::Decode)
        } else {
            Err(self.intercept(classify_status(status, &bytes)))
        }
    }

    /// Build the outbound request. The bearer credential is attached here
    /// when the store holds a token; an absent token is not an error, the
    /// request simply goes out unauthenticated.
    fn build<B>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<&B>,
    ) -> RequestBuilder
    where
        B: Serialize + ?Sized,
    {
        let url = format!("{}{}", self.base_url, path);
        let mut builder = self.http.request(method, url);
        if !query.is_empty() {
            builder = builder.query(query);
        }
        if let Some(body) = body {
            builder = builder.json(body);
        }
        if let Some(token) = self.store.token() {
            if !token.is_empty() {
                builder = builder.bearer_auth(token);
            }
        }
        builder
    }

    /// Response interceptor: run the global side effects for a failed call,
    /// then hand the error back to the caller intact.
    fn intercept(&self, err: ApiError) -> ApiError {
        match &err {
            ApiError::Unauthorized { .. } => {
                self.store.clear();
                if !self.on_login_view() {
                    self.notifier.notify(Notice::SessionExpired);
                }
            }
            ApiError::Server { .. } => self.notifier.notify(Notice::ServerError),
            ApiError::Client {
                message: Some(msg), ..
            } => self.notifier.notify(Notice::Message(msg.clone())),
            ApiError::Client { message: None, .. } => self.notifier.notify(Notice::GenericError),
            ApiError::Network(_) => self.notifier.notify(Notice::NetworkError),
            ApiError::Transport(_) => self.notifier.notify(Notice::GenericError),
            // Raised after a successful response; callers handle these.
            ApiError::Decode(_) | ApiError::EmptyResult => {}
        }
        err
    }
}

/// Map a non-success HTTP status plus raw body onto the error taxonomy.
fn classify_status(status: StatusCode, body: &[u8]) -> ApiError {
    let message = serde_json::from_slice::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.message);

    if status == StatusCode::UNAUTHORIZED {
        ApiError::Unauthorized { message }
    } else if status.is_server_error() {
        ApiError::Server {
            status: status.as_u16(),
        }
    } else {
        ApiError::Client {
            status: status.as_u16(),
            message,
        }
    }
}

/// A send that never produced a response: either the request could not be
/// constructed (transport fault) or the connection failed (network fault).
fn classify_send_error(err: reqwest::Error) -> ApiError {
    if err.is_builder() {
        ApiError::Transport(err)
    } else {
        ApiError::Network(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{MemorySessionStore, UserInfo};

    fn test_client(base_url: &str) -> (ApiClient, Arc<MemorySessionStore>, Arc<RecordingNotifier>) {
        let store = Arc::new(MemorySessionStore::new());
        let notifier = Arc::new(RecordingNotifier::new());
        let mut config = Config::default();
        config.api.base_url = base_url.to_string();
        config.api.timeout_secs = 2;
        let client = ApiClient::new(&config, store.clone(), notifier.clone()).unwrap();
        (client, store, notifier)
    }

    fn stored_user() -> UserInfo {
        UserInfo {
            id: "u-1".to_string(),
            ..UserInfo::default()
        }
    }

    #[test]
    fn test_bearer_header_attached_when_token_stored() {
        let (client, store, _) = test_client("http://example.invalid");
        store.set_token("abc123");

        let request = client
            .build(Method::GET, "/users/me", &[], None::<&()>)
            .build()
            .unwrap();

        let auth = request.headers().get(reqwest::header::AUTHORIZATION).unwrap();
        assert_eq!(auth.to_str().unwrap(), "Bearer abc123");
        assert_eq!(request.url().path(), "/users/me");
    }

    #[test]
    fn test_no_bearer_header_without_token() {
        let (client, _, _) = test_client("http://example.invalid");

        let request = client
            .build(Method::GET, "/districts", &[], None::<&()>)
            .build()
            .unwrap();

        assert!(request.headers().get(reqwest::header::AUTHORIZATION).is_none());
    }

    #[test]
    fn test_empty_token_sends_unauthenticated() {
        let (client, store, _) = test_client("http://example.invalid");
        store.set_token("");

        let request = client
            .build(Method::GET, "/districts", &[], None::<&()>)
            .build()
            .unwrap();

        assert!(request.headers().get(reqwest::header::AUTHORIZATION).is_none());
    }

    #[test]
    fn test_query_params_attached() {
        let (client, _, _) = test_client("http://example.invalid");

        let request = client
            .build(
                Method::GET,
                "/admin/bookings",
                &[("sortBy", "startAt".to_string()), ("page", "2".to_string())],
                None::<&()>,
            )
            .build()
            .unwrap();

        assert_eq!(request.url().query(), Some("sortBy=startAt&page=2"));
    }

    #[test]
    fn test_unauthorized_clears_session_and_notifies_once() {
        let (client, store, notifier) = test_client("http://example.invalid");
        store.set_token("stale");
        store.set_user_info(&stored_user());
        client.set_view("/dashboard");

        let err = client.intercept(classify_status(
            StatusCode::UNAUTHORIZED,
            br#"{"message":"expired"}"#,
        ));

        assert!(matches!(
            err,
            ApiError::Unauthorized { ref message } if message.as_deref() == Some("expired")
        ));
        assert!(!store.is_authenticated());
        assert_eq!(store.user_info(), None);
        assert_eq!(notifier.notices(), vec![Notice::SessionExpired]);
    }

    #[test]
    fn test_unauthorized_notice_suppressed_on_login_view() {
        let (client, store, notifier) = test_client("http://example.invalid");
        store.set_token("stale");
        client.set_view("/login");

        let err = client.intercept(classify_status(StatusCode::UNAUTHORIZED, b""));

        // Teardown still happens and the error still propagates; only the
        // notice is suppressed.
        assert!(matches!(err, ApiError::Unauthorized { .. }));
        assert!(!store.is_authenticated());
        assert!(notifier.notices().is_empty());
    }

    #[test]
    fn test_server_error_notifies_without_teardown() {
        let (client, store, notifier) = test_client("http://example.invalid");
        store.set_token("abc123");
        client.set_view("/dashboard");

        let err = client.intercept(classify_status(StatusCode::INTERNAL_SERVER_ERROR, b""));

        assert!(matches!(err, ApiError::Server { status: 500 }));
        assert!(store.is_authenticated());
        assert_eq!(notifier.notices(), vec![Notice::ServerError]);
    }

    #[test]
    fn test_client_error_surfaces_server_message_verbatim() {
        let (client, _, notifier) = test_client("http://example.invalid");
        client.set_view("/dashboard");

        let err = client.intercept(classify_status(
            StatusCode::BAD_REQUEST,
            br#"{"message":"Invalid phone"}"#,
        ));

        assert!(matches!(err, ApiError::Client { status: 400, .. }));
        assert_eq!(
            notifier.notices(),
            vec![Notice::Message("Invalid phone".to_string())]
        );
    }

    #[test]
    fn test_client_error_without_message_is_generic() {
        let (client, _, notifier) = test_client("http://example.invalid");
        client.set_view("/dashboard");

        client.intercept(classify_status(StatusCode::CONFLICT, b"not json"));

        assert_eq!(notifier.notices(), vec![Notice::GenericError]);
    }

    #[tokio::test]
    async fn test_connection_failure_is_network_error() {
        // Port 9 (discard) is assumed closed; the connection is refused
        // before any response exists.
        let (client, store, notifier) = test_client("http://127.0.0.1:9");
        store.set_token("abc123");
        client.set_view("/dashboard");

        let result: Result<Envelope<serde_json::Value>, ApiError> = client.get("/users/me").await;

        assert!(matches!(result, Err(ApiError::Network(_))));
        // Connectivity failures never tear down the session.
        assert!(store.is_authenticated());
        assert_eq!(notifier.notices(), vec![Notice::NetworkError]);
    }
}
