//! Request gateway
//!
//! Wraps a [`reqwest::Client`] with the client-side request policy:
//!
//! - attach `Authorization: Bearer <token>` when the credential provider has
//!   one, except for [`Delivery::Anonymous`] calls
//! - on a 401 for an authenticated request, end the session that used that
//!   token and emit a single "session expired" notification
//! - on any other failure, emit one error notification with the best message
//!   available
//!
//! Every error is still returned to the caller. There are no retries.

use llmdesk_application::ports::auth_api::{ApiError, Delivery};
use llmdesk_application::ports::credentials::{CredentialProvider, SessionInvalidator};
use llmdesk_application::ports::notifier::{NoNotifications, NotificationSink};
use llmdesk_application::BehaviorConfig;
use llmdesk_domain::Notification;
use reqwest::header::{ACCEPT, HeaderMap};
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Message shown when the backend rejects the current credential
pub const SESSION_EXPIRED_MESSAGE: &str = "Session expired. Please login again.";

/// Correlation header echoed by the backend
pub const REQUEST_ID_HEADER: &str = "x-request-id";

pub struct RequestGateway {
    client: Client,
    base_url: String,
    credentials: Arc<dyn CredentialProvider>,
    invalidator: Arc<dyn SessionInvalidator>,
    notifier: Arc<dyn NotificationSink>,
    notification_duration: Duration,
}

impl RequestGateway {
    /// Create a gateway for `base_url`.
    ///
    /// Notifications are discarded until a sink is attached with
    /// [`with_notifier`](Self::with_notifier).
    pub fn new(
        base_url: impl Into<String>,
        credentials: Arc<dyn CredentialProvider>,
        invalidator: Arc<dyn SessionInvalidator>,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .user_agent(concat!("llmdesk/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            credentials,
            invalidator,
            notifier: Arc::new(NoNotifications),
            notification_duration: BehaviorConfig::default().notification_duration,
        })
    }

    pub fn with_notifier(mut self, notifier: Arc<dyn NotificationSink>) -> Self {
        self.notifier = notifier;
        self
    }

    pub fn with_behavior(mut self, behavior: &BehaviorConfig) -> Self {
        self.notification_duration = behavior.notification_duration;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        delivery: Delivery,
    ) -> Result<T, ApiError> {
        self.json(Method::GET, path, None::<&Value>, delivery).await
    }

    pub async fn post<B, T>(&self, path: &str, body: &B, delivery: Delivery) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.json(Method::POST, path, Some(body), delivery).await
    }

    pub async fn patch<B, T>(&self, path: &str, body: &B, delivery: Delivery) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.json(Method::PATCH, path, Some(body), delivery).await
    }

    pub async fn put<B, T>(&self, path: &str, body: &B, delivery: Delivery) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.json(Method::PUT, path, Some(body), delivery).await
    }

    pub async fn delete(&self, path: &str, delivery: Delivery) -> Result<(), ApiError> {
        self.unit(Method::DELETE, path, None::<&Value>, delivery)
            .await
    }

    /// Send a request and decode the JSON response body.
    pub async fn json<B, T>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        delivery: Delivery,
    ) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let bytes = self.execute(method, path, body, delivery).await?;
        serde_json::from_slice(&bytes).map_err(|e| {
            let err = ApiError::Decode(e.to_string());
            self.report(&err, None, delivery);
            err
        })
    }

    /// Send a request whose response body, if any, is ignored.
    ///
    /// Accepts `204 No Content` as well as any 2xx with a body.
    pub async fn unit<B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        delivery: Delivery,
    ) -> Result<(), ApiError>
    where
        B: Serialize + ?Sized,
    {
        self.execute(method, path, body, delivery).await.map(drop)
    }

    async fn execute<B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        delivery: Delivery,
    ) -> Result<Vec<u8>, ApiError>
    where
        B: Serialize + ?Sized,
    {
        let url = format!("{}{}", self.base_url, path);
        // Read once so a 401 is attributed to the token that was actually sent.
        let token = if delivery.sends_credentials() {
            self.credentials.current_token()
        } else {
            None
        };

        let mut request = self
            .client
            .request(method.clone(), &url)
            .header(ACCEPT, "application/json");
        if let Some(token) = &token {
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        debug!(%method, %url, authenticated = token.is_some(), "Sending request");
        match self.send(request).await {
            Ok(bytes) => Ok(bytes),
            Err(err) => {
                self.report(&err, token.as_deref(), delivery);
                Err(err)
            }
        }
    }

    async fn send(&self, request: RequestBuilder) -> Result<Vec<u8>, ApiError> {
        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        let status = response.status();
        let request_id = request_id(response.headers());
        let bytes = response
            .bytes()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        debug!(
            status = status.as_u16(),
            request_id = request_id.as_deref().unwrap_or("-"),
            bytes = bytes.len(),
            "Received response"
        );

        if status.is_success() {
            return Ok(bytes.to_vec());
        }

        let detail = error_detail(&bytes);
        if status == StatusCode::UNAUTHORIZED {
            Err(ApiError::Unauthorized { detail })
        } else {
            Err(ApiError::Status {
                status: status.as_u16(),
                detail,
            })
        }
    }

    fn report(&self, err: &ApiError, sent_token: Option<&str>, delivery: Delivery) {
        if delivery == Delivery::Silent {
            debug!("Request failed (silent): {}", err);
            return;
        }

        match sent_token {
            Some(token) if err.is_unauthorized() => {
                if self.invalidator.invalidate(token) {
                    warn!("Credential rejected by backend, session ended");
                    self.emit(SESSION_EXPIRED_MESSAGE.to_string());
                } else {
                    debug!("Credential rejected for a session that already ended");
                }
            }
            _ => {
                warn!("Request failed: {}", err);
                self.emit(err.user_message());
            }
        }
    }

    fn emit(&self, message: String) {
        self.notifier
            .notify(Notification::error(message).with_duration(self.notification_duration));
    }
}

fn request_id(headers: &HeaderMap) -> Option<String> {
    headers
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned)
}

/// Extract `detail` from a `{"detail": "..."}` error body.
///
/// FastAPI validation errors carry a list in `detail`; the first entry's
/// `msg` is used for those.
fn error_detail(body: &[u8]) -> Option<String> {
    let value: Value = serde_json::from_slice(body).ok()?;
    match value.get("detail")? {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Array(items) => items
            .first()
            .and_then(|item| item.get("msg"))
            .and_then(Value::as_str)
            .map(str::to_owned),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use llmdesk_application::SessionStore;
    use llmdesk_domain::core::keys;
    use llmdesk_domain::{Severity, User};
    use serde_json::json;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MockSink {
        received: Mutex<Vec<Notification>>,
    }

    impl MockSink {
        fn messages(&self) -> Vec<String> {
            self.received
                .lock()
                .unwrap()
                .iter()
                .map(|n| n.message.clone())
                .collect()
        }
    }

    impl NotificationSink for MockSink {
        fn notify(&self, notification: Notification) {
            self.received.lock().unwrap().push(notification);
        }
    }

    struct Fixture {
        gateway: RequestGateway,
        session: Arc<SessionStore>,
        sink: Arc<MockSink>,
    }

    fn fixture(base_url: &str, token: Option<&str>) -> Fixture {
        let storage = match token {
            Some(t) => MemoryStore::default().with(keys::TOKEN, t),
            None => MemoryStore::default(),
        };
        let session = Arc::new(SessionStore::new(Arc::new(storage)));
        let sink = Arc::new(MockSink::default());
        let gateway = RequestGateway::new(base_url, session.clone(), session.clone())
            .unwrap()
            .with_notifier(sink.clone());
        Fixture {
            gateway,
            session,
            sink,
        }
    }

    #[tokio::test]
    async fn test_attaches_bearer_token() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/api/v1/auth/me")
            .match_header("authorization", "Bearer t1")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(json!({"id": "1", "email": "a@b.com", "name": "A"}).to_string())
            .create_async()
            .await;

        let f = fixture(&server.url(), Some("t1"));
        let user: User = f.gateway.get("/api/v1/auth/me", Delivery::Notify).await.unwrap();

        assert_eq!(user.email, "a@b.com");
        assert!(f.sink.messages().is_empty());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_sends_unauthenticated_without_token() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/v1/auth/login")
            .match_header("authorization", mockito::Matcher::Missing)
            .match_body(mockito::Matcher::Json(json!({"email": "a@b.com"})))
            .with_status(200)
            .with_body("{}")
            .create_async()
            .await;

        let f = fixture(&server.url(), None);
        let _: Value = f
            .gateway
            .post("/api/v1/auth/login", &json!({"email": "a@b.com"}), Delivery::Notify)
            .await
            .unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_unauthorized_ends_session_and_notifies_once() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/v1/auth/me")
            .with_status(401)
            .with_body(r#"{"detail":"Could not validate credentials"}"#)
            .create_async()
            .await;

        let f = fixture(&server.url(), Some("t1"));
        let err = f
            .gateway
            .get::<User>("/api/v1/auth/me", Delivery::Notify)
            .await
            .unwrap_err();

        assert!(err.is_unauthorized());
        assert!(f.session.snapshot().token().is_none());
        assert_eq!(f.sink.messages(), vec![SESSION_EXPIRED_MESSAGE]);
    }

    #[tokio::test]
    async fn test_concurrent_unauthorized_yields_single_logout() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/api/v1/chat/sessions")
            .with_status(401)
            .expect(2)
            .create_async()
            .await;

        let f = fixture(&server.url(), Some("t1"));
        let (a, b) = futures::join!(
            f.gateway.get::<Value>("/api/v1/chat/sessions", Delivery::Notify),
            f.gateway.get::<Value>("/api/v1/chat/sessions", Delivery::Notify),
        );

        assert!(a.unwrap_err().is_unauthorized());
        assert!(b.unwrap_err().is_unauthorized());
        assert_eq!(f.sink.messages(), vec![SESSION_EXPIRED_MESSAGE]);
        assert!(f.session.snapshot().token().is_none());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_unauthorized_without_token_is_a_plain_failure() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/api/v1/auth/login")
            .with_status(401)
            .with_body(r#"{"detail":"Incorrect email or password"}"#)
            .create_async()
            .await;

        let f = fixture(&server.url(), None);
        let err = f
            .gateway
            .post::<_, Value>("/api/v1/auth/login", &json!({}), Delivery::Notify)
            .await
            .unwrap_err();

        assert_eq!(err.detail(), Some("Incorrect email or password"));
        assert_eq!(f.sink.messages(), vec!["Incorrect email or password"]);
    }

    #[tokio::test]
    async fn test_anonymous_delivery_keeps_stored_session() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/v1/auth/login")
            .match_header("authorization", mockito::Matcher::Missing)
            .with_status(401)
            .with_body(r#"{"detail":"Incorrect email or password"}"#)
            .create_async()
            .await;

        let f = fixture(&server.url(), Some("t0"));
        let err = f
            .gateway
            .post::<_, Value>("/api/v1/auth/login", &json!({}), Delivery::Anonymous)
            .await
            .unwrap_err();

        assert!(err.is_unauthorized());
        assert_eq!(f.session.snapshot().token(), Some("t0"));
        assert_eq!(f.sink.messages(), vec!["Incorrect email or password"]);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_server_error_notifies_with_detail() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("PATCH", "/api/v1/auth/api-keys")
            .with_status(500)
            .with_header(REQUEST_ID_HEADER, "req-42")
            .with_body(r#"{"detail":"rate limited"}"#)
            .create_async()
            .await;

        let f = fixture(&server.url(), Some("t1"));
        let err = f
            .gateway
            .patch::<_, User>("/api/v1/auth/api-keys", &json!({"apiKeys": {}}), Delivery::Notify)
            .await
            .unwrap_err();

        assert_eq!(err.status(), Some(500));
        let received = f.sink.received.lock().unwrap().clone();
        assert_eq!(received.len(), 1);
        assert_eq!(received[0].severity, Severity::Error);
        assert_eq!(received[0].message, "rate limited");
        assert_eq!(received[0].duration, Some(Duration::from_millis(5000)));
        assert_eq!(f.session.snapshot().token(), Some("t1"));
    }

    #[tokio::test]
    async fn test_error_without_detail_uses_status_message() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/v1/dashboard")
            .with_status(502)
            .with_body("<html>Bad Gateway</html>")
            .create_async()
            .await;

        let f = fixture(&server.url(), None);
        let _ = f.gateway.get::<Value>("/api/v1/dashboard", Delivery::Notify).await;
        assert_eq!(
            f.sink.messages(),
            vec!["Request failed with status code 502"]
        );
    }

    #[tokio::test]
    async fn test_silent_delivery_neither_notifies_nor_invalidates() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/v1/auth/me")
            .with_status(401)
            .create_async()
            .await;

        let f = fixture(&server.url(), Some("stale"));
        let err = f
            .gateway
            .get::<User>("/api/v1/auth/me", Delivery::Silent)
            .await
            .unwrap_err();

        assert!(err.is_unauthorized());
        assert!(f.sink.messages().is_empty());
        assert_eq!(f.session.snapshot().token(), Some("stale"));
    }

    #[tokio::test]
    async fn test_unit_accepts_no_content() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/api/v1/auth/logout")
            .with_status(204)
            .create_async()
            .await;

        let f = fixture(&server.url(), Some("t1"));
        f.gateway
            .unit(Method::POST, "/api/v1/auth/logout", None::<&Value>, Delivery::Silent)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_transport_failure_notifies() {
        // Nothing listens on port 9 in the test environment.
        let f = fixture("http://127.0.0.1:9", None);
        let err = f
            .gateway
            .get::<Value>("/api/v1/auth/me", Delivery::Notify)
            .await
            .unwrap_err();

        assert!(matches!(err, ApiError::Transport(_)));
        assert_eq!(f.sink.messages().len(), 1);
    }

    #[test]
    fn test_error_detail_parsing() {
        assert_eq!(
            error_detail(br#"{"detail":"nope"}"#).as_deref(),
            Some("nope")
        );
        assert_eq!(
            error_detail(br#"{"detail":[{"msg":"field required","loc":["body"]}]}"#).as_deref(),
            Some("field required")
        );
        assert_eq!(error_detail(br#"{"detail":""}"#), None);
        assert_eq!(error_detail(b"not json"), None);
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let f = fixture("http://localhost:8000/", None);
        assert_eq!(f.gateway.base_url(), "http://localhost:8000");
    }
}
