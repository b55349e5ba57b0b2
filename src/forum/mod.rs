//! HTTP client for the XenForo REST API.
//!
//! Two endpoints are used:
//!
//! - `GET  {base}/threads/{id}/?with_posts={bool}&page={n}` → thread + one page of posts
//! - `POST {base}/posts/` (form: `thread_id`, `message`) → `{ success, post }`
//!
//! The client is stateless apart from the session token captured at
//! construction. Nothing is retried.

use async_trait::async_trait;
use serde::Deserialize;

use crate::adapters::ReqwestHttpClient;
use crate::error::{ForumError, NetworkError};
use crate::models::{PostReply, ThreadId, ThreadInfo};
use crate::session::SessionStore;
use crate::startup::ForumConfig;
use crate::traits::{ForumApi, Headers, HttpClient, Response};

/// One entry of a XenForo error payload.
#[derive(Debug, Deserialize)]
struct ApiErrorEntry {
    #[serde(default)]
    code: String,
    #[serde(default)]
    message: String,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    errors: Vec<ApiErrorEntry>,
}

/// Client for the forum API.
pub struct ForumClient<C: HttpClient = ReqwestHttpClient> {
    http: C,
    base_url: String,
    session: SessionStore,
}

impl ForumClient<ReqwestHttpClient> {
    /// Build a reqwest-backed client from configuration.
    pub fn from_config(config: &ForumConfig, session: SessionStore) -> Result<Self, ForumError> {
        let http = ReqwestHttpClient::with_timeout(config.request_timeout, &config.user_agent)
            .map_err(NetworkError::from)?;
        Ok(Self::new(http, config.base_url.clone(), session))
    }
}

impl<C: HttpClient> ForumClient<C> {
    pub fn new(http: C, base_url: impl Into<String>, session: SessionStore) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http,
            base_url,
            session,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Request headers: JSON accept plus bearer auth when signed in.
    fn headers(&self) -> Headers {
        let mut headers = Headers::new();
        headers.insert("Accept".to_string(), "application/json".to_string());
        if let Some(bearer) = self.session.bearer() {
            headers.insert("Authorization".to_string(), bearer);
        }
        headers
    }

    fn thread_url(&self, thread_id: ThreadId, with_posts: bool, page: Option<u32>) -> String {
        let mut url = format!(
            "{}/threads/{}/?with_posts={}",
            self.base_url, thread_id, with_posts
        );
        if let Some(page) = page.filter(|p| *p >= 1) {
            url.push_str(&format!("&page={}", page));
        }
        url
    }

    fn posts_url(&self) -> String {
        format!("{}/posts/", self.base_url)
    }

    /// Turn a non-2xx response into a [`NetworkError`], preferring the
    /// API's own error message when the body carries one.
    fn check_status(response: Response) -> Result<Response, NetworkError> {
        if response.is_success() {
            return Ok(response);
        }
        if response.status == 429 {
            return Err(NetworkError::RateLimited);
        }

        let message = response
            .json::<ApiErrorBody>()
            .ok()
            .and_then(|body| body.errors.into_iter().next())
            .map(|e| {
                if e.code.is_empty() {
                    e.message
                } else {
                    format!("{}: {}", e.code, e.message)
                }
            })
            .unwrap_or_else(|| {
                let text = response.text_lossy();
                text.chars().take(200).collect()
            });

        Err(NetworkError::HttpStatus {
            status: response.status,
            message,
        })
    }
}

#[async_trait]
impl<C: HttpClient> ForumApi for ForumClient<C> {
    async fn fetch_thread_info(
        &self,
        thread_id: ThreadId,
        with_posts: bool,
        page: Option<u32>,
    ) -> Result<ThreadInfo, NetworkError> {
        let url = self.thread_url(thread_id, with_posts, page);
        tracing::debug!(%thread_id, ?page, "GET thread");

        let response = self.http.get(&url, &self.headers()).await.map_err(|e| {
            tracing::warn!(%thread_id, ?page, error = %e, "Thread request failed");
            NetworkError::from(e)
        })?;
        let response = Self::check_status(response)?;

        let mut info: ThreadInfo = response.json()?;
        if info.thread.thread_id != thread_id.get() {
            return Err(NetworkError::InvalidResponse {
                message: format!(
                    "requested thread {} but received {}",
                    thread_id, info.thread.thread_id
                ),
            });
        }
        let foreign = info.retain_own_posts();
        if foreign > 0 {
            tracing::warn!(%thread_id, foreign, "Dropped posts belonging to another thread");
        }

        tracing::debug!(%thread_id, ?page, posts = info.posts.len(), "Thread page received");
        Ok(info)
    }

    async fn submit_reply(
        &self,
        thread_id: ThreadId,
        body: &str,
    ) -> Result<PostReply, NetworkError> {
        let form = format!(
            "thread_id={}&message={}",
            thread_id,
            urlencoding::encode(body)
        );
        let mut headers = self.headers();
        headers.insert(
            "Content-Type".to_string(),
            "application/x-www-form-urlencoded".to_string(),
        );

        tracing::debug!(%thread_id, len = body.len(), "POST reply");
        let response = self
            .http
            .post(&self.posts_url(), &form, &headers)
            .await
            .map_err(NetworkError::from)?;
        let response = Self::check_status(response)?;

        let reply: PostReply = response.json()?;
        tracing::debug!(%thread_id, success = reply.success, "Reply response received");
        Ok(reply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::{MockHttpClient, MockResponse};
    use crate::traits::HttpError;
    use serde_json::json;

    const BASE: &str = "https://forum.test/api";

    fn id(n: i64) -> ThreadId {
        ThreadId::new(n).unwrap()
    }

    fn client(http: MockHttpClient, token: &str) -> ForumClient<MockHttpClient> {
        ForumClient::new(http, format!("{}/", BASE), SessionStore::with_token(token))
    }

    #[test]
    fn test_thread_url() {
        let c = client(MockHttpClient::new(), "");
        assert_eq!(
            c.thread_url(id(5), true, None),
            "https://forum.test/api/threads/5/?with_posts=true"
        );
        assert_eq!(
            c.thread_url(id(5), true, Some(3)),
            "https://forum.test/api/threads/5/?with_posts=true&page=3"
        );
        assert_eq!(
            c.thread_url(id(5), false, Some(0)),
            "https://forum.test/api/threads/5/?with_posts=false"
        );
    }

    #[tokio::test]
    async fn test_fetch_sends_bearer() {
        let http = MockHttpClient::new();
        http.set_default_response(MockResponse::Success(Response::json_body(
            200,
            &json!({"thread": {"thread_id": 7}, "posts": []}),
        )));
        let c = client(http.clone(), "tok");

        let info = c.fetch_thread_info(id(7), true, Some(2)).await.unwrap();
        assert_eq!(info.thread.thread_id, 7);

        let req = &http.get_requests()[0];
        assert_eq!(req.method, "GET");
        assert!(req.url.ends_with("&page=2"));
        assert_eq!(
            req.headers.get("Authorization"),
            Some(&"Bearer tok".to_string())
        );
    }

    #[tokio::test]
    async fn test_fetch_without_token_has_no_auth_header() {
        let http = MockHttpClient::new();
        http.set_default_response(MockResponse::Success(Response::json_body(
            200,
            &json!({"thread": {"thread_id": 7}}),
        )));
        let c = client(http.clone(), "");

        c.fetch_thread_info(id(7), true, None).await.unwrap();
        assert!(!http.get_requests()[0].headers.contains_key("Authorization"));
    }

    #[tokio::test]
    async fn test_fetch_mismatched_thread_is_invalid() {
        let http = MockHttpClient::new();
        http.set_default_response(MockResponse::Success(Response::json_body(
            200,
            &json!({"thread": {"thread_id": 8}}),
        )));
        let c = client(http, "");

        let err = c.fetch_thread_info(id(7), true, None).await.unwrap_err();
        assert!(matches!(err, NetworkError::InvalidResponse { .. }));
    }

    #[tokio::test]
    async fn test_fetch_drops_foreign_posts() {
        let http = MockHttpClient::new();
        http.set_default_response(MockResponse::Success(Response::json_body(
            200,
            &json!({
                "thread": {"thread_id": 7},
                "posts": [
                    {"post_id": 1, "thread_id": 7, "position": 0},
                    {"post_id": 2, "thread_id": 9, "position": 1}
                ]
            }),
        )));
        let c = client(http, "");

        let info = c.fetch_thread_info(id(7), true, None).await.unwrap();
        assert_eq!(info.posts.len(), 1);
        assert_eq!(info.posts[0].post_id, 1);
    }

    #[tokio::test]
    async fn test_fetch_api_error_message() {
        let http = MockHttpClient::new();
        http.set_default_response(MockResponse::Success(Response::json_body(
            404,
            &json!({"errors": [{"code": "requested_thread_not_found", "message": "Requested thread not found."}]}),
        )));
        let c = client(http, "");

        let err = c.fetch_thread_info(id(7), true, None).await.unwrap_err();
        assert_eq!(
            err,
            NetworkError::HttpStatus {
                status: 404,
                message: "requested_thread_not_found: Requested thread not found.".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_fetch_malformed_payload() {
        let http = MockHttpClient::new();
        http.set_default_response(MockResponse::Success(Response::new(
            200,
            bytes::Bytes::from("<html>"),
        )));
        let c = client(http, "");

        let err = c.fetch_thread_info(id(7), true, None).await.unwrap_err();
        assert!(matches!(err, NetworkError::InvalidResponse { .. }));
    }

    #[tokio::test]
    async fn test_fetch_transport_error() {
        let http = MockHttpClient::new();
        http.set_default_response(MockResponse::Error(HttpError::Timeout("30s".to_string())));
        let c = client(http, "");

        let err = c.fetch_thread_info(id(7), true, None).await.unwrap_err();
        assert!(matches!(err, NetworkError::Timeout { .. }));
    }

    #[tokio::test]
    async fn test_submit_reply_form_encoding() {
        let http = MockHttpClient::new();
        http.set_response(
            "https://forum.test/api/posts/",
            MockResponse::Success(Response::json_body(200, &json!({"success": true}))),
        );
        let c = client(http.clone(), "tok");

        let reply = c.submit_reply(id(3), "hello & bye").await.unwrap();
        assert!(reply.success);

        let requests = http.get_requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, "POST");
        assert_eq!(
            requests[0].body.as_deref(),
            Some("thread_id=3&message=hello%20%26%20bye")
        );
        assert_eq!(
            requests[0].headers.get("Content-Type"),
            Some(&"application/x-www-form-urlencoded".to_string())
        );
    }

    #[tokio::test]
    async fn test_submit_reply_rate_limited() {
        let http = MockHttpClient::new();
        http.set_default_response(MockResponse::Success(Response::new(
            429,
            bytes::Bytes::new(),
        )));
        let c = client(http, "tok");

        let err = c.submit_reply(id(3), "hi").await.unwrap_err();
        assert_eq!(err, NetworkError::RateLimited);
    }
}
