//! Purpose: Blocking HTTP client for the Bento v1 API (JSON over HTTPS, Basic auth).
//! Exports: `BentoClient`, `DEFAULT_BASE_URL`.
//! Role: Owns the connection context and the single request primitive all operations use.
//! Invariants: `site_uuid` is merged into every query string and overrides caller values.
//! Invariants: Non-2xx, transport and decode failures all map to `ErrorKind::Request`.
//! Invariants: One attempt per call; no retries, no timeout configuration.
#![allow(clippy::result_large_err)]

use super::Query;
use crate::core::error::{Error, ErrorKind};
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use tracing::debug;
use url::Url;

pub const DEFAULT_BASE_URL: &str = "https://app.bentonow.com/api/v1";

const USER_AGENT_PREFIX: &str = "bento-rust";

pub(crate) type ApiResult<T> = Result<T, Error>;

#[derive(Clone)]
pub struct BentoClient {
    inner: Arc<BentoClientInner>,
}

struct BentoClientInner {
    site_uuid: String,
    base_url: String,
    authorization: String,
    user_agent: String,
    agent: ureq::Agent,
}

impl fmt::Debug for BentoClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BentoClient")
            .field("site_uuid", &self.inner.site_uuid)
            .field("base_url", &self.inner.base_url)
            .field("authorization", &"<redacted>")
            .finish()
    }
}

impl BentoClient {
    /// Builds a client for one Bento site. No network I/O happens here.
    pub fn new(
        site_uuid: impl Into<String>,
        username: impl AsRef<str>,
        password: impl AsRef<str>,
    ) -> Self {
        let site_uuid = site_uuid.into();
        let credentials = format!("{}:{}", username.as_ref(), password.as_ref());
        let authorization = format!("Basic {}", BASE64.encode(credentials));
        let user_agent = format!("{USER_AGENT_PREFIX}-{site_uuid}");
        Self {
            inner: Arc::new(BentoClientInner {
                site_uuid,
                base_url: DEFAULT_BASE_URL.to_string(),
                authorization,
                user_agent,
                agent: ureq::AgentBuilder::new().build(),
            }),
        }
    }

    /// Points the client at another deployment of the API (a proxy or a local test server).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> ApiResult<Self> {
        let base_url = normalize_base_url(base_url.into())?;
        if let Some(inner) = Arc::get_mut(&mut self.inner) {
            inner.base_url = base_url;
        } else {
            self.inner = Arc::new(BentoClientInner {
                site_uuid: self.inner.site_uuid.clone(),
                base_url,
                authorization: self.inner.authorization.clone(),
                user_agent: self.inner.user_agent.clone(),
                agent: self.inner.agent.clone(),
            });
        }
        Ok(self)
    }

    pub fn site_uuid(&self) -> &str {
        &self.inner.site_uuid
    }

    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    pub fn user_agent(&self) -> &str {
        &self.inner.user_agent
    }

    /// Sends one request to `<base_url><endpoint>` and returns the decoded JSON body.
    ///
    /// `site_uuid` is always written into `query`, replacing any value the
    /// caller put there. `body`, when present, is sent as the JSON payload.
    pub fn request(
        &self,
        method: &str,
        endpoint: &str,
        mut query: Query,
        body: Option<&Value>,
    ) -> ApiResult<Value> {
        query.set("site_uuid", self.inner.site_uuid.as_str());
        let url = self.build_url(endpoint, &query)?;

        debug!(%method, endpoint, "sending bento api request");
        let request = self
            .inner
            .agent
            .request_url(method, &url)
            .set("Authorization", &self.inner.authorization)
            .set("Content-Type", "application/json")
            .set("User-Agent", &self.inner.user_agent);
        let response = match body {
            Some(body) => {
                let payload = serde_json::to_string(body).map_err(|err| {
                    Error::request("failed to encode request json").with_source(err)
                })?;
                request.send_string(&payload)
            }
            None => request.call(),
        };

        match response {
            Ok(resp) => {
                let status = resp.status();
                debug!(%method, endpoint, status, "received bento api response");
                if !(200..300).contains(&status) {
                    return Err(status_error(status, resp.status_text(), endpoint));
                }
                read_json_response(resp)
            }
            Err(ureq::Error::Status(status, resp)) => {
                debug!(%method, endpoint, status, "bento api returned error status");
                Err(status_error(status, resp.status_text(), endpoint))
            }
            Err(ureq::Error::Transport(err)) => {
                debug!(%method, endpoint, error = %err, "bento api request failed");
                Err(Error::request(format!("{err}")).with_source(err))
            }
        }
    }

    pub(crate) fn get(&self, endpoint: &str, query: Query) -> ApiResult<Value> {
        self.request("GET", endpoint, query, None)
    }

    pub(crate) fn post_json<T>(&self, endpoint: &str, body: &T) -> ApiResult<Value>
    where
        T: Serialize + ?Sized,
    {
        let body = serde_json::to_value(body)
            .map_err(|err| Error::request("failed to encode request json").with_source(err))?;
        self.request("POST", endpoint, Query::new(), Some(&body))
    }

    /// POST with every argument in the query string and no request body.
    pub(crate) fn post_query(&self, endpoint: &str, query: Query) -> ApiResult<Value> {
        self.request("POST", endpoint, query, None)
    }

    fn build_url(&self, endpoint: &str, query: &Query) -> ApiResult<Url> {
        let raw = format!("{}{}", self.inner.base_url, endpoint);
        let mut url = Url::parse(&raw).map_err(|err| {
            Error::request(format!("invalid request url for {endpoint}")).with_source(err)
        })?;
        url.query_pairs_mut().extend_pairs(query.iter());
        Ok(url)
    }
}

fn normalize_base_url(raw: String) -> ApiResult<String> {
    let url = Url::parse(&raw).map_err(|err| {
        Error::new(ErrorKind::Usage)
            .with_message("invalid bento base url")
            .with_source(err)
    })?;
    let scheme = url.scheme();
    if scheme != "http" && scheme != "https" {
        return Err(Error::new(ErrorKind::Usage)
            .with_message("bento base url must use http or https scheme"));
    }
    if url.query().is_some() || url.fragment().is_some() {
        return Err(Error::new(ErrorKind::Usage)
            .with_message("bento base url must not include a query or fragment"));
    }
    Ok(raw.trim_end_matches('/').to_string())
}

fn status_error(status: u16, status_text: &str, endpoint: &str) -> Error {
    Error::request(format!("{status} {status_text} for {endpoint}"))
}

fn read_json_response(response: ureq::Response) -> ApiResult<Value> {
    serde_json::from_reader(response.into_reader())
        .map_err(|err| Error::request("invalid response json").with_source(err))
}

#[cfg(test)]
mod tests {
    use super::{BentoClient, DEFAULT_BASE_URL, normalize_base_url};
    use crate::api::Query;
    use crate::core::error::ErrorKind;

    #[test]
    fn new_client_uses_default_base_url() {
        let client = BentoClient::new("abc-123", "publishable", "secret");
        assert_eq!(client.base_url(), DEFAULT_BASE_URL);
        assert_eq!(client.site_uuid(), "abc-123");
        assert_eq!(client.user_agent(), "bento-rust-abc-123");
    }

    #[test]
    fn debug_output_redacts_credentials() {
        let client = BentoClient::new("abc-123", "publishable", "secret");
        let debug = format!("{client:?}");
        assert!(debug.contains("abc-123"));
        assert!(!debug.contains("secret"));
        assert!(!debug.contains("cHVibGlzaGFibGU6c2VjcmV0"));
    }

    #[test]
    fn normalize_base_url_strips_trailing_slash() {
        let url = normalize_base_url("http://localhost:8080/api/v1/".to_string()).expect("url");
        assert_eq!(url, "http://localhost:8080/api/v1");
    }

    #[test]
    fn normalize_base_url_rejects_other_schemes() {
        let err = normalize_base_url("ftp://example.com".to_string()).expect_err("err");
        assert_eq!(err.kind(), ErrorKind::Usage);

        let err = normalize_base_url("not a url".to_string()).expect_err("err");
        assert_eq!(err.kind(), ErrorKind::Usage);
    }

    #[test]
    fn build_url_appends_endpoint_and_query() {
        let client = BentoClient::new("abc-123", "u", "p")
            .with_base_url("http://localhost:9700/api/v1")
            .expect("client");
        let query = Query::new()
            .with("email", "a+b@example.com")
            .with("site_uuid", "abc-123");
        let url = client.build_url("/fetch/subscribers", &query).expect("url");
        assert_eq!(url.path(), "/api/v1/fetch/subscribers");
        assert_eq!(
            url.query(),
            Some("email=a%2Bb%40example.com&site_uuid=abc-123")
        );
    }

    #[test]
    fn cloned_client_can_be_rebased() {
        let client = BentoClient::new("abc-123", "u", "p");
        let shared = client.clone();
        let rebased = client
            .with_base_url("http://127.0.0.1:1")
            .expect("client");
        assert_eq!(rebased.base_url(), "http://127.0.0.1:1");
        assert_eq!(shared.base_url(), DEFAULT_BASE_URL);
        assert_eq!(rebased.site_uuid(), "abc-123");
    }
}
