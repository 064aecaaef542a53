// Hand-crafted async HTTP client for the campus administration API.
//
// Base path: /api/
// No auth: the server does not advertise authentication, pagination, or
// rate limiting; this client does not fabricate any of them.

use reqwest::Method;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::Error;
use crate::transport::TransportConfig;

/// Async client for the campus REST API.
///
/// One network call per invocation, no retries. Non-2xx responses fail with
/// [`Error::Api`] carrying the HTTP status and the response text; successful
/// responses are parsed by the typed helpers or handed back raw by
/// [`request`](Self::request).
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
}

impl ApiClient {
    // ── Constructors ─────────────────────────────────────────────────

    /// Build a client for the given server base URL.
    pub fn new(base_url: &str, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        let base_url = Self::normalize_base_url(base_url)?;
        Ok(Self { http, base_url })
    }

    /// Wrap an existing `reqwest::Client` (caller manages transport).
    pub fn from_reqwest(base_url: &str, http: reqwest::Client) -> Result<Self, Error> {
        let base_url = Self::normalize_base_url(base_url)?;
        Ok(Self { http, base_url })
    }

    /// Ensure the base URL ends with a single trailing slash so that
    /// joining `api/…` paths behaves uniformly.
    fn normalize_base_url(raw: &str) -> Result<Url, Error> {
        let mut url = Url::parse(raw)?;
        let path = url.path().trim_end_matches('/').to_owned();
        url.set_path(&format!("{path}/"));
        Ok(url)
    }

    /// The server base URL this client talks to.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── URL builder ──────────────────────────────────────────────────

    /// Join a relative path (e.g. `"api/students"`) onto the base URL.
    fn url(&self, path: &str) -> Result<Url, Error> {
        Ok(self.base_url.join(path.trim_start_matches('/'))?)
    }

    // ── Generic executor ─────────────────────────────────────────────

    /// Issue a single HTTP request.
    ///
    /// Serializes `body` as JSON when present, sends exactly one request,
    /// and returns the raw response for the caller to parse. Responses with
    /// a status outside the 2xx range fail with [`Error::Api`].
    pub async fn request<B: Serialize + Sync>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<reqwest::Response, Error> {
        let url = self.url(path)?;
        debug!(%method, %url, "request");

        let mut req = self.http.request(method, url);
        if let Some(b) = body {
            req = req.json(b);
        }

        let resp = req.send().await?;
        let status = resp.status();
        if status.is_success() {
            Ok(resp)
        } else {
            Err(Self::api_error(status, resp).await)
        }
    }

    // ── Typed verbs ──────────────────────────────────────────────────

    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
        let resp = self
            .request::<serde_json::Value>(Method::GET, path, None)
            .await?;
        Self::parse_body(resp).await
    }

    pub(crate) async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, Error> {
        let resp = self.request(Method::POST, path, Some(body)).await?;
        Self::parse_body(resp).await
    }

    pub(crate) async fn put<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, Error> {
        let resp = self.request(Method::PUT, path, Some(body)).await?;
        Self::parse_body(resp).await
    }

    /// DELETE with no required response body.
    pub(crate) async fn delete(&self, path: &str) -> Result<(), Error> {
        self.request::<serde_json::Value>(Method::DELETE, path, None)
            .await?;
        Ok(())
    }

    // ── Response handling ────────────────────────────────────────────

    async fn parse_body<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, Error> {
        let body = resp.text().await?;
        serde_json::from_str(&body).map_err(|e| {
            let preview = &body[..body.len().min(200)];
            Error::Deserialization {
                message: format!("{e} (body preview: {preview:?})"),
                body,
            }
        })
    }

    async fn api_error(status: reqwest::StatusCode, resp: reqwest::Response) -> Error {
        let body = resp.text().await.unwrap_or_default();
        Error::Api {
            status: status.as_u16(),
            body: if body.is_empty() {
                status.to_string()
            } else {
                body
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_gains_trailing_slash() {
        let client =
            ApiClient::from_reqwest("http://school.local:8080", reqwest::Client::new())
                .expect("valid URL");
        assert_eq!(client.base_url().as_str(), "http://school.local:8080/");
    }

    #[test]
    fn base_url_keeps_single_trailing_slash() {
        let client = ApiClient::from_reqwest("http://school.local/", reqwest::Client::new())
            .expect("valid URL");
        assert_eq!(client.base_url().as_str(), "http://school.local/");
    }

    #[test]
    fn url_join_strips_leading_slash() {
        let client = ApiClient::from_reqwest("http://school.local", reqwest::Client::new())
            .expect("valid URL");
        let url = client.url("/api/students").expect("valid path");
        assert_eq!(url.as_str(), "http://school.local/api/students");
    }
}
