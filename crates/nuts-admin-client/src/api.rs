//! Generic transport for every backend call.
//!
//! [`ApiClient::invoke`] applies the same contract to `GET`, `POST`, `PUT`
//! and `DELETE`:
//!
//! 1. Bearer authentication from the [`TokenProvider`], consulted per call.
//! 2. JSON request bodies with `Content-Type: application/json`.
//! 3. Response bodies parsed as JSON when the response declares
//!    `application/json`, as text otherwise.
//! 4. 2xx resolves; anything else becomes an [`ApiError`].
//!
//! No retries, caching or deduplication: each call is sent at most once.

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::config::ApiConfig;
use crate::error::{ApiError, ErrorBody};
use crate::token::{current_token, TokenProvider};

const APPLICATION_JSON: &str = "application/json";

/// Per-request additions.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    /// Extra headers. They win over generated headers, except
    /// `Authorization` while the operator has a session token.
    pub headers: HeaderMap,
    /// Query string pairs.
    pub query: Vec<(String, String)>,
}

impl RequestOptions {
    /// Options carrying only query pairs.
    pub fn with_query<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            headers: HeaderMap::new(),
            query: pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

/// A successfully classified response body.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiResponse {
    /// Body of a response declaring `application/json`.
    Json(Value),
    /// Body of any other response.
    Text(String),
    /// A 201 or 204 without a usable body.
    NoContent {
        /// The response status.
        status: StatusCode,
    },
}

impl ApiResponse {
    /// Deserialize the body into `T`.
    ///
    /// Text bodies are parsed as JSON; `NoContent` deserializes from `null`
    /// (so `Option<T>` and `()` work).
    pub fn into_json<T: DeserializeOwned>(self, endpoint: &str) -> Result<T, ApiError> {
        let result = match self {
            Self::Json(value) => serde_json::from_value(value),
            Self::Text(text) => serde_json::from_str(&text),
            Self::NoContent { .. } => serde_json::from_value(Value::Null),
        };
        result.map_err(|source| ApiError::Decode {
            endpoint: endpoint.to_string(),
            source,
        })
    }

    /// The JSON body, if this is one.
    pub fn as_json(&self) -> Option<&Value> {
        match self {
            Self::Json(v) => Some(v),
            _ => None,
        }
    }

    /// Whether this is the bodiless 201/204 marker.
    pub fn is_no_content(&self) -> bool {
        matches!(self, Self::NoContent { .. })
    }
}

/// HTTP client shared by all endpoint clients.
///
/// Cheap to clone; clones share the connection pool and token provider.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: url::Url,
    forbidden_route: Option<String>,
    tokens: Arc<dyn TokenProvider>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url.as_str())
            .field("forbidden_route", &self.forbidden_route)
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    /// Create a client from configuration and a token provider.
    pub fn new(config: &ApiConfig, tokens: Arc<dyn TokenProvider>) -> Result<Self, ApiError> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let http = builder.build().map_err(|e| ApiError::Transport {
            endpoint: "client_init".into(),
            source: e,
        })?;

        Ok(Self {
            http,
            base_url: config.base_url.clone(),
            forbidden_route: config.forbidden_route.clone(),
            tokens,
        })
    }

    /// Base URL requests are resolved against.
    pub fn base_url(&self) -> &url::Url {
        &self.base_url
    }

    /// `GET path`.
    pub async fn get(&self, path: &str) -> Result<ApiResponse, ApiError> {
        self.invoke(Method::GET, path, None, &RequestOptions::default())
            .await
    }

    /// `POST path` with a JSON body.
    pub async fn post<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<ApiResponse, ApiError> {
        let body = encode(&Method::POST, path, body)?;
        self.invoke(Method::POST, path, Some(body), &RequestOptions::default())
            .await
    }

    /// `PUT path` with a JSON body.
    pub async fn put<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<ApiResponse, ApiError> {
        let body = encode(&Method::PUT, path, body)?;
        self.invoke(Method::PUT, path, Some(body), &RequestOptions::default())
            .await
    }

    /// `DELETE path`.
    pub async fn delete(&self, path: &str) -> Result<ApiResponse, ApiError> {
        self.invoke(Method::DELETE, path, None, &RequestOptions::default())
            .await
    }

    /// `GET path` and deserialize the body.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        options: &RequestOptions,
    ) -> Result<T, ApiError> {
        self.invoke(Method::GET, path, None, options)
            .await?
            .into_json(&endpoint(&Method::GET, path))
    }

    /// `POST path` with a JSON body and deserialize the response.
    pub async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        self.post(path, body)
            .await?
            .into_json(&endpoint(&Method::POST, path))
    }

    /// Send one request and classify the response.
    ///
    /// `path` is appended to the base URL; an absolute `http(s)://` URL is
    /// used as is. The session token is only sent to the base URL's origin.
    pub async fn invoke(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
        options: &RequestOptions,
    ) -> Result<ApiResponse, ApiError> {
        let endpoint = endpoint(&method, path);
        let url = self.url(path);

        let token = if self.same_origin(&url) {
            current_token(self.tokens.as_ref())
        } else {
            tracing::debug!(%endpoint, "foreign origin, session token withheld");
            None
        };
        let mut headers = HeaderMap::new();
        if let Some(token) = &token {
            let value = HeaderValue::from_str(&format!("Bearer {}", token.as_str()))
                .map_err(|_| ApiError::InvalidHeader {
                    name: AUTHORIZATION.to_string(),
                })?;
            headers.insert(AUTHORIZATION, value);
        }

        let payload = match body {
            Some(value) => {
                headers.insert(CONTENT_TYPE, HeaderValue::from_static(APPLICATION_JSON));
                Some(serde_json::to_vec(&value).map_err(|source| ApiError::Encode {
                    endpoint: endpoint.clone(),
                    source,
                })?)
            }
            None => None,
        };

        for name in options.headers.keys() {
            if *name == AUTHORIZATION && token.is_some() {
                continue;
            }
            headers.remove(name);
            for value in options.headers.get_all(name) {
                headers.append(name.clone(), value.clone());
            }
        }

        let mut request = self.http.request(method, &url).headers(headers);
        if !options.query.is_empty() {
            request = request.query(&options.query);
        }
        if let Some(payload) = payload {
            request = request.body(payload);
        }

        tracing::debug!(%endpoint, authenticated = token.is_some(), "sending admin API request");
        let response = request.send().await.map_err(|source| ApiError::Transport {
            endpoint: endpoint.clone(),
            source,
        })?;

        let result = self.classify(&endpoint, response).await;
        match &result {
            Ok(_) => tracing::debug!(%endpoint, "admin API request succeeded"),
            Err(e) => tracing::debug!(%endpoint, kind = ?e.kind(), "admin API request failed: {e}"),
        }
        result
    }

    async fn classify(
        &self,
        endpoint: &str,
        response: reqwest::Response,
    ) -> Result<ApiResponse, ApiError> {
        let status = response.status();
        let is_json = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.contains(APPLICATION_JSON));
        let bytes = response.bytes().await.map_err(|source| ApiError::Transport {
            endpoint: endpoint.to_string(),
            source,
        })?;

        if bytes.is_empty() && tolerates_empty_body(status) {
            return Ok(ApiResponse::NoContent { status });
        }

        if status == StatusCode::UNAUTHORIZED {
            if let Some(route) = &self.forbidden_route {
                return Err(ApiError::Unauthorized {
                    endpoint: endpoint.to_string(),
                    redirect_to: route.clone(),
                });
            }
        }

        let parsed = if is_json {
            serde_json::from_slice::<Value>(&bytes).map(ApiResponse::Json)
        } else {
            Ok(ApiResponse::Text(String::from_utf8_lossy(&bytes).into_owned()))
        };

        match parsed {
            Ok(body) if status.is_success() => Ok(body),
            Ok(body) => Err(ApiError::Http {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
                body: error_body(status, body),
            }),
            Err(_) if status == StatusCode::NOT_FOUND => Err(ApiError::Http {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
                body: ErrorBody::Text(status_text(status)),
            }),
            Err(_) if tolerates_empty_body(status) => Ok(ApiResponse::NoContent { status }),
            Err(source) => Err(ApiError::Parse {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
                source,
            }),
        }
    }

    fn same_origin(&self, url: &str) -> bool {
        url::Url::parse(url).is_ok_and(|u| u.origin() == self.base_url.origin())
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }
        format!(
            "{}/{}",
            self.base_url.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

fn endpoint(method: &Method, path: &str) -> String {
    format!("{method} {path}")
}

fn encode<B: Serialize + ?Sized>(method: &Method, path: &str, body: &B) -> Result<Value, ApiError> {
    serde_json::to_value(body).map_err(|source| ApiError::Encode {
        endpoint: endpoint(method, path),
        source,
    })
}

/// Rejection payload for a non-2xx response whose body parsed: the JSON
/// `error` member, or the raw text.
///
/// A 404 without a usable payload (empty body, or JSON lacking a non-null
/// `error` member) carries the status line text instead.
fn error_body(status: StatusCode, body: ApiResponse) -> ErrorBody {
    let unusable = match &body {
        ApiResponse::Json(value) => value.get("error").map_or(true, Value::is_null),
        ApiResponse::Text(text) => text.is_empty(),
        ApiResponse::NoContent { .. } => true,
    };
    if unusable && status == StatusCode::NOT_FOUND {
        return ErrorBody::Text(status_text(status));
    }
    match body {
        ApiResponse::Json(value) => {
            ErrorBody::Json(value.get("error").cloned().unwrap_or(Value::Null))
        }
        ApiResponse::Text(text) => ErrorBody::Text(text),
        ApiResponse::NoContent { .. } => ErrorBody::Text(String::new()),
    }
}

fn tolerates_empty_body(status: StatusCode) -> bool {
    status == StatusCode::CREATED || status == StatusCode::NO_CONTENT
}

fn status_text(status: StatusCode) -> String {
    status
        .canonical_reason()
        .map(str::to_string)
        .unwrap_or_else(|| status.as_str().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::NoToken;

    fn client(base: &str) -> ApiClient {
        let config = ApiConfig::new(base.parse().unwrap());
        ApiClient::new(&config, Arc::new(NoToken)).unwrap()
    }

    #[test]
    fn url_joins_without_double_slash() {
        assert_eq!(client("http://host:1305").url("/api/id"), "http://host:1305/api/id");
        assert_eq!(client("http://host:1305/").url("api/id"), "http://host:1305/api/id");
        assert_eq!(
            client("http://host/admin/").url("/api/id"),
            "http://host/admin/api/id"
        );
    }

    #[test]
    fn absolute_urls_pass_through() {
        assert_eq!(
            client("http://host").url("https://other/x"),
            "https://other/x"
        );
    }

    #[test]
    fn same_origin_compares_scheme_host_and_port() {
        let c = client("http://host:1305/admin/");
        assert!(c.same_origin(&c.url("/api/id")));
        assert!(c.same_origin("http://host:1305/other"));
        assert!(!c.same_origin("https://host:1305/api/id"));
        assert!(!c.same_origin("http://host:8080/api/id"));
        assert!(!c.same_origin("http://evil.example/api/id"));
    }

    #[test]
    fn into_json_variants() {
        let v: Vec<u32> = ApiResponse::Json(serde_json::json!([1, 2]))
            .into_json("GET /x")
            .unwrap();
        assert_eq!(v, vec![1, 2]);

        let t: Vec<u32> = ApiResponse::Text("[3]".into()).into_json("GET /x").unwrap();
        assert_eq!(t, vec![3]);

        let none: Option<u32> = ApiResponse::NoContent {
            status: StatusCode::NO_CONTENT,
        }
        .into_json("GET /x")
        .unwrap();
        assert_eq!(none, None);

        let err = ApiResponse::Text("plain".into())
            .into_json::<Vec<u32>>("GET /x")
            .unwrap_err();
        assert!(matches!(err, ApiError::Decode { .. }));
    }

    #[test]
    fn status_text_uses_reason_phrase() {
        assert_eq!(status_text(StatusCode::NOT_FOUND), "Not Found");
    }
}
