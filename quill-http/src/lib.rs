//! Minimal HTTP client with safe logging and flexible auth.
//!
//! - POST JSON against a base URL with `Auth` (OAuth 1.0a, bearer, none)
//! - Never logs secret values; only the auth kind (oauth1/bearer/none)
//! - One request, one outcome: non-success responses come back as
//!   [`HttpError::Status`] with the raw body intact so callers can decode
//!   the provider's structured error payload themselves
//!
//! OAuth 1.0a signature production is delegated to the `oauth1-request`
//! crate; this module only decides what gets signed (method + URL, no query).
//!
//! Security: `Auth::Bearer` values are sanitized before use, and `tracing`
//! events only ever include the auth kind, not the secret.

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderValue};
use reqwest::{Client, Method, StatusCode, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

// ==============================
// Errors
// ==============================

#[derive(Debug, Error)]
pub enum HttpError {
    #[error("invalid URL: {0}")]
    Url(String),
    #[error("request build failed: {0}")]
    Build(String),
    #[error("network error: {0}")]
    Network(String),
    #[error("decode error: {0}, body_snippet: {1}")]
    Decode(String, String),
    #[error("server returned error {status}: {}, request_id={request_id}", snip_body(.body))]
    Status {
        status: StatusCode,
        /// Raw response body, undigested. Callers decode it.
        body: String,
        request_id: String,
    },
}

// ==============================
// Auth
// ==============================

/// OAuth 1.0a user-context credentials (consumer pair + token pair).
#[derive(Clone)]
pub struct OAuth1Credentials {
    pub consumer_key: String,
    pub consumer_secret: String,
    pub token: String,
    pub token_secret: String,
}

// Deliberately opaque so the secrets never end up in logs via `{:?}`.
impl std::fmt::Debug for OAuth1Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OAuth1Credentials").finish_non_exhaustive()
    }
}

/// Authentication strategies supported by the HTTP client helpers.
#[derive(Clone, Debug)]
pub enum Auth<'a> {
    /// Authorization: OAuth ... (HMAC-SHA1 signed, user context)
    OAuth1(&'a OAuth1Credentials),
    /// Authorization: Bearer <token>
    Bearer(&'a str),
    None,
}

impl Auth<'_> {
    fn kind(&self) -> &'static str {
        match self {
            Auth::OAuth1(_) => "oauth1",
            Auth::Bearer(_) => "bearer",
            Auth::None => "none",
        }
    }
}

// ==============================
// Client
// ==============================

#[derive(Clone)]
pub struct HttpClient {
    base: Url,
    inner: Client,
}

impl HttpClient {
    /// Construct a client anchored to a base URL.
    ///
    /// No request timeout is configured here; timeout behavior is whatever
    /// the transport defaults to.
    pub fn new(base: &str) -> Result<Self, HttpError> {
        let base = Url::parse(base).map_err(|e| HttpError::Url(e.to_string()))?;
        let inner = Client::builder()
            .build()
            .map_err(|e| HttpError::Build(e.to_string()))?;
        Ok(Self { base, inner })
    }

    /// POST a JSON body and decode a JSON response, sending exactly once.
    ///
    /// Success decodes into `T`. A non-success status returns
    /// [`HttpError::Status`] carrying the full response body.
    pub async fn post_json<B, T>(&self, path: &str, auth: Auth<'_>, body: &B) -> Result<T, HttpError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self
            .base
            .join(path)
            .map_err(|e| HttpError::Url(e.to_string()))?;

        // Serialize up front so the exact bytes on the wire are known.
        let body_bytes =
            serde_json::to_vec(body).map_err(|e| HttpError::Build(e.to_string()))?;

        let mut rb = self
            .inner
            .post(url.clone())
            .header(CONTENT_TYPE, "application/json")
            .body(body_bytes);

        if let Some(header) = authorization_header(&url, &auth)? {
            rb = rb.header(AUTHORIZATION, header);
        }

        tracing::debug!(
            method = %Method::POST,
            host_path = %format!("{}{}", url.domain().unwrap_or("-"), url.path()),
            auth_kind = auth.kind(),
            "http.request.start"
        );

        let t0 = std::time::Instant::now();
        let resp = rb.send().await.map_err(|err| {
            let message = err.to_string();
            tracing::warn!(message = %message, "http.network_error.send");
            HttpError::Network(message)
        })?;

        let status = resp.status();
        let headers = resp.headers().clone();
        let bytes = resp.bytes().await.map_err(|err| {
            let message = err.to_string();
            tracing::warn!(message = %message, "http.network_error.body");
            HttpError::Network(message)
        })?;
        let dur_ms = t0.elapsed().as_millis() as u64;

        // Response header diagnostics
        let request_id = headers
            .get("x-request-id")
            .or_else(|| headers.get("x-correlation-id"))
            .and_then(|v| v.to_str().ok())
            .unwrap_or("-");

        let limit = headers
            .get("x-rate-limit-limit")
            .and_then(|v| v.to_str().ok());
        let remain = headers
            .get("x-rate-limit-remaining")
            .and_then(|v| v.to_str().ok());

        tracing::debug!(
            %status,
            duration_ms = dur_ms,
            body_len = bytes.len(),
            x_request_id = %request_id,
            rate_limit.limit = ?limit,
            rate_limit.remaining = ?remain,
            "http.response.headers"
        );

        let snippet = snip_body(&String::from_utf8_lossy(&bytes));

        if status.is_success() {
            // FIXME(content-type): validate content-type before the JSON decode.
            return serde_json::from_slice::<T>(&bytes).map_err(|e| {
                tracing::warn!(
                    serde_err = %e.to_string(),
                    body_snippet = %snippet,
                    "http.response.decode_error"
                );
                HttpError::Decode(e.to_string(), snippet)
            });
        }

        tracing::warn!(
            %status,
            x_request_id = %request_id,
            body_snippet = %snippet,
            "http.error"
        );
        Err(HttpError::Status {
            status,
            body: String::from_utf8_lossy(&bytes).into_owned(),
            request_id: request_id.to_string(),
        })
    }
}

// ==============================
// Helpers
// ==============================

/// Build the Authorization header value for the request, if any.
fn authorization_header(url: &Url, auth: &Auth<'_>) -> Result<Option<HeaderValue>, HttpError> {
    match auth {
        Auth::OAuth1(creds) => {
            let signed = oauth1_signed_header(url, creds);
            let value = HeaderValue::from_str(&signed)
                .map_err(|e| HttpError::Build(format!("invalid Authorization header: {e}")))?;
            Ok(Some(value))
        }
        Auth::Bearer(token) => {
            let token = sanitize_token(token)?;
            let value = HeaderValue::from_str(&format!("Bearer {token}"))
                .map_err(|e| HttpError::Build(format!("invalid Authorization header: {e}")))?;
            Ok(Some(value))
        }
        Auth::None => Ok(None),
    }
}

/// Produce a signed `OAuth ...` header for a POST to `url`.
///
/// The query and fragment are stripped before signing; this client signs
/// bare endpoint URLs only (JSON bodies are not part of the signature).
fn oauth1_signed_header(url: &Url, creds: &OAuth1Credentials) -> String {
    let token = oauth1_request::Token::from_parts(
        creds.consumer_key.as_str(),
        creds.consumer_secret.as_str(),
        creds.token.as_str(),
        creds.token_secret.as_str(),
    );
    let mut endpoint = url.clone();
    endpoint.set_query(None);
    endpoint.set_fragment(None);
    oauth1_request::post(endpoint.as_str(), &(), &token, oauth1_request::HMAC_SHA1)
}

fn snip_body(body: &str) -> String {
    let mut snip = body.to_string();
    if snip.len() > 500 {
        snip.truncate(500);
        snip.push_str("...");
    }
    snip
}

fn sanitize_token(raw: &str) -> Result<String, HttpError> {
    // Trim outer spaces/quotes, then drop all ASCII whitespace. Values pasted
    // into env files routinely pick up both.
    let mut s = raw
        .trim()
        .trim_matches(|c| c == '"' || c == '\'')
        .to_string();
    s.retain(|ch| !ch.is_ascii_whitespace());

    if !s.is_ascii() {
        return Err(HttpError::Build("token contains non-ASCII bytes".into()));
    }
    if s.bytes().any(|b| b < 0x20 || b == 0x7F) {
        return Err(HttpError::Build("token contains control characters".into()));
    }
    Ok(s)
}
