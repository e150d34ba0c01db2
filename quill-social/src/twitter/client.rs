//! Thin wrapper around the X v2 create-post endpoint.
//!
//! Auth and transport live in `quill-http`; this module shapes the request,
//! decodes the response, and classifies failures. Exactly one attempt is
//! made per call: no retries, no cancellation.

use async_trait::async_trait;
use quill_http::{Auth, HttpClient, HttpError, OAuth1Credentials};

use crate::twitter::credentials::Credentials;
use crate::twitter::error::PostError;
use crate::twitter::types::{ApiFailure, CreateTweetRequest, CreateTweetResponse, PostedTweet};

const API_BASE: &str = "https://api.twitter.com";
const CREATE_TWEET_PATH: &str = "2/tweets";

/// The seam the CLI dispatches through; mocked in tests.
#[async_trait]
pub trait StatusPoster {
    async fn create_post(&self, text: &str) -> Result<PostedTweet, PostError>;
}

pub struct XApi {
    http: HttpClient,
    oauth1: OAuth1Credentials,
    bearer: Option<String>,
}

impl XApi {
    /// Build a client from validated credentials.
    pub fn new(creds: Credentials) -> Result<Self, PostError> {
        let http = HttpClient::new(API_BASE)?;
        Ok(Self {
            http,
            oauth1: OAuth1Credentials {
                consumer_key: creds.app_key,
                consumer_secret: creds.app_secret,
                token: creds.access_token,
                token_secret: creds.access_secret,
            },
            bearer: creds.bearer_token,
        })
    }

    /// App bearer token, when one was supplied. Posting never needs it; it
    /// rides along for app-auth endpoints.
    pub fn bearer_token(&self) -> Option<&str> {
        self.bearer.as_deref()
    }
}

#[async_trait]
impl StatusPoster for XApi {
    async fn create_post(&self, text: &str) -> Result<PostedTweet, PostError> {
        debug_assert!(!text.trim().is_empty(), "dispatched with empty text");

        let request = CreateTweetRequest {
            text: text.to_string(),
        };
        tracing::debug!(chars = text.chars().count(), "twitter.create_post");

        match self
            .http
            .post_json::<_, CreateTweetResponse>(
                CREATE_TWEET_PATH,
                Auth::OAuth1(&self.oauth1),
                &request,
            )
            .await
        {
            Ok(resp) => {
                tracing::debug!(id = %resp.data.id, "twitter.create_post.ok");
                Ok(resp.data)
            }
            Err(HttpError::Status {
                status,
                body,
                request_id,
            }) => Err(match ApiFailure::from_status_body(status.as_u16(), &body) {
                Some(failure) => PostError::Api(failure),
                None => PostError::Other(HttpError::Status {
                    status,
                    body,
                    request_id,
                }),
            }),
            Err(other) => Err(PostError::Other(other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn creds(bearer: Option<&str>) -> Credentials {
        Credentials {
            app_key: "k".into(),
            app_secret: "ks".into(),
            access_token: "t".into(),
            access_secret: "ts".into(),
            bearer_token: bearer.map(str::to_string),
        }
    }

    #[test]
    fn client_keeps_the_optional_bearer_token() {
        let api = XApi::new(creds(Some("app-bearer"))).unwrap();
        assert_eq!(api.bearer_token(), Some("app-bearer"));

        let api = XApi::new(creds(None)).unwrap();
        assert!(api.bearer_token().is_none());
    }
}
