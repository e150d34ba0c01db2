use serde::{Deserialize, Serialize};

/// Body of `POST /2/tweets`. Text-only; media and threading are out of scope.
#[derive(Debug, Clone, Serialize)]
pub struct CreateTweetRequest {
    pub text: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateTweetResponse {
    pub data: PostedTweet,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PostedTweet {
    pub id: String,
    pub text: String,
}

impl PostedTweet {
    /// Canonical status URL for the created post.
    pub fn url(&self) -> String {
        format!("https://x.com/i/web/status/{}", self.id)
    }
}

/// Structured failure payload (problem+json style) returned by the v2 API.
///
/// Every field is optional on the wire; `status` falls back to the HTTP
/// status line when the body omits it.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiFailure {
    #[serde(default)]
    pub status: Option<u16>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub detail: Option<String>,
    #[serde(default)]
    pub errors: Option<Vec<serde_json::Value>>,
}

impl ApiFailure {
    /// Decode a non-success response body, if it carries anything structured.
    ///
    /// Returns `None` for bodies that are not JSON or decode to an empty
    /// shell; callers fall back to the generic error path in that case.
    pub fn from_status_body(http_status: u16, body: &str) -> Option<Self> {
        let mut failure: ApiFailure = serde_json::from_str(body).ok()?;
        if failure.title.is_none() && failure.detail.is_none() && failure.errors.is_none() {
            return None;
        }
        failure.status.get_or_insert(http_status);
        Some(failure)
    }
}

impl std::fmt::Display for ApiFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut lines: Vec<String> = Vec::new();
        if let Some(status) = self.status {
            lines.push(format!("Status: {status}"));
        }
        if let Some(title) = &self.title {
            lines.push(format!("Title: {title}"));
        }
        if let Some(detail) = &self.detail {
            lines.push(format!("Detail: {detail}"));
        }
        if let Some(errors) = &self.errors {
            if !errors.is_empty() {
                let rendered =
                    serde_json::to_string_pretty(errors).unwrap_or_else(|_| "[]".to_string());
                lines.push(format!("Errors: {rendered}"));
            }
        }
        f.write_str(&lines.join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn posted_tweet_url_embeds_id() {
        let tweet = PostedTweet {
            id: "12345".into(),
            text: "hello".into(),
        };
        assert_eq!(tweet.url(), "https://x.com/i/web/status/12345");
    }

    #[test]
    fn create_response_decodes() {
        let body = r#"{"data":{"id":"190","text":"hi","edit_history_tweet_ids":["190"]}}"#;
        let resp: CreateTweetResponse = serde_json::from_str(body).unwrap();
        assert_eq!(resp.data.id, "190");
        assert_eq!(resp.data.text, "hi");
    }

    #[test]
    fn failure_decodes_problem_json() {
        let body = r#"{"status":403,"title":"Forbidden","detail":"duplicate content","type":"about:blank"}"#;
        let failure = ApiFailure::from_status_body(403, body).unwrap();
        assert_eq!(failure.status, Some(403));
        assert_eq!(failure.title.as_deref(), Some("Forbidden"));
        assert_eq!(failure.detail.as_deref(), Some("duplicate content"));
    }

    #[test]
    fn failure_status_falls_back_to_http_status() {
        let body = r#"{"title":"Too Many Requests"}"#;
        let failure = ApiFailure::from_status_body(429, body).unwrap();
        assert_eq!(failure.status, Some(429));
    }

    #[test]
    fn unstructured_bodies_are_rejected() {
        assert!(ApiFailure::from_status_body(500, "<html>nope</html>").is_none());
        assert!(ApiFailure::from_status_body(500, "{}").is_none());
    }

    #[test]
    fn display_lists_all_fields() {
        let body = r#"{"status":403,"title":"Forbidden","detail":"duplicate content","errors":[{"message":"dup"}]}"#;
        let failure = ApiFailure::from_status_body(403, body).unwrap();
        let shown = failure.to_string();
        assert!(shown.starts_with("Status: 403\nTitle: Forbidden\nDetail: duplicate content"));
        assert!(shown.contains("Errors:"));
        assert!(shown.contains("\"message\": \"dup\""));
    }
}
