//! Question-answering client for the `/ask-ai` endpoint.
//!
//! The session controller talks to the remote assistant through the
//! [`QaBackend`] capability so tests can substitute a scripted fake. The
//! production implementation posts `{"message": ...}` and distinguishes an
//! application-level refusal (server reachable, non-2xx, optional fallback
//! text) from a transport failure (no usable response at all).

use crate::error::{MitraError, MitraResult};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Outbound request body. Also derives `Deserialize` so the gateway can
/// extract the same shape it is asked with.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AskRequest {
    pub message: String,
}

/// Response body; `answer` is optional so the failure path can reuse it as a
/// user-facing fallback message.
#[derive(Debug, Clone, Deserialize)]
pub struct AskReply {
    pub answer: Option<String>,
}

/// What a completed request produced.
#[derive(Debug, Clone, PartialEq)]
pub enum AskOutcome {
    /// 2xx with an answer.
    Answered { answer: String },
    /// Non-2xx; the server may have supplied a displayable fallback.
    Refused { fallback: Option<String> },
}

/// The remote question-answering capability.
#[async_trait]
pub trait QaBackend: Send + Sync {
    /// One outbound request per call. `Err` means transport failure:
    /// unreachable server, malformed body, or JSON that does not parse.
    async fn ask(&self, question: &str) -> MitraResult<AskOutcome>;
}

/// reqwest-backed [`QaBackend`] against the gateway.
pub struct HttpQaClient {
    base_url: String,
    client: reqwest::Client,
}

impl HttpQaClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_timeout(base_url, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        let base: String = base_url.into();
        Self {
            base_url: base.trim_end_matches('/').to_string(),
            client,
        }
    }
}

#[async_trait]
impl QaBackend for HttpQaClient {
    async fn ask(&self, question: &str) -> MitraResult<AskOutcome> {
        let url = format!("{}/ask-ai", self.base_url);
        let body = AskRequest {
            message: question.to_string(),
        };
        let res = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| MitraError::Transport(e.to_string()))?;

        if !res.status().is_success() {
            let fallback = res.json::<AskReply>().await.ok().and_then(|r| r.answer);
            return Ok(AskOutcome::Refused { fallback });
        }

        let reply: AskReply = res
            .json()
            .await
            .map_err(|e| MitraError::Malformed(e.to_string()))?;
        match reply.answer {
            Some(answer) => Ok(AskOutcome::Answered { answer }),
            None => Err(MitraError::Malformed(
                "response body is missing the answer field".to_string(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_body_serializes_to_message_field() {
        let body = AskRequest {
            message: "गेहूं कब बोएं?".to_string(),
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json, serde_json::json!({ "message": "गेहूं कब बोएं?" }));
    }

    #[test]
    fn reply_tolerates_missing_answer() {
        let reply: AskReply = serde_json::from_str("{}").unwrap();
        assert!(reply.answer.is_none());

        let reply: AskReply = serde_json::from_str(r#"{"answer":"हाँ"}"#).unwrap();
        assert_eq!(reply.answer.as_deref(), Some("हाँ"));
    }

    #[test]
    fn base_url_trailing_slash_is_normalized() {
        let client = HttpQaClient::new("http://127.0.0.1:8000/");
        assert_eq!(client.base_url, "http://127.0.0.1:8000");
    }
}
