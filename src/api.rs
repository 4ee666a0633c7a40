use crate::config::get_config;
use crate::constants::SENDER_USER;
use crate::errors::{FinchatError, FinchatResult};
use crate::logging::{log_api_call, ApiCallLog};
use chrono::Utc;
use reqwest::Client;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SearchRequest<'a> {
    sender: &'static str,
    bot_id: &'a str,
    user_id: &'a str,
    message: &'a str,
    limit: u32,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    message: String,
    #[serde(default)]
    metadata: ResponseMetadata,
}

#[derive(Debug, Deserialize, Default)]
struct ResponseMetadata {
    #[serde(default)]
    matches: Vec<Match>,
}

#[derive(Debug, Deserialize)]
struct Match {
    text: String,
}

/// What the chat screen gets back from one exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatReply {
    pub text: String,
    pub metadata: Vec<String>,
}

/// Single-call JSON wrapper around the remote chat/search endpoint. One POST
/// per user submission; no retries, no backoff, no request timeout.
#[derive(Debug, Clone)]
pub struct TransportClient {
    client: Client,
    api_url: String,
    bot_id: String,
    user_id: String,
    limit: u32,
}

impl TransportClient {
    pub fn new(api_url: String, bot_id: String, user_id: String, limit: u32) -> Self {
        TransportClient {
            client: Client::new(),
            api_url,
            bot_id,
            user_id,
            limit,
        }
    }

    pub fn from_config() -> Self {
        let config = get_config();
        TransportClient::new(
            config.api_url,
            config.bot_id,
            config.user_id,
            config.response_limit,
        )
    }

    /// Sends one user message and parses the reply. The first metadata match
    /// duplicates the primary text, so it is dropped from the returned list.
    pub async fn send(&self, user_text: &str) -> FinchatResult<ChatReply> {
        let payload = SearchRequest {
            sender: SENDER_USER,
            bot_id: &self.bot_id,
            user_id: &self.user_id,
            message: user_text,
            limit: self.limit,
        };

        let start_time = std::time::Instant::now();

        let response = self
            .client
            .post(&self.api_url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| FinchatError::request_error(format!("Failed to send request: {}", e)))?;

        let status = response.status();

        log_api_call(&ApiCallLog {
            timestamp: Utc::now(),
            endpoint: self.api_url.clone(),
            request_summary: "chat_search".to_string(),
            response_status: status.as_u16(),
            response_time_ms: start_time.elapsed().as_millis(),
        });

        if !status.is_success() {
            return Err(FinchatError::request_error(format!(
                "API returned error status: {}",
                status
            )));
        }

        let body: SearchResponse = response
            .json()
            .await
            .map_err(|e| FinchatError::request_error(format!("Failed to parse response: {}", e)))?;

        let metadata = body
            .metadata
            .matches
            .into_iter()
            .skip(1)
            .map(|m| m.text)
            .collect();

        Ok(ChatReply {
            text: body.message,
            metadata,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_client(uri: &str) -> TransportClient {
        TransportClient::new(
            format!("{}/api/v1/chat/search", uri),
            "test-bot".to_string(),
            "test-user".to_string(),
            3,
        )
    }

    #[tokio::test]
    async fn send_parses_message_and_drops_the_first_match() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/v1/chat/search"))
            .and(header("content-type", "application/json"))
            .and(body_partial_json(json!({
                "sender": "USER",
                "botId": "test-bot",
                "userId": "test-user",
                "message": "hello",
                "limit": 3,
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "message": "hi there",
                "metadata": {
                    "matches": [
                        {"text": "hi there"},
                        {"text": "fact A"},
                        {"text": "fact B"},
                    ]
                }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let reply = test_client(&server.uri()).send("hello").await.unwrap();
        assert_eq!(reply.text, "hi there");
        assert_eq!(reply.metadata, vec!["fact A".to_string(), "fact B".to_string()]);
    }

    #[tokio::test]
    async fn send_with_missing_metadata_yields_an_empty_list() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/v1/chat/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "message": "just text"
            })))
            .mount(&server)
            .await;

        let reply = test_client(&server.uri()).send("anything").await.unwrap();
        assert_eq!(reply.text, "just text");
        assert!(reply.metadata.is_empty());
    }

    #[tokio::test]
    async fn non_success_status_is_a_request_failure() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/v1/chat/search"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let err = test_client(&server.uri()).send("hello").await.unwrap_err();
        assert!(matches!(err, FinchatError::RequestFailed(_)));
    }

    #[tokio::test]
    async fn malformed_body_is_a_request_failure() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/v1/chat/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "unexpected": true
            })))
            .mount(&server)
            .await;

        let err = test_client(&server.uri()).send("hello").await.unwrap_err();
        assert!(matches!(err, FinchatError::RequestFailed(_)));
    }

    #[tokio::test]
    async fn connection_error_is_a_request_failure() {
        // Nothing listens here.
        let client = TransportClient::new(
            "http://127.0.0.1:1/api/v1/chat/search".to_string(),
            "test-bot".to_string(),
            "test-user".to_string(),
            3,
        );
        let err = client.send("hello").await.unwrap_err();
        assert!(matches!(err, FinchatError::RequestFailed(_)));
    }
}
