//! Mock Telegram API Server for testing
//!
//! This module provides a mock HTTP server that simulates the Telegram Bot API
//! for testing purposes. It uses wiremock to create configurable mock responses.

use serde_json::{json, Value};
use wiremock::{
    matchers::{method, path},
    Mock, MockServer, ResponseTemplate,
};

/// Mock Telegram API server for testing
pub struct TelegramMockServer {
    pub server: MockServer,
}

/// Configuration for mock responses
#[derive(Debug, Clone)]
pub struct MockResponseConfig {
    pub success: bool,
    pub delay_ms: Option<u64>,
}

impl Default for MockResponseConfig {
    fn default() -> Self {
        Self {
            success: true,
            delay_ms: None,
        }
    }
}

impl TelegramMockServer {
    /// Create a new mock Telegram API server
    pub async fn new() -> Self {
        let server = MockServer::start().await;
        Self { server }
    }

    /// Bot pointed at the mock server
    pub fn bot(&self) -> teloxide::Bot {
        let url = url::Url::parse(&self.server.uri()).expect("mock server uri is a valid url");
        teloxide::Bot::new(test_bot_token()).set_api_url(url)
    }

    /// Setup mock for sendMessage endpoint
    pub async fn mock_send_message(&self, config: MockResponseConfig) {
        let response_body = if config.success {
            json!({
                "ok": true,
                "result": {
                    "message_id": 123,
                    "from": {
                        "id": 12345,
                        "is_bot": true,
                        "first_name": "TestBot",
                        "username": "test_bot"
                    },
                    "chat": {
                        "id": test_chat_id(),
                        "first_name": "Test",
                        "type": "private"
                    },
                    "date": 1640995200,
                    "text": "Test message"
                }
            })
        } else {
            json!({
                "ok": false,
                "error_code": 400,
                "description": "Bad Request: chat not found"
            })
        };

        let mut response = ResponseTemplate::new(if config.success { 200 } else { 400 })
            .set_body_json(response_body);

        if let Some(delay) = config.delay_ms {
            response = response.set_delay(std::time::Duration::from_millis(delay));
        }

        Mock::given(method("POST"))
            .and(path(format!("/bot{}/SendMessage", test_bot_token())))
            .respond_with(response)
            .mount(&self.server)
            .await;
    }

    /// Bodies of every sendMessage request received so far
    pub async fn sent_messages(&self) -> Vec<Value> {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .filter(|req| req.url.path().ends_with("/SendMessage"))
            .filter_map(|req| serde_json::from_slice(&req.body).ok())
            .collect()
    }
}

/// Test bot token
pub fn test_bot_token() -> String {
    "12345:test_token".to_string()
}

/// Test chat ID
pub fn test_chat_id() -> i64 {
    987654321
}
