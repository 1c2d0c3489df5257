use std::time::Duration;

use futures_util::StreamExt;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use url::Url;
use widget_logging::{chat_debug, chat_info};

use crate::{ChatError, ChatRequest, ChatResponse, FailureKind, RequestId};

const CHAT_PATH: &str = "chat";

#[derive(Debug, Clone)]
pub struct ChatSettings {
    /// Origin serving the `/chat` endpoint.
    pub base_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub max_response_bytes: u64,
}

impl Default for ChatSettings {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:5000".to_string(),
            connect_timeout: Duration::from_secs(10),
            // Generation on the server side can take a while.
            request_timeout: Duration::from_secs(120),
            max_response_bytes: 2 * 1024 * 1024,
        }
    }
}

#[async_trait::async_trait]
pub trait ChatClient: Send + Sync {
    async fn send(&self, request_id: RequestId, request: &ChatRequest)
        -> Result<String, ChatError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestChatClient {
    settings: ChatSettings,
}

impl ReqwestChatClient {
    pub fn new(settings: ChatSettings) -> Self {
        Self { settings }
    }

    /// Resolves `{base_url}/chat`, keeping any path prefix on the base.
    pub fn endpoint(&self) -> Result<Url, ChatError> {
        let mut base = Url::parse(&self.settings.base_url)
            .map_err(|err| ChatError::new(FailureKind::InvalidUrl, err.to_string()))?;
        if base.cannot_be_a_base() {
            return Err(ChatError::new(
                FailureKind::InvalidUrl,
                format!("{} cannot be a base url", self.settings.base_url),
            ));
        }
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        base.join(CHAT_PATH)
            .map_err(|err| ChatError::new(FailureKind::InvalidUrl, err.to_string()))
    }

    fn build_client(&self) -> Result<reqwest::Client, ChatError> {
        reqwest::Client::builder()
            .connect_timeout(self.settings.connect_timeout)
            .timeout(self.settings.request_timeout)
            .build()
            .map_err(|err| ChatError::new(FailureKind::Network, err.to_string()))
    }

    fn too_large(&self, actual: u64) -> ChatError {
        ChatError::new(
            FailureKind::TooLarge {
                max_bytes: self.settings.max_response_bytes,
                actual: Some(actual),
            },
            "response too large",
        )
    }
}

#[async_trait::async_trait]
impl ChatClient for ReqwestChatClient {
    async fn send(
        &self,
        request_id: RequestId,
        request: &ChatRequest,
    ) -> Result<String, ChatError> {
        let url = self.endpoint()?;
        let body = serde_json::to_vec(request)
            .map_err(|err| ChatError::new(FailureKind::Encoding, err.to_string()))?;
        let client = self.build_client()?;

        chat_info!(
            "POST {} request_id={} history_len={} docs_len={} body_len={}",
            url,
            request_id,
            request.history.len(),
            request.client_docs_text.len(),
            body.len()
        );

        let response = client
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .body(body)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ChatError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        if let Some(content_len) = response.content_length() {
            if content_len > self.settings.max_response_bytes {
                return Err(self.too_large(content_len));
            }
        }

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = bytes.len() as u64 + chunk.len() as u64;
            if next_len > self.settings.max_response_bytes {
                return Err(self.too_large(next_len));
            }
            bytes.extend_from_slice(&chunk);
        }

        let parsed: ChatResponse = serde_json::from_slice(&bytes)
            .map_err(|err| ChatError::new(FailureKind::MalformedResponse, err.to_string()))?;
        chat_debug!(
            "request_id={} answered with {} bytes",
            request_id,
            parsed.response.len()
        );
        Ok(parsed.response)
    }
}

fn map_reqwest_error(err: reqwest::Error) -> ChatError {
    if err.is_timeout() {
        return ChatError::new(FailureKind::Timeout, err.to_string());
    }
    ChatError::new(FailureKind::Network, err.to_string())
}
