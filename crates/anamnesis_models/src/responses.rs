//! OpenAI Responses API client with corpus retrieval.

use crate::{
    OPENAI_API_BASE,
    dto::{ResponsesInputItem, ResponsesRequest, ResponsesResponse, ResponsesTool},
};
use anamnesis_core::{GenerateRequest, GenerateResponse};
use anamnesis_error::{AnamnesisResult, ModelsError, ModelsErrorKind};
use anamnesis_interface::NoteDriver;
use reqwest::Client;
use tracing::{debug, error, instrument};

/// OpenAI Responses API client.
///
/// When constructed with a vector-store id, every request attaches the
/// `file_search` tool over that store — the fixed reference corpus used to
/// ground summaries and answers. The corpus is read-only to this system.
#[derive(Debug, Clone)]
pub struct ResponsesClient {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
    vector_store_id: Option<String>,
}

impl ResponsesClient {
    /// Creates a new Responses client against the public OpenAI API.
    ///
    /// # Arguments
    ///
    /// * `api_key` - OpenAI API key
    /// * `model` - Model identifier (e.g. "gpt-4o-mini")
    /// * `vector_store_id` - Reference corpus to search, if any
    pub fn new(
        api_key: impl Into<String>,
        model: impl Into<String>,
        vector_store_id: Option<String>,
    ) -> Self {
        Self::with_base_url(api_key, model, vector_store_id, OPENAI_API_BASE)
    }

    /// Creates a client against an alternate base URL (proxies, test
    /// servers).
    pub fn with_base_url(
        api_key: impl Into<String>,
        model: impl Into<String>,
        vector_store_id: Option<String>,
        base_url: impl Into<String>,
    ) -> Self {
        debug!("Creating new Responses client");
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: model.into(),
            vector_store_id,
        }
    }

    /// Converts a generation request to the Responses wire format.
    fn convert_request(&self, request: &GenerateRequest) -> Result<ResponsesRequest, ModelsError> {
        if request.messages.is_empty() {
            return Err(ModelsError::new(ModelsErrorKind::RequestConversion(
                "Request must contain at least one message".to_string(),
            )));
        }

        let input = request
            .messages
            .iter()
            .map(|turn| ResponsesInputItem {
                role: turn.role.to_string(),
                content: turn.content.clone(),
            })
            .collect();

        let tools = self.vector_store_id.as_ref().map(|store| {
            vec![ResponsesTool {
                tool_type: "file_search".to_string(),
                vector_store_ids: vec![store.clone()],
            }]
        });

        Ok(ResponsesRequest {
            model: request.model.clone().unwrap_or_else(|| self.model.clone()),
            input,
            tools,
            max_output_tokens: request.max_output_tokens,
            temperature: request.temperature,
        })
    }

    /// Sends a request to the Responses API.
    #[instrument(skip(self, request), fields(model = %request.model))]
    async fn send(&self, request: &ResponsesRequest) -> Result<ResponsesResponse, ModelsError> {
        let url = format!("{}/responses", self.base_url);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .header("content-type", "application/json")
            .json(request)
            .send()
            .await
            .map_err(|e| {
                error!(error = ?e, "Failed to send request to Responses API");
                ModelsError::new(ModelsErrorKind::Http(format!("Request failed: {}", e)))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %body, "Responses API returned error");
            return Err(ModelsError::new(ModelsErrorKind::Api {
                status: status.as_u16(),
                message: body,
            }));
        }

        let parsed: ResponsesResponse = response.json().await.map_err(|e| {
            error!(error = ?e, "Failed to parse Responses API response");
            ModelsError::new(ModelsErrorKind::Parse(e.to_string()))
        })?;

        debug!(response_id = %parsed.id, "Received response from Responses API");
        Ok(parsed)
    }
}

#[async_trait::async_trait]
impl NoteDriver for ResponsesClient {
    #[instrument(skip(self, req), fields(provider = "openai", model = %self.model))]
    async fn generate(&self, req: &GenerateRequest) -> AnamnesisResult<GenerateResponse> {
        let wire_request = self.convert_request(req)?;
        let wire_response = self.send(&wire_request).await?;

        Ok(GenerateResponse {
            text: wire_response.output_text(),
        })
    }

    fn provider_name(&self) -> &'static str {
        "openai"
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anamnesis_core::{ChatTurn, Role};

    fn request() -> GenerateRequest {
        GenerateRequest::builder()
            .messages(vec![
                ChatTurn::new(Role::System, "You are assisting a therapist."),
                ChatTurn::new(Role::User, "Summarize."),
            ])
            .build()
            .unwrap()
    }

    #[test]
    fn conversion_attaches_file_search_when_corpus_configured() {
        let client = ResponsesClient::new("key", "gpt-4o-mini", Some("vs_corpus".to_string()));
        let wire = client.convert_request(&request()).unwrap();

        let tools = wire.tools.unwrap();
        assert_eq!(tools.len(), 1);
        assert_eq!(tools[0].tool_type, "file_search");
        assert_eq!(tools[0].vector_store_ids, vec!["vs_corpus".to_string()]);
    }

    #[test]
    fn conversion_omits_tools_without_corpus() {
        let client = ResponsesClient::new("key", "gpt-4o-mini", None);
        let wire = client.convert_request(&request()).unwrap();
        assert!(wire.tools.is_none());
        assert_eq!(wire.input.len(), 2);
        assert_eq!(wire.input[0].role, "system");
    }

    #[test]
    fn conversion_rejects_empty_requests() {
        let client = ResponsesClient::new("key", "gpt-4o-mini", None);
        let empty = GenerateRequest::default();
        assert!(client.convert_request(&empty).is_err());
    }
}
