//! Stateless proxy that turns one abstract chat request into a call to a
//! concrete provider and reduces the reply to `{content, provider, usage}`.

pub mod error;
pub mod provider;
pub mod registry;
pub mod transport;

use std::sync::Arc;

use log::{debug, error};
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub use error::LlmError;
pub use provider::ChatParams;
pub use registry::ProviderRegistry;
pub use transport::{ReqwestTransport, Transport, UpstreamReply};

pub const DEFAULT_MAX_TOKENS: u32 = 100;
pub const DEFAULT_TEMPERATURE: f64 = 0.1;

/// Incoming request body. Everything is optional on the wire so missing
/// fields surface as [`LlmError::MissingFields`] rather than a parse error.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LlmRequest {
    pub provider: Option<String>,
    #[serde(rename = "apiKey")]
    pub api_key: Option<String>,
    pub prompt: Option<String>,
    pub model: Option<String>,
    pub max_tokens: Option<u32>,
    pub temperature: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LlmResponse {
    pub content: String,
    pub provider: String,
    pub usage: Value,
}

fn present(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.is_empty())
}

pub struct Normalizer {
    registry: ProviderRegistry,
    transport: Arc<dyn Transport>,
}

impl Normalizer {
    pub fn new(registry: ProviderRegistry, transport: Arc<dyn Transport>) -> Self {
        Self {
            registry,
            transport,
        }
    }

    pub async fn normalize(&self, request: LlmRequest) -> Result<LlmResponse, LlmError> {
        let (Some(provider_name), Some(api_key), Some(prompt)) = (
            present(&request.provider),
            present(&request.api_key),
            present(&request.prompt),
        ) else {
            return Err(LlmError::MissingFields);
        };

        let provider = self
            .registry
            .get(provider_name)
            .ok_or_else(|| LlmError::UnsupportedProvider(provider_name.to_string()))?;

        let params = ChatParams {
            api_key,
            prompt,
            model: present(&request.model).unwrap_or(provider.default_model()),
            max_tokens: request.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS),
            temperature: request.temperature.unwrap_or(DEFAULT_TEMPERATURE),
        };
        let outbound = provider.build_request(&params);
        debug!("Forwarding prompt to {} ({})", provider.name(), params.model);

        let reply = self
            .transport
            .send(outbound)
            .await
            .map_err(|e| LlmError::Internal(e.to_string()))?;

        if !reply.is_success() {
            error!(
                "LLM API error for {}: {} {}",
                provider_name, reply.status, reply.body
            );
            return Err(LlmError::Upstream {
                provider: provider_name.to_string(),
                status: reply.status,
                body: reply.body,
            });
        }

        let raw: Value = serde_json::from_str(&reply.body)?;
        let usage = match raw.get("usage") {
            Some(Value::Null) | None => Value::Null,
            Some(usage) => usage.clone(),
        };

        Ok(LlmResponse {
            content: provider.extract_content(&raw),
            provider: provider_name.to_string(),
            usage,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use super::transport::{MockTransport, TransportError};

    fn request(provider: &str) -> LlmRequest {
        LlmRequest {
            provider: Some(provider.to_string()),
            api_key: Some("x".to_string()),
            prompt: Some("hi".to_string()),
            ..LlmRequest::default()
        }
    }

    fn normalizer(transport: MockTransport) -> Normalizer {
        Normalizer::new(ProviderRegistry::default(), Arc::new(transport))
    }

    fn reply(status: u16, body: Value) -> UpstreamReply {
        UpstreamReply {
            status,
            body: body.to_string(),
        }
    }

    #[actix_web::test]
    async fn openai_defaults_and_choices_content() {
        let mut transport = MockTransport::new();
        transport
            .expect_send()
            .withf(|req| {
                req.url == "https://api.openai.com/v1/chat/completions"
                    && req.body["model"] == "gpt-3.5-turbo"
                    && req.body["max_tokens"] == 100
                    && req.body["temperature"] == 0.1
                    && req.header("Authorization") == Some("Bearer x")
            })
            .times(1)
            .returning(|_| {
                Ok(reply(
                    200,
                    json!({
                        "choices": [{ "message": { "content": "hello" } }],
                        "usage": { "total_tokens": 7 }
                    }),
                ))
            });

        let response = normalizer(transport)
            .normalize(request("openai"))
            .await
            .unwrap();

        assert_eq!(response.content, "hello");
        assert_eq!(response.provider, "openai");
        assert_eq!(response.usage, json!({ "total_tokens": 7 }));
    }

    #[actix_web::test]
    async fn anthropic_reads_content_text() {
        let mut transport = MockTransport::new();
        transport
            .expect_send()
            .withf(|req| req.body["model"] == "claude-3-haiku-20240307")
            .times(1)
            .returning(|_| Ok(reply(200, json!({ "content": [{ "text": "bonjour" }] }))));

        let response = normalizer(transport)
            .normalize(request("anthropic"))
            .await
            .unwrap();

        assert_eq!(response.content, "bonjour");
        assert_eq!(response.usage, Value::Null);
    }

    #[actix_web::test]
    async fn provider_match_ignores_case_and_echoes_input() {
        let mut transport = MockTransport::new();
        transport
            .expect_send()
            .withf(|req| req.url.starts_with("https://api.anthropic.com"))
            .times(1)
            .returning(|_| Ok(reply(200, json!({ "content": [{ "text": "ok" }] }))));

        let response = normalizer(transport)
            .normalize(request("Anthropic"))
            .await
            .unwrap();

        assert_eq!(response.content, "ok");
        assert_eq!(response.provider, "Anthropic");
    }

    #[actix_web::test]
    async fn explicit_model_and_sampling_are_forwarded() {
        let mut transport = MockTransport::new();
        transport
            .expect_send()
            .withf(|req| {
                req.body["model"] == "meta/llama-3.1-70b-instruct"
                    && req.body["max_tokens"] == 256
                    && req.body["temperature"] == 0.7
                    && req.body["top_p"] == 1
            })
            .times(1)
            .returning(|_| Ok(reply(200, json!({ "choices": [] }))));

        let mut req = request("nvidia");
        req.model = Some("meta/llama-3.1-70b-instruct".to_string());
        req.max_tokens = Some(256);
        req.temperature = Some(0.7);
        let response = normalizer(transport).normalize(req).await.unwrap();

        assert_eq!(response.content, "");
    }

    #[actix_web::test]
    async fn unknown_provider_makes_no_call() {
        let mut transport = MockTransport::new();
        transport.expect_send().never();

        let err = normalizer(transport)
            .normalize(request("unknown"))
            .await
            .unwrap_err();

        assert!(matches!(err, LlmError::UnsupportedProvider(ref p) if p == "unknown"));
    }

    #[actix_web::test]
    async fn missing_fields_make_no_call() {
        let mut transport = MockTransport::new();
        transport.expect_send().never();
        let normalizer = normalizer(transport);

        let mut no_key = request("openai");
        no_key.api_key = None;
        let mut empty_prompt = request("openai");
        empty_prompt.prompt = Some(String::new());

        for req in [no_key, empty_prompt, LlmRequest::default()] {
            let err = normalizer.normalize(req).await.unwrap_err();
            assert!(matches!(err, LlmError::MissingFields));
        }
    }

    #[actix_web::test]
    async fn upstream_failure_is_passed_through() {
        let mut transport = MockTransport::new();
        transport.expect_send().times(1).returning(|_| {
            Ok(UpstreamReply {
                status: 401,
                body: "invalid key".to_string(),
            })
        });

        let err = normalizer(transport)
            .normalize(request("openrouter"))
            .await
            .unwrap_err();

        match err {
            LlmError::Upstream {
                provider,
                status,
                body,
            } => {
                assert_eq!(provider, "openrouter");
                assert_eq!(status, 401);
                assert_eq!(body, "invalid key");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[actix_web::test]
    async fn network_and_decode_failures_are_internal() {
        let mut transport = MockTransport::new();
        transport
            .expect_send()
            .times(1)
            .returning(|_| Err(TransportError("connection refused".to_string())));
        let err = normalizer(transport)
            .normalize(request("openai"))
            .await
            .unwrap_err();
        assert!(matches!(err, LlmError::Internal(ref m) if m == "connection refused"));

        let mut transport = MockTransport::new();
        transport.expect_send().times(1).returning(|_| {
            Ok(UpstreamReply {
                status: 200,
                body: "<html>".to_string(),
            })
        });
        let err = normalizer(transport)
            .normalize(request("openai"))
            .await
            .unwrap_err();
        assert!(matches!(err, LlmError::Internal(_)));
    }
}
