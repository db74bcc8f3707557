//! Wire shapes of the supported chat providers.

use serde_json::{json, Value};

/// Provider-independent parameters of one single-turn chat request.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatParams<'a> {
    pub api_key: &'a str,
    pub prompt: &'a str,
    pub model: &'a str,
    pub max_tokens: u32,
    pub temperature: f64,
}

/// A fully built POST to a provider.
#[derive(Debug, Clone, PartialEq)]
pub struct OutboundRequest {
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Value,
}

impl OutboundRequest {
    #[cfg(test)]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

pub trait Provider: Send + Sync {
    /// Registry key, lowercase.
    fn name(&self) -> &str;
    fn default_model(&self) -> &str;
    fn build_request(&self, params: &ChatParams<'_>) -> OutboundRequest;
    /// Reply text, or an empty string when the provider sent none.
    fn extract_content(&self, raw: &Value) -> String;
}

fn text_at(raw: &Value, pointer: &str) -> String {
    raw.pointer(pointer)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

/// Any provider speaking the OpenAI chat-completions dialect.
pub struct OpenAiCompatible {
    name: &'static str,
    url: &'static str,
    default_model: &'static str,
    extra_headers: &'static [(&'static str, &'static str)],
    /// Sends `top_p: 1` and `stream: false` explicitly.
    fixed_sampling: bool,
}

impl OpenAiCompatible {
    pub fn nvidia() -> Self {
        Self {
            name: "nvidia",
            url: "https://integrate.api.nvidia.com/v1/chat/completions",
            default_model: "meta/llama-3.1-8b-instruct",
            extra_headers: &[],
            fixed_sampling: true,
        }
    }

    pub fn openrouter() -> Self {
        Self {
            name: "openrouter",
            url: "https://openrouter.ai/api/v1/chat/completions",
            default_model: "anthropic/claude-3-haiku:beta",
            extra_headers: &[
                ("HTTP-Referer", "https://monopoly-bookkeeper.pages.dev"),
                ("X-Title", "Monopoly Voice Correction"),
            ],
            fixed_sampling: false,
        }
    }

    pub fn openai() -> Self {
        Self {
            name: "openai",
            url: "https://api.openai.com/v1/chat/completions",
            default_model: "gpt-3.5-turbo",
            extra_headers: &[],
            fixed_sampling: false,
        }
    }
}

impl Provider for OpenAiCompatible {
    fn name(&self) -> &str {
        self.name
    }

    fn default_model(&self) -> &str {
        self.default_model
    }

    fn build_request(&self, params: &ChatParams<'_>) -> OutboundRequest {
        let mut headers = vec![
            (
                "Authorization".to_string(),
                format!("Bearer {}", params.api_key),
            ),
            ("Content-Type".to_string(), "application/json".to_string()),
        ];
        headers.extend(
            self.extra_headers
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string())),
        );

        let mut body = json!({
            "model": params.model,
            "messages": [{ "role": "user", "content": params.prompt }],
            "max_tokens": params.max_tokens,
            "temperature": params.temperature,
        });
        if self.fixed_sampling {
            body["top_p"] = json!(1);
            body["stream"] = json!(false);
        }

        OutboundRequest {
            url: self.url.to_string(),
            headers,
            body,
        }
    }

    fn extract_content(&self, raw: &Value) -> String {
        text_at(raw, "/choices/0/message/content")
    }
}

/// Anthropic's native messages API.
pub struct Anthropic;

const ANTHROPIC_VERSION: &str = "2023-06-01";

impl Provider for Anthropic {
    fn name(&self) -> &str {
        "anthropic"
    }

    fn default_model(&self) -> &str {
        "claude-3-haiku-20240307"
    }

    fn build_request(&self, params: &ChatParams<'_>) -> OutboundRequest {
        OutboundRequest {
            url: "https://api.anthropic.com/v1/messages".to_string(),
            headers: vec![
                ("x-api-key".to_string(), params.api_key.to_string()),
                ("Content-Type".to_string(), "application/json".to_string()),
                (
                    "anthropic-version".to_string(),
                    ANTHROPIC_VERSION.to_string(),
                ),
            ],
            body: json!({
                "model": params.model,
                "max_tokens": params.max_tokens,
                "messages": [{ "role": "user", "content": params.prompt }],
                "temperature": params.temperature,
            }),
        }
    }

    fn extract_content(&self, raw: &Value) -> String {
        text_at(raw, "/content/0/text")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(model: &str) -> ChatParams<'_> {
        ChatParams {
            api_key: "sk-test",
            prompt: "hi",
            model,
            max_tokens: 100,
            temperature: 0.1,
        }
    }

    #[test]
    fn nvidia_fixes_top_p_and_stream() {
        let request = OpenAiCompatible::nvidia().build_request(&params("m"));

        assert_eq!(request.header("authorization"), Some("Bearer sk-test"));
        assert_eq!(request.body["top_p"], 1);
        assert_eq!(request.body["stream"], false);
        assert_eq!(request.body["messages"][0]["role"], "user");
        assert_eq!(request.body["messages"][0]["content"], "hi");
    }

    #[test]
    fn openrouter_identifies_the_app() {
        let request = OpenAiCompatible::openrouter().build_request(&params("m"));

        assert_eq!(
            request.header("HTTP-Referer"),
            Some("https://monopoly-bookkeeper.pages.dev")
        );
        assert_eq!(request.header("X-Title"), Some("Monopoly Voice Correction"));
        assert!(request.body.get("top_p").is_none());
        assert!(request.body.get("stream").is_none());
    }

    #[test]
    fn anthropic_uses_api_key_header_and_version() {
        let request = Anthropic.build_request(&params("claude"));

        assert_eq!(request.url, "https://api.anthropic.com/v1/messages");
        assert_eq!(request.header("x-api-key"), Some("sk-test"));
        assert_eq!(request.header("anthropic-version"), Some("2023-06-01"));
        assert!(request.header("authorization").is_none());
        assert_eq!(request.body["max_tokens"], 100);
        assert_eq!(request.body["model"], "claude");
    }

    #[test]
    fn extracts_content_from_each_shape() {
        let chat = json!({ "choices": [{ "message": { "content": "hello" } }] });
        let messages = json!({ "content": [{ "type": "text", "text": "hey" }] });

        assert_eq!(OpenAiCompatible::openai().extract_content(&chat), "hello");
        assert_eq!(Anthropic.extract_content(&messages), "hey");
        assert_eq!(Anthropic.extract_content(&chat), "");
        assert_eq!(
            OpenAiCompatible::openai().extract_content(&json!({ "choices": [] })),
            ""
        );
    }
}
