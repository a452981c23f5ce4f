//! OpenAI-compatible chat-completions client.

use async_trait::async_trait;
use reqwest::{header, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::error::LlmError;
use crate::message::{AssistantTurn, ChatMessage, ToolCall};
use crate::provider::LlmProvider;
use crate::settings::LlmSettings;
use crate::tool::ToolSchema;

const HTTP_TIMEOUT_SECS: u64 = 60;

pub struct OpenAiProvider {
    http: reqwest::Client,
    settings: LlmSettings,
}

impl OpenAiProvider {
    pub fn new(settings: LlmSettings) -> Result<Self, LlmError> {
        let api_key = settings.api_key.as_deref().ok_or(LlmError::MissingApiKey)?;

        let mut headers = header::HeaderMap::new();
        let mut auth = header::HeaderValue::from_str(&format!("Bearer {api_key}"))
            .map_err(|_| LlmError::Transport("API key contains invalid header bytes".to_string()))?;
        auth.set_sensitive(true);
        headers.insert(header::AUTHORIZATION, auth);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(std::time::Duration::from_secs(HTTP_TIMEOUT_SECS))
            .build()
            .map_err(|e| LlmError::Transport(e.to_string()))?;

        Ok(Self { http, settings })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/chat/completions",
            self.settings.base_url.trim_end_matches('/')
        )
    }
}

#[async_trait]
impl LlmProvider for OpenAiProvider {
    async fn complete(
        &self,
        messages: &[ChatMessage],
        tools: Option<&[ToolSchema]>,
    ) -> Result<AssistantTurn, LlmError> {
        let request = WireRequest {
            model: &self.settings.model,
            messages: to_wire_messages(messages),
            tools: tools.map(to_wire_tools),
            tool_choice: tools.map(|_| "auto"),
        };

        let response = self
            .http
            .post(self.endpoint())
            .json(&request)
            .send()
            .await
            .map_err(|e| LlmError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            debug!(target: "concierge_llm::openai", %status, body, "chat completion failed");
            if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
                return Err(LlmError::Auth(body));
            }
            return Err(LlmError::Api {
                status: status.as_u16(),
                detail: body,
            });
        }

        let parsed: WireResponse = response
            .json()
            .await
            .map_err(|e| LlmError::Parse(e.to_string()))?;
        let choice = parsed
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| LlmError::Parse("no choices in response".to_string()))?;

        Ok(into_turn(choice.message))
    }
}

fn to_wire_messages(messages: &[ChatMessage]) -> Vec<WireMessage> {
    messages
        .iter()
        .map(|message| match message {
            ChatMessage::User { content } => WireMessage::User {
                content: content.clone(),
            },
            ChatMessage::Assistant {
                content,
                tool_calls,
            } => WireMessage::Assistant {
                content: content.clone(),
                tool_calls: if tool_calls.is_empty() {
                    None
                } else {
                    Some(tool_calls.iter().map(to_wire_tool_call).collect())
                },
            },
            ChatMessage::Tool {
                tool_call_id,
                name,
                content,
            } => WireMessage::Tool {
                content: content.clone(),
                tool_call_id: tool_call_id.clone(),
                name: name.clone(),
            },
        })
        .collect()
}

fn to_wire_tool_call(call: &ToolCall) -> WireToolCall {
    WireToolCall {
        id: call.id.clone(),
        kind: "function".to_string(),
        function: WireFunctionCall {
            name: call.name.clone(),
            arguments: call.arguments.clone(),
        },
    }
}

fn to_wire_tools(tools: &[ToolSchema]) -> Vec<WireTool> {
    tools
        .iter()
        .map(|tool| WireTool {
            kind: "function",
            function: WireFunction {
                name: tool.name.clone(),
                description: tool.description.clone(),
                parameters: tool.parameters_json(),
            },
        })
        .collect()
}

/// Tool call arguments stay a raw string here: they are untrusted model
/// output, and the coercion layer owns parsing them.
fn into_turn(message: WireResponseMessage) -> AssistantTurn {
    let tool_calls = message
        .tool_calls
        .unwrap_or_default()
        .into_iter()
        .map(|tc| ToolCall {
            id: tc.id,
            name: tc.function.name,
            arguments: tc.function.arguments,
        })
        .collect();
    AssistantTurn {
        content: message.content,
        tool_calls,
    }
}

#[derive(Serialize)]
struct WireRequest<'a> {
    model: &'a str,
    messages: Vec<WireMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tools: Option<Vec<WireTool>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_choice: Option<&'static str>,
}

#[derive(Serialize)]
#[serde(tag = "role", rename_all = "lowercase")]
enum WireMessage {
    User {
        content: String,
    },
    Assistant {
        content: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        tool_calls: Option<Vec<WireToolCall>>,
    },
    Tool {
        content: String,
        tool_call_id: String,
        name: String,
    },
}

#[derive(Serialize)]
struct WireTool {
    #[serde(rename = "type")]
    kind: &'static str,
    function: WireFunction,
}

#[derive(Serialize)]
struct WireFunction {
    name: String,
    description: String,
    parameters: Value,
}

#[derive(Serialize, Deserialize)]
struct WireToolCall {
    id: String,
    #[serde(rename = "type")]
    kind: String,
    function: WireFunctionCall,
}

#[derive(Serialize, Deserialize)]
struct WireFunctionCall {
    name: String,
    arguments: String,
}

#[derive(Deserialize)]
struct WireResponse {
    choices: Vec<WireChoice>,
}

#[derive(Deserialize)]
struct WireChoice {
    message: WireResponseMessage,
}

#[derive(Deserialize)]
struct WireResponseMessage {
    content: Option<String>,
    tool_calls: Option<Vec<WireToolCall>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tool::{ParamSpec, ParamType};

    #[test]
    fn request_serializes_roles_and_tool_results() {
        let turn = AssistantTurn {
            content: None,
            tool_calls: vec![ToolCall::new(
                "call_1",
                "get_current_weather",
                r#"{"location":"Tokyo"}"#,
            )],
        };
        let messages = vec![
            ChatMessage::user("What's the weather in Tokyo?"),
            ChatMessage::from_turn(&turn),
            ChatMessage::tool("call_1", "get_current_weather", "Sunny, 21°C"),
        ];

        let wire = to_wire_messages(&messages);
        let json = serde_json::to_value(&wire).unwrap();

        assert_eq!(json[0]["role"], "user");
        assert_eq!(json[1]["role"], "assistant");
        assert_eq!(json[1]["tool_calls"][0]["id"], "call_1");
        assert_eq!(json[1]["tool_calls"][0]["type"], "function");
        assert_eq!(
            json[1]["tool_calls"][0]["function"]["arguments"],
            r#"{"location":"Tokyo"}"#
        );
        assert_eq!(json[2]["role"], "tool");
        assert_eq!(json[2]["tool_call_id"], "call_1");
        assert_eq!(json[2]["content"], "Sunny, 21°C");
    }

    #[test]
    fn assistant_without_calls_omits_tool_calls_field() {
        let wire = to_wire_messages(&[ChatMessage::Assistant {
            content: Some("hello".to_string()),
            tool_calls: Vec::new(),
        }]);
        let json = serde_json::to_value(&wire).unwrap();
        assert!(json[0].get("tool_calls").is_none());
    }

    #[test]
    fn tools_render_as_function_declarations() {
        let schema = ToolSchema::new("generate_random_password", "Generates a password.").param(
            ParamSpec::required("length", ParamType::Integer, "Desired length (8-128)."),
        );

        let wire = to_wire_tools(&[schema]);
        let json = serde_json::to_value(&wire).unwrap();

        assert_eq!(json[0]["type"], "function");
        assert_eq!(json[0]["function"]["name"], "generate_random_password");
        assert_eq!(
            json[0]["function"]["parameters"]["properties"]["length"]["type"],
            "integer"
        );
    }

    #[test]
    fn response_with_tool_calls_parses_into_turn() {
        let body = r#"{
            "choices": [{
                "message": {
                    "content": null,
                    "tool_calls": [{
                        "id": "call_9",
                        "type": "function",
                        "function": {
                            "name": "convert_currency",
                            "arguments": "{\"amount\": 100, \"from_currency\": \"USD\", \"to_currency\": \"JPY\"}"
                        }
                    }]
                }
            }]
        }"#;

        let parsed: WireResponse = serde_json::from_str(body).unwrap();
        let turn = into_turn(parsed.choices.into_iter().next().unwrap().message);

        assert_eq!(turn.content, None);
        assert_eq!(turn.tool_calls.len(), 1);
        assert_eq!(turn.tool_calls[0].id, "call_9");
        assert_eq!(turn.tool_calls[0].name, "convert_currency");
        assert!(turn.tool_calls[0].arguments.contains("from_currency"));
    }

    #[test]
    fn response_with_text_parses_into_turn() {
        let body = r#"{"choices":[{"message":{"content":"Hi there."}}]}"#;
        let parsed: WireResponse = serde_json::from_str(body).unwrap();
        let turn = into_turn(parsed.choices.into_iter().next().unwrap().message);
        assert_eq!(turn.content.as_deref(), Some("Hi there."));
        assert!(turn.tool_calls.is_empty());
    }

    #[test]
    fn missing_api_key_is_rejected_at_construction() {
        let err = OpenAiProvider::new(LlmSettings::default()).err().unwrap();
        assert_eq!(err, LlmError::MissingApiKey);
    }

    #[test]
    fn endpoint_tolerates_trailing_slash() {
        let provider = OpenAiProvider::new(LlmSettings {
            base_url: "http://localhost:8080/v1/".to_string(),
            api_key: Some("test-key".to_string()),
            model: "test-model".to_string(),
        })
        .unwrap();
        assert_eq!(provider.endpoint(), "http://localhost:8080/v1/chat/completions");
    }
}
