use local_agent_model::{
    AssistantMessage, ErrorKind, ModelMessage, ModelRequest, ModelResponse,
    ModelTool, ToolCallRequest, format_tool_results,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{Error, OllamaConfig};

// ---------------------------------------
// Types both sent to and received from it
// ---------------------------------------

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionToolCall {
    pub name: String,
    #[serde(default)]
    pub arguments: Value,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolCall {
    pub function: FunctionToolCall,
}

// ------------------------------
// Types received from the server
// ------------------------------

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct ChatResponse {
    pub message: ResponseMessage,
    #[serde(default)]
    pub done: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct ResponseMessage {
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub tool_calls: Vec<ToolCall>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
struct ErrorResponse {
    error: String,
}

// ------------------------
// Types sent to the server
// ------------------------

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
struct FunctionTool {
    name: String,
    description: String,
    parameters: Value,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
struct Tool {
    r#type: &'static str,
    function: FunctionTool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "role", rename_all = "lowercase")]
enum Message {
    User {
        content: String,
    },
    Assistant {
        content: String,
        #[serde(skip_serializing_if = "Vec::is_empty")]
        tool_calls: Vec<ToolCall>,
    },
    Tool {
        content: String,
    },
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ChatRequest {
    model: String,
    messages: Vec<Message>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tools: Vec<Tool>,
    stream: bool,
}

// -----------
// Conversions
// -----------

#[inline]
pub fn create_request(
    req: &ModelRequest,
    config: &OllamaConfig,
) -> ChatRequest {
    ChatRequest {
        model: config.model.clone(),
        messages: req.messages.iter().map(create_message).collect(),
        tools: req.tools.iter().map(create_tool).collect(),
        stream: false,
    }
}

#[inline]
fn create_message(msg: &ModelMessage) -> Message {
    match msg {
        ModelMessage::User { content } => Message::User {
            content: content.clone(),
        },
        ModelMessage::Assistant(msg) => Message::Assistant {
            content: msg.content.clone(),
            tool_calls: msg
                .tool_calls
                .iter()
                .map(|req| ToolCall {
                    function: FunctionToolCall {
                        name: req.name.clone(),
                        arguments: req.arguments.clone(),
                    },
                })
                .collect(),
        },
        // All results of one assistant turn are folded into one message.
        ModelMessage::Tool { results } => Message::Tool {
            content: format_tool_results(results),
        },
    }
}

#[inline]
fn create_tool(tool: &ModelTool) -> Tool {
    Tool {
        r#type: "function",
        function: FunctionTool {
            name: tool.name.clone(),
            description: tool.description.clone(),
            parameters: tool.parameters.clone(),
        },
    }
}

pub fn parse_response(body: &str) -> Result<ModelResponse, Error> {
    let resp = serde_json::from_str::<ChatResponse>(body).map_err(|err| {
        Error::new(
            format!("failed to parse response: {err}, body: {body}"),
            ErrorKind::InvalidResponse,
        )
    })?;
    if !resp.done {
        return Err(Error::new(
            "response is not complete",
            ErrorKind::InvalidResponse,
        ));
    }

    let ResponseMessage {
        content,
        tool_calls,
    } = resp.message;
    let tool_calls = tool_calls
        .into_iter()
        .map(|call| ToolCallRequest {
            name: call.function.name,
            arguments: call.function.arguments,
        })
        .collect();
    Ok(ModelResponse::from_message(AssistantMessage {
        content,
        tool_calls,
    }))
}

pub fn backend_error(status: u16, body: &str) -> Error {
    let message = match serde_json::from_str::<ErrorResponse>(body) {
        Ok(resp) => format!("backend error ({status}): {}", resp.error),
        Err(_) => format!("backend error ({status}): {body}"),
    };
    Error::new(message, ErrorKind::Backend)
}

#[cfg(test)]
mod tests {
    use local_agent_model::{
        ModelFinishReason, ModelProviderError, ToolCallResult,
    };
    use serde_json::json;

    use super::*;
    use crate::OllamaConfigBuilder;

    #[test]
    fn test_create_request() {
        let request = ModelRequest {
            messages: vec![
                ModelMessage::user("list files in ./data"),
                ModelMessage::Assistant(AssistantMessage {
                    content: String::new(),
                    tool_calls: vec![ToolCallRequest {
                        name: "list_files".to_owned(),
                        arguments: json!({ "path": "./data" }),
                    }],
                }),
                ModelMessage::Tool {
                    results: vec![ToolCallResult {
                        name: "list_files".to_owned(),
                        content: r#"["a.txt","sub/"]"#.to_owned(),
                    }],
                },
            ],
            tools: vec![ModelTool {
                name: "list_files".to_owned(),
                description: "Lists files.".to_owned(),
                parameters: json!({
                    "type": "object",
                    "properties": {}
                }),
            }],
        };
        let config = OllamaConfigBuilder::new().with_model("custom").build();
        let actual = serde_json::to_value(create_request(&request, &config))
            .unwrap();
        let expected = json!({
            "model": "custom",
            "messages": [
                { "role": "user", "content": "list files in ./data" },
                {
                    "role": "assistant",
                    "content": "",
                    "tool_calls": [{
                        "function": {
                            "name": "list_files",
                            "arguments": { "path": "./data" }
                        }
                    }]
                },
                {
                    "role": "tool",
                    "content": r#"Tool list_files result: ["a.txt","sub/"]"#
                }
            ],
            "tools": [{
                "type": "function",
                "function": {
                    "name": "list_files",
                    "description": "Lists files.",
                    "parameters": { "type": "object", "properties": {} }
                }
            }],
            "stream": false
        });
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_empty_fields_are_omitted() {
        let request = ModelRequest {
            messages: vec![ModelMessage::Assistant(AssistantMessage {
                content: "Hi".to_owned(),
                tool_calls: vec![],
            })],
            tools: vec![],
        };
        let config = OllamaConfigBuilder::new().build();
        let actual = serde_json::to_value(create_request(&request, &config))
            .unwrap();
        assert_eq!(
            actual,
            json!({
                "model": "qwen3:8b",
                "messages": [{ "role": "assistant", "content": "Hi" }],
                "stream": false
            })
        );
    }

    #[test]
    fn test_tool_results_are_batched() {
        let request = ModelRequest {
            messages: vec![ModelMessage::Tool {
                results: vec![
                    ToolCallResult {
                        name: "read_file".to_owned(),
                        content: "hello".to_owned(),
                    },
                    ToolCallResult {
                        name: "missing".to_owned(),
                        content: "tool not found".to_owned(),
                    },
                ],
            }],
            tools: vec![],
        };
        let config = OllamaConfigBuilder::new().build();
        let actual = serde_json::to_value(create_request(&request, &config))
            .unwrap();
        assert_eq!(
            actual["messages"],
            json!([{
                "role": "tool",
                "content": "Tool read_file result: hello\n\n\
                            Tool missing result: tool not found"
            }])
        );
    }

    #[test]
    fn test_parse_tool_call_response() {
        let body = include_str!("../fixtures/tool_call_response.json");
        let resp = parse_response(body).unwrap();
        assert_eq!(resp.finish_reason, ModelFinishReason::ToolCalls);
        assert_eq!(resp.message.content, "");
        assert_eq!(resp.message.tool_calls.len(), 2);
        assert_eq!(resp.message.tool_calls[0].name, "list_files");
        assert_eq!(
            resp.message.tool_calls[0].arguments,
            json!({ "path": "./data" })
        );
        assert_eq!(resp.message.tool_calls[1].name, "read_file");
        assert_eq!(
            resp.message.tool_calls[1].arguments,
            json!(r#"{"path":"config.yaml"}"#)
        );
        assert_eq!(
            resp.message.tool_calls[1].decoded_arguments(),
            json!({ "path": "config.yaml" })
        );
    }

    #[test]
    fn test_encoded_arguments_are_replayed_as_received() {
        let body = include_str!("../fixtures/tool_call_response.json");
        let resp = parse_response(body).unwrap();
        let request = ModelRequest {
            messages: vec![ModelMessage::Assistant(resp.message)],
            tools: vec![],
        };
        let config = OllamaConfigBuilder::new().build();
        let actual = serde_json::to_value(create_request(&request, &config))
            .unwrap();
        assert_eq!(
            actual["messages"][0]["tool_calls"][1]["function"]["arguments"],
            json!(r#"{"path":"config.yaml"}"#)
        );
    }

    #[test]
    fn test_parse_text_response() {
        let body = r#"{
            "model": "qwen3:8b",
            "message": { "role": "assistant", "content": "Hello!" },
            "done": true
        }"#;
        let resp = parse_response(body).unwrap();
        assert_eq!(resp.finish_reason, ModelFinishReason::Stop);
        assert_eq!(resp.message.content, "Hello!");
        assert!(resp.message.tool_calls.is_empty());
    }

    #[test]
    fn test_parse_invalid_response() {
        let err = parse_response("<html>oops</html>").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidResponse);
        assert!(err.message().contains("<html>oops</html>"));

        let body = r#"{"message":{"role":"assistant","content":"Hel"},"done":false}"#;
        let err = parse_response(body).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidResponse);
    }

    #[test]
    fn test_backend_error() {
        let err = backend_error(404, r#"{"error":"model 'foo' not found"}"#);
        assert_eq!(err.kind(), ErrorKind::Backend);
        assert_eq!(err.message(), "backend error (404): model 'foo' not found");

        let err = backend_error(502, "Bad Gateway");
        assert_eq!(err.message(), "backend error (502): Bad Gateway");
    }
}
