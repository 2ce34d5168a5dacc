use serde::{Deserialize, Serialize};

use crate::request::AssistantMessage;

/// The reason why a model response has finished.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModelFinishReason {
    /// The model needs to call a tool.
    ToolCalls,
    /// The model has finished generating text.
    Stop,
}

/// A complete assistant turn returned by the model provider.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelResponse {
    /// The generated message.
    pub message: AssistantMessage,
    /// Why the model stopped generating.
    pub finish_reason: ModelFinishReason,
}

impl ModelResponse {
    /// Creates a response from an assistant message, inferring the finish
    /// reason from whether it has tool calls.
    #[inline]
    pub fn from_message(message: AssistantMessage) -> Self {
        let finish_reason = if message.tool_calls.is_empty() {
            ModelFinishReason::Stop
        } else {
            ModelFinishReason::ToolCalls
        };
        Self {
            message,
            finish_reason,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::{ModelMessage, ToolCallRequest};

    #[test]
    fn test_finish_reason() {
        let resp = ModelResponse::from_message(AssistantMessage {
            content: "Hello".to_owned(),
            tool_calls: vec![],
        });
        assert_eq!(resp.finish_reason, ModelFinishReason::Stop);

        let resp = ModelResponse::from_message(AssistantMessage {
            content: String::new(),
            tool_calls: vec![ToolCallRequest {
                name: "list_files".to_owned(),
                arguments: json!({}),
            }],
        });
        assert_eq!(resp.finish_reason, ModelFinishReason::ToolCalls);
    }

    #[test]
    fn test_message_tool_calls() {
        assert!(ModelMessage::user("Hi").tool_calls().is_empty());

        let msg = ModelMessage::Assistant(AssistantMessage {
            content: String::new(),
            tool_calls: vec![ToolCallRequest {
                name: "read_file".to_owned(),
                arguments: json!({ "path": "a.txt" }),
            }],
        });
        assert_eq!(msg.tool_calls().len(), 1);
        assert_eq!(msg.tool_calls()[0].name, "read_file");
    }
}
