use local_agent_model::{AssistantMessage, ToolCallRequest};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The preset response for an assistant step.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresetResponse {
    /// Text content of the response.
    #[serde(default)]
    pub content: String,
    /// Tool calls requested by the response, in order.
    #[serde(default)]
    pub tool_calls: Vec<ToolCallRequest>,
}

impl PresetResponse {
    /// Creates a text-only `PresetResponse`.
    #[inline]
    pub fn with_content<S: Into<String>>(content: S) -> Self {
        Self {
            content: content.into(),
            tool_calls: vec![],
        }
    }

    /// Appends a tool call request.
    #[inline]
    pub fn with_tool_call<S: Into<String>>(
        mut self,
        name: S,
        arguments: Value,
    ) -> Self {
        self.tool_calls.push(ToolCallRequest {
            name: name.into(),
            arguments,
        });
        self
    }

    #[inline]
    pub(crate) fn to_message(&self) -> AssistantMessage {
        AssistantMessage {
            content: self.content.clone(),
            tool_calls: self.tool_calls.clone(),
        }
    }
}
