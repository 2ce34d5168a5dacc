use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A request to be sent to the model provider.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelRequest {
    /// The full conversation so far, in order.
    pub messages: Vec<ModelMessage>,
    /// Tools that are available to the model.
    pub tools: Vec<ModelTool>,
}

/// A complete message.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum ModelMessage {
    /// A user input text.
    User {
        /// The text typed by the user.
        content: String,
    },
    /// An assistant turn, possibly requesting tool calls.
    Assistant(AssistantMessage),
    /// Results of all the tool calls requested by the previous assistant
    /// turn, in the order they were requested.
    Tool {
        /// The per-call results.
        results: Vec<ToolCallResult>,
    },
}

impl ModelMessage {
    /// Creates a user message.
    #[inline]
    pub fn user<S: Into<String>>(content: S) -> Self {
        Self::User {
            content: content.into(),
        }
    }

    /// Returns the tool call requests carried by this message, which is
    /// always empty for non-assistant messages.
    #[inline]
    pub fn tool_calls(&self) -> &[ToolCallRequest] {
        match self {
            ModelMessage::Assistant(msg) => &msg.tool_calls,
            _ => &[],
        }
    }
}

/// A message generated by the model.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssistantMessage {
    /// The natural-language content, may be empty.
    pub content: String,
    /// Tool calls requested by the model.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tool_calls: Vec<ToolCallRequest>,
}

/// Describes a tool call request from the model.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolCallRequest {
    /// The name of the tool to call.
    pub name: String,
    /// The raw arguments to pass to the tool. They are not validated
    /// against the parameter schema of the tool.
    pub arguments: Value,
}

impl ToolCallRequest {
    /// Returns the arguments ready to be decoded into the tool input.
    ///
    /// Some backends encode the arguments as a JSON string instead of an
    /// object. Such a string is decoded when it holds an object, otherwise
    /// the raw value is returned.
    pub fn decoded_arguments(&self) -> Value {
        let Value::String(encoded) = &self.arguments else {
            return self.arguments.clone();
        };
        match serde_json::from_str::<Value>(encoded) {
            Ok(decoded @ Value::Object(_)) => decoded,
            _ => self.arguments.clone(),
        }
    }
}

/// The result of calling a tool.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ToolCallResult {
    /// The name of the tool that was called.
    pub name: String,
    /// The output of the tool call, or the description of its failure.
    pub content: String,
}

/// Describes a tool that can be used by the model.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelTool {
    /// Name of the tool.
    pub name: String,
    /// Description of the tool.
    pub description: String,
    /// Parameters definition of the tool.
    ///
    /// This should be a [JSON schema](https://json-schema.org/) of an
    /// object, whose property list may be empty.
    pub parameters: Value,
}

/// Formats the results of one assistant turn as a single text, in the
/// order the calls were requested.
pub fn format_tool_results(results: &[ToolCallResult]) -> String {
    results
        .iter()
        .map(|result| {
            format!("Tool {} result: {}", result.name, result.content)
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}
