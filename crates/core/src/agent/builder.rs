use local_agent_model::{ModelProvider, ToolCallRequest};

use super::{Agent, TranscriptSource};
use crate::model_client::ModelClient;
use crate::tool::{Registry as ToolRegistry, Tool};

/// [`Agent`] builder.
pub struct AgentBuilder {
    pub(crate) model_client: ModelClient,
    pub(crate) tools: ToolRegistry,
    pub(crate) on_transcript: Option<super::TranscriptCallback>,
    pub(crate) on_tool_call: Option<super::ToolCallCallback>,
}

impl AgentBuilder {
    /// Creates a new builder with the specified model provider.
    #[inline]
    pub fn with_model_provider<P: ModelProvider + 'static>(
        provider: P,
    ) -> Self {
        Self {
            model_client: ModelClient::new(provider),
            tools: Default::default(),
            on_transcript: None,
            on_tool_call: None,
        }
    }

    /// Registers a tool.
    ///
    /// Tool names are unique, registering a second tool with a name that
    /// is already taken has no effect.
    #[inline]
    pub fn with_tool<T: Tool>(mut self, tool: T) -> Self {
        self.tools.add_tool(tool);
        self
    }

    /// Attaches a callback to be invoked when a user input is accepted, or
    /// when the model replies without requesting any tools.
    #[inline]
    pub fn on_transcript(
        mut self,
        on_transcript: impl Fn(&str, TranscriptSource) + Send + Sync + 'static,
    ) -> Self {
        self.on_transcript = Some(Box::new(on_transcript));
        self
    }

    /// Attaches a callback to be invoked right before a tool is executed.
    #[inline]
    pub fn on_tool_call(
        mut self,
        on_tool_call: impl Fn(&ToolCallRequest) + Send + Sync + 'static,
    ) -> Self {
        self.on_tool_call = Some(Box::new(on_tool_call));
        self
    }

    /// Builds the agent.
    #[inline]
    pub fn build(self) -> Agent {
        Agent::from_builder(self)
    }
}
