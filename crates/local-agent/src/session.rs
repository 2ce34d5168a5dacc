use std::path::PathBuf;

use local_agent_core::conversation::Conversation;
use local_agent_core::{
    Agent, AgentBuilder, Error, InputSource, TranscriptSource,
};
use local_agent_model::{ModelProvider, ToolCallRequest};

use crate::tools::*;

/// A session builder.
///
/// See [`Session`].
pub struct SessionBuilder {
    agent_builder: AgentBuilder,
    working_dir: PathBuf,
}

impl SessionBuilder {
    /// Creates a session builder with a specified model provider.
    pub fn with_model_provider<M: ModelProvider + 'static>(
        provider: M,
    ) -> Self {
        let agent_builder = AgentBuilder::with_model_provider(provider);
        Self {
            agent_builder,
            working_dir: PathBuf::from("."),
        }
    }

    /// Sets the directory that relative paths given to the tools are
    /// resolved against. Defaults to the current working directory.
    #[inline]
    pub fn with_working_dir<P: Into<PathBuf>>(mut self, dir: P) -> Self {
        self.working_dir = dir.into();
        self
    }

    /// Attaches a callback to be invoked when a transcript is generated.
    #[inline]
    pub fn on_transcript(
        mut self,
        on_transcript: impl Fn(&str, TranscriptSource) + Send + Sync + 'static,
    ) -> Self {
        self.agent_builder = self.agent_builder.on_transcript(on_transcript);
        self
    }

    /// Attaches a callback to be invoked before a tool is executed.
    #[inline]
    pub fn on_tool_call(
        mut self,
        on_tool_call: impl Fn(&ToolCallRequest) + Send + Sync + 'static,
    ) -> Self {
        self.agent_builder = self.agent_builder.on_tool_call(on_tool_call);
        self
    }

    /// Builds a new session.
    pub fn build(self) -> Session {
        let agent = self
            .agent_builder
            .with_tool(ReadFileTool::with_root(self.working_dir.clone()))
            .with_tool(ListFilesTool::with_root(self.working_dir))
            .build();

        Session { agent }
    }
}

/// A chat session, like a terminal window that reads what the user types
/// and shows what the agent replies.
///
/// The session holds a fully configured agent, and it is basically a
/// wrapper around [`Agent`].
pub struct Session {
    agent: Agent,
}

impl Session {
    /// Chats until `input` is exhausted, or the model can't be reached.
    #[inline]
    pub async fn run<I: InputSource>(
        &mut self,
        input: &mut I,
    ) -> Result<(), Error> {
        self.agent.run(input).await
    }

    /// Returns the conversation so far.
    #[inline]
    pub fn conversation(&self) -> &Conversation {
        self.agent.conversation()
    }
}
