mod builder;
mod state;

use std::error::Error as StdError;
use std::fmt::{self, Display};

use local_agent_model::{ErrorKind, ModelProviderError, ToolCallRequest};

use crate::conversation::Conversation;
use crate::model_client::ModelClient;
use crate::tool::Registry as ToolRegistry;
pub use builder::AgentBuilder;
pub use state::AgentStage;

pub(crate) type TranscriptCallback =
    Box<dyn Fn(&str, TranscriptSource) + Send + Sync>;
pub(crate) type ToolCallCallback =
    Box<dyn Fn(&ToolCallRequest) + Send + Sync>;

/// Who a transcript comes from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TranscriptSource {
    /// Text typed by the user.
    User,
    /// Text generated by the model.
    Assistant,
}

/// An agent instance, which owns the conversation, a model client, the
/// tool catalog and the state of the conversation loop.
///
/// The agent runs strictly sequentially: one request to the model at a
/// time, and one tool at a time.
pub struct Agent {
    model_client: ModelClient,
    tools: ToolRegistry,
    conversation: Conversation,
    current_stage: AgentStage,

    on_transcript: Option<TranscriptCallback>,
    on_tool_call: Option<ToolCallCallback>,
}

impl Agent {
    /// Returns the conversation so far.
    #[inline]
    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    /// Returns the stage the conversation loop is in.
    #[inline]
    pub fn stage(&self) -> AgentStage {
        self.current_stage
    }

    fn from_builder(builder: AgentBuilder) -> Self {
        let AgentBuilder {
            model_client,
            tools,
            on_transcript,
            on_tool_call,
        } = builder;

        Self {
            model_client,
            tools,
            conversation: Default::default(),
            current_stage: Default::default(),
            on_transcript,
            on_tool_call,
        }
    }
}

/// The error that ends a conversation.
///
/// Only a failed model request ends it. Tool failures are reported back
/// to the model instead.
#[derive(Debug)]
pub enum Error {
    /// The request to the model failed.
    Model(Box<dyn ModelProviderError>),
}

impl Error {
    /// Returns the kind of the underlying model error.
    #[inline]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Model(err) => err.kind(),
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Model(err) => write!(f, "model request failed: {err}"),
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Error::Model(err) => Some(err.as_ref()),
        }
    }
}
