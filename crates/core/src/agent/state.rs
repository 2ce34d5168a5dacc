use local_agent_model::{
    ModelMessage, ModelRequest, ModelResponse, ToolCallRequest, ToolCallResult,
    format_tool_results,
};

use super::{Agent, Error, TranscriptSource};
use crate::conversation::Item as ConversationItem;
use crate::input::InputSource;

/// The stage of the conversation loop.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum AgentStage {
    /// The next iteration starts by reading a user input.
    #[default]
    AwaitingUserInput,
    /// The model has requested tools, their results have been added to the
    /// conversation, and the next iteration goes straight to the model.
    ProcessingToolCalls,
}

impl Agent {
    /// Runs the conversation loop until `input` is exhausted.
    ///
    /// A failed model request ends the loop with an error. Everything else,
    /// including unknown tools and failing tools, is reported back to the
    /// model and the loop goes on.
    pub async fn run<I: InputSource>(
        &mut self,
        input: &mut I,
    ) -> Result<(), Error> {
        loop {
            if self.current_stage == AgentStage::AwaitingUserInput {
                let Some(line) = input.read_line().await else {
                    debug!("input exhausted, stopping the agent");
                    return Ok(());
                };
                self.push_user_input(line);
            }

            let request = self.build_model_request();
            let resp = self
                .model_client
                .send_request(request)
                .await
                .map_err(Error::Model)?;
            self.handle_model_response(resp).await;
        }
    }

    fn push_user_input(&mut self, input: String) {
        self.emit_transcript(&input, TranscriptSource::User);
        self.conversation.push(ConversationItem {
            msg: ModelMessage::user(input.clone()),
            transcript: input,
        });
    }

    async fn handle_model_response(&mut self, resp: ModelResponse) {
        let ModelResponse {
            message,
            finish_reason,
        } = resp;
        debug!(
            "model finished ({finish_reason:?}) with {} tool call(s)",
            message.tool_calls.len()
        );

        // The assistant turn always goes into the conversation first, the
        // tool results must follow it.
        let tool_calls = message.tool_calls.clone();
        let transcript = message.content.clone();
        self.conversation.push(ConversationItem {
            msg: ModelMessage::Assistant(message),
            transcript: transcript.clone(),
        });

        if tool_calls.is_empty() {
            self.current_stage = AgentStage::AwaitingUserInput;
            self.emit_transcript(&transcript, TranscriptSource::Assistant);
            return;
        }

        self.current_stage = AgentStage::ProcessingToolCalls;
        let results = self.run_tools(&tool_calls).await;
        let transcript = format_tool_results(&results);
        self.conversation.push(ConversationItem {
            msg: ModelMessage::Tool { results },
            transcript,
        });
    }

    async fn run_tools(
        &self,
        tool_calls: &[ToolCallRequest],
    ) -> Vec<ToolCallResult> {
        let mut results = Vec::with_capacity(tool_calls.len());
        for req in tool_calls {
            let content = self
                .tools
                .dispatch(req, |req| {
                    if let Some(on_tool_call) = &self.on_tool_call {
                        on_tool_call(req);
                    }
                })
                .await;
            results.push(ToolCallResult {
                name: req.name.clone(),
                content,
            });
        }
        results
    }

    fn build_model_request(&self) -> ModelRequest {
        ModelRequest {
            messages: self.conversation.messages(),
            tools: self.tools.definitions(),
        }
    }

    #[inline]
    fn emit_transcript(&self, transcript: &str, source: TranscriptSource) {
        if let Some(on_transcript) = &self.on_transcript {
            on_transcript(transcript, source);
        }
    }
}
