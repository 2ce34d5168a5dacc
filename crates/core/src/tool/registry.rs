use local_agent_model::{ModelTool, ToolCallRequest};

use crate::tool::Tool;
use crate::tool::object::{ToolObject, ToolObjectImpl};

pub(crate) const TOOL_NOT_FOUND: &str = "tool not found";

/// The catalog of tools, fixed once the agent is built.
///
/// Tools are kept in registration order and looked up by a linear scan,
/// the catalog is expected to stay small.
#[derive(Default)]
pub struct Registry {
    tools: Vec<Box<dyn ToolObject>>,
}

impl Registry {
    pub fn add_tool<T: Tool>(&mut self, tool: T) {
        if self.find(tool.name()).is_some() {
            warn!("tool already registered: {}", tool.name());
            return;
        }
        self.tools.push(Box::new(ToolObjectImpl(tool)));
    }

    #[inline]
    pub fn definitions(&self) -> Vec<ModelTool> {
        self.tools
            .iter()
            .map(|tool| ModelTool {
                name: tool.name().to_owned(),
                description: tool.description().to_owned(),
                parameters: tool.parameter_schema().clone(),
            })
            .collect()
    }

    #[inline]
    fn find(&self, name: &str) -> Option<&dyn ToolObject> {
        self.tools
            .iter()
            .find(|tool| tool.name() == name)
            .map(|tool| &**tool)
    }

    /// Runs the requested tool and returns its output as text.
    ///
    /// Failures are returned as text too. `before_execute` is only invoked
    /// when the tool exists.
    pub async fn dispatch<F>(
        &self,
        req: &ToolCallRequest,
        before_execute: F,
    ) -> String
    where
        F: FnOnce(&ToolCallRequest),
    {
        let Some(tool) = self.find(&req.name) else {
            warn!("tool not found: {}", req.name);
            return TOOL_NOT_FOUND.to_owned();
        };

        before_execute(req);
        trace!("executing a tool ({}) with args: {}", req.name, req.arguments);
        match tool.execute(req.decoded_arguments()).await {
            Ok(output) => output,
            Err(err) => {
                debug!("tool {} failed: {err}", req.name);
                err.to_string()
            }
        }
    }
}
