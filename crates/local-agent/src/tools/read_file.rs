use std::fs;
use std::path::{Path, PathBuf};

use local_agent_core::tool::{Error as ToolError, Tool, ToolResult};
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::Value;
use tokio::task::spawn_blocking;

#[derive(Deserialize, JsonSchema)]
pub struct ReadFileParameters {
    #[schemars(
        description = "The relative path of a file in the working directory."
    )]
    path: String,
}

/// A tool for reading the whole content of a text file.
pub struct ReadFileTool {
    root: PathBuf,
    parameter_schema: Value,
}

impl ReadFileTool {
    /// Creates a new read file tool working in the current directory.
    #[inline]
    pub fn new() -> Self {
        Self::with_root(".")
    }

    /// Creates a new read file tool that resolves paths against `root`.
    #[inline]
    pub fn with_root<P: Into<PathBuf>>(root: P) -> Self {
        ReadFileTool {
            root: root.into(),
            parameter_schema: super::object_schema::<ReadFileParameters>(),
        }
    }
}

impl Default for ReadFileTool {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl Tool for ReadFileTool {
    type Input = ReadFileParameters;

    fn name(&self) -> &str {
        "read_file"
    }

    fn description(&self) -> &str {
        "Read the contents of a given relative file path. Use this when you \
         want to see what's inside a file. Do not use this with directory \
         names."
    }

    fn parameter_schema(&self) -> &Value {
        &self.parameter_schema
    }

    #[allow(clippy::manual_async_fn)]
    fn execute(
        &self,
        input: ReadFileParameters,
    ) -> impl Future<Output = ToolResult> + Send + 'static {
        let full_path = self.root.join(&input.path);
        async move {
            spawn_blocking(move || read_file(&full_path, &input.path))
                .await
                .map_err(|_| {
                    ToolError::execution_error()
                        .with_reason("Failed to read file")
                })?
        }
    }
}

fn read_file(full_path: &Path, path: &str) -> ToolResult {
    let metadata = fs::metadata(full_path).map_err(|err| {
        ToolError::execution_error().with_reason(format!("{path}: {err}"))
    })?;
    if !metadata.is_file() {
        return Err(ToolError::execution_error()
            .with_reason(format!("{path}: not a regular file")));
    }
    fs::read_to_string(full_path).map_err(|err| {
        ToolError::execution_error().with_reason(format!("{path}: {err}"))
    })
}
