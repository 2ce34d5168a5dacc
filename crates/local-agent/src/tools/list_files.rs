use std::fs;
use std::path::{Path, PathBuf};

use local_agent_core::tool::{Error as ToolError, Tool, ToolResult};
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::Value;
use tokio::task::spawn_blocking;
use walkdir::WalkDir;

#[derive(Deserialize, JsonSchema)]
pub struct ListFilesParameters {
    #[serde(default)]
    #[schemars(
        description = "Optional relative path to list files from. Defaults to current directory if not provided."
    )]
    path: Option<String>,
}

/// A tool for listing a directory tree recursively.
///
/// The result is a JSON array of paths relative to the listed directory,
/// and directories are suffixed with `/`.
pub struct ListFilesTool {
    root: PathBuf,
    parameter_schema: Value,
}

impl ListFilesTool {
    /// Creates a new list files tool working in the current directory.
    #[inline]
    pub fn new() -> Self {
        Self::with_root(".")
    }

    /// Creates a new list files tool that resolves paths against `root`.
    #[inline]
    pub fn with_root<P: Into<PathBuf>>(root: P) -> Self {
        ListFilesTool {
            root: root.into(),
            parameter_schema: super::object_schema::<ListFilesParameters>(),
        }
    }
}

impl Default for ListFilesTool {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl Tool for ListFilesTool {
    // Models tend to send `null` when there is no argument at all.
    type Input = Option<ListFilesParameters>;

    fn name(&self) -> &str {
        "list_files"
    }

    fn description(&self) -> &str {
        "List files and directories at a given path. If no path is provided, \
         lists files in the current directory."
    }

    fn parameter_schema(&self) -> &Value {
        &self.parameter_schema
    }

    #[allow(clippy::manual_async_fn)]
    fn execute(
        &self,
        input: Option<ListFilesParameters>,
    ) -> impl Future<Output = ToolResult> + Send + 'static {
        let path = input.and_then(|input| input.path).unwrap_or_default();
        let dir = if path.is_empty() {
            self.root.clone()
        } else {
            self.root.join(&path)
        };
        async move {
            let files = spawn_blocking(move || list_files(&dir, &path))
                .await
                .map_err(|_| {
                    ToolError::execution_error()
                        .with_reason("Failed to list files")
                })??;
            serde_json::to_string(&files).map_err(|err| {
                ToolError::execution_error().with_reason(err.to_string())
            })
        }
    }
}

fn list_files(dir: &Path, path: &str) -> Result<Vec<String>, ToolError> {
    let display_path = if path.is_empty() { "." } else { path };
    let metadata = fs::metadata(dir).map_err(|err| {
        ToolError::execution_error()
            .with_reason(format!("{display_path}: {err}"))
    })?;
    if !metadata.is_dir() {
        return Err(ToolError::execution_error()
            .with_reason(format!("{display_path}: not a directory")));
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).sort_by_file_name() {
        let entry = entry.map_err(|err| {
            ToolError::execution_error().with_reason(err.to_string())
        })?;
        let Ok(relative) = entry.path().strip_prefix(dir) else {
            warn!("unexpected entry: {}", entry.path().display());
            continue;
        };
        let mut item = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");
        if entry.file_type().is_dir() {
            item.push('/');
        }
        files.push(item);
    }
    Ok(files)
}
