//! A set of built-in tools that models can use.

mod list_files;
mod read_file;

pub use list_files::ListFilesTool;
pub use read_file::ReadFileTool;

use schemars::{JsonSchema, schema_for};
use serde_json::{Value, json};

/// Builds the parameter schema of a tool from its input type.
///
/// Only the parts the backend cares about are kept, which is an object
/// with its properties and the required ones.
fn object_schema<T: JsonSchema>() -> Value {
    let schema = schema_for!(T).to_value();
    let properties = schema
        .get("properties")
        .cloned()
        .unwrap_or_else(|| json!({}));
    let required = schema.get("required").cloned().unwrap_or_else(|| json!([]));
    json!({
        "type": "object",
        "properties": properties,
        "required": required,
    })
}
