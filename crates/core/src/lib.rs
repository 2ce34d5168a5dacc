//! Core logic including the conversation loop and tool dispatch.

#![deny(missing_docs)]
#![deny(clippy::missing_safety_doc)]

#[macro_use]
extern crate tracing;

mod agent;
pub mod conversation;
mod input;
mod model_client;
pub mod tool;

pub use agent::{Agent, AgentBuilder, AgentStage, Error, TranscriptSource};
pub use input::InputSource;
