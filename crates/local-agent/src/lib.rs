//! An out-of-the-box agent that assembles the file system tools and a
//! model provider.
//!
//! The crate includes a CLI tool for chatting with a local Ollama server in
//! the terminal. And you can also use it as a library to drive the agent
//! with your own input source.

#![deny(missing_docs)]

#[allow(unused_imports)]
#[macro_use]
extern crate tracing;

mod session;
pub mod tools;

pub use session::{Session, SessionBuilder};

/// Re-exports of [`local_agent_core`] crate.
pub mod core {
    pub use local_agent_core::*;
}
