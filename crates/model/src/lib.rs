//! An abstraction layer between the agent and the inference backend.
//!
//! This crate establishes an unified protocol for the agent to talk to a
//! chat completion service that supports tool calls, so that the agent
//! loop doesn't need to know anything about the wire format of the
//! backend it is connected to.
//!
//! Types in this crate don't define any behavior, instead they are the
//! constraints that the implementors should adhere to.

#![deny(missing_docs)]

mod error;
mod provider;
mod request;
mod response;

pub use error::*;
pub use provider::*;
pub use request::*;
pub use response::*;
