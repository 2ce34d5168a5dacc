//! A model provider for the Ollama chat API.

#[macro_use]
extern crate tracing;

mod config;
mod proto;

use std::error::Error as StdError;
use std::fmt::{self, Display};
use std::sync::Arc;

use local_agent_model::{
    ErrorKind, ModelProvider, ModelProviderError, ModelRequest, ModelResponse,
};
use reqwest::Client;

pub use config::{OllamaConfig, OllamaConfigBuilder};

/// Error type for [`OllamaProvider`].
#[derive(Debug)]
pub struct Error {
    message: String,
    kind: ErrorKind,
}

impl Error {
    fn new(message: impl Into<String>, kind: ErrorKind) -> Self {
        Self {
            message: message.into(),
            kind,
        }
    }

    /// Returns the error message.
    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl StdError for Error {}

impl ModelProviderError for Error {
    #[inline]
    fn kind(&self) -> ErrorKind {
        self.kind
    }
}

/// Ollama model provider.
///
/// Every request is a single non-streaming round-trip. There is no timeout
/// and no retry, a failed request is reported to the caller as is.
#[derive(Clone, Debug)]
pub struct OllamaProvider {
    client: Client,
    config: Arc<OllamaConfig>,
}

impl OllamaProvider {
    /// Creates a new `OllamaProvider` with the given configuration.
    #[inline]
    pub fn new(config: OllamaConfig) -> Self {
        Self {
            client: Client::new(),
            config: Arc::new(config),
        }
    }

    /// Returns the configuration of this provider.
    #[inline]
    pub fn config(&self) -> &OllamaConfig {
        &self.config
    }
}

impl ModelProvider for OllamaProvider {
    type Error = Error;

    fn send_request(
        &self,
        req: &ModelRequest,
    ) -> impl Future<Output = Result<ModelResponse, Self::Error>> + Send + 'static
    {
        let chat_req = proto::create_request(req, &self.config);
        trace!("sending request: {chat_req:?}");
        let resp_fut = self
            .client
            .post(self.config.chat_url())
            .json(&chat_req)
            .send();

        async move {
            let resp = resp_fut.await.map_err(transport_error)?;

            let status = resp.status();
            let body = resp.text().await.map_err(transport_error)?;
            trace!("got response ({status}): {body}");

            if !status.is_success() {
                return Err(proto::backend_error(status.as_u16(), &body));
            }
            proto::parse_response(&body)
        }
    }
}

#[inline]
fn transport_error(err: reqwest::Error) -> Error {
    Error::new(format!("{err}"), ErrorKind::Transport)
}
