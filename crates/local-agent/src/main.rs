//! A terminal chat with a local Ollama server, where the model can read
//! files and list directories under the current directory.

#[macro_use]
extern crate tracing;

use std::env;
use std::io::Write as _;
use std::process::ExitCode;

use local_agent::SessionBuilder;
use local_agent::core::{InputSource, TranscriptSource};
use local_agent_ollama_model::{OllamaConfigBuilder, OllamaProvider};
use owo_colors::OwoColorize;
use tokio::io::{self, AsyncBufRead, AsyncBufReadExt, BufReader, Stdin};

/// Reads user input from the terminal, one line per turn.
///
/// A failed read ends the input and is kept for the exit status.
struct ConsoleInput {
    stdin: BufReader<Stdin>,
    error: Option<io::Error>,
}

impl ConsoleInput {
    fn new() -> Self {
        Self {
            stdin: BufReader::new(io::stdin()),
            error: None,
        }
    }
}

impl InputSource for ConsoleInput {
    fn read_line(&mut self) -> impl Future<Output = Option<String>> + Send {
        async move {
            print!("{}: ", "You".bright_blue());
            std::io::stdout().flush().ok();

            match read_user_line(&mut self.stdin).await {
                Ok(line) => line,
                Err(err) => {
                    debug!("error reading input: {err}");
                    self.error = Some(err);
                    None
                }
            }
        }
    }
}

/// Reads one line without its line terminator, `None` at the end of the
/// stream. Bytes that are not valid UTF-8 are replaced, not rejected.
async fn read_user_line<R>(reader: &mut R) -> io::Result<Option<String>>
where
    R: AsyncBufRead + Unpin,
{
    let mut buf = Vec::new();
    if reader.read_until(b'\n', &mut buf).await? == 0 {
        return Ok(None);
    }
    let line = String::from_utf8_lossy(&buf);
    Ok(Some(line.trim_end_matches(['\r', '\n']).to_owned()))
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let mut config = OllamaConfigBuilder::new();
    if let Ok(base_url) = env::var("OLLAMA_BASE_URL") {
        config = config.with_base_url(base_url);
    }
    if let Ok(model) = env::var("OLLAMA_MODEL") {
        config = config.with_model(model);
    }
    let config = config.build();
    debug!("using {config:?}");
    let model_provider = OllamaProvider::new(config);

    let mut session = SessionBuilder::with_model_provider(model_provider)
        .on_transcript(|transcript, source| {
            if source == TranscriptSource::Assistant {
                println!("{}: {}", "Ollama".bright_yellow(), transcript);
            }
        })
        .on_tool_call(|req| {
            let tool = "tool".bright_green();
            println!("{tool}: {}({})", req.name, req.arguments);
        })
        .build();

    println!("Chat with Ollama (use 'ctrl-c' to quit)");

    let mut input = ConsoleInput::new();
    if let Err(err) = session.run(&mut input).await {
        eprintln!("Error: {err}");
        return ExitCode::FAILURE;
    }
    if let Some(err) = input.error {
        eprintln!("Error: failed to read input: {err}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
