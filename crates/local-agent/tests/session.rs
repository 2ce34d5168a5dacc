use std::collections::VecDeque;
use std::fs;
use std::sync::{Arc, Mutex};

use local_agent::SessionBuilder;
use local_agent::core::TranscriptSource;
use local_agent_model::{ModelMessage, ToolCallResult};
use local_agent_test_model::{PresetResponse, TestModelProvider};
use serde_json::json;

fn inputs<const N: usize>(lines: [&str; N]) -> VecDeque<String> {
    lines.iter().map(|line| line.to_string()).collect()
}

fn tool_results(message: &ModelMessage) -> &[ToolCallResult] {
    match message {
        ModelMessage::Tool { results } => results,
        _ => panic!("not a tool message: {message:?}"),
    }
}

#[tokio::test]
async fn test_list_files_in_data() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir_all(dir.path().join("data/sub")).unwrap();
    fs::write(dir.path().join("data/a.txt"), "hello").unwrap();

    let mut model_provider = TestModelProvider::default();
    model_provider.add_user_input_step();
    model_provider.add_assistant_response_step(
        PresetResponse::default()
            .with_tool_call("list_files", json!({ "path": "./data" })),
    );
    model_provider.add_tool_results_step();
    model_provider.add_assistant_response_step(PresetResponse::with_content(
        "There is a.txt and a sub directory.",
    ));

    let traces = Arc::new(Mutex::new(vec![]));
    let mut session =
        SessionBuilder::with_model_provider(model_provider.clone())
            .with_working_dir(dir.path())
            .on_tool_call({
                let traces = Arc::clone(&traces);
                move |req| {
                    traces
                        .lock()
                        .unwrap()
                        .push(format!("{}({})", req.name, req.arguments));
                }
            })
            .build();
    let mut input = inputs(["list files in ./data"]);
    session.run(&mut input).await.unwrap();

    assert_eq!(*traces.lock().unwrap(), [r#"list_files({"path":"./data"})"#]);

    let requests = model_provider.requests();
    assert_eq!(requests.len(), 2);
    let tool_names = requests[0]
        .tools
        .iter()
        .map(|tool| tool.name.as_str())
        .collect::<Vec<_>>();
    assert_eq!(tool_names, ["read_file", "list_files"]);

    let results = tool_results(&requests[1].messages[2]);
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].name, "list_files");
    assert_eq!(results[0].content, r#"["a.txt","sub/"]"#);
    assert_eq!(session.conversation().len(), 4);
}

#[tokio::test]
async fn test_read_missing_file() {
    let dir = tempfile::tempdir().unwrap();

    let mut model_provider = TestModelProvider::default();
    model_provider.add_user_input_step();
    model_provider.add_assistant_response_step(
        PresetResponse::default()
            .with_tool_call("read_file", json!({ "path": "config.yaml" })),
    );
    model_provider.add_tool_results_step();
    model_provider.add_assistant_response_step(PresetResponse::with_content(
        "config.yaml doesn't exist.",
    ));
    model_provider.add_user_input_step();
    model_provider
        .add_assistant_response_step(PresetResponse::with_content("Bye!"));

    let transcripts = Arc::new(Mutex::new(vec![]));
    let mut session =
        SessionBuilder::with_model_provider(model_provider.clone())
            .with_working_dir(dir.path())
            .on_transcript({
                let transcripts = Arc::clone(&transcripts);
                move |transcript, source| {
                    if source == TranscriptSource::Assistant {
                        transcripts.lock().unwrap().push(transcript.to_owned());
                    }
                }
            })
            .build();
    let mut input = inputs(["show me config.yaml", "thanks"]);
    session.run(&mut input).await.unwrap();

    let requests = model_provider.requests();
    assert_eq!(requests.len(), 3);
    let results = tool_results(&requests[1].messages[2]);
    assert!(
        results[0].content.starts_with("Execution error: config.yaml: "),
        "{}",
        results[0].content
    );
    assert_eq!(
        *transcripts.lock().unwrap(),
        ["config.yaml doesn't exist.", "Bye!"]
    );
}

#[tokio::test]
async fn test_malformed_arguments() {
    let dir = tempfile::tempdir().unwrap();

    let mut model_provider = TestModelProvider::default();
    model_provider.add_user_input_step();
    model_provider.add_assistant_response_step(
        PresetResponse::default()
            .with_tool_call("read_file", json!({ "path": ["a", "b"] }))
            .with_tool_call("list_files", json!("not an object")),
    );
    model_provider.add_tool_results_step();
    model_provider
        .add_assistant_response_step(PresetResponse::with_content("Oops."));

    let mut session =
        SessionBuilder::with_model_provider(model_provider.clone())
            .with_working_dir(dir.path())
            .build();
    session.run(&mut inputs(["look around"])).await.unwrap();

    let requests = model_provider.requests();
    let results = tool_results(&requests[1].messages[2]);
    assert_eq!(results.len(), 2);
    for result in results {
        assert!(result.content.starts_with("Invalid input: "), "{result:?}");
    }
}

#[tokio::test]
async fn test_backend_failure() {
    let mut model_provider = TestModelProvider::default();
    model_provider.add_user_input_step();
    model_provider.add_failure_step();

    let mut session =
        SessionBuilder::with_model_provider(model_provider).build();
    let mut input = inputs(["hello", "are you there?"]);
    let err = session.run(&mut input).await.unwrap_err();

    assert_eq!(err.to_string(), "model request failed: connection refused");
    assert_eq!(input.len(), 1);
}
