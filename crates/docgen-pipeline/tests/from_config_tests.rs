//! End-to-end tests: policy loaded from disk, generation against a mock server

use std::path::PathBuf;

use docgen_core::{AppConfig, ConfigError};
use docgen_pipeline::{Disposition, DocumentationPipeline, PipelineError};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const POLICY: &str = r#"
refusal_message: "I'm sorry, I can't respond to that."
input:
  rules:
    - name: not-empty
      type: min_length
      value: 1
    - name: off-topic
      type: keywords
      patterns: ["ignore previous instructions"]
output:
  rules:
    - name: no-secrets
      type: keywords
      patterns: ["SECRET"]
      case_sensitive: true
"#;

fn config_for(server: &MockServer, policy_dir: PathBuf) -> AppConfig {
    AppConfig {
        api_key: Some("sk-test".to_string()),
        api_base: server.uri(),
        policy_path: policy_dir,
        request_timeout_secs: 5,
        ..AppConfig::default()
    }
}

fn completion(text: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(serde_json::json!({
        "id": "chatcmpl-test",
        "model": "gpt-3.5-turbo",
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": text},
            "finish_reason": "stop"
        }]
    }))
}

#[tokio::test]
async fn generates_documentation_end_to_end() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(completion("Returns x incremented by one."))
        .expect(1)
        .mount(&mock_server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("config.yml"), POLICY).unwrap();

    let pipeline =
        DocumentationPipeline::from_config(&config_for(&mock_server, dir.path().to_path_buf()))
            .expect("pipeline");

    let response = pipeline
        .generate_documentation("def f(x): return x+1")
        .await
        .expect("run");

    assert_eq!(response.text, "Returns x incremented by one.");
    assert_eq!(pipeline.model(), "gpt-3.5-turbo");
}

#[tokio::test]
async fn refused_input_makes_no_http_call() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(completion("unused"))
        .expect(0)
        .mount(&mock_server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("config.yml"), POLICY).unwrap();
    let pipeline =
        DocumentationPipeline::from_config(&config_for(&mock_server, dir.path().to_path_buf()))
            .expect("pipeline");

    let response = pipeline.generate_documentation("   ").await.expect("run");

    assert_eq!(response.text, "I'm sorry, I can't respond to that.");
    assert_eq!(
        response.disposition,
        Disposition::InputRefused {
            rule: "not-empty".to_string()
        }
    );
}

#[tokio::test]
async fn leaked_output_is_withheld() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(completion("leaked SECRET token"))
        .mount(&mock_server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("config.yml"), POLICY).unwrap();
    let pipeline =
        DocumentationPipeline::from_config(&config_for(&mock_server, dir.path().to_path_buf()))
            .expect("pipeline");

    let response = pipeline.generate_documentation("def f(): pass").await.expect("run");

    assert_eq!(response.text, "I'm sorry, I can't respond to that.");
}

#[tokio::test]
async fn malformed_completions_are_format_errors() {
    let bodies = [
        serde_json::json!({"choices": [{"index": 0}]}),
        serde_json::json!({"choices": [{"message": {"content": null}}]}),
        serde_json::json!({"choices": "not-a-list"}),
    ];

    for body in bodies {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body.clone()))
            .expect(1)
            .mount(&mock_server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("config.yml"), POLICY).unwrap();
        let pipeline =
            DocumentationPipeline::from_config(&config_for(&mock_server, dir.path().to_path_buf()))
                .expect("pipeline");

        let err = pipeline.generate_documentation("def f(): pass").await.unwrap_err();

        assert!(matches!(err, PipelineError::Format(_)), "{body}: {err}");
        assert_eq!(err.kind(), "format");
    }
}

#[tokio::test]
async fn missing_policy_is_fatal_at_startup() {
    let mock_server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();

    let result = DocumentationPipeline::from_config(&config_for(
        &mock_server,
        dir.path().join("does-not-exist"),
    ));

    assert!(matches!(result, Err(ConfigError::NotFound(_))));
}

#[tokio::test]
async fn malformed_policy_is_fatal_at_startup() {
    let mock_server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("config.yml"),
        "input:\n  rules:\n    - type: regex\n      pattern: \"[unclosed\"\n",
    )
    .unwrap();

    let result =
        DocumentationPipeline::from_config(&config_for(&mock_server, dir.path().to_path_buf()));

    assert!(matches!(result, Err(ConfigError::InvalidRule { .. })));
}
