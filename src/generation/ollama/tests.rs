use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::*;

fn client_for(server: &MockServer) -> OllamaGenerator {
    let url = Url::parse(&server.uri()).expect("mock server uri");
    let config = OllamaConfig {
        protocol: url.scheme().to_string(),
        host: url.host_str().expect("mock server host").to_string(),
        port: url.port().expect("mock server port"),
        embedding_model: "all-minilm:latest".to_string(),
        generation_model: "smollm:135m-base-v0.2-q3_K_S".to_string(),
    };
    OllamaGenerator::new(&config).expect("Failed to create client")
}

#[test]
fn client_configuration() {
    let config = OllamaConfig {
        protocol: "http".to_string(),
        host: "test-host".to_string(),
        port: 1234,
        embedding_model: "unused".to_string(),
        generation_model: "test-model".to_string(),
    };
    let client = OllamaGenerator::new(&config).expect("Failed to create client");

    assert_eq!(client.model, "test-model");
    assert_eq!(client.base_url.host_str(), Some("test-host"));
    assert_eq!(client.base_url.port(), Some(1234));
}

#[test]
fn client_builder_methods() {
    let config = OllamaConfig::default();
    let client = OllamaGenerator::new(&config)
        .expect("Failed to create client")
        .with_timeout(Duration::from_secs(300));

    assert_eq!(client.model(), "smollm:135m-base-v0.2-q3_K_S");
}

#[tokio::test]
async fn generation_request_is_non_streaming() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .and(body_partial_json(serde_json::json!({
            "model": "smollm:135m-base-v0.2-q3_K_S",
            "prompt": "Write a blog post on: [Tales from the tech frontier: decoding AI ethics.]",
            "stream": false,
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "model": "smollm:135m-base-v0.2-q3_K_S",
            "response": "AI ethics is the study of...",
            "done": true,
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let text = tokio::task::spawn_blocking(move || {
        client.generate("Write a blog post on: [Tales from the tech frontier: decoding AI ethics.]")
    })
    .await
    .expect("task should not panic")
    .expect("generation should succeed");

    assert_eq!(text, "AI ethics is the study of...");
}

#[tokio::test]
async fn server_error_surfaces() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let result = tokio::task::spawn_blocking(move || client.generate("anything"))
        .await
        .expect("task should not panic");

    assert!(result.is_err());
}

#[tokio::test]
async fn malformed_response_is_an_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let result = tokio::task::spawn_blocking(move || client.generate("anything"))
        .await
        .expect("task should not panic");

    assert!(result.is_err());
}
