mod harness;

use harness::config::ConfigBuilder;
use harness::mock_upstream::{MockUpstream, Reply};
use harness::server::TestServer;
use serde_json::json;

#[tokio::test]
async fn missing_audio_is_reported_without_upstream_calls() {
    let mock = MockUpstream::start("{}").await.unwrap();
    let server = TestServer::start(ConfigBuilder::new().with_upstream(&mock.base_url()).build())
        .await
        .unwrap();

    for body in [json!({}), json!({ "audioBase64": "" }), json!({ "audioBase64": null })] {
        let (status, body) = server.post_json("/identify-bird-audio", body).await;

        assert_eq!(status, 500);
        assert_eq!(body, json!({ "error": "No audio data provided" }));
    }

    assert_eq!(mock.transcription_count(), 0);
    assert_eq!(mock.completion_count(), 0);
}

#[tokio::test]
async fn missing_image_is_reported_without_upstream_calls() {
    let mock = MockUpstream::start("{}").await.unwrap();
    let server = TestServer::start(ConfigBuilder::new().with_upstream(&mock.base_url()).build())
        .await
        .unwrap();

    let (status, body) = server.post_json("/identify-bird-image", json!({})).await;

    assert_eq!(status, 500);
    assert_eq!(body, json!({ "error": "No image data provided" }));
    assert_eq!(mock.completion_count(), 0);
}

#[tokio::test]
async fn unconfigured_credentials_fail_per_request() {
    let server = TestServer::start(ConfigBuilder::new().build()).await.unwrap();

    let (status, body) = server
        .post_json("/identify-bird-audio", json!({ "audioBase64": "Y2hpcnA=" }))
        .await;
    assert_eq!(status, 500);
    assert!(body["error"].as_str().unwrap().starts_with("Configuration error"));

    let (status, body) = server
        .post_json("/identify-bird-image", json!({ "imageBase64": "data:image/png;base64,AA" }))
        .await;
    assert_eq!(status, 500);
    assert!(body["error"].as_str().unwrap().starts_with("Configuration error"));
}

#[tokio::test]
async fn audio_needs_the_gateway_credential_too() {
    let mock = MockUpstream::start("{}").await.unwrap();
    let config = ConfigBuilder::new()
        .with_transcription(&mock.base_url(), "stt-test-key")
        .build();
    let server = TestServer::start(config).await.unwrap();

    let (status, _) = server
        .post_json("/identify-bird-audio", json!({ "audioBase64": "Y2hpcnA=" }))
        .await;

    assert_eq!(status, 500);
    assert_eq!(mock.transcription_count(), 0);
}

#[tokio::test]
async fn gateway_error_status_is_reported_not_echoed() {
    let mock = MockUpstream::start_with(
        Reply::text("chirp"),
        Reply::Status(429, "rate limited for key gateway-test-key".to_owned()),
    )
    .await
    .unwrap();
    let server = TestServer::start(ConfigBuilder::new().with_upstream(&mock.base_url()).build())
        .await
        .unwrap();

    let (status, body) = server
        .post_json("/identify-bird-image", json!({ "imageBase64": "data:image/png;base64,AA" }))
        .await;

    assert_eq!(status, 500);
    assert_eq!(body, json!({ "error": "AI API error: 429" }));
}

#[tokio::test]
async fn empty_choices_are_an_invalid_upstream_response() {
    let mock = MockUpstream::start_with(Reply::text("chirp"), Reply::RawJson(json!({ "choices": [] })))
        .await
        .unwrap();
    let server = TestServer::start(ConfigBuilder::new().with_upstream(&mock.base_url()).build())
        .await
        .unwrap();

    let (status, body) = server
        .post_json("/identify-bird-image", json!({ "imageBase64": "data:image/png;base64,AA" }))
        .await;

    assert_eq!(status, 500);
    assert!(body["error"].as_str().unwrap().starts_with("AI API returned an invalid response"));
}

#[tokio::test]
async fn unreachable_upstream_is_a_connection_error() {
    // Nothing listens on the discard port
    let config = ConfigBuilder::new().with_upstream("http://127.0.0.1:9/v1").build();
    let server = TestServer::start(config).await.unwrap();

    let (status, body) = server
        .post_json("/identify-bird-image", json!({ "imageBase64": "data:image/png;base64,AA" }))
        .await;

    assert_eq!(status, 500);
    assert!(body["error"].as_str().unwrap().starts_with("AI API connection failed"));
}

#[tokio::test]
async fn non_json_body_is_rejected_in_the_error_shape() {
    let server = TestServer::start(ConfigBuilder::new().build()).await.unwrap();

    let resp = server
        .client()
        .post(server.url("/identify-bird-audio"))
        .body("audioBase64=Y2hpcnA=")
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 500);
    let body: serde_json::Value = resp.json().await.unwrap();
    assert!(body["error"].as_str().unwrap().starts_with("Invalid request"));
}
