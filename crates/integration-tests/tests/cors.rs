mod harness;

use birdid_config::{AnyOrArray, CorsConfig};
use harness::config::ConfigBuilder;
use harness::mock_upstream::MockUpstream;
use harness::server::TestServer;
use serde_json::json;

fn header<'a>(resp: &'a reqwest::Response, name: &str) -> Option<&'a str> {
    resp.headers().get(name).and_then(|v| v.to_str().ok())
}

#[tokio::test]
async fn preflight_returns_empty_body_with_relay_headers() {
    let server = TestServer::start(ConfigBuilder::new().build()).await.unwrap();

    for path in ["/identify-bird-audio", "/identify-bird-image"] {
        let resp = server
            .client()
            .request(reqwest::Method::OPTIONS, server.url(path))
            .header("Origin", "https://birder.example")
            .header("Access-Control-Request-Method", "POST")
            .header("Access-Control-Request-Headers", "content-type, apikey")
            .send()
            .await
            .unwrap();

        assert_eq!(resp.status(), 200);
        assert_eq!(header(&resp, "access-control-allow-origin"), Some("*"));
        assert_eq!(
            header(&resp, "access-control-allow-headers"),
            Some("authorization,x-client-info,apikey,content-type")
        );
        assert_eq!(header(&resp, "access-control-allow-methods"), Some("POST,OPTIONS"));
        assert!(resp.text().await.unwrap().is_empty());
    }
}

#[tokio::test]
async fn success_and_failure_both_carry_cors_headers() {
    let mock = MockUpstream::start(r#"{"birdName":"Hammerkop"}"#).await.unwrap();
    let server = TestServer::start(ConfigBuilder::new().with_upstream(&mock.base_url()).build())
        .await
        .unwrap();

    let cases = [
        (json!({ "imageBase64": "data:image/png;base64,AA" }), 200),
        (json!({}), 500),
    ];

    for (body, status) in cases {
        let resp = server
            .client()
            .post(server.url("/identify-bird-image"))
            .header("Origin", "https://birder.example")
            .json(&body)
            .send()
            .await
            .unwrap();

        assert_eq!(resp.status(), status);
        assert_eq!(header(&resp, "access-control-allow-origin"), Some("*"));
        assert_eq!(
            header(&resp, "access-control-allow-headers"),
            Some("authorization,x-client-info,apikey,content-type")
        );
    }
}

#[tokio::test]
async fn configured_origin_list_is_honored() {
    let config = ConfigBuilder::new()
        .with_cors(CorsConfig {
            origins: AnyOrArray::List(vec!["https://birder.example".to_owned()]),
            ..CorsConfig::default()
        })
        .build();
    let server = TestServer::start(config).await.unwrap();

    let resp = server
        .client()
        .request(reqwest::Method::OPTIONS, server.url("/identify-bird-audio"))
        .header("Origin", "https://birder.example")
        .header("Access-Control-Request-Method", "POST")
        .send()
        .await
        .unwrap();

    assert_eq!(header(&resp, "access-control-allow-origin"), Some("https://birder.example"));

    let resp = server
        .client()
        .request(reqwest::Method::OPTIONS, server.url("/identify-bird-audio"))
        .header("Origin", "https://elsewhere.example")
        .header("Access-Control-Request-Method", "POST")
        .send()
        .await
        .unwrap();

    assert!(header(&resp, "access-control-allow-origin").is_none());
}
