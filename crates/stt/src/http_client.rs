use std::time::Duration;

use reqwest::Client;

/// Pooled HTTP client for upstream AI providers
///
/// No overall request timeout is set: upstream calls run until the provider
/// answers or the connection drops.
pub fn build_http_client() -> reqwest::Result<Client> {
    let mut headers = http::HeaderMap::new();
    headers.insert(http::header::CONNECTION, http::HeaderValue::from_static("keep-alive"));

    Client::builder()
        .pool_idle_timeout(Some(Duration::from_secs(5)))
        .tcp_nodelay(true)
        .tcp_keepalive(Some(Duration::from_secs(60)))
        .default_headers(headers)
        .build()
}
