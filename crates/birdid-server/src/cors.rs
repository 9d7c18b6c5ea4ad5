use birdid_config::{AnyOrArray, CorsConfig};
use http::header::{ACCESS_CONTROL_ALLOW_HEADERS, HeaderName};
use http::{HeaderValue, Method};
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::set_header::SetResponseHeaderLayer;

/// Build the CORS layer wrapping every route
///
/// `CorsLayer` answers any `OPTIONS` request itself with an empty `200`, so
/// pre-flight never reaches the identification handlers.
pub fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let mut layer = CorsLayer::new();

    layer = match &config.origins {
        AnyOrArray::Any => layer.allow_origin(AllowOrigin::any()),
        AnyOrArray::List(origins) => {
            let origins: Vec<_> = origins.iter().filter_map(|o| o.parse().ok()).collect();
            layer.allow_origin(origins)
        }
    };

    layer = match &config.methods {
        AnyOrArray::Any => layer.allow_methods(AllowMethods::any()),
        AnyOrArray::List(methods) => {
            let methods: Vec<Method> = methods.iter().filter_map(|m| m.parse().ok()).collect();
            layer.allow_methods(methods)
        }
    };

    layer = match &config.headers {
        AnyOrArray::Any => layer.allow_headers(AllowHeaders::any()),
        AnyOrArray::List(headers) => {
            let headers: Vec<HeaderName> = headers.iter().filter_map(|h| h.parse().ok()).collect();
            layer.allow_headers(headers)
        }
    };

    if !config.expose_headers.is_empty() {
        let headers: Vec<HeaderName> = config.expose_headers.iter().filter_map(|h| h.parse().ok()).collect();
        layer = layer.expose_headers(headers);
    }

    if let Some(duration) = config.max_age_duration() {
        layer = layer.max_age(duration);
    }

    layer
}

/// Attach `Access-Control-Allow-Headers` to every non-preflight response
///
/// `CorsLayer` only sends it on pre-flight; relay clients expect the same
/// header set on successes and failures alike.
pub fn allow_headers_layer(config: &CorsConfig) -> Option<SetResponseHeaderLayer<HeaderValue>> {
    let value = match &config.headers {
        AnyOrArray::Any => HeaderValue::from_static("*"),
        AnyOrArray::List(headers) => {
            let joined = headers
                .iter()
                .filter(|h| h.parse::<HeaderName>().is_ok())
                .map(String::as_str)
                .collect::<Vec<_>>()
                .join(",");

            if joined.is_empty() {
                return None;
            }

            HeaderValue::from_str(&joined).ok()?
        }
    };

    Some(SetResponseHeaderLayer::if_not_present(ACCESS_CONTROL_ALLOW_HEADERS, value))
}
