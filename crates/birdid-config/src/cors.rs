use std::time::Duration;

use serde::Deserialize;

/// Headers browsers may send to the relay endpoints
const RELAY_HEADERS: [&str; 4] = ["authorization", "x-client-info", "apikey", "content-type"];

/// Methods the relay endpoints answer
const RELAY_METHODS: [&str; 2] = ["POST", "OPTIONS"];

/// Cross-origin headers attached to every response
///
/// The defaults are the permissive relay set: any origin, the Supabase-style
/// client headers, and `POST`/`OPTIONS`.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CorsConfig {
    /// Allowed origins (wildcard "*" or explicit list)
    #[serde(default)]
    pub origins: AnyOrArray,
    /// Allowed HTTP methods (wildcard "*" or explicit list)
    #[serde(default = "default_methods")]
    pub methods: AnyOrArray,
    /// Allowed request headers (wildcard "*" or explicit list)
    #[serde(default = "default_headers")]
    pub headers: AnyOrArray,
    /// Response headers exposed to the browser
    #[serde(default)]
    pub expose_headers: Vec<String>,
    /// Max age for the preflight cache in seconds
    #[serde(default)]
    pub max_age: Option<u64>,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            origins: AnyOrArray::Any,
            methods: default_methods(),
            headers: default_headers(),
            expose_headers: Vec::new(),
            max_age: None,
        }
    }
}

impl CorsConfig {
    /// Get max age as Duration
    pub fn max_age_duration(&self) -> Option<Duration> {
        self.max_age.map(Duration::from_secs)
    }
}

fn default_methods() -> AnyOrArray {
    AnyOrArray::from_iter(RELAY_METHODS)
}

fn default_headers() -> AnyOrArray {
    AnyOrArray::from_iter(RELAY_HEADERS)
}

/// Either a wildcard "*" or explicit list of values
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum AnyOrArray {
    /// Match any value
    #[default]
    Any,
    /// Explicit list
    List(Vec<String>),
}

impl<S: Into<String>> FromIterator<S> for AnyOrArray {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let values: Vec<String> = iter.into_iter().map(Into::into).collect();

        if values.iter().any(|value| value == "*") {
            Self::Any
        } else {
            Self::List(values)
        }
    }
}

impl<'de> Deserialize<'de> for AnyOrArray {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            One(String),
            Many(Vec<String>),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::One(value) => std::iter::once(value).collect(),
            Raw::Many(values) => values.into_iter().collect(),
        })
    }
}
