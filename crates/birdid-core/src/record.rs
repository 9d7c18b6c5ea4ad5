use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Bird name used when the model reply could not be parsed
pub const FALLBACK_BIRD_NAME: &str = "Unable to parse result";

/// Confidence reported when the model reply could not be parsed
pub const FALLBACK_CONFIDENCE: f64 = 0.5;

/// Wire names of the identification record fields
pub mod field {
    pub const BIRD_NAME: &str = "birdName";
    pub const CONFIDENCE: &str = "confidence";
    pub const REASONING: &str = "reasoning";
    pub const KEY_FEATURES: &str = "keyFeatures";
    pub const ALTERNATIVES: &str = "alternatives";
    pub const HABITAT: &str = "habitat";
    pub const CONSERVATION: &str = "conservation";
    pub const FACTS: &str = "facts";
}

/// Which relay path produced a record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IdentificationKind {
    /// Identification from a recorded call or song
    Audio,
    /// Identification from a photograph
    Image,
}

impl IdentificationKind {
    /// Field that receives the raw model reply when it cannot be parsed
    pub const fn narrative_field(self) -> &'static str {
        match self {
            Self::Audio => field::REASONING,
            Self::Image => field::HABITAT,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Audio => "audio",
            Self::Image => "image",
        }
    }
}

impl std::fmt::Display for IdentificationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structured identification returned to the client
///
/// A parsed model reply is kept exactly as the model produced it: fields are
/// neither validated nor coerced, and unknown fields survive. The only
/// guarantee is that the record is a JSON object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IdentificationRecord(Map<String, Value>);

impl IdentificationRecord {
    /// Degraded record carrying an unparseable model reply
    ///
    /// Holds the required fields of the path's response shape, with the raw
    /// text in the path's narrative field.
    pub fn fallback(kind: IdentificationKind, narrative: &str) -> Self {
        let mut map = Map::new();

        map.insert(field::BIRD_NAME.to_owned(), FALLBACK_BIRD_NAME.into());
        map.insert(field::CONFIDENCE.to_owned(), FALLBACK_CONFIDENCE.into());

        match kind {
            IdentificationKind::Audio => {
                map.insert(field::REASONING.to_owned(), narrative.into());
                map.insert(field::ALTERNATIVES.to_owned(), Value::Array(Vec::new()));
            }
            IdentificationKind::Image => {
                map.insert(field::KEY_FEATURES.to_owned(), Value::Array(Vec::new()));
                map.insert(field::ALTERNATIVES.to_owned(), Value::Array(Vec::new()));
                map.insert(field::HABITAT.to_owned(), narrative.into());
                map.insert(field::CONSERVATION.to_owned(), "Unknown".into());
            }
        }

        Self(map)
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    /// Reported species name, when present and a string
    pub fn bird_name(&self) -> Option<&str> {
        self.get(field::BIRD_NAME).and_then(Value::as_str)
    }

    /// Reported confidence, when present and numeric
    ///
    /// Passed through as reported, so it may fall outside `[0, 1]`.
    pub fn confidence(&self) -> Option<f64> {
        self.get(field::CONFIDENCE).and_then(Value::as_f64)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }
}

impl From<Map<String, Value>> for IdentificationRecord {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl From<IdentificationRecord> for Value {
    fn from(record: IdentificationRecord) -> Self {
        Self::Object(record.0)
    }
}
