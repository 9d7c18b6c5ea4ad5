use serde_json::Value;

use crate::record::{IdentificationKind, IdentificationRecord};

const FENCE: &str = "```";

/// Outcome of normalizing a model reply
///
/// Both arms carry a usable record, so callers never branch on a parse error.
#[derive(Debug, Clone, PartialEq)]
pub enum Normalized {
    /// The reply was a JSON object and is returned as-is
    Parsed(IdentificationRecord),
    /// The reply was not a JSON object and was wrapped in a fallback record
    Fallback(IdentificationRecord),
}

impl Normalized {
    pub const fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback(_))
    }

    pub const fn record(&self) -> &IdentificationRecord {
        match self {
            Self::Parsed(record) | Self::Fallback(record) => record,
        }
    }

    pub fn into_record(self) -> IdentificationRecord {
        match self {
            Self::Parsed(record) | Self::Fallback(record) => record,
        }
    }

    /// Metric label for the outcome
    pub const fn outcome(&self) -> &'static str {
        match self {
            Self::Parsed(_) => "parsed",
            Self::Fallback(_) => "fallback",
        }
    }
}

/// Turn a raw model reply into an identification record
///
/// Code fences around the reply are removed, then the remainder is parsed as
/// JSON. Anything other than a JSON object becomes a fallback record holding
/// the fence-stripped text in the narrative field for `kind`.
pub fn normalize(raw: &str, kind: IdentificationKind) -> Normalized {
    let text = strip_fences(raw);

    match serde_json::from_str::<Value>(text) {
        Ok(Value::Object(map)) => Normalized::Parsed(map.into()),
        Ok(other) => {
            tracing::warn!(%kind, json_type = json_type(&other), "model reply is JSON but not an object");
            Normalized::Fallback(IdentificationRecord::fallback(kind, text))
        }
        Err(e) => {
            tracing::warn!(%kind, error = %e, "model reply is not valid JSON");
            Normalized::Fallback(IdentificationRecord::fallback(kind, text))
        }
    }
}

/// Remove Markdown code-fence markers surrounding a reply
///
/// Strips any number of leading and trailing triple-backtick markers, an info
/// string on an opening fence (`json`, `JSON`, or any single word followed by
/// a newline), and surrounding whitespace. Backticks inside the text are left
/// alone. Applying it twice gives the same result as applying it once.
pub fn strip_fences(raw: &str) -> &str {
    let mut text = raw.trim();

    loop {
        let before = text.len();

        if let Some(rest) = text.strip_suffix(FENCE) {
            text = rest.trim();
        }

        if let Some(rest) = text.strip_prefix(FENCE) {
            text = skip_info_string(rest).trim();
        }

        if text.len() == before {
            return text;
        }
    }
}

/// Drop the info string that may follow an opening fence
fn skip_info_string(rest: &str) -> &str {
    if let Some((line, body)) = rest.split_once('\n')
        && is_info_string(line.trim())
    {
        return body;
    }

    // `json` glued to the payload, e.g. "```json{...}"
    match rest.get(..4) {
        Some(tag) if tag.eq_ignore_ascii_case("json") => &rest[4..],
        _ => rest,
    }
}

fn is_info_string(line: &str) -> bool {
    line.chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '+' | '.'))
}

const fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
