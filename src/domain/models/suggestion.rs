use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// A hit returned by the transformation search index.
///
/// Only `objectID`, `title` and `code` are interpreted; every other attribute
/// of the indexed record, `id` included, is carried along untouched in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawSuggestion")]
pub struct Suggestion {
    #[serde(rename = "objectID")]
    id: String,
    title: String,
    code: String,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

/// Wire shape of a hit. Records are free-form, so missing and null
/// attributes both decode as empty.
#[derive(Deserialize)]
struct RawSuggestion {
    #[serde(rename = "objectID", default, deserialize_with = "null_as_empty")]
    object_id: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    title: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    code: String,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl From<RawSuggestion> for Suggestion {
    fn from(raw: RawSuggestion) -> Self {
        // Records without an objectID fall back to their own `id` attribute
        let id = if raw.object_id.is_empty() {
            raw.extra
                .get("id")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string()
        } else {
            raw.object_id
        };

        Self {
            id,
            title: raw.title,
            code: raw.code,
            extra: raw.extra,
        }
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl Suggestion {
    pub fn new(id: impl Into<String>, title: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            code: code.into(),
            extra: Map::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn extra(&self) -> &Map<String, Value> {
        &self.extra
    }
}
