use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::Value;

/// Error envelope returned by the Notion API on non-2xx responses.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    pub object: String,
    #[serde(default)]
    pub status: Option<u16>,
    pub code: String,
    pub message: String,
}

impl ApiErrorBody {
    /// Decode an error envelope, returning `None` when the body is not one.
    pub fn parse(body: &str) -> Option<Self> {
        serde_json::from_str::<ApiErrorBody>(body)
            .ok()
            .filter(|envelope| envelope.object == "error")
    }

    pub fn status_or(&self, fallback: StatusCode) -> StatusCode {
        self.status
            .and_then(|code| StatusCode::from_u16(code).ok())
            .unwrap_or(fallback)
    }
}

/// A few fields pulled out of a database object for logging.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DatabaseSummary {
    pub id: Option<String>,
    pub title: Option<String>,
    pub property_count: usize,
}

impl DatabaseSummary {
    pub fn from_value(value: &Value) -> Self {
        let id = value.get("id").and_then(Value::as_str).map(str::to_string);

        // Title is a rich text array; concatenate the plain text runs.
        let title = value.get("title").and_then(Value::as_array).map(|runs| {
            runs.iter()
                .filter_map(|run| run.get("plain_text").and_then(Value::as_str))
                .collect::<String>()
        });

        let property_count = value
            .get("properties")
            .and_then(Value::as_object)
            .map(|props| props.len())
            .unwrap_or(0);

        Self {
            id,
            title,
            property_count,
        }
    }
}
