use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A link to one profile page, as found on a directory page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingRef {
    pub link: String,
}

impl ListingRef {
    pub fn new(link: impl Into<String>) -> Self {
        Self { link: link.into() }
    }
}

/// The JSON-LD block of one profile page, exactly as parsed.
///
/// No shape is imposed: any JSON value is a record, and saving it writes
/// back the same keys in the same order. Field lookups go through
/// [`ProfileRecord::field`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProfileRecord(Value);

impl ProfileRecord {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// The object describing the business. For a block that is an array of
    /// entities, that is the first object carrying a `telephone`, else the
    /// first object.
    pub fn entity(&self) -> Option<&Map<String, Value>> {
        match &self.0 {
            Value::Object(obj) => Some(obj),
            Value::Array(items) => {
                let mut objects = items.iter().filter_map(Value::as_object);
                let first = objects.clone().next();
                objects.find(|obj| obj.contains_key("telephone")).or(first)
            }
            _ => None,
        }
    }

    /// Non-null value of `key` on the entity.
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.entity()
            .and_then(|obj| obj.get(key))
            .filter(|value| !value.is_null())
    }
}

impl From<Value> for ProfileRecord {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

/// One CSV line. Field order is the column order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CsvRow {
    #[serde(rename = "Type")]
    pub kind: String,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Description")]
    pub description: String,
    #[serde(rename = "Telephone")]
    pub telephone: String,
    #[serde(rename = "Address")]
    pub address: String,
    #[serde(rename = "Image")]
    pub image: String,
    #[serde(rename = "URL")]
    pub url: String,
}

impl CsvRow {
    pub const HEADER: [&'static str; 7] = [
        "Type",
        "Name",
        "Description",
        "Telephone",
        "Address",
        "Image",
        "URL",
    ];
}

#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub started_at: DateTime<Utc>,
    /// True when the prior extraction met the threshold and no request was made.
    pub reused_existing: bool,
    pub listings_harvested: Option<usize>,
    pub records: usize,
    pub csv_path: String,
}
