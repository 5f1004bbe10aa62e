use crate::domain::model::{CsvRow, ProfileRecord};
use crate::utils::error::{EtlError, Result};
use serde_json::Value;

const ADDRESS_PARTS: [&str; 5] = [
    "streetAddress",
    "addressLocality",
    "addressRegion",
    "postalCode",
    "addressCountry",
];

/// Text for one CSV cell. Strings pass through, numbers and booleans are
/// printed, arrays are joined with ", ". Objects (`Country`, `ImageObject`,
/// ...) are shown by the first of `preferred` keys holding text, else as
/// compact JSON.
pub fn cell_text(value: &Value, preferred: &[&str]) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Array(items) => items
            .iter()
            .map(|item| cell_text(item, preferred))
            .filter(|text| !text.is_empty())
            .collect::<Vec<_>>()
            .join(", "),
        Value::Object(obj) => preferred
            .iter()
            .filter_map(|key| obj.get(*key))
            .map(|inner| cell_text(inner, &[]))
            .find(|text| !text.is_empty())
            .unwrap_or_else(|| value.to_string()),
    }
}

fn field_text(record: &ProfileRecord, key: &str, preferred: &[&str]) -> String {
    record
        .field(key)
        .map(|value| cell_text(value, preferred))
        .unwrap_or_default()
}

/// Street, locality, region, postal code and country joined by single
/// spaces. Absent parts still take their slot as an empty segment.
fn address_line(address: &Value) -> String {
    match address {
        Value::Object(obj) => ADDRESS_PARTS
            .iter()
            .map(|part| {
                obj.get(*part)
                    .map(|value| cell_text(value, &["name", "@id"]))
                    .unwrap_or_default()
            })
            .collect::<Vec<_>>()
            .join(" "),
        Value::Array(items) => items
            .iter()
            .map(address_line)
            .collect::<Vec<_>>()
            .join(" / "),
        other => cell_text(other, &[]),
    }
}

/// Flattens a record into the fixed CSV columns.
///
/// A record without an `address` gets an empty Address cell and a warning,
/// so one incomplete profile never sinks the whole export.
pub fn to_row(record: &ProfileRecord) -> CsvRow {
    let name = field_text(record, "name", &["@value"]);

    let address = match record.field("address") {
        Some(address) => address_line(address),
        None => {
            tracing::warn!(
                "⚠️ Record '{}' has no address; Address column left empty",
                if name.is_empty() { "<unnamed>" } else { &name }
            );
            String::new()
        }
    };

    CsvRow {
        kind: field_text(record, "@type", &[]),
        description: field_text(record, "description", &["@value"]),
        telephone: field_text(record, "telephone", &[]),
        address,
        image: field_text(record, "image", &["url", "contentUrl", "@id"]),
        url: field_text(record, "url", &["@id"]),
        name,
    }
}

/// Header row followed by one row per record, `\n`-terminated. The same
/// records always produce the same bytes.
pub fn render_csv(records: &[ProfileRecord]) -> Result<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(CsvRow::HEADER)?;
    for record in records {
        writer.serialize(to_row(record))?;
    }

    writer.into_inner().map_err(|e| EtlError::ProcessingError {
        message: format!("failed to finish CSV output: {}", e),
    })
}
