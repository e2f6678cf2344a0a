//! Parsing of the model-listing response body.

use serde_json::Value;

use super::{ModelDescriptor, GENERATION_CAPABILITY};
use crate::error::CatalogError;

const MODEL_NAME_PREFIX: &str = "models/";

/// String field of a listing entry; wrong types read as absent.
fn str_field<'a>(entry: &'a Value, key: &str) -> Option<&'a str> {
    entry.get(key).and_then(Value::as_str)
}

/// Turn one `models` entry into a descriptor. `None` when it has no name.
fn entry_to_descriptor(entry: &Value) -> Option<ModelDescriptor> {
    let name = str_field(entry, "name")?;
    let id = name.strip_prefix(MODEL_NAME_PREFIX).unwrap_or(name);
    if id.is_empty() {
        return None;
    }

    let supports_generation = entry
        .get("supportedGenerationMethods")
        .and_then(Value::as_array)
        .is_some_and(|methods| {
            methods
                .iter()
                .any(|method| method.as_str() == Some(GENERATION_CAPABILITY))
        });

    let mut display_name = str_field(entry, "displayName")
        .filter(|d| !d.is_empty())
        .unwrap_or(id)
        .to_string();
    let description = str_field(entry, "description")
        .filter(|d| !d.is_empty())
        .map(str::to_string);
    if let Some(ref description) = description {
        display_name.push_str(" - ");
        display_name.push_str(description);
    }

    Some(ModelDescriptor {
        id: id.to_string(),
        display_name,
        description,
        supports_generation,
    })
}

/// Extract descriptors from a successful listing body.
///
/// Fails only when `models` is missing or not an array. Entries without a
/// string `name` are skipped; other fields of the wrong type read as absent.
/// Entries without the generation capability are returned with
/// `supports_generation == false`.
pub fn parse_models_response(body: &Value) -> Result<Vec<ModelDescriptor>, CatalogError> {
    let entries = body
        .get("models")
        .and_then(Value::as_array)
        .ok_or_else(|| {
            CatalogError::MalformedResponse("missing 'models' array in listing response".into())
        })?;

    Ok(entries.iter().filter_map(entry_to_descriptor).collect())
}
